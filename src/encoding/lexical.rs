//! Strict grammar for numeric payloads.
//!
//! A payload is a number only if the whole of it is one: no whitespace, no leading `+`,
//! no trailing garbage. Backends receive literals that already passed these checks.

fn digits(bs: &[u8]) -> usize { bs.iter().take_while(|b| b.is_ascii_digit()).count() }

fn unsigned(bs: &[u8]) -> &[u8] {
    match bs.split_first() {
        Some((b'-', rest)) => rest,
        _ => bs,
    }
}

/// `-?[0-9]+`
pub(crate) fn is_integer(bs: &[u8]) -> bool {
    let body = unsigned(bs);
    !body.is_empty() && digits(body) == body.len()
}

/// `-?` followed by a decimal literal with optional fraction and exponent, or one of the
/// non-finite spellings `inf`, `infinity`, `nan` in any ASCII case.
pub(crate) fn is_float(bs: &[u8]) -> bool {
    let body = unsigned(bs);
    if is_non_finite(body) {
        return true;
    }

    let int_len = digits(body);
    let mut rest = &body[int_len..];
    let mut frac_len = 0;
    if let Some((b'.', after)) = rest.split_first() {
        frac_len = digits(after);
        rest = &after[frac_len..];
    }
    if int_len + frac_len == 0 {
        return false;
    }

    match rest.split_first() {
        None => true,
        Some((b'e', exp)) | Some((b'E', exp)) => {
            let exp = match exp.split_first() {
                Some((b'+', e)) | Some((b'-', e)) => e,
                _ => exp,
            };
            !exp.is_empty() && digits(exp) == exp.len()
        }
        Some(_) => false,
    }
}

fn is_non_finite(body: &[u8]) -> bool {
    [&b"inf"[..], &b"infinity"[..], &b"nan"[..]]
        .iter()
        .any(|name| body.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        for ok in &["0", "12345", "-7", "007", "-0", "99999999999999999999999"] {
            assert!(is_integer(ok.as_bytes()), "{}", ok);
        }
        for bad in &["", "-", "+1", " 1", "1 ", "1 2", "--1", "1-", "1.0", "0x10", "1_000"] {
            assert!(!is_integer(bad.as_bytes()), "{}", bad);
        }
    }

    #[test]
    fn floats() {
        for ok in &[
            "1.5", "-1.5", "0", "1.", ".5", "1e10", "1E10", "1e+16", "2.5e-3", "-inf", "inf",
            "Infinity", "NaN", "nan",
        ] {
            assert!(is_float(ok.as_bytes()), "{}", ok);
        }
        for bad in &[
            "", ".", "-", "+1.0", " 1.0", "1.0 ", "1..0", "1e", "1e+", "e5", "1.0f", "--1",
            "1,5", "infinit", "+inf",
        ] {
            assert!(!is_float(bad.as_bytes()), "{}", bad);
        }
    }
}
