use bytes::Bytes;
use proptest::prelude::*;
use tnet_strategy::*;
use tnetstring::{encoding::*, Tnet};

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(t in arb_tnet()) {
        let enc = dumps(&t).unwrap();
        let dec: Tnet = loads(enc.clone()).unwrap();
        prop_assert_eq!(&dec, &t);

        // re-encoding is byte for byte the same
        prop_assert_eq!(dumps(&dec).unwrap(), enc);
    }

    #[test]
    fn frames_concatenate(ts in prop::collection::vec(arb_tnet(), 0..8)) {
        let mut wire = Vec::new();
        for t in &ts {
            wire.extend(dumps(t).unwrap());
        }

        let mut rest = Bytes::from(wire);
        let mut back = Vec::new();
        while !rest.is_empty() {
            let (t, r) = pop::<Tnet>(rest).unwrap();
            back.push(t);
            rest = r;
        }
        prop_assert_eq!(back, ts);
    }

    #[test]
    fn length_prefix_is_exact(t in arb_tnet()) {
        let enc = dumps(&t).unwrap();
        let colon = enc.iter().position(|&b| b == b':').unwrap();
        let len: usize = std::str::from_utf8(&enc[..colon]).unwrap().parse().unwrap();
        prop_assert_eq!(len, enc.len() - colon - 2);
        prop_assert!(enc[0] != b'0' || colon == 1);
    }

    #[test]
    fn truncation_is_detected(t in arb_tnet(), cut in any::<prop::sample::Index>()) {
        let enc = dumps(&t).unwrap();
        let cut = cut.index(enc.len());
        prop_assert!(loads::<Tnet>(enc[..cut].to_vec()).is_err());
    }

    #[test]
    fn garbage_never_panics(bs in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = loads::<Tnet>(bs.clone());
        let _ = pop::<Tnet>(bs);
    }

    #[test]
    fn stream_matches_buffer(ts in prop::collection::vec(arb_tnet(), 0..8)) {
        let mut wire = Vec::new();
        for t in &ts {
            dump(t, &mut wire).unwrap();
        }

        let mut reader = &wire[..];
        let mut back = Vec::new();
        while let Some(t) = load::<Tnet, _>(&mut reader).unwrap() {
            back.push(t);
        }
        prop_assert_eq!(back, ts);
    }
}
