//! A value backend outside the crate: a tree whose only scalars are strings and whose
//! integers are bounded.

use bytes::Bytes;
use failure::{bail, Error};
use std::borrow::Cow;
use tnetstring::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum Small {
    Text(String),
    Num(i16),
    Seq(Vec<Small>),
    Pairs(Vec<(String, Small)>),
    Opaque,
}

impl De for Small {
    type Dict = Vec<(String, Small)>;
    type List = Vec<Small>;

    fn de_string(payload: Bytes) -> Result<Small, Error> {
        Ok(Small::Text(String::from_utf8(payload.to_vec())?))
    }

    fn de_integer(literal: &str) -> Result<Small, Error> { Ok(Small::Num(literal.parse()?)) }

    fn de_float(literal: &str) -> Result<Small, Error> { bail!("no floats here: {}", literal) }

    fn de_bool(b: bool) -> Small { Small::Text(b.to_string()) }

    fn de_null() -> Small { Small::Seq(vec![]) }

    fn new_list() -> Vec<Small> { vec![] }

    fn list_append(list: &mut Vec<Small>, item: Small) -> Result<(), Error> {
        if list.len() == 3 {
            bail!("lists hold at most three items")
        }
        list.push(item);
        Ok(())
    }

    fn from_list(list: Vec<Small>) -> Small { Small::Seq(list) }

    fn new_dict() -> Vec<(String, Small)> { vec![] }

    fn dict_insert(dict: &mut Vec<(String, Small)>, k: Small, v: Small) -> Result<(), Error> {
        match k {
            Small::Text(k) => {
                dict.push((k, v));
                Ok(())
            }
            _ => bail!("keys must be text"),
        }
    }

    fn from_dict(dict: Vec<(String, Small)>) -> Small { Small::Pairs(dict) }
}

impl Ser for Small {
    fn shape(&self) -> Result<Shape<'_, Small>, EncodeError> {
        Ok(match self {
            Small::Text(s) => Shape::Str(s.as_bytes()),
            Small::Num(n) => Shape::Integer(Cow::Owned(n.to_string())),
            Small::Seq(items) => Shape::List(Box::new(items.iter())),
            Small::Pairs(ps) => {
                Shape::Dict(Box::new(ps.iter().map(|(k, v)| (Key::Str(k.as_bytes()), v))))
            }
            Small::Opaque => return Err(EncodeError::UnsupportedType("Small::Opaque".into())),
        })
    }
}

#[test]
fn round_trip() {
    let v = Small::Pairs(vec![
        ("a".into(), Small::Num(-3)),
        ("b".into(), Small::Seq(vec![Small::Text("x".into())])),
    ]);
    let wire = dumps(&v).unwrap();
    assert_eq!(wire, b"20:1:a,2:-3#1:b,4:1:x,]}".to_vec());
    assert_eq!(loads::<Small>(wire), Ok(v));
}

#[test]
fn backend_failures_are_reported() {
    let is_backend = |r: Result<Small, DecodeError>| match r {
        Err(DecodeError::Backend(_)) => true,
        _ => false,
    };

    assert!(is_backend(loads("3:1.5^")));
    assert!(is_backend(loads("5:70000#")));
    assert!(is_backend(loads("16:1:1#1:2#1:3#1:4#]")));
    assert!(is_backend(loads("8:1:1#1:a,}")));
    assert!(!is_backend(loads("1:\u{7f},")));
}

#[test]
fn backend_message_is_kept() {
    match loads::<Small>("3:1.5^") {
        Err(e) => assert!(e.to_string().contains("no floats here: 1.5")),
        Ok(v) => panic!("decoded {:?}", v),
    }
}

#[test]
fn unsupported_values() {
    let v = Small::Seq(vec![Small::Num(1), Small::Opaque]);
    assert_eq!(
        dumps(&v),
        Err(EncodeError::UnsupportedType("Small::Opaque".into()))
    );

    let mut out = Vec::new();
    match dump(&v, &mut out) {
        Err(tnetstring::Error::Dump(EncodeError::UnsupportedType(_))) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn null_and_bool_map_through_the_backend() {
    assert_eq!(loads::<Small>("0:~"), Ok(Small::Seq(vec![])));
    assert_eq!(loads::<Small>("4:true!"), Ok(Small::Text("true".into())));
}
