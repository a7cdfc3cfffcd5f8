//! [`serde_json::Value`] as a value backend.
//!
//! JSON is narrower than tnetstrings, so decoding into a [`Value`] fails with
//! [`DecodeError::Backend`](crate::DecodeError::Backend) for bytestrings that are not
//! UTF-8, dictionary keys that are not bytestrings, integers outside the `i64`/`u64`
//! range and non-finite floats. Every [`Value`] can be encoded.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use tnetstring::prelude::*;
//!
//! let v: Value = loads("24:4:name,3:bob,3:age,2:42#}").unwrap();
//! assert_eq!(v, json!({"name": "bob", "age": 42}));
//!
//! assert_eq!(dumps(&json!([1.0, null])).unwrap(), b"9:3:1.0^0:~]".to_vec());
//! ```

use crate::{
    encoding::{De, Key, Ser, Shape},
    errors::EncodeError,
};
use bytes::Bytes;
use failure::{bail, format_err, Error};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

impl De for Value {
    type Dict = Map<String, Value>;
    type List = Vec<Value>;

    fn de_string(payload: Bytes) -> Result<Value, Error> {
        Ok(Value::String(String::from_utf8(payload.to_vec())?))
    }

    fn de_integer(literal: &str) -> Result<Value, Error> {
        if let Ok(i) = literal.parse::<i64>() {
            return Ok(Value::from(i));
        }
        match literal.parse::<u64>() {
            Ok(u) => Ok(Value::from(u)),
            Err(_) => bail!("integer {} does not fit in 64 bits", literal),
        }
    }

    fn de_float(literal: &str) -> Result<Value, Error> {
        let f: f64 = literal.parse()?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format_err!("JSON cannot represent the float {}", literal))
    }

    fn de_bool(b: bool) -> Value { Value::Bool(b) }

    fn de_null() -> Value { Value::Null }

    fn new_list() -> Vec<Value> { Vec::new() }

    fn list_append(list: &mut Vec<Value>, item: Value) -> Result<(), Error> {
        list.push(item);
        Ok(())
    }

    fn from_list(list: Vec<Value>) -> Value { Value::Array(list) }

    fn new_dict() -> Map<String, Value> { Map::new() }

    fn dict_insert(dict: &mut Map<String, Value>, key: Value, value: Value) -> Result<(), Error> {
        match key {
            Value::String(k) => {
                dict.insert(k, value);
                Ok(())
            }
            other => bail!("JSON object keys must be strings, not {}", other),
        }
    }

    fn from_dict(dict: Map<String, Value>) -> Value { Value::Object(dict) }
}

impl Ser for Value {
    fn shape(&self) -> Result<Shape<'_, Value>, EncodeError> {
        Ok(match self {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) if n.is_f64() => {
                let f = n
                    .as_f64()
                    .ok_or_else(|| EncodeError::Backend(format!("unreadable number {}", n)))?;
                Shape::Float(Cow::Owned(format!("{:?}", f)))
            }
            Value::Number(n) => Shape::Integer(Cow::Owned(n.to_string())),
            Value::String(s) => Shape::Str(s.as_bytes()),
            Value::Array(items) => Shape::List(Box::new(items.iter())),
            Value::Object(m) => Shape::Dict(Box::new(
                m.iter().map(|(k, v)| (Key::Str(k.as_bytes()), v)),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        encoding::{dumps, loads},
        errors::DecodeError,
    };
    use serde_json::{json, Value};

    fn backend_err(input: &'static [u8]) -> bool {
        match loads::<Value>(input) {
            Err(DecodeError::Backend(_)) => true,
            _ => false,
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(loads::<Value>("0:~"), Ok(Value::Null));
        assert_eq!(loads::<Value>("4:true!"), Ok(json!(true)));
        assert_eq!(loads::<Value>("2:-7#"), Ok(json!(-7)));
        assert_eq!(
            loads::<Value>("20:18446744073709551615#"),
            Ok(json!(u64::max_value()))
        );
        assert_eq!(loads::<Value>("4:0.25^"), Ok(json!(0.25)));
        assert_eq!(loads::<Value>("2:hi,"), Ok(json!("hi")));
    }

    #[test]
    fn rejects_what_json_cannot_hold() {
        assert!(backend_err(b"2:\xff\xfe,"));
        assert!(backend_err(b"8:1:1#1:a,}"));
        assert!(backend_err(b"20:99999999999999999999#"));
        assert!(backend_err(b"3:inf^"));
        assert!(backend_err(b"3:NaN^"));
    }

    #[test]
    fn grammar_errors_come_first() {
        assert_eq!(loads::<Value>("3:1 2#"), Err(DecodeError::InvalidNumber));
        assert_eq!(loads::<Value>("5:12345"), Err(DecodeError::TruncatedInput));
    }

    #[test]
    fn encode_object() {
        let v = json!({"a": 1, "b": [true, null, 1.5]});
        let wire = dumps(&v).unwrap();
        assert_eq!(wire, b"32:1:a,1:1#1:b,16:4:true!0:~3:1.5^]}".to_vec());
        assert_eq!(loads::<Value>(wire), Ok(v));
    }

    #[test]
    fn integral_floats_stay_floats() {
        let wire = dumps(&json!(2.0)).unwrap();
        assert_eq!(wire, b"3:2.0^".to_vec());
        assert!(loads::<Value>(wire).unwrap().is_f64());
    }
}
