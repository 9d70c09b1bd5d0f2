//! JSON codec for request and response bodies

use serde::Serialize;
use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::user::Record;

/// Converts raw payloads to records and domain values back to bytes
pub struct Codec;

impl Codec {
    /// Decode a request body into a record template.
    ///
    /// Anything other than a JSON object is rejected; `null` is not a template.
    pub fn decode(bytes: &[u8]) -> DecodeResult<Record> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::Empty);
        }
        // Struct deserialization also accepts sequences, so check the shape first.
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Null => Err(DecodeError::NotAnObject("null")),
            Value::Bool(_) => Err(DecodeError::NotAnObject("boolean")),
            Value::Number(_) => Err(DecodeError::NotAnObject("number")),
            Value::String(_) => Err(DecodeError::NotAnObject("string")),
            Value::Array(_) => Err(DecodeError::NotAnObject("array")),
        }
    }

    /// Encode any domain value as JSON.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
        // Domain values hold only strings, integers and timestamps.
        serde_json::to_vec(value).expect("domain value serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_partial_object() {
        let record = Codec::decode(br#"{"name":"bender", "email":"bender@futurama", "tag":666}"#)
            .unwrap();
        assert_eq!(record.name, "bender");
        assert_eq!(record.email, "bender@futurama");
        assert_eq!(record.tag, 666);
        assert!(record.id.is_empty());
        assert!(record.phone.is_empty());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let record = Codec::decode(br#"{"name":"leela","ship":"planet express"}"#).unwrap();
        assert_eq!(record, Record::named("leela"));
    }

    #[test]
    fn test_decode_empty_object_is_blank() {
        assert!(Codec::decode(b"{}").unwrap().is_blank());
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert_eq!(Codec::decode(b""), Err(DecodeError::Empty));
        assert_eq!(Codec::decode(b"  \n"), Err(DecodeError::Empty));
        assert_eq!(Codec::decode(b"null"), Err(DecodeError::NotAnObject("null")));
        assert_eq!(Codec::decode(b"42"), Err(DecodeError::NotAnObject("number")));
        assert_eq!(Codec::decode(b"\"fry\""), Err(DecodeError::NotAnObject("string")));
        assert!(matches!(Codec::decode(b"{\"name\":"), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            Codec::decode(br#"{"tag":"many"}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_arrays() {
        assert_eq!(Codec::decode(b"[]"), Err(DecodeError::NotAnObject("array")));
        assert_eq!(
            Codec::decode(br#"["", "bender"]"#),
            Err(DecodeError::NotAnObject("array"))
        );
        assert_eq!(
            Codec::decode(br#"["id", "amy", "amy@mars", "555", 7, null]"#),
            Err(DecodeError::NotAnObject("array"))
        );
    }

    #[test]
    fn test_encode_then_decode_preserves_fields() {
        let payload = br#"{"id":"abc","name":"amy","email":"amy@mars","phone":"555","tag":7}"#;
        let decoded = Codec::decode(payload).unwrap();
        let reencoded: serde_json::Value = serde_json::from_slice(&Codec::encode(&decoded)).unwrap();

        assert_eq!(
            reencoded,
            json!({
                "id": "abc",
                "name": "amy",
                "email": "amy@mars",
                "phone": "555",
                "tag": 7,
                "timestamp": null
            })
        );
    }
}
