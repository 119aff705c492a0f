//! Decryption of a whole data bag item.

use serde_json::{Map, Value};
use tracing::debug;

use common::protocol::ID_FIELD;
use common::{DataBagItem, DecryptError};

use crate::field::decrypt_field;

/// Decrypt every field of `raw` except `id`, which is copied verbatim.
///
/// Fields are independent, so iteration order does not affect the result. The
/// output is only built once every field has decrypted; on the first failure
/// the error is returned and all other work is dropped.
///
/// # Errors
///
/// - [`DecryptError::MalformedField`] if `id` is missing or not a string.
/// - [`DecryptError::Field`] wrapping the failure of the first field that does
///   not decrypt.
pub fn decrypt_item(raw: &Map<String, Value>, secret: &[u8]) -> Result<DataBagItem, DecryptError> {
    let id = match raw.get(ID_FIELD) {
        Some(Value::String(id)) => id.clone(),
        Some(_) => {
            return Err(DecryptError::MalformedField(format!(
                "item `{ID_FIELD}` must be a string"
            )))
        }
        None => {
            return Err(DecryptError::MalformedField(format!(
                "item has no `{ID_FIELD}` field"
            )))
        }
    };

    let mut item = raw
        .iter()
        .filter(|(key, _)| key.as_str() != ID_FIELD)
        .map(|(key, value)| {
            debug!(item = %id, field = %key, "decrypting field");
            decrypt_field(value, secret)
                .map(|plaintext| (key.clone(), plaintext))
                .map_err(|e| e.in_field(key.as_str()))
        })
        .collect::<Result<DataBagItem, DecryptError>>()?;

    item.insert(ID_FIELD.to_owned(), id);
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ErrorKind;
    use serde_json::json;

    use crate::testing;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn decrypts_all_fields_and_keeps_id() {
        let secret = b"item-secret";
        let raw = object(json!({
            "id": "db_credentials",
            "user": testing::encrypt_value(secret, "admin", [1u8; 16]),
            "password": testing::encrypt_value(secret, "hunter2", [2u8; 16]),
        }));
        let item = decrypt_item(&raw, secret).unwrap();
        assert_eq!(item.len(), 3);
        assert_eq!(item["id"], "db_credentials");
        assert_eq!(item["user"], "admin");
        assert_eq!(item["password"], "hunter2");
    }

    #[test]
    fn input_order_does_not_matter() {
        let secret = b"item-secret";
        let a = testing::encrypt_value(secret, "alpha", [3u8; 16]);
        let b = testing::encrypt_value(secret, "beta", [4u8; 16]);

        let mut forward = Map::new();
        forward.insert("id".into(), json!("x"));
        forward.insert("a".into(), a.clone());
        forward.insert("b".into(), b.clone());

        let mut reverse = Map::new();
        reverse.insert("b".into(), b);
        reverse.insert("a".into(), a);
        reverse.insert("id".into(), json!("x"));

        let expected: DataBagItem = [("id", "x"), ("a", "alpha"), ("b", "beta")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        assert_eq!(decrypt_item(&forward, secret).unwrap(), expected);
        assert_eq!(decrypt_item(&reverse, secret).unwrap(), expected);
    }

    #[test]
    fn id_only_item() {
        let raw = object(json!({"id": "empty"}));
        let item = decrypt_item(&raw, testing::SECRET).unwrap();
        assert_eq!(item.len(), 1);
        assert_eq!(item["id"], "empty");
    }

    #[test]
    fn fixed_vector_item() {
        let raw = object(json!({"id": "hello", "hello": testing::fixture()}));
        let item = decrypt_item(&raw, testing::SECRET).unwrap();
        assert_eq!(item["hello"], "world");
    }

    #[test]
    fn failing_field_returns_only_the_error() {
        let secret = b"item-secret";
        let raw = object(json!({
            "id": "x",
            "a": testing::encrypt_value(secret, "alpha", [5u8; 16]),
            "b": testing::encrypt_value(b"another secret", "beta", [6u8; 16]),
        }));
        let err = decrypt_item(&raw, secret).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
        assert_eq!(err.field(), Some("b"));
    }

    #[test]
    fn malformed_field_is_named() {
        let raw = object(json!({"id": "x", "broken": {"encrypted_data": "AAAA"}}));
        let err = decrypt_item(&raw, testing::SECRET).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedField);
        assert_eq!(err.field(), Some("broken"));
    }

    #[test]
    fn plain_string_field_is_malformed() {
        let raw = object(json!({"id": "x", "note": "not encrypted"}));
        let err = decrypt_item(&raw, testing::SECRET).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedField);
    }

    #[test]
    fn missing_id() {
        let raw = object(json!({"hello": testing::fixture()}));
        let err = decrypt_item(&raw, testing::SECRET).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedField);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn non_string_id() {
        let raw = object(json!({"id": 7}));
        let err = decrypt_item(&raw, testing::SECRET).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedField);
    }
}
