use crate::error::PayloadError;
use serde_json::{Map, Value};
use uplink_domain::{DecodeInput, Decoder, DomainError, DomainResult};

/// Routine for devices that uplink plain UTF-8 text.
///
/// Output is a single-field object; the field name is catalog-configurable
/// (defaults to `text`).
pub struct Utf8TextDecoder {
    field: String,
}

impl Utf8TextDecoder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Default for Utf8TextDecoder {
    fn default() -> Self {
        Self::new("text")
    }
}

impl Decoder for Utf8TextDecoder {
    fn decode(&self, input: &DecodeInput) -> DomainResult<Value> {
        let text = std::str::from_utf8(&input.bytes)
            .map_err(|e| DomainError::DecodeFailure(PayloadError::NotUtf8(e).to_string()))?;

        let mut fields = Map::new();
        fields.insert(self.field.clone(), Value::String(text.to_string()));
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(bytes: &[u8]) -> DecodeInput {
        DecodeInput {
            bytes: bytes.to_vec(),
            f_port: 1,
            device: Default::default(),
        }
    }

    #[test]
    fn test_decodes_utf8_bytes() {
        let result = Utf8TextDecoder::default().decode(&input(b"Hello")).unwrap();
        assert_eq!(result, json!({"text": "Hello"}));
    }

    #[test]
    fn test_empty_payload_is_empty_string() {
        let result = Utf8TextDecoder::default().decode(&input(b"")).unwrap();
        assert_eq!(result, json!({"text": ""}));
    }

    #[test]
    fn test_custom_field_name() {
        let result = Utf8TextDecoder::new("message")
            .decode(&input(b"ok"))
            .unwrap();
        assert_eq!(result, json!({"message": "ok"}));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let result = Utf8TextDecoder::default().decode(&input(&[0xFF, 0xFE]));
        assert!(matches!(result, Err(DomainError::DecodeFailure(_))));
    }
}
