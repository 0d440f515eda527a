use crate::envelope::DeviceDescriptor;
use crate::error::{DomainError, DomainResult};

/// Longest decoder name accepted from a device descriptor.
pub const MAX_DECODER_NAME_LEN: usize = 64;

/// Check a decoder name against the identifier allow-list.
///
/// Names select catalog entries, so anything outside ASCII alphanumerics,
/// `-` and `_` is rejected before it can reach a lookup. Resolution fails
/// closed: there is no sanitization or normalization.
pub fn validate_decoder_name(name: &str) -> DomainResult<()> {
    if name.is_empty() || name.len() > MAX_DECODER_NAME_LEN {
        return Err(DomainError::InvalidDecoderName(format!(
            "name must be 1..={MAX_DECODER_NAME_LEN} characters, got {}",
            name.len()
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(DomainError::InvalidDecoderName(format!(
            "name {name:?} contains characters outside [A-Za-z0-9_-]"
        )));
    }
    Ok(())
}

/// Derives the decoder identifier for a device.
///
/// Precedence: current override (`source_ids.decoder_name`), then the
/// deprecated override location (`properties.decoder_name`, compatibility
/// shim), then the TTN application identifier.
#[derive(Debug, Clone)]
pub struct DecoderResolver {
    honor_legacy_override: bool,
}

impl DecoderResolver {
    pub fn new(honor_legacy_override: bool) -> Self {
        Self {
            honor_legacy_override,
        }
    }

    pub fn resolve(&self, device: &DeviceDescriptor) -> DomainResult<String> {
        let legacy = if self.honor_legacy_override {
            device.legacy_decoder_override()
        } else {
            None
        };

        let name = device
            .decoder_override()
            .or(legacy)
            .or_else(|| device.application_id())
            .ok_or_else(|| {
                DomainError::MalformedEnvelope(
                    "device carries no decoder override and no TTN application id".to_string(),
                )
            })?;

        validate_decoder_name(name)?;
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(value: serde_json::Value) -> DeviceDescriptor {
        serde_json::from_value(value).unwrap()
    }

    fn device_with_app_id(app_id: &str) -> DeviceDescriptor {
        device(json!({
            "properties": {
                "ttn": {"ids": {"application_ids": {"application_id": app_id}}}
            }
        }))
    }

    #[test]
    fn test_default_is_application_id() {
        let resolver = DecoderResolver::new(true);

        let name = resolver.resolve(&device_with_app_id("app-a")).unwrap();

        assert_eq!(name, "app-a");
    }

    #[test]
    fn test_current_override_takes_precedence() {
        let resolver = DecoderResolver::new(true);
        let dev = device(json!({
            "properties": {
                "ttn": {"ids": {"application_ids": {"application_id": "app-a"}}}
            },
            "source_ids": {"decoder_name": "decoder-b"}
        }));

        assert_eq!(resolver.resolve(&dev).unwrap(), "decoder-b");
    }

    #[test]
    fn test_legacy_override_honored_when_enabled() {
        let dev = device(json!({
            "properties": {
                "decoder_name": "legacy-b",
                "ttn": {"ids": {"application_ids": {"application_id": "app-a"}}}
            }
        }));

        assert_eq!(DecoderResolver::new(true).resolve(&dev).unwrap(), "legacy-b");
        assert_eq!(DecoderResolver::new(false).resolve(&dev).unwrap(), "app-a");
    }

    #[test]
    fn test_current_override_beats_legacy_override() {
        let resolver = DecoderResolver::new(true);
        let dev = device(json!({
            "properties": {"decoder_name": "legacy-b"},
            "source_ids": {"decoder_name": "current-c"}
        }));

        assert_eq!(resolver.resolve(&dev).unwrap(), "current-c");
    }

    #[test]
    fn test_no_identity_is_rejected() {
        let resolver = DecoderResolver::new(true);

        let result = resolver.resolve(&DeviceDescriptor::default());

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_traversal_shaped_name_is_rejected() {
        let resolver = DecoderResolver::new(true);
        let dev = device(json!({
            "source_ids": {"decoder_name": "../../etc/passwd"}
        }));

        let result = resolver.resolve(&dev);

        assert!(matches!(result, Err(DomainError::InvalidDecoderName(_))));
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(validate_decoder_name("").is_err());
        assert!(validate_decoder_name(&"a".repeat(MAX_DECODER_NAME_LEN)).is_ok());
        assert!(validate_decoder_name(&"a".repeat(MAX_DECODER_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_name_charset() {
        assert!(validate_decoder_name("oai-test_7").is_ok());
        assert!(validate_decoder_name("with space").is_err());
        assert!(validate_decoder_name("dot.dot").is_err());
        assert!(validate_decoder_name("slash/name").is_err());
    }
}
