use crate::envelope::{DeviceDescriptor, Uplink, UplinkEnvelope};
use crate::error::{DomainError, DomainResult};

/// Structural fields extracted from a valid uplink envelope.
///
/// `frm_payload` is still base64 at this point; only presence has been
/// established. Empty payloads and `f_port = 0` are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUplink {
    pub frm_payload: String,
    pub f_port: i64,
    pub received_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Checks the inbound envelope has the minimum shape required for decoding.
///
/// No decoder is resolved or invoked for an envelope that fails here.
#[derive(Debug, Clone)]
pub struct EnvelopeValidator {
    /// The earliest wire revision required `received_at` on every uplink;
    /// later revisions dropped the field.
    require_received_at: bool,
}

impl EnvelopeValidator {
    pub fn new(require_received_at: bool) -> Self {
        Self {
            require_received_at,
        }
    }

    /// Validate the envelope, returning the device and the uplink fields
    /// needed for dispatch.
    pub fn validate<'a>(
        &self,
        envelope: &'a UplinkEnvelope,
    ) -> DomainResult<(&'a DeviceDescriptor, ValidUplink)> {
        let device = envelope
            .device
            .as_ref()
            .ok_or_else(|| missing_field("device"))?;
        let message = envelope
            .message
            .as_ref()
            .ok_or_else(|| missing_field("message"))?;

        let uplink: &Uplink = message
            .uplink_message
            .as_ref()
            .ok_or_else(|| missing_field("message.uplink_message"))?;

        let frm_payload = uplink
            .frm_payload
            .as_ref()
            .ok_or_else(|| missing_field("uplink_message.frm_payload"))?;
        let f_port = uplink
            .f_port
            .ok_or_else(|| missing_field("uplink_message.f_port"))?;

        if self.require_received_at && uplink.received_at.is_none() {
            return Err(missing_field("uplink_message.received_at"));
        }

        Ok((
            device,
            ValidUplink {
                frm_payload: frm_payload.clone(),
                f_port,
                received_at: uplink.received_at,
            },
        ))
    }
}

fn missing_field(field: &str) -> DomainError {
    DomainError::MalformedEnvelope(format!("missing required field: {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::UplinkMessage;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> UplinkEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn full_envelope() -> UplinkEnvelope {
        envelope(json!({
            "device": {"properties": {}},
            "message": {
                "uplink_message": {
                    "frm_payload": "SGVsbG8=",
                    "f_port": 1,
                    "received_at": "2023-04-18T10:46:52.395Z"
                }
            }
        }))
    }

    #[test]
    fn test_valid_envelope_passes() {
        let validator = EnvelopeValidator::new(false);

        let (_, uplink) = validator.validate(&full_envelope()).unwrap();

        assert_eq!(uplink.frm_payload, "SGVsbG8=");
        assert_eq!(uplink.f_port, 1);
        assert!(uplink.received_at.is_some());
    }

    #[test]
    fn test_missing_device_is_rejected() {
        let validator = EnvelopeValidator::new(false);
        let mut env = full_envelope();
        env.device = None;

        let result = validator.validate(&env);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_missing_message_is_rejected() {
        let validator = EnvelopeValidator::new(false);
        let mut env = full_envelope();
        env.message = None;

        let result = validator.validate(&env);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_non_uplink_message_is_rejected() {
        let validator = EnvelopeValidator::new(false);
        let mut env = full_envelope();
        env.message = Some(UplinkMessage::default());

        let result = validator.validate(&env);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_missing_frm_payload_is_rejected() {
        let validator = EnvelopeValidator::new(false);
        let env = envelope(json!({
            "device": {"properties": {}},
            "message": {"uplink_message": {"f_port": 1}}
        }));

        let result = validator.validate(&env);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_missing_f_port_is_rejected() {
        let validator = EnvelopeValidator::new(false);
        let env = envelope(json!({
            "device": {"properties": {}},
            "message": {"uplink_message": {"frm_payload": "SGVsbG8="}}
        }));

        let result = validator.validate(&env);

        assert!(matches!(result, Err(DomainError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_zero_port_empty_payload_is_valid_shape() {
        // Presence is what is checked, not non-emptiness.
        let validator = EnvelopeValidator::new(false);
        let env = envelope(json!({
            "device": {"properties": {}},
            "message": {"uplink_message": {"frm_payload": "", "f_port": 0}}
        }));

        let (_, uplink) = validator.validate(&env).unwrap();

        assert_eq!(uplink.frm_payload, "");
        assert_eq!(uplink.f_port, 0);
    }

    #[test]
    fn test_received_at_required_only_when_configured() {
        let env = envelope(json!({
            "device": {"properties": {}},
            "message": {"uplink_message": {"frm_payload": "SGVsbG8=", "f_port": 1}}
        }));

        assert!(EnvelopeValidator::new(false).validate(&env).is_ok());
        assert!(matches!(
            EnvelopeValidator::new(true).validate(&env),
            Err(DomainError::MalformedEnvelope(_))
        ));
    }
}
