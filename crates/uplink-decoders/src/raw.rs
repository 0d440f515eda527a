use serde_json::{json, Value};
use uplink_domain::{DecodeInput, Decoder, DomainResult};

/// Fallback routine for applications without a structured format: reports the
/// port, length and hex rendering of the payload without interpreting it.
pub struct RawBytesDecoder;

impl RawBytesDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RawBytesDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RawBytesDecoder {
    fn decode(&self, input: &DecodeInput) -> DomainResult<Value> {
        let hex: String = input.bytes.iter().map(|b| format!("{b:02x}")).collect();
        Ok(json!({
            "f_port": input.f_port,
            "length": input.bytes.len(),
            "payload_hex": hex,
        }))
    }
}
