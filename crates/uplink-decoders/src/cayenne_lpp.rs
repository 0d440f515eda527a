use crate::error::{PayloadError, Result};
use serde_json::{json, Map, Value};
use uplink_domain::{DecodeInput, Decoder, DomainError, DomainResult};

// Cayenne LPP sensor type IDs
const TYPE_DIGITAL_INPUT: u8 = 0;
const TYPE_DIGITAL_OUTPUT: u8 = 1;
const TYPE_ANALOG_INPUT: u8 = 2;
const TYPE_ANALOG_OUTPUT: u8 = 3;
const TYPE_ILLUMINANCE: u8 = 101;
const TYPE_PRESENCE: u8 = 102;
const TYPE_TEMPERATURE: u8 = 103;
const TYPE_HUMIDITY: u8 = 104;
const TYPE_ACCELEROMETER: u8 = 113;
const TYPE_BAROMETER: u8 = 115;
const TYPE_GPS: u8 = 136;

/// Cayenne LPP payload routine.
///
/// Output shape is one key per sensor reading, named `<type>_<channel>`
/// (e.g. `temperature_3`), matching what the deployment's dashboards expect.
pub struct CayenneLppDecoder;

impl CayenneLppDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<Value> {
        let mut fields = Map::new();
        let mut offset = 0;

        while offset < bytes.len() {
            let remaining = bytes.len() - offset;
            if remaining < 2 {
                return Err(PayloadError::Truncated {
                    offset,
                    expected: 2,
                    remaining,
                });
            }

            let channel = bytes[offset];
            let type_id = bytes[offset + 1];
            offset += 2;

            let size = segment_size(type_id).ok_or(PayloadError::UnsupportedType(type_id))?;
            if bytes.len() - offset < size {
                return Err(PayloadError::Truncated {
                    offset,
                    expected: size,
                    remaining: bytes.len() - offset,
                });
            }

            let data = &bytes[offset..offset + size];
            offset += size;

            let (name, value) = decode_segment(type_id, data);
            fields.insert(format!("{name}_{channel}"), value);
        }

        Ok(Value::Object(fields))
    }
}

impl Default for CayenneLppDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for CayenneLppDecoder {
    fn decode(&self, input: &DecodeInput) -> DomainResult<Value> {
        self.decode_bytes(&input.bytes)
            .map_err(|e| DomainError::DecodeFailure(e.to_string()))
    }
}

/// Data bytes following the channel/type header, per the Cayenne LPP spec.
fn segment_size(type_id: u8) -> Option<usize> {
    match type_id {
        TYPE_DIGITAL_INPUT | TYPE_DIGITAL_OUTPUT | TYPE_PRESENCE | TYPE_HUMIDITY => Some(1),
        TYPE_ANALOG_INPUT | TYPE_ANALOG_OUTPUT | TYPE_ILLUMINANCE | TYPE_TEMPERATURE
        | TYPE_BAROMETER => Some(2),
        TYPE_ACCELEROMETER => Some(6),
        TYPE_GPS => Some(9),
        _ => None,
    }
}

fn decode_segment(type_id: u8, data: &[u8]) -> (&'static str, Value) {
    match type_id {
        TYPE_DIGITAL_INPUT => ("digital_input", json!(data[0])),
        TYPE_DIGITAL_OUTPUT => ("digital_output", json!(data[0])),
        TYPE_ANALOG_INPUT => ("analog_input", json!(f64::from(i16_be(data)) / 100.0)),
        TYPE_ANALOG_OUTPUT => ("analog_output", json!(f64::from(i16_be(data)) / 100.0)),
        TYPE_ILLUMINANCE => ("illuminance", json!(u16_be(data))),
        TYPE_PRESENCE => ("presence", json!(data[0])),
        TYPE_TEMPERATURE => ("temperature", json!(f64::from(i16_be(data)) / 10.0)),
        TYPE_HUMIDITY => ("humidity", json!(f64::from(data[0]) / 2.0)),
        TYPE_ACCELEROMETER => (
            "accelerometer",
            json!({
                "x": f64::from(i16_be(&data[0..2])) / 1000.0,
                "y": f64::from(i16_be(&data[2..4])) / 1000.0,
                "z": f64::from(i16_be(&data[4..6])) / 1000.0,
            }),
        ),
        TYPE_BAROMETER => ("barometer", json!(f64::from(u16_be(data)) / 10.0)),
        TYPE_GPS => (
            "gps",
            json!({
                "latitude": f64::from(i24_be(&data[0..3])) / 10000.0,
                "longitude": f64::from(i24_be(&data[3..6])) / 10000.0,
                "altitude": f64::from(i24_be(&data[6..9])) / 100.0,
            }),
        ),
        // segment_size already filtered unknown types
        _ => ("unknown", Value::Null),
    }
}

fn i16_be(data: &[u8]) -> i16 {
    i16::from_be_bytes([data[0], data[1]])
}

fn u16_be(data: &[u8]) -> u16 {
    u16::from_be_bytes([data[0], data[1]])
}

fn i24_be(data: &[u8]) -> i32 {
    // Sign-extend 24-bit big-endian
    let value = (i32::from(data[0]) << 24) | (i32::from(data[1]) << 16) | (i32::from(data[2]) << 8);
    value >> 8
}
