use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound webhook body: device identity plus the network-server message.
///
/// Both fields are required for processing but optional at the serde layer so
/// absence surfaces as `MalformedEnvelope` instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UplinkEnvelope {
    pub device: Option<DeviceDescriptor>,
    pub message: Option<UplinkMessage>,
}

/// Identity and metadata for the reporting device.
///
/// The `properties` tree is network-server defined and open-ended; decoders
/// receive the whole descriptor, so unknown keys are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    #[serde(default)]
    pub properties: Map<String, Value>,

    /// Per-source identity fields (later wire revisions keep the decoder
    /// override here).
    #[serde(default)]
    pub source_ids: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceDescriptor {
    /// The TTN application identifier, the default decoder name.
    pub fn application_id(&self) -> Option<&str> {
        self.properties
            .get("ttn")?
            .get("ids")?
            .get("application_ids")?
            .get("application_id")?
            .as_str()
    }

    /// Explicit decoder override at its current location.
    pub fn decoder_override(&self) -> Option<&str> {
        self.source_ids.get("decoder_name")?.as_str()
    }

    /// Explicit decoder override at the deprecated location (earliest wire
    /// revision stored it directly under `properties`).
    pub fn legacy_decoder_override(&self) -> Option<&str> {
        self.properties.get("decoder_name")?.as_str()
    }
}

/// Network-server message. Polymorphic: only messages carrying
/// `uplink_message` are decodable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UplinkMessage {
    pub uplink_message: Option<Uplink>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The radio uplink itself. All fields are optional on the wire; the
/// validator decides which are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Uplink {
    /// Application payload bytes, base64-encoded in transit.
    pub frm_payload: Option<String>,

    /// Channel number multiplexing payload formats on one device.
    pub f_port: Option<i64>,

    pub received_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalized decoder input: decoded payload bytes, port, and the full
/// device descriptor for decoders that need device context.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeInput {
    pub bytes: Vec<u8>,
    pub f_port: i64,
    pub device: DeviceDescriptor,
}
