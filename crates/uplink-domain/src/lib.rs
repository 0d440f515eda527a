pub mod decoder;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod uplink_service;
pub mod validator;

pub use decoder::Decoder;
pub use envelope::{DecodeInput, DeviceDescriptor, Uplink, UplinkEnvelope, UplinkMessage};
pub use error::{DomainError, DomainResult};
pub use registry::DecoderRegistry;
pub use resolver::{validate_decoder_name, DecoderResolver, MAX_DECODER_NAME_LEN};
pub use uplink_service::UplinkService;
pub use validator::{EnvelopeValidator, ValidUplink};

#[cfg(any(test, feature = "testing"))]
pub use decoder::MockDecoder;
#[cfg(any(test, feature = "testing"))]
pub use registry::MockDecoderRegistry;
