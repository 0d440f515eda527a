use crate::envelope::{DecodeInput, UplinkEnvelope};
use crate::error::{DomainError, DomainResult};
use crate::registry::DecoderRegistry;
use crate::resolver::DecoderResolver;
use crate::validator::EnvelopeValidator;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// The decode dispatch pipeline.
///
/// Flow:
/// 1. Validate the envelope shape (no decoder work for malformed input)
/// 2. Resolve the decoder identifier from the device descriptor
/// 3. Look the routine up in the registry
/// 4. Base64-decode the payload and build the normalized decoder input
/// 5. Invoke the routine on a blocking worker under the decode timeout
///
/// The routine's output is returned unchanged; every failure is terminal for
/// the request and nothing is retried.
pub struct UplinkService {
    validator: EnvelopeValidator,
    resolver: DecoderResolver,
    registry: Arc<dyn DecoderRegistry>,
    decode_timeout: Duration,
}

impl UplinkService {
    pub fn new(
        validator: EnvelopeValidator,
        resolver: DecoderResolver,
        registry: Arc<dyn DecoderRegistry>,
        decode_timeout: Duration,
    ) -> Self {
        Self {
            validator,
            resolver,
            registry,
            decode_timeout,
        }
    }

    /// Decode one uplink envelope into its application payload.
    #[instrument(skip(self, envelope))]
    pub async fn decode_uplink(
        &self,
        envelope: &UplinkEnvelope,
    ) -> DomainResult<serde_json::Value> {
        let (device, uplink) = self.validator.validate(envelope)?;
        let name = self.resolver.resolve(device)?;

        let decoder = self
            .registry
            .get(&name)
            .ok_or_else(|| DomainError::DecoderNotFound {
                name: name.clone(),
                path: self.registry.entry_path(&name),
            })?;

        let bytes = BASE64.decode(uplink.frm_payload.as_bytes()).map_err(|e| {
            DomainError::MalformedEnvelope(format!("frm_payload is not valid base64: {e}"))
        })?;

        debug!(
            decoder = %name,
            f_port = uplink.f_port,
            payload_size = bytes.len(),
            "dispatching uplink"
        );

        let input = DecodeInput {
            bytes,
            f_port: uplink.f_port,
            device: device.clone(),
        };

        // The routine is CPU-bound and of operator-defined complexity; run it
        // off the async workers and bound how long a request can hold one.
        let join = tokio::task::spawn_blocking(move || decoder.decode(&input));
        match tokio::time::timeout(self.decode_timeout, join).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(DomainError::DecodeFailure(format!(
                "decoder {name} aborted: {join_err}"
            ))),
            Err(_) => {
                warn!(decoder = %name, "decode invocation timed out");
                Err(DomainError::DecodeTimeout {
                    name,
                    timeout_ms: self.decode_timeout.as_millis() as u64,
                })
            }
        }
    }
}
