use crate::envelope::DecodeInput;
use crate::error::DomainResult;

/// A per-application decoding routine.
///
/// Implementations transform raw uplink bytes (plus port and device context)
/// into a JSON-serializable value. Routines must be pure functions of their
/// input: the dispatcher treats equal inputs as yielding equal outputs and
/// carries no decoder state between requests.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Decoder: Send + Sync {
    /// Decode one uplink.
    ///
    /// # Returns
    /// The decoded application payload. The dispatcher passes the value
    /// through unchanged; its shape is owned by the routine.
    fn decode(&self, input: &DecodeInput) -> DomainResult<serde_json::Value>;
}
