use crate::decoder::Decoder;
use std::path::PathBuf;
use std::sync::Arc;

/// Maps decoder identifiers to routines.
///
/// Implementations own the trusted catalog; lookups are infallible so the
/// dispatch service owns the not-found taxonomy. `entry_path` reports where
/// the catalog entry for a name would live — diagnostics only, nothing is
/// ever read from it at request time.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait DecoderRegistry: Send + Sync {
    /// Look up a routine by its identifier.
    fn get(&self, name: &str) -> Option<Arc<dyn Decoder>>;

    /// The catalog location that would hold the entry for `name`.
    fn entry_path(&self, name: &str) -> PathBuf;
}
