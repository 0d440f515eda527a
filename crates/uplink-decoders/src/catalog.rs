use crate::{CayenneLppDecoder, RawBytesDecoder, Utf8TextDecoder};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uplink_domain::{validate_decoder_name, Decoder, DecoderRegistry};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog entry {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog entry {} has a non-allow-listed identifier: {reason}", .path.display())]
    InvalidIdentifier { path: PathBuf, reason: String },

    #[error("catalog entry {} resolves outside the catalog root", .path.display())]
    OutsideRoot { path: PathBuf },
}

/// One catalog file: selects a compiled-in routine and its options.
///
/// ```json
/// {"routine": "utf8_text", "field": "text"}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "routine", rename_all = "snake_case")]
pub enum CatalogEntry {
    CayenneLpp,
    Utf8Text {
        #[serde(default = "default_text_field")]
        field: String,
    },
    RawBytes,
}

fn default_text_field() -> String {
    "text".to_string()
}

impl CatalogEntry {
    fn build(&self) -> Arc<dyn Decoder> {
        match self {
            CatalogEntry::CayenneLpp => Arc::new(CayenneLppDecoder::new()),
            CatalogEntry::Utf8Text { field } => Arc::new(Utf8TextDecoder::new(field.clone())),
            CatalogEntry::RawBytes => Arc::new(RawBytesDecoder::new()),
        }
    }
}

/// The decoder dispatch table, populated once at startup from the
/// operator-controlled catalog directory (one `<identifier>.json` per
/// application).
///
/// Nothing is read from disk, parsed, or compiled after construction;
/// request-time identifiers only index the in-memory map. File stems outside
/// the identifier allow-list and entries resolving outside the canonicalized
/// root are rejected at load time.
pub struct CatalogRegistry {
    root: PathBuf,
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl CatalogRegistry {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let root = root
            .as_ref()
            .canonicalize()
            .map_err(|source| CatalogError::Io {
                path: root.as_ref().to_path_buf(),
                source,
            })?;
        if !root.is_dir() {
            return Err(CatalogError::NotADirectory(root));
        }

        let mut decoders: HashMap<String, Arc<dyn Decoder>> = HashMap::new();
        let entries = fs::read_dir(&root).map_err(|source| CatalogError::Io {
            path: root.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::Io {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                debug!(path = %path.display(), "skipping non-catalog file");
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| CatalogError::InvalidIdentifier {
                    path: path.clone(),
                    reason: "file stem is not valid UTF-8".to_string(),
                })?
                .to_string();
            validate_decoder_name(&stem).map_err(|e| CatalogError::InvalidIdentifier {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let resolved = path.canonicalize().map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            if !resolved.starts_with(&root) {
                return Err(CatalogError::OutsideRoot { path });
            }

            let raw = fs::read_to_string(&resolved).map_err(|source| CatalogError::Io {
                path: resolved.clone(),
                source,
            })?;
            let parsed: CatalogEntry =
                serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                    path: resolved.clone(),
                    source,
                })?;

            info!(identifier = %stem, routine = ?parsed, "registered decoder");
            decoders.insert(stem, parsed.build());
        }

        Ok(Self { root, decoders })
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl DecoderRegistry for CatalogRegistry {
    fn get(&self, name: &str) -> Option<Arc<dyn Decoder>> {
        self.decoders.get(name).cloned()
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}
