mod catalog;
mod cayenne_lpp;
mod error;
mod raw;
mod text;

pub use catalog::{CatalogEntry, CatalogError, CatalogRegistry};
pub use cayenne_lpp::CayenneLppDecoder;
pub use error::{PayloadError, Result};
pub use raw::RawBytesDecoder;
pub use text::Utf8TextDecoder;
