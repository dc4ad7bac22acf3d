//! Deterministic serialization of flattened configuration.
//!
//! Both encodings sort entries by key before writing, so the bytes produced
//! depend only on the mapping's contents, never on the order it was built in.
//!
//! # Key Types
//!
//! - [`Format`] -- `xml` (default) or `standard` properties
//! - [`StoreError`] -- I/O failures and unknown format names

pub mod error;
pub mod format;
pub mod properties;
pub mod xml;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use confnorm_model::FlatConfig;
use tracing::debug;

pub use error::{StoreError, StoreResult};
pub use format::Format;

/// Encode `map` in `format`.
pub fn to_bytes(format: Format, map: &FlatConfig) -> Vec<u8> {
    match format {
        Format::Xml => xml::render(map).into_bytes(),
        Format::Standard => properties::render(map).into_bytes(),
    }
}

/// Write `map` to `sink` as sorted `key=value` lines.
pub fn write_properties<W: Write + ?Sized>(map: &FlatConfig, sink: &mut W) -> StoreResult<()> {
    write(Format::Standard, map, sink)
}

/// Write `map` to `sink` as an XML properties document.
pub fn write_xml<W: Write + ?Sized>(map: &FlatConfig, sink: &mut W) -> StoreResult<()> {
    write(Format::Xml, map, sink)
}

/// Encode `map` and write it to `sink` in a single write.
pub fn write<W: Write + ?Sized>(format: Format, map: &FlatConfig, sink: &mut W) -> StoreResult<()> {
    let bytes = to_bytes(format, map);
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

/// Write `map` to the file at `path`, creating or truncating it.
pub fn save(format: Format, map: &FlatConfig, path: &Path) -> StoreResult<()> {
    let mut file = File::create(path)?;
    write(format, map, &mut file)?;
    debug!(path = %path.display(), %format, entries = map.len(), "saved flattened configuration");
    Ok(())
}
