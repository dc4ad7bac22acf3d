use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Output encodings for a flattened configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Sorted XML properties document.
    #[default]
    Xml,
    /// Sorted `key=value` properties lines.
    Standard,
}

impl FromStr for Format {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xml" => Ok(Format::Xml),
            "standard" => Ok(Format::Standard),
            other => Err(StoreError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xml => f.write_str("xml"),
            Format::Standard => f.write_str("standard"),
        }
    }
}
