//! Tag specifier parsing: `<name>`, `<name:length>`, `<name:length:type>`.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AdifError, Result},
    scan::CharSource,
};

/// Parsed representation of one ADIF tag, like the `<call:4>` in
/// `<call:4>NU6V`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpecifier {
    /// Field name, lowercased.
    pub name: String,
    /// Declared character count of the payload that follows; 0 for bare
    /// tags like `<eoh>` and `<eor>`.
    pub length: usize,
    /// Optional ADIF data-type code, lowercased; empty when absent.
    pub data_type: String,
}

impl TagSpecifier {
    /// Bare tag with no payload.
    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            length: 0,
            data_type: String::new(),
        }
    }

    /// Tag with a declared payload length and no type code.
    pub fn with_length(name: &str, length: usize) -> Self {
        Self {
            name: name.to_string(),
            length,
            data_type: String::new(),
        }
    }

    /// Parses a specifier from its raw `<...>` text.
    ///
    /// The text is lowercased, stripped of the outer angle brackets, and
    /// split on `:`. One part is a bare tag, two are name and length,
    /// three add the data-type code. Any other count is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let spec = raw.to_ascii_lowercase();
        let spec = spec.trim().trim_matches(['<', '>']);

        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().to_string();
        let length = parts.next();
        let data_type = parts.next();
        if parts.next().is_some() {
            return Err(AdifError::InvalidSpecifier(spec.to_string()));
        }

        let length = match length {
            Some(text) => text
                .parse::<usize>()
                .map_err(|source| AdifError::InvalidLength {
                    spec: spec.to_string(),
                    source,
                })?,
            None => 0,
        };

        Ok(Self {
            name,
            length,
            data_type: data_type.unwrap_or_default().to_string(),
        })
    }

    /// Reads the next specifier from the scanner, skipping any text
    /// before the opening `<` and consuming through the closing `>`.
    pub fn read_next<R: Read>(src: &mut CharSource<R>) -> Result<Self> {
        src.read_until('<')?;
        let mut raw = String::from("<");
        raw.push_str(&src.read_until('>')?);
        Self::parse(&raw)
    }

    /// True for the end-of-header marker.
    pub fn is_eoh(&self) -> bool {
        self.name == crate::types::TAG_EOH
    }

    /// True for the end-of-record marker.
    pub fn is_eor(&self) -> bool {
        self.name == crate::types::TAG_EOR
    }
}
