//! ADIF file model: header metadata plus an ordered record sequence.

use std::{
    fs,
    io::{BufReader, Read},
    mem,
    path::Path,
};

use chrono::{NaiveDateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AdifError, Result},
    record::AdifRecord,
    scan::CharSource,
    tag::TagSpecifier,
    types::{ADIF_VERSION, CREATED_TIMESTAMP_FMT, DEFAULT_PROGRAM_ID, DEFAULT_PROGRAM_VERSION},
    util::make_field,
};

/// A parsed or programmatically built ADIF log.
///
/// `records` order is the canonical output order; after a merge it is
/// ascending by `(qso_date, time_on)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdifFile {
    /// ADIF format version from the `adif_ver` header.
    pub version: String,
    /// Creation timestamp from the `created_timestamp` header. Unset
    /// until serialization stamps it with the current UTC time.
    pub created: Option<NaiveDateTime>,
    /// Originating program from the `programid` header.
    pub program_id: String,
    /// Originating program version from the `programversion` header.
    pub program_version: String,
    /// Free text preceding the first tag.
    pub comment: String,
    /// Logged contacts in file order.
    pub records: Vec<AdifRecord>,
}

impl Default for AdifFile {
    fn default() -> Self {
        Self {
            version: ADIF_VERSION.to_string(),
            created: None,
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            program_version: DEFAULT_PROGRAM_VERSION.to_string(),
            comment: String::new(),
            records: Vec::new(),
        }
    }
}

impl AdifFile {
    /// Creates an empty file with this crate's default header identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a file holding `records` and default headers.
    pub fn with_records(records: Vec<AdifRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Parses from an in-memory string.
    pub fn parse(contents: &str) -> Result<Self> {
        Self::read_from(contents.as_bytes())
    }

    /// Parses from a file on disk, streaming tag by tag. Prefer this
    /// over [`AdifFile::parse`] for large logs; the whole file is never
    /// held in memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Parses from any reader.
    ///
    /// Header fields this crate does not recognize are consumed by their
    /// declared length and discarded, which keeps the stream aligned on
    /// the next tag. End of input while scanning for the next record tag
    /// ends the parse normally; any other failure aborts it.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut src = CharSource::new(reader);
        let mut file = Self::new();

        // Everything before the first tag is the comment. Give the `<`
        // back so the header loop reads a whole tag.
        let raw = src.read_until('<')?;
        file.comment = raw.strip_suffix('<').unwrap_or(&raw).trim().to_string();
        src.push_back('<');

        loop {
            let spec = TagSpecifier::read_next(&mut src)?;
            if spec.is_eoh() {
                break;
            }
            match spec.name.as_str() {
                "adif_ver" => file.version = src.read_exact(spec.length)?,
                "created_timestamp" => {
                    let value = src.read_exact(spec.length)?;
                    let parsed = NaiveDateTime::parse_from_str(&value, CREATED_TIMESTAMP_FMT)
                        .map_err(|source| AdifError::InvalidTimestamp { value, source })?;
                    file.created = Some(parsed);
                }
                "programid" => file.program_id = src.read_exact(spec.length)?,
                "programversion" => file.program_version = src.read_exact(spec.length)?,
                other => {
                    trace!("discarding header field {other:?} ({} chars)", spec.length);
                    src.read_exact(spec.length)?;
                }
            }
        }

        let mut fields = AdifRecord::new();
        loop {
            let spec = match TagSpecifier::read_next(&mut src) {
                Ok(spec) => spec,
                Err(AdifError::UnexpectedEof(_)) => break,
                Err(e) => return Err(e),
            };
            if spec.is_eor() {
                file.records.push(mem::take(&mut fields));
            } else {
                let value = src.read_exact(spec.length)?;
                fields.set(spec.name, value);
            }
        }

        debug!(
            "parsed ADIF v{} file with {} records",
            file.version,
            file.records.len()
        );
        Ok(file)
    }

    /// Serializes to ADIF text.
    ///
    /// Takes `&mut self` because a file with no `created` timestamp is
    /// stamped with the current UTC time before being written out.
    pub fn to_adif(&mut self) -> String {
        let created = self.created.get_or_insert_with(|| Utc::now().naive_utc());

        let mut out = String::new();
        out.push_str(&self.comment);
        out.push('\n');
        if !self.version.is_empty() {
            out.push_str(&make_field("adif_ver", &self.version));
            out.push('\n');
        }
        let stamp = created.format(CREATED_TIMESTAMP_FMT).to_string();
        out.push_str(&make_field("created_timestamp", &stamp));
        out.push('\n');
        if !self.program_id.is_empty() {
            out.push_str(&make_field("programid", &self.program_id));
            out.push('\n');
        }
        if !self.program_version.is_empty() {
            out.push_str(&make_field("programversion", &self.program_version));
            out.push('\n');
        }
        out.push_str("<eoh>\n");

        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Serializes to a file on disk.
    pub fn write_to_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_adif())?;
        Ok(())
    }
}
