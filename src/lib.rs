//! ADIF (Amateur Data Interchange Format) log engine: an incremental
//! tag parser, a typed record/file model, and a time-windowed fuzzy
//! merge for deduplicating QSO logs from multiple sources.
//!
//! # Examples
//!
//! Parsing with [`file::AdifFile`]:
//! ```
//! use adiflog::file::AdifFile;
//!
//! let log = AdifFile::parse(
//!     "Rig export\n<adif_ver:5>3.1.2<eoh>\n<call:4>NU6V <band:3>20m <eor>",
//! ).expect("parse");
//! assert_eq!(log.comment, "Rig export");
//! assert_eq!(log.records.len(), 1);
//! assert_eq!(log.records[0].get("call"), Some("NU6V"));
//! ```
//!
//! Deduplicating two logs:
//! ```
//! use adiflog::{file::AdifFile, record::AdifRecord};
//!
//! let qso = AdifRecord::from_iter([
//!     ("callsign", "n0foo"),
//!     ("band", "10m"),
//!     ("mode", "FT8"),
//!     ("qso_date", "20220401"),
//!     ("time_on", "1314"),
//! ]);
//! let mut mine = AdifFile::with_records(vec![qso.clone()]);
//! let theirs = AdifFile::with_records(vec![qso]);
//!
//! mine.merge(theirs).expect("merge");
//! assert_eq!(mine.records.len(), 1);
//! ```
#![deny(missing_docs)]

/// Error type and result alias.
pub mod error;
/// ADIF file model: parse, serialize, and path helpers.
pub mod file;
/// File-level merge engine.
pub mod merge;
/// Single-QSO record and field-level merge.
pub mod record;
/// Incremental character scanner.
pub mod scan;
/// Tag specifier parsing.
pub mod tag;
/// Shared constants.
pub mod types;
/// Field formatting and date/time parsing helpers.
pub mod util;
