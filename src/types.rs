//! Shared constants for the ADIF engine.

/// ADIF specification version written into newly created files.
pub const ADIF_VERSION: &str = "3.1.2";

/// Program identity written into the `programid` header by default.
pub const DEFAULT_PROGRAM_ID: &str = "adiflog";

/// Program version written into the `programversion` header by default.
pub const DEFAULT_PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default time window, in minutes, for matching duplicate QSOs.
pub const DEFAULT_TIME_MATCH_MIN: i64 = 15;

/// Header tag closing the metadata block.
pub const TAG_EOH: &str = "eoh";

/// Record tag closing one QSO.
pub const TAG_EOR: &str = "eor";

/// `strftime`-style format of the `created_timestamp` header payload.
pub(crate) const CREATED_TIMESTAMP_FMT: &str = "%Y%m%d %H%M%S";
