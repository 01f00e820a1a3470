//! Configuration and constants for the CLI.

/// Output file name used when `-o` is not given
pub const DEFAULT_OUTPUT_NAME: &str = "massif.out.combine";

/// Current combine report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Massif grammar.
// The delimiter both closes the previous region and opens a named one,
// so the parser needs state to tell the two apart.
pub const SNAPSHOT_DELIMITER: &[u8] = b"#-----------";
pub const SNAPSHOT_INDEX_PREFIX: &str = "snapshot=";

pub const HEADER_PATTERN: &str = r"^(desc|cmd|time_unit):";
pub const SNAPSHOT_INDEX_PATTERN: &str = r"snapshot=\d+";
pub const SNAPSHOT_TIME_PATTERN: &str = r"time=(\d+)";
