/// Normalized column names
pub const COL_TARGET: &str = "Target";
pub const COL_RA: &str = "RA";
pub const COL_DEC: &str = "DEC";
pub const COL_MAG: &str = "mag";
pub const COL_SPT: &str = "spt";
pub const COL_EPOCH: &str = "epoch";

/// Column order handed to the formatter
pub const WORKLIST_COLUMNS: [&str; 5] = [COL_TARGET, COL_RA, COL_DEC, COL_MAG, COL_SPT];

/// Formatting defaults
pub const DEFAULT_DIVIDER: &str = " ";
pub const DEFAULT_EPOCH: &str = "2000.0";

/// Trailing proper-motion columns expected by the telescope software
pub const PROPER_MOTION_FIELDS: &str = "0.0  0.0";

/// Cell text treated as missing when no markers are configured
pub const DEFAULT_NA_MARKER: &str = "~";

/// Observed-flag text marking a target as not yet observed
pub const UNOBSERVED_MARKER: char = '0';

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WORKLIST";
