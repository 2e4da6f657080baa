/// Augur system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suffix appended to a period id that cannot be incremented numerically.
pub const PERIOD_SENTINEL_SUFFIX: &str = "_next";

/// Lower bound of the numeric outcome domain.
pub const MIN_NUMERIC_VALUE: i64 = 0;

/// Upper bound of the numeric outcome domain.
pub const MAX_NUMERIC_VALUE: i64 = 9;

/// Moving averages at or below this value count as a LOW extreme.
pub const CLUSTER_LOW_EXTREME: f64 = 3.0;

/// Moving averages at or above this value count as a HIGH extreme.
pub const CLUSTER_HIGH_EXTREME: f64 = 6.0;
