// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "augur.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Mining ---
pub const DEFAULT_MIN_SEQUENCE_LENGTH: usize = 10;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.55;
pub const DEFAULT_MIN_SUPPORT_RATIO: f64 = 0.03;
pub const DEFAULT_MAX_FORMULAS: usize = 30;
pub const DEFAULT_CLUSTER_MIN_LENGTH: usize = 20;
pub const DEFAULT_COLOR_MARKER: &str = "red";
pub const DEFAULT_LOW_MAX_VALUE: i64 = 4;

// --- Policy ---
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

// --- Feed ---
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FEED_MAX_RETRIES: u32 = 3;
pub const DEFAULT_FEED_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_FEED_MAX_BACKOFF_MS: u64 = 8_000;

// --- Adjudicator ---
pub const DEFAULT_ADJUDICATOR_ENABLED: bool = false;
pub const DEFAULT_ADJUDICATOR_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_ADJUDICATOR_TOP_RULES: usize = 10;
pub const DEFAULT_ADJUDICATOR_RECENT_WINDOW: usize = 20;
pub const DEFAULT_ADJUDICATOR_API_KEY_ENV: &str = "AUGUR_ADJUDICATOR_KEY";

// --- Retention ---
pub const DEFAULT_MAX_OBSERVATIONS: usize = 5_000;
pub const DEFAULT_MAX_PREDICTIONS_PER_MODE: usize = 5_000;
pub const DEFAULT_MAX_INACTIVE_SETS_PER_MODE: usize = 50;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
