/// Taste system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Advisory upper bound for a single scoring batch. Larger batches are
/// still scored in full but logged, since they suggest a misbehaving caller.
pub const MAX_SCORING_BATCH_SIZE: usize = 5_000;

/// Maximum training samples fed into a single clustering run.
pub const MAX_TRAINING_SAMPLES: usize = 10_000;

/// Seconds per day, used for elapsed-day math on timestamps.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
