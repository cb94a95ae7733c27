// Single source of truth for all default values.
//
// Every numeric constant in the scoring and clustering pipeline is a tunable
// parameter, not a fixed truth — the shipped values are starting points.

// --- Decay ---
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 14.0;
pub const DEFAULT_ACTIVITY_FLOOR: f64 = 0.1;
pub const DEFAULT_BOOST_INCREMENT: f64 = 0.3;

// --- Clustering ---
pub const DEFAULT_K_MIN: usize = 5;
pub const DEFAULT_K_MAX: usize = 8;
pub const DEFAULT_MIN_TRAINING_ITEMS: usize = 30;
pub const DEFAULT_SILHOUETTE_THRESHOLD: f64 = 0.25;
pub const DEFAULT_LABEL_CARRY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 90;
pub const DEFAULT_HISTORICAL_SAMPLE_SIZE: usize = 200;
pub const DEFAULT_DEGENERATE_SIMILARITY: f64 = 0.995;
pub const DEFAULT_SAMPLE_ITEM_IDS_PER_PERSONA: usize = 5;
pub const DEFAULT_CLUSTERING_SEED: u64 = 0x7a57e;

// --- Scoring ---
pub const DEFAULT_FALLBACK_CONTENT_SCORE: f64 = 0.5;
pub const DEFAULT_VIEW_SWEET_SPOT_LOW: u64 = 10_000;
pub const DEFAULT_VIEW_SWEET_SPOT_HIGH: u64 = 500_000;
pub const DEFAULT_VIEW_HEALTH_MIN: f64 = 0.7;
pub const DEFAULT_VIEW_HEALTH_MAX: f64 = 1.2;
pub const DEFAULT_VIEW_FALLOFF_DECADES: f64 = 2.0;
pub const DEFAULT_RECENCY_MIN: f64 = 0.8;
pub const DEFAULT_RECENCY_MAX: f64 = 1.1;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

// --- Affinity ---
pub const DEFAULT_AFFINITY_MIN: f64 = 0.5;
pub const DEFAULT_AFFINITY_MAX: f64 = 2.0;
pub const DEFAULT_THUMBS_UP_WEIGHT: f64 = 0.15;
pub const DEFAULT_THUMBS_DOWN_WEIGHT: f64 = 0.25;
pub const DEFAULT_WATCH_WEIGHT: f64 = 0.02;
pub const DEFAULT_WATCH_CAP: u64 = 20;
