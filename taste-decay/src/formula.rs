//! The decay formula:
//!
//! ```text
//! decayed = floor + (activity − floor) × e^(−elapsed_days / half_life)
//! ```
//!
//! Asymptotic: the result approaches `floor` as elapsed time grows but never
//! reaches it in finite time. Callers needing a hard floor clamp explicitly.

/// Apply exponential decay to an activity score.
///
/// Invariants (for `activity` in [floor, 1.0] and `elapsed_days >= 0`):
/// - `decay(x, 0) == x`
/// - monotonically non-increasing in `elapsed_days`
/// - result stays within `[floor, activity]`
///
/// Out-of-range inputs are clamped: negative elapsed time counts as zero,
/// and `activity` is clamped into `[floor, 1.0]` before decaying.
pub fn decay(activity: f64, elapsed_days: f64, half_life_days: f64, floor: f64) -> f64 {
    let activity = activity.clamp(floor, 1.0);
    let elapsed = elapsed_days.max(0.0);
    if half_life_days <= 0.0 {
        // A non-positive half-life means no decay model; hold steady.
        return activity;
    }
    floor + (activity - floor) * (-elapsed / half_life_days).exp()
}
