use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Persona activity score clamped to [0.0, 1.0].
/// Represents how alive an interest cluster currently is; decays over time
/// and is boosted back toward 1.0 by new matching signals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ActivityScore(f64);

impl ActivityScore {
    /// Fully active — a signal matched this persona within the current window.
    pub const FULL: f64 = 1.0;
    /// Dormant threshold — personas below this are effectively background interests.
    pub const DORMANT: f64 = 0.3;

    /// Create a new ActivityScore, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Boost toward 1.0 by `increment`, saturating at 1.0.
    pub fn boosted(self, increment: f64) -> Self {
        Self::new(self.0 + increment.max(0.0))
    }

    /// Check if the persona is dormant.
    pub fn is_dormant(self) -> bool {
        self.0 < Self::DORMANT
    }
}

impl Default for ActivityScore {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for ActivityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for ActivityScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ActivityScore> for f64 {
    fn from(a: ActivityScore) -> Self {
        a.0
    }
}

impl Add for ActivityScore {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for ActivityScore {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for ActivityScore {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}
