//! Gesture timing and threshold tunables.

use crate::error::{Error, Result};

/// Default upper bound (exclusive) on a gesture's duration, in milliseconds.
pub const DEFAULT_MAX_DURATION: u32 = 1000;

/// Default normalized deflection an axis must exceed before a snap-back counts.
pub const DEFAULT_AXIS_THRESHOLD: f32 = 0.8;

/// Tunables honored by [`GestureTracker`](crate::tracker::GestureTracker).
///
/// Fixed for the lifetime of a tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// A release must follow the previous update by strictly less than this
    /// many milliseconds.
    pub max_duration: u32,
    /// Previous axis magnitude must be strictly greater than this.
    pub axis_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_duration: DEFAULT_MAX_DURATION,
            axis_threshold: DEFAULT_AXIS_THRESHOLD,
        }
    }
}

impl GestureConfig {
    /// Set the maximum gesture duration in milliseconds.
    pub fn with_max_duration(mut self, ms: u32) -> Self {
        self.max_duration = ms;
        self
    }

    /// Set the axis deflection threshold.
    pub fn with_axis_threshold(mut self, threshold: f32) -> Self {
        self.axis_threshold = threshold;
        self
    }

    /// Check that the tunables can ever produce an action.
    pub fn validate(&self) -> Result<()> {
        if self.max_duration == 0 {
            return Err(Error::InvalidConfig(
                "max duration must be at least 1 ms".into(),
            ));
        }
        if !self.axis_threshold.is_finite() || !(0.0..1.0).contains(&self.axis_threshold) {
            return Err(Error::InvalidConfig(format!(
                "axis threshold must be in [0.0, 1.0), got {}",
                self.axis_threshold
            )));
        }
        Ok(())
    }
}
