//! Per-input state tracking.
//!
//! Each button and axis index has at most one record, created on first
//! sight and overwritten in place afterwards. Records are never evicted;
//! the table is bounded by the number of inputs the device has.

use std::collections::HashMap;

/// Last press of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    /// Device time of the most recent press.
    pub press_timestamp: u32,
}

/// Last sample of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    /// Device time of the most recent sample.
    pub last_timestamp: u32,
    /// Most recent position in `[-1.0, 1.0]`.
    pub last_normalized_value: f32,
}

/// Milliseconds from `then` to `now` on the wrapping 32-bit device clock.
#[inline]
pub fn elapsed(now: u32, then: u32) -> u32 {
    now.wrapping_sub(then)
}

/// Button and axis records keyed by index.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    buttons: HashMap<u8, ButtonState>,
    axes: HashMap<u8, AxisState>,
}

impl StateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a button, if it has ever been pressed.
    pub fn button(&self, index: u8) -> Option<&ButtonState> {
        self.buttons.get(&index)
    }

    /// Record for an axis, if it has ever reported.
    pub fn axis(&self, index: u8) -> Option<&AxisState> {
        self.axes.get(&index)
    }

    /// Store a button press, replacing any earlier one.
    pub fn set_button(&mut self, index: u8, state: ButtonState) {
        self.buttons.insert(index, state);
    }

    /// Store an axis sample and return the one it replaced.
    pub fn replace_axis(&mut self, index: u8, state: AxisState) -> Option<AxisState> {
        self.axes.insert(index, state)
    }

    /// Number of inputs with a record.
    pub fn len(&self) -> usize {
        self.buttons.len() + self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty() && self.axes.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.buttons.clear();
        self.axes.clear();
    }
}
