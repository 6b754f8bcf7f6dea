//! Gesture classification.
//!
//! The tracker turns a stream of [`RawEvent`]s into at most one [`Action`]
//! per event. Two gestures are recognized:
//!
//! - **Short press**: a button released less than `max_duration` ms after it
//!   was pressed.
//! - **Snap-back**: an axis that reads exactly zero less than `max_duration`
//!   ms after a sample deflected beyond `axis_threshold`.
//!
//! Each input remembers only its most recent press or sample. A release with
//! no earlier press, or the first sample of an axis, only establishes state.

use crate::action::Action;
use crate::config::GestureConfig;
use crate::event::RawEvent;
use crate::state::{AxisState, ButtonState, StateTable, elapsed};

/// Owns per-input state and classifies events into actions.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    state: StateTable,
}

impl GestureTracker {
    /// Create a tracker with empty state.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: StateTable::new(),
        }
    }

    /// Tunables in effect.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Learned per-input state.
    pub fn state(&self) -> &StateTable {
        &self.state
    }

    /// Forget all presses and samples seen so far.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Feed one event and return the action it completes, if any.
    ///
    /// Init events are ignored without touching state. The button and axis
    /// bits are handled as independent branches; should a record carry both
    /// and both complete a gesture, the axis gesture is returned.
    pub fn process(&mut self, event: &RawEvent) -> Option<Action> {
        if event.kind.is_init() {
            return None;
        }

        let mut action = None;
        if event.kind.is_button() {
            action = self.process_button(event);
        }
        if event.kind.is_axis() {
            action = self.process_axis(event).or(action);
        }
        action
    }

    fn process_button(&mut self, event: &RawEvent) -> Option<Action> {
        let index = event.index;

        if event.is_pressed() {
            self.state.set_button(
                index,
                ButtonState {
                    press_timestamp: event.timestamp,
                },
            );
            log::debug!("button # {index} pressed");
            return None;
        }

        let action = self.state.button(index).and_then(|pressed| {
            let duration = elapsed(event.timestamp, pressed.press_timestamp);
            (duration < self.config.max_duration).then_some(Action::ButtonPressed(index))
        });

        match action {
            Some(action) => log::debug!("button # {index} released: => {action}"),
            None => log::debug!("button # {index} released"),
        }
        action
    }

    fn process_axis(&mut self, event: &RawEvent) -> Option<Action> {
        let index = event.index;
        let value = event.normalized();

        let prev = self.state.replace_axis(
            index,
            AxisState {
                last_timestamp: event.timestamp,
                last_normalized_value: value,
            },
        )?;

        let duration = elapsed(event.timestamp, prev.last_timestamp);
        let threshold = self.config.axis_threshold;
        let action = if event.value == 0 && duration < self.config.max_duration {
            if prev.last_normalized_value < -threshold {
                Some(Action::AxisNegative(index))
            } else if prev.last_normalized_value > threshold {
                Some(Action::AxisPositive(index))
            } else {
                None
            }
        } else {
            None
        };

        match action {
            Some(action) => log::debug!(
                "axis # {index}: {:.3} -> {value:.3} after {duration} ms: => {action}",
                prev.last_normalized_value
            ),
            None => log::debug!(
                "axis # {index}: {:.3} -> {value:.3} after {duration} ms",
                prev.last_normalized_value
            ),
        }
        action
    }
}
