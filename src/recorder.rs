//! Event capture and offline replay.
//!
//! Records raw joystick events so gesture settings can be tuned against a
//! real session without the device attached.
//!
//! # Example
//!
//! ```no_run
//! use joyaction::recorder::Recording;
//! use joyaction::{GestureConfig, GestureTracker};
//!
//! let device = joyaction::device::open("/dev/input/js0").unwrap();
//! let recording = Recording::capture(device, 200).unwrap();
//! recording.save("session.json").unwrap();
//!
//! // Later, try a tighter timing budget.
//! let recording = Recording::load("session.json").unwrap();
//! let mut tracker = GestureTracker::new(GestureConfig::default().with_max_duration(400));
//! for action in recording.replay(&mut tracker) {
//!     println!("{action}");
//! }
//! ```

use crate::action::Action;
use crate::error::{Error, Result};
use crate::event::RawEvent;
use crate::reader::EventReader;
use crate::state::elapsed;
use crate::tracker::GestureTracker;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

/// A captured sequence of raw events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Events in the order they were read.
    pub events: Vec<RawEvent>,
    /// When the recording was created.
    pub created_at: SystemTime,
    /// Optional description.
    pub description: Option<String>,
}

impl Recording {
    /// Create a new empty recording.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            created_at: SystemTime::now(),
            description: None,
        }
    }

    /// Set a description for this recording.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Read up to `limit` events from `source`.
    ///
    /// Stops early if the source ends between records.
    pub fn capture<R: Read>(source: R, limit: usize) -> Result<Self> {
        let mut recording = Self::new();
        for event in EventReader::new(source).take(limit) {
            recording.events.push(event?);
        }
        log::info!("captured {} events", recording.events.len());
        Ok(recording)
    }

    /// Device-clock milliseconds between the first and last event.
    pub fn span(&self) -> u32 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => elapsed(last.timestamp, first.timestamp),
            _ => 0,
        }
    }

    /// Get the number of events in this recording.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Feed every event through `tracker` and collect the actions produced.
    ///
    /// Nothing is launched.
    pub fn replay(&self, tracker: &mut GestureTracker) -> Vec<Action> {
        self.events
            .iter()
            .filter_map(|event| tracker.process(event))
            .collect()
    }

    /// Save the recording to a file (JSON format).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Other(format!("Failed to serialize recording: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| Error::Other(format!("Failed to write recording file: {}", e)))?;
        Ok(())
    }

    /// Load a recording from a file (JSON format).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Other(format!("Failed to read recording file: {}", e)))?;
        let recording: Recording = serde_json::from_str(&json)
            .map_err(|e| Error::Other(format!("Failed to deserialize recording: {}", e)))?;
        Ok(recording)
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;
    use std::io::Cursor;

    fn session() -> Vec<RawEvent> {
        vec![
            RawEvent::button(1000, 0, true),
            RawEvent::button(1600, 0, false),
            RawEvent::axis(2000, 1, 32000),
            RawEvent::axis(2300, 1, 0),
        ]
    }

    #[test]
    fn test_recording_new() {
        let recording = Recording::new().with_description("Test session");
        assert!(recording.events.is_empty());
        assert_eq!(recording.span(), 0);
        assert_eq!(recording.event_count(), 0);
        assert_eq!(recording.description, Some("Test session".to_string()));
    }

    #[test]
    fn test_capture_respects_limit() {
        let bytes: Vec<u8> = session().iter().flat_map(|e| e.encode()).collect();

        let recording = Recording::capture(Cursor::new(bytes.clone()), 2).unwrap();
        assert_eq!(recording.events, session()[..2]);

        let recording = Recording::capture(Cursor::new(bytes), 100).unwrap();
        assert_eq!(recording.event_count(), 4);
        assert_eq!(recording.span(), 1300);
    }

    #[test]
    fn test_replay_with_different_budgets() {
        let mut recording = Recording::new();
        recording.events = session();

        let mut tracker = GestureTracker::new(GestureConfig::default());
        assert_eq!(
            recording.replay(&mut tracker),
            vec![Action::ButtonPressed(0), Action::AxisPositive(1)]
        );

        let mut strict = GestureTracker::new(GestureConfig::default().with_max_duration(500));
        assert_eq!(recording.replay(&mut strict), vec![Action::AxisPositive(1)]);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut recording = Recording::new().with_description("Test");
        recording.events = session();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        recording.save(&path).unwrap();

        let loaded = Recording::load(&path).unwrap();
        assert_eq!(loaded.description, recording.description);
        assert_eq!(loaded.events, recording.events);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Recording::load("/nonexistent/joyaction/session.json").is_err());
    }
}
