//! Raw joystick event records and their decoding.
//!
//! The Linux joystick API delivers one fixed 8-byte record per input change:
//!
//! | bytes | field       | type |
//! |-------|-------------|------|
//! | 0..4  | timestamp   | u32 milliseconds, wrapping device clock |
//! | 4..6  | value       | i16 |
//! | 6     | kind        | u8 bitmask |
//! | 7     | index       | u8 button or axis number |

use crate::error::{Error, Result};

#[cfg(feature = "recorder")]
use serde::{Deserialize, Serialize};

/// Size of one event record in bytes.
pub const EVENT_SIZE: usize = 8;

/// Button pressed/released.
pub const JS_EVENT_BUTTON: u8 = 0x01;
/// Axis moved.
pub const JS_EVENT_AXIS: u8 = 0x02;
/// Synthetic event describing initial device state.
pub const JS_EVENT_INIT: u8 = 0x80;

/// Full-scale axis magnitude.
pub const AXIS_MAX: f32 = 32767.0;

/// The kind bitmask of an event.
///
/// Bits are tested independently; a record may in principle carry both
/// the button and the axis bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct EventKind(pub u8);

impl EventKind {
    /// Init events replay the device state on open and carry no gesture.
    #[inline]
    pub fn is_init(self) -> bool {
        self.0 & JS_EVENT_INIT != 0
    }

    #[inline]
    pub fn is_button(self) -> bool {
        self.0 & JS_EVENT_BUTTON != 0
    }

    #[inline]
    pub fn is_axis(self) -> bool {
        self.0 & JS_EVENT_AXIS != 0
    }
}

/// One decoded joystick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct RawEvent {
    /// Device clock in milliseconds.
    pub timestamp: u32,
    /// Button state (nonzero = pressed) or signed axis position.
    pub value: i16,
    /// Event kind bitmask.
    pub kind: EventKind,
    /// Button or axis number.
    pub index: u8,
}

impl RawEvent {
    /// Create a button event.
    pub fn button(timestamp: u32, index: u8, pressed: bool) -> Self {
        Self {
            timestamp,
            value: i16::from(pressed),
            kind: EventKind(JS_EVENT_BUTTON),
            index,
        }
    }

    /// Create an axis event.
    pub fn axis(timestamp: u32, index: u8, value: i16) -> Self {
        Self {
            timestamp,
            value,
            kind: EventKind(JS_EVENT_AXIS),
            index,
        }
    }

    /// Decode a record from the start of `buf`.
    ///
    /// Bytes past [`EVENT_SIZE`] are ignored. Fewer than [`EVENT_SIZE`]
    /// bytes is a [`Error::Decode`].
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let Some(rec) = buf.first_chunk::<EVENT_SIZE>() else {
            return Err(Error::Decode { len: buf.len() });
        };

        Ok(Self {
            timestamp: u32::from_le_bytes([rec[0], rec[1], rec[2], rec[3]]),
            value: i16::from_le_bytes([rec[4], rec[5]]),
            kind: EventKind(rec[6]),
            index: rec[7],
        })
    }

    /// Encode back into the device record layout.
    pub fn encode(&self) -> [u8; EVENT_SIZE] {
        let mut out = [0u8; EVENT_SIZE];
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..6].copy_from_slice(&self.value.to_le_bytes());
        out[6] = self.kind.0;
        out[7] = self.index;
        out
    }

    /// Axis position scaled to `[-1.0, 1.0]`.
    ///
    /// `i16::MIN` maps slightly below -1.0 and is clamped.
    pub fn normalized(&self) -> f32 {
        (f32::from(self.value) / AXIS_MAX).clamp(-1.0, 1.0)
    }

    /// Whether a button event reports the button as held.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.value != 0
    }
}
