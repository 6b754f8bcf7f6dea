//! Error types for joystick action handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for joyaction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading events and dispatching actions.
///
/// A script that does not exist is not an error: it is reported as
/// [`Dispatched::Missing`](crate::dispatch::Dispatched::Missing).
#[derive(Debug, Error)]
pub enum Error {
    /// A record was shorter than the fixed event size.
    #[error("short event record: got {len} of 8 bytes")]
    Decode {
        /// Number of bytes that were available.
        len: usize,
    },

    /// The joystick device could not be opened.
    #[error("cannot open device {}: {source}", path.display())]
    DeviceOpen {
        /// Path of the device node.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from the event source failed.
    #[error("device read failed: {0}")]
    DeviceRead(#[source] io::Error),

    /// No joystick device was found.
    #[error("no joystick device found: {0}")]
    NoDevice(String),

    /// A device metadata ioctl failed.
    #[error("ioctl failed: {0}")]
    Ioctl(String),

    /// The launcher could not start the action script.
    #[error("failed to start {}: {source}", path.display())]
    Dispatch {
        /// Script that was being started.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Gesture tunables are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Other errors.
    #[error("{0}")]
    Other(String),
}
