//! # joyaction
//!
//! Run scripts when a joystick button is tapped or a stick is flicked.
//!
//! Events are read from a Linux joystick node (`/dev/input/js*`) as fixed
//! 8-byte records. Two gestures are recognized:
//!
//! - a button released less than `max_duration` ms after being pressed
//!   runs `on_button_<n>_pressed`
//! - an axis returning to exactly zero less than `max_duration` ms after a
//!   deflection beyond `axis_threshold` runs `on_axis_<n>_negative` or
//!   `on_axis_<n>_positive`
//!
//! Scripts are looked up in one directory and started in the background
//! without being waited on. A gesture with no script is ignored.
//!
//! ## Quick Start
//!
//! ```no_run
//! use joyaction::{Dispatcher, GestureConfig, GestureTracker, listen};
//!
//! let device = joyaction::device::open("/dev/input/js0").expect("Failed to open device");
//! listen(
//!     device,
//!     GestureTracker::new(GestureConfig::default()),
//!     Dispatcher::with_shell("/home/pi"),
//! )
//! .expect("Event loop failed");
//! ```
//!
//! ## Custom Launchers
//!
//! Anything implementing [`Launcher`], including a closure, can stand in for
//! the shell:
//!
//! ```no_run
//! use joyaction::{Dispatcher, GestureTracker, Listener};
//! use std::path::Path;
//!
//! let dispatcher = Dispatcher::new("/home/pi", |script: &Path| -> joyaction::Result<()> {
//!     println!("would run {}", script.display());
//!     Ok(())
//! });
//! let mut listener = Listener::new(GestureTracker::default(), dispatcher);
//! listener.run(std::io::stdin()).expect("Event loop failed");
//! ```
//!
//! ## Architecture
//!
//! The [`tracker`] owns all per-input state; nothing is global. The
//! [`Listener`] loop is single-threaded and blocks on the device with no timeout.
//! The only concurrency is the scripts themselves, which are never tracked.

pub mod action;
pub mod config;
#[cfg(target_os = "linux")]
pub mod device;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod listen;
pub mod reader;
#[cfg(feature = "recorder")]
pub mod recorder;
pub mod state;
pub mod tracker;

// Re-exports
pub use action::Action;
pub use config::{DEFAULT_AXIS_THRESHOLD, DEFAULT_MAX_DURATION, GestureConfig};
pub use dispatch::{Dispatched, Dispatcher, Launcher, ShellLauncher};
pub use error::{Error, Result};
pub use event::{EVENT_SIZE, EventKind, RawEvent};
pub use listen::{Listener, listen};
pub use reader::EventReader;
#[cfg(feature = "recorder")]
pub use recorder::Recording;
pub use state::{AxisState, ButtonState, StateTable};
pub use tracker::GestureTracker;
