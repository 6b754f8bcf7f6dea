//! The blocking read → classify → dispatch loop.

use crate::dispatch::{Dispatched, Dispatcher, Launcher, ShellLauncher};
use crate::error::Result;
use crate::event::RawEvent;
use crate::reader::EventReader;
use crate::tracker::GestureTracker;
use std::io::Read;

/// Couples a [`GestureTracker`] with a [`Dispatcher`].
///
/// Single-threaded: one event is read, classified and dispatched before the
/// next is read. Started scripts run on their own and are never waited on.
#[derive(Debug)]
pub struct Listener<L = ShellLauncher> {
    tracker: GestureTracker,
    dispatcher: Dispatcher<L>,
}

impl<L: Launcher> Listener<L> {
    pub fn new(tracker: GestureTracker, dispatcher: Dispatcher<L>) -> Self {
        Self {
            tracker,
            dispatcher,
        }
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }

    /// Classify one event and dispatch its action, if it completes one.
    pub fn handle(&mut self, event: &RawEvent) -> Result<Option<Dispatched>> {
        match self.tracker.process(event) {
            Some(action) => self.dispatcher.dispatch(&action).map(Some),
            None => Ok(None),
        }
    }

    /// Run until `source` ends or fails.
    ///
    /// A clean end of stream returns `Ok(())`. Read, decode and launch
    /// failures end the loop and are returned; nothing is retried.
    pub fn run<R: Read>(&mut self, source: R) -> Result<()> {
        let mut reader = EventReader::new(source);
        while let Some(event) = reader.next_event()? {
            self.handle(&event)?;
        }
        log::info!("event source closed");
        Ok(())
    }
}

/// Run a [`ShellLauncher`]-backed loop over `source` until it ends or fails.
pub fn listen<R: Read>(source: R, tracker: GestureTracker, dispatcher: Dispatcher) -> Result<()> {
    Listener::new(tracker, dispatcher).run(source)
}
