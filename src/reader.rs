//! Fixed-size record reader over any byte source.

use crate::error::{Error, Result};
use crate::event::{EVENT_SIZE, RawEvent};
use std::io::{ErrorKind, Read};

/// Reads one [`RawEvent`] at a time from a blocking byte source.
///
/// There is no timeout: a read on a joystick device suspends until the
/// device produces a record.
#[derive(Debug)]
pub struct EventReader<R> {
    source: R,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` when the source ends cleanly between records.
    /// A source that ends partway through a record yields [`Error::Decode`];
    /// any other I/O failure yields [`Error::DeviceRead`].
    pub fn next_event(&mut self) -> Result<Option<RawEvent>> {
        let mut buf = [0u8; EVENT_SIZE];
        let mut filled = 0;

        while filled < EVENT_SIZE {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(Error::Decode { len: filled }),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::DeviceRead(e)),
            }
        }

        RawEvent::decode(&buf).map(Some)
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Iterator for EventReader<R> {
    type Item = Result<RawEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
