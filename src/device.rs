//! Linux joystick device discovery and metadata.
//!
//! Joystick nodes live at `/dev/input/js*` and speak the legacy joystick
//! API. Reading them requires membership in the `input` group:
//!
//! ```bash
//! sudo usermod -aG input $USER
//! # Then log out and back in
//! ```

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// Directory joystick nodes are created in.
pub const INPUT_DIR: &str = "/dev/input";

const JSIOCGAXES: u32 = 0x8001_6a11;
const JSIOCGBUTTONS: u32 = 0x8001_6a12;
const NAME_LEN: usize = 64;

/// `JSIOCGNAME(len)`: the length is encoded in the request size bits.
fn jsiocgname(len: usize) -> u32 {
    0x8000_6a13 + ((len as u32) << 16)
}

/// Identity and layout reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Product name.
    pub name: String,
    /// Number of axes.
    pub axes: u8,
    /// Number of buttons.
    pub buttons: u8,
}

impl DeviceInfo {
    /// Query an open joystick device.
    pub fn query(device: &File) -> Result<Self> {
        let fd = device.as_raw_fd();

        let mut name = [0u8; NAME_LEN];
        // SAFETY: the request size matches the buffer length.
        let ret = unsafe { libc::ioctl(fd, jsiocgname(NAME_LEN) as _, name.as_mut_ptr()) };
        if ret < 0 {
            return Err(Error::Ioctl(format!(
                "JSIOCGNAME: {}",
                std::io::Error::last_os_error()
            )));
        }

        let mut axes: u8 = 0;
        // SAFETY: JSIOCGAXES writes a single byte.
        let ret = unsafe { libc::ioctl(fd, JSIOCGAXES as _, &mut axes as *mut u8) };
        if ret < 0 {
            return Err(Error::Ioctl(format!(
                "JSIOCGAXES: {}",
                std::io::Error::last_os_error()
            )));
        }

        let mut buttons: u8 = 0;
        // SAFETY: JSIOCGBUTTONS writes a single byte.
        let ret = unsafe { libc::ioctl(fd, JSIOCGBUTTONS as _, &mut buttons as *mut u8) };
        if ret < 0 {
            return Err(Error::Ioctl(format!(
                "JSIOCGBUTTONS: {}",
                std::io::Error::last_os_error()
            )));
        }

        Ok(Self {
            name: decode_name(&name),
            axes,
            buttons,
        })
    }
}

fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim_end().to_string()
}

/// Open a joystick device for reading.
pub fn open(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|source| Error::DeviceOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// List `js*` nodes in `dir`, ordered by their number.
pub fn find_joysticks(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::NoDevice(format!(
            "cannot access {}: {}. Make sure you're in the 'input' group.",
            dir.display(),
            e
        ))
    })?;

    let mut found: Vec<(u32, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let number = name.to_str()?.strip_prefix("js")?;
            Some((number.parse().unwrap_or(u32::MAX), entry.path()))
        })
        .collect();
    found.sort();

    Ok(found.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ioctl_numbers() {
        assert_eq!(jsiocgname(64), 0x8040_6a13);
        assert_eq!(jsiocgname(128), 0x8080_6a13);
    }

    #[test]
    fn test_decode_name() {
        let mut raw = [0u8; NAME_LEN];
        raw[..17].copy_from_slice(b"Logitech Gamepad ");
        assert_eq!(decode_name(&raw), "Logitech Gamepad");
        assert_eq!(decode_name(b"Pad"), "Pad");
        assert_eq!(decode_name(&[0u8; 4]), "");
    }

    #[test]
    fn test_find_joysticks_orders_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["js10", "event3", "js2", "mouse0", "js0"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let found = find_joysticks(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["js0", "js2", "js10"]);
    }

    #[test]
    fn test_find_joysticks_missing_dir() {
        assert!(matches!(
            find_joysticks("/nonexistent/joyaction/input"),
            Err(Error::NoDevice(_))
        ));
    }

    #[test]
    fn test_open_missing_device() {
        let err = open("/nonexistent/joyaction/js0").unwrap_err();
        assert!(matches!(err, Error::DeviceOpen { .. }));
        assert!(err.to_string().contains("/nonexistent/joyaction/js0"));
    }

    #[test]
    fn test_query_rejects_regular_file() {
        let file = tempfile::tempfile().unwrap();
        assert!(matches!(DeviceInfo::query(&file), Err(Error::Ioctl(_))));
    }
}
