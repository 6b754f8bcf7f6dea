//! Resolving actions to scripts and starting them.
//!
//! A script is looked up as `<script_dir>/<action script name>`. If a regular
//! file exists there it is started in the background and forgotten: the
//! dispatcher keeps no handle, never waits, and never reads its exit status.
//! A missing script is the normal "no handler configured" case.

use crate::action::Action;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Starts a handler script.
///
/// Implemented for closures so a launcher can be swapped in without a new type:
///
/// ```
/// use joyaction::{Action, Dispatcher};
/// use std::path::Path;
///
/// let dispatcher = Dispatcher::new("/tmp", |script: &Path| -> joyaction::Result<()> {
///     println!("would run {}", script.display());
///     Ok(())
/// });
/// # let _ = dispatcher.script_path(&Action::ButtonPressed(0));
/// ```
pub trait Launcher {
    /// Start `script` and return without waiting for it.
    fn launch(&self, script: &Path) -> Result<()>;
}

impl<F> Launcher for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn launch(&self, script: &Path) -> Result<()> {
        self(script)
    }
}

/// Starts scripts through `/bin/sh`, detached from the caller.
///
/// The shell `exec`s the script with no arguments, so a script that is not
/// executable or has a bad interpreter line is reported by the shell on
/// stderr rather than failing here. Only failing to start the shell itself
/// is an error. The child is not reaped by this type; the binary sets
/// `SIGCHLD` to ignored so the kernel does it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    #[allow(clippy::zombie_processes)]
    fn launch(&self, script: &Path) -> Result<()> {
        // "$0" keeps paths with spaces intact.
        let child = Command::new("/bin/sh")
            .arg("-c")
            .arg("exec \"$0\"")
            .arg(script)
            .spawn()
            .map_err(|source| Error::Dispatch {
                path: script.to_path_buf(),
                source,
            })?;

        log::debug!("started {} (pid {})", script.display(), child.id());
        Ok(())
    }
}

/// What happened to a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The script was started.
    Launched(PathBuf),
    /// No regular file exists at the script path.
    Missing(PathBuf),
}

/// Maps actions to scripts in one directory and starts them.
#[derive(Debug)]
pub struct Dispatcher<L = ShellLauncher> {
    script_dir: PathBuf,
    launcher: L,
}

impl Dispatcher<ShellLauncher> {
    /// Dispatcher that runs scripts through [`ShellLauncher`].
    pub fn with_shell(script_dir: impl Into<PathBuf>) -> Self {
        Self::new(script_dir, ShellLauncher)
    }
}

impl<L: Launcher> Dispatcher<L> {
    pub fn new(script_dir: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            script_dir: script_dir.into(),
            launcher,
        }
    }

    /// Directory scripts are looked up in.
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Path the handler for `action` would live at.
    pub fn script_path(&self, action: &Action) -> PathBuf {
        self.script_dir.join(action.script_name())
    }

    /// Start the handler for `action` if one exists.
    ///
    /// Attempted exactly once; a launcher failure is returned as is.
    pub fn dispatch(&self, action: &Action) -> Result<Dispatched> {
        let path = self.script_path(action);

        if !path.is_file() {
            log::debug!("warning: file '{}' does not exist", path.display());
            return Ok(Dispatched::Missing(path));
        }

        self.launcher.launch(&path)?;
        Ok(Dispatched::Launched(path))
    }

    /// Actions that currently have a handler script, sorted.
    pub fn available_actions(&self) -> Result<Vec<Action>> {
        let entries = fs::read_dir(&self.script_dir).map_err(|e| {
            Error::Other(format!(
                "cannot list script directory {}: {}",
                self.script_dir.display(),
                e
            ))
        })?;

        let mut actions: Vec<Action> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| Action::from_script_name(entry.file_name().to_str()?))
            .collect();
        actions.sort();
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording_launcher(calls: &RefCell<Vec<PathBuf>>) -> impl Fn(&Path) -> Result<()> + '_ {
        move |script: &Path| {
            calls.borrow_mut().push(script.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_script_path() {
        let d = Dispatcher::new("/home/pi", |_: &Path| -> Result<()> { Ok(()) });
        assert_eq!(
            d.script_path(&Action::AxisPositive(2)),
            PathBuf::from("/home/pi/on_axis_2_positive")
        );
    }

    #[test]
    fn test_existing_script_launches_once() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("on_button_0_pressed");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        let launched = RefCell::new(Vec::new());
        let d = Dispatcher::new(dir.path(), recording_launcher(&launched));

        let outcome = d.dispatch(&Action::ButtonPressed(0)).unwrap();
        assert_eq!(outcome, Dispatched::Launched(script.clone()));
        assert_eq!(*launched.borrow(), vec![script]);
    }

    #[test]
    fn test_missing_script_launches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let launched = RefCell::new(Vec::new());
        let d = Dispatcher::new(dir.path(), recording_launcher(&launched));

        let outcome = d.dispatch(&Action::ButtonPressed(0)).unwrap();
        assert_eq!(
            outcome,
            Dispatched::Missing(dir.path().join("on_button_0_pressed"))
        );
        assert!(launched.borrow().is_empty());
    }

    #[test]
    fn test_directory_is_not_a_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("on_axis_0_negative")).unwrap();
        let launched = RefCell::new(Vec::new());
        let d = Dispatcher::new(dir.path(), recording_launcher(&launched));

        assert!(matches!(
            d.dispatch(&Action::AxisNegative(0)).unwrap(),
            Dispatched::Missing(_)
        ));
        assert!(launched.borrow().is_empty());
    }

    #[test]
    fn test_launcher_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("on_button_1_pressed"), "").unwrap();
        let d = Dispatcher::new(dir.path(), |p: &Path| -> Result<()> {
            Err(Error::Dispatch {
                path: p.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });

        assert!(matches!(
            d.dispatch(&Action::ButtonPressed(1)),
            Err(Error::Dispatch { .. })
        ));
    }

    #[test]
    fn test_available_actions() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "on_axis_1_positive",
            "on_button_3_pressed",
            "on_button_0_pressed",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("on_axis_0_negative")).unwrap();

        let d = Dispatcher::with_shell(dir.path());
        assert_eq!(
            d.available_actions().unwrap(),
            vec![
                Action::ButtonPressed(0),
                Action::ButtonPressed(3),
                Action::AxisPositive(1),
            ]
        );
    }

    #[test]
    fn test_available_actions_missing_dir() {
        let d = Dispatcher::with_shell("/nonexistent/joyaction/scripts");
        assert!(d.available_actions().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_launcher_runs_script() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let script = dir.path().join("on button 0 pressed");
        fs::write(
            &script,
            format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        ShellLauncher.launch(&script).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !marker.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(marker.exists());
    }
}
