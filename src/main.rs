use clap::Parser;
use joyaction::{
    DEFAULT_AXIS_THRESHOLD, DEFAULT_MAX_DURATION, Dispatcher, Error, GestureConfig,
    GestureTracker, Result, listen,
};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "\
Scripts are executed when joystick buttons are pressed. To be more specific,
the script is executed when the button is released, unless it was held for
max-duration ms or longer. Scripts are named on_button_<n>_pressed,
on_axis_<n>_negative and on_axis_<n>_positive.";

/// Run scripts on joystick button taps and stick flicks.
#[derive(Parser, Debug)]
#[command(version, about, after_help = AFTER_HELP)]
struct Args {
    /// Print (more) information
    #[arg(short, long)]
    verbose: bool,

    /// Joystick device, e.g. /dev/input/js0 [default: first /dev/input/js*]
    device: Option<PathBuf>,

    /// Execute on_* scripts from this directory [default: $HOME]
    script_dir: Option<PathBuf>,

    /// Longest press or flick, in milliseconds, that still counts
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_MAX_DURATION)]
    max_duration: u32,

    /// Normalized deflection an axis must exceed before a flick counts
    #[arg(long, value_name = "F", default_value_t = DEFAULT_AXIS_THRESHOLD)]
    axis_threshold: f32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = GestureConfig::default()
        .with_max_duration(args.max_duration)
        .with_axis_threshold(args.axis_threshold);
    config.validate()?;

    let device_path = match args.device {
        Some(path) => path,
        None => find_device()?,
    };
    let script_dir = match args.script_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or_else(|| Error::Other("cannot determine home directory".into()))?,
    };

    log::info!("Using JoyStick Device  '{}'", device_path.display());
    log::info!("Using Script Directory '{}'", script_dir.display());

    let device = open_device(&device_path)?;
    let dispatcher = Dispatcher::with_shell(script_dir);

    if log::log_enabled!(log::Level::Info) {
        match dispatcher.available_actions() {
            Ok(actions) if actions.is_empty() => log::info!("no on_* scripts found"),
            Ok(actions) => {
                for action in actions {
                    log::info!("  script for {action}");
                }
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    detach_children();
    listen(device, GestureTracker::new(config), dispatcher)
}

#[cfg(target_os = "linux")]
fn find_device() -> Result<PathBuf> {
    let found = joyaction::device::find_joysticks(joyaction::device::INPUT_DIR)?;
    log::info!("Available joystick devices:");
    for path in &found {
        log::info!("  {}", path.display());
    }
    found
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoDevice("no /dev/input/js* node found".into()))
}

#[cfg(not(target_os = "linux"))]
fn find_device() -> Result<PathBuf> {
    Err(Error::NoDevice(
        "device discovery is only supported on Linux; pass a device path".into(),
    ))
}

#[cfg(target_os = "linux")]
fn open_device(path: &std::path::Path) -> Result<File> {
    let device = joyaction::device::open(path)?;
    if log::log_enabled!(log::Level::Info) {
        match joyaction::device::DeviceInfo::query(&device) {
            Ok(info) => log::info!(
                "device '{}': {} buttons and {} axes",
                info.name,
                info.buttons,
                info.axes
            ),
            Err(e) => log::warn!("{e}"),
        }
    }
    Ok(device)
}

#[cfg(not(target_os = "linux"))]
fn open_device(path: &std::path::Path) -> Result<File> {
    File::open(path).map_err(|source| Error::DeviceOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Let the kernel reap finished scripts so the loop never has to wait on them.
#[cfg(target_os = "linux")]
fn detach_children() {
    // SAFETY: no other code in this process installs a SIGCHLD handler or
    // waits on children.
    unsafe {
        libc::signal(libc::SIGCHLD, libc::SIG_IGN);
    }
}

#[cfg(not(target_os = "linux"))]
fn detach_children() {}
