//! Recognized gestures.

use std::fmt;

/// A gesture that maps to a handler script.
///
/// Rendered to a script name only at the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Button released shortly after being pressed.
    ButtonPressed(u8),
    /// Axis snapped back to center from a strong negative deflection.
    AxisNegative(u8),
    /// Axis snapped back to center from a strong positive deflection.
    AxisPositive(u8),
}

impl Action {
    /// The button or axis number that triggered this action.
    pub fn index(&self) -> u8 {
        match self {
            Action::ButtonPressed(n) | Action::AxisNegative(n) | Action::AxisPositive(n) => *n,
        }
    }

    /// File name of the handler script, e.g. `on_button_3_pressed`.
    pub fn script_name(&self) -> String {
        self.to_string()
    }

    /// Parse a script file name back into an action.
    pub fn from_script_name(name: &str) -> Option<Self> {
        if let Some(rest) = name.strip_prefix("on_button_") {
            let n = rest.strip_suffix("_pressed")?;
            return parse_index(n).map(Action::ButtonPressed);
        }

        let rest = name.strip_prefix("on_axis_")?;
        if let Some(n) = rest.strip_suffix("_negative") {
            parse_index(n).map(Action::AxisNegative)
        } else if let Some(n) = rest.strip_suffix("_positive") {
            parse_index(n).map(Action::AxisPositive)
        } else {
            None
        }
    }
}

// Only plain decimal digits; `u8::from_str` would also take a leading '+'.
fn parse_index(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ButtonPressed(n) => write!(f, "on_button_{n}_pressed"),
            Action::AxisNegative(n) => write!(f, "on_axis_{n}_negative"),
            Action::AxisPositive(n) => write!(f, "on_axis_{n}_positive"),
        }
    }
}
