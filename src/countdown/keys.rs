//! Key bindings for the countdown widget.
//!
//! - **Set duration**: `enter` commits the typed duration
//! - **Start / resume**: `s` or `space`
//! - **Pause**: `p`
//! - **Reset**: `r`
//! - **Help**: `?` toggles the expanded help
//! - **Quit**: `esc` or `ctrl+c`
//!
//! None of the action keys can be typed into the numeric input, so the input
//! stays focused the whole time.

use crate::key;
use crossterm::event::KeyCode;

/// Bindings for the countdown's buttons.
///
/// `start` and `pause` are enabled and disabled by the widget to follow the
/// engine: Start is off while running or when there is no time left, Pause
/// is off unless running. The other bindings are always enabled.
#[derive(Debug, Clone)]
pub struct CountdownKeyMap {
    /// Commit the duration in the input.
    pub set_duration: key::Binding,
    /// Start or resume.
    pub start: key::Binding,
    /// Pause.
    pub pause: key::Binding,
    /// Reset to the committed duration.
    pub reset: key::Binding,
    /// Toggle the expanded help.
    pub help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for CountdownKeyMap {
    fn default() -> Self {
        Self {
            set_duration: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "set duration"),
            start: key::Binding::new(vec![KeyCode::Char('s'), KeyCode::Char(' ')])
                .with_help("s/space", "start"),
            pause: key::Binding::new(vec![KeyCode::Char('p')]).with_help("p", "pause"),
            reset: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: key::new_binding(vec![key::with_keys_str(&["esc", "ctrl+c"])])
                .with_help("esc", "quit"),
        }
    }
}

impl key::KeyMap for CountdownKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.set_duration,
            &self.start,
            &self.pause,
            &self.reset,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.set_duration],
            vec![&self.start, &self.pause, &self.reset],
            vec![&self.help, &self.quit],
        ]
    }
}
