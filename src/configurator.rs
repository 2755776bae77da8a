//! Duration entry: turning raw input text into a committed countdown length.
//!
//! Text is interpreted the way a browser's `Number()` would read the value of
//! a numeric field, then filtered to strictly positive finite values.
//! Anything else leaves the configurator unset, and committing while unset
//! does nothing. There is no error path.

use crate::engine::{Engine, Transition};
use crate::scheduler::Scheduler;
use tracing::debug;

/// Outcome of [`Configurator::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    /// The duration was applied to the engine.
    Committed(u64),
    /// Nothing valid was entered; the engine was not touched.
    Ignored,
}

impl CommitResult {
    /// Whether the commit reached the engine.
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitResult::Committed(_))
    }
}

/// Parses duration text into whole seconds.
///
/// Returns `Some` exactly when the text reads as a finite number greater than
/// zero. Accepted forms are decimal with optional sign, fraction and exponent,
/// and `0x`/`0o`/`0b` integers. Surrounding whitespace is ignored. Fractions
/// round up so that a positive entry never becomes a zero-length countdown.
///
/// ```rust
/// use countdown_widgets::configurator::parse_duration;
///
/// assert_eq!(parse_duration("90"), Some(90));
/// assert_eq!(parse_duration(" 1e2 "), Some(100));
/// assert_eq!(parse_duration("0x1f"), Some(31));
/// assert_eq!(parse_duration("2.5"), Some(3));
/// assert_eq!(parse_duration(""), None);
/// assert_eq!(parse_duration("0"), None);
/// assert_eq!(parse_duration("-4"), None);
/// assert_eq!(parse_duration("ten"), None);
/// ```
pub fn parse_duration(text: &str) -> Option<u64> {
    parse_number(text)
        .filter(|value| value.is_finite() && *value > 0.0)
        .map(|value| value.ceil() as u64)
}

// Number() coercion of a string: blank is zero, otherwise the whole trimmed
// text must be a numeric literal.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0o") | Some("0O") => 8,
        Some("0b") | Some("0B") => 2,
        _ => return parse_decimal(trimmed),
    };

    let digits = &trimmed[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, ch| {
        ch.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

fn parse_decimal(text: &str) -> Option<f64> {
    // Number() only spells infinity as "Infinity"; str::parse also takes
    // "inf" and "nan".
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Holds the most recently entered duration text and its parsed value.
///
/// ```rust
/// use countdown_widgets::configurator::{CommitResult, Configurator};
/// use countdown_widgets::engine::Engine;
/// use countdown_widgets::scheduler::ManualScheduler;
///
/// let mut engine = Engine::new(ManualScheduler::new());
/// let mut config = Configurator::new();
///
/// config.set_duration("abc");
/// assert_eq!(config.commit(&mut engine), CommitResult::Ignored);
///
/// config.set_duration("45");
/// assert_eq!(config.commit(&mut engine), CommitResult::Committed(45));
/// assert_eq!(engine.remaining(), 45);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    text: String,
    parsed: Option<u64>,
}

impl Configurator {
    /// Creates an unset configurator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records new input text and returns its parsed duration.
    pub fn set_duration(&mut self, text: &str) -> Option<u64> {
        self.text = text.to_string();
        self.parsed = parse_duration(text);
        self.parsed
    }

    /// The last text given to [`Configurator::set_duration`].
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed duration, `None` while unset.
    pub fn parsed(&self) -> Option<u64> {
        self.parsed
    }

    /// Applies the parsed duration to `engine`.
    ///
    /// When set, the engine takes the duration as both its starting value and
    /// its remaining time and returns to idle, cancelling any tick in flight.
    /// When unset, nothing happens.
    pub fn commit<S: Scheduler>(&self, engine: &mut Engine<S>) -> CommitResult {
        self.commit_with_transition(engine).0
    }

    pub(crate) fn commit_with_transition<S: Scheduler>(
        &self,
        engine: &mut Engine<S>,
    ) -> (CommitResult, Option<Transition>) {
        match self.parsed {
            Some(seconds) => {
                debug!(id = engine.id(), seconds, "committing countdown duration");
                let t = engine.configure(seconds);
                (CommitResult::Committed(seconds), Some(t))
            }
            None => (CommitResult::Ignored, None),
        }
    }
}
