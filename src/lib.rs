#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/countdown-widgets/")]

//! # countdown-widgets
//!
//! A countdown timer control for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications.
//!
//! The user types a duration in seconds, commits it with **Set Duration**, and
//! then drives the countdown with **Start**, **Pause** and **Reset** while the
//! remaining time is shown as `MM:SS`.
//!
//! ## Layers
//!
//! - [`format`]: `MM:SS` rendering of a number of seconds
//! - [`configurator`]: parses typed text and commits it to an engine
//! - [`engine`]: the Idle / Running / Paused / Finished state machine
//! - [`scheduler`]: the seam through which the engine asks for its one-second
//!   tick. [`scheduler::CmdScheduler`] turns requests into bubbletea commands,
//!   [`scheduler::ManualScheduler`] lets tests fire ticks by hand
//! - [`numinput`], [`key`], [`help`]: the input field, key bindings and help bar
//! - [`countdown`]: the widget tying all of the above together
//!
//! The engine and configurator know nothing about terminals and can be used
//! on their own:
//!
//! ```rust
//! use countdown_widgets::prelude::*;
//!
//! let mut engine = Engine::new(ManualScheduler::new());
//! let mut config = Configurator::new();
//! config.set_duration("3");
//! config.commit(&mut engine);
//! engine.start();
//!
//! while let Some(handle) = engine.scheduler_mut().fire() {
//!     engine.tick(handle);
//! }
//! assert_eq!(engine.state(), EngineState::Finished);
//! assert_eq!(format_clock(engine.remaining()), "00:00");
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use countdown_widgets::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { countdown: Countdown::new() }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod config;
pub mod configurator;
pub mod countdown;
pub mod engine;
pub mod format;
pub mod help;
pub mod key;
pub mod numinput;
pub mod scheduler;

use bubbletea_rs::Cmd;

/// Focus management for components that take keyboard input.
///
/// ```rust
/// use countdown_widgets::prelude::*;
///
/// let mut input = numinput_new();
/// assert!(!input.focused());
///
/// input.focus();
/// assert!(input.focused());
///
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Gives the component keyboard focus. May return a command to run, for
    /// example to start a cursor animation.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use configurator::{parse_duration, CommitResult, Configurator};
pub use countdown::{
    ButtonStates, CommittedMsg, CountdownKeyMap, FinishedMsg, Model as Countdown,
    Styles as CountdownStyles,
};
pub use engine::{transition, Effect, Engine, EngineState, Event, Snapshot, Transition};
pub use format::format_clock;
pub use help::Model as HelpModel;
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
    Binding, Help as KeyHelp, KeyMap, KeyPress,
};
pub use numinput::{
    new as numinput_new, ChangeEvent, KeyMap as NumInputKeyMap, Model as NumInput,
};
pub use scheduler::{CmdScheduler, ManualScheduler, Scheduler, TickHandle, TickMsg};

/// Common imports.
///
/// ```rust
/// use countdown_widgets::prelude::*;
///
/// let countdown = Countdown::new();
/// assert_eq!(countdown.state(), EngineState::Idle);
/// ```
pub mod prelude {
    pub use crate::Component;

    pub use crate::configurator::{parse_duration, CommitResult, Configurator};
    pub use crate::countdown::{CommittedMsg, FinishedMsg, Model as Countdown};
    pub use crate::engine::{Engine, EngineState, Transition};
    pub use crate::format::format_clock;
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::numinput::{new as numinput_new, Model as NumInput};
    pub use crate::scheduler::{CmdScheduler, ManualScheduler, Scheduler, TickHandle, TickMsg};
}
