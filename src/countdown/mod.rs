//! Countdown timer widget for Bubble Tea applications.
//!
//! The widget bundles a numeric input for the duration, a `MM:SS` clock and a
//! row of buttons (Set Duration, Start, Pause, Reset) driven by key bindings.
//! Behind it sit a [`Configurator`] and an [`Engine`]; the widget itself only
//! routes messages and renders.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widgets::countdown::Model;
//! use countdown_widgets::engine::EngineState;
//!
//! let mut countdown = Model::new();
//! countdown.set_duration("90");
//! let _cmd = countdown.commit();
//! assert_eq!(countdown.remaining(), 90);
//!
//! let _tick_cmd = countdown.start();
//! assert_eq!(countdown.state(), EngineState::Running);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use countdown_widgets::countdown::{FinishedMsg, Model as Countdown};
//!
//! struct App {
//!     countdown: Countdown,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (App { countdown: Countdown::new(), done: false }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

mod keys;
mod style;
mod view;

pub use keys::CountdownKeyMap;
pub use style::Styles;

use crate::configurator::{CommitResult, Configurator};
use crate::engine::{Engine, EngineState, Transition};
use crate::help;
use crate::key::matches_binding;
use crate::numinput;
use crate::scheduler::{CmdScheduler, TickMsg};
use crate::Component;
use bubbletea_rs::{batch, quit, tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use std::time::Duration;
use tracing::{debug, info};

/// Sent after a duration has been committed.
#[derive(Debug, Clone)]
pub struct CommittedMsg {
    /// Id of the countdown that was configured.
    pub id: i64,
    /// The committed duration in seconds.
    pub duration: u64,
}

/// Sent once when a running countdown reaches zero.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// Id of the countdown that finished.
    pub id: i64,
}

/// Which of the widget's buttons can currently be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    /// Set Duration is always pressable; committing garbage is a no-op.
    pub set_duration: bool,
    /// Start is off while running or with nothing left on the clock.
    pub start: bool,
    /// Pause is on only while running.
    pub pause: bool,
    /// Reset is always pressable.
    pub reset: bool,
}

impl ButtonStates {
    /// Derives the button states from an engine.
    pub fn from_engine<S: crate::scheduler::Scheduler>(engine: &Engine<S>) -> Self {
        Self {
            set_duration: true,
            start: engine.can_start(),
            pause: engine.can_pause(),
            reset: true,
        }
    }
}

fn notify<M>(msg: M) -> Cmd
where
    M: Clone + Send + 'static,
{
    bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
}

/// The countdown widget.
#[derive(Debug)]
pub struct Model {
    /// Heading shown above the input; empty hides it.
    pub title: String,
    /// The duration input.
    pub input: numinput::Model,
    /// Button key bindings.
    pub key_map: CountdownKeyMap,
    /// Help bar.
    pub help: help::Model,
    /// View styles.
    pub styles: Styles,

    configurator: Configurator,
    // Input text the configurator last saw from the field.
    synced_input: String,
    engine: Engine<CmdScheduler>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an idle countdown with a focused, empty duration input.
    pub fn new() -> Self {
        let mut input = numinput::new();
        input.set_placeholder("Enter duration (seconds)");
        input.focus();

        let mut model = Self {
            title: "Countdown Timer".to_string(),
            input,
            key_map: CountdownKeyMap::default(),
            help: help::Model::new(),
            styles: Styles::default(),
            configurator: Configurator::new(),
            synced_input: String::new(),
            engine: Engine::new(CmdScheduler::new()),
        };
        model.sync_bindings();
        model
    }

    /// Unique id of this countdown; carried by its messages.
    pub fn id(&self) -> i64 {
        self.engine.id()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Engine<CmdScheduler> {
        &self.engine
    }

    /// Current engine state.
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u64 {
        self.engine.remaining()
    }

    /// The last parsed duration from the input, if valid.
    pub fn pending_duration(&self) -> Option<u64> {
        self.configurator.parsed()
    }

    /// Which buttons are currently pressable.
    pub fn buttons(&self) -> ButtonStates {
        ButtonStates::from_engine(&self.engine)
    }

    /// Parses `text` as the pending duration, without committing.
    ///
    /// The text is parsed exactly as given. The input field only mirrors it
    /// for display, so characters the field cannot hold do not change the
    /// result.
    pub fn set_duration(&mut self, text: &str) -> Option<u64> {
        self.input.set_value(text);
        self.synced_input = self.input.value();
        self.configurator.set_duration(text)
    }

    /// Set Duration: commits the parsed input, if any.
    ///
    /// Edits made to [`Model::input`] directly are picked up first.
    pub fn commit(&mut self) -> Option<Cmd> {
        let current = self.input.value();
        if current != self.synced_input {
            self.configurator.set_duration(&current);
            self.synced_input = current;
        }

        let (result, transition) = self.configurator.commit_with_transition(&mut self.engine);
        let cmds = match result {
            CommitResult::Committed(duration) => vec![self.committed(duration)],
            CommitResult::Ignored => Vec::new(),
        };
        self.after(transition, cmds)
    }

    /// Commits an already validated number of seconds. Zero is ignored.
    pub fn commit_seconds(&mut self, seconds: u64) -> Option<Cmd> {
        let t = self.engine.configure(seconds);
        let cmds = if t.is_ignored() {
            Vec::new()
        } else {
            let text = seconds.to_string();
            self.input.set_value(&text);
            self.synced_input = self.input.value();
            self.configurator.set_duration(&text);
            vec![self.committed(seconds)]
        };
        self.after(Some(t), cmds)
    }

    fn committed(&self, duration: u64) -> Cmd {
        info!(id = self.id(), duration, "countdown duration set");
        notify(CommittedMsg {
            id: self.id(),
            duration,
        })
    }

    /// Start: begins or resumes the countdown.
    pub fn start(&mut self) -> Option<Cmd> {
        let t = self.engine.start();
        self.after(Some(t), Vec::new())
    }

    /// Pause: stops the countdown, keeping the remaining time.
    pub fn pause(&mut self) -> Option<Cmd> {
        let t = self.engine.pause();
        self.after(Some(t), Vec::new())
    }

    /// Reset: returns to the committed duration.
    pub fn reset(&mut self) -> Option<Cmd> {
        let t = self.engine.reset();
        self.after(Some(t), Vec::new())
    }

    /// Releases the outstanding tick. Call before the widget goes away if it
    /// is not simply dropped.
    pub fn teardown(&mut self) {
        self.engine.teardown();
        self.sync_bindings();
    }

    /// Processes a message and returns any follow-up command.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.engine.id() {
                return None;
            }
            let t = self.engine.tick(tick.handle());
            let mut cmds = Vec::new();
            if t.finished() {
                info!(id = self.id(), "countdown finished");
                cmds.push(notify(FinishedMsg { id: self.id() }));
            }
            return self.after(Some(t), cmds);
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = usize::from(size.width);
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg, &msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if matches_binding(key_msg, &self.key_map.quit) {
            debug!(id = self.id(), "quit requested");
            self.teardown();
            return Some(quit());
        }
        if matches_binding(key_msg, &self.key_map.help) {
            self.help.toggle();
            return None;
        }
        if matches_binding(key_msg, &self.key_map.set_duration) {
            return self.commit();
        }
        if matches_binding(key_msg, &self.key_map.start) {
            return self.start();
        }
        if matches_binding(key_msg, &self.key_map.pause) {
            return self.pause();
        }
        if matches_binding(key_msg, &self.key_map.reset) {
            return self.reset();
        }

        if let Some(change) = self.input.update(msg) {
            self.configurator.set_duration(&change.text);
            self.synced_input = change.text;
        }
        None
    }

    // Refreshes the button bindings and drains scheduled ticks into the
    // command returned to the runtime.
    fn after(&mut self, transition: Option<Transition>, mut cmds: Vec<Cmd>) -> Option<Cmd> {
        if let Some(t) = transition {
            if !t.is_ignored() {
                self.sync_bindings();
            }
        }
        if let Some(tick) = self.engine.scheduler_mut().take_cmd() {
            cmds.push(tick);
        }
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(batch(cmds)),
        }
    }

    fn sync_bindings(&mut self) {
        let buttons = self.buttons();
        self.key_map.set_duration.set_enabled(buttons.set_duration);
        self.key_map.start.set_enabled(buttons.start);
        self.key_map.pause.set_enabled(buttons.pause);
        self.key_map.reset.set_enabled(buttons.reset);
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
