//! The countdown state machine.
//!
//! All behaviour lives in [`transition`], a pure function from the current
//! [`Snapshot`] and an [`Event`] to the next snapshot plus a list of
//! [`Effect`]s. [`Engine`] wraps that function with the one piece of state it
//! cannot express purely: the outstanding [`TickHandle`].
//!
//! | State            | start            | pause         | reset                 | tick                        |
//! |------------------|------------------|---------------|-----------------------|-----------------------------|
//! | Idle, 0 left     | ignored          | ignored       | ignored               | ignored                     |
//! | Idle, >0 left    | Running          | ignored       | Idle, full duration   | ignored                     |
//! | Running          | ignored          | Paused        | Idle, full duration   | one second less or Finished |
//! | Paused           | Running          | ignored       | Idle, full duration   | ignored                     |
//! | Finished         | ignored          | ignored       | Idle, full duration   | ignored                     |
//!
//! Guard failures are silent. None of the operations return errors.

use crate::scheduler::{Scheduler, TickHandle};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Nominal period between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Lifecycle state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Not counting. Remaining time equals the committed duration, or zero
    /// when nothing has been committed yet.
    #[default]
    Idle,
    /// Counting down; exactly one tick is outstanding.
    Running,
    /// Stopped part-way; remaining time is kept.
    Paused,
    /// Reached zero while running.
    Finished,
}

impl EngineState {
    /// Short human-readable label, used by the widget's status line.
    pub fn label(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
            EngineState::Finished => "finished",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A committed duration in whole seconds.
    Configure(u64),
    /// Begin or resume counting.
    Start,
    /// Stop counting and keep the remaining time.
    Pause,
    /// Return to the committed duration.
    Reset,
    /// The outstanding tick fired.
    Tick,
}

/// Side effects requested by a transition, applied in order by [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Release the outstanding tick, if any.
    CancelTick,
    /// Acquire a fresh tick one [`TICK_INTERVAL`] from now.
    ScheduleTick,
    /// The remaining time changed and should be redisplayed.
    Emit(u64),
    /// The countdown just reached zero.
    Finished,
}

/// The observable state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Current lifecycle state.
    pub state: EngineState,
    /// Committed duration in seconds, `None` until the first commit.
    pub duration: Option<u64>,
    /// Seconds left on the clock.
    pub remaining: u64,
}

/// Result of feeding one event to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State before the event.
    pub prev: Snapshot,
    /// State after the event.
    pub next: Snapshot,
    /// Effects to apply, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn ignored(current: Snapshot) -> Self {
        Self {
            prev: current,
            next: current,
            effects: Vec::new(),
        }
    }

    /// Whether the event was rejected by a guard.
    pub fn is_ignored(&self) -> bool {
        self.prev == self.next && self.effects.is_empty()
    }

    /// Whether this transition ended the countdown.
    pub fn finished(&self) -> bool {
        self.effects.contains(&Effect::Finished)
    }
}

/// Computes the next state of the countdown.
///
/// This function is pure: it does not touch any scheduler. Every transition
/// out of [`EngineState::Running`] lists [`Effect::CancelTick`] first, and
/// every transition into it lists [`Effect::ScheduleTick`].
///
/// ```rust
/// use countdown_widgets::engine::{transition, Effect, EngineState, Event, Snapshot};
///
/// let running = Snapshot { state: EngineState::Running, duration: Some(3), remaining: 1 };
/// let t = transition(running, Event::Tick);
/// assert_eq!(t.next.state, EngineState::Finished);
/// assert_eq!(t.next.remaining, 0);
/// assert_eq!(t.effects, vec![Effect::CancelTick, Effect::Emit(0), Effect::Finished]);
/// ```
pub fn transition(current: Snapshot, event: Event) -> Transition {
    use EngineState::*;

    let (next, effects) = match (current.state, event) {
        (_, Event::Configure(0)) => return Transition::ignored(current),
        (_, Event::Configure(duration)) => (
            Snapshot {
                state: Idle,
                duration: Some(duration),
                remaining: duration,
            },
            vec![Effect::CancelTick, Effect::Emit(duration)],
        ),

        (Running, Event::Start) => return Transition::ignored(current),
        (_, Event::Start) if current.remaining == 0 => return Transition::ignored(current),
        (Idle | Paused, Event::Start) => (
            Snapshot {
                state: Running,
                ..current
            },
            vec![Effect::ScheduleTick],
        ),
        (Finished, Event::Start) => return Transition::ignored(current),

        (Running, Event::Pause) => (
            Snapshot {
                state: Paused,
                ..current
            },
            vec![Effect::CancelTick],
        ),
        (_, Event::Pause) => return Transition::ignored(current),

        (Idle, Event::Reset) if current.duration.is_none() => {
            // Nothing committed: the clock is already at zero. Still release
            // any tick so reset keeps its unconditional cancel.
            (current, vec![Effect::CancelTick])
        }
        (_, Event::Reset) => {
            let remaining = current.duration.unwrap_or(0);
            (
                Snapshot {
                    state: Idle,
                    duration: current.duration,
                    remaining,
                },
                vec![Effect::CancelTick, Effect::Emit(remaining)],
            )
        }

        (Running, Event::Tick) => {
            let remaining = current.remaining.saturating_sub(1);
            if remaining == 0 {
                (
                    Snapshot {
                        state: Finished,
                        remaining: 0,
                        ..current
                    },
                    vec![Effect::CancelTick, Effect::Emit(0), Effect::Finished],
                )
            } else {
                (
                    Snapshot {
                        remaining,
                        ..current
                    },
                    vec![Effect::ScheduleTick, Effect::Emit(remaining)],
                )
            }
        }
        (_, Event::Tick) => return Transition::ignored(current),
    };

    Transition {
        prev: current,
        next,
        effects,
    }
}

/// A countdown bound to a tick [`Scheduler`].
///
/// The engine owns the only handle to its outstanding tick. Ticks are
/// acquired through `arm` and released through `disarm`; no other code path
/// touches the scheduler, so at most one tick is ever outstanding. Dropping
/// the engine releases the tick.
///
/// # Examples
///
/// ```rust
/// use countdown_widgets::engine::{Engine, EngineState};
/// use countdown_widgets::scheduler::ManualScheduler;
///
/// let mut engine = Engine::new(ManualScheduler::new());
/// engine.configure(3);
/// engine.start();
///
/// for expected in [2, 1, 0] {
///     let tick = engine.scheduler_mut().fire().unwrap();
///     engine.tick(tick);
///     assert_eq!(engine.remaining(), expected);
/// }
///
/// assert_eq!(engine.state(), EngineState::Finished);
/// assert!(engine.scheduler().pending().is_empty());
/// ```
#[derive(Debug)]
pub struct Engine<S: Scheduler> {
    id: i64,
    tag: i64,
    snapshot: Snapshot,
    tick: Option<TickHandle>,
    scheduler: S,
}

impl<S: Scheduler> Engine<S> {
    /// Creates an idle engine with no duration committed.
    pub fn new(scheduler: S) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            snapshot: Snapshot::default(),
            tick: None,
            scheduler,
        }
    }

    /// Unique id of this engine; tick messages carry it.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.snapshot.state
    }

    /// The committed duration, if any.
    pub fn duration(&self) -> Option<u64> {
        self.snapshot.duration
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u64 {
        self.snapshot.remaining
    }

    /// The full observable state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// The tick the engine is currently waiting for.
    pub fn outstanding_tick(&self) -> Option<TickHandle> {
        self.tick
    }

    /// Whether `start` would have an effect right now.
    pub fn can_start(&self) -> bool {
        self.snapshot.state != EngineState::Running && self.snapshot.remaining > 0
    }

    /// Whether `pause` would have an effect right now.
    pub fn can_pause(&self) -> bool {
        self.snapshot.state == EngineState::Running
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler, e.g. to drain buffered commands.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Commits a new duration. Always cancels the outstanding tick and
    /// returns to idle, even when `seconds` equals the current duration.
    /// A zero duration is ignored.
    pub fn configure(&mut self, seconds: u64) -> Transition {
        self.handle(Event::Configure(seconds))
    }

    /// Starts or resumes the countdown.
    pub fn start(&mut self) -> Transition {
        self.handle(Event::Start)
    }

    /// Pauses a running countdown.
    pub fn pause(&mut self) -> Transition {
        self.handle(Event::Pause)
    }

    /// Returns to the committed duration and cancels any outstanding tick.
    pub fn reset(&mut self) -> Transition {
        self.handle(Event::Reset)
    }

    /// Delivers a fired tick.
    ///
    /// Ticks whose handle is not the outstanding one were cancelled after
    /// they were scheduled and are dropped without effect.
    pub fn tick(&mut self, handle: TickHandle) -> Transition {
        if self.tick != Some(handle) {
            trace!(
                id = self.id,
                tag = handle.tag(),
                "dropping stale countdown tick"
            );
            return Transition::ignored(self.snapshot);
        }
        // The handle is one-shot; it is spent as soon as it fires.
        self.tick = None;
        self.handle(Event::Tick)
    }

    /// Releases the outstanding tick without changing state.
    ///
    /// Called automatically on drop.
    pub fn teardown(&mut self) {
        self.disarm();
    }

    fn handle(&mut self, event: Event) -> Transition {
        let t = transition(self.snapshot, event);
        if t.is_ignored() {
            trace!(id = self.id, ?event, state = ?self.snapshot.state, "countdown event ignored");
            return t;
        }

        // Release before the state moves so a tick cannot outlive Running.
        if t.effects.contains(&Effect::CancelTick) {
            self.disarm();
        }

        self.snapshot = t.next;
        debug_assert!(self.snapshot.remaining <= self.snapshot.duration.unwrap_or(0));

        if t.effects.contains(&Effect::ScheduleTick) {
            self.arm();
        }

        debug!(
            id = self.id,
            ?event,
            from = ?t.prev.state,
            to = ?t.next.state,
            remaining = t.next.remaining,
            "countdown transition"
        );
        t
    }

    fn arm(&mut self) {
        self.disarm();
        self.tag += 1;
        let handle = TickHandle::new(self.id, self.tag);
        self.scheduler.schedule(handle, TICK_INTERVAL);
        self.tick = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for Engine<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}
