//! Tick scheduling for the countdown engine.
//!
//! The engine never talks to a clock directly. Whenever it enters the running
//! state it asks a [`Scheduler`] for exactly one future tick, identified by a
//! [`TickHandle`], and whenever it leaves the running state it cancels that
//! handle again.
//!
//! Two schedulers ship with the crate:
//!
//! - [`CmdScheduler`] turns each scheduled tick into a one-shot
//!   `bubbletea_rs::tick` command that delivers a [`TickMsg`] back to the
//!   program's update loop.
//! - [`ManualScheduler`] only records what was asked of it, so tests and
//!   headless drivers can fire ticks by hand.
//!
//! # Cancellation
//!
//! A bubbletea command cannot be recalled once the runtime has started it.
//! Cancellation therefore works the same way the Go bubbles timer rejects
//! stale messages: every handle carries the engine id and a generation tag,
//! and the engine drops any [`TickMsg`] whose handle is not the one it is
//! currently holding.

use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, Msg};
use std::fmt;
use std::time::Duration;

/// Identifies a single scheduled tick.
///
/// Handles are minted by the engine. Two handles are equal only when both the
/// engine id and the generation tag match, so a handle from an earlier run of
/// the countdown never matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle {
    id: i64,
    tag: i64,
}

impl TickHandle {
    pub(crate) fn new(id: i64, tag: i64) -> Self {
        Self { id, tag }
    }

    /// The id of the engine that owns this tick.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Generation tag of this tick within its engine.
    pub fn tag(&self) -> i64 {
        self.tag
    }
}

/// Message delivered when a scheduled tick fires.
///
/// Feed it to the countdown's `update()`; the engine decides whether it is
/// the outstanding tick or a stale one.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The id of the engine this tick belongs to.
    pub id: i64,
    tag: i64,
}

impl TickMsg {
    /// The handle this tick was scheduled under.
    pub fn handle(&self) -> TickHandle {
        TickHandle::new(self.id, self.tag)
    }
}

impl From<TickHandle> for TickMsg {
    fn from(handle: TickHandle) -> Self {
        Self {
            id: handle.id,
            tag: handle.tag,
        }
    }
}

impl From<TickMsg> for Msg {
    fn from(msg: TickMsg) -> Self {
        Box::new(msg) as Msg
    }
}

/// Acquire/release interface between the engine and a time source.
///
/// Implementations only need to remember or forget handles. The engine
/// guarantees that at most one handle is outstanding at a time and that it
/// cancels a handle before it schedules the next one.
pub trait Scheduler {
    /// Arrange for `handle` to fire once, `after` from now.
    fn schedule(&mut self, handle: TickHandle, after: Duration);

    /// Forget `handle`. Cancelling a handle that is unknown or has already
    /// fired must be a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler backed by bubbletea commands.
///
/// Scheduled ticks are buffered as commands until the owning component hands
/// them back to the runtime with [`CmdScheduler::take_cmd`].
#[derive(Default)]
pub struct CmdScheduler {
    pending: Vec<(TickHandle, Cmd)>,
}

impl CmdScheduler {
    /// Creates a scheduler with nothing buffered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tick commands waiting to be handed to the runtime.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drains the buffered commands into a single command, if there are any.
    pub fn take_cmd(&mut self) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = self.pending.drain(..).map(|(_, cmd)| cmd).collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(batch(cmds)),
        }
    }
}

impl Scheduler for CmdScheduler {
    fn schedule(&mut self, handle: TickHandle, after: Duration) {
        let cmd = bubbletea_tick(after, move |_| TickMsg::from(handle).into());
        self.pending.push((handle, cmd));
    }

    fn cancel(&mut self, handle: TickHandle) {
        // Commands already returned to the runtime are filtered by the engine
        // when their TickMsg arrives.
        self.pending.retain(|(pending, _)| *pending != handle);
    }
}

impl fmt::Debug for CmdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdScheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// A scheduler that never fires on its own.
///
/// Every `schedule` call is recorded as a pending tick; `cancel` removes it.
/// Call [`ManualScheduler::fire`] to take the oldest pending tick and pass it
/// to the engine as if the interval had elapsed.
///
/// ```rust
/// use countdown_widgets::engine::Engine;
/// use countdown_widgets::scheduler::ManualScheduler;
///
/// let mut engine = Engine::new(ManualScheduler::new());
/// engine.configure(2);
/// engine.start();
///
/// let tick = engine.scheduler_mut().fire().unwrap();
/// engine.tick(tick);
/// assert_eq!(engine.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Vec<TickHandle>,
    scheduled: usize,
    cancelled: usize,
    last_interval: Option<Duration>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks that were scheduled and have neither fired nor been cancelled.
    pub fn pending(&self) -> &[TickHandle] {
        &self.pending
    }

    /// Total number of `schedule` calls seen.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Number of `cancel` calls that removed a pending tick.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// The interval requested by the most recent `schedule` call.
    pub fn last_interval(&self) -> Option<Duration> {
        self.last_interval
    }

    /// Removes and returns the oldest pending tick.
    pub fn fire(&mut self) -> Option<TickHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, handle: TickHandle, after: Duration) {
        self.scheduled += 1;
        self.last_interval = Some(after);
        self.pending.push(handle);
    }

    fn cancel(&mut self, handle: TickHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_msg_round_trips_handle() {
        let handle = TickHandle::new(7, 3);
        let msg = TickMsg::from(handle);
        assert_eq!(msg.id, 7);
        assert_eq!(msg.handle(), handle);
    }

    #[test]
    fn test_handles_differ_by_tag() {
        assert_ne!(TickHandle::new(1, 1), TickHandle::new(1, 2));
        assert_ne!(TickHandle::new(1, 1), TickHandle::new(2, 1));
    }

    #[test]
    fn test_manual_scheduler_fire_order() {
        let mut scheduler = ManualScheduler::new();
        let first = TickHandle::new(1, 1);
        let second = TickHandle::new(1, 2);

        scheduler.schedule(first, Duration::from_secs(1));
        scheduler.schedule(second, Duration::from_secs(1));

        assert_eq!(scheduler.scheduled_count(), 2);
        assert_eq!(scheduler.fire(), Some(first));
        assert_eq!(scheduler.fire(), Some(second));
        assert_eq!(scheduler.fire(), None);
    }

    #[test]
    fn test_manual_scheduler_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let handle = TickHandle::new(1, 1);

        scheduler.schedule(handle, Duration::from_secs(1));
        scheduler.cancel(handle);
        scheduler.cancel(handle);

        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn test_cmd_scheduler_buffers_and_drains() {
        let mut scheduler = CmdScheduler::new();
        assert!(scheduler.take_cmd().is_none());

        scheduler.schedule(TickHandle::new(1, 1), Duration::from_secs(1));
        assert_eq!(scheduler.pending_len(), 1);
        assert!(scheduler.take_cmd().is_some());
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn test_cmd_scheduler_cancel_drops_buffered_tick() {
        let mut scheduler = CmdScheduler::new();
        let handle = TickHandle::new(1, 1);

        scheduler.schedule(handle, Duration::from_secs(1));
        scheduler.cancel(handle);

        assert_eq!(scheduler.pending_len(), 0);
        assert!(scheduler.take_cmd().is_none());
    }

    #[tokio::test]
    async fn test_cmd_scheduler_tick_delivers_tick_msg() {
        let mut scheduler = CmdScheduler::new();
        let handle = TickHandle::new(9, 4);
        scheduler.schedule(handle, Duration::from_millis(5));

        let cmd = scheduler.take_cmd().expect("tick command");
        let msg = cmd.await.expect("tick message");
        let tick = msg.downcast_ref::<TickMsg>().expect("TickMsg");
        assert_eq!(tick.handle(), handle);
    }
}
