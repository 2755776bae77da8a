//! Drives the countdown widget through key presses and tick messages.

use bubbletea_rs::event::BatchCmdMsg;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use countdown_widgets::prelude::*;
use countdown_widgets::ButtonStates;
use crossterm::event::{KeyCode, KeyModifiers};

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn type_text(m: &mut Countdown, text: &str) {
    for ch in text.chars() {
        m.update(key(KeyCode::Char(ch)));
    }
}

fn plain(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
}

fn committed(seconds: &str) -> Countdown {
    let mut m = Countdown::new();
    type_text(&mut m, seconds);
    m.update(key(KeyCode::Enter));
    m
}

// Feeds the outstanding tick back to the widget, as the runtime would once
// the interval elapsed.
fn fire(m: &mut Countdown) -> Option<Cmd> {
    let handle = m.engine().outstanding_tick().expect("a tick is outstanding");
    m.update(Box::new(TickMsg::from(handle)))
}

async fn messages(cmd: Cmd) -> Vec<Msg> {
    let mut out = Vec::new();
    let mut queue = vec![cmd];
    while let Some(cmd) = queue.pop() {
        if let Some(msg) = cmd.await {
            match msg.downcast::<BatchCmdMsg>() {
                Ok(batch) => queue.extend(batch.0),
                Err(msg) => out.push(msg),
            }
        }
    }
    out
}

#[test]
fn enter_commits_typed_duration() {
    let m = committed("90");
    assert_eq!(m.state(), EngineState::Idle);
    assert_eq!(m.remaining(), 90);
    assert!(plain(&m.view()).contains("01:30"));
}

#[test]
fn invalid_text_is_not_committed() {
    let mut m = committed("0");
    assert_eq!(m.remaining(), 0);
    assert!(m.update(key(KeyCode::Char('s'))).is_none());
    assert_eq!(m.state(), EngineState::Idle);

    m.input.reset();
    type_text(&mut m, "-5");
    m.update(key(KeyCode::Enter));
    assert_eq!(m.engine().duration(), None);
}

#[test]
fn fractional_duration_rounds_up() {
    let m = committed("2.5");
    assert_eq!(m.remaining(), 3);
}

#[test]
fn start_pause_resume_with_keys() {
    let mut m = committed("10");

    assert!(m.update(key(KeyCode::Char('s'))).is_some());
    assert_eq!(m.state(), EngineState::Running);

    fire(&mut m);
    fire(&mut m);
    assert_eq!(m.remaining(), 8);

    m.update(key(KeyCode::Char('p')));
    assert_eq!(m.state(), EngineState::Paused);
    assert!(m.engine().outstanding_tick().is_none());
    assert_eq!(m.remaining(), 8);

    m.update(key(KeyCode::Char(' ')));
    assert_eq!(m.state(), EngineState::Running);
    fire(&mut m);
    assert_eq!(m.remaining(), 7);
    assert!(plain(&m.view()).contains("00:07"));
}

#[test]
fn disabled_actions_do_nothing() {
    let mut m = committed("5");

    // Pause is disabled while idle.
    assert!(m.update(key(KeyCode::Char('p'))).is_none());
    assert_eq!(m.state(), EngineState::Idle);

    m.update(key(KeyCode::Char('s')));
    let tick = m.engine().outstanding_tick();

    // Start is disabled while running and must not schedule a second tick.
    assert!(m.update(key(KeyCode::Char('s'))).is_none());
    assert_eq!(m.engine().outstanding_tick(), tick);
}

#[test]
fn countdown_runs_to_finished() {
    let mut m = committed("3");
    m.update(key(KeyCode::Char('s')));

    let mut seen = Vec::new();
    while m.state() == EngineState::Running {
        fire(&mut m);
        seen.push(m.remaining());
    }

    assert_eq!(seen, vec![2, 1, 0]);
    assert_eq!(m.state(), EngineState::Finished);
    assert!(m.engine().outstanding_tick().is_none());
    assert_eq!(
        m.buttons(),
        ButtonStates {
            set_duration: true,
            start: false,
            pause: false,
            reset: true,
        }
    );
    assert!(plain(&m.view()).contains("00:00"));
}

#[test]
fn reset_restores_duration_from_any_state() {
    let mut m = committed("4");
    m.update(key(KeyCode::Char('s')));
    fire(&mut m);
    m.update(key(KeyCode::Char('r')));
    assert_eq!(m.state(), EngineState::Idle);
    assert_eq!(m.remaining(), 4);
    assert!(m.engine().outstanding_tick().is_none());

    m.update(key(KeyCode::Char('s')));
    for _ in 0..4 {
        fire(&mut m);
    }
    assert_eq!(m.state(), EngineState::Finished);
    m.update(key(KeyCode::Char('r')));
    assert_eq!(m.state(), EngineState::Idle);
    assert_eq!(m.remaining(), 4);
}

#[test]
fn stale_tick_after_reset_is_ignored() {
    let mut m = committed("5");
    m.update(key(KeyCode::Char('s')));
    let stale = m.engine().outstanding_tick().unwrap();

    m.update(key(KeyCode::Char('r')));
    m.update(key(KeyCode::Char('s')));

    assert!(m.update(Box::new(TickMsg::from(stale))).is_none());
    assert_eq!(m.remaining(), 5);
    assert_eq!(m.state(), EngineState::Running);
}

#[test]
fn recommit_while_running_returns_to_idle() {
    let mut m = committed("30");
    m.update(key(KeyCode::Char('s')));
    fire(&mut m);

    m.input.reset();
    type_text(&mut m, "12");
    m.update(key(KeyCode::Enter));

    assert_eq!(m.state(), EngineState::Idle);
    assert_eq!(m.remaining(), 12);
    assert!(m.engine().outstanding_tick().is_none());
}

#[test]
fn action_keys_are_not_typed_into_the_input() {
    let mut m = Countdown::new();
    type_text(&mut m, "1s2p3r");
    assert_eq!(m.input.value(), "123");
    assert_eq!(m.pending_duration(), Some(123));
}

#[test]
fn help_bar_follows_enabled_actions() {
    let mut m = committed("5");
    let idle = plain(&m.view());
    assert!(idle.contains("start"));
    assert!(!idle.contains("p pause"));

    m.update(key(KeyCode::Char('s')));
    let running = plain(&m.view());
    assert!(running.contains("p pause"));
    assert!(!running.contains("s/space start"));
}

#[test]
fn status_line_shows_state() {
    let mut m = committed("5");
    assert!(plain(&m.view()).contains("idle"));
    m.update(key(KeyCode::Char('s')));
    assert!(plain(&m.view()).contains("running"));
    m.update(key(KeyCode::Char('p')));
    assert!(plain(&m.view()).contains("paused"));
}

#[tokio::test]
async fn commit_emits_committed_msg() {
    let mut m = Countdown::new();
    type_text(&mut m, "45");
    let cmd = m.update(key(KeyCode::Enter)).expect("commit returns a command");

    let msgs = messages(cmd).await;
    let committed = msgs
        .iter()
        .find_map(|msg| msg.downcast_ref::<CommittedMsg>())
        .expect("a CommittedMsg");
    assert_eq!(committed.id, m.id());
    assert_eq!(committed.duration, 45);
}

#[tokio::test]
async fn final_tick_emits_finished_msg() {
    let mut m = committed("1");
    m.update(key(KeyCode::Char('s')));

    let cmd = fire(&mut m).expect("the final tick returns a command");
    let msgs = messages(cmd).await;
    let finished = msgs
        .iter()
        .find_map(|msg| msg.downcast_ref::<FinishedMsg>())
        .expect("a FinishedMsg");
    assert_eq!(finished.id, m.id());
}

#[test]
fn esc_quits_and_releases_tick() {
    let mut m = committed("5");
    m.update(key(KeyCode::Char('s')));

    assert!(m.update(key(KeyCode::Esc)).is_some());
    assert!(m.engine().outstanding_tick().is_none());
    assert_eq!(m.state(), EngineState::Running);
}
