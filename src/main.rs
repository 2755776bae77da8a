//! Countdown - a terminal countdown timer
//!
//! Runs the countdown widget full-screen. Logs go to a file because the
//! terminal belongs to the UI.

use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg, Program};
use once_cell::sync::OnceCell;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use countdown_widgets::{
    config::Config,
    countdown::{FinishedMsg, Model as Countdown},
};

static CONFIG: OnceCell<Config> = OnceCell::new();

struct App {
    countdown: Countdown,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let mut countdown = Countdown::new();
        let initial = CONFIG
            .get()
            .and_then(|config| config.initial_duration().ok().flatten());

        let cmd = initial.and_then(|seconds| countdown.commit_seconds(seconds));
        (App { countdown }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
            if finished.id == self.countdown.id() {
                info!("time is up");
            }
            return None;
        }
        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        self.countdown.view()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.initial_duration()?;

    let log_file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("Starting countdown v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: duration={:?}, alt_screen={}",
        config.duration, !config.no_alt_screen
    );

    let alt_screen = !config.no_alt_screen;
    if CONFIG.set(config).is_err() {
        warn!("configuration already set");
    }

    let program = Program::<App>::builder()
        .alt_screen(alt_screen)
        .build()
        .context("building terminal program")?;
    let app = program.run().await.context("running terminal program")?;

    info!(
        state = app.countdown.state().label(),
        remaining = app.countdown.remaining(),
        "Countdown exited"
    );
    Ok(())
}
