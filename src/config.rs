//! Command-line configuration for the `countdown` binary.

use crate::configurator::parse_duration;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Errors in command-line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `--duration` was not a finite number greater than zero.
    #[error("invalid duration {0:?}: expected a number of seconds greater than zero")]
    InvalidDuration(String),
}

/// CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown")]
#[command(about = "A terminal countdown timer")]
#[command(version)]
pub struct Config {
    /// Duration in seconds to commit on startup
    #[arg(short, long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// File that receives log output
    #[arg(long, default_value = "countdown.log")]
    pub log_file: PathBuf,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Render inline instead of on the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration: None,
            log_file: PathBuf::from("countdown.log"),
            log_level: "info".to_string(),
            verbose: false,
            no_alt_screen: false,
        }
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The `--duration` value, parsed the same way the input field parses
    /// typed text.
    ///
    /// A bad value is an error here rather than a silent no-op, since it came
    /// from the command line.
    pub fn initial_duration(&self) -> Result<Option<u64>, ConfigError> {
        match &self.duration {
            None => Ok(None),
            Some(text) => parse_duration(text)
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidDuration(text.clone())),
        }
    }

    /// Filter directive for the log subscriber.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { self.log_level.as_str() };
        format!("countdown_widgets={level},countdown={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("countdown").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.duration, None);
        assert_eq!(config.log_file, PathBuf::from("countdown.log"));
        assert_eq!(config.log_level, "info");
        assert!(!config.no_alt_screen);
        assert_eq!(config.initial_duration(), Ok(None));
    }

    #[test]
    fn test_initial_duration() {
        assert_eq!(parse(&["--duration", "90"]).initial_duration(), Ok(Some(90)));
        assert_eq!(parse(&["-d", "1.5"]).initial_duration(), Ok(Some(2)));
    }

    #[test]
    fn test_invalid_duration_is_an_error() {
        for bad in ["0", "-3", "abc", "Infinity"] {
            let arg = format!("--duration={bad}");
            let config = parse(&[arg.as_str()]);
            assert_eq!(
                config.initial_duration(),
                Err(ConfigError::InvalidDuration(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(parse(&[]).log_filter(), "countdown_widgets=info,countdown=info");
        assert_eq!(
            parse(&["--verbose"]).log_filter(),
            "countdown_widgets=debug,countdown=debug"
        );
        assert_eq!(
            parse(&["--log-level", "trace"]).log_filter(),
            "countdown_widgets=trace,countdown=trace"
        );
    }

    #[test]
    fn test_flags() {
        let config = parse(&["--no-alt-screen", "--log-file", "/tmp/c.log"]);
        assert!(config.no_alt_screen);
        assert_eq!(config.log_file, PathBuf::from("/tmp/c.log"));
    }
}
