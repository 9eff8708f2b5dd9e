//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::timer::{settings::DEFAULT_LEAD_IN_SECONDS, TimerSettings};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-coach")]
#[command(about = "An interval-workout timer with spoken cues and saved workout plans")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File holding saved workouts
    #[arg(short, long, default_value = "workouts.json")]
    pub store: PathBuf,

    /// Lead-in countdown before the first exercise, in seconds (0 to skip)
    #[arg(long, default_value_t = DEFAULT_LEAD_IN_SECONDS)]
    pub lead_in: u32,

    /// Pause between exercises, in milliseconds
    #[arg(long, default_value = "1000")]
    pub settle_ms: u64,

    /// Ring the terminal bell on every cue
    #[arg(long)]
    pub bell: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timing rules for the engine
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            lead_in_seconds: self.lead_in,
            settle_delay: Duration::from_millis(self.settle_ms),
            ..TimerSettings::default()
        }
    }
}
