//! Timer phase and the observable countdown snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown while the timer is idle
pub const READY_LABEL: &str = "Ready?";
/// Label shown during the lead-in countdown
pub const GET_READY_LABEL: &str = "Get ready";
/// Label shown once the last exercise has ended
pub const FINISHED_LABEL: &str = "Finished!";

/// Phase a paused timer returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "index", rename_all = "snake_case")]
pub enum ResumePhase {
    PreStart,
    Running(usize),
}

/// Where the timer is in the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    PreStart,
    Running { index: usize },
    /// Exercise `index` is loaded; ticking resumes after the settle delay
    Transitioning { index: usize },
    Paused { resume: ResumePhase },
    Finished,
}

impl Phase {
    /// True while a tick source should be driving the countdown
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Phase::PreStart | Phase::Running { .. } | Phase::Transitioning { .. }
        )
    }
}

/// Snapshot of the live countdown, as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub exercise_index: usize,
    pub remaining_seconds: u32,
    pub ticking: bool,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            exercise_index: 0,
            remaining_seconds: 0,
            ticking: false,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// One refresh of the countdown display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub minutes: u32,
    pub seconds: u32,
    pub label: String,
}

impl DisplayUpdate {
    pub fn new(remaining_seconds: u32, label: impl Into<String>) -> Self {
        Self {
            minutes: remaining_seconds / 60,
            seconds: remaining_seconds % 60,
            label: label.into(),
        }
    }

    /// The idle display: `00:00` and the ready label
    pub fn ready() -> Self {
        Self::new(0, READY_LABEL)
    }

    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl Default for DisplayUpdate {
    fn default() -> Self {
        Self::ready()
    }
}

impl fmt::Display for DisplayUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.clock(), self.label)
    }
}
