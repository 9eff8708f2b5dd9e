//! Audio cues played around exercise boundaries

use std::io::Write;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Length of every cue tone
pub const CUE_DURATION: Duration = Duration::from_millis(150);

/// Pitch class of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Low countdown beep in the trailing seconds of a phase
    Standard,
    /// High completion tone at the end of a phase
    Final,
}

impl Cue {
    pub fn frequency_hz(&self) -> u32 {
        match self {
            Cue::Standard => 880,
            Cue::Final => 1200,
        }
    }
}

/// Fire-and-forget tone output
pub trait CuePlayer: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Logs each cue and optionally rings the terminal bell
#[derive(Debug, Clone, Default)]
pub struct TerminalCuePlayer {
    bell: bool,
}

impl TerminalCuePlayer {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl CuePlayer for TerminalCuePlayer {
    fn play(&self, cue: Cue) {
        info!(
            "Cue {:?}: {}Hz for {}ms",
            cue,
            cue.frequency_hz(),
            CUE_DURATION.as_millis()
        );

        if self.bell {
            // Final cues ring twice so they are distinguishable by ear
            let bells: &[u8] = match cue {
                Cue::Standard => b"\x07",
                Cue::Final => b"\x07\x07",
            };
            let mut stderr = std::io::stderr();
            if let Err(e) = stderr.write_all(bells).and_then(|_| stderr.flush()) {
                debug!("Terminal bell failed: {}", e);
            }
        }
    }
}
