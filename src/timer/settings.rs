//! Fixed timing rules for the countdown

use std::time::Duration;

/// Lead-in countdown before the first exercise, in seconds
pub const DEFAULT_LEAD_IN_SECONDS: u32 = 15;
/// Trailing seconds that get a countdown beep
pub const COUNTDOWN_WINDOW_SECONDS: u32 = 3;
/// Remaining seconds at which the next exercise is announced
pub const LOOKAHEAD_SECONDS: u32 = 10;
/// Pause between exercises so the announcement can start
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);
/// Nominal length of one tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct TimerSettings {
    pub lead_in_seconds: u32,
    pub countdown_window: u32,
    pub lookahead_seconds: u32,
    pub settle_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            lead_in_seconds: DEFAULT_LEAD_IN_SECONDS,
            countdown_window: COUNTDOWN_WINDOW_SECONDS,
            lookahead_seconds: LOOKAHEAD_SECONDS,
            settle_delay: DEFAULT_SETTLE_DELAY,
            tick_interval: TICK_INTERVAL,
        }
    }
}
