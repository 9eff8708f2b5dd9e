//! Wall-clock driver for the workout timer

use std::sync::Arc;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{
    state::AppState,
    timer::{TickOutcome, TickSource},
};

/// Background task that ticks `source` once per second until the engine
/// retires it. Between exercises it waits out the settle delay before the
/// cadence resumes.
pub async fn ticker_task(state: Arc<AppState>, source: TickSource) {
    info!("Starting ticker #{}", source.id());

    let settle_delay = state.settings.settle_delay;
    let mut ticks = interval(state.settings.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick of an interval completes immediately
    ticks.tick().await;

    loop {
        ticks.tick().await;

        match state.tick(source) {
            Ok(TickOutcome::Continue) => {}
            Ok(TickOutcome::Settle) => {
                debug!("Settling for {}ms", settle_delay.as_millis());
                sleep(settle_delay).await;

                match state.resume_after_settle(source) {
                    Ok(true) => ticks.reset(),
                    Ok(false) => break,
                    Err(e) => {
                        error!("Failed to resume after settle: {}", e);
                        break;
                    }
                }
            }
            Ok(TickOutcome::Stopped) => break,
            Err(e) => {
                error!("Failed to tick timer: {}", e);
                break;
            }
        }
    }

    debug!("Ticker #{} stopped", source.id());
}
