//! Presentation callbacks

use tokio::sync::watch;
use tracing::trace;

use crate::state::{DisplayUpdate, WorkoutPlan};

/// Purely observational view of the timer and the plan
pub trait Presenter: Send + Sync {
    fn display_updated(&self, update: &DisplayUpdate);
    fn exercises_changed(&self, plan: &WorkoutPlan);
}

/// Receivers for everything a [`WatchPresenter`] publishes
#[derive(Debug, Clone)]
pub struct PresenterFeed {
    pub display: watch::Receiver<DisplayUpdate>,
    pub plan: watch::Receiver<WorkoutPlan>,
}

/// Publishes display refreshes and plan changes on watch channels
#[derive(Debug)]
pub struct WatchPresenter {
    display_tx: watch::Sender<DisplayUpdate>,
    plan_tx: watch::Sender<WorkoutPlan>,
}

impl WatchPresenter {
    pub fn new() -> (Self, PresenterFeed) {
        let (display_tx, display) = watch::channel(DisplayUpdate::ready());
        let (plan_tx, plan) = watch::channel(WorkoutPlan::new());
        (Self { display_tx, plan_tx }, PresenterFeed { display, plan })
    }
}

impl Presenter for WatchPresenter {
    fn display_updated(&self, update: &DisplayUpdate) {
        trace!("Display: {}", update);
        self.display_tx.send_replace(update.clone());
    }

    fn exercises_changed(&self, plan: &WorkoutPlan) {
        trace!("Exercise list changed ({} entries)", plan.len());
        self.plan_tx.send_replace(plan.snapshot());
    }
}
