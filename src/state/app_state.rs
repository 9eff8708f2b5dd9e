//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::{error::Result, DisplayUpdate, TimerState, WorkoutError, WorkoutPlan};
use crate::{
    services::{
        Announcement, CuePlayer, Presenter, PresenterFeed, WatchAnnouncer, WatchPresenter,
        WorkoutLibrary,
    },
    tasks::ticker_task,
    timer::{StartOutcome, TickOutcome, TickSource, TimerEngine, TimerSettings},
};

/// The active plan together with the engine counting through it. Kept under
/// one lock so plan edits and ticks never interleave.
pub struct Workout {
    pub plan: WorkoutPlan,
    pub engine: TimerEngine,
}

/// Main application state shared by the control surface and the ticker
pub struct AppState {
    /// Active plan and timer
    workout: Mutex<Workout>,
    /// Saved workout plans
    library: Mutex<WorkoutLibrary>,
    /// Timing rules the engine was built with
    pub settings: TimerSettings,
    presenter: Arc<dyn Presenter>,
    /// Display and plan updates as published to the presenter
    pub feed: PresenterFeed,
    /// Most recent announcement
    pub announcements: watch::Receiver<Option<Announcement>>,
    /// Handle of the task currently driving the timer
    ticker: Mutex<Option<JoinHandle<()>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an empty plan and an idle timer
    pub fn new(
        port: u16,
        host: String,
        settings: TimerSettings,
        library: WorkoutLibrary,
        cues: Arc<dyn CuePlayer>,
    ) -> Self {
        let (announcer, announcements) = WatchAnnouncer::new();
        let (presenter, feed) = WatchPresenter::new();
        let presenter: Arc<dyn Presenter> = Arc::new(presenter);
        let engine = TimerEngine::new(
            settings.clone(),
            cues,
            Arc::new(announcer),
            Arc::clone(&presenter),
        );

        Self {
            workout: Mutex::new(Workout {
                plan: WorkoutPlan::new(),
                engine,
            }),
            library: Mutex::new(library),
            settings,
            presenter,
            feed,
            announcements,
            ticker: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn lock_workout(&self) -> Result<MutexGuard<'_, Workout>> {
        self.workout
            .lock()
            .map_err(|e| WorkoutError::Unavailable(format!("Failed to lock workout: {}", e)))
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Option<JoinHandle<()>>>> {
        self.ticker
            .lock()
            .map_err(|e| WorkoutError::Unavailable(format!("Failed to lock ticker: {}", e)))
    }

    fn lock_library(&self) -> Result<MutexGuard<'_, WorkoutLibrary>> {
        self.library
            .lock()
            .map_err(|e| WorkoutError::Unavailable(format!("Failed to lock library: {}", e)))
    }

    /// Apply a change to the active plan and notify the presenter
    fn update_plan<T, F>(&self, action: &str, updater: F) -> Result<T>
    where
        F: FnOnce(&mut WorkoutPlan) -> Result<T>,
    {
        let mut workout = self.lock_workout()?;
        let result = updater(&mut workout.plan)?;
        self.presenter.exercises_changed(&workout.plan);
        drop(workout);

        self.record_action(action);
        Ok(result)
    }

    /// Get a copy of the active plan
    pub fn plan(&self) -> Result<WorkoutPlan> {
        Ok(self.lock_workout()?.plan.snapshot())
    }

    pub fn add_exercise(&self, name: &str, duration: u32) -> Result<usize> {
        self.update_plan("add-exercise", |plan| plan.add(name, duration))
    }

    pub fn remove_exercise(&self, index: usize) -> Result<()> {
        self.update_plan("remove-exercise", |plan| plan.remove_at(index).map(|_| ()))
    }

    pub fn move_exercise_up(&self, index: usize) -> Result<()> {
        self.update_plan("move-up", |plan| plan.move_up(index))
    }

    pub fn move_exercise_down(&self, index: usize) -> Result<()> {
        self.update_plan("move-down", |plan| plan.move_down(index))
    }

    pub fn edit_exercise(&self, index: usize, name: &str, duration: u32) -> Result<()> {
        self.update_plan("edit-exercise", |plan| plan.edit(index, name, duration))
    }

    pub fn clear_plan(&self) -> Result<()> {
        self.update_plan("clear-plan", |plan| {
            plan.clear();
            Ok(())
        })
    }

    /// Start or resume the timer, spawning a ticker only when the engine
    /// issued a new tick source
    pub fn start_timer(self: &Arc<Self>) -> Result<StartOutcome> {
        // Ticker handle is locked before the workout and held until the
        // handle matches the engine's tick source
        let mut ticker = self.lock_ticker()?;
        let mut workout = self.lock_workout()?;
        let Workout { plan, engine } = &mut *workout;
        let outcome = engine.start(plan);
        drop(workout);

        if let Some(source) = outcome.source() {
            let state = Arc::clone(self);
            swap_ticker(&mut ticker, Some(tokio::spawn(ticker_task(state, source))));
            drop(ticker);
            self.record_action("start");
        }
        Ok(outcome)
    }

    /// Pause the timer; returns whether anything was running
    pub fn pause_timer(&self) -> Result<bool> {
        let mut ticker = self.lock_ticker()?;
        let paused = self.lock_workout()?.engine.pause();
        swap_ticker(&mut ticker, None);
        drop(ticker);
        if paused {
            self.record_action("pause");
        }
        Ok(paused)
    }

    pub fn reset_timer(&self) -> Result<()> {
        let mut ticker = self.lock_ticker()?;
        self.lock_workout()?.engine.reset();
        swap_ticker(&mut ticker, None);
        drop(ticker);
        self.record_action("reset");
        Ok(())
    }

    /// True while a ticker task is alive to drive the engine
    pub fn ticker_running(&self) -> Result<bool> {
        Ok(self
            .lock_ticker()?
            .as_ref()
            .is_some_and(|handle| !handle.is_finished()))
    }

    /// Drive one tick for `source`
    pub fn tick(&self, source: TickSource) -> Result<TickOutcome> {
        let mut workout = self.lock_workout()?;
        let Workout { plan, engine } = &mut *workout;
        Ok(engine.tick(plan, source))
    }

    pub fn resume_after_settle(&self, source: TickSource) -> Result<bool> {
        let mut workout = self.lock_workout()?;
        let Workout { plan, engine } = &mut *workout;
        Ok(engine.resume_after_settle(plan, source))
    }

    /// Get current timer state
    pub fn timer_state(&self) -> Result<TimerState> {
        Ok(self.lock_workout()?.engine.state())
    }

    pub fn display(&self) -> DisplayUpdate {
        self.feed.display.borrow().clone()
    }

    pub fn current_announcement(&self) -> Option<Announcement> {
        self.announcements.borrow().clone()
    }

    /// Save a snapshot of the active plan under `title`
    pub fn save_workout(&self, title: &str) -> Result<()> {
        let plan = self.plan()?;
        self.lock_library()?.save_plan(title, &plan)?;
        self.record_action("save-workout");
        Ok(())
    }

    /// Replace the active plan with a saved one. The timer is reset first so
    /// it never points into the old plan.
    pub fn load_workout(&self, title: &str) -> Result<WorkoutPlan> {
        let loaded = self.lock_library()?.load_plan(title).ok_or_else(|| {
            WorkoutError::NotFound(format!("No saved workout named {:?}", title.trim()))
        })?;

        let mut ticker = self.lock_ticker()?;
        let mut workout = self.lock_workout()?;
        workout.engine.reset();
        workout.plan = loaded.snapshot();
        self.presenter.exercises_changed(&workout.plan);
        drop(workout);

        swap_ticker(&mut ticker, None);
        drop(ticker);
        self.record_action("load-workout");
        info!("Loaded workout {:?}", title.trim());
        Ok(loaded)
    }

    pub fn workout_titles(&self) -> Result<Vec<String>> {
        Ok(self.lock_library()?.titles())
    }

    pub fn delete_workout(&self, title: &str) -> Result<bool> {
        let deleted = self.lock_library()?.delete(title)?;
        if deleted {
            self.record_action("delete-workout");
        }
        Ok(deleted)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

/// Abort the current ticker task, if any, and install `next`
fn swap_ticker(ticker: &mut Option<JoinHandle<()>>, next: Option<JoinHandle<()>>) {
    if let Some(previous) = ticker.take() {
        debug!("Stopping previous ticker task");
        previous.abort();
    }
    *ticker = next;
}
