//! Countdown state machine driving a workout plan

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use super::settings::TimerSettings;
use crate::services::{Announcer, Cue, CuePlayer, Presenter};
use crate::state::{
    DisplayUpdate, Phase, ResumePhase, TimerState, WorkoutPlan, FINISHED_LABEL, GET_READY_LABEL,
};

/// Announced when the last exercise ends
pub const WORKOUT_COMPLETE: &str = "Workout complete!";

/// Handle identifying one ticking source. Only the most recently issued
/// handle is honoured; pause and reset retire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickSource(u64);

impl TickSource {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of [`TimerEngine::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Fresh workout; drive `tick` with this source
    Started(TickSource),
    /// Continuing after a pause
    Resumed(TickSource),
    /// A source is already active, nothing was created
    AlreadyRunning,
    EmptyPlan,
    /// The workout is finished and must be reset first
    AwaitingReset,
}

impl StartOutcome {
    /// The new tick source, if one was issued
    pub fn source(&self) -> Option<TickSource> {
        match self {
            StartOutcome::Started(source) | StartOutcome::Resumed(source) => Some(*source),
            _ => None,
        }
    }
}

/// Result of [`TimerEngine::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// An exercise ended; wait the settle delay, then call
    /// [`TimerEngine::resume_after_settle`]
    Settle,
    /// The source is no longer active; stop driving it
    Stopped,
}

/// Owns the countdown. The plan is only ever read.
pub struct TimerEngine {
    settings: TimerSettings,
    phase: Phase,
    exercise_index: usize,
    remaining: u32,
    first_announced: bool,
    active_source: Option<TickSource>,
    issued_sources: u64,
    cues: Arc<dyn CuePlayer>,
    announcer: Arc<dyn Announcer>,
    presenter: Arc<dyn Presenter>,
}

impl TimerEngine {
    pub fn new(
        settings: TimerSettings,
        cues: Arc<dyn CuePlayer>,
        announcer: Arc<dyn Announcer>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            exercise_index: 0,
            remaining: 0,
            first_announced: false,
            active_source: None,
            issued_sources: 0,
            cues,
            announcer,
            presenter,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_ticking(&self) -> bool {
        self.active_source.is_some()
    }

    pub fn active_source(&self) -> Option<TickSource> {
        self.active_source
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            exercise_index: self.exercise_index,
            remaining_seconds: self.remaining,
            ticking: self.is_ticking(),
        }
    }

    /// Begin the workout, or continue it after a pause
    pub fn start(&mut self, plan: &WorkoutPlan) -> StartOutcome {
        match self.phase {
            Phase::Idle => {
                let Some(first) = plan.get(0) else {
                    warn!("Refusing to start an empty workout");
                    return StartOutcome::EmptyPlan;
                };

                self.exercise_index = 0;
                self.first_announced = false;
                if self.settings.lead_in_seconds > 0 {
                    info!(
                        "Starting workout with {}s lead-in ({} exercises)",
                        self.settings.lead_in_seconds,
                        plan.len()
                    );
                    self.phase = Phase::PreStart;
                    self.remaining = self.settings.lead_in_seconds;
                    self.show(GET_READY_LABEL);
                } else {
                    info!("Starting workout ({} exercises)", plan.len());
                    self.phase = Phase::Running { index: 0 };
                    self.remaining = first.duration;
                    self.show(&first.name);
                    self.announce_first(plan);
                }
                StartOutcome::Started(self.issue_source())
            }
            Phase::Paused { resume } => {
                self.phase = match resume {
                    ResumePhase::PreStart => Phase::PreStart,
                    ResumePhase::Running(index) => Phase::Running { index },
                };
                info!("Resuming {:?} at {}s", self.phase, self.remaining);
                let label = self.label(plan);
                self.show(&label);
                StartOutcome::Resumed(self.issue_source())
            }
            Phase::PreStart | Phase::Running { .. } | Phase::Transitioning { .. } => {
                debug!("Start ignored, timer already running");
                StartOutcome::AlreadyRunning
            }
            Phase::Finished => {
                debug!("Start ignored, workout finished");
                StartOutcome::AwaitingReset
            }
        }
    }

    /// Stop ticking but keep position and remaining time. Returns whether
    /// anything was paused.
    pub fn pause(&mut self) -> bool {
        if !self.phase.is_active() {
            debug!("Pause ignored in {:?}", self.phase);
            return false;
        }
        let resume = match self.phase {
            Phase::Running { index } | Phase::Transitioning { index } => {
                ResumePhase::Running(index)
            }
            _ => ResumePhase::PreStart,
        };

        self.active_source = None;
        self.phase = Phase::Paused { resume };
        info!("Paused at {}s ({:?})", self.remaining, resume);
        true
    }

    /// Return to idle from any phase. Any outstanding tick source or settle
    /// continuation becomes inert.
    pub fn reset(&mut self) {
        self.active_source = None;
        self.phase = Phase::Idle;
        self.exercise_index = 0;
        self.remaining = 0;
        self.first_announced = false;
        self.presenter.display_updated(&DisplayUpdate::ready());
        info!("Timer reset");
    }

    /// One decrement-and-check cycle for `source`
    pub fn tick(&mut self, plan: &WorkoutPlan, source: TickSource) -> TickOutcome {
        if self.active_source != Some(source) {
            trace!("Ignoring tick from retired source #{}", source.id());
            return TickOutcome::Stopped;
        }

        match self.phase {
            Phase::PreStart => self.tick_lead_in(plan),
            Phase::Running { index } => self.tick_exercise(plan, index),
            Phase::Transitioning { .. } => TickOutcome::Continue,
            Phase::Idle | Phase::Paused { .. } | Phase::Finished => {
                self.active_source = None;
                TickOutcome::Stopped
            }
        }
    }

    /// Continue counting after the settle delay. Returns false when the
    /// continuation is stale and the caller should stop.
    pub fn resume_after_settle(&mut self, plan: &WorkoutPlan, source: TickSource) -> bool {
        if self.active_source != Some(source) {
            debug!("Dropping stale settle continuation #{}", source.id());
            return false;
        }
        let Phase::Transitioning { index } = self.phase else {
            return false;
        };
        if plan.get(index).is_none() {
            self.finish();
            return false;
        }

        self.phase = Phase::Running { index };
        debug!("Settled into exercise {}", index);
        true
    }

    fn tick_lead_in(&mut self, plan: &WorkoutPlan) -> TickOutcome {
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            let Some(first) = plan.get(0) else {
                return self.finish();
            };
            self.phase = Phase::Running { index: 0 };
            self.exercise_index = 0;
            self.remaining = first.duration;
            self.show(&first.name);
            self.cues.play(Cue::Final);
            self.announce_first(plan);
            info!("Lead-in complete, starting {:?}", first.name);
            return TickOutcome::Continue;
        }

        self.show(GET_READY_LABEL);
        self.countdown_cue();
        self.announce_first(plan);
        TickOutcome::Continue
    }

    fn tick_exercise(&mut self, plan: &WorkoutPlan, index: usize) -> TickOutcome {
        let Some(current) = plan.get(index) else {
            warn!("Exercise {} no longer in plan, finishing", index);
            return self.finish();
        };

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return self.complete_exercise(plan, index);
        }

        self.show(&current.name);
        self.countdown_cue();

        let lookahead = self.settings.lookahead_seconds;
        if self.remaining == lookahead && current.duration > lookahead {
            if let Some(next) = plan.get(index + 1) {
                self.announcer.announce(&format!("Up next: {}", next.name));
            }
        }
        TickOutcome::Continue
    }

    fn complete_exercise(&mut self, plan: &WorkoutPlan, index: usize) -> TickOutcome {
        let next_index = index + 1;
        let Some(next) = plan.get(next_index) else {
            return self.finish();
        };

        self.exercise_index = next_index;
        self.remaining = next.duration;
        self.phase = Phase::Transitioning { index: next_index };
        self.show(&next.name);
        self.cues.play(Cue::Final);
        self.announcer.announce(&format!("Next exercise: {}", next.name));
        info!("Exercise {} complete, next {:?}", index, next.name);
        TickOutcome::Settle
    }

    fn finish(&mut self) -> TickOutcome {
        self.active_source = None;
        self.phase = Phase::Finished;
        self.remaining = 0;
        self.show(FINISHED_LABEL);
        self.cues.play(Cue::Final);
        self.announcer.announce(WORKOUT_COMPLETE);
        info!("Workout finished");
        TickOutcome::Stopped
    }

    fn countdown_cue(&self) {
        if self.remaining > 0 && self.remaining <= self.settings.countdown_window {
            self.cues.play(Cue::Standard);
        }
    }

    fn announce_first(&mut self, plan: &WorkoutPlan) {
        if self.first_announced {
            return;
        }
        if let Some(first) = plan.get(0) {
            self.announcer.announce(&format!("Starting with {}", first.name));
            self.first_announced = true;
        }
    }

    fn issue_source(&mut self) -> TickSource {
        self.issued_sources += 1;
        let source = TickSource(self.issued_sources);
        self.active_source = Some(source);
        debug!("Issued tick source #{}", source.id());
        source
    }

    fn label(&self, plan: &WorkoutPlan) -> String {
        match self.phase {
            Phase::PreStart => GET_READY_LABEL.to_string(),
            Phase::Running { index } | Phase::Transitioning { index } => plan
                .get(index)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            Phase::Finished => FINISHED_LABEL.to_string(),
            Phase::Idle | Phase::Paused { .. } => crate::state::READY_LABEL.to_string(),
        }
    }

    fn show(&self, label: &str) {
        self.presenter
            .display_updated(&DisplayUpdate::new(self.remaining, label));
    }
}
