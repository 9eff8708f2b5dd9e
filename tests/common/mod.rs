//! Shared harness: a recording collaborator and a manual clock

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use interval_coach::services::{Announcer, Cue, CuePlayer, Presenter};
use interval_coach::state::{DisplayUpdate, WorkoutPlan};
use interval_coach::timer::{StartOutcome, TickOutcome, TickSource, TimerEngine, TimerSettings};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Display(String),
    Cue(Cue),
    Announce(String),
    PlanChanged(usize),
}

/// Records every collaborator call in order
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn cue_count(&self, cue: Cue) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::Cue(cue))
            .count()
    }

    pub fn announcements(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Announce(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_display(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Display(text) => Some(text),
            _ => None,
        })
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl CuePlayer for Recorder {
    fn play(&self, cue: Cue) {
        self.push(Event::Cue(cue));
    }
}

impl Announcer for Recorder {
    fn announce(&self, text: &str) {
        self.push(Event::Announce(text.to_string()));
    }
}

impl Presenter for Recorder {
    fn display_updated(&self, update: &DisplayUpdate) {
        self.push(Event::Display(update.to_string()));
    }

    fn exercises_changed(&self, plan: &WorkoutPlan) {
        self.push(Event::PlanChanged(plan.len()));
    }
}

pub fn engine_with(settings: TimerSettings, recorder: &Arc<Recorder>) -> TimerEngine {
    TimerEngine::new(
        settings,
        recorder.clone(),
        recorder.clone(),
        recorder.clone(),
    )
}

pub fn plan(entries: &[(&str, u32)]) -> WorkoutPlan {
    let mut plan = WorkoutPlan::new();
    for (name, duration) in entries {
        plan.add(name, *duration).unwrap();
    }
    plan
}

/// Drives tick sources by hand, one simulated second per step
#[derive(Debug, Default)]
pub struct ManualClock {
    sources: Vec<TickSource>,
    settling: Vec<TickSource>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the engine and keep whatever source it hands out
    pub fn start(&mut self, engine: &mut TimerEngine, plan: &WorkoutPlan) -> StartOutcome {
        let outcome = engine.start(plan);
        if let Some(source) = outcome.source() {
            self.sources.push(source);
        }
        outcome
    }

    /// Drive a source the engine may or may not still honour
    pub fn adopt(&mut self, source: TickSource) {
        self.sources.push(source);
    }

    pub fn advance(&mut self, engine: &mut TimerEngine, plan: &WorkoutPlan, seconds: u32) {
        for _ in 0..seconds {
            let mut still_ticking = Vec::new();
            for source in self.sources.drain(..) {
                match engine.tick(plan, source) {
                    TickOutcome::Continue => still_ticking.push(source),
                    TickOutcome::Settle => self.settling.push(source),
                    TickOutcome::Stopped => {}
                }
            }
            self.sources = still_ticking;
        }
    }

    /// Fire every pending settle continuation
    pub fn settle(&mut self, engine: &mut TimerEngine, plan: &WorkoutPlan) {
        for source in std::mem::take(&mut self.settling) {
            if engine.resume_after_settle(plan, source) {
                self.sources.push(source);
            }
        }
    }

    pub fn ticking_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn pending_settles(&self) -> usize {
        self.settling.len()
    }
}
