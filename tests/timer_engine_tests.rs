mod common;

use common::{engine_with, plan, Event, ManualClock, Recorder};
use interval_coach::services::Cue;
use interval_coach::state::{Phase, ResumePhase};
use interval_coach::timer::{StartOutcome, TimerSettings, WORKOUT_COMPLETE};

fn no_lead_in() -> TimerSettings {
    TimerSettings {
        lead_in_seconds: 0,
        ..TimerSettings::default()
    }
}

#[test]
fn test_full_workout_scenario() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    assert!(matches!(clock.start(&mut engine, &plan), StartOutcome::Started(_)));
    assert_eq!(engine.phase(), Phase::PreStart);
    assert_eq!(engine.remaining_seconds(), 15);
    assert_eq!(recorder.last_display().unwrap(), "00:15 Get ready");
    assert!(recorder.announcements().is_empty());

    // First exercise is announced one tick into the lead-in
    clock.advance(&mut engine, &plan, 1);
    assert_eq!(recorder.announcements(), vec!["Starting with Push-ups"]);

    clock.advance(&mut engine, &plan, 14);
    assert_eq!(engine.phase(), Phase::Running { index: 0 });
    assert_eq!(engine.remaining_seconds(), 10);
    assert_eq!(recorder.cue_count(Cue::Final), 1);
    assert_eq!(recorder.cue_count(Cue::Standard), 3);
    assert_eq!(recorder.last_display().unwrap(), "00:10 Push-ups");

    clock.advance(&mut engine, &plan, 10);
    assert_eq!(engine.phase(), Phase::Transitioning { index: 1 });
    assert_eq!(engine.remaining_seconds(), 10);
    assert_eq!(recorder.cue_count(Cue::Final), 2);
    assert_eq!(
        recorder
            .announcements()
            .iter()
            .filter(|a| *a == "Next exercise: Squats")
            .count(),
        1
    );
    assert_eq!(clock.pending_settles(), 1);

    clock.settle(&mut engine, &plan);
    assert_eq!(engine.phase(), Phase::Running { index: 1 });
    assert_eq!(engine.remaining_seconds(), 10);

    clock.advance(&mut engine, &plan, 10);
    assert_eq!(engine.phase(), Phase::Finished);
    assert!(!engine.is_ticking());
    assert_eq!(clock.ticking_sources(), 0);
    assert_eq!(recorder.cue_count(Cue::Final), 3);
    assert_eq!(
        recorder
            .announcements()
            .iter()
            .filter(|a| *a == WORKOUT_COMPLETE)
            .count(),
        1
    );
    assert_eq!(recorder.last_display().unwrap(), "00:00 Finished!");
}

#[test]
fn test_ten_second_exercises_skip_lookahead() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 10);
    assert!(!recorder
        .announcements()
        .iter()
        .any(|a| a.starts_with("Up next")));
}

#[test]
fn test_lookahead_announced_once_at_ten_seconds() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Row", 20), ("Bike", 15)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    assert_eq!(engine.phase(), Phase::Running { index: 0 });
    assert_eq!(recorder.announcements(), vec!["Starting with Row"]);

    clock.advance(&mut engine, &plan, 9);
    assert_eq!(recorder.announcements().len(), 1);

    clock.advance(&mut engine, &plan, 1);
    assert_eq!(engine.remaining_seconds(), 10);
    assert_eq!(recorder.announcements().last().unwrap(), "Up next: Bike");

    clock.advance(&mut engine, &plan, 9);
    let up_next = recorder
        .announcements()
        .iter()
        .filter(|a| a.starts_with("Up next"))
        .count();
    assert_eq!(up_next, 1);
}

#[test]
fn test_no_lookahead_for_last_exercise() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Plank", 30)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 25);
    assert_eq!(recorder.announcements(), vec!["Starting with Plank"]);
}

#[test]
fn test_display_precedes_countdown_cue() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 6);
    recorder.clear();

    clock.advance(&mut engine, &plan, 1);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Display("00:03 Push-ups".to_string()),
            Event::Cue(Cue::Standard),
        ]
    );
}

#[test]
fn test_exercise_change_orders_display_cue_announcement() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 12)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 9);
    recorder.clear();

    clock.advance(&mut engine, &plan, 1);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Display("00:12 Squats".to_string()),
            Event::Cue(Cue::Final),
            Event::Announce("Next exercise: Squats".to_string()),
        ]
    );
}

#[test]
fn test_pause_resumes_at_same_remaining_time() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 15 + 4);
    assert_eq!(engine.phase(), Phase::Running { index: 0 });
    assert_eq!(engine.remaining_seconds(), 6);

    assert!(engine.pause());
    assert_eq!(
        engine.phase(),
        Phase::Paused {
            resume: ResumePhase::Running(0)
        }
    );
    assert!(!engine.is_ticking());

    // The old source is retired, so the clock stops driving it
    clock.advance(&mut engine, &plan, 5);
    assert_eq!(engine.remaining_seconds(), 6);
    assert_eq!(clock.ticking_sources(), 0);

    let announced = recorder.announcements().len();
    assert!(matches!(clock.start(&mut engine, &plan), StartOutcome::Resumed(_)));
    assert_eq!(engine.phase(), Phase::Running { index: 0 });
    assert_eq!(engine.remaining_seconds(), 6);
    assert_eq!(recorder.announcements().len(), announced);

    clock.advance(&mut engine, &plan, 1);
    assert_eq!(engine.remaining_seconds(), 5);
}

#[test]
fn test_pause_during_lead_in_does_not_reannounce() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 3);
    engine.pause();
    clock.start(&mut engine, &plan);
    assert_eq!(engine.phase(), Phase::PreStart);
    assert_eq!(engine.remaining_seconds(), 12);

    clock.advance(&mut engine, &plan, 12);
    assert_eq!(engine.phase(), Phase::Running { index: 0 });
    assert_eq!(recorder.announcements(), vec!["Starting with Push-ups"]);
}

#[test]
fn test_double_start_keeps_single_tick_source() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);
    let mut clock = ManualClock::new();

    assert!(matches!(clock.start(&mut engine, &plan), StartOutcome::Started(_)));
    assert_eq!(clock.start(&mut engine, &plan), StartOutcome::AlreadyRunning);
    assert_eq!(clock.ticking_sources(), 1);

    clock.advance(&mut engine, &plan, 1);
    assert_eq!(engine.remaining_seconds(), 14);
    clock.advance(&mut engine, &plan, 1);
    assert_eq!(engine.remaining_seconds(), 13);
}

#[test]
fn test_stale_source_cannot_tick() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);
    let mut clock = ManualClock::new();

    let stale = clock.start(&mut engine, &plan).source().unwrap();
    engine.pause();
    let fresh = engine.start(&plan).source().unwrap();
    assert_ne!(stale, fresh);
    assert_eq!(engine.active_source(), Some(fresh));

    // Only the stale source is driven here
    clock.advance(&mut engine, &plan, 3);
    assert_eq!(engine.remaining_seconds(), 15);

    clock.adopt(fresh);
    clock.advance(&mut engine, &plan, 1);
    assert_eq!(engine.remaining_seconds(), 14);
}

#[test]
fn test_pause_only_applies_while_active() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);

    assert!(!engine.pause());
    assert_eq!(engine.phase(), Phase::Idle);

    engine.start(&plan);
    assert!(engine.pause());
    assert_eq!(engine.active_source(), None);
    assert!(!engine.pause());
    assert_eq!(
        engine.phase(),
        Phase::Paused { resume: ResumePhase::PreStart }
    );
}

#[test]
fn test_reset_during_settle_drops_continuation() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 10);
    assert_eq!(engine.phase(), Phase::Transitioning { index: 1 });

    engine.reset();
    recorder.clear();

    clock.settle(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 5);

    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.exercise_index(), 0);
    assert_eq!(engine.remaining_seconds(), 0);
    assert!(!engine.is_ticking());
    assert_eq!(clock.ticking_sources(), 0);
    assert!(recorder.events().is_empty());
}

#[test]
fn test_pause_during_settle_resumes_next_exercise() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 10);
    engine.pause();

    clock.settle(&mut engine, &plan);
    assert_eq!(clock.ticking_sources(), 0);
    assert_eq!(
        engine.phase(),
        Phase::Paused {
            resume: ResumePhase::Running(1)
        }
    );

    clock.start(&mut engine, &plan);
    assert_eq!(engine.phase(), Phase::Running { index: 1 });
    assert_eq!(engine.remaining_seconds(), 10);
    clock.advance(&mut engine, &plan, 10);
    assert_eq!(engine.phase(), Phase::Finished);
}

#[test]
fn test_reset_restores_ready_display() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 20);
    engine.reset();

    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(recorder.last_display().unwrap(), "00:00 Ready?");
    clock.advance(&mut engine, &plan, 3);
    assert_eq!(engine.remaining_seconds(), 0);
}

#[test]
fn test_empty_plan_does_not_start() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[]);
    let mut clock = ManualClock::new();

    assert_eq!(clock.start(&mut engine, &plan), StartOutcome::EmptyPlan);
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(!engine.is_ticking());
    assert_eq!(clock.ticking_sources(), 0);
    assert!(recorder.events().is_empty());
}

#[test]
fn test_finished_requires_reset() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let plan = plan(&[("Plank", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 10);
    assert_eq!(engine.phase(), Phase::Finished);
    assert!(!engine.pause());

    assert_eq!(clock.start(&mut engine, &plan), StartOutcome::AwaitingReset);
    engine.reset();
    assert!(matches!(clock.start(&mut engine, &plan), StartOutcome::Started(_)));
}

#[test]
fn test_removed_exercise_routes_to_finished() {
    let recorder = Recorder::new();
    let mut engine = engine_with(no_lead_in(), &recorder);
    let mut plan = plan(&[("Push-ups", 10), ("Squats", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 10);
    plan.remove_at(1).unwrap();

    clock.settle(&mut engine, &plan);
    assert_eq!(engine.phase(), Phase::Finished);
    assert!(!engine.is_ticking());
    assert_eq!(recorder.announcements().last().unwrap(), WORKOUT_COMPLETE);
}

#[test]
fn test_state_snapshot_tracks_engine() {
    let recorder = Recorder::new();
    let mut engine = engine_with(TimerSettings::default(), &recorder);
    let plan = plan(&[("Push-ups", 10)]);
    let mut clock = ManualClock::new();

    clock.start(&mut engine, &plan);
    clock.advance(&mut engine, &plan, 2);
    let state = engine.state();
    assert_eq!(state.phase, Phase::PreStart);
    assert_eq!(state.remaining_seconds, 13);
    assert!(state.ticking);
}
