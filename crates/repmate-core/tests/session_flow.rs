//! End-to-end session progression tests driving the engine tick by tick.

use repmate_core::{
    Activation, Event, ExerciseDefinition, Phase, RestKind, SessionDefaults, SessionEngine,
    SessionState, WorkoutPlan,
};

fn exercise(id: u32, name: &str, reps: Option<u32>, sets: Option<u32>) -> ExerciseDefinition {
    ExerciseDefinition {
        id,
        name: name.into(),
        instructions: String::new(),
        repetitions: reps,
        sets,
        rep_duration: None,
        rest_between_reps: None,
        rest_between_exercises: None,
    }
}

fn plan_with(
    defaults: SessionDefaults,
    exercises: Vec<ExerciseDefinition>,
) -> WorkoutPlan {
    WorkoutPlan::new("test plan", defaults, exercises).unwrap()
}

fn announced(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Announcement { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Run the start cue sequence: after this the rep timer is armed.
fn enter_and_activate(engine: &mut SessionEngine) {
    engine.enter_session();
    engine.start();
    engine.tick();
    engine.tick();
    assert_eq!(engine.state().phase, Phase::Exercising(Activation::Active));
}

/// Flip `state.paused` through the serde surface; pausing outside the
/// exercising phase is not reachable through commands.
fn with_forced_pause(engine: &SessionEngine, paused: bool) -> SessionEngine {
    let mut value = serde_json::to_value(engine).unwrap();
    value["state"]["paused"] = serde_json::Value::Bool(paused);
    serde_json::from_value(value).unwrap()
}

#[test]
fn three_reps_one_set_completes_with_ordered_announcements() {
    let defaults = SessionDefaults {
        rest_between_exercises: 30,
        rest_between_reps: 15,
        rep_duration: 2,
    };
    let plan = plan_with(defaults, vec![exercise(1, "Plank", Some(3), Some(1))]);
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);

    let mut reps_seen = Vec::new();
    let mut cues = Vec::new();
    for _ in 0..6 {
        let events = engine.tick();
        cues.extend(announced(&events));
        for e in &events {
            if let Event::RepCompleted { rep, .. } = e {
                reps_seen.push(*rep);
            }
        }
    }

    assert_eq!(reps_seen, vec![1, 2, 3]);
    assert_eq!(engine.state().phase, Phase::Complete);
    assert!(!engine.state().running);
    assert_eq!(
        cues,
        vec![
            "1".to_string(),
            "2".to_string(),
            "3".to_string(),
            "Set 1 complete".to_string(),
            "Well done, workout complete".to_string(),
        ]
    );
}

#[test]
fn set_boundary_rest_uses_rest_between_reps() {
    let defaults = SessionDefaults {
        rest_between_exercises: 30,
        rest_between_reps: 15,
        rep_duration: 2,
    };
    let plan = plan_with(defaults, vec![exercise(1, "Squat", Some(1), Some(2))]);
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);

    engine.tick();
    let events = engine.tick(); // rep 1 of 1 completes -> set boundary
    assert!(events.iter().any(|e| matches!(
        e,
        Event::RestStarted {
            kind: RestKind::BetweenSets,
            seconds: 15,
            ..
        }
    )));
    assert_eq!(engine.state().phase, Phase::Resting);
    assert_eq!(engine.state().rest_remaining, 15);
    assert_eq!(engine.state().current_set, 2);
    assert_eq!(engine.state().current_rep, 1);
}

#[test]
fn exercise_boundary_rest_uses_rest_between_exercises() {
    let defaults = SessionDefaults {
        rest_between_exercises: 4,
        rest_between_reps: 15,
        rep_duration: 1,
    };
    let plan = plan_with(
        defaults,
        vec![
            exercise(1, "Push-up", Some(1), Some(1)),
            exercise(2, "Sit-up", Some(1), Some(1)),
        ],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);

    let events = engine.tick(); // only rep of only set completes
    assert!(events.iter().any(|e| matches!(
        e,
        Event::RestStarted {
            kind: RestKind::BetweenExercises,
            seconds: 4,
            ..
        }
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::ExerciseAdvanced { from: 0, to: 1, .. })));
    assert_eq!(engine.state().exercise_index, 1);
    assert_eq!(engine.state().phase, Phase::Resting);
    assert_eq!(engine.state().rest_remaining, 4);
}

#[test]
fn next_exercise_announced_exactly_when_rest_ends() {
    let defaults = SessionDefaults {
        rest_between_exercises: 4,
        rest_between_reps: 15,
        rep_duration: 1,
    };
    let plan = plan_with(
        defaults,
        vec![
            exercise(1, "Push-up", Some(1), Some(1)),
            exercise(2, "Sit-up", Some(1), Some(1)),
        ],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick(); // into the 4s boundary rest

    // Three silent countdown seconds.
    for expected in [3, 2, 1] {
        let events = engine.tick();
        assert!(announced(&events).is_empty());
        assert_eq!(engine.state().rest_remaining, expected);
    }
    // Fourth second: countdown hits zero and the name cue fires together.
    let events = engine.tick();
    assert_eq!(announced(&events), vec!["Sit-up".to_string()]);
    assert!(events.iter().any(|e| matches!(e, Event::RestEnded { .. })));
    assert_eq!(engine.state().phase, Phase::Exercising(Activation::Active));
    // Go cue one settle second later.
    let events = engine.tick();
    assert!(announced(&events).contains(&"Go".to_string()));
}

#[test]
fn paused_rest_freezes_countdown_and_scheduled_cue() {
    let defaults = SessionDefaults {
        rest_between_exercises: 4,
        rest_between_reps: 15,
        rep_duration: 1,
    };
    let plan = plan_with(
        defaults,
        vec![
            exercise(1, "Push-up", Some(1), Some(1)),
            exercise(2, "Sit-up", Some(1), Some(1)),
        ],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick();
    engine.tick();
    engine.tick();
    assert_eq!(engine.state().rest_remaining, 2);

    let mut paused = with_forced_pause(&engine, true);
    for _ in 0..25 {
        let events = paused.tick();
        assert!(events.is_empty());
    }
    assert_eq!(paused.state().rest_remaining, 2);

    // Resuming continues from the preserved value, and the next-exercise
    // announcement is still aligned with the countdown's end.
    let mut resumed = with_forced_pause(&paused, false);
    resumed.tick();
    assert_eq!(resumed.state().rest_remaining, 1);
    let events = resumed.tick();
    assert_eq!(resumed.state().rest_remaining, 0);
    assert_eq!(announced(&events), vec!["Sit-up".to_string()]);
}

#[test]
fn toggle_pause_resume_is_rejected_while_resting() {
    let defaults = SessionDefaults {
        rest_between_exercises: 30,
        rest_between_reps: 10,
        rep_duration: 1,
    };
    let plan = plan_with(defaults, vec![exercise(1, "Squat", Some(1), Some(2))]);
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick();
    assert_eq!(engine.state().phase, Phase::Resting);

    assert!(engine.toggle_pause_resume().is_empty());
    assert!(!engine.state().paused);
    engine.tick();
    assert_eq!(engine.state().rest_remaining, 9);
}

#[test]
fn skip_on_last_exercise_changes_nothing() {
    let plan = plan_with(
        SessionDefaults::default(),
        vec![exercise(1, "Only", Some(3), Some(1))],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick();
    let before = engine.state().clone();

    assert!(engine.skip_to_next().is_empty());
    assert_eq!(*engine.state(), before);
}

#[test]
fn stop_resets_to_exact_idle_defaults_and_cancels_cues() {
    let defaults = SessionDefaults {
        rest_between_exercises: 5,
        rest_between_reps: 15,
        rep_duration: 1,
    };
    let plan = plan_with(
        defaults,
        vec![
            exercise(1, "Push-up", Some(1), Some(1)),
            exercise(2, "Sit-up", Some(1), Some(1)),
        ],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick(); // boundary rest begins; next-exercise cues now scheduled

    engine.stop();
    assert_eq!(*engine.state(), SessionState::default());

    // The scheduled announcement must never fire after stop.
    for _ in 0..15 {
        let events = engine.tick();
        assert!(announced(&events).is_empty());
    }
    assert_eq!(*engine.state(), SessionState::default());
}

#[test]
fn session_clock_counts_only_gated_ticks() {
    let defaults = SessionDefaults {
        rest_between_exercises: 30,
        rest_between_reps: 3,
        rep_duration: 2,
    };
    let plan = plan_with(defaults, vec![exercise(1, "Squat", Some(1), Some(2))]);
    let mut engine = SessionEngine::new(plan);

    engine.enter_session();
    engine.start();
    engine.tick(); // preparing: go cue, clock frozen
    engine.tick(); // activation applies mid-tick, clock still frozen
    assert_eq!(engine.state().elapsed_secs, 0);

    engine.tick();
    engine.tick(); // rep 1 completes -> resting
    assert_eq!(engine.state().elapsed_secs, 2);

    engine.tick();
    engine.tick();
    engine.tick(); // rest 3..0, clock runs through rest
    assert_eq!(engine.state().elapsed_secs, 5);
    assert_eq!(engine.state().phase, Phase::Exercising(Activation::Active));

    engine.tick();
    engine.tick(); // rep of set 2 completes -> session complete
    assert_eq!(engine.state().phase, Phase::Complete);
    assert_eq!(engine.state().elapsed_secs, 7);

    // Complete: clock fully stopped.
    engine.tick();
    engine.tick();
    assert_eq!(engine.state().elapsed_secs, 7);
}

#[test]
fn completion_reports_elapsed_time() {
    let plan = plan_with(
        SessionDefaults {
            rest_between_exercises: 30,
            rest_between_reps: 15,
            rep_duration: 1,
        },
        vec![exercise(1, "Plank", Some(2), Some(1))],
    );
    let mut engine = SessionEngine::new(plan);
    enter_and_activate(&mut engine);
    engine.tick();
    let events = engine.tick();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::SessionCompleted { elapsed_secs: 2, .. })));
}
