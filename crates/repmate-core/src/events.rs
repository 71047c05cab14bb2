use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Phase;

/// Why a rest countdown was started.
///
/// The plan field feeding the set-boundary rest is named
/// `rest_between_reps` for historical reasons; no rest is ever inserted
/// between reps within a set, so the event surface names the kind by where
/// the rest actually happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    BetweenSets,
    BetweenExercises,
}

/// Every state change in the engine produces an Event.
/// The host UI renders snapshots and forwards `Announcement` events to the
/// text-to-speech collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionEntered {
        at: DateTime<Utc>,
    },
    /// The pre-exercise cue sequence began; rep timing is not yet armed.
    PreparationStarted {
        exercise_index: usize,
        exercise: String,
        at: DateTime<Utc>,
    },
    /// A spoken cue is due now. Fire-and-forget for the host.
    Announcement {
        text: String,
        at: DateTime<Utc>,
    },
    /// The engine entered the exercising phase.
    ExerciseStarted {
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    Paused {
        at: DateTime<Utc>,
    },
    Resumed {
        at: DateTime<Utc>,
    },
    RepCompleted {
        exercise_index: usize,
        set: u32,
        rep: u32,
        at: DateTime<Utc>,
    },
    SetCompleted {
        exercise_index: usize,
        set: u32,
        at: DateTime<Utc>,
    },
    RestStarted {
        kind: RestKind,
        seconds: u64,
        at: DateTime<Utc>,
    },
    RestEnded {
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    /// Progressed to the next exercise at an exercise boundary.
    ExerciseAdvanced {
        from: usize,
        to: usize,
        exercise: String,
        at: DateTime<Utc>,
    },
    /// User skipped ahead to the next exercise.
    Skipped {
        from: usize,
        to: usize,
        exercise: String,
        at: DateTime<Utc>,
    },
    Stopped {
        at: DateTime<Utc>,
    },
    SessionCompleted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        exercise_index: usize,
        total_exercises: usize,
        exercise: String,
        current_set: u32,
        total_sets: u32,
        current_rep: u32,
        total_reps: u32,
        running: bool,
        paused: bool,
        elapsed_secs: u64,
        rep_elapsed: u64,
        rest_remaining: u64,
        at: DateTime<Utc>,
    },
}
