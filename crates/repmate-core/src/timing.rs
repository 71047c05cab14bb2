//! Effective timing parameters for one exercise.
//!
//! Resolution rule: use the exercise's own value when present, otherwise the
//! session default. Rep and set counts have no session-wide default; absence
//! means one.

use serde::{Deserialize, Serialize};

use crate::plan::{ExerciseDefinition, SessionDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTiming {
    /// Seconds one rep takes.
    pub rep_duration: u64,
    /// Rest seconds inserted at set boundaries.
    pub rest_between_reps: u64,
    /// Rest seconds inserted at exercise boundaries.
    pub rest_between_exercises: u64,
    pub total_reps: u32,
    pub total_sets: u32,
}

impl ResolvedTiming {
    /// Pure; no error conditions. Malformed plans are a caller concern.
    pub fn resolve(exercise: &ExerciseDefinition, defaults: &SessionDefaults) -> Self {
        Self {
            rep_duration: exercise.rep_duration.unwrap_or(defaults.rep_duration),
            rest_between_reps: exercise
                .rest_between_reps
                .unwrap_or(defaults.rest_between_reps),
            rest_between_exercises: exercise
                .rest_between_exercises
                .unwrap_or(defaults.rest_between_exercises),
            total_reps: exercise.repetitions.unwrap_or(1),
            total_sets: exercise.sets.unwrap_or(1),
        }
    }
}
