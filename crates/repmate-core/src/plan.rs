//! Workout plan data: exercise definitions, session-wide defaults, and the
//! fixed cue texts the engine announces at transitions.
//!
//! A plan is pure data. Per-exercise fields are optional overrides; an
//! absent field means "use the session default" (resolved by
//! [`crate::timing::ResolvedTiming`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// One exercise in a plan. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    /// Reps per set. `None` means one rep.
    #[serde(default)]
    pub repetitions: Option<u32>,
    /// Sets for this exercise. `None` means one set.
    #[serde(default)]
    pub sets: Option<u32>,
    /// Seconds per rep. `None` means the session default.
    #[serde(default)]
    pub rep_duration: Option<u64>,
    /// Rest seconds at set boundaries. `None` means the session default.
    #[serde(default)]
    pub rest_between_reps: Option<u64>,
    /// Rest seconds at exercise boundaries. `None` means the session default.
    #[serde(default)]
    pub rest_between_exercises: Option<u64>,
}

/// Session-wide fallback timings, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDefaults {
    pub rest_between_exercises: u64,
    pub rest_between_reps: u64,
    pub rep_duration: u64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            rest_between_exercises: 30,
            rest_between_reps: 15,
            rep_duration: 2,
        }
    }
}

/// Spoken cue strings. Plan data rather than engine constants so a plan can
/// carry cues in whatever language its exercise names use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueTexts {
    /// Spoken right before a rep timer is armed.
    #[serde(default = "default_go")]
    pub go: String,
    /// Template for set completion; `{set}` is replaced with the set number.
    #[serde(default = "default_set_complete")]
    pub set_complete: String,
    /// Spoken once when the whole session finishes.
    #[serde(default = "default_session_complete")]
    pub session_complete: String,
}

fn default_go() -> String {
    "Go".into()
}
fn default_set_complete() -> String {
    "Set {set} complete".into()
}
fn default_session_complete() -> String {
    "Well done, workout complete".into()
}

impl CueTexts {
    pub fn set_complete_for(&self, set: u32) -> String {
        self.set_complete.replace("{set}", &set.to_string())
    }
}

impl Default for CueTexts {
    fn default() -> Self {
        Self {
            go: default_go(),
            set_complete: default_set_complete(),
            session_complete: default_session_complete(),
        }
    }
}

/// An ordered exercise catalog plus its session defaults and cue texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub name: String,
    #[serde(default)]
    pub defaults: SessionDefaults,
    #[serde(default)]
    pub cues: CueTexts,
    pub exercises: Vec<ExerciseDefinition>,
}

impl WorkoutPlan {
    /// Build a plan, rejecting an empty catalog. The engine assumes a
    /// non-empty plan; this is the boundary that guarantees it.
    pub fn new(
        name: impl Into<String>,
        defaults: SessionDefaults,
        exercises: Vec<ExerciseDefinition>,
    ) -> Result<Self, PlanError> {
        if exercises.is_empty() {
            return Err(PlanError::Empty);
        }
        Ok(Self {
            name: name.into(),
            defaults,
            cues: CueTexts::default(),
            exercises,
        })
    }

    /// Load a plan from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a plan from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let plan: WorkoutPlan =
            serde_json::from_str(json).map_err(|e| PlanError::Parse(e.to_string()))?;
        if plan.exercises.is_empty() {
            return Err(PlanError::Empty);
        }
        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercise(&self, index: usize) -> Option<&ExerciseDefinition> {
        self.exercises.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.exercises.len().saturating_sub(1)
    }

    /// The built-in back-care routine.
    pub fn default_back_care() -> Self {
        let ex = |id: u32,
                  name: &str,
                  instructions: &str,
                  repetitions: Option<u32>,
                  sets: Option<u32>,
                  rep_duration: Option<u64>| {
            ExerciseDefinition {
                id,
                name: name.into(),
                instructions: instructions.into(),
                repetitions,
                sets,
                rep_duration,
                rest_between_reps: None,
                rest_between_exercises: None,
            }
        };
        Self {
            name: "Back care routine".into(),
            defaults: SessionDefaults::default(),
            cues: CueTexts::default(),
            exercises: vec![
                ex(
                    1,
                    "Cat-cow",
                    "Move slowly, a four count per direction. Feel the motion; stop before pain.",
                    Some(6),
                    None,
                    None,
                ),
                ex(
                    2,
                    "Superman",
                    "Strengthens the spinal erectors. Keep the legs straight and the gaze down.",
                    Some(10),
                    Some(3),
                    None,
                ),
                ex(
                    3,
                    "Bird dog",
                    "Keep the pelvis level and the back flat; look at the floor throughout.",
                    Some(12),
                    Some(2),
                    None,
                ),
                ex(
                    4,
                    "Cobra",
                    "Hold the pose for four deep breaths. Rise slowly and stop at the first discomfort.",
                    None,
                    Some(3),
                    Some(30),
                ),
                ex(
                    5,
                    "Half bridge",
                    "Controlled movement; peel the spine off vertebra by vertebra, up and down.",
                    Some(10),
                    Some(3),
                    None,
                ),
                ex(
                    6,
                    "Abdominal curl",
                    "Lift the head and upper chest to the shoulder blades, lower slowly. Keep a gap between chin and chest.",
                    Some(10),
                    Some(3),
                    None,
                ),
                ex(
                    7,
                    "Spinal twist",
                    "Once per side. Hold for six deep breaths, both shoulders on the mat.",
                    Some(1),
                    Some(3),
                    Some(30),
                ),
                ex(
                    8,
                    "Knee-to-chest stretch",
                    "One leg at a time, then both together. Hold each for six deep breaths.",
                    Some(1),
                    None,
                    None,
                ),
            ],
        }
    }
}
