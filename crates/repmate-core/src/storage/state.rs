//! Persisted engine state.
//!
//! One-shot host commands (start, pause, status, ...) run in separate
//! processes, so the engine is serialized to a JSON file in the data dir
//! between invocations and re-hydrated on the next command. Workout history
//! is deliberately not kept; the file only ever holds the current session.

use std::path::PathBuf;

use crate::error::{CoreError, StateError};
use crate::session::SessionEngine;

const STATE_FILE: &str = "session.json";

/// File-backed store for the serialized [`SessionEngine`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store in the default data directory.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self {
            path: super::data_dir()?.join(STATE_FILE),
        })
    }

    /// Store at an explicit path (tests, custom hosts).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted engine. Returns `None` when no state exists or
    /// the file no longer parses (e.g. written by an older build).
    pub fn load(&self) -> Option<SessionEngine> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, engine: &SessionEngine) -> Result<(), CoreError> {
        let json =
            serde_json::to_string(engine).map_err(|e| StateError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|source| StateError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Remove the persisted state, if any.
    pub fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StateError::Write {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}
