//! # Repmate Core Library
//!
//! Core business logic for Repmate, a guided workout-session timer. The
//! library is host-agnostic: a CLI binary (or any other thin UI) issues
//! commands, renders state snapshots, and forwards announcement events to a
//! text-to-speech collaborator.
//!
//! ## Architecture
//!
//! - **Session Engine**: a fixed-cadence state machine that requires the
//!   caller to invoke `tick()` (or wall-clock `sync()`) for progress
//! - **Workout Plan**: ordered exercise catalog with per-exercise timing
//!   overrides over session-wide defaults
//! - **Storage**: TOML configuration and JSON engine-state persistence
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: phases, rep/set/exercise progression, rest
//!   countdowns, scheduled spoken cues
//! - [`WorkoutPlan`] / [`ResolvedTiming`]: catalog data and the
//!   override-or-default timing resolution
//! - [`Event`]: serde-tagged stream of every state change
//! - [`Announcer`]: the fire-and-forget speech seam

pub mod announce;
pub mod error;
pub mod events;
pub mod plan;
pub mod session;
pub mod storage;
pub mod timing;

pub use announce::{Announcer, NullAnnouncer};
pub use error::{ConfigError, CoreError, PlanError, Result, StateError};
pub use events::{Event, RestKind};
pub use plan::{CueTexts, ExerciseDefinition, SessionDefaults, WorkoutPlan};
pub use session::{Activation, Phase, SessionEngine, SessionState};
pub use storage::{Config, StateStore};
pub use timing::ResolvedTiming;
