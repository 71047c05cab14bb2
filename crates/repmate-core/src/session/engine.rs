//! Session engine implementation.
//!
//! The engine is a fixed-cadence state machine: one `tick()` call equals one
//! second. It has no internal threads -- the caller invokes `tick()` on a
//! one-second cadence, or `sync()` to convert real elapsed wall-clock time
//! into the right number of ticks.
//!
//! ## Phases
//!
//! ```text
//! Idle -> Ready -> Preparing -> Exercising <-> Resting -> ... -> Complete
//! ```
//!
//! `Exercising` carries an explicit activation sub-state: the rep timer only
//! runs once the pre-exercise cues have had time to finish speaking.
//!
//! ## Clocks
//!
//! A single tick drives three independently gated clocks:
//! - session clock: accumulates `elapsed_secs` while running and unpaused
//!   in an exercising or resting phase;
//! - rep clock: advances `rep_elapsed` only while `Exercising` and armed;
//! - rest clock: counts `rest_remaining` down only while `Resting`.
//!
//! A clock whose gate is closed is suspended, not ignored: pausing
//! mid-repetition preserves `rep_elapsed` exactly, and resuming continues
//! from the preserved value with no time debt.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::scheduler::{CueScheduler, ScheduledAction};
use crate::events::{Event, RestKind};
use crate::plan::{ExerciseDefinition, WorkoutPlan};
use crate::timing::ResolvedTiming;

/// Seconds between consecutive pre-exercise cues, and between the final cue
/// and rep-timer activation. Cue delays are quantized to the tick cadence.
const CUE_SETTLE_SECS: u64 = 1;

/// Sub-state of the exercising phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Pre-exercise cues are still being spoken; the rep timer is held.
    AwaitingCue,
    /// The rep timer is running.
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Ready,
    Preparing,
    Exercising(Activation),
    Resting,
    Complete,
}

impl Phase {
    pub fn is_exercising(&self) -> bool {
        matches!(self, Phase::Exercising(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Ready => "ready",
            Phase::Preparing => "preparing",
            Phase::Exercising(_) => "exercising",
            Phase::Resting => "resting",
            Phase::Complete => "complete",
        }
    }
}

/// The mutable session aggregate. Owned exclusively by [`SessionEngine`];
/// everything outside the engine sees it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// 0-based position into the plan.
    pub exercise_index: usize,
    /// 1-based.
    pub current_set: u32,
    /// 1-based.
    pub current_rep: u32,
    pub running: bool,
    pub paused: bool,
    /// Accumulates only while actively exercising or resting, never while
    /// paused. Monotonic until reset.
    pub elapsed_secs: u64,
    /// Progress toward the resolved rep duration.
    pub rep_elapsed: u64,
    /// Rest countdown; 0 when not resting.
    pub rest_remaining: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            exercise_index: 0,
            current_set: 1,
            current_rep: 1,
            running: false,
            paused: false,
            elapsed_secs: 0,
            rep_elapsed: 0,
            rest_remaining: 0,
        }
    }
}

/// Core session engine.
///
/// Operates on one-second ticks -- no internal thread. Commands invoked in
/// a phase where they are not defined are silent no-ops, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEngine {
    plan: WorkoutPlan,
    state: SessionState,
    scheduler: CueScheduler,
    /// Timestamp (ms since epoch) of the last `sync()`, for wall-clock
    /// catch-up between host invocations.
    #[serde(default)]
    last_sync_epoch_ms: Option<u64>,
}

impl SessionEngine {
    /// Create an engine in `Idle` over the given plan.
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            state: SessionState::default(),
            scheduler: CueScheduler::default(),
            last_sync_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn current_exercise(&self) -> Option<&ExerciseDefinition> {
        self.plan.exercise(self.state.exercise_index)
    }

    /// Effective timings for the current exercise.
    pub fn current_timing(&self) -> Option<ResolvedTiming> {
        self.current_exercise()
            .map(|e| ResolvedTiming::resolve(e, &self.plan.defaults))
    }

    /// Build a full state snapshot event for rendering.
    pub fn snapshot(&self) -> Event {
        let timing = self.current_timing();
        Event::StateSnapshot {
            phase: self.state.phase,
            exercise_index: self.state.exercise_index,
            total_exercises: self.plan.len(),
            exercise: self
                .current_exercise()
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            current_set: self.state.current_set,
            total_sets: timing.map(|t| t.total_sets).unwrap_or(1),
            current_rep: self.state.current_rep,
            total_reps: timing.map(|t| t.total_reps).unwrap_or(1),
            running: self.state.running,
            paused: self.state.paused,
            elapsed_secs: self.state.elapsed_secs,
            rep_elapsed: self.state.rep_elapsed,
            rest_remaining: self.state.rest_remaining,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter the session screen: `Idle -> Ready`. No timers start.
    pub fn enter_session(&mut self) -> Vec<Event> {
        if self.state.phase != Phase::Idle {
            return Vec::new();
        }
        self.state.phase = Phase::Ready;
        vec![Event::SessionEntered { at: Utc::now() }]
    }

    /// Begin the first exercise: `Ready -> Preparing`, announce the exercise
    /// name now, the go cue one settle delay later, and only then activate
    /// the rep timer. Rep timing must not run while cues are being spoken.
    pub fn start(&mut self) -> Vec<Event> {
        if self.state.phase != Phase::Ready {
            return Vec::new();
        }
        let Some(exercise) = self.current_exercise() else {
            return Vec::new();
        };
        let name = exercise.name.clone();
        self.scheduler.cancel_all();
        self.state.phase = Phase::Preparing;
        self.state.rep_elapsed = 0;
        self.state.running = false;
        self.state.paused = false;
        let go = self.plan.cues.go.clone();
        self.scheduler
            .schedule_in(CUE_SETTLE_SECS, ScheduledAction::Cue(go));
        self.scheduler.schedule_in(
            2 * CUE_SETTLE_SECS,
            ScheduledAction::EnterExercising { armed: true },
        );
        vec![
            Event::PreparationStarted {
                exercise_index: self.state.exercise_index,
                exercise: name.clone(),
                at: Utc::now(),
            },
            Event::Announcement {
                text: name,
                at: Utc::now(),
            },
        ]
    }

    /// From `Ready`, equivalent to [`start`](Self::start). While exercising,
    /// toggles pause. Any other phase: no-op.
    pub fn toggle_pause_resume(&mut self) -> Vec<Event> {
        match self.state.phase {
            Phase::Ready => self.start(),
            Phase::Exercising(_) => {
                if self.state.paused || !self.state.running {
                    self.state.running = true;
                    self.state.paused = false;
                    vec![Event::Resumed { at: Utc::now() }]
                } else {
                    self.state.paused = true;
                    vec![Event::Paused { at: Utc::now() }]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Reset the whole session to its `Idle` defaults and cancel every
    /// pending scheduled cue. Valid from any phase.
    pub fn stop(&mut self) -> Vec<Event> {
        self.scheduler.cancel_all();
        self.state = SessionState::default();
        vec![Event::Stopped { at: Utc::now() }]
    }

    /// Jump to the next exercise and run its cue sequence. No-op on the
    /// last exercise, and outside an entered session.
    pub fn skip_to_next(&mut self) -> Vec<Event> {
        if matches!(self.state.phase, Phase::Idle | Phase::Complete) {
            return Vec::new();
        }
        if self.state.exercise_index >= self.plan.last_index() {
            return Vec::new();
        }
        self.scheduler.cancel_all();
        let from = self.state.exercise_index;
        self.state.exercise_index += 1;
        self.state.current_set = 1;
        self.state.current_rep = 1;
        self.state.rest_remaining = 0;
        self.state.rep_elapsed = 0;
        self.state.phase = Phase::Preparing;
        self.state.running = false;
        self.state.paused = false;
        let Some(next) = self.current_exercise() else {
            return Vec::new();
        };
        let name = next.name.clone();
        let go = self.plan.cues.go.clone();
        self.scheduler
            .schedule_in(CUE_SETTLE_SECS, ScheduledAction::Cue(go));
        self.scheduler.schedule_in(
            CUE_SETTLE_SECS,
            ScheduledAction::EnterExercising { armed: false },
        );
        self.scheduler
            .schedule_in(2 * CUE_SETTLE_SECS, ScheduledAction::ArmRepTimer);
        vec![
            Event::Skipped {
                from,
                to: self.state.exercise_index,
                exercise: name.clone(),
                at: Utc::now(),
            },
            Event::Announcement {
                text: name,
                at: Utc::now(),
            },
        ]
    }

    // ── Ticking ──────────────────────────────────────────────────────

    /// Advance the engine by exactly one second.
    ///
    /// Gate predicates are captured before anything runs, so an action that
    /// opens a gate mid-tick (e.g. arming the rep timer) takes effect from
    /// the next tick, never double-counting the current one.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let phase = self.state.phase;
        let running = self.state.running;
        let paused = self.state.paused;
        let session_gate =
            running && !paused && matches!(phase, Phase::Exercising(_) | Phase::Resting);
        let rep_gate = phase == Phase::Exercising(Activation::Active) && running && !paused;
        let rest_gate =
            phase == Phase::Resting && self.state.rest_remaining > 0 && running && !paused;

        // Scheduled cues freeze with pause, so a rest countdown and the
        // announcement scheduled for its end stay in lockstep.
        if !paused {
            for action in self.scheduler.advance() {
                self.apply(action, &mut events);
            }
        }
        if session_gate {
            self.state.elapsed_secs += 1;
        }
        if rep_gate {
            self.on_rep_tick(&mut events);
        } else if rest_gate {
            self.on_rest_tick(&mut events);
        }
        events
    }

    /// Convert wall-clock time since the previous `sync()` into whole-second
    /// ticks, keeping the sub-second remainder for the next call.
    pub fn sync(&mut self) -> Vec<Event> {
        let now = now_ms();
        let mut events = Vec::new();
        match self.last_sync_epoch_ms {
            Some(last) if now > last => {
                let whole_secs = (now - last) / 1000;
                for _ in 0..whole_secs {
                    events.extend(self.tick());
                }
                self.last_sync_epoch_ms = Some(last + whole_secs * 1000);
            }
            Some(_) => {}
            None => self.last_sync_epoch_ms = Some(now),
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, action: ScheduledAction, events: &mut Vec<Event>) {
        match action {
            ScheduledAction::Cue(text) => events.push(Event::Announcement {
                text,
                at: Utc::now(),
            }),
            ScheduledAction::EnterExercising { armed } => {
                self.state.phase = Phase::Exercising(if armed {
                    Activation::Active
                } else {
                    Activation::AwaitingCue
                });
                self.state.running = true;
                self.state.paused = false;
                events.push(Event::ExerciseStarted {
                    exercise_index: self.state.exercise_index,
                    at: Utc::now(),
                });
            }
            ScheduledAction::ArmRepTimer => {
                if self.state.phase == Phase::Exercising(Activation::AwaitingCue) {
                    self.state.phase = Phase::Exercising(Activation::Active);
                }
            }
        }
    }

    fn on_rep_tick(&mut self, events: &mut Vec<Event>) {
        let Some(timing) = self.current_timing() else {
            return;
        };
        self.state.rep_elapsed += 1;
        if self.state.rep_elapsed < timing.rep_duration {
            return;
        }

        let index = self.state.exercise_index;
        let rep = self.state.current_rep;
        let set = self.state.current_set;
        events.push(Event::Announcement {
            text: rep.to_string(),
            at: Utc::now(),
        });
        events.push(Event::RepCompleted {
            exercise_index: index,
            set,
            rep,
            at: Utc::now(),
        });
        self.state.rep_elapsed = 0;

        if rep < timing.total_reps {
            self.state.current_rep += 1;
            return;
        }

        // Set complete. Rest is only ever inserted here, at the set
        // boundary -- never between reps within a set.
        events.push(Event::Announcement {
            text: self.plan.cues.set_complete_for(set),
            at: Utc::now(),
        });
        events.push(Event::SetCompleted {
            exercise_index: index,
            set,
            at: Utc::now(),
        });

        if set < timing.total_sets {
            self.state.current_set += 1;
            self.state.current_rep = 1;
            self.begin_rest(RestKind::BetweenSets, timing.rest_between_reps, events);
        } else if index < self.plan.last_index() {
            self.state.exercise_index = index + 1;
            self.state.current_set = 1;
            self.state.current_rep = 1;
            let name = self
                .current_exercise()
                .map(|e| e.name.clone())
                .unwrap_or_default();
            events.push(Event::ExerciseAdvanced {
                from: index,
                to: index + 1,
                exercise: name.clone(),
                at: Utc::now(),
            });
            // The finishing exercise's rest applies at its own boundary.
            let rest = timing.rest_between_exercises;
            self.begin_rest(RestKind::BetweenExercises, rest, events);
            self.scheduler.schedule_in(rest, ScheduledAction::Cue(name));
            self.scheduler.schedule_in(
                rest + CUE_SETTLE_SECS,
                ScheduledAction::Cue(self.plan.cues.go.clone()),
            );
        } else {
            self.state.running = false;
            self.state.phase = Phase::Complete;
            events.push(Event::Announcement {
                text: self.plan.cues.session_complete.clone(),
                at: Utc::now(),
            });
            events.push(Event::SessionCompleted {
                elapsed_secs: self.state.elapsed_secs,
                at: Utc::now(),
            });
        }
    }

    fn on_rest_tick(&mut self, events: &mut Vec<Event>) {
        self.state.rest_remaining = self.state.rest_remaining.saturating_sub(1);
        if self.state.rest_remaining == 0 {
            self.end_rest(events);
        }
    }

    /// Rest-ended transitions re-arm the rep timer immediately; unlike the
    /// start path there is no new cue to wait for.
    fn end_rest(&mut self, events: &mut Vec<Event>) {
        self.state.rest_remaining = 0;
        self.state.phase = Phase::Exercising(Activation::Active);
        self.state.running = true;
        self.state.paused = false;
        self.state.rep_elapsed = 0;
        events.push(Event::RestEnded {
            exercise_index: self.state.exercise_index,
            at: Utc::now(),
        });
    }

    fn begin_rest(&mut self, kind: RestKind, seconds: u64, events: &mut Vec<Event>) {
        events.push(Event::RestStarted {
            kind,
            seconds,
            at: Utc::now(),
        });
        if seconds == 0 {
            // A zero-length rest would never tick; fall straight through.
            self.end_rest(events);
            return;
        }
        self.state.phase = Phase::Resting;
        self.state.rest_remaining = seconds;
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
