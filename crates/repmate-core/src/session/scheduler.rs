//! Delayed-action queue for cue sequences.
//!
//! Scheduled entries are keyed by a target value of the scheduler's own
//! tick clock and stamped with the session generation. `cancel_all()` bumps
//! the generation and empties the queue, so nothing scheduled before a
//! reset can ever touch the session afterwards -- even an entry that
//! survives a serialize/deserialize round trip is dropped as stale.
//!
//! The engine advances this clock only on unpaused ticks, which makes every
//! pending cue pause-aware: a countdown and the announcement scheduled for
//! its end freeze and resume together.

use serde::{Deserialize, Serialize};

/// What to do when a scheduled entry comes due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ScheduledAction {
    /// Hand a spoken cue to the host.
    Cue(String),
    /// Enter the exercising phase; `armed` controls whether the rep timer
    /// starts immediately or waits for a later `ArmRepTimer`.
    EnterExercising { armed: bool },
    /// Arm the rep timer if still awaiting its cue.
    ArmRepTimer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due: u64,
    generation: u64,
    action: ScheduledAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CueScheduler {
    clock: u64,
    generation: u64,
    pending: Vec<Scheduled>,
}

impl CueScheduler {
    /// Schedule an action `delay_secs` scheduler-ticks from now.
    pub fn schedule_in(&mut self, delay_secs: u64, action: ScheduledAction) {
        self.pending.push(Scheduled {
            due: self.clock + delay_secs,
            generation: self.generation,
            action,
        });
    }

    /// Advance the clock one tick and drain everything now due, in due
    /// order. Stale-generation entries are discarded, never fired.
    pub fn advance(&mut self) -> Vec<ScheduledAction> {
        self.clock += 1;
        let clock = self.clock;
        let generation = self.generation;
        let (mut due, keep): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= clock);
        self.pending = keep;
        due.sort_by_key(|s| s.due);
        due.retain(|s| s.generation == generation);
        due.into_iter().map(|s| s.action).collect()
    }

    /// Cancel all pending work and invalidate anything in flight.
    pub fn cancel_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_the_scheduled_tick() {
        let mut sched = CueScheduler::default();
        sched.schedule_in(2, ScheduledAction::Cue("go".into()));
        assert!(sched.advance().is_empty());
        assert_eq!(
            sched.advance(),
            vec![ScheduledAction::Cue("go".into())]
        );
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn fires_in_due_order() {
        let mut sched = CueScheduler::default();
        sched.schedule_in(1, ScheduledAction::Cue("first".into()));
        sched.schedule_in(1, ScheduledAction::ArmRepTimer);
        let fired = sched.advance();
        assert_eq!(
            fired,
            vec![
                ScheduledAction::Cue("first".into()),
                ScheduledAction::ArmRepTimer
            ]
        );
    }

    #[test]
    fn cancel_drops_pending_work() {
        let mut sched = CueScheduler::default();
        sched.schedule_in(1, ScheduledAction::Cue("stale".into()));
        sched.cancel_all();
        assert!(sched.advance().is_empty());
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn stale_generation_entries_never_fire() {
        let mut sched = CueScheduler::default();
        sched.schedule_in(1, ScheduledAction::Cue("old".into()));
        // Simulate an entry surviving a reset: re-inject after cancel.
        let mut rewound: CueScheduler = serde_json::from_str(
            &serde_json::to_string(&sched).unwrap(),
        )
        .unwrap();
        rewound.cancel_all();
        rewound.pending = sched.pending.clone();
        assert!(rewound.advance().is_empty());
    }
}
