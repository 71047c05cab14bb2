use std::time::Duration;

use clap::Subcommand;
use repmate_core::{Config, Event, Phase, SessionEngine, StateStore, WorkoutPlan};

use crate::announcer;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Enter the session screen (idle -> ready)
    Enter,
    /// Begin the first exercise with its voice cues
    Start,
    /// Toggle pause/resume (starts the session when ready)
    Toggle,
    /// Stop and reset the session
    Stop,
    /// Skip to the next exercise
    Skip,
    /// Catch up on elapsed time and print the session state as JSON
    Status,
    /// Drive the session at one tick per second until it completes
    Watch,
}

fn active_plan(config: &Config) -> Result<WorkoutPlan, Box<dyn std::error::Error>> {
    match &config.plan_path {
        Some(path) => Ok(WorkoutPlan::load(path)?),
        None => Ok(WorkoutPlan::default_back_care()),
    }
}

fn load_engine(
    store: &StateStore,
    config: &Config,
) -> Result<SessionEngine, Box<dyn std::error::Error>> {
    if let Some(engine) = store.load() {
        return Ok(engine);
    }
    Ok(SessionEngine::new(active_plan(config)?))
}

fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn status_line(engine: &SessionEngine) -> String {
    let state = engine.state();
    let name = engine
        .current_exercise()
        .map(|e| e.name.clone())
        .unwrap_or_default();
    let (total_reps, total_sets) = engine
        .current_timing()
        .map(|t| (t.total_reps, t.total_sets))
        .unwrap_or((1, 1));
    let mut line = format!(
        "[{}] {} rep {}/{} set {}/{} elapsed {}",
        state.phase.label(),
        name,
        state.current_rep,
        total_reps,
        state.current_set,
        total_sets,
        format_mmss(state.elapsed_secs),
    );
    if state.phase == Phase::Resting {
        line.push_str(&format!(" rest {}s", state.rest_remaining));
    }
    if state.paused {
        line.push_str(" (paused)");
    }
    line
}

fn watch(
    mut engine: SessionEngine,
    store: &StateStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let announcer = announcer::build(config);
    loop {
        std::thread::sleep(Duration::from_secs(1));
        let events = engine.sync();
        for event in &events {
            if let Event::Announcement { text, .. } = event {
                announcer.announce(text);
            }
        }
        println!("{}", status_line(&engine));
        store.save(&engine)?;
        if engine.state().phase == Phase::Complete {
            println!(
                "Workout complete in {}",
                format_mmss(engine.state().elapsed_secs)
            );
            return Ok(());
        }
    }
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = StateStore::open()?;
    let mut engine = load_engine(&store, &config)?;
    let mut events = engine.sync();
    let want_snapshot = matches!(action, SessionAction::Status);

    match action {
        SessionAction::Enter => events.extend(engine.enter_session()),
        SessionAction::Start => events.extend(engine.start()),
        SessionAction::Toggle => events.extend(engine.toggle_pause_resume()),
        SessionAction::Stop => events.extend(engine.stop()),
        SessionAction::Skip => events.extend(engine.skip_to_next()),
        SessionAction::Status => {}
        SessionAction::Watch => return watch(engine, &store, &config),
    }

    let announcer = announcer::build(&config);
    for event in &events {
        if let Event::Announcement { text, .. } = event {
            announcer.announce(text);
        }
    }
    print_events(&events)?;
    if want_snapshot {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }
    store.save(&engine)?;
    Ok(())
}
