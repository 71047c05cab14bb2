use clap::Subcommand;
use repmate_core::{Config, ResolvedTiming, WorkoutPlan};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Print the active plan as JSON
    Show,
    /// List exercises with their resolved timings
    List,
    /// Validate a plan JSON file
    Validate { path: String },
}

fn active_plan(config: &Config) -> Result<WorkoutPlan, Box<dyn std::error::Error>> {
    match &config.plan_path {
        Some(path) => Ok(WorkoutPlan::load(path)?),
        None => Ok(WorkoutPlan::default_back_care()),
    }
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Show => {
            let plan = active_plan(&Config::load_or_default())?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        PlanAction::List => {
            let plan = active_plan(&Config::load_or_default())?;
            println!("{} ({} exercises)", plan.name, plan.len());
            for (i, exercise) in plan.exercises.iter().enumerate() {
                let t = ResolvedTiming::resolve(exercise, &plan.defaults);
                println!(
                    "{:2}. {} -- {} rep(s) x {} set(s), {}s/rep, rest {}s/{}s",
                    i + 1,
                    exercise.name,
                    t.total_reps,
                    t.total_sets,
                    t.rep_duration,
                    t.rest_between_reps,
                    t.rest_between_exercises,
                );
            }
        }
        PlanAction::Validate { path } => {
            let plan = WorkoutPlan::load(&path)?;
            println!("Plan '{}' is valid: {} exercises", plan.name, plan.len());
        }
    }
    Ok(())
}
