mod engine;
mod scheduler;

pub use engine::{Activation, Phase, SessionEngine, SessionState};
