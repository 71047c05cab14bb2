//! Speech output for the CLI host.

use repmate_core::{Announcer, Config, NullAnnouncer};

/// Speaks through an external command when one is configured, otherwise
/// prints cues to stdout.
pub struct ShellAnnouncer {
    command: Option<String>,
}

impl Announcer for ShellAnnouncer {
    fn announce(&self, text: &str) {
        match &self.command {
            Some(cmd) => {
                // Speech is best-effort; a missing or failing command must
                // not disturb the session.
                let _ = std::process::Command::new(cmd).arg(text).spawn();
            }
            None => println!(">> {text}"),
        }
    }
}

/// Pick the announcer the config asks for.
pub fn build(config: &Config) -> Box<dyn Announcer> {
    if !config.announcements.enabled {
        return Box::new(NullAnnouncer);
    }
    Box::new(ShellAnnouncer {
        command: config.announcements.command.clone(),
    })
}
