//! Text-to-speech collaborator seam.
//!
//! The engine never speaks; it emits [`crate::events::Event::Announcement`]
//! and the host hands the text to whatever `Announcer` it has. A missing
//! capability degrades to silence without affecting engine state.

/// Fire-and-forget speech output.
pub trait Announcer {
    fn announce(&self, text: &str);
}

/// Announcer for environments without speech output. Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&self, _text: &str) {}
}
