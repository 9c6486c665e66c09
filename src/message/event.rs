use crate::{
    file::{MetaEvent, MetaKind, Tempo},
    message::{NoteEvent, SystemEvent},
};

#[doc = r#"
Any record found in a track chunk.

Tracks interleave channel, system and meta events; a decoded track keeps
them in one sequence so tempo changes stay in place relative to the
events they affect.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrackMessage<'a> {
    /// Channel voice events: notes, controllers, program changes...
    Note(NoteEvent),
    /// System real-time events
    System(SystemEvent),
    /// Meta events (`0xFF`)
    Meta(MetaEvent<'a>),
    /// A system exclusive packet (`0xF0` or `0xF7`), without its length prefix
    SystemExclusive(&'a [u8]),
}

#[doc = r#"
A [`TrackMessage`] with the number of ticks since the previous event of
the same track.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackEvent<'a> {
    delta_ticks: u32,
    message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Create a new track event
    pub const fn new(delta_ticks: u32, message: TrackMessage<'a>) -> Self {
        Self {
            delta_ticks,
            message,
        }
    }

    /// Ticks since the previous event in this track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The decoded record
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }

    /// Returns the new tempo if this event is a valid SetTempo meta event.
    pub fn tempo(&self) -> Option<Tempo> {
        match &self.message {
            TrackMessage::Meta(meta) => meta.tempo(),
            _ => None,
        }
    }

    /// Returns the meta event's kind, if this is a meta event.
    pub fn meta_kind(&self) -> Option<MetaKind> {
        match &self.message {
            TrackMessage::Meta(meta) => Some(meta.kind()),
            _ => None,
        }
    }
}
