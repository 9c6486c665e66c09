mod decoder;
pub use decoder::*;

use alloc::vec::Vec;

use crate::{
    file::{
        DecodeOptions, MetaKind,
        builder::chunk::{ChunkKind, RawChunk},
    },
    message::{TrackEvent, TrackMessage},
    reader::ReadResult,
};

#[doc = r#"
Decode a track payload into its events, in file order.

Uses [`DecodeOptions::default`]; errors are positioned relative to the
start of `payload`.

# Example
```rust
# use smf_timeline::{file::decode_track_events, prelude::*};
let events = decode_track_events(&[0x00, 0x90, 0x3C, 0x40]).unwrap();
let TrackMessage::Note(note) = events[0].message() else { panic!() };

assert_eq!(events[0].delta_ticks(), 0);
assert_eq!(note.kind(), NoteKind::NoteOn);
assert_eq!(note.note(), Some(60));
assert_eq!(note.velocity(), Some(64));
```
"#]
pub fn decode_track_events(payload: &[u8]) -> ReadResult<Vec<TrackEvent<'_>>> {
    EventDecoder::new(payload, 0, &DecodeOptions::default()).decode_all()
}

/// The decoded events of one `MTrk` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Track<'a> {
    events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Create a track from already decoded events
    pub fn new(events: Vec<TrackEvent<'a>>) -> Self {
        Self { events }
    }

    /// Decode a track chunk.
    pub fn decode(chunk: &RawChunk<'a>, options: &DecodeOptions) -> ReadResult<Self> {
        chunk.expect(ChunkKind::Track)?;
        let events =
            EventDecoder::new(chunk.payload(), chunk.payload_offset(), options).decode_all()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            offset = chunk.offset(),
            events = events.len(),
            "decoded track"
        );
        Ok(Self { events })
    }

    /// The events in file order
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// Consume the track, returning its events
    pub fn into_events(self) -> Vec<TrackEvent<'a>> {
        self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The track's length in ticks
    pub fn total_ticks(&self) -> u64 {
        self.events.iter().map(|e| e.delta_ticks() as u64).sum()
    }

    /// The first TrackName meta event's text, if any.
    pub fn name(&self) -> Option<&'a [u8]> {
        self.events.iter().find_map(|e| match e.message() {
            TrackMessage::Meta(meta) if meta.kind() == MetaKind::TrackName => Some(meta.data()),
            _ => None,
        })
    }
}
