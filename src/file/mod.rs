#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and chunk
/// framing.
pub mod builder;
pub use builder::chunk::{CHUNK_PREAMBLE_LEN, ChunkIter, ChunkKind, RawChunk, read_chunk};

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod options;
pub use options::*;

mod tempo;
pub use tempo::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

mod timeline;
pub use timeline::*;

mod timed_event_iter;
pub use timed_event_iter::*;

use crate::{
    file::builder::MidiFileBuilder,
    reader::{Limit, ReadResult, ReaderError, ReaderErrorKind},
};
use alloc::vec::Vec;

#[doc = r#"
A decoded Standard MIDI File.

Holds the header and every track's events in file order, borrowing
payload bytes (meta data, sysex) from the input. Timing is a separate
pass, see [`MidiFile::timeline`].
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MidiFile<'a> {
    pub(crate) header: FileHeader,
    pub(crate) tracks: Vec<Track<'a>>,
    pub(crate) unknown_chunks: Vec<RawChunk<'a>>,
    pub(crate) bytes_consumed: usize,
    pub(crate) options: DecodeOptions,
}

impl<'a> MidiFile<'a> {
    /// Parse a set of bytes into a file struct, with default options.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        Self::parse_with(bytes, &DecodeOptions::default())
    }

    #[doc = r#"
Parse a set of bytes into a file struct.

# Errors
Decoding stops at the first error. Besides the errors of
[`read_chunk`], [`decode_header`] and [`decode_track_events`]:
- [`LimitExceeded`](ReaderErrorKind::LimitExceeded) if `bytes` is longer
  than [`DecodeOptions::max_input_len`]
- [`Chunk`](ReaderErrorKind::Chunk) if the header is missing, repeated,
  or follows a track
"#]
    pub fn parse_with(bytes: &'a [u8], options: &DecodeOptions) -> ReadResult<Self> {
        if bytes.len() > options.max_input_len {
            return Err(ReaderError::new(
                0,
                ReaderErrorKind::LimitExceeded(Limit::InputLength {
                    len: bytes.len(),
                    max: options.max_input_len,
                }),
            ));
        }

        let mut chunks = ChunkIter::new(bytes);
        let mut builder = MidiFileBuilder::new(options);
        for chunk in chunks.by_ref() {
            builder.handle_chunk(chunk?)?;
        }
        builder.build(chunks.consumed())
    }

    /// Returns header info
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Returns the track list, in file order
    pub fn tracks(&self) -> &[Track<'a>] {
        &self.tracks
    }

    /// Executes the provided function for all the tracks in file order.
    pub fn for_each_track<F>(&self, func: F)
    where
        F: FnMut(&Track<'a>),
    {
        self.tracks.iter().for_each(func)
    }

    /// Chunks whose ids are neither `MThd` nor `MTrk`, in file order
    pub fn unknown_chunks(&self) -> &[RawChunk<'a>] {
        &self.unknown_chunks
    }

    /// Bytes framed into chunks. Equal to the input length for any file
    /// that parsed.
    pub fn bytes_consumed(&self) -> usize {
        self.bytes_consumed
    }

    /// The options the file was decoded with
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Timestamp every track, using the tempo scope from the decode options.
    pub fn timeline(&self) -> Timeline<'a> {
        self.timeline_with(self.options.scope())
    }

    /// Timestamp every track with the given tempo scope.
    pub fn timeline_with(&self, scope: TempoScope) -> Timeline<'a> {
        let conductor = match scope {
            TempoScope::Conductor
                if self.header.format() == Format::MultiSimultaneous && self.tracks.len() > 1 =>
            {
                true
            }
            TempoScope::Conductor => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    format = ?self.header.format(),
                    tracks = self.tracks.len(),
                    "no conductor track, timing each track on its own"
                );
                false
            }
            TempoScope::PerTrack => false,
        };

        let tracks = if conductor {
            let events: Vec<&[_]> = self.tracks.iter().map(Track::events).collect();
            build_conductor_timelines(&events, &self.header)
        } else {
            self.tracks
                .iter()
                .map(|track| build_timeline(track.events(), &self.header))
                .collect()
        };
        Timeline::new(tracks)
    }
}
