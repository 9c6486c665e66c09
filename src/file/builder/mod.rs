pub mod chunk;

use alloc::vec::Vec;

use crate::{
    file::{DecodeOptions, FileHeader, MidiFile, Track, decode_header},
    reader::{ChunkError, ReadResult, ReaderError},
};
use chunk::{ChunkKind, RawChunk};

#[doc = r#"
Collects framed chunks into a [`MidiFile`].

The header must come before any track, and there must be exactly one.
Chunks with ids other than `MThd` and `MTrk` are kept aside, untouched.
"#]
#[derive(Debug, Clone)]
pub struct MidiFileBuilder<'a, 'o> {
    options: &'o DecodeOptions,
    header: Option<FileHeader>,
    tracks: Vec<Track<'a>>,
    unknown_chunks: Vec<RawChunk<'a>>,
}

impl<'a, 'o> MidiFileBuilder<'a, 'o> {
    /// A builder with nothing collected yet
    pub fn new(options: &'o DecodeOptions) -> Self {
        Self {
            options,
            header: None,
            tracks: Vec::new(),
            unknown_chunks: Vec::new(),
        }
    }

    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: RawChunk<'a>) -> ReadResult<()> {
        let chunk_err = |e: ChunkError| ReaderError::new(chunk.offset(), e.into());
        match chunk.kind() {
            ChunkKind::Header => {
                if self.header.is_some() {
                    return Err(chunk_err(ChunkError::DuplicateHeader));
                }
                self.header = Some(decode_header(&chunk)?);
            }
            ChunkKind::Track => {
                if self.header.is_none() {
                    return Err(chunk_err(ChunkError::TrackBeforeHeader));
                }
                self.tracks.push(Track::decode(&chunk, self.options)?);
            }
            ChunkKind::Unknown => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    offset = chunk.offset(),
                    id = ?chunk.id(),
                    size = chunk.size(),
                    "skipping unknown chunk"
                );
                self.unknown_chunks.push(chunk);
            }
        }
        Ok(())
    }

    /// Finish the file. `consumed` is the number of input bytes framed.
    pub fn build(self, consumed: usize) -> ReadResult<MidiFile<'a>> {
        let Some(header) = self.header else {
            return Err(ReaderError::new(consumed, ChunkError::MissingHeader.into()));
        };

        #[cfg(feature = "tracing")]
        {
            if header.track_count() as usize != self.tracks.len() {
                tracing::warn!(
                    declared = header.track_count(),
                    found = self.tracks.len(),
                    "track count does not match the header"
                );
            }
            if header.format() == crate::file::Format::SingleTrack && self.tracks.len() > 1 {
                tracing::warn!(tracks = self.tracks.len(), "format 0 file with several tracks");
            }
        }
        Ok(MidiFile {
            header,
            tracks: self.tracks,
            unknown_chunks: self.unknown_chunks,
            bytes_consumed: consumed,
            options: self.options.clone(),
        })
    }
}
