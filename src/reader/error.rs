use crate::file::{ChunkKind, MetaKind};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a MIDI file.

Every error carries the absolute byte offset into the input buffer
where the failing record (or read) began.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that decoding can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// A fixed-width read ran past the end of the buffer.
    #[error("Read out of bounds!")]
    OutOfBounds,
    /// A variable length quantity did not terminate within the buffer,
    /// or was longer than four bytes.
    #[error("Malformed variable length quantity")]
    MalformedVarInt,
    /// A chunk declared more payload bytes than remain in the input.
    #[error("Chunk declares {declared} bytes, but only {available} remain")]
    TruncatedChunk {
        /// The size written in the chunk's length field
        declared: u32,
        /// The bytes actually left after the chunk's 8 byte preamble
        available: usize,
    },
    /// A chunk of one kind was handed to a decoder for another.
    #[error("Expected a {expected:?} chunk, found {found:?}")]
    WrongChunkType {
        /// The kind the decoder accepts
        expected: ChunkKind,
        /// The kind it was given
        found: ChunkKind,
    },
    /// Valid SMF data this decoder does not handle.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
    /// A status byte that does not start any known event.
    #[error("Unknown event class for status byte {0:#04X}")]
    UnknownEventClass(u8),
    /// An event claims more bytes than remain in its track, or a channel
    /// event is cut short by a status byte where a data byte belongs.
    #[error("Event needs {needed} bytes, but only {available} are usable")]
    TruncatedEvent {
        /// Bytes the record requires after its status byte
        needed: usize,
        /// Bytes found before the track ended or a status byte interrupted
        available: usize,
    },
    /// A meta event whose length is invalid for its kind.
    #[error("Meta event {kind:?} has invalid length {len}")]
    MalformedMeta {
        /// The meta event's type
        kind: MetaKind,
        /// The length it declared
        len: usize,
    },
    /// Chunk ordering errors
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Header payload errors
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// One of the configured resource limits was hit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(Limit),
}

/// Errors in how chunks are ordered within a file
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// The file has no `MThd` chunk
    #[error("No header chunk found")]
    MissingHeader,
    /// More than one `MThd` chunk
    #[error("Found more than one header chunk")]
    DuplicateHeader,
    /// An `MTrk` chunk came before the `MThd` chunk
    #[error("Track chunk found before the header chunk")]
    TrackBeforeHeader,
}

/// Errors in the content of the `MThd` chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The header payload is shorter than its three words
    #[error("Header payload must be at least 6 bytes, got {0}")]
    InvalidLength(u32),
    /// The format word is not 0, 1 or 2
    #[error("Invalid file format {0}")]
    InvalidFormat(u16),
    /// A ticks-per-quarter-note division of zero
    #[error("Ticks per quarter note cannot be zero")]
    ZeroTicksPerQuarterNote,
}

/// The resource bound that was exceeded
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// The input buffer is larger than allowed
    #[error("input is {len} bytes, the maximum is {max}")]
    InputLength {
        /// Input length
        len: usize,
        /// Configured maximum
        max: usize,
    },
    /// A track holds more events than allowed
    #[error("track holds more than {max} events")]
    EventsPerTrack {
        /// Configured maximum
        max: usize,
    },
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if a fixed-width read went out of bounds
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    /// Create a new malformed VLQ error
    pub const fn malformed_var_int(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::MalformedVarInt,
        }
    }

    /// Shift the position by `base`.
    ///
    /// Component decoders report offsets relative to the slice they were
    /// given; the file decoder rebases them onto the whole input.
    pub(crate) fn rebase(self, base: usize) -> Self {
        Self {
            position: self.position + base,
            kind: self.kind,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
