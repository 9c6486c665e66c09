use crate::{
    file::{
        Format, TicksPerQuarterNote, Timing,
        builder::chunk::{ChunkKind, RawChunk},
    },
    reader::{HeaderError, ReadResult, ReaderError, ReaderErrorKind, read_u16_be},
};

#[doc = r#"
The decoded `MThd` chunk.

```text
|format (u16)|tracks (u16)|division (u16)|
```

Only ticks-per-quarter-note division is supported, so a decoded header
always has a usable [`TicksPerQuarterNote`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    format: Format,
    track_count: u16,
    ticks: TicksPerQuarterNote,
}

impl FileHeader {
    /// Create a header from its parts.
    ///
    /// `ticks_per_quarter_note` is masked to 15 bits and must not be zero.
    pub fn new(format: Format, track_count: u16, ticks_per_quarter_note: u16) -> Option<Self> {
        let ticks = ticks_per_quarter_note & 0x7FFF;
        if ticks == 0 {
            return None;
        }
        Some(Self {
            format,
            track_count,
            ticks: TicksPerQuarterNote(ticks),
        })
    }
    /// How the tracks relate to each other
    pub const fn format(&self) -> Format {
        self.format
    }
    /// The number of tracks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// The division this file uses
    pub const fn timing(&self) -> Timing {
        Timing::TicksPerQuarterNote(self.ticks)
    }
    /// Ticks per quarter note, never zero
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks.get()
    }
}

#[doc = r#"
Decode a header chunk.

# Errors
- [`WrongChunkType`](ReaderErrorKind::WrongChunkType) if `chunk` is not `MThd`
- [`Header`](ReaderErrorKind::Header) if the payload is short, the format
  word is not 0-2, or the division is zero ticks per quarter note
- [`UnsupportedFeature`](ReaderErrorKind::UnsupportedFeature) for SMPTE division
"#]
pub fn decode_header(chunk: &RawChunk<'_>) -> ReadResult<FileHeader> {
    chunk.expect(ChunkKind::Header)?;
    let payload = chunk.payload();
    let at = chunk.payload_offset();
    let header_err = |e: HeaderError, offset: usize| ReaderError::new(at + offset, e.into());

    if payload.len() < 6 {
        return Err(header_err(HeaderError::InvalidLength(chunk.size()), 0));
    }
    let word = |offset| read_u16_be(payload, offset).map_err(|e| e.rebase(at));

    let format_word = word(0)?;
    let format = Format::try_from(format_word)
        .map_err(|_| header_err(HeaderError::InvalidFormat(format_word), 0))?;
    let track_count = word(2)?;

    let ticks = match Timing::from_division(word(4)?) {
        Timing::TicksPerQuarterNote(ticks) => ticks,
        Timing::Smpte(_division) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                fps = ?_division.fps(),
                ticks_per_frame = _division.ticks_per_frame(),
                "rejecting SMPTE division"
            );
            return Err(ReaderError::new(
                at + 4,
                ReaderErrorKind::UnsupportedFeature("SMPTE division"),
            ));
        }
    };
    if ticks.get() == 0 {
        return Err(header_err(HeaderError::ZeroTicksPerQuarterNote, 4));
    }

    Ok(FileHeader {
        format,
        track_count,
        ticks,
    })
}

#[cfg(test)]
fn header_chunk(payload: &[u8]) -> RawChunk<'_> {
    RawChunk::new(*b"MThd", payload, 0)
}

#[test]
fn decode_format_one_header() {
    use pretty_assertions::assert_eq;
    let payload = [0x00, 0x01, 0x00, 0x02, 0x01, 0xE0];
    let header = decode_header(&header_chunk(&payload)).unwrap();

    assert_eq!(header.format(), Format::MultiSimultaneous);
    assert_eq!(header.track_count(), 2);
    assert_eq!(header.timing(), Timing::new_ticks_per_quarter_note(480));
    assert_eq!(header.ticks_per_quarter_note(), 480);
}

#[test]
fn reject_smpte_division() {
    use pretty_assertions::assert_eq;
    // -25 fps, 40 ticks per frame
    let payload = [0x00, 0x00, 0x00, 0x01, 0xE7, 0x28];
    let err = decode_header(&header_chunk(&payload)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::UnsupportedFeature("SMPTE division")
    );
    assert_eq!(err.position(), 12);
}

#[test]
fn reject_malformed_headers() {
    use pretty_assertions::assert_eq;
    let kind = |payload: &[u8]| {
        decode_header(&header_chunk(payload))
            .unwrap_err()
            .error_kind()
            .clone()
    };

    assert_eq!(
        kind(&[0x00, 0x01, 0x00, 0x02]),
        ReaderErrorKind::Header(HeaderError::InvalidLength(4))
    );
    assert_eq!(
        kind(&[0x00, 0x03, 0x00, 0x01, 0x00, 0x60]),
        ReaderErrorKind::Header(HeaderError::InvalidFormat(3))
    );
    assert_eq!(
        kind(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00]),
        ReaderErrorKind::Header(HeaderError::ZeroTicksPerQuarterNote)
    );
}

#[test]
fn reject_track_chunk() {
    use pretty_assertions::assert_eq;
    let chunk = RawChunk::new(*b"MTrk", &[0x00, 0xFF, 0x2F, 0x00], 0);
    assert_eq!(
        decode_header(&chunk).unwrap_err().error_kind(),
        &ReaderErrorKind::WrongChunkType {
            expected: ChunkKind::Header,
            found: ChunkKind::Track
        }
    );
}

#[test]
fn longer_header_payloads_are_accepted() {
    let payload = [0x00, 0x00, 0x00, 0x01, 0x00, 0x60, 0xDE, 0xAD];
    assert!(decode_header(&header_chunk(&payload)).is_ok());
}
