#![doc = r#"
Chunk framing

MIDI files are organized into chunks, each identified by a 4-character ASCII
type identifier followed by a 32-bit big-endian length and then that many
payload bytes:

```text
|'M' 'T' 'h' 'd'|00 00 00 06|<6 payload bytes>|'M' 'T' 'r' 'k'|<len>|<len bytes>|...
```

The Standard MIDI File specification defines two chunk types: the header
(`MThd`), which must come first, and tracks (`MTrk`). Any other identifier
is an [`Unknown`](ChunkKind::Unknown) chunk, which readers skip so that
files carrying vendor data still load.
"#]

use crate::reader::{ReadResult, ReaderError, ReaderErrorKind, read_u32_be};

/// The length of a chunk's id and size fields
pub const CHUNK_PREAMBLE_LEN: usize = 8;

/// How a chunk id is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkKind {
    /// `MThd`
    Header,
    /// `MTrk`
    Track,
    /// Anything else
    Unknown,
}

impl ChunkKind {
    /// Classify a chunk id
    pub const fn from_id(id: &[u8; 4]) -> Self {
        match id {
            b"MThd" => Self::Header,
            b"MTrk" => Self::Track,
            _ => Self::Unknown,
        }
    }
}

/// A framed chunk whose payload has not been interpreted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawChunk<'a> {
    id: [u8; 4],
    kind: ChunkKind,
    payload: &'a [u8],
    offset: usize,
}

impl<'a> RawChunk<'a> {
    /// Create a chunk from its id and payload, as if it started at `offset`.
    pub const fn new(id: [u8; 4], payload: &'a [u8], offset: usize) -> Self {
        Self {
            kind: ChunkKind::from_id(&id),
            id,
            payload,
            offset,
        }
    }

    /// The four id bytes
    pub const fn id(&self) -> [u8; 4] {
        self.id
    }
    /// The chunk's classification
    pub const fn kind(&self) -> ChunkKind {
        self.kind
    }
    /// The declared size, equal to the payload length
    pub const fn size(&self) -> u32 {
        self.payload.len() as u32
    }
    /// The payload bytes
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }
    /// Position of the chunk's id within the input
    pub const fn offset(&self) -> usize {
        self.offset
    }
    /// Position of the first payload byte within the input
    pub const fn payload_offset(&self) -> usize {
        self.offset + CHUNK_PREAMBLE_LEN
    }
    /// Bytes the chunk occupies, preamble included
    pub const fn total_len(&self) -> usize {
        CHUNK_PREAMBLE_LEN + self.payload.len()
    }

    /// Fail unless this chunk is of the `expected` kind.
    pub fn expect(&self, expected: ChunkKind) -> ReadResult<()> {
        if self.kind != expected {
            return Err(ReaderError::new(
                self.offset,
                ReaderErrorKind::WrongChunkType {
                    expected,
                    found: self.kind,
                },
            ));
        }
        Ok(())
    }
}

#[doc = r#"
Frame one chunk at the start of `buf`.

Returns the chunk and the bytes after it.

# Errors
- [`OutOfBounds`](ReaderErrorKind::OutOfBounds) if fewer than 8 bytes remain
  for the id and size.
- [`TruncatedChunk`](ReaderErrorKind::TruncatedChunk) if the size field
  claims more bytes than follow it.
"#]
pub fn read_chunk(buf: &[u8]) -> ReadResult<(RawChunk<'_>, &[u8])> {
    read_chunk_at(buf, 0)
}

pub(crate) fn read_chunk_at(buf: &[u8], base: usize) -> ReadResult<(RawChunk<'_>, &[u8])> {
    let size = read_u32_be(buf, 4).map_err(|e| e.rebase(base))?;
    let mut id = [0; 4];
    id.copy_from_slice(&buf[..4]);

    let body = &buf[CHUNK_PREAMBLE_LEN..];
    if size as usize > body.len() {
        return Err(ReaderError::new(
            base,
            ReaderErrorKind::TruncatedChunk {
                declared: size,
                available: body.len(),
            },
        ));
    }
    let (payload, rest) = body.split_at(size as usize);
    Ok((RawChunk::new(id, payload, base), rest))
}

/// Frames chunks one after another until the input is exhausted.
///
/// Yields at most one error, after which it is fused.
#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    rest: &'a [u8],
    position: usize,
}

impl<'a> ChunkIter<'a> {
    /// Start framing at the beginning of `buf`
    pub const fn new(buf: &'a [u8]) -> Self {
        Self {
            rest: buf,
            position: 0,
        }
    }

    /// Bytes framed so far, preambles included
    pub const fn consumed(&self) -> usize {
        self.position
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = ReadResult<RawChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match read_chunk_at(self.rest, self.position) {
            Ok((chunk, rest)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    offset = chunk.offset(),
                    size = chunk.size(),
                    kind = ?chunk.kind(),
                    "framed chunk"
                );
                self.position += chunk.total_len();
                self.rest = rest;
                Some(Ok(chunk))
            }
            Err(e) => {
                self.rest = &[];
                Some(Err(e))
            }
        }
    }
}

#[test]
fn frame_header_and_rest() {
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0, 0xAA, 0xBB,
    ];
    let (chunk, rest) = read_chunk(&bytes).unwrap();

    assert_eq!(chunk.kind(), ChunkKind::Header);
    assert_eq!(chunk.size(), 6);
    assert_eq!(chunk.payload(), &[0, 1, 0, 2, 0x01, 0xE0]);
    assert_eq!(rest, &[0xAA, 0xBB]);
}

#[test]
fn classify_ids() {
    use pretty_assertions::assert_eq;
    assert_eq!(ChunkKind::from_id(b"MTrk"), ChunkKind::Track);
    assert_eq!(ChunkKind::from_id(b"XFIH"), ChunkKind::Unknown);
    // ids are case sensitive
    assert_eq!(ChunkKind::from_id(b"mthd"), ChunkKind::Unknown);
}

#[test]
fn truncated_chunk() {
    use pretty_assertions::assert_eq;
    let bytes = [b'M', b'T', b'r', b'k', 0, 0, 0, 10, 0x00, 0x90];
    let err = read_chunk(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::TruncatedChunk {
            declared: 10,
            available: 2
        }
    );
    assert_eq!(err.position(), 0);

    let err = read_chunk(&bytes[..6]).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn iter_accounts_for_every_byte() {
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96, //
        b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00, //
        b'X', b'Y', b'Z', b'W', 0, 0, 0, 1, 0x42,
    ];
    let mut iter = ChunkIter::new(&bytes);
    let chunks: Vec<_> = iter.by_ref().collect::<ReadResult<_>>().unwrap();

    let kinds: Vec<_> = chunks.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        [ChunkKind::Header, ChunkKind::Track, ChunkKind::Unknown]
    );
    assert_eq!(chunks[2].offset(), 26);
    assert_eq!(iter.consumed(), bytes.len());
    assert_eq!(
        chunks.iter().map(RawChunk::total_len).sum::<usize>(),
        bytes.len()
    );
}

#[test]
fn iter_errors_point_into_the_file() {
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96, //
        b'M', b'T', b'r', b'k', 0, 0, 1, 0, 0x00,
    ];
    let results: alloc::vec::Vec<_> = ChunkIter::new(&bytes).collect();
    assert_eq!(results.len(), 2);
    let err = results[1].clone().unwrap_err();
    assert_eq!(err.position(), 14);
}
