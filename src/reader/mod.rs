#![doc = r#"
Bounds-checked byte reading.

[`read_u16_be`], [`read_u24_be`], [`read_u32_be`] and [`read_var_int`]
decode values at an offset of a slice. [`Reader`] wraps a slice with a
cursor over those same functions, so decoders never do manual offset
arithmetic against the raw buffer.
"#]

mod codec;
pub use codec::*;

mod error;
pub use error::*;

/// A forward-only cursor over a byte slice.
///
/// `base` is the absolute position of the slice within the file, so
/// errors raised here point into the original input.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    position: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader starting at the beginning of `buf`.
    pub const fn from_byte_slice(buf: &'a [u8]) -> Self {
        Self::with_base(buf, 0)
    }

    /// Create a reader whose errors are offset by `base`.
    pub const fn with_base(buf: &'a [u8], base: usize) -> Self {
        Self {
            buf,
            position: 0,
            base,
        }
    }

    /// The cursor position relative to the slice
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The cursor position within the whole file
    pub const fn buffer_position(&self) -> usize {
        self.base + self.position
    }

    /// Bytes left after the cursor
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// True once every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Create an error at the current cursor position.
    pub const fn error(&self, kind: ReaderErrorKind) -> ReaderError {
        ReaderError::new(self.buffer_position(), kind)
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.buf
            .get(self.position)
            .copied()
            .ok_or(ReaderError::oob(self.buffer_position()))
    }

    /// Consume one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Consume a variable length quantity.
    pub fn read_var_int(&mut self) -> ReadResult<u32> {
        let (v, consumed) =
            read_var_int(self.buf, self.position).map_err(|e| e.rebase(self.base))?;
        self.position += consumed;
        Ok(v)
    }

    /// Consume exactly `len` bytes, or fail with `on_short` without moving.
    pub fn read_slice_or(
        &mut self,
        len: usize,
        on_short: impl FnOnce(usize) -> ReaderErrorKind,
    ) -> ReadResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(self.error(on_short(available)));
        }
        let slice = &self.buf[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }
}

#[test]
fn reader_tracks_absolute_positions() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x01, 0x83, 0x60, 0xAA];
    let mut reader = Reader::with_base(&bytes, 100);

    assert_eq!(reader.read_u8().unwrap(), 0);
    assert_eq!(reader.peek_u8().unwrap(), 1);
    assert_eq!(reader.read_u8().unwrap(), 1);
    assert_eq!(reader.read_var_int().unwrap(), 480);
    assert_eq!(reader.buffer_position(), 104);
    assert_eq!(reader.read_u8().unwrap(), 0xAA);
    assert!(reader.is_empty());

    let err = reader.read_u8().unwrap_err();
    assert_eq!(err.position(), 105);
}

#[test]
fn short_slice_does_not_advance() {
    let bytes = [1, 2, 3];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_u8().unwrap();

    let err = reader
        .read_slice_or(5, |available| ReaderErrorKind::TruncatedEvent {
            needed: 5,
            available,
        })
        .unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::TruncatedEvent {
            needed: 5,
            available: 2
        }
    );
    assert_eq!(reader.position(), 1);
    assert_eq!(reader.remaining(), 2);
}
