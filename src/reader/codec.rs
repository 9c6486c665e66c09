//! Stateless big-endian and variable length quantity decoding.
//!
//! Every function takes the buffer and an offset into it, and fails
//! with an error positioned at `offset` rather than reading past the end.

use super::{ReadResult, ReaderError};

/// The longest VLQ a standard MIDI file may contain (`0x0FFFFFFF`).
pub const MAX_VAR_INT_LEN: usize = 4;

#[inline]
fn fixed<const N: usize>(buf: &[u8], offset: usize) -> ReadResult<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ReaderError::oob(offset))
}

/// Read a big-endian `u16` at `offset`.
pub fn read_u16_be(buf: &[u8], offset: usize) -> ReadResult<u16> {
    fixed::<2>(buf, offset).map(u16::from_be_bytes)
}

/// Read a big-endian 24-bit integer at `offset`.
pub fn read_u24_be(buf: &[u8], offset: usize) -> ReadResult<u32> {
    let [a, b, c] = fixed::<3>(buf, offset)?;
    Ok(u32::from_be_bytes([0, a, b, c]))
}

/// Read a big-endian `u32` at `offset`.
pub fn read_u32_be(buf: &[u8], offset: usize) -> ReadResult<u32> {
    fixed::<4>(buf, offset).map(u32::from_be_bytes)
}

#[doc = r#"
Read a MIDI variable length quantity at `offset`.

Each byte contributes its low 7 bits, most significant group first;
a set high bit means another byte follows. Returns the value and the
number of bytes consumed.

# Errors
[`MalformedVarInt`](super::ReaderErrorKind::MalformedVarInt) if the
buffer ends before a terminating byte, or if the quantity runs longer
than [`MAX_VAR_INT_LEN`] bytes.

# Example
```rust
# use smf_timeline::reader::read_var_int;
assert_eq!(read_var_int(&[0x83, 0x60], 0).unwrap(), (480, 2));
assert_eq!(read_var_int(&[0x00, 0x7F], 1).unwrap(), (127, 1));
```
"#]
pub fn read_var_int(buf: &[u8], offset: usize) -> ReadResult<(u32, usize)> {
    let mut value: u32 = 0;
    for (consumed, &byte) in buf.iter().skip(offset).take(MAX_VAR_INT_LEN).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, consumed + 1));
        }
    }
    Err(ReaderError::malformed_var_int(offset))
}

#[cfg(test)]
fn encode_var_int(mut value: u32) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

#[test]
fn fixed_width_reads() {
    use pretty_assertions::assert_eq;
    let buf = [0x00, 0x06, 0x07, 0xA1, 0x20, 0xFF];

    assert_eq!(read_u16_be(&buf, 0).unwrap(), 6);
    assert_eq!(read_u24_be(&buf, 2).unwrap(), 500_000);
    assert_eq!(read_u32_be(&buf, 2).unwrap(), 0x07A1_20FF);
}

#[test]
fn fixed_width_reads_fail_closed() {
    use crate::reader::ReaderErrorKind;
    let buf = [0x00, 0x06, 0x07];

    let err = read_u32_be(&buf, 0).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::OutOfBounds);
    assert_eq!(err.position(), 0);

    assert!(read_u16_be(&buf, 2).unwrap_err().is_out_of_bounds());
    assert!(read_u24_be(&buf, usize::MAX).unwrap_err().is_out_of_bounds());
}

#[test]
fn var_int_known_values() {
    use pretty_assertions::assert_eq;
    // values from the SMF 1.0 specification's VLQ table
    let cases: &[(&[u8], u32)] = &[
        (&[0x00], 0x00),
        (&[0x40], 0x40),
        (&[0x7F], 0x7F),
        (&[0x81, 0x00], 0x80),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0x7F], 0x3FFF),
        (&[0x81, 0x80, 0x00], 0x4000),
        (&[0xFF, 0xFF, 0x7F], 0x1F_FFFF),
        (&[0x81, 0x80, 0x80, 0x00], 0x20_0000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, value) in cases {
        assert_eq!(read_var_int(bytes, 0).unwrap(), (*value, bytes.len()));
    }
}

#[test]
fn var_int_round_trips_across_widths() {
    use pretty_assertions::assert_eq;
    for value in [0, 1, 127, 128, 480, 16_383, 16_384, 2_097_151, 2_097_152, 0x0FFF_FFFF] {
        let encoded = encode_var_int(value);
        assert_eq!(read_var_int(&encoded, 0).unwrap(), (value, encoded.len()));
    }
}

#[test]
fn var_int_unterminated() {
    use crate::reader::ReaderErrorKind;
    let err = read_var_int(&[0x00, 0x81, 0x80], 1).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::MalformedVarInt);
    assert_eq!(err.position(), 1);

    // empty tail
    assert!(read_var_int(&[0x10], 1).is_err());
    // five bytes is longer than SMF allows
    assert!(read_var_int(&[0x81, 0x80, 0x80, 0x80, 0x00], 0).is_err());
}
