use crate::reader::read_u24_be;

/// Microseconds per quarter note, as carried by a SetTempo meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 500 000 µs per quarter note (120 BPM), in effect until a SetTempo event.
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Parse the 24-bit big-endian payload of a SetTempo event.
    ///
    /// Returns `None` unless `data` is exactly three bytes.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() != 3 {
            return None;
        }
        read_u24_be(data, 0).ok().map(Self)
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

#[test]
fn tempo_from_set_tempo_payload() {
    use pretty_assertions::assert_eq;
    let tempo = Tempo::from_slice(&[0x07, 0xA1, 0x20]).unwrap();
    assert_eq!(tempo, Tempo::DEFAULT);
    assert_eq!(tempo.bpm(), 120.);

    assert_eq!(
        Tempo::from_slice(&[0x0F, 0x42, 0x40]).map(|t| t.bpm()),
        Some(60.)
    );
    assert_eq!(Tempo::from_slice(&[0x0F, 0x42]), None);
}
