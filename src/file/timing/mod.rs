mod smpte;
pub use smpte::*;

/// How the header's division word says to read delta times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DivisionType {
    /// Ticks per quarter note, scaled by the current tempo
    TicksPerQuarterNote,
    /// SMPTE frames per second and ticks per frame
    FramesPerSecond,
}

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format, selected by the top bit of the division word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using SMPTE frames
    Smpte(SmpteDivision),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote(tpqn & 0x7FFF))
    }

    /// Split a header division word by its top bit.
    pub const fn from_division(word: u16) -> Self {
        match word >> 15 {
            0 => Self::TicksPerQuarterNote(TicksPerQuarterNote(word)),
            _ => Self::Smpte(SmpteDivision {
                fps_byte: (word >> 8) as u8,
                ticks_per_frame: (word & 0x00FF) as u8,
            }),
        }
    }

    /// Which of the two division schemes this is
    pub const fn division_type(&self) -> DivisionType {
        match self {
            Self::TicksPerQuarterNote(_) => DivisionType::TicksPerQuarterNote,
            Self::Smpte(_) => DivisionType::FramesPerSecond,
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.get()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote(pub(crate) u16);

impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn get(&self) -> u16 {
        self.0
    }
}

#[test]
fn split_division_word() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Timing::from_division(0x01E0).ticks_per_quarter_note(),
        Some(480)
    );

    let smpte = Timing::from_division(0xE728);
    assert_eq!(smpte.division_type(), DivisionType::FramesPerSecond);
    let Timing::Smpte(division) = smpte else {
        panic!("expected smpte timing");
    };
    assert_eq!(division.fps(), Some(SmpteFps::TwentyFive));
    assert_eq!(division.ticks_per_frame(), 40);
}
