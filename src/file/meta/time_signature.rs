use super::{MetaError, MetaKind};

#[doc = r#"
A time signature, from an `FF 58 04 nn dd cc bb` meta event.

- `nn`: numerator
- `dd`: denominator as a power of two (`2` means a quarter note)
- `cc`: MIDI clocks per metronome click
- `bb`: notated 32nd notes per MIDI quarter note (24 clocks)
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The note value of one beat, already decoded from its power of two
    pub denominator: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_metronome_click: u8,
    /// 32nd notes per quarter note
    pub thirty_seconds_per_quarter: u8,
}

impl Default for TimeSignature {
    /// 4/4 with a click every quarter note
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
            clocks_per_metronome_click: 24,
            thirty_seconds_per_quarter: 8,
        }
    }
}

impl TimeSignature {
    /// Parse the four byte payload of a TimeSignature meta event.
    pub fn parse(data: &[u8]) -> Result<Self, MetaError> {
        MetaError::check_len(MetaKind::TimeSignature, 4, data)?;
        let power = data[1];
        if power > 7 {
            return Err(MetaError::Denominator(power));
        }
        Ok(Self {
            numerator: data[0],
            denominator: 1 << power,
            clocks_per_metronome_click: data[2],
            thirty_seconds_per_quarter: data[3],
        })
    }
}

#[test]
fn parse_six_eight() {
    use pretty_assertions::assert_eq;
    let sig = TimeSignature::parse(&[0x06, 0x03, 0x24, 0x08]).unwrap();
    assert_eq!(
        sig,
        TimeSignature {
            numerator: 6,
            denominator: 8,
            clocks_per_metronome_click: 36,
            thirty_seconds_per_quarter: 8,
        }
    );
}

#[test]
fn reject_bad_time_signatures() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        TimeSignature::parse(&[0x04, 0x08, 0x18, 0x08]),
        Err(MetaError::Denominator(8))
    );
    assert!(matches!(
        TimeSignature::parse(&[0x04, 0x02, 0x18]),
        Err(MetaError::Length { found: 3, .. })
    ));
}
