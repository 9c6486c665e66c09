use super::{MetaError, MetaKind};

/// A key signature, from an `FF 59 02 sf mi` meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative
    pub accidentals: i8,
    /// Minor key when true
    pub minor: bool,
}

impl KeySignature {
    /// Parse the two byte payload of a KeySignature meta event.
    pub fn parse(data: &[u8]) -> Result<Self, MetaError> {
        MetaError::check_len(MetaKind::KeySignature, 2, data)?;
        let accidentals = data[0] as i8;
        if !(-7..=7).contains(&accidentals) {
            return Err(MetaError::Accidentals(accidentals));
        }
        let minor = match data[1] {
            0 => false,
            1 => true,
            v => return Err(MetaError::Mode(v)),
        };
        Ok(Self { accidentals, minor })
    }
}

#[test]
fn parse_key_signatures() {
    use pretty_assertions::assert_eq;
    // E flat major
    assert_eq!(
        KeySignature::parse(&[0xFD, 0x00]),
        Ok(KeySignature {
            accidentals: -3,
            minor: false
        })
    );
    // E minor
    assert_eq!(
        KeySignature::parse(&[0x01, 0x01]),
        Ok(KeySignature {
            accidentals: 1,
            minor: true
        })
    );
    assert_eq!(KeySignature::parse(&[0x08, 0x00]), Err(MetaError::Accidentals(8)));
    assert_eq!(KeySignature::parse(&[0x00, 0x02]), Err(MetaError::Mode(2)));
}
