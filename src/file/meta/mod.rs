#![doc = r#"
Meta events

Meta events (`FF <type> <len> <data>`) carry information that is not
sent to a synthesizer: names, lyrics, markers, tempo, time and key
signatures. The decoder keeps every meta event's bytes untouched; the
typed accessors on [`MetaEvent`] interpret them on demand.
"#]

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

mod tempo;
pub use tempo::*;

mod time_signature;
pub use time_signature::*;

use alloc::borrow::Cow;
use num_enum::{FromPrimitive, IntoPrimitive};
use thiserror::Error;

/// The type byte of a meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaKind {
    /// `0x00`: two byte sequence number
    SequenceNumber = 0x00,
    /// `0x01`: any text
    Text = 0x01,
    /// `0x02`: copyright notice
    Copyright = 0x02,
    /// `0x03`: sequence or track name
    TrackName = 0x03,
    /// `0x04`: instrument name
    InstrumentName = 0x04,
    /// `0x05`: a lyric syllable
    Lyric = 0x05,
    /// `0x06`: rehearsal letter or section name
    Marker = 0x06,
    /// `0x07`: description of something happening on stage or film
    CuePoint = 0x07,
    /// `0x20`: channel the following meta and sysex events apply to
    ChannelPrefix = 0x20,
    /// `0x21`: output port
    MidiPort = 0x21,
    /// `0x2F`: end of track
    EndOfTrack = 0x2F,
    /// `0x51`: microseconds per quarter note, 24-bit
    SetTempo = 0x51,
    /// `0x54`: SMPTE time the track starts at
    SmpteOffset = 0x54,
    /// `0x58`: time signature
    TimeSignature = 0x58,
    /// `0x59`: key signature
    KeySignature = 0x59,
    /// `0x7F`: manufacturer specific data
    SequencerSpecific = 0x7F,
    /// Any type byte not listed above
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaKind {
    /// True for the text-carrying kinds `0x01..=0x07`
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Copyright
                | Self::TrackName
                | Self::InstrumentName
                | Self::Lyric
                | Self::Marker
                | Self::CuePoint
        )
    }

    /// The only payload length this kind may have, if it is fixed.
    pub const fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::SequenceNumber => Some(2),
            Self::ChannelPrefix | Self::MidiPort => Some(1),
            Self::EndOfTrack => Some(0),
            Self::SetTempo => Some(3),
            Self::SmpteOffset => Some(5),
            Self::TimeSignature => Some(4),
            Self::KeySignature => Some(2),
            _ => None,
        }
    }
}

/// Errors from interpreting a meta event's payload
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetaError {
    /// The event is a different kind than the accessor reads
    #[error("Expected a {expected:?} meta event, found {found:?}")]
    WrongKind {
        /// The kind the accessor reads
        expected: MetaKind,
        /// The event's kind
        found: MetaKind,
    },
    /// The payload length does not match the kind
    #[error("{kind:?} must be {expected} bytes, got {found}")]
    Length {
        /// The event's kind
        kind: MetaKind,
        /// The length required by the kind
        expected: usize,
        /// The payload length
        found: usize,
    },
    /// Time signature denominator exponent too large for a `u8`
    #[error("Time signature denominator 2^{0} does not fit in a byte")]
    Denominator(u8),
    /// Key signature outside -7..=7
    #[error("Key signature has {0} accidentals, must be within -7..=7")]
    Accidentals(i8),
    /// Key signature mode byte not 0 (major) or 1 (minor)
    #[error("Key signature mode must be 0 or 1, got {0}")]
    Mode(u8),
    /// The SMPTE offset frame rate bits are invalid
    #[error("Invalid SMPTE offset frame type {0}")]
    SmpteFrameType(u8),
    /// SMPTE offset hour above 23
    #[error("SMPTE offset hour {0} is above 23")]
    SmpteHour(u8),
    /// SMPTE offset minute above 59
    #[error("SMPTE offset minute {0} is above 59")]
    SmpteMinute(u8),
    /// SMPTE offset second above 59
    #[error("SMPTE offset second {0} is above 59")]
    SmpteSecond(u8),
    /// SMPTE offset frame beyond the frame rate
    #[error("SMPTE offset frame {0} exceeds the frame rate")]
    SmpteFrame(u8),
    /// SMPTE offset subframe above 99
    #[error("SMPTE offset subframe {0} is above 99")]
    SmpteSubframe(u8),
}

impl MetaError {
    pub(crate) const fn check_len(
        kind: MetaKind,
        expected: usize,
        data: &[u8],
    ) -> Result<(), Self> {
        if data.len() != expected {
            return Err(Self::Length {
                kind,
                expected,
                found: data.len(),
            });
        }
        Ok(())
    }
}

/// A meta event and its raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetaEvent<'a> {
    kind: MetaKind,
    data: &'a [u8],
}

impl<'a> MetaEvent<'a> {
    /// Create a new meta event
    pub const fn new(kind: MetaKind, data: &'a [u8]) -> Self {
        Self { kind, data }
    }

    /// The event type
    pub const fn kind(&self) -> MetaKind {
        self.kind
    }

    /// The payload, without the type and length prefix
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    fn expect(&self, expected: MetaKind) -> Result<&'a [u8], MetaError> {
        if self.kind != expected {
            return Err(MetaError::WrongKind {
                expected,
                found: self.kind,
            });
        }
        if let Some(len) = expected.fixed_len() {
            MetaError::check_len(expected, len, self.data)?;
        }
        Ok(self.data)
    }

    /// The new tempo, if this is a well formed SetTempo event.
    pub fn tempo(&self) -> Option<Tempo> {
        self.expect(MetaKind::SetTempo)
            .ok()
            .and_then(Tempo::from_slice)
    }

    /// Interpret as a time signature.
    pub fn time_signature(&self) -> Result<TimeSignature, MetaError> {
        TimeSignature::parse(self.expect(MetaKind::TimeSignature)?)
    }

    /// Interpret as a key signature.
    pub fn key_signature(&self) -> Result<KeySignature, MetaError> {
        KeySignature::parse(self.expect(MetaKind::KeySignature)?)
    }

    /// Interpret as an SMPTE offset.
    pub fn smpte_offset(&self) -> Result<SmpteOffset, MetaError> {
        SmpteOffset::parse(self.expect(MetaKind::SmpteOffset)?)
    }

    /// Interpret as a sequence number.
    pub fn sequence_number(&self) -> Result<u16, MetaError> {
        let data = self.expect(MetaKind::SequenceNumber)?;
        Ok(u16::from_be_bytes([data[0], data[1]]))
    }

    /// The raw text for text-carrying kinds.
    ///
    /// SMF does not specify an encoding; most files use ASCII or Latin-1.
    pub fn text(&self) -> Option<&'a [u8]> {
        self.kind.is_text().then_some(self.data)
    }

    /// The text decoded as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> Option<Cow<'a, str>> {
        self.text().map(alloc::string::String::from_utf8_lossy)
    }
}

#[test]
fn meta_kind_catches_unknown_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(MetaKind::from(0x51), MetaKind::SetTempo);
    assert_eq!(MetaKind::from(0x7F), MetaKind::SequencerSpecific);
    assert_eq!(MetaKind::from(0x60), MetaKind::Unknown(0x60));
    assert_eq!(u8::from(MetaKind::Unknown(0x60)), 0x60);
    assert_eq!(u8::from(MetaKind::EndOfTrack), 0x2F);
}

#[test]
fn typed_accessors_check_kind_and_length() {
    use pretty_assertions::assert_eq;
    let tempo = MetaEvent::new(MetaKind::SetTempo, &[0x07, 0xA1, 0x20]);
    assert_eq!(tempo.tempo(), Some(Tempo::new(500_000)));
    assert_eq!(
        tempo.time_signature(),
        Err(MetaError::WrongKind {
            expected: MetaKind::TimeSignature,
            found: MetaKind::SetTempo
        })
    );

    let short = MetaEvent::new(MetaKind::SetTempo, &[0x07, 0xA1]);
    assert_eq!(short.tempo(), None);

    let seq = MetaEvent::new(MetaKind::SequenceNumber, &[0x00, 0x07]);
    assert_eq!(seq.sequence_number(), Ok(7));

    let bad_seq = MetaEvent::new(MetaKind::SequenceNumber, &[0x07]);
    assert_eq!(
        bad_seq.sequence_number(),
        Err(MetaError::Length {
            kind: MetaKind::SequenceNumber,
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn text_only_for_text_kinds() {
    use pretty_assertions::assert_eq;
    let name = MetaEvent::new(MetaKind::TrackName, b"Piano");
    assert_eq!(name.text(), Some(&b"Piano"[..]));
    assert_eq!(name.text_lossy().as_deref(), Some("Piano"));

    let eot = MetaEvent::new(MetaKind::EndOfTrack, &[]);
    assert_eq!(eot.text(), None);
}
