#![doc = r#"
Channel (note-family) events

The status byte of a channel event carries the event class in its high
nibble and the channel in its low nibble:

```text
 status byte        data bytes
|1 k k k|c c c c|  |0 p p p p p p p|  |0 q q q q q q q|
  class   channel      param 1            param 2 (most classes)
```
"#]
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen MIDI channels.

Channels are numbered `0..=15` on the wire; the variants are named the
way musicians count them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Get the channel from the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        use Channel::*;
        match status & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The wire value, `0..=15`
    pub fn index(self) -> u8 {
        self.into()
    }
}

/// The class of a channel event, as found in the status byte's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NoteKind {
    /// `0x8n`: key, release velocity
    NoteOff = 0x8,
    /// `0x9n`: key, velocity
    NoteOn = 0x9,
    /// `0xAn`: key, pressure
    Aftertouch = 0xA,
    /// `0xBn`: controller number, value
    Controller = 0xB,
    /// `0xCn`: program
    ProgramChange = 0xC,
    /// `0xDn`: pressure
    ChannelPressure = 0xD,
    /// `0xEn`: LSB, MSB
    PitchBend = 0xE,
}

impl NoteKind {
    /// Identify the class from a full status byte.
    ///
    /// Returns `None` for `0x0n..=0x7n` and `0xFn`.
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// The number of data bytes that follow the status byte.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
A decoded channel event.

`param1` is the key, controller number, program or pressure depending
on [`NoteKind`]; `param2` is present only for the two-byte kinds.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteEvent {
    channel: Channel,
    kind: NoteKind,
    param1: u8,
    param2: Option<u8>,
}

impl NoteEvent {
    /// Create a one-byte event such as a program change.
    pub const fn new_short(channel: Channel, kind: NoteKind, param1: u8) -> Self {
        Self {
            channel,
            kind,
            param1,
            param2: None,
        }
    }

    /// Create a two-byte event such as a note on.
    pub const fn new(channel: Channel, kind: NoteKind, param1: u8, param2: u8) -> Self {
        Self {
            channel,
            kind,
            param1,
            param2: Some(param2),
        }
    }

    /// Build from a status byte and the data bytes that followed it.
    pub(crate) const fn from_parts(
        status: u8,
        kind: NoteKind,
        param1: u8,
        param2: Option<u8>,
    ) -> Self {
        Self {
            channel: Channel::from_status(status),
            kind,
            param1,
            param2,
        }
    }

    /// The channel the event is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }
    /// The event class
    pub const fn kind(&self) -> NoteKind {
        self.kind
    }
    /// The first data byte
    pub const fn param1(&self) -> u8 {
        self.param1
    }
    /// The second data byte, for two-byte kinds
    pub const fn param2(&self) -> Option<u8> {
        self.param2
    }

    /// The key for note on/off and aftertouch.
    pub const fn note(&self) -> Option<u8> {
        match self.kind {
            NoteKind::NoteOn | NoteKind::NoteOff | NoteKind::Aftertouch => Some(self.param1),
            _ => None,
        }
    }

    /// Velocity for note on/off.
    pub const fn velocity(&self) -> Option<u8> {
        match self.kind {
            NoteKind::NoteOn | NoteKind::NoteOff => self.param2,
            _ => None,
        }
    }

    /// The 14-bit pitch bend value, centered on `0x2000`.
    pub const fn pitch_bend(&self) -> Option<u16> {
        match (self.kind, self.param2) {
            (NoteKind::PitchBend, Some(msb)) => {
                Some(((msb as u16 & 0x7F) << 7) | (self.param1 as u16 & 0x7F))
            }
            _ => None,
        }
    }

    /// True for a note on with non-zero velocity.
    ///
    /// A note on with velocity 0 is a note off by MIDI convention.
    pub const fn is_sounding_note_on(&self) -> bool {
        matches!(
            (self.kind, self.param2),
            (NoteKind::NoteOn, Some(v)) if v > 0
        )
    }
}

#[test]
fn channel_from_low_nibble() {
    use pretty_assertions::assert_eq;
    assert_eq!(Channel::from_status(0x90), Channel::One);
    assert_eq!(Channel::from_status(0x99), Channel::Ten);
    assert_eq!(Channel::from_status(0xEF), Channel::Sixteen);
    assert_eq!(Channel::Ten.index(), 9);
}

#[test]
fn note_kind_from_status() {
    use pretty_assertions::assert_eq;
    assert_eq!(NoteKind::from_status(0x80), Some(NoteKind::NoteOff));
    assert_eq!(NoteKind::from_status(0xC3), Some(NoteKind::ProgramChange));
    assert_eq!(NoteKind::from_status(0xF8), None);
    assert_eq!(NoteKind::from_status(0x3C), None);
    assert_eq!(NoteKind::ChannelPressure.data_len(), 1);
    assert_eq!(NoteKind::PitchBend.data_len(), 2);
}

#[test]
fn accessors_by_kind() {
    use pretty_assertions::assert_eq;
    let on = NoteEvent::from_parts(0x91, NoteKind::NoteOn, 60, Some(100));
    assert_eq!(on.channel(), Channel::Two);
    assert_eq!(on.note(), Some(60));
    assert_eq!(on.velocity(), Some(100));
    assert!(on.is_sounding_note_on());

    let silent = NoteEvent::new(Channel::One, NoteKind::NoteOn, 60, 0);
    assert!(!silent.is_sounding_note_on());

    let program = NoteEvent::from_parts(0xC0, NoteKind::ProgramChange, 5, None);
    assert_eq!(program.param1(), 5);
    assert_eq!(program.param2(), None);
    assert_eq!(program.note(), None);

    let bend = NoteEvent::new(Channel::One, NoteKind::PitchBend, 0x00, 0x40);
    assert_eq!(bend.pitch_bend(), Some(0x2000));
}
