use num_enum::{IntoPrimitive, TryFromPrimitive};

/// System real-time messages, identified by their full status byte.
///
/// These carry no data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SystemKind {
    /// `0xF8`, sent 24 times per quarter note
    TimingClock = 0xF8,
    /// `0xFA`
    Start = 0xFA,
    /// `0xFB`
    Continue = 0xFB,
    /// `0xFC`
    Stop = 0xFC,
    /// `0xFE`
    ActiveSensing = 0xFE,
    /// `0xFF` on the wire. Inside a file this byte always starts a meta
    /// event, so the decoder never produces it.
    Reset = 0xFF,
}

/// A decoded system real-time event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemEvent {
    kind: SystemKind,
}

impl SystemEvent {
    /// Create a new system event
    pub const fn new(kind: SystemKind) -> Self {
        Self { kind }
    }

    /// Identify a real-time message from its status byte.
    pub fn from_status(status: u8) -> Option<Self> {
        SystemKind::try_from(status).ok().map(Self::new)
    }

    /// The message kind
    pub const fn kind(&self) -> SystemKind {
        self.kind
    }
}

#[test]
fn realtime_status_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SystemEvent::from_status(0xF8).map(|e| e.kind()),
        Some(SystemKind::TimingClock)
    );
    assert_eq!(
        SystemEvent::from_status(0xFC).map(|e| e.kind()),
        Some(SystemKind::Stop)
    );
    // undefined and system common bytes are not real-time
    assert_eq!(SystemEvent::from_status(0xF9), None);
    assert_eq!(SystemEvent::from_status(0xF2), None);
}
