/// An event placed on a track's clock.
///
/// `tick` is the absolute tick count from the start of the track and
/// `seconds` is the elapsed time at that tick under the tempo in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Timed<T> {
    /// Absolute ticks from the start of the track
    pub tick: u64,
    /// Absolute seconds from the start of the track
    pub seconds: f64,
    /// The event
    pub event: T,
}

impl<T> Timed<T> {
    /// Create a new timed event
    pub const fn new(tick: u64, seconds: f64, event: T) -> Self {
        Self {
            tick,
            seconds,
            event,
        }
    }

    /// The event
    pub const fn event(&self) -> &T {
        &self.event
    }
}
