use alloc::{collections::VecDeque, vec::Vec};

use crate::{file::Tempo, message::TrackEvent};

/// Which tempo changes apply to which tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TempoScope {
    /// Every track starts at [`Tempo::DEFAULT`] and follows only its own
    /// SetTempo events.
    #[default]
    PerTrack,
    /// The SetTempo events of the first track form a tempo map that every
    /// track follows by absolute tick. SetTempo events in other tracks are
    /// left in place but not applied.
    ///
    /// This is how sequencers play format 1 files. Format 0 and 2 files
    /// fall back to [`PerTrack`](Self::PerTrack).
    Conductor,
}

#[doc = r#"
The tempo cell of one track's timing pass.

It owns the current tempo and a running clock. The clock is kept as an
exact sum of `delta ticks × µs per quarter note`, and only converted to
seconds (dividing by `ticks per quarter note × 1 000 000`) when read, so
long tracks do not accumulate rounding error.

Tempo changes coming from another track (see [`TempoScope::Conductor`])
are scheduled by absolute tick and applied as the clock passes them.
"#]
#[derive(Debug, Clone)]
pub struct TempoTrack {
    current: Tempo,
    ticks_per_quarter_note: u16,
    tick: u64,
    elapsed: u128,
    scheduled: VecDeque<(u64, Tempo)>,
}

impl TempoTrack {
    /// Start a clock at tick 0 and the default tempo.
    pub fn new(ticks_per_quarter_note: u16) -> Self {
        Self {
            current: Tempo::DEFAULT,
            ticks_per_quarter_note: ticks_per_quarter_note.max(1),
            tick: 0,
            elapsed: 0,
            scheduled: VecDeque::new(),
        }
    }

    /// Start a clock that follows a tempo map of `(absolute tick, tempo)`.
    ///
    /// The map must be sorted by tick.
    pub fn with_tempo_map(
        ticks_per_quarter_note: u16,
        map: impl IntoIterator<Item = (u64, Tempo)>,
    ) -> Self {
        Self {
            scheduled: map.into_iter().collect(),
            ..Self::new(ticks_per_quarter_note)
        }
    }

    /// The tempo in effect
    pub fn current(&self) -> Tempo {
        self.current
    }

    /// Absolute ticks elapsed
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The duration of one tick at the current tempo.
    pub fn tick_duration_secs(&self) -> f64 {
        self.current.micros_per_quarter_note() as f64
            / self.ticks_per_quarter_note as f64
            / 1_000_000.
    }

    /// Seconds elapsed since tick 0.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed as f64 / (self.ticks_per_quarter_note as f64 * 1_000_000.)
    }

    /// Move the clock forward, passing any scheduled tempo changes.
    ///
    /// Returns the elapsed seconds at the new position.
    pub fn advance(&mut self, delta_ticks: u32) -> f64 {
        let target = self.tick + delta_ticks as u64;
        while let Some(&(at, tempo)) = self.scheduled.front() {
            if at > target {
                break;
            }
            self.run_until(at.max(self.tick));
            self.set(tempo);
            self.scheduled.pop_front();
        }
        self.run_until(target);
        self.elapsed_secs()
    }

    /// If `event` is a SetTempo meta event, use its tempo from now on.
    ///
    /// Returns true if the tempo was replaced.
    pub fn apply_if_tempo_change(&mut self, event: &TrackEvent<'_>) -> bool {
        match event.tempo() {
            Some(tempo) => {
                self.set(tempo);
                true
            }
            None => false,
        }
    }

    fn run_until(&mut self, tick: u64) {
        let ticks = tick - self.tick;
        self.elapsed += ticks as u128 * self.current.micros_per_quarter_note() as u128;
        self.tick = tick;
    }

    fn set(&mut self, tempo: Tempo) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            tick = self.tick,
            micros_per_quarter_note = tempo.micros_per_quarter_note(),
            "tempo change"
        );
        self.current = tempo;
    }
}

/// Collect the `(absolute tick, tempo)` of every SetTempo event in `events`.
pub fn tempo_map(events: &[TrackEvent<'_>]) -> Vec<(u64, Tempo)> {
    let mut tick = 0u64;
    events
        .iter()
        .filter_map(|event| {
            tick += event.delta_ticks() as u64;
            event.tempo().map(|tempo| (tick, tempo))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{MetaEvent, MetaKind},
        message::TrackMessage,
    };
    use pretty_assertions::assert_eq;

    const SLOW: [u8; 3] = [0x0F, 0x42, 0x40]; // 1 000 000 µs

    fn set_tempo(delta: u32, data: &[u8]) -> TrackEvent<'_> {
        TrackEvent::new(delta, TrackMessage::Meta(MetaEvent::new(MetaKind::SetTempo, data)))
    }

    #[test]
    fn default_tempo_is_half_a_second_per_quarter() {
        let mut tempo = TempoTrack::new(480);
        assert_eq!(tempo.current(), Tempo::DEFAULT);
        assert_eq!(tempo.advance(480), 0.5);
        assert_eq!(tempo.advance(960), 1.5);
        assert_eq!(tempo.tick(), 1440);
    }

    #[test]
    fn apply_only_set_tempo() {
        let mut tempo = TempoTrack::new(96);
        let text = TrackEvent::new(0, TrackMessage::Meta(MetaEvent::new(MetaKind::Text, &SLOW)));
        assert!(!tempo.apply_if_tempo_change(&text));
        assert_eq!(tempo.current(), Tempo::DEFAULT);

        assert!(tempo.apply_if_tempo_change(&set_tempo(0, &SLOW)));
        assert_eq!(tempo.current(), Tempo::new(1_000_000));
        assert!((tempo.tick_duration_secs() - 1. / 96.).abs() < 1e-12);
    }

    #[test]
    fn change_applies_going_forward() {
        let mut tempo = TempoTrack::new(480);
        assert_eq!(tempo.advance(480), 0.5);
        tempo.apply_if_tempo_change(&set_tempo(0, &SLOW));
        assert_eq!(tempo.advance(480), 1.5);
    }

    #[test]
    fn scheduled_changes_split_a_delta() {
        // slow down at tick 240 of a 480 tick delta
        let mut tempo = TempoTrack::with_tempo_map(480, [(240, Tempo::new(1_000_000))]);
        assert_eq!(tempo.advance(480), 0.75);
        assert_eq!(tempo.current(), Tempo::new(1_000_000));
        assert_eq!(tempo.advance(480), 1.75);
    }

    #[test]
    fn collect_tempo_map() {
        let fast: [u8; 3] = [0x03, 0xD0, 0x90]; // 250 000 µs
        let events = [
            set_tempo(0, &SLOW),
            TrackEvent::new(100, TrackMessage::Meta(MetaEvent::new(MetaKind::Marker, b"A"))),
            set_tempo(20, &fast),
        ];
        assert_eq!(
            tempo_map(&events),
            [(0, Tempo::new(1_000_000)), (120, Tempo::new(250_000))]
        );
    }
}
