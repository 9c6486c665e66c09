use alloc::vec::Vec;

use crate::{
    EventSink,
    file::{FileHeader, MetaKind, Tempo, TempoTrack, TimeSignature, TimedEventIterator, tempo_map},
    message::{Timed, TrackEvent, TrackMessage},
};

/// One track's events placed on its clock, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimedTrack<'a> {
    events: Vec<Timed<TrackEvent<'a>>>,
    duration_secs: f64,
    time_signature: TimeSignature,
}

impl<'a> TimedTrack<'a> {
    /// The timed events, in file order and non-decreasing time
    pub fn events(&self) -> &[Timed<TrackEvent<'a>>] {
        &self.events
    }

    /// The time of the last event
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// The time signature in effect at the end of the track
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[doc = r#"
Every track of a file placed on its own clock.

Track `i` here is track `i` of the file. The file's duration is the
longest track duration, since tracks play alongside each other.

```rust
# use smf_timeline::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x00, 0x60,
    b'M', b'T', b'r', b'k', 0, 0, 0, 8,
    0x00, 0x90, 0x3C, 0x40, // note on at tick 0
    0x60, 0xFF, 0x2F, 0x00, // end of track 96 ticks later
];
let file = MidiFile::parse(&bytes).unwrap();
let timeline = file.timeline();

let (track, first) = timeline.merged().next().unwrap();
assert_eq!((track, first.seconds), (0, 0.0));
assert_eq!(timeline.duration_secs(), 0.5);
```
"#]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Timeline<'a> {
    tracks: Vec<TimedTrack<'a>>,
    duration_secs: f64,
}

impl<'a> Timeline<'a> {
    /// Gather timed tracks, in file order.
    pub fn new(tracks: Vec<TimedTrack<'a>>) -> Self {
        let duration_secs = tracks
            .iter()
            .map(TimedTrack::duration_secs)
            .fold(0., f64::max);
        Self {
            tracks,
            duration_secs,
        }
    }

    /// The timed tracks, in file order
    pub fn tracks(&self) -> &[TimedTrack<'a>] {
        &self.tracks
    }

    /// The longest track duration, or 0 for a file without tracks
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// All events of all tracks as `(track index, event)`, by time.
    pub fn merged(&self) -> TimedEventIterator<'_, 'a> {
        TimedEventIterator::new(&self.tracks)
    }

    /// Feed every event, by time, to `sink`.
    pub fn dispatch<S: EventSink + ?Sized>(&self, sink: &mut S) {
        for (track, timed) in self.merged() {
            let seconds = timed.seconds;
            match timed.event.message() {
                TrackMessage::Note(note) => sink.note(seconds, track, note),
                TrackMessage::System(system) => sink.system(seconds, track, system.kind()),
                TrackMessage::Meta(meta) => sink.meta(seconds, track, meta.kind(), meta.data()),
                TrackMessage::SystemExclusive(data) => sink.sysex(seconds, track, data),
            }
        }
    }
}

#[doc = r#"
Walks a track's events in file order and timestamps them.

For each event the clock first advances by the event's delta at the tempo
in effect, then the event is recorded, then, if it is a SetTempo event,
the tempo changes for every later delta.
"#]
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    tempo: TempoTrack,
    follow_own_tempo: bool,
    time_signature: TimeSignature,
}

impl TimelineBuilder {
    /// A builder that starts at the default tempo and follows the track's
    /// own SetTempo events.
    pub fn new(header: &FileHeader) -> Self {
        Self {
            tempo: TempoTrack::new(header.ticks_per_quarter_note()),
            follow_own_tempo: true,
            time_signature: TimeSignature::default(),
        }
    }

    /// A builder that follows an external `(absolute tick, tempo)` map and
    /// ignores the track's own SetTempo events.
    pub fn with_tempo_map(
        header: &FileHeader,
        map: impl IntoIterator<Item = (u64, Tempo)>,
    ) -> Self {
        Self {
            tempo: TempoTrack::with_tempo_map(header.ticks_per_quarter_note(), map),
            follow_own_tempo: false,
            time_signature: TimeSignature::default(),
        }
    }

    /// Timestamp every event of a track.
    pub fn build<'a>(mut self, events: &[TrackEvent<'a>]) -> TimedTrack<'a> {
        let mut timed = Vec::with_capacity(events.len());
        for event in events {
            let seconds = self.tempo.advance(event.delta_ticks());
            timed.push(Timed::new(self.tempo.tick(), seconds, *event));
            self.observe(event);
        }
        TimedTrack {
            events: timed,
            duration_secs: self.tempo.elapsed_secs(),
            time_signature: self.time_signature,
        }
    }

    fn observe(&mut self, event: &TrackEvent<'_>) {
        let TrackMessage::Meta(meta) = event.message() else {
            return;
        };
        match meta.kind() {
            MetaKind::SetTempo if self.follow_own_tempo => {
                self.tempo.apply_if_tempo_change(event);
            }
            MetaKind::SetTempo => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    tick = self.tempo.tick(),
                    "ignoring track tempo change, following the conductor track"
                );
            }
            MetaKind::TimeSignature => match meta.time_signature() {
                Ok(signature) => self.time_signature = signature,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        tick = self.tempo.tick(),
                        error = %_e,
                        "skipping time signature"
                    );
                }
            },
            _ => {}
        }
    }
}

/// Timestamp a track's events using the default tempo and its own tempo changes.
pub fn build_timeline<'a>(events: &[TrackEvent<'a>], header: &FileHeader) -> TimedTrack<'a> {
    TimelineBuilder::new(header).build(events)
}

/// Timestamp several tracks that share the first track's tempo map.
pub(crate) fn build_conductor_timelines<'a>(
    tracks: &[&[TrackEvent<'a>]],
    header: &FileHeader,
) -> Vec<TimedTrack<'a>> {
    let Some((conductor, rest)) = tracks.split_first() else {
        return Vec::new();
    };
    let map = tempo_map(conductor);
    let mut timed = Vec::with_capacity(tracks.len());
    timed.push(build_timeline(conductor, header));
    timed.extend(rest.iter().map(|events| {
        TimelineBuilder::with_tempo_map(header, map.iter().copied()).build(events)
    }));
    timed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{Format, MetaEvent},
        message::{Channel, NoteEvent, NoteKind},
    };
    use pretty_assertions::assert_eq;

    const SLOW: [u8; 3] = [0x0F, 0x42, 0x40];

    fn header(tpqn: u16) -> FileHeader {
        FileHeader::new(Format::MultiSimultaneous, 2, tpqn).unwrap()
    }

    fn note_on(delta: u32, key: u8) -> TrackEvent<'static> {
        TrackEvent::new(
            delta,
            TrackMessage::Note(NoteEvent::new(Channel::One, NoteKind::NoteOn, key, 100)),
        )
    }

    fn meta(delta: u32, kind: MetaKind, data: &[u8]) -> TrackEvent<'_> {
        TrackEvent::new(delta, TrackMessage::Meta(MetaEvent::new(kind, data)))
    }

    fn seconds(track: &TimedTrack<'_>) -> Vec<f64> {
        track.events().iter().map(|t| t.seconds).collect()
    }

    #[test]
    fn set_tempo_then_quarter_note() {
        let tempo: [u8; 3] = [0x07, 0xA1, 0x20];
        let events = [meta(0, MetaKind::SetTempo, &tempo), note_on(480, 60)];
        let track = build_timeline(&events, &header(480));

        assert_eq!(seconds(&track), [0.0, 0.5]);
        assert_eq!(track.events()[1].tick, 480);
        assert_eq!(track.duration_secs(), 0.5);
    }

    #[test]
    fn tempo_change_affects_only_later_deltas() {
        let events = [
            note_on(480, 60),
            // carried on a non-zero delta: that delta still runs at the old tempo
            meta(480, MetaKind::SetTempo, &SLOW),
            note_on(480, 62),
        ];
        let track = build_timeline(&events, &header(480));
        assert_eq!(seconds(&track), [0.5, 1.0, 2.0]);
    }

    #[test]
    fn every_event_kind_advances_the_clock() {
        let events = [
            note_on(0, 60),
            meta(240, MetaKind::Marker, b"verse"),
            meta(240, MetaKind::EndOfTrack, &[]),
        ];
        let track = build_timeline(&events, &header(480));
        assert_eq!(seconds(&track), [0.0, 0.25, 0.5]);
        assert_eq!(track.duration_secs(), 0.5);
    }

    #[test]
    fn empty_track_has_zero_duration() {
        let track = build_timeline(&[], &header(96));
        assert!(track.is_empty());
        assert_eq!(track.duration_secs(), 0.0);
    }

    #[test]
    fn last_time_signature_is_kept() {
        let events = [
            meta(0, MetaKind::TimeSignature, &[3, 2, 24, 8]),
            meta(0, MetaKind::TimeSignature, &[6, 3, 36, 8]),
            // malformed, ignored
            meta(0, MetaKind::TimeSignature, &[6]),
        ];
        let track = build_timeline(&events, &header(96));
        assert_eq!(
            track.time_signature(),
            TimeSignature {
                numerator: 6,
                denominator: 8,
                clocks_per_metronome_click: 36,
                thirty_seconds_per_quarter: 8
            }
        );
        assert_eq!(build_timeline(&[], &header(96)).time_signature(), TimeSignature::default());
    }

    #[test]
    fn file_duration_is_the_longest_track() {
        let tracks = [
            build_timeline(&[note_on(480, 60)], &header(480)),
            build_timeline(&[note_on(960, 60)], &header(480)),
            build_timeline(&[], &header(480)),
        ];
        let timeline = Timeline::new(tracks.to_vec());
        assert_eq!(timeline.duration_secs(), 1.0);
        assert_eq!(timeline.tracks().len(), 3);
        assert_eq!(Timeline::new(Vec::new()).duration_secs(), 0.0);
    }

    #[test]
    fn tempo_stays_inside_its_track() {
        let tracks = [
            build_timeline(&[meta(0, MetaKind::SetTempo, &SLOW), note_on(480, 60)], &header(480)),
            build_timeline(&[note_on(480, 60)], &header(480)),
        ];
        assert_eq!(seconds(&tracks[0]), [0.0, 1.0]);
        assert_eq!(seconds(&tracks[1]), [0.5]);
    }

    #[test]
    fn conductor_tempo_map_applies_to_other_tracks() {
        let conductor = [meta(480, MetaKind::SetTempo, &SLOW)];
        let fast: [u8; 3] = [0x03, 0xD0, 0x90];
        let melody = [
            note_on(480, 60),
            // ignored under the conductor
            meta(0, MetaKind::SetTempo, &fast),
            note_on(480, 62),
        ];
        let tracks = build_conductor_timelines(&[&conductor, &melody], &header(480));

        assert_eq!(tracks.len(), 2);
        assert_eq!(seconds(&tracks[0]), [0.5]);
        assert_eq!(seconds(&tracks[1]), [0.5, 0.5, 1.5]);
    }
}
