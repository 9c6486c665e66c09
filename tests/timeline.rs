use pretty_assertions::assert_eq;
use smf_timeline::{file::build_timeline, prelude::*};

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = id.to_vec();
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// A ticks-per-quarter-note file with one `MTrk` per body.
fn file(format: u16, tpqn: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut payload = format.to_be_bytes().to_vec();
    payload.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    payload.extend_from_slice(&tpqn.to_be_bytes());
    let mut bytes = chunk(b"MThd", &payload);
    for body in tracks {
        bytes.extend(chunk(b"MTrk", body));
    }
    bytes
}

// 480 ticks is `0x83 0x60` as a VLQ, 240 is `0x81 0x70`
const SET_TEMPO_500K: [u8; 7] = [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
const SET_TEMPO_1M: [u8; 6] = [0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40];

fn seconds(track: &TimedTrack<'_>) -> Vec<f64> {
    track.events().iter().map(|t| t.seconds).collect()
}

#[test]
fn set_tempo_then_quarter_note_is_half_a_second() {
    let mut body = SET_TEMPO_500K.to_vec();
    body.extend_from_slice(&[0x83, 0x60, 0x90, 0x3C, 0x40]);
    let bytes = file(0, 480, &[&body]);

    let parsed = MidiFile::parse(&bytes).unwrap();
    let timeline = parsed.timeline();
    let track = &timeline.tracks()[0];

    assert_eq!(seconds(track), [0.0, 0.5]);
    assert_eq!(track.events()[1].tick, 480);
    assert_eq!(timeline.duration_secs(), 0.5);
}

#[test]
fn default_tempo_without_set_tempo() {
    let body = [
        0x00, 0x90, 0x3C, 0x40, // note on
        0x60, 0x80, 0x3C, 0x00, // note off
        0x81, 0x40, 0xFF, 0x2F, 0x00, // end of track
    ];
    let bytes = file(0, 96, &[&body]);
    let parsed = MidiFile::parse(&bytes).unwrap();

    // 96 ticks then 192 ticks at 500 000 µs per quarter note
    assert_eq!(seconds(&parsed.timeline().tracks()[0]), [0.0, 0.5, 1.5]);
}

#[test]
fn tempo_change_affects_only_later_events_of_its_track() {
    let mut first = vec![0x00, 0x90, 0x3C, 0x40, 0x83, 0x60, 0x80, 0x3C, 0x00];
    first.push(0x00);
    first.extend_from_slice(&SET_TEMPO_1M);
    first.extend_from_slice(&[0x83, 0x60, 0x90, 0x3E, 0x40]);
    let second = [0x83, 0x60, 0x91, 0x40, 0x40, 0x83, 0x60, 0x81, 0x40, 0x00];
    let bytes = file(1, 480, &[&first, &second]);

    let parsed = MidiFile::parse(&bytes).unwrap();
    let timeline = parsed.timeline();

    assert_eq!(seconds(&timeline.tracks()[0]), [0.0, 0.5, 0.5, 1.5]);
    assert_eq!(seconds(&timeline.tracks()[1]), [0.5, 1.0]);
    // tracks play together: the longest one decides
    assert_eq!(timeline.duration_secs(), 1.5);
}

#[test]
fn conductor_scope_applies_track_zero_tempo_everywhere() {
    let mut conductor = vec![0x83, 0x60];
    conductor.extend_from_slice(&SET_TEMPO_1M);
    let melody = [0x83, 0x60, 0x90, 0x3C, 0x40, 0x83, 0x60, 0x80, 0x3C, 0x00];
    let bytes = file(1, 480, &[&conductor, &melody]);

    let parsed = MidiFile::parse(&bytes).unwrap();
    assert_eq!(seconds(&parsed.timeline().tracks()[1]), [0.5, 1.0]);

    let conducted = parsed.timeline_with(TempoScope::Conductor);
    assert_eq!(seconds(&conducted.tracks()[1]), [0.5, 1.5]);

    let options = DecodeOptions::default().tempo_scope(TempoScope::Conductor);
    let parsed = MidiFile::parse_with(&bytes, &options).unwrap();
    assert_eq!(parsed.timeline(), conducted);
}

#[test]
fn conductor_scope_needs_a_format_one_file() {
    let mut conductor = vec![0x83, 0x60];
    conductor.extend_from_slice(&SET_TEMPO_1M);
    let melody = [0x83, 0x60, 0x90, 0x3C, 0x40, 0x83, 0x60, 0x80, 0x3C, 0x00];
    let bytes = file(2, 480, &[&conductor, &melody]);

    let parsed = MidiFile::parse(&bytes).unwrap();
    assert_eq!(
        parsed.timeline_with(TempoScope::Conductor),
        parsed.timeline_with(TempoScope::PerTrack)
    );
}

#[test]
fn build_timeline_from_decoded_events() {
    let bytes = file(0, 480, &[&[0x00, 0x90, 0x3C, 0x40, 0x81, 0x70, 0x80, 0x3C, 0x00]]);
    let parsed = MidiFile::parse(&bytes).unwrap();

    let track = build_timeline(parsed.tracks()[0].events(), parsed.header());
    assert_eq!(seconds(&track), [0.0, 0.25]);
    assert_eq!(track.time_signature(), TimeSignature::default());
}

#[derive(Default)]
struct Recorder {
    calls: Vec<(f64, usize, String)>,
}

impl EventSink for Recorder {
    fn note(&mut self, seconds: f64, track: usize, note: &NoteEvent) {
        let label = format!("{:?} {:?}", note.kind(), note.note());
        self.calls.push((seconds, track, label));
    }
    fn system(&mut self, seconds: f64, track: usize, kind: SystemKind) {
        self.calls.push((seconds, track, format!("{kind:?}")));
    }
    fn meta(&mut self, seconds: f64, track: usize, kind: MetaKind, data: &[u8]) {
        self.calls.push((seconds, track, format!("{kind:?} {data:?}")));
    }
    fn sysex(&mut self, seconds: f64, track: usize, data: &[u8]) {
        self.calls.push((seconds, track, format!("sysex {}", data.len())));
    }
}

#[test]
fn dispatch_in_time_order() {
    let first = [
        0x00, 0x90, 0x3C, 0x40, // note on
        0x83, 0x60, 0xFF, 0x2F, 0x00, // end of track at 0.5 s
    ];
    let second = [
        0x00, 0xF0, 0x02, 0x7E, 0xF7, // sysex at 0
        0x81, 0x70, 0xF8, // clock at 0.25 s
        0x81, 0x70, 0x80, 0x3C, 0x00, // note off at 0.5 s
    ];
    let bytes = file(1, 480, &[&first, &second]);
    let parsed = MidiFile::parse(&bytes).unwrap();

    let mut recorder = Recorder::default();
    parsed.timeline().dispatch(&mut recorder);

    let expected: Vec<(f64, usize, String)> = vec![
        (0.0, 0, "NoteOn Some(60)".into()),
        (0.0, 1, "sysex 2".into()),
        (0.25, 1, "TimingClock".into()),
        (0.5, 0, "EndOfTrack []".into()),
        (0.5, 1, "NoteOff Some(60)".into()),
    ];
    assert_eq!(recorder.calls, expected);
}

#[test]
fn default_sink_methods_ignore_events() {
    struct Notes(usize);
    impl EventSink for Notes {
        fn note(&mut self, _seconds: f64, _track: usize, note: &NoteEvent) {
            if note.is_sounding_note_on() {
                self.0 += 1;
            }
        }
    }

    let body = [
        0x00, 0x90, 0x3C, 0x40, // sounding
        0x00, 0xFF, 0x01, 0x01, b'x', // text
        0x00, 0x90, 0x3E, 0x00, // velocity 0
    ];
    let bytes = file(0, 96, &[&body]);
    let parsed = MidiFile::parse(&bytes).unwrap();
    let mut notes = Notes(0);
    parsed.timeline().dispatch(&mut notes);
    assert_eq!(notes.0, 1);
}
