use pretty_assertions::assert_eq;
use smf_timeline::{
    file::{ChunkKind, decode_header, read_chunk},
    prelude::*,
    reader::{ChunkError, HeaderError, Limit},
};

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = id.to_vec();
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn header(format: u16, tracks: u16, division: u16) -> Vec<u8> {
    let mut payload = format.to_be_bytes().to_vec();
    payload.extend_from_slice(&tracks.to_be_bytes());
    payload.extend_from_slice(&division.to_be_bytes());
    chunk(b"MThd", &payload)
}

const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

fn track(body: &[u8]) -> Vec<u8> {
    let mut payload = body.to_vec();
    payload.extend_from_slice(&END_OF_TRACK);
    chunk(b"MTrk", &payload)
}

#[test]
fn header_round_trip() {
    let bytes = header(1, 2, 480);
    let (raw, rest) = read_chunk(&bytes).unwrap();
    assert!(rest.is_empty());
    assert_eq!(raw.kind(), ChunkKind::Header);

    let header = decode_header(&raw).unwrap();
    assert_eq!(header.format(), Format::MultiSimultaneous);
    assert_eq!(header.track_count(), 2);
    assert_eq!(header.timing(), Timing::new_ticks_per_quarter_note(480));
}

#[test]
fn consumed_bytes_cover_the_input() {
    let mut bytes = header(1, 2, 96);
    bytes.extend(track(&[0x00, 0x90, 0x3C, 0x40]));
    bytes.extend(chunk(b"XFIH", &[0xDE, 0xAD, 0xBE, 0xEF]));
    bytes.extend(track(&[]));
    bytes.extend(chunk(b"XFKM", &[]));

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.bytes_consumed(), bytes.len());
    assert_eq!(file.tracks().len(), 2);

    let ids: Vec<[u8; 4]> = file.unknown_chunks().iter().map(|c| c.id()).collect();
    assert_eq!(ids, [*b"XFIH", *b"XFKM"]);
    let unknown: usize = file.unknown_chunks().iter().map(|c| c.total_len()).sum();
    // header, a track with one note, an empty track
    assert_eq!(14 + 16 + 12 + unknown, bytes.len());
}

#[test]
fn note_on_at_time_zero() {
    let mut bytes = header(0, 1, 480);
    bytes.extend(track(&[0x00, 0x90, 0x3C, 0x40]));

    let file = MidiFile::parse(&bytes).unwrap();
    let events = file.tracks()[0].events();
    assert_eq!(events.len(), 2);

    let TrackMessage::Note(note) = events[0].message() else {
        panic!("expected a note, got {:?}", events[0]);
    };
    assert_eq!(events[0].delta_ticks(), 0);
    assert_eq!(note.kind(), NoteKind::NoteOn);
    assert_eq!(note.channel(), Channel::One);
    assert_eq!(note.note(), Some(60));
    assert_eq!(note.velocity(), Some(64));

    let timeline = file.timeline();
    assert_eq!(timeline.tracks()[0].events()[0].seconds, 0.0);
}

#[test]
fn running_status_file() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&[
        0x00, 0x90, 0x3C, 0x40, // note on
        0x10, 0x3E, 0x40, // running status note on
        0x10, 0x3C, 0x00, // running status, velocity 0
    ]));

    let file = MidiFile::parse(&bytes).unwrap();
    let keys: Vec<Option<u8>> = file.tracks()[0]
        .events()
        .iter()
        .map(|e| match e.message() {
            TrackMessage::Note(note) => note.note(),
            _ => None,
        })
        .collect();
    assert_eq!(keys, [Some(60), Some(62), Some(60), None]);

    let strict = DecodeOptions::default().running_status(false);
    let err = MidiFile::parse_with(&bytes, &strict).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::UnsupportedFeature("running status")
    );
    // header chunk (14) + track preamble (8) + first event (4) + delta (1)
    assert_eq!(err.position(), 27);
}

#[test]
fn truncated_file() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&[0x00, 0x90, 0x3C, 0x40]));
    bytes.truncate(bytes.len() - 3);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::TruncatedChunk {
            declared: 8,
            available: 5
        }
    );
    assert_eq!(err.position(), 14);
}

#[test]
fn truncated_preamble() {
    let mut bytes = header(0, 1, 96);
    bytes.extend_from_slice(b"MTr");
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn smpte_division_is_unsupported() {
    // -25 fps, 40 ticks per frame
    let bytes = header(0, 1, 0xE728);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::UnsupportedFeature("SMPTE division")
    );
}

#[test]
fn chunk_order_errors() {
    let kind = |bytes: &[u8]| MidiFile::parse(bytes).unwrap_err().error_kind().clone();

    assert_eq!(kind(&[]), ReaderErrorKind::Chunk(ChunkError::MissingHeader));

    let mut bytes = track(&[]);
    bytes.extend(header(0, 1, 96));
    assert_eq!(kind(&bytes), ReaderErrorKind::Chunk(ChunkError::TrackBeforeHeader));

    let mut bytes = header(0, 1, 96);
    bytes.extend(header(0, 1, 96));
    assert_eq!(kind(&bytes), ReaderErrorKind::Chunk(ChunkError::DuplicateHeader));

    assert_eq!(
        kind(&header(4, 1, 96)),
        ReaderErrorKind::Header(HeaderError::InvalidFormat(4))
    );
}

#[test]
fn limits() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&[0x00, 0x90, 0x3C, 0x40, 0x00, 0x80, 0x3C, 0x00]));

    let small = DecodeOptions::default().max_input_len(16);
    assert_eq!(
        MidiFile::parse_with(&bytes, &small).unwrap_err().error_kind(),
        &ReaderErrorKind::LimitExceeded(Limit::InputLength {
            len: bytes.len(),
            max: 16
        })
    );

    let few = DecodeOptions::default().max_events_per_track(2);
    let err = MidiFile::parse_with(&bytes, &few).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::LimitExceeded(Limit::EventsPerTrack { max: 2 })
    );
    // the end of track event, third in the track
    assert_eq!(err.position(), 14 + 8 + 8);
}

#[test]
fn meta_payloads() {
    let mut bytes = header(0, 1, 96);
    bytes.extend(track(&[
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', // track name
        0x00, 0xFF, 0x59, 0x02, 0xFE, 0x01, // two flats, minor
        0x00, 0xFF, 0x21, 0x01, 0x00, // port
    ]));

    let file = MidiFile::parse(&bytes).unwrap();
    let track = &file.tracks()[0];
    assert_eq!(track.name(), Some(&b"Lead"[..]));

    let metas: Vec<MetaEvent<'_>> = track
        .events()
        .iter()
        .filter_map(|e| match e.message() {
            TrackMessage::Meta(meta) => Some(*meta),
            _ => None,
        })
        .collect();
    assert_eq!(metas[0].text_lossy().as_deref(), Some("Lead"));
    assert_eq!(
        metas[1].key_signature().unwrap(),
        KeySignature {
            accidentals: -2,
            minor: true
        }
    );
    assert_eq!(metas[2].kind(), MetaKind::MidiPort);
    assert_eq!(metas[2].data(), &[0x00u8][..]);
    assert_eq!(metas[3].kind(), MetaKind::EndOfTrack);
}
