#![doc = r#"
Decode Standard MIDI Files into timestamped event timelines.

A `.mid` file is a sequence of chunks: one `MThd` header followed by
`MTrk` track chunks (and possibly vendor chunks, which are skipped).
Each track is a stream of delta-timed events. This crate frames the
chunks, decodes every event in file order, and then walks each track
with a tempo cell to turn ticks into seconds.

# Example
```rust
use smf_timeline::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, // header chunk
    0, 0, 0, 1, 0x01, 0xE0,             // format 0, one track, 480 tpqn
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 0x3C, 0x40,             // note on, C4
    0x83, 0x60, 0x80, 0x3C, 0x00,       // 480 ticks later, note off
    0x00, 0xFF, 0x2F, 0x00,             // end of track
];

let file = MidiFile::parse(&bytes).unwrap();
let timeline = file.timeline();

assert_eq!(timeline.tracks().len(), 1);
assert_eq!(timeline.duration_secs(), 0.5);
```
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod file;
pub mod message;
pub mod reader;

mod sink;
pub use sink::*;

pub use file::{MidiFile, Timeline};
pub use reader::{ReadResult, ReaderError, ReaderErrorKind};

#[doc = r#"
Commonly used types.

```rust
use smf_timeline::prelude::*;
```
"#]
pub mod prelude {
    pub use crate::file::{
        DecodeOptions, FileHeader, Format, KeySignature, MetaError, MetaEvent, MetaKind, MidiFile,
        SmpteFps, SmpteOffset, Tempo, TempoScope, TempoTrack, TicksPerQuarterNote, TimeSignature,
        TimedTrack, Timeline, Timing, Track,
    };
    pub use crate::message::{
        Channel, NoteEvent, NoteKind, SystemEvent, SystemKind, Timed, TrackEvent, TrackMessage,
    };
    pub use crate::reader::{ReadResult, ReaderError, ReaderErrorKind};
    pub use crate::sink::EventSink;
}
