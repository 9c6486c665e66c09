use crate::{
    file::MetaKind,
    message::{NoteEvent, SystemKind},
};

#[doc = r#"
Receives a [`Timeline`](crate::Timeline)'s events in time order.

Every method has an empty default, so a sink only implements what it
cares about. `seconds` is the event's absolute time and `track` its
track index.

```rust
# use smf_timeline::prelude::*;
#[derive(Default)]
struct NoteCounter(usize);

impl EventSink for NoteCounter {
    fn note(&mut self, _seconds: f64, _track: usize, note: &NoteEvent) {
        if note.is_sounding_note_on() {
            self.0 += 1;
        }
    }
}
```
"#]
pub trait EventSink {
    /// A channel event
    fn note(&mut self, seconds: f64, track: usize, note: &NoteEvent) {
        let _ = (seconds, track, note);
    }
    /// A system real-time event
    fn system(&mut self, seconds: f64, track: usize, kind: SystemKind) {
        let _ = (seconds, track, kind);
    }
    /// A meta event and its raw payload
    fn meta(&mut self, seconds: f64, track: usize, kind: MetaKind, data: &[u8]) {
        let _ = (seconds, track, kind, data);
    }
    /// A system exclusive packet
    fn sysex(&mut self, seconds: f64, track: usize, data: &[u8]) {
        let _ = (seconds, track, data);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn note(&mut self, seconds: f64, track: usize, note: &NoteEvent) {
        (**self).note(seconds, track, note)
    }
    fn system(&mut self, seconds: f64, track: usize, kind: SystemKind) {
        (**self).system(seconds, track, kind)
    }
    fn meta(&mut self, seconds: f64, track: usize, kind: MetaKind, data: &[u8]) {
        (**self).meta(seconds, track, kind, data)
    }
    fn sysex(&mut self, seconds: f64, track: usize, data: &[u8]) {
        (**self).sysex(seconds, track, data)
    }
}
