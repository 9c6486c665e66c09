use alloc::vec::Vec;

use crate::{
    file::{DecodeOptions, MetaEvent, MetaKind},
    message::{NoteEvent, NoteKind, SystemEvent, TrackEvent, TrackMessage},
    reader::{Limit, ReadResult, Reader, ReaderError, ReaderErrorKind},
};

const META: u8 = 0xFF;
const SYSEX: u8 = 0xF0;
const SYSEX_ESCAPE: u8 = 0xF7;

#[doc = r#"
Decodes the event stream of one track payload.

Each record is a VLQ delta time, a status byte and a body whose length
depends on the status:

| status        | body                                  |
|---------------|---------------------------------------|
| `0x80..=0xEF` | 1 or 2 data bytes (see [`NoteKind`])  |
| `0xF0`,`0xF7` | VLQ length, then that many bytes      |
| `0xF8..=0xFE` | nothing                               |
| `0xFF`        | type byte, VLQ length, that many bytes|

A byte below `0x80` where a status is expected repeats the last channel
status (running status). Meta and sysex events cancel running status.
"#]
pub struct EventDecoder<'a, 'o> {
    reader: Reader<'a>,
    running_status: Option<u8>,
    decoded: usize,
    options: &'o DecodeOptions,
}

impl<'a, 'o> EventDecoder<'a, 'o> {
    /// Decode `payload`, reporting errors relative to `base`.
    pub fn new(payload: &'a [u8], base: usize, options: &'o DecodeOptions) -> Self {
        Self {
            reader: Reader::with_base(payload, base),
            running_status: None,
            decoded: 0,
            options,
        }
    }

    /// Bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.reader.position()
    }

    /// Decode every event until the payload is exhausted.
    pub fn decode_all(mut self) -> ReadResult<Vec<TrackEvent<'a>>> {
        let estimate = (self.reader.remaining() / 4).min(self.options.max_events_per_track);
        let mut events = Vec::with_capacity(estimate);
        while let Some(event) = self.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    /// Decode the next event, or `None` at the end of the payload.
    pub fn next_event(&mut self) -> ReadResult<Option<TrackEvent<'a>>> {
        if self.reader.is_empty() {
            return Ok(None);
        }
        if self.decoded >= self.options.max_events_per_track {
            return Err(self.reader.error(ReaderErrorKind::LimitExceeded(
                Limit::EventsPerTrack {
                    max: self.options.max_events_per_track,
                },
            )));
        }

        let event_start = self.reader.buffer_position();
        let delta_ticks = self.reader.read_var_int()?;
        let status = self.read_status()?;

        let message = match status {
            META => {
                self.running_status = None;
                TrackMessage::Meta(self.read_meta(event_start)?)
            }
            SYSEX | SYSEX_ESCAPE => {
                self.running_status = None;
                TrackMessage::SystemExclusive(self.read_sized_body()?)
            }
            0xF1..=0xFE => match SystemEvent::from_status(status) {
                Some(system) => TrackMessage::System(system),
                None => return Err(self.status_error(status)),
            },
            _ => match NoteKind::from_status(status) {
                Some(kind) => {
                    let param1 = self.read_data_byte(kind, 0)?;
                    let param2 = match kind.data_len() {
                        2 => Some(self.read_data_byte(kind, 1)?),
                        _ => None,
                    };
                    self.running_status = Some(status);
                    TrackMessage::Note(NoteEvent::from_parts(status, kind, param1, param2))
                }
                None => return Err(self.status_error(status)),
            },
        };

        self.decoded += 1;
        Ok(Some(TrackEvent::new(delta_ticks, message)))
    }

    fn truncated(needed: usize) -> impl FnOnce(usize) -> ReaderErrorKind {
        move |available| ReaderErrorKind::TruncatedEvent { needed, available }
    }

    /// Error for the status byte just consumed
    fn status_error(&self, status: u8) -> ReaderError {
        ReaderError::new(
            self.reader.buffer_position() - 1,
            ReaderErrorKind::UnknownEventClass(status),
        )
    }

    fn read_status(&mut self) -> ReadResult<u8> {
        let at = self.reader.buffer_position();
        let byte = self
            .reader
            .peek_u8()
            .map_err(|_| self.reader.error(ReaderErrorKind::TruncatedEvent {
                needed: 1,
                available: 0,
            }))?;
        if byte & 0x80 != 0 {
            self.reader.read_u8()?;
            return Ok(byte);
        }

        // a data byte: leave it for the body and reuse the last status
        if !self.options.running_status {
            return Err(ReaderError::new(
                at,
                ReaderErrorKind::UnsupportedFeature("running status"),
            ));
        }
        self.running_status
            .ok_or(ReaderError::new(at, ReaderErrorKind::UnknownEventClass(byte)))
    }

    /// One channel data byte. A missing byte, or a status byte in its
    /// place, cuts the event short at that byte.
    fn read_data_byte(&mut self, kind: NoteKind, index: usize) -> ReadResult<u8> {
        match self.reader.peek_u8() {
            Ok(byte) if byte & 0x80 == 0 => self.reader.read_u8(),
            _ => Err(self.reader.error(ReaderErrorKind::TruncatedEvent {
                needed: kind.data_len(),
                available: index,
            })),
        }
    }

    fn read_body(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        self.reader.read_slice_or(len, Self::truncated(len))
    }

    fn read_sized_body(&mut self) -> ReadResult<&'a [u8]> {
        let len = self.reader.read_var_int()? as usize;
        self.read_body(len)
    }

    fn read_meta(&mut self, event_start: usize) -> ReadResult<MetaEvent<'a>> {
        let kind = MetaKind::from(self.read_body(1)?[0]);
        let data = self.read_sized_body()?;

        if kind == MetaKind::SetTempo && data.len() != 3 {
            return Err(ReaderError::new(
                event_start,
                ReaderErrorKind::MalformedMeta {
                    kind,
                    len: data.len(),
                },
            ));
        }
        Ok(MetaEvent::new(kind, data))
    }
}
