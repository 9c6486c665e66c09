use core::{cmp::Ordering, iter::FusedIterator, slice};

use itertools::{Itertools, structs::KMergeBy};

use crate::{
    file::TimedTrack,
    message::{Timed, TrackEvent},
};

type Entry<'t, 'a> = (usize, &'t Timed<TrackEvent<'a>>);

/// One track's events, tagged with the track's index.
#[derive(Debug, Clone)]
pub struct TrackCursor<'t, 'a> {
    index: usize,
    events: slice::Iter<'t, Timed<TrackEvent<'a>>>,
}

impl<'t, 'a> Iterator for TrackCursor<'t, 'a> {
    type Item = Entry<'t, 'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.events.next().map(|event| (self.index, event))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

fn earlier(a: &Entry<'_, '_>, b: &Entry<'_, '_>) -> bool {
    match a.1.seconds.total_cmp(&b.1.seconds) {
        Ordering::Equal => a.0 < b.0,
        ord => ord == Ordering::Less,
    }
}

#[doc = r#"
An iterator over every track's events at once, returned from
[`Timeline::merged`](crate::file::Timeline::merged).

Events come out by time. Events at the same time come out by track index,
and each track's own events keep their file order.
"#]
#[derive(Debug, Clone)]
pub struct TimedEventIterator<'t, 'a> {
    len_remaining: usize,
    inner: KMergeBy<TrackCursor<'t, 'a>, fn(&Entry<'t, 'a>, &Entry<'t, 'a>) -> bool>,
}

impl<'t, 'a> TimedEventIterator<'t, 'a> {
    pub(crate) fn new(tracks: &'t [TimedTrack<'a>]) -> Self {
        let len_remaining = tracks.iter().map(TimedTrack::len).sum();
        let cursors = tracks.iter().enumerate().map(|(index, track)| TrackCursor {
            index,
            events: track.events().iter(),
        });
        Self {
            len_remaining,
            inner: cursors.kmerge_by(earlier as fn(&Entry<'t, 'a>, &Entry<'t, 'a>) -> bool),
        }
    }
}

impl<'t, 'a> Iterator for TimedEventIterator<'t, 'a> {
    type Item = (usize, &'t Timed<TrackEvent<'a>>);
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        self.len_remaining -= 1;
        Some(next)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len_remaining, Some(self.len_remaining))
    }
}

impl ExactSizeIterator for TimedEventIterator<'_, '_> {}
impl FusedIterator for TimedEventIterator<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{FileHeader, Format, MetaEvent, MetaKind, build_timeline},
        message::{Channel, NoteEvent, NoteKind, TrackMessage},
    };
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn note_on(delta: u32, key: u8) -> TrackEvent<'static> {
        TrackEvent::new(
            delta,
            TrackMessage::Note(NoteEvent::new(Channel::One, NoteKind::NoteOn, key, 100)),
        )
    }

    fn timed<'a>(events: &[TrackEvent<'a>]) -> TimedTrack<'a> {
        let header = FileHeader::new(Format::MultiSimultaneous, 3, 480).unwrap();
        build_timeline(events, &header)
    }

    #[test]
    fn merge_by_time_then_track() {
        let tracks = [
            timed(&[note_on(0, 60), note_on(480, 61), note_on(480, 62)]),
            timed(&[note_on(240, 70), note_on(240, 71)]),
            timed(&[note_on(0, 80)]),
        ];
        let merged = TimedEventIterator::new(&tracks);
        assert_eq!(merged.len(), 6);

        let order: Vec<(usize, u8, f64)> = merged
            .map(|(track, timed)| match timed.event.message() {
                TrackMessage::Note(note) => (track, note.param1(), timed.seconds),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            order,
            [
                (0, 60, 0.0),
                (2, 80, 0.0),
                (1, 70, 0.25),
                (0, 61, 0.5),
                (1, 71, 0.5),
                (0, 62, 1.0),
            ]
        );
    }

    #[test]
    fn same_time_events_keep_file_order() {
        let end = TrackEvent::new(0, TrackMessage::Meta(MetaEvent::new(MetaKind::EndOfTrack, &[])));
        let tracks = [timed(&[note_on(0, 60), note_on(0, 61), end])];
        let kinds: Vec<_> = TimedEventIterator::new(&tracks)
            .map(|(_, timed)| timed.event.meta_kind())
            .collect();
        assert_eq!(kinds, [None, None, Some(MetaKind::EndOfTrack)]);
    }

    #[test]
    fn no_tracks() {
        let mut merged = TimedEventIterator::new(&[]);
        assert_eq!(merged.len(), 0);
        assert_eq!(merged.next(), None);
    }
}
