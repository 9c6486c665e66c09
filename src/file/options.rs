use crate::file::TempoScope;

#[doc = r#"
Knobs for a single decode.

```rust
# use smf_timeline::prelude::*;
let options = DecodeOptions::default()
    .max_events_per_track(10_000)
    .tempo_scope(TempoScope::Conductor);
assert!(options.running_status_enabled());
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    pub(crate) max_input_len: usize,
    pub(crate) max_events_per_track: usize,
    pub(crate) running_status: bool,
    pub(crate) tempo_scope: TempoScope,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
            max_events_per_track: Self::DEFAULT_MAX_EVENTS_PER_TRACK,
            running_status: true,
            tempo_scope: TempoScope::PerTrack,
        }
    }
}

impl DecodeOptions {
    /// 64 MiB
    pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024 * 1024;
    /// 4 Mi events
    pub const DEFAULT_MAX_EVENTS_PER_TRACK: usize = 4 * 1024 * 1024;

    /// Inputs longer than this are rejected before decoding.
    pub fn max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }

    /// Tracks with more events than this are rejected.
    pub fn max_events_per_track(mut self, count: usize) -> Self {
        self.max_events_per_track = count;
        self
    }

    /// Whether a data byte may stand in for a repeated status byte.
    pub fn running_status(mut self, enabled: bool) -> Self {
        self.running_status = enabled;
        self
    }

    /// Which tempo changes apply to which tracks.
    pub fn tempo_scope(mut self, scope: TempoScope) -> Self {
        self.tempo_scope = scope;
        self
    }

    /// True if running status is accepted
    pub fn running_status_enabled(&self) -> bool {
        self.running_status
    }

    /// The configured tempo scope
    pub fn scope(&self) -> TempoScope {
        self.tempo_scope
    }
}
