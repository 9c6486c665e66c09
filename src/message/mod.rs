#![doc = r#"
The events a track chunk decodes into

# Hierarchy
```text
                  |------------|
                  | TrackEvent |  delta ticks + message
                  |------------|
                        |
                 |--------------|
                 | TrackMessage |
                 |--------------|
       /           |          \             \
|-----------| |-------------| |-----------| |-----------------|
| NoteEvent | | SystemEvent | | MetaEvent | | SystemExclusive |
|-----------| |-------------| |-----------| |-----------------|
```
"#]

mod channel;
pub use channel::*;

mod system;
pub use system::*;

mod event;
pub use event::*;

mod timed;
pub use timed::*;
