use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The first word of the header chunk: how the file's tracks relate.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0: one track holding every channel
    SingleTrack = 0,
    /// Format 1: tracks played together, sharing one tempo map by convention
    MultiSimultaneous = 1,
    /// Format 2: independent single-track patterns
    MultiIndependent = 2,
}
