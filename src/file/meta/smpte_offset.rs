#![doc = r#"
SMPTE offset

An `FF 54 05 hr mn se fr ff` meta event gives the SMPTE time at which a
track is meant to start. The frame rate is packed into the hour byte:

```text
0 r r h h h h h
  | |  \______/
  | |     hours (0-23)
  rate: 00 = 24, 01 = 25, 10 = 29.97 (drop frame), 11 = 30
```
"#]

use super::{MetaError, MetaKind};
use crate::file::SmpteFps;

/// The SMPTE time a track starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate the frame and subframe fields count in
    pub fps: SmpteFps,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// Frame within the second
    pub frame: u8,
    /// Hundredths of a frame, 0-99
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse the five byte payload of an SmpteOffset meta event.
    pub fn parse(data: &[u8]) -> Result<Self, MetaError> {
        MetaError::check_len(MetaKind::SmpteOffset, 5, data)?;

        let fps = match data[0] >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(MetaError::SmpteFrameType(v)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(MetaError::SmpteHour(hour));
        }
        let (minute, second, frame, subframe) = (data[1], data[2], data[3], data[4]);
        if minute > 59 {
            return Err(MetaError::SmpteMinute(minute));
        }
        if second > 59 {
            return Err(MetaError::SmpteSecond(second));
        }
        if frame >= fps.as_division() {
            return Err(MetaError::SmpteFrame(frame));
        }
        if subframe > 99 {
            return Err(MetaError::SmpteSubframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The offset in seconds at the offset's own frame rate.
    pub fn as_secs(&self) -> f64 {
        let whole = self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32;
        let frames = self.frame as f64 + self.subframe as f64 / 100.;
        whole as f64 + frames / self.fps.as_f64()
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // bytes after 00 FF 54 05
    let offset = SmpteOffset::parse(&[0x41, 0x17, 0x2D, 0x0C, 0x22]).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
}

#[test]
fn smpte_offset_seconds() {
    // 25 fps, 00:01:02, frame 5, subframe 0
    let offset = SmpteOffset::parse(&[0x20, 0x01, 0x02, 0x05, 0x00]).unwrap();
    assert!((offset.as_secs() - 62.2).abs() < 1e-9);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]),
        Err(MetaError::SmpteHour(31))
    );
    assert_eq!(
        SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]),
        Err(MetaError::SmpteMinute(80))
    );
    assert_eq!(
        SmpteOffset::parse(&[0x80, 0x00, 0x00, 0x00, 0x00]),
        Err(MetaError::SmpteFrameType(4))
    );
    // 24 fps has frames 0-23
    assert_eq!(
        SmpteOffset::parse(&[0x00, 0x00, 0x00, 24, 0x00]),
        Err(MetaError::SmpteFrame(24))
    );
    assert!(matches!(
        SmpteOffset::parse(&[0x00, 0x00]),
        Err(MetaError::Length { found: 2, .. })
    ));
}
