use blender::models::mode::Mode;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive};

pub type Frame = i32;

/// Contiguous run of frames handled by one render task. Both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameChunk {
    pub start: Frame,
    pub end: Frame,
}

impl FrameChunk {
    pub fn new(start: Frame, end: Frame) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn single(frame: Frame) -> Self {
        Self::new(frame, frame)
    }

    pub fn frame_count(&self) -> usize {
        (self.end as i64 - self.start as i64 + 1) as usize
    }

    pub fn frames(&self) -> RangeInclusive<Frame> {
        self.start..=self.end
    }
}

impl fmt::Display for FrameChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl From<FrameChunk> for Mode {
    fn from(chunk: FrameChunk) -> Self {
        if chunk.start == chunk.end {
            Mode::Frame(chunk.start)
        } else {
            Mode::Section {
                start: chunk.start,
                end: chunk.end,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_frame_prints_without_dash() {
        assert_eq!(FrameChunk::single(10).to_string(), "10");
        assert_eq!(FrameChunk::new(10, 15).to_string(), "10-15");
    }

    #[test]
    fn converts_to_blender_mode() {
        assert_eq!(Mode::from(FrameChunk::single(4)), Mode::Frame(4));
        assert_eq!(
            Mode::from(FrameChunk::new(1, 5)).to_frame_arg(),
            "1..5".to_owned()
        );
    }

    #[test]
    fn frame_count_includes_both_ends() {
        assert_eq!(FrameChunk::new(6, 10).frame_count(), 5);
        assert_eq!(FrameChunk::new(6, 10).frames().count(), 5);
    }
}
