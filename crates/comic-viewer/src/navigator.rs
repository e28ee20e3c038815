//! Frame position tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current frame of a comic, 1-indexed and bounded by the frame count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNavigator {
    current: u32,
    frame_count: u32,
}

impl FrameNavigator {
    /// Navigator at frame 1. A frame count of 0 is treated as 1.
    pub fn new(frame_count: u32) -> Self {
        Self {
            current: 1,
            frame_count: frame_count.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.frame_count
    }

    pub fn position(&self) -> FramePosition {
        FramePosition {
            current: self.current,
            total: self.frame_count,
        }
    }

    /// Manual forward step; stays on the last frame.
    pub fn next(&mut self) -> u32 {
        self.advance(false)
    }

    /// Forward step used by auto-advance. At the last frame, wraps to 1 when
    /// `wrap` is set and stays put otherwise.
    pub fn advance(&mut self, wrap: bool) -> u32 {
        if self.current < self.frame_count {
            self.current += 1;
        } else if wrap {
            self.current = 1;
        }
        self.current
    }

    /// Backward step; stays on frame 1.
    pub fn previous(&mut self) -> u32 {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    pub fn reset(&mut self) -> u32 {
        self.current = 1;
        self.current
    }
}

/// Snapshot of a navigator position, rendered as `"current / total"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramePosition {
    pub current: u32,
    pub total: u32,
}

impl fmt::Display for FramePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current, self.total)
    }
}
