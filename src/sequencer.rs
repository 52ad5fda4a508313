// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::num::Wrapping;

/// Frame counter owned by the caller across invocations.
///
/// The counter only advances once a frame has been fully built and sent,
/// so a failed frame is retried with the same frame id.
#[derive(Clone, Debug, Default)]
pub struct FrameSequencer {
    counter: Wrapping<u32>,
}

impl FrameSequencer {
    /// Counter starting at frame 0.
    pub fn new() -> FrameSequencer {
        FrameSequencer::default()
    }

    /// Frame id for the next frame, the counter modulo 65536.
    #[inline]
    pub fn current(&self) -> u16 {
        (self.counter.0 % 65536) as u16
    }

    /// Number of frames published so far, wrapping at u32.
    pub fn frames(&self) -> u32 {
        self.counter.0
    }

    /// Moves to the next frame, called once a frame was fully sent.
    pub fn advance(&mut self) {
        self.counter += 1;
    }
}
