// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::f64::consts::TAU;

use crate::ouster::ENCODER_TICKS_PER_REV;

/// Encoder ticks per radian of rotation.
pub const TICKS_PER_RADIAN: f64 = ENCODER_TICKS_PER_REV as f64 / TAU;

/// Angular step between adjacent walk ordinals in radians.
///
/// Negative because the walk ordinal decreases as the encoder angle
/// increases; the source buffer is stored right-to-left.
pub fn column_step(horizontal_resolution_deg: f32) -> f64 {
    -(horizontal_resolution_deg as f64).to_radians()
}

/// Raw (unwrapped) encoder tick for a walk ordinal.
///
/// The azimuth start is shifted by a full turn before the step is applied.
/// The result is floored and not reduced modulo a rotation, so inconsistent
/// sweep parameters yield ticks outside `[0, 90112]`.  NaN inputs yield 0.
#[inline]
pub fn raw_encoder_tick(azimuth_start: f32, step: f64, ordinal: i64) -> i64 {
    let angle = azimuth_start as f64 + TAU + step * ordinal as f64;
    (angle * TICKS_PER_RADIAN).floor() as i64
}

/// Encoder tick for a walk ordinal as written on the wire.
///
/// Out of domain values are passed through with two's complement
/// truncation to 32 bits rather than clamped.
#[inline]
pub fn encoder_tick(azimuth_start: f32, step: f64, ordinal: i64) -> u32 {
    raw_encoder_tick(azimuth_start, step, ordinal) as u32
}
