// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::{mem, num::Wrapping};

use tracing::instrument;

use crate::{
    angle::{column_step, encoder_tick, raw_encoder_tick},
    column::{build_column, build_padding},
    depth::DepthImage,
    error::Error,
    ouster::{Packet, ENCODER_TICKS_PER_REV},
};

/// Azimuth sweep of the simulated sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sweep {
    /// Start of the azimuth range in radians.  The end of the range is not
    /// needed to place columns.
    pub azimuth_start: f32,
    /// Degrees between adjacent columns.
    pub horizontal_resolution: f32,
}

/// Transmission order of the source columns.
///
/// Yields `(ordinal, column)` pairs where `ordinal` walks down from
/// `center + cols` to `center + 1` and `column` is the ordinal wrapped into
/// the source buffer.  Starting just past the center and wrapping through
/// the full circle visits every column once while the ordinal, and
/// therefore the encoder angle, increases monotonically.
pub fn walk_order(cols: usize) -> impl Iterator<Item = (i64, usize)> {
    let (first, last) = match cols {
        0 => (1, 0),
        _ => {
            let center = (cols - 1) / 2;
            (center + 1, center + cols)
        }
    };

    (first..=last)
        .rev()
        .map(move |ordinal| (ordinal as i64, ordinal % cols))
}

/// Builds every packet of a frame in transmission order.
///
/// The final packet is completed with padding columns that continue the
/// measurement sequence.  With `strict_encoder` set, a real column whose
/// encoder tick falls outside the rotation domain aborts the frame.
#[instrument(skip_all, fields(cols = depth.cols(), rows = depth.rows(), frame_id = frame_id))]
pub fn build_packets(
    depth: &DepthImage,
    sweep: &Sweep,
    frame_id: u16,
    strict_encoder: bool,
) -> Result<Vec<Packet>, Error> {
    let step = column_step(sweep.horizontal_resolution);
    let mut packets = Vec::with_capacity(packet_count(depth.cols()));
    let mut packet = Packet::new();
    let mut measurement_id = Wrapping(0u16);

    for (ordinal, column) in walk_order(depth.cols()) {
        if strict_encoder {
            let tick = raw_encoder_tick(sweep.azimuth_start, step, ordinal);
            if !(0..ENCODER_TICKS_PER_REV as i64).contains(&tick) {
                return Err(Error::EncoderOutOfRange(tick));
            }
        }

        packet.columns.push(build_column(
            depth,
            column,
            frame_id,
            measurement_id.0,
            encoder_tick(sweep.azimuth_start, step, ordinal),
        ));
        measurement_id += 1;

        if packet.is_full() {
            packets.push(mem::replace(&mut packet, Packet::new()));
        }
    }

    if !packet.is_empty() {
        while !packet.is_full() {
            packet
                .columns
                .push(build_padding(depth.rows(), frame_id, measurement_id.0));
            measurement_id += 1;
        }
        packets.push(packet);
    }

    Ok(packets)
}

/// Number of packets needed to carry `cols` columns.
pub fn packet_count(cols: usize) -> usize {
    cols.div_ceil(crate::ouster::COLUMNS_PER_PACKET)
}
