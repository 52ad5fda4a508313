// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    common::timestamp_ns,
    depth::DepthImage,
    ouster::{ColumnRecord, Point, BLOCK_STATUS_VALID, PADDING_ENCODER_COUNT},
};

/// Builds a column from one source column of the depth image.
///
/// `column_index` is the source (wrapped) index into the image, the encoder
/// count is computed by the caller from the walk ordinal.
pub fn build_column(
    depth: &DepthImage,
    column_index: usize,
    frame_id: u16,
    measurement_id: u16,
    encoder_count: u32,
) -> ColumnRecord {
    ColumnRecord {
        timestamp: timestamp_ns(),
        measurement_id,
        frame_id,
        encoder_count,
        points: depth
            .column(column_index)
            .iter()
            .map(|&mm| Point::valid(mm))
            .collect(),
        block_status: BLOCK_STATUS_VALID,
    }
}

/// Builds a filler column used to complete the last packet of a frame.
pub fn build_padding(rows: usize, frame_id: u16, measurement_id: u16) -> ColumnRecord {
    ColumnRecord {
        timestamp: timestamp_ns(),
        measurement_id,
        frame_id,
        encoder_count: PADDING_ENCODER_COUNT,
        points: vec![Point::default(); rows],
        block_status: 0,
    }
}
