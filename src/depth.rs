// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use ndarray::{Array2, ArrayView1};

use crate::{error::Error, ouster::RowCount};

/// Range image in integer millimeters, indexed as `[column, row]`.
///
/// The simulator stores its depth buffer column-major (`column * rows +
/// row`) with columns ordered right-to-left, which maps directly onto a
/// standard layout array of shape `(cols, rows)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthImage {
    data: Array2<u32>,
}

impl DepthImage {
    /// Converts a depth buffer in meters to millimeters.
    ///
    /// Samples are truncated toward zero.  Negative and NaN samples saturate
    /// to zero and samples beyond the u32 range saturate to `u32::MAX`.
    pub fn from_meters(rows: RowCount, cols: usize, meters: &[f32]) -> Result<DepthImage, Error> {
        let expected = rows.rows() * cols;
        if meters.len() != expected {
            return Err(Error::InvalidDepthLength {
                expected,
                actual: meters.len(),
            });
        }

        let data = Array2::from_shape_fn((cols, rows.rows()), |(col, row)| {
            to_millimeters(meters[col * rows.rows() + row])
        });

        Ok(DepthImage { data })
    }

    /// Number of beams per column.
    pub fn rows(&self) -> usize {
        self.data.ncols()
    }

    /// Number of columns in the sweep.
    pub fn cols(&self) -> usize {
        self.data.nrows()
    }

    /// Millimeter ranges of every beam in one source column.
    #[inline]
    pub fn column(&self, index: usize) -> ArrayView1<'_, u32> {
        self.data.row(index)
    }
}

#[inline]
fn to_millimeters(meters: f32) -> u32 {
    (meters as f64 * 1000.0) as u32
}
