// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Ouster legacy lidar data packet layout.
//!
//! A packet is a fixed array of [`COLUMNS_PER_PACKET`] azimuth blocks
//! (columns), each holding one channel data block (point) per beam.  All
//! fields are little-endian and tightly packed on 4-byte words, so the
//! serialized size of a column is `20 + 12 * rows` bytes.
//!
//! ```text
//! ColumnRecord:
//!   u64 timestamp_ns          word 0,1
//!   u16 measurement_id        word 2[0:15]
//!   u16 frame_id              word 2[16:31]
//!   u32 encoder_count         word 3
//!   Point[rows]               3 words each
//!   u32 block_status          last word
//! Point:
//!   u32 distance_mm
//!   u16 reflectivity
//!   u16 signal_photons
//!   u16 noise_photons
//!   u16 unused
//! ```

use crate::error::Error;

/// Number of columns (azimuth blocks) in every data packet.
pub const COLUMNS_PER_PACKET: usize = 16;

/// Encoder ticks per full rotation of the sensor.
pub const ENCODER_TICKS_PER_REV: u32 = 90112;

/// Encoder count written to padding columns, one past the valid domain.
pub const PADDING_ENCODER_COUNT: u32 = ENCODER_TICKS_PER_REV;

/// Signal photon value marking a point as valid.
pub const SIGNAL_VALID: u16 = 0xFFFF;

/// Block status marking a column as valid.
pub const BLOCK_STATUS_VALID: u32 = 0xFFFF_FFFF;

/// Supported beam counts of the sensor family.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowCount {
    /// 16 beams.
    Rows16 = 16,
    /// 32 beams.
    Rows32 = 32,
    /// 64 beams.
    Rows64 = 64,
    /// 128 beams.
    Rows128 = 128,
}

impl RowCount {
    /// Number of beams as a usize for indexing.
    pub fn rows(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<u32> for RowCount {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(RowCount::Rows16),
            32 => Ok(RowCount::Rows32),
            64 => Ok(RowCount::Rows64),
            128 => Ok(RowCount::Rows128),
            _ => Err(Error::InvalidRowCount(value)),
        }
    }
}

/// Channel data block for a single beam.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Point {
    /// Range to the return in millimeters.
    pub distance_mm: u32,
    /// Calibrated reflectivity, not simulated.
    pub reflectivity: u16,
    /// Signal photons, [`SIGNAL_VALID`] marks a present return.
    pub signal_photons: u16,
    /// Ambient noise photons, not simulated.
    pub noise_photons: u16,
    /// Reserved.
    pub unused: u16,
}

impl Point {
    /// Length of a serialized point in bytes/octets.
    pub const LEN: usize = 12;

    /// A point carrying a measured distance and the valid signal marker.
    pub fn valid(distance_mm: u32) -> Point {
        Point {
            distance_mm,
            signal_photons: SIGNAL_VALID,
            ..Default::default()
        }
    }

    /// Appends the little-endian encoding of the point to `buf`.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.distance_mm.to_le_bytes());
        buf.extend_from_slice(&self.reflectivity.to_le_bytes());
        buf.extend_from_slice(&self.signal_photons.to_le_bytes());
        buf.extend_from_slice(&self.noise_photons.to_le_bytes());
        buf.extend_from_slice(&self.unused.to_le_bytes());
    }
}

/// Azimuth block holding every beam of one column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnRecord {
    /// Nanoseconds since the epoch when the column was built.
    pub timestamp: u64,
    /// Per-column sequence number, continuous across a frame.
    pub measurement_id: u16,
    /// Frame sequence number, constant across a frame.
    pub frame_id: u16,
    /// Azimuth in encoder ticks, or [`PADDING_ENCODER_COUNT`] for padding.
    pub encoder_count: u32,
    /// One point per beam.
    pub points: Vec<Point>,
    /// [`BLOCK_STATUS_VALID`] for measured columns, 0 for padding.
    pub block_status: u32,
}

impl ColumnRecord {
    /// Length of the column header (timestamp, ids, encoder) in bytes.
    pub const HEADER_LEN: usize = 16;
    /// Length of the trailing block status word in bytes.
    pub const STATUS_LEN: usize = 4;

    /// Serialized length of a column with the given beam count.
    pub const fn len(rows: usize) -> usize {
        Self::HEADER_LEN + rows * Point::LEN + Self::STATUS_LEN
    }

    /// Whether this column was inserted only to complete a packet.
    pub fn is_padding(&self) -> bool {
        self.encoder_count == PADDING_ENCODER_COUNT && self.block_status != BLOCK_STATUS_VALID
    }

    /// Appends the little-endian encoding of the column to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&self.measurement_id.to_le_bytes());
        buf.extend_from_slice(&self.frame_id.to_le_bytes());
        buf.extend_from_slice(&self.encoder_count.to_le_bytes());
        for point in &self.points {
            point.write_to(buf);
        }
        buf.extend_from_slice(&self.block_status.to_le_bytes());
    }
}

/// One UDP datagram worth of columns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Packet {
    /// Columns in transmission order, [`COLUMNS_PER_PACKET`] once sealed.
    pub columns: Vec<ColumnRecord>,
}

impl Default for Packet {
    fn default() -> Self {
        Packet::new()
    }
}

impl Packet {
    /// An empty packet with room for a full set of columns.
    pub fn new() -> Packet {
        Packet {
            columns: Vec::with_capacity(COLUMNS_PER_PACKET),
        }
    }

    /// Serialized length of a packet with the given beam count.
    pub const fn len(rows: usize) -> usize {
        COLUMNS_PER_PACKET * ColumnRecord::len(rows)
    }

    /// Whether all columns of the packet are present.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.columns.len() == COLUMNS_PER_PACKET
    }

    /// Whether the packet holds no columns yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of padding columns in the packet.
    pub fn padding(&self) -> usize {
        self.columns.iter().filter(|c| c.is_padding()).count()
    }

    /// Serializes the packet into `buf`, clearing it first.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.clear();
        for column in &self.columns {
            column.write_to(buf);
        }
    }
}
