// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::{fmt, io};

/// Errors raised while encoding or sending a frame.
#[derive(Debug)]
pub enum Error {
    /// Socket creation, configuration or datagram send failed.
    Io(io::Error),
    /// Row count is not one of 16, 32, 64 or 128.
    InvalidRowCount(u32),
    /// Depth buffer length does not match rows * columns.
    InvalidDepthLength {
        /// Samples required by the frame shape.
        expected: usize,
        /// Samples supplied.
        actual: usize,
    },
    /// Encoder tick outside the sensor's rotation domain, only reported
    /// when strict encoder validation is enabled.
    EncoderOutOfRange(i64),
}

impl Error {
    /// Returns true for errors raised while acquiring the socket or
    /// sending datagrams.
    pub fn is_transmission(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {}", err),
            Error::InvalidRowCount(rows) => {
                write!(f, "row count must be either 16, 32, 64 or 128, not {}", rows)
            }
            Error::InvalidDepthLength { expected, actual } => {
                write!(
                    f,
                    "depth buffer holds {} samples, expected {}",
                    actual, expected
                )
            }
            Error::EncoderOutOfRange(tick) => {
                write!(
                    f,
                    "encoder count must be between 0 and {}, not {}",
                    crate::ouster::ENCODER_TICKS_PER_REV,
                    tick
                )
            }
        }
    }
}
