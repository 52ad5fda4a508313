// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing::level_filters::LevelFilter;

use beampub::net::{Destination, DEFAULT_LIDAR_PORT};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of beams (rows) in the range image: 16, 32, 64 or 128.
    #[arg(long, env, default_value = "64")]
    pub rows: u32,

    /// Number of columns in the range image.
    #[arg(long, env, default_value = "1024")]
    pub cols: u32,

    /// Start of the azimuth range in radians.
    #[arg(long, env, default_value_t = std::f32::consts::PI, allow_negative_numbers = true)]
    pub azimuth_start: f32,

    /// End of the azimuth range in radians.  Only reported, the start and
    /// resolution place the columns.
    #[arg(long, env, default_value_t = -std::f32::consts::PI, allow_negative_numbers = true)]
    pub azimuth_end: f32,

    /// Degrees between adjacent columns, defaults to a full circle over the
    /// column count.
    #[arg(long, env)]
    pub horizontal_resolution: Option<f32>,

    /// Destination IP address of the packets.
    #[arg(long, env, default_value = "127.0.0.1")]
    pub ip: String,

    /// Destination UDP port of the packets.
    #[arg(long, env, default_value_t = DEFAULT_LIDAR_PORT)]
    pub port: u16,

    /// Enable broadcast and multicast delivery.
    #[arg(long, env)]
    pub broadcast: bool,

    /// Socket send buffer size in bytes.
    #[arg(long, env)]
    pub send_buffer: Option<usize>,

    /// Reject frames whose encoder counts fall outside one rotation.
    #[arg(long, env)]
    pub strict_encoder: bool,

    /// Frames published per second.
    #[arg(long, env, default_value = "10", allow_negative_numbers = true)]
    pub rate: f64,

    /// Number of frames to publish, 0 publishes until interrupted.
    #[arg(long, env, default_value = "0")]
    pub frames: u64,

    /// Depth buffer in meters stored as a float32 .npy array of shape
    /// (cols, rows) or (cols * rows).
    #[arg(long, env)]
    pub depth: Option<PathBuf>,

    /// Constant range in meters used when no depth file is given.
    #[arg(long, env, default_value = "10")]
    pub range: f32,

    /// Application log level
    #[arg(long, env, default_value = "info")]
    pub rust_log: LevelFilter,

    /// Enable Tracy profiler broadcast
    #[arg(long, env)]
    pub tracy: bool,
}

impl Args {
    /// Horizontal resolution in degrees, explicit or derived from the
    /// column count.
    pub fn resolution(&self) -> f32 {
        match self.horizontal_resolution {
            Some(resolution) => resolution,
            None => 360.0 / self.cols.max(1) as f32,
        }
    }

    /// Publishing period derived from the rate, rejecting rates whose
    /// period is not a positive representable duration.
    pub fn period(&self) -> Result<Duration, String> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(format!("rate must be positive, not {}", self.rate));
        }

        match Duration::try_from_secs_f64(1.0 / self.rate) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(format!("rate {} Hz has no usable period", self.rate)),
        }
    }
}

impl From<&Args> for Destination {
    fn from(args: &Args) -> Self {
        Destination {
            ip: args.ip.clone(),
            port: args.port,
            broadcast: args.broadcast,
            send_buffer: args.send_buffer,
        }
    }
}
