// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! BeamPub Library
//!
//! This library converts simulated spinning lidar range images into Ouster
//! lidar data packets and publishes them over UDP, so that drivers and
//! tools written for the real sensor can consume simulator output.
//!
//! # Pipeline
//!
//! ```text
//! depth [m] ──► DepthImage [mm] ──► build_packets ──► send_packets ──► UDP
//!                                      │
//!                           walk order + encoder ticks
//! ```
//!
//! Each frame is validated, converted to millimeters, walked in ascending
//! encoder order, grouped into packets of 16 columns (the last one padded)
//! and sent as one datagram per packet.  The [`sequencer::FrameSequencer`]
//! is owned by the caller and only advances after a frame was fully sent.
//!
//! # Example
//!
//! ```ignore
//! use beampub::{
//!     chunker::Sweep,
//!     net::Destination,
//!     sequencer::FrameSequencer,
//!     synth::{BeamFrame, BeamToOuster},
//! };
//!
//! let synth = BeamToOuster::new(Destination::new("127.0.0.1", 7502));
//! let mut sequencer = FrameSequencer::new();
//! let frame = BeamFrame {
//!     num_rows: 64,
//!     num_cols: 1024,
//!     depth: &depth,
//!     sweep: Sweep { azimuth_start: PI, horizontal_resolution: 0.3515625 },
//! };
//!
//! if synth.compute(&mut sequencer, &frame).await {
//!     // trigger downstream
//! }
//! ```

#![warn(missing_docs)]

/// Angle to encoder tick conversion
pub mod angle;

/// Column ordering and packet grouping
pub mod chunker;

/// Column record construction
pub mod column;

/// Clock and socket utilities
pub mod common;

/// Millimeter range images
pub mod depth;

/// Error types
pub mod error;

/// UDP packet transmission
pub mod net;

/// Ouster lidar packet layout
pub mod ouster;

/// Frame counter
pub mod sequencer;

/// Frame synthesizer entry point
pub mod synth;

pub use error::Error;
