// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use tracing::{debug, error, instrument};

use crate::{
    chunker::{build_packets, Sweep},
    depth::DepthImage,
    error::Error,
    net::{send_packets, Destination},
    ouster::{Packet, RowCount},
    sequencer::FrameSequencer,
};

/// One simulated range image as handed over by the caller.
#[derive(Clone, Debug)]
pub struct BeamFrame<'a> {
    /// Beams per column, one of 16, 32, 64 or 128.
    pub num_rows: u32,
    /// Columns in the sweep.
    pub num_cols: u32,
    /// Ranges in meters indexed as `column * num_rows + row`, columns
    /// ordered right-to-left.
    pub depth: &'a [f32],
    /// Azimuth placement of the columns.
    pub sweep: Sweep,
}

/// Summary of a published frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame id written to every column.
    pub frame_id: u16,
    /// Datagrams sent.
    pub packets: usize,
    /// Payload bytes sent.
    pub bytes: usize,
}

/// Converts range images to sensor packets and sends them.
///
/// The synthesizer holds no per-frame state; the frame counter is owned by
/// the caller and passed in for every frame.
#[derive(Clone, Debug)]
pub struct BeamToOuster {
    /// Receiver of the packets.
    pub destination: Destination,
    /// Reject frames whose encoder ticks leave the rotation domain.
    pub strict_encoder: bool,
}

impl BeamToOuster {
    /// Lenient synthesizer sending to `destination`.
    pub fn new(destination: Destination) -> BeamToOuster {
        BeamToOuster {
            destination,
            strict_encoder: false,
        }
    }

    /// Validates the frame and builds its packets without sending them.
    pub fn encode(&self, frame: &BeamFrame, frame_id: u16) -> Result<Vec<Packet>, Error> {
        let rows = RowCount::try_from(frame.num_rows)?;
        let depth = DepthImage::from_meters(rows, frame.num_cols as usize, frame.depth)?;
        build_packets(&depth, &frame.sweep, frame_id, self.strict_encoder)
    }

    /// Builds and sends one frame, advancing the sequencer only when every
    /// packet was sent.
    #[instrument(skip_all, fields(frame_id = sequencer.current()))]
    pub async fn publish(
        &self,
        sequencer: &mut FrameSequencer,
        frame: &BeamFrame<'_>,
    ) -> Result<FrameStats, Error> {
        let frame_id = sequencer.current();
        let packets = self.encode(frame, frame_id)?;
        let bytes = send_packets(&packets, &self.destination).await?;
        sequencer.advance();

        debug!("published frame {} in {} packets", frame_id, packets.len());
        Ok(FrameStats {
            frame_id,
            packets: packets.len(),
            bytes,
        })
    }

    /// Publishes one frame and reports success, logging any failure.
    pub async fn compute(&self, sequencer: &mut FrameSequencer, frame: &BeamFrame<'_>) -> bool {
        match self.publish(sequencer, frame).await {
            Ok(_) => true,
            Err(err) if err.is_transmission() => {
                error!("error sending frame {}: {}", sequencer.current(), err);
                false
            }
            Err(err) => {
                error!("error encoding frame {}: {}", sequencer.current(), err);
                false
            }
        }
    }
}
