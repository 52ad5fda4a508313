// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use std::path::Path;

use args::Args;
use beampub::{
    chunker::Sweep,
    net::Destination,
    sequencer::FrameSequencer,
    synth::{BeamFrame, BeamToOuster},
};
use clap::Parser;
use ndarray::ArrayD;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt as _, Layer as _, Registry};
use tracy_client::{frame_mark, plot};

#[cfg(feature = "profiling")]
#[global_allocator]
static GLOBAL: tracy_client::ProfiledAllocator<std::alloc::System> =
    tracy_client::ProfiledAllocator::new(std::alloc::System, 100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.tracy.then(tracy_client::Client::start);

    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(args.rust_log);

    let journald = match tracing_journald::layer() {
        Ok(journald) => Some(journald.with_filter(args.rust_log)),
        Err(_) => None,
    };

    let tracy = match args.tracy {
        true => Some(tracing_tracy::TracyLayer::default().with_filter(args.rust_log)),
        false => None,
    };

    let subscriber = Registry::default()
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    tracing_log::LogTracer::init()?;

    let period = args.period()?;

    let depth = match &args.depth {
        Some(path) => load_depth(path)?,
        None => vec![args.range; args.rows as usize * args.cols as usize],
    };

    let frame = BeamFrame {
        num_rows: args.rows,
        num_cols: args.cols,
        depth: &depth,
        sweep: Sweep {
            azimuth_start: args.azimuth_start,
            horizontal_resolution: args.resolution(),
        },
    };

    let synth = BeamToOuster {
        destination: Destination::from(&args),
        strict_encoder: args.strict_encoder,
    };

    info!(
        "publishing {}x{} frames to {}:{} at {} Hz (azimuth {} to {}, resolution {} deg, broadcast={})",
        args.rows,
        args.cols,
        args.ip,
        args.port,
        args.rate,
        args.azimuth_start,
        args.azimuth_end,
        args.resolution(),
        args.broadcast
    );

    let mut sequencer = FrameSequencer::new();
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let span = info_span!("frame");
        match synth.publish(&mut sequencer, &frame).instrument(span).await {
            Ok(stats) => {
                args.tracy.then(|| plot!("packets", stats.packets as f64));
                args.tracy.then(frame_mark);
            }
            Err(err) => error!("frame {} failed: {}", sequencer.current(), err),
        }

        if args.frames != 0 && sequencer.frames() as u64 >= args.frames {
            info!("published {} frames", sequencer.frames());
            return Ok(());
        }
    }
}

/// Loads a float32 depth buffer in meters, flattened in standard order.
fn load_depth(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let depth: ArrayD<f32> = ndarray_npy::read_npy(path)?;
    info!("loaded depth {:?} from {}", depth.shape(), path.display());
    Ok(depth.iter().copied().collect())
}
