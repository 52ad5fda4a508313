// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::f32::consts::PI;

use beampub::{
    chunker::Sweep,
    net::Destination,
    ouster::{ColumnRecord, Packet, BLOCK_STATUS_VALID, COLUMNS_PER_PACKET, PADDING_ENCODER_COUNT},
    sequencer::FrameSequencer,
    synth::{BeamFrame, BeamToOuster},
};
use tokio::net::UdpSocket;

#[derive(Debug)]
struct DecodedColumn {
    timestamp: u64,
    measurement_id: u16,
    frame_id: u16,
    encoder_count: u32,
    distances: Vec<u32>,
    signals: Vec<u16>,
    block_status: u32,
}

fn u16_at(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn decode(buf: &[u8], rows: usize) -> Vec<DecodedColumn> {
    assert_eq!(buf.len(), Packet::len(rows));

    buf.chunks_exact(ColumnRecord::len(rows))
        .map(|col| {
            let mut timestamp = [0u8; 8];
            timestamp.copy_from_slice(&col[0..8]);
            let points = &col[ColumnRecord::HEADER_LEN..col.len() - ColumnRecord::STATUS_LEN];

            DecodedColumn {
                timestamp: u64::from_le_bytes(timestamp),
                measurement_id: u16_at(col, 8),
                frame_id: u16_at(col, 10),
                encoder_count: u32_at(col, 12),
                distances: points.chunks_exact(12).map(|p| u32_at(p, 0)).collect(),
                signals: points.chunks_exact(12).map(|p| u16_at(p, 6)).collect(),
                block_status: u32_at(col, col.len() - 4),
            }
        })
        .collect()
}

async fn receive(rx: &UdpSocket, count: usize, rows: usize) -> Vec<DecodedColumn> {
    let mut buf = vec![0; 65536];
    let mut columns = Vec::new();
    for _ in 0..count {
        let (n, _) = rx.recv_from(&mut buf).await.unwrap();
        columns.extend(decode(&buf[..n], rows));
    }
    columns
}

#[tokio::test]
async fn test_publish_round_trip() {
    let rx = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = rx.local_addr().unwrap().port();
    let synth = BeamToOuster::new(Destination::new("127.0.0.1", port));
    let mut sequencer = FrameSequencer::new();

    let rows = 16;
    let cols = 17;
    // Column c, row r holds c + r / 100 meters.
    let depth: Vec<f32> = (0..rows * cols)
        .map(|i| (i / rows) as f32 + (i % rows) as f32 / 100.0)
        .collect();
    let frame = BeamFrame {
        num_rows: rows as u32,
        num_cols: cols as u32,
        depth: &depth,
        sweep: Sweep {
            azimuth_start: PI - PI / cols as f32,
            horizontal_resolution: 360.0 / cols as f32,
        },
    };

    let expected = synth.encode(&frame, 0).unwrap();
    let stats = synth.publish(&mut sequencer, &frame).await.unwrap();
    assert_eq!(stats.packets, 2);
    assert_eq!(stats.bytes, 2 * Packet::len(rows));
    assert_eq!(sequencer.current(), 1);

    let columns = receive(&rx, 2, rows).await;
    assert_eq!(columns.len(), 2 * COLUMNS_PER_PACKET);

    let expected: Vec<&ColumnRecord> = expected.iter().flat_map(|p| p.columns.iter()).collect();
    for (index, (column, record)) in columns.iter().zip(expected).enumerate() {
        assert_eq!(column.measurement_id, index as u16);
        assert_eq!(column.frame_id, 0);
        assert_eq!(column.encoder_count, record.encoder_count);
        assert!(column.timestamp > 0);

        let distances: Vec<u32> = record.points.iter().map(|p| p.distance_mm).collect();
        assert_eq!(column.distances, distances);
    }

    for column in &columns[..cols] {
        assert_eq!(column.block_status, BLOCK_STATUS_VALID);
        assert!(column.signals.iter().all(|&s| s == 0xFFFF));
        assert!(column.encoder_count < PADDING_ENCODER_COUNT);
    }
    assert!(columns[..cols]
        .windows(2)
        .all(|w| w[0].encoder_count <= w[1].encoder_count));

    for column in &columns[cols..] {
        assert_eq!(column.encoder_count, PADDING_ENCODER_COUNT);
        assert_eq!(column.block_status, 0);
        assert!(column.distances.iter().all(|&d| d == 0));
        assert!(column.signals.iter().all(|&s| s == 0));
    }
}

#[tokio::test]
async fn test_frame_ids_advance() {
    let rx = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = rx.local_addr().unwrap().port();
    let synth = BeamToOuster::new(Destination::new("127.0.0.1", port));
    let mut sequencer = FrameSequencer::new();

    let depth = vec![1.2345f32; 128 * 32];
    let frame = BeamFrame {
        num_rows: 128,
        num_cols: 32,
        depth: &depth,
        sweep: Sweep {
            azimuth_start: PI - PI / 32.0,
            horizontal_resolution: 360.0 / 32.0,
        },
    };

    for frame_id in 0..3u16 {
        assert!(synth.compute(&mut sequencer, &frame).await);

        let columns = receive(&rx, 2, 128).await;
        assert!(columns.iter().all(|c| c.frame_id == frame_id));
        assert!(columns.iter().all(|c| c.distances.iter().all(|&d| d == 1234)));
        assert_eq!(
            columns.iter().map(|c| c.measurement_id).collect::<Vec<_>>(),
            (0..32).collect::<Vec<u16>>()
        );
    }
    assert_eq!(sequencer.current(), 3);
}
