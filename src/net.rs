// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};

use tokio::net::UdpSocket;
use tracing::{debug, instrument, trace};

use crate::{common::set_socket_sndbuf, error::Error, ouster::Packet};

/// Outgoing multicast TTL used when broadcasting.
pub const MULTICAST_TTL: u32 = 32;

/// Default UDP port of the sensor's lidar data stream.
pub const DEFAULT_LIDAR_PORT: u16 = 7502;

/// Where and how packets are delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// IP address or host name of the receiver.
    pub ip: String,
    /// UDP port of the receiver.
    pub port: u16,
    /// Allow broadcast and multicast delivery.
    pub broadcast: bool,
    /// Optional SO_SNDBUF size in bytes.
    pub send_buffer: Option<usize>,
}

impl Destination {
    /// Unicast destination with default socket options.
    pub fn new(ip: impl Into<String>, port: u16) -> Destination {
        Destination {
            ip: ip.into(),
            port,
            broadcast: false,
            send_buffer: None,
        }
    }
}

/// Sends each packet as one datagram, in order.
///
/// A socket is opened for the call and dropped on return, including when a
/// send fails.  The first failed send aborts the remaining packets; packets
/// already sent are not retracted.  Returns the number of bytes sent.
#[instrument(skip_all, fields(ip = %dest.ip, port = dest.port, packets = packets.len()))]
pub async fn send_packets(packets: &[Packet], dest: &Destination) -> Result<usize, Error> {
    if packets.is_empty() {
        return Ok(0);
    }

    let addr = resolve(dest).await?;
    let sock = open_socket(addr, dest).await?;
    let mut buf = Vec::new();
    let mut sent = 0;

    for (index, packet) in packets.iter().enumerate() {
        packet.write_to(&mut buf);
        let n = sock.send_to(&buf, addr).await?;
        if n != buf.len() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram {}/{} bytes", n, buf.len()),
            )));
        }
        trace!("sent packet {} ({} bytes)", index, n);
        sent += n;
    }

    debug!("sent {} packets ({} bytes) to {}", packets.len(), sent, addr);
    Ok(sent)
}

async fn resolve(dest: &Destination) -> Result<SocketAddr, Error> {
    tokio::net::lookup_host((dest.ip.as_str(), dest.port))
        .await?
        .next()
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address for {}", dest.ip),
            ))
        })
}

async fn open_socket(addr: SocketAddr, dest: &Destination) -> Result<UdpSocket, Error> {
    let sock = match addr {
        SocketAddr::V4(_) => UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?,
        SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0)).await?,
    };

    if dest.broadcast {
        sock.set_broadcast(true)?;
        if addr.is_ipv4() {
            sock.set_multicast_ttl_v4(MULTICAST_TTL)?;
        }
    }

    match dest.send_buffer {
        Some(size) => {
            let sock = set_socket_sndbuf(sock.into_std()?, size);
            Ok(UdpSocket::from_std(sock)?)
        }
        None => Ok(sock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ouster::{ColumnRecord, Point, COLUMNS_PER_PACKET};

    fn packet(encoder_count: u32) -> Packet {
        let column = ColumnRecord {
            timestamp: 1,
            measurement_id: 0,
            frame_id: 0,
            encoder_count,
            points: vec![Point::valid(1500); 16],
            block_status: 0,
        };
        Packet {
            columns: vec![column; COLUMNS_PER_PACKET],
        }
    }

    #[tokio::test]
    async fn test_send_in_order() {
        let rx = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = rx.local_addr().unwrap().port();
        let mut dest = Destination::new("127.0.0.1", port);
        dest.send_buffer = Some(1024 * 1024);

        let packets = vec![packet(10), packet(20), packet(30)];
        let sent = send_packets(&packets, &dest).await.unwrap();
        assert_eq!(sent, 3 * Packet::len(16));

        let mut buf = vec![0; 65536];
        for expected in [10u32, 20, 30] {
            let (n, _) = rx.recv_from(&mut buf).await.unwrap();
            assert_eq!(n, Packet::len(16));
            assert_eq!(
                u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
                expected
            );
        }
    }

    #[tokio::test]
    async fn test_broadcast_socket() {
        let rx = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut dest = Destination::new("127.0.0.1", rx.local_addr().unwrap().port());
        dest.broadcast = true;

        let sent = send_packets(&[packet(0)], &dest).await.unwrap();
        assert_eq!(sent, Packet::len(16));
    }

    #[tokio::test]
    async fn test_invalid_destination() {
        let dest = Destination::new("not an address", 7502);
        let err = send_packets(&[packet(0)], &dest).await.unwrap_err();
        assert!(err.is_transmission());
    }

    #[tokio::test]
    async fn test_send_failure_aborts() {
        // Limited broadcast without SO_BROADCAST is refused by send_to.
        let dest = Destination::new("255.255.255.255", 7502);
        assert!(resolve(&dest).await.is_ok());

        let packets = vec![packet(10), packet(20), packet(30)];
        let err = send_packets(&packets, &dest).await.unwrap_err();
        assert!(err.is_transmission());
    }

    #[tokio::test]
    async fn test_nothing_to_send() {
        let dest = Destination::new("127.0.0.1", 7502);
        assert_eq!(send_packets(&[], &dest).await.unwrap(), 0);
    }
}
