// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use log::warn;
use std::net::UdpSocket;

/// Wall-clock time in nanoseconds since the epoch, or 0 if the clock cannot
/// be read.
pub fn timestamp_ns() -> u64 {
    let mut tp = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let err = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut tp) };
    if err != 0 {
        warn!(
            "clock_gettime failed: {}",
            std::io::Error::last_os_error()
        );
        return 0;
    }

    tp.tv_sec as u64 * 1_000_000_000 + tp.tv_nsec as u64
}

/// Sets SO_SNDBUF on the socket, logging a warning on failure.
#[cfg(target_os = "linux")]
pub fn set_socket_sndbuf(socket: UdpSocket, size: usize) -> UdpSocket {
    use std::os::fd::{FromRawFd, IntoRawFd};

    let fd = socket.into_raw_fd();
    let size = size as libc::c_int;
    let err = unsafe {
        libc::setsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_SNDBUF,
            &size as *const _ as *const libc::c_void,
            std::mem::size_of_val(&size) as libc::socklen_t,
        )
    };
    if err != 0 {
        warn!(
            "setsockopt SO_SNDBUF failed: {}",
            std::io::Error::last_os_error()
        );
    }
    unsafe { UdpSocket::from_raw_fd(fd) }
}

/// Socket buffer sizing is only applied on Linux.
#[cfg(not(target_os = "linux"))]
pub fn set_socket_sndbuf(socket: UdpSocket, _size: usize) -> UdpSocket {
    socket
}
