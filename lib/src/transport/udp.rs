//! DNS over UDP.
//!
//! A fresh ephemeral socket is used per exchange and connected to the server,
//! so only datagrams from that server are seen. Datagrams carrying a different
//! id are stale or spoofed and are skipped.

use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::debug;

use super::MAX_DNS_PACKET_SIZE;
use crate::error::TraceError;

/// Sends `payload` to `server` and returns the first reply whose id matches.
///
/// Has no deadline of its own; callers wrap it in a timeout.
pub(crate) async fn exchange(
    payload: &[u8],
    id: u16,
    server: SocketAddr,
) -> Result<Vec<u8>, TraceError> {
    let local: SocketAddr = match server {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(local)
        .await
        .map_err(TraceError::transport(server))?;
    socket
        .connect(server)
        .await
        .map_err(TraceError::transport(server))?;
    socket
        .send(payload)
        .await
        .map_err(TraceError::transport(server))?;

    let mut buf = [0u8; MAX_DNS_PACKET_SIZE];
    loop {
        let len = socket
            .recv(&mut buf)
            .await
            .map_err(TraceError::transport(server))?;

        if len < 12 {
            debug!(%server, len, "ignoring runt datagram");
            continue;
        }

        let reply_id = u16::from_be_bytes([buf[0], buf[1]]);
        if reply_id != id {
            debug!(%server, reply_id, id, "ignoring datagram with unexpected id");
            continue;
        }

        return Ok(buf[..len].to_vec());
    }
}
