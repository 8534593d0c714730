//! DNS over TCP. Messages are prefixed with a 2-byte big-endian length.

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::TraceError;

/// Opens a connection to `server`, writes one framed request and reads one
/// framed reply.
pub(crate) async fn exchange(payload: &[u8], server: SocketAddr) -> Result<Vec<u8>, TraceError> {
    let mut stream = TcpStream::connect(server)
        .await
        .map_err(TraceError::transport(server))?;

    let len = u16::try_from(payload.len()).map_err(|_| TraceError::Transport {
        server,
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "request too large"),
    })?;
    let mut framed = Vec::with_capacity(payload.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(payload);
    stream
        .write_all(&framed)
        .await
        .map_err(TraceError::transport(server))?;

    read_framed(&mut stream)
        .await
        .map_err(TraceError::transport(server))
}

async fn read_framed(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut prefix = [0u8; 2];
    stream.read_exact(&mut prefix).await?;
    let len = usize::from(u16::from_be_bytes(prefix));

    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(buf)
}
