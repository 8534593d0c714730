use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use hickory_resolver::proto::ProtoError;

/// Failures a trace can run into.
///
/// Errors tied to a single name server end up as text in
/// [`AuthorityOutcome::error`](crate::AuthorityOutcome); the rest end the
/// trace with an error-only [`LevelResult`](crate::LevelResult).
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("no IP found for {0}")]
    NoAddressFound(String),

    #[error("query to {server} timed out after {timeout:?}")]
    QueryTimeout { server: SocketAddr, timeout: Duration },

    #[error("transport error with {server}: {source}")]
    Transport {
        server: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("bad message exchanged with {server}: {source}")]
    Protocol {
        server: SocketAddr,
        #[source]
        source: ProtoError,
    },

    #[error("no authority servers found")]
    NoAuthoritiesFound,

    #[error("delegation chain deeper than {0} levels")]
    DepthExceeded(usize),
}

impl TraceError {
    pub(crate) fn transport(server: SocketAddr) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Transport { server, source }
    }

    pub(crate) fn protocol(server: SocketAddr) -> impl FnOnce(ProtoError) -> Self {
        move |source| Self::Protocol { server, source }
    }
}
