//! DNS message exchange over the wire.
//!
//! [`Exchange`] is the only way the tracing engine talks to the network, so
//! swapping it out is how the engine is driven in tests.

pub mod tcp;
pub mod udp;

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::proto::op::Message;
use hickory_resolver::proto::op::MessageType;
use hickory_resolver::proto::op::OpCode;
use hickory_resolver::proto::op::Query;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::proto::rr::RecordType;

use crate::config::Protocol;
use crate::error::TraceError;
use crate::util::with_timeout;

/// Maximum size of a DNS message accepted from a server.
pub const MAX_DNS_PACKET_SIZE: usize = 4096;

/// Sends one DNS request and waits for the matching reply.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// # Errors
    ///
    /// - [`TraceError::QueryTimeout`] if no reply arrives within `timeout`
    /// - [`TraceError::Transport`] on socket failures
    /// - [`TraceError::Protocol`] if the request or reply can't be coded
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, TraceError>;
}

/// Exchanges messages with real servers over UDP or TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkExchange {
    protocol: Protocol,
}

impl NetworkExchange {
    #[must_use]
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }
}

#[async_trait]
impl Exchange for NetworkExchange {
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, TraceError> {
        let payload = request.to_vec().map_err(TraceError::protocol(server))?;
        let reply = match self.protocol {
            Protocol::Udp => {
                with_timeout(timeout, server, udp::exchange(&payload, request.id(), server))
                    .await?
            }
            Protocol::Tcp => {
                with_timeout(timeout, server, tcp::exchange(&payload, server)).await?
            }
        };
        Message::from_vec(&reply).map_err(TraceError::protocol(server))
    }
}

/// Builds a single-question request for `name` with a random id and
/// recursion desired.
#[must_use]
pub fn query_message(name: Name, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(rand::random())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, record_type));
    message
}
