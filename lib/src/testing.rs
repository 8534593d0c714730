//! Fixtures for driving the engine without a network.

use std::collections::HashMap;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::proto::op::Message;
use hickory_resolver::proto::op::MessageType;
use hickory_resolver::proto::rr::rdata::A;
use hickory_resolver::proto::rr::rdata::AAAA;
use hickory_resolver::proto::rr::rdata::CNAME;
use hickory_resolver::proto::rr::rdata::NS;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::proto::rr::RData;
use hickory_resolver::proto::rr::Record;
use hickory_resolver::proto::rr::RecordType;

use crate::error::TraceError;
use crate::trace::fqdn;
use crate::transport::Exchange;

type Key = (IpAddr, String, RecordType);

#[derive(Debug, Clone, Default)]
struct Reply {
    answers: Vec<Record>,
    authority: Vec<Record>,
}

/// Answers from a fixture table keyed by server address, query name and
/// record type. Anything not in the table times out.
#[derive(Debug, Default)]
pub(crate) struct MockExchange {
    replies: HashMap<Key, Reply>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockExchange {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Holds every exchange open for `delay` before replying.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn answer(
        mut self,
        server: &str,
        name: &str,
        record_type: RecordType,
        records: Vec<Record>,
    ) -> Self {
        self.entry(server, name, record_type).answers.extend(records);
        self
    }

    pub(crate) fn authority(
        mut self,
        server: &str,
        name: &str,
        record_type: RecordType,
        records: Vec<Record>,
    ) -> Self {
        self.entry(server, name, record_type)
            .authority
            .extend(records);
        self
    }

    /// Most exchanges that were ever in flight at the same time.
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn entry(&mut self, server: &str, name: &str, record_type: RecordType) -> &mut Reply {
        let server = IpAddr::from_str(server).unwrap();
        let key = (server, wire_key(name), record_type);
        self.replies.entry(key).or_default()
    }

    fn reply_to(&self, request: &Message, server: SocketAddr) -> Option<Message> {
        let query = request.queries().first()?;
        let key = (
            server.ip(),
            query.name().to_ascii().to_ascii_lowercase(),
            query.query_type(),
        );
        let fixture = self.replies.get(&key)?;

        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .add_query(query.clone())
            .add_answers(fixture.answers.clone())
            .add_name_servers(fixture.authority.clone());
        Some(reply)
    }
}

#[async_trait]
impl Exchange for MockExchange {
    async fn exchange(
        &self,
        request: &Message,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, TraceError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.reply_to(request, server);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        reply.ok_or(TraceError::QueryTimeout { server, timeout })
    }
}

fn name(s: &str) -> Name {
    Name::from_utf8(fqdn(s)).unwrap()
}

/// Lowercased ASCII form, so Unicode and punycode spellings share a key.
fn wire_key(s: &str) -> String {
    name(s).to_ascii().to_ascii_lowercase()
}

pub(crate) fn a(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip.parse().unwrap())))
}

pub(crate) fn aaaa(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::AAAA(AAAA(ip.parse().unwrap())))
}

pub(crate) fn ns(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 86400, RData::NS(NS(name(target))))
}

pub(crate) fn cname(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}
