use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::time::Duration;

use bon::Builder;
use hickory_resolver::proto::rr::RecordType;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

/// Port every DNS exchange is sent to.
pub const DNS_PORT: u16 = 53;

/// Upstream resolver used to look up name server addresses.
pub const DEFAULT_RESOLVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), DNS_PORT);

/// Time allowed for a single exchange with one server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Number of name servers processed at once within a level.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Deepest delegation chain followed before a trace is cut off.
pub const DEFAULT_MAX_LEVELS: usize = 32;

/// Record type asked of every authority server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QueryType {
    #[default]
    A,
    Aaaa,
}

impl From<QueryType> for RecordType {
    fn from(value: QueryType) -> Self {
        match value {
            QueryType::A => RecordType::A,
            QueryType::Aaaa => RecordType::AAAA,
        }
    }
}

/// Address families used when looking up the addresses of a name server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum AddressFamily {
    #[strum(serialize = "4")]
    V4,
    #[strum(serialize = "6")]
    V6,
    #[default]
    #[strum(serialize = "all")]
    All,
}

impl AddressFamily {
    /// Record types to ask the upstream resolver for, in query order.
    #[must_use]
    pub fn record_types(self) -> &'static [RecordType] {
        match self {
            AddressFamily::V4 => &[RecordType::A],
            AddressFamily::V6 => &[RecordType::AAAA],
            AddressFamily::All => &[RecordType::A, RecordType::AAAA],
        }
    }
}

/// Wire transport for DNS exchanges.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Protocol {
    #[default]
    Udp,
    Tcp,
}

/// Settings for one trace. Built once and never mutated afterwards.
#[derive(Debug, Clone, Builder)]
pub struct TraceConfig {
    /// Upstream resolver used for name server address lookups.
    #[builder(default = DEFAULT_RESOLVER)]
    pub resolver: SocketAddr,

    /// Record type asked of authority servers.
    #[builder(default)]
    pub query_type: QueryType,

    /// Address families looked up for each name server.
    #[builder(default)]
    pub address_family: AddressFamily,

    /// Transport used for every exchange.
    #[builder(default)]
    pub protocol: Protocol,

    /// Upper bound for every single exchange.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// Name servers processed concurrently within one level.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Levels traced before giving up on a delegation loop.
    #[builder(default = DEFAULT_MAX_LEVELS)]
    pub max_levels: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a", QueryType::A)]
    #[case("aaaa", QueryType::Aaaa)]
    #[case("AAAA", QueryType::Aaaa)]
    fn query_type_parses(#[case] input: &str, #[case] should: QueryType) {
        assert_eq!(QueryType::from_str(input).unwrap(), should);
    }

    #[rstest]
    #[case("4", AddressFamily::V4, &[RecordType::A])]
    #[case("6", AddressFamily::V6, &[RecordType::AAAA])]
    #[case("all", AddressFamily::All, &[RecordType::A, RecordType::AAAA])]
    fn address_family_parses(
        #[case] input: &str,
        #[case] should: AddressFamily,
        #[case] types: &[RecordType],
    ) {
        let family = AddressFamily::from_str(input).unwrap();
        assert_eq!(family, should);
        assert_eq!(family.record_types(), types);
    }

    #[rstest]
    #[case("cname")]
    #[case("4/6")]
    #[case("")]
    fn address_family_rejects_unknown(#[case] input: &str) {
        assert!(AddressFamily::from_str(input).is_err());
    }

    #[test]
    fn defaults() {
        let config = TraceConfig::default();
        assert_eq!(config.resolver, "8.8.8.8:53".parse().unwrap());
        assert_eq!(config.query_type, QueryType::A);
        assert_eq!(config.address_family, AddressFamily::All);
        assert_eq!(config.protocol, Protocol::Udp);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.max_levels, 32);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for family in [AddressFamily::V4, AddressFamily::V6, AddressFamily::All] {
            assert_eq!(AddressFamily::from_str(&family.to_string()).unwrap(), family);
        }
    }
}
