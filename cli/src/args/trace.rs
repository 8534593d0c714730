use std::net::IpAddr;
use std::net::SocketAddr;

use clap::Args;
use mdig::config::DEFAULT_CONCURRENCY;
use mdig::config::DEFAULT_MAX_LEVELS;
use mdig::config::DNS_PORT;
use mdig::AddressFamily;
use mdig::Protocol;
use mdig::QueryType;
use mdig::TraceConfig;

const HEADING: Option<&str> = Some("Trace Options");

/// Arguments controlling how a domain is traced.
#[derive(Debug, Args, Clone)]
pub struct TraceArgs {
    /// Domain to trace
    pub domain: String,

    /// DNS server used to look up name server addresses
    #[clap(long, default_value = "8.8.8.8", help_heading = HEADING)]
    pub dns: IpAddr,

    /// Record type asked of each authority (a, aaaa)
    #[clap(long, default_value_t = QueryType::A, help_heading = HEADING)]
    pub dnstype: QueryType,

    /// Address families to look up for each name server (4, 6, all)
    #[clap(long, default_value_t = AddressFamily::All, help_heading = HEADING)]
    pub iptype: AddressFamily,

    /// Query over TCP instead of UDP
    #[clap(long, help_heading = HEADING)]
    pub tcp: bool,

    /// Time to wait for each reply
    #[clap(long, default_value = "3s", help_heading = HEADING)]
    pub timeout: humantime::Duration,

    /// Number of name servers queried at once
    #[clap(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY, help_heading = HEADING)]
    pub concurrency: usize,

    /// Deepest delegation chain to follow
    #[clap(long, default_value_t = DEFAULT_MAX_LEVELS, help_heading = HEADING)]
    pub max_levels: usize,
}

impl TraceArgs {
    pub fn config(&self) -> TraceConfig {
        let protocol = if self.tcp { Protocol::Tcp } else { Protocol::Udp };
        TraceConfig::builder()
            .resolver(SocketAddr::new(self.dns, DNS_PORT))
            .query_type(self.dnstype)
            .address_family(self.iptype)
            .protocol(protocol)
            .timeout(self.timeout.into())
            .concurrency(self.concurrency)
            .max_levels(self.max_levels)
            .build()
    }
}
