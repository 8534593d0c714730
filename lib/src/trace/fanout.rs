use std::net::IpAddr;
use std::sync::Arc;

use futures::StreamExt;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::proto::rr::RData;
use hickory_resolver::proto::rr::Record;
use tracing::debug;
use tracing::instrument;
use tracing::warn;

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::model::AuthorityOutcome;
use crate::trace::fqdn;
use crate::trace::AddressResolver;
use crate::trace::AuthorityQuery;
use crate::transport::Exchange;
use crate::util::unique_strings;

/// Everything the candidate name servers of one level said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorities {
    /// One outcome per address queried, plus one per host name that did not
    /// resolve. Order is unspecified.
    pub outcomes: Vec<AuthorityOutcome>,

    /// Deduplicated name servers for the next level.
    pub delegations: Vec<String>,
}

/// Queries all candidate name servers of one level, a bounded number at a
/// time.
#[derive(Clone)]
pub struct FanOut {
    lookup: AddressResolver,
    query: AuthorityQuery,
    concurrency: usize,
}

impl FanOut {
    #[must_use]
    pub fn new(exchange: Arc<dyn Exchange>, config: Arc<TraceConfig>) -> Self {
        Self {
            lookup: AddressResolver::new(exchange.clone(), config.clone()),
            query: AuthorityQuery::new(exchange, config.clone()),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Resolves and queries every server in `servers` for `domain`.
    ///
    /// A server that fails only shows up as an error outcome; it never stops
    /// the others. Returns once every server has been handled.
    ///
    /// # Errors
    ///
    /// - [`TraceError::InvalidDomain`] if `domain` is not a valid DNS name
    pub async fn resolve(
        &self,
        domain: &str,
        servers: &[String],
    ) -> Result<Authorities, TraceError> {
        let name = Name::from_utf8(fqdn(domain))
            .map_err(|_| TraceError::InvalidDomain(domain.to_owned()))?;

        let (outcomes, delegations): (Vec<AuthorityOutcome>, Vec<String>) =
            futures::stream::iter(servers)
                .map(|hostname| self.resolve_host(&name, hostname))
                .buffer_unordered(self.concurrency)
                .fold(
                    (Vec::new(), Vec::new()),
                    |(mut outcomes, mut delegations), host| async move {
                        outcomes.extend(host.outcomes);
                        delegations.extend(host.delegations);
                        (outcomes, delegations)
                    },
                )
                .await;

        Ok(Authorities {
            outcomes,
            delegations: unique_strings(delegations),
        })
    }

    #[instrument(skip_all, fields(%hostname))]
    async fn resolve_host(&self, domain: &Name, hostname: &str) -> HostAuthorities {
        let mut host = HostAuthorities::default();

        let addresses = match self.lookup.lookup(hostname).await {
            Ok(addresses) => addresses,
            Err(error) => {
                warn!(%error, "skipping name server");
                host.outcomes.push(AuthorityOutcome {
                    hostname: hostname.to_owned(),
                    error: Some(format!("IP lookup failed: {error}")),
                    ..AuthorityOutcome::default()
                });
                return host;
            }
        };

        for address in addresses {
            let outcome = match self.query.query(domain, address).await {
                Ok(records) => {
                    let classified = Classified::from_records(&records);
                    debug!(
                        %address,
                        delegations = classified.delegations.len(),
                        targets = classified.targets.len(),
                        "authority answered"
                    );
                    host.delegations.extend(classified.delegations.iter().cloned());
                    answered(hostname, address, classified)
                }
                Err(error) => {
                    warn!(%address, %error, "authority query failed");
                    AuthorityOutcome {
                        hostname: hostname.to_owned(),
                        address: Some(address),
                        error: Some(format!("query failed: {error}")),
                        ..AuthorityOutcome::default()
                    }
                }
            };
            host.outcomes.push(outcome);
        }

        host
    }
}

/// Result of handling one candidate host name.
#[derive(Default)]
struct HostAuthorities {
    outcomes: Vec<AuthorityOutcome>,
    delegations: Vec<String>,
}

/// Records of one reply, split by what the trace does with them.
#[derive(Debug, Default, PartialEq, Eq)]
struct Classified {
    /// NS targets, in reply order.
    delegations: Vec<String>,
    /// A and AAAA addresses and CNAME targets, in reply order.
    targets: Vec<String>,
}

impl Classified {
    fn from_records(records: &[Record]) -> Self {
        let mut classified = Self::default();
        for record in records {
            match record.data() {
                RData::NS(ns) => classified.delegations.push(ns.0.to_ascii()),
                RData::A(a) => classified.targets.push(a.to_string()),
                RData::AAAA(aaaa) => classified.targets.push(aaaa.to_string()),
                RData::CNAME(cname) => classified.targets.push(cname.0.to_ascii()),
                _ => {}
            }
        }
        classified
    }
}

fn answered(hostname: &str, address: IpAddr, classified: Classified) -> AuthorityOutcome {
    let Classified {
        delegations,
        targets,
    } = classified;
    AuthorityOutcome {
        hostname: hostname.to_owned(),
        address: Some(address),
        responses: unique_strings(delegations.into_iter().chain(unique_strings(targets))),
        error: None,
    }
}
