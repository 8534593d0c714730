use std::net::IpAddr;
use std::sync::Arc;

use hickory_resolver::proto::rr::Name;
use hickory_resolver::proto::rr::RData;
use tracing::instrument;
use tracing::warn;

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::trace::fqdn;
use crate::transport::query_message;
use crate::transport::Exchange;

/// Looks up name server addresses through the configured upstream resolver.
#[derive(Clone)]
pub struct AddressResolver {
    exchange: Arc<dyn Exchange>,
    config: Arc<TraceConfig>,
}

impl AddressResolver {
    #[must_use]
    pub fn new(exchange: Arc<dyn Exchange>, config: Arc<TraceConfig>) -> Self {
        Self { exchange, config }
    }

    /// Returns every address found for `hostname`, in response order, across
    /// all configured address families.
    ///
    /// A family that fails is logged and skipped; the lookup only fails if no
    /// family produced an address.
    ///
    /// # Errors
    ///
    /// - [`TraceError::NoAddressFound`] if no address was found
    #[instrument(skip(self))]
    pub async fn lookup(&self, hostname: &str) -> Result<Vec<IpAddr>, TraceError> {
        let no_address = || TraceError::NoAddressFound(hostname.to_owned());
        let name = Name::from_utf8(fqdn(hostname)).map_err(|error| {
            warn!(%error, "unusable name server host name");
            no_address()
        })?;

        let mut addresses = Vec::new();
        for &record_type in self.config.address_family.record_types() {
            let request = query_message(name.clone(), record_type);
            let reply = self
                .exchange
                .exchange(&request, self.config.resolver, self.config.timeout)
                .await;
            match reply {
                Ok(reply) => {
                    let found = reply.answers().iter().filter_map(|r| address_of(r.data()));
                    addresses.extend(found);
                }
                Err(error) => warn!(%record_type, %error, "address lookup failed"),
            }
        }

        if addresses.is_empty() {
            return Err(no_address());
        }
        Ok(addresses)
    }
}

fn address_of(data: &RData) -> Option<IpAddr> {
    match data {
        RData::A(a) => Some(IpAddr::V4(a.0)),
        RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
        _ => None,
    }
}
