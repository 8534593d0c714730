use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::Arc;

use hickory_resolver::proto::rr::Name;
use hickory_resolver::proto::rr::Record;

use crate::config::TraceConfig;
use crate::config::DNS_PORT;
use crate::error::TraceError;
use crate::transport::query_message;
use crate::transport::Exchange;

/// Asks one authority server about a domain.
#[derive(Clone)]
pub struct AuthorityQuery {
    exchange: Arc<dyn Exchange>,
    config: Arc<TraceConfig>,
}

impl AuthorityQuery {
    #[must_use]
    pub fn new(exchange: Arc<dyn Exchange>, config: Arc<TraceConfig>) -> Self {
        Self { exchange, config }
    }

    /// Sends a single query for `domain` to `address` and returns the answer
    /// section, or the authority section when there is no answer. Referrals
    /// carry their NS records in the latter.
    ///
    /// # Errors
    ///
    /// - [`TraceError::QueryTimeout`] if the server stays silent
    /// - [`TraceError::Transport`] or [`TraceError::Protocol`] if the exchange
    ///   itself fails
    pub async fn query(
        &self,
        domain: &Name,
        address: IpAddr,
    ) -> Result<Vec<Record>, TraceError> {
        let server = SocketAddr::new(address, DNS_PORT);
        let request = query_message(domain.clone(), self.config.query_type.into());
        let mut reply = self
            .exchange
            .exchange(&request, server, self.config.timeout)
            .await?;

        if reply.answers().is_empty() {
            Ok(reply.take_name_servers())
        } else {
            Ok(reply.take_answers())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use hickory_resolver::proto::rr::RecordType;

    use super::*;
    use crate::config::QueryType;
    use crate::testing::a;
    use crate::testing::aaaa;
    use crate::testing::ns;
    use crate::testing::MockExchange;

    fn query(exchange: MockExchange, query_type: QueryType) -> AuthorityQuery {
        let config = TraceConfig::builder().query_type(query_type).build();
        AuthorityQuery::new(Arc::new(exchange), Arc::new(config))
    }

    fn domain() -> Name {
        Name::from_str("www.example.com.").unwrap()
    }

    #[tokio::test]
    async fn prefers_answer_section() {
        let exchange = MockExchange::new()
            .answer(
                "192.0.2.1",
                "www.example.com.",
                RecordType::A,
                vec![a("www.example.com.", "203.0.113.5")],
            )
            .authority(
                "192.0.2.1",
                "www.example.com.",
                RecordType::A,
                vec![ns("example.com.", "ns1.example.com.")],
            );
        let got = query(exchange, QueryType::A)
            .query(&domain(), "192.0.2.1".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(got, vec![a("www.example.com.", "203.0.113.5")]);
    }

    #[tokio::test]
    async fn falls_back_to_authority_section() {
        let exchange = MockExchange::new().authority(
            "192.0.2.1",
            "www.example.com.",
            RecordType::A,
            vec![
                ns("example.com.", "ns1.example.com."),
                ns("example.com.", "ns2.example.com."),
            ],
        );
        let got = query(exchange, QueryType::A)
            .query(&domain(), "192.0.2.1".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(got.len(), 2);
    }

    #[tokio::test]
    async fn uses_configured_record_type() {
        let exchange = MockExchange::new().answer(
            "2001:db8::53",
            "www.example.com.",
            RecordType::AAAA,
            vec![aaaa("www.example.com.", "2001:db8::80")],
        );
        let got = query(exchange, QueryType::Aaaa)
            .query(&domain(), "2001:db8::53".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let got = query(MockExchange::new(), QueryType::A)
            .query(&domain(), "192.0.2.99".parse().unwrap())
            .await;
        assert!(matches!(got, Err(TraceError::QueryTimeout { .. })));
    }
}
