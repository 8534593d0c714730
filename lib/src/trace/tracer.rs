use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::warn;

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::model::LevelResult;
use crate::trace::fqdn;
use crate::trace::FanOut;
use crate::trace::ROOT_HINTS;
use crate::transport::Exchange;

/// Walks the delegation chain of a domain from the root servers down, one
/// level at a time.
#[derive(Clone)]
pub struct Tracer {
    config: Arc<TraceConfig>,
    fanout: FanOut,
    hints: Vec<String>,
}

impl Tracer {
    /// Creates a tracer that starts at the root servers.
    pub fn new(config: TraceConfig, exchange: impl Exchange + 'static) -> Self {
        let config = Arc::new(config);
        let exchange: Arc<dyn Exchange> = Arc::new(exchange);
        Self {
            fanout: FanOut::new(exchange, config.clone()),
            config,
            hints: ROOT_HINTS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replaces the name servers queried at level 1.
    #[must_use]
    pub fn with_hints<S: Into<String>>(mut self, hints: impl IntoIterator<Item = S>) -> Self {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Settings this tracer was built with.
    #[must_use]
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Traces `domain`, returning one [`LevelResult`] per level in order.
    ///
    /// Stops after the first level that delegates nowhere. A level that fails
    /// as a whole is recorded as an error-only result and ends the trace, so
    /// the returned list is never empty.
    #[instrument(skip(self))]
    pub async fn trace(&self, domain: &str) -> Vec<LevelResult> {
        let domain = fqdn(domain.trim());
        if let Err(error) = check_registrable(&domain) {
            warn!(%error, "refusing to trace");
            return vec![LevelResult::failed(1, &domain, error)];
        }

        let mut results = Vec::new();
        let mut servers = self.hints.clone();
        for level in 1.. {
            if level > self.config.max_levels {
                let error = TraceError::DepthExceeded(self.config.max_levels);
                warn!(%error, "giving up");
                results.push(LevelResult::failed(level, &domain, error));
                break;
            }

            debug!(level, servers = servers.len(), "tracing level");
            let authorities = match self.fanout.resolve(&domain, &servers).await {
                Ok(authorities) => authorities,
                Err(error) => {
                    results.push(LevelResult::failed(level, &domain, error));
                    break;
                }
            };

            if authorities.outcomes.is_empty() {
                results.push(LevelResult::failed(
                    level,
                    &domain,
                    TraceError::NoAuthoritiesFound,
                ));
                break;
            }

            info!(
                level,
                authorities = authorities.outcomes.len(),
                delegations = authorities.delegations.len(),
                "level done"
            );
            servers.clone_from(&authorities.delegations);
            results.push(LevelResult {
                level,
                domain: domain.clone(),
                authorities: authorities.outcomes,
                delegations: authorities.delegations,
                error: None,
            });

            if servers.is_empty() {
                break;
            }
        }

        results
    }
}

/// Requires a registrable domain of at least two labels under a public
/// suffix.
fn check_registrable(domain: &str) -> Result<(), TraceError> {
    let host = domain.trim_end_matches('.').to_ascii_lowercase();
    let invalid = || TraceError::InvalidDomain(domain.to_owned());
    let registrable = psl::domain_str(&host).ok_or_else(invalid)?;
    if registrable.split('.').count() < 2 {
        return Err(invalid());
    }
    Ok(())
}
