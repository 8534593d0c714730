use std::net::IpAddr;

use serde::Serialize;

/// Everything learned at one delegation depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelResult {
    /// Depth of this level, starting at 1.
    pub level: usize,

    /// Fully qualified name that was queried.
    pub domain: String,

    /// One entry per name server address consulted.
    pub authorities: Vec<AuthorityOutcome>,

    /// Deduplicated name servers delegated to by this level. Empty on the last
    /// level of a trace.
    pub delegations: Vec<String>,

    /// Set when the whole level failed.
    pub error: Option<String>,
}

impl LevelResult {
    pub(crate) fn failed(level: usize, domain: &str, error: impl ToString) -> Self {
        Self {
            level,
            domain: domain.to_owned(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

/// What one name server address answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorityOutcome {
    /// Name server host name.
    pub hostname: String,

    /// Address that was queried. `None` if the host name did not resolve.
    pub address: Option<IpAddr>,

    /// Delegated name servers first, then address and CNAME targets. No
    /// duplicates.
    pub responses: Vec<String>,

    /// Why this name server yielded no responses.
    pub error: Option<String>,
}
