#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod model;
pub mod trace;
pub mod transport;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AddressFamily;
pub use config::Protocol;
pub use config::QueryType;
pub use config::TraceConfig;
pub use error::TraceError;
pub use model::AuthorityOutcome;
pub use model::LevelResult;
pub use trace::Tracer;
pub use trace::ROOT_HINTS;
pub use transport::Exchange;
pub use transport::NetworkExchange;
