//! Level-by-level delegation tracing from the root servers down.

mod fanout;
mod hints;
mod lookup;
mod query;
mod tracer;

pub use fanout::Authorities;
pub use fanout::FanOut;
pub use hints::ROOT_HINTS;
pub use lookup::AddressResolver;
pub use query::AuthorityQuery;
pub use tracer::Tracer;

/// Appends the root label separator if it is missing.
#[must_use]
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_owned()
    } else {
        format!("{name}.")
    }
}
