pub mod timeout;
pub mod unique;

pub use timeout::with_timeout;
pub use unique::unique_strings;
