mod global;
mod trace;

pub use global::GlobalArgs;
pub use trace::TraceArgs;
