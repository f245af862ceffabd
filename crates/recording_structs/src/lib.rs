//! Common structs for recording metadata shared across crates.

mod api;
mod dataset;
mod metrics;
mod season;

pub use api::*;
pub use dataset::*;
pub use metrics::*;
pub use season::*;
