//! Application layer: wires market streams, the cache and the chart together.

pub mod market_session;
pub mod stream_registry;

pub use market_session::*;
pub use stream_registry::*;
