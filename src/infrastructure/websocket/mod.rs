//! WebSocket client, transport and data transfer objects.
//!
//! Currently this module provides a client for Binance kline streams.

pub mod binance_client;
pub mod dto;
pub mod transport;

pub use binance_client::*;
pub use dto::*;
pub use transport::*;
