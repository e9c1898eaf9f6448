pub mod charting;
pub mod services;
pub mod storage;
pub mod websocket;
