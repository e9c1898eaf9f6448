use std::time::Duration;

use futures::StreamExt;

use crate::domain::{
    errors::AppResult,
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{Candle, Symbol, TimeInterval},
};
use crate::infrastructure::websocket::{
    dto::KlineEvent,
    transport::{FrameStream, GlooTransport, StreamTransport},
};
use crate::log_error;

pub const DEFAULT_STREAM_HOST: &str = "stream.binance.com:9443";
pub const DEFAULT_KLINE_SUFFIX: &str = "@kline_";
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Where kline streams are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEndpoint {
    pub host: String,
    pub kline_suffix: String,
}

impl Default for StreamEndpoint {
    fn default() -> Self {
        Self { host: DEFAULT_STREAM_HOST.to_string(), kline_suffix: DEFAULT_KLINE_SUFFIX.to_string() }
    }
}

impl StreamEndpoint {
    /// `wss://<host>/ws/<symbol><kline_suffix><interval>`
    pub fn kline_url(&self, symbol: Symbol, interval: TimeInterval) -> String {
        format!(
            "wss://{}/ws/{}{}{}",
            self.host,
            symbol.stream_name(),
            self.kline_suffix,
            interval.to_binance_str()
        )
    }
}

/// What the stream loop reports to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Opened,
    Candle(Candle),
    /// Emitted once per failure event, right before the reconnect timer starts.
    Reconnecting { attempt: u32, reason: String },
}

/// Binance kline stream client for one symbol and interval
pub struct BinanceWebSocketClient<T: StreamTransport = GlooTransport> {
    endpoint: StreamEndpoint,
    symbol: Symbol,
    interval: TimeInterval,
    reconnect_delay: Duration,
    transport: T,
}

impl BinanceWebSocketClient<GlooTransport> {
    pub fn new(symbol: Symbol, interval: TimeInterval) -> Self {
        Self::with_transport(symbol, interval, GlooTransport)
    }
}

impl<T: StreamTransport> BinanceWebSocketClient<T> {
    pub fn with_transport(symbol: Symbol, interval: TimeInterval, transport: T) -> Self {
        Self {
            endpoint: StreamEndpoint::default(),
            symbol,
            interval,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            transport,
        }
    }

    pub fn with_endpoint(mut self, endpoint: StreamEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn stream_url(&self) -> String {
        self.endpoint.kline_url(self.symbol, self.interval)
    }

    /// Parse one kline message into a candle
    pub fn parse_message(&self, data: &str) -> AppResult<Candle> {
        let event: KlineEvent = serde_json::from_str(data)?;
        event.kline.to_candle()
    }

    /// Stream candles forever, reopening the socket after every failure.
    ///
    /// Only an abort of the enclosing future stops the loop; the pending
    /// reconnect timer is dropped with it.
    pub async fn run_stream<F>(&self, mut on_event: F)
    where
        F: FnMut(StreamEvent),
    {
        let url = self.stream_url();
        let mut attempt = 0u32;

        loop {
            let reason = match self.transport.open(&url) {
                Ok(frames) => {
                    get_logger().info(
                        LogComponent::Infrastructure("BinanceWS"),
                        &format!("🔌 Connected to {url}"),
                    );
                    on_event(StreamEvent::Opened);
                    self.pump(frames, &mut attempt, &mut on_event).await
                }
                Err(e) => e.to_string(),
            };

            attempt += 1;
            get_logger().log_with_metadata(
                LogLevel::Warn,
                LogComponent::Infrastructure("BinanceWS"),
                &format!(
                    "🔌 {} stream lost ({reason}), reconnecting in {}ms",
                    self.symbol,
                    self.reconnect_delay.as_millis()
                ),
                &format!("attempt={attempt} url={url}"),
            );
            on_event(StreamEvent::Reconnecting { attempt, reason });
            self.transport.wait(self.reconnect_delay).await;
        }
    }

    /// Forward candles until the session fails; returns the failure reason.
    async fn pump<F>(&self, mut frames: FrameStream, attempt: &mut u32, on_event: &mut F) -> String
    where
        F: FnMut(StreamEvent),
    {
        while let Some(frame) = frames.next().await {
            match frame {
                Ok(text) => match self.parse_message(&text) {
                    Ok(candle) => {
                        *attempt = 0;
                        on_event(StreamEvent::Candle(candle));
                    }
                    Err(e) => {
                        get_logger().warn(
                            LogComponent::Infrastructure("BinanceWS"),
                            &format!("❌ Dropping malformed message: {e}"),
                        );
                    }
                },
                Err(e) => {
                    log_error!(LogComponent::Infrastructure("BinanceWS"), "❌ WebSocket error: {}", e);
                    return e.to_string();
                }
            }
        }
        "connection closed".to_string()
    }
}
