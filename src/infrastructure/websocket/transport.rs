use std::time::Duration;

use futures::{
    StreamExt,
    future::{FutureExt, LocalBoxFuture},
    stream::LocalBoxStream,
};
use gloo_net::websocket::{Message, futures::WebSocket};

use crate::domain::errors::{AppError, AppResult};

/// Text frames of one socket session. The stream ends when the socket closes.
pub type FrameStream = LocalBoxStream<'static, AppResult<String>>;

/// Socket and timer primitives used by the stream loop
pub trait StreamTransport {
    fn open(&self, url: &str) -> AppResult<FrameStream>;

    /// Reconnect timer
    fn wait(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Browser transport based on gloo
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

impl StreamTransport for GlooTransport {
    fn open(&self, url: &str) -> AppResult<FrameStream> {
        let ws = WebSocket::open(url)
            .map_err(|e| AppError::Network(format!("failed to open WebSocket: {e:?}")))?;

        Ok(ws
            .filter_map(|msg| async move {
                match msg {
                    Ok(Message::Text(text)) => Some(Ok(text)),
                    // Binance kline streams are text only
                    Ok(Message::Bytes(_)) => None,
                    Err(e) => Some(Err(AppError::Network(format!("{e:?}")))),
                }
            })
            .boxed_local())
    }

    fn wait(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(delay).boxed_local()
    }
}
