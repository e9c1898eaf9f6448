use std::cell::RefCell;
use std::rc::Rc;

use futures::{
    FutureExt,
    future::{AbortHandle, Abortable, LocalBoxFuture},
};

use crate::application::market_session::{MarketSession, TickOutcome};
use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{SeriesKey, Symbol, TimeInterval},
};
use crate::infrastructure::websocket::{BinanceWebSocketClient, StreamEvent, StreamTransport};
use crate::log_info;

/// The pair a stream is subscribed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamKey {
    pub symbol: Symbol,
    pub interval: TimeInterval,
}

/// Owns the single live market stream.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    active: Option<(StreamKey, AbortHandle)>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle` as the live stream, aborting whichever stream was live
    /// before (its socket and any pending reconnect timer go with it).
    pub fn replace(&mut self, key: StreamKey, handle: AbortHandle) {
        if let Some((previous, old)) = self.active.replace((key, handle)) {
            old.abort();
            log_info!(
                LogComponent::Application("StreamRegistry"),
                "🛑 Stopped {}@{}",
                previous.symbol,
                previous.interval
            );
        }
    }

    pub fn abort_all(&mut self) {
        if let Some((_, handle)) = self.active.take() {
            handle.abort();
        }
    }

    pub fn active_key(&self) -> Option<StreamKey> {
        self.active.as_ref().map(|(key, _)| *key)
    }
}

/// Build the stream task feeding `session`, plus the handle that stops it.
///
/// Every candle goes through [`MarketSession::ingest`] before `on_event`
/// sees the event.
pub fn market_stream<T, F>(
    session: Rc<RefCell<MarketSession>>,
    client: BinanceWebSocketClient<T>,
    key: SeriesKey,
    mut on_event: F,
) -> (AbortHandle, LocalBoxFuture<'static, ()>)
where
    T: StreamTransport + 'static,
    F: FnMut(&StreamEvent, TickOutcome) + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    let stream_name = client.stream_url();

    let task = async move {
        client
            .run_stream(|event| {
                let outcome = match &event {
                    StreamEvent::Candle(candle) => {
                        session.borrow_mut().ingest(key, *candle).unwrap_or_else(|e| {
                            get_logger().warn(
                                LogComponent::Application("MarketStream"),
                                &format!("⚠️ Chart update failed: {e}"),
                            );
                            TickOutcome::default()
                        })
                    }
                    _ => TickOutcome::default(),
                };
                on_event(&event, outcome);
            })
            .await;
    };

    let future = Abortable::new(task, registration)
        .map(move |result| {
            if result.is_err() {
                get_logger().debug(
                    LogComponent::Application("MarketStream"),
                    &format!("stream {stream_name} aborted"),
                );
            }
        })
        .boxed_local();

    (handle, future)
}

/// Run [`market_stream`] on the browser's local executor.
pub fn spawn_market_stream<T, F>(
    session: Rc<RefCell<MarketSession>>,
    client: BinanceWebSocketClient<T>,
    key: SeriesKey,
    on_event: F,
) -> AbortHandle
where
    T: StreamTransport + 'static,
    F: FnMut(&StreamEvent, TickOutcome) + 'static,
{
    let (handle, future) = market_stream(session, client, key, on_event);
    wasm_bindgen_futures::spawn_local(future);
    handle
}
