mod common;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use futures::executor::block_on;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::stream::{self, StreamExt};
use kline_chart_wasm::domain::errors::{AppError, AppResult};
use kline_chart_wasm::domain::market_data::{Symbol, TimeInterval};
use kline_chart_wasm::infrastructure::websocket::{
    BinanceWebSocketClient, FrameStream, StreamEvent, StreamTransport,
};

/// Resolves on its second poll so an abort can be observed between retries.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

type Session = AppResult<Vec<AppResult<String>>>;

#[derive(Clone, Default)]
struct ScriptedTransport {
    sessions: Rc<RefCell<VecDeque<Session>>>,
    opened: Rc<RefCell<Vec<String>>>,
    waits: Rc<RefCell<Vec<Duration>>>,
}

impl ScriptedTransport {
    fn new(sessions: Vec<Session>) -> Self {
        Self { sessions: Rc::new(RefCell::new(sessions.into())), ..Self::default() }
    }
}

impl StreamTransport for ScriptedTransport {
    fn open(&self, url: &str) -> AppResult<FrameStream> {
        self.opened.borrow_mut().push(url.to_string());
        let frames = self
            .sessions
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("refused".to_string())))?;
        Ok(stream::iter(frames).boxed_local())
    }

    fn wait(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        self.waits.borrow_mut().push(delay);
        YieldOnce(false).boxed_local()
    }
}

/// Run the client until `stop_after` reconnects were reported.
fn run_until_reconnects(transport: ScriptedTransport, stop_after: usize) -> Vec<StreamEvent> {
    let client = BinanceWebSocketClient::with_transport(Symbol::EthUsdt, TimeInterval::OneMinute, transport);
    let events = Rc::new(RefCell::new(Vec::new()));
    let (handle, registration) = AbortHandle::new_pair();

    let sink = events.clone();
    let fut = client.run_stream(move |event| {
        let reconnecting = matches!(event, StreamEvent::Reconnecting { .. });
        sink.borrow_mut().push(event);
        if reconnecting
            && sink.borrow().iter().filter(|e| matches!(e, StreamEvent::Reconnecting { .. })).count()
                >= stop_after
        {
            handle.abort();
        }
    });
    assert!(block_on(Abortable::new(fut, registration)).is_err());
    events.borrow().clone()
}

fn reconnects(events: &[StreamEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            StreamEvent::Reconnecting { attempt, .. } => Some(*attempt),
            _ => None,
        })
        .collect()
}

#[test]
fn one_reconnect_per_failure_event() {
    let transport = ScriptedTransport::new(vec![
        // socket error after one candle
        Ok(vec![
            Ok(common::kline_message(60_000, "150")),
            Err(AppError::Network("reset".to_string())),
            // never read: the session already failed
            Ok(common::kline_message(120_000, "151")),
        ]),
        // open fails outright
        Err(AppError::Network("refused".to_string())),
        // server closes cleanly after one candle
        Ok(vec![Ok(common::kline_message(180_000, "152"))]),
    ]);

    let events = run_until_reconnects(transport.clone(), 3);

    assert_eq!(reconnects(&events), [1, 2, 1]);
    let candles = events.iter().filter(|e| matches!(e, StreamEvent::Candle(_))).count();
    assert_eq!(candles, 2);
    assert_eq!(*transport.waits.borrow(), vec![Duration::from_secs(1); 3]);
    assert_eq!(transport.opened.borrow().len(), 3);
}

#[test]
fn reconnect_uses_configured_fixed_delay() {
    let transport = ScriptedTransport::new(vec![]);
    let client = BinanceWebSocketClient::with_transport(Symbol::DotUsdt, TimeInterval::FiveMinutes, transport.clone())
        .with_reconnect_delay(Duration::from_millis(250));
    let (handle, registration) = AbortHandle::new_pair();
    let mut count = 0;
    let fut = client.run_stream(move |_| {
        count += 1;
        if count == 2 {
            handle.abort();
        }
    });
    let _ = block_on(Abortable::new(fut, registration));

    assert_eq!(*transport.waits.borrow(), vec![Duration::from_millis(250); 2]);
    assert!(transport.opened.borrow().iter().all(|url| url.ends_with("/ws/dotusdt@kline_5m")));
}

#[test]
fn malformed_messages_do_not_end_the_session() {
    let transport = ScriptedTransport::new(vec![Ok(vec![
        Ok("{\"k\":{}}".to_string()),
        Ok(common::kline_message(60_000, "not-a-number")),
        Ok(common::kline_message(120_000, "150")),
    ])]);

    let events = run_until_reconnects(transport, 1);

    assert_eq!(events.first(), Some(&StreamEvent::Opened));
    let candles: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            StreamEvent::Candle(c) => Some(c.time),
            _ => None,
        })
        .collect();
    assert_eq!(candles, [120]);
    assert_eq!(reconnects(&events), [1]);
}
