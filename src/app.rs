use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    application::{MarketSession, StreamKey, StreamRegistry, spawn_market_stream},
    config::AppConfig,
    domain::{
        logging::{LogComponent, get_logger},
        market_data::{Symbol, TimeInterval},
    },
    global_state::{
        ConnectionStatus, candle_count, connection_status, current_interval, current_symbol,
        last_close,
    },
    infrastructure::{
        charting::mount_chart,
        storage::default_storage,
        websocket::{BinanceWebSocketClient, StreamEvent},
    },
};

/// 🦀 Live candlestick chart page
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    current_symbol().set(config.default_symbol);
    current_interval().set(config.default_interval);

    let session = Rc::new(RefCell::new(MarketSession::new(default_storage())));
    let registry = Rc::new(RefCell::new(StreamRegistry::new()));
    let chart_ref = create_node_ref::<Div>();
    let chart_height = config.chart.height;

    // Mount the chart once the container is in the DOM; runs to completion once.
    {
        let session = session.clone();
        let config = config.clone();
        create_effect(move |mounted: Option<bool>| {
            if mounted == Some(true) {
                return true;
            }
            let Some(container) = chart_ref.get() else {
                return false;
            };
            let width = u32::try_from(container.client_width()).unwrap_or(0);
            let options = config
                .chart
                .clone()
                .with_width(if width > 0 { width } else { config.chart.width });
            match mount_chart(&container, &options, &config.series_style) {
                Ok(chart) => {
                    if let Err(e) = session.borrow_mut().attach_chart(chart) {
                        get_logger().error(LogComponent::Presentation("App"), &e.to_string());
                    }
                }
                Err(e) => {
                    get_logger().error(
                        LogComponent::Presentation("App"),
                        &format!("❌ Chart unavailable: {e}"),
                    );
                }
            }
            true
        });
    }

    // One stream per selected pair
    {
        let session = session.clone();
        let registry = registry.clone();
        let config = config.clone();
        create_effect(move |_| {
            let symbol = current_symbol().get();
            let interval = current_interval().get();
            switch_pair(&session, &registry, &config, symbol, interval);
        });
    }

    let resize_listener = {
        let session = session.clone();
        window_event_listener(ev::resize, move |_| {
            if let Some(container) = chart_ref.get_untracked() {
                if let Ok(width) = u32::try_from(container.client_width()) {
                    session.borrow_mut().resize_chart(width);
                }
            }
        })
    };

    on_cleanup(move || {
        resize_listener.remove();
        registry.borrow_mut().abort_all();
        session.borrow_mut().detach_chart();
    });

    view! {
        <style>
            {r#"
            .container {
                font-family: -apple-system, BlinkMacSystemFont, sans-serif;
                padding: 20px;
            }
            .dropdown-container {
                margin: 8px 0;
            }
            .dropdown {
                padding: 4px 8px;
                border-radius: 4px;
            }
            .status {
                display: flex;
                gap: 24px;
                margin-top: 10px;
                font-size: 14px;
            }
            "#}
        </style>
        <div class="container">
            <h1 class="title">"Binance Market Data WebSocket (TradingView Charts)"</h1>
            <SymbolSelect />
            <IntervalSelect />
            <div
                node_ref=chart_ref
                id="chart-container"
                style=format!("width: 100%; height: {chart_height}px; margin-top: 20px; color: black;")
            />
            <StatusLine />
        </div>
    }
}

/// Tear down the live stream, show the cache for the new pair and stream it.
pub fn switch_pair(
    session: &Rc<RefCell<MarketSession>>,
    registry: &Rc<RefCell<StreamRegistry>>,
    config: &AppConfig,
    symbol: Symbol,
    interval: TimeInterval,
) {
    // Stop the old pair first so none of its ticks land after the switch.
    registry.borrow_mut().abort_all();

    let key = config.series_key(symbol, interval);
    {
        let mut session = session.borrow_mut();
        if let Err(e) = session.activate(key) {
            get_logger().warn(LogComponent::Presentation("App"), &format!("⚠️ {e}"));
        }
        candle_count().set(session.displayed().len());
        last_close().set(session.displayed().last().map(|c| c.close));
    }
    connection_status().set(ConnectionStatus::Connecting);

    let client = BinanceWebSocketClient::new(symbol, interval)
        .with_endpoint(config.endpoint.clone())
        .with_reconnect_delay(config.reconnect_delay);

    let handle = spawn_market_stream(session.clone(), client, key, |event, outcome| match event {
        StreamEvent::Opened => connection_status().set(ConnectionStatus::Connecting),
        StreamEvent::Candle(candle) => {
            if connection_status().get_untracked() != ConnectionStatus::Live {
                connection_status().set(ConnectionStatus::Live);
            }
            last_close().set(Some(candle.close));
            if outcome.displayed {
                candle_count().update(|n| *n += 1);
            }
        }
        StreamEvent::Reconnecting { attempt, .. } => {
            connection_status().set(ConnectionStatus::Reconnecting { attempt: *attempt })
        }
    });

    registry.borrow_mut().replace(StreamKey { symbol, interval }, handle);
}

#[component]
fn SymbolSelect() -> impl IntoView {
    let on_change = move |ev: ev::Event| match event_target_value(&ev).parse::<Symbol>() {
        Ok(symbol) => current_symbol().set(symbol),
        Err(_) => get_logger().warn(LogComponent::Presentation("SymbolSelect"), "unknown symbol"),
    };

    view! {
        <div class="dropdown-container">
            <label for="symbolDropdown">"Select Cryptocurrency: "</label>
            <select
                id="symbolDropdown"
                class="dropdown"
                on:change=on_change
                prop:value=move || current_symbol().get().to_string()
            >
                {Symbol::iter()
                    .map(|symbol| {
                        view! {
                            <option
                                value=symbol.to_string()
                                selected=move || current_symbol().get() == symbol
                            >
                                {symbol.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn IntervalSelect() -> impl IntoView {
    let on_change = move |ev: ev::Event| match event_target_value(&ev).parse::<TimeInterval>() {
        Ok(interval) => current_interval().set(interval),
        Err(_) => get_logger().warn(LogComponent::Presentation("IntervalSelect"), "unknown interval"),
    };

    view! {
        <div class="dropdown-container">
            <label for="intervalDropdown">"Select Interval: "</label>
            <select
                id="intervalDropdown"
                class="dropdown"
                on:change=on_change
                prop:value=move || current_interval().get().to_string()
            >
                {TimeInterval::iter()
                    .map(|interval| {
                        view! {
                            <option
                                value=interval.to_string()
                                selected=move || current_interval().get() == interval
                            >
                                {interval.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// 📊 Connection state, candle count and last price
#[component]
fn StatusLine() -> impl IntoView {
    view! {
        <div class="status">
            <span>{move || connection_status().get().label()}</span>
            <span>{move || format!("Candles: {}", candle_count().get())}</span>
            <span>
                {move || match last_close().get() {
                    Some(price) => format!("Last: {price:.4}"),
                    None => "Last: -".to_string(),
                }}
            </span>
        </div>
    }
}
