mod common;

use kline_chart_wasm::domain::errors::AppError;
use kline_chart_wasm::domain::market_data::{Candle, Symbol, TimeInterval};
use kline_chart_wasm::infrastructure::websocket::{BinanceWebSocketClient, StreamEndpoint};

#[test]
fn parses_kline_message() {
    let client = BinanceWebSocketClient::new(Symbol::EthUsdt, TimeInterval::OneMinute);
    let candle = client.parse_message(&common::kline_message(1_700_000_040_123, "150.25")).unwrap();
    assert_eq!(candle, Candle::new(1_700_000_040, 100.0, 200.0, 50.0, 150.25));
}

#[test]
fn parses_minimal_payload() {
    let client = BinanceWebSocketClient::new(Symbol::EthUsdt, TimeInterval::OneMinute);
    let msg = r#"{"k":{"t":123456789,"o":"10000.0","h":"10100.0","l":"9900.0","c":"10050.0"}}"#;
    let candle = client.parse_message(msg).unwrap();
    assert_eq!(candle.time, 123_456);
    assert_eq!(candle.close, 10050.0);
}

#[test]
fn missing_field_is_a_parse_error() {
    let client = BinanceWebSocketClient::new(Symbol::EthUsdt, TimeInterval::OneMinute);
    let msg = r#"{"k":{"t":1,"o":"1","h":"1","l":"1"}}"#;
    assert!(matches!(client.parse_message(msg), Err(AppError::Parse(_))));
    assert!(matches!(client.parse_message("not json"), Err(AppError::Parse(_))));
}

#[test]
fn stream_url_follows_kline_pattern() {
    let client = BinanceWebSocketClient::new(Symbol::BnbUsdt, TimeInterval::ThreeMinutes);
    assert_eq!(client.stream_url(), "wss://stream.binance.com:9443/ws/bnbusdt@kline_3m");

    let custom = StreamEndpoint { host: "testnet.example:443".to_string(), kline_suffix: "@kline_".to_string() };
    let client = client.with_endpoint(custom);
    assert_eq!(client.stream_url(), "wss://testnet.example:443/ws/bnbusdt@kline_3m");
}
