mod common;

use common::candle;
use kline_chart_wasm::application::MarketSession;
use kline_chart_wasm::domain::market_data::{CandleHistory, Recorded, SeriesKey, Symbol};
use kline_chart_wasm::infrastructure::storage::MemoryCandleStorage;

fn eth() -> SeriesKey {
    SeriesKey::symbol_only(Symbol::EthUsdt)
}

#[test]
fn appended_candles_are_written_as_json_records() {
    let storage = MemoryCandleStorage::new();
    let mut session = MarketSession::new(Box::new(storage.clone()));
    session.activate(eth()).unwrap();

    session.ingest(eth(), candle(60, 3000.5)).unwrap();
    session.ingest(eth(), candle(120, 99.0)).unwrap();

    let raw = storage.raw("ethusdt").unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    insta::assert_json_snapshot!(value, @r###"
    [
      {
        "close": 3000.5,
        "high": 3001.5,
        "low": 99.0,
        "open": 100.0,
        "time": 60
      },
      {
        "close": 99.0,
        "high": 101.0,
        "low": 98.0,
        "open": 100.0,
        "time": 120
      }
    ]
    "###);
}

#[test]
fn rejected_candles_leave_the_record_untouched() {
    let storage = MemoryCandleStorage::new();
    let mut session = MarketSession::new(Box::new(storage.clone()));
    session.activate(eth()).unwrap();
    session.ingest(eth(), candle(120, 3000.0)).unwrap();
    let before = storage.raw("ethusdt");

    let same = session.ingest(eth(), candle(120, 3100.0)).unwrap();
    let older = session.ingest(eth(), candle(60, 2900.0)).unwrap();

    assert!(!same.appended && !same.displayed);
    assert!(!older.appended && !older.displayed);
    assert_eq!(storage.raw("ethusdt"), before);
}

#[test]
fn reload_resumes_from_the_stored_record() {
    let storage = MemoryCandleStorage::new();
    {
        let mut session = MarketSession::new(Box::new(storage.clone()));
        session.activate(eth()).unwrap();
        session.ingest(eth(), candle(60, 3000.0)).unwrap();
        session.ingest(eth(), candle(120, 3001.0)).unwrap();
    }

    let mut reloaded = MarketSession::new(Box::new(storage.clone()));
    reloaded.activate(eth()).unwrap();
    assert_eq!(reloaded.displayed().len(), 2);

    assert!(!reloaded.ingest(eth(), candle(120, 3005.0)).unwrap().persisted);
    assert!(reloaded.ingest(eth(), candle(180, 3002.0)).unwrap().persisted);
    assert_eq!(reloaded.history_len(&eth()), 3);
}

#[test]
fn unreadable_record_starts_an_empty_history() {
    let storage = MemoryCandleStorage::new();
    storage.insert_raw("ethusdt", "{not json");
    let mut history = CandleHistory::new(Box::new(storage.clone()));

    assert!(history.snapshot(eth()).is_empty());
    assert_eq!(history.record(eth(), candle(60, 3000.0)), Recorded::Persisted);
    assert_eq!(history.snapshot(eth()), [candle(60, 3000.0)]);
}
