#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kline_chart_wasm::domain::chart::ChartSink;
use kline_chart_wasm::domain::errors::AppResult;
use kline_chart_wasm::domain::market_data::Candle;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    SetData(Vec<Candle>),
    Update(Candle),
    Resize(u32),
    Dispose,
}

/// Chart that records what it was asked to draw
#[derive(Debug, Default, Clone)]
pub struct RecordingChart {
    pub calls: Rc<RefCell<Vec<ChartCall>>>,
}

impl RecordingChart {
    pub fn calls(&self) -> Vec<ChartCall> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Option<ChartCall> {
        self.calls.borrow().last().cloned()
    }
}

impl ChartSink for RecordingChart {
    fn set_data(&mut self, candles: &[Candle]) -> AppResult<()> {
        self.calls.borrow_mut().push(ChartCall::SetData(candles.to_vec()));
        Ok(())
    }

    fn update(&mut self, candle: &Candle) -> AppResult<()> {
        self.calls.borrow_mut().push(ChartCall::Update(*candle));
        Ok(())
    }

    fn resize(&mut self, width: u32) {
        self.calls.borrow_mut().push(ChartCall::Resize(width));
    }

    fn dispose(&mut self) {
        self.calls.borrow_mut().push(ChartCall::Dispose);
    }
}

pub fn candle(time: u64, close: f64) -> Candle {
    Candle::new(time, 100.0, close.max(100.0) + 1.0, close.min(100.0) - 1.0, close)
}

pub fn kline_message(open_time_ms: u64, close: &str) -> String {
    format!(
        r#"{{"e":"kline","E":{open_time_ms},"s":"ETHUSDT","k":{{"t":{open_time_ms},"T":{},"s":"ETHUSDT","i":"1m","o":"100.0","h":"200.0","l":"50.0","c":"{close}","v":"12.5","x":false}}}}"#,
        open_time_ms + 59_999
    )
}
