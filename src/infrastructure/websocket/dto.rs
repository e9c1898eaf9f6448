use serde::Deserialize;

use crate::domain::{
    errors::{AppError, AppResult},
    market_data::{Candle, open_time_to_secs},
};

/// DTO for a Binance kline stream event
#[derive(Debug, Deserialize)]
pub struct KlineEvent {
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,
    #[serde(rename = "E", default)]
    pub event_time: Option<u64>,
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,
    #[serde(rename = "k")]
    pub kline: KlinePayload,
}

/// Kline body. Prices arrive as numeric strings, times in milliseconds.
#[derive(Debug, Deserialize)]
pub struct KlinePayload {
    #[serde(rename = "t")]
    pub open_time: u64,
    #[serde(rename = "T", default)]
    pub close_time: Option<u64>,
    #[serde(rename = "i", default)]
    pub interval: Option<String>,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "x", default)]
    pub is_closed: bool,
}

impl KlinePayload {
    /// Convert to a domain candle, rejecting non-numeric or inconsistent prices.
    pub fn to_candle(&self) -> AppResult<Candle> {
        let open = parse_price("open", &self.open)?;
        let high = parse_price("high", &self.high)?;
        let low = parse_price("low", &self.low)?;
        let close = parse_price("close", &self.close)?;

        if high < open.max(close) || low > open.min(close) || low > high {
            return Err(AppError::Validation(format!(
                "inconsistent OHLC o={open} h={high} l={low} c={close}"
            )));
        }

        Ok(Candle::new(open_time_to_secs(self.open_time), open, high, low, close))
    }
}

fn parse_price(field: &str, raw: &str) -> AppResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| AppError::Parse(format!("invalid {field} price {raw:?}: {e}")))?;
    if !value.is_finite() {
        return Err(AppError::Validation(format!("non-finite {field} price {raw:?}")));
    }
    Ok(value)
}
