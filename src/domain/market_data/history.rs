use std::collections::HashMap;

use crate::domain::{
    errors::AppError,
    logging::LogComponent,
    market_data::{Candle, CandleSeries, CandleStorage, Symbol, TimeInterval},
};
use crate::{log_debug, log_warn};

/// Identifies one persisted candle sequence.
///
/// With `interval: None` every interval of a pair shares one record stored
/// under the bare symbol (`ethusdt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub symbol: Symbol,
    pub interval: Option<TimeInterval>,
}

impl SeriesKey {
    pub fn new(symbol: Symbol, interval: TimeInterval, per_interval: bool) -> Self {
        Self { symbol, interval: per_interval.then_some(interval) }
    }

    pub fn symbol_only(symbol: Symbol) -> Self {
        Self { symbol, interval: None }
    }

    pub fn storage_key(&self) -> String {
        match self.interval {
            None => self.symbol.stream_name().to_string(),
            Some(interval) => format!("{}@{}", self.symbol.stream_name(), interval),
        }
    }
}

/// What [`CandleHistory::record`] did with one candle
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// Not newer than the last candle, nothing changed
    Rejected,
    /// Appended and written to storage
    Persisted,
    /// Appended in memory only; the storage write failed
    Unsaved(AppError),
}

impl Recorded {
    pub fn appended(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Per-series candle history mirrored into a [`CandleStorage`].
pub struct CandleHistory {
    series: HashMap<SeriesKey, CandleSeries>,
    storage: Box<dyn CandleStorage>,
}

impl CandleHistory {
    pub fn new(storage: Box<dyn CandleStorage>) -> Self {
        Self { series: HashMap::new(), storage }
    }

    /// Append `candle` if strictly newer than the last stored one and persist
    /// the whole series. The in-memory series keeps the candle even when the
    /// write fails.
    pub fn record(&mut self, key: SeriesKey, candle: Candle) -> Recorded {
        let storage_key = key.storage_key();
        let series = Self::series_entry(&mut self.series, self.storage.as_ref(), key);
        if !series.push_if_newer(candle) {
            return Recorded::Rejected;
        }
        if let Err(e) = self.storage.save(&storage_key, series.as_slice()) {
            return Recorded::Unsaved(e);
        }
        log_debug!(
            LogComponent::Domain("History"),
            "stored candle {} for {} ({} total)",
            candle.time,
            storage_key,
            series.len()
        );
        Recorded::Persisted
    }

    /// Cached sequence for `key`, empty when nothing is stored.
    pub fn snapshot(&mut self, key: SeriesKey) -> Vec<Candle> {
        Self::series_entry(&mut self.series, self.storage.as_ref(), key).as_slice().to_vec()
    }

    pub fn len(&self, key: &SeriesKey) -> usize {
        self.series.get(key).map_or(0, CandleSeries::len)
    }

    fn series_entry<'a>(
        series: &'a mut HashMap<SeriesKey, CandleSeries>,
        storage: &dyn CandleStorage,
        key: SeriesKey,
    ) -> &'a mut CandleSeries {
        series.entry(key).or_insert_with(|| {
            let storage_key = key.storage_key();
            match storage.load(&storage_key) {
                Ok(Some(candles)) => CandleSeries::from_candles(candles),
                Ok(None) => CandleSeries::new(),
                Err(e) => {
                    log_warn!(
                        LogComponent::Domain("History"),
                        "discarding unreadable cache for {}: {}",
                        storage_key,
                        e
                    );
                    CandleSeries::new()
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_bare_symbol_by_default() {
        let key = SeriesKey::new(Symbol::BnbUsdt, TimeInterval::FiveMinutes, false);
        assert_eq!(key.storage_key(), "bnbusdt");
    }

    #[test]
    fn per_interval_key_appends_interval() {
        let key = SeriesKey::new(Symbol::EthUsdt, TimeInterval::ThreeMinutes, true);
        assert_eq!(key.storage_key(), "ethusdt@3m");
    }
}
