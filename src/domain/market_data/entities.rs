use serde::{Deserialize, Serialize};

/// Domain entity - Candle
///
/// Field names double as the persisted record format and the bar format
/// the chart widget consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time, whole seconds since the epoch
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: u64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time, open, high, low, close }
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Domain entity - time ordered candle sequence
///
/// Only strictly newer candles are appended, so the sequence stays sorted
/// by `time` and never holds two candles for the same bucket once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from cached data, restoring time order if the cache was edited.
    /// Candles sharing a time collapse into the last one.
    pub fn from_candles(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.time);
        candles.dedup_by(|next, kept| {
            if next.time == kept.time {
                *kept = *next;
                true
            } else {
                false
            }
        });
        Self { candles }
    }

    /// Append `candle` when the series is empty or it is strictly newer than
    /// the last stored candle. Returns whether it was appended.
    pub fn push_if_newer(&mut self, candle: Candle) -> bool {
        match self.candles.last() {
            Some(last) if last.time >= candle.time => false,
            _ => {
                self.candles.push(candle);
                true
            }
        }
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn into_vec(self) -> Vec<Candle> {
        self.candles
    }

    /// Lowest low and highest high across the series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.candles.first()?;
        Some(self.candles.iter().fold((first.low, first.high), |(lo, hi), c| {
            (lo.min(c.low), hi.max(c.high))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: u64, close: f64) -> Candle {
        Candle::new(time, 100.0, close.max(100.0), close.min(100.0), close)
    }

    #[test]
    fn rejects_equal_and_older_times() {
        let mut series = CandleSeries::new();
        assert!(series.push_if_newer(candle(60, 101.0)));
        assert!(!series.push_if_newer(candle(60, 102.0)));
        assert!(!series.push_if_newer(candle(0, 99.0)));
        assert!(series.push_if_newer(candle(120, 103.0)));
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().map(|c| c.close), Some(103.0));
    }

    #[test]
    fn cached_data_is_sorted_on_load() {
        let series = CandleSeries::from_candles(vec![candle(180, 1.0), candle(60, 2.0), candle(120, 3.0)]);
        let times: Vec<u64> = series.as_slice().iter().map(|c| c.time).collect();
        assert_eq!(times, [60, 120, 180]);
    }

    #[test]
    fn duplicate_times_keep_the_last_candle() {
        let series = CandleSeries::from_candles(vec![candle(120, 5.0), candle(60, 1.0), candle(60, 2.0)]);
        let bars: Vec<(u64, f64)> = series.as_slice().iter().map(|c| (c.time, c.close)).collect();
        assert_eq!(bars, [(60, 2.0), (120, 5.0)]);
    }

    #[test]
    fn price_range_spans_wicks() {
        let series = CandleSeries::from_candles(vec![
            Candle::new(0, 10.0, 12.0, 9.0, 11.0),
            Candle::new(60, 11.0, 15.0, 10.5, 14.0),
        ]);
        assert_eq!(series.price_range(), Some((9.0, 15.0)));
        assert_eq!(CandleSeries::new().price_range(), None);
    }
}
