use crate::domain::errors::AppResult;
use crate::domain::market_data::Candle;

/// Persistence for candle sequences, one record per storage key
pub trait CandleStorage {
    /// `Ok(None)` when nothing has been stored under `key`
    fn load(&self, key: &str) -> AppResult<Option<Vec<Candle>>>;

    /// Replace the record under `key` with `candles`
    fn save(&mut self, key: &str, candles: &[Candle]) -> AppResult<()>;

    fn remove(&mut self, key: &str) -> AppResult<()>;
}
