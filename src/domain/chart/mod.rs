//! Chart aggregate: the renderer seam and its presentation options.

pub mod value_objects;

pub use value_objects::*;

use crate::domain::{errors::AppResult, market_data::Candle};

/// Anything that can display a candle series.
///
/// Rendering itself is delegated: implementations wrap a charting widget or a
/// canvas, the domain only decides which candles they receive.
pub trait ChartSink {
    /// Replace everything shown with `candles` (possibly empty).
    fn set_data(&mut self, candles: &[Candle]) -> AppResult<()>;

    /// Show one more candle after the ones already displayed.
    fn update(&mut self, candle: &Candle) -> AppResult<()>;

    fn resize(&mut self, _width: u32) {}

    fn dispose(&mut self);
}
