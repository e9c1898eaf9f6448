use crate::domain::{
    chart::ChartSink,
    errors::AppResult,
    logging::{LogComponent, get_logger},
    market_data::{Candle, CandleHistory, CandleSeries, CandleStorage, Recorded, SeriesKey},
};

/// What happened to one incoming candle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Appended to the candle history
    pub appended: bool,
    /// The history, including this candle, reached storage
    pub persisted: bool,
    /// Pushed to the chart
    pub displayed: bool,
}

/// Reconciles streamed candles with the cache and the chart.
///
/// Two sequences are kept: the persisted history per series key, and the
/// series the chart currently shows for the active key.
pub struct MarketSession {
    history: CandleHistory,
    displayed: CandleSeries,
    active: Option<SeriesKey>,
    chart: Option<Box<dyn ChartSink>>,
}

impl MarketSession {
    pub fn new(storage: Box<dyn CandleStorage>) -> Self {
        Self { history: CandleHistory::new(storage), displayed: CandleSeries::new(), active: None, chart: None }
    }

    pub fn displayed(&self) -> &[Candle] {
        self.displayed.as_slice()
    }

    pub fn history_len(&self, key: &SeriesKey) -> usize {
        self.history.len(key)
    }

    /// Switch to `key`: show exactly its cached sequence, or nothing.
    pub fn activate(&mut self, key: SeriesKey) -> AppResult<()> {
        self.displayed = CandleSeries::from_candles(self.history.snapshot(key));
        self.active = Some(key);
        get_logger().info(
            LogComponent::Application("MarketSession"),
            &format!("📊 Showing {} ({} cached candles)", key.storage_key(), self.displayed.len()),
        );
        self.push_displayed()
    }

    /// Install the renderer and hand it what is currently displayed.
    pub fn attach_chart(&mut self, chart: Box<dyn ChartSink>) -> AppResult<()> {
        if let Some(mut previous) = self.chart.replace(chart) {
            previous.dispose();
        }
        self.push_displayed()
    }

    pub fn detach_chart(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            chart.dispose();
        }
    }

    pub fn resize_chart(&mut self, width: u32) {
        if let Some(chart) = self.chart.as_mut() {
            chart.resize(width);
        }
    }

    /// Record one streamed candle for `key`.
    ///
    /// The history is persisted whenever it grows; a failed write is logged
    /// and does not keep the candle off the chart. Candles for a key other
    /// than the active one are stored but never reach the chart.
    pub fn ingest(&mut self, key: SeriesKey, candle: Candle) -> AppResult<TickOutcome> {
        let recorded = self.history.record(key, candle);
        if let Recorded::Unsaved(e) = &recorded {
            get_logger().warn(
                LogComponent::Application("MarketSession"),
                &format!("⚠️ Candle {} for {} not persisted: {e}", candle.time, key.storage_key()),
            );
        }
        let mut outcome = TickOutcome {
            appended: recorded.appended(),
            persisted: recorded == Recorded::Persisted,
            displayed: false,
        };

        if self.active == Some(key) && self.displayed.push_if_newer(candle) {
            if let Some(chart) = self.chart.as_mut() {
                chart.update(&candle)?;
            }
            outcome.displayed = true;
        }
        Ok(outcome)
    }

    fn push_displayed(&mut self) -> AppResult<()> {
        match self.chart.as_mut() {
            Some(chart) => chart.set_data(self.displayed.as_slice()),
            None => Ok(()),
        }
    }
}

impl Drop for MarketSession {
    fn drop(&mut self) {
        self.detach_chart();
    }
}
