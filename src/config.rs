use std::time::Duration;

use crate::domain::{
    chart::{ChartOptions, SeriesStyle},
    logging::LogComponent,
    market_data::{SeriesKey, Symbol, TimeInterval},
};
use crate::infrastructure::websocket::{DEFAULT_RECONNECT_DELAY, StreamEndpoint};
use crate::log_warn;

/// Runtime settings for the chart page
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub endpoint: StreamEndpoint,
    /// Fixed wait before every reconnect
    pub reconnect_delay: Duration,
    pub default_symbol: Symbol,
    pub default_interval: TimeInterval,
    pub chart: ChartOptions,
    pub series_style: SeriesStyle,
    /// Keep one cache record per symbol and interval instead of per symbol
    pub cache_per_interval: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: StreamEndpoint::default(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            default_symbol: Symbol::default(),
            default_interval: TimeInterval::default(),
            chart: ChartOptions::default(),
            series_style: SeriesStyle::default(),
            cache_per_interval: false,
        }
    }
}

impl AppConfig {
    /// Apply `?symbol=..&interval=..` from a page query string. Unknown
    /// values are logged and ignored.
    pub fn with_query(mut self, search: &str) -> Self {
        for pair in search.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            match name {
                "symbol" => match value.parse::<Symbol>() {
                    Ok(symbol) => self.default_symbol = symbol,
                    Err(_) => {
                        log_warn!(LogComponent::Presentation("Config"), "unknown symbol {:?}", value);
                    }
                },
                "interval" => match value.parse::<TimeInterval>() {
                    Ok(interval) => self.default_interval = interval,
                    Err(_) => {
                        log_warn!(LogComponent::Presentation("Config"), "unknown interval {:?}", value);
                    }
                },
                "cache" => self.cache_per_interval = value == "interval",
                _ => {}
            }
        }
        self
    }

    /// Read overrides from the current page URL
    pub fn from_location() -> Self {
        let search = web_sys::window().and_then(|w| w.location().search().ok()).unwrap_or_default();
        Self::default().with_query(&search)
    }

    pub fn series_key(&self, symbol: Symbol, interval: TimeInterval) -> SeriesKey {
        SeriesKey::new(symbol, interval, self.cache_per_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_stream_contract() {
        let config = AppConfig::default();
        assert_eq!(config.reconnect_delay, Duration::from_secs(1));
        assert_eq!(config.default_symbol, Symbol::EthUsdt);
        assert_eq!(config.default_interval, TimeInterval::OneMinute);
        assert_eq!(config.chart.height, 400);
        assert!(!config.cache_per_interval);
    }

    #[test]
    fn query_overrides_pair() {
        let config = AppConfig::default().with_query("?symbol=DOTUSDT&interval=5m&cache=interval");
        assert_eq!(config.default_symbol, Symbol::DotUsdt);
        assert_eq!(config.default_interval, TimeInterval::FiveMinutes);
        assert_eq!(config.series_key(Symbol::DotUsdt, TimeInterval::FiveMinutes).storage_key(), "dotusdt@5m");
    }

    #[test]
    fn unknown_query_values_are_ignored() {
        let config = AppConfig::default().with_query("?symbol=btcusdt&interval=1h&foo");
        assert_eq!(config, AppConfig::default());
    }
}
