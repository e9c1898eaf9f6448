use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - trading pair, in the lowercase form the stream expects
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Symbol {
    #[default]
    #[strum(serialize = "ethusdt")]
    #[serde(rename = "ethusdt")]
    EthUsdt,

    #[strum(serialize = "bnbusdt")]
    #[serde(rename = "bnbusdt")]
    BnbUsdt,

    #[strum(serialize = "dotusdt")]
    #[serde(rename = "dotusdt")]
    DotUsdt,
}

impl Symbol {
    /// Stream name, e.g. `ethusdt`
    pub fn stream_name(&self) -> &str {
        self.as_ref()
    }

    /// Human readable pair, e.g. `ETH/USDT`
    pub fn label(&self) -> &'static str {
        match self {
            Self::EthUsdt => "ETH/USDT",
            Self::BnbUsdt => "BNB/USDT",
            Self::DotUsdt => "DOT/USDT",
        }
    }
}

/// Value Object - kline interval
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum TimeInterval {
    #[default]
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,

    #[strum(serialize = "3m")]
    #[serde(rename = "3m")]
    ThreeMinutes,

    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,
}

impl TimeInterval {
    pub fn to_binance_str(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneMinute => "1 Minute",
            Self::ThreeMinutes => "3 Minutes",
            Self::FiveMinutes => "5 Minutes",
        }
    }
}

/// Exchange open times are milliseconds, chart times are whole seconds.
pub fn open_time_to_secs(open_time_ms: u64) -> u64 {
    open_time_ms / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn symbols_parse_case_insensitively() {
        assert_eq!("ETHUSDT".parse::<Symbol>().unwrap(), Symbol::EthUsdt);
        assert_eq!("dotusdt".parse::<Symbol>().unwrap(), Symbol::DotUsdt);
        assert!("btcusdt".parse::<Symbol>().is_err());
    }

    #[test]
    fn selector_lists_three_pairs() {
        let labels: Vec<_> = Symbol::iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["ETH/USDT", "BNB/USDT", "DOT/USDT"]);
    }

    #[test]
    fn intervals_round_trip_through_binance_names() {
        for interval in TimeInterval::iter() {
            assert_eq!(interval.to_binance_str().parse::<TimeInterval>().unwrap(), interval);
        }
    }

    #[test]
    fn open_time_is_floored_to_seconds() {
        assert_eq!(open_time_to_secs(1_700_000_059_999), 1_700_000_059);
        assert_eq!(open_time_to_secs(999), 0);
    }
}
