use leptos::*;
use once_cell::sync::OnceCell;

use crate::domain::market_data::{Symbol, TimeInterval};
use crate::global_signals;

/// Connection state shown in the status line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Connecting,
    Live,
    Reconnecting { attempt: u32 },
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "🔴 OFF".to_string(),
            Self::Connecting => "🟡 Connecting".to_string(),
            Self::Live => "🟢 LIVE".to_string(),
            Self::Reconnecting { attempt } => format!("🟠 Reconnecting (#{attempt})"),
        }
    }
}

pub struct Globals {
    pub current_symbol: RwSignal<Symbol>,
    pub current_interval: RwSignal<TimeInterval>,
    pub connection_status: RwSignal<ConnectionStatus>,
    pub candle_count: RwSignal<usize>,
    pub last_close: RwSignal<Option<f64>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        current_symbol: create_rw_signal(Symbol::default()),
        current_interval: create_rw_signal(TimeInterval::default()),
        connection_status: create_rw_signal(ConnectionStatus::default()),
        candle_count: create_rw_signal(0),
        last_close: create_rw_signal(None),
    })
}

global_signals! {
    pub current_symbol => current_symbol: Symbol,
    pub current_interval => current_interval: TimeInterval,
    pub connection_status => connection_status: ConnectionStatus,
    pub candle_count => candle_count: usize,
    pub last_close => last_close: Option<f64>,
}
