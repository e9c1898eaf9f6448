use serde::Serialize;

/// Options object handed to the charting widget on creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub time_scale: TimeScaleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: LineOptions,
    pub horz_lines: LineOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOptions {
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub time_visible: bool,
    pub seconds_visible: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            layout: LayoutOptions {
                background_color: "#1C1C27".to_string(),
                text_color: "#050b11".to_string(),
            },
            grid: GridOptions {
                vert_lines: LineOptions { color: "#f0f0f3".to_string() },
                horz_lines: LineOptions { color: "#e3e3ee".to_string() },
            },
            time_scale: TimeScaleOptions { time_visible: true, seconds_visible: true },
        }
    }
}

impl ChartOptions {
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Candlestick series colors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub up_color: String,
    pub down_color: String,
    pub border_up_color: String,
    pub border_down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        let up = "#4CAF50".to_string();
        let down = "#FF5252".to_string();
        Self {
            up_color: up.clone(),
            down_color: down.clone(),
            border_up_color: up.clone(),
            border_down_color: down.clone(),
            wick_up_color: up,
            wick_down_color: down,
        }
    }
}
