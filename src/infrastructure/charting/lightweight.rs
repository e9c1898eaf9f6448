use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::domain::{
    chart::{ChartOptions, ChartSink, SeriesStyle},
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    market_data::Candle,
};

#[wasm_bindgen]
extern "C" {
    /// `IChartApi` of the lightweight-charts widget
    pub type ChartApi;

    /// `ISeriesApi<"Candlestick">`
    pub type SeriesApi;

    #[wasm_bindgen(catch, js_namespace = LightweightCharts, js_name = createChart)]
    fn create_chart(container: &HtmlElement, options: &JsValue) -> Result<ChartApi, JsValue>;

    #[wasm_bindgen(catch, method, js_name = addCandlestickSeries)]
    fn add_candlestick_series(this: &ChartApi, options: &JsValue) -> Result<SeriesApi, JsValue>;

    #[wasm_bindgen(method, js_name = applyOptions)]
    fn apply_options(this: &ChartApi, options: &JsValue);

    #[wasm_bindgen(method)]
    fn remove(this: &ChartApi);

    #[wasm_bindgen(catch, method, js_name = setData)]
    fn set_data(this: &SeriesApi, data: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method)]
    fn update(this: &SeriesApi, bar: &JsValue) -> Result<(), JsValue>;
}

/// Serialize through JSON so field names match what the widget reads.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> AppResult<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|e| AppError::Chart(format!("{e:?}")))
}

/// Candlestick chart rendered by the external lightweight-charts widget
pub struct LightweightChart {
    chart: ChartApi,
    series: SeriesApi,
    disposed: bool,
}

impl LightweightChart {
    /// Create the widget inside `container`. Fails when the widget script
    /// is not loaded on the page.
    pub fn create(container: &HtmlElement, options: &ChartOptions, style: &SeriesStyle) -> AppResult<Self> {
        let chart = create_chart(container, &to_js(options)?)
            .map_err(|e| AppError::Chart(format!("createChart failed: {e:?}")))?;
        let series = chart
            .add_candlestick_series(&to_js(style)?)
            .map_err(|e| AppError::Chart(format!("addCandlestickSeries failed: {e:?}")))?;

        get_logger().info(
            LogComponent::Infrastructure("LightweightChart"),
            &format!("✅ Chart widget created ({}x{})", options.width, options.height),
        );

        Ok(Self { chart, series, disposed: false })
    }
}

impl ChartSink for LightweightChart {
    fn set_data(&mut self, candles: &[Candle]) -> AppResult<()> {
        self.series
            .set_data(&to_js(candles)?)
            .map_err(|e| AppError::Chart(format!("setData failed: {e:?}")))
    }

    fn update(&mut self, candle: &Candle) -> AppResult<()> {
        self.series
            .update(&to_js(candle)?)
            .map_err(|e| AppError::Chart(format!("update failed: {e:?}")))
    }

    fn resize(&mut self, width: u32) {
        #[derive(Serialize)]
        struct Resize {
            width: u32,
        }
        match to_js(&Resize { width }) {
            Ok(options) => self.chart.apply_options(&options),
            Err(e) => get_logger().warn(LogComponent::Infrastructure("LightweightChart"), &e.to_string()),
        }
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.chart.remove();
            self.disposed = true;
        }
    }
}
