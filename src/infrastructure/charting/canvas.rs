use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::domain::{
    chart::{ChartOptions, ChartSink, SeriesStyle},
    errors::{AppError, AppResult},
    logging::LogComponent,
    market_data::{Candle, CandleSeries},
};
use crate::log_debug;
use crate::time_utils::format_time_label;

const PADDING: f64 = 40.0;
const PRICE_AXIS_WIDTH: f64 = 80.0;

/// Per-draw scaling shared by every candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub chart_width: f64,
    pub chart_height: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub candle_width: f64,
}

impl ScaleParams {
    pub fn for_series(series: &CandleSeries, width: f64, height: f64) -> Option<Self> {
        let (min_price, max_price) = series.price_range()?;
        let chart_width = (width - PADDING * 2.0 - PRICE_AXIS_WIDTH).max(1.0);
        Some(Self {
            chart_width,
            chart_height: (height - PADDING * 2.0).max(1.0),
            min_price,
            max_price,
            candle_width: chart_width / series.len() as f64,
        })
    }

    /// Y coordinate for `price`; flat ranges sit on the vertical middle.
    pub fn price_to_y(&self, price: f64) -> f64 {
        let range = self.max_price - self.min_price;
        if range <= f64::EPSILON {
            return PADDING + self.chart_height / 2.0;
        }
        PADDING + (self.max_price - price) / range * self.chart_height
    }

    pub fn index_to_x(&self, index: usize) -> f64 {
        PADDING + index as f64 * self.candle_width + self.candle_width / 2.0
    }
}

/// Canvas 2D fallback used when the chart widget is unavailable
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    options: ChartOptions,
    style: SeriesStyle,
    series: CandleSeries,
}

impl CanvasChart {
    pub fn create(container: &HtmlElement, options: &ChartOptions, style: &SeriesStyle) -> AppResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::Chart("document not available".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| AppError::Chart(format!("{e:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Chart("failed to create canvas element".to_string()))?;
        canvas.set_width(options.width);
        canvas.set_height(options.height);
        container.append_child(&canvas).map_err(|e| AppError::Chart(format!("{e:?}")))?;

        let context = canvas
            .get_context("2d")
            .map_err(|_| AppError::Chart("failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::Chart("2D context not supported".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Chart("failed to cast to 2D context".to_string()))?;

        let chart = Self {
            canvas,
            context,
            options: options.clone(),
            style: style.clone(),
            series: CandleSeries::new(),
        };
        chart.draw()?;
        Ok(chart)
    }

    fn draw(&self) -> AppResult<()> {
        let width = self.options.width as f64;
        let height = self.options.height as f64;
        let ctx = &self.context;

        ctx.clear_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str(&self.options.layout.background_color);
        ctx.fill_rect(0.0, 0.0, width, height);

        let Some(scale) = ScaleParams::for_series(&self.series, width, height) else {
            ctx.set_fill_style_str("#aaaaaa");
            ctx.set_font("14px sans-serif");
            ctx.fill_text("Waiting for market data...", PADDING, height / 2.0)
                .map_err(|e| AppError::Chart(format!("{e:?}")))?;
            return Ok(());
        };

        self.draw_grid(&scale);
        for (i, candle) in self.series.as_slice().iter().enumerate() {
            self.draw_candle(&scale, i, candle);
        }
        self.draw_axes(&scale)?;

        log_debug!(
            LogComponent::Infrastructure("CanvasChart"),
            "drew {} candles",
            self.series.len()
        );
        Ok(())
    }

    fn draw_grid(&self, scale: &ScaleParams) {
        let ctx = &self.context;
        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(&self.options.grid.horz_lines.color);
        for step in 0..=4 {
            let y = PADDING + scale.chart_height * step as f64 / 4.0;
            ctx.begin_path();
            ctx.move_to(PADDING, y);
            ctx.line_to(PADDING + scale.chart_width, y);
            ctx.stroke();
        }
    }

    fn draw_candle(&self, scale: &ScaleParams, index: usize, candle: &Candle) {
        let ctx = &self.context;
        let x = scale.index_to_x(index);
        let (body, wick) = if candle.is_bullish() {
            (&self.style.up_color, &self.style.wick_up_color)
        } else {
            (&self.style.down_color, &self.style.wick_down_color)
        };

        ctx.set_stroke_style_str(wick);
        ctx.begin_path();
        ctx.move_to(x, scale.price_to_y(candle.high));
        ctx.line_to(x, scale.price_to_y(candle.low));
        ctx.stroke();

        let open_y = scale.price_to_y(candle.open);
        let close_y = scale.price_to_y(candle.close);
        let body_width = (scale.candle_width * 0.6).max(1.0);
        let body_height = (open_y - close_y).abs().max(1.0);
        ctx.set_fill_style_str(body);
        ctx.fill_rect(x - body_width / 2.0, open_y.min(close_y), body_width, body_height);
    }

    fn draw_axes(&self, scale: &ScaleParams) -> AppResult<()> {
        let ctx = &self.context;
        let to_err = |e: JsValue| AppError::Chart(format!("{e:?}"));
        let axis_x = PADDING + scale.chart_width + 8.0;

        ctx.set_font("12px sans-serif");
        ctx.set_fill_style_str("#aaaaaa");
        ctx.fill_text(&format!("{:.2}", scale.max_price), axis_x, PADDING + 4.0).map_err(to_err)?;
        ctx.fill_text(&format!("{:.2}", scale.min_price), axis_x, PADDING + scale.chart_height)
            .map_err(to_err)?;

        if let Some(last) = self.series.last() {
            let y = scale.price_to_y(last.close);
            let color = if last.is_bullish() { &self.style.up_color } else { &self.style.down_color };
            ctx.set_stroke_style_str(color);
            ctx.begin_path();
            ctx.move_to(PADDING, y);
            ctx.line_to(PADDING + scale.chart_width, y);
            ctx.stroke();
            ctx.set_fill_style_str(color);
            ctx.fill_text(&format!("{:.2}", last.close), axis_x, y + 4.0).map_err(to_err)?;
        }

        if self.options.time_scale.time_visible {
            let bottom = PADDING + scale.chart_height + 16.0;
            ctx.set_fill_style_str("#aaaaaa");
            let candles = self.series.as_slice();
            if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
                let secs = self.options.time_scale.seconds_visible;
                ctx.fill_text(&format_time_label(first.time, secs), PADDING, bottom).map_err(to_err)?;
                let last_x = scale.index_to_x(candles.len() - 1) - 30.0;
                ctx.fill_text(&format_time_label(last.time, secs), last_x.max(PADDING), bottom)
                    .map_err(to_err)?;
            }
        }
        Ok(())
    }
}

impl ChartSink for CanvasChart {
    fn set_data(&mut self, candles: &[Candle]) -> AppResult<()> {
        self.series = CandleSeries::from_candles(candles.to_vec());
        self.draw()
    }

    fn update(&mut self, candle: &Candle) -> AppResult<()> {
        if self.series.push_if_newer(*candle) {
            self.draw()?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32) {
        self.options.width = width;
        self.canvas.set_width(width);
        if let Err(e) = self.draw() {
            crate::log_warn!(LogComponent::Infrastructure("CanvasChart"), "redraw failed: {}", e);
        }
    }

    fn dispose(&mut self) {
        self.canvas.remove();
    }
}
