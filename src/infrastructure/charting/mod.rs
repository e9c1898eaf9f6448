//! Chart renderers behind [`ChartSink`](crate::domain::chart::ChartSink).

pub mod canvas;
pub mod lightweight;

pub use canvas::CanvasChart;
pub use lightweight::LightweightChart;

use web_sys::HtmlElement;

use crate::domain::{
    chart::{ChartOptions, ChartSink, SeriesStyle},
    errors::AppResult,
    logging::{LogComponent, get_logger},
};

/// Mount the chart widget in `container`, or the canvas fallback when the
/// widget script is missing.
pub fn mount_chart(
    container: &HtmlElement,
    options: &ChartOptions,
    style: &SeriesStyle,
) -> AppResult<Box<dyn ChartSink>> {
    match LightweightChart::create(container, options, style) {
        Ok(chart) => Ok(Box::new(chart)),
        Err(e) => {
            get_logger().warn(
                LogComponent::Infrastructure("Charting"),
                &format!("⚠️ {e}, falling back to canvas rendering"),
            );
            Ok(Box::new(CanvasChart::create(container, options, style)?))
        }
    }
}
