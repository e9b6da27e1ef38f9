//! 图表渲染接口
//!
//! 真正的绘图由外部展示层完成；这里提供把 [`ChartSpec`] 转成 JSON 图形描述的实现，
//! 供命令行输出使用。

use serde_json::{json, Value as JsonValue};

use crate::error::AppResult;
use crate::models::chart::{ChartSeries, ChartSpec};

/// 图表渲染器
pub trait SeriesRenderer {
    type Figure;

    fn render(&self, spec: &ChartSpec) -> AppResult<Self::Figure>;
}

/// JSON 图形描述渲染器
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl SeriesRenderer for JsonRenderer {
    type Figure = JsonValue;

    fn render(&self, spec: &ChartSpec) -> AppResult<JsonValue> {
        let series = serde_json::to_value(&spec.series)?;
        let style = match spec.series {
            ChartSeries::Line { .. } => "line",
            ChartSeries::ErrorBand { .. } => "errorbar",
        };

        Ok(json!({
            "title": spec.title,
            "style": style,
            "x_label": spec.x_label,
            "y_label": spec.y_label,
            "x_ticks": spec.years,
            "legend": spec.legend,
            "y_range": spec.y_range.map(|(lo, hi)| [lo, hi]),
            "series": series,
        }))
    }
}
