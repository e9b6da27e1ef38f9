//! 图表适配服务 - 业务能力层
//!
//! 把汇总结果和显示模式转换为独立的图表描述

use std::collections::BTreeMap;

use crate::models::catalog::{DisplayMode, Language, PlotText};
use crate::models::categories::{ActiveCategory, CategorySelection};
use crate::models::chart::{ChartSeries, ChartSpec};
use crate::models::series::{SeriesStore, YearlyMetricValue};

/// 百分比图表的 y 轴范围
pub const PERCENTAGE_RANGE: (i32, i32) = (0, 100);

/// 图表适配服务
#[derive(Debug, Default, Clone, Copy)]
pub struct PlotAdapter;

impl PlotAdapter {
    pub fn new() -> Self {
        Self
    }

    /// 每个开启且至少有一年数据的指标生成一张图表，按目录顺序
    pub fn build(&self, store: &SeriesStore, selection: &CategorySelection) -> Vec<ChartSpec> {
        selection
            .base
            .iter()
            .filter_map(|category| {
                let mode = selection.mode_for(category.label);
                let series = store.series(category.label)?;
                self.chart_for(category, mode, series, selection.language)
            })
            .collect()
    }

    fn chart_for(
        &self,
        category: &ActiveCategory,
        mode: DisplayMode,
        series: &BTreeMap<i32, YearlyMetricValue>,
        language: Language,
    ) -> Option<ChartSpec> {
        let years: Vec<i32> = series.keys().copied().collect();
        let primary: Vec<i32> = series.values().map(|v| v.primary).collect();
        let secondary: Vec<i32> = series.values().map(|v| v.secondary).collect();

        let (y_label, legend, chart_series, y_range) = match mode {
            DisplayMode::Off => return None,
            DisplayMode::Count => (
                PlotText::AmountOfStudents,
                None,
                ChartSeries::Line { values: primary },
                None,
            ),
            DisplayMode::Percentage => {
                let (lo, hi) = PERCENTAGE_RANGE;
                let values = secondary.into_iter().map(|v| v.clamp(lo, hi)).collect();
                (
                    PlotText::Percentage,
                    None,
                    ChartSeries::Line { values },
                    Some(PERCENTAGE_RANGE),
                )
            }
            DisplayMode::Mean => (
                PlotText::Score,
                Some(PlotText::Mean),
                ChartSeries::Line { values: primary },
                None,
            ),
            DisplayMode::MeanAndSpread => (
                PlotText::Score,
                Some(PlotText::MeanAndSpread),
                ChartSeries::ErrorBand {
                    center: primary,
                    spread: secondary,
                },
                None,
            ),
        };

        Some(ChartSpec {
            title: category.label.to_string(),
            x_label: PlotText::Year.text(language).to_string(),
            y_label: y_label.text(language).to_string(),
            legend: legend.map(|text| text.text(language).to_string()),
            years,
            series: chart_series,
            y_range,
        })
    }
}
