//! 渲染用的图表描述

use serde::Serialize;

/// y 轴数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSeries {
    /// 普通折线
    Line { values: Vec<i32> },
    /// 中心线 + 对称误差带
    ErrorBand { center: Vec<i32>, spread: Vec<i32> },
}

/// 一张独立的图表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// 图例文字，通过率图表没有图例
    pub legend: Option<String>,
    /// 排序后的年份，同时作为 x 轴刻度
    pub years: Vec<i32>,
    pub series: ChartSeries,
    /// 固定的 y 轴范围
    pub y_range: Option<(i32, i32)>,
}
