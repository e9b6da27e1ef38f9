//! 运行请求（来自 TOML 文件）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::catalog::{DisplayMode, CATALOG};
use crate::models::course::{CourseQuery, Period};

/// 指标查找键 → 整数模式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSettings(BTreeMap<String, i64>);

impl MetricSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, i64)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// 所有指标都使用目录默认模式
    pub fn catalog_defaults() -> Self {
        Self::from_pairs(CATALOG.iter().map(|m| (m.key, m.default_mode.code())))
    }

    /// 所有指标都关闭
    pub fn all_off() -> Self {
        Self::from_pairs(CATALOG.iter().map(|m| (m.key, DisplayMode::Off.code())))
    }

    pub fn set(&mut self, key: impl Into<String>, mode: i64) -> &mut Self {
        self.0.insert(key.into(), mode);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<i64> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// 一次完整的运行请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// 0 = 英语，1 = 瑞典语
    #[serde(default)]
    pub plot_language: i64,
    #[serde(default)]
    pub courses: Vec<CourseQuery>,
    pub settings: MetricSettings,
}

impl RunRequest {
    pub fn new(plot_language: i64, courses: Vec<CourseQuery>, settings: MetricSettings) -> Self {
        Self {
            plot_language,
            courses,
            settings,
        }
    }

    /// 新建请求文件时写入的模板
    pub fn template() -> Self {
        Self::new(
            0,
            vec![CourseQuery::new("KBK050", Period::Lp1, 2016, 2020)],
            MetricSettings::catalog_defaults(),
        )
    }
}
