//! 指标选择服务 - 业务能力层
//!
//! 只负责把指标模式配置转换为基础活动集合和显示模式，不接触网络和文档

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ConfigError;
use crate::models::catalog::{self, DisplayMode, Language, CATALOG};
use crate::models::categories::{ActiveCategories, ActiveCategory, CategorySelection};
use crate::models::request::MetricSettings;

/// 指标选择服务
///
/// 职责：
/// - 校验七个目录指标都已配置（缺一不可）
/// - 去掉模式为 0 的指标，得到基础活动集合
/// - 记录每个标题的显示模式
#[derive(Debug, Default, Clone, Copy)]
pub struct CategorySelector;

impl CategorySelector {
    pub fn new() -> Self {
        Self
    }

    /// 纯函数：同样的输入总是得到同样的选择
    pub fn select(
        &self,
        settings: &MetricSettings,
        language_selector: i64,
    ) -> Result<CategorySelection, ConfigError> {
        let language = Language::from_selector(language_selector)?;

        if let Some(unknown) = settings.keys().find(|key| catalog::lookup(key).is_none()) {
            return Err(ConfigError::UnknownMetric {
                key: unknown.to_string(),
            });
        }

        let mut entries = Vec::new();
        let mut modes = BTreeMap::new();

        for metric in CATALOG.iter() {
            let mode_code = settings
                .get(metric.key)
                .ok_or_else(|| ConfigError::MissingMetric {
                    key: metric.key.to_string(),
                })?;

            let mode = DisplayMode::from_mode(metric.kind, mode_code).ok_or_else(|| {
                ConfigError::InvalidMode {
                    key: metric.key.to_string(),
                    mode: mode_code,
                }
            })?;

            if mode.is_off() {
                continue;
            }

            let label = metric.label(language);
            entries.push(ActiveCategory { metric, label });
            modes.insert(label, mode);
        }

        debug!(
            "已选择 {} 个指标 (语言: {:?})",
            entries.len(),
            language
        );

        Ok(CategorySelection::new(
            language,
            ActiveCategories::new(entries),
            modes,
        ))
    }
}
