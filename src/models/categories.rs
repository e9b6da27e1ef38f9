//! 活动指标集合
//!
//! 选择器产生不可变的基础集合；每次迭代从基础集合派生自己的副本，缩小只作用于当次迭代。

use std::collections::BTreeMap;

use crate::models::catalog::{DisplayMode, Language, MetricDef, MetricKind};

/// 一个参与提取的指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCategory {
    pub metric: &'static MetricDef,
    /// 按所选语言确定的标题
    pub label: &'static str,
}

impl ActiveCategory {
    pub fn key(&self) -> &'static str {
        self.metric.key
    }

    pub fn kind(&self) -> MetricKind {
        self.metric.kind
    }
}

/// 查找键 → 标题，保持目录顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveCategories {
    entries: Vec<ActiveCategory>,
}

impl ActiveCategories {
    pub fn new(entries: Vec<ActiveCategory>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveCategory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ActiveCategory> {
        self.entries.iter().find(|c| c.key() == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(ActiveCategory::key)
    }

    /// 只保留一个指标的新集合；该指标不在集合中时返回 None
    pub fn narrowed_to(&self, key: &str) -> Option<ActiveCategories> {
        self.get(key).map(|category| ActiveCategories {
            entries: vec![*category],
        })
    }

    pub fn is_subset_of(&self, other: &ActiveCategories) -> bool {
        self.entries.iter().all(|c| other.entries.contains(c))
    }
}

/// 选择器输出：基础集合 + 每个标题的显示模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    pub language: Language,
    pub base: ActiveCategories,
    modes: BTreeMap<&'static str, DisplayMode>,
}

impl CategorySelection {
    pub fn new(
        language: Language,
        base: ActiveCategories,
        modes: BTreeMap<&'static str, DisplayMode>,
    ) -> Self {
        Self {
            language,
            base,
            modes,
        }
    }

    /// 某个标题的显示模式，未选中的一律为 Off
    pub fn mode_for(&self, label: &str) -> DisplayMode {
        self.modes.get(label).copied().unwrap_or(DisplayMode::Off)
    }

    pub fn modes(&self) -> &BTreeMap<&'static str, DisplayMode> {
        &self.modes
    }

    /// 所有指标都关闭
    pub fn nothing_selected(&self) -> bool {
        self.base.is_empty()
    }
}
