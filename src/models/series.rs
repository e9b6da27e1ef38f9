//! 年度数值与汇总存储

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 一个指标在一年中的两个原始数值
///
/// 通过率：(人数, 百分比)；评分题：(缩放后的均值, 离散度)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearlyMetricValue {
    pub primary: i32,
    pub secondary: i32,
}

impl YearlyMetricValue {
    pub fn new(primary: i32, secondary: i32) -> Self {
        Self { primary, secondary }
    }
}

/// 指标标题 → (年份 → 数值)
///
/// 只增不改：同一个 (标题, 年份) 只写入一次
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesStore {
    series: BTreeMap<String, BTreeMap<i32, YearlyMetricValue>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个数值，键已存在时不覆盖并返回 false
    pub fn insert(&mut self, label: &str, year: i32, value: YearlyMetricValue) -> bool {
        match self
            .series
            .entry(label.to_string())
            .or_default()
            .entry(year)
        {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, label: &str, year: i32) -> Option<&YearlyMetricValue> {
        self.series.get(label)?.get(&year)
    }

    /// 某个指标按年份排序的序列
    pub fn series(&self, label: &str) -> Option<&BTreeMap<i32, YearlyMetricValue>> {
        self.series.get(label).filter(|years| !years.is_empty())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// 已存储的数值总数
    pub fn len(&self) -> usize {
        self.series.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
