//! 序列汇总服务 - 业务能力层
//!
//! 把每份报告的提取结果并入持久的序列存储

use tracing::warn;

use crate::models::series::SeriesStore;
use crate::services::metric_extractor::Extraction;

/// 序列汇总服务
///
/// 职责：
/// - 只追加，已存在的 (标题, 年份) 不覆盖
/// - 记录有多少份报告真正写入了数据
#[derive(Debug, Default)]
pub struct SeriesAggregator {
    store: SeriesStore,
    reports_with_data: usize,
    duplicate_writes: usize,
}

impl SeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 并入一份报告，返回实际写入的数值个数
    pub fn absorb(&mut self, extraction: &Extraction) -> usize {
        let mut stored = 0;

        for (label, value) in &extraction.values {
            if self.store.insert(label, extraction.year, *value) {
                stored += 1;
            } else {
                warn!(
                    "⚠️ {} 在 {} 年已有数据，忽略重复写入",
                    label, extraction.year
                );
                self.duplicate_writes += 1;
            }
        }

        if stored > 0 {
            self.reports_with_data += 1;
        }
        stored
    }

    /// 至少一份报告写入过数据
    pub fn has_data(&self) -> bool {
        self.reports_with_data > 0
    }

    pub fn reports_with_data(&self) -> usize {
        self.reports_with_data
    }

    pub fn duplicate_writes(&self) -> usize {
        self.duplicate_writes
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn into_store(self) -> SeriesStore {
        self.store
    }
}
