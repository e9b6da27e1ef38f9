//! 趋势引擎 - 编排层
//!
//! ## 职责
//!
//! 1. **选择指标**：配置 → 基础活动集合（只做一次，配置错误立即返回）
//! 2. **展开定位器**：课程查询 → (地址, 年份) 列表（只做一次）
//! 3. **并发抓取**：使用 Semaphore 限制同时进行的抓取数量
//! 4. **顺序汇总**：按定位器顺序并入序列存储，结果与并发度无关
//! 5. **生成图表**：对最终存储运行一次适配器
//!
//! 每次迭代都从不可变的基础集合派生自己的活动集合，不存在跨迭代的共享可变状态。

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::DocumentSource;
use crate::models::categories::{ActiveCategories, CategorySelection};
use crate::models::chart::ChartSpec;
use crate::models::course::ReportLocator;
use crate::models::request::RunRequest;
use crate::models::series::SeriesStore;
use crate::services::{CategorySelector, LocatorResolver, PlotAdapter, ReportState, SeriesAggregator};
use crate::workflow::{ReportCtx, ReportFlow, ReportOutcome};

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub full: usize,
    pub pass_rate_only: usize,
    pub unavailable: usize,
    pub stored_values: usize,
    pub skipped_metrics: usize,
    pub duplicate_writes: usize,
}

/// 一次运行的完整结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub selection: CategorySelection,
    pub store: SeriesStore,
    pub charts: Vec<ChartSpec>,
    /// 至少一份报告写入了数据
    pub has_data: bool,
    pub stats: RunStats,
}

impl RunReport {
    /// 所有指标都被关闭（与"没有找到数据"区分）
    pub fn nothing_selected(&self) -> bool {
        self.selection.nothing_selected()
    }
}

/// 趋势引擎
pub struct TrendEngine<S> {
    source: S,
    selector: CategorySelector,
    resolver: LocatorResolver,
    flow: ReportFlow,
    adapter: PlotAdapter,
    max_concurrent: usize,
}

impl<S: DocumentSource> TrendEngine<S> {
    pub fn new(source: S, base_url: impl Into<String>, max_concurrent: usize) -> Self {
        Self {
            source,
            selector: CategorySelector::new(),
            resolver: LocatorResolver::new(base_url),
            flow: ReportFlow::new(),
            adapter: PlotAdapter::new(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(
            source,
            config.report_base_url.clone(),
            config.max_concurrent_fetches,
        )
    }

    /// 运行完整流程
    ///
    /// 只有配置错误会返回 Err；抓取失败和指标缺失都在内部吸收
    pub async fn run(&self, request: &RunRequest) -> AppResult<RunReport> {
        let selection = self
            .selector
            .select(&request.settings, request.plot_language)?;

        let locators = self.resolver.resolve(&request.courses);

        let outcomes = if selection.nothing_selected() {
            warn!("⚠️ 所有指标都已关闭，跳过全部 {} 份报告", locators.len());
            Vec::new()
        } else {
            info!(
                "📋 共 {} 份报告, {} 个指标, 最大并发数 {}",
                locators.len(),
                selection.base.len(),
                self.max_concurrent
            );
            self.process_all(&locators, &selection.base).await
        };

        // 只统计实际处理过的报告
        let mut stats = RunStats {
            total: outcomes.len(),
            ..Default::default()
        };

        let mut aggregator = SeriesAggregator::new();
        for outcome in &outcomes {
            match outcome.state {
                ReportState::Full => stats.full += 1,
                ReportState::PassRateOnly => stats.pass_rate_only += 1,
                ReportState::Unavailable => stats.unavailable += 1,
            }
            if let Some(extraction) = &outcome.extraction {
                stats.skipped_metrics += extraction.skipped.len();
                stats.stored_values += aggregator.absorb(extraction);
            }
        }
        stats.duplicate_writes = aggregator.duplicate_writes();

        let has_data = aggregator.has_data();
        let store = aggregator.into_store();
        let charts = self.adapter.build(&store, &selection);

        Ok(RunReport {
            selection,
            store,
            charts,
            has_data,
            stats,
        })
    }

    /// 并发处理所有定位器，结果按定位器顺序返回
    async fn process_all(
        &self,
        locators: &[ReportLocator],
        base: &ActiveCategories,
    ) -> Vec<ReportOutcome> {
        let semaphore = Semaphore::new(self.max_concurrent);
        let total = locators.len();

        let tasks = locators.iter().enumerate().map(|(idx, locator)| {
            let semaphore = &semaphore;
            async move {
                // Semaphore 从不关闭，acquire 不会失败
                let _permit = semaphore.acquire().await.ok();
                let ctx = ReportCtx::new(idx + 1, total, locator.clone());
                self.flow.run(&self.source, &ctx, base).await
            }
        });

        join_all(tasks).await
    }
}
