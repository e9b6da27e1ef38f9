//! 报告处理流程 - 流程层
//!
//! 核心职责：定义"一份报告"的完整处理流程
//!
//! 流程顺序：
//! 1. 抓取并解析（失败 → 不可用）
//! 2. 分类（可能缩小本次的活动集合）
//! 3. 提取

use tracing::{info, warn};

use crate::infrastructure::{DocumentSource, ParsedDocument};
use crate::models::categories::ActiveCategories;
use crate::models::course::ReportLocator;
use crate::services::{Extraction, MetricExtractor, ReportClassifier, ReportState};
use crate::utils::logging::truncate_text;
use crate::workflow::report_ctx::ReportCtx;

/// 单份报告的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub locator: ReportLocator,
    pub state: ReportState,
    /// Unavailable 时为 None
    pub extraction: Option<Extraction>,
}

impl ReportOutcome {
    fn unavailable(locator: ReportLocator) -> Self {
        Self {
            locator,
            state: ReportState::Unavailable,
            extraction: None,
        }
    }
}

/// 报告处理流程
///
/// - 不持有任何资源（HTTP 客户端由调用方传入）
/// - 每次调用都从基础集合派生自己的活动集合，互不影响
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportFlow {
    classifier: ReportClassifier,
    extractor: MetricExtractor,
}

impl ReportFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<S: DocumentSource>(
        &self,
        source: &S,
        ctx: &ReportCtx,
        base: &ActiveCategories,
    ) -> ReportOutcome {
        info!("{} 🔍 抓取 {}", ctx, ctx.report_name());

        let doc = match source.fetch(&ctx.locator.url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("{} ⚠️ {}，跳过", ctx, truncate_text(&e.to_string(), 160));
                return ReportOutcome::unavailable(ctx.locator.clone());
            }
        };

        self.evaluate(&doc, ctx, base)
    }

    /// 对已解析的文档执行分类和提取
    pub fn evaluate(
        &self,
        doc: &impl ParsedDocument,
        ctx: &ReportCtx,
        base: &ActiveCategories,
    ) -> ReportOutcome {
        let classification = self.classifier.classify(doc, base);
        let state = classification.state();

        let Some(active) = classification.active() else {
            info!("{} 问卷未完成且未选择通过率，跳过", ctx);
            return ReportOutcome::unavailable(ctx.locator.clone());
        };

        if state == ReportState::PassRateOnly {
            info!("{} 问卷无回答，只提取通过率", ctx);
        }

        let extraction = self.extractor.extract(active, doc, ctx.locator.year);
        for skipped in &extraction.skipped {
            warn!("{} ⚠️ 跳过指标: {}", ctx, skipped);
        }

        info!(
            "{} ✓ 提取 {} 个指标 (状态: {:?})",
            ctx,
            extraction.values.len(),
            state
        );

        ReportOutcome {
            locator: ctx.locator.clone(),
            state,
            extraction: Some(extraction),
        }
    }
}
