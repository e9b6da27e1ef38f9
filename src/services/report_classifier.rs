//! 报告分类服务 - 业务能力层
//!
//! 判断一份报告能提取完整指标、只能提取通过率，还是什么都不能提取。
//!
//! 采用严格规则：只有存在"问卷已填写"标题并且没有"无回答"标记时才算完整报告。

use crate::infrastructure::ParsedDocument;
use crate::models::catalog::PASS_RATE_KEY;
use crate::models::categories::ActiveCategories;

/// 表示问卷已填写的 `<h3>` 标题
pub const COMPLETED_HEADING: &str = "CEQ-enkäten fylldes i";

/// 表示没有任何回答的 `<em>` 标记
pub const NO_RESPONSES_MARKER: &str = "Inga svar finns. Därför visas ingen sammanfattning av svaren.";

/// 报告状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportState {
    /// 可提取全部活动指标
    Full,
    /// 只能提取通过率
    PassRateOnly,
    /// 什么都不提取，跳过这一年
    Unavailable,
}

/// 分类结果，附带本次迭代使用的活动集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Full(ActiveCategories),
    PassRateOnly(ActiveCategories),
    Unavailable,
}

impl Classification {
    pub fn state(&self) -> ReportState {
        match self {
            Classification::Full(_) => ReportState::Full,
            Classification::PassRateOnly(_) => ReportState::PassRateOnly,
            Classification::Unavailable => ReportState::Unavailable,
        }
    }

    /// 本次迭代的活动集合，Unavailable 时为 None
    pub fn active(&self) -> Option<&ActiveCategories> {
        match self {
            Classification::Full(active) | Classification::PassRateOnly(active) => Some(active),
            Classification::Unavailable => None,
        }
    }
}

/// 报告分类服务
///
/// 职责：
/// - 只读文档，不修改基础集合
/// - 回退时返回一个新的缩小集合
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportClassifier;

impl ReportClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, doc: &impl ParsedDocument, base: &ActiveCategories) -> Classification {
        if self.survey_answered(doc) {
            return Classification::Full(base.clone());
        }

        match base.narrowed_to(PASS_RATE_KEY) {
            Some(narrowed) => Classification::PassRateOnly(narrowed),
            None => Classification::Unavailable,
        }
    }

    /// 问卷已填写且有回答
    pub fn survey_answered(&self, doc: &impl ParsedDocument) -> bool {
        doc.has_element_text("h3", COMPLETED_HEADING)
            && !doc.has_element_text("em", NO_RESPONSES_MARKER)
    }
}
