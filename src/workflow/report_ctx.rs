//! 报告处理上下文
//!
//! 封装"我正在处理第几份报告、哪一年"这一信息

use std::fmt::Display;

use crate::models::course::ReportLocator;

/// 报告处理上下文
#[derive(Debug, Clone)]
pub struct ReportCtx {
    /// 报告序号（从1开始，仅用于日志显示）
    pub report_index: usize,

    /// 本次运行的报告总数
    pub total_reports: usize,

    pub locator: ReportLocator,
}

impl ReportCtx {
    pub fn new(report_index: usize, total_reports: usize, locator: ReportLocator) -> Self {
        Self {
            report_index,
            total_reports,
            locator,
        }
    }

    /// 报告文件名（地址最后一段）
    pub fn report_name(&self) -> &str {
        self.locator
            .url
            .rsplit('/')
            .next()
            .unwrap_or(&self.locator.url)
    }
}

impl Display for ReportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[报告 {}/{} 年份#{}]",
            self.report_index, self.total_reports, self.locator.year
        )
    }
}
