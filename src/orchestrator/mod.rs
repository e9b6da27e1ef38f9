//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载并校验请求
//! - 持有 HTTP 文档来源
//! - 输出图表和全局统计
//!
//! ### `trend_engine` - 趋势引擎
//! - 选择指标、展开定位器（各一次）
//! - 控制并发数量（Semaphore）
//! - 按定位器顺序汇总结果并生成图表
//!
//! ## 层次关系
//!
//! ```text
//! app (请求 / 输出)
//!     ↓
//! trend_engine (处理 Vec<ReportLocator>)
//!     ↓
//! workflow::ReportFlow (处理单份报告)
//!     ↓
//! services (能力层：分类 / 提取 / 汇总 / 适配)
//!     ↓
//! infrastructure (基础设施：DocumentSource)
//! ```

pub mod app;
pub mod trend_engine;

// 重新导出主要类型
pub use app::App;
pub use trend_engine::{RunReport, RunStats, TrendEngine};
