//! # CEQ Trends
//!
//! 抓取多年 CEQ 课程评估报告，提取各项指标，汇总为按年份排列的趋势序列并生成图表描述
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端），只暴露能力
//! - `DocumentSource` - 抓取并解析一份报告
//! - `SeriesRenderer` - 把图表描述渲染为输出格式
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `CategorySelector` - 配置 → 活动指标集合
//! - `LocatorResolver` - 课程查询 → 报告地址
//! - `ReportClassifier` - 判断报告状态
//! - `MetricExtractor` - 从表格行提取数值
//! - `SeriesAggregator` - 汇总为按年份的序列
//! - `PlotAdapter` - 序列 → 图表描述
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份报告"的完整处理流程
//! - `ReportCtx` - 上下文封装（报告序号 + 定位器）
//! - `ReportFlow` - 流程编排（fetch → classify → extract）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/trend_engine` - 并发抓取并按顺序汇总
//! - `orchestrator/app` - 加载请求、写出图表和统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{DocumentSource, HtmlParser, HttpDocumentSource};
pub use models::{ChartSpec, CourseQuery, MetricSettings, Period, RunRequest, SeriesStore};
pub use orchestrator::{App, RunReport, RunStats, TrendEngine};
pub use workflow::{ReportCtx, ReportFlow, ReportOutcome};
