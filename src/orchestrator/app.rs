//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、启动信息、输入校验器
//! 2. **加载请求**：读取 TOML 请求文件，不存在时写入模板
//! 3. **输入校验**：课程代码、年份范围、区间重叠
//! 4. **运行引擎**：创建 HTTP 文档来源并委托 `TrendEngine`
//! 5. **输出图表**：渲染为 JSON 写入输出文件
//! 6. **全局统计**：打印并追加到日志文件

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{HttpDocumentSource, JsonRenderer, SeriesRenderer};
use crate::models::chart::ChartSpec;
use crate::models::{load_run_request, write_request_template};
use crate::orchestrator::trend_engine::{RunReport, TrendEngine};
use crate::services::InputValidator;
use crate::utils::logging::{append_summary, init_log_file, log_queries, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    validator: InputValidator,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法初始化日志文件: {}", config.output_log_file))?;

        log_startup(&config);

        Ok(Self {
            config,
            validator: InputValidator::new()?,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 返回是否产生了数据
    pub async fn run(&self) -> Result<bool> {
        let request_path = Path::new(&self.config.request_file);
        if !request_path.exists() {
            write_request_template(request_path).await?;
            warn!(
                "⚠️ 请求文件 {} 不存在，已写入模板，请编辑后重新运行",
                request_path.display()
            );
            return Ok(false);
        }

        let mut request = load_run_request(request_path)
            .await
            .with_context(|| format!("无法加载请求文件: {}", request_path.display()))?;

        request.courses = self.validator.normalize(&request.courses)?;
        log_queries(&request.courses);

        let source = HttpDocumentSource::new(&self.config)?;
        let engine = TrendEngine::from_config(source, &self.config);
        let report = engine.run(&request).await?;

        print_final_stats(&report.stats, &self.config.output_log_file);
        append_summary(&self.config.output_log_file, &report.stats)?;

        self.finish(&report).await
    }

    async fn finish(&self, report: &RunReport) -> Result<bool> {
        if report.nothing_selected() {
            warn!("⚠️ 所有指标都已关闭，没有可绘制的图表");
            return Ok(false);
        }

        if !report.has_data {
            warn!("⚠️ 没有找到任何数据，请检查输入是否有误");
            return Ok(false);
        }

        self.write_charts(&report.charts).await?;
        Ok(true)
    }

    /// 渲染并写入图表
    async fn write_charts(&self, charts: &[ChartSpec]) -> Result<()> {
        let renderer = JsonRenderer;
        let figures = charts
            .iter()
            .map(|chart| renderer.render(chart))
            .collect::<AppResult<Vec<_>>>()?;

        let content = serde_json::to_string_pretty(&figures)?;
        tokio::fs::write(&self.config.output_file, content)
            .await
            .with_context(|| format!("无法写入图表文件: {}", self.config.output_file))?;

        info!(
            "✓ 已写入 {} 张图表: {}",
            figures.len(),
            self.config.output_file
        );
        Ok(())
    }
}
