use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::config::Config;
use crate::models::course::CourseQuery;
use crate::orchestrator::RunStats;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nCEQ 趋势抓取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - CEQ 年度趋势");
    info!("🌐 报告地址: {}", config.report_base_url);
    info!(
        "📊 最大并发数: {} | 超时: {} 秒",
        config.max_concurrent_fetches, config.request_timeout_secs
    );
    info!("{}", "=".repeat(60));
}

/// 记录已加载的课程查询
pub fn log_queries(queries: &[CourseQuery]) {
    info!("✓ 找到 {} 个课程查询", queries.len());
    for query in queries {
        info!("   • {}", query);
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 运行统计
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &RunStats, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 报告总数: {}", stats.total);
    info!("✅ 完整: {}", stats.full);
    info!("🟡 仅通过率: {}", stats.pass_rate_only);
    info!("❌ 不可用: {}", stats.unavailable);
    info!(
        "🔢 写入数值: {} | 跳过指标: {} | 重复写入: {}",
        stats.stored_values, stats.skipped_metrics, stats.duplicate_writes
    );
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 把统计追加到日志文件
pub fn append_summary(log_file_path: &str, stats: &RunStats) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    writeln!(
        file,
        "{} | 报告 {} | 完整 {} | 仅通过率 {} | 不可用 {} | 数值 {} | 跳过 {} | 重复 {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        stats.total,
        stats.full,
        stats.pass_rate_only,
        stats.unavailable,
        stats.stored_values,
        stats.skipped_metrics,
        stats.duplicate_writes
    )?;
    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
