use crate::error::{AppError, AppResult, FileError};
use crate::models::request::RunRequest;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文本解析运行请求
///
/// `origin` 只用于错误信息
pub fn parse_run_request(content: &str, origin: &str) -> AppResult<RunRequest> {
    let request: RunRequest = toml::from_str(content).map_err(|source| {
        AppError::File(FileError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    })?;
    Ok(request)
}

/// 从 TOML 文件加载运行请求
pub async fn load_run_request(path: &Path) -> AppResult<RunRequest> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let request = parse_run_request(&content, &path.display().to_string())?;

    tracing::info!(
        "成功加载请求: {} 个课程查询, 显示语言 {}",
        request.courses.len(),
        request.plot_language
    );

    Ok(request)
}

/// 写入带目录默认模式的请求模板
pub async fn write_request_template(path: &Path) -> AppResult<()> {
    let content = toml::to_string_pretty(&RunRequest::template()).map_err(FileError::from)?;
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    tracing::info!("已写入请求模板: {}", path.display());
    Ok(())
}
