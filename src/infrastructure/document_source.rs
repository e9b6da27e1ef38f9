//! 文档来源 - 基础设施层
//!
//! 持有 HTTP 客户端，只暴露"抓取并解析一个地址"的能力

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::document::{HtmlDocument, HtmlParser, ParsedDocument};

/// 文档来源
///
/// 任何传输或状态码错误都映射为 [`AppError::FetchUnavailable`]
pub trait DocumentSource: Send + Sync {
    type Document: ParsedDocument;

    fn fetch(&self, url: &str) -> impl Future<Output = AppResult<Self::Document>> + Send;
}

/// 基于 reqwest 的 HTTP 文档来源
///
/// 职责：
/// - 持有唯一的 HTTP 客户端（固定超时）
/// - 不认识指标 / 课程
/// - 不处理报告状态
pub struct HttpDocumentSource {
    client: reqwest::Client,
    parser: HtmlParser,
}

impl HttpDocumentSource {
    /// 创建新的 HTTP 文档来源
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("ceq_trends/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            parser: HtmlParser::new()?,
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl DocumentSource for HttpDocumentSource {
    type Document = HtmlDocument;

    async fn fetch(&self, url: &str) -> AppResult<HtmlDocument> {
        debug!("抓取报告: {}", url);

        let html = self
            .fetch_html(url)
            .await
            .map_err(|e| AppError::fetch_unavailable(url, e))?;

        debug!("报告长度: {} 字节", html.len());
        Ok(self.parser.parse(&html))
    }
}
