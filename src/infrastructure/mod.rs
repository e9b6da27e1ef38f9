//! 基础设施层
//!
//! 持有稀缺资源（HTTP 客户端），只暴露能力：抓取并解析报告、渲染图表描述

pub mod document;
pub mod document_source;
pub mod renderer;

pub use document::{HtmlDocument, HtmlParser, ParsedDocument, RowId};
pub use document_source::{DocumentSource, HttpDocumentSource};
pub use renderer::{JsonRenderer, SeriesRenderer};
