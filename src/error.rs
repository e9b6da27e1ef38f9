//! 错误类型
//!
//! 致命错误只有 [`ConfigError`] 和 [`ValidationError`]，它们在任何抓取之前就会返回给调用方。
//! 其余错误（报告不可用、指标缺失或无法解析）都在发现处被吸收，只记录日志和计数。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 输入校验错误
    #[error("输入错误: {0}")]
    Validation(#[from] ValidationError),
    /// 报告无法获取（单个定位器，非致命）
    #[error("报告不可用 ({url}): {reason}")]
    FetchUnavailable { url: String, reason: String },
    /// 指标提取错误（单个指标，非致命）
    #[error("指标错误: {0}")]
    Metric(#[from] MetricError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// HTTP 客户端初始化失败
    #[error("HTTP客户端错误: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// 正则表达式编译失败
    #[error("正则表达式错误: {0}")]
    Pattern(#[from] regex::Error),
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 配置错误
///
/// 对应指标配置表和显示语言选择，出现即终止，不做部分选择
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 缺少某个目录指标
    #[error("缺少指标配置项: {key}")]
    MissingMetric { key: String },
    /// 配置中出现目录之外的指标
    #[error("未知的指标配置项: {key}")]
    UnknownMetric { key: String },
    /// 模式值超出 0..=2
    #[error("指标 {key} 的模式 {mode} 无效 (应为 0、1 或 2)")]
    InvalidMode { key: String, mode: i64 },
    /// 显示语言选择超出 0..=1
    #[error("显示语言选择 {value} 无效 (应为 0 或 1)")]
    InvalidLanguage { value: i64 },
    /// 学习期代码无法识别
    #[error("无法识别的学习期: {value} (应为 LP1-LP4)")]
    InvalidPeriod { value: String },
}

/// 输入校验错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 没有任何课程查询
    #[error("没有任何课程查询")]
    NoQueries,
    /// 课程代码格式错误
    #[error("课程代码无效: '{code}' (需要 6 位字母或数字)")]
    InvalidCourseCode { code: String },
    /// 年份超出允许范围
    #[error("年份 {year} 超出范围 [{min}, {max}]")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    /// 起始年份大于结束年份
    #[error("年份区间 {start}-{end} 无效: 起始年份大于结束年份")]
    InvertedSpan { start: i32, end: i32 },
    /// 两个查询的年份区间重叠
    #[error("年份区间 {first_start}-{first_end} 与 {second_start}-{second_end} 重叠")]
    OverlappingSpans {
        first_start: i32,
        first_end: i32,
        second_start: i32,
        second_end: i32,
    },
}

/// 指标提取错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricError {
    /// 没有任何表格行的第一个单元格包含该键
    #[error("未找到包含 '{key}' 的表格行")]
    NotFound { key: String },
    /// 单元格内容无法解析为整数
    #[error("无法解析 '{key}' 的数值: {cells:?}")]
    Parse { key: String, cells: Vec<String> },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建报告不可用错误
    pub fn fetch_unavailable(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::FetchUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为致命错误（需要中止整个运行）
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::FetchUnavailable { .. } | AppError::Metric(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
