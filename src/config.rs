/// 程序配置
///
/// 运行参数来自环境变量（先加载 `.env`），查询内容本身来自 TOML 请求文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 报告根地址
    pub report_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 同时抓取的报告数量，1 表示严格顺序
    pub max_concurrent_fetches: usize,
    /// 请求文件（课程、指标模式、显示语言）
    pub request_file: String,
    /// 图表输出文件（JSON）
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_base_url: "https://www.ceq.lth.se/rapporter/ceq".to_string(),
            request_timeout_secs: 10,
            max_concurrent_fetches: 4,
            request_file: "ceq_request.toml".to_string(),
            output_file: "charts.json".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            report_base_url: std::env::var("REPORT_BASE_URL").unwrap_or(default.report_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_concurrent_fetches: std::env::var("MAX_CONCURRENT_FETCHES").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.max_concurrent_fetches),
            request_file: std::env::var("REQUEST_FILE").unwrap_or(default.request_file),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
