//! 指标目录
//!
//! 静态表：每个指标在报告表格中的查找键、两种语言的显示标题和默认显示模式。
//! 业务键（查找键）与显示语言在这里分开，只在选择器中结合。

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 显示语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// 英语
    English = 0,
    /// 瑞典语
    Swedish = 1,
}

impl Language {
    /// 标签表中的列索引
    pub fn index(self) -> usize {
        self as usize
    }

    /// 从 0/1 选择值解析
    pub fn from_selector(value: i64) -> Result<Self, ConfigError> {
        match value {
            0 => Ok(Language::English),
            1 => Ok(Language::Swedish),
            _ => Err(ConfigError::InvalidLanguage { value }),
        }
    }
}

/// 指标类别，决定第二个数值的含义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// 通过率：人数 + 百分比
    PassRate,
    /// 评分题：均值 + 离散度（单位随指标而定，不一定是标准差）
    Rating,
}

/// 显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    Off,
    /// 通过人数
    Count,
    /// 通过百分比
    Percentage,
    /// 均值折线
    Mean,
    /// 均值 + 误差带
    MeanAndSpread,
}

impl DisplayMode {
    /// 从整数模式解析
    ///
    /// 0 = 关闭；通过率 1 = 人数 / 2 = 百分比；其他指标 1 = 均值 / 2 = 均值 + 离散度
    pub fn from_mode(kind: MetricKind, mode: i64) -> Option<Self> {
        match (kind, mode) {
            (_, 0) => Some(DisplayMode::Off),
            (MetricKind::PassRate, 1) => Some(DisplayMode::Count),
            (MetricKind::PassRate, 2) => Some(DisplayMode::Percentage),
            (MetricKind::Rating, 1) => Some(DisplayMode::Mean),
            (MetricKind::Rating, 2) => Some(DisplayMode::MeanAndSpread),
            _ => None,
        }
    }

    /// 转回整数模式
    pub fn code(self) -> i64 {
        match self {
            DisplayMode::Off => 0,
            DisplayMode::Count | DisplayMode::Mean => 1,
            DisplayMode::Percentage | DisplayMode::MeanAndSpread => 2,
        }
    }

    pub fn is_off(self) -> bool {
        self == DisplayMode::Off
    }
}

/// 目录中的一个指标
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDef {
    /// 查找键，按子串匹配表格行第一个单元格
    pub key: &'static str,
    /// [英语, 瑞典语] 标题
    pub labels: [&'static str; 2],
    pub kind: MetricKind,
    pub default_mode: DisplayMode,
}

impl MetricDef {
    /// 指定语言的标题
    pub fn label(&self, language: Language) -> &'static str {
        self.labels[language.index()]
    }
}

/// 通过率指标的查找键
pub const PASS_RATE_KEY: &str = "Antal godkända/andel av registrerade";

/// 全部七个指标，顺序即图表输出顺序
pub static CATALOG: [MetricDef; 7] = [
    MetricDef {
        key: PASS_RATE_KEY,
        labels: ["Pass Rate", "Godkännandegrad"],
        kind: MetricKind::PassRate,
        default_mode: DisplayMode::Percentage,
    },
    MetricDef {
        key: "God undervisning",
        labels: ["Good Teaching", "God undervisning"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
    MetricDef {
        key: "Tydliga mål",
        labels: ["Clear Goals and Standards", "Tydliga mål"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
    MetricDef {
        key: "Förståelseinriktad examination",
        labels: ["Appropriate Assessment", "Förståelseinriktad examination"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
    MetricDef {
        key: "Lämplig arbetsbelastning",
        labels: ["Appropriate Workload", "Lämplig arbetsbelastning"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
    MetricDef {
        key: "Kursen känns angelägen för min utbildning",
        labels: ["Course Relevance", "Kursrelevans"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
    MetricDef {
        key: "Överlag är jag nöjd med den här kursen",
        labels: ["Course Satisfaction", "Kursnöjdhet"],
        kind: MetricKind::Rating,
        default_mode: DisplayMode::Mean,
    },
];

static KEY_INDEX: phf::Map<&'static str, usize> = phf_map! {
    "Antal godkända/andel av registrerade" => 0,
    "God undervisning" => 1,
    "Tydliga mål" => 2,
    "Förståelseinriktad examination" => 3,
    "Lämplig arbetsbelastning" => 4,
    "Kursen känns angelägen för min utbildning" => 5,
    "Överlag är jag nöjd med den här kursen" => 6,
};

/// 按查找键精确查找指标
pub fn lookup(key: &str) -> Option<&'static MetricDef> {
    KEY_INDEX.get(key).map(|&idx| &CATALOG[idx])
}

/// 通过率指标
pub fn pass_rate() -> &'static MetricDef {
    &CATALOG[0]
}

/// 坐标轴和图例文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotText {
    AmountOfStudents,
    Percentage,
    Mean,
    MeanAndSpread,
    Score,
    Year,
}

impl PlotText {
    pub fn text(self, language: Language) -> &'static str {
        let pair = match self {
            PlotText::AmountOfStudents => ["Amount of Students", "Antal Studenter"],
            PlotText::Percentage => ["Percentage (%)", "Andel (%)"],
            PlotText::Mean => ["Mean", "Medelvärde"],
            PlotText::MeanAndSpread => ["Mean ± Std dev", "Medelvärde ± standardavvikelse"],
            PlotText::Score => ["Score", "Poäng"],
            PlotText::Year => ["Year", "År"],
        };
        pair[language.index()]
    }
}
