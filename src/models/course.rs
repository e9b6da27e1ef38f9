//! 课程查询与报告定位器

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 学期：HT（秋季）或 VT（春季）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Ht,
    Vt,
}

impl Term {
    pub fn code(self) -> &'static str {
        match self {
            Term::Ht => "HT",
            Term::Vt => "VT",
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 学习期 LP1-LP4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    Lp1,
    Lp2,
    Lp3,
    Lp4,
}

impl Period {
    pub fn code(self) -> &'static str {
        match self {
            Period::Lp1 => "LP1",
            Period::Lp2 => "LP2",
            Period::Lp3 => "LP3",
            Period::Lp4 => "LP4",
        }
    }

    /// 解析为报告地址使用的 (学期, 学习期)
    ///
    /// LP3/LP4 在报告系统中是春季学期的 LP1/LP2
    pub fn resolve(self) -> (Term, Period) {
        match self {
            Period::Lp3 => (Term::Vt, Period::Lp1),
            Period::Lp4 => (Term::Vt, Period::Lp2),
            other => (Term::Ht, other),
        }
    }
}

impl FromStr for Period {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LP1" => Ok(Period::Lp1),
            "LP2" => Ok(Period::Lp2),
            "LP3" => Ok(Period::Lp3),
            "LP4" => Ok(Period::Lp4),
            _ => Err(ConfigError::InvalidPeriod {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.code().to_string()
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 一门课程在一个学习期、一段年份上的查询
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseQuery {
    /// 课程代码，原样使用（大小写由调用方处理）
    pub code: String,
    pub period: Period,
    pub start_year: i32,
    /// 包含在内
    pub end_year: i32,
}

impl CourseQuery {
    pub fn new(code: impl Into<String>, period: Period, start_year: i32, end_year: i32) -> Self {
        Self {
            code: code.into(),
            period,
            start_year,
            end_year,
        }
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// 与另一个查询的年份区间是否重叠
    pub fn overlaps(&self, other: &CourseQuery) -> bool {
        self.start_year <= other.end_year && other.start_year <= self.end_year
    }
}

impl Display for CourseQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}-{}",
            self.code, self.period, self.start_year, self.end_year
        )
    }
}

/// 一个可抓取的报告
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportLocator {
    pub url: String,
    pub year: i32,
}

impl ReportLocator {
    pub fn new(url: impl Into<String>, year: i32) -> Self {
        Self {
            url: url.into(),
            year,
        }
    }
}
