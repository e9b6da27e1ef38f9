//! 输入校验服务 - 业务能力层
//!
//! 在核心流程之前规范化并校验课程查询

use regex::Regex;

use crate::error::{AppResult, ValidationError};
use crate::models::course::CourseQuery;

/// 最早有报告的年份
pub const MIN_YEAR: i32 = 2003;
/// 允许查询的最晚年份
pub const MAX_YEAR: i32 = 2026;

/// 输入校验服务
///
/// 职责：
/// - 课程代码转大写并检查格式（6 位字母或数字）
/// - 年份范围、起止顺序
/// - 不同查询的年份区间不得重叠
/// - 按起始年份排序
pub struct InputValidator {
    code_re: Regex,
    min_year: i32,
    max_year: i32,
}

impl InputValidator {
    pub fn new() -> AppResult<Self> {
        Self::with_year_bounds(MIN_YEAR, MAX_YEAR)
    }

    pub fn with_year_bounds(min_year: i32, max_year: i32) -> AppResult<Self> {
        Ok(Self {
            code_re: Regex::new(r"^[A-Z0-9]{6}$")?,
            min_year,
            max_year,
        })
    }

    /// 返回规范化并排序后的查询
    pub fn normalize(&self, queries: &[CourseQuery]) -> Result<Vec<CourseQuery>, ValidationError> {
        if queries.is_empty() {
            return Err(ValidationError::NoQueries);
        }

        let mut normalized = Vec::with_capacity(queries.len());
        for query in queries {
            let code = query.code.trim().to_uppercase();
            if !self.code_re.is_match(&code) {
                return Err(ValidationError::InvalidCourseCode {
                    code: query.code.clone(),
                });
            }

            for year in [query.start_year, query.end_year] {
                if !(self.min_year..=self.max_year).contains(&year) {
                    return Err(ValidationError::YearOutOfRange {
                        year,
                        min: self.min_year,
                        max: self.max_year,
                    });
                }
            }

            if query.start_year > query.end_year {
                return Err(ValidationError::InvertedSpan {
                    start: query.start_year,
                    end: query.end_year,
                });
            }

            normalized.push(CourseQuery { code, ..query.clone() });
        }

        for (i, first) in normalized.iter().enumerate() {
            if let Some(second) = normalized[i + 1..].iter().find(|q| first.overlaps(q)) {
                return Err(ValidationError::OverlappingSpans {
                    first_start: first.start_year,
                    first_end: first.end_year,
                    second_start: second.start_year,
                    second_end: second.end_year,
                });
            }
        }

        normalized.sort_by_key(|q| q.start_year);
        Ok(normalized)
    }
}
