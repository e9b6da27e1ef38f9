//! 指标提取服务 - 业务能力层
//!
//! 只负责从一份文档中读出活动指标的两个原始数值，不关心报告状态和汇总

use tracing::debug;

use crate::error::MetricError;
use crate::infrastructure::ParsedDocument;
use crate::models::categories::ActiveCategories;
use crate::models::series::YearlyMetricValue;

/// 一份报告的提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub year: i32,
    /// (标题, 数值)，按活动集合顺序
    pub values: Vec<(&'static str, YearlyMetricValue)>,
    /// 被跳过的指标
    pub skipped: Vec<MetricError>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 指标提取服务
///
/// 职责：
/// - 按子串匹配找到指标所在行
/// - 按单元格布局读取两个整数
/// - 单个指标失败只跳过该指标
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricExtractor;

impl MetricExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(
        &self,
        active: &ActiveCategories,
        doc: &impl ParsedDocument,
        year: i32,
    ) -> Extraction {
        let mut extraction = Extraction {
            year,
            ..Default::default()
        };

        for category in active.iter() {
            match self.extract_metric(category.key(), doc) {
                Ok(value) => extraction.values.push((category.label, value)),
                Err(e) => {
                    debug!("{} 年跳过指标: {}", year, e);
                    extraction.skipped.push(e);
                }
            }
        }

        extraction
    }

    /// 提取单个指标
    pub fn extract_metric(
        &self,
        key: &str,
        doc: &impl ParsedDocument,
    ) -> Result<YearlyMetricValue, MetricError> {
        let row = doc.find_row(key).ok_or_else(|| MetricError::NotFound {
            key: key.to_string(),
        })?;
        parse_cells(key, &doc.row_cells(row))
    }
}

/// 按单元格布局解析一行
///
/// - 2 个单元格：第二个单元格是复合文字，如 `37 av 124 (30%)` 或 `37 / 30`
/// - 多于 2 个：第 1、2 个单元格直接是两个整数
pub fn parse_cells(key: &str, cells: &[String]) -> Result<YearlyMetricValue, MetricError> {
    let parsed = match cells {
        [_, composite] => parse_composite(composite),
        [_, first, second, ..] => parse_int(first).zip(parse_int(second)),
        _ => None,
    };

    parsed
        .map(|(primary, secondary)| YearlyMetricValue::new(primary, secondary))
        .ok_or_else(|| MetricError::Parse {
            key: key.to_string(),
            cells: cells.to_vec(),
        })
}

/// 复合单元格：第 0 个词是主值；有百分号的词优先作为次值，否则取第 2 个词
///
/// 百分号单独成词时（如 `(30 %)`）取它前面的数字
fn parse_composite(composite: &str) -> Option<(i32, i32)> {
    let tokens: Vec<&str> = composite.split_whitespace().collect();
    let primary = parse_int(tokens.first()?)?;

    let percentage = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.contains('%'))
        .find_map(|(idx, t)| {
            parse_int(t).or_else(|| {
                let previous = tokens.get(idx.checked_sub(1)?)?;
                parse_int(previous)
            })
        });

    let secondary = match percentage {
        Some(value) => value,
        None => parse_int(tokens.get(2)?)?,
    };

    Some((primary, secondary))
}

/// 去掉括号和百分号后解析整数；接受 `+` 号和 Unicode 减号，其余字符一律拒绝
fn parse_int(token: &str) -> Option<i32> {
    token
        .trim_matches(|c: char| matches!(c, '(' | ')' | '%'))
        .replace('−', "-")
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::HtmlParser;
    use crate::models::catalog::PASS_RATE_KEY;
    use crate::models::request::MetricSettings;
    use crate::services::CategorySelector;
    use assert_matches::assert_matches;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compact_layout() {
        let row = cells(&["Antal godkända/andel av registrerade", "37 av 124 (30%)"]);
        assert_eq!(
            parse_cells(PASS_RATE_KEY, &row).unwrap(),
            YearlyMetricValue::new(37, 30)
        );

        let row = cells(&["Antal godkända/andel av registrerade", "37 / 30"]);
        assert_eq!(
            parse_cells(PASS_RATE_KEY, &row).unwrap(),
            YearlyMetricValue::new(37, 30)
        );

        let row = cells(&["Antal godkända/andel av registrerade", "117 / 74 %"]);
        assert_eq!(
            parse_cells(PASS_RATE_KEY, &row).unwrap(),
            YearlyMetricValue::new(117, 74)
        );

        let row = cells(&["Antal godkända/andel av registrerade", "37 av 124 (30 %)"]);
        assert_eq!(
            parse_cells(PASS_RATE_KEY, &row).unwrap(),
            YearlyMetricValue::new(37, 30)
        );
    }

    #[test]
    fn test_expanded_layout() {
        let row = cells(&["God undervisning", "4", "1"]);
        assert_eq!(
            parse_cells("God undervisning", &row).unwrap(),
            YearlyMetricValue::new(4, 1)
        );

        let row = cells(&["Lämplig arbetsbelastning", "−12", "38", "25"]);
        assert_eq!(
            parse_cells("Lämplig arbetsbelastning", &row).unwrap(),
            YearlyMetricValue::new(-12, 38)
        );
    }

    #[test]
    fn test_unparsable_cells() {
        let row = cells(&["God undervisning", "n/a", "1"]);
        assert_matches!(
            parse_cells("God undervisning", &row),
            Err(MetricError::Parse { .. })
        );

        let row = cells(&["Antal godkända/andel av registrerade", "37"]);
        assert_matches!(
            parse_cells(PASS_RATE_KEY, &row),
            Err(MetricError::Parse { .. })
        );

        let row = cells(&["God undervisning", "x5", "1"]);
        assert_matches!(
            parse_cells("God undervisning", &row),
            Err(MetricError::Parse { .. })
        );

        let row = cells(&["God undervisning", "12p", "1"]);
        assert_matches!(
            parse_cells("God undervisning", &row),
            Err(MetricError::Parse { .. })
        );

        let row = cells(&["God undervisning"]);
        assert_matches!(
            parse_cells("God undervisning", &row),
            Err(MetricError::Parse { .. })
        );
    }

    #[test]
    fn test_missing_metric_skips_only_that_metric() {
        let html = r#"
            <table>
              <tr><td>Antal godkända/andel av registrerade</td><td>37 av 124 (30%)</td></tr>
              <tr><td>God undervisning</td><td>4</td><td>1</td></tr>
              <tr><td>Tydliga mål</td><td>x</td><td>y</td></tr>
            </table>"#;
        let doc = HtmlParser::new().unwrap().parse(html);

        let mut settings = MetricSettings::all_off();
        settings
            .set(PASS_RATE_KEY, 1)
            .set("God undervisning", 1)
            .set("Tydliga mål", 1)
            .set("Kursen känns angelägen för min utbildning", 2);
        let active = CategorySelector::new().select(&settings, 0).unwrap().base;

        let extraction = MetricExtractor::new().extract(&active, &doc, 2021);
        assert_eq!(extraction.year, 2021);
        assert_eq!(
            extraction.values,
            vec![
                ("Pass Rate", YearlyMetricValue::new(37, 30)),
                ("Good Teaching", YearlyMetricValue::new(4, 1)),
            ]
        );
        assert_eq!(extraction.skipped.len(), 2);
        assert_matches!(&extraction.skipped[0], MetricError::Parse { key, .. } if key == "Tydliga mål");
        assert_matches!(&extraction.skipped[1], MetricError::NotFound { .. });
    }

    #[test]
    fn test_metric_inside_nested_table() {
        let html = r#"
            <table>
              <tr>
                <td>Resultat</td>
                <td><table>
                  <tr><td>Antal godkända/andel av registrerade</td><td>37 av 124 (30 %)</td></tr>
                </table></td>
              </tr>
            </table>"#;
        let doc = HtmlParser::new().unwrap().parse(html);

        assert_eq!(
            MetricExtractor::new().extract_metric(PASS_RATE_KEY, &doc),
            Ok(YearlyMetricValue::new(37, 30))
        );
    }
}
