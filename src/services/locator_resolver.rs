//! 报告定位服务 - 业务能力层
//!
//! 只负责把课程查询展开为 (地址, 年份) 列表

use std::collections::HashMap;

use crate::models::course::{CourseQuery, Period, ReportLocator, Term};

/// 报告定位服务
pub struct LocatorResolver {
    base_url: String,
}

impl LocatorResolver {
    /// `base_url` 末尾的 `/` 会被去掉
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// 单个报告的地址
    pub fn report_url(&self, code: &str, term: Term, period: Period, year: i32) -> String {
        format!(
            "{base}/{year}_{term}/{period}/{code}_{year}_{term}_{period}_slutrapport.html",
            base = self.base_url,
        )
    }

    /// 展开所有查询
    ///
    /// 按地址去重：重复的地址保留首次出现的位置，年份取最后一次写入的值
    pub fn resolve(&self, queries: &[CourseQuery]) -> Vec<ReportLocator> {
        let mut locators: Vec<ReportLocator> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for query in queries {
            let (term, period) = query.period.resolve();

            for year in query.years() {
                let url = self.report_url(&query.code, term, period, year);
                match positions.get(&url) {
                    Some(&idx) => locators[idx].year = year,
                    None => {
                        positions.insert(url.clone(), locators.len());
                        locators.push(ReportLocator::new(url, year));
                    }
                }
            }
        }

        locators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.ceq.lth.se/rapporter/ceq";

    #[test]
    fn test_spring_query_expands_per_year() {
        let resolver = LocatorResolver::new(BASE);
        let locators = resolver.resolve(&[CourseQuery::new("KBK050", Period::Lp3, 2020, 2022)]);

        assert_eq!(locators.len(), 3);
        let years: Vec<i32> = locators.iter().map(|l| l.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        assert_eq!(
            locators[0].url,
            "https://www.ceq.lth.se/rapporter/ceq/2020_VT/LP1/KBK050_2020_VT_LP1_slutrapport.html"
        );
        assert!(locators.iter().all(|l| l.url.contains("_VT_LP1_")));
    }

    #[test]
    fn test_autumn_period_unchanged() {
        let resolver = LocatorResolver::new(format!("{}/", BASE));
        let locators = resolver.resolve(&[CourseQuery::new("KBKN05", Period::Lp1, 2024, 2024)]);

        assert_eq!(
            locators,
            vec![ReportLocator::new(
                "https://www.ceq.lth.se/rapporter/ceq/2024_HT/LP1/KBKN05_2024_HT_LP1_slutrapport.html",
                2024
            )]
        );
    }

    #[test]
    fn test_lp4_maps_to_spring_lp2() {
        let resolver = LocatorResolver::new(BASE);
        let locators = resolver.resolve(&[CourseQuery::new("FMAB20", Period::Lp4, 2019, 2019)]);
        assert!(locators[0].url.ends_with("2019_VT/LP2/FMAB20_2019_VT_LP2_slutrapport.html"));
    }

    #[test]
    fn test_duplicate_urls_collapse() {
        let resolver = LocatorResolver::new(BASE);
        let query = CourseQuery::new("KBK050", Period::Lp1, 2016, 2017);
        let locators = resolver.resolve(&[query.clone(), query]);
        assert_eq!(locators.len(), 2);
    }

    #[test]
    fn test_code_used_verbatim() {
        let resolver = LocatorResolver::new(BASE);
        let locators = resolver.resolve(&[CourseQuery::new("kbk050", Period::Lp2, 2016, 2016)]);
        assert!(locators[0].url.contains("/kbk050_2016_HT_LP2_"));
    }
}
