use std::collections::HashMap;

use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ceq_trends::error::{AppError, AppResult, ConfigError};
use ceq_trends::infrastructure::{DocumentSource, HtmlDocument, HtmlParser};
use ceq_trends::models::catalog::{CATALOG, PASS_RATE_KEY};
use ceq_trends::models::chart::ChartSeries;
use ceq_trends::models::{CourseQuery, MetricSettings, Period, RunRequest, YearlyMetricValue};
use ceq_trends::services::LocatorResolver;
use ceq_trends::{RunStats, TrendEngine};

const BASE: &str = "https://www.ceq.lth.se/rapporter";

/// 按地址返回预先解析好的报告，未登记的地址视为不可用
struct FixtureSource {
    docs: HashMap<String, HtmlDocument>,
}

impl FixtureSource {
    fn new() -> Self {
        Self {
            docs: HashMap::new(),
        }
    }

    fn with(mut self, url: String, html: &str) -> Self {
        let doc = HtmlParser::new().unwrap().parse(html);
        self.docs.insert(url, doc);
        self
    }
}

impl DocumentSource for FixtureSource {
    type Document = HtmlDocument;

    async fn fetch(&self, url: &str) -> AppResult<HtmlDocument> {
        self.docs
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch_unavailable(url, "404 Not Found"))
    }
}

fn pass_rate_row(year: i32) -> String {
    let passed = year - 1990;
    format!(
        "<tr><td>{}</td><td>{} av 124 ({}%)</td></tr>",
        PASS_RATE_KEY, passed, passed
    )
}

fn rating_rows(year: i32) -> String {
    CATALOG[1..]
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                metric.key,
                (year % 10) as usize * 10 + i,
                20 + i
            )
        })
        .collect()
}

fn full_report(year: i32) -> String {
    format!(
        r#"<html><body>
        <h3>CEQ-enkäten fylldes i</h3>
        <table>
          <tr><th>Fråga</th><th>Medel</th><th>Std</th></tr>
          {}
          {}
        </table>
        </body></html>"#,
        pass_rate_row(year),
        rating_rows(year)
    )
}

fn pass_rate_only_report(year: i32) -> String {
    format!(
        r#"<html><body>
        <h3>CEQ-enkäten fylldes i</h3>
        <p><em>Inga svar finns. Därför visas ingen sammanfattning av svaren.</em></p>
        <table>
          {}
          {}
        </table>
        </body></html>"#,
        pass_rate_row(year),
        rating_rows(year)
    )
}

fn url_for(query: &CourseQuery, year: i32) -> String {
    let (term, period) = query.period.resolve();
    LocatorResolver::new(BASE).report_url(&query.code, term, period, year)
}

fn kbk050_lp3() -> CourseQuery {
    CourseQuery::new("KBK050", Period::Lp3, 2020, 2022)
}

fn request(queries: Vec<CourseQuery>, settings: MetricSettings) -> RunRequest {
    RunRequest::new(0, queries, settings)
}

/// 2020 完整、2021 只有通过率、2022 不存在
fn mixed_source() -> FixtureSource {
    let query = kbk050_lp3();
    FixtureSource::new()
        .with(url_for(&query, 2020), &full_report(2020))
        .with(url_for(&query, 2021), &pass_rate_only_report(2021))
}

#[tokio::test]
async fn test_mixed_report_states() {
    let engine = TrendEngine::new(mixed_source(), BASE, 4);
    let report = engine
        .run(&request(vec![kbk050_lp3()], MetricSettings::catalog_defaults()))
        .await
        .unwrap();

    assert!(report.has_data);
    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.full, 1);
    assert_eq!(report.stats.pass_rate_only, 1);
    assert_eq!(report.stats.unavailable, 1);
    assert_eq!(report.stats.duplicate_writes, 0);

    // 7 + 1
    assert_eq!(report.store.len(), 8);
    assert_eq!(report.stats.stored_values, 8);
    assert_eq!(
        report.store.get("Pass Rate", 2020),
        Some(&YearlyMetricValue::new(30, 30))
    );
    assert_eq!(
        report.store.get("Pass Rate", 2021),
        Some(&YearlyMetricValue::new(31, 31))
    );
    assert!(report.store.get("Good Teaching", 2021).is_none());
    assert!(report.store.get("Pass Rate", 2022).is_none());

    assert_eq!(report.charts.len(), 7);
    let pass_rate = &report.charts[0];
    assert_eq!(pass_rate.title, "Pass Rate");
    assert_eq!(pass_rate.years, vec![2020, 2021]);
    assert_eq!(pass_rate.y_range, Some((0, 100)));
    assert_eq!(
        pass_rate.series,
        ChartSeries::Line {
            values: vec![30, 31]
        }
    );
    assert_eq!(report.charts[1].years, vec![2020]);
}

#[tokio::test]
async fn test_pass_rate_only_does_not_leak_into_next_year() {
    let query = kbk050_lp3();
    let source = FixtureSource::new()
        .with(url_for(&query, 2020), &pass_rate_only_report(2020))
        .with(url_for(&query, 2021), &full_report(2021))
        .with(url_for(&query, 2022), &full_report(2022));

    let report = TrendEngine::new(source, BASE, 1)
        .run(&request(vec![query], MetricSettings::catalog_defaults()))
        .await
        .unwrap();

    assert_eq!(report.stats.pass_rate_only, 1);
    assert_eq!(report.stats.full, 2);
    for metric in CATALOG.iter() {
        let label = metric.labels[0];
        assert!(report.store.get(label, 2021).is_some(), "{} 2021", label);
        assert!(report.store.get(label, 2022).is_some(), "{} 2022", label);
    }
    assert_eq!(report.store.len(), 1 + 7 + 7);
}

#[tokio::test]
async fn test_pass_rate_off_skips_unanswered_reports() {
    let mut settings = MetricSettings::catalog_defaults();
    settings.set(PASS_RATE_KEY, 0);

    let report = TrendEngine::new(mixed_source(), BASE, 2)
        .run(&request(vec![kbk050_lp3()], settings))
        .await
        .unwrap();

    assert_eq!(report.stats.full, 1);
    assert_eq!(report.stats.pass_rate_only, 0);
    assert_eq!(report.stats.unavailable, 2);
    assert_eq!(report.store.len(), 6);
    assert!(report.store.series("Pass Rate").is_none());
    assert_eq!(report.charts.len(), 6);
}

#[tokio::test]
async fn test_all_off_fetches_nothing() {
    let report = TrendEngine::new(mixed_source(), BASE, 4)
        .run(&request(vec![kbk050_lp3()], MetricSettings::all_off()))
        .await
        .unwrap();

    assert!(report.nothing_selected());
    assert!(!report.has_data);
    assert!(report.store.is_empty());
    assert!(report.charts.is_empty());
    assert_eq!(report.stats, RunStats::default());
}

#[tokio::test]
async fn test_missing_reports_give_no_data() {
    let report = TrendEngine::new(FixtureSource::new(), BASE, 4)
        .run(&request(vec![kbk050_lp3()], MetricSettings::catalog_defaults()))
        .await
        .unwrap();

    assert!(!report.has_data);
    assert!(!report.nothing_selected());
    assert_eq!(report.stats.unavailable, 3);
    assert!(report.charts.is_empty());
}

#[tokio::test]
async fn test_config_errors_surface() {
    let engine = TrendEngine::new(mixed_source(), BASE, 4);

    let mut missing = MetricSettings::catalog_defaults();
    missing.remove("Tydliga mål");
    let err = engine
        .run(&request(vec![kbk050_lp3()], missing))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Config(ConfigError::MissingMetric { .. }));

    let mut bad_mode = MetricSettings::catalog_defaults();
    bad_mode.set(PASS_RATE_KEY, 3);
    let err = engine
        .run(&request(vec![kbk050_lp3()], bad_mode))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Config(ConfigError::InvalidMode { mode: 3, .. }));

    let bad_language = RunRequest::new(2, vec![kbk050_lp3()], MetricSettings::catalog_defaults());
    let err = engine.run(&bad_language).await.unwrap_err();
    assert_matches!(err, AppError::Config(ConfigError::InvalidLanguage { value: 2 }));
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let engine = TrendEngine::new(mixed_source(), BASE, 4);
    let req = request(vec![kbk050_lp3()], MetricSettings::catalog_defaults());

    let first = engine.run(&req).await.unwrap();
    let second = engine.run(&req).await.unwrap();

    assert_eq!(first.store, second.store);
    assert_eq!(first.charts, second.charts);
    assert_eq!(first.stats, second.stats);
}

#[tokio::test]
async fn test_result_independent_of_concurrency() {
    let req = request(vec![kbk050_lp3()], MetricSettings::catalog_defaults());

    let serial = TrendEngine::new(mixed_source(), BASE, 1).run(&req).await.unwrap();
    let parallel = TrendEngine::new(mixed_source(), BASE, 8).run(&req).await.unwrap();

    assert_eq!(serial.store, parallel.store);
    assert_eq!(serial.charts, parallel.charts);
    assert_eq!(serial.stats, parallel.stats);
}

#[tokio::test]
async fn test_swedish_labels() {
    let req = RunRequest::new(1, vec![kbk050_lp3()], MetricSettings::catalog_defaults());
    let report = TrendEngine::new(mixed_source(), BASE, 4).run(&req).await.unwrap();

    assert!(report.store.get("Godkännandegrad", 2020).is_some());
    assert_eq!(report.charts[0].title, "Godkännandegrad");
    assert_eq!(report.charts[0].x_label, "År");
}

#[tokio::test]
async fn test_random_disjoint_queries_store_every_year_once() {
    let mut rng = StdRng::seed_from_u64(0x0CE0);
    let codes = ["KBK050", "KBKN05", "EDAA01", "FMAB20"];
    let periods = [Period::Lp1, Period::Lp2, Period::Lp3, Period::Lp4];

    for _ in 0..20 {
        let mut queries = Vec::new();
        let mut year = 2005;
        for _ in 0..rng.gen_range(1..=4) {
            let start = year + rng.gen_range(0..3);
            let end = start + rng.gen_range(0..4);
            queries.push(CourseQuery::new(
                codes[rng.gen_range(0..codes.len())],
                periods[rng.gen_range(0..periods.len())],
                start,
                end,
            ));
            year = end + 1;
        }

        let mut source = FixtureSource::new();
        for query in &queries {
            for y in query.years() {
                source = source.with(url_for(query, y), &full_report(y));
            }
        }

        let total_years: usize = queries.iter().map(|q| q.years().count()).sum();
        let report = TrendEngine::new(source, BASE, rng.gen_range(1..=6))
            .run(&request(queries, MetricSettings::catalog_defaults()))
            .await
            .unwrap();

        assert_eq!(report.stats.total, total_years);
        assert_eq!(report.stats.full, total_years);
        assert_eq!(report.stats.duplicate_writes, 0);
        assert_eq!(report.store.len(), total_years * CATALOG.len());
        for chart in &report.charts {
            assert_eq!(chart.years.len(), total_years);
            assert!(chart.years.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
