pub mod catalog;
pub mod categories;
pub mod chart;
pub mod course;
pub mod loaders;
pub mod request;
pub mod series;

pub use catalog::{DisplayMode, Language, MetricDef, MetricKind, PlotText, CATALOG, PASS_RATE_KEY};
pub use categories::{ActiveCategories, ActiveCategory, CategorySelection};
pub use chart::{ChartSeries, ChartSpec};
pub use course::{CourseQuery, Period, ReportLocator, Term};
pub use loaders::{load_run_request, write_request_template};
pub use request::{MetricSettings, RunRequest};
pub use series::{SeriesStore, YearlyMetricValue};
