pub mod category_selector;
pub mod input_validator;
pub mod locator_resolver;
pub mod metric_extractor;
pub mod plot_adapter;
pub mod report_classifier;
pub mod series_aggregator;

pub use category_selector::CategorySelector;
pub use input_validator::InputValidator;
pub use locator_resolver::LocatorResolver;
pub use metric_extractor::{Extraction, MetricExtractor};
pub use plot_adapter::PlotAdapter;
pub use report_classifier::{Classification, ReportClassifier, ReportState};
pub use series_aggregator::SeriesAggregator;
