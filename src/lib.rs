/// FundScope - Mutual Fund Dashboard Pipeline
///
/// The filter, aggregate and sort pipeline behind an interactive mutual-fund
/// analytics dashboard. A startup document of fund records is loaded once; every
/// interaction rebuilds the active view and re-derives the KPI counters, chart
/// series, insights and results table from it.

pub mod error;
pub mod format;
pub mod record;
pub mod filter;
pub mod sort;
pub mod aggregate;
pub mod store;
pub mod charts;
pub mod insights;
pub mod present;
pub mod animate;
pub mod messages;
pub mod dashboard;
pub mod config;

pub use error::{DashboardError, Result};
pub use record::{FieldValue, FundField, FundRecord, Metric, RiskLevel};
pub use filter::{apply_filters, FilterControl, FilterCriteria};
pub use sort::{sort_records, SortOrder, SortState};
pub use aggregate::{group_by, AggregateOp, GroupEntry, GroupedValues, SummaryStats, TypeCount};
pub use store::{DashboardDocument, DataStore, DocumentKpis, FilterOptions};
pub use charts::{build_charts, ChartId, ChartSeries, ChartStyle};
pub use insights::{generate_insights, Insight, InsightPanel};
pub use present::{
    kpi_counters, render_page, table_rows, DashboardFrame, DashboardSink, FilterChoice, HtmlSink,
    JsonSink, KpiCounter, KpiId, TableRow,
};
pub use animate::{CounterAnimator, CounterFrame};
pub use messages::InteractionEvent;
pub use dashboard::DashboardState;
pub use config::{DashboardConfig, OutputFormat};
