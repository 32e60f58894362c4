/// Chart series emitted for the charting layer.
///
/// Each recomputation produces fresh series; the renderer owns chart handles and
/// their lifecycle. A series is a list of labelled values plus the colours the
/// renderer should use, tagged with which chart it feeds and how it is drawn.

use crate::aggregate::{group_by, AggregateOp, GroupEntry};
use crate::record::{short_amc_name, FundField, FundRecord, Metric, RiskLevel};
use serde::Serialize;
use std::borrow::Borrow;

/// Base palette for categorical charts.
pub const PALETTE: [&str; 20] = [
    "#6366f1", "#06b6d4", "#10b981", "#f59e0b", "#f43f5e",
    "#8b5cf6", "#0ea5e9", "#f97316", "#ec4899", "#14b8a6",
    "#a855f7", "#eab308", "#3b82f6", "#ef4444", "#22c55e",
    "#e879f9", "#fbbf24", "#2dd4bf", "#fb923c", "#818cf8",
];

const FUND_TYPE_COLORS: [&str; 5] = ["#6366f1", "#06b6d4", "#10b981", "#f59e0b", "#f43f5e"];

/// Risk bucket colours, in `RiskLevel::ALL` order.
const RISK_COLORS: [&str; 6] = ["#10b981", "#14b8a6", "#f59e0b", "#f97316", "#f43f5e", "#dc2626"];

const TOP_CATEGORIES: usize = 12;
const TOP_AMCS: usize = 10;
const TOP_MANAGERS: usize = 12;

/// Which dashboard chart a series feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    CategoryReturns,
    TopAmcReturns,
    AumByFundType,
    ExpenseByStrategy,
    AumByManager,
    RiskDistribution,
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    Doughnut,
    Bar,
    HorizontalBar,
    PolarArea,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub id: ChartId,
    pub style: ChartStyle,
    /// Dataset caption; empty for charts that only show a legend
    pub dataset_label: &'static str,
    pub points: Vec<GroupEntry>,
    pub background: Vec<String>,
    pub border: Vec<String>,
}

impl ChartSeries {
    fn new(id: ChartId, style: ChartStyle, dataset_label: &'static str, points: Vec<GroupEntry>) -> Self {
        ChartSeries {
            id,
            style,
            dataset_label,
            points,
            background: Vec::new(),
            border: Vec::new(),
        }
    }

    fn with_background(mut self, colors: Vec<String>) -> Self {
        self.background = colors;
        self
    }

    fn with_border(mut self, colors: Vec<String>) -> Self {
        self.border = colors;
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build every dashboard chart series from the active view.
pub fn build_charts<R>(records: &[R]) -> Vec<ChartSeries>
where
    R: Borrow<FundRecord>,
{
    vec![
        category_returns(records),
        top_amc_returns(records),
        aum_by_fund_type(records),
        expense_by_strategy(records),
        aum_by_manager(records),
        risk_distribution(records),
    ]
}

/// Top categories by average 3-year return.
pub fn category_returns<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let points = group_by(records, FundField::Category, Metric::Return3y, AggregateOp::Average)
        .sorted_descending()
        .top(TOP_CATEGORIES)
        .into_entries();
    let colors = PALETTE.iter().take(points.len()).map(|c| c.to_string()).collect();

    ChartSeries::new(ChartId::CategoryReturns, ChartStyle::Doughnut, "", points).with_background(colors)
}

/// Top AMCs by average 3-year return, labelled without the " Mutual Fund" suffix.
pub fn top_amc_returns<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let points: Vec<GroupEntry> = group_by(records, FundField::AmcName, Metric::Return3y, AggregateOp::Average)
        .sorted_descending()
        .top(TOP_AMCS)
        .into_entries()
        .into_iter()
        .map(|entry| GroupEntry {
            label: short_amc_name(&entry.label),
            value: entry.value,
        })
        .collect();
    let colors = gradient("#6366f1", "#06b6d4", points.len());

    ChartSeries::new(ChartId::TopAmcReturns, ChartStyle::Bar, "Avg 3Y Return (%)", points).with_background(colors)
}

/// Total AUM per fund type.
pub fn aum_by_fund_type<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let points = group_by(records, FundField::FundType, Metric::Aum, AggregateOp::Sum)
        .sorted_descending()
        .into_entries();
    let colors = (0..points.len())
        .map(|i| FUND_TYPE_COLORS[i % FUND_TYPE_COLORS.len()].to_string())
        .collect();

    ChartSeries::new(ChartId::AumByFundType, ChartStyle::Doughnut, "", points).with_background(colors)
}

/// Average expense ratio per investment strategy.
pub fn expense_by_strategy<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let points = group_by(records, FundField::InvestmentStrategy, Metric::ExpenseRatio, AggregateOp::Average)
        .sorted_descending()
        .into_entries();
    let colors = gradient("#f43f5e", "#f59e0b", points.len());

    ChartSeries::new(ChartId::ExpenseByStrategy, ChartStyle::Bar, "Avg Expense Ratio (%)", points)
        .with_background(colors)
}

/// Top fund managers by total AUM.
pub fn aum_by_manager<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let points = group_by(records, FundField::FundManager, Metric::Aum, AggregateOp::Sum)
        .sorted_descending()
        .top(TOP_MANAGERS)
        .into_entries();
    let colors = gradient("#8b5cf6", "#06b6d4", points.len());

    ChartSeries::new(ChartId::AumByManager, ChartStyle::HorizontalBar, "Total AUM (₹ Cr)", points)
        .with_background(colors)
}

/// Record count per risk level in fixed risk order; empty buckets are left out.
pub fn risk_distribution<R: Borrow<FundRecord>>(records: &[R]) -> ChartSeries {
    let mut counts = [0usize; 6];
    for record in records {
        let fund: &FundRecord = record.borrow();
        counts[fund.risk_level as usize] += 1;
    }

    let mut points = Vec::new();
    let mut background = Vec::new();
    let mut border = Vec::new();
    for (i, level) in RiskLevel::ALL.iter().enumerate() {
        if counts[i] == 0 {
            continue;
        }
        points.push(GroupEntry {
            label: level.label().to_string(),
            value: counts[i] as f64,
        });
        background.push(format!("{}66", RISK_COLORS[i]));
        border.push(RISK_COLORS[i].to_string());
    }

    ChartSeries::new(ChartId::RiskDistribution, ChartStyle::PolarArea, "", points)
        .with_background(background)
        .with_border(border)
}

/// `count` colours stepping evenly from `from` to `to`.
pub fn gradient(from: &str, to: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let ratio = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.0
            };
            interpolate_color(from, to, ratio)
        })
        .collect()
}

/// Linear blend of two `#rrggbb` colours, as `rgb(r, g, b)`.
pub fn interpolate_color(from: &str, to: &str, ratio: f64) -> String {
    let (r1, g1, b1) = parse_hex(from);
    let (r2, g2, b2) = parse_hex(to);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * ratio).round() as u8;
    format!("rgb({}, {}, {})", mix(r1, r2), mix(g1, g2), mix(b1, b2))
}

fn parse_hex(color: &str) -> (u8, u8, u8) {
    let hex = color.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::fund;

    #[test]
    fn test_empty_view_gives_empty_series() {
        let records: Vec<FundRecord> = Vec::new();
        let charts = build_charts(&records);

        assert_eq!(charts.len(), 6);
        for chart in &charts {
            assert!(chart.is_empty());
            assert!(chart.background.is_empty());
        }
    }

    #[test]
    fn test_category_returns_top_twelve_descending() {
        let records: Vec<FundRecord> = (0..15)
            .map(|i| {
                let mut f = fund(&format!("F{}", i));
                f.category = format!("Cat{:02}", i);
                f.return_3y = i as f64;
                f
            })
            .collect();

        let series = category_returns(&records);
        assert_eq!(series.points.len(), 12);
        assert_eq!(series.points[0].label, "Cat14");
        assert_eq!(series.points[11].label, "Cat03");
        assert_eq!(series.background[0], PALETTE[0]);
        assert_eq!(series.style, ChartStyle::Doughnut);
    }

    #[test]
    fn test_top_amc_labels_are_shortened() {
        let mut a = fund("A");
        a.amc_name = "SBI Mutual Fund".to_string();
        a.return_3y = 12.0;
        let mut b = fund("B");
        b.amc_name = "Quant Mutual Fund".to_string();
        b.return_3y = 30.0;

        let series = top_amc_returns(&[a, b]);
        assert_eq!(series.labels(), vec!["Quant", "SBI"]);
        assert_eq!(series.background, vec!["rgb(99, 102, 241)", "rgb(6, 182, 212)"]);
    }

    #[test]
    fn test_aum_by_fund_type_sums_all_types() {
        let specs = [("Equity", 500.0), ("Debt", 1500.0), ("Equity", 700.0)];
        let records: Vec<FundRecord> = specs
            .iter()
            .map(|(kind, aum)| {
                let mut f = fund(kind);
                f.fund_type = kind.to_string();
                f.aum_cr = *aum;
                f
            })
            .collect();

        let series = aum_by_fund_type(&records);
        assert_eq!(series.labels(), vec!["Debt", "Equity"]);
        assert_eq!(series.values(), vec![1500.0, 1200.0]);
    }

    #[test]
    fn test_risk_distribution_omits_empty_buckets() {
        let levels = [RiskLevel::VeryHigh, RiskLevel::Low, RiskLevel::VeryHigh, RiskLevel::Moderate];
        let records: Vec<FundRecord> = levels
            .iter()
            .map(|level| {
                let mut f = fund("R");
                f.risk_level = *level;
                f
            })
            .collect();

        let series = risk_distribution(&records);
        assert_eq!(series.labels(), vec!["Low", "Moderate", "Very High"]);
        assert_eq!(series.values(), vec![1.0, 1.0, 2.0]);
        assert_eq!(series.background, vec!["#10b98166", "#f59e0b66", "#dc262666"]);
        assert_eq!(series.border, vec!["#10b981", "#f59e0b", "#dc2626"]);
    }

    #[test]
    fn test_gradient_endpoints() {
        let colors = gradient("#000000", "#ffffff", 3);
        assert_eq!(colors, vec!["rgb(0, 0, 0)", "rgb(128, 128, 128)", "rgb(255, 255, 255)"]);

        assert_eq!(gradient("#f43f5e", "#f59e0b", 1), vec!["rgb(244, 63, 94)"]);
        assert!(gradient("#f43f5e", "#f59e0b", 0).is_empty());
    }
}
