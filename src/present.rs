/// Presentation boundary
///
/// Everything the page needs after a recomputation is collected in a
/// `DashboardFrame`: KPI counters, chart series, insights, the results table and
/// the filter controls. A `DashboardSink` consumes frames; the sinks here write a
/// static HTML page or the frame as JSON.

use crate::aggregate::SummaryStats;
use crate::charts::ChartSeries;
use crate::filter::{FilterControl, FilterCriteria};
use crate::format::{escape_html, format_inr, group_indian, to_fixed};
use crate::insights::InsightPanel;
use crate::record::{FundField, FundRecord};
use crate::sort::SortState;
use serde::Serialize;
use std::borrow::Borrow;
use std::io::{self, Write};

/// Header badge shown when the startup document cannot be loaded.
pub const LOAD_ERROR_BADGE: &str = "Data Load Error";

/// Rows shown in the results table by default.
pub const DEFAULT_TABLE_ROWS: usize = 30;

// ============================================================================
// KPI counters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiId {
    TotalFunds,
    TotalAum,
    AvgReturn,
    ExpenseRatio,
    AvgSip,
}

impl KpiId {
    pub fn label(&self) -> &'static str {
        match self {
            KpiId::TotalFunds => "Total Funds",
            KpiId::TotalAum => "Total AUM (₹ Cr)",
            KpiId::AvgReturn => "Avg 3Y Return (%)",
            KpiId::ExpenseRatio => "Avg Expense Ratio (%)",
            KpiId::AvgSip => "Avg Min SIP (₹)",
        }
    }

    /// Page element the counter is written into.
    pub fn element_id(&self) -> &'static str {
        match self {
            KpiId::TotalFunds => "kpiTotalFunds",
            KpiId::TotalAum => "kpiTotalAUM",
            KpiId::AvgReturn => "kpiAvgReturn",
            KpiId::ExpenseRatio => "kpiExpenseRatio",
            KpiId::AvgSip => "kpiAvgSIP",
        }
    }
}

/// A labelled numeric value displayed by an animated counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiCounter {
    pub id: KpiId,
    pub target: f64,
    /// Decimals shown while counting; 0 shows a whole number
    pub decimals: usize,
    /// Currency counters use the crore/lakh compact form
    pub currency: bool,
}

impl KpiCounter {
    /// Text for an intermediate or final value of this counter.
    pub fn display(&self, value: f64) -> String {
        if self.currency {
            format_inr(value.round())
        } else if self.decimals > 0 {
            to_fixed(value, self.decimals)
        } else {
            group_indian(value.round() as i64)
        }
    }

    pub fn final_text(&self) -> String {
        self.display(self.target)
    }
}

/// Counters for the KPI strip. On an empty view every counter targets 0 shown
/// as a whole number.
pub fn kpi_counters(stats: &SummaryStats) -> Vec<KpiCounter> {
    let decimals = |places: usize| if stats.is_empty() { 0 } else { places };
    vec![
        KpiCounter { id: KpiId::TotalFunds, target: stats.count as f64, decimals: 0, currency: false },
        KpiCounter { id: KpiId::TotalAum, target: stats.total_aum.round(), decimals: 0, currency: true },
        KpiCounter { id: KpiId::AvgReturn, target: stats.avg_return, decimals: decimals(1), currency: false },
        KpiCounter { id: KpiId::ExpenseRatio, target: stats.avg_expense, decimals: decimals(2), currency: false },
        KpiCounter { id: KpiId::AvgSip, target: stats.avg_sip, decimals: 0, currency: true },
    ]
}

// ============================================================================
// Results table
// ============================================================================

/// Column headers of the results table with the field each one sorts by.
pub const TABLE_COLUMNS: [(&str, Option<FundField>); 11] = [
    ("#", None),
    ("Scheme Name", Some(FundField::SchemeName)),
    ("AMC", Some(FundField::AmcName)),
    ("Type", Some(FundField::FundType)),
    ("Category", Some(FundField::Category)),
    ("Risk", Some(FundField::RiskLevel)),
    ("Rating", Some(FundField::FundRating)),
    ("3Y Return", Some(FundField::Return3y)),
    ("Expense", Some(FundField::ExpenseRatio)),
    ("AUM (₹ Cr)", Some(FundField::Aum)),
    ("Score", Some(FundField::Score)),
];

/// Filled stars for the rating, unfilled for the rest of five.
pub fn rating_stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Text colour of the return cell.
pub fn return_color(return_3y: f64) -> &'static str {
    if return_3y > 20.0 {
        "#34d399"
    } else if return_3y > 10.0 {
        "#fbbf24"
    } else {
        "#fb7185"
    }
}

/// Badge class of the score cell.
pub fn score_class(score: f64) -> &'static str {
    if score > 70.0 {
        "score-high"
    } else if score > 40.0 {
        "score-mid"
    } else {
        "score-low"
    }
}

/// One formatted row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub scheme_name: String,
    pub amc: String,
    pub fund_type: String,
    pub category: String,
    pub risk_level: &'static str,
    pub risk_class: &'static str,
    pub stars: String,
    pub return_text: String,
    pub return_color: &'static str,
    pub expense_text: String,
    pub aum_text: String,
    pub score_text: String,
    pub score_class: &'static str,
}

impl TableRow {
    pub fn from_record(rank: usize, fund: &FundRecord) -> Self {
        TableRow {
            rank,
            scheme_name: fund.scheme_name.clone(),
            amc: fund.short_amc_name(),
            fund_type: fund.fund_type.clone(),
            category: fund.category.clone(),
            risk_level: fund.risk_level.label(),
            risk_class: fund.risk_level.style_class(),
            stars: rating_stars(fund.fund_rating),
            return_text: format!("{}%", to_fixed(fund.return_3y, 1)),
            return_color: return_color(fund.return_3y),
            expense_text: format!("{}%", to_fixed(fund.expense_ratio, 2)),
            aum_text: format!("₹{}", format_inr(fund.aum_cr.round())),
            score_text: to_fixed(fund.score, 0),
            score_class: score_class(fund.score),
        }
    }

    pub fn to_html(&self) -> String {
        let scheme = escape_html(&self.scheme_name);
        format!(
            "<tr><td>{rank}</td><td title=\"{scheme}\">{scheme}</td><td>{amc}</td><td>{kind}</td>\
             <td>{category}</td><td><span class=\"risk-badge {risk_class}\">{risk}</span></td>\
             <td><span class=\"rating-stars\">{stars}</span></td>\
             <td style=\"color: {color}; font-weight: 600;\">{ret}</td><td>{expense}</td><td>{aum}</td>\
             <td><span class=\"score-badge {score_class}\">{score}</span></td></tr>",
            rank = self.rank,
            scheme = scheme,
            amc = escape_html(&self.amc),
            kind = escape_html(&self.fund_type),
            category = escape_html(&self.category),
            risk_class = self.risk_class,
            risk = self.risk_level,
            stars = self.stars,
            color = self.return_color,
            ret = self.return_text,
            expense = self.expense_text,
            aum = self.aum_text,
            score_class = self.score_class,
            score = self.score_text,
        )
    }
}

/// The first `limit` records of the view as table rows, ranked from 1.
pub fn table_rows<R>(records: &[R], limit: usize) -> Vec<TableRow>
where
    R: Borrow<FundRecord>,
{
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| TableRow::from_record(i + 1, record.borrow()))
        .collect()
}

// ============================================================================
// Frame and sinks
// ============================================================================

/// A filter control with its options and current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChoice {
    pub control: FilterControl,
    /// Caption of the "no constraint" option, whose value is the empty string
    pub all_label: &'static str,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

/// Everything rendered after one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub header_badge: String,
    pub criteria: FilterCriteria,
    pub sort: SortState,
    pub controls: Vec<FilterChoice>,
    pub kpis: Vec<KpiCounter>,
    pub charts: Vec<ChartSeries>,
    pub insights: InsightPanel,
    pub table: Vec<TableRow>,
}

/// Consumer of rendered dashboard frames.
pub trait DashboardSink {
    /// Render a freshly computed frame.
    fn render(&mut self, frame: &DashboardFrame) -> io::Result<()>;

    /// Show the load-error indicator in place of the dashboard.
    fn load_failed(&mut self, message: &str) -> io::Result<()>;
}

/// Writes each frame as a static HTML page.
pub struct HtmlSink<W: Write> {
    out: W,
}

impl<W: Write> HtmlSink<W> {
    pub fn new(out: W) -> Self {
        HtmlSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DashboardSink for HtmlSink<W> {
    fn render(&mut self, frame: &DashboardFrame) -> io::Result<()> {
        self.out.write_all(render_page(frame)?.as_bytes())
    }

    fn load_failed(&mut self, message: &str) -> io::Result<()> {
        write!(
            self.out,
            "<!DOCTYPE html>\n<html><body><header><span class=\"header-badge\">{}</span></header>\
             <!-- {} --></body></html>\n",
            LOAD_ERROR_BADGE,
            escape_html(message)
        )
    }
}

/// Writes each frame as one line of JSON.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DashboardSink for JsonSink<W> {
    fn render(&mut self, frame: &DashboardFrame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")
    }

    fn load_failed(&mut self, message: &str) -> io::Result<()> {
        let value = serde_json::json!({ "header_badge": LOAD_ERROR_BADGE, "error": message });
        serde_json::to_writer(&mut self.out, &value)?;
        self.out.write_all(b"\n")
    }
}

/// Assemble a static HTML page for a frame. Chart series are embedded as JSON
/// for the charting script.
pub fn render_page(frame: &DashboardFrame) -> io::Result<String> {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">");
    html.push_str("<title>Mutual Fund Insights Dashboard</title></head>\n<body>\n");
    html.push_str(&format!(
        "<header><h1>Mutual Fund Insights</h1><span class=\"header-badge\" id=\"headerBadge\">{}</span></header>\n",
        escape_html(&frame.header_badge)
    ));

    html.push_str("<section class=\"filters\">");
    for choice in &frame.controls {
        html.push_str(&format!("<select id=\"{}\">", choice.control.element_id()));
        html.push_str(&format!("<option value=\"\">{}</option>", choice.all_label));
        for option in &choice.options {
            let selected = if choice.selected.as_deref() == Some(option.as_str()) {
                " selected"
            } else {
                ""
            };
            let option = escape_html(option);
            html.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", option, selected));
        }
        html.push_str("</select>");
    }
    html.push_str("<button id=\"btnReset\">Reset</button></section>\n");

    html.push_str("<section class=\"kpis\">");
    for kpi in &frame.kpis {
        html.push_str(&format!(
            "<div class=\"kpi-card\"><span class=\"kpi-label\">{}</span><span class=\"kpi-value\" id=\"{}\">{}</span></div>",
            kpi.id.label(),
            kpi.id.element_id(),
            kpi.final_text()
        ));
    }
    html.push_str("</section>\n");

    let charts = serde_json::to_string(&frame.charts)?;
    html.push_str(&format!(
        "<script type=\"application/json\" id=\"chartData\">{}</script>\n",
        charts.replace("</", "<\\/")
    ));

    html.push_str(&format!(
        "<section class=\"insights-grid\" id=\"insightsGrid\">{}</section>\n",
        frame.insights.to_html()
    ));

    html.push_str("<table class=\"data-table\"><thead><tr>");
    for (caption, field) in TABLE_COLUMNS.iter() {
        match field {
            Some(field) => {
                let class = if *field == frame.sort.key {
                    format!(" class=\"{}\"", frame.sort.order.header_class())
                } else {
                    String::new()
                };
                html.push_str(&format!(
                    "<th data-sort=\"{}\"{}>{}</th>",
                    escape_html(field.column_name()),
                    class,
                    caption
                ));
            }
            None => html.push_str(&format!("<th>{}</th>", caption)),
        }
    }
    html.push_str("</tr></thead><tbody id=\"top30Body\">");
    for row in &frame.table {
        html.push_str(&row.to_html());
    }
    html.push_str("</tbody></table>\n</body>\n</html>\n");

    Ok(html)
}
