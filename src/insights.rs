/// Short natural-language statements derived from the summary statistics.
///
/// Statement text is HTML: figures are wrapped in `<strong>` and every value
/// taken from the data is escaped.

use crate::aggregate::SummaryStats;
use crate::format::{escape_html, format_inr, to_fixed};
use serde::Serialize;

/// Characters of the top performer's scheme name shown before the ellipsis.
const SCHEME_NAME_PREVIEW: usize = 50;

pub const EMPTY_ICON: &str = "🔍";
pub const EMPTY_TITLE: &str = "No Data";
pub const EMPTY_TEXT: &str = "Try adjusting your filters to see results.";

/// One insight card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub icon: &'static str,
    pub title: &'static str,
    /// HTML body
    pub text: String,
}

impl Insight {
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"insight-card\"><div class=\"insight-emoji\">{}</div>\
             <div class=\"insight-content\"><h4>{}</h4><p>{}</p></div></div>",
            self.icon, self.title, self.text
        )
    }
}

/// The insight grid: either the empty-state card or the generated insights.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InsightPanel {
    Empty,
    Insights { cards: Vec<Insight> },
}

impl InsightPanel {
    pub fn is_empty(&self) -> bool {
        matches!(self, InsightPanel::Empty)
    }

    pub fn cards(&self) -> &[Insight] {
        match self {
            InsightPanel::Empty => &[],
            InsightPanel::Insights { cards } => cards,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            InsightPanel::Empty => Insight {
                icon: EMPTY_ICON,
                title: EMPTY_TITLE,
                text: EMPTY_TEXT.to_string(),
            }
            .to_html(),
            InsightPanel::Insights { cards } => cards.iter().map(Insight::to_html).collect(),
        }
    }
}

/// Wording for the average-return level.
pub fn growth_outlook(avg_return: f64) -> &'static str {
    if avg_return > 15.0 {
        "strong"
    } else if avg_return > 10.0 {
        "moderate"
    } else {
        "conservative"
    }
}

/// Generate the insight panel for a view's statistics.
pub fn generate_insights(stats: &SummaryStats) -> InsightPanel {
    let (Some(top), Some(cheapest), Some(largest), Some(dominant)) = (
        &stats.top_performer,
        &stats.lowest_expense,
        &stats.largest_aum,
        &stats.dominant_type,
    ) else {
        return InsightPanel::Empty;
    };

    let preview: String = top.scheme_name.chars().take(SCHEME_NAME_PREVIEW).collect();

    let cards = vec![
        Insight {
            icon: "📈",
            title: "Average 3-Year Return",
            text: format!(
                "Across {} filtered funds, the average 3-year return stands at <strong>{}%</strong>. \
                 This indicates {} growth potential.",
                stats.count,
                to_fixed(stats.avg_return, 1),
                growth_outlook(stats.avg_return)
            ),
        },
        Insight {
            icon: "🏆",
            title: "Top Performer",
            text: format!(
                "<strong>{}...</strong> leads with a 3-year return of <strong>{}%</strong>.",
                escape_html(&preview),
                to_fixed(top.return_3y, 1)
            ),
        },
        Insight {
            icon: "💰",
            title: "Lowest Expense Ratio",
            text: format!(
                "<strong>{}</strong> offers the lowest expense at <strong>{}%</strong>, \
                 maximizing your net returns.",
                escape_html(&cheapest.amc_name),
                to_fixed(cheapest.expense_ratio, 2)
            ),
        },
        Insight {
            icon: "🏦",
            title: "Largest AUM",
            text: format!(
                "<strong>{}</strong> manages the highest AUM at <strong>₹{}</strong> Cr, \
                 showing strong investor confidence.",
                escape_html(&largest.amc_name),
                format_inr(largest.aum_cr.round())
            ),
        },
        Insight {
            icon: "📊",
            title: "Dominant Fund Type",
            text: format!(
                "<strong>{}</strong> funds dominate with <strong>{}</strong> schemes \
                 ({}% of filtered results).",
                escape_html(&dominant.fund_type),
                dominant.count,
                to_fixed(stats.share(dominant.count), 0)
            ),
        },
        Insight {
            icon: "🛡️",
            title: "Low-Risk Options",
            text: format!(
                "<strong>{}</strong> funds ({}%) are classified as Low or Low-to-Moderate risk, \
                 ideal for conservative investors.",
                stats.low_risk_count,
                to_fixed(stats.share(stats.low_risk_count), 0)
            ),
        },
    ];

    InsightPanel::Insights { cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::fund;
    use crate::record::{FundRecord, RiskLevel};

    fn view() -> Vec<FundRecord> {
        let mut a = fund("Parag Parikh Flexi Cap Fund - Direct Plan - Growth Option Long Name");
        a.amc_name = "Parag Parikh Mutual Fund".to_string();
        a.return_3y = 24.56;
        a.expense_ratio = 0.63;
        a.aum_cr = 48_000.0;
        a.risk_level = RiskLevel::ModeratelyHigh;

        let mut b = fund("L&T Liquid Fund");
        b.amc_name = "L&T Mutual Fund".to_string();
        b.fund_type = "Debt".to_string();
        b.return_3y = 6.2;
        b.expense_ratio = 0.12;
        b.aum_cr = 250_000.0;
        b.risk_level = RiskLevel::Low;

        let mut c = fund("Axis Midcap");
        c.return_3y = 19.1;
        c.risk_level = RiskLevel::High;

        vec![a, b, c]
    }

    #[test]
    fn test_empty_view_gives_empty_panel() {
        let records: Vec<FundRecord> = Vec::new();
        let panel = generate_insights(&SummaryStats::compute(&records));

        assert!(panel.is_empty());
        assert!(panel.cards().is_empty());
        let html = panel.to_html();
        assert!(html.contains("No Data"));
        assert!(html.contains("Try adjusting your filters to see results."));
    }

    #[test]
    fn test_six_insights() {
        let panel = generate_insights(&SummaryStats::compute(&view()));
        let cards = panel.cards();

        assert_eq!(cards.len(), 6);
        let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec![
                "Average 3-Year Return",
                "Top Performer",
                "Lowest Expense Ratio",
                "Largest AUM",
                "Dominant Fund Type",
                "Low-Risk Options",
            ]
        );
    }

    #[test]
    fn test_insight_text() {
        let panel = generate_insights(&SummaryStats::compute(&view()));
        let cards = panel.cards();

        // (24.56 + 6.2 + 19.1) / 3 = 16.62
        assert!(cards[0].text.contains("Across 3 filtered funds"));
        assert!(cards[0].text.contains("<strong>16.6%</strong>"));
        assert!(cards[0].text.contains("strong growth potential"));

        assert!(cards[1].text.starts_with(
            "<strong>Parag Parikh Flexi Cap Fund - Direct Plan - Growth...</strong>"
        ));
        assert!(cards[1].text.contains("<strong>24.6%</strong>"));

        assert!(cards[2].text.contains("<strong>L&amp;T Mutual Fund</strong>"));
        assert!(cards[2].text.contains("<strong>0.12%</strong>"));

        assert!(cards[3].text.contains("<strong>₹2.5 L</strong> Cr"));

        assert!(cards[4].text.contains("<strong>Equity</strong> funds dominate with <strong>2</strong> schemes (67%"));
        assert!(cards[5].text.contains("<strong>1</strong> funds (33%)"));
    }

    #[test]
    fn test_growth_outlook() {
        assert_eq!(growth_outlook(15.1), "strong");
        assert_eq!(growth_outlook(15.0), "moderate");
        assert_eq!(growth_outlook(10.0), "conservative");
        assert_eq!(growth_outlook(0.0), "conservative");
    }

    #[test]
    fn test_panel_html() {
        let panel = generate_insights(&SummaryStats::compute(&view()));
        let html = panel.to_html();
        assert_eq!(html.matches("class=\"insight-card\"").count(), 6);
        assert!(html.contains("<h4>Top Performer</h4>"));
    }
}
