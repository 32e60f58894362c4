/// FundScope Record Implementation
///
/// A FundRecord is one mutual fund scheme as it appears in the startup document.
/// Records are immutable once loaded; every view over them is a new ordering of
/// shared `Rc<FundRecord>` handles.
///
/// Field access goes through the closed `FundField` and `Metric` selectors rather
/// than raw column-name strings, so grouping and sorting are checked at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SEBI risk-o-meter level, ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Low to Moderate")]
    LowToModerate,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Moderately High")]
    ModeratelyHigh,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// All levels in ascending order of risk.
    pub const ALL: [RiskLevel; 6] = [
        RiskLevel::Low,
        RiskLevel::LowToModerate,
        RiskLevel::Moderate,
        RiskLevel::ModeratelyHigh,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// The label used in the data document and on screen.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::LowToModerate => "Low to Moderate",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::ModeratelyHigh => "Moderately High",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    /// Parse a level from its document label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.label() == label)
    }

    /// Low and Low to Moderate count as conservative options.
    pub fn is_low(&self) -> bool {
        matches!(self, RiskLevel::Low | RiskLevel::LowToModerate)
    }

    /// Style tag for the risk badge in the results table.
    pub fn style_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::LowToModerate => "risk-low-mod",
            RiskLevel::Moderate => "risk-moderate",
            RiskLevel::ModeratelyHigh => "risk-mod-high",
            RiskLevel::High => "risk-high",
            RiskLevel::VeryHigh => "risk-very-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One mutual fund scheme.
///
/// Deserializes from the column names used by the analysis export; unknown
/// columns are ignored.
///
/// # Examples
///
/// ```
/// use fundscope::{FundRecord, RiskLevel};
///
/// let json = r#"{
///     "Scheme Name": "Axis Bluechip Fund - Direct Growth",
///     "AMC Name": "Axis Mutual Fund",
///     "Fund Type": "Equity",
///     "Category": "Large Cap",
///     "Investment Strategy": "Growth",
///     "Fund Manager": "Shreyash Devalkar",
///     "Risk Level": "Moderately High",
///     "Fund Rating": 4,
///     "Return 3Y (%)": 18.4,
///     "Expense Ratio (%)": 0.62,
///     "AUM (Cr)": 33120.5,
///     "Min SIP (₹)": 500,
///     "Score": 81.2
/// }"#;
///
/// let fund: FundRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(fund.risk_level, RiskLevel::ModeratelyHigh);
/// assert_eq!(fund.fund_rating, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    #[serde(rename = "Scheme Name")]
    pub scheme_name: String,
    #[serde(rename = "AMC Name")]
    pub amc_name: String,
    #[serde(rename = "Fund Type")]
    pub fund_type: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Investment Strategy")]
    pub investment_strategy: String,
    #[serde(rename = "Fund Manager")]
    pub fund_manager: String,
    #[serde(rename = "Risk Level")]
    pub risk_level: RiskLevel,
    /// Star rating in [1, 5]
    #[serde(rename = "Fund Rating")]
    pub fund_rating: u8,
    #[serde(rename = "Return 3Y (%)")]
    pub return_3y: f64,
    #[serde(rename = "Expense Ratio (%)")]
    pub expense_ratio: f64,
    /// Assets under management in crore
    #[serde(rename = "AUM (Cr)")]
    pub aum_cr: f64,
    #[serde(rename = "Min SIP (₹)")]
    pub min_sip: f64,
    /// Composite score, 0-100
    #[serde(rename = "Score")]
    pub score: f64,
}

impl FundRecord {
    /// Read a field through its typed selector.
    pub fn value(&self, field: FundField) -> FieldValue<'_> {
        match field {
            FundField::SchemeName => FieldValue::Text(&self.scheme_name),
            FundField::AmcName => FieldValue::Text(&self.amc_name),
            FundField::FundType => FieldValue::Text(&self.fund_type),
            FundField::Category => FieldValue::Text(&self.category),
            FundField::InvestmentStrategy => FieldValue::Text(&self.investment_strategy),
            FundField::FundManager => FieldValue::Text(&self.fund_manager),
            FundField::RiskLevel => FieldValue::Text(self.risk_level.label()),
            FundField::FundRating => FieldValue::Number(self.fund_rating as f64),
            FundField::Return3y => FieldValue::Number(self.return_3y),
            FundField::ExpenseRatio => FieldValue::Number(self.expense_ratio),
            FundField::Aum => FieldValue::Number(self.aum_cr),
            FundField::MinSip => FieldValue::Number(self.min_sip),
            FundField::Score => FieldValue::Number(self.score),
        }
    }

    /// Read a numeric field.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FundRating => self.fund_rating as f64,
            Metric::Return3y => self.return_3y,
            Metric::ExpenseRatio => self.expense_ratio,
            Metric::Aum => self.aum_cr,
            Metric::MinSip => self.min_sip,
            Metric::Score => self.score,
        }
    }

    /// AMC name with the first " Mutual Fund" suffix removed, as shown in
    /// narrow table columns and chart axes.
    pub fn short_amc_name(&self) -> String {
        short_amc_name(&self.amc_name)
    }
}

pub(crate) fn short_amc_name(name: &str) -> String {
    name.replacen(" Mutual Fund", "", 1)
}

/// Selector for every field of a `FundRecord`.
///
/// Serialized with the document's column names, which are also the table
/// headers' sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundField {
    #[serde(rename = "Scheme Name")]
    SchemeName,
    #[serde(rename = "AMC Name")]
    AmcName,
    #[serde(rename = "Fund Type")]
    FundType,
    #[serde(rename = "Category")]
    Category,
    #[serde(rename = "Investment Strategy")]
    InvestmentStrategy,
    #[serde(rename = "Fund Manager")]
    FundManager,
    #[serde(rename = "Risk Level")]
    RiskLevel,
    #[serde(rename = "Fund Rating")]
    FundRating,
    #[serde(rename = "Return 3Y (%)")]
    Return3y,
    #[serde(rename = "Expense Ratio (%)")]
    ExpenseRatio,
    #[serde(rename = "AUM (Cr)")]
    Aum,
    #[serde(rename = "Min SIP (₹)")]
    MinSip,
    #[serde(rename = "Score")]
    Score,
}

impl FundField {
    pub const ALL: [FundField; 13] = [
        FundField::SchemeName,
        FundField::AmcName,
        FundField::FundType,
        FundField::Category,
        FundField::InvestmentStrategy,
        FundField::FundManager,
        FundField::RiskLevel,
        FundField::FundRating,
        FundField::Return3y,
        FundField::ExpenseRatio,
        FundField::Aum,
        FundField::MinSip,
        FundField::Score,
    ];

    /// Column name in the data document.
    pub fn column_name(&self) -> &'static str {
        match self {
            FundField::SchemeName => "Scheme Name",
            FundField::AmcName => "AMC Name",
            FundField::FundType => "Fund Type",
            FundField::Category => "Category",
            FundField::InvestmentStrategy => "Investment Strategy",
            FundField::FundManager => "Fund Manager",
            FundField::RiskLevel => "Risk Level",
            FundField::FundRating => "Fund Rating",
            FundField::Return3y => "Return 3Y (%)",
            FundField::ExpenseRatio => "Expense Ratio (%)",
            FundField::Aum => "AUM (Cr)",
            FundField::MinSip => "Min SIP (₹)",
            FundField::Score => "Score",
        }
    }
}

impl fmt::Display for FundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Selector for the numeric fields that can be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    FundRating,
    Return3y,
    ExpenseRatio,
    Aum,
    MinSip,
    Score,
}

/// A field value as seen by the sort and group engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Label used when this value names a group.
    ///
    /// Whole numbers drop their fractional part, so a rating groups as "3".
    pub fn group_label(&self) -> String {
        match self {
            FieldValue::Text(s) => (*s).to_string(),
            FieldValue::Number(n) => number_label(*n),
        }
    }
}

/// Shortest decimal text for a number, without a trailing ".0".
pub(crate) fn number_label(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record with neutral defaults; tests override what they need.
    pub(crate) fn fund(name: &str) -> FundRecord {
        FundRecord {
            scheme_name: name.to_string(),
            amc_name: "Test Mutual Fund".to_string(),
            fund_type: "Equity".to_string(),
            category: "Large Cap".to_string(),
            investment_strategy: "Growth".to_string(),
            fund_manager: "A. Manager".to_string(),
            risk_level: RiskLevel::Moderate,
            fund_rating: 3,
            return_3y: 10.0,
            expense_ratio: 1.0,
            aum_cr: 1000.0,
            min_sip: 500.0,
            score: 50.0,
        }
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::LowToModerate);
        assert!(RiskLevel::LowToModerate < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::ModeratelyHigh);
        assert!(RiskLevel::ModeratelyHigh < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);

        let mut shuffled = vec![RiskLevel::VeryHigh, RiskLevel::Low, RiskLevel::High];
        shuffled.sort();
        assert_eq!(shuffled, vec![RiskLevel::Low, RiskLevel::High, RiskLevel::VeryHigh]);
    }

    #[test]
    fn test_risk_level_labels_round_trip() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_label(level.label()), Some(level));
        }
        assert_eq!(RiskLevel::from_label("low"), None);
        assert!(RiskLevel::Low.is_low());
        assert!(RiskLevel::LowToModerate.is_low());
        assert!(!RiskLevel::Moderate.is_low());
    }

    #[test]
    fn test_risk_level_style_class() {
        assert_eq!(RiskLevel::Low.style_class(), "risk-low");
        assert_eq!(RiskLevel::ModeratelyHigh.style_class(), "risk-mod-high");
        assert_eq!(RiskLevel::VeryHigh.style_class(), "risk-very-high");
    }

    #[test]
    fn test_record_deserialize_ignores_extra_columns() {
        let json = r#"{
            "Scheme Name": "Quant Small Cap Fund",
            "AMC Name": "Quant Mutual Fund",
            "Fund Type": "Equity",
            "Category": "Small Cap",
            "Sub Category": "Emerging",
            "Investment Strategy": "Aggressive Growth",
            "Fund Manager": "Ankit Agarwal",
            "Risk Level": "Very High",
            "Fund Rating": 5,
            "Return 1Y (%)": 41.2,
            "Return 3Y (%)": 38.75,
            "Expense Ratio (%)": 0.64,
            "AUM (Cr)": 15420.0,
            "Min SIP (₹)": 1000,
            "Score": 97.3,
            "Rank": 1
        }"#;

        let fund: FundRecord = serde_json::from_str(json).unwrap();
        assert_eq!(fund.scheme_name, "Quant Small Cap Fund");
        assert_eq!(fund.risk_level, RiskLevel::VeryHigh);
        assert_eq!(fund.fund_rating, 5);
        assert_eq!(fund.min_sip, 1000.0);
    }

    #[test]
    fn test_record_rejects_unknown_risk_level() {
        let json = r#"{
            "Scheme Name": "X", "AMC Name": "Y", "Fund Type": "Debt",
            "Category": "Liquid", "Investment Strategy": "Income",
            "Fund Manager": "Z", "Risk Level": "Extreme", "Fund Rating": 3,
            "Return 3Y (%)": 5.0, "Expense Ratio (%)": 0.2, "AUM (Cr)": 10.0,
            "Min SIP (₹)": 100, "Score": 20.0
        }"#;

        assert!(serde_json::from_str::<FundRecord>(json).is_err());
    }

    #[test]
    fn test_value_accessors() {
        let mut f = fund("Alpha");
        f.risk_level = RiskLevel::LowToModerate;
        f.fund_rating = 4;

        assert_eq!(f.value(FundField::SchemeName), FieldValue::Text("Alpha"));
        assert_eq!(f.value(FundField::RiskLevel), FieldValue::Text("Low to Moderate"));
        assert_eq!(f.value(FundField::FundRating), FieldValue::Number(4.0));
        assert!(matches!(f.value(FundField::Category), FieldValue::Text(_)));
        assert_eq!(f.metric(Metric::Aum), 1000.0);
    }

    #[test]
    fn test_metric_matches_field_value() {
        let f = fund("Alpha");
        let pairs = [
            (FundField::FundRating, Metric::FundRating),
            (FundField::Return3y, Metric::Return3y),
            (FundField::ExpenseRatio, Metric::ExpenseRatio),
            (FundField::Aum, Metric::Aum),
            (FundField::MinSip, Metric::MinSip),
            (FundField::Score, Metric::Score),
        ];
        for (field, metric) in pairs {
            assert_eq!(f.value(field), FieldValue::Number(f.metric(metric)));
        }
    }

    #[test]
    fn test_field_column_names() {
        for field in FundField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.column_name()));
        }
        let parsed: FundField = serde_json::from_str("\"Return 3Y (%)\"").unwrap();
        assert_eq!(parsed, FundField::Return3y);
    }

    #[test]
    fn test_group_label() {
        assert_eq!(FieldValue::Number(3.0).group_label(), "3");
        assert_eq!(FieldValue::Number(87.5).group_label(), "87.5");
        assert_eq!(FieldValue::Text("Debt").group_label(), "Debt");
    }

    #[test]
    fn test_short_amc_name() {
        let mut f = fund("Alpha");
        f.amc_name = "HDFC Mutual Fund".to_string();
        assert_eq!(f.short_amc_name(), "HDFC");
        assert_eq!(short_amc_name("Quantum"), "Quantum");
    }
}
