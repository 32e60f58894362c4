/// FundScope Aggregation
///
/// Grouped statistics over an arbitrary field and the summary figures shown in
/// the KPI strip and the insight cards.
///
/// Every reduction walks the view in its current order, so "first occurrence"
/// tie-breaks are defined by the active view and nothing else.

use crate::format::round_to;
use crate::record::{FundField, FundRecord, Metric};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;

/// Reduction applied within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    #[serde(alias = "avg")]
    Average,
    Count,
}

/// One group label with its reduced value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry {
    pub label: String,
    pub value: f64,
}

/// Group label → value entries, in the order groups were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupedValues {
    entries: Vec<GroupEntry>,
}

impl GroupedValues {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<GroupEntry> {
        self.entries
    }

    /// Value of a group by label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Sum of every group value.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Largest value first; equal values keep their first-seen order.
    pub fn sorted_descending(mut self) -> Self {
        self.entries.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Keep the first `n` entries.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

/// Group `records` by `group` and reduce `value` within each group.
///
/// Sums and averages are rounded to two decimals. `Count` ignores `value`.
///
/// # Examples
///
/// ```
/// use fundscope::{group_by, AggregateOp, FundField, Metric};
/// # use fundscope::{FundRecord, RiskLevel};
/// # fn fund(fund_type: &str, aum: f64) -> FundRecord {
/// #     FundRecord {
/// #         scheme_name: "S".into(), amc_name: "A".into(), fund_type: fund_type.into(),
/// #         category: "C".into(), investment_strategy: "G".into(), fund_manager: "M".into(),
/// #         risk_level: RiskLevel::Moderate, fund_rating: 3, return_3y: 10.0,
/// #         expense_ratio: 1.0, aum_cr: aum, min_sip: 500.0, score: 50.0,
/// #     }
/// # }
///
/// let funds = vec![fund("Equity", 500.0), fund("Debt", 1500.0), fund("Equity", 250.25)];
/// let aum = group_by(&funds, FundField::FundType, Metric::Aum, AggregateOp::Sum);
///
/// assert_eq!(aum.labels(), vec!["Equity", "Debt"]);
/// assert_eq!(aum.get("Equity"), Some(750.25));
/// ```
pub fn group_by<R>(records: &[R], group: FundField, value: Metric, op: AggregateOp) -> GroupedValues
where
    R: Borrow<FundRecord>,
{
    // (label, running sum, count) in first-seen order
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let fund: &FundRecord = record.borrow();
        let label = fund.value(group).group_label();
        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, 0.0, 0));
                groups.len() - 1
            }
        };
        let entry = &mut groups[slot];
        entry.1 += fund.metric(value);
        entry.2 += 1;
    }

    let entries = groups
        .into_iter()
        .map(|(label, sum, count)| {
            let value = match op {
                AggregateOp::Sum => round_to(sum, 2),
                AggregateOp::Average => round_to(sum / count as f64, 2),
                AggregateOp::Count => count as f64,
            };
            GroupEntry { label, value }
        })
        .collect();

    GroupedValues { entries }
}

/// The most common fund type and how many records carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub fund_type: String,
    pub count: usize,
}

/// Summary figures of the active view.
///
/// Averages are 0 on an empty view; the record-valued figures are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub total_aum: f64,
    /// Mean 3-year return, one decimal
    pub avg_return: f64,
    /// Mean expense ratio, two decimals
    pub avg_expense: f64,
    /// Mean minimum SIP, whole rupees
    pub avg_sip: f64,
    pub top_performer: Option<FundRecord>,
    pub lowest_expense: Option<FundRecord>,
    pub largest_aum: Option<FundRecord>,
    pub dominant_type: Option<TypeCount>,
    /// Records at Low or Low to Moderate risk
    pub low_risk_count: usize,
}

impl SummaryStats {
    pub fn compute<R>(records: &[R]) -> Self
    where
        R: Borrow<FundRecord>,
    {
        let funds: Vec<&FundRecord> = records.iter().map(|r| r.borrow()).collect();
        let count = funds.len();

        let total_aum: f64 = funds.iter().map(|f| f.aum_cr).sum();
        let mean = |metric: Metric| -> f64 {
            if count == 0 {
                0.0
            } else {
                funds.iter().map(|f| f.metric(metric)).sum::<f64>() / count as f64
            }
        };

        let top_performer = first_best(&funds, |candidate, best| candidate.return_3y > best.return_3y);
        let lowest_expense = first_best(&funds, |candidate, best| candidate.expense_ratio < best.expense_ratio);
        let largest_aum = first_best(&funds, |candidate, best| candidate.aum_cr > best.aum_cr);

        let dominant_type = group_by(&funds, FundField::FundType, Metric::Aum, AggregateOp::Count)
            .into_entries()
            .into_iter()
            .fold(None::<GroupEntry>, |best, entry| match best {
                Some(b) if entry.value <= b.value => Some(b),
                _ => Some(entry),
            })
            .map(|entry| TypeCount {
                fund_type: entry.label,
                count: entry.value as usize,
            });

        let low_risk_count = funds.iter().filter(|f| f.risk_level.is_low()).count();

        SummaryStats {
            count,
            total_aum,
            avg_return: round_to(mean(Metric::Return3y), 1),
            avg_expense: round_to(mean(Metric::ExpenseRatio), 2),
            avg_sip: mean(Metric::MinSip).round(),
            top_performer,
            lowest_expense,
            largest_aum,
            dominant_type,
            low_risk_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Share of the view, in percent, that `part` records represent.
    pub fn share(&self, part: usize) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            part as f64 / self.count as f64 * 100.0
        }
    }
}

/// Left fold keeping the current best unless `better` says a later record beats it.
fn first_best<F>(funds: &[&FundRecord], better: F) -> Option<FundRecord>
where
    F: Fn(&FundRecord, &FundRecord) -> bool,
{
    let (first, rest) = funds.split_first()?;
    let best = rest
        .iter()
        .fold(*first, |best, candidate| if better(candidate, best) { *candidate } else { best });
    Some(best.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::fund;
    use crate::record::RiskLevel;

    fn equity_debt() -> Vec<FundRecord> {
        let mut equity = fund("Equity One");
        equity.return_3y = 25.0;
        equity.expense_ratio = 1.0;
        equity.aum_cr = 500.0;
        equity.fund_type = "Equity".to_string();

        let mut debt = fund("Debt One");
        debt.return_3y = 10.0;
        debt.expense_ratio = 0.5;
        debt.aum_cr = 1500.0;
        debt.fund_type = "Debt".to_string();

        vec![equity, debt]
    }

    #[test]
    fn test_group_sum_scenario() {
        let records = equity_debt();
        let grouped = group_by(&records, FundField::FundType, Metric::Aum, AggregateOp::Sum);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get("Equity"), Some(500.0));
        assert_eq!(grouped.get("Debt"), Some(1500.0));
        assert_eq!(grouped.labels(), vec!["Equity", "Debt"]);
    }

    #[test]
    fn test_average_return_scenario() {
        let stats = SummaryStats::compute(&equity_debt());
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg_return, 17.5);
        assert_eq!(stats.avg_expense, 0.75);
        assert_eq!(stats.total_aum, 2000.0);
    }

    #[test]
    fn test_group_sums_add_up_to_total() {
        let records: Vec<FundRecord> = (0..20)
            .map(|i| {
                let mut f = fund(&format!("F{}", i));
                f.category = ["Liquid", "Mid Cap", "ELSS"][i % 3].to_string();
                f.aum_cr = 100.0 + i as f64 * 12.5;
                f
            })
            .collect();

        let grouped = group_by(&records, FundField::Category, Metric::Aum, AggregateOp::Sum);
        let global: f64 = records.iter().map(|f| f.aum_cr).sum();
        assert!((grouped.total() - global).abs() < 1e-6);
    }

    #[test]
    fn test_group_average_rounds_to_two_decimals() {
        let mut a = fund("A");
        a.expense_ratio = 0.1;
        let mut b = fund("B");
        b.expense_ratio = 0.2;
        let mut c = fund("C");
        c.expense_ratio = 0.2;

        let grouped = group_by(&[a, b, c], FundField::FundType, Metric::ExpenseRatio, AggregateOp::Average);
        assert_eq!(grouped.get("Equity"), Some(0.17));
    }

    #[test]
    fn test_group_count_ignores_value() {
        let mut records = equity_debt();
        records.push(fund("Another Equity"));

        let grouped = group_by(&records, FundField::FundType, Metric::Score, AggregateOp::Count);
        assert_eq!(grouped.get("Equity"), Some(2.0));
        assert_eq!(grouped.get("Debt"), Some(1.0));
    }

    #[test]
    fn test_group_by_numeric_field() {
        let ratings = [3u8, 4, 3];
        let records: Vec<FundRecord> = ratings
            .iter()
            .map(|r| {
                let mut f = fund("R");
                f.fund_rating = *r;
                f
            })
            .collect();

        let grouped = group_by(&records, FundField::FundRating, Metric::Aum, AggregateOp::Count);
        assert_eq!(grouped.labels(), vec!["3", "4"]);
        assert_eq!(grouped.get("3"), Some(2.0));
    }

    #[test]
    fn test_sorted_descending_is_stable() {
        let records: Vec<FundRecord> = [("X", 5.0), ("Y", 9.0), ("Z", 5.0)]
            .iter()
            .map(|(cat, ret)| {
                let mut f = fund(cat);
                f.category = cat.to_string();
                f.return_3y = *ret;
                f
            })
            .collect();

        let grouped = group_by(&records, FundField::Category, Metric::Return3y, AggregateOp::Average)
            .sorted_descending();
        assert_eq!(grouped.labels(), vec!["Y", "X", "Z"]);
        assert_eq!(grouped.clone().top(1).labels(), vec!["Y"]);
        assert_eq!(grouped.top(10).len(), 3);
    }

    #[test]
    fn test_summary_empty_view() {
        let records: Vec<FundRecord> = Vec::new();
        let stats = SummaryStats::compute(&records);

        assert!(stats.is_empty());
        assert_eq!(stats.total_aum, 0.0);
        assert_eq!(stats.avg_return, 0.0);
        assert_eq!(stats.avg_expense, 0.0);
        assert_eq!(stats.avg_sip, 0.0);
        assert!(!stats.avg_return.is_nan());
        assert!(stats.top_performer.is_none());
        assert!(stats.lowest_expense.is_none());
        assert!(stats.largest_aum.is_none());
        assert!(stats.dominant_type.is_none());
        assert_eq!(stats.low_risk_count, 0);
        assert_eq!(stats.share(0), 0.0);
    }

    #[test]
    fn test_summary_extremes() {
        let stats = SummaryStats::compute(&equity_debt());

        assert_eq!(stats.top_performer.unwrap().scheme_name, "Equity One");
        assert_eq!(stats.lowest_expense.unwrap().scheme_name, "Debt One");
        assert_eq!(stats.largest_aum.unwrap().scheme_name, "Debt One");
    }

    #[test]
    fn test_summary_ties_keep_first_occurrence() {
        let records: Vec<FundRecord> = ["first", "second", "third"]
            .iter()
            .map(|name| {
                let mut f = fund(name);
                f.return_3y = 20.0;
                f.expense_ratio = 0.5;
                f.aum_cr = 900.0;
                f
            })
            .collect();

        let stats = SummaryStats::compute(&records);
        assert_eq!(stats.top_performer.unwrap().scheme_name, "first");
        assert_eq!(stats.lowest_expense.unwrap().scheme_name, "first");
        assert_eq!(stats.largest_aum.unwrap().scheme_name, "first");
    }

    #[test]
    fn test_dominant_type_tie_goes_to_first_group() {
        let types = ["Hybrid", "Debt", "Debt", "Hybrid", "Equity"];
        let records: Vec<FundRecord> = types
            .iter()
            .map(|t| {
                let mut f = fund(t);
                f.fund_type = t.to_string();
                f
            })
            .collect();

        let stats = SummaryStats::compute(&records);
        assert_eq!(
            stats.dominant_type,
            Some(TypeCount { fund_type: "Hybrid".to_string(), count: 2 })
        );
    }

    #[test]
    fn test_low_risk_count_and_sip_rounding() {
        let levels = [RiskLevel::Low, RiskLevel::LowToModerate, RiskLevel::High, RiskLevel::Moderate];
        let sips = [500.0, 1000.0, 100.0, 1001.0];
        let records: Vec<FundRecord> = levels
            .iter()
            .zip(sips.iter())
            .map(|(level, sip)| {
                let mut f = fund("R");
                f.risk_level = *level;
                f.min_sip = *sip;
                f
            })
            .collect();

        let stats = SummaryStats::compute(&records);
        assert_eq!(stats.low_risk_count, 2);
        assert_eq!(stats.share(stats.low_risk_count), 50.0);
        // 2601 / 4 = 650.25
        assert_eq!(stats.avg_sip, 650.0);
    }
}
