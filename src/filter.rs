/// FundScope Filter Implementation
///
/// Filtering keeps the records whose fields equal every constraint that is set.
/// An unset constraint is the "no filter" choice and never excludes a record.
/// The output keeps the relative order of the input.

use crate::record::{FundRecord, RiskLevel};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// One of the five discrete-choice filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterControl {
    FundType,
    Category,
    RiskLevel,
    AmcName,
    Rating,
}

impl FilterControl {
    pub const ALL: [FilterControl; 5] = [
        FilterControl::FundType,
        FilterControl::Category,
        FilterControl::RiskLevel,
        FilterControl::AmcName,
        FilterControl::Rating,
    ];

    /// Caption of the "no constraint" option.
    pub fn all_label(&self) -> &'static str {
        match self {
            FilterControl::FundType => "All Types",
            FilterControl::Category => "All Categories",
            FilterControl::RiskLevel => "All Risk Levels",
            FilterControl::AmcName => "All AMCs",
            FilterControl::Rating => "All Ratings",
        }
    }

    /// Page element of the control.
    pub fn element_id(&self) -> &'static str {
        match self {
            FilterControl::FundType => "filterFundType",
            FilterControl::Category => "filterCategory",
            FilterControl::RiskLevel => "filterRisk",
            FilterControl::AmcName => "filterAMC",
            FilterControl::Rating => "filterRating",
        }
    }
}

/// Equality constraints applied to the full record set.
///
/// `None` means "no constraint". Criteria are replaced wholesale on each
/// filter change; the builder methods return a new value.
///
/// # Examples
///
/// ```
/// use fundscope::FilterCriteria;
///
/// let criteria = FilterCriteria::new()
///     .with_fund_type("Equity")
///     .with_rating(4);
/// assert!(!criteria.is_empty());
/// assert_eq!(criteria.rating.as_deref(), Some("4"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub fund_type: Option<String>,
    pub category: Option<String>,
    pub risk_level: Option<String>,
    pub amc_name: Option<String>,
    /// Rating in its text form; records are compared through the same form.
    pub rating: Option<String>,
}

impl FilterCriteria {
    /// Criteria with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fund_type(mut self, fund_type: impl Into<String>) -> Self {
        self.fund_type = Some(fund_type.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_risk_level(mut self, risk_level: impl Into<String>) -> Self {
        self.risk_level = Some(risk_level.into());
        self
    }

    pub fn with_amc_name(mut self, amc_name: impl Into<String>) -> Self {
        self.amc_name = Some(amc_name.into());
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating.to_string());
        self
    }

    /// Set a control from its selected option value.
    ///
    /// The empty string is the "no constraint" option and clears the control.
    pub fn set(mut self, control: FilterControl, value: &str) -> Self {
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        match control {
            FilterControl::FundType => self.fund_type = value,
            FilterControl::Category => self.category = value,
            FilterControl::RiskLevel => self.risk_level = value,
            FilterControl::AmcName => self.amc_name = value,
            FilterControl::Rating => self.rating = value,
        }
        self
    }

    /// The selected value of a control, if any.
    pub fn get(&self, control: FilterControl) -> Option<&str> {
        match control {
            FilterControl::FundType => self.fund_type.as_deref(),
            FilterControl::Category => self.category.as_deref(),
            FilterControl::RiskLevel => self.risk_level.as_deref(),
            FilterControl::AmcName => self.amc_name.as_deref(),
            FilterControl::Rating => self.rating.as_deref(),
        }
    }

    /// True when no control is constrained.
    pub fn is_empty(&self) -> bool {
        FilterControl::ALL.iter().all(|c| self.get(*c).is_none())
    }

    /// Whether a record satisfies every set constraint.
    pub fn matches(&self, fund: &FundRecord) -> bool {
        if let Some(fund_type) = &self.fund_type {
            if fund.fund_type != *fund_type {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if fund.category != *category {
                return false;
            }
        }
        if let Some(risk_level) = &self.risk_level {
            if RiskLevel::from_label(risk_level) != Some(fund.risk_level) {
                return false;
            }
        }
        if let Some(amc_name) = &self.amc_name {
            if fund.amc_name != *amc_name {
                return false;
            }
        }
        if let Some(rating) = &self.rating {
            if fund.fund_rating.to_string() != *rating {
                return false;
            }
        }
        true
    }
}

/// Keep the records matching `criteria`, in input order.
///
/// Works over anything that borrows as a `FundRecord`: plain records,
/// references, or the `Rc` handles held by the data store.
pub fn apply_filters<R>(records: &[R], criteria: &FilterCriteria) -> Vec<R>
where
    R: Borrow<FundRecord> + Clone,
{
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| {
            let fund: &FundRecord = (*record).borrow();
            criteria.matches(fund)
        })
        .cloned()
        .collect()
}
