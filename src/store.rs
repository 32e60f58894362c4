/// FundScope Data Store
///
/// The DataStore owns the full record set loaded from the startup document and
/// the active view derived from it. Records are shared as `Rc<FundRecord>`, so the
/// active view is a new ordering over the same immutable records.

use crate::error::{DashboardError, Result};
use crate::filter::{apply_filters, FilterControl, FilterCriteria};
use crate::record::{FundRecord, RiskLevel};
use crate::sort::{sort_records, SortState};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;

/// Option lists for the five filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub fund_types: Vec<String>,
    pub categories: Vec<String>,
    pub risk_levels: Vec<String>,
    pub amc_names: Vec<String>,
    pub fund_ratings: Vec<u8>,
}

impl FilterOptions {
    /// Derive sorted, de-duplicated option lists from a record set.
    pub fn from_records(records: &[FundRecord]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
            values.cloned().collect::<BTreeSet<_>>().into_iter().collect()
        }

        FilterOptions {
            fund_types: distinct(records.iter().map(|f| &f.fund_type)),
            categories: distinct(records.iter().map(|f| &f.category)),
            risk_levels: RiskLevel::ALL.iter().map(|l| l.label().to_string()).collect(),
            amc_names: distinct(records.iter().map(|f| &f.amc_name)),
            fund_ratings: records
                .iter()
                .map(|f| f.fund_rating)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Option values offered by a control, as the text the control submits.
    pub fn values(&self, control: FilterControl) -> Vec<String> {
        match control {
            FilterControl::FundType => self.fund_types.clone(),
            FilterControl::Category => self.categories.clone(),
            FilterControl::RiskLevel => self.risk_levels.clone(),
            FilterControl::AmcName => self.amc_names.clone(),
            FilterControl::Rating => self.fund_ratings.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Precomputed headline figures shipped with the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentKpis {
    pub total_funds: usize,
    #[serde(default)]
    pub total_aum: Option<f64>,
    #[serde(default)]
    pub avg_return_3y: Option<f64>,
    #[serde(default)]
    pub avg_expense_ratio: Option<f64>,
    #[serde(default)]
    pub avg_sip: Option<f64>,
    #[serde(default)]
    pub avg_lumpsum: Option<f64>,
}

/// The startup document. Keys other than these three are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardDocument {
    pub all_funds: Vec<FundRecord>,
    pub filters: FilterOptions,
    pub kpis: DocumentKpis,
}

/// Root store owning the full record set and the active view.
///
/// # Examples
///
/// ```
/// use fundscope::{DataStore, FilterCriteria, SortState, FundField};
///
/// let json = r#"{
///     "all_funds": [
///         {"Scheme Name": "Zeta Liquid", "AMC Name": "Zeta Mutual Fund", "Fund Type": "Debt",
///          "Category": "Liquid", "Investment Strategy": "Income", "Fund Manager": "P. Rao",
///          "Risk Level": "Low", "Fund Rating": 3, "Return 3Y (%)": 6.1,
///          "Expense Ratio (%)": 0.2, "AUM (Cr)": 800.0, "Min SIP (₹)": 1000, "Score": 42.0},
///         {"Scheme Name": "Alpha Growth", "AMC Name": "Alpha Mutual Fund", "Fund Type": "Equity",
///          "Category": "Mid Cap", "Investment Strategy": "Growth", "Fund Manager": "K. Iyer",
///          "Risk Level": "High", "Fund Rating": 4, "Return 3Y (%)": 24.3,
///          "Expense Ratio (%)": 0.9, "AUM (Cr)": 5400.0, "Min SIP (₹)": 500, "Score": 77.5}
///     ],
///     "filters": {"fund_types": ["Debt", "Equity"], "categories": ["Liquid", "Mid Cap"],
///                 "risk_levels": ["Low", "High"], "amc_names": ["Alpha Mutual Fund", "Zeta Mutual Fund"],
///                 "fund_ratings": [3, 4]},
///     "kpis": {"total_funds": 2}
/// }"#;
///
/// let mut store = DataStore::from_json(json).unwrap();
/// store.recompute(&FilterCriteria::new(), &SortState::ascending(FundField::AmcName));
/// assert_eq!(store.active_view()[0].scheme_name, "Alpha Growth");
/// ```
pub struct DataStore {
    all: Vec<Rc<FundRecord>>,
    active: Vec<Rc<FundRecord>>,
    filters: FilterOptions,
    kpis: DocumentKpis,
}

impl DataStore {
    /// Build a store from a parsed document. The active view starts as the
    /// full set in document order.
    pub fn new(document: DashboardDocument) -> Self {
        let all: Vec<Rc<FundRecord>> = document.all_funds.into_iter().map(Rc::new).collect();
        info!("loaded {} fund records", all.len());
        DataStore {
            active: all.clone(),
            all,
            filters: document.filters,
            kpis: document.kpis,
        }
    }

    /// Build a store from bare records, deriving filter options and KPIs.
    pub fn from_records(records: Vec<FundRecord>) -> Self {
        let filters = FilterOptions::from_records(&records);
        let kpis = DocumentKpis {
            total_funds: records.len(),
            ..DocumentKpis::default()
        };
        Self::new(DashboardDocument {
            all_funds: records,
            filters,
            kpis,
        })
    }

    /// Parse the startup document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: DashboardDocument = serde_json::from_str(json)?;
        Ok(Self::new(document))
    }

    /// Read and parse the startup document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DashboardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Number of records in the full set.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns true if the full set is empty.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// The full record set in document order.
    pub fn records(&self) -> &[Rc<FundRecord>] {
        &self.all
    }

    /// The filtered and sorted view.
    pub fn active_view(&self) -> &[Rc<FundRecord>] {
        &self.active
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn kpis(&self) -> &DocumentKpis {
        &self.kpis
    }

    /// Rebuild the active view from scratch: filter, then sort.
    pub fn recompute(&mut self, criteria: &FilterCriteria, sort: &SortState) {
        let mut view = apply_filters(&self.all, criteria);
        sort_records(&mut view, sort);
        debug!(
            "active view: {} of {} records, sorted by {} {:?}",
            view.len(),
            self.all.len(),
            sort.key,
            sort.order
        );
        self.active = view;
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("records", &self.all.len())
            .field("active", &self.active.len())
            .finish()
    }
}
