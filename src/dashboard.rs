/// FundScope Dashboard State
///
/// `DashboardState` is the single object behind the page. It is built once from
/// the startup document, owns the data store together with the current filter
/// criteria and sort state, and rebuilds the active view synchronously on every
/// interaction.

use crate::aggregate::SummaryStats;
use crate::charts::build_charts;
use crate::error::Result;
use crate::filter::{FilterControl, FilterCriteria};
use crate::insights::generate_insights;
use crate::messages::InteractionEvent;
use crate::present::{
    kpi_counters, table_rows, DashboardFrame, DashboardSink, FilterChoice, DEFAULT_TABLE_ROWS,
};
use crate::record::{FundField, FundRecord};
use crate::sort::SortState;
use crate::store::DataStore;
use std::io;
use std::path::Path;
use std::rc::Rc;

/// Dashboard state: store, filter criteria and sort state.
///
/// # Examples
///
/// ```
/// use fundscope::{DashboardState, DataStore, FilterControl, FundField, FundRecord, RiskLevel};
///
/// let fund = |name: &str, rating: u8| FundRecord {
///     scheme_name: name.to_string(), amc_name: "Demo Mutual Fund".to_string(),
///     fund_type: "Equity".to_string(), category: "Mid Cap".to_string(),
///     investment_strategy: "Growth".to_string(), fund_manager: "R. Iyer".to_string(),
///     risk_level: RiskLevel::High, fund_rating: rating, return_3y: 18.0,
///     expense_ratio: 0.9, aum_cr: 1200.0, min_sip: 500.0, score: 60.0,
/// };
///
/// let store = DataStore::from_records(vec![fund("A", 3), fund("B", 4), fund("C", 3)]);
/// let mut dashboard = DashboardState::new(store);
///
/// dashboard.set_filter(FilterControl::Rating, "3");
/// assert_eq!(dashboard.active_view().len(), 2);
///
/// dashboard.activate_header(FundField::SchemeName);
/// let frame = dashboard.frame();
/// assert_eq!(frame.table[0].scheme_name, "C");
/// ```
pub struct DashboardState {
    store: DataStore,
    criteria: FilterCriteria,
    sort: SortState,
    table_rows: usize,
}

impl DashboardState {
    /// Wrap a loaded store with no filters and the default sort.
    pub fn new(store: DataStore) -> Self {
        let mut state = DashboardState {
            store,
            criteria: FilterCriteria::new(),
            sort: SortState::default(),
            table_rows: DEFAULT_TABLE_ROWS,
        };
        state.recompute();
        state
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(DataStore::from_json(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DataStore::load(path)?))
    }

    /// Limit the number of rows in the results table.
    pub fn with_table_rows(mut self, rows: usize) -> Self {
        self.table_rows = rows;
        self
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn active_view(&self) -> &[Rc<FundRecord>] {
        self.store.active_view()
    }

    /// Replace the filter criteria wholesale.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Change one filter control; the empty value clears it.
    pub fn set_filter(&mut self, control: FilterControl, value: &str) {
        let criteria = self.criteria.clone().set(control, value);
        self.set_filters(criteria);
    }

    /// Clear every filter and restore the default sort.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::new();
        self.sort = SortState::default();
        self.recompute();
    }

    /// Handle a column-header activation and return the new sort state.
    pub fn activate_header(&mut self, field: FundField) -> SortState {
        let state = self.sort.activate(field);
        self.recompute();
        state
    }

    /// Apply one interaction event.
    pub fn handle(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::SetFilter { control, value } => self.set_filter(control, &value),
            InteractionEvent::SetFilters { criteria } => self.set_filters(criteria),
            InteractionEvent::Reset => self.reset(),
            InteractionEvent::SortBy { field } => {
                self.activate_header(field);
            }
        }
    }

    fn recompute(&mut self) {
        self.store.recompute(&self.criteria, &self.sort);
    }

    pub fn summary(&self) -> SummaryStats {
        SummaryStats::compute(self.active_view())
    }

    /// Header badge text, from the document's precomputed fund count.
    pub fn header_badge(&self) -> String {
        format!("{} Schemes Analyzed", self.store.kpis().total_funds)
    }

    /// A filter control with its options and current selection.
    pub fn filter_choice(&self, control: FilterControl) -> FilterChoice {
        FilterChoice {
            control,
            all_label: control.all_label(),
            options: self.store.filter_options().values(control),
            selected: self.criteria.get(control).map(str::to_string),
        }
    }

    pub fn filter_choices(&self) -> Vec<FilterChoice> {
        FilterControl::ALL
            .iter()
            .map(|control| self.filter_choice(*control))
            .collect()
    }

    /// Derive everything the page shows for the current view.
    pub fn frame(&self) -> DashboardFrame {
        let view = self.active_view();
        let stats = self.summary();

        DashboardFrame {
            header_badge: self.header_badge(),
            criteria: self.criteria.clone(),
            sort: self.sort,
            controls: self.filter_choices(),
            kpis: kpi_counters(&stats),
            charts: build_charts(view),
            insights: generate_insights(&stats),
            table: table_rows(view, self.table_rows),
        }
    }

    /// Build the current frame and hand it to `sink`.
    pub fn render_to(&self, sink: &mut dyn DashboardSink) -> io::Result<()> {
        sink.render(&self.frame())
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("store", &self.store)
            .field("criteria", &self.criteria)
            .field("sort", &self.sort)
            .finish()
    }
}
