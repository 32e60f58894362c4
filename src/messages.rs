/// Interaction events sent by the dashboard controls
use crate::error::Result;
use crate::filter::{FilterControl, FilterCriteria};
use crate::record::FundField;
use serde::{Deserialize, Serialize};

/// One discrete user action. Each event triggers a full recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InteractionEvent {
    /// A filter control changed; an empty value selects "no constraint"
    SetFilter { control: FilterControl, value: String },

    /// Replace all filter criteria at once
    SetFilters { criteria: FilterCriteria },

    /// Clear every filter and restore the default sort
    Reset,

    /// A table column header was activated
    SortBy { field: FundField },
}

impl InteractionEvent {
    /// Parse one event from its JSON form.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
