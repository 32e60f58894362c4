/// FundScope Sort Implementation
///
/// Sorting orders the active view by a single field. Text fields use
/// Unicode collation, numeric fields compare numerically, and the sort is
/// stable so records with equal keys keep their relative order.
///
/// The sort state is driven by column-header activation: activating the current
/// key while it is descending flips it to ascending, anything else selects the
/// activated key in descending order.

use crate::record::{FieldValue, FundField, FundRecord};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cell::RefCell;
use std::cmp::Ordering;

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Sort order specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    Desc,
}

impl SortOrder {
    /// Header class marking the active sort column.
    pub fn header_class(&self) -> &'static str {
        match self {
            SortOrder::Asc => "sort-asc",
            SortOrder::Desc => "sort-desc",
        }
    }
}

/// Current sort key and direction of the results table.
///
/// # Examples
///
/// ```
/// use fundscope::{FundField, SortOrder, SortState};
///
/// let mut state = SortState::default();
/// assert_eq!(state.key, FundField::Score);
/// assert_eq!(state.order, SortOrder::Desc);
///
/// state.activate(FundField::Score);
/// assert_eq!(state.order, SortOrder::Asc);
///
/// state.activate(FundField::AmcName);
/// assert_eq!((state.key, state.order), (FundField::AmcName, SortOrder::Desc));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: FundField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        SortState::descending(FundField::Score)
    }
}

impl SortState {
    pub fn ascending(key: FundField) -> Self {
        SortState { key, order: SortOrder::Asc }
    }

    pub fn descending(key: FundField) -> Self {
        SortState { key, order: SortOrder::Desc }
    }

    /// Apply a column-header activation and return the new state.
    pub fn activate(&mut self, key: FundField) -> SortState {
        *self = if self.key == key && self.order == SortOrder::Desc {
            SortState::ascending(key)
        } else {
            SortState::descending(key)
        };
        *self
    }

    /// Compare two records under this state.
    pub fn compare(&self, a: &FundRecord, b: &FundRecord) -> Ordering {
        let base = compare_values(a.value(self.key), b.value(self.key));
        match self.order {
            SortOrder::Asc => base,
            SortOrder::Desc => base.reverse(),
        }
    }
}

/// Compare two field values: text by collation, numbers numerically.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => locale_compare(a, b),
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        // A single field never mixes kinds
        _ => Ordering::Equal,
    }
}

/// Locale-aware string collation over the Unicode Collation Algorithm with
/// the CLDR root order.
///
/// Accents and case are secondary and tertiary differences ("cote" < "côte",
/// "apple" < "Apple"); punctuation and spaces are variable elements that only
/// break ties, in the standard punctuation order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Stable in-place sort of records under `state`.
pub fn sort_records<R>(records: &mut [R], state: &SortState)
where
    R: Borrow<FundRecord>,
{
    records.sort_by(|a, b| {
        let a: &FundRecord = a.borrow();
        let b: &FundRecord = b.borrow();
        state.compare(a, b)
    });
}
