use std::collections::BTreeSet;

use super::model::{CanonicalDataset, Sex};

// ---------------------------------------------------------------------------
// SexSubset – selected sexes, never empty
// ---------------------------------------------------------------------------

/// The sexes currently shown. At least one sex is always selected; series and
/// ranking views rely on that when composing their output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SexSubset(BTreeSet<Sex>);

impl SexSubset {
    pub fn single(sex: Sex) -> Self {
        SexSubset(BTreeSet::from([sex]))
    }

    pub fn all() -> Self {
        SexSubset(Sex::ALL.into_iter().collect())
    }

    pub fn contains(&self, sex: Sex) -> bool {
        self.0.contains(&sex)
    }

    /// Selected sexes in display order.
    pub fn iter(&self) -> impl Iterator<Item = Sex> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `sex` is the last one selected and so cannot be cleared.
    pub fn is_locked(&self, sex: Sex) -> bool {
        self.0.len() == 1 && self.0.contains(&sex)
    }

    /// Flip `sex` in or out of the selection. Returns `false` when the
    /// request was refused because it would leave nothing selected.
    pub fn toggle(&mut self, sex: Sex) -> bool {
        if self.is_locked(sex) {
            return false;
        }
        if !self.0.remove(&sex) {
            self.0.insert(sex);
        }
        true
    }
}

impl Default for SexSubset {
    fn default() -> Self {
        SexSubset::single(Sex::BothSexes)
    }
}

// ---------------------------------------------------------------------------
// FilterState – the user's current selection
// ---------------------------------------------------------------------------

/// User-controlled query parameters. Owned by the UI thread and passed to the
/// query functions explicitly; nothing derived from it is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub country: String,
    pub year: i32,
    pub sexes: SexSubset,
    pub sort_ascending: bool,
}

impl FilterState {
    /// Session defaults: latest year, both sexes, highest value first.
    pub fn new(dataset: &CanonicalDataset) -> Self {
        FilterState {
            country: String::new(),
            year: dataset.latest_year().unwrap_or_default(),
            sexes: SexSubset::default(),
            sort_ascending: false,
        }
    }

    /// Filters for a country's detail view, starting with every sex shown.
    pub fn for_country(country: &str, year: i32) -> Self {
        FilterState {
            country: country.to_string(),
            year,
            sexes: SexSubset::all(),
            sort_ascending: false,
        }
    }
}
