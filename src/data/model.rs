use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Sex – closed set of population categories
// ---------------------------------------------------------------------------

/// Population category of a life-expectancy figure.
///
/// Declaration order doubles as display order (alphabetical by label), so
/// `BTreeSet<Sex>` iterates the same way the legend is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    BothSexes,
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::BothSexes, Sex::Female, Sex::Male];

    /// Canonical display label.
    pub fn label(self) -> &'static str {
        match self {
            Sex::BothSexes => "Both sexes",
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }

    /// Map a source label onto the enum. The source calls the aggregate
    /// category "Total"; the canonical label is accepted too so cleaned data
    /// can be fed back through the cleaner.
    pub fn from_label(label: &str) -> Option<Sex> {
        match label.trim() {
            "Total" | "Both sexes" => Some(Sex::BothSexes),
            "Female" => Some(Sex::Female),
            "Male" => Some(Sex::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Raw rows – straight out of the CSV sources, untyped
// ---------------------------------------------------------------------------

/// One life-expectancy row restricted to the five columns the cleaner uses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLifeExpRow {
    #[serde(rename = "REF_AREA")]
    pub area_code: String,
    #[serde(rename = "Geographic area")]
    pub area_name: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "TIME_PERIOD")]
    pub year: String,
    #[serde(rename = "OBS_VALUE")]
    pub value: String,
}

/// One row of the ISO country-code reference table (`Alpha-3 code`).
#[derive(Debug, Clone, PartialEq)]
pub struct RawCountryCode {
    pub alpha3: String,
}

// ---------------------------------------------------------------------------
// LifeExpectancyRecord – one cleaned observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LifeExpectancyRecord {
    /// ISO alpha-3 code the row was matched on.
    pub area_code: String,
    pub country: String,
    pub year: i32,
    pub sex: Sex,
    /// Life expectancy in years, never negative.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// CanonicalDataset – the cleaned table, immutable once built
// ---------------------------------------------------------------------------

/// Cleaned life-expectancy table. Holds at most one record per
/// `(country, year, sex)`; only [`crate::data::cleaner::clean`] builds one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalDataset {
    records: Vec<LifeExpectancyRecord>,
}

impl CanonicalDataset {
    pub(crate) fn from_records(records: Vec<LifeExpectancyRecord>) -> Self {
        CanonicalDataset { records }
    }

    pub fn records(&self) -> &[LifeExpectancyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    pub fn earliest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    pub fn country_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Smallest and largest value across the whole table, used as plot bounds.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Render the records back into raw rows, using canonical labels.
    pub fn to_raw_rows(&self) -> Vec<RawLifeExpRow> {
        self.records
            .iter()
            .map(|r| RawLifeExpRow {
                area_code: r.area_code.clone(),
                area_name: r.country.clone(),
                sex: r.sex.label().to_string(),
                year: r.year.to_string(),
                value: r.value.to_string(),
            })
            .collect()
    }
}
