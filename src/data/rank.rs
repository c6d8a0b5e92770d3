use super::error::{DataError, Result};
use super::model::{CanonicalDataset, Sex};

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position under the active sort order.
    pub rank: usize,
    pub country: String,
    pub value: f64,
}

/// Rank every country's both-sexes figure for `year`.
///
/// Rank 1 is always the first entry of the chosen order: the highest value
/// when descending, the lowest when ascending. Equal values keep dataset
/// order.
pub fn rank(dataset: &CanonicalDataset, year: i32, sort_ascending: bool) -> Result<Vec<RankedEntry>> {
    let mut matching: Vec<_> = dataset
        .records()
        .iter()
        .filter(|r| r.sex == Sex::BothSexes && r.year == year)
        .collect();

    if matching.is_empty() {
        return Err(DataError::NoDataForYear(year));
    }

    // `sort_by` is stable, which gives the tie-break.
    if sort_ascending {
        matching.sort_by(|a, b| a.value.total_cmp(&b.value));
    } else {
        matching.sort_by(|a, b| b.value.total_cmp(&a.value));
    }

    Ok(matching
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedEntry {
            rank: i + 1,
            country: r.country.clone(),
            value: r.value,
        })
        .collect())
}

/// Rank of `country` within an already computed ranking.
pub fn rank_of(entries: &[RankedEntry], country: &str) -> Result<usize> {
    entries
        .iter()
        .find(|e| e.country == country)
        .map(|e| e.rank)
        .ok_or_else(|| DataError::CountryNotFound {
            country: country.to_string(),
        })
}

/// Position of the entry whose country matches `query`, ignoring case and
/// surrounding whitespace. Backs the ranking page's search box.
pub fn find_country(entries: &[RankedEntry], query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    entries
        .iter()
        .position(|e| e.country.to_lowercase() == query)
}
