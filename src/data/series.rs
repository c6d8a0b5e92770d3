use std::collections::BTreeMap;

use super::error::{DataError, Result};
use super::model::{CanonicalDataset, Sex};
use super::filter::SexSubset;

/// Every value recorded for one country: year → sex → life expectancy.
pub type DetailSeries = BTreeMap<i32, BTreeMap<Sex, f64>>;

/// Collect all rows of `country`. A country without rows yields an empty
/// series rather than an error.
pub fn series(dataset: &CanonicalDataset, country: &str) -> DetailSeries {
    let mut out = DetailSeries::new();
    for record in dataset.records().iter().filter(|r| r.country == country) {
        out.entry(record.year)
            .or_default()
            .insert(record.sex, record.value);
    }
    out
}

pub fn value_at(series: &DetailSeries, year: i32, sex: Sex) -> Result<f64> {
    series
        .get(&year)
        .and_then(|by_sex| by_sex.get(&sex))
        .copied()
        .ok_or(DataError::MissingValue { year, sex })
}

/// `(year, value)` points for one sex, in year order. Years lacking a value
/// for `sex` are left out, so the line simply skips them.
pub fn line_points(series: &DetailSeries, sex: Sex) -> Vec<[f64; 2]> {
    series
        .keys()
        .filter_map(|&year| value_at(series, year, sex).ok().map(|v| [year as f64, v]))
        .collect()
}

/// Values for a single year, one per selected sex that has data.
pub fn year_values(series: &DetailSeries, year: i32, sexes: &SexSubset) -> Vec<(Sex, f64)> {
    sexes
        .iter()
        .filter_map(|sex| match value_at(series, year, sex) {
            Ok(v) => Some((sex, v)),
            Err(e) => {
                log::debug!("omitting bar: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::clean;
    use crate::data::model::{RawCountryCode, RawLifeExpRow};

    fn raw(code: &str, name: &str, sex: &str, year: i32, value: f64) -> RawLifeExpRow {
        RawLifeExpRow {
            area_code: code.to_string(),
            area_name: name.to_string(),
            sex: sex.to_string(),
            year: year.to_string(),
            value: value.to_string(),
        }
    }

    fn dataset() -> CanonicalDataset {
        let rows = vec![
            raw("FRA", "France", "Total", 2019, 82.7),
            raw("FRA", "France", "Female", 2019, 85.6),
            raw("FRA", "France", "Male", 2019, 79.7),
            raw("FRA", "France", "Total", 2020, 82.1),
            raw("FRA", "France", "Female", 2020, 85.1),
            raw("USA", "United States", "Total", 2020, 78.5),
        ];
        let codes = ["FRA", "USA"]
            .iter()
            .map(|c| RawCountryCode {
                alpha3: c.to_string(),
            })
            .collect::<Vec<_>>();
        clean(&rows, &codes).unwrap()
    }

    #[test]
    fn collects_only_the_requested_country() {
        let s = series(&dataset(), "France");
        assert_eq!(s.len(), 2);
        assert_eq!(s[&2019].len(), 3);
        assert_eq!(s[&2020].get(&Sex::Male), None);
        assert_eq!(value_at(&s, 2020, Sex::Female).unwrap(), 85.1);
    }

    #[test]
    fn unknown_country_is_an_empty_series() {
        assert!(series(&dataset(), "Atlantis").is_empty());
    }

    #[test]
    fn single_row_example() {
        let rows = vec![raw("FRA", "France", "Total", 2020, 82.1)];
        let codes = vec![RawCountryCode {
            alpha3: "FRA".to_string(),
        }];
        let s = series(&clean(&rows, &codes).unwrap(), "France");
        assert_eq!(s, BTreeMap::from([(2020, BTreeMap::from([(Sex::BothSexes, 82.1)]))]));
        assert!(matches!(
            value_at(&s, 2019, Sex::Female),
            Err(DataError::MissingValue {
                year: 2019,
                sex: Sex::Female
            })
        ));
    }

    #[test]
    fn line_points_skip_missing_years() {
        let s = series(&dataset(), "France");
        assert_eq!(line_points(&s, Sex::Male), vec![[2019.0, 79.7]]);
        assert_eq!(line_points(&s, Sex::BothSexes).len(), 2);
    }

    #[test]
    fn year_values_follow_the_selected_sexes() {
        let s = series(&dataset(), "France");
        let all = SexSubset::all();
        assert_eq!(
            year_values(&s, 2020, &all),
            vec![(Sex::BothSexes, 82.1), (Sex::Female, 85.1)]
        );
        let mut only_male = SexSubset::single(Sex::Male);
        assert!(year_values(&s, 2020, &only_male).is_empty());
        only_male.toggle(Sex::BothSexes);
        assert_eq!(year_values(&s, 2019, &only_male).len(), 2);
    }
}
