//! Ranking and cleaning invariants over generated datasets.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use life_exp_viewer::data::cleaner::clean;
use life_exp_viewer::data::error::DataError;
use life_exp_viewer::data::model::{CanonicalDataset, RawCountryCode, RawLifeExpRow, Sex};
use life_exp_viewer::data::rank::{rank, rank_of};
use life_exp_viewer::data::series::{series, value_at};

const SEX_LABELS: [&str; 3] = ["Total", "Female", "Male"];

fn raw(code: &str, name: &str, sex: &str, year: i32, value: f64) -> RawLifeExpRow {
    RawLifeExpRow {
        area_code: code.to_string(),
        area_name: name.to_string(),
        sex: sex.to_string(),
        year: year.to_string(),
        value: value.to_string(),
    }
}

fn codes_for(rows: &[RawLifeExpRow]) -> Vec<RawCountryCode> {
    rows.iter()
        .map(|r| RawCountryCode {
            alpha3: format!(" \"{}\"", r.area_code),
        })
        .collect()
}

/// One both-sexes row per country for `year`, values taken in order.
fn single_year_dataset(values: &[f64], year: i32) -> CanonicalDataset {
    let rows: Vec<RawLifeExpRow> = values
        .iter()
        .enumerate()
        .map(|(i, v)| raw(&format!("C{i:02}"), &format!("Country {i}"), "Total", year, *v))
        .collect();
    clean(&rows, &codes_for(&rows)).unwrap()
}

/// Messy source rows: annotated names, unspecified areas, aggregates, gaps.
fn messy_rows() -> impl Strategy<Value = Vec<RawLifeExpRow>> {
    let row = (
        0usize..12,
        prop::bool::ANY,
        prop::bool::ANY,
        0usize..3,
        2015i32..2021,
        prop::option::of(0u32..9_000),
    );
    prop::collection::vec(row, 0..80).prop_map(|specs| {
        let mut seen = HashSet::new();
        specs
            .into_iter()
            .filter(|(country, _, _, sex, year, _)| seen.insert((*country, *sex, *year)))
            .map(|(country, annotated, unspecified, sex, year, value)| {
                let name = if unspecified {
                    "Other, non specified".to_string()
                } else if annotated {
                    format!("Country {country} (annotated)")
                } else {
                    format!("Country {country}")
                };
                let value = value.map(|v| (v as f64 / 100.0).to_string()).unwrap_or_default();
                RawLifeExpRow {
                    area_code: format!("C{country:02}"),
                    area_name: name,
                    sex: SEX_LABELS[sex].to_string(),
                    year: year.to_string(),
                    value,
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn descending_rank_is_sorted_and_numbered(values in prop::collection::vec(0u32..10_000, 1..40)) {
        let values: Vec<f64> = values.into_iter().map(|v| v as f64 / 100.0).collect();
        let ranked = rank(&single_year_dataset(&values, 2020), 2020, false).unwrap();

        prop_assert_eq!(ranked.len(), values.len());
        for (i, entry) in ranked.iter().enumerate() {
            prop_assert_eq!(entry.rank, i + 1);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn ascending_reverses_descending(values in prop::collection::hash_set(0u32..10_000, 1..40)) {
        let values: Vec<f64> = values.into_iter().map(|v| v as f64 / 100.0).collect();
        let ds = single_year_dataset(&values, 2020);
        let desc = rank(&ds, 2020, false).unwrap();
        let asc = rank(&ds, 2020, true).unwrap();

        let desc_order: Vec<&str> = desc.iter().map(|e| e.country.as_str()).collect();
        let mut asc_order: Vec<&str> = asc.iter().map(|e| e.country.as_str()).collect();
        asc_order.reverse();
        prop_assert_eq!(desc_order, asc_order);

        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        prop_assert_eq!(desc[0].rank, 1);
        prop_assert_eq!(desc[0].value, max);
        prop_assert_eq!(asc[0].rank, 1);
        prop_assert_eq!(asc[0].value, min);
    }

    #[test]
    fn cleaned_rows_are_canonical(rows in messy_rows()) {
        let ds = clean(&rows, &codes_for(&rows)).unwrap();
        for record in ds.records() {
            prop_assert_ne!(record.country.as_str(), "Other, non specified");
            prop_assert!(!record.country.contains('('));
            prop_assert!(record.value >= 0.0);
        }
    }

    #[test]
    fn clean_is_idempotent(rows in messy_rows()) {
        let codes = codes_for(&rows);
        let once = clean(&rows, &codes).unwrap();
        let twice = clean(&once.to_raw_rows(), &codes).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rank_lists_each_country_once(rows in messy_rows(), year in 2015i32..2021) {
        let ds = clean(&rows, &codes_for(&rows)).unwrap();
        match rank(&ds, year, false) {
            Ok(ranked) => {
                let mut seen = HashSet::new();
                for entry in &ranked {
                    prop_assert!(seen.insert(entry.country.clone()));
                    prop_assert_eq!(rank_of(&ranked, &entry.country).unwrap(), entry.rank);
                }
            }
            Err(DataError::NoDataForYear(y)) => prop_assert_eq!(y, year),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}

#[test]
fn worked_example_cleans_and_ranks() {
    let rows = vec![
        raw("USA", "United States", "Total", 2020, 78.5),
        raw("FRA", "France (metropolitan)", "Total", 2020, 82.1),
    ];
    let codes = vec![
        RawCountryCode { alpha3: "USA".to_string() },
        RawCountryCode { alpha3: "FRA".to_string() },
    ];
    let ds = clean(&rows, &codes).unwrap();

    let cleaned: Vec<_> = ds
        .records()
        .iter()
        .map(|r| (r.country.as_str(), r.sex, r.year, r.value))
        .collect();
    assert_eq!(
        cleaned,
        vec![
            ("United States", Sex::BothSexes, 2020, 78.5),
            ("France", Sex::BothSexes, 2020, 82.1),
        ]
    );

    let ranked: Vec<_> = rank(&ds, 2020, false)
        .unwrap()
        .into_iter()
        .map(|e| (e.rank, e.country, e.value))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (1, "France".to_string(), 82.1),
            (2, "United States".to_string(), 78.5),
        ]
    );
}

#[test]
fn worked_example_series() {
    let rows = vec![raw("FRA", "France", "Total", 2020, 82.1)];
    let ds = clean(&rows, &codes_for(&rows)).unwrap();
    let s = series(&ds, "France");

    assert_eq!(s, BTreeMap::from([(2020, BTreeMap::from([(Sex::BothSexes, 82.1)]))]));
    assert!(matches!(
        value_at(&s, 2019, Sex::Female),
        Err(DataError::MissingValue { .. })
    ));
}
