use std::collections::HashSet;

use csv::StringRecord;

use super::error::{DataError, Result};
use super::model::{
    CanonicalDataset, LifeExpectancyRecord, RawCountryCode, RawLifeExpRow, Sex,
};

/// Columns of the life-expectancy source that survive cleaning.
const LIFE_EXP_COLUMNS: [&str; 5] = ["REF_AREA", "Geographic area", "Sex", "TIME_PERIOD", "OBS_VALUE"];

/// Column of the reference table holding ISO alpha-3 codes.
const ALPHA3_COLUMN: &str = "Alpha-3 code";

/// Area name used by the source for unattributed rows.
const UNSPECIFIED_AREA: &str = "Other, non specified";

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// The reference table wraps values in quotes *after* a space
/// (`"Afghanistan", "AF", "AFG"`), which CSV readers keep verbatim.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c: char| c == '"' || c.is_whitespace())
}

fn read_headers(reader: &mut csv::Reader<&[u8]>, source: &str) -> Result<StringRecord> {
    let headers = reader
        .headers()
        .map_err(|e| DataError::format(format!("{source}: unreadable header row: {e}")))?;
    Ok(headers.iter().map(strip_quotes).collect())
}

/// Parse the life-expectancy CSV, keeping only the five columns the cleaner
/// needs. Fails when any of them is missing.
pub fn parse_life_exp_csv(text: &str) -> Result<Vec<RawLifeExpRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = read_headers(&mut reader, "life expectancy")?;

    for column in LIFE_EXP_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::format(format!(
                "life expectancy source is missing column '{column}'"
            )));
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DataError::format(format!("life expectancy row {row_no}: {e}")))?;
        let row: RawLifeExpRow = record
            .deserialize(Some(&headers))
            .map_err(|e| DataError::format(format!("life expectancy row {row_no}: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse the ISO country-code reference CSV.
pub fn parse_country_codes_csv(text: &str) -> Result<Vec<RawCountryCode>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = read_headers(&mut reader, "country codes")?;

    let idx = headers
        .iter()
        .position(|h| h == ALPHA3_COLUMN)
        .ok_or_else(|| {
            DataError::format(format!("country code source is missing column '{ALPHA3_COLUMN}'"))
        })?;

    let mut codes = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DataError::format(format!("country code row {row_no}: {e}")))?;
        let alpha3 = record
            .get(idx)
            .ok_or_else(|| DataError::format(format!("country code row {row_no} is too short")))?;
        codes.push(RawCountryCode {
            alpha3: alpha3.to_string(),
        });
    }
    Ok(codes)
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Drop a parenthesised annotation: `"France (metropolitan)"` → `"France"`.
pub fn normalize_country_name(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim(),
        None => name.trim(),
    }
}

fn valid_codes(codes: &[RawCountryCode]) -> HashSet<&str> {
    codes
        .iter()
        .map(|c| strip_quotes(&c.alpha3))
        .filter(|c| !c.is_empty())
        .collect()
}

/// Build the canonical dataset from raw source rows.
///
/// Rows whose area code is not an ISO country are dropped, as are the
/// "Other, non specified" rows and rows with an empty value. Anything else
/// that does not parse, and any repeated `(country, year, sex)`, is a
/// [`DataError::DataFormat`].
pub fn clean(rows: &[RawLifeExpRow], codes: &[RawCountryCode]) -> Result<CanonicalDataset> {
    let codes = valid_codes(codes);
    let mut seen: HashSet<(String, i32, Sex)> = HashSet::new();
    let mut records = Vec::new();
    let mut non_country = 0usize;
    let mut unspecified = 0usize;
    let mut empty_values = 0usize;

    for (row_no, row) in rows.iter().enumerate() {
        let area_code = row.area_code.trim();
        if !codes.contains(area_code) {
            non_country += 1;
            continue;
        }

        let area_name = row.area_name.trim();
        if area_name == UNSPECIFIED_AREA {
            unspecified += 1;
            continue;
        }

        let sex = Sex::from_label(&row.sex).ok_or_else(|| {
            DataError::format(format!("row {row_no}: unknown sex label '{}'", row.sex))
        })?;

        let year: i32 = row.year.trim().parse().map_err(|_| {
            DataError::format(format!("row {row_no}: '{}' is not a year", row.year))
        })?;

        let raw_value = row.value.trim();
        if raw_value.is_empty() {
            empty_values += 1;
            continue;
        }
        let value: f64 = raw_value.parse().map_err(|_| {
            DataError::format(format!("row {row_no}: '{raw_value}' is not a number"))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(DataError::format(format!(
                "row {row_no}: life expectancy {value} out of range"
            )));
        }

        let country = normalize_country_name(area_name);
        if country.is_empty() {
            return Err(DataError::format(format!(
                "row {row_no}: area name '{area_name}' is empty once normalized"
            )));
        }

        if !seen.insert((country.to_string(), year, sex)) {
            return Err(DataError::format(format!(
                "duplicate record for {country}, {year}, {sex}"
            )));
        }

        records.push(LifeExpectancyRecord {
            area_code: area_code.to_string(),
            country: country.to_string(),
            year,
            sex,
            value,
        });
    }

    log::debug!(
        "dropped {non_country} non-country rows, {unspecified} unspecified-area rows, \
         {empty_values} rows without a value"
    );
    log::info!(
        "cleaned {} raw rows into {} records",
        rows.len(),
        records.len()
    );

    Ok(CanonicalDataset::from_records(records))
}
