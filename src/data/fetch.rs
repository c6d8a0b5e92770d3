use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use super::error::{DataError, Result};

/// Where one raw CSV payload comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub life_exp: Source,
    pub country_codes: Source,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

/// Both payloads as text, not yet parsed.
#[derive(Debug, Clone)]
pub struct RawSources {
    pub life_exp_csv: String,
    pub country_codes_csv: String,
}

/// Retrieve both sources. Blocks; run it off the UI thread.
pub fn fetch_all(config: &SourceConfig) -> Result<RawSources> {
    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| DataError::fetch("HTTP client", e))?;

    Ok(RawSources {
        life_exp_csv: fetch_one(&client, &config.life_exp)?,
        country_codes_csv: fetch_one(&client, &config.country_codes)?,
    })
}

fn fetch_one(client: &Client, source: &Source) -> Result<String> {
    log::info!("fetching {source}");
    let text = match source {
        Source::Url(url) => client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| DataError::fetch(url.as_str(), e))?,
        Source::File(path) => std::fs::read_to_string(path)
            .map_err(|e| DataError::fetch(path.display().to_string(), e))?,
    };
    log::info!("fetched {} bytes from {source}", text.len());
    Ok(text)
}
