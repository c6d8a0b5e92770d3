use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::data::fetch::{Source, SourceConfig};

/// UNICEF SDMX life-expectancy series, labelled CSV.
pub const LIFE_EXPECTANCY_URL: &str = "https://sdmx.data.unicef.org/ws/public/sdmxapi/rest/data/UNICEF,DM,1.0/.DM_LIFE_EXP...?format=csv&labels=both";

/// ISO 3166 country codes; the alpha-3 column separates real countries from
/// the aggregate areas in the life-expectancy series.
pub const COUNTRY_CODES_URL: &str = "https://gist.githubusercontent.com/tadast/8827699/raw/f5cac3d42d16b78348610fc4ec301e9234f82821/countries_codes_and_coordinates.csv";

/// Command line options. Every option can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "life-exp-viewer", version, about)]
pub struct Args {
    /// URL of the life-expectancy CSV.
    #[arg(long, env = "LIFE_EXP_URL", default_value = LIFE_EXPECTANCY_URL)]
    pub life_exp_url: String,

    /// URL of the country-code reference CSV.
    #[arg(long, env = "COUNTRY_CODES_URL", default_value = COUNTRY_CODES_URL)]
    pub country_codes_url: String,

    /// Read the life-expectancy CSV from disk instead of downloading it.
    #[arg(long, env = "LIFE_EXP_FILE")]
    pub life_exp_file: Option<PathBuf>,

    /// Read the country-code CSV from disk instead of downloading it.
    #[arg(long, env = "COUNTRY_CODES_FILE")]
    pub country_codes_file: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Args {
    pub fn source_config(&self) -> SourceConfig {
        let pick = |file: &Option<PathBuf>, url: &str| match file {
            Some(path) => Source::File(path.clone()),
            None => Source::Url(url.to_string()),
        };
        SourceConfig {
            life_exp: pick(&self.life_exp_file, &self.life_exp_url),
            country_codes: pick(&self.country_codes_file, &self.country_codes_url),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_download_both_sources() {
        let args = Args::try_parse_from(["life-exp-viewer"]).unwrap();
        let config = args.source_config();
        assert_eq!(config.life_exp, Source::Url(LIFE_EXPECTANCY_URL.to_string()));
        assert_eq!(config.country_codes, Source::Url(COUNTRY_CODES_URL.to_string()));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn local_files_replace_downloads() {
        let args = Args::try_parse_from([
            "life-exp-viewer",
            "--life-exp-file",
            "data/life.csv",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let config = args.source_config();
        assert_eq!(config.life_exp, Source::File(PathBuf::from("data/life.csv")));
        assert!(matches!(config.country_codes, Source::Url(_)));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
