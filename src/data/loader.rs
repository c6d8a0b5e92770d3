use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::cleaner::{clean, parse_country_codes_csv, parse_life_exp_csv};
use super::error::{DataError, Result};
use super::fetch::{fetch_all, RawSources, SourceConfig};
use super::model::CanonicalDataset;

// ---------------------------------------------------------------------------
// Synchronous pipeline
// ---------------------------------------------------------------------------

/// Parse and clean already fetched payloads.
pub fn build_dataset(raw: &RawSources) -> Result<CanonicalDataset> {
    let rows = parse_life_exp_csv(&raw.life_exp_csv)?;
    let codes = parse_country_codes_csv(&raw.country_codes_csv)?;
    log::info!("parsed {} life expectancy rows, {} country codes", rows.len(), codes.len());
    clean(&rows, &codes)
}

/// Fetch, parse and clean in one go.
pub fn load(config: &SourceConfig) -> Result<CanonicalDataset> {
    let raw = fetch_all(config)?;
    build_dataset(&raw)
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// Final message of a background load. Exactly one is sent per load.
#[derive(Debug)]
pub enum LoadUpdate {
    Ready(CanonicalDataset),
    Failed(DataError),
}

/// Foreground end of a background load.
pub struct LoadHandle {
    receiver: Receiver<LoadUpdate>,
}

impl LoadHandle {
    /// Non-blocking poll. `None` while the worker is still running.
    pub fn poll(&self) -> Option<LoadUpdate> {
        match self.receiver.try_recv() {
            Ok(update) => Some(update),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(LoadUpdate::Failed(DataError::fetch(
                "background loader",
                "worker exited without a result",
            ))),
        }
    }
}

/// Run [`load`] on a worker thread. The load runs to completion; there is no
/// cancellation and no retry.
pub fn spawn_load(config: SourceConfig) -> LoadHandle {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let update = match load(&config) {
            Ok(dataset) => {
                log::info!(
                    "dataset ready: {} records, {} countries",
                    dataset.len(),
                    dataset.country_count()
                );
                LoadUpdate::Ready(dataset)
            }
            Err(e) => {
                log::error!("loading data failed: {e}");
                LoadUpdate::Failed(e)
            }
        };
        let _ = sender.send(update);
    });

    LoadHandle { receiver }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::data::fetch::Source;

    const LIFE_EXP: &str = "REF_AREA,Geographic area,Sex,TIME_PERIOD,OBS_VALUE\n\
                            USA,United States,Total,2020,78.5\n\
                            FRA,France (metropolitan),Total,2020,82.1\n\
                            EAP,East Asia and Pacific,Total,2020,76.0\n";
    const CODES: &str = "\"Country\",\"Alpha-3 code\"\n\"France\", \"FRA\"\n\"United States\", \"USA\"\n";

    fn wait(handle: &LoadHandle) -> LoadUpdate {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(update) = handle.poll() {
                return update;
            }
            assert!(Instant::now() < deadline, "loader did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn builds_dataset_from_payloads() {
        let raw = RawSources {
            life_exp_csv: LIFE_EXP.to_string(),
            country_codes_csv: CODES.to_string(),
        };
        let ds = build_dataset(&raw).unwrap();
        assert_eq!(ds.countries(), vec!["France".to_string(), "United States".to_string()]);
    }

    #[test]
    fn background_load_reports_failure() {
        let config = SourceConfig {
            life_exp: Source::File(PathBuf::from("/nonexistent/life.csv")),
            country_codes: Source::File(PathBuf::from("/nonexistent/codes.csv")),
            timeout: Duration::from_secs(1),
        };
        let handle = spawn_load(config);
        assert!(matches!(wait(&handle), LoadUpdate::Failed(DataError::Fetch { .. })));
    }

    #[test]
    fn background_load_delivers_dataset() {
        let dir = std::env::temp_dir();
        let life = dir.join(format!("life-exp-viewer-loader-{}-life.csv", std::process::id()));
        let codes = dir.join(format!("life-exp-viewer-loader-{}-codes.csv", std::process::id()));
        std::fs::write(&life, LIFE_EXP).unwrap();
        std::fs::write(&codes, CODES).unwrap();

        let handle = spawn_load(SourceConfig {
            life_exp: Source::File(life.clone()),
            country_codes: Source::File(codes.clone()),
            timeout: Duration::from_secs(1),
        });
        match wait(&handle) {
            LoadUpdate::Ready(ds) => assert_eq!(ds.len(), 2),
            LoadUpdate::Failed(e) => panic!("unexpected failure: {e}"),
        }
        let _ = std::fs::remove_file(life);
        let _ = std::fs::remove_file(codes);
    }
}
