use crate::data::error::{DataError, Result};
use crate::data::fetch::SourceConfig;
use crate::data::filter::FilterState;
use crate::data::loader::{spawn_load, LoadHandle, LoadUpdate};
use crate::data::model::{CanonicalDataset, Sex};
use crate::data::rank::{find_country, rank, rank_of, RankedEntry};
use crate::data::series::{series, DetailSeries};

pub const SEARCH_FOUND: &str =
    "Your selected country is highlighted. If not seen, scroll up or down.";
pub const SEARCH_EMPTY: &str = "Please fill in the country name that you want to find.";
pub const SEARCH_NOT_FOUND: &str = "Country not found. Please try again or choose from the \
                                    country list provided in the suggestions.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the application is in its lifecycle.
pub enum LoadPhase {
    /// Background fetch in flight.
    Loading(LoadHandle),
    /// Startup failed; only the diagnostic is shown.
    Failed(String),
    Ready(Session),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: SourceConfig,
    pub phase: LoadPhase,
}

impl AppState {
    /// Start loading immediately.
    pub fn new(config: SourceConfig) -> Self {
        let phase = LoadPhase::Loading(spawn_load(config.clone()));
        Self { config, phase }
    }

    /// Check on the background load. Returns `true` while still waiting.
    pub fn poll_load(&mut self) -> bool {
        let LoadPhase::Loading(handle) = &self.phase else {
            return false;
        };
        match handle.poll() {
            None => true,
            Some(LoadUpdate::Ready(dataset)) => {
                self.phase = LoadPhase::Ready(Session::new(dataset));
                false
            }
            Some(LoadUpdate::Failed(e)) => {
                self.phase = LoadPhase::Failed(e.to_string());
                false
            }
        }
    }

    /// User-initiated retry after a failed load.
    pub fn retry(&mut self) {
        log::info!("retrying data load");
        self.phase = LoadPhase::Loading(spawn_load(self.config.clone()));
    }
}

// ---------------------------------------------------------------------------
// Session – everything available once the dataset is loaded
// ---------------------------------------------------------------------------

pub struct Session {
    pub dataset: CanonicalDataset,
    /// Ranking page selection: year and sort order.
    pub filters: FilterState,
    /// Text typed into the search box.
    pub search_input: String,
    pub search_message: Option<&'static str>,
    /// Country highlighted by the last successful search.
    pub highlighted: Option<String>,
    /// Row the table should scroll to on the next frame.
    pub scroll_to: Option<usize>,
    pub details: Vec<DetailView>,
    next_detail_id: u64,
}

impl Session {
    pub fn new(dataset: CanonicalDataset) -> Self {
        let filters = FilterState::new(&dataset);
        Self {
            dataset,
            filters,
            search_input: String::new(),
            search_message: None,
            highlighted: None,
            scroll_to: None,
            details: Vec::new(),
            next_detail_id: 0,
        }
    }

    /// Current ranking table, recomputed from the filters.
    pub fn ranking(&self) -> Result<Vec<RankedEntry>> {
        rank(&self.dataset, self.filters.year, self.filters.sort_ascending)
    }

    /// Look up `search_input` in the current ranking and record the outcome.
    pub fn search(&mut self) {
        self.filters.country = self.search_input.trim().to_string();
        if self.filters.country.is_empty() {
            self.highlighted = None;
            self.search_message = Some(SEARCH_EMPTY);
            return;
        }

        let entries = self.ranking().unwrap_or_default();
        match find_country(&entries, &self.filters.country) {
            Some(idx) => {
                self.highlighted = Some(entries[idx].country.clone());
                self.scroll_to = Some(idx);
                self.search_message = Some(SEARCH_FOUND);
            }
            None => {
                self.highlighted = None;
                self.search_message = Some(SEARCH_NOT_FOUND);
            }
        }
    }

    /// Open a detail window for `country` at the ranking page's year.
    pub fn open_detail(&mut self, country: &str) {
        log::debug!("opening detail view for {country}");
        let id = self.next_detail_id;
        self.next_detail_id += 1;
        self.details
            .push(DetailView::new(id, country, self.filters.year));
    }

    /// Forget windows the user has closed.
    pub fn prune_details(&mut self) {
        self.details.retain(|d| d.open);
    }
}

// ---------------------------------------------------------------------------
// Detail window state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    /// Bar chart of one year.
    SpecificYear,
    /// Line chart across all years.
    Overall,
}

pub struct DetailView {
    pub id: u64,
    pub filters: FilterState,
    pub mode: DetailMode,
    pub open: bool,
}

impl DetailView {
    pub fn new(id: u64, country: &str, year: i32) -> Self {
        Self {
            id,
            filters: FilterState::for_country(country, year),
            mode: DetailMode::SpecificYear,
            open: true,
        }
    }

    pub fn series(&self, dataset: &CanonicalDataset) -> DetailSeries {
        series(dataset, &self.filters.country)
    }

    pub fn toggle_sex(&mut self, sex: Sex) {
        if !self.filters.sexes.toggle(sex) {
            log::debug!("keeping {sex} selected: at least one sex must stay visible");
        }
    }

    /// "Rank #k out of N countries in YEAR", always ranked highest first.
    pub fn rank_description(&self, dataset: &CanonicalDataset) -> String {
        let year = self.filters.year;
        let described = rank(dataset, year, false).and_then(|entries| {
            let position = rank_of(&entries, &self.filters.country)?;
            Ok((position, entries.len()))
        });
        match described {
            Ok((position, total)) => {
                format!("Rank #{position} out of {total} countries in {year}")
            }
            Err(DataError::NoDataForYear(_)) | Err(DataError::CountryNotFound { .. }) => {
                format!("No ranking data in {year}")
            }
            Err(e) => e.to_string(),
        }
    }
}
