/// Data layer: fetching, cleaning, and the ranking / series queries.
///
/// Architecture:
/// ```text
///  life expectancy CSV     country code CSV
///            │                    │
///            ▼                    ▼
///        ┌──────────────────────────┐
///        │  fetch    (worker thread) │  HTTP or local file → text
///        └──────────────────────────┘
///                     │
///                     ▼
///        ┌──────────────────────────┐
///        │  cleaner                 │  parse, filter, rename → CanonicalDataset
///        └──────────────────────────┘
///                     │
///          ┌──────────┴──────────┐
///          ▼                     ▼
///     ┌─────────┐          ┌──────────┐
///     │  rank   │          │  series  │   recomputed per FilterState
///     └─────────┘          └──────────┘
/// ```

pub mod cleaner;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
pub mod series;
