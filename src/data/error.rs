use thiserror::Error;

use super::model::Sex;

/// Errors raised while building the canonical dataset or querying it.
///
/// `Fetch` and `DataFormat` are construction-time failures and abort loading.
/// The remaining variants are local to a single query; callers skip the
/// affected row or point and keep rendering the rest.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network or file retrieval of a raw source failed.
    #[error("failed to fetch {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// A required column is absent or a row holds a malformed value.
    #[error("malformed data: {0}")]
    DataFormat(String),

    #[error("no both-sexes records for year {0}")]
    NoDataForYear(i32),

    #[error("country '{country}' has no ranking entry")]
    CountryNotFound { country: String },

    #[error("no value for {sex} in {year}")]
    MissingValue { year: i32, sex: Sex },
}

impl DataError {
    pub fn format(message: impl Into<String>) -> Self {
        DataError::DataFormat(message.into())
    }

    pub fn fetch(source_name: impl Into<String>, message: impl ToString) -> Self {
        DataError::Fetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
