use thiserror::Error;

/// Failures of a report run.
///
/// `MetadataLookupFailed` never leaves the acquisition phase: the raw
/// symbol stands in for the display name. Everything else ends the run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No data was fetched from Yahoo Finance")]
    FetchEmpty,

    #[error("Neither 'Adj Close' nor 'Close' columns are available in the data (found: {})", available.join(", "))]
    MissingPriceField { available: Vec<String> },

    #[error("Name lookup failed for {symbol}: {reason}")]
    MetadataLookupFailed { symbol: String, reason: String },

    #[error("Failed to render report: {0}")]
    RenderFailed(String),

    #[error("Price download failed for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    pub fn provider(symbol: &str, err: impl std::fmt::Display) -> Self {
        Self::Provider {
            symbol: symbol.to_string(),
            message: format!("{:#}", err),
        }
    }
}
