use async_trait::async_trait;
use chrono::NaiveDate;

use crate::data::models::PriceFrame;
use crate::error::ReportError;

/// Upstream market-data source.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;

    /// Daily prices for every symbol in one batched call, `start` inclusive,
    /// `end` exclusive. Symbols the provider knows nothing about are simply
    /// absent from the frame.
    async fn fetch_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, ReportError>;

    /// Human-readable name of a symbol. Failures are `MetadataLookupFailed`.
    async fn fetch_display_name(&self, symbol: &str) -> Result<String, ReportError>;
}
