use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::ReportConfig;
use crate::data::models::PriceFrame;
use crate::data::provider::MarketDataProvider;
use crate::error::ReportError;

/// Display name per constituent symbol
pub type DisplayNames = HashMap<String, String>;

/// Download every constituent and the benchmark from the configured start up
/// to (not including) `as_of`. An empty download ends the run here.
pub async fn fetch_prices<P: MarketDataProvider + ?Sized>(
    provider: &P,
    config: &ReportConfig,
    as_of: NaiveDate,
) -> Result<PriceFrame, ReportError> {
    config.validate(as_of)?;

    let symbols = config.all_symbols();
    tracing::info!(
        "Fetching {} symbols from {} ({} to {})",
        symbols.len(),
        provider.name(),
        config.start,
        as_of
    );

    let frame = provider.fetch_history(&symbols, config.start, as_of).await?;
    if frame.is_empty() {
        return Err(ReportError::FetchEmpty);
    }

    tracing::info!("Fetched {} trading days", frame.len());
    Ok(frame)
}

/// Resolve one display name per symbol, falling back to the symbol itself.
pub async fn resolve_display_names<P: MarketDataProvider + ?Sized>(
    provider: &P,
    symbols: &[String],
) -> DisplayNames {
    let mut names = DisplayNames::with_capacity(symbols.len());

    for symbol in symbols {
        let name = match provider.fetch_display_name(symbol).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("{} - using symbol as display name", e);
                symbol.clone()
            }
        };
        names.insert(symbol.clone(), name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{DailyBar, SymbolHistory};
    use async_trait::async_trait;

    /// In-memory provider serving fixed histories and names.
    struct FakeProvider {
        histories: Vec<SymbolHistory>,
        names: HashMap<String, String>,
    }

    #[async_trait]
    impl MarketDataProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "FAKE"
        }

        async fn fetch_history(
            &self,
            symbols: &[String],
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<PriceFrame, ReportError> {
            let histories: Vec<SymbolHistory> = self
                .histories
                .iter()
                .filter(|h| symbols.contains(&h.symbol))
                .map(|h| SymbolHistory {
                    symbol: h.symbol.clone(),
                    bars: h
                        .bars
                        .iter()
                        .filter(|b| b.date >= start && b.date < end)
                        .cloned()
                        .collect(),
                })
                .collect();
            Ok(PriceFrame::from_histories(&histories))
        }

        async fn fetch_display_name(&self, symbol: &str) -> Result<String, ReportError> {
            self.names
                .get(symbol)
                .cloned()
                .ok_or_else(|| ReportError::MetadataLookupFailed {
                    symbol: symbol.to_string(),
                    reason: "unknown symbol".to_string(),
                })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closes(symbol: &str, start: NaiveDate, prices: &[f64]) -> SymbolHistory {
        SymbolHistory {
            symbol: symbol.to_string(),
            bars: prices
                .iter()
                .enumerate()
                .map(|(i, p)| DailyBar {
                    date: start + chrono::Days::new(i as u64),
                    close: Some(*p),
                    adj_close: None,
                })
                .collect(),
        }
    }

    fn config(constituents: &[&str], benchmark: &str) -> ReportConfig {
        ReportConfig {
            constituents: constituents.iter().map(|s| s.to_string()).collect(),
            benchmark: benchmark.to_string(),
            benchmark_name: "Test Index".to_string(),
            start: date(2020, 1, 1),
        }
    }

    #[tokio::test]
    async fn test_fetch_prices_includes_benchmark() {
        let provider = FakeProvider {
            histories: vec![
                closes("A", date(2020, 1, 1), &[100.0, 101.0]),
                closes("IDX", date(2020, 1, 1), &[300.0, 303.0]),
            ],
            names: HashMap::new(),
        };
        let frame = fetch_prices(&provider, &config(&["A"], "IDX"), date(2020, 2, 1))
            .await
            .unwrap();
        let table = frame.price_table().unwrap();
        assert!(table.contains("A"));
        assert!(table.contains("IDX"));
    }

    #[tokio::test]
    async fn test_empty_download_is_fatal() {
        let provider = FakeProvider {
            histories: vec![],
            names: HashMap::new(),
        };
        let result = fetch_prices(&provider, &config(&["A"], "IDX"), date(2020, 2, 1)).await;
        assert!(matches!(result, Err(ReportError::FetchEmpty)));
    }

    #[tokio::test]
    async fn test_invalid_range_rejected_before_fetch() {
        let provider = FakeProvider {
            histories: vec![closes("A", date(2020, 1, 1), &[1.0])],
            names: HashMap::new(),
        };
        let result = fetch_prices(&provider, &config(&["A"], "IDX"), date(2019, 12, 31)).await;
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_display_name_falls_back_to_symbol() {
        let provider = FakeProvider {
            histories: vec![],
            names: HashMap::from([("MSFT".to_string(), "Microsoft Corporation".to_string())]),
        };
        let symbols = vec!["MSFT".to_string(), "GE".to_string()];
        let names = resolve_display_names(&provider, &symbols).await;
        assert_eq!(names["MSFT"], "Microsoft Corporation");
        assert_eq!(names["GE"], "GE");
    }
}
