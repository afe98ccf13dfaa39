//! Yahoo Finance chart API.
//!
//! Daily bars come from `/v8/finance/chart/{symbol}`; the same endpoint's
//! `meta.longName` doubles as the display-name lookup.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::config;
use crate::data::models::{DailyBar, PriceFrame, SymbolHistory};
use crate::data::provider::MarketDataProvider;
use crate::error::ReportError;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    #[serde(default)]
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Decode a chart response body into its single result.
fn parse_chart(body: &str) -> Result<ChartData> {
    let response: ChartResponse =
        serde_json::from_str(body).context("Failed to decode chart response")?;

    if let Some(err) = response.chart.error {
        bail!("API error [{}]: {}", err.code, err.description);
    }

    response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .context("Chart response has no result")
}

/// Bars keyed by exchange-local trading date. Rows without any price are dropped.
fn history_from_chart(symbol: &str, chart: &ChartData) -> SymbolHistory {
    let closes = chart.indicators.quote.first().map(|q| q.close.as_slice());
    let adj_closes = chart
        .indicators
        .adjclose
        .as_ref()
        .and_then(|a| a.first())
        .map(|a| a.adjclose.as_slice());

    let bars = chart
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let date = DateTime::from_timestamp(ts + chart.meta.gmtoffset, 0)?.date_naive();
            let close = closes.and_then(|c| c.get(i).copied().flatten());
            let adj_close = adj_closes.and_then(|a| a.get(i).copied().flatten());
            if close.is_none() && adj_close.is_none() {
                return None;
            }
            Some(DailyBar {
                date,
                close,
                adj_close,
            })
        })
        .collect();

    SymbolHistory {
        symbol: symbol.to_string(),
        bars,
    }
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// `^GSPC` has to travel as `%5EGSPC` in the path segment.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ReportError> {
        Self::with_base_url(config::YAHOO_CHART_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .user_agent(config::YAHOO_USER_AGENT)
            .build()
            .map_err(|e| ReportError::provider("*", e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_chart(&self, symbol: &str, query: &[(&str, String)]) -> Result<ChartData> {
        let url = format!("{}/{}", self.base_url, encode_symbol(symbol));
        tracing::debug!("GET {} {:?}", url, query);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request for {} failed", symbol))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("Failed to read response for {}", symbol))?;

        // Error payloads arrive with 4xx statuses but still carry a chart.error body
        match parse_chart(&body) {
            Ok(chart) => Ok(chart),
            Err(e) if status.is_success() => Err(e),
            Err(e) => Err(e.context(format!("HTTP {}", status))),
        }
    }

    /// Daily bars of one symbol, `start` inclusive, `end` exclusive.
    pub async fn fetch_symbol_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SymbolHistory> {
        let query = [
            ("period1", unix_seconds(start).to_string()),
            ("period2", unix_seconds(end).to_string()),
            ("interval", "1d".to_string()),
            ("events", "div,split".to_string()),
        ];
        let chart = self.fetch_chart(symbol, &query).await?;
        let mut history = history_from_chart(symbol, &chart);
        history.bars.retain(|b| b.date >= start && b.date < end);
        Ok(history)
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, ReportError> {
        let mut histories = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            match self.fetch_symbol_history(symbol, start, end).await {
                Ok(history) if history.bars.is_empty() => {
                    tracing::warn!("{}: no price data found, symbol may be delisted", symbol);
                }
                Ok(history) => {
                    tracing::debug!("{}: {} daily bars", symbol, history.bars.len());
                    histories.push(history);
                }
                Err(e) => tracing::warn!("Failed to fetch {}: {:#}", symbol, e),
            }
        }

        Ok(PriceFrame::from_histories(&histories))
    }

    async fn fetch_display_name(&self, symbol: &str) -> Result<String, ReportError> {
        let lookup_failed = |reason: String| ReportError::MetadataLookupFailed {
            symbol: symbol.to_string(),
            reason,
        };

        let query = [("range", "1d".to_string()), ("interval", "1d".to_string())];
        let chart = self
            .fetch_chart(symbol, &query)
            .await
            .map_err(|e| lookup_failed(format!("{:#}", e)))?;

        chart
            .meta
            .long_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| lookup_failed("no longName in chart metadata".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "GOOG", "longName": "Alphabet Inc.", "gmtoffset": -18000},
                "timestamp": [1577975400, 1578061800, 1578321000],
                "indicators": {
                    "quote": [{"open": [67.0, 67.5, 67.6], "close": [68.37, null, 69.46]}],
                    "adjclose": [{"adjclose": [68.12, null, 69.20]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_bars() {
        let chart = parse_chart(CHART_BODY).unwrap();
        let history = history_from_chart("GOOG", &chart);

        // The null row is dropped, dates are exchange-local
        assert_eq!(history.bars.len(), 2);
        assert_eq!(history.bars[0].date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(history.bars[1].date, NaiveDate::from_ymd_opt(2020, 1, 6).unwrap());
        assert_eq!(history.bars[0].close, Some(68.37));
        assert_eq!(history.bars[1].adj_close, Some(69.20));
        assert_eq!(chart.meta.long_name.as_deref(), Some("Alphabet Inc."));
    }

    #[test]
    fn test_parse_chart_without_adjclose() {
        let body = r#"{"chart": {"result": [{
            "meta": {"gmtoffset": 0},
            "timestamp": [1577923200],
            "indicators": {"quote": [{"close": [10.0]}]}
        }], "error": null}}"#;
        let chart = parse_chart(body).unwrap();
        let history = history_from_chart("X", &chart);
        assert_eq!(history.bars.len(), 1);
        assert_eq!(history.bars[0].adj_close, None);
        assert!(chart.meta.long_name.is_none());
    }

    #[test]
    fn test_parse_chart_error_payload() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let err = parse_chart(body).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_parse_chart_without_timestamps() {
        let body = r#"{"chart": {"result": [{"meta": {}, "indicators": {"quote": [{}]}}], "error": null}}"#;
        let chart = parse_chart(body).unwrap();
        assert!(history_from_chart("X", &chart).bars.is_empty());
    }

    #[test]
    fn test_symbol_encoding_and_timestamps() {
        assert_eq!(encode_symbol("^GSPC"), "%5EGSPC");
        assert_eq!(encode_symbol("BRK-B"), "BRK-B");
        assert_eq!(unix_seconds(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), 1577836800);
    }
}
