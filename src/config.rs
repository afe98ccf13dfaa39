use chrono::NaiveDate;

use crate::error::ReportError;

/// Largest company of each S&P 500 sector
pub const SECTOR_LEADERS: &[&str] = &[
    "GOOG", "AMZN", "WMT", "XOM", "BRK-B", "LLY", "GE", "MSFT", "LIN", "PLD", "NEE",
];

/// Market benchmark
pub const BENCHMARK_SYMBOL: &str = "^GSPC";
pub const BENCHMARK_NAME: &str = "S&P 500 Index";

/// First day of the historical window
pub const START_YEAR: i32 = 2020;

/// Trading days used to annualize a mean daily return
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Report grid: fixed row count, columns are derived from the panel count
pub const GRID_ROWS: usize = 3;
pub const CELL_WIDTH: f32 = 640.0;
pub const CELL_HEIGHT: f32 = 400.0;

/// Yahoo Finance chart endpoint
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const YAHOO_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Parameters for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub constituents: Vec<String>,
    pub benchmark: String,
    pub benchmark_name: String,
    pub start: NaiveDate,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            constituents: SECTOR_LEADERS.iter().map(|s| s.to_string()).collect(),
            benchmark: BENCHMARK_SYMBOL.to_string(),
            benchmark_name: BENCHMARK_NAME.to_string(),
            start: NaiveDate::from_ymd_opt(START_YEAR, 1, 1).unwrap_or_default(),
        }
    }
}

impl ReportConfig {
    /// Constituents followed by the benchmark, the order the price download uses.
    pub fn all_symbols(&self) -> Vec<String> {
        let mut symbols = self.constituents.clone();
        symbols.push(self.benchmark.clone());
        symbols
    }

    /// Short label used for the benchmark in chart legends ("S&P 500 Index" -> "S&P 500").
    pub fn benchmark_label(&self) -> &str {
        self.benchmark_name
            .strip_suffix(" Index")
            .unwrap_or(&self.benchmark_name)
    }

    pub fn validate(&self, as_of: NaiveDate) -> Result<(), ReportError> {
        if self.constituents.is_empty() {
            return Err(ReportError::InvalidConfig(
                "at least one constituent symbol is required".to_string(),
            ));
        }
        if self.constituents.iter().any(|s| *s == self.benchmark) {
            return Err(ReportError::InvalidConfig(format!(
                "benchmark {} is also listed as a constituent",
                self.benchmark
            )));
        }
        if self.start >= as_of {
            return Err(ReportError::InvalidConfig(format!(
                "start date {} must precede {}",
                self.start, as_of
            )));
        }
        Ok(())
    }
}
