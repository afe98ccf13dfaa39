//! Annualized returns per symbol over calendar-year windows.

use chrono::{Datelike, NaiveDate};

use crate::config::{ReportConfig, TRADING_DAYS_PER_YEAR};
use crate::data::models::PriceTable;

/// Compute the mean of a slice
fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Fractional change of each observation versus the one before it.
/// The first observation has no return.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Mean daily return scaled to 252 trading days, in percent.
/// Undefined with fewer than two observations.
pub fn annualized_return(prices: &[f64]) -> Option<f64> {
    if prices.len() < 2 {
        return None;
    }
    let returns = daily_returns(prices);
    mean(&returns)
        .map(|m| m * TRADING_DAYS_PER_YEAR * 100.0)
        .filter(|r| r.is_finite())
}

/// One calendar year, cut at the as-of date for the current year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Year buckets from the year of `start` through the year of `as_of`.
pub fn year_windows(start: NaiveDate, as_of: NaiveDate) -> Vec<YearWindow> {
    (start.year()..=as_of.year())
        .filter_map(|year| {
            let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)?;
            Some(YearWindow {
                year,
                start: jan1.max(start),
                end: dec31.min(as_of),
            })
        })
        .collect()
}

/// Annualized returns of one window, benchmark kept apart from constituents.
#[derive(Debug, Clone)]
pub struct WindowReturns {
    pub window: YearWindow,
    /// Constituents with a defined return, in configured order
    pub constituents: Vec<(String, f64)>,
    pub benchmark: Option<f64>,
    /// Mean over `constituents` only
    pub constituent_average: Option<f64>,
}

impl WindowReturns {
    pub fn compute(table: &PriceTable, window: YearWindow, config: &ReportConfig) -> Self {
        let constituents: Vec<(String, f64)> = config
            .constituents
            .iter()
            .filter_map(|symbol| {
                let prices = table.window(symbol, window.start, window.end);
                annualized_return(&prices).map(|r| (symbol.clone(), r))
            })
            .collect();

        let benchmark =
            annualized_return(&table.window(&config.benchmark, window.start, window.end));

        let values: Vec<f64> = constituents.iter().map(|(_, r)| *r).collect();
        let constituent_average = mean(&values);

        tracing::debug!(
            "{}: {} of {} constituents defined, avg {:?}, benchmark {:?}",
            window.year,
            constituents.len(),
            config.constituents.len(),
            constituent_average,
            benchmark
        );

        Self {
            window,
            constituents,
            benchmark,
            constituent_average,
        }
    }

    pub fn constituent(&self, symbol: &str) -> Option<f64> {
        self.constituents
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, r)| *r)
    }
}
