//! Report assembly: per-year bar panels, the year-over-year trend, and the
//! year-to-date summary table, plus the grid they are laid out on.

pub mod layout;

use chrono::{Datelike, NaiveDate};

use crate::analysis::returns::{year_windows, WindowReturns, YearWindow};
use crate::config::{ReportConfig, GRID_ROWS};
use crate::data::acquisition::DisplayNames;
use crate::data::models::PriceTable;
use layout::GridLayout;

/// Horizontal marker across a bar panel
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
}

/// Bar chart of constituent returns for one year bucket
#[derive(Debug, Clone)]
pub struct YearPanel {
    pub year: i32,
    pub title: String,
    pub bar_label: String,
    pub bars: Vec<(String, f64)>,
    pub benchmark: Option<ReferenceLine>,
    pub average: Option<ReferenceLine>,
}

impl YearPanel {
    pub const X_LABEL: &'static str = "Company Tickers";
    pub const Y_LABEL: &'static str = "Average Annual Return (%)";

    fn from_returns(returns: &WindowReturns, benchmark_label: &str) -> Self {
        let year = returns.window.year;
        Self {
            year,
            title: format!(
                "Average Annual Return of Sector Leaders vs {} ({})",
                benchmark_label, year
            ),
            bar_label: "Sector Leaders".to_string(),
            bars: returns.constituents.clone(),
            benchmark: returns.benchmark.map(|value| ReferenceLine {
                label: format!("{} ({:.1}%)", benchmark_label, value),
                value,
            }),
            average: returns.constituent_average.map(|value| ReferenceLine {
                label: format!("Sector Leaders Avg ({:.1}%)", value),
                value,
            }),
        }
    }
}

/// Constituent average and benchmark return of one year
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub portfolio: Option<f64>,
    pub benchmark: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TrendPanel {
    pub title: String,
    pub portfolio_label: String,
    pub benchmark_label: String,
    pub points: Vec<TrendPoint>,
}

impl TrendPanel {
    pub const X_LABEL: &'static str = "Year";
    pub const Y_LABEL: &'static str = "Annual Return (%)";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Constituent,
    Index,
}

/// One line of the summary table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub symbol: String,
    pub display_name: String,
    pub role: RowRole,
    pub annualized_return: Option<f64>,
}

impl ReportRow {
    pub fn formatted_return(&self) -> String {
        match self.annualized_return {
            Some(r) => format!("{:.2}%", r),
            None => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub title: String,
    pub headers: [String; 3],
    pub rows: Vec<ReportRow>,
}

impl SummaryTable {
    fn from_returns(
        returns: &WindowReturns,
        names: &DisplayNames,
        config: &ReportConfig,
    ) -> Self {
        let window = returns.window;
        let mut rows: Vec<ReportRow> = config
            .constituents
            .iter()
            .map(|symbol| ReportRow {
                symbol: symbol.clone(),
                display_name: names.get(symbol).cloned().unwrap_or_else(|| symbol.clone()),
                role: RowRole::Constituent,
                annualized_return: returns.constituent(symbol),
            })
            .collect();

        rows.push(ReportRow {
            symbol: config.benchmark.clone(),
            display_name: config.benchmark_name.clone(),
            role: RowRole::Index,
            annualized_return: returns.benchmark,
        });

        Self {
            title: format!("Performance Summary {}", window.year),
            headers: [
                "Ticker".to_string(),
                "Company Name".to_string(),
                format!("Return ({} to {})", window.start, window.end),
            ],
            rows,
        }
    }
}

/// Everything the window draws, computed up front.
#[derive(Debug, Clone)]
pub struct Report {
    pub as_of: NaiveDate,
    pub years: Vec<YearPanel>,
    pub trend: TrendPanel,
    pub summary: SummaryTable,
    pub layout: GridLayout,
}

impl Report {
    pub fn build(
        table: &PriceTable,
        names: &DisplayNames,
        config: &ReportConfig,
        as_of: NaiveDate,
    ) -> Self {
        let benchmark_label = config.benchmark_label();
        let window_returns: Vec<WindowReturns> = year_windows(config.start, as_of)
            .into_iter()
            .map(|w| WindowReturns::compute(table, w, config))
            .collect();

        let years: Vec<YearPanel> = window_returns
            .iter()
            .map(|r| YearPanel::from_returns(r, benchmark_label))
            .collect();

        let trend = TrendPanel {
            title: format!("Portfolio vs {} Performance Over Time", benchmark_label),
            portfolio_label: "Portfolio Average".to_string(),
            benchmark_label: benchmark_label.to_string(),
            points: window_returns
                .iter()
                .map(|r| TrendPoint {
                    year: r.window.year,
                    portfolio: r.constituent_average,
                    benchmark: r.benchmark,
                })
                .collect(),
        };

        // The last window is the current year, already cut at `as_of`
        let summary = match window_returns.last() {
            Some(current) => SummaryTable::from_returns(current, names, config),
            None => {
                let empty = WindowReturns::compute(
                    table,
                    YearWindow {
                        year: as_of.year(),
                        start: as_of,
                        end: as_of,
                    },
                    config,
                );
                SummaryTable::from_returns(&empty, names, config)
            }
        };

        let layout = GridLayout::new(years.len(), GRID_ROWS);
        tracing::info!(
            "Report built: {} panels on a {}x{} grid",
            layout.visible_count(),
            layout.rows,
            layout.cols
        );

        Self {
            as_of,
            years,
            trend,
            summary,
            layout,
        }
    }
}
