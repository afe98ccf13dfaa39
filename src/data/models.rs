use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Price field of a daily bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceField {
    AdjClose,
    Close,
}

impl PriceField {
    pub fn label(&self) -> &'static str {
        match self {
            PriceField::AdjClose => "Adj Close",
            PriceField::Close => "Close",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single daily bar for a given date. Either price may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
}

impl DailyBar {
    fn price(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::AdjClose => self.adj_close,
            PriceField::Close => self.close,
        }
    }
}

/// Daily history of a single symbol as returned by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolHistory {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
}

/// Raw download: one column per (field, symbol) over the union of dates.
#[derive(Debug, Clone, Default)]
pub struct PriceFrame {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<(PriceField, String), Vec<Option<f64>>>,
}

impl PriceFrame {
    /// Align histories on the ascending union of their dates. A field gets a
    /// column for a symbol only if at least one bar carries it.
    pub fn from_histories(histories: &[SymbolHistory]) -> Self {
        let dates: Vec<NaiveDate> = histories
            .iter()
            .flat_map(|h| h.bars.iter().map(|b| b.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut columns = BTreeMap::new();
        for history in histories {
            let by_date: BTreeMap<NaiveDate, &DailyBar> =
                history.bars.iter().map(|b| (b.date, b)).collect();

            for field in [PriceField::AdjClose, PriceField::Close] {
                let values: Vec<Option<f64>> = dates
                    .iter()
                    .map(|d| by_date.get(d).and_then(|b| b.price(field)))
                    .collect();
                if values.iter().any(Option::is_some) {
                    columns.insert((field, history.symbol.clone()), values);
                }
            }
        }

        Self { dates, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn has_field(&self, field: PriceField) -> bool {
        self.columns.keys().any(|(f, _)| *f == field)
    }

    /// Column labels such as `(Adj Close, GOOG)`, for diagnostics.
    pub fn column_labels(&self) -> Vec<String> {
        self.columns
            .keys()
            .map(|(field, symbol)| format!("({}, {})", field, symbol))
            .collect()
    }

    /// Adjusted close when the download has it, plain close otherwise.
    pub fn price_field(&self) -> Result<PriceField, ReportError> {
        if self.is_empty() {
            return Err(ReportError::FetchEmpty);
        }
        [PriceField::AdjClose, PriceField::Close]
            .into_iter()
            .find(|f| self.has_field(*f))
            .ok_or_else(|| ReportError::MissingPriceField {
                available: self.column_labels(),
            })
    }

    /// Single-field table of the preferred price field.
    pub fn price_table(&self) -> Result<PriceTable, ReportError> {
        let field = self.price_field()?;
        let columns = self
            .columns
            .iter()
            .filter(|((f, _), _)| *f == field)
            .map(|((_, symbol), values)| (symbol.clone(), values.clone()))
            .collect();

        Ok(PriceTable {
            field,
            dates: self.dates.clone(),
            columns,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<((PriceField, &str), Vec<Option<f64>>)>,
    ) -> Self {
        Self {
            dates,
            columns: columns
                .into_iter()
                .map(|((field, symbol), values)| ((field, symbol.to_string()), values))
                .collect(),
        }
    }
}

/// Prices of one field: row = date, column = symbol.
#[derive(Debug, Clone)]
pub struct PriceTable {
    pub field: PriceField,
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    #[cfg(test)]
    pub fn contains(&self, symbol: &str) -> bool {
        self.columns.contains_key(symbol)
    }

    /// Observed prices of `symbol` with `start <= date <= end`, oldest first.
    /// Missing trading days are skipped, not filled.
    pub fn window(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<f64> {
        let Some(values) = self.columns.get(symbol) else {
            return vec![];
        };
        self.dates
            .iter()
            .zip(values)
            .filter(|(d, _)| **d >= start && **d <= end)
            .filter_map(|(_, v)| *v)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(d: NaiveDate, close: f64, adj: Option<f64>) -> DailyBar {
        DailyBar {
            date: d,
            close: Some(close),
            adj_close: adj,
        }
    }

    #[test]
    fn test_frame_aligns_on_union_of_dates() {
        let histories = vec![
            SymbolHistory {
                symbol: "A".into(),
                bars: vec![bar(date(2020, 1, 2), 10.0, None), bar(date(2020, 1, 3), 11.0, None)],
            },
            SymbolHistory {
                symbol: "B".into(),
                bars: vec![bar(date(2020, 1, 3), 20.0, None), bar(date(2020, 1, 6), 21.0, None)],
            },
        ];
        let frame = PriceFrame::from_histories(&histories);
        assert_eq!(frame.len(), 3);
        assert!(!frame.has_field(PriceField::AdjClose));

        let table = frame.price_table().unwrap();
        assert_eq!(table.field, PriceField::Close);
        assert_eq!(table.columns["A"], vec![Some(10.0), Some(11.0), None]);
        assert_eq!(table.columns["B"], vec![None, Some(20.0), Some(21.0)]);
    }

    #[test]
    fn test_adjusted_close_preferred() {
        let histories = vec![SymbolHistory {
            symbol: "A".into(),
            bars: vec![bar(date(2020, 1, 2), 10.0, Some(9.5))],
        }];
        let frame = PriceFrame::from_histories(&histories);
        let table = frame.price_table().unwrap();
        assert_eq!(table.field, PriceField::AdjClose);
        assert_eq!(table.columns["A"], vec![Some(9.5)]);
        assert_eq!(frame.column_labels(), vec!["(Adj Close, A)", "(Close, A)"]);
    }

    #[test]
    fn test_empty_frame_is_fetch_empty() {
        let frame = PriceFrame::default();
        assert!(matches!(frame.price_table(), Err(ReportError::FetchEmpty)));
    }

    #[test]
    fn test_missing_both_fields() {
        let histories = vec![SymbolHistory {
            symbol: "A".into(),
            bars: vec![DailyBar {
                date: date(2020, 1, 2),
                close: None,
                adj_close: None,
            }],
        }];
        let frame = PriceFrame::from_histories(&histories);
        assert!(!frame.is_empty());
        match frame.price_table() {
            Err(ReportError::MissingPriceField { available }) => assert!(available.is_empty()),
            other => panic!("expected MissingPriceField, got {:?}", other.map(|t| t.field)),
        }
    }

    #[test]
    fn test_window_is_inclusive_and_skips_gaps() {
        let frame = PriceFrame::from_columns(
            vec![date(2020, 12, 31), date(2021, 1, 4), date(2021, 1, 5), date(2021, 1, 6)],
            vec![((PriceField::Close, "A"), vec![Some(1.0), Some(2.0), None, Some(4.0)])],
        );
        let table = frame.price_table().unwrap();
        assert_eq!(
            table.window("A", date(2021, 1, 1), date(2021, 1, 6)),
            vec![2.0, 4.0]
        );
        assert!(table.window("missing", date(2021, 1, 1), date(2021, 1, 6)).is_empty());
    }
}
