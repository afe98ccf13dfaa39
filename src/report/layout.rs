/// What a grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Bar chart for the year bucket at this index
    Year(usize),
    Trend,
    Summary,
    Hidden,
}

impl Panel {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Panel::Hidden)
    }
}

/// Smallest column count with `rows * cols >= panels`.
pub fn grid_columns(panels: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    panels.div_ceil(rows).max(1)
}

/// Row-major panel grid: year charts, then the trend chart, then the summary
/// table. Cells past the summary are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Panel>,
}

impl GridLayout {
    pub fn new(years: usize, rows: usize) -> Self {
        let rows = rows.max(1);
        let cols = grid_columns(years + 2, rows);

        let cells = (0..rows * cols)
            .map(|idx| match idx {
                i if i < years => Panel::Year(i),
                i if i == years => Panel::Trend,
                i if i == years + 1 => Panel::Summary,
                _ => Panel::Hidden,
            })
            .collect();

        Self { rows, cols, cells }
    }

    /// Cells of one grid row, left to right.
    pub fn row(&self, row: usize) -> &[Panel] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visible()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_minimal() {
        for years in 0..20 {
            let cols = grid_columns(years + 2, 3);
            assert!(3 * cols >= years + 2, "years={} cols={}", years, cols);
            assert!(cols == 1 || 3 * (cols - 1) < years + 2, "years={} cols={}", years, cols);
        }
        assert_eq!(grid_columns(7, 3), 3);
        assert_eq!(grid_columns(9, 3), 3);
        assert_eq!(grid_columns(10, 3), 4);
    }

    #[test]
    fn test_panel_order_row_major() {
        // 2020..=2024: five year charts, trend, summary, two hidden cells
        let layout = GridLayout::new(5, 3);
        assert_eq!((layout.rows, layout.cols), (3, 3));
        assert_eq!(layout.row(0), &[Panel::Year(0), Panel::Year(1), Panel::Year(2)]);
        assert_eq!(layout.row(1), &[Panel::Year(3), Panel::Year(4), Panel::Trend]);
        assert_eq!(layout.row(2), &[Panel::Summary, Panel::Hidden, Panel::Hidden]);
        assert_eq!(layout.visible_count(), 7);
    }

    #[test]
    fn test_cells_past_summary_are_hidden() {
        for years in 1..15 {
            let layout = GridLayout::new(years, 3);
            assert_eq!(layout.cells.len(), layout.rows * layout.cols);
            for (idx, cell) in layout.cells.iter().enumerate() {
                assert_eq!(cell.is_visible(), idx <= years + 1, "years={} idx={}", years, idx);
            }
        }
    }

    #[test]
    fn test_exact_fit_has_no_hidden_cells() {
        let layout = GridLayout::new(7, 3);
        assert_eq!(layout.cols, 3);
        assert_eq!(layout.visible_count(), 9);
        assert_eq!(layout.cells[8], Panel::Summary);
    }
}
