use crate::models::{BlockId, Grid};

/// Sections are always laid out on a 12 column grid
pub const GRID_COLUMNS: usize = 12;

/// Name used for a grid cell that no block occupies
pub const EMPTY_CELL: &str = ".";

/// Layout descriptor of a section, independent of any CSS engine.
///
/// Placement is by name: a block lands wherever its id appears in the
/// rows, whatever its position in the section's `children`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridTemplate {
    rows: Vec<Vec<String>>,
}

/// 1-based, end-exclusive grid lines, as CSS numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl GridPlacement {
    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }
}

impl GridTemplate {
    pub fn from_layout(section: &BlockId, layout: &Grid) -> Self {
        for (index, row) in layout.iter().enumerate() {
            if row.len() != GRID_COLUMNS {
                log::warn!(
                    "section `{section}` row {index} has {} cells, expected {GRID_COLUMNS}",
                    row.len()
                );
            }
        }
        Self {
            rows: layout
                .iter()
                .map(|row| row.iter().map(|id| id.as_str().to_string()).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Value for CSS `grid-template-areas`: every row quoted, rows joined
    /// by spaces
    pub fn template_areas(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("\"{}\"", row.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value for CSS `grid-template-columns`
    pub fn template_columns(&self) -> String {
        format!("repeat({GRID_COLUMNS}, 1fr)")
    }

    /// Bounding box of every cell named `id`
    pub fn placement(&self, id: &BlockId) -> Option<GridPlacement> {
        let mut found: Option<GridPlacement> = None;
        for (row, cells) in self.rows.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                if cell.as_str() != id.as_str() {
                    continue;
                }
                let cell_box = GridPlacement {
                    row_start: row + 1,
                    row_end: row + 2,
                    column_start: column + 1,
                    column_end: column + 2,
                };
                found = Some(match found {
                    None => cell_box,
                    Some(acc) => GridPlacement {
                        row_start: acc.row_start.min(cell_box.row_start),
                        row_end: acc.row_end.max(cell_box.row_end),
                        column_start: acc.column_start.min(cell_box.column_start),
                        column_end: acc.column_end.max(cell_box.column_end),
                    },
                });
            }
        }
        found
    }

    /// Replace every cell for which `keep` is false with the empty cell
    pub fn retain_cells(&mut self, mut keep: impl FnMut(&str) -> bool) {
        for cell in self.rows.iter_mut().flatten() {
            if cell.as_str() != EMPTY_CELL && !keep(cell) {
                *cell = EMPTY_CELL.to_string();
            }
        }
    }
}
