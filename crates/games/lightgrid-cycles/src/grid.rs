use serde::{Deserialize, Serialize};

/// A `(row, col)` cell address.
pub type Cell = (usize, usize);

/// Fixed-size trail occupancy table, stored row-major in one flat vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    blocked: Vec<bool>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            blocked: vec![false; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether a signed cell address lies on the board.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.columns
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// Out-of-range cells read as unblocked; bounds are the caller's concern.
    pub fn is_blocked(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.blocked[i])
    }

    /// Mark a cell as trail for the rest of the round. Idempotent.
    pub fn block(&mut self, row: usize, col: usize) {
        match self.index(row, col) {
            Some(i) => self.blocked[i] = true,
            None => tracing::warn!(row, col, "Ignored block() outside the grid"),
        }
    }

    /// Unblock every cell. Only called at round reset.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Blocked cells in row-major order.
    pub fn blocked_cells(&self) -> Vec<Cell> {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| (i / self.columns, i % self.columns))
            .collect()
    }
}
