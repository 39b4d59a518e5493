//! Symmetric link matrix.
//!
//! One matrix type serves two purposes: the substrate's residual bandwidth
//! (mutated across a whole deployment run) and the per-request flow matrix
//! (built once, subtracted once). A cell of 0 means "no link" for routing
//! purposes; every cell is kept ≥ 0 at all times.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::NodeId;

/// Errors constructing a link matrix from caller-supplied rows.
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("matrix is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("matrix is not symmetric at [{u}][{v}]: {forward} vs {backward}")]
    Asymmetric { u: usize, v: usize, forward: f64, backward: f64 },

    #[error("negative cell at [{u}][{v}]: {value}")]
    Negative { u: usize, v: usize, value: f64 },
}

/// A subtraction that would drive a residual cell below zero.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("link {from}-{to}: flow {requested} exceeds residual {available}")]
pub struct LinkUnderflow {
    pub from: NodeId,
    pub to: NodeId,
    pub available: f64,
    pub requested: f64,
}

/// Symmetric N×N matrix of link weights, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl LinkMatrix {
    /// All-zero matrix for `n` nodes.
    pub fn zeros(n: usize) -> Self {
        Self { n, cells: vec![0.0; n * n] }
    }

    /// Validate and adopt caller-supplied rows (square, symmetric, ≥ 0).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let n = rows.len();
        for (row, r) in rows.iter().enumerate() {
            if r.len() != n {
                return Err(MatrixError::NotSquare { row, len: r.len(), expected: n });
            }
        }
        for u in 0..n {
            for v in 0..n {
                let w = rows[u][v];
                if w < 0.0 {
                    return Err(MatrixError::Negative { u, v, value: w });
                }
                if w != rows[v][u] {
                    return Err(MatrixError::Asymmetric { u, v, forward: w, backward: rows[v][u] });
                }
            }
        }
        let cells = rows.iter().flatten().copied().collect();
        Ok(Self { n, cells })
    }

    /// Number of nodes this matrix spans.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, u: NodeId, v: NodeId) -> f64 {
        self.cells[u * self.n + v]
    }

    /// Set both triangles so the matrix stays symmetric.
    pub fn set(&mut self, u: NodeId, v: NodeId, w: f64) {
        self.cells[u * self.n + v] = w;
        self.cells[v * self.n + u] = w;
    }

    /// Accumulate `w` on the `u`-`v` link, both triangles.
    pub fn add(&mut self, u: NodeId, v: NodeId, w: f64) {
        self.cells[u * self.n + v] += w;
        if u != v {
            self.cells[v * self.n + u] += w;
        }
    }

    /// Neighbors of `u`: nodes joined by a positive-weight link, ascending.
    pub fn neighbors(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.n).filter(move |&v| v != u && self.get(u, v) > 0.0)
    }

    /// Smallest cell value, 0 for an empty matrix.
    pub fn min_cell(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// First cell that would go negative when subtracting `flow`, if any.
    pub fn underflow_after(&self, flow: &LinkMatrix) -> Option<LinkUnderflow> {
        for u in 0..self.n {
            for v in 0..self.n {
                let requested = flow.get(u, v);
                let available = self.get(u, v);
                if requested > available {
                    return Some(LinkUnderflow { from: u, to: v, available, requested });
                }
            }
        }
        None
    }

    /// Subtract `flow` cell-wise, refusing to drive any cell negative.
    pub fn try_subtract(&mut self, flow: &LinkMatrix) -> Result<(), LinkUnderflow> {
        if let Some(underflow) = self.underflow_after(flow) {
            return Err(underflow);
        }
        for (cell, used) in self.cells.iter_mut().zip(&flow.cells) {
            *cell -= used;
        }
        Ok(())
    }

    /// Sum of the upper triangle — total bandwidth represented once per link.
    pub fn total_weight(&self) -> f64 {
        let mut sum = 0.0;
        for u in 0..self.n {
            for v in u..self.n {
                sum += self.get(u, v);
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> LinkMatrix {
        LinkMatrix::from_rows(&[
            vec![0.0, 10.0, 0.0],
            vec![10.0, 0.0, 5.0],
            vec![0.0, 5.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = LinkMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NotSquare { row: 1, .. }));
    }

    #[test]
    fn from_rows_rejects_asymmetric() {
        let err =
            LinkMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::Asymmetric { .. }));
    }

    #[test]
    fn from_rows_rejects_negative() {
        let err =
            LinkMatrix::from_rows(&[vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::Negative { .. }));
    }

    #[test]
    fn add_keeps_symmetry() {
        let mut m = triangle();
        m.add(0, 2, 3.0);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(2, 0), 3.0);
    }

    #[test]
    fn neighbors_skip_zero_links() {
        let m = triangle();
        assert_eq!(m.neighbors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(m.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn try_subtract_refuses_underflow() {
        let mut m = triangle();
        let mut flow = LinkMatrix::zeros(3);
        flow.add(1, 2, 6.0); // only 5 available
        let err = m.try_subtract(&flow).unwrap_err();
        assert_eq!(err.available, 5.0);
        assert_eq!(err.requested, 6.0);
        // Nothing was subtracted on failure.
        assert_eq!(m.get(0, 1), 10.0);
    }

    #[test]
    fn try_subtract_applies_both_triangles() {
        let mut m = triangle();
        let mut flow = LinkMatrix::zeros(3);
        flow.add(0, 1, 4.0);
        m.try_subtract(&flow).unwrap();
        assert_eq!(m.get(0, 1), 6.0);
        assert_eq!(m.get(1, 0), 6.0);
    }

    #[test]
    fn total_weight_counts_each_link_once() {
        assert_eq!(triangle().total_weight(), 15.0);
    }
}
