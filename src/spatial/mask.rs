use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt;

/// Bit-packed binary image in row-major order
///
/// Used for road candidates and corner points. Coordinates outside the grid
/// read as unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl Mask {
    /// Create a mask with no cells set
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a mask by evaluating `predicate(row, col)` for every cell
    pub fn from_fn(rows: usize, cols: usize, mut predicate: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if predicate(row, col) {
                    mask.set(row, col, true);
                }
            }
        }
        mask
    }

    /// Mark every pixel with intensity at or below `threshold`
    ///
    /// This is the inverted binary threshold: dark linework becomes set.
    pub fn at_or_below(gray: &Array2<u8>, threshold: u8) -> Self {
        let (rows, cols) = gray.dim();
        let mut mask = Self::new(rows, cols);
        for ((row, col), &level) in gray.indexed_iter() {
            if level <= threshold {
                mask.set(row, col, true);
            }
        }
        mask
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Grid dimensions (rows, cols)
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Test whether a cell is set
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Set or clear a cell, ignoring coordinates outside the grid
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.rows && col < self.cols {
            self.bits.set(row * self.cols + col, value);
        }
    }

    /// Count set cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cell is set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Erode with a `size`×`size` square element, `iterations` times
    ///
    /// A cell survives a pass when every in-grid cell of its window is set;
    /// neighbours beyond the border never erode it. The square element is
    /// separable, so each pass is a horizontal then a vertical run.
    #[must_use]
    pub fn eroded(&self, size: usize, iterations: usize) -> Self {
        let radius = size / 2;
        let mut current = self.clone();
        for _ in 0..iterations {
            let horizontal = Self::from_fn(self.rows, self.cols, |row, col| {
                let first = col.saturating_sub(radius);
                let last = (col + radius).min(self.cols.saturating_sub(1));
                (first..=last).all(|c| current.contains(row, c))
            });
            current = Self::from_fn(self.rows, self.cols, |row, col| {
                let first = row.saturating_sub(radius);
                let last = (row + radius).min(self.rows.saturating_sub(1));
                (first..=last).all(|r| horizontal.contains(r, col))
            });
        }
        current
    }

    /// Convert to a scalar field with 1.0 for set cells and 0.0 elsewhere
    pub fn to_field(&self) -> Array2<f32> {
        Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
            if self.contains(row, col) { 1.0 } else { 0.0 }
        })
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({}x{}, {} set)", self.rows, self.cols, self.count())
    }
}
