//! Row-major sample grids shared by the normalizer, the DCT engine and the
//! assemblers.

use crate::error::DctError;

/// A dense row-major grid of `rows x cols` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Grayscale luma samples in `[0, 255]` produced by a normalizer.
pub type PixelMatrix = Matrix<u8>;

/// Real DCT coefficients; `[0][0]` is the DC term.
pub type FrequencyMatrix = Matrix<f64>;

impl<T> Matrix<T> {
    /// Wrap a row-major buffer.
    ///
    /// Fails when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, DctError> {
        if data.len() != rows * cols {
            return Err(DctError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Borrow row `row` as a slice.
    ///
    /// ## Panics
    /// If `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> Matrix<T> {
    /// Value at `(row, col)`.
    ///
    /// ## Panics
    /// If either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Copy the top-left `rows x cols` corner.
    pub fn top_left(&self, rows: usize, cols: usize) -> Result<Self, DctError> {
        if rows > self.rows || cols > self.cols {
            return Err(DctError::BlockTooLarge {
                block: rows.max(cols),
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(Self::from_fn(rows, cols, |r, c| self.data[r * self.cols + c]))
    }
}

impl PixelMatrix {
    /// Widen luma samples to `f64` for the DCT engine.
    pub fn to_f64(&self) -> Matrix<f64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f64::from(v)).collect(),
        }
    }
}
