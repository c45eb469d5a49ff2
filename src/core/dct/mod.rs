//! # DCT Module
//!
//! Unscaled type-II discrete cosine transform used by the perceptual hash.
//!
//! `X[k] = sum_{i<N} x[i] * cos(pi/N * (i + 0.5) * k)`
//!
//! No orthonormal scaling is applied. The perceptual hash thresholds
//! against a median, which is scale invariant, so both the general path
//! here and the butterfly path in [`fast`] keep the same raw convention.
//!
//! ## Paths
//! - [`dct_2d`] / [`dct_2d_low_freq`]: O(N^2) per row or column, any shape,
//!   rows and columns dispatched in parallel on the rayon pool
//! - [`fast::dct_2d_fixed`] / [`fast::dct_2d_low_freq_fixed`]: O(N log N),
//!   sides of 4, 8, 16, 32 or 64 only, single-threaded
//! - [`low_frequency_block`]: picks the fast path whenever the shape allows

pub mod fast;
pub mod pool;

pub use fast::{dct_2d_fixed, dct_2d_low_freq_fixed, forward_dct, FixedSize};

use crate::core::matrix::{FrequencyMatrix, Matrix};
use crate::error::DctError;
use rayon::prelude::*;
use std::f64::consts::PI;

/// 1D DCT-II of `input`
pub fn dct_1d(input: &[f64]) -> Vec<f64> {
    let mut output = vec![0.0; input.len()];
    dct_1d_into(input, &mut output);
    output
}

/// Writes the first `output.len()` coefficients of the DCT-II of `input`.
fn dct_1d_into(input: &[f64], output: &mut [f64]) {
    let factor = PI / input.len() as f64;
    for (k, out) in output.iter_mut().enumerate() {
        *out = input
            .iter()
            .enumerate()
            .map(|(i, &x)| x * (factor * (i as f64 + 0.5) * k as f64).cos())
            .sum();
    }
}

/// 2D DCT-II: every row, then every column of the row result.
pub fn dct_2d(matrix: &Matrix<f64>) -> FrequencyMatrix {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return matrix.clone();
    }

    let transformed = row_pass(matrix);
    let by_column = column_pass(&transformed, rows, cols, cols, rows);
    Matrix::from_fn(rows, cols, |r, c| by_column[c * rows + r])
}

/// Top-left `block x block` corner of [`dct_2d`].
///
/// All rows are transformed, but only the first `block` columns go through
/// the column pass and only their first `block` coefficients are computed.
pub fn dct_2d_low_freq(matrix: &Matrix<f64>, block: usize) -> Result<FrequencyMatrix, DctError> {
    let (rows, cols) = matrix.shape();
    if block > rows || block > cols {
        return Err(DctError::BlockTooLarge { block, rows, cols });
    }
    if block == 0 {
        return Matrix::from_vec(0, 0, Vec::new());
    }

    let transformed = row_pass(matrix);
    let by_column = column_pass(&transformed, rows, cols, block, block);
    Ok(Matrix::from_fn(block, block, |r, c| by_column[c * block + r]))
}

/// Low-frequency block through the fastest path available for the shape.
pub fn low_frequency_block(
    matrix: &Matrix<f64>,
    block: usize,
) -> Result<FrequencyMatrix, DctError> {
    let (rows, cols) = matrix.shape();
    if FixedSize::try_from(rows).is_ok() && FixedSize::try_from(cols).is_ok() {
        tracing::trace!(rows, cols, block, "fixed-size DCT");
        dct_2d_low_freq_fixed(matrix, block)
    } else {
        tracing::trace!(rows, cols, block, "general DCT");
        dct_2d_low_freq(matrix, block)
    }
}

/// One task per row; rows write disjoint output chunks.
fn row_pass(matrix: &Matrix<f64>) -> Vec<f64> {
    let cols = matrix.cols();
    let mut transformed = vec![0.0; matrix.as_slice().len()];
    transformed
        .par_chunks_mut(cols)
        .zip(matrix.as_slice().par_chunks(cols))
        .for_each(|(out, row)| dct_1d_into(row, out));
    transformed
}

/// One task per column over the finished row pass (the row pass returning
/// is the barrier). Returns column-major data: `columns` runs of `keep`
/// coefficients.
fn column_pass(
    transformed: &[f64],
    rows: usize,
    cols: usize,
    columns: usize,
    keep: usize,
) -> Vec<f64> {
    let scratch = pool::shared();
    let mut by_column = vec![0.0; columns * keep];
    by_column
        .par_chunks_mut(keep)
        .enumerate()
        .for_each(|(col, out)| {
            let mut column = scratch.borrow(rows);
            for (r, value) in column.iter_mut().enumerate() {
                *value = transformed[r * cols + col];
            }
            dct_1d_into(&column, out);
        });
    by_column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn dct_1d_of_constant_is_dc_only() {
        let output = dct_1d(&[1.0, 1.0, 1.0, 1.0]);
        assert_close(&output, &[4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn dct_1d_matches_definition() {
        let input = [1.0, 2.0, 3.0];
        let output = dct_1d(&input);

        // k = 1: cos(pi/6), cos(pi/2), cos(5pi/6)
        let c = (PI / 6.0).cos();
        let expected_k1 = 1.0 * c + 2.0 * 0.0 - 3.0 * c;
        assert!((output[0] - 6.0).abs() < 1e-12);
        assert!((output[1] - expected_k1).abs() < 1e-12);
    }

    #[test]
    fn dct_2d_dc_term_is_sum() {
        let matrix = Matrix::from_fn(5, 7, |r, c| (r * 7 + c) as f64);
        let result = dct_2d(&matrix);
        let sum: f64 = matrix.as_slice().iter().sum();
        assert_eq!(result.shape(), (5, 7));
        assert!((result.get(0, 0) - sum).abs() < 1e-9);
    }

    #[test]
    fn dct_2d_is_rows_then_columns() {
        let matrix = Matrix::from_fn(3, 4, |r, c| ((r + 1) * (c + 2)) as f64);
        let result = dct_2d(&matrix);

        let rows: Vec<Vec<f64>> = (0..3).map(|r| dct_1d(matrix.row(r))).collect();
        for c in 0..4 {
            let column: Vec<f64> = rows.iter().map(|row| row[c]).collect();
            let expected = dct_1d(&column);
            for r in 0..3 {
                assert!((result.get(r, c) - expected[r]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn dct_2d_of_empty_matrix_is_empty() {
        let matrix: Matrix<f64> = Matrix::from_vec(0, 0, Vec::new()).unwrap();
        assert_eq!(dct_2d(&matrix).shape(), (0, 0));
    }

    #[test]
    fn low_freq_equals_top_left_of_full() {
        let matrix = Matrix::from_fn(12, 10, |r, c| ((r * 31 + c * 17) % 256) as f64);
        let full = dct_2d(&matrix);
        let low = dct_2d_low_freq(&matrix, 6).unwrap();
        assert_close(low.as_slice(), full.top_left(6, 6).unwrap().as_slice());
    }

    #[test]
    fn low_freq_rejects_oversized_block() {
        let matrix = Matrix::from_fn(4, 6, |_, _| 0.0);
        assert_eq!(
            dct_2d_low_freq(&matrix, 5),
            Err(DctError::BlockTooLarge {
                block: 5,
                rows: 4,
                cols: 6
            })
        );
    }

    #[test]
    fn dispatch_agrees_across_paths() {
        let matrix = Matrix::from_fn(32, 32, |r, c| ((r * 13 + c * 29) % 256) as f64);
        let dispatched = low_frequency_block(&matrix, 8).unwrap();
        let general = dct_2d_low_freq(&matrix, 8).unwrap();
        for (a, b) in dispatched.as_slice().iter().zip(general.as_slice()) {
            assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
        }
    }

    #[test]
    fn dispatch_falls_back_for_unsupported_sizes() {
        let matrix = Matrix::from_fn(24, 24, |r, c| (r + c) as f64);
        let block = low_frequency_block(&matrix, 8).unwrap();
        assert_eq!(block.shape(), (8, 8));
    }
}
