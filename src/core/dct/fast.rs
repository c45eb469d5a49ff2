//! Fixed-size DCT-II using Byeong Gi Lee's radix-2 butterfly.
//!
//! A length-`M` transform folds its input into an even half
//! `x[i] + x[M-1-i]` and an odd half `(x[i] - x[M-1-i]) / c_M[i]` with
//! `c_M[i] = 2 cos(pi (i + 0.5) / M)`, transforms both halves, and
//! interleaves them back. The recursion bottoms out in a hand-written
//! length-4 kernel, so the depth is at most four levels (64 -> 32 -> 16 ->
//! 8 -> 4) and every level can be exercised on its own through
//! [`forward_dct`].
//!
//! The output uses the same unscaled convention as
//! [`dct_1d`](super::dct_1d): `X[k] = sum x[i] cos(pi/N (i + 0.5) k)`.

use crate::core::matrix::{FrequencyMatrix, Matrix};
use crate::error::DctError;
use std::f64::consts::{PI, SQRT_2};
use std::sync::OnceLock;

/// Largest supported transform length
pub const MAX_FIXED_SIZE: usize = 64;

/// Transform lengths with a butterfly implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSize {
    N4,
    N8,
    N16,
    N32,
    N64,
}

impl FixedSize {
    pub const ALL: [FixedSize; 5] = [
        FixedSize::N4,
        FixedSize::N8,
        FixedSize::N16,
        FixedSize::N32,
        FixedSize::N64,
    ];

    /// Transform length
    pub fn len(self) -> usize {
        4 << self.level()
    }

    /// The size one butterfly level down, `None` for the base case
    pub fn half(self) -> Option<FixedSize> {
        match self {
            FixedSize::N4 => None,
            FixedSize::N8 => Some(FixedSize::N4),
            FixedSize::N16 => Some(FixedSize::N8),
            FixedSize::N32 => Some(FixedSize::N16),
            FixedSize::N64 => Some(FixedSize::N32),
        }
    }

    fn level(self) -> usize {
        match self {
            FixedSize::N4 => 0,
            FixedSize::N8 => 1,
            FixedSize::N16 => 2,
            FixedSize::N32 => 3,
            FixedSize::N64 => 4,
        }
    }
}

impl TryFrom<usize> for FixedSize {
    type Error = DctError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            4 => Ok(FixedSize::N4),
            8 => Ok(FixedSize::N8),
            16 => Ok(FixedSize::N16),
            32 => Ok(FixedSize::N32),
            64 => Ok(FixedSize::N64),
            _ => Err(DctError::InvalidFixedSize { size }),
        }
    }
}

/// `c_M[i]` for every supported `M`, indexed by [`FixedSize::level`]
struct ButterflyTables {
    levels: [Vec<f64>; 5],
}

impl ButterflyTables {
    fn compute() -> Self {
        let level = |size: FixedSize| {
            let m = size.len();
            (0..m / 2)
                .map(|i| 2.0 * (PI * (i as f64 + 0.5) / m as f64).cos())
                .collect::<Vec<_>>()
        };
        Self {
            levels: FixedSize::ALL.map(level),
        }
    }
}

fn tables() -> &'static ButterflyTables {
    static TABLES: OnceLock<ButterflyTables> = OnceLock::new();
    TABLES.get_or_init(ButterflyTables::compute)
}

/// Precomputed butterfly divisors `c_M[0..M/2]` for one level
pub fn butterfly_divisors(size: FixedSize) -> &'static [f64] {
    &tables().levels[size.level()]
}

/// In-place unscaled DCT-II of a slice whose length is a supported fixed size.
pub fn forward_dct(values: &mut [f64]) -> Result<(), DctError> {
    let size = FixedSize::try_from(values.len())?;
    forward(values, size);
    Ok(())
}

fn forward(values: &mut [f64], size: FixedSize) {
    let Some(half_size) = size.half() else {
        forward4(values);
        return;
    };

    let n = size.len();
    let half = n / 2;
    let divisors = butterfly_divisors(size);

    let mut temp = [0.0f64; MAX_FIXED_SIZE];
    let temp = &mut temp[..n];
    for i in 0..half {
        let (x, y) = (values[i], values[n - 1 - i]);
        temp[i] = x + y;
        temp[half + i] = (x - y) / divisors[i];
    }

    let (even, odd) = temp.split_at_mut(half);
    forward(even, half_size);
    forward(odd, half_size);

    for i in 0..half - 1 {
        values[2 * i] = even[i];
        values[2 * i + 1] = odd[i] + odd[i + 1];
    }
    values[n - 2] = even[half - 1];
    values[n - 1] = odd[half - 1];
}

fn forward4(values: &mut [f64]) {
    let divisors = butterfly_divisors(FixedSize::N4);
    let (x0, x1, x2, x3) = (values[0], values[1], values[2], values[3]);

    let (e0, e1) = butterfly2(x0 + x3, x1 + x2);
    let (o0, o1) = butterfly2((x0 - x3) / divisors[0], (x1 - x2) / divisors[1]);

    values[0] = e0;
    values[1] = o0 + o1;
    values[2] = e1;
    values[3] = o1;
}

/// Length-2 transform; the odd divisor is `2 cos(pi/4) = sqrt(2)`
fn butterfly2(a: f64, b: f64) -> (f64, f64) {
    (a + b, (a - b) / SQRT_2)
}

/// Full 2D transform of a matrix whose row and column counts are both
/// supported fixed sizes. Runs on the calling thread.
pub fn dct_2d_fixed(matrix: &Matrix<f64>) -> Result<FrequencyMatrix, DctError> {
    let (rows, cols) = matrix.shape();
    let row_size = FixedSize::try_from(cols)?;
    let col_size = FixedSize::try_from(rows)?;
    transform_fixed(matrix, row_size, col_size, rows, cols)
}

/// Top-left `block x block` corner of [`dct_2d_fixed`], computed without
/// transforming the columns that are discarded.
pub fn dct_2d_low_freq_fixed(
    matrix: &Matrix<f64>,
    block: usize,
) -> Result<FrequencyMatrix, DctError> {
    let (rows, cols) = matrix.shape();
    let row_size = FixedSize::try_from(cols)?;
    let col_size = FixedSize::try_from(rows)?;
    if block > rows || block > cols {
        return Err(DctError::BlockTooLarge { block, rows, cols });
    }
    transform_fixed(matrix, row_size, col_size, block, block)
}

/// Transforms every row, then the first `keep_cols` columns, keeping the
/// first `keep_rows` coefficients of each.
fn transform_fixed(
    matrix: &Matrix<f64>,
    row_size: FixedSize,
    col_size: FixedSize,
    keep_rows: usize,
    keep_cols: usize,
) -> Result<FrequencyMatrix, DctError> {
    let cols = row_size.len();
    let rows = col_size.len();

    let mut transformed = matrix.as_slice().to_vec();
    for row in transformed.chunks_exact_mut(cols) {
        forward(row, row_size);
    }

    let mut column = [0.0f64; MAX_FIXED_SIZE];
    let column = &mut column[..rows];
    let mut output = vec![0.0f64; keep_rows * keep_cols];
    for col in 0..keep_cols {
        for (r, value) in column.iter_mut().enumerate() {
            *value = transformed[r * cols + col];
        }
        forward(column, col_size);
        for r in 0..keep_rows {
            output[r * keep_cols + col] = column[r];
        }
    }

    Matrix::from_vec(keep_rows, keep_cols, output)
}
