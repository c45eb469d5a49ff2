//! Hash algorithm implementations.
//!
//! Each module pairs a pure bit assembler over a normalized grid with a
//! hasher that drives normalization.

mod average;
mod difference;
mod perceptual;

pub use average::{average_bits, AverageHasher};
pub use difference::{horizontal_bits, vertical_bits, DifferenceHasher, Direction};
pub use perceptual::{perceptual_bits, PerceptualHasher};
