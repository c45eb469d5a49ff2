//! # imghash CLI
//!
//! Command-line interface for perceptual image hashing.
//!
//! ## Usage
//! ```bash
//! imghash hash ~/Photos --algorithm perceptual --output json
//! imghash compare a.jpg b.jpg --threshold 8
//! imghash all photo.png
//! ```

mod cli;

use image_fingerprint::Result;

fn main() -> Result<()> {
    image_fingerprint::init_tracing();
    cli::run()
}
