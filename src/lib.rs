//! Patch masks for video masked-autoencoder pretraining.
//!
//! ```no_run
//! use candle_mae_mask::masking::{MaskGenerator, TubeMaskingGenerator};
//!
//! let gen = TubeMaskingGenerator::new((8, 14, 14), 0.9);
//! let mask = gen.generate()?;
//! assert_eq!(mask.len(), 8 * 14 * 14);
//! # Ok::<(), candle_mae_mask::MaskError>(())
//! ```
pub mod config;
pub mod masking;
pub mod utils;

mod error;
pub use error::{MaskError, Result};
