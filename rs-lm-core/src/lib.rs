//! Character-level n-gram language model.
//!
//! This crate learns, for every window of `n` characters found in a corpus,
//! which characters follow it and how often, then generates new text by
//! sampling from those frequencies.
//!
//! ```no_run
//! use rs_lm_core::model::language_model::LanguageModel;
//!
//! # fn main() -> rs_lm_core::Result<()> {
//! let mut model = LanguageModel::new(3, 20)?;
//! model.train_file("corpus.txt")?;
//! println!("{}", model.generate("The", 200));
//! # Ok(())
//! # }
//! ```

/// Frequency tables and the sliding-window model.
pub mod model;

/// Model configuration (window length, seed).
pub mod config;

/// Crate error type.
pub mod error;

/// Corpus loading.
///
/// Not exposed
pub(crate) mod io;

pub use config::ModelConfig;
pub use error::{LmError, Result};
