//! Model configuration.

use crate::error::{LmError, Result};

/// Seed used by the `fixed` generation mode when none is given.
pub const DEFAULT_SEED: u64 = 20;

/// Parameters needed to build a [`LanguageModel`](crate::model::language_model::LanguageModel).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
	/// Number of characters in a context.
	pub window_length: usize,
	/// Seed of the model generator; `None` draws one from the operating system.
	pub seed: Option<u64>,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { window_length: 2, seed: Some(DEFAULT_SEED) }
	}
}

impl ModelConfig {
	/// Seeded configuration: generation is reproducible.
	pub fn fixed(window_length: usize, seed: u64) -> Self {
		Self { window_length, seed: Some(seed) }
	}

	/// Unseeded configuration: every model generates different text.
	pub fn random(window_length: usize) -> Self {
		Self { window_length, seed: None }
	}

	/// Validates the invariants required to build a model.
	pub fn validate(&self) -> Result<()> {
		if self.window_length == 0 {
			return Err(LmError::InvalidConfig("window_length must be greater than zero".into()));
		}
		Ok(())
	}
}
