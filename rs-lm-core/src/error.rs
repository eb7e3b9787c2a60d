//! Error type shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = LmError> = std::result::Result<T, E>;

/// Failures raised by model construction, training and table access.
///
/// Data-dependent outcomes (a corpus shorter than the window, a context with
/// no continuation during generation) are not errors: they produce an empty
/// model or a shorter generated text.
#[derive(Debug, Error)]
pub enum LmError {
	/// Model configuration failed validation.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// The corpus could not be opened or read.
	#[error("unreadable corpus {path:?}: {source}")]
	UnreadableCorpus {
		/// Path of the corpus file.
		path: PathBuf,
		/// Underlying IO error.
		source: std::io::Error,
	},

	/// Probabilities were computed on a table without any observation.
	#[error("cannot compute probabilities of an empty table")]
	EmptyTable,

	/// Indexed access outside `[0, len)`.
	#[error("index {index} is out of bounds for a table of {len} records")]
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Number of records in the table.
		len: usize,
	},

	/// The debug dump could not be rendered.
	#[error("serialization error: {0}")]
	Serialization(String),
}

impl From<serde_json::Error> for LmError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

impl LmError {
	/// Wraps an IO error raised while reading the corpus at `path`.
	pub fn unreadable<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::UnreadableCorpus { path: path.into(), source }
	}
}
