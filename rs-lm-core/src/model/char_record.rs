use std::fmt;

use serde::Serialize;

/// One character observed after a given context.
///
/// `count` is accumulated during training. `probability` and
/// `cumulative_probability` stay at `0.0` until the owning table is
/// finalized, and are written once by that pass.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharRecord {
	/// The observed character.
	character: char,
	/// How many times `character` followed the context.
	count: usize,
	/// `count / total` of the owning table.
	probability: f64,
	/// Running sum of `probability` up to and including this record.
	cumulative_probability: f64,
}

impl CharRecord {
	/// Creates a record for a first observation of `character`.
	pub fn new(character: char) -> Self {
		Self {
			character,
			count: 1,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	/// The observed character.
	pub fn character(&self) -> char {
		self.character
	}

	/// Number of observations.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Share of the table total, `0.0` before finalization.
	pub fn probability(&self) -> f64 {
		self.probability
	}

	/// Running probability sum, `0.0` before finalization.
	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}

	/// Returns `true` if this record holds `character`.
	pub fn matches(&self, character: char) -> bool {
		self.character == character
	}

	/// Records one more occurrence.
	pub fn increment(&mut self) {
		self.count += 1;
	}

	/// Sets both derived probabilities.
	pub(crate) fn set_probabilities(&mut self, probability: f64, cumulative_probability: f64) {
		self.probability = probability;
		self.cumulative_probability = cumulative_probability;
	}
}

/// Renders as `(c count p cp)`.
impl fmt::Display for CharRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character.escape_debug(),
			self.count,
			self.probability,
			self.cumulative_probability
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_record_counts_one_observation() {
		let record = CharRecord::new('x');
		assert_eq!(record.character(), 'x');
		assert_eq!(record.count(), 1);
		assert_eq!(record.probability(), 0.0);
		assert_eq!(record.cumulative_probability(), 0.0);
	}

	#[test]
	fn increment_and_match() {
		let mut record = CharRecord::new('x');
		record.increment();
		record.increment();
		assert_eq!(record.count(), 3);
		assert!(record.matches('x'));
		assert!(!record.matches('y'));
	}

	#[test]
	fn display_escapes_control_characters() {
		let mut record = CharRecord::new('\n');
		record.set_probabilities(0.5, 1.0);
		assert_eq!(record.to_string(), "(\\n 1 0.5 1)");
	}
}
