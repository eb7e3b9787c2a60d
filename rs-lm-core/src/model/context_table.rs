use std::fmt;

use serde::Serialize;

use super::char_record::CharRecord;
use crate::error::{LmError, Result};

/// Frequency table of the characters observed after one context.
///
/// Records are kept in a canonical order: the most recently *first-seen*
/// character comes first. This order drives the cumulative probabilities,
/// and therefore which character a given draw selects in [`sample`].
///
/// ## Invariants
/// - Records are unique by character
/// - Every record count is >= 1
///
/// [`sample`]: ContextTable::sample
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ContextTable {
	records: Vec<CharRecord>,
}

impl ContextTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct characters observed.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns `true` if nothing was observed.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Sum of all record counts.
	pub fn total_count(&self) -> usize {
		self.records.iter().map(CharRecord::count).sum()
	}

	/// Returns the first record in canonical order, if any.
	pub fn first(&self) -> Option<&CharRecord> {
		self.records.first()
	}

	/// Returns the position of `character`, if present.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.records.iter().position(|record| record.matches(character))
	}

	/// Returns the record holding `character`, if present.
	pub fn lookup(&self, character: char) -> Option<&CharRecord> {
		self.records.iter().find(|record| record.matches(character))
	}

	/// Returns the record at `index`.
	///
	/// # Errors
	/// Returns [`LmError::IndexOutOfRange`] if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharRecord> {
		self.records.get(index).ok_or(LmError::IndexOutOfRange { index, len: self.records.len() })
	}

	/// Records one occurrence of `character`.
	///
	/// - Known character: its count is increased.
	/// - New character: a record with a count of 1 is inserted at the front.
	pub fn update(&mut self, character: char) {
		match self.records.iter_mut().find(|record| record.matches(character)) {
			Some(record) => record.increment(),
			None => self.records.insert(0, CharRecord::new(character)),
		}
	}

	/// Removes the record holding `character`.
	///
	/// Returns `false` if no such record exists. The remaining records keep
	/// their probabilities; finalize again to renormalize.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => {
				self.records.remove(index);
				true
			}
			None => false,
		}
	}

	/// Computes `probability` and `cumulative_probability` for every record.
	///
	/// Two passes: the first sums the counts, the second walks the canonical
	/// order assigning `count / total` and the running sum.
	///
	/// # Errors
	/// Returns [`LmError::EmptyTable`] if the table holds no observation.
	pub fn finalize_probabilities(&mut self) -> Result<()> {
		let total = self.total_count();
		if total == 0 {
			return Err(LmError::EmptyTable);
		}

		let total = total as f64;
		let mut cumulative = 0.0;
		for record in &mut self.records {
			let probability = record.count() as f64 / total;
			cumulative += probability;
			record.set_probabilities(probability, cumulative);
		}
		Ok(())
	}

	/// Inverse-CDF sampling for a draw in `[0, 1)`.
	///
	/// Returns the first record, in canonical order, whose cumulative
	/// probability is strictly greater than `draw`. If rounding leaves no
	/// such record, the last record is returned.
	///
	/// Returns `None` only for an empty table.
	pub fn sample(&self, draw: f64) -> Option<char> {
		self.records
			.iter()
			.find(|record| draw < record.cumulative_probability())
			.or_else(|| self.records.last())
			.map(CharRecord::character)
	}

	/// Iterates over the records in canonical order.
	pub fn iter(&self) -> impl Iterator<Item = &CharRecord> {
		self.records.iter()
	}

	/// Iterates over the records starting at `index`.
	///
	/// Yields nothing if `index >= len()`.
	pub fn iter_from(&self, index: usize) -> impl Iterator<Item = &CharRecord> {
		self.records.iter().skip(index)
	}

	/// Copies the records out, in canonical order.
	pub fn to_vec(&self) -> Vec<CharRecord> {
		self.records.clone()
	}
}

/// Renders as `((c count p cp) (c count p cp) ...)`.
impl fmt::Display for ContextTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, record) in self.records.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{record}")?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPSILON: f64 = 1e-9;

	fn table_of(text: &str) -> ContextTable {
		let mut table = ContextTable::new();
		for c in text.chars() {
			table.update(c);
		}
		table
	}

	fn characters(table: &ContextTable) -> String {
		table.iter().map(CharRecord::character).collect()
	}

	#[test]
	fn update_prepends_new_characters() {
		let table = table_of("committee ");
		assert_eq!(characters(&table), " etimoc");
		assert_eq!(table.lookup('m').map(CharRecord::count), Some(2));
		assert_eq!(table.lookup('t').map(CharRecord::count), Some(2));
		assert_eq!(table.lookup('e').map(CharRecord::count), Some(2));
		assert_eq!(table.lookup('c').map(CharRecord::count), Some(1));
		assert_eq!(table.total_count(), 10);
	}

	#[test]
	fn repeat_observation_keeps_position() {
		let table = table_of("abab");
		assert_eq!(characters(&table), "ba");
		assert_eq!(table.get(0).map(CharRecord::count).ok(), Some(2));
	}

	#[test]
	fn get_out_of_range_fails() {
		let table = table_of("ab");
		assert!(table.get(1).is_ok());
		match table.get(2) {
			Err(LmError::IndexOutOfRange { index, len }) => {
				assert_eq!(index, 2);
				assert_eq!(len, 2);
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn remove_reports_presence() {
		let mut table = table_of("abc");
		assert!(table.remove('b'));
		assert!(!table.remove('b'));
		assert_eq!(characters(&table), "ca");
		assert_eq!(table.index_of('a'), Some(1));
		assert!(table.remove('c'));
		assert!(table.remove('a'));
		assert!(table.is_empty());
	}

	#[test]
	fn finalize_empty_table_fails() {
		let mut table = ContextTable::new();
		assert!(matches!(table.finalize_probabilities(), Err(LmError::EmptyTable)));
	}

	#[test]
	fn finalize_normalizes_probabilities() {
		let mut table = table_of("committee ");
		table.finalize_probabilities().unwrap();

		let sum: f64 = table.iter().map(CharRecord::probability).sum();
		assert!((sum - 1.0).abs() < EPSILON);

		let last = table.get(table.len() - 1).unwrap();
		assert!((last.cumulative_probability() - 1.0).abs() < EPSILON);

		let space = table.first().unwrap();
		assert_eq!(space.character(), ' ');
		assert!((space.probability() - 0.1).abs() < EPSILON);
		assert!((space.cumulative_probability() - 0.1).abs() < EPSILON);

		let e = table.get(1).unwrap();
		assert_eq!(e.character(), 'e');
		assert!((e.probability() - 0.2).abs() < EPSILON);
		assert!((e.cumulative_probability() - 0.3).abs() < EPSILON);
	}

	#[test]
	fn cumulative_probability_is_monotonic() {
		let mut table = table_of("the quick brown fox jumps over the lazy dog");
		table.finalize_probabilities().unwrap();
		let cps: Vec<f64> = table.iter().map(CharRecord::cumulative_probability).collect();
		assert!(cps.windows(2).all(|pair| pair[0] <= pair[1]));
	}

	#[test]
	fn sample_boundaries() {
		let mut table = table_of("abcc");
		table.finalize_probabilities().unwrap();
		// canonical order: c(2) b(1) a(1)
		assert_eq!(table.sample(0.0), Some('c'));
		assert_eq!(table.sample(0.49), Some('c'));
		assert_eq!(table.sample(0.5), Some('b'));
		assert_eq!(table.sample(0.74), Some('b'));
		assert_eq!(table.sample(0.75), Some('a'));
		assert_eq!(table.sample(1.0 - f64::EPSILON), Some('a'));
	}

	#[test]
	fn sample_falls_back_to_last_record_on_rounding() {
		let mut table = table_of("abcdefghij");
		table.finalize_probabilities().unwrap();
		// ten steps of 0.1 sum to just under 1.0
		let last = table.get(9).unwrap().cumulative_probability();
		assert!(last < 1.0);
		let largest_below_one = 1.0 - f64::EPSILON / 2.0;
		assert!(largest_below_one >= last);
		assert!(table.iter().all(|record| largest_below_one >= record.cumulative_probability()));
		assert_eq!(table.sample(largest_below_one), Some('a'));
	}

	#[test]
	fn sample_empty_table_is_none() {
		assert_eq!(ContextTable::new().sample(0.3), None);
	}

	#[test]
	fn iter_from_starts_at_index() {
		let table = table_of("abc");
		let tail: String = table.iter_from(1).map(CharRecord::character).collect();
		assert_eq!(tail, "ba");
		assert_eq!(table.iter_from(5).count(), 0);
		assert_eq!(table.to_vec().len(), 3);
	}

	#[test]
	fn display_lists_records_in_order() {
		let mut table = table_of("ab");
		table.finalize_probabilities().unwrap();
		assert_eq!(table.to_string(), "((b 1 0.5 0.5) (a 1 0.5 1))");
	}
}
