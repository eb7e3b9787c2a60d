use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::context_table::ContextTable;
use crate::config::ModelConfig;
use crate::error::{LmError, Result};
use crate::io;

/// Character-level sliding-window language model.
///
/// The model maps every context (a window of `window_length` characters seen
/// in the corpus) to the [`ContextTable`] of characters that followed it.
///
/// # Responsibilities
/// - Build the mapping from a character stream in a single forward pass
/// - Turn counts into cumulative distributions once training ends
/// - Extend a seed text by sampling from those distributions
///
/// # Invariants
/// - Every key holds exactly `window_length` characters
/// - Every table holds at least one observation
/// - The random generator belongs to this instance: two models built with the
///   same seed and fed the same calls produce the same text
#[derive(Debug)]
pub struct LanguageModel {
	/// Number of characters in a context (>= 1).
	window_length: usize,

	/// Mapping from a context to the characters that followed it.
	tables: HashMap<String, ContextTable>,

	/// Source of the uniform draws used when sampling.
	rng: StdRng,
}

impl LanguageModel {
	/// Creates a seeded model. Generation is reproducible for a given seed.
	///
	/// # Errors
	/// Returns an error if `window_length == 0`.
	pub fn new(window_length: usize, seed: u64) -> Result<Self> {
		Self::with_rng(window_length, StdRng::seed_from_u64(seed))
	}

	/// Creates a model seeded from the operating system.
	///
	/// # Errors
	/// Returns an error if `window_length == 0`.
	pub fn unseeded(window_length: usize) -> Result<Self> {
		Self::with_rng(window_length, StdRng::from_os_rng())
	}

	/// Creates a model from a validated configuration.
	///
	/// A configuration without a seed produces an unseeded model.
	pub fn from_config(config: &ModelConfig) -> Result<Self> {
		config.validate()?;
		match config.seed {
			Some(seed) => Self::new(config.window_length, seed),
			None => Self::unseeded(config.window_length),
		}
	}

	fn with_rng(window_length: usize, rng: StdRng) -> Result<Self> {
		if window_length == 0 {
			return Err(LmError::InvalidConfig("window length must be >= 1".to_owned()));
		}
		Ok(Self { window_length, tables: HashMap::new(), rng })
	}

	/// Number of characters in a context.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct contexts learned.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	/// Returns `true` if no context was learned.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Returns the table learned for `context`, if any.
	pub fn table(&self, context: &str) -> Option<&ContextTable> {
		self.tables.get(context)
	}

	/// Iterates over `(context, table)` pairs in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = (&str, &ContextTable)> {
		self.tables.iter().map(|(key, table)| (key.as_str(), table))
	}

	/// Trains the model on a stream of characters.
	///
	/// - The first `window_length` characters form the initial context.
	/// - Every following character is counted in the table of the current
	///   context, then the context slides forward by one character.
	/// - Once the stream is exhausted, every table is finalized.
	///
	/// A stream shorter than the window leaves the model untouched.
	///
	/// # Errors
	/// Only if a table ends up empty, which the counting pass never produces.
	pub fn train<I>(&mut self, corpus: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		let mut chars = corpus.into_iter();

		let mut window: String = chars.by_ref().take(self.window_length).collect();
		if window.chars().count() < self.window_length {
			warn!("corpus is shorter than the window length ({}), nothing learned", self.window_length);
			return Ok(());
		}

		let mut consumed = self.window_length;
		for c in chars {
			match self.tables.get_mut(&window) {
				Some(table) => table.update(c),
				None => {
					let mut table = ContextTable::new();
					table.update(c);
					self.tables.insert(window.clone(), table);
				}
			}

			window.remove(0);
			window.push(c);
			consumed += 1;
		}

		for table in self.tables.values_mut() {
			Self::calculate_probabilities(table)?;
		}

		debug!("trained on {} characters, {} contexts", consumed, self.tables.len());
		Ok(())
	}

	/// Trains the model on the content of a corpus file.
	///
	/// The file is released before returning, whether reading succeeded or not.
	///
	/// # Errors
	/// Returns [`LmError::UnreadableCorpus`] if the file cannot be opened or read.
	/// Nothing is learned in that case.
	pub fn train_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let corpus = io::read_corpus(&path)?;
		self.train(corpus.chars())
	}

	/// Computes the probabilities of every record in `table`.
	pub fn calculate_probabilities(table: &mut ContextTable) -> Result<()> {
		table.finalize_probabilities()
	}

	/// Samples a character from `table` using this model's generator.
	///
	/// Returns `None` for an empty table.
	pub fn random_char(&mut self, table: &ContextTable) -> Option<char> {
		table.sample(self.rng.random::<f64>())
	}

	/// Extends `initial_text` by sampling one character at a time.
	///
	/// `text_length` is the length of the returned text, in characters,
	/// seed included. Generation stops earlier when the trailing window has
	/// no learned continuation.
	///
	/// - A seed shorter than the window is returned unchanged.
	/// - A seed already `text_length` long or longer is returned unchanged.
	pub fn generate(&mut self, initial_text: &str, text_length: usize) -> String {
		let mut text: Vec<char> = initial_text.chars().collect();
		if text.len() < self.window_length {
			return initial_text.to_owned();
		}

		while text.len() < text_length {
			let key: String = text[text.len() - self.window_length..].iter().collect();
			let Some(table) = self.tables.get(&key) else {
				debug!("no continuation for {:?}, stopping at {} characters", key, text.len());
				break;
			};
			match table.sample(self.rng.random::<f64>()) {
				Some(c) => text.push(c),
				None => break,
			}
		}

		text.into_iter().collect()
	}

	/// Renders the model as pretty JSON, contexts sorted by key.
	///
	/// Debugging aid only, the format is not meant to be read back.
	pub fn to_json(&self) -> Result<String> {
		let sorted: BTreeMap<&str, &ContextTable> = self.contexts().collect();
		Ok(serde_json::to_string_pretty(&sorted)?)
	}
}

/// One line per context, sorted by key: `key : ((c count p cp) ...)`.
impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sorted: BTreeMap<&str, &ContextTable> = self.contexts().collect();
		for (key, table) in sorted {
			writeln!(f, "{} : {}", key.escape_debug(), table)?;
		}
		Ok(())
	}
}
