use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use log::info;
use rs_lm_core::config::DEFAULT_SEED;
use rs_lm_core::model::language_model::LanguageModel;
use rs_lm_core::ModelConfig;

/// Generation mode selected on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Mode {
	/// Seeded generator, same output on every run
	Fixed,
	/// Generator seeded from the operating system
	Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Character-level n-gram text generator", long_about = None)]
struct Cli {
	/// Number of characters in a context window
	window_length: usize,

	/// Text to start generating from
	initial_text: String,

	/// Length of the generated text, initial text included
	text_length: usize,

	/// Generation mode
	#[arg(value_enum)]
	mode: Mode,

	/// Corpus file to train on
	corpus: PathBuf,

	/// Seed used in `fixed` mode
	#[arg(long, default_value_t = DEFAULT_SEED)]
	seed: u64,

	/// Print the trained model instead of generating text
	#[arg(long)]
	dump: bool,

	/// Render the model dump as JSON
	#[arg(long, requires = "dump")]
	json: bool,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

impl Cli {
	fn model_config(&self) -> ModelConfig {
		match self.mode {
			Mode::Fixed => ModelConfig::fixed(self.window_length, self.seed),
			Mode::Random => ModelConfig::random(self.window_length),
		}
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let mut model = LanguageModel::from_config(&cli.model_config()).context("invalid model parameters")?;
	model
		.train_file(&cli.corpus)
		.with_context(|| format!("failed to train on {}", cli.corpus.display()))?;
	info!("learned {} contexts of {} characters", model.len(), model.window_length());

	if cli.dump {
		if cli.json {
			println!("{}", model.to_json()?);
		} else {
			print!("{model}");
		}
		return Ok(());
	}

	println!("{}", model.generate(&cli.initial_text, cli.text_length));
	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	use log::LevelFilter;

	let level = if quiet > 0 {
		match quiet {
			1 => LevelFilter::Error,
			_ => LevelFilter::Off,
		}
	} else {
		match verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.format_timestamp_millis();
	builder.filter_level(level);
	let _ = builder.try_init();
}
