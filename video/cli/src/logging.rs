use std::str::FromStr;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Default,
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid logging level: {0}")]
	InvalidLevel(#[from] tracing_subscriber::filter::ParseError),
	#[error("failed to init logger: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
}

pub fn init(level: &str, mode: Mode) -> Result<(), LoggingError> {
	let env_filter = EnvFilter::from_str(level)?;

	match mode {
		Mode::Default => tracing_subscriber::fmt()
			.with_line_number(true)
			.with_file(true)
			.with_env_filter(env_filter)
			.finish()
			.try_init()?,
		Mode::Json => tracing_subscriber::fmt()
			.json()
			.with_line_number(true)
			.with_file(true)
			.with_env_filter(env_filter)
			.finish()
			.try_init()?,
		Mode::Pretty => tracing_subscriber::fmt()
			.pretty()
			.with_line_number(true)
			.with_file(true)
			.with_env_filter(env_filter)
			.finish()
			.try_init()?,
		Mode::Compact => tracing_subscriber::fmt()
			.compact()
			.with_line_number(true)
			.with_file(true)
			.with_env_filter(env_filter)
			.finish()
			.try_init()?,
	}

	Ok(())
}
