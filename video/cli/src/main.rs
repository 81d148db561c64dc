use std::sync::Arc;

use anyhow::Context as _;
use bytes::Bytes;
use clap::Parser;
use h264::AccessUnitSplitter;
use movfile::{MovFile, Sample, TracingLogger};

mod cli;
mod logging;

fn main() {
	if let Err(err) = start() {
		eprintln!("{:#?}", err);
		std::process::exit(1);
	}
}

fn start() -> anyhow::Result<()> {
	let cli = cli::Cli::parse();

	logging::init(&cli.log_level, cli.log_mode).context("failed to init logging")?;

	let config = cli.writer_config()?;
	let sample_duration = config.sample_duration() as u64;

	let input = std::fs::read(&cli.input)
		.with_context(|| format!("failed to read {}", cli.input.display()))?;
	let units = AccessUnitSplitter::split(&Bytes::from(input));

	tracing::info!(
		input = %cli.input.display(),
		output = %config.output_path.display(),
		access_units = units.len(),
		"muxing"
	);

	let mut writer =
		MovFile::with_logger(config, Arc::new(TracingLogger)).context("failed to create writer")?;

	for (i, unit) in units.iter().enumerate() {
		let sample = Sample::from_access_unit(unit, i as u64 * sample_duration);
		writer
			.append_sample(sample)
			.with_context(|| format!("failed to append access unit {i}"))?;
	}

	writer.finalize().context("failed to finish movie")?;

	tracing::info!(path = %writer.output_path().display(), "done");

	Ok(())
}
