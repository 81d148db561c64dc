use std::path::PathBuf;

use anyhow::Context;
use movfile::{MoovPlacement, MovFileConfig};

use crate::logging;

/// Mux an H.264 Annex-B elementary stream into a QuickTime movie
#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// The Annex-B stream to read
	pub input: PathBuf,

	/// Where to write the movie, defaults to the input with a .mov extension
	#[clap(short, long)]
	pub output: Option<PathBuf>,

	/// A TOML file with writer settings, flags take precedence
	#[clap(long, env = "MOVMUX_CONFIG")]
	pub config: Option<PathBuf>,

	/// Frame width in pixels
	#[clap(long)]
	pub width: Option<u32>,

	/// Frame height in pixels
	#[clap(long)]
	pub height: Option<u32>,

	/// Frames per second
	#[clap(long)]
	pub fps: Option<u32>,

	/// Time units per second
	#[clap(long)]
	pub timescale: Option<u32>,

	/// Group up to this many frames per chunk
	#[clap(long)]
	pub samples_per_chunk: Option<u32>,

	/// Repeat the last keyframe this many times at the end
	#[clap(long)]
	pub copy_last_frame: Option<u32>,

	/// Compressor name stored in the sample description
	#[clap(long)]
	pub compressor_name: Option<String>,

	/// Put the movie box ahead of the media data
	#[clap(long)]
	pub fast_start: bool,

	/// Always write a 64 bit media data header
	#[clap(long)]
	pub large_mdat: bool,

	/// The log level, a tracing env filter
	#[clap(long, env = "MOVMUX_LOG", default_value = "info")]
	pub log_level: String,

	/// The log output format
	#[clap(long, default_value = "default")]
	pub log_mode: logging::Mode,
}

impl Cli {
	/// Loads the config file, if any, and applies the flags on top.
	pub fn writer_config(&self) -> anyhow::Result<MovFileConfig> {
		let mut config = match &self.config {
			Some(path) => {
				let raw = std::fs::read_to_string(path)
					.with_context(|| format!("failed to read config {}", path.display()))?;
				toml::from_str::<MovFileConfig>(&raw)
					.with_context(|| format!("failed to parse config {}", path.display()))?
			}
			None => MovFileConfig::default(),
		};

		if let Some(output) = &self.output {
			config.output_path = output.clone();
		} else if config.output_path.as_os_str().is_empty() {
			config.output_path = self.input.with_extension("mov");
		}

		if let Some(width) = self.width {
			config.width = width;
		}

		if let Some(height) = self.height {
			config.height = height;
		}

		if let Some(fps) = self.fps {
			config.frame_rate = fps;
		}

		if let Some(timescale) = self.timescale {
			config.timescale = timescale;
		}

		if let Some(samples_per_chunk) = self.samples_per_chunk {
			config.finish.samples_per_chunk = samples_per_chunk;
		}

		if let Some(count) = self.copy_last_frame {
			config.finish.copy_last_frame_count = count;
		}

		if let Some(name) = &self.compressor_name {
			config.compressor_name = name.clone();
		}

		if self.fast_start {
			config.finish.moov_placement = MoovPlacement::Front;
		}

		if self.large_mdat {
			config.finish.prefer_64bit_mdat = true;
		}

		config.validate().context("invalid writer config")?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use movfile::MoovPlacement;

	use super::Cli;

	#[test]
	fn test_flags_override_config_file() {
		let dir = tempfile::tempdir().unwrap();
		let config_path = dir.path().join("movmux.toml");
		std::fs::write(
			&config_path,
			"width = 1280\nheight = 720\nframe_rate = 25\n[finish]\nsamples_per_chunk = 4\n",
		)
		.unwrap();

		let cli = Cli::try_parse_from([
			"movmux",
			"clip.h264",
			"--config",
			config_path.to_str().unwrap(),
			"--height",
			"768",
			"--fast-start",
		])
		.unwrap();

		let config = cli.writer_config().unwrap();
		assert_eq!(config.width, 1280);
		assert_eq!(config.height, 768);
		assert_eq!(config.frame_rate, 25);
		assert_eq!(config.finish.samples_per_chunk, 4);
		assert_eq!(config.finish.moov_placement, MoovPlacement::Front);
		assert_eq!(config.output_path, std::path::PathBuf::from("clip.mov"));
	}

	#[test]
	fn test_missing_dimensions_rejected() {
		let cli = Cli::try_parse_from(["movmux", "clip.h264"]).unwrap();
		assert!(cli.writer_config().is_err());
	}
}
