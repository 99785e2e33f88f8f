//! Configuration parsing for cloud baking.

use anyhow::{Context, Result};
use cloud_plugin::CloudConfig;
use serde::Deserialize;
use std::path::Path;

/// Largest preview edge in pixels. The preview is held as `f32` values
/// and an 8-bit copy, so 8192 already needs about 320 MB.
pub const MAX_PREVIEW_SIZE: u32 = 8192;

/// Root configuration for a bake run. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Output directory, relative to the config file.
	pub output_dir: String,
	/// Edge length of the preview image in pixels.
	pub preview_size: u32,
	/// Cloud generation parameters.
	pub cloud: CloudConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			output_dir: "clouds".to_string(),
			preview_size: 256,
			cloud: CloudConfig::default(),
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
	}

	/// Parse and check a TOML document.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
		config.check()?;
		Ok(config)
	}

	/// Reject values the generator would refuse, with a readable message.
	pub fn check(&self) -> Result<()> {
		if self.preview_size == 0 {
			anyhow::bail!("preview_size must be at least 1");
		}
		if self.preview_size > MAX_PREVIEW_SIZE {
			anyhow::bail!(
				"preview_size must be at most {}, got {}",
				MAX_PREVIEW_SIZE,
				self.preview_size
			);
		}
		self.cloud
			.validate()
			.context("Invalid [cloud] section")?;
		Ok(())
	}
}
