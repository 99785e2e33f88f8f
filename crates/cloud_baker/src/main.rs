//! Cloud volume baker.
//!
//! Loads a TOML cloud description, runs one full rebuild (density field,
//! surface nets, normals) and reports what it produced. With `--preview`
//! the unlayered `z = 0` noise slice is written as a grayscale PNG.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cloud_plugin::{CloudGenerator, PreviewImage, SurfaceNetsExtractor};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use config::Config;

/// Cloud volume baker for the cloud plugin.
#[derive(Parser, Debug)]
#[command(name = "bake_clouds")]
#[command(about = "Generates a cloud volume mesh and optional noise preview")]
struct Args {
	/// Path to configuration TOML file (defaults are used if omitted).
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Output directory (default: from config, next to the config file).
	#[arg(short, long)]
	output_dir: Option<PathBuf>,

	/// Write the noise preview slice as a PNG.
	#[arg(short, long)]
	preview: bool,

	/// Override lattice width and depth.
	#[arg(long)]
	resolution_xz: Option<usize>,

	/// Override lattice height.
	#[arg(long)]
	resolution_y: Option<usize>,

	/// Override permutation table seed.
	#[arg(long)]
	seed: Option<u64>,

	/// Log at debug level unless RUST_LOG says otherwise.
	#[arg(short, long)]
	verbose: bool,
}

impl Args {
	/// CLI flags win over file values.
	fn apply(&self, config: &mut Config) {
		if let Some(resolution_xz) = self.resolution_xz {
			config.cloud.resolution_xz = resolution_xz;
		}
		if let Some(resolution_y) = self.resolution_y {
			config.cloud.resolution_y = resolution_y;
		}
		if let Some(seed) = self.seed {
			config.cloud.seed = seed;
		}
	}

	fn resolve_output_dir(&self, config: &Config) -> PathBuf {
		if let Some(dir) = &self.output_dir {
			return dir.clone();
		}
		let base = self
			.config
			.as_deref()
			.and_then(Path::parent)
			.unwrap_or(Path::new("."));
		base.join(&config.output_dir)
	}
}

fn init_logger(verbose: bool) {
	let default_level = if verbose {
		log::LevelFilter::Debug
	} else {
		log::LevelFilter::Info
	};
	env_logger::Builder::new()
		.filter_level(default_level)
		.parse_default_env()
		.init();
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logger(args.verbose);

	let mut config = match &args.config {
		Some(path) => {
			info!("Loading config from: {}", path.display());
			Config::load(path)?
		}
		None => {
			info!("No config given, using defaults");
			Config::default()
		}
	};
	args.apply(&mut config);
	config.check().context("Invalid configuration after CLI overrides")?;

	let cloud = &config.cloud;
	info!(
		"Baking {}x{}x{} cloud volume (seed {}, coverage {})",
		cloud.resolution_xz, cloud.resolution_y, cloud.resolution_xz, cloud.seed, cloud.coverage
	);
	debug!("Cloud config: {:#?}", cloud);

	let mut generator = CloudGenerator::new(cloud.clone()).context("Invalid cloud configuration")?;
	let rebuild = generator.rebuild_current(&SurfaceNetsExtractor);

	let field = rebuild.field;
	if let Some((min, max)) = field.min_max() {
		info!(
			"Density range [{:.3}, {:.3}], {} of {} points above coverage",
			min,
			max,
			field.count_above(config.cloud.coverage),
			field.as_slice().len()
		);
	}

	let mesh = &rebuild.mesh;
	let (vertices, triangles, empty) = (mesh.vertex_count(), mesh.triangle_count(), mesh.is_empty());
	let timings = rebuild.timings;
	info!(
		"Mesh: {} vertices, {} triangles ({:.2} MB)",
		vertices,
		triangles,
		generator.metrics().mesh_memory_mb()
	);
	info!(
		"Timings: field {:.2}ms, surface {:.2}ms, normals {:.2}ms, total {:.2}ms",
		timings.field_us as f64 / 1000.0,
		timings.extract_us as f64 / 1000.0,
		timings.normals_us as f64 / 1000.0,
		timings.total_us() as f64 / 1000.0
	);
	if empty {
		warn!("No surface at coverage {}; try lowering it", config.cloud.coverage);
	}

	if args.preview {
		let output_dir = args.resolve_output_dir(&config);
		std::fs::create_dir_all(&output_dir)
			.with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

		let preview = generator.preview(config.preview_size as usize);
		let path = output_dir.join("preview.png");
		write_preview(&preview, &path)?;
		info!("Preview written to: {}", path.display());
	}

	Ok(())
}

/// Save a preview as an 8-bit grayscale PNG, row `i` of the preview as
/// image row `i`.
fn write_preview(preview: &PreviewImage, path: &Path) -> Result<()> {
	let size = preview.size() as u32;
	let image = image::GrayImage::from_raw(size, size, preview.to_luma8())
		.context("Preview buffer does not match its size")?;
	image
		.save(path)
		.with_context(|| format!("Failed to write: {}", path.display()))?;
	Ok(())
}
