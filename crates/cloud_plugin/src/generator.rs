//! Full rebuild pipeline: field → isosurface → normals.
//!
//! ```text
//!  CloudConfig ──validate──► CloudSampler ──field::build──► ScalarField
//!                                                               │
//!                          extractor.extract(coverage, field) ◄─┘
//!                                          │
//!                      positions, indices ─┴─► generate_normals ──► CloudMesh
//! ```
//!
//! The generator owns the field and normal buffers so repeated rebuilds at
//! the same resolution reuse their allocations. The permutation table is
//! kept while its seed and size stay the same.

use std::sync::Arc;

use glam::Vec3;
use web_time::Instant;

use crate::config::CloudConfig;
use crate::error::ConfigError;
use crate::extract::IsosurfaceExtractor;
use crate::field::{self, ScalarField};
use crate::metrics::{GeneratorMetrics, RebuildTimings};
use crate::noise::PermutationTable;
use crate::normals::{generate_normals, NormalBuffers};
use crate::preview::{preview_slice, PreviewImage};
use crate::sampler::CloudSampler;
use crate::types::{CloudMesh, MinMaxAABB};

/// Output of one [`CloudGenerator::rebuild`].
#[derive(Debug)]
pub struct Rebuild<'a> {
  /// The freshly built density field (owned by the generator).
  pub field: &'a ScalarField,
  pub mesh: CloudMesh,
  pub timings: RebuildTimings,
}

/// Owns a validated configuration and every buffer a rebuild needs.
#[derive(Debug)]
pub struct CloudGenerator {
  sampler: CloudSampler,
  field: ScalarField,
  normals: NormalBuffers,
  metrics: GeneratorMetrics,
}

impl CloudGenerator {
  /// Validate `config` and prepare its noise table. No field is built yet.
  pub fn new(config: CloudConfig) -> Result<Self, ConfigError> {
    Ok(Self {
      sampler: CloudSampler::new(config)?,
      field: ScalarField::default(),
      normals: NormalBuffers::new(),
      metrics: GeneratorMetrics::new(),
    })
  }

  pub fn config(&self) -> &CloudConfig {
    self.sampler.config()
  }

  pub fn sampler(&self) -> &CloudSampler {
    &self.sampler
  }

  /// Field from the last rebuild (empty before the first).
  pub fn field(&self) -> &ScalarField {
    &self.field
  }

  pub fn metrics(&self) -> &GeneratorMetrics {
    &self.metrics
  }

  /// Swap in a new configuration. On error the previous one stays active.
  pub fn set_config(&mut self, config: CloudConfig) -> Result<(), ConfigError> {
    config.validate()?;
    let table = self.table_for(&config);
    self.sampler = CloudSampler::with_table(config, table)?;
    Ok(())
  }

  /// Density at a unit-cube point under the active configuration.
  pub fn sample(&self, point: Vec3, apply_layers: bool) -> f32 {
    self.sampler.sample(point, apply_layers)
  }

  /// Unlayered `z = 0` slice for debugging.
  pub fn preview(&self, size: usize) -> PreviewImage {
    preview_slice(&self.sampler, size)
  }

  /// Regenerate field, mesh and normals for `config`.
  ///
  /// Validation happens before any buffer is touched; a rejected config
  /// leaves the generator (and its last field) unchanged.
  pub fn rebuild(
    &mut self,
    config: CloudConfig,
    extractor: &impl IsosurfaceExtractor,
  ) -> Result<Rebuild<'_>, ConfigError> {
    self.set_config(config)?;
    Ok(self.rebuild_current(extractor))
  }

  /// Regenerate with the active configuration.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "generator::rebuild"))]
  pub fn rebuild_current(&mut self, extractor: &impl IsosurfaceExtractor) -> Rebuild<'_> {
    let config = self.sampler.config();
    let dims = config.dims();

    // Stage 1: scalar field
    let field_start = Instant::now();
    {
      #[cfg(feature = "profiling")]
      let _span = tracing::info_span!("field_stage").entered();
      field::build(&self.sampler, &mut self.field);
    }
    let field_us = field_start.elapsed().as_micros() as u64;

    // Stage 2: isosurface
    let extract_start = Instant::now();
    let extracted = {
      #[cfg(feature = "profiling")]
      let _span = tracing::info_span!("extract_stage").entered();
      extractor.extract(config.coverage, &self.field)
    };
    let extract_us = extract_start.elapsed().as_micros() as u64;

    // Stage 3: normals
    let normals_start = Instant::now();
    let normals = {
      #[cfg(feature = "profiling")]
      let _span = tracing::info_span!("normals_stage").entered();
      generate_normals(
        &self.field,
        &extracted.positions,
        config.smooth_normals,
        &mut self.normals,
      )
    };
    let normals_us = normals_start.elapsed().as_micros() as u64;

    let timings = RebuildTimings {
      field_us,
      extract_us,
      normals_us,
    };
    let mesh = CloudMesh {
      positions: extracted.positions,
      indices: extracted.indices,
      normals,
      bounds: MinMaxAABB::from_lattice(dims),
    };

    tracing::info!(
      "cloud rebuild {}x{}x{}: field {}us, extract {}us, normals {}us ({} vertices, {} triangles)",
      dims.width,
      dims.height,
      dims.depth,
      timings.field_us,
      timings.extract_us,
      timings.normals_us,
      mesh.vertex_count(),
      mesh.triangle_count(),
    );

    self
      .metrics
      .record_rebuild(&timings, mesh.vertex_count(), mesh.indices.len());

    Rebuild {
      field: &self.field,
      mesh,
      timings,
    }
  }

  /// Current table if it already matches `config`, otherwise a new one.
  fn table_for(&self, config: &CloudConfig) -> Arc<PermutationTable> {
    let current = self.sampler.table();
    if current.matches(config.table_size, config.table_max, config.seed) {
      return Arc::clone(current);
    }

    let table = PermutationTable::new(config.table_size, config.table_max, config.seed);
    tracing::debug!(
      "permutation table rebuilt (seed {}, {} entries)",
      table.seed(),
      table.size()
    );
    Arc::new(table)
  }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;
