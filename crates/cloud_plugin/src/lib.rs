//! cloud_plugin - Framework/engine independent volumetric cloud generation
//!
//! Builds a dense 3D density lattice from blended Worley and simplex fBm,
//! shaped by vertical cloud layers, then turns it into a lit-ready mesh:
//! an isosurface at the coverage threshold plus smooth per-vertex normals.
//!
//! # Features
//!
//! - **Seeded noise**: Worley and simplex primitives over a shared
//!   permutation table, with fractal (fBm) accumulation
//! - **Layer shaping**: stratus/cumulus/cumulonimbus style height bands
//! - **Parallel field build**: rayon over Z-slices, buffers reused across
//!   rebuilds
//! - **Smooth normals**: gradient field, optional box blur, slerp-blended
//!   per-vertex normals
//! - **Pluggable meshing**: any [`IsosurfaceExtractor`]; surface nets
//!   provided
//!
//! # Example
//!
//! ```ignore
//! use cloud_plugin::{CloudConfig, CloudGenerator, SurfaceNetsExtractor};
//!
//! let config = CloudConfig::default().with_resolution(48, 32);
//! let mut generator = CloudGenerator::new(config.clone())?;
//! let rebuild = generator.rebuild(config, &SurfaceNetsExtractor)?;
//!
//! println!("Generated {} vertices, {} triangles in {}us",
//!     rebuild.mesh.vertex_count(), rebuild.mesh.triangle_count(),
//!     rebuild.timings.total_us());
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::{CloudConfig, Layer, NoiseConfig};
pub use constants::{coord_to_index, index_to_coord};
pub use error::{ConfigError, NoiseFamily};
pub use types::{CloudMesh, LatticeDims, MinMaxAABB};

// Noise primitives
pub mod noise;
pub use noise::PermutationTable;

// Layer-shaped point sampling
pub mod sampler;
pub use sampler::CloudSampler;

// Density lattice
pub mod field;
pub use field::ScalarField;

// Gradient normals
pub mod normals;
pub use normals::{generate_normals, NormalBuffers, NormalField};

// Isosurface seam
pub mod extract;
pub use extract::{ExtractedMesh, IsosurfaceExtractor, SurfaceNetsExtractor};

// Debug slice
pub mod preview;
pub use preview::{preview_slice, PreviewImage};

// Rebuild pipeline
pub mod generator;
pub use generator::{CloudGenerator, Rebuild};

// Timing history
pub mod metrics;
pub use metrics::{GeneratorMetrics, RebuildTimings};
