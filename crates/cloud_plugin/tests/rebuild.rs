//! End-to-end rebuilds through the public API with the surface-nets
//! extractor.

use cloud_plugin::{
  CloudConfig, CloudGenerator, ConfigError, LatticeDims, Layer, MinMaxAABB, NoiseFamily,
  SurfaceNetsExtractor,
};
use glam::Vec3;

fn config(resolution_xz: usize, resolution_y: usize) -> CloudConfig {
  let mut config = CloudConfig::default().with_resolution(resolution_xz, resolution_y);
  config.coverage = 0.25;
  config
}

#[test]
fn closed_volume_produces_watertight_shell_inputs() {
  let config = config(20, 14);
  let mut generator = CloudGenerator::new(config.clone()).unwrap();
  let rebuild = generator.rebuild(config, &SurfaceNetsExtractor).unwrap();

  let dims = rebuild.field.dims();
  assert_eq!(dims, LatticeDims::new(20, 14, 20));
  for z in [0, dims.depth - 1] {
    for y in 0..dims.height {
      for x in 0..dims.width {
        assert_eq!(rebuild.field.get(x, y, z), 0.0);
      }
    }
  }

  let mesh = &rebuild.mesh;
  assert!(!mesh.is_empty());
  assert_eq!(mesh.indices.len() % 3, 0);
  assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
  assert_eq!(mesh.normals.len(), mesh.vertex_count());
  assert!(mesh
    .normals
    .iter()
    .all(|n| n.is_finite() && (n.length() - 1.0).abs() < 1e-4));

  // Shell is empty, so every vertex lies strictly inside the lattice box.
  let bounds = mesh.vertex_bounds();
  assert!(bounds.min.cmpgt(Vec3::ZERO).all(), "{:?}", bounds);
  assert!(bounds.max.cmplt(Vec3::new(19.0, 13.0, 19.0)).all(), "{:?}", bounds);
  assert_eq!(
    mesh.bounds,
    MinMaxAABB::new(Vec3::ZERO, Vec3::new(20.0, 14.0, 20.0))
  );
}

#[test]
fn normals_point_out_of_the_cloud() {
  // A single band centered in the volume: density falls off above the
  // middle, so surface vertices in the upper half mostly face up.
  let config = config(16, 24)
    .with_layers(vec![Layer::new("slab", 0.2, 0.8, 1.5, 1.0)])
    .with_ratio(1.0);
  let mut generator = CloudGenerator::new(config.clone()).unwrap();
  let rebuild = generator.rebuild(config, &SurfaceNetsExtractor).unwrap();
  let mesh = &rebuild.mesh;

  let mut up = 0usize;
  let mut top = 0usize;
  for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
    if p.y > 12.0 && p.x > 3.0 && p.x < 12.0 && p.z > 3.0 && p.z < 12.0 {
      top += 1;
      if n.y > 0.0 {
        up += 1;
      }
    }
  }
  assert!(top > 0, "no vertices in the upper half of the slab");
  assert!(up * 10 >= top * 6, "{up} of {top} upper normals face up");
}

#[test]
fn open_volume_and_unsmoothed_normals() {
  let config = config(12, 12)
    .with_close_volume(false)
    .with_smooth_normals(false);
  let mut generator = CloudGenerator::new(config.clone()).unwrap();
  let rebuild = generator.rebuild(config, &SurfaceNetsExtractor).unwrap();

  assert!(rebuild.field.get(0, 6, 0) != 0.0 || rebuild.field.get(11, 6, 11) != 0.0);
  assert_eq!(rebuild.mesh.normals.len(), rebuild.mesh.vertex_count());
}

#[test]
fn invalid_configs_are_rejected_before_evaluation() {
  let mut generator = CloudGenerator::new(config(8, 8)).unwrap();

  let mut zero_octaves = config(8, 8);
  zero_octaves.simplex.octaves = 0;
  assert_eq!(
    generator.rebuild(zero_octaves, &SurfaceNetsExtractor).unwrap_err(),
    ConfigError::ZeroOctaves {
      family: NoiseFamily::Simplex
    }
  );

  let mut nan_scale = config(8, 8);
  nan_scale.noise_scale = f32::NAN;
  assert!(matches!(
    generator.rebuild(nan_scale, &SurfaceNetsExtractor),
    Err(ConfigError::NonFinite { .. })
  ));

  // Nothing was built.
  assert!(generator.field().as_slice().is_empty());
}
