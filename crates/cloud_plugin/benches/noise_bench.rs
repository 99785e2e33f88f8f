//! Benchmarks for the noise primitives and their fractal sums.
//!
//! Every benchmark fills the same 32³ unit-cube lattice, the default cloud
//! resolution.

use cloud_plugin::noise::{fbm_simplex, fbm_worley, sample_simplex, sample_worley};
use cloud_plugin::{NoiseConfig, PermutationTable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;

const CHUNK_SIZE: usize = 32;
const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE; // 32768

fn lattice_points() -> Vec<Vec3> {
  let inv = 1.0 / CHUNK_SIZE as f32;
  let mut points = Vec::with_capacity(CHUNK_VOLUME);
  for z in 0..CHUNK_SIZE {
    for y in 0..CHUNK_SIZE {
      for x in 0..CHUNK_SIZE {
        points.push(Vec3::new(x as f32, y as f32, z as f32) * inv);
      }
    }
  }
  points
}

// ============================================================================
// Primitives
// ============================================================================

fn bench_primitives(c: &mut Criterion) {
  let mut group = c.benchmark_group("volume_32_primitives");
  group.throughput(Throughput::Elements(CHUNK_VOLUME as u64));

  let perm = PermutationTable::default();
  let points = lattice_points();
  let mut output = vec![0.0f32; CHUNK_VOLUME];

  group.bench_function("worley", |b| {
    b.iter(|| {
      for (out, &p) in output.iter_mut().zip(&points) {
        *out = sample_worley(p * 4.0, &perm, 1.0);
      }
      black_box(output[0])
    })
  });

  group.bench_function("simplex", |b| {
    b.iter(|| {
      for (out, &p) in output.iter_mut().zip(&points) {
        *out = sample_simplex(p * 4.0, &perm);
      }
      black_box(output[0])
    })
  });

  group.finish();
}

// ============================================================================
// Fractal sums
// ============================================================================

fn bench_octaves(c: &mut Criterion) {
  let mut group = c.benchmark_group("volume_32_octaves");
  group.throughput(Throughput::Elements(CHUNK_VOLUME as u64));

  let perm = PermutationTable::default();
  let points = lattice_points();
  let mut output = vec![0.0f32; CHUNK_VOLUME];

  for octaves in [1, 2, 4, 6, 8] {
    let worley = NoiseConfig {
      octaves,
      ..NoiseConfig::worley()
    };
    let simplex = NoiseConfig {
      octaves,
      ..NoiseConfig::simplex()
    };

    group.bench_with_input(BenchmarkId::new("worley", octaves), &octaves, |b, _| {
      b.iter(|| {
        for (out, &p) in output.iter_mut().zip(&points) {
          *out = fbm_worley(p, &worley, &perm, 1.0);
        }
        black_box(output[0])
      })
    });

    group.bench_with_input(BenchmarkId::new("simplex", octaves), &octaves, |b, _| {
      b.iter(|| {
        for (out, &p) in output.iter_mut().zip(&points) {
          *out = fbm_simplex(p, &simplex, &perm);
        }
        black_box(output[0])
      })
    });
  }

  group.finish();
}

criterion_group!(benches, bench_primitives, bench_octaves);
criterion_main!(benches);
