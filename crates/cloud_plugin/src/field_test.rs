use super::*;
use crate::config::CloudConfig;

fn sampler(config: CloudConfig) -> CloudSampler {
  CloudSampler::new(config).unwrap()
}

fn on_shell(x: usize, y: usize, z: usize, dims: LatticeDims) -> bool {
  x == 0
    || y == 0
    || z == 0
    || x == dims.width - 1
    || y == dims.height - 1
    || z == dims.depth - 1
}

#[test]
fn test_closed_volume_shell_is_zero() {
  let s = sampler(CloudConfig::default().with_resolution(12, 9));
  let mut field = ScalarField::default();
  build(&s, &mut field);

  let dims = field.dims();
  assert_eq!(dims, LatticeDims::new(12, 9, 12));
  let mut interior_nonzero = 0;
  for z in 0..dims.depth {
    for y in 0..dims.height {
      for x in 0..dims.width {
        let v = field.get(x, y, z);
        if on_shell(x, y, z, dims) {
          assert_eq!(v, 0.0, "shell point ({x},{y},{z}) = {v}");
        } else if v != 0.0 {
          interior_nonzero += 1;
        }
      }
    }
  }
  assert!(interior_nonzero > 0, "interior should carry density");
}

#[test]
fn test_open_volume_evaluates_edges() {
  let config = CloudConfig::default()
    .with_resolution(8, 8)
    .with_close_volume(false)
    .with_layers(Vec::new());
  let s = sampler(config);
  let mut field = ScalarField::default();
  build(&s, &mut field);

  let dims = field.dims();
  for (x, y, z) in [(0, 0, 0), (7, 7, 7), (0, 3, 7)] {
    let expected = s.sample(lattice_to_unit(x, y, z, dims), true);
    assert_eq!(field.get(x, y, z), expected);
  }
}

#[test]
fn test_points_match_sample_at_normalized_coordinate() {
  let s = sampler(CloudConfig::default().with_resolution(10, 6));
  let mut field = ScalarField::default();
  build(&s, &mut field);

  let dims = field.dims();
  let unit = lattice_to_unit(4, 3, 7, dims);
  assert_eq!(unit, Vec3::new(0.4, 0.5, 0.7));
  assert_eq!(field.get(4, 3, 7), s.sample(unit, true));
}

#[test]
fn test_parallel_matches_serial() {
  for close in [true, false] {
    let s = sampler(
      CloudConfig::default()
        .with_resolution(14, 11)
        .with_close_volume(close),
    );
    let mut parallel = ScalarField::default();
    let mut serial = ScalarField::default();
    build(&s, &mut parallel);
    build_serial(&s, &mut serial);

    let bits = |f: &ScalarField| f.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&parallel), bits(&serial));
  }
}

#[test]
fn test_reset_reuses_allocation() {
  let mut field = ScalarField::new(LatticeDims::new(4, 4, 4));
  let ptr = field.as_slice().as_ptr();

  assert!(!field.reset(LatticeDims::new(4, 4, 4)));
  assert_eq!(field.as_slice().as_ptr(), ptr);

  assert!(field.reset(LatticeDims::new(4, 5, 4)));
  assert_eq!(field.as_slice().len(), 80);
}

#[test]
fn test_rebuild_clears_previous_values() {
  let mut field = ScalarField::from_fn(LatticeDims::new(6, 6, 6), |_, _, _| 9.0);
  let s = sampler(CloudConfig::default().with_resolution(6, 6));
  build(&s, &mut field);
  assert_eq!(field.get(0, 0, 0), 0.0);
  assert!(field.as_slice().iter().all(|&v| v != 9.0));
}

#[test]
fn test_from_vec_checks_length() {
  let dims = LatticeDims::new(2, 2, 2);
  assert!(ScalarField::from_vec(dims, vec![0.0; 8]).is_some());
  assert!(ScalarField::from_vec(dims, vec![0.0; 7]).is_none());
}

#[test]
fn test_min_max_and_count() {
  let field = ScalarField::from_fn(LatticeDims::new(3, 1, 1), |x, _, _| x as f32);
  assert_eq!(field.min_max(), Some((0.0, 2.0)));
  assert_eq!(field.count_above(0.5), 2);
  assert_eq!(ScalarField::default().min_max(), None);
}
