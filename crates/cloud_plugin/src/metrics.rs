//! Rebuild timing and mesh statistics.
//!
//! Feature-gated and runtime-toggled so a disabled build records nothing.
//!
//! # Usage
//!
//! ```ignore
//! use cloud_plugin::metrics::{GeneratorMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics (on by default)
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each rebuild:
//! metrics.record_rebuild(&timings, vertex_count, index_count);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity history, oldest values evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  /// Most recent value.
  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
  pub fn sum(&self) -> T {
    self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
  }
}

impl RollingWindow<u64> {
  /// Mean of the window, 0 when empty.
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    self.buffer.iter().fold(None, |acc, &v| match acc {
      None => Some((v, v)),
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(64)
  }
}

/// Wall-clock duration of each rebuild stage, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildTimings {
  pub field_us: u64,
  pub extract_us: u64,
  pub normals_us: u64,
}

impl RebuildTimings {
  pub fn total_us(&self) -> u64 {
    self.field_us + self.extract_us + self.normals_us
  }
}

/// Statistics accumulated across rebuilds of one generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorMetrics {
  // Timing
  pub field_timings: RollingWindow<u64>,
  pub extract_timings: RollingWindow<u64>,
  pub normals_timings: RollingWindow<u64>,
  pub last: RebuildTimings,

  // Last mesh
  pub last_vertices: u64,
  pub last_triangles: u64,
  /// Positions + normals + indices of the last mesh.
  pub mesh_memory_bytes: u64,

  /// Rebuilds recorded this session.
  pub total_rebuilds: u64,
}

impl GeneratorMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear histories and the last-mesh snapshot. `total_rebuilds` is
  /// cumulative and survives.
  pub fn reset(&mut self) {
    self.field_timings.clear();
    self.extract_timings.clear();
    self.normals_timings.clear();
    self.last = RebuildTimings::default();
    self.last_vertices = 0;
    self.last_triangles = 0;
    self.mesh_memory_bytes = 0;
  }

  /// Record one finished rebuild.
  pub fn record_rebuild(&mut self, timings: &RebuildTimings, vertex_count: usize, index_count: usize) {
    if !is_enabled() {
      return;
    }

    self.field_timings.push(timings.field_us);
    self.extract_timings.push(timings.extract_us);
    self.normals_timings.push(timings.normals_us);
    self.last = *timings;

    // 12 bytes per position, 12 per normal, 4 per index
    self.last_vertices = vertex_count as u64;
    self.last_triangles = (index_count / 3) as u64;
    self.mesh_memory_bytes = vertex_count as u64 * 24 + index_count as u64 * 4;
    self.total_rebuilds += 1;
  }

  /// Average total rebuild time over the window.
  pub fn avg_total_us(&self) -> f64 {
    self.field_timings.average() + self.extract_timings.average() + self.normals_timings.average()
  }

  pub fn mesh_memory_mb(&self) -> f64 {
    self.mesh_memory_bytes as f64 / 1_048_576.0
  }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
  use super::*;

  #[test]
  fn test_rolling_window() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());
    assert_eq!(window.min_max(), None);

    window.push(10u64);
    window.push(20);
    window.push(30);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 60);
    assert_eq!(window.average(), 20.0);

    // Oldest evicted
    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 90);
    assert_eq!(window.last(), Some(&40));
    assert_eq!(window.min_max(), Some((20, 40)));
    assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![20, 30, 40]);
  }

  #[test]
  fn test_zero_capacity_window_stays_empty() {
    let mut window = RollingWindow::new(0);
    window.push(5u64);
    assert!(window.is_empty());
  }

  #[test]
  fn test_record_rebuild() {
    let mut metrics = GeneratorMetrics::new();
    let timings = RebuildTimings {
      field_us: 1000,
      extract_us: 200,
      normals_us: 300,
    };
    assert_eq!(timings.total_us(), 1500);

    metrics.record_rebuild(&timings, 100, 300);
    metrics.record_rebuild(
      &RebuildTimings {
        field_us: 3000,
        ..timings
      },
      50,
      90,
    );

    assert_eq!(metrics.total_rebuilds, 2);
    assert_eq!(metrics.field_timings.average(), 2000.0);
    assert_eq!(metrics.avg_total_us(), 2500.0);
    assert_eq!(metrics.last.field_us, 3000);
    assert_eq!(metrics.last_vertices, 50);
    assert_eq!(metrics.last_triangles, 30);
    assert_eq!(metrics.mesh_memory_bytes, 50 * 24 + 90 * 4);

    metrics.reset();
    assert!(metrics.field_timings.is_empty());
    assert_eq!(metrics.last_vertices, 0);
    assert_eq!(metrics.total_rebuilds, 2);
  }
}
