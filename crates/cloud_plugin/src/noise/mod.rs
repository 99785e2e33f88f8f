//! Permutation-table noise primitives and their fractal combinators.
//!
//! - `PermutationTable`: seeded integer hash shared by both families
//! - `worley`: cellular noise, inverted and sharpened nearest distance
//! - `simplex`: 3D simplex gradient noise remapped to [0, 1]
//! - `fractal`: multi-octave accumulation normalized back to [0, 1]
//!
//! Every function here is pure and reads the table immutably, so it can be
//! evaluated from any number of rayon workers at once.

mod fractal;
mod permutation;
mod simplex;
mod worley;


pub use fractal::{fbm, fbm_simplex, fbm_worley};
pub use permutation::PermutationTable;
pub use simplex::sample_simplex;
pub use worley::sample_worley;

/// Fractional part, always in [0, 1).
#[inline(always)]
pub(crate) fn frac(v: f32) -> f32 {
  v - v.floor()
}
