//! Individual value generators used to assemble records.
//!
//! Each function takes the RNG explicitly so callers control seeding.

pub mod id;
pub mod names;
pub mod seats;
pub mod timestamp;

use rand::Rng;

/// Pick one variant of a fixed, non-empty enumeration.
pub fn pick_variant<R: Rng + ?Sized, T: Copy, const N: usize>(
    rng: &mut R,
    variants: &[T; N],
) -> T {
    variants[rng.random_range(0..N)]
}
