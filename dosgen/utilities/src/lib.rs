//! Fixtures shared by the integration tests and benchmarks

use dosgen::materials::{Heterostructure, MaterialLibrary};
use dosgen_sample::DotGeometry;
use rand::{rngs::StdRng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// InAs dots embedded in a GaAs barrier
pub fn inas_in_gaas() -> Heterostructure {
    MaterialLibrary::builtin()
        .heterostructure("InAs", "GaAs")
        .expect("InAs and GaAs are built in")
}

/// A dot of the mean size of the placement distribution, 12 nm radius and 3.5 nm tall
pub fn typical_dot_at(x: Decimal, y: Decimal) -> DotGeometry {
    DotGeometry::new(x, y, dec!(12), dec!(3.5))
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
