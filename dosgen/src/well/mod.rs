// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Well
//!
//! Bound states of a one-dimensional finite square well.
//!
//! For a well of width `L` and depth `V0` holding a particle of effective mass `m`, the
//! bound states follow from the dimensionless strength `U0^2 = m L^2 V0 / (2 hbar^2)`.
//! The state with quantum number `i` is characterised by a parameter `v_i` lying in the
//! branch `[i pi / 2, (i + 1) pi / 2)` and satisfying
//!
//! ```text
//! v^2 (1 + tan^2 v) = U0^2    for even i
//! v^2 (1 + cot^2 v) = U0^2    for odd i
//! ```
//!
//! The confinement energy of the state is then `E_i = 2 hbar^2 v_i^2 / (m L^2)`. A branch
//! whose lower edge already exceeds `U0` holds no bound state.
//!
//! The root is found with a Newton-Raphson iteration started from a random point in the
//! branch. Iterates leaving the branch are folded back into it and the acceptance
//! tolerance relaxes with the iteration count, so every call terminates.

mod convergence;

pub use convergence::Convergence;

use crate::constants::HBAR_SQUARED_OVER_ELECTRON_MASS;
use num_traits::ToPrimitive;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::f64::consts::FRAC_PI_2;

/// Number of consecutive folds attempted before an iterate is reset to the branch midpoint
const MAXIMUM_FOLDS: usize = 16;
/// Multiplicative nudge applied to an iterate stuck on a branch edge
const EDGE_PERTURBATION: f64 = 1.1;

/// The dimensionless strength `U0^2` of a well
///
/// `size` is the well width in nm, `band_offset` its depth in eV and `effective_mass`
/// the particle mass in units of the free electron mass.
pub fn well_strength(size: Decimal, band_offset: Decimal, effective_mass: Decimal) -> Decimal {
    effective_mass * size * size * band_offset / (dec!(2) * HBAR_SQUARED_OVER_ELECTRON_MASS)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(index: usize) -> Self {
        match index % 2 {
            0 => Parity::Even,
            _ => Parity::Odd,
        }
    }
}

/// A single branch `[i pi / 2, (i + 1) pi / 2)` of the well equation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Branch {
    index: usize,
    parity: Parity,
    lower: f64,
    upper: f64,
}

impl Branch {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            parity: Parity::of(index),
            lower: index as f64 * FRAC_PI_2,
            upper: (index + 1) as f64 * FRAC_PI_2,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.
    }

    /// The left hand side of the well equation on this branch
    pub fn function(&self, v: f64) -> f64 {
        match self.parity {
            Parity::Even => v.powi(2) * (1. + v.tan().powi(2)),
            Parity::Odd => v.powi(2) * (1. + v.tan().recip().powi(2)),
        }
    }

    pub fn derivative(&self, v: f64) -> f64 {
        match self.parity {
            Parity::Even => {
                let tan = v.tan();
                let sec_squared = v.cos().powi(2).recip();
                2. * v * (1. + tan.powi(2) + v * tan * sec_squared)
            }
            Parity::Odd => {
                let cot = v.tan().recip();
                let csc_squared = v.sin().powi(2).recip();
                2. * v * (1. + cot.powi(2) - v * cot * csc_squared)
            }
        }
    }

    /// Whether the well of strength `strength` binds a state on this branch
    pub fn is_bound(&self, strength: f64) -> bool {
        self.lower.powi(2) < strength
    }

    fn strictly_contains(&self, v: f64) -> bool {
        v > self.lower && v < self.upper
    }

    /// Bring an iterate back into the interior of the branch
    ///
    /// Values outside the branch are reduced modulo the branch width and shifted onto
    /// the lower edge; values sitting on an edge are nudged multiplicatively.
    fn fold(&self, mut v: f64) -> f64 {
        for _ in 0..MAXIMUM_FOLDS {
            if self.strictly_contains(v) {
                return v;
            }
            if v < self.lower || v > self.upper {
                v = v - FRAC_PI_2 * (v / FRAC_PI_2).trunc() + self.lower;
            } else {
                v *= EDGE_PERTURBATION;
            }
        }
        self.midpoint()
    }
}

/// A converged root of the well equation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Root {
    value: Decimal,
    iterations: usize,
    tolerance: f64,
}

impl Root {
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Number of Newton steps taken
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The acceptance tolerance in force when the iteration stopped
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// The well equation for a fixed strength `U0^2`
#[derive(Copy, Clone, Debug)]
pub struct WellEquation {
    strength: f64,
    convergence: Convergence,
}

impl WellEquation {
    pub fn new(strength: Decimal) -> Self {
        Self {
            strength: strength.to_f64().unwrap_or(0.),
            convergence: Convergence::default(),
        }
    }

    pub fn for_well(size: Decimal, band_offset: Decimal, effective_mass: Decimal) -> Self {
        Self::new(well_strength(size, band_offset, effective_mass))
    }

    pub fn with_convergence(self, convergence: Convergence) -> Self {
        Self {
            convergence,
            ..self
        }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Solve the equation on branch `index`, or `None` when the branch holds no bound state
    ///
    /// The initial guess is drawn from `rng`, so a seeded generator makes the call
    /// reproducible.
    pub fn solve<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Option<Root> {
        let branch = Branch::new(index);
        if !branch.is_bound(self.strength) {
            return None;
        }

        let span = FRAC_PI_2.min(self.strength.sqrt() - branch.lower());
        let mut v = branch.lower() + rng.gen::<f64>() * span;
        let mut iterations = 0;
        let mut tolerance = self.convergence.tolerance_after(iterations);

        loop {
            let derivative = branch.derivative(v);
            if derivative.abs() <= self.convergence.derivative_epsilon() {
                break;
            }
            v = branch.fold((v - (branch.function(v) - self.strength) / derivative).abs());

            iterations += 1;
            tolerance = self.convergence.tolerance_after(iterations);
            if (branch.function(v) - self.strength).abs() < tolerance {
                break;
            }
        }

        Some(Root {
            value: Decimal::from_f64_retain(v).expect("Folded iterates are finite"),
            iterations,
            tolerance,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Branch, Parity, WellEquation};
    use approx::assert_relative_eq;
    use num_traits::ToPrimitive;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn parity_alternates_with_index() {
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(1), Parity::Odd);
        assert_eq!(Parity::of(8), Parity::Even);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for (index, v) in [(0, 0.7), (1, 2.3), (2, 3.6), (3, 5.2)] {
            let branch = Branch::new(index);
            let numerical = (branch.function(v + h) - branch.function(v - h)) / (2. * h);
            assert_relative_eq!(branch.derivative(v), numerical, max_relative = 1e-6);
        }
    }

    #[test]
    fn fold_returns_interior_points() {
        let branch = Branch::new(3);
        for v in [0., 1., 4.71238898038469, 7.5, 100., 3. * FRAC_PI_2] {
            let folded = branch.fold(v);
            assert!(folded > branch.lower() && folded < branch.upper());
        }
        // The origin cannot be nudged multiplicatively off the lower edge of the ground branch
        let ground = Branch::new(0);
        assert_eq!(ground.fold(0.), FRAC_PI_2 / 2.);
    }

    #[test]
    fn branch_beyond_the_well_strength_is_unbound() {
        let mut rng = StdRng::seed_from_u64(0);
        // pi^2 / 4 is the lower edge of the first odd branch
        let equation = WellEquation::new(dec!(2.4));
        assert!(equation.strength() < PI * PI / 4.);
        assert!(equation.solve(1, &mut rng).is_none());
        assert!(equation.solve(2, &mut rng).is_none());
        assert!(equation.solve(0, &mut rng).is_some());
    }

    #[test]
    fn ground_state_of_a_known_well() {
        // U0 = 1: v / cos(v) = 1 has the root v = 0.7390851332151607 (the Dottie number)
        let mut rng = StdRng::seed_from_u64(1);
        let root = WellEquation::new(dec!(1)).solve(0, &mut rng).unwrap();
        assert_relative_eq!(
            root.value().to_f64().unwrap(),
            0.739_085_133_215_160_7,
            epsilon = 1e-12
        );
    }

    #[test]
    fn identical_seeds_give_identical_roots() {
        let equation = WellEquation::new(dec!(47.8));
        let first = equation.solve(3, &mut StdRng::seed_from_u64(9)).unwrap();
        let second = equation.solve(3, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn deep_well_converges_in_a_bounded_number_of_steps() {
        let equation = WellEquation::new(dec!(2500));
        let mut rng = StdRng::seed_from_u64(5);
        let mut index = 0;
        while let Some(root) = equation.solve(index, &mut rng) {
            assert!(root.iterations() < 3_000, "branch {index} took {} steps", root.iterations());
            assert!(root.tolerance() <= 1e-14 * 2f64.powi(30));
            index += 1;
        }
        // 50^2 = 2500 so the branches up to index 31 (lower edge 48.7) are bound
        assert_eq!(index, 32);
    }

    proptest! {
        #[test]
        fn roots_lie_in_their_branch_and_satisfy_the_equation(
            strength in 0.5f64..400.,
            seed in any::<u64>(),
            index in 0usize..12,
        ) {
            let equation = WellEquation::new(Decimal::from_f64_retain(strength).unwrap());
            let branch = Branch::new(index);
            let mut rng = StdRng::seed_from_u64(seed);
            match equation.solve(index, &mut rng) {
                None => prop_assert!(branch.lower().powi(2) >= equation.strength()),
                Some(root) => {
                    let v = root.value().to_f64().unwrap();
                    prop_assert!(v >= branch.lower() && v < branch.upper());
                    let residual = (branch.function(v) - equation.strength()).abs();
                    // The decimal conversion may move the root by a few ulps
                    prop_assert!(
                        residual < root.tolerance() + 1e-9 * equation.strength().max(1.),
                        "residual {} at tolerance {}", residual, root.tolerance()
                    );
                }
            }
        }
    }
}
