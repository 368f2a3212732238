// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Dot
//!
//! A single self-assembled quantum dot together with its confined states.
//!
//! A `QuantumDot` is built once from a `DotGeometry` and a `Heterostructure`. Building it
//! enumerates every bound electron state, the hole ground state, and the thermal
//! occupation of the electron levels; the result is immutable afterwards.
//!
//! ```ignore
//! let dot = QuantumDotBuilder::new()
//!     .with_geometry(&geometry)
//!     .with_heterostructure(&heterostructure)
//!     .with_rng(&mut rng)
//!     .build();
//! ```

mod occupation;
mod states;

use crate::materials::Heterostructure;
use dosgen_sample::{Distance, DotGeometry, Point2};
use occupation::OccupationTable;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub struct QuantumDotBuilder<RefGeometry, RefHeterostructure, RefRng> {
    geometry: RefGeometry,
    heterostructure: RefHeterostructure,
    rng: RefRng,
}

impl QuantumDotBuilder<(), (), ()> {
    pub fn new() -> Self {
        Self {
            geometry: (),
            heterostructure: (),
            rng: (),
        }
    }
}

impl Default for QuantumDotBuilder<(), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefGeometry, RefHeterostructure, RefRng>
    QuantumDotBuilder<RefGeometry, RefHeterostructure, RefRng>
{
    pub fn with_geometry(
        self,
        geometry: &DotGeometry,
    ) -> QuantumDotBuilder<&DotGeometry, RefHeterostructure, RefRng> {
        QuantumDotBuilder {
            geometry,
            heterostructure: self.heterostructure,
            rng: self.rng,
        }
    }

    pub fn with_heterostructure(
        self,
        heterostructure: &Heterostructure,
    ) -> QuantumDotBuilder<RefGeometry, &Heterostructure, RefRng> {
        QuantumDotBuilder {
            geometry: self.geometry,
            heterostructure,
            rng: self.rng,
        }
    }

    /// The generator seeding the root finder
    pub fn with_rng<R: Rng + ?Sized>(
        self,
        rng: &mut R,
    ) -> QuantumDotBuilder<RefGeometry, RefHeterostructure, &mut R> {
        QuantumDotBuilder {
            geometry: self.geometry,
            heterostructure: self.heterostructure,
            rng,
        }
    }
}

impl<'a, R: Rng + ?Sized> QuantumDotBuilder<&'a DotGeometry, &'a Heterostructure, &'a mut R> {
    /// Find the states of the dot
    ///
    /// # Panics
    ///
    /// Panics if the geometry is not strictly positive or if any state would recombine
    /// at a negative energy.
    pub fn build(self) -> QuantumDot {
        let states = states::confined_states(self.geometry, self.heterostructure, self.rng);
        let occupation = OccupationTable::new(
            &states.levels,
            states.recombination_offset(self.heterostructure),
        );
        let number_of_states = states.recombination_energies.len();
        tracing::debug!(
            "dot at ({}, {}) holds {} states on {} levels",
            self.geometry.x(),
            self.geometry.y(),
            number_of_states,
            states.levels.len()
        );

        QuantumDot {
            geometry: *self.geometry,
            states: states.recombination_energies,
            number_of_states,
            number_of_free_states: number_of_states,
            occupation,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumDot {
    geometry: DotGeometry,
    /// Recombination energies in eV, each orbital listed once per spin
    states: Vec<Decimal>,
    number_of_states: usize,
    number_of_free_states: usize,
    occupation: OccupationTable,
}

impl QuantumDot {
    pub fn geometry(&self) -> &DotGeometry {
        &self.geometry
    }

    pub fn x(&self) -> Decimal {
        self.geometry.x()
    }

    pub fn y(&self) -> Decimal {
        self.geometry.y()
    }

    pub fn radius(&self) -> Decimal {
        self.geometry.radius
    }

    pub fn height(&self) -> Decimal {
        self.geometry.height
    }

    pub fn states(&self) -> &[Decimal] {
        &self.states
    }

    pub fn number_of_states(&self) -> usize {
        self.number_of_states
    }

    /// States not yet taken by a carrier. Nothing fills states yet, so this equals the total.
    pub fn number_of_free_states(&self) -> usize {
        self.number_of_free_states
    }

    /// Cumulative occupation probability -> recombination energy of the level it closes
    pub fn probabilities_per_level(&self) -> &BTreeMap<Decimal, Decimal> {
        self.occupation.cumulative()
    }

    /// The ascending cumulative probabilities at which the levels close
    pub fn recombination_probabilities(&self) -> impl DoubleEndedIterator<Item = &Decimal> + '_ {
        self.occupation.cumulative().keys()
    }

    /// The recombination energy selected by a uniform variate in `(0, 1]`
    ///
    /// Returns `None` for a dot without states or a variate above one.
    pub fn recombination_energy_for(&self, variate: Decimal) -> Option<Decimal> {
        self.occupation.sample(variate)
    }

    /// The recombination energy averaged over the thermal occupation of the levels
    pub fn mean_recombination_energy(&self) -> Option<Decimal> {
        self.occupation.mean_recombination_energy()
    }

    pub fn overlaps(&self, other: &QuantumDot) -> bool {
        self.geometry.overlaps(&other.geometry)
    }

    /// A new dot at the same position with its larger dimension scaled by `multiplier`
    ///
    /// The states are recomputed for the new geometry.
    pub fn copy_with_size_change<R: Rng + ?Sized>(
        &self,
        multiplier: Decimal,
        heterostructure: &Heterostructure,
        rng: &mut R,
    ) -> QuantumDot {
        let mut geometry = self.geometry;
        if geometry.radius >= geometry.height {
            geometry.radius = (geometry.radius * multiplier).normalize();
        } else {
            geometry.height = (geometry.height * multiplier).normalize();
        }
        QuantumDotBuilder::new()
            .with_geometry(&geometry)
            .with_heterostructure(heterostructure)
            .with_rng(rng)
            .build()
    }
}

impl Distance<Point2> for QuantumDot {
    fn distance(&self, point: &Point2) -> Decimal {
        self.geometry.distance(point)
    }
}

impl Distance<QuantumDot> for QuantumDot {
    fn distance(&self, other: &QuantumDot) -> Decimal {
        self.geometry.distance(&other.geometry)
    }
}

#[cfg(test)]
mod test {
    use super::{QuantumDot, QuantumDotBuilder};
    use crate::materials::{Heterostructure, MaterialLibrary};
    use dosgen_sample::{Distance, DotGeometry, Point2};
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn inas_in_gaas() -> Heterostructure {
        MaterialLibrary::builtin()
            .heterostructure("InAs", "GaAs")
            .unwrap()
    }

    fn build(geometry: DotGeometry, heterostructure: &Heterostructure, seed: u64) -> QuantumDot {
        QuantumDotBuilder::new()
            .with_geometry(&geometry)
            .with_heterostructure(heterostructure)
            .with_rng(&mut StdRng::seed_from_u64(seed))
            .build()
    }

    #[test]
    fn typical_dot_has_a_complete_distribution() {
        let heterostructure = inas_in_gaas();
        let dot = build(
            DotGeometry::new(dec!(40), dec!(60), dec!(12), dec!(3.5)),
            &heterostructure,
            1,
        );

        assert!(dot.number_of_states() > 0);
        assert_eq!(dot.number_of_states(), dot.states().len());
        assert!(dot.number_of_free_states() <= dot.number_of_states());
        assert!(dot.states().iter().all(|energy| *energy >= Decimal::ZERO));
        assert_eq!(
            dot.recombination_probabilities().next_back(),
            Some(&Decimal::ONE)
        );
        assert_eq!(
            dot.recombination_probabilities().count(),
            dot.probabilities_per_level().len()
        );

        // Every sampled energy is one of the states of the dot
        for variate in [dec!(0.000001), dec!(0.5), dec!(0.999), Decimal::ONE] {
            let energy = dot.recombination_energy_for(variate).unwrap();
            assert!(dot.states().contains(&energy));
        }
        assert!(dot.recombination_energy_for(dec!(1.1)).is_none());

        let lowest = *dot.states().iter().min().unwrap();
        let highest = *dot.states().iter().max().unwrap();
        let mean = dot.mean_recombination_energy().unwrap();
        assert!(mean >= lowest && mean <= highest);
    }

    #[test]
    fn tiny_dot_has_no_states() {
        // Every axis binds a ground state, but together they lie above the conduction band offset
        let dot = build(
            DotGeometry::new(dec!(0), dec!(0), dec!(0.5), dec!(0.05)),
            &inas_in_gaas(),
            2,
        );

        assert!(dot.states().is_empty());
        assert!(dot.probabilities_per_level().is_empty());
        assert_eq!(dot.recombination_probabilities().count(), 0);
        assert_eq!(dot.number_of_states(), 0);
        assert_eq!(dot.number_of_free_states(), 0);
        assert!(dot.mean_recombination_energy().is_none());
    }

    #[test]
    fn identical_seeds_give_identical_dots() {
        let heterostructure = inas_in_gaas();
        let geometry = DotGeometry::new(dec!(1), dec!(2), dec!(13.7), dec!(3.1));
        assert_eq!(
            build(geometry, &heterostructure, 8),
            build(geometry, &heterostructure, 8)
        );
    }

    #[test]
    fn unit_size_change_preserves_the_geometry() {
        let heterostructure = inas_in_gaas();
        let dot = build(
            DotGeometry::new(dec!(100.5), dec!(7.25), dec!(12), dec!(3.5)),
            &heterostructure,
            3,
        );
        let copy = dot.copy_with_size_change(
            dec!(1.0),
            &heterostructure,
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(copy.geometry(), dot.geometry());
        assert_eq!(copy.number_of_states(), dot.number_of_states());
    }

    #[test]
    fn size_change_scales_the_larger_dimension() {
        let heterostructure = inas_in_gaas();
        let mut rng = StdRng::seed_from_u64(5);
        let wide = build(
            DotGeometry::new(dec!(0), dec!(0), dec!(12), dec!(3.5)),
            &heterostructure,
            5,
        );
        let shrunk = wide.copy_with_size_change(dec!(0.5), &heterostructure, &mut rng);
        assert_eq!(shrunk.radius(), dec!(6));
        assert_eq!(shrunk.height(), dec!(3.5));
        assert_eq!((shrunk.x(), shrunk.y()), (wide.x(), wide.y()));

        let tall = build(
            DotGeometry::new(dec!(0), dec!(0), dec!(2), dec!(4)),
            &heterostructure,
            5,
        );
        let stretched = tall.copy_with_size_change(dec!(1.5), &heterostructure, &mut rng);
        assert_eq!(stretched.radius(), dec!(2));
        assert_eq!(stretched.height(), dec!(6));
    }

    #[test]
    fn clones_keep_the_computed_tables() {
        let dot = build(
            DotGeometry::new(dec!(0), dec!(0), dec!(11), dec!(3)),
            &inas_in_gaas(),
            6,
        );
        let copy = dot.clone();
        assert_eq!(copy.states(), dot.states());
        assert_eq!(copy.probabilities_per_level(), dot.probabilities_per_level());
    }

    #[test]
    fn distances_are_measured_between_centres() {
        let heterostructure = inas_in_gaas();
        let first = build(
            DotGeometry::new(dec!(0), dec!(0), dec!(12), dec!(3.5)),
            &heterostructure,
            7,
        );
        let second = build(
            DotGeometry::new(dec!(30), dec!(40), dec!(12), dec!(3.5)),
            &heterostructure,
            7,
        );
        assert_eq!(first.distance(&second), dec!(50));
        assert_eq!(first.distance(&Point2::new(dec!(0), dec!(10))), dec!(10));
        assert!(!first.overlaps(&second));
    }
}
