// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Enumeration of the confined states of a dot
//!
//! The dot is treated as a box: the circular footprint is replaced by the square of equal
//! area, with side `radius * sqrt(pi)`, and the height bounds the third axis. The box is
//! separable, so every electron state is a triple `(nx, ny, nz)` of one dimensional well
//! states whose confinement energies add.

use crate::{
    constants::{HBAR_SQUARED_OVER_ELECTRON_MASS, SQRT_PI},
    materials::Heterostructure,
    well::WellEquation,
};
use dosgen_sample::DotGeometry;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

/// Highest number of quantum numbers tried along the growth axis
const VERTICAL_DEPTH: usize = 10;
/// Highest number of quantum numbers tried along each in-plane axis
const LATERAL_DEPTH: usize = 100;

/// The confinement energies of one axis, in order of quantum number, up to the first unbound index
#[derive(Debug)]
struct AxisLadder {
    energies: Vec<Decimal>,
}

impl AxisLadder {
    fn climb<R: Rng + ?Sized>(
        size: Decimal,
        band_offset: Decimal,
        effective_mass: Decimal,
        depth: usize,
        rng: &mut R,
    ) -> Self {
        let equation = WellEquation::for_well(size, band_offset, effective_mass);
        let energies = (0..depth)
            .map_while(|index| equation.solve(index, &mut *rng))
            .map(|root| confinement_energy(root.value(), size, effective_mass))
            .collect();
        Self { energies }
    }

    /// The confinement energy of quantum number `index`, `None` once the axis is unbound
    fn rung(&self, index: usize) -> Option<Decimal> {
        self.energies.get(index).copied()
    }
}

/// `2 hbar^2 v^2 / (m L^2)` for the well parameter `v` of a well of size `L`
fn confinement_energy(v: Decimal, size: Decimal, effective_mass: Decimal) -> Decimal {
    let ratio = v / size;
    dec!(2) * HBAR_SQUARED_OVER_ELECTRON_MASS / effective_mass * ratio * ratio
}

/// The states found in a single dot
#[derive(Debug, Default)]
pub(crate) struct ConfinedStates {
    /// Distinct electron confinement levels, measured from the conduction band edge of the dot
    pub(crate) levels: BTreeSet<Decimal>,
    /// The recombination energy of every state, each orbital appearing once per spin
    pub(crate) recombination_energies: Vec<Decimal>,
    pub(crate) hole_confinement_energy: Decimal,
}

impl ConfinedStates {
    /// Energy added to an electron confinement level to obtain its recombination energy
    pub(crate) fn recombination_offset(&self, heterostructure: &Heterostructure) -> Decimal {
        heterostructure.dot().bandgap() + self.hole_confinement_energy
    }
}

fn is_above_conduction_offset(level: Decimal, heterostructure: &Heterostructure) -> bool {
    level > heterostructure.conduction_band_offset()
}

/// Find every electron state bound in the dot, and the hole ground state
///
/// # Panics
///
/// Panics when the geometry is not physical, or when a state would recombine at a
/// negative energy. Both indicate corrupt input rather than a recoverable condition.
pub(crate) fn confined_states<R: Rng + ?Sized>(
    geometry: &DotGeometry,
    heterostructure: &Heterostructure,
    rng: &mut R,
) -> ConfinedStates {
    assert!(
        geometry.is_physical(),
        "dot geometry must be positive, found radius {} nm and height {} nm",
        geometry.radius,
        geometry.height
    );

    let side = geometry.radius * SQRT_PI;
    let dot = heterostructure.dot();

    let hole_confinement_energy = {
        let valence_band_offset = heterostructure.valence_band_offset();
        let mass = dot.hole_effective_mass();
        let vertical = AxisLadder::climb(geometry.height, valence_band_offset, mass, 1, rng);
        let lateral = AxisLadder::climb(side, valence_band_offset, mass, 1, rng);
        match (vertical.rung(0), lateral.rung(0)) {
            (Some(vertical), Some(lateral)) => vertical + dec!(2) * lateral,
            // The well strength underflows the decimal range, so nothing is bound
            _ => {
                tracing::debug!(
                    "no hole ground state in a dot of radius {} nm and height {} nm",
                    geometry.radius,
                    geometry.height
                );
                return ConfinedStates::default();
            }
        }
    };

    let conduction_band_offset = heterostructure.conduction_band_offset();
    let mass = dot.electron_effective_mass();
    let vertical = AxisLadder::climb(
        geometry.height,
        conduction_band_offset,
        mass,
        VERTICAL_DEPTH,
        rng,
    );
    // Both in-plane axes share the side length, so one ladder serves x and y
    let lateral = AxisLadder::climb(side, conduction_band_offset, mass, LATERAL_DEPTH, rng);

    let mut states = ConfinedStates {
        hole_confinement_energy,
        ..Default::default()
    };
    let offset = states.recombination_offset(heterostructure);

    for nz in 0..VERTICAL_DEPTH {
        let ez = match vertical.rung(nz) {
            Some(energy) => energy,
            None => break,
        };
        for nx in 0..LATERAL_DEPTH {
            let ex = match lateral.rung(nx) {
                Some(energy) => energy,
                None => break,
            };
            for ny in 0..LATERAL_DEPTH {
                let ey = match lateral.rung(ny) {
                    Some(energy) => energy,
                    None => break,
                };
                let level = ex + ey + ez;
                if is_above_conduction_offset(level, heterostructure) {
                    break;
                }

                let recombination_energy = level + offset;
                assert!(
                    recombination_energy >= Decimal::ZERO,
                    "negative recombination energy {recombination_energy} eV for state ({nx}, {ny}, {nz})"
                );
                tracing::trace!("state ({nx}, {ny}, {nz}) confined at {level} eV");
                states.levels.insert(level);
                states.recombination_energies.push(recombination_energy);
                states.recombination_energies.push(recombination_energy);
            }
        }
    }
    states
}
