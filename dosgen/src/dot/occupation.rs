// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Thermal occupation of the electron levels in a dot
//!
//! Each distinct confinement level `E` is weighted with the Fermi-Dirac factor
//! `1 / (1 + exp(E / kT))` at zero chemical potential. The weights are normalised and
//! accumulated in ascending energy order into an inverse cumulative distribution, which
//! maps a uniform variate onto the recombination energy of the level it selects.

use crate::constants::{BOLTZMANN, TEMPERATURE};
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::{BTreeMap, BTreeSet};

/// `exp(-x)` for `x >= 0`, vanishing when `exp(x)` leaves the decimal range
fn decaying_exponential(x: Decimal) -> Decimal {
    x.checked_exp()
        .map(|growth| Decimal::ONE / growth)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OccupationTable {
    /// Cumulative probability -> recombination energy, keys strictly increasing to one
    cumulative: BTreeMap<Decimal, Decimal>,
    mean_recombination_energy: Option<Decimal>,
}

impl OccupationTable {
    /// Build the table for confinement `levels`, each recombining at `level + offset`
    pub(crate) fn new(levels: &BTreeSet<Decimal>, offset: Decimal) -> Self {
        let ground = match levels.iter().next() {
            Some(ground) => *ground,
            None => return Self::default(),
        };
        let thermal_energy = BOLTZMANN * TEMPERATURE;

        // Weights relative to the ground level, p_i / p_0 = e^(x_0 - x_i) (1 + e^-x_0) / (1 + e^-x_i)
        let x_0 = ground / thermal_energy;
        let numerator = Decimal::ONE + decaying_exponential(x_0);
        let weights = levels
            .iter()
            .map(|level| {
                let x = *level / thermal_energy;
                decaying_exponential(x - x_0) * numerator / (Decimal::ONE + decaying_exponential(x))
            })
            .collect::<Vec<_>>();
        let total: Decimal = weights.iter().sum();

        let mut cumulative = BTreeMap::new();
        let mut running = Decimal::ZERO;
        let mut previous = Decimal::ZERO;
        let mut mean = Decimal::ZERO;
        let last = levels.len() - 1;
        for (position, (level, weight)) in levels.iter().zip(weights).enumerate() {
            let probability = weight / total;
            let energy = *level + offset;
            mean += probability * energy;
            running += probability;

            let key = if position == last {
                Decimal::ONE
            } else {
                running
            };
            if key > previous && (key < Decimal::ONE || position == last) {
                cumulative.insert(key, energy);
                previous = key;
            }
        }

        Self {
            cumulative,
            mean_recombination_energy: Some(mean),
        }
    }

    pub(crate) fn cumulative(&self) -> &BTreeMap<Decimal, Decimal> {
        &self.cumulative
    }

    /// The recombination energy stored under the smallest cumulative key `>= variate`
    pub(crate) fn sample(&self, variate: Decimal) -> Option<Decimal> {
        self.cumulative
            .range(variate..)
            .next()
            .map(|(_, energy)| *energy)
    }

    pub(crate) fn mean_recombination_energy(&self) -> Option<Decimal> {
        self.mean_recombination_energy
    }
}

#[cfg(test)]
mod test {
    use super::OccupationTable;
    use crate::constants::{BOLTZMANN, TEMPERATURE};
    use approx::assert_relative_eq;
    use num_traits::ToPrimitive;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    #[test]
    fn no_levels_give_an_empty_table() {
        let table = OccupationTable::new(&BTreeSet::new(), dec!(1));
        assert!(table.cumulative().is_empty());
        assert!(table.mean_recombination_energy().is_none());
        assert!(table.sample(dec!(0.5)).is_none());
    }

    #[test]
    fn single_level_takes_all_the_weight() {
        let levels = BTreeSet::from([dec!(0.1)]);
        let table = OccupationTable::new(&levels, dec!(0.9));
        assert_eq!(table.cumulative().len(), 1);
        assert_eq!(table.cumulative().keys().next_back(), Some(&Decimal::ONE));
        assert_eq!(table.mean_recombination_energy(), Some(dec!(1.0)));
        assert_eq!(table.sample(dec!(0.01)), Some(dec!(1.0)));
    }

    #[test]
    fn weights_follow_the_fermi_dirac_distribution() {
        let levels = BTreeSet::from([dec!(0.05), dec!(0.08)]);
        let table = OccupationTable::new(&levels, Decimal::ZERO);

        let kt = (BOLTZMANN * TEMPERATURE).to_f64().unwrap();
        let fermi_dirac = |energy: f64| 1. / (1. + (energy / kt).exp());
        let expected = fermi_dirac(0.05) / (fermi_dirac(0.05) + fermi_dirac(0.08));

        let (first_key, first_energy) = table.cumulative().iter().next().unwrap();
        assert_relative_eq!(first_key.to_f64().unwrap(), expected, max_relative = 1e-5);
        assert_eq!(*first_energy, dec!(0.05));
        // A variate just above the first key selects the upper level
        assert_eq!(table.sample(*first_key + dec!(0.000001)), Some(dec!(0.08)));
        assert_eq!(table.sample(*first_key), Some(dec!(0.05)));
    }

    #[test]
    fn deep_ladders_end_exactly_at_one() {
        let levels = (0..400)
            .map(|index| Decimal::from(index) * dec!(0.0025))
            .collect::<BTreeSet<_>>();
        let table = OccupationTable::new(&levels, dec!(0.4));

        let keys = table.cumulative().keys().copied().collect::<Vec<_>>();
        assert_eq!(keys.last(), Some(&Decimal::ONE));
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(keys[0] > Decimal::ZERO);
        let mean = table.mean_recombination_energy().unwrap();
        assert!(mean > dec!(0.4) && mean < dec!(1.4));
    }
}
