// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Density of states
//!
//! Histograms the recombination energies of every state in the ensemble. Energies are
//! sorted once and consumed bin by bin with a cursor. Each bin is half open,
//! `[lower, lower + width)`, and bins are emitted from the lowest energy up to the first
//! bin whose lower edge passes the highest energy, including empty bins in between.

use dosgen_sample::Sample;
use miette::Diagnostic;
use rust_decimal::Decimal;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum AggregationError {
    #[error("the energy bin width must be positive; got {0} eV")]
    BinWidth(Decimal),
}

pub struct DosAggregatorBuilder<RefSample> {
    sample: RefSample,
    bin_width: Decimal,
}

impl DosAggregatorBuilder<()> {
    pub fn new() -> Self {
        Self {
            sample: (),
            bin_width: rust_decimal_macros::dec!(0.002),
        }
    }
}

impl Default for DosAggregatorBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefSample> DosAggregatorBuilder<RefSample> {
    pub fn with_sample(self, sample: &Sample) -> DosAggregatorBuilder<&Sample> {
        DosAggregatorBuilder {
            sample,
            bin_width: self.bin_width,
        }
    }

    pub fn with_bin_width(self, bin_width: Decimal) -> Self {
        Self { bin_width, ..self }
    }
}

impl<'a> DosAggregatorBuilder<&'a Sample> {
    pub fn build(self) -> Result<DosAggregator, AggregationError> {
        if self.bin_width <= Decimal::ZERO {
            return Err(AggregationError::BinWidth(self.bin_width));
        }
        Ok(DosAggregator {
            bin_width: self.bin_width,
            area: self.sample.area_in_square_metres(),
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct DosAggregator {
    bin_width: Decimal,
    /// Sample area in m^2
    area: Decimal,
}

impl DosAggregator {
    pub fn bin_width(&self) -> Decimal {
        self.bin_width
    }

    pub fn aggregate(&self, energies: impl IntoIterator<Item = Decimal>) -> DensityOfStates {
        let mut energies = energies.into_iter().collect::<Vec<_>>();
        energies.sort_unstable();
        let (lowest, highest) = match (energies.first(), energies.last()) {
            (Some(lowest), Some(highest)) => (*lowest, *highest),
            _ => return DensityOfStates::default(),
        };

        let mut rows = Vec::new();
        let mut cursor = 0;
        let mut lower = lowest;
        while lower <= highest {
            let upper = lower + self.bin_width;
            let count = energies[cursor..].partition_point(|energy| *energy < upper);
            cursor += count;
            rows.push(Bin {
                lower,
                density: Decimal::from(count) / self.area,
            });
            lower = upper;
        }
        debug_assert_eq!(cursor, energies.len());

        tracing::info!(
            "Binned {} states into {} bins of {} eV",
            energies.len(),
            rows.len(),
            self.bin_width
        );
        DensityOfStates { rows }
    }
}

/// A single histogram bin
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bin {
    /// Lower edge in eV
    pub lower: Decimal,
    /// States per m^2
    pub density: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DensityOfStates {
    rows: Vec<Bin>,
}

impl DensityOfStates {
    pub fn rows(&self) -> &[Bin] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
