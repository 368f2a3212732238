// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the simulation. Lengths are in nm, energies in eV
//! and masses in units of the free electron mass, which keeps every quantity well inside
//! the range of a 28 digit decimal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const BOLTZMANN: Decimal = dec!(0.00008617333262); // The Boltzmann constant in eV / K
pub const HBAR_SQUARED_OVER_ELECTRON_MASS: Decimal = dec!(0.0761996424); // hbar^2 / m0 in eV nm^2
pub const TEMPERATURE: Decimal = dec!(300); // Lattice temperature used for level occupations in K
pub const SQRT_PI: Decimal = dec!(1.772453850905516027298167483); // Side of the square with the area of a unit disc
