// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::Material;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
/// Enum with all compounds whose parameters ship with the binary
///
/// As compounds may be added in future this is labelled as `non_exhaustive`
pub enum Compound {
    InAs,
    GaAs,
    AlAs,
}

impl std::fmt::Display for Compound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Compound::InAs => {
                write!(f, "InAs")
            }
            Compound::GaAs => {
                write!(f, "GaAs")
            }
            Compound::AlAs => {
                write!(f, "AlAs")
            }
        }
    }
}

impl Compound {
    pub(crate) const ALL: [Compound; 3] = [Compound::InAs, Compound::GaAs, Compound::AlAs];

    /// Builds the band parameters of the compound at room temperature
    pub fn material(&self) -> Material {
        match self {
            Compound::InAs => Material::new(self.to_string(), dec!(0.354), dec!(0.023), dec!(0.41)),
            Compound::GaAs => Material::new(self.to_string(), dec!(1.424), dec!(0.067), dec!(0.51)),
            Compound::AlAs => Material::new(self.to_string(), dec!(3.03), dec!(0.15), dec!(0.76)),
        }
    }
}

/// Conduction band offsets between compiled-in compounds, as (dot, barrier, offset in eV)
pub(crate) fn conduction_band_offsets() -> [(Compound, Compound, Decimal); 2] {
    [
        (Compound::InAs, Compound::GaAs, dec!(0.7)),
        (Compound::GaAs, Compound::AlAs, dec!(1.0)),
    ]
}
