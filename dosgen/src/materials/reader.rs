// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{Material, MaterialError};
use config::{Config, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// The contents of a materials file
///
/// ```toml
/// [[materials]]
/// name = "InAs"
/// bandgap = 0.354
/// electron_effective_mass = 0.023
/// hole_effective_mass = 0.41
///
/// [[offsets]]
/// dot = "InAs"
/// barrier = "GaAs"
/// conduction_band_offset = 0.7
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct MaterialsFile {
    #[serde(default)]
    pub(crate) materials: Vec<Material>,
    #[serde(default)]
    pub(crate) offsets: Vec<OffsetRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OffsetRecord {
    pub(crate) dot: String,
    pub(crate) barrier: String,
    pub(crate) conduction_band_offset: Decimal,
}

impl MaterialsFile {
    pub(crate) fn build(path: &Path) -> Result<Self, MaterialError> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        Ok(s.try_deserialize()?)
    }
}
