// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Band parameters for the compounds forming a dot sample
//!
//! A `MaterialLibrary` maps material names onto their bandgap and carrier effective masses,
//! and ordered (dot, barrier) pairs onto the conduction band offset between them. The
//! library starts from the compiled-in `Compound` catalogue and can be extended from a
//! TOML file supplied by the user. Resolving a dot and barrier pair yields a
//! `Heterostructure`, which carries everything a dot needs to find its bound states.

mod catalogue;
mod reader;

pub use catalogue::Compound;

use miette::Diagnostic;
use reader::MaterialsFile;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MaterialError {
    #[error("no parameters are known for material {0}")]
    #[diagnostic(help("add the material to the materials file"))]
    UnknownMaterial(String),
    #[error("no conduction band offset is known between dot {dot} and barrier {barrier}")]
    #[diagnostic(help("add an [[offsets]] entry for the pair to the materials file"))]
    UnknownOffset { dot: String, barrier: String },
    #[error("effective masses of {name} must be positive, found electron {electron} and hole {hole}")]
    NonPositiveMass {
        name: String,
        electron: Decimal,
        hole: Decimal,
    },
    #[error("holes are not confined in {dot} by {barrier}: valence band offset {offset} eV")]
    Unconfined {
        dot: String,
        barrier: String,
        offset: Decimal,
    },
    #[error("failed to read materials file")]
    Read(#[from] config::ConfigError),
}

/// Band parameters of a single compound
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Material {
    name: String,
    /// Bandgap in eV
    bandgap: Decimal,
    /// Effective mass in units of the free electron mass
    electron_effective_mass: Decimal,
    hole_effective_mass: Decimal,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        bandgap: Decimal,
        electron_effective_mass: Decimal,
        hole_effective_mass: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            bandgap,
            electron_effective_mass,
            hole_effective_mass,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bandgap(&self) -> Decimal {
        self.bandgap
    }

    pub fn electron_effective_mass(&self) -> Decimal {
        self.electron_effective_mass
    }

    pub fn hole_effective_mass(&self) -> Decimal {
        self.hole_effective_mass
    }

    fn validate(&self) -> Result<(), MaterialError> {
        if self.electron_effective_mass <= Decimal::ZERO || self.hole_effective_mass <= Decimal::ZERO
        {
            return Err(MaterialError::NonPositiveMass {
                name: self.name.clone(),
                electron: self.electron_effective_mass,
                hole: self.hole_effective_mass,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
    /// Conduction band offsets keyed on (dot, barrier)
    offsets: HashMap<(String, String), Decimal>,
}

impl MaterialLibrary {
    /// A library holding every compiled-in `Compound`
    pub fn builtin() -> Self {
        let mut library = Self::default();
        for compound in Compound::ALL {
            library
                .materials
                .insert(compound.to_string(), compound.material());
        }
        for (dot, barrier, offset) in catalogue::conduction_band_offsets() {
            library.insert_offset(dot.to_string(), barrier.to_string(), offset);
        }
        library
    }

    /// Add a material, replacing any existing entry with the same name
    pub fn insert(&mut self, material: Material) -> Result<(), MaterialError> {
        material.validate()?;
        tracing::debug!("Registering material {}", material.name);
        self.materials.insert(material.name.clone(), material);
        Ok(())
    }

    pub fn insert_offset(
        &mut self,
        dot: impl Into<String>,
        barrier: impl Into<String>,
        conduction_band_offset: Decimal,
    ) {
        self.offsets
            .insert((dot.into(), barrier.into()), conduction_band_offset);
    }

    /// Overlay the materials and offsets listed in a TOML file onto the library
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), MaterialError> {
        tracing::info!("Reading materials from {}", path.display());
        let file = MaterialsFile::build(path)?;
        for material in file.materials {
            self.insert(material)?;
        }
        for record in file.offsets {
            self.insert_offset(record.dot, record.barrier, record.conduction_band_offset);
        }
        Ok(())
    }

    pub fn material(&self, name: &str) -> Result<&Material, MaterialError> {
        self.materials
            .get(name)
            .ok_or_else(|| MaterialError::UnknownMaterial(name.to_owned()))
    }

    /// The conduction band offset of a dot in a barrier
    ///
    /// When only the reverse pair is known its offset is returned with the sign flipped.
    pub fn conduction_band_offset(&self, dot: &str, barrier: &str) -> Result<Decimal, MaterialError> {
        let key = (dot.to_owned(), barrier.to_owned());
        if let Some(offset) = self.offsets.get(&key) {
            return Ok(*offset);
        }
        let reversed = (key.1, key.0);
        self.offsets
            .get(&reversed)
            .map(|offset| -*offset)
            .ok_or_else(|| MaterialError::UnknownOffset {
                dot: reversed.1,
                barrier: reversed.0,
            })
    }

    pub fn heterostructure(&self, dot: &str, barrier: &str) -> Result<Heterostructure, MaterialError> {
        Heterostructure::new(
            self.material(dot)?.clone(),
            self.material(barrier)?.clone(),
            self.conduction_band_offset(dot, barrier)?,
        )
    }
}

/// A dot material embedded in a barrier material
#[derive(Clone, Debug, PartialEq)]
pub struct Heterostructure {
    dot: Material,
    barrier: Material,
    conduction_band_offset: Decimal,
}

impl Heterostructure {
    /// Fails when the pair does not confine holes, as every dot needs a hole ground state
    pub fn new(
        dot: Material,
        barrier: Material,
        conduction_band_offset: Decimal,
    ) -> Result<Self, MaterialError> {
        dot.validate()?;
        barrier.validate()?;
        let heterostructure = Self {
            dot,
            barrier,
            conduction_band_offset,
        };
        let offset = heterostructure.valence_band_offset();
        if offset <= Decimal::ZERO {
            return Err(MaterialError::Unconfined {
                dot: heterostructure.dot.name,
                barrier: heterostructure.barrier.name,
                offset,
            });
        }
        Ok(heterostructure)
    }

    pub fn dot(&self) -> &Material {
        &self.dot
    }

    pub fn barrier(&self) -> &Material {
        &self.barrier
    }

    /// Depth of the electron well in eV
    pub fn conduction_band_offset(&self) -> Decimal {
        self.conduction_band_offset
    }

    /// Depth of the hole well in eV, the part of the bandgap difference not taken by the conduction band
    pub fn valence_band_offset(&self) -> Decimal {
        self.barrier.bandgap - self.dot.bandgap - self.conduction_band_offset
    }
}
