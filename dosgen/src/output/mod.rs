// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Output
//!
//! Plain text results. The density of states and the dot list are tab separated tables
//! with a single header line, so they can be read straight into gnuplot or a spreadsheet.
//! Dot lists written by one run are read back by the next, which then only places the
//! dots still missing.

mod dot_list;
mod plot;

pub use dot_list::{read_dot_list, write_dot_list};
pub use plot::{run_gnuplot, PlotScript};

use crate::{dos::DensityOfStates, error::OutputError};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const DOS_HEADER: &str = "Energy (eV)\tDOS (m^-2)";
/// Significant digits kept on the energy axis
const ENERGY_DIGITS: u32 = 4;

/// Locations of the files written by a run of `number_of_dots` dots
#[derive(Clone, Debug)]
pub struct ResultPaths {
    directory: PathBuf,
    dot_list: PathBuf,
    number_of_dots: usize,
}

impl ResultPaths {
    /// A relative `dot_list` is resolved against the results `directory`
    pub fn new(
        directory: impl Into<PathBuf>,
        dot_list: impl AsRef<Path>,
        number_of_dots: usize,
    ) -> Self {
        let directory = directory.into();
        Self {
            dot_list: directory.join(dot_list),
            directory,
            number_of_dots,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the results directory if it does not exist
    pub fn ensure_directory(&self) -> Result<(), OutputError> {
        if !self.directory.exists() {
            std::fs::create_dir_all(&self.directory)?;
        }
        Ok(())
    }

    pub fn dot_list(&self) -> &Path {
        &self.dot_list
    }

    pub fn density_of_states(&self) -> PathBuf {
        self.directory
            .join(format!("DOS_{}QDs.dat", self.number_of_dots))
    }

    pub fn plot_image(&self) -> PathBuf {
        self.directory
            .join(format!("DOS_{}QDs.png", self.number_of_dots))
    }

    pub fn plot_script(&self) -> PathBuf {
        self.directory
            .join(format!("DOS_{}QDs.gp", self.number_of_dots))
    }
}

/// Writes the density of states table
pub fn write_density_of_states(path: &Path, dos: &DensityOfStates) -> Result<(), OutputError> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "{}", DOS_HEADER)?;
    for bin in dos.rows() {
        let energy = bin.lower.round_sf(ENERGY_DIGITS).unwrap_or(bin.lower);
        writeln!(file, "{}\t{}", energy, bin.density.normalize())?;
    }
    file.flush()?;
    tracing::info!("Wrote {} bins to {}", dos.len(), path.display());
    Ok(())
}
