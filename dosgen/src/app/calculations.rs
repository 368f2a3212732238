// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Calculations
//!
//! Delegated functions from `App` which place the dots, find their states and reduce
//! them to a density of states
//!

use super::{configuration::Configuration, error::DosGenError};
use crate::{
    dos::{DensityOfStates, DosAggregatorBuilder},
    dot::{QuantumDot, QuantumDotBuilder},
    materials::{Heterostructure, MaterialLibrary},
    output::{self, PlotScript, ResultPaths},
};
use console::Term;
use dosgen_sample::{DotGeometry, PlacementGeneratorBuilder, Sample, SizeDistribution};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

/// The dots of a run together with their density of states
pub(crate) struct Ensemble {
    pub(crate) dots: Vec<QuantumDot>,
    pub(crate) density_of_states: DensityOfStates,
}

#[tracing::instrument(name = "Materials", skip_all)]
pub(crate) fn build_heterostructure(config: &Configuration) -> Result<Heterostructure, DosGenError> {
    let mut library = MaterialLibrary::builtin();
    if let Some(file) = config.materials.file.as_deref() {
        library.extend_from_file(file)?;
    }
    let heterostructure = library.heterostructure(&config.materials.dot, &config.materials.barrier)?;
    tracing::info!(
        "{} dots in {}: conduction band offset {} eV, valence band offset {} eV",
        heterostructure.dot().name(),
        heterostructure.barrier().name(),
        heterostructure.conduction_band_offset(),
        heterostructure.valence_band_offset()
    );
    Ok(heterostructure)
}

/// Dots already listed in the dot list of a previous run, or none when there is no list
fn load_existing_dots(paths: &ResultPaths) -> Result<Vec<DotGeometry>, DosGenError> {
    if !paths.dot_list().exists() {
        tracing::info!("No dot list found, placing every dot at random");
        return Ok(Vec::new());
    }
    Ok(output::read_dot_list(paths.dot_list())?)
}

/// Places the dots and draws one solver seed for each of them
///
/// Seeds are drawn sequentially from the placement generator, so a fixed master seed
/// reproduces the whole run however the dots are later scheduled.
#[tracing::instrument(name = "Placement", skip_all)]
pub(crate) fn place_dots(
    config: &Configuration,
    sample: &Sample,
    paths: &ResultPaths,
) -> Result<(Vec<DotGeometry>, Vec<u64>), DosGenError> {
    let distribution = SizeDistribution::from(&config.distribution);
    let mut generator = PlacementGeneratorBuilder::new()
        .with_sample(sample)
        .with_size_distribution(&distribution)
        .with_seed(config.global.seed)
        .with_maximum_attempts(config.placement.maximum_attempts)
        .with_cell_size(config.placement.cell_size)
        .build()?;

    let mut dots = load_existing_dots(paths)?;
    let missing = config.global.number_of_dots.saturating_sub(dots.len());
    tracing::info!("Loaded {} dots, placing {} more", dots.len(), missing);
    let placed = generator.place(&dots, missing)?;
    dots.extend(placed);

    let seeds = dots
        .iter()
        .map(|_| generator.rng_mut().gen::<u64>())
        .collect();
    Ok((dots, seeds))
}

/// Finds the states of every dot in parallel
#[tracing::instrument(name = "States", skip_all)]
pub(crate) fn compute_states(
    dots: &[DotGeometry],
    seeds: &[u64],
    heterostructure: &Heterostructure,
    term: &Term,
) -> Vec<QuantumDot> {
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let pb = ProgressBar::with_draw_target(
        dots.len() as u64,
        ProgressDrawTarget::term(term.clone(), 60),
    );
    pb.set_style(spinner_style);
    pb.set_message("Finding confined states");

    // Collecting is the barrier: every dot is finished before the states are merged
    let dots = dots
        .par_iter()
        .zip(seeds.par_iter())
        .progress_with(pb)
        .map(|(geometry, seed)| {
            QuantumDotBuilder::new()
                .with_geometry(geometry)
                .with_heterostructure(heterostructure)
                .with_rng(&mut StdRng::seed_from_u64(*seed))
                .build()
        })
        .collect::<Vec<_>>();
    tracing::info!(
        "Found {} states in {} dots",
        dots.iter().map(QuantumDot::number_of_states).sum::<usize>(),
        dots.len()
    );
    dots
}

/// Runs the full calculation, writing results into `paths`
pub(crate) fn simulate(
    config: &Configuration,
    paths: &ResultPaths,
    term: &Term,
) -> Result<Ensemble, DosGenError> {
    let heterostructure = build_heterostructure(config)?;
    let sample = Sample::new(config.sample.width, config.sample.height)?;

    let (geometries, seeds) = place_dots(config, &sample, paths)?;
    let dots = compute_states(&geometries, &seeds, &heterostructure, term);

    let aggregator = DosAggregatorBuilder::new()
        .with_sample(&sample)
        .with_bin_width(config.dos.bin_width)
        .build()?;
    let density_of_states =
        aggregator.aggregate(dots.iter().flat_map(|dot| dot.states().iter().copied()));

    let ensemble = Ensemble {
        dots,
        density_of_states,
    };
    write_results(config, paths, &ensemble)?;
    Ok(ensemble)
}

#[tracing::instrument(name = "Output", skip_all)]
fn write_results(
    config: &Configuration,
    paths: &ResultPaths,
    ensemble: &Ensemble,
) -> Result<(), DosGenError> {
    let table = paths.density_of_states();
    output::write_density_of_states(&table, &ensemble.density_of_states)?;
    output::write_dot_list(
        paths.dot_list(),
        ensemble.dots.iter().map(QuantumDot::geometry),
    )?;

    if config.plot.enabled {
        let image = paths.plot_image();
        let script_path = paths.plot_script();
        let script = PlotScript {
            table: &table,
            image: &image,
            number_of_dots: ensemble.dots.len(),
            energy_window: (config.plot.minimum_energy, config.plot.maximum_energy),
        };
        script.write(&script_path)?;
        if config.plot.run_gnuplot {
            // The tables are already on disk, so a failed plot is not fatal
            if let Err(e) = output::run_gnuplot(&script_path) {
                tracing::warn!("Failed to plot the density of states: {}", e);
            }
        }
    }
    Ok(())
}
