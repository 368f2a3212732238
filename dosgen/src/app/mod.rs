// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

/// This module governs the high-level implementation of the simulation
mod calculations;
mod configuration;
mod error;
mod telemetry;

use crate::output::ResultPaths;
use clap::{ArgEnum, Parser};
use configuration::Configuration;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A TOML file of materials and band offsets extending the built-in library
    materials: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Master seed, overriding the configured seed
    #[clap(short, long)]
    seed: Option<u64>,
    /// Total number of dots on the sample, overriding the configured number
    #[clap(short, long)]
    number_of_dots: Option<usize>,
    /// Directory receiving the results, overriding the configured directory
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl App {
    fn apply_overrides(&self, config: &mut Configuration) {
        if let Some(materials) = &self.materials {
            config.materials.file = Some(materials.clone());
        }
        if let Some(seed) = self.seed {
            config.global.seed = Some(seed);
        }
        if let Some(number_of_dots) = self.number_of_dots {
            config.global.number_of_dots = number_of_dots;
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Info,
    Debug,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    let mut config = Configuration::build()?;
    cli.apply_overrides(&mut config);

    let paths = ResultPaths::new(
        &config.output.directory,
        &config.output.dot_list,
        config.global.number_of_dots,
    );
    paths.ensure_directory()?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, paths.directory());
    telemetry::init_subscriber(subscriber);

    let term = console::Term::stdout();
    tracing::info!(
        "Simulating {} dots, writing to {}",
        config.global.number_of_dots,
        paths.directory().display()
    );
    let ensemble = calculations::simulate(&config, &paths, &term)?;
    tracing::info!(
        "Density of states spans {} bins over {} dots",
        ensemble.density_of_states.len(),
        ensemble.dots.len()
    );

    Ok(())
}
