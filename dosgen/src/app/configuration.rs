// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use config::{Config, ConfigError, Environment, File};
use dosgen_sample::SizeDistribution;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub(crate) global: GlobalConfiguration,
    pub(crate) sample: SampleConfiguration,
    pub(crate) distribution: DistributionConfiguration,
    pub(crate) placement: PlacementConfiguration,
    pub(crate) materials: MaterialsConfiguration,
    pub(crate) dos: DosConfiguration,
    pub(crate) output: OutputConfiguration,
    pub(crate) plot: PlotConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalConfiguration {
    /// Master seed for the run, drawn from entropy when absent
    pub(crate) seed: Option<u64>,
    pub(crate) number_of_dots: usize,
}

/// Sample dimensions in nm
#[derive(Debug, Deserialize)]
pub(crate) struct SampleConfiguration {
    pub(crate) width: Decimal,
    pub(crate) height: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DistributionConfiguration {
    pub(crate) radius_mean: f64,
    pub(crate) radius_deviation: f64,
    pub(crate) height_slope: f64,
    pub(crate) height_offset: f64,
    pub(crate) height_deviation: f64,
}

impl From<&DistributionConfiguration> for SizeDistribution {
    fn from(config: &DistributionConfiguration) -> Self {
        SizeDistribution {
            radius_mean: config.radius_mean,
            radius_deviation: config.radius_deviation,
            height_slope: config.height_slope,
            height_offset: config.height_offset,
            height_deviation: config.height_deviation,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacementConfiguration {
    pub(crate) maximum_attempts: usize,
    pub(crate) cell_size: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MaterialsConfiguration {
    pub(crate) dot: String,
    pub(crate) barrier: String,
    /// Optional TOML file extending the built-in materials
    pub(crate) file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DosConfiguration {
    pub(crate) bin_width: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutputConfiguration {
    pub(crate) directory: PathBuf,
    pub(crate) dot_list: PathBuf,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlotConfiguration {
    pub(crate) enabled: bool,
    pub(crate) run_gnuplot: bool,
    pub(crate) minimum_energy: Decimal,
    pub(crate) maximum_energy: Decimal,
}

impl Configuration {
    pub(crate) fn build() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the simulation which we use in the general case
            .add_source(File::with_name("../.config/default"))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!("../.config/{}", run_mode)).required(false))
            // Single values from the environment, eg `DOSGEN_GLOBAL__NUMBER_OF_DOTS=1000`
            .add_source(Environment::with_prefix("DOSGEN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use dosgen_sample::SizeDistribution;
    use rust_decimal_macros::dec;

    #[test]
    fn default_configuration_deserializes() {
        let config = Configuration::build().unwrap();

        assert!(config.global.number_of_dots > 0);
        assert_eq!(config.sample.width, dec!(10000000));
        assert_eq!(config.dos.bin_width, dec!(0.002));
        assert_eq!(config.materials.dot, "InAs");
        assert_eq!(config.materials.barrier, "GaAs");
        assert_eq!(
            SizeDistribution::from(&config.distribution),
            SizeDistribution::default()
        );
        assert!(config.plot.minimum_energy < config.plot.maximum_energy);
    }
}
