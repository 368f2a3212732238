//! Seeded generation of non-overlapping dot geometries
//!
//! Dot radii follow a Gaussian distribution and heights are correlated to the
//! radius through the linear relation observed for self-assembled InAs dots,
//! `height = slope * radius + offset`, smeared by a second Gaussian. Candidates
//! are drawn until their footprint is clear of every dot already on the sample.

mod grid;

use crate::{DotGeometry, PlacementError, Sample};
use grid::OccupancyGrid;
use num_traits::FromPrimitive;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;

/// Statistical description of the dot sizes, all lengths in nm
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeDistribution {
    pub radius_mean: f64,
    pub radius_deviation: f64,
    pub height_slope: f64,
    pub height_offset: f64,
    pub height_deviation: f64,
}

impl Default for SizeDistribution {
    fn default() -> Self {
        Self {
            radius_mean: 12.,
            radius_deviation: 2.1,
            height_slope: 1. / 3.,
            height_offset: -1.5,
            height_deviation: 0.5,
        }
    }
}

/// Builder for the `PlacementGenerator`
pub struct PlacementGeneratorBuilder<RefSample, RefDistribution> {
    sample: RefSample,
    distribution: RefDistribution,
    seed: Option<u64>,
    maximum_attempts: usize,
    cell_size: f64,
}

impl PlacementGeneratorBuilder<(), ()> {
    pub fn new() -> Self {
        Self {
            sample: (),
            distribution: (),
            seed: None,
            maximum_attempts: 10_000,
            cell_size: 50.,
        }
    }
}

impl Default for PlacementGeneratorBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefSample, RefDistribution> PlacementGeneratorBuilder<RefSample, RefDistribution> {
    /// Attach the sample the dots are placed on
    pub fn with_sample<Sample>(
        self,
        sample: &Sample,
    ) -> PlacementGeneratorBuilder<&Sample, RefDistribution> {
        PlacementGeneratorBuilder {
            sample,
            distribution: self.distribution,
            seed: self.seed,
            maximum_attempts: self.maximum_attempts,
            cell_size: self.cell_size,
        }
    }

    /// Attach the distribution the dot sizes are drawn from
    pub fn with_size_distribution<Distribution>(
        self,
        distribution: &Distribution,
    ) -> PlacementGeneratorBuilder<RefSample, &Distribution> {
        PlacementGeneratorBuilder {
            sample: self.sample,
            distribution,
            seed: self.seed,
            maximum_attempts: self.maximum_attempts,
            cell_size: self.cell_size,
        }
    }

    /// Fix the seed of the generator. Without a seed the generator is seeded from entropy.
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }

    /// Number of rejected candidates tolerated for a single dot before giving up
    pub fn with_maximum_attempts(self, maximum_attempts: usize) -> Self {
        Self {
            maximum_attempts,
            ..self
        }
    }

    /// Side of the cells used to bucket accepted dots, in nm
    pub fn with_cell_size(self, cell_size: f64) -> Self {
        Self { cell_size, ..self }
    }
}

impl<'a> PlacementGeneratorBuilder<&'a Sample, &'a SizeDistribution> {
    pub fn build(self) -> Result<PlacementGenerator<'a>, PlacementError> {
        let distribution = self.distribution;
        if distribution.radius_mean <= 0. {
            return Err(PlacementError::Distribution(format!(
                "the mean radius must be positive; got {}",
                distribution.radius_mean
            )));
        }
        if self.cell_size <= 0. || self.maximum_attempts == 0 {
            return Err(PlacementError::Distribution(format!(
                "cell size and attempt budget must be positive; got {} nm and {}",
                self.cell_size, self.maximum_attempts
            )));
        }
        let radius = Normal::new(distribution.radius_mean, distribution.radius_deviation)
            .map_err(|e| PlacementError::Distribution(e.to_string()))?;
        let height_noise = Normal::new(0., distribution.height_deviation)
            .map_err(|e| PlacementError::Distribution(e.to_string()))?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(PlacementGenerator {
            sample: self.sample,
            distribution: *distribution,
            radius,
            height_noise,
            maximum_attempts: self.maximum_attempts,
            cell_size: self.cell_size,
            rng,
        })
    }
}

/// Draws dot geometries on a sample, rejecting candidates which overlap accepted dots
pub struct PlacementGenerator<'a> {
    sample: &'a Sample,
    distribution: SizeDistribution,
    radius: Normal<f64>,
    height_noise: Normal<f64>,
    maximum_attempts: usize,
    cell_size: f64,
    rng: StdRng,
}

fn to_decimal(value: f64) -> Result<Decimal, PlacementError> {
    Decimal::from_f64(value)
        .map(|value| value.normalize())
        .ok_or(PlacementError::NonFinite(value))
}

impl<'a> PlacementGenerator<'a> {
    pub fn sample(&self) -> &Sample {
        self.sample
    }

    /// Access to the generator's random number stream, used to derive seeds for
    /// downstream calculations so that a single seed reproduces a full run
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn draw_radius(&mut self) -> f64 {
        loop {
            let radius = self.radius.sample(&mut self.rng);
            if radius > 0. {
                return radius;
            }
        }
    }

    fn draw_height(&mut self, radius: f64) -> f64 {
        let centre = self.distribution.height_slope * radius + self.distribution.height_offset;
        loop {
            let height = centre + self.height_noise.sample(&mut self.rng);
            if height > 0. {
                return height;
            }
        }
    }

    /// Draw a single candidate, ignoring any other dot on the sample
    pub fn draw_geometry(&mut self) -> Result<DotGeometry, PlacementError> {
        let x = to_decimal(self.rng.gen::<f64>())? * self.sample.width();
        let y = to_decimal(self.rng.gen::<f64>())? * self.sample.height();
        let radius = self.draw_radius();
        let height = self.draw_height(radius);
        Ok(DotGeometry::new(
            x.normalize(),
            y.normalize(),
            to_decimal(radius)?,
            to_decimal(height)?,
        ))
    }

    /// Place `count` new dots whose footprints overlap neither each other nor any of `existing`
    ///
    /// A rejected candidate is discarded entirely and a new position and size are drawn.
    pub fn place(
        &mut self,
        existing: &[DotGeometry],
        count: usize,
    ) -> Result<Vec<DotGeometry>, PlacementError> {
        let mut grid = OccupancyGrid::new(self.cell_size);
        for dot in existing {
            grid.insert(*dot);
        }

        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let mut attempts = 0;
            let geometry = loop {
                let candidate = self.draw_geometry()?;
                if grid.is_free(&candidate) {
                    break candidate;
                }
                attempts += 1;
                if attempts >= self.maximum_attempts {
                    return Err(PlacementError::Crowded {
                        placed: placed.len(),
                        attempts,
                    });
                }
            };
            tracing::trace!(
                "placed dot {} at ({}, {}) after {attempts} rejections",
                grid.len(),
                geometry.x(),
                geometry.y()
            );
            grid.insert(geometry);
            placed.push(geometry);
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod test {
    use super::{PlacementGeneratorBuilder, SizeDistribution};
    use crate::{PlacementError, Sample};
    use rust_decimal_macros::dec;

    #[test]
    fn identical_seeds_give_identical_placements() {
        let sample = Sample::new(dec!(5000), dec!(5000)).unwrap();
        let distribution = SizeDistribution::default();
        let mut first = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .with_seed(Some(7))
            .build()
            .unwrap();
        let mut second = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .with_seed(Some(7))
            .build()
            .unwrap();

        assert_eq!(first.place(&[], 50).unwrap(), second.place(&[], 50).unwrap());
    }

    #[test]
    fn placed_dots_are_physical_and_do_not_overlap() {
        let sample = Sample::new(dec!(2000), dec!(2000)).unwrap();
        let distribution = SizeDistribution::default();
        let mut generator = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .with_seed(Some(42))
            .build()
            .unwrap();
        let dots = generator.place(&[], 200).unwrap();

        assert_eq!(dots.len(), 200);
        for (index, dot) in dots.iter().enumerate() {
            assert!(dot.is_physical());
            assert!(sample.contains(&dot.centre));
            for other in dots.iter().skip(index + 1) {
                assert!(!dot.overlaps(other));
            }
        }
    }

    #[test]
    fn existing_dots_are_avoided() {
        let sample = Sample::new(dec!(300), dec!(300)).unwrap();
        let distribution = SizeDistribution::default();
        let mut generator = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .with_seed(Some(3))
            .build()
            .unwrap();
        let existing = generator.place(&[], 10).unwrap();
        let new = generator.place(&existing, 10).unwrap();

        for dot in new.iter() {
            assert!(existing.iter().all(|other| !other.overlaps(dot)));
        }
    }

    #[test]
    fn overfull_sample_is_reported() {
        let sample = Sample::new(dec!(30), dec!(30)).unwrap();
        let distribution = SizeDistribution::default();
        let mut generator = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .with_seed(Some(11))
            .with_maximum_attempts(100)
            .build()
            .unwrap();

        let result = generator.place(&[], 50);
        assert!(matches!(result, Err(PlacementError::Crowded { .. })));
    }

    #[test]
    fn non_positive_mean_radius_is_rejected() {
        let sample = Sample::new(dec!(30), dec!(30)).unwrap();
        let distribution = SizeDistribution {
            radius_mean: -1.,
            ..SizeDistribution::default()
        };
        let generator = PlacementGeneratorBuilder::new()
            .with_sample(&sample)
            .with_size_distribution(&distribution)
            .build();
        assert!(generator.is_err());
    }
}
