// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Dosgen computes the density of states of an ensemble of self-assembled quantum dots
//!
//! # Overview
//! Dosgen scatters quantum dots at random over a semiconductor sample and finds the confined
//! states of each of them. Every dot is modelled as a finite box of barrier material: the
//! circular footprint of the dot is replaced by the square of equal area and the box is as
//! tall as the dot. The box is separable, so each state follows from three one dimensional
//! finite square wells, whose transcendental eigenvalue equations are solved with a
//! Newton-Raphson iteration. The recombination energies of every state in the ensemble are
//! finally binned into a density of states per unit area of sample.
//!
//! Each dot also carries the thermal occupation of its levels at room temperature, as an
//! inverse cumulative distribution from which the level taking part in a recombination event
//! can be drawn.
//!
//! # Usage
//! Dosgen is distributed as a binary crate, and is intended to be run from the command line.
//! Run parameters are read from `.config/default.toml`, and the compounds forming the dots
//! and the barrier can be extended with a materials file:
//!
//! ```toml
//! [[materials]]
//! name = "InP"
//! bandgap = 1.344
//! electron_effective_mass = 0.08
//! hole_effective_mass = 0.6
//!
//! [[offsets]]
//! dot = "InAs"
//! barrier = "InP"
//! conduction_band_offset = 0.6
//! ```
//!
//! where energies are in electron volts and masses in units of the free electron mass.

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
pub mod constants;

/// Binning of state energies into a density of states
pub mod dos;

/// Quantum dots and their confined states
pub mod dot;

/// Error handling
pub mod error;

/// Band parameters of the dot and barrier compounds
pub mod materials;

/// Writers and readers for result files
pub mod output;

/// The finite square well
pub mod well;
