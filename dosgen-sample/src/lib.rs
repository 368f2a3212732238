//! Random placement of self-assembled quantum dots on a bounded sample
//!
//! The crate knows nothing about the electronic structure of a dot: it produces
//! `DotGeometry` values (centre, radius and height, all in nm) whose circular
//! footprints do not overlap, and leaves the physics to the consumer.

mod error;
mod generate;
mod primitives;
mod sample;

pub use error::*;
pub use generate::*;
pub use primitives::*;
pub use sample::*;
