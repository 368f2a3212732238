// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub(crate) enum DosGenError {
    #[error(transparent)]
    #[diagnostic(code(dosgen::io_error))]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(code(dosgen::config_error))]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    Material(#[from] crate::materials::MaterialError),
    #[error(transparent)]
    Placement(#[from] dosgen_sample::PlacementError),
    #[error(transparent)]
    DotList(#[from] crate::error::DotListError),
    #[error(transparent)]
    Aggregation(#[from] crate::dos::AggregationError),
    #[error(transparent)]
    Output(#[from] crate::error::OutputError),
}
