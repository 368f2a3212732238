// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use miette::Diagnostic;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while reading back a list of dots
pub enum DotListError {
    #[error("failed to read dot list {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line} holds {found} fields, expected x, y, radius and height")]
    #[diagnostic(help("fields may be separated by tabs, commas or semicolons"))]
    Columns { line: usize, found: usize },
    #[error("line {line}: `{field}` is not a number")]
    Number { line: usize, field: String },
    #[error("line {line}: dots need a positive radius and height; got {radius} and {height} nm")]
    Geometry {
        line: usize,
        radius: Decimal,
        height: Decimal,
    },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for IO events while writing results
pub enum OutputError {
    #[error("IO Failure: {0}")]
    IO(#[from] std::io::Error),
    #[error("gnuplot exited unsuccessfully: {0}")]
    #[diagnostic(help("check that gnuplot is installed, or disable `plot.run_gnuplot`"))]
    Gnuplot(String),
}
