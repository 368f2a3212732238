// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{DotListError, OutputError};
use dosgen_sample::DotGeometry;
use rust_decimal::Decimal;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

const DOT_LIST_HEADER: &str = "x (nm)\ty (nm)\tradius (nm)\theight (nm)";
/// Significant digits kept for positions and sizes
const GEOMETRY_DIGITS: u32 = 11;
const SEPARATORS: [char; 3] = [',', ';', '\t'];

fn format_length(value: Decimal) -> Decimal {
    value.round_sf(GEOMETRY_DIGITS).unwrap_or(value).normalize()
}

fn parse_number(field: &str) -> Option<Decimal> {
    let field = field.trim();
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Writes the geometry of every dot, one dot per line
pub fn write_dot_list<'a>(
    path: &Path,
    dots: impl IntoIterator<Item = &'a DotGeometry>,
) -> Result<(), OutputError> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "{}", DOT_LIST_HEADER)?;
    let mut count = 0;
    for dot in dots {
        writeln!(
            file,
            "{}\t{}\t{}\t{}",
            format_length(dot.x()),
            format_length(dot.y()),
            format_length(dot.radius),
            format_length(dot.height)
        )?;
        count += 1;
    }
    file.flush()?;
    tracing::info!("Wrote {count} dots to {}", path.display());
    Ok(())
}

/// Reads a list of dots written by `write_dot_list`, or any file in the same layout
///
/// Lines whose first field is not a number are treated as headers and skipped.
pub fn read_dot_list(path: &Path) -> Result<Vec<DotGeometry>, DotListError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DotListError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut dots = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let fields = line.trim().split(&SEPARATORS[..]).collect::<Vec<_>>();
        let x = match parse_number(fields[0]) {
            Some(x) => x,
            None => continue,
        };
        if fields.len() < 4 {
            return Err(DotListError::Columns {
                line: line_number,
                found: fields.len(),
            });
        }
        let mut values = [x, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO];
        for (value, field) in values.iter_mut().zip(fields.iter()).skip(1) {
            *value = parse_number(field).ok_or_else(|| DotListError::Number {
                line: line_number,
                field: field.trim().to_owned(),
            })?;
        }

        let dot = DotGeometry::new(
            values[0].normalize(),
            values[1].normalize(),
            values[2].normalize(),
            values[3].normalize(),
        );
        if !dot.is_physical() {
            return Err(DotListError::Geometry {
                line: line_number,
                radius: dot.radius,
                height: dot.height,
            });
        }
        dots.push(dot);
    }
    tracing::info!("Read {} dots from {}", dots.len(), path.display());
    Ok(dots)
}
