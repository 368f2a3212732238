// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::OutputError;
use rust_decimal::Decimal;
use std::path::Path;
use std::process::Command;

/// A gnuplot script drawing the density of states table as a PNG
#[derive(Clone, Debug)]
pub struct PlotScript<'a> {
    pub table: &'a Path,
    pub image: &'a Path,
    pub number_of_dots: usize,
    /// Lower and upper bound of the energy axis in eV
    pub energy_window: (Decimal, Decimal),
}

impl<'a> PlotScript<'a> {
    pub fn render(&self) -> String {
        let (lower, upper) = self.energy_window;
        [
            "set terminal png".to_owned(),
            format!("set output \"{}\"", self.image.display()),
            format!(
                "set label \"#QDs: {}\" at graph 0.02,0.94",
                self.number_of_dots
            ),
            "set xlabel \"Energy (eV)\"".to_owned(),
            "set ylabel \"Density of states (m^{-2})\"".to_owned(),
            format!(
                "plot[{}:{}] \"{}\" u 1:2 w line notitle",
                lower,
                upper,
                self.table.display()
            ),
            "unset output".to_owned(),
        ]
        .join("\n")
            + "\n"
    }

    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

/// Runs gnuplot on a script, waiting for it to finish
pub fn run_gnuplot(script: &Path) -> Result<(), OutputError> {
    tracing::info!("Running gnuplot on {}", script.display());
    let output = Command::new("gnuplot").arg(script).output()?;
    if !output.status.success() {
        return Err(OutputError::Gnuplot(
            String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::PlotScript;
    use rust_decimal_macros::dec;
    use std::path::Path;

    #[test]
    fn script_plots_the_table_in_the_energy_window() {
        let script = PlotScript {
            table: Path::new("out/DOS_10QDs.dat"),
            image: Path::new("out/DOS_10QDs.png"),
            number_of_dots: 10,
            energy_window: (dec!(0.6), dec!(1.1)),
        }
        .render();

        let lines = script.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "set terminal png");
        assert_eq!(lines[1], "set output \"out/DOS_10QDs.png\"");
        assert!(lines.contains(&"set label \"#QDs: 10\" at graph 0.02,0.94"));
        assert!(lines.contains(&"plot[0.6:1.1] \"out/DOS_10QDs.dat\" u 1:2 w line notitle"));
        assert_eq!(lines.last(), Some(&"unset output"));
    }
}
