use crate::DotGeometry;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A cell list over the sample surface
///
/// Accepted footprints are bucketed into square cells of side `cell_size` so that a
/// candidate is only compared against the footprints in the cells it can reach.
#[derive(Debug)]
pub(crate) struct OccupancyGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<DotGeometry>>,
    largest_radius: Decimal,
    occupants: usize,
}

impl OccupancyGrid {
    pub(crate) fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            largest_radius: Decimal::ZERO,
            occupants: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.occupants
    }

    fn cell_index(&self, coordinate: f64) -> i64 {
        (coordinate / self.cell_size).floor() as i64
    }

    pub(crate) fn insert(&mut self, dot: DotGeometry) {
        let key = match (dot.x().to_f64(), dot.y().to_f64()) {
            (Some(x), Some(y)) => (self.cell_index(x), self.cell_index(y)),
            _ => (0, 0),
        };
        self.largest_radius = self.largest_radius.max(dot.radius);
        self.cells.entry(key).or_default().push(dot);
        self.occupants += 1;
    }

    /// True when the candidate overlaps none of the occupants
    pub(crate) fn is_free(&self, candidate: &DotGeometry) -> bool {
        let reach = (candidate.radius + self.largest_radius).to_f64();
        let (x, y, reach) = match (candidate.x().to_f64(), candidate.y().to_f64(), reach) {
            (Some(x), Some(y), Some(reach)) => (x, y, reach * (1. + 1e-9) + 1e-9),
            _ => {
                return self
                    .cells
                    .values()
                    .flatten()
                    .all(|dot| !dot.overlaps(candidate))
            }
        };

        let (x_min, x_max) = (self.cell_index(x - reach), self.cell_index(x + reach));
        let (y_min, y_max) = (self.cell_index(y - reach), self.cell_index(y + reach));
        for i in x_min..=x_max {
            for j in y_min..=y_max {
                if let Some(occupants) = self.cells.get(&(i, j)) {
                    if occupants.iter().any(|dot| dot.overlaps(candidate)) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::OccupancyGrid;
    use crate::DotGeometry;
    use rust_decimal_macros::dec;

    #[test]
    fn candidates_in_neighbouring_cells_are_checked() {
        let mut grid = OccupancyGrid::new(10.);
        grid.insert(DotGeometry::new(dec!(9), dec!(9), dec!(12), dec!(3)));
        // Different cell, but within reach of the occupant
        let candidate = DotGeometry::new(dec!(31), dec!(9), dec!(12), dec!(3));
        assert!(!grid.is_free(&candidate));
        let distant = DotGeometry::new(dec!(34), dec!(9), dec!(12), dec!(3));
        assert!(grid.is_free(&distant));
    }

    #[test]
    fn empty_grid_is_free_everywhere() {
        let grid = OccupancyGrid::new(50.);
        let candidate = DotGeometry::new(dec!(0), dec!(0), dec!(12), dec!(3));
        assert!(grid.is_free(&candidate));
        assert_eq!(grid.len(), 0);
    }
}
