use crate::{PlacementError, Point2};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SQUARE_NM_PER_SQUARE_M: Decimal = dec!(1000000000000000000);

/// A rectangular sample surface with its lower left corner at the origin, lengths in nm
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    width: Decimal,
    height: Decimal,
}

impl Sample {
    pub fn new(width: Decimal, height: Decimal) -> Result<Self, PlacementError> {
        if width <= Decimal::ZERO || height <= Decimal::ZERO {
            return Err(PlacementError::Sample { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> Decimal {
        self.width
    }

    pub fn height(&self) -> Decimal {
        self.height
    }

    /// The sample area in nm^2
    pub fn area(&self) -> Decimal {
        self.width * self.height
    }

    /// The sample area in m^2
    pub fn area_in_square_metres(&self) -> Decimal {
        self.area() / SQUARE_NM_PER_SQUARE_M
    }

    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= Decimal::ZERO
            && point.y >= Decimal::ZERO
            && point.x < self.width
            && point.y < self.height
    }
}

#[cfg(test)]
mod test {
    use super::Sample;
    use crate::Point2;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(Sample::new(dec!(-1), dec!(10)).is_err());
        assert!(Sample::new(dec!(10), dec!(0)).is_err());
    }

    #[test]
    fn area_is_width_times_height() {
        let sample = Sample::new(dec!(10000000), dec!(20000000)).unwrap();
        assert_eq!(sample.area(), dec!(200000000000000));
        assert_eq!(sample.area_in_square_metres(), dec!(0.0002));
    }

    #[test]
    fn far_edge_is_outside_the_sample() {
        let sample = Sample::new(dec!(10), dec!(10)).unwrap();
        assert!(sample.contains(&Point2::new(dec!(0), dec!(9.99))));
        assert!(!sample.contains(&Point2::new(dec!(10), dec!(5))));
    }
}
