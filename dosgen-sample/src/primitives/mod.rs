use rust_decimal::{Decimal, MathematicalOps};

pub trait Distance<Point> {
    fn distance(&self, point: &Point) -> Decimal;
}

/// A point on the sample surface, coordinates in nm
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point2 {
    pub x: Decimal,
    pub y: Decimal,
}

impl Point2 {
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    pub fn squared_distance(&self, other: &Point2) -> Decimal {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Distance<Point2> for Point2 {
    fn distance(&self, point: &Point2) -> Decimal {
        // The square root only fails for negative arguments
        self.squared_distance(point)
            .sqrt()
            .unwrap_or(Decimal::ZERO)
    }
}

/// The position and size of a single dot
///
/// The dot is modelled as a cylinder standing on the sample: its footprint is a
/// disc of `radius` centred on `centre`, and it rises `height` above the surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DotGeometry {
    pub centre: Point2,
    pub radius: Decimal,
    pub height: Decimal,
}

impl DotGeometry {
    pub fn new(x: Decimal, y: Decimal, radius: Decimal, height: Decimal) -> Self {
        Self {
            centre: Point2::new(x, y),
            radius,
            height,
        }
    }

    pub fn x(&self) -> Decimal {
        self.centre.x
    }

    pub fn y(&self) -> Decimal {
        self.centre.y
    }

    /// Both dimensions are strictly positive
    pub fn is_physical(&self) -> bool {
        self.radius > Decimal::ZERO && self.height > Decimal::ZERO
    }

    /// Whether the two footprints intersect. Touching footprints count as overlapping.
    pub fn overlaps(&self, other: &DotGeometry) -> bool {
        let reach = self.radius + other.radius;
        self.centre.squared_distance(&other.centre) <= reach * reach
    }
}

impl Distance<Point2> for DotGeometry {
    fn distance(&self, point: &Point2) -> Decimal {
        self.centre.distance(point)
    }
}

impl Distance<DotGeometry> for DotGeometry {
    fn distance(&self, other: &DotGeometry) -> Decimal {
        self.centre.distance(&other.centre)
    }
}
