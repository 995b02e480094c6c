use geo::Coordinate;
use std::ops::{Add, Div, Mul};

macro_rules! impl_ops_internal {
    ($dat:ty, $trait: ident, $op: tt, $method: ident) => {
        impl $trait for $dat {
            type Output = Self;

            fn $method(self, other: Self) -> Self::Output {
               Self {x: self.x $op other.x, y: self.y $op other.y}
            }
        }
    };
}

macro_rules! impl_ops_external {
    ($dat:ty, $trait: ident, $op: tt, $method: ident) => {
        impl $trait<f64> for $dat {
            type Output = Self;

            fn $method(self, other: f64) -> Self::Output {
               Self {x: self.x $op other, y: self.y $op other}
            }
        }
    };
}

/* # geographic points */

/// latitude and longitude in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const NORTH_POLE: GeoPoint = GeoPoint { lat: 90.0, lng: 0.0 };

    /// great-circle angle to another point, in degrees
    pub fn arc(&self, other: &GeoPoint) -> f64 {
        let (phi, psi) = (self.lat.to_radians(), other.lat.to_radians());
        let dlambda = (other.lng - self.lng).to_radians();
        (phi.sin() * psi.sin() + phi.cos() * psi.cos() * dlambda.cos())
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }
}

/// geographic points become coordinates with longitude on the x axis
impl From<GeoPoint> for Coordinate<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<Coordinate<f64>> for GeoPoint {
    fn from(coord: Coordinate<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

/* # map points */

/// planar position on the rendered map, y pointing down
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<MapPoint> for Coordinate<f64> {
    fn from(point: MapPoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl_ops_internal!(MapPoint, Add, +, add);
impl_ops_external!(MapPoint, Mul, *, mul);
impl_ops_external!(MapPoint, Div, /, div);
