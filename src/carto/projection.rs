use crate::{
    carto::datum::{GeoPoint, MapPoint},
    config::EngineConfig,
};

/* # equirectangular projection */

/// project a geographic point onto the map
pub fn project(point: GeoPoint, config: &EngineConfig) -> MapPoint {
    MapPoint {
        x: (point.lng + 180.0) * config.scalar_x(),
        y: config.map_height - (point.lat + 90.0) * config.scalar_y(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_eq::assert_float_eq;
    const EPSILON: f64 = 0.000_000_1;

    #[test]
    fn corners() {
        let config = EngineConfig::default();
        for (point, x, y) in [
            (GeoPoint::new(90.0, -180.0), 0.0, 0.0),
            (GeoPoint::new(-90.0, 180.0), 1100.0, 550.0),
            (GeoPoint::new(0.0, 0.0), 550.0, 275.0),
        ] {
            let xy = project(point, &config);
            assert_float_eq!(xy.x, x, abs <= EPSILON);
            assert_float_eq!(xy.y, y, abs <= EPSILON);
        }
    }

    #[test]
    fn exact_coefficients() {
        let config = EngineConfig::default();
        let point = GeoPoint::new(51.5074, -0.1278);
        let xy = project(point, &config);
        assert_eq!(xy.x, (-0.1278 + 180.0) * (1100.0 / 360.0));
        assert_eq!(xy.y, 550.0 - (51.5074 + 90.0) * (550.0 / 180.0));
    }

    #[test]
    fn monotonic() {
        let config = EngineConfig::with_width(720.0);
        let mut last = project(GeoPoint::new(0.0, -180.0), &config);
        for j in 1..=36 {
            let next = project(GeoPoint::new(0.0, -180.0 + 10.0 * j as f64), &config);
            assert!(next.x > last.x);
            last = next;
        }
        let mut last = project(GeoPoint::new(-90.0, 0.0), &config);
        for j in 1..=18 {
            let next = project(GeoPoint::new(-90.0 + 10.0 * j as f64, 0.0), &config);
            assert!(next.y < last.y);
            last = next;
        }
    }
}
