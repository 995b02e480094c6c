use crate::vars::*;
use chrono::{DateTime, Utc};

pub trait Unit<T> {
    fn confine(value: T) -> Self;
    fn release(self) -> T;
}

/* # population */

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Population(u64);

impl Population {
    /// radius of a city marker, before doubling on the map
    pub fn radius(self) -> f64 {
        CITY_TIERS
            .iter()
            .find(|(bound, _)| self.0 < *bound)
            .map(|(_, radius)| *radius)
            .unwrap_or(CITY_RADIUS_MAX)
    }
}

impl Unit<u64> for Population {
    fn confine(value: u64) -> Self {
        Self(value)
    }

    fn release(self) -> u64 {
        self.0
    }
}

/* # elapsed time */

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Elapsed(f64);

impl Elapsed {
    /// milliseconds from `since` until `now`, negative if `since` lies in the future
    pub fn between(now: &DateTime<Utc>, since: &DateTime<Utc>) -> Self {
        Self((*now - *since).num_milliseconds() as f64)
    }
}

impl Unit<f64> for Elapsed {
    fn confine(value: f64) -> Self {
        Self(value)
    }

    fn release(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use float_eq::assert_float_eq;

    #[test]
    fn radius_tiers() {
        assert_eq!(Population::confine(0).radius(), 0.3);
        assert_eq!(Population::confine(199_999).radius(), 0.3);
        assert_eq!(Population::confine(200_000).radius(), 0.4);
        assert_eq!(Population::confine(750_000).radius(), 0.5);
        assert_eq!(Population::confine(1_500_000).radius(), 0.6);
        assert_eq!(Population::confine(3_999_999).radius(), 0.8);
        assert_eq!(Population::confine(4_000_000).radius(), 1.0);
    }

    #[test]
    fn radius_grows_with_population() {
        let radii = [0, 300_000, 600_000, 1_200_000, 2_500_000, 9_000_000]
            .map(|p| Population::confine(p).radius());
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn elapsed_sign() {
        let then = Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap();
        let now = then + Duration::minutes(20);
        assert_float_eq!(Elapsed::between(&now, &then).release(), 1_200_000.0, abs <= 0.0);
        assert_float_eq!(Elapsed::between(&then, &now).release(), -1_200_000.0, abs <= 0.0);
    }
}
