use crate::carto::datum::GeoPoint;
use chrono::{DateTime, Utc};
use std::f64::consts::PI;
use thiserror::Error;

/// the sun's altitude above the horizon could not be determined
#[derive(Debug, Error)]
#[error("solar oracle failed: {0}")]
pub struct OracleError(pub String);

/// source of solar altitudes, in degrees above the local horizon
pub trait Oracle {
    fn altitude(&self, time: &DateTime<Utc>, point: &GeoPoint) -> Result<f64, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn altitude(&self, time: &DateTime<Utc>, point: &GeoPoint) -> Result<f64, OracleError> {
        (**self).altitude(time, point)
    }
}

/* # almanac */

const DAY_MS: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const OBLIQUITY: f64 = 23.4397; // of the earth, in degrees
const PERIHELION: f64 = 102.9372; // ecliptic longitude of the perihelion, in degrees

/// low precision analytic model of the sun's apparent position
#[derive(Clone, Copy, Debug, Default)]
pub struct Almanac;

impl Almanac {
    /// days since the J2000 epoch
    fn days(time: &DateTime<Utc>) -> f64 {
        time.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970 - J2000
    }

    fn mean_anomaly(days: f64) -> f64 {
        (357.5291 + 0.985_600_28 * days).to_radians()
    }

    fn ecliptic_longitude(anomaly: f64) -> f64 {
        let centre = (1.9148 * anomaly.sin()
            + 0.02 * (2.0 * anomaly).sin()
            + 0.0003 * (3.0 * anomaly).sin())
        .to_radians();
        anomaly + centre + PERIHELION.to_radians() + PI
    }

    /// right ascension and declination, in radians
    fn equatorial(days: f64) -> (f64, f64) {
        let longitude = Self::ecliptic_longitude(Self::mean_anomaly(days));
        let tilt = OBLIQUITY.to_radians();
        let ascension = (longitude.sin() * tilt.cos()).atan2(longitude.cos());
        let declination = (longitude.sin() * tilt.sin()).asin();
        (ascension, declination)
    }

    fn sidereal(days: f64, west: f64) -> f64 {
        (280.16 + 360.985_623_5 * days).to_radians() - west
    }

    /// latitude and longitude where the sun stands in the zenith
    pub fn zenith(&self, time: &DateTime<Utc>) -> GeoPoint {
        let days = Self::days(time);
        let (ascension, declination) = Self::equatorial(days);
        let lng = (ascension - Self::sidereal(days, 0.0)).to_degrees();
        GeoPoint::new(
            declination.to_degrees(),
            (lng + 180.0).rem_euclid(360.0) - 180.0,
        )
    }
}

impl Oracle for Almanac {
    fn altitude(&self, time: &DateTime<Utc>, point: &GeoPoint) -> Result<f64, OracleError> {
        let days = Self::days(time);
        let (ascension, declination) = Self::equatorial(days);
        let hour = Self::sidereal(days, (-point.lng).to_radians()) - ascension;
        let phi = point.lat.to_radians();
        Ok((phi.sin() * declination.sin() + phi.cos() * declination.cos() * hour.cos())
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees())
    }
}

/* # fixed sun */

/// a sun that never moves, standing in the zenith above one point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSun {
    pub zenith: GeoPoint,
}

impl FixedSun {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            zenith: GeoPoint::new(lat, lng),
        }
    }
}

impl Oracle for FixedSun {
    fn altitude(&self, _time: &DateTime<Utc>, point: &GeoPoint) -> Result<f64, OracleError> {
        Ok(90.0 - self.zenith.arc(point))
    }
}
