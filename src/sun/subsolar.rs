use crate::{
    carto::{
        datum::{GeoPoint, MapPoint},
        projection::project,
    },
    config::EngineConfig,
    error::Error,
    sun::oracle::Oracle,
};
use chrono::{DateTime, Utc};
use log::trace;

/// latitudes from -90 to 90 in steps, 90 included only when a step lands on it
fn latitudes(step: f64) -> impl Iterator<Item = f64> {
    let count = (180.0 / step).floor() as usize;
    (0..=count).map(move |j| -90.0 + j as f64 * step)
}

/// meridians from -180 up to, but not including, 180
fn meridians(step: f64) -> impl Iterator<Item = f64> {
    let count = (360.0 / step).ceil() as usize;
    (0..count).map(move |j| -180.0 + j as f64 * step)
}

/// highest altitude along one meridian, with the latitude where it occurs
pub fn peak_at_meridian<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    lng: f64,
    step: f64,
) -> Result<(f64, f64), Error> {
    let mut peak = (f64::NEG_INFINITY, -90.0);
    for lat in latitudes(step) {
        let altitude = oracle.altitude(time, &GeoPoint::new(lat, lng))?;
        // strict, so the first maximum in scan order wins
        if altitude > peak.0 {
            peak = (altitude, lat);
        }
    }
    Ok(peak)
}

/// grid point with the highest solar altitude
///
/// Meridians are scanned west to east and latitudes south to north; of equal
/// altitudes the one met first is kept.
pub fn sub_solar_coords<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    config: &EngineConfig,
) -> Result<GeoPoint, Error> {
    trace!("searching for the sub-solar point at {}", time);
    let mut peak = f64::NEG_INFINITY;
    let mut best = GeoPoint::new(-90.0, -180.0);
    for lng in meridians(config.longitude_step) {
        let (altitude, lat) = peak_at_meridian(oracle, time, lng, config.latitude_step)?;
        if altitude > peak {
            peak = altitude;
            best = GeoPoint::new(lat, lng);
        }
    }
    Ok(best)
}

/// map position of the sun disc
pub fn find_sub_solar_point<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    config: &EngineConfig,
) -> Result<MapPoint, Error> {
    Ok(project(sub_solar_coords(oracle, time, config)?, config))
}
