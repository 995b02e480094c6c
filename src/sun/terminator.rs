use crate::{
    carto::{
        datum::{GeoPoint, MapPoint},
        projection::project,
    },
    config::EngineConfig,
    error::Error,
    sun::{illumination::is_daylight, oracle::Oracle},
};
use chrono::{DateTime, Utc};
use log::trace;

/* # sampling */

/// longitudes from -180 in steps, closed by an explicit 180
pub fn longitudes(step: f64) -> Vec<f64> {
    let count = (360.0 / step).ceil() as usize;
    (0..count)
        .map(|j| -180.0 + j as f64 * step)
        .chain(std::iter::once(180.0))
        .collect()
}

/// first latitude at which the sun is up, walking from the pole opposite to the sun
///
/// Keep this a linear walk, not a root search: a longitude that never sees
/// daylight has to end on the far pole.
pub fn sunrise_latitude<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    lng: f64,
    north_sun: bool,
    step: f64,
) -> Result<f64, Error> {
    let (start, end, delta) = if north_sun {
        (-90.0, 90.0, step)
    } else {
        (90.0, -90.0, -step)
    };
    let count = (180.0 / step).ceil() as usize;
    for j in 0..count {
        let lat = start + j as f64 * delta;
        if is_daylight(oracle, time, &GeoPoint::new(lat, lng))? {
            return Ok(lat);
        }
    }
    Ok(end)
}

/* # terminator */

/// geographic day/night boundary, one point per sampled longitude
pub fn terminator_coords<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    north_sun: bool,
    config: &EngineConfig,
) -> Result<Vec<GeoPoint>, Error> {
    trace!("scanning terminator at {}", time);
    longitudes(config.longitude_step)
        .into_iter()
        .map(|lng| {
            sunrise_latitude(oracle, time, lng, north_sun, config.latitude_step)
                .map(|lat| GeoPoint::new(lat, lng))
        })
        .collect()
}

/// day/night boundary projected onto the map, ordered left to right
pub fn build_terminator<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    north_sun: bool,
    config: &EngineConfig,
) -> Result<Vec<MapPoint>, Error> {
    Ok(terminator_coords(oracle, time, north_sun, config)?
        .into_iter()
        .map(|point| project(point, config))
        .collect())
}
