use crate::{
    carto::datum::GeoPoint,
    error::Error,
    sun::oracle::Oracle,
};
use chrono::{DateTime, Utc};

/// whether the sun stands above the horizon, a sun exactly on it counts as night
pub fn is_daylight<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    point: &GeoPoint,
) -> Result<bool, Error> {
    Ok(oracle.altitude(time, point)? > 0.0)
}

/// whether the north pole receives sunlight, meaning the sub-solar point lies north
pub fn is_north_sun<O: Oracle + ?Sized>(oracle: &O, time: &DateTime<Utc>) -> Result<bool, Error> {
    is_daylight(oracle, time, &GeoPoint::NORTH_POLE)
}

/// opacity of a city light, lit only at night
pub fn city_opacity<O: Oracle + ?Sized>(
    oracle: &O,
    time: &DateTime<Utc>,
    point: &GeoPoint,
) -> Result<f64, Error> {
    Ok(if is_daylight(oracle, time, point)? {
        0.0
    } else {
        1.0
    })
}
