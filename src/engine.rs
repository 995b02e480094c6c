use crate::{
    carto::{
        datum::{GeoPoint, MapPoint},
        projection::project,
    },
    config::EngineConfig,
    error::Error,
    sun::{
        decay::TemporalEvent,
        illumination,
        oracle::Oracle,
        subsolar::find_sub_solar_point,
        terminator::build_terminator,
    },
};
use chrono::{DateTime, Utc};

/// the day/night boundary and which map edge closes it
#[derive(Clone, Debug, PartialEq)]
pub struct Night {
    pub north_sun: bool,
    pub path: Vec<MapPoint>,
}

impl Night {
    /// map edge the night region is anchored to, the bottom one while the sun is north
    pub fn anchor(&self, config: &EngineConfig) -> f64 {
        if self.north_sun {
            config.map_height
        } else {
            0.0
        }
    }
}

/// solar geometry over one map, all entry points are pure given the oracle
pub struct Engine<O> {
    config: EngineConfig,
    oracle: O,
}

impl<O: Oracle> Engine<O> {
    pub fn new(config: EngineConfig, oracle: O) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config, oracle })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn project(&self, point: GeoPoint) -> MapPoint {
        project(point, &self.config)
    }

    pub fn is_daylight(&self, time: &DateTime<Utc>, point: &GeoPoint) -> Result<bool, Error> {
        illumination::is_daylight(&self.oracle, time, point)
    }

    pub fn is_north_sun(&self, time: &DateTime<Utc>) -> Result<bool, Error> {
        illumination::is_north_sun(&self.oracle, time)
    }

    pub fn terminator(&self, time: &DateTime<Utc>, north_sun: bool) -> Result<Vec<MapPoint>, Error> {
        build_terminator(&self.oracle, time, north_sun, &self.config)
    }

    /// terminator oriented by the current hemisphere of the sun
    pub fn night(&self, time: &DateTime<Utc>) -> Result<Night, Error> {
        let north_sun = self.is_north_sun(time)?;
        Ok(Night {
            north_sun,
            path: self.terminator(time, north_sun)?,
        })
    }

    pub fn sub_solar_point(&self, time: &DateTime<Utc>) -> Result<MapPoint, Error> {
        find_sub_solar_point(&self.oracle, time, &self.config)
    }

    pub fn city_opacity(&self, time: &DateTime<Utc>, point: &GeoPoint) -> Result<f64, Error> {
        illumination::city_opacity(&self.oracle, time, point)
    }

    /// visibility of a message marker, fading after the event
    pub fn message_opacity(&self, time: &DateTime<Utc>, event: &TemporalEvent) -> f64 {
        event.intensity_at(time)
    }
}
