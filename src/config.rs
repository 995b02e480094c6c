use crate::{error::Error, vars::*};
use chrono::{DateTime, TimeZone, Utc};
use log::trace;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/* # engine configuration */

/// immutable geometry of the map and of the solar search grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub map_width: f64,
    pub map_height: f64,
    pub latitude_step: f64,
    pub longitude_step: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_width(MAP_WIDTH)
    }
}

impl EngineConfig {
    /// map of given width and half as tall, default search grid
    pub fn with_width(map_width: f64) -> Self {
        Self {
            map_width,
            map_height: map_width / 2.0,
            latitude_step: PRECISION_LAT,
            longitude_step: PRECISION_LNG,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let checks = [
            ("map width", self.map_width),
            ("map height", self.map_height),
            ("latitude step", self.latitude_step),
            ("longitude step", self.longitude_step),
        ];
        for (name, value) in checks {
            // written so that NaN fails too
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn scalar_x(&self) -> f64 {
        self.map_width / 360.0
    }

    pub fn scalar_y(&self) -> f64 {
        self.map_height / 180.0
    }
}

/* # settings file */

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub map: MapSettings,
    pub render: RenderOptions,
    pub animation: AnimationSettings,
    pub data: DataSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub width: f64,
    pub height: Option<f64>,
    pub latitude_step: f64,
    pub longitude_step: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: None,
            latitude_step: PRECISION_LAT,
            longitude_step: PRECISION_LNG,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub shadow_opacity: f64,
    pub bg_color_left: String,
    pub bg_color_right: String,
    pub lights_color: String,
    pub lights_opacity: f64,
    pub sun_opacity: f64,
    pub sun_radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shadow_opacity: 0.16,
            bg_color_left: "#eee".to_string(),
            bg_color_right: "#eee".to_string(),
            lights_color: "#FFBEA0".to_string(),
            lights_opacity: 1.0,
            sun_opacity: 0.11,
            sun_radius: 150.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub start: DateTime<Utc>,
    pub increment_minutes: i64,
    pub frames: usize,
    pub output: PathBuf,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).single().unwrap_or_default(),
            increment_minutes: TICK_MINUTES,
            frames: TICK_FRAMES,
            output: PathBuf::from("bounce"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub cities: Option<PathBuf>,
    pub messages: Option<PathBuf>,
    pub land: Option<PathBuf>,
    /// tab separated `unix seconds, time zone` rows, used when `messages` is unset
    pub zoned_messages: Option<PathBuf>,
    pub tzdata: PathBuf,
    pub zone_tab: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            cities: None,
            messages: None,
            land: None,
            zoned_messages: None,
            tzdata: PathBuf::from(TZDATA),
            zone_tab: PathBuf::from(ZONE_TAB),
        }
    }
}

impl Settings {
    /// read settings from a toml file, missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        trace!("loading settings from {}", path.as_ref().display());
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// engine configuration described by the map section
    pub fn engine(&self) -> Result<EngineConfig, Error> {
        let config = EngineConfig {
            map_width: self.map.width,
            map_height: self.map.height.unwrap_or(self.map.width / 2.0),
            latitude_step: self.map.latitude_step,
            longitude_step: self.map.longitude_step,
        };
        config.validate()?;
        Ok(config)
    }
}
