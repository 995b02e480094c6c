use crate::{
    atlas::{City, Placed},
    carto::datum::{GeoPoint, MapPoint},
    engine::{Engine, Night},
    error::Error,
    sun::{decay::TemporalEvent, oracle::Oracle},
    vars::*,
};
use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use rayon::prelude::*;

/* # markers */

#[derive(Clone, Debug, PartialEq)]
pub enum Lamp {
    /// lit whenever its place is in the dark
    City,
    /// shows up when posted and fades away
    Message { event: TemporalEvent, colour: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: String,
    pub location: GeoPoint,
    pub xy: MapPoint,
    pub radius: f64,
    pub opacity: f64,
    pub lamp: Lamp,
}

impl Marker {
    fn opacity_at<O: Oracle>(&self, engine: &Engine<O>, now: &DateTime<Utc>) -> Result<f64, Error> {
        match &self.lamp {
            Lamp::City => engine.city_opacity(now, &self.location),
            Lamp::Message { event, .. } => Ok(engine.message_opacity(now, event)),
        }
    }
}

/// markers whose opacity changed during a refresh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub cities: usize,
    pub messages: usize,
}

/* # scene */

/// everything drawn on the map at the current clock value
#[derive(Clone, Debug)]
pub struct Scene {
    pub now: DateTime<Utc>,
    pub night: Night,
    pub sun: MapPoint,
    /// whether the sun moved smoothly into place on the last tick
    pub glide: bool,
    pub cities: Vec<Marker>,
    pub messages: Vec<Marker>,
}

impl Scene {
    pub fn new<O: Oracle + Sync>(
        engine: &Engine<O>,
        now: DateTime<Utc>,
        cities: &[City],
        placed: &[Placed],
    ) -> Result<Self, Error> {
        let cities = cities
            .iter()
            .enumerate()
            .map(|(j, city)| Marker {
                id: format!("city{}", j),
                location: city.location,
                xy: engine.project(city.location),
                radius: city.population.radius() * 2.0,
                opacity: 0.0,
                lamp: Lamp::City,
            })
            .collect();
        let messages = placed
            .iter()
            .map(|placed| Marker {
                id: placed.event.identity.clone(),
                location: placed.event.location,
                xy: engine.project(placed.event.location),
                radius: MESSAGE_RADIUS,
                opacity: 0.0,
                lamp: Lamp::Message {
                    event: placed.event.clone(),
                    colour: placed.hue.paint(),
                },
            })
            .collect();
        let mut scene = Self {
            now,
            night: engine.night(&now)?,
            sun: engine.sub_solar_point(&now)?,
            glide: false,
            cities,
            messages,
        };
        scene.refresh(engine)?;
        Ok(scene)
    }

    /// move the clock by some minutes, backwards when negative, and redraw
    pub fn advance<O: Oracle + Sync>(
        &mut self,
        engine: &Engine<O>,
        minutes: i64,
    ) -> Result<Tally, Error> {
        self.now += Duration::minutes(minutes);
        trace!("advancing scene to {}", self.now);
        self.night = engine.night(&self.now)?;
        let sun = engine.sub_solar_point(&self.now)?;
        self.glide = glides(self.sun, sun, engine.config().map_width);
        self.sun = sun;
        self.refresh(engine)
    }

    /// recompute marker opacities, counting those that changed
    pub fn refresh<O: Oracle + Sync>(&mut self, engine: &Engine<O>) -> Result<Tally, Error> {
        let now = self.now;
        let tally = Tally {
            cities: refresh_markers(&mut self.cities, engine, &now)?,
            messages: refresh_markers(&mut self.messages, engine, &now)?,
        };
        debug!(
            "{} city and {} message markers changed at {}",
            tally.cities, tally.messages, now
        );
        Ok(tally)
    }

    /// messages visible right now
    pub fn live_messages(&self) -> impl Iterator<Item = &Marker> {
        self.messages.iter().filter(|marker| marker.opacity > 0.0)
    }
}

fn refresh_markers<O: Oracle + Sync>(
    markers: &mut [Marker],
    engine: &Engine<O>,
    now: &DateTime<Utc>,
) -> Result<usize, Error> {
    let opacities = markers
        .par_iter()
        .map(|marker| marker.opacity_at(engine, now))
        .collect::<Result<Vec<f64>, Error>>()?;
    let mut changed = 0;
    for (marker, opacity) in markers.iter_mut().zip(opacities) {
        if marker.opacity != opacity {
            marker.opacity = opacity;
            changed += 1;
        }
    }
    Ok(changed)
}

/// whether the sun may glide between two positions instead of jumping across the date line
pub fn glides(from: MapPoint, to: MapPoint, map_width: f64) -> bool {
    (to.x - from.x).abs() < map_width * SUN_GLIDE
}
