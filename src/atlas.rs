use crate::{
    carto::{colour::HSB, datum::GeoPoint},
    error::Error,
    sampler::{sample, WeightedCandidate},
    sun::decay::TemporalEvent,
    units::{Population, Unit},
    vars::*,
};
use chrono::{DateTime, Utc};
use geo::{Coordinate, LineString, Polygon};
use itertools::Itertools;
use log::{info, warn};
use rand::Rng;
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

/* # records */

#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub population: Population,
    pub name: String,
    pub location: GeoPoint,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    pub country: String,
}

/// a message placed on the map, with the hue of its marker
#[derive(Clone, Debug, PartialEq)]
pub struct Placed {
    pub event: TemporalEvent,
    pub hue: HSB,
}

/// numbers in the datasets come both bare and quoted
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/* # parsing */

fn city_row(row: &[Value]) -> Option<City> {
    Some(City {
        population: Population::confine(number(row.first()?)?.max(0.0) as u64),
        name: text(row.get(1)?)?,
        location: GeoPoint::new(number(row.get(2)?)?, number(row.get(3)?)?),
        country: text(row.get(5)?)?,
    })
}

fn instant(seconds: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((seconds * 1000.0) as i64)
}

fn message_row(row: &[Value]) -> Option<Message> {
    Some(Message {
        timestamp: instant(number(row.first()?)?)?,
        country: text(row.get(1)?)?,
    })
}

/// rows of `[population, name, latitude, longitude, _, country]`
pub fn parse_cities(json: &str) -> Result<Vec<City>, Error> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(json)?;
    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(j, row)| {
            let city = city_row(row);
            if city.is_none() {
                warn!("skipping malformed city row {}", j);
            }
            city
        })
        .collect())
}

/// rows of `[unix seconds, country]`
pub fn parse_messages(json: &str) -> Result<Vec<Message>, Error> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(json)?;
    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(j, row)| {
            let message = message_row(row);
            if message.is_none() {
                warn!("skipping malformed message row {}", j);
            }
            message
        })
        .collect())
}

/// polygons as lists of rings of `[longitude, latitude]` pairs
pub fn parse_land(json: &str) -> Result<Vec<Polygon<f64>>, Error> {
    let polygons: Vec<Vec<Vec<[f64; 2]>>> = serde_json::from_str(json)?;
    Ok(polygons
        .into_iter()
        .filter(|rings| !rings.is_empty())
        .map(|rings| {
            let mut rings = rings.into_iter().map(|ring| {
                LineString::from(
                    ring.into_iter()
                        .map(|[x, y]| Coordinate { x, y })
                        .collect::<Vec<Coordinate<f64>>>(),
                )
            });
            let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
            Polygon::new(exterior, rings.collect())
        })
        .collect())
}

pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<City>, Error> {
    let cities = parse_cities(&fs::read_to_string(&path)?)?;
    info!("loaded {} cities from {}", cities.len(), path.as_ref().display());
    Ok(cities)
}

pub fn load_messages<P: AsRef<Path>>(path: P) -> Result<Vec<Message>, Error> {
    let messages = parse_messages(&fs::read_to_string(&path)?)?;
    info!("loaded {} messages from {}", messages.len(), path.as_ref().display());
    Ok(messages)
}

pub fn load_land<P: AsRef<Path>>(path: P) -> Result<Vec<Polygon<f64>>, Error> {
    let land = parse_land(&fs::read_to_string(&path)?)?;
    info!("loaded {} land polygons from {}", land.len(), path.as_ref().display());
    Ok(land)
}

/* # time zones */

/// time zone names resolved to the country they lie in
#[derive(Clone, Debug, Default)]
pub struct Zones {
    links: HashMap<String, String>,
    countries: HashMap<String, String>,
}

impl Zones {
    pub fn new(links: HashMap<String, String>, countries: HashMap<String, String>) -> Self {
        Self { links, countries }
    }

    /// country code of a zone, following one link when the name is an alias
    pub fn country(&self, zone: &str) -> Option<&str> {
        let zone = self.links.get(zone).map_or(zone, String::as_str);
        self.countries.get(zone).map(String::as_str)
    }
}

/// aliases from the `L target alias` lines of `tzdata.zi`, keyed by alias
pub fn parse_zone_links(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some("L"), Some(target), Some(alias)) => {
                    Some((alias.to_string(), target.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// zone names of `zone.tab` keyed to their country code
pub fn parse_zone_tab(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let country = fields.next()?.trim();
            let zone = fields.nth(1)?.trim();
            if country.is_empty() || zone.is_empty() {
                None
            } else {
                Some((zone.to_string(), country.to_string()))
            }
        })
        .collect()
}

/// messages from tab separated `unix seconds, time zone` rows
///
/// Every zone is resolved once; rows in unknown zones are dropped.
pub fn zone_messages(rows: &str, zones: &Zones) -> Vec<Message> {
    let mut cache = HashMap::<&str, Option<&str>>::new();
    let mut messages = Vec::new();
    for (j, line) in rows.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_once('\t')
            .and_then(|(seconds, zone)| {
                Some((instant(seconds.trim().parse::<f64>().ok()?)?, zone.trim()))
            });
        let (timestamp, zone) = match row {
            Some(row) => row,
            None => {
                warn!("skipping malformed zone row {}", j);
                continue;
            }
        };
        let country = *cache.entry(zone).or_insert_with(|| {
            let country = zones.country(zone);
            if country.is_none() {
                warn!("no country known for time zone {}", zone);
            }
            country
        });
        if let Some(country) = country {
            messages.push(Message {
                timestamp,
                country: country.to_string(),
            });
        }
    }
    messages
}

pub fn load_zones<P: AsRef<Path>>(tzdata: P, zone_tab: P) -> Result<Zones, Error> {
    let zones = Zones::new(
        parse_zone_links(&fs::read_to_string(&tzdata)?),
        parse_zone_tab(&fs::read_to_string(&zone_tab)?),
    );
    info!(
        "loaded {} zone links and {} zones",
        zones.links.len(),
        zones.countries.len()
    );
    Ok(zones)
}

pub fn load_zone_messages<P: AsRef<Path>>(path: P, zones: &Zones) -> Result<Vec<Message>, Error> {
    let messages = zone_messages(&fs::read_to_string(&path)?, zones);
    info!("resolved {} messages from {}", messages.len(), path.as_ref().display());
    Ok(messages)
}

/* # regions */

/// cities of every country as candidates weighted by population
pub fn regions(cities: &[City]) -> BTreeMap<String, Vec<WeightedCandidate>> {
    let mut regions = BTreeMap::<String, Vec<WeightedCandidate>>::new();
    for city in cities {
        regions
            .entry(city.country.clone())
            .or_default()
            .push(WeightedCandidate::new(
                city.location,
                city.population.release() as f64,
            ));
    }
    regions
}

fn identity(message: &Message, location: &GeoPoint) -> String {
    format!(
        "msg-{}-{}{}",
        message.timestamp.timestamp(),
        location.lat,
        location.lng
    )
    .replace([',', '.'], "")
}

/// put every message on a city of its country, chosen by population
///
/// Messages from countries without any usable city are left out.
pub fn place_messages<R: Rng + ?Sized>(
    messages: &[Message],
    regions: &BTreeMap<String, Vec<WeightedCandidate>>,
    rng: &mut R,
) -> Vec<Placed> {
    let mut placed = Vec::with_capacity(messages.len());
    for message in messages {
        let location = match regions.get(&message.country).map(|c| sample(c, rng)) {
            Some(Ok(location)) => location,
            Some(Err(error)) => {
                warn!("cannot place message from {}: {}", message.country, error);
                continue;
            }
            None => {
                warn!("no cities known in {}", message.country);
                continue;
            }
        };
        placed.push(Placed {
            event: TemporalEvent {
                occurs_at: message.timestamp,
                location,
                identity: identity(message, &location),
            },
            hue: HSB::new(rng.random::<f64>(), MESSAGE_SAT, MESSAGE_BRT),
        });
    }
    placed
}

/// cities whose name starts with `prefix`, most populous first
pub fn search<'a>(cities: &'a [City], prefix: &str) -> Vec<&'a City> {
    let prefix = prefix.to_lowercase();
    cities
        .iter()
        .filter(|city| city.name.to_lowercase().starts_with(&prefix))
        .sorted_by(|a, b| b.population.cmp(&a.population))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    const CITIES: &str = r#"[
        [1702139, "Warsaw", "52.22977", "21.01178", "Europe/Warsaw", "PL"],
        [766739, "Kraków", 50.06143, 19.93658, "Europe/Warsaw", "PL"],
        ["8908081", "London", 51.50853, -0.12574, "Europe/London", "GB"],
        [254000, "Wolverhampton", 52.58547, -2.12296, "Europe/London", "GB"],
        ["broken"],
        [2138551, "Paris", 48.85341, 2.3488, "Europe/Paris", "FR"]
    ]"#;

    const MESSAGES: &str = r#"[
        ["1613347200", "PL"],
        [1613350800, "GB"],
        [1613354400, "XX"],
        [null, "PL"]
    ]"#;

    #[test]
    fn cities_parse() {
        let cities = parse_cities(CITIES).unwrap();
        assert_eq!(cities.len(), 5);
        assert_eq!(cities[0].name, "Warsaw");
        assert_eq!(cities[0].population, Population::confine(1_702_139));
        assert_eq!(cities[0].location, GeoPoint::new(52.22977, 21.01178));
        assert_eq!(cities[2].population, Population::confine(8_908_081));
        assert_eq!(cities[4].country, "FR");
    }

    #[test]
    fn messages_parse() {
        let messages = parse_messages(MESSAGES).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[0].timestamp,
            Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(messages[1].country, "GB");
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(parse_cities("{"), Err(Error::Dataset(_))));
        assert!(matches!(parse_messages("[1, 2]"), Err(Error::Dataset(_))));
    }

    #[test]
    fn land_parse() {
        let land = parse_land("[[[[0, 0], [10, 0], [10, 10], [0, 0]]], []]").unwrap();
        assert_eq!(land.len(), 1);
        assert_eq!(land[0].exterior().0.len(), 4);
        assert_eq!(land[0].exterior().0[1], Coordinate { x: 10.0, y: 0.0 });
        assert!(land[0].interiors().is_empty());
    }

    #[test]
    fn regions_by_country() {
        let regions = regions(&parse_cities(CITIES).unwrap());
        assert_eq!(regions.len(), 3);
        assert_eq!(regions["PL"].len(), 2);
        assert_eq!(regions["GB"][0].weight, 8_908_081.0);
    }

    #[test]
    fn placement() {
        let cities = parse_cities(CITIES).unwrap();
        let regions = regions(&cities);
        let messages = parse_messages(MESSAGES).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let placed = place_messages(&messages, &regions, &mut rng);
        // nothing is known about XX
        assert_eq!(placed.len(), 2);
        let warsaw = GeoPoint::new(52.22977, 21.01178);
        let krakow = GeoPoint::new(50.06143, 19.93658);
        assert!([warsaw, krakow].contains(&placed[0].event.location));
        assert_eq!(placed[0].event.occurs_at, messages[0].timestamp);
        assert!(!placed[0].event.identity.contains('.'));
        assert!(placed[0].event.identity.starts_with("msg-1613347200-"));
        assert!((0.0..1.0).contains(&placed[1].hue.hue));
    }

    #[test]
    fn identities() {
        let message = Message {
            timestamp: Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap(),
            country: "PL".to_string(),
        };
        assert_eq!(
            identity(&message, &GeoPoint::new(52.5, 21.25)),
            "msg-1613347200-5252125"
        );
    }

    const TZDATA: &str = "# version 2024a\n\
        Z Europe/Warsaw 1:24 - LMT 1880\n\
        L Europe/Warsaw Poland\n\
        L Europe/London GB\n\
        L Europe/London Europe/Jersey\n";

    const ZONE_TAB: &str = "# comment\n\
        PL\t+5215+02100\tEurope/Warsaw\n\
        GB\t+513030-0000731\tEurope/London\n\
        JE\t+491101-0020624\tEurope/Jersey\n";

    fn zones() -> Zones {
        Zones::new(parse_zone_links(TZDATA), parse_zone_tab(ZONE_TAB))
    }

    #[test]
    fn zone_links_parse() {
        let links = parse_zone_links(TZDATA);
        assert_eq!(links.len(), 3);
        assert_eq!(links["Poland"], "Europe/Warsaw");
        assert!(!links.contains_key("Europe/Warsaw"));
    }

    #[test]
    fn zone_tab_parse() {
        let countries = parse_zone_tab(ZONE_TAB);
        assert_eq!(countries.len(), 3);
        assert_eq!(countries["Europe/Warsaw"], "PL");
    }

    #[test]
    fn zones_to_countries() {
        let zones = zones();
        assert_eq!(zones.country("Europe/Warsaw"), Some("PL"));
        assert_eq!(zones.country("Poland"), Some("PL"));
        // links win over the zone table
        assert_eq!(zones.country("Europe/Jersey"), Some("GB"));
        assert_eq!(zones.country("Mars/Olympus"), None);
    }

    #[test]
    fn zone_rows_to_messages() {
        let rows = "1613347200\tPoland\n\
            1613350800\tEurope/London\n\
            \n\
            1613354400\tMars/Olympus\n\
            nonsense\n\
            1613358000\tPoland\n";
        let messages = zone_messages(rows, &zones());
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[0],
            Message {
                timestamp: Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap(),
                country: "PL".to_string(),
            }
        );
        assert_eq!(messages[1].country, "GB");
        assert_eq!(messages[2].country, "PL");
        assert_eq!(
            messages[2].timestamp,
            Utc.with_ymd_and_hms(2021, 2, 15, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn searching() {
        let cities = parse_cities(CITIES).unwrap();
        let found = search(&cities, "w");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Warsaw");
        assert_eq!(found[1].name, "Wolverhampton");
        assert_eq!(search(&cities, "KRA")[0].name, "Kraków");
        assert!(search(&cities, "z").is_empty());
    }
}
