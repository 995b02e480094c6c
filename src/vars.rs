/* # engine */

pub const MAP_WIDTH: f64 = 1100.0; // default map width in pixels, height is half of it
pub const PRECISION_LAT: f64 = 1.0; // latitudinal degrees per point when checking solar position
pub const PRECISION_LNG: f64 = 10.0; // longitudinal degrees per terminator point

/* ## messages */

pub const DECAY_ONSET: f64 = 5_000_000.0; // milliseconds a message stays fully visible
pub const DECAY_END: f64 = 10_000_000.0; // milliseconds after which a message is gone
pub const PLATEAU: f64 = 0.5; // opacity of a freshly posted message
pub const MESSAGE_RADIUS: f64 = 3.0;

/* ## cities */

// upper population bounds of marker radius tiers
pub const CITY_TIERS: [(u64, f64); 5] = [
    (200_000, 0.3),
    (500_000, 0.4),
    (1_000_000, 0.5),
    (2_000_000, 0.6),
    (4_000_000, 0.8),
];
pub const CITY_RADIUS_MAX: f64 = 1.0;

/* # animation */

pub const SUN_GLIDE: f64 = 0.8; // largest horizontal jump of the sun, as a share of map width, that still animates
pub const TICK_MINUTES: i64 = 20; // clock increment per animation tick
pub const TICK_FRAMES: usize = 24;

/* # colours */

pub const LAND_SHADE: f64 = -0.2; // luminance change of land against the background
pub const MESSAGE_SAT: f64 = 0.89;
pub const MESSAGE_BRT: f64 = 0.9;

/* # data */

pub const TZDATA: &str = "/usr/share/zoneinfo/tzdata.zi"; // compiled zone data, read for its links
pub const ZONE_TAB: &str = "/usr/share/zoneinfo/zone.tab";
