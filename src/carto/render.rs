use crate::{
    carto::{
        colour::luminance,
        datum::{GeoPoint, MapPoint},
        projection::project,
    },
    config::{EngineConfig, RenderOptions},
    engine::Night,
    error::Error,
    scene::{Lamp, Marker, Scene},
    vars::*,
};
use geo::{Coordinate, LineString, Polygon};
use itertools::Itertools;
use log::trace;
use std::path::Path;
use svg::{
    node::element::{
        Circle, Definitions, LinearGradient, Path as SvgPath, RadialGradient, Rectangle, Stop,
    },
    Document,
};

/* # geometry to svg */

fn coord_to_svg(coord: &Coordinate<f64>) -> String {
    format!("{} {}", coord.x, coord.y)
}

fn ring_to_svg(line: &LineString<f64>, config: &EngineConfig) -> String {
    line.0
        .iter()
        .map(|c| Coordinate::from(project(GeoPoint::from(*c), config)))
        .map(|c| coord_to_svg(&c))
        .join("L")
}

/// landmass outline, rings given in degrees
fn land_to_svg(poly: &Polygon<f64>, config: &EngineConfig) -> String {
    if poly.exterior().0.is_empty() {
        "".into()
    } else {
        let rings = std::iter::once(poly.exterior())
            .chain(poly.interiors())
            .map(|l| ring_to_svg(l, config))
            .join("M");
        format!("M{}Z", rings)
    }
}

/// uniform cubic b-spline through the terminator, drawn from its first point
///
/// The curve starts and ends on the outer points and is pulled towards,
/// without passing through, the inner ones.
fn basis(points: &[MapPoint]) -> String {
    let mut d = String::new();
    match points {
        [] => {}
        [only] => d.push_str(&format!(" L {}", xy(*only))),
        [first, second] => d.push_str(&format!(" L {} L {}", xy(*first), xy(*second))),
        [first, second, ..] => {
            d.push_str(&format!(" L {}", xy(*first)));
            d.push_str(&format!(" L {}", xy((*first * 5.0 + *second) / 6.0)));
            for (p0, p1, p2) in points.iter().copied().tuple_windows() {
                d.push_str(&bezier(p0, p1, p2));
            }
            let last = points[points.len() - 1];
            let before = points[points.len() - 2];
            d.push_str(&bezier(before, last, last));
            d.push_str(&format!(" L {}", xy(last)));
        }
    }
    d
}

fn bezier(p0: MapPoint, p1: MapPoint, p: MapPoint) -> String {
    format!(
        " C {} {} {}",
        xy((p0 * 2.0 + p1) / 3.0),
        xy((p0 + p1 * 2.0) / 3.0),
        xy((p0 + p1 * 4.0 + p) / 6.0)
    )
}

fn xy(point: MapPoint) -> String {
    format!("{},{}", point.x, point.y)
}

/// outline of the night region, closed along the edge away from the sun
pub fn night_path(night: &Night, config: &EngineConfig) -> String {
    let edge = night.anchor(config);
    format!(
        "M 0,{}{} L {},{} L 0,{} Z",
        edge,
        basis(&night.path),
        config.map_width,
        edge,
        edge
    )
}

/* # document */

fn stop(offset: &str, colour: &str) -> Stop {
    Stop::new()
        .set("offset", offset)
        .set("stop-color", colour)
}

fn definitions(options: &RenderOptions) -> Definitions {
    let horizontal = |id: &str, left: String, right: String| {
        LinearGradient::new()
            .set("id", id)
            .set("x1", "0%")
            .set("y1", "0%")
            .set("x2", "100%")
            .set("y2", "0%")
            .add(stop("0%", &left))
            .add(stop("100%", &right))
    };
    Definitions::new()
        .add(horizontal(
            "gradient",
            options.bg_color_left.clone(),
            options.bg_color_right.clone(),
        ))
        .add(horizontal(
            "landGradient",
            luminance(&options.bg_color_left, LAND_SHADE),
            luminance(&options.bg_color_right, LAND_SHADE),
        ))
        .add(
            RadialGradient::new()
                .set("id", "radialGradient")
                .add(
                    stop("0%", "rgb(255, 255, 255)").set("stop-opacity", options.sun_opacity),
                )
                .add(stop("100%", "rgb(255, 255, 255)").set("stop-opacity", 0)),
        )
}

fn marker(marker: &Marker, options: &RenderOptions) -> Circle {
    let circle = Circle::new()
        .set("id", marker.id.as_str())
        .set("cx", marker.xy.x)
        .set("cy", marker.xy.y)
        .set("r", marker.radius);
    match &marker.lamp {
        Lamp::City => circle
            .set("fill", options.lights_color.as_str())
            .set("opacity", marker.opacity * options.lights_opacity),
        Lamp::Message { colour, .. } => circle
            .set("fill", colour.as_str())
            .set("opacity", marker.opacity * options.lights_opacity),
    }
}

/// draw the scene: background, sun, land, night, messages and cities, in that order
pub fn render(
    scene: &Scene,
    land: &[Polygon<f64>],
    config: &EngineConfig,
    options: &RenderOptions,
) -> Document {
    trace!("rendering scene at {}", scene.now);
    let (width, height) = (config.map_width, config.map_height);
    let mut image = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height))
        .add(definitions(options))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "url(#gradient)"),
        )
        .add(
            Circle::new()
                .set("id", "sun")
                .set("cx", scene.sun.x)
                .set("cy", scene.sun.y)
                .set("r", options.sun_radius)
                .set("opacity", 1)
                .set("fill", "url(#radialGradient)"),
        );
    if !land.is_empty() {
        image = image.add(
            SvgPath::new()
                .set("id", "land")
                .set("fill", "url(#landGradient)")
                .set("fill-rule", "evenodd")
                .set(
                    "d",
                    land.iter().map(|poly| land_to_svg(poly, config)).join(" "),
                ),
        );
    }
    image = image.add(
        SvgPath::new()
            .set("id", "nightPath")
            .set("fill", "rgb(0,0,0)")
            .set("fill-opacity", options.shadow_opacity)
            .set("d", night_path(&scene.night, config)),
    );
    for message in scene.live_messages() {
        image = image.add(marker(message, options));
    }
    for city in &scene.cities {
        image = image.add(marker(city, options));
    }
    image
}

/// write a rendered frame as an svg file
pub fn save<P: AsRef<Path>>(path: P, image: &Document) -> Result<(), Error> {
    trace!("saving frame to {}", path.as_ref().display());
    svg::save(path, image)?;
    Ok(())
}
