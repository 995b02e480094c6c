use chrono::{DateTime, Utc};
use clap::Parser;
use daylight::{
    atlas,
    carto::render,
    config::Settings,
    scene::Scene,
    sun::oracle::Almanac,
    Engine, Error,
};
use log::{error, info};
use std::{fs, path::PathBuf, process};

#[derive(Parser, Debug, Clone)]
#[command(name = "daylight")]
#[command(about = "Render the day and night of the world as a run of svg frames")]
struct Cli {
    /// settings file in toml, defaults are used without one
    settings: Option<PathBuf>,

    /// number of frames to render
    #[arg(long)]
    frames: Option<usize>,

    /// clock value of the first frame, e.g. 2021-02-15T00:00:00Z
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// minutes the clock moves between frames, backwards when negative
    #[arg(long, allow_negative_numbers = true)]
    increment: Option<i64>,

    /// directory the frames are written to
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// settings file, if any, with the command line overrides applied
    fn settings(&self) -> Result<Settings, Error> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let animation = &mut settings.animation;
        if let Some(frames) = self.frames {
            animation.frames = frames;
        }
        if let Some(start) = self.start {
            animation.start = start;
        }
        if let Some(increment) = self.increment {
            animation.increment_minutes = increment;
        }
        if let Some(output) = &self.output {
            animation.output = output.clone();
        }
        Ok(settings)
    }
}

fn animate(cli: &Cli) -> Result<(), Error> {
    let settings = cli.settings()?;
    let engine = Engine::new(settings.engine()?, Almanac)?;

    let data = &settings.data;
    let cities = match &data.cities {
        Some(path) => atlas::load_cities(path)?,
        None => Vec::new(),
    };
    let messages = match (&data.messages, &data.zoned_messages) {
        (Some(path), _) => atlas::load_messages(path)?,
        (None, Some(path)) => {
            let zones = atlas::load_zones(&data.tzdata, &data.zone_tab)?;
            atlas::load_zone_messages(path, &zones)?
        }
        (None, None) => Vec::new(),
    };
    let land = match &data.land {
        Some(path) => atlas::load_land(path)?,
        None => Vec::new(),
    };
    let placed = atlas::place_messages(&messages, &atlas::regions(&cities), &mut rand::rng());
    info!("placed {} of {} messages", placed.len(), messages.len());

    let animation = &settings.animation;
    fs::create_dir_all(&animation.output)?;
    let mut scene = Scene::new(&engine, animation.start, &cities, &placed)?;
    for frame in 0..animation.frames {
        if frame > 0 {
            let tally = scene.advance(&engine, animation.increment_minutes)?;
            info!(
                "frame {} at {}: {} lights and {} messages changed{}",
                frame,
                scene.now,
                tally.cities,
                tally.messages,
                if scene.glide { "" } else { ", sun wrapped" }
            );
        }
        let image = render::render(&scene, &land, engine.config(), &settings.render);
        render::save(
            animation.output.join(format!("daylight-{}.svg", frame)),
            &image,
        )?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    pretty_env_logger::init_timed();
    info!("initialising daylight");
    if let Err(err) = animate(&cli) {
        error!("{}", err);
        process::exit(1);
    }
    info!("animation completed")
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_without_arguments() {
        let cli = Cli::try_parse_from(["daylight"]).unwrap();
        assert!(cli.settings.is_none());
        let settings = cli.settings().unwrap();
        assert_eq!(settings.animation.frames, 24);
        assert_eq!(settings.animation.output, PathBuf::from("bounce"));
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "daylight",
            "--frames",
            "3",
            "--start",
            "2021-06-21T12:00:00Z",
            "--increment",
            "-60",
            "--output",
            "frames",
        ])
        .unwrap();
        let animation = cli.settings().unwrap().animation;
        assert_eq!(animation.frames, 3);
        assert_eq!(
            animation.start,
            Utc.with_ymd_and_hms(2021, 6, 21, 12, 0, 0).unwrap()
        );
        assert_eq!(animation.increment_minutes, -60);
        assert_eq!(animation.output, PathBuf::from("frames"));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["daylight", "--frames", "many"]).is_err());
        assert!(Cli::try_parse_from(["daylight", "--start", "yesterday"]).is_err());
        assert!(Cli::try_parse_from(["daylight", "--unknown"]).is_err());
        let help = Cli::try_parse_from(["daylight", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn missing_settings_file() {
        let cli = Cli::try_parse_from(["daylight", "/nonexistent/daylight.toml"]).unwrap();
        assert!(matches!(cli.settings(), Err(Error::Io(_))));
    }
}
