use std::{env::current_dir, fs::write, path::PathBuf};

use anyhow::Result;
use chrono::Weekday;
use clap::Parser;
use ece_core::{
    ics,
    settings::{parse_weekday, DEFAULT_TIMEZONE},
    Settings, TokenGroups,
};
use log::info;

#[derive(Debug, Parser)]
pub struct Arguments {
    /// a token of the event name
    #[arg(long)]
    pub name: Vec<String>,
    /// a token of the date, e.g. "jeden" "Montag"
    #[arg(long)]
    pub date: Vec<String>,
    /// a token of the time, e.g. "16" "Uhr"
    #[arg(long)]
    pub time: Vec<String>,
    /// a token of the location
    #[arg(long)]
    pub location: Vec<String>,
    /// a token of the duration
    #[arg(long)]
    pub duration: Vec<String>,
    /// a link to put into the description
    #[arg(long)]
    pub link: Vec<String>,
    /// how often a weekly event takes place
    #[arg(long, default_value_t = 4)]
    pub recurrence_count: u32,
    /// the day standing for "Wochenende"
    #[arg(long, value_parser = parse_weekday, default_value = "Samstag")]
    pub weekend_day: Weekday,
    /// the timezone of timed events
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,
    /// the file to write, calendar.ics in the current directory by default
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl From<&Arguments> for TokenGroups {
    fn from(value: &Arguments) -> Self {
        TokenGroups {
            name: value.name.clone(),
            date: value.date.clone(),
            time: value.time.clone(),
            location: value.location.clone(),
            duration: value.duration.clone(),
            link: value.link.clone(),
        }
    }
}

impl From<&Arguments> for Settings {
    fn from(value: &Arguments) -> Self {
        Settings {
            recurrence_count: value.recurrence_count,
            weekend_day: value.weekend_day,
            timezone: value.timezone.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Arguments::parse();
    let calendar = ece_core::create_calendar(&TokenGroups::from(&args), &Settings::from(&args))?;
    let path = match args.output {
        Some(path) => path,
        None => {
            let mut path = current_dir()?;
            path.push("calendar.ics");
            path
        }
    };
    write(&path, ics::generate(&calendar))?;
    info!("wrote {}", path.display());
    Ok(())
}
