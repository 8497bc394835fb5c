//! The HTTP interface, serving events built from extracted tokens as iCalendar files.
//!
//! `GET /calendar?name=<name>&date=<date>&time=<time>&location=<location>&link=<link>` or
//! `POST /calendar` with the token groups as JSON.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use chrono::Weekday;
use clap::Parser;
use ece_core::{
    settings::{parse_weekday, DEFAULT_TIMEZONE},
    CalendarGenerator, Settings,
};
use log::info;

mod route;

#[derive(Debug, Parser)]
struct Arguments {
    /// the address to listen on
    #[arg(long, default_value = "0.0.0.0:8008")]
    address: SocketAddr,
    /// how often a weekly event takes place
    #[arg(long, default_value_t = 4)]
    recurrence_count: u32,
    /// the day standing for "Wochenende"
    #[arg(long, value_parser = parse_weekday, default_value = "Samstag")]
    weekend_day: Weekday,
    /// the timezone of timed events
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,
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

fn app(settings: Settings) -> Router {
    Router::new()
        .route(
            "/calendar",
            get(route::calendar::handler).post(route::calendar::json_handler),
        )
        .with_state(Arc::new(CalendarGenerator::new(settings)))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Arguments::parse();
    let settings = Settings::from(&args);
    settings.validate()?;
    info!("listening on {}", args.address);
    axum::Server::bind(&args.address)
        .serve(app(settings).into_make_service())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use clap::Parser;
    use ece_core::Settings;

    use crate::Arguments;

    #[test]
    fn test_from_arguments() {
        let args = Arguments::parse_from(["ece_server"]);
        assert_eq!(args.address.port(), 8008);
        assert_eq!(Settings::from(&args), Settings::default());
        let args = Arguments::parse_from([
            "ece_server",
            "--address",
            "127.0.0.1:3000",
            "--recurrence-count",
            "8",
            "--weekend-day",
            "Sonntag",
        ]);
        assert_eq!(args.address.port(), 3000);
        let settings = Settings::from(&args);
        assert_eq!(settings.recurrence_count, 8);
        assert_eq!(settings.weekend_day, Weekday::Sun);
    }
}
