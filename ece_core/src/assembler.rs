//! Joins the token groups of one event into its fields and resolves its start.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::{
    date_normalizer::DateNormalizer,
    date_parser::{DateParser, GermanDateParser},
    error::{Error, Result},
    settings::Settings,
    time_normalizer::{self, ALL_DAY},
};

static TODAY: &str = "Heute";
static FORMAT: &str = "%Y-%m-%d %H:%M:%S";
static DEFAULT_DURATION: &str = "1";

/// The tokens extracted from a text, grouped by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenGroups {
    pub name: Vec<String>,
    pub date: Vec<String>,
    pub time: Vec<String>,
    pub location: Vec<String>,
    pub duration: Vec<String>,
    pub link: Vec<String>,
}

/// The candidates for the start of an event, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    DateAndTime,
    DateAllDay,
    TodayAndTime,
    TodayAllDay,
}

impl FallbackTier {
    pub const CASCADE: [FallbackTier; 4] = [
        FallbackTier::DateAndTime,
        FallbackTier::DateAllDay,
        FallbackTier::TodayAndTime,
        FallbackTier::TodayAllDay,
    ];

    /// The expression handed to the date parser.
    pub fn expression(self, date: &str, time: &str) -> String {
        match self {
            FallbackTier::DateAndTime => format!("{date} {time}"),
            FallbackTier::DateAllDay => format!("{date} {ALL_DAY}"),
            FallbackTier::TodayAndTime => format!("{TODAY} {time}"),
            FallbackTier::TodayAllDay => format!("{TODAY} {ALL_DAY}"),
        }
    }
}

/// The start of an event together with the candidate it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub datetime: NaiveDateTime,
    pub tier: FallbackTier,
}

impl ResolvedTimestamp {
    /// Whether the start carries the all-day marker instead of a real time of day.
    pub fn is_all_day(&self) -> bool {
        self.datetime.time() == time_normalizer::all_day_time()
    }
}

impl Display for ResolvedTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format(FORMAT))
    }
}

/// The fields of an event, ready to be built into a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub description: String,
    pub location: String,
    /// Not taken into account for the end of the event yet.
    pub duration: String,
    pub start: ResolvedTimestamp,
    pub repeats: bool,
}

pub struct Assembler<P = GermanDateParser> {
    date_normalizer: DateNormalizer,
    parser: P,
}

impl Assembler<GermanDateParser> {
    /// An assembler resolving dates relative to the current day.
    pub fn new(settings: &Settings) -> Self {
        Self::with_parser(settings, GermanDateParser::default())
    }
}

impl<P: DateParser> Assembler<P> {
    pub fn with_parser(settings: &Settings, parser: P) -> Self {
        Self::with_normalizer(DateNormalizer::new(settings.weekend_day), parser)
    }

    /// An assembler reusing already built date rules.
    pub fn with_normalizer(date_normalizer: DateNormalizer, parser: P) -> Self {
        Self {
            date_normalizer,
            parser,
        }
    }

    pub fn assemble(&self, tokens: &TokenGroups) -> Result<EventFields> {
        let (start, repeats) = self.resolve(&tokens.date, &tokens.time)?;
        Ok(EventFields {
            name: name(&tokens.name),
            description: description(&tokens.link),
            location: location(&tokens.location),
            duration: duration(&tokens.duration),
            start,
            repeats,
        })
    }

    /// Resolve the start from the date and time tokens, and whether the event repeats.
    ///
    /// Missing dates default to today, missing times to all day.
    pub fn resolve(
        &self,
        date_tokens: &[String],
        time_tokens: &[String],
    ) -> Result<(ResolvedTimestamp, bool)> {
        let date = if date_tokens.is_empty() {
            String::from(TODAY)
        } else {
            date_tokens.join(" ")
        };
        let time = if time_tokens.is_empty() {
            String::from(ALL_DAY)
        } else {
            time_tokens.join(" ")
        };
        let normalized_date = self.date_normalizer.normalize(&date);
        let normalized_time = time_normalizer::normalize(&time);
        let resolved = FallbackTier::CASCADE.iter().find_map(|tier| {
            let expression = tier.expression(&normalized_date.text, &normalized_time);
            match self.parser.parse(&expression) {
                Some(datetime) => Some(ResolvedTimestamp {
                    datetime,
                    tier: *tier,
                }),
                None => {
                    debug!("{tier:?}: unable to parse {expression:?}");
                    None
                }
            }
        });
        let Some(resolved) = resolved else {
            return Err(Error::Unresolvable { date, time });
        };
        if resolved.tier == FallbackTier::DateAndTime {
            info!("resolved {date:?} {time:?} to {resolved}");
        } else {
            warn!(
                "resolved {date:?} {time:?} to {resolved} using {:?}",
                resolved.tier
            );
        }
        Ok((resolved, normalized_date.repeats))
    }
}

pub fn name(tokens: &[String]) -> String {
    tokens.join("|")
}

/// Links may have been split by the OCR, so all whitespace is removed.
pub fn description(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| token.split_whitespace().collect::<String>())
        .collect::<Vec<String>>()
        .join("|")
}

pub fn location(tokens: &[String]) -> String {
    tokens.join(" ")
}

pub fn duration(tokens: &[String]) -> String {
    tokens
        .first()
        .cloned()
        .unwrap_or_else(|| String::from(DEFAULT_DURATION))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::{
        assembler::{
            description, duration, location, name, Assembler, FallbackTier, TokenGroups,
        },
        date_parser::{DateParser, GermanDateParser},
        error::Error,
        settings::Settings,
    };

    struct FailingParser;

    impl DateParser for FailingParser {
        fn parse(&self, _text: &str) -> Option<NaiveDateTime> {
            None
        }
    }

    fn tokens(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    fn assembler() -> Assembler {
        let parser = GermanDateParser::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        Assembler::with_parser(&Settings::default(), parser)
    }

    #[test]
    fn test_name() {
        assert_eq!(name(&tokens(&["Team", "Meeting"])), "Team|Meeting");
        assert_eq!(name(&tokens(&["Teammeeting"])), "Teammeeting");
        assert_eq!(name(&[]), "");
    }

    #[test]
    fn test_description() {
        assert_eq!(
            description(&tokens(&["http://example .de", "www.x. org"])),
            "http://example.de|www.x.org"
        );
        assert_eq!(description(&[]), "");
    }

    #[test]
    fn test_location() {
        assert_eq!(location(&tokens(&["Büro", "2.", "OG"])), "Büro 2. OG");
    }

    #[test]
    fn test_duration() {
        assert_eq!(duration(&[]), "1");
        assert_eq!(duration(&tokens(&["2h", "30min"])), "2h");
    }

    #[test]
    fn test_expression() {
        assert_eq!(
            FallbackTier::DateAndTime.expression("Montag", "16:00"),
            "Montag 16:00"
        );
        assert_eq!(
            FallbackTier::DateAllDay.expression("Montag", "16:00"),
            "Montag 00:11"
        );
        assert_eq!(
            FallbackTier::TodayAndTime.expression("Montag", "16:00"),
            "Heute 16:00"
        );
        assert_eq!(
            FallbackTier::TodayAllDay.expression("Montag", "16:00"),
            "Heute 00:11"
        );
    }

    #[test]
    fn test_assemble() {
        let groups = TokenGroups {
            name: tokens(&["Teammeeting"]),
            date: tokens(&["16.", "April"]),
            time: tokens(&["15"]),
            location: tokens(&["Büro"]),
            duration: vec![],
            link: tokens(&["http://x"]),
        };
        let fields = assembler().assemble(&groups).unwrap();
        assert_eq!(fields.name, "Teammeeting");
        assert_eq!(fields.description, "http://x");
        assert_eq!(fields.location, "Büro");
        assert_eq!(fields.duration, "1");
        assert_eq!(fields.start.to_string(), "2025-04-16 15:00:00");
        assert_eq!(fields.start.tier, FallbackTier::DateAndTime);
        assert!(!fields.start.is_all_day());
        assert!(!fields.repeats);
    }

    #[test]
    fn test_resolve_defaults() {
        let (start, repeats) = assembler().resolve(&[], &[]).unwrap();
        assert_eq!(start.to_string(), "2025-01-01 00:11:00");
        assert!(start.is_all_day());
        assert!(!repeats);
    }

    #[test]
    fn test_resolve_all_day() {
        let (start, _) = assembler()
            .resolve(&tokens(&["Nächster", "Montag"]), &[])
            .unwrap();
        assert_eq!(start.to_string(), "2025-01-06 00:11:00");
        assert!(start.is_all_day());
    }

    #[test]
    fn test_resolve_repeats() {
        let (start, repeats) = assembler()
            .resolve(&tokens(&["Jeden", "Freitag"]), &tokens(&["18", "Uhr"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-01-03 18:00:00");
        assert!(repeats);
    }

    #[test]
    fn test_resolve_fallback_date_all_day() {
        let (start, _) = assembler()
            .resolve(&tokens(&["16.", "April"]), &tokens(&["25", "Uhr"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-04-16 00:11:00");
        assert_eq!(start.tier, FallbackTier::DateAllDay);
    }

    #[test]
    fn test_resolve_fallback_today_and_time() {
        let (start, _) = assembler()
            .resolve(&tokens(&["irgendwann"]), &tokens(&["15"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-01-01 15:00:00");
        assert_eq!(start.tier, FallbackTier::TodayAndTime);
    }

    #[test]
    fn test_resolve_fallback_today_all_day() {
        let (start, _) = assembler()
            .resolve(&tokens(&["irgendwann"]), &tokens(&["25", "Uhr"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-01-01 00:11:00");
        assert_eq!(start.tier, FallbackTier::TodayAllDay);
    }

    #[test]
    fn test_resolve_two_digit_year() {
        let (start, _) = assembler()
            .resolve(&tokens(&["24.12.25"]), &tokens(&["15"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-12-24 15:00:00");
        assert_eq!(start.tier, FallbackTier::DateAndTime);
        let (start, _) = assembler().resolve(&tokens(&["16.04.25"]), &[]).unwrap();
        assert_eq!(start.to_string(), "2025-04-16 00:11:00");
        assert_eq!(start.tier, FallbackTier::DateAndTime);
    }

    #[test]
    fn test_resolve_weekday_after_date() {
        let (start, repeats) = assembler()
            .resolve(&tokens(&["5.", "April", "Samstag"]), &tokens(&["10", "Uhr"]))
            .unwrap();
        assert_eq!(start.to_string(), "2025-04-05 10:00:00");
        assert_eq!(start.tier, FallbackTier::DateAndTime);
        assert!(!repeats);
    }

    #[test]
    fn test_resolve_unresolvable() {
        let assembler = Assembler::with_parser(&Settings::default(), FailingParser);
        let error = assembler
            .resolve(&tokens(&["Montag"]), &tokens(&["15"]))
            .unwrap_err();
        assert_eq!(
            error,
            Error::Unresolvable {
                date: String::from("Montag"),
                time: String::from("15"),
            }
        );
    }
}
