//! Tunable policies of the pipeline.

use chrono::Weekday;

use crate::{
    error::{Error, Result},
    lexicon,
};

pub static DEFAULT_TIMEZONE: &str = "Europe/Berlin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How often a weekly recurring event takes place.
    pub recurrence_count: u32,
    /// The day which stands for "Wochenende".
    pub weekend_day: Weekday,
    /// The `TZID` of timed events.
    pub timezone: String,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.recurrence_count == 0 {
            return Err(Error::InvalidSettings(String::from(
                "the recurrence count must be at least 1",
            )));
        }
        if self.timezone.trim().is_empty() {
            return Err(Error::InvalidSettings(String::from(
                "the timezone must not be empty",
            )));
        }
        Ok(())
    }
}

/// Parse a German weekday name like "Sonntag".
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    lexicon::weekday(name.trim())
        .ok_or_else(|| Error::InvalidSettings(format!("{name:?} is not a German weekday")))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recurrence_count: 4,
            weekend_day: Weekday::Sat,
            timezone: String::from(DEFAULT_TIMEZONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use crate::{
        error::Error,
        settings::{parse_weekday, Settings},
    };

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Sonntag"), Ok(Weekday::Sun));
        assert_eq!(parse_weekday("samstag"), Ok(Weekday::Sat));
        assert!(parse_weekday("Sunday").is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(Settings::default().validate(), Ok(()));
        let settings = Settings {
            recurrence_count: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings(_))));
        let settings = Settings {
            timezone: String::from(" "),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
