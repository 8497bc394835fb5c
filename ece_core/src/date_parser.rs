//! Parsing of normalized German date and time expressions into a point in time.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon;

/// Turns a normalized date and time expression into a point in time.
pub trait DateParser {
    /// Parse the expression, or `None` if it is not understood.
    fn parse(&self, text: &str) -> Option<NaiveDateTime>;
}

static FILLER_WORDS: [&str; 5] = ["den", "der", "dem", "um", "ab"];

static TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})\.\s*(?P<month>\p{L}+)\.?(?:\s+(?P<year>\d{4}|\d{2}))?$")
        .unwrap()
});
static DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<day>\d{1,2})\.$").unwrap());
static MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<month>\p{L}+)\.?(?:\s+(?P<year>\d{4}))?$").unwrap());
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})\.(?P<month>\d{1,2})\.(?P<year>\d{4}|\d{2})?$").unwrap()
});
static ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})$").unwrap()
});

/// A parser for German expressions which prefers dates in the future.
///
/// Without a year the next matching date is chosen, and a bare day is read as a day of the
/// current month (or the next month, should that day have passed already).
#[derive(Debug, Clone)]
pub struct GermanDateParser {
    today: NaiveDate,
}

impl GermanDateParser {
    /// A parser resolving relative expressions against the given day.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        match text {
            "" | "heute" => return Some(self.today),
            "morgen" => return self.today.checked_add_signed(Duration::days(1)),
            "übermorgen" => return self.today.checked_add_signed(Duration::days(2)),
            "gestern" => return self.today.checked_sub_signed(Duration::days(1)),
            _ => {}
        }
        if let Some(weekday) = lexicon::weekday(text) {
            let days_ahead = (7 + weekday.num_days_from_monday()
                - self.today.weekday().num_days_from_monday())
                % 7;
            return self
                .today
                .checked_add_signed(Duration::days(i64::from(days_ahead)));
        }
        if let Some(captures) = DAY_MONTH.captures(text) {
            let day = captures["day"].parse().ok()?;
            let month = lexicon::month_number(&captures["month"])?;
            return match captures.name("year") {
                Some(year) => NaiveDate::from_ymd_opt(full_year(year.as_str())?, month, day),
                None => self.upcoming_in_year(month, day),
            };
        }
        if let Some(captures) = DAY.captures(text) {
            return self.upcoming_in_month(captures["day"].parse().ok()?);
        }
        if let Some(captures) = MONTH.captures(text) {
            let month = lexicon::month_number(&captures["month"])?;
            return match captures.name("year") {
                Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, 1),
                None if month < self.today.month() => {
                    NaiveDate::from_ymd_opt(self.today.year() + 1, month, 1)
                }
                None => NaiveDate::from_ymd_opt(self.today.year(), month, 1),
            };
        }
        if let Some(captures) = NUMERIC.captures(text) {
            let day = captures["day"].parse().ok()?;
            let month = captures["month"].parse().ok()?;
            return match captures.name("year") {
                Some(year) => NaiveDate::from_ymd_opt(full_year(year.as_str())?, month, day),
                None => self.upcoming_in_year(month, day),
            };
        }
        if let Some(captures) = ISO.captures(text) {
            return NaiveDate::from_ymd_opt(
                captures["year"].parse().ok()?,
                captures["month"].parse().ok()?,
                captures["day"].parse().ok()?,
            );
        }
        None
    }

    /// The date this year, or next year if it has passed.
    fn upcoming_in_year(&self, month: u32, day: u32) -> Option<NaiveDate> {
        match NaiveDate::from_ymd_opt(self.today.year(), month, day) {
            Some(date) if date >= self.today => Some(date),
            _ => NaiveDate::from_ymd_opt(self.today.year() + 1, month, day),
        }
    }

    /// The day in this month, or in the next month if it has passed.
    fn upcoming_in_month(&self, day: u32) -> Option<NaiveDate> {
        match self.today.with_day(day) {
            Some(date) if date >= self.today => Some(date),
            _ => {
                let (year, month) = match self.today.month() {
                    12 => (self.today.year() + 1, 1),
                    month => (self.today.year(), month + 1),
                };
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

/// "25" -> 2025
fn full_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    match text.len() {
        2 => Some(2000 + year),
        _ => Some(year),
    }
}

impl Default for GermanDateParser {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl DateParser for GermanDateParser {
    fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.to_lowercase();
        let (time, rest) = match TIME.captures(&text) {
            Some(captures) => {
                let hour = captures[1].parse().ok()?;
                let minute = captures[2].parse().ok()?;
                let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
                let span = captures.get(0)?.range();
                (time, format!("{} {}", &text[..span.start], &text[span.end..]))
            }
            None => (NaiveTime::from_hms_opt(0, 0, 0)?, text.clone()),
        };
        let mut words = rest
            .split_whitespace()
            .map(|word| word.trim_matches(','))
            .filter(|word| !word.is_empty() && !FILLER_WORDS.contains(word))
            .collect::<Vec<&str>>();
        // "5. April Samstag"
        if words.iter().any(|word| lexicon::weekday(word).is_none()) {
            words.retain(|word| lexicon::weekday(word).is_none());
        }
        let date = self.parse_date(&words.join(" "))?;
        Some(date.and_time(time))
    }
}
