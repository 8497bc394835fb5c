//! This crate turns the tokens extracted from a German text (usually OCR'd from a poster or flyer)
//! into an iCalendar event.
//!
//! Colloquial date and time phrases like "jeden Montag" or "sechzehn Uhr" are normalized before
//! they are parsed, weekly recurrence is detected along the way.

pub use ical;

pub mod assembler;
pub mod date_normalizer;
pub mod date_parser;
pub mod error;
pub mod event;
pub mod ics;
pub mod lexicon;
pub mod rule;
pub mod settings;
pub mod time_normalizer;

use ical::generator::IcalCalendar;

pub use crate::{
    assembler::TokenGroups,
    error::{Error, Result},
    settings::Settings,
};
use crate::{
    assembler::Assembler,
    date_normalizer::DateNormalizer,
    date_parser::{DateParser, GermanDateParser},
    event::EventRecord,
};

/// Builds calendars for one set of settings, compiling the date rules only once.
#[derive(Clone)]
pub struct CalendarGenerator {
    settings: Settings,
    date_normalizer: DateNormalizer,
}

impl CalendarGenerator {
    pub fn new(settings: Settings) -> Self {
        let date_normalizer = DateNormalizer::new(settings.weekend_day);
        Self {
            settings,
            date_normalizer,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the calendar for the event described by the token groups, relative to today.
    pub fn create_calendar(&self, tokens: &TokenGroups) -> Result<IcalCalendar> {
        self.create_calendar_with(tokens, GermanDateParser::default())
    }

    /// Build the calendar for the event described by the token groups using a specific parser.
    pub fn create_calendar_with<P: DateParser>(
        &self,
        tokens: &TokenGroups,
        parser: P,
    ) -> Result<IcalCalendar> {
        self.settings.validate()?;
        let fields =
            Assembler::with_normalizer(self.date_normalizer.clone(), parser).assemble(tokens)?;
        let record = EventRecord::new(&fields, self.settings.recurrence_count);
        Ok(record.calendar(&self.settings.timezone))
    }
}

/// Build the calendar for the event described by the token groups, relative to today.
pub fn create_calendar(tokens: &TokenGroups, settings: &Settings) -> Result<IcalCalendar> {
    CalendarGenerator::new(settings.clone()).create_calendar(tokens)
}

/// Build the calendar for the event described by the token groups using a specific date parser.
pub fn create_calendar_with<P: DateParser>(
    tokens: &TokenGroups,
    settings: &Settings,
    parser: P,
) -> Result<IcalCalendar> {
    CalendarGenerator::new(settings.clone()).create_calendar_with(tokens, parser)
}
