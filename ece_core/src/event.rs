//! Builds the iCalendar representation of a single event.

use chrono::NaiveDateTime;
use ical::{
    generator::{IcalCalendar, IcalCalendarBuilder, IcalEvent, Property},
    ical_param, ical_property,
};
use regex::Regex;

use crate::{assembler::EventFields, ics::escape_text};

static PROD_ID: [&str; 2] = ["Ereigniskalender", "ece"];
static DATE_FORMAT: &str = "%Y%m%d";
static DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A weekly repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub count: u32,
}

impl Recurrence {
    pub fn rule(&self) -> String {
        format!("FREQ=WEEKLY;COUNT={}", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub start: NaiveDateTime,
    /// All-day events only carry the date of their start.
    pub all_day: bool,
    pub recurrence: Option<Recurrence>,
    pub description: String,
    pub location: String,
}

impl EventRecord {
    /// Build the record, repeating it `recurrence_count` times if the fields say it repeats.
    pub fn new(fields: &EventFields, recurrence_count: u32) -> Self {
        Self {
            name: fields.name.clone(),
            start: fields.start.datetime,
            all_day: fields.start.is_all_day(),
            recurrence: fields.repeats.then_some(Recurrence {
                count: recurrence_count,
            }),
            description: fields.description.clone(),
            location: fields.location.clone(),
        }
    }

    /// A calendar containing just this event, timed events being local to `timezone`.
    pub fn calendar(&self, timezone: &str) -> IcalCalendar {
        let changed = chrono::Local::now().format(DATETIME_FORMAT).to_string();
        let mut calendar = IcalCalendarBuilder::version("2.0")
            .gregorian()
            .prodid(prod_id())
            .build();
        calendar.events.push(self.event(timezone, &changed));
        calendar
    }

    fn event(&self, timezone: &str, changed: &str) -> IcalEvent {
        let mut event = IcalEvent::new();
        event.properties.push(ical_property!(
            "UID",
            escape_text(&uid(&self.name, &self.start))
        ));
        event.properties.push(ical_property!("DTSTAMP", changed));
        event.properties.push(self.dt_start(timezone));
        event
            .properties
            .push(ical_property!("SUMMARY", escape_text(&self.name)));
        event
            .properties
            .push(ical_property!("DESCRIPTION", escape_text(&self.description)));
        event
            .properties
            .push(ical_property!("LOCATION", escape_text(&self.location)));
        if let Some(recurrence) = &self.recurrence {
            event.properties.push(ical_property!("RRULE", recurrence.rule()));
        }
        event
    }

    fn dt_start(&self, timezone: &str) -> Property {
        if self.all_day {
            ical_property!(
                "DTSTART",
                self.start.format(DATE_FORMAT).to_string(),
                ical_param!("VALUE", "DATE")
            )
        } else {
            ical_property!(
                "DTSTART",
                self.start.format(DATETIME_FORMAT).to_string(),
                ical_param!("TZID", timezone)
            )
        }
    }
}

fn prod_id() -> String {
    let mut strings: Vec<String> = Vec::from(PROD_ID).into_iter().map(String::from).collect();
    strings.splice(0..0, [String::from("-")]);
    strings.join("//")
}

/// Get a unique id for an event with this name and start.
fn uid(name: &str, start: &NaiveDateTime) -> String {
    let whitespace_regex = Regex::new(r"\s+").unwrap();
    let name = whitespace_regex.replace_all(name, "-");
    format!("Ereignis_{name}_{}@ece", start.format(DATETIME_FORMAT))
}
