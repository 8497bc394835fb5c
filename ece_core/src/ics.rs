//! Serializes calendars to iCalendar text.
//!
//! Content lines are folded after at most 75 octets without splitting a multibyte character.

use ical::generator::{IcalCalendar, IcalEvent, Property};

static LINE_BREAK: &str = "\r\n";
static LINE_LENGTH: usize = 75;

/// Escape a TEXT value, so that separators and line breaks in it stay part of the value.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => escaped.push_str(r"\\"),
            ';' => escaped.push_str(r"\;"),
            ',' => escaped.push_str(r"\,"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => {}
            character => escaped.push(character),
        }
    }
    escaped
}

/// Fold a content line, continuation lines starting with a space.
pub fn fold(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / LINE_LENGTH * 3);
    let mut length = 0;
    for character in line.chars() {
        let width = character.len_utf8();
        if length + width > LINE_LENGTH {
            folded.push_str(LINE_BREAK);
            folded.push(' ');
            length = 1;
        }
        folded.push(character);
        length += width;
    }
    folded
}

/// The calendar with its properties and events as iCalendar text.
pub fn generate(calendar: &IcalCalendar) -> String {
    let mut ics = String::new();
    push_line(&mut ics, "BEGIN:VCALENDAR");
    for property in &calendar.properties {
        push_line(&mut ics, &content_line(property));
    }
    for event in &calendar.events {
        push_event(&mut ics, event);
    }
    push_line(&mut ics, "END:VCALENDAR");
    ics
}

fn push_event(ics: &mut String, event: &IcalEvent) {
    push_line(ics, "BEGIN:VEVENT");
    for property in &event.properties {
        push_line(ics, &content_line(property));
    }
    push_line(ics, "END:VEVENT");
}

fn push_line(ics: &mut String, line: &str) {
    ics.push_str(&fold(line));
    ics.push_str(LINE_BREAK);
}

fn content_line(property: &Property) -> String {
    let mut line = property.name.clone();
    for (name, values) in property.params.iter().flatten() {
        let values = values
            .iter()
            .map(|value| param_value(value))
            .collect::<Vec<String>>()
            .join(",");
        line.push_str(&format!(";{name}={values}"));
    }
    line.push(':');
    line.push_str(property.value.as_deref().unwrap_or_default());
    line
}

fn param_value(value: &str) -> String {
    let value = value.replace(|c: char| matches!(c, '"' | '\r' | '\n'), "");
    if value.contains(|c: char| matches!(c, ':' | ';' | ',')) {
        format!("\"{value}\"")
    } else {
        value
    }
}
