//! Static German word tables used by the normalizers.
//!
//! All lookups are case-insensitive. The tables are built once and never change.

use std::collections::HashMap;

use chrono::Weekday;
use once_cell::sync::Lazy;

/// German cardinal number words and their two-digit representation.
static TIME_ORDINALS: &[(&str, &str)] = &[
    ("Null", "00"),
    ("Ein", "01"),
    ("Eins", "01"),
    ("Zwei", "02"),
    ("Drei", "03"),
    ("Vier", "04"),
    ("Fünf", "05"),
    ("Sechs", "06"),
    ("Sieben", "07"),
    ("Acht", "08"),
    ("Neun", "09"),
    ("Zehn", "10"),
    ("Elf", "11"),
    ("Zwölf", "12"),
    ("Dreizehn", "13"),
    ("Vierzehn", "14"),
    ("Fünfzehn", "15"),
    ("Sechzehn", "16"),
    ("Siebzehn", "17"),
    ("Achtzehn", "18"),
    ("Achterzehn", "18"),
    ("Neunzehn", "19"),
    ("Zwanzig", "20"),
    ("Einundzwanzig", "21"),
    ("Zweiundzwanzig", "22"),
    ("Dreiundzwanzig", "23"),
    ("Vierundzwanzig", "24"),
    ("Fünfundzwanzig", "25"),
    ("Sechsundzwanzig", "26"),
    ("Siebenundzwanzig", "27"),
    ("Siebundzwanzig", "27"),
    ("Achtundzwanzig", "28"),
    ("Neunundzwanzig", "29"),
    ("Dreißig", "30"),
    ("Einunddreißig", "31"),
    ("Zweiunddreißig", "32"),
    ("Zweiunterdreißig", "32"),
    ("Dreiunddreißig", "33"),
    ("Dreiunderdreißig", "33"),
    ("Vierunddreißig", "34"),
    ("Vierunterdreißig", "34"),
    ("Fünfunddreißig", "35"),
    ("Sechsunddreißig", "36"),
    ("Siebunddreißig", "37"),
    ("Achtunddreißig", "38"),
    ("Neununddreißig", "39"),
    ("Vierzig", "40"),
    ("Einundvierzig", "41"),
    ("Zweiundvierzig", "42"),
    ("Dreiundvierzig", "43"),
    ("Vierundvierzig", "44"),
    ("Fünfundvierzig", "45"),
    ("Sechsundvierzig", "46"),
    ("Siebundvierzig", "47"),
    ("Achtundvierzig", "48"),
    ("Neunundvierzig", "49"),
    ("Fünfzig", "50"),
    ("Einundfünfzig", "51"),
    ("Zweiundfünfzig", "52"),
    ("Dreiundfünfzig", "53"),
    ("Vierundfünfzig", "54"),
    ("Fünfundfünfzig", "55"),
    ("Sechsundfünfzig", "56"),
    ("Siebundfünfzig", "57"),
    ("Achtundfünfzig", "58"),
    ("Neunundfünfzig", "59"),
];

/// German ordinal adjectives for the days of a month.
static DATE_ORDINALS: &[(&str, &str)] = &[
    ("erster", "1."),
    ("zweiter", "2."),
    ("dritter", "3."),
    ("vierter", "4."),
    ("fünfter", "5."),
    ("sechster", "6."),
    ("siebter", "7."),
    ("achter", "8."),
    ("neunter", "9."),
    ("zehnter", "10."),
    ("elfter", "11."),
    ("zwölfter", "12."),
    ("dreizehnter", "13."),
    ("vierzehnter", "14."),
    ("fünfzehnter", "15."),
    ("sechzehnter", "16."),
    ("siebzehnter", "17."),
    ("achtzehnter", "18."),
    ("neunzehnter", "19."),
    ("zwanzigster", "20."),
    ("einundzwanzigster", "21."),
    ("zweiundzwanzigster", "22."),
    ("dreiundzwanzigster", "23."),
    ("vierundzwanzigster", "24."),
    ("fünfundzwanzigster", "25."),
    ("sechsundzwanzigster", "26."),
    ("siebenundzwanzigster", "27."),
    ("siebundzwanzigster", "27."),
    ("achtundzwanzigster", "28."),
    ("neunundzwanzigster", "29."),
    ("dreißigster", "30."),
    ("einunddreißigster", "31."),
];

pub static WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

static WEEKDAY_VALUES: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub static MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

static TIME_ORDINAL_MAP: Lazy<HashMap<String, &'static str>> =
    Lazy::new(|| lowercase_map(TIME_ORDINALS));

static DATE_ORDINAL_MAP: Lazy<HashMap<String, &'static str>> =
    Lazy::new(|| lowercase_map(DATE_ORDINALS));

fn lowercase_map(table: &[(&'static str, &'static str)]) -> HashMap<String, &'static str> {
    table
        .iter()
        .map(|(word, number)| (word.to_lowercase(), *number))
        .collect()
}

/// All words of a table, longest first, so that they can be joined into a regex alternation.
fn words(table: &[(&'static str, &'static str)]) -> Vec<&'static str> {
    let mut words: Vec<&'static str> = table.iter().map(|(word, _)| *word).collect();
    words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
    words
}

pub fn time_ordinal_words() -> Vec<&'static str> {
    words(TIME_ORDINALS)
}

pub fn date_ordinal_words() -> Vec<&'static str> {
    words(DATE_ORDINALS)
}

/// Look up a number word like "Sechzehn", giving "16".
pub fn time_ordinal(word: &str) -> Option<&'static str> {
    TIME_ORDINAL_MAP.get(&word.to_lowercase()).copied()
}

/// Look up an ordinal like "erster", giving "1.".
pub fn date_ordinal(word: &str) -> Option<&'static str> {
    DATE_ORDINAL_MAP.get(&word.to_lowercase()).copied()
}

/// The German month name for a month number, with or without a leading zero.
///
/// "4" and "04" both give "April".
pub fn month_name(number: &str) -> Option<&'static str> {
    let index: usize = number.parse().ok()?;
    MONTHS.get(index.checked_sub(1)?).copied()
}

/// The month number for a German month name or its abbreviation ("Dezember", "dez", "Sept").
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_lowercase();
    if name.chars().count() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|month| month.to_lowercase().starts_with(&name))
        .map(|index| index as u32 + 1)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// The weekday a German weekday name stands for.
pub fn weekday(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    WEEKDAYS
        .iter()
        .position(|weekday| weekday.to_lowercase() == name)
        .map(|index| WEEKDAY_VALUES[index])
}
