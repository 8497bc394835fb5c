//! Rewrites German time phrases like "sechzehn Uhr dreißig" or "o6:oo" to `HH:MM`.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    lexicon,
    rule::{apply_all, Rule},
};

/// Marks events without a time of day. A real appointment at 00:11 is not expected.
pub static ALL_DAY: &str = "00:11";

/// The all-day marker as a time of day.
pub fn all_day_time() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 11, 0).unwrap()
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        number_words(),
        Rule::replace("ocr zero", "[oO]", "0"),
        Rule::replace("separator", r"(\d)\s*[:.]\s*(\d)", "$1:$2"),
        Rule::replace("hour uhr minute", r"(?i)(\d{2}) Uhr (\d{2})", "$1$2"),
        Rule::replace("uhr", r"(?i)\s*\bUhr\b", ""),
        Rule::custom("bare hour", suffix_bare_hours),
        Rule::replace("join hour minute", r"\b(\d{1,2})\s+(\d{2})\b", "$1$2"),
        Rule::replace("insert colon", r"\b(\d{1,2})(\d{2})\b", "$1:$2"),
        Rule::custom("all day", all_day),
        Rule::custom("canonical", canonical),
    ]
});

static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}\b").unwrap());
static PAIR_BEFORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}\s+$").unwrap());
static MINUTES_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[:.]|\s+)\d{2}\b").unwrap());
static ALL_DAY_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ganztägig|ganztags|(?:am )?(?:de[nrm]? )?ganze[nr]? tag").unwrap()
});
static TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());

/// Normalize a time phrase to `HH:MM`, or [`ALL_DAY`] if it names no time.
pub fn normalize(text: &str) -> String {
    apply_all(&RULES, text).text
}

/// The rewrite rules in the order they are applied.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// "Sechzehn" -> "16"
fn number_words() -> Rule {
    let alternation = lexicon::time_ordinal_words()
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|");
    let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap();
    Rule::custom("number words", move |text| {
        regex.is_match(text).then(|| {
            regex
                .replace_all(text, |captures: &Captures| {
                    lexicon::time_ordinal(&captures[0])
                        .map(String::from)
                        .unwrap_or_else(|| captures[0].to_string())
                })
                .into_owned()
        })
    })
}

/// "16" -> "16:00", leaving numbers alone which already are or will become part of a time.
fn suffix_bare_hours(text: &str) -> Option<String> {
    let mut output = String::with_capacity(text.len() + 3);
    let mut last = 0;
    for number in BARE_NUMBER.find_iter(text) {
        let before = &text[..number.start()];
        let after = &text[number.end()..];
        if before.ends_with([':', '.'])
            || PAIR_BEFORE.is_match(before)
            || MINUTES_AFTER.is_match(after)
        {
            continue;
        }
        output.push_str(&text[last..number.end()]);
        output.push_str(":00");
        last = number.end();
    }
    if last == 0 {
        return None;
    }
    output.push_str(&text[last..]);
    Some(output)
}

/// Any all-day phrase wins over every time found so far.
fn all_day(text: &str) -> Option<String> {
    ALL_DAY_PHRASE.is_match(text).then(|| String::from(ALL_DAY))
}

/// Keep only the first time, with a two-digit hour.
fn canonical(text: &str) -> Option<String> {
    let canonical = match TIME.captures(text) {
        Some(captures) => format!("{:0>2}:{}", &captures[1], &captures[2]),
        None => String::from(ALL_DAY),
    };
    (canonical != text).then_some(canonical)
}
