//! Rewrites German date phrases to a form the date parser understands and detects weekly
//! recurrence.
//!
//! "Jeden Montag" and "montags" both describe a weekly event. "Freitag, der 05.04." becomes
//! "05. April".

use std::sync::Arc;

use chrono::Weekday;
use regex::{Captures, Regex};

use crate::{
    lexicon,
    rule::{apply_all, Rule},
};

/// A normalized date phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    pub text: String,
    /// The phrase describes a weekly recurring event.
    pub repeats: bool,
}

/// The ordered rules for date phrases.
///
/// Which weekday stands for "Wochenende" is configurable, so the rules are built per normalizer.
/// Clones share the compiled rules.
#[derive(Clone)]
pub struct DateNormalizer {
    rules: Arc<[Rule]>,
}

impl DateNormalizer {
    pub fn new(weekend_day: Weekday) -> Self {
        let weekend = lexicon::weekday_name(weekend_day);
        let weekdays = lexicon::WEEKDAYS.join("|");
        Self {
            rules: vec![
                ordinal_words(),
                Rule::replace("ocr zero after digit", r"(\d)[oO]", "${1}0"),
                Rule::replace("ocr zero before digit", r"[oO](\d)", "0$1"),
                Rule::replace("month leading zero", r"\.0(\d)", ".$1"),
                numeric_month(),
                Rule::replace("next", r"(?i)\bnächste[nrs]?\b\s*", ""),
                Rule::replace("on", r"(?i)\bam\b\s*", ""),
                Rule::replace(
                    "weekday before day",
                    &format!(r"(?i)\b(?:{weekdays})\b,?\s*(?:de[nr]\s*)?(\d)"),
                    "$1",
                ),
                plural_weekday(&weekdays).marking_recurrence(),
                Rule::replace("every", r"(?i)\bjede.\b\s*", "").marking_recurrence(),
                Rule::replace("weekend", r"(?i)\bWochenende\b", weekend),
                Rule::replace("weekend abbreviation", r"\bWE\b", weekend),
                Rule::custom("tidy", tidy),
            ]
            .into(),
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedDate {
        let rewritten = apply_all(&self.rules, text);
        NormalizedDate {
            text: rewritten.text,
            repeats: rewritten.recurring,
        }
    }

    /// The rewrite rules in the order they are applied.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(Weekday::Sat)
    }
}

/// "erster" -> "1."
fn ordinal_words() -> Rule {
    let alternation = lexicon::date_ordinal_words()
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|");
    let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap();
    Rule::custom("ordinal words", move |text| {
        regex.is_match(text).then(|| {
            regex
                .replace_all(text, |captures: &Captures| {
                    lexicon::date_ordinal(&captures[0])
                        .map(String::from)
                        .unwrap_or_else(|| captures[0].to_string())
                })
                .into_owned()
        })
    })
}

/// "12.12." -> "12. Dezember", "4.8.2025" -> "4. August 2025"
fn numeric_month() -> Rule {
    let regex = Regex::new(r"\b(\d{1,2})\.(\d{1,2})\b\.?").unwrap();
    Rule::custom("numeric month", move |text| {
        let mut matched = false;
        let rewritten = regex.replace_all(text, |captures: &Captures| {
            match lexicon::month_name(&captures[2]) {
                Some(month) => {
                    matched = true;
                    format!("{}. {month} ", &captures[1])
                }
                None => captures[0].to_string(),
            }
        });
        let rewritten = rewritten.into_owned();
        matched.then_some(rewritten)
    })
}

/// "montags" -> "Montag"
fn plural_weekday(weekdays: &str) -> Rule {
    let regex = Regex::new(&format!(r"(?i)\b({weekdays})s\b")).unwrap();
    Rule::custom("plural weekday", move |text| {
        regex.is_match(text).then(|| {
            regex
                .replace_all(text, |captures: &Captures| {
                    lexicon::weekday(&captures[1])
                        .map(lexicon::weekday_name)
                        .unwrap_or(&captures[1])
                        .to_string()
                })
                .into_owned()
        })
    })
}

fn tidy(text: &str) -> Option<String> {
    let tidy = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    (tidy != text).then_some(tidy)
}
