//! Named whole-string rewrite rules which are applied in a fixed order.

use log::debug;
use regex::Regex;

type CustomRewrite = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

enum Rewrite {
    Replace { regex: Regex, replacement: String },
    Custom(CustomRewrite),
}

/// A single rewrite step of a normalizer.
pub struct Rule {
    name: &'static str,
    rewrite: Rewrite,
    marks_recurrence: bool,
}

impl Rule {
    /// A rule replacing every match of `pattern` with `replacement` (`$1` style group references).
    ///
    /// Panics if the pattern is not a valid regex.
    pub fn replace(name: &'static str, pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            name,
            rewrite: Rewrite::Replace {
                regex: Regex::new(pattern).unwrap(),
                replacement: replacement.into(),
            },
            marks_recurrence: false,
        }
    }

    /// A rule backed by a function which returns `None` if it does not apply.
    pub fn custom<F>(name: &'static str, rewrite: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name,
            rewrite: Rewrite::Custom(Box::new(rewrite)),
            marks_recurrence: false,
        }
    }

    /// Whenever this rule matches, the rewritten phrase describes a weekly recurring event.
    pub fn marking_recurrence(mut self) -> Self {
        self.marks_recurrence = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rewrite the text, or `None` if the rule does not match.
    pub fn apply(&self, text: &str) -> Option<String> {
        match &self.rewrite {
            Rewrite::Replace { regex, replacement } => regex
                .is_match(text)
                .then(|| regex.replace_all(text, replacement.as_str()).into_owned()),
            Rewrite::Custom(rewrite) => rewrite(text),
        }
    }
}

/// The result of running a text through a list of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Whether any rule marking a recurrence matched.
    pub recurring: bool,
}

/// Apply all rules in order, each one to the output of the previous one.
pub fn apply_all(rules: &[Rule], text: &str) -> Rewritten {
    let mut rewritten = Rewritten {
        text: text.to_string(),
        recurring: false,
    };
    for rule in rules {
        if let Some(text) = rule.apply(&rewritten.text) {
            debug!("{}: {:?} -> {:?}", rule.name, rewritten.text, text);
            rewritten.recurring |= rule.marks_recurrence;
            rewritten.text = text;
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use crate::rule::{apply_all, Rule};

    #[test]
    fn test_apply_replace() {
        let rule = Rule::replace("digits", r"(\d)x", "${1}0");
        assert_eq!(rule.apply("1x 2x"), Some(String::from("10 20")));
        assert_eq!(rule.apply("nothing"), None);
    }

    #[test]
    fn test_apply_custom() {
        let rule = Rule::custom("upper", |text| {
            (text != text.to_uppercase()).then(|| text.to_uppercase())
        });
        assert_eq!(rule.apply("abc"), Some(String::from("ABC")));
        assert_eq!(rule.apply("ABC"), None);
    }

    #[test]
    fn test_apply_all_in_order() {
        let rules = [
            Rule::replace("a to b", "a", "b"),
            Rule::replace("b to c", "b", "c"),
        ];
        let rewritten = apply_all(&rules, "a");
        assert_eq!(rewritten.text, "c");
        assert!(!rewritten.recurring);
    }

    #[test]
    fn test_apply_all_recurring() {
        let rules = [
            Rule::replace("plural", r"\bdays\b", "day").marking_recurrence(),
            Rule::replace("noop", "never", ""),
        ];
        assert!(apply_all(&rules, "days").recurring);
        assert!(!apply_all(&rules, "day").recurring);
    }
}
