//! Report value normalization: turning RACF listing text into typed values.
//!
//! RACF list commands print every field as human-readable text (`NONE`,
//! `IN EFFECT`, `186 DAYS.`, `1,234`). [`cast_from_str`] coerces one such token
//! into a [`FieldValue`]; [`clean_and_separate`] splits comma- or space-delimited
//! text into a list of coerced tokens.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text that means "no value".
const NULL_VOCABULARY: &[&str] = &["n/a", "none", "none specified", "no"];

/// Text that means "on".
const TRUE_VOCABULARY: &[&str] = &[
    "in effect",
    "active",
    "active.",
    "being done.",
    "in effect.",
    "allowed.",
    "being done",
];

/// Text that means "off".
const FALSE_VOCABULARY: &[&str] = &["not in effect", "inactive", "not allowed.", "not being done"];

/// A single field value reconstructed from report text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value (`NONE`, `N/A`, ...).
    Null,
    /// An on/off setting.
    Bool(bool),
    /// A whole number.
    Int(i64),
    /// A number with a decimal point (RACF dates such as `23.106` land here).
    Float(f64),
    /// Any other text, case-folded.
    Str(String),
    /// An ordered list of values.
    List(Vec<FieldValue>),
    /// A nested mapping (per-group connection data, roster entries).
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Whether this is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The mapping payload, if this is a mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "none"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => write!(f, "{}", s),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            Self::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{}", parts.join(" "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Cast one report token to a typed value.
///
/// Vocabulary matches are exact after case-folding. Anything unrecognised comes
/// back as the case-folded string.
pub fn cast_from_str(text: &str) -> FieldValue {
    let value = text.to_lowercase();
    if NULL_VOCABULARY.contains(&value.as_str()) {
        return FieldValue::Null;
    }
    if TRUE_VOCABULARY.contains(&value.as_str()) {
        return FieldValue::Bool(true);
    }
    if FALSE_VOCABULARY.contains(&value.as_str()) {
        return FieldValue::Bool(false);
    }
    // "PASSWORD CHANGE INTERVAL IS 186 DAYS."
    if value.contains("days") && value.chars().any(|c| c.is_ascii_digit()) {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        return match digits.parse::<i64>() {
            Ok(n) => FieldValue::Int(n),
            Err(_) => digits
                .parse::<f64>()
                .map(FieldValue::Float)
                .unwrap_or(FieldValue::Str(value)),
        };
    }
    // "IN EFFECT FOR THE SWITCH FUNCTION."
    if let Some(rest) = value.split_once("in effect for the ").map(|(_, rest)| rest) {
        if let Some((function, _)) = rest.split_once(" function.") {
            return FieldValue::Str(function.to_string());
        }
    }
    cast_number(value)
}

fn cast_number(value: String) -> FieldValue {
    if value.contains('.') {
        return match value.trim().parse::<f64>() {
            Ok(x) => FieldValue::Float(x),
            Err(_) => FieldValue::Str(value),
        };
    }
    match value.replace(',', "").trim().parse::<i64>() {
        Ok(n) => FieldValue::Int(n),
        Err(_) => FieldValue::Str(value),
    }
}

/// Clean, cast, and separate comma- or space-delimited report text.
///
/// Returns a scalar when the text holds a single token and a list otherwise.
/// Tokens that were split apart inside a parenthesised group, such as
/// `when(program basic)`, are joined back together.
pub fn clean_and_separate(text: &str) -> FieldValue {
    let cleaned = text.trim().to_lowercase();
    let tokens: Vec<FieldValue> = if cleaned.contains(',') {
        cleaned.split(',').map(|t| cast_from_str(t.trim())).collect()
    } else if cleaned.contains(char::is_whitespace) {
        cleaned.split_whitespace().map(cast_from_str).collect()
    } else {
        return cast_from_str(&cleaned);
    };

    // Pinned behavior: one null token nulls the whole list. "NO USER TO BE
    // NOTIFIED" relies on this to come out as a single null.
    if tokens.iter().any(FieldValue::is_null) {
        return FieldValue::Null;
    }
    FieldValue::List(merge_parenthesized(tokens))
}

/// Re-join list elements that belong to one `( ... )` group.
///
/// Nesting is tracked, so `(a (b c) d)` stays one element. A group still
/// open at the end of the list is joined as far as it goes.
pub(crate) fn merge_parenthesized(tokens: Vec<FieldValue>) -> Vec<FieldValue> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut group: Vec<String> = Vec::new();
    let mut depth = 0usize;

    for token in tokens {
        let (opens, closes) = token
            .as_str()
            .map(|s| (s.matches('(').count(), s.matches(')').count()))
            .unwrap_or((0, 0));

        if group.is_empty() && opens <= closes {
            merged.push(token);
            continue;
        }
        group.push(token.to_string());
        depth = (depth + opens).saturating_sub(closes);
        if depth == 0 {
            merged.push(FieldValue::Str(group.join(" ")));
            group.clear();
        }
    }
    if !group.is_empty() {
        merged.push(FieldValue::Str(group.join(" ")));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_vocabulary() {
        for text in ["n/a", "N/A", "none", "NONE", "none specified", "NONE SPECIFIED", "no", "NO"] {
            assert_eq!(cast_from_str(text), FieldValue::Null, "{text}");
        }
    }

    #[test]
    fn test_true_vocabulary() {
        for text in [
            "in effect",
            "ACTIVE",
            "active.",
            "BEING DONE.",
            "In Effect.",
            "allowed.",
            "being done",
        ] {
            assert_eq!(cast_from_str(text), FieldValue::Bool(true), "{text}");
        }
    }

    #[test]
    fn test_false_vocabulary() {
        for text in ["NOT IN EFFECT", "inactive", "NOT ALLOWED.", "not being done"] {
            assert_eq!(cast_from_str(text), FieldValue::Bool(false), "{text}");
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(cast_from_str("1,234"), FieldValue::Int(1234));
        assert_eq!(cast_from_str("12.5"), FieldValue::Float(12.5));
        assert_eq!(cast_from_str("0000002424"), FieldValue::Int(2424));
        assert_eq!(cast_from_str("00.000"), FieldValue::Float(0.0));
    }

    #[test]
    fn test_passthrough_is_case_folded() {
        assert_eq!(cast_from_str("ABC"), FieldValue::Str("abc".into()));
        assert_eq!(
            cast_from_str("23.106/13:19:23"),
            FieldValue::Str("23.106/13:19:23".into())
        );
        assert_eq!(cast_from_str(""), FieldValue::Str(String::new()));
    }

    #[test]
    fn test_days_phrase() {
        assert_eq!(cast_from_str("186 DAYS."), FieldValue::Int(186));
        assert_eq!(cast_from_str("days"), FieldValue::Str("days".into()));
    }

    #[test]
    fn test_function_phrase() {
        assert_eq!(
            cast_from_str("IN EFFECT FOR THE SWITCH FUNCTION."),
            FieldValue::Str("switch".into())
        );
    }

    #[test]
    fn test_clean_and_separate_commas() {
        assert_eq!(
            clean_and_separate("read, update, control"),
            FieldValue::List(vec!["read".into(), "update".into(), "control".into()])
        );
    }

    #[test]
    fn test_clean_and_separate_scalar() {
        assert_eq!(clean_and_separate("  ESWIFT "), FieldValue::Str("eswift".into()));
        assert_eq!(clean_and_separate(" 00 "), FieldValue::Int(0));
    }

    #[test]
    fn test_clean_and_separate_null_collapses_list() {
        assert_eq!(clean_and_separate("NO USER TO BE NOTIFIED"), FieldValue::Null);
    }

    #[test]
    fn test_clean_and_separate_rejoins_parentheses() {
        assert_eq!(
            clean_and_separate("SAUDIT WHEN(PROGRAM BASIC) CMDVIOL"),
            FieldValue::List(vec![
                "saudit".into(),
                "when(program basic)".into(),
                "cmdviol".into(),
            ])
        );
    }

    #[test]
    fn test_nested_parentheses_keep_every_token() {
        assert_eq!(
            clean_and_separate("(A (B C) D) E"),
            FieldValue::List(vec!["(a (b c) d)".into(), "e".into()])
        );
        assert_eq!(
            clean_and_separate("X WHEN(PROGRAM BASIC"),
            FieldValue::List(vec!["x".into(), "when(program basic".into()])
        );
        assert_eq!(
            clean_and_separate("TERMINAL(READ) SAUDIT"),
            FieldValue::List(vec!["terminal(read)".into(), "saudit".into()])
        );
    }

    #[test]
    fn test_huge_day_count_stays_numeric() {
        assert_eq!(
            cast_from_str("99999999999999999999 DAYS"),
            FieldValue::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Int(186).as_i64(), Some(186));
        assert_eq!(FieldValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(FieldValue::Float(23.106).as_f64(), Some(23.106));
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from("x").as_i64(), None);
        assert_eq!(FieldValue::Null.as_bool(), None);
        assert!(FieldValue::Null.is_null());
    }

    #[test]
    fn test_serializes_like_json_scalars() {
        let value = FieldValue::List(vec![
            FieldValue::Null,
            FieldValue::Int(3),
            true.into(),
            "x".into(),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[null,3,true,"x"]"#);
    }
}
