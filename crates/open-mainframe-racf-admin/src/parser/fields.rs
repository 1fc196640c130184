//! `KEY=value` run parsing shared by the user and group grammars.
//!
//! RACF packs several `KEY=value` pairs on one line, separated by runs of two
//! or more spaces:
//!
//! ```text
//!  DEFAULT-GROUP=SYS1     PASSDATE=00.000 PASS-INTERVAL=186 PHRASEDATE=N/A
//! ```
//!
//! When only one space separates a value from the next key, the key is the
//! last word of the run.

use super::Segment;
use crate::value::{cast_from_str, FieldValue};

/// Fields whose values accumulate into lists.
const LIST_FIELDS: &[&str] = &["attributes", "classauthorizations", "connectattributes"];

/// Lower-case, trim, and drop spaces and hyphens: `PASS-INTERVAL` -> `passinterval`.
pub fn canonical_key(key: &str) -> String {
    key.trim().to_lowercase().replace([' ', '-'], "")
}

/// Parse every `KEY=value` pair on `message` into `segment`.
pub fn add_key_value_pairs(segment: &mut Segment, message: &str) {
    let tokens: Vec<&str> = message.trim().split('=').collect();
    let mut key = tokens[0].to_string();

    for (i, token) in tokens.iter().enumerate().skip(1) {
        let runs: Vec<&str> = token.split("  ").filter(|t| !t.is_empty()).collect();
        let first = runs.first().map_or("", |t| t.trim());
        let is_last_token = i == tokens.len() - 1;
        let trailing_key = runs.len() == 1 && !is_last_token && first.contains(' ');

        let (forced_null, name) = match key.trim_start().strip_prefix("NO-") {
            Some(rest) => (true, rest.to_string()),
            None => (false, key.clone()),
        };
        let current_key = canonical_key(&name);

        let words: Vec<&str> = first.split_whitespace().collect();
        let value_words = if trailing_key {
            &words[..words.len() - 1]
        } else {
            &words[..]
        };

        if current_key.is_empty() {
            // nothing to attach the value to
        } else if forced_null {
            segment.insert(current_key, FieldValue::Null);
        } else if LIST_FIELDS.contains(&current_key.as_str()) {
            let items = value_words
                .iter()
                .filter(|w| !w.eq_ignore_ascii_case("NONE"))
                .map(|w| cast_from_str(w));
            match segment.get_mut(&current_key) {
                Some(FieldValue::List(existing)) => existing.extend(items),
                _ => {
                    segment.insert(current_key, FieldValue::List(items.collect()));
                }
            }
        } else {
            let scalar = if trailing_key { words[0] } else { first };
            segment.insert(current_key, cast_from_str(scalar));
        }

        key = if trailing_key {
            words[words.len() - 1].to_string()
        } else if runs.len() <= 1 {
            first.to_string()
        } else {
            runs[1..].concat()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Segment {
        let mut segment = Segment::new();
        add_key_value_pairs(&mut segment, line);
        segment
    }

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key(" PASS-INTERVAL "), "passinterval");
        assert_eq!(canonical_key("CLASS AUTHORIZATIONS"), "classauthorizations");
    }

    #[test]
    fn test_double_space_separated_pairs() {
        let s = parse("USER=SQUIDWRD  NAME=SQUIDWARD            OWNER=LEONARD   CREATED=23.106");
        assert_eq!(s["user"], FieldValue::Str("squidwrd".into()));
        assert_eq!(s["name"], FieldValue::Str("squidward".into()));
        assert_eq!(s["owner"], FieldValue::Str("leonard".into()));
        assert_eq!(s["created"], FieldValue::Float(23.106));
    }

    #[test]
    fn test_single_space_trailing_keys() {
        let s = parse(" DEFAULT-GROUP=SYS1     PASSDATE=00.000 PASS-INTERVAL=186 PHRASEDATE=N/A");
        assert_eq!(s["defaultgroup"], FieldValue::Str("sys1".into()));
        assert_eq!(s["passdate"], FieldValue::Float(0.0));
        assert_eq!(s["passinterval"], FieldValue::Int(186));
        assert_eq!(s["phrasedate"], FieldValue::Null);
    }

    #[test]
    fn test_padded_values() {
        let s = parse("    CONNECTS=    00  UACC=NONE     LAST-CONNECT=UNKNOWN");
        assert_eq!(s["connects"], FieldValue::Int(0));
        assert_eq!(s["uacc"], FieldValue::Null);
        assert_eq!(s["lastconnect"], FieldValue::Str("unknown".into()));
    }

    #[test]
    fn test_list_fields_accumulate() {
        let mut s = parse(" ATTRIBUTES=SPECIAL OPERATIONS");
        add_key_value_pairs(&mut s, " ATTRIBUTES=AUDITOR");
        assert_eq!(
            s["attributes"],
            FieldValue::List(vec!["special".into(), "operations".into(), "auditor".into()])
        );
        let s = parse(" CLASS AUTHORIZATIONS=NONE");
        assert_eq!(s["classauthorizations"], FieldValue::List(vec![]));
    }

    #[test]
    fn test_no_prefix_forces_null() {
        let s = parse("NO-MODEL-NAME=SOMETHING");
        assert_eq!(s["modelname"], FieldValue::Null);
    }

    #[test]
    fn test_line_without_pairs_is_ignored() {
        assert!(parse("LOGON ALLOWED").is_empty());
        assert!(parse("=value").is_empty());
    }
}
