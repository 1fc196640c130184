//! LISTGRP grammar.
//!
//! The base segment ends with a roster of connected users:
//!
//! ```text
//!     USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=
//!       ESWIFT        JOIN         000000              NONE
//!          CONNECT ATTRIBUTES=SPECIAL
//!          REVOKE DATE=NONE                  RESUME DATE=NONE
//! ```
//!
//! Each roster entry spans three lines and becomes one mapping in `users`.

use super::fields::add_key_value_pairs;
use super::{LineCursor, ProfileGrammar, Segment};
use crate::value::{cast_from_str, FieldValue};

const ROSTER_HEADER: &str = "USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=";
const NAME_BANNER: &str = "INFORMATION FOR GROUP ";
const SUBGROUPS: &str = "SUBGROUP(S)=";

/// Grammar for group listings.
#[derive(Debug, Clone, Copy)]
pub struct GroupGrammar;

impl ProfileGrammar for GroupGrammar {
    fn parse_line(&self, cursor: &LineCursor<'_>, segment: &mut Segment) -> usize {
        let line = cursor.current();
        let trimmed = line.trim();

        if matches!(segment.get("users"), Some(FieldValue::List(_)))
            && !line.contains('=')
            && cursor.has_ahead(2)
        {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() >= 4 {
                let entry = roster_entry(
                    &fields,
                    cursor.peek(1).unwrap_or(""),
                    cursor.peek(2).unwrap_or(""),
                );
                if let Some(FieldValue::List(users)) = segment.get_mut("users") {
                    users.push(FieldValue::Map(entry));
                }
                return 3;
            }
        }

        if line.contains(ROSTER_HEADER) {
            segment.insert("users".into(), FieldValue::List(Vec::new()));
        } else if let Some((_, name)) = line.split_once(NAME_BANNER) {
            segment.insert("name".into(), FieldValue::Str(name.trim().to_lowercase()));
        } else if let Some(names) = trimmed.strip_prefix(SUBGROUPS) {
            let names = names.split_whitespace().map(cast_from_str);
            match segment.get_mut("subgroups") {
                Some(FieldValue::List(existing)) => existing.extend(names),
                _ => {
                    segment.insert("subgroups".into(), FieldValue::List(names.collect()));
                }
            }
        } else if trimmed == "TERMUACC" {
            segment.insert("termuacc".into(), FieldValue::Bool(true));
        } else if trimmed == "NO TERMUACC" {
            segment.insert("termuacc".into(), FieldValue::Bool(false));
        } else if line.contains('=') {
            add_key_value_pairs(segment, line);
        } else if let Some(label) = trimmed.strip_prefix("NO ") {
            segment.insert(label.trim().to_lowercase(), FieldValue::Null);
        }
        1
    }
}

fn roster_entry(fields: &[&str], attributes: &str, dates: &str) -> Segment {
    let mut entry = Segment::new();
    entry.insert("userid".into(), FieldValue::Str(fields[0].to_string()));
    entry.insert("access".into(), cast_from_str(fields[1]));
    entry.insert("accesscount".into(), cast_from_str(fields[2]));
    entry.insert("universalaccess".into(), cast_from_str(fields[3]));
    add_key_value_pairs(&mut entry, attributes);
    add_key_value_pairs(&mut entry, dates);
    entry
}
