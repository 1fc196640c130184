//! LISTUSER grammar.

use std::collections::BTreeMap;

use super::fields::{add_key_value_pairs, canonical_key};
use super::{LineCursor, ProfileGrammar, Segment};
use crate::value::{cast_from_str, FieldValue};

/// Rule under the logon-allowed banner.
const BANNER_RULE: &str = " ---------------------------------------------";

/// Lines in one `  GROUP=` connection block.
const GROUP_BLOCK_LINES: usize = 4;

/// Column where the connection data of a group block starts.
const GROUP_BLOCK_OFFSET: usize = 17;

/// Grammar for user listings.
#[derive(Debug, Clone, Copy)]
pub struct UserGrammar;

impl ProfileGrammar for UserGrammar {
    fn parse_line(&self, cursor: &LineCursor<'_>, segment: &mut Segment) -> usize {
        let line = cursor.current();

        if cursor.peek(1).map(str::trim_end) == Some(BANNER_RULE) {
            add_banner_block(segment, line, cursor.peek(2).unwrap_or(""));
            return 3.min(cursor.remaining());
        }
        if line.starts_with("  GROUP=") {
            let span = GROUP_BLOCK_LINES.min(cursor.remaining());
            let block: String = (0..span).filter_map(|i| cursor.peek(i)).collect();
            add_group_block(segment, line, &block);
            return span;
        }
        if !line.contains('=') {
            if let Some(label) = line.trim().strip_prefix("NO-") {
                segment.insert(canonical_key(label), FieldValue::Null);
                return 1;
            }
            return match cursor.peek(1) {
                Some(next) => {
                    add_key_value_pairs(segment, &format!("{}={}", line, next));
                    2
                }
                None => 1,
            };
        }
        add_key_value_pairs(segment, line);
        1
    }
}

/// ` LOGON ALLOWED   (DAYS)          (TIME)` over its rule and value line.
fn add_banner_block(segment: &mut Segment, heading: &str, values: &str) {
    let mut tokens = heading.split("  ").filter(|t| !t.is_empty());
    let Some(prefix) = tokens.next() else {
        return;
    };
    for (key, value) in tokens.zip(values.split_whitespace()) {
        let key = key.trim();
        let key = key
            .strip_prefix('(')
            .and_then(|k| k.strip_suffix(')'))
            .unwrap_or(key);
        segment.insert(canonical_key(&format!("{}{}", prefix, key)), cast_from_str(value));
    }
}

/// One `  GROUP=name ...` block, stored under `groups.<name>`.
fn add_group_block(segment: &mut Segment, first_line: &str, block: &str) {
    let name = first_line
        .split('=')
        .nth(1)
        .and_then(|v| v.split_whitespace().next())
        .unwrap_or("")
        .to_string();
    let mut connection = Segment::new();
    let data: String = block.chars().skip(GROUP_BLOCK_OFFSET).collect();
    add_key_value_pairs(&mut connection, &data);

    let groups = segment
        .entry("groups".to_string())
        .or_insert_with(|| FieldValue::Map(BTreeMap::new()));
    if !matches!(groups, FieldValue::Map(_)) {
        *groups = FieldValue::Map(BTreeMap::new());
    }
    if let FieldValue::Map(groups) = groups {
        groups.insert(name, FieldValue::Map(connection));
    }
}
