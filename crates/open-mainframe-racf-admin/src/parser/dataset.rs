//! LISTDSD / RLIST grammar.
//!
//! Besides `KEY=value` lines these reports use two tabular shapes:
//!
//! ```text
//! LEVEL  OWNER      UNIVERSAL ACCESS   WARNING   ERASE      <- header
//! -----  --------   ----------------   -------   -----      <- rule
//!  00    ESWIFT          READ            NO       NO        <- values
//!
//! AUDITING                                                  <- label
//! --------                                                  <- rule
//! FAILURES(READ)                                            <- value
//! ```
//!
//! Column boundaries come from where each dash run in the rule starts.

use super::{LineCursor, ProfileGrammar, Segment};
use crate::value::{clean_and_separate, FieldValue};

const NAME_BANNER: &str = "INFORMATION FOR DATASET ";

/// Grammar for data set and general resource listings.
#[derive(Debug, Clone, Copy)]
pub struct DatasetGrammar;

impl ProfileGrammar for DatasetGrammar {
    fn parse_line(&self, cursor: &LineCursor<'_>, segment: &mut Segment) -> usize {
        let line = cursor.current();

        if let Some((_, name)) = line.split_once(NAME_BANNER) {
            segment.insert("name".into(), FieldValue::Str(name.trim().to_lowercase()));
            return 1;
        }
        if line.contains('=') {
            let mut parts = line.split('=');
            let field = parts.next().unwrap_or("").trim().to_lowercase();
            let value = parts.next().unwrap_or("");
            segment.insert(field, clean_and_separate(value));
            return 1;
        }
        if cursor.has_ahead(2) {
            let rule = cursor.peek(1).unwrap_or("");
            let values = cursor.peek(2).unwrap_or("");
            if line.contains("  ") && rule.contains("--") {
                add_semi_tabular(segment, line, rule, values);
                return 3;
            }
            if rule.contains('-') {
                let field = line
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
                    .join(" ");
                segment.insert(field, clean_and_separate(values));
                return 3;
            }
        }
        if line.contains("NO INSTALLATION DATA") {
            segment.insert("installation data".into(), FieldValue::Null);
        }
        1
    }
}

/// Start index of every run of dashes in `rule`.
fn column_starts(rule: &str) -> Vec<usize> {
    let chars: Vec<char> = rule.chars().collect();
    (0..chars.len())
        .filter(|&i| chars[i] == '-' && (i == 0 || chars[i - 1] != '-'))
        .collect()
}

/// Characters `start..end` of `line`, clamped to its length.
fn column(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

fn add_semi_tabular(segment: &mut Segment, header: &str, rule: &str, values: &str) {
    let starts = column_starts(rule);
    for (j, &start) in starts.iter().enumerate() {
        let (header_end, value_end) = match starts.get(j + 1) {
            Some(&next) => (next - 1, next - 1),
            None => (header.chars().count(), values.chars().count()),
        };
        let field = column(header, start, header_end).trim().to_lowercase();
        if field.is_empty() {
            continue;
        }
        segment.insert(field, clean_and_separate(&column(values, start, value_end)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::lines;
    use crate::parser::{parse_profile, ProfileKind};

    const LISTDSD: &str = "\
INFORMATION FOR DATASET ESWIFT.TEST.T1136242.P3020470

LEVEL  OWNER      UNIVERSAL ACCESS   WARNING   ERASE
-----  --------   ----------------   -------   -----
 00    ESWIFT          READ            NO       NO

AUDITING
--------
FAILURES(READ)

NOTIFY
--------
NO USER TO BE NOTIFIED

YOUR ACCESS  CREATION GROUP  DATASET TYPE
-----------  --------------  ------------
 ALTER         SYS1            NON-VSAM

VOLUMES ON WHICH DATASET RESIDES
--------------------------------
USRAT2

NO INSTALLATION DATA";

    #[test]
    fn test_listdsd_report() {
        let profile = parse_profile(&lines(LISTDSD), ProfileKind::Dataset, &["base", "dfp", "tme"]);
        let base = profile.base();
        let s = |v: &str| FieldValue::Str(v.into());

        assert_eq!(base["name"], s("eswift.test.t1136242.p3020470"));
        assert_eq!(base["level"], FieldValue::Int(0));
        assert_eq!(base["owner"], s("eswift"));
        assert_eq!(base["universal access"], s("read"));
        assert_eq!(base["warning"], FieldValue::Null);
        assert_eq!(base["erase"], FieldValue::Null);
        assert_eq!(base["auditing"], s("failures(read)"));
        assert_eq!(base["notify"], FieldValue::Null);
        assert_eq!(base["your access"], s("alter"));
        assert_eq!(base["creation group"], s("sys1"));
        assert_eq!(base["dataset type"], s("non-vsam"));
        assert_eq!(base["volumes on which dataset resides"], s("usrat2"));
        assert_eq!(base["installation data"], FieldValue::Null);
    }

    #[test]
    fn test_rlist_report() {
        let report = "\
CLASS      NAME
-----      ----
FACILITY   BIKINI.BOTTOM.KRUSKRAB

LEVEL  OWNER      UNIVERSAL ACCESS  YOUR ACCESS  WARNING
-----  --------   ----------------  -----------  -------
 00    ESWIFT          READ          ALTER        NO

INSTALLATION DATA
-----------------
NONE";
        let profile = parse_profile(&lines(report), ProfileKind::Generic, &["base"]);
        let base = profile.base();
        assert_eq!(base["class"], FieldValue::Str("facility".into()));
        assert_eq!(base["name"], FieldValue::Str("bikini.bottom.kruskrab".into()));
        assert_eq!(base["your access"], FieldValue::Str("alter".into()));
        assert_eq!(base["installation data"], FieldValue::Null);
    }

    #[test]
    fn test_key_value_lines() {
        let profile = parse_profile(
            &lines("CREATION DATE=23.106  \nSECURITY LEVEL=NONE"),
            ProfileKind::Dataset,
            &["base"],
        );
        assert_eq!(profile.base()["creation date"], FieldValue::Float(23.106));
        assert_eq!(profile.base()["security level"], FieldValue::Null);
    }

    #[test]
    fn test_columns_are_char_safe() {
        assert_eq!(column_starts("--  ---- -"), vec![0, 4, 9]);
        assert_eq!(column("ÄBC", 1, 10), "BC");
        assert_eq!(column("abc", 5, 2), "");
    }
}
