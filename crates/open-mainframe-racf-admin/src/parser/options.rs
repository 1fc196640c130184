//! SETROPTS LIST grammar.
//!
//! ```text
//! ATTRIBUTES = INITSTATS WHEN(PROGRAM) TERMINAL(READ) SAUDIT CMDVIOL
//! STATISTICS = NONE
//! PASSWORD CHANGE INTERVAL IS 186 DAYS.
//! MIXED CASE PASSWORD SUPPORT IS NOT IN EFFECT
//! ```

use super::fields::canonical_key;
use super::{LineCursor, ProfileGrammar, Segment};
use crate::value::{cast_from_str, merge_parenthesized, FieldValue};

/// Grammar for system option listings.
#[derive(Debug, Clone, Copy)]
pub struct OptionsGrammar;

impl ProfileGrammar for OptionsGrammar {
    fn parse_line(&self, cursor: &LineCursor<'_>, segment: &mut Segment) -> usize {
        let line = cursor.current();

        if let Some((label, values)) = line.split_once(" = ") {
            segment.insert(canonical_key(label), option_list(values));
            return 1;
        }
        for separator in [" IS ", " ARE "] {
            if let Some((label, value)) = line.split_once(separator) {
                segment.insert(canonical_key(label), cast_from_str(value.trim()));
                return 1;
            }
        }
        1
    }
}

fn option_list(values: &str) -> FieldValue {
    if values.trim().eq_ignore_ascii_case("NONE") {
        return FieldValue::List(Vec::new());
    }
    FieldValue::List(merge_parenthesized(
        values.split_whitespace().map(cast_from_str).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::lines;
    use crate::parser::{parse_profile, ProfileKind};

    const SETROPTS: &str = "\
ATTRIBUTES = INITSTATS WHEN(PROGRAM BASIC) TERMINAL(READ) SAUDIT CMDVIOL
STATISTICS = NONE
AUDIT CLASSES = USER GROUP DATASET
PASSWORD PROCESSING OPTIONS:
PASSWORD CHANGE INTERVAL IS 186 DAYS.
MIXED CASE PASSWORD SUPPORT IS NOT IN EFFECT
INSTALLATION DEFINED RVARY PASSWORD IS IN EFFECT FOR THE SWITCH FUNCTION.
SECURITY LABEL AUDITING IS INACTIVE
GENERIC PROFILE CHECKING ARE ACTIVE";

    fn s(v: &str) -> FieldValue {
        FieldValue::Str(v.into())
    }

    #[test]
    fn test_setropts_report() {
        let profile = parse_profile(&lines(SETROPTS), ProfileKind::Options, &["base"]);
        let base = profile.base();

        assert_eq!(
            base["attributes"],
            FieldValue::List(vec![
                s("initstats"),
                s("when(program basic)"),
                s("terminal(read)"),
                s("saudit"),
                s("cmdviol"),
            ])
        );
        assert_eq!(base["statistics"], FieldValue::List(vec![]));
        assert_eq!(
            base["auditclasses"],
            FieldValue::List(vec![s("user"), s("group"), s("dataset")])
        );
        assert_eq!(base["passwordchangeinterval"], FieldValue::Int(186));
        assert_eq!(base["mixedcasepasswordsupport"], FieldValue::Bool(false));
        assert_eq!(base["installationdefinedrvarypassword"], s("switch"));
        assert_eq!(base["securitylabelauditing"], FieldValue::Bool(false));
        assert_eq!(base["genericprofilechecking"], FieldValue::Bool(true));
        assert!(!base.contains_key("passwordprocessingoptions:"));
    }
}
