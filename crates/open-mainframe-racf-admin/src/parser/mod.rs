//! Profile parser: rebuilds structured profiles from RACF list report text.
//!
//! LISTUSER, LISTGRP, LISTDSD, RLIST and SETROPTS LIST print semi-structured,
//! column-aligned text. The driver in [`parse_profile`] walks the lines with a
//! [`LineCursor`], switching segments on `<SEGMENT> INFORMATION` headers, and
//! hands every other line to the [`ProfileGrammar`] of the entity family,
//! which reports how many lines it consumed.
//!
//! Parsing is best-effort: lines outside the known grammar are skipped and
//! never produce an error.

mod cursor;
mod dataset;
mod fields;
mod group;
mod options;
mod user;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

pub use cursor::LineCursor;
pub use fields::{add_key_value_pairs, canonical_key};

/// Field name -> value within one segment.
pub type Segment = BTreeMap<String, FieldValue>;

/// A parsed profile: segment name -> fields. `base` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(BTreeMap<String, Segment>);

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    /// A profile with an empty `base` segment.
    pub fn new() -> Self {
        Self(BTreeMap::from([("base".to_string(), Segment::new())]))
    }

    /// The `base` segment.
    pub fn base(&self) -> &Segment {
        self.segment_or_empty("base")
    }

    /// A segment by name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.0.get(name)
    }

    /// A field of a segment.
    pub fn get(&self, segment: &str, field: &str) -> Option<&FieldValue> {
        self.0.get(segment).and_then(|s| s.get(field))
    }

    /// Segment names present.
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Start (or restart) a segment with no fields.
    pub fn start_segment(&mut self, name: &str) {
        self.0.insert(name.to_string(), Segment::new());
    }

    /// Mutable access to a segment, creating it if needed.
    pub fn segment_mut(&mut self, name: &str) -> &mut Segment {
        self.0.entry(name.to_string()).or_default()
    }

    fn segment_or_empty(&self, name: &str) -> &Segment {
        static EMPTY: Segment = Segment::new();
        self.0.get(name).unwrap_or(&EMPTY)
    }
}

/// Report grammar family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// LISTDSD output.
    Dataset,
    /// RLIST output for general resources.
    Generic,
    /// LISTUSER output.
    User,
    /// LISTGRP output.
    Group,
    /// SETROPTS LIST output.
    Options,
}

impl ProfileKind {
    /// The line grammar for this family.
    pub fn grammar(self) -> &'static dyn ProfileGrammar {
        match self {
            Self::Dataset | Self::Generic => &dataset::DatasetGrammar,
            Self::User => &user::UserGrammar,
            Self::Group => &group::GroupGrammar,
            Self::Options => &options::OptionsGrammar,
        }
    }

    /// Banner that starts each profile in a multi-profile report.
    pub fn split_marker(self) -> Option<&'static str> {
        match self {
            Self::Dataset => Some("INFORMATION FOR DATASET "),
            Self::Group => Some("INFORMATION FOR GROUP "),
            Self::Generic | Self::User | Self::Options => None,
        }
    }
}

/// Line grammar of one entity family.
pub trait ProfileGrammar: Sync {
    /// Parse the line under `cursor` (looking ahead as needed) into
    /// `segment`, returning the number of lines consumed. Returning `0` is
    /// treated as `1`.
    fn parse_line(&self, cursor: &LineCursor<'_>, segment: &mut Segment) -> usize;
}

/// Split a report into per-profile line ranges.
///
/// Lines before the first banner are dropped. A report with no banner at all
/// is a single profile.
pub fn split_profiles(lines: &[String], kind: ProfileKind) -> Vec<&[String]> {
    if lines.is_empty() {
        return Vec::new();
    }
    let Some(marker) = kind.split_marker() else {
        return vec![lines];
    };
    let mut starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .take(lines.len() - 1)
        .filter(|(_, line)| line.contains(marker))
        .map(|(i, _)| i)
        .collect();
    if starts.is_empty() {
        return vec![lines];
    }
    starts.push(lines.len());
    starts.windows(2).map(|w| &lines[w[0]..w[1]]).collect()
}

/// Parse every profile in a report.
pub fn parse_profiles(lines: &[String], kind: ProfileKind, segments: &[&str]) -> Vec<Profile> {
    split_profiles(lines, kind)
        .into_iter()
        .map(|chunk| parse_profile(chunk, kind, segments))
        .collect()
}

/// Parse one profile's lines.
///
/// `segments` names the segments the entity can have; non-`base` names become
/// the recognised `<SEGMENT> INFORMATION` headers.
pub fn parse_profile(lines: &[String], kind: ProfileKind, segments: &[&str]) -> Profile {
    let headers: Vec<String> = segments
        .iter()
        .filter(|s| **s != "base")
        .map(|s| format!("{} INFORMATION", s.to_uppercase()))
        .collect();
    let no_markers: Vec<String> = headers.iter().map(|h| format!("NO {}", h)).collect();

    let grammar = kind.grammar();
    let mut profile = Profile::new();
    let mut current_segment = "base".to_string();
    let mut cursor = LineCursor::new(lines);

    while !cursor.is_done() {
        let line = cursor.current().trim();
        if line.is_empty() || no_markers.iter().any(|m| m == line) {
            cursor.advance(1);
            continue;
        }
        if !cursor.is_last() && headers.iter().any(|h| h == line) {
            current_segment = line
                .split_whitespace()
                .next()
                .unwrap_or("base")
                .to_lowercase();
            profile.start_segment(&current_segment);
            cursor.advance(2);
            continue;
        }
        let consumed = grammar.parse_line(&cursor, profile.segment_mut(&current_segment));
        cursor.advance(consumed.max(1));
    }
    profile
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_profile_always_has_base() {
        let profile = Profile::new();
        assert!(profile.base().is_empty());
        assert_eq!(profile.segment_names().collect::<Vec<_>>(), ["base"]);
        assert_eq!(serde_json::to_string(&profile).unwrap(), r#"{"base":{}}"#);
    }

    #[test]
    fn test_split_on_group_banner() {
        let report = lines(
            "INFORMATION FOR GROUP A\n    OWNER=X\nINFORMATION FOR GROUP B\n    OWNER=Y",
        );
        let chunks = split_profiles(&report, ProfileKind::Group);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1][0], "INFORMATION FOR GROUP B");
    }

    #[test]
    fn test_split_on_dataset_banner() {
        let report = lines(
            "\
INFORMATION FOR DATASET A.B
LEVEL  OWNER
-----  --------
 00    X
INFORMATION FOR DATASET C.D
LEVEL  OWNER
-----  --------
 01    Y",
        );
        assert_eq!(split_profiles(&report, ProfileKind::Dataset).len(), 2);

        let profiles = parse_profiles(&report, ProfileKind::Dataset, &["base"]);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].get("base", "name"), Some(&FieldValue::Str("a.b".into())));
        assert_eq!(profiles[0].get("base", "owner"), Some(&FieldValue::Str("x".into())));
        assert_eq!(profiles[0].get("base", "level"), Some(&FieldValue::Int(0)));
        assert_eq!(profiles[1].get("base", "name"), Some(&FieldValue::Str("c.d".into())));
        assert_eq!(profiles[1].get("base", "owner"), Some(&FieldValue::Str("y".into())));
        assert_eq!(profiles[1].get("base", "level"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_no_banner_is_one_profile() {
        let report = lines("USER=A  OWNER=B");
        assert_eq!(split_profiles(&report, ProfileKind::Group).len(), 1);
        assert_eq!(split_profiles(&report, ProfileKind::User).len(), 1);
        assert!(split_profiles(&[], ProfileKind::User).is_empty());
    }

    #[test]
    fn test_banner_on_last_line_does_not_split() {
        let report = lines("    OWNER=X\nINFORMATION FOR GROUP B");
        assert_eq!(split_profiles(&report, ProfileKind::Group), vec![&report[..]]);
    }

    #[test]
    fn test_segment_headers_and_markers() {
        let report = lines(
            "USER=SQUIDWRD  OWNER=LEONARD\n \nNO TSO INFORMATION\nOMVS INFORMATION\n\
             ----------------\nUID= 0000002424\nHOME= /u/squidwrd",
        );
        let profile = parse_profile(&report, ProfileKind::User, &["base", "omvs", "tso"]);
        assert_eq!(profile.get("base", "user"), Some(&FieldValue::Str("squidwrd".into())));
        assert_eq!(profile.get("omvs", "uid"), Some(&FieldValue::Int(2424)));
        assert_eq!(
            profile.get("omvs", "home"),
            Some(&FieldValue::Str("/u/squidwrd".into()))
        );
        assert!(profile.segment("tso").is_none());
    }

    #[test]
    fn test_header_on_last_line_is_not_a_segment() {
        let report = lines("USER=SQUIDWRD\nOMVS INFORMATION");
        let profile = parse_profile(&report, ProfileKind::User, &["base", "omvs"]);
        assert!(profile.segment("omvs").is_none());
    }
}
