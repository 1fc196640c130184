//! Trait validation and segment dictionaries.
//!
//! Callers describe a profile change as a flat map of traits (`owner`,
//! `omvs:gid`, `addclauth`, ...). [`TraitTable`] knows which traits each
//! segment of an entity accepts and what their wire attribute names are;
//! [`build_segment_dictionaries`] groups validated traits by segment into a
//! [`RequestContext`] that lives for exactly one request.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::RacfAdminError;

/// Replacement text for redacted secrets.
pub const REDACTED: &str = "********";

/// Traits whose values are always treated as secrets.
pub const DEFAULT_SECRET_TRAITS: &[&str] = &["base:password"];

/// Caller-supplied traits, keyed by (optionally `segment:`-qualified) name.
pub type Traits = BTreeMap<String, TraitValue>;

/// Build a [`Traits`] map from name/value pairs.
pub fn traits<I, K, V>(pairs: I) -> Traits
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<TraitValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A loosely-typed trait value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Explicitly unset.
    Null,
    /// Keyword present (`true`) or absent (`false`).
    Bool(bool),
    /// A number.
    Int(i64),
    /// Free text.
    Str(String),
    /// Several values for one keyword (`CLAUTH(USER GROUP)`).
    List(Vec<String>),
}

impl TraitValue {
    /// Render the value as element text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null | Self::Bool(_) => String::new(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items.join(" "),
        }
    }
}

impl From<&str> for TraitValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for TraitValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for TraitValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<&str>> for TraitValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Operation applied to a trait on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Add values to a list keyword.
    Add,
    /// Reset the keyword to its default (`NOxxx`).
    Del,
    /// Remove values from a list keyword.
    Remove,
    /// Replace the keyword value.
    Set,
}

impl Operation {
    /// The `operation` attribute text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Del => "del",
            Self::Remove => "remove",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix rules tried, in order, when a trait is not found verbatim.
///
/// Only the first matching prefix is stripped, and only once.
pub const PREFIX_RULES: &[(&str, Operation)] = &[
    ("add", Operation::Add),
    ("no", Operation::Del),
    ("del", Operation::Remove),
    ("set", Operation::Set),
];

/// One validated trait inside a segment dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitEntry {
    /// Canonical wire attribute (`racf:owner`, `gid`, ...).
    pub attribute: String,
    /// The caller's value.
    pub value: TraitValue,
    /// Operation implied by a stripped prefix.
    pub operation: Option<Operation>,
}

impl Serialize for TraitEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.operation {
            None => self.value.serialize(serializer),
            Some(op) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(&self.value)?;
                tuple.serialize_element(&op)?;
                tuple.end()
            }
        }
    }
}

/// The accepted traits of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSchema {
    /// Segment name (`base`, `omvs`, ...).
    pub name: String,
    /// Short trait name → wire attribute.
    pub traits: BTreeMap<String, String>,
}

/// Per-entity map of segments and the traits each one accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TraitTable {
    segments: Vec<SegmentSchema>,
}

impl TraitTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment. Segments keep declaration order.
    pub fn with_segment(mut self, name: &str, traits: &[(&str, &str)]) -> Self {
        self.segments.push(SegmentSchema {
            name: name.to_string(),
            traits: traits
                .iter()
                .map(|(short, wire)| (short.to_string(), wire.to_string()))
                .collect(),
        });
        self
    }

    /// Look up the wire attribute of `trait_name` in `segment`.
    pub fn lookup(&self, segment: &str, trait_name: &str) -> Option<&str> {
        self.segment(segment)
            .and_then(|s| s.traits.get(trait_name))
            .map(String::as_str)
    }

    /// The schema of one segment.
    pub fn segment(&self, name: &str) -> Option<&SegmentSchema> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// Whether the entity has a segment called `name`.
    pub fn contains_segment(&self, name: &str) -> bool {
        self.segment(name).is_some()
    }

    /// Segment names in declaration order.
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }

    /// Merge extra traits into existing segments.
    pub fn update_existing(
        &mut self,
        updates: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<(), RacfAdminError> {
        for (segment, traits) in updates {
            let schema = self.segment_mut(segment)?;
            schema
                .traits
                .extend(traits.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(())
    }

    /// Replace the trait maps of existing segments.
    pub fn replace_existing(
        &mut self,
        replacements: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<(), RacfAdminError> {
        for (segment, traits) in replacements {
            self.segment_mut(segment)?.traits = traits.clone();
        }
        Ok(())
    }

    fn segment_mut(&mut self, name: &str) -> Result<&mut SegmentSchema, RacfAdminError> {
        self.segments
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| RacfAdminError::UnknownSegment {
                segment: name.to_string(),
            })
    }
}

/// Validated traits grouped by segment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SegmentTraits {
    segments: BTreeMap<String, BTreeMap<String, TraitEntry>>,
}

impl SegmentTraits {
    /// Whether no trait was accepted.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The entries recorded for `segment`.
    pub fn segment(&self, segment: &str) -> Option<&BTreeMap<String, TraitEntry>> {
        self.segments.get(segment)
    }

    /// One entry.
    pub fn get(&self, segment: &str, trait_name: &str) -> Option<&TraitEntry> {
        self.segments.get(segment).and_then(|s| s.get(trait_name))
    }

    /// Iterate over segments and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, TraitEntry>)> {
        self.segments.iter()
    }

    fn insert(&mut self, segment: &str, trait_name: &str, entry: TraitEntry) {
        self.segments
            .entry(segment.to_string())
            .or_default()
            .insert(trait_name.to_string(), entry);
    }

    /// A copy with every listed `segment:trait` value replaced by [`REDACTED`].
    pub fn redacted(&self, secret_traits: &[String]) -> SegmentTraits {
        let mut copy = self.clone();
        for name in secret_traits {
            let Some((segment, trait_name)) = name.split_once(':') else {
                continue;
            };
            if let Some(entry) = copy
                .segments
                .get_mut(segment)
                .and_then(|s| s.get_mut(trait_name))
            {
                entry.value = TraitValue::Str(REDACTED.to_string());
            }
        }
        copy
    }
}

/// Request-scoped validation state.
///
/// Built fresh for every request and dropped when the request completes.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    segments: SegmentTraits,
    trait_map: BTreeMap<String, String>,
    extract_segments: Vec<String>,
    preserved: SegmentTraits,
}

impl RequestContext {
    /// An empty context (requests that carry no traits).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The validated traits.
    pub fn segments(&self) -> &SegmentTraits {
        &self.segments
    }

    /// Snapshot taken when validation finished, kept for audit logging.
    pub fn preserved(&self) -> &SegmentTraits {
        &self.preserved
    }

    /// Trait name → wire attribute for every accepted trait.
    pub fn trait_map(&self) -> &BTreeMap<String, String> {
        &self.trait_map
    }

    /// Segments requested for extraction.
    pub fn extract_segments(&self) -> &[String] {
        &self.extract_segments
    }

    /// Plaintext secrets present in this request, for redaction.
    pub fn secrets(&self, secret_traits: &[String]) -> Vec<SecretString> {
        secret_traits
            .iter()
            .filter_map(|name| name.split_once(':'))
            .filter_map(|(segment, trait_name)| self.preserved.get(segment, trait_name))
            .map(|entry| entry.value.to_text())
            .filter(|text| !text.is_empty())
            .map(SecretString::from)
            .collect()
    }

    fn preserve(mut self) -> Self {
        self.preserved = self.segments.clone();
        self
    }

    fn validate_trait(
        &mut self,
        table: &TraitTable,
        segment: &str,
        trait_name: &str,
        value: &TraitValue,
    ) {
        if let Some(attribute) = table.lookup(segment, trait_name) {
            self.record(segment, trait_name, attribute, value, None);
            return;
        }
        let Some((prefix, operation)) = PREFIX_RULES
            .iter()
            .find(|(prefix, _)| trait_name.starts_with(prefix))
        else {
            return;
        };
        let stripped = &trait_name[prefix.len()..];
        if let Some(attribute) = table.lookup(segment, stripped) {
            self.record(segment, stripped, attribute, value, Some(*operation));
        }
    }

    fn record(
        &mut self,
        segment: &str,
        trait_name: &str,
        attribute: &str,
        value: &TraitValue,
        operation: Option<Operation>,
    ) {
        self.segments.insert(
            segment,
            trait_name,
            TraitEntry {
                attribute: attribute.to_string(),
                value: value.clone(),
                operation,
            },
        );
        self.trait_map
            .insert(trait_name.to_string(), attribute.to_string());
    }
}

/// Validate `traits` against `table` and group them by segment.
///
/// Unknown traits and segments are dropped without error; a request carrying
/// a misspelled trait still goes out with the traits that did validate.
pub fn build_segment_dictionaries(table: &TraitTable, traits: &Traits) -> RequestContext {
    let mut ctx = RequestContext::default();
    for (name, value) in traits {
        if let Some((segment, trait_name)) = name.split_once(':') {
            ctx.validate_trait(table, segment, trait_name, value);
            continue;
        }
        for segment in table.segment_names() {
            ctx.validate_trait(table, segment, name, value);
        }
    }
    ctx.preserve()
}

/// Select segments for a profile extract.
///
/// Only segment names the entity knows are kept; `false` entries are dropped.
pub fn build_bool_segment_dictionaries(
    table: &TraitTable,
    segments: &BTreeMap<String, bool>,
) -> RequestContext {
    let mut ctx = RequestContext::default();
    ctx.extract_segments = segments
        .iter()
        .filter(|(name, wanted)| **wanted && table.contains_segment(name))
        .map(|(name, _)| name.clone())
        .collect();
    ctx.preserve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn table() -> TraitTable {
        TraitTable::new()
            .with_segment(
                "base",
                &[
                    ("owner", "racf:owner"),
                    ("clauth", "racf:clauth"),
                    ("special", "racf:special"),
                    ("password", "racf:password"),
                    ("notify", "racf:notify"),
                ],
            )
            .with_segment("omvs", &[("gid", "gid"), ("home", "home")])
            .with_segment("ovm", &[("gid", "racf:gid")])
    }

    #[test]
    fn test_bare_trait_keeps_bare_value() {
        let ctx = build_segment_dictionaries(&table(), &traits([("owner", "eswift")]));
        let entry = ctx.segments().get("base", "owner").unwrap();
        assert_eq!(entry.attribute, "racf:owner");
        assert_eq!(entry.value, TraitValue::Str("eswift".into()));
        assert_eq!(entry.operation, None);
    }

    #[test]
    fn test_prefixed_traits_are_tagged() {
        let cases = [
            ("addclauth", Operation::Add),
            ("noclauth", Operation::Del),
            ("delclauth", Operation::Remove),
            ("setclauth", Operation::Set),
        ];
        for (name, op) in cases {
            let ctx = build_segment_dictionaries(&table(), &traits([(name, "USER")]));
            let entry = ctx.segments().get("base", "clauth").unwrap();
            assert_eq!(entry.operation, Some(op), "{name}");
            assert_eq!(entry.value, TraitValue::Str("USER".into()));
            assert_eq!(ctx.trait_map()["clauth"], "racf:clauth");
        }
    }

    #[test]
    fn test_verbatim_match_wins_over_prefix() {
        let ctx = build_segment_dictionaries(&table(), &traits([("notify", "eswift")]));
        let entry = ctx.segments().get("base", "notify").unwrap();
        assert_eq!(entry.operation, None);
    }

    #[test]
    fn test_prefix_is_stripped_only_once() {
        let ctx = build_segment_dictionaries(&table(), &traits([("addnoclauth", "USER")]));
        assert!(ctx.segments().is_empty());
    }

    #[test]
    fn test_unknown_traits_are_dropped() {
        let ctx = build_segment_dictionaries(
            &table(),
            &traits([("bogus", "x"), ("omvs:owner", "y"), ("nosuch:gid", "z")]),
        );
        assert!(ctx.segments().is_empty());
        assert!(ctx.trait_map().is_empty());
    }

    #[test]
    fn test_qualified_trait_goes_to_one_segment() {
        let ctx = build_segment_dictionaries(&table(), &traits([("omvs:gid", 1234i64)]));
        assert_eq!(
            ctx.segments().get("omvs", "gid").unwrap().value,
            TraitValue::Int(1234)
        );
        assert!(ctx.segments().segment("ovm").is_none());
    }

    #[test]
    fn test_unqualified_trait_goes_to_every_matching_segment() {
        let ctx = build_segment_dictionaries(&table(), &traits([("gid", 1234i64)]));
        assert_eq!(ctx.segments().get("omvs", "gid").unwrap().attribute, "gid");
        assert_eq!(ctx.segments().get("ovm", "gid").unwrap().attribute, "racf:gid");

        let accepted: Vec<(&str, Vec<&str>)> = ctx
            .segments()
            .iter()
            .map(|(segment, entries)| {
                (segment.as_str(), entries.keys().map(String::as_str).collect())
            })
            .collect();
        assert_eq!(accepted, vec![("omvs", vec!["gid"]), ("ovm", vec!["gid"])]);
    }

    #[test]
    fn test_preserved_snapshot_and_secrets() {
        let ctx = build_segment_dictionaries(
            &table(),
            &traits([("password", "GIMMICK1"), ("owner", "eswift")]),
        );
        assert_eq!(ctx.preserved(), ctx.segments());
        let secrets = ctx.secrets(&["base:password".to_string()]);
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].expose_secret(), "GIMMICK1");

        let redacted = ctx.preserved().redacted(&["base:password".to_string()]);
        assert_eq!(
            redacted.get("base", "password").unwrap().value,
            TraitValue::Str(REDACTED.into())
        );
        assert_eq!(
            redacted.get("base", "owner").unwrap().value,
            TraitValue::Str("eswift".into())
        );
    }

    #[test]
    fn test_tagged_entry_serializes_as_pair() {
        let ctx = build_segment_dictionaries(&table(), &traits([("addclauth", "USER")]));
        let json = serde_json::to_string(ctx.preserved()).unwrap();
        assert_eq!(json, r#"{"base":{"clauth":["USER","add"]}}"#);
    }

    #[test]
    fn test_bool_segments_for_extract() {
        let segments = BTreeMap::from([
            ("omvs".to_string(), true),
            ("ovm".to_string(), false),
            ("tso".to_string(), true),
        ]);
        let ctx = build_bool_segment_dictionaries(&table(), &segments);
        assert_eq!(ctx.extract_segments(), ["omvs".to_string()]);
    }

    #[test]
    fn test_update_and_replace_existing() {
        let mut t = table();
        let updates = BTreeMap::from([(
            "omvs".to_string(),
            BTreeMap::from([("uid".to_string(), "uid".to_string())]),
        )]);
        t.update_existing(&updates).unwrap();
        assert_eq!(t.lookup("omvs", "uid"), Some("uid"));
        assert_eq!(t.lookup("omvs", "gid"), Some("gid"));

        t.replace_existing(&updates).unwrap();
        assert_eq!(t.lookup("omvs", "gid"), None);

        let bad = BTreeMap::from([("nope".to_string(), BTreeMap::new())]);
        assert!(matches!(
            t.update_existing(&bad),
            Err(RacfAdminError::UnknownSegment { .. })
        ));
    }
}
