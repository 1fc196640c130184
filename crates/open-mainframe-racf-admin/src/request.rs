//! Security request documents.
//!
//! A [`SecurityRequest`] is one `<securityrequest>` carrying one entity
//! element. Segment children are filled from a [`RequestContext`] in the
//! order the entity's [`TraitTable`] declares its segments.

use serde::{Deserialize, Serialize};

use crate::segment::{Operation, RequestContext, TraitEntry, TraitTable, TraitValue};
use crate::types::EntityKind;
use crate::xml::XmlWriter;

/// Default namespace of request documents.
pub const SAF_NAMESPACE: &str = "http://www.ibm.com/systems/zos/saf";

/// Namespace bound to the `racf:` prefix.
pub const RACF_NAMESPACE: &str = "http://www.ibm.com/systems/zos/racf";

/// Entity-level operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOperation {
    /// Create or alter.
    Set,
    /// Delete.
    Del,
    /// List profile data.
    ListData,
}

impl RequestOperation {
    /// The `operation` attribute text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Del => "del",
            Self::ListData => "listdata",
        }
    }
}

/// How segment traits are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// New profile: empty strings are sent as-is.
    Add,
    /// Existing profile: an empty string deletes the value.
    Alter,
    /// Extract: one empty element per requested segment.
    Extract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TraitElement {
    attribute: String,
    operation: Operation,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SegmentElement {
    name: String,
    traits: Vec<TraitElement>,
}

/// One request document under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequest {
    entity: EntityKind,
    name: Option<String>,
    attributes: Vec<(String, String)>,
    operation: RequestOperation,
    segments: Vec<SegmentElement>,
}

impl SecurityRequest {
    /// A request for the named profile.
    pub fn new(entity: EntityKind, name: &str, operation: RequestOperation) -> Self {
        Self {
            entity,
            name: Some(name.to_string()),
            attributes: Vec::new(),
            operation,
            segments: Vec::new(),
        }
    }

    /// A request with no profile name (system settings).
    pub fn unnamed(entity: EntityKind, operation: RequestOperation) -> Self {
        Self {
            name: None,
            ..Self::new(entity, "", operation)
        }
    }

    /// Add an entity attribute such as `class`, `group`, `volume` or `generic`.
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// The entity this request addresses.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// The entity-level operation.
    pub fn operation(&self) -> RequestOperation {
        self.operation
    }

    /// Fill segment elements from a validated context.
    pub fn build_segments(&mut self, table: &TraitTable, ctx: &RequestContext, mode: BuildMode) {
        if mode == BuildMode::Extract {
            self.segments = table
                .segment_names()
                .filter(|name| ctx.extract_segments().iter().any(|s| s == name))
                .map(|name| SegmentElement {
                    name: name.to_string(),
                    traits: Vec::new(),
                })
                .collect();
            return;
        }

        self.segments = table
            .segment_names()
            .filter_map(|name| {
                let entries = ctx.segments().segment(name)?;
                Some(SegmentElement {
                    name: name.to_string(),
                    traits: entries
                        .values()
                        .map(|entry| trait_element(entry, mode))
                        .collect(),
                })
            })
            .collect();
    }

    /// Serialize to a compact UTF-8 document.
    pub fn dump_request_xml(&self) -> String {
        let mut w = XmlWriter::new();
        w.start(
            "securityrequest",
            &[("xmlns", SAF_NAMESPACE), ("xmlns:racf", RACF_NAMESPACE)],
        );

        let mut attributes: Vec<(&str, &str)> = Vec::new();
        if let Some(name) = &self.name {
            attributes.push(("name", name));
        }
        attributes.extend(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        attributes.push(("operation", self.operation.as_str()));
        attributes.push(("requestid", self.entity.request_id()));

        let element = self.entity.element_name();
        if self.segments.is_empty() {
            w.leaf(element, &attributes, "");
            return w.finish();
        }

        w.start(element, &attributes);
        for segment in &self.segments {
            if segment.traits.is_empty() {
                w.leaf(&segment.name, &[], "");
                continue;
            }
            w.start(&segment.name, &[]);
            for t in &segment.traits {
                w.leaf(&t.attribute, &[("operation", t.operation.as_str())], &t.text);
            }
            w.end();
        }
        w.finish()
    }
}

fn trait_element(entry: &TraitEntry, mode: BuildMode) -> TraitElement {
    let (operation, text) = match (&entry.value, entry.operation) {
        (TraitValue::Bool(_), Some(tag)) => (tag, String::new()),
        (value, Some(tag)) => (tag, value.to_text()),
        (TraitValue::Bool(true), None) => (Operation::Set, String::new()),
        (TraitValue::Bool(false) | TraitValue::Null, None) => (Operation::Del, String::new()),
        (TraitValue::Str(s), None) if s.is_empty() && mode == BuildMode::Alter => {
            (Operation::Del, String::new())
        }
        (value, None) => (Operation::Set, value.to_text()),
    };
    TraitElement {
        attribute: entry.attribute.clone(),
        operation,
        text,
    }
}
