//! Group profile administration (ADDGROUP / ALTGROUP / LISTGRP / DELGROUP).
//!
//! Besides the basic operations the client answers connect-authority
//! questions from the LISTGRP roster, where each connected user carries
//! its connect attributes.

use crate::admin::{profile_field, RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::parser::Profile;
use crate::request::{RequestOperation, SecurityRequest};
use crate::segment::{traits, TraitValue, Traits};
use crate::types::EntityKind;
use crate::value::FieldValue;
use crate::Result;

/// Client for group profiles.
#[derive(Debug)]
pub struct GroupAdmin {
    admin: SecurityAdmin,
}

impl GroupAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(EntityKind::Group, config)?))
    }

    /// Wrap a configured pipeline.
    pub fn from_admin(admin: SecurityAdmin) -> Self {
        Self { admin }
    }

    /// The underlying request pipeline.
    pub fn admin(&self) -> &SecurityAdmin {
        &self.admin
    }

    fn request(group: &str, operation: RequestOperation) -> SecurityRequest {
        SecurityRequest::new(EntityKind::Group, group, operation)
    }

    /// Create a group.
    pub fn add(&self, group: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin.add(Self::request(group, RequestOperation::Set), traits)
    }

    /// Alter an existing group.
    pub fn alter(&self, group: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin.alter(Self::request(group, RequestOperation::Set), traits)
    }

    /// List a group with the named segments in addition to `base`.
    pub fn extract(&self, group: &str, segments: &[&str]) -> Result<RequestOutcome> {
        self.admin
            .extract(Self::request(group, RequestOperation::ListData), segments)
    }

    /// List a group and return only the parsed profile.
    pub fn extract_profile(&self, group: &str, segments: &[&str]) -> Result<Option<Profile>> {
        Ok(self.extract(group, segments)?.into_first_profile())
    }

    /// Delete a group.
    pub fn delete(&self, group: &str) -> Result<RequestOutcome> {
        self.admin.delete(Self::request(group, RequestOperation::Del))
    }

    /// Whether `userid` is connected to `group` with group-SPECIAL.
    pub fn has_group_special_authority(&self, group: &str, userid: &str) -> Result<bool> {
        self.has_connect_attribute(group, userid, "special")
    }

    /// Whether `userid` is connected to `group` with group-OPERATIONS.
    pub fn has_group_operations_authority(&self, group: &str, userid: &str) -> Result<bool> {
        self.has_connect_attribute(group, userid, "operations")
    }

    /// Whether `userid` is connected to `group` with group-AUDITOR.
    pub fn has_group_auditor_authority(&self, group: &str, userid: &str) -> Result<bool> {
        self.has_connect_attribute(group, userid, "auditor")
    }

    /// Whether `userid` is connected to `group` with GRPACC.
    pub fn has_group_access_attribute(&self, group: &str, userid: &str) -> Result<bool> {
        self.has_connect_attribute(group, userid, "grpacc")
    }

    /// The group's OMVS GID.
    pub fn get_omvs_gid(&self, group: &str) -> Result<Option<FieldValue>> {
        let profile = self.extract_profile(group, &["omvs"])?;
        Ok(profile_field(profile, "omvs", "gid"))
    }

    /// Set the group's OMVS GID.
    pub fn set_omvs_gid(&self, group: &str, gid: i64) -> Result<RequestOutcome> {
        self.alter(group, &traits([("omvs:gid", TraitValue::Int(gid))]))
    }

    /// The group's OVM GID.
    pub fn get_ovm_gid(&self, group: &str) -> Result<Option<FieldValue>> {
        let profile = self.extract_profile(group, &["ovm"])?;
        Ok(profile_field(profile, "ovm", "gid"))
    }

    /// Set the group's OVM GID.
    pub fn set_ovm_gid(&self, group: &str, gid: i64) -> Result<RequestOutcome> {
        self.alter(group, &traits([("ovm:gid", TraitValue::Int(gid))]))
    }

    fn has_connect_attribute(&self, group: &str, userid: &str, attribute: &str) -> Result<bool> {
        let profile = self.extract_profile(group, &[])?;
        Ok(profile
            .as_ref()
            .is_some_and(|p| connect_attribute(p, userid, attribute)))
    }
}

/// Look `userid` up in the roster (case-insensitively) and check its
/// connect attributes. A group with no users has no connect attributes.
fn connect_attribute(profile: &Profile, userid: &str, attribute: &str) -> bool {
    let Some(users) = profile.base().get("users").and_then(FieldValue::as_list) else {
        return false;
    };
    users
        .iter()
        .filter_map(FieldValue::as_map)
        .find(|user| {
            user.get("userid")
                .and_then(FieldValue::as_str)
                .is_some_and(|id| id.eq_ignore_ascii_case(userid))
        })
        .and_then(|user| user.get("connectattributes"))
        .and_then(FieldValue::as_list)
        .is_some_and(|attributes| attributes.iter().any(|a| a.as_str() == Some(attribute)))
}
