//! User profile administration (ADDUSER / ALTUSER / LISTUSER / DELUSER).

use crate::admin::{profile_field, RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::parser::Profile;
use crate::request::{RequestOperation, SecurityRequest};
use crate::segment::{traits, TraitValue, Traits};
use crate::types::EntityKind;
use crate::value::FieldValue;
use crate::Result;

/// Client for user profiles.
#[derive(Debug)]
pub struct UserAdmin {
    admin: SecurityAdmin,
}

impl UserAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(EntityKind::User, config)?))
    }

    /// Wrap a configured pipeline.
    pub fn from_admin(admin: SecurityAdmin) -> Self {
        Self { admin }
    }

    /// The underlying request pipeline.
    pub fn admin(&self) -> &SecurityAdmin {
        &self.admin
    }

    fn request(userid: &str, operation: RequestOperation) -> SecurityRequest {
        SecurityRequest::new(EntityKind::User, userid, operation)
    }

    /// Create a user.
    pub fn add(&self, userid: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin.add(Self::request(userid, RequestOperation::Set), traits)
    }

    /// Alter an existing user.
    pub fn alter(&self, userid: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin.alter(Self::request(userid, RequestOperation::Set), traits)
    }

    /// List a user with the named segments in addition to `base`.
    pub fn extract(&self, userid: &str, segments: &[&str]) -> Result<RequestOutcome> {
        self.admin
            .extract(Self::request(userid, RequestOperation::ListData), segments)
    }

    /// List a user and return only the parsed profile.
    pub fn extract_profile(&self, userid: &str, segments: &[&str]) -> Result<Option<Profile>> {
        Ok(self.extract(userid, segments)?.into_first_profile())
    }

    /// Delete a user.
    pub fn delete(&self, userid: &str) -> Result<RequestOutcome> {
        self.admin.delete(Self::request(userid, RequestOperation::Del))
    }

    /// Set a user's password. The password is redacted from logs and results.
    pub fn set_password(&self, userid: &str, password: &str) -> Result<RequestOutcome> {
        self.alter(userid, &traits([("base:password", password)]))
    }

    /// Whether the user has the SPECIAL attribute.
    pub fn has_special_authority(&self, userid: &str) -> Result<bool> {
        let profile = self.extract_profile(userid, &[])?;
        Ok(has_attribute(profile.as_ref(), "special"))
    }

    /// The user's OMVS UID.
    pub fn get_omvs_uid(&self, userid: &str) -> Result<Option<FieldValue>> {
        let profile = self.extract_profile(userid, &["omvs"])?;
        Ok(profile_field(profile, "omvs", "uid"))
    }

    /// Set the user's OMVS UID.
    pub fn set_omvs_uid(&self, userid: &str, uid: i64) -> Result<RequestOutcome> {
        self.alter(userid, &traits([("omvs:uid", TraitValue::Int(uid))]))
    }
}

fn has_attribute(profile: Option<&Profile>, attribute: &str) -> bool {
    profile
        .and_then(|p| p.base().get("attributes"))
        .and_then(FieldValue::as_list)
        .is_some_and(|attributes| {
            attributes
                .iter()
                .any(|a| a.as_str() == Some(attribute))
        })
}
