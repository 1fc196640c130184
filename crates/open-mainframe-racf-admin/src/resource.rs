//! General resource profile administration (RDEFINE / RALTER / RLIST / RDELETE).

use crate::admin::{RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::parser::Profile;
use crate::request::{RequestOperation, SecurityRequest};
use crate::segment::Traits;
use crate::types::EntityKind;
use crate::Result;

/// Client for general resource profiles.
#[derive(Debug)]
pub struct ResourceAdmin {
    admin: SecurityAdmin,
}

impl ResourceAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(EntityKind::Resource, config)?))
    }

    /// Wrap a configured pipeline.
    pub fn from_admin(admin: SecurityAdmin) -> Self {
        Self { admin }
    }

    /// The underlying request pipeline.
    pub fn admin(&self) -> &SecurityAdmin {
        &self.admin
    }

    fn request(resource: &str, class: &str, operation: RequestOperation) -> SecurityRequest {
        SecurityRequest::new(EntityKind::Resource, resource, operation)
            .with_attribute("class", class)
    }

    /// Define a resource profile in `class`.
    pub fn add(&self, resource: &str, class: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin
            .add(Self::request(resource, class, RequestOperation::Set), traits)
    }

    /// Alter an existing resource profile.
    pub fn alter(&self, resource: &str, class: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin
            .alter(Self::request(resource, class, RequestOperation::Set), traits)
    }

    /// List a resource profile with the named segments in addition to `base`.
    pub fn extract(
        &self,
        resource: &str,
        class: &str,
        segments: &[&str],
    ) -> Result<RequestOutcome> {
        self.admin.extract(
            Self::request(resource, class, RequestOperation::ListData),
            segments,
        )
    }

    /// List a resource profile and return only the parsed profile.
    pub fn extract_profile(
        &self,
        resource: &str,
        class: &str,
        segments: &[&str],
    ) -> Result<Option<Profile>> {
        Ok(self.extract(resource, class, segments)?.into_first_profile())
    }

    /// Delete a resource profile.
    pub fn delete(&self, resource: &str, class: &str) -> Result<RequestOutcome> {
        self.admin
            .delete(Self::request(resource, class, RequestOperation::Del))
    }
}
