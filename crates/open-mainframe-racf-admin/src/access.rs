//! Access list administration (PERMIT).
//!
//! Every request names the protected profile and its class on the entity
//! element and the user or group being permitted as the `authid` trait.

use crate::admin::{RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::request::{BuildMode, RequestOperation, SecurityRequest};
use crate::segment::{TraitValue, Traits};
use crate::service::OPTS_DEFAULT;
use crate::types::EntityKind;
use crate::Result;

/// Client for access list entries.
#[derive(Debug)]
pub struct AccessAdmin {
    admin: SecurityAdmin,
}

impl AccessAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(EntityKind::Permission, config)?))
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
        SecurityRequest::new(EntityKind::Permission, resource, operation)
            .with_attribute("class", class)
    }

    fn with_auth_id(traits: &Traits, auth_id: &str) -> Traits {
        let mut traits = traits.clone();
        traits.insert("base:id".to_string(), TraitValue::from(auth_id));
        traits
    }

    /// Permit `auth_id` to `resource` in `class`.
    pub fn add(
        &self,
        resource: &str,
        class: &str,
        auth_id: &str,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        self.admin.add(
            Self::request(resource, class, RequestOperation::Set),
            &Self::with_auth_id(traits, auth_id),
        )
    }

    /// Change an existing permission.
    pub fn alter(
        &self,
        resource: &str,
        class: &str,
        auth_id: &str,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        self.admin.alter(
            Self::request(resource, class, RequestOperation::Set),
            &Self::with_auth_id(traits, auth_id),
        )
    }

    /// Remove `auth_id` from the access list of `resource`.
    pub fn delete(&self, resource: &str, class: &str, auth_id: &str) -> Result<RequestOutcome> {
        let ctx = self
            .admin
            .build_segment_dictionaries(&Self::with_auth_id(&Traits::new(), auth_id));
        let mut request = Self::request(resource, class, RequestOperation::Del);
        request.build_segments(self.admin.table(), &ctx, BuildMode::Add);
        self.admin.make_request(&request, &ctx, OPTS_DEFAULT)
    }
}
