//! Group connection administration (CONNECT / REMOVE).

use crate::admin::{RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::request::{RequestOperation, SecurityRequest};
use crate::segment::Traits;
use crate::types::EntityKind;
use crate::Result;

/// Client for user-to-group connections.
#[derive(Debug)]
pub struct ConnectionAdmin {
    admin: SecurityAdmin,
}

impl ConnectionAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(
            EntityKind::Connection,
            config,
        )?))
    }

    /// Wrap a configured pipeline.
    pub fn from_admin(admin: SecurityAdmin) -> Self {
        Self { admin }
    }

    /// The underlying request pipeline.
    pub fn admin(&self) -> &SecurityAdmin {
        &self.admin
    }

    fn request(userid: &str, group: &str, operation: RequestOperation) -> SecurityRequest {
        SecurityRequest::new(EntityKind::Connection, userid, operation)
            .with_attribute("group", group)
    }

    /// Connect `userid` to `group`.
    pub fn add(&self, userid: &str, group: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin
            .add(Self::request(userid, group, RequestOperation::Set), traits)
    }

    /// Change an existing connection.
    pub fn alter(&self, userid: &str, group: &str, traits: &Traits) -> Result<RequestOutcome> {
        self.admin
            .alter(Self::request(userid, group, RequestOperation::Set), traits)
    }

    /// Remove `userid` from `group`.
    pub fn delete(&self, userid: &str, group: &str) -> Result<RequestOutcome> {
        self.admin
            .delete(Self::request(userid, group, RequestOperation::Del))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_group() {
        let xml = ConnectionAdmin::request("ESWIFT", "TESTGRP0", RequestOperation::Del)
            .dump_request_xml();
        assert!(xml.contains(
            "<groupconnection name=\"ESWIFT\" group=\"TESTGRP0\" operation=\"del\" \
requestid=\"ConnectionRequest\" />"
        ));
    }
}
