//! System-wide options (SETROPTS).

use crate::admin::{RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::parser::Profile;
use crate::request::{BuildMode, RequestOperation, SecurityRequest};
use crate::segment::{RequestContext, Traits};
use crate::service::OPTS_DEFAULT;
use crate::types::EntityKind;
use crate::Result;

/// Client for system-wide RACF options.
#[derive(Debug)]
pub struct SetroptsAdmin {
    admin: SecurityAdmin,
}

impl SetroptsAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(
            EntityKind::SystemSettings,
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

    /// Change system options. There is no profile to precheck.
    pub fn alter(&self, options: &Traits) -> Result<RequestOutcome> {
        let ctx = self.admin.build_segment_dictionaries(options);
        let mut request =
            SecurityRequest::unnamed(EntityKind::SystemSettings, RequestOperation::Set);
        request.build_segments(self.admin.table(), &ctx, BuildMode::Alter);
        self.admin.make_request(&request, &ctx, OPTS_DEFAULT)
    }

    /// Run SETROPTS LIST and parse the option report.
    pub fn list(&self) -> Result<RequestOutcome> {
        let request =
            SecurityRequest::unnamed(EntityKind::SystemSettings, RequestOperation::ListData);
        self.admin
            .extract_and_check_result(&request, &RequestContext::empty(), false)
    }

    /// Run SETROPTS LIST and return only the parsed options.
    pub fn list_profile(&self) -> Result<Option<Profile>> {
        Ok(self.list()?.into_first_profile())
    }
}
