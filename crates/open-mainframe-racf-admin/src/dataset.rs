//! Data set profile administration (ADDSD / ALTDSD / LISTDSD / DELDSD).

use crate::admin::{profile_field, RequestOutcome, SecurityAdmin};
use crate::config::AdminConfig;
use crate::parser::Profile;
use crate::request::{RequestOperation, SecurityRequest};
use crate::segment::{traits, Traits};
use crate::types::EntityKind;
use crate::value::FieldValue;
use crate::Result;

/// A data set profile, optionally pinned to a volume or marked generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSetTarget<'a> {
    /// Profile name.
    pub name: &'a str,
    /// Volume serial of a discrete profile.
    pub volume: Option<&'a str>,
    /// Treat the name as a generic profile.
    pub generic: bool,
}

impl<'a> DataSetTarget<'a> {
    /// A discrete profile on `volume`.
    pub fn on_volume(name: &'a str, volume: &'a str) -> Self {
        Self {
            volume: Some(volume),
            ..Self::from(name)
        }
    }

    /// A generic profile.
    pub fn generic(name: &'a str) -> Self {
        Self {
            generic: true,
            ..Self::from(name)
        }
    }
}

impl<'a> From<&'a str> for DataSetTarget<'a> {
    fn from(name: &'a str) -> Self {
        Self {
            name,
            volume: None,
            generic: false,
        }
    }
}

/// Client for data set profiles.
#[derive(Debug)]
pub struct DataSetAdmin {
    admin: SecurityAdmin,
}

impl DataSetAdmin {
    /// A client using the default service and logger.
    pub fn new(config: AdminConfig) -> Result<Self> {
        Ok(Self::from_admin(SecurityAdmin::new(EntityKind::DataSet, config)?))
    }

    /// Wrap a configured pipeline.
    pub fn from_admin(admin: SecurityAdmin) -> Self {
        Self { admin }
    }

    /// The underlying request pipeline.
    pub fn admin(&self) -> &SecurityAdmin {
        &self.admin
    }

    fn request(target: DataSetTarget<'_>, operation: RequestOperation) -> SecurityRequest {
        let mut request = SecurityRequest::new(EntityKind::DataSet, target.name, operation);
        if let Some(volume) = target.volume {
            request = request.with_attribute("volume", volume);
        }
        if target.generic {
            request = request.with_attribute("generic", "yes");
        }
        request
    }

    /// Define a data set profile.
    pub fn add<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        self.admin
            .add(Self::request(target.into(), RequestOperation::Set), traits)
    }

    /// Alter an existing data set profile.
    pub fn alter<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        self.admin
            .alter(Self::request(target.into(), RequestOperation::Set), traits)
    }

    /// List a data set profile.
    pub fn extract<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
        segments: &[&str],
    ) -> Result<RequestOutcome> {
        self.admin
            .extract(Self::request(target.into(), RequestOperation::ListData), segments)
    }

    /// List a data set profile and return only the parsed profile.
    pub fn extract_profile<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
        segments: &[&str],
    ) -> Result<Option<Profile>> {
        Ok(self.extract(target, segments)?.into_first_profile())
    }

    /// Delete a data set profile.
    pub fn delete<'a>(&self, target: impl Into<DataSetTarget<'a>>) -> Result<RequestOutcome> {
        self.admin
            .delete(Self::request(target.into(), RequestOperation::Del))
    }

    /// The profile's universal access.
    pub fn get_universal_access<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
    ) -> Result<Option<FieldValue>> {
        let profile = self.extract_profile(target, &[])?;
        Ok(profile_field(profile, "base", "universal access"))
    }

    /// Change the profile's universal access.
    pub fn set_universal_access<'a>(
        &self,
        target: impl Into<DataSetTarget<'a>>,
        universal_access: &str,
    ) -> Result<RequestOutcome> {
        self.alter(target, &traits([("base:uacc", universal_access)]))
    }
}
