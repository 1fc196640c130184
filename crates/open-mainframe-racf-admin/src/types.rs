//! Entity kinds: the profile families IRRSMO00 administers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::ProfileKind;

/// A profile family addressed by one entity element of a security request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// User profiles (ADDUSER/ALTUSER/LISTUSER/DELUSER).
    User,
    /// Group profiles (ADDGROUP/ALTGROUP/LISTGRP/DELGROUP).
    Group,
    /// User-to-group connections (CONNECT/REMOVE).
    Connection,
    /// Data set profiles (ADDSD/ALTDSD/LISTDSD/DELDSD).
    DataSet,
    /// General resource profiles (RDEFINE/RALTER/RLIST/RDELETE).
    Resource,
    /// System-wide options (SETROPTS).
    SystemSettings,
    /// Access list entries (PERMIT).
    Permission,
}

impl EntityKind {
    /// Element name in requests and results.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Connection => "groupconnection",
            Self::DataSet => "dataset",
            Self::Resource => "resource",
            Self::SystemSettings => "systemsettings",
            Self::Permission => "permission",
        }
    }

    /// `requestid` attribute value.
    pub fn request_id(self) -> &'static str {
        match self {
            Self::User => "UserRequest",
            Self::Group => "GroupRequest",
            Self::Connection => "ConnectionRequest",
            Self::DataSet => "DatasetRequest",
            Self::Resource => "ResourceRequest",
            Self::SystemSettings => "SetroptsRequest",
            Self::Permission => "AccessRequest",
        }
    }

    /// The report grammar for listings of this entity, if it has any.
    pub fn profile_kind(self) -> Option<ProfileKind> {
        match self {
            Self::User => Some(ProfileKind::User),
            Self::Group => Some(ProfileKind::Group),
            Self::DataSet => Some(ProfileKind::Dataset),
            Self::Resource => Some(ProfileKind::Generic),
            Self::SystemSettings => Some(ProfileKind::Options),
            Self::Connection | Self::Permission => None,
        }
    }

    /// Look an entity up by its element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        [
            Self::User,
            Self::Group,
            Self::Connection,
            Self::DataSet,
            Self::Resource,
            Self::SystemSettings,
            Self::Permission,
        ]
        .into_iter()
        .find(|kind| kind.element_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}
