//! # RACF Administration Client
//!
//! Administer RACF security profiles through the IRRSMO00 XML interface
//! without hand-building its request and result documents.
//!
//! ## Features
//!
//! - **Trait validation**: loosely-typed trait maps are checked against
//!   per-entity segment tables, with `add`/`no`/`del`/`set` operation prefixes
//! - **Request encoding**: compact `securityrequest` documents, sent to the
//!   service in IBM-1047
//! - **Report parsing**: LISTUSER, LISTGRP, LISTDSD, RLIST and SETROPTS LIST
//!   output rebuilt into segment/field profiles with typed values
//! - **Result classification**: any return/reason code other than `(0, 0)`
//!   or an error marker becomes [`RacfAdminError::SecurityRequest`]
//! - **Redaction**: passwords and configured secret traits never reach the
//!   request logger, the generated request or the returned result
//!
//! ## Example
//!
//! ```rust
//! use open_mainframe_racf_admin::{traits, AdminConfig, GroupAdmin};
//!
//! let config = AdminConfig {
//!     generate_requests_only: true,
//!     ..AdminConfig::default()
//! };
//! let groups = GroupAdmin::new(config).unwrap();
//!
//! let outcome = groups
//!     .add("TESTGRP0", &traits([("base:owner", "leonard")]))
//!     .unwrap();
//! let xml = String::from_utf8(outcome.request_bytes().unwrap().to_vec()).unwrap();
//! assert!(xml.contains("<racf:owner operation=\"set\">leonard</racf:owner>"));
//! ```

pub mod access;
pub mod admin;
pub mod codepage;
pub mod config;
pub mod connection;
pub mod dataset;
pub mod error;
pub mod group;
pub mod logger;
pub mod parser;
pub mod request;
pub mod resource;
pub mod result;
pub mod schema;
pub mod segment;
pub mod service;
pub mod setropts;
pub mod types;
pub mod user;
pub mod value;
pub mod xml;

pub use access::AccessAdmin;
pub use admin::{RequestOutcome, SecurityAdmin};
pub use config::AdminConfig;
pub use connection::ConnectionAdmin;
pub use dataset::{DataSetAdmin, DataSetTarget};
pub use error::RacfAdminError;
pub use group::GroupAdmin;
pub use logger::{RedactedText, Redactor, RequestLogger, TracingLogger};
pub use parser::{Profile, ProfileKind};
pub use request::{RequestOperation, SecurityRequest};
pub use resource::ResourceAdmin;
pub use result::SecurityResult;
pub use segment::{traits, RequestContext, TraitValue, Traits};
pub use service::{Irrsmo00, SecurityService};
pub use setropts::SetroptsAdmin;
pub use types::EntityKind;
pub use user::UserAdmin;
pub use value::FieldValue;

/// Convenience result type for RACF administration operations.
pub type Result<T> = std::result::Result<T, RacfAdminError>;
