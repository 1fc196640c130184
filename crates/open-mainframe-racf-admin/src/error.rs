//! RACF administration error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::result::SecurityResult;

/// Errors produced by the RACF administration client.
#[derive(Debug, Error, Diagnostic)]
pub enum RacfAdminError {
    /// The security service rejected the request.
    #[error("security request failed with return code {returncode}, reason code {reasoncode}")]
    #[diagnostic(
        code(racf_admin::security_request),
        help("inspect the attached result for the command images and messages")
    )]
    SecurityRequest {
        /// Top-level return code.
        returncode: i64,
        /// Top-level reason code.
        reasoncode: i64,
        /// The full (redacted) result envelope.
        result: Box<SecurityResult>,
    },

    /// The response could not be understood as a result envelope.
    #[error("malformed security result: {message}")]
    #[diagnostic(code(racf_admin::malformed_result))]
    MalformedResult {
        /// What was missing or wrong.
        message: String,
    },

    /// The response was not well-formed XML.
    #[error("XML error at offset {position}: {message}")]
    #[diagnostic(code(racf_admin::xml))]
    Xml {
        /// Character offset of the error.
        position: usize,
        /// The error description.
        message: String,
    },

    /// A request character has no IBM-1047 code point.
    #[error("character {ch:?} cannot be encoded in IBM-1047")]
    #[diagnostic(code(racf_admin::encoding))]
    Encoding {
        /// The unencodable character.
        ch: char,
    },

    /// The native service call failed.
    #[error("IRRSMO00 call failed: {message}")]
    #[diagnostic(code(racf_admin::service_call))]
    ServiceCall {
        /// The error description.
        message: String,
    },

    /// Client configuration is invalid or unreadable.
    #[error("configuration error: {message}")]
    #[diagnostic(code(racf_admin::config))]
    Config {
        /// The error description.
        message: String,
    },

    /// A configuration override named a segment the entity does not have.
    #[error("segment '{segment}' is not a valid segment for this profile type")]
    #[diagnostic(code(racf_admin::unknown_segment))]
    UnknownSegment {
        /// The unknown segment name.
        segment: String,
    },

    /// A secret trait was not qualified as `segment:trait`.
    #[error("secret trait '{name}' must be given as 'segment:trait'")]
    #[diagnostic(code(racf_admin::unknown_secret_trait))]
    UnknownSecretTrait {
        /// The offending trait name.
        name: String,
    },

    /// A secret trait names a `segment:trait` pair the trait table lacks.
    #[error("secret trait '{name}' is not a trait of this profile type")]
    #[diagnostic(code(racf_admin::secret_trait_not_in_table))]
    SecretTraitNotInTable {
        /// The missing `segment:trait` name.
        name: String,
    },
}

impl RacfAdminError {
    /// The result envelope attached to a security-request failure.
    pub fn result(&self) -> Option<&SecurityResult> {
        match self {
            Self::SecurityRequest { result, .. } => Some(result),
            _ => None,
        }
    }
}
