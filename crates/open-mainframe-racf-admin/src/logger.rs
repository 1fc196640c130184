//! Debug logging of requests and results, with secret redaction.
//!
//! Loggers only ever receive [`RedactedText`], which can only be produced by
//! a [`Redactor`]. Plaintext secrets stay inside [`SecretString`] until the
//! redactor compares against them.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::segment::REDACTED;
use crate::xml::escape_xml;

/// Replaces known secret values with [`REDACTED`].
#[derive(Default)]
pub struct Redactor {
    secrets: Vec<SecretString>,
}

impl fmt::Debug for Redactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redactor")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}

impl Redactor {
    /// A redactor for the given secrets. Empty secrets are ignored.
    pub fn new(secrets: Vec<SecretString>) -> Self {
        Self {
            secrets: secrets
                .into_iter()
                .filter(|s| !s.expose_secret().is_empty())
                .collect(),
        }
    }

    /// Whether there is anything to redact.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Redact `text` for logging.
    pub fn redact(&self, text: &str) -> RedactedText {
        let mut owned = text.to_string();
        self.redact_in_place(&mut owned);
        RedactedText(owned)
    }

    /// Redact `text` in place. Both the raw and the XML-escaped spellings of
    /// each secret are replaced.
    pub fn redact_in_place(&self, text: &mut String) {
        for secret in &self.secrets {
            let raw = secret.expose_secret();
            let escaped = escape_xml(raw);
            if escaped != raw && text.contains(escaped.as_str()) {
                *text = text.replace(escaped.as_str(), REDACTED);
            }
            if text.contains(raw) {
                *text = text.replace(raw, REDACTED);
            }
        }
    }
}

/// Text that has been through a [`Redactor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedText(String);

impl RedactedText {
    /// The redacted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the redacted text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RedactedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sink for debug dumps of requests and results.
pub trait RequestLogger: Send + Sync {
    /// Log a dictionary (segment traits, result envelope) rendered as JSON.
    fn log_dictionary(&self, header: &str, dictionary: &RedactedText);

    /// Log an XML document.
    fn log_xml(&self, header: &str, xml: &RedactedText);
}

/// Logger that emits `tracing` debug events on target `racf_admin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn log_dictionary(&self, header: &str, dictionary: &RedactedText) {
        debug!(target: "racf_admin", header, "{}", dictionary);
    }

    fn log_xml(&self, header: &str, xml: &RedactedText) {
        debug!(target: "racf_admin", header, "{}", xml);
    }
}
