//! Client configuration: debug dumps, request generation, trait table
//! overrides and extra secret traits.
//!
//! ```toml
//! debug = true
//! additional_secret_traits = ["tso:acctnum"]
//!
//! [update_existing_segment_traits.base]
//! wauth = "racf:wauth"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RacfAdminError;

/// Segment name → trait name → wire attribute.
pub type SegmentTraitOverrides = BTreeMap<String, BTreeMap<String, String>>;

/// Settings shared by every entity client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Dump redacted request and result documents through the request logger.
    pub debug: bool,
    /// Return the request document instead of calling the security service.
    pub generate_requests_only: bool,
    /// Traits merged into existing segments of the entity's trait table.
    pub update_existing_segment_traits: SegmentTraitOverrides,
    /// Segments whose trait map is replaced wholesale.
    pub replace_existing_segment_traits: SegmentTraitOverrides,
    /// `segment:trait` names redacted in addition to `base:password`.
    pub additional_secret_traits: Vec<String>,
}

impl AdminConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RacfAdminError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RacfAdminError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RacfAdminError> {
        let config: Self = toml::from_str(content).map_err(|e| RacfAdminError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every secret trait is segment-qualified.
    pub fn validate(&self) -> Result<(), RacfAdminError> {
        for name in &self.additional_secret_traits {
            match name.split_once(':') {
                Some((segment, trait_name)) if !segment.is_empty() && !trait_name.is_empty() => {}
                _ => {
                    return Err(RacfAdminError::UnknownSecretTrait { name: name.clone() });
                }
            }
        }
        Ok(())
    }

    /// Default secret traits followed by the configured ones.
    pub fn secret_traits(&self) -> Vec<String> {
        crate::segment::DEFAULT_SECRET_TRAITS
            .iter()
            .map(|s| s.to_string())
            .chain(self.additional_secret_traits.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
debug = true
additional_secret_traits = ["tso:acctnum"]

[update_existing_segment_traits.base]
wauth = "racf:wauth"

[replace_existing_segment_traits.omvs]
uid = "racf:uid"
"#;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_toml("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert!(!config.debug);
        assert_eq!(config.secret_traits(), vec!["base:password".to_string()]);
    }

    #[test]
    fn test_from_toml() {
        let config = AdminConfig::from_toml(SAMPLE).unwrap();
        assert!(config.debug);
        assert!(!config.generate_requests_only);
        assert_eq!(
            config.update_existing_segment_traits["base"]["wauth"],
            "racf:wauth"
        );
        assert_eq!(config.replace_existing_segment_traits["omvs"]["uid"], "racf:uid");
        assert_eq!(
            config.secret_traits(),
            vec!["base:password".to_string(), "tso:acctnum".to_string()]
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = AdminConfig::from_file(file.path()).unwrap();
        assert_eq!(config.additional_secret_traits, vec!["tso:acctnum".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let err = AdminConfig::from_file("/nonexistent/racf-admin.toml").unwrap_err();
        assert!(matches!(err, RacfAdminError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = AdminConfig::from_toml("debug = ").unwrap_err();
        assert!(matches!(err, RacfAdminError::Config { .. }));
    }

    #[test]
    fn test_unqualified_secret_trait() {
        let err = AdminConfig::from_toml(r#"additional_secret_traits = ["acctnum"]"#).unwrap_err();
        assert!(matches!(
            err,
            RacfAdminError::UnknownSecretTrait { ref name } if name == "acctnum"
        ));
    }
}
