//! Shared request pipeline for every entity client.
//!
//! A [`SecurityAdmin`] owns the trait table of one entity kind, the security
//! service and the request logger. Each call validates traits into a fresh
//! [`RequestContext`], encodes the request, sends it and classifies the
//! result. Nothing request-specific is stored on the admin, so all
//! operations take `&self`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::codepage;
use crate::config::AdminConfig;
use crate::error::RacfAdminError;
use crate::logger::{Redactor, RequestLogger, TracingLogger};
use crate::parser::{parse_profiles, Profile, ProfileKind};
use crate::request::{BuildMode, SecurityRequest};
use crate::result::SecurityResult;
use crate::schema::traits_for;
use crate::segment::{self, RequestContext, TraitTable, Traits};
use crate::service::{Irrsmo00, SecurityService, OPTS_DEFAULT, OPTS_PRECHECK};
use crate::types::EntityKind;
use crate::value::FieldValue;
use crate::Result;

/// What a request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// The service ran the request successfully.
    Completed(SecurityResult),
    /// Request generation only: the redacted UTF-8 request document.
    Generated(Vec<u8>),
}

impl RequestOutcome {
    /// The result of a completed request.
    pub fn result(&self) -> Option<&SecurityResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Generated(_) => None,
        }
    }

    /// Take the result of a completed request.
    pub fn into_result(self) -> Option<SecurityResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Generated(_) => None,
        }
    }

    /// The generated request document.
    pub fn request_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Generated(bytes) => Some(bytes),
            Self::Completed(_) => None,
        }
    }

    /// Profiles parsed from an extract.
    pub fn profiles(&self) -> &[Profile] {
        self.result()
            .map(|r| r.entity.profiles.as_slice())
            .unwrap_or(&[])
    }

    /// The first parsed profile.
    pub fn into_first_profile(self) -> Option<Profile> {
        self.into_result()
            .and_then(|r| r.entity.profiles.into_iter().next())
    }
}

/// Request pipeline bound to one entity kind.
pub struct SecurityAdmin {
    entity: EntityKind,
    table: TraitTable,
    kind: Option<ProfileKind>,
    config: AdminConfig,
    secret_traits: Vec<String>,
    service: Box<dyn SecurityService>,
    logger: Box<dyn RequestLogger>,
}

impl fmt::Debug for SecurityAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityAdmin")
            .field("entity", &self.entity)
            .field("kind", &self.kind)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SecurityAdmin {
    /// Build the pipeline for `entity`, applying the trait table overrides
    /// in `config`.
    ///
    /// Fails when an override names a segment the entity does not have, or a
    /// secret trait is not in the resulting table.
    pub fn new(entity: EntityKind, config: AdminConfig) -> Result<Self> {
        config.validate()?;
        let mut table = traits_for(entity);
        table.update_existing(&config.update_existing_segment_traits)?;
        table.replace_existing(&config.replace_existing_segment_traits)?;

        for name in &config.additional_secret_traits {
            let known = name
                .split_once(':')
                .and_then(|(segment, trait_name)| table.lookup(segment, trait_name))
                .is_some();
            if !known {
                return Err(RacfAdminError::SecretTraitNotInTable { name: name.clone() });
            }
        }

        Ok(Self {
            entity,
            kind: entity.profile_kind(),
            secret_traits: config.secret_traits(),
            table,
            config,
            service: Box::new(Irrsmo00::new()),
            logger: Box::new(TracingLogger),
        })
    }

    /// Replace the security service.
    pub fn with_service(mut self, service: impl SecurityService + 'static) -> Self {
        self.service = Box::new(service);
        self
    }

    /// Replace the request logger.
    pub fn with_logger(mut self, logger: impl RequestLogger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// The entity kind this pipeline serves.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// The trait table in effect.
    pub fn table(&self) -> &TraitTable {
        &self.table
    }

    /// The client configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Validate caller traits against this entity's table.
    pub fn build_segment_dictionaries(&self, traits: &Traits) -> RequestContext {
        segment::build_segment_dictionaries(&self.table, traits)
    }

    /// Select segments for an extract.
    pub fn build_bool_segment_dictionaries(
        &self,
        segments: &BTreeMap<String, bool>,
    ) -> RequestContext {
        segment::build_bool_segment_dictionaries(&self.table, segments)
    }

    /// Send `request` and classify the result.
    ///
    /// With `generate_requests_only` configured the redacted request document
    /// is returned and nothing is sent.
    pub fn make_request(
        &self,
        request: &SecurityRequest,
        ctx: &RequestContext,
        opts: u32,
    ) -> Result<RequestOutcome> {
        self.send(request, ctx, opts, self.config.generate_requests_only)
    }

    /// Send an extract request and parse the returned report into profiles.
    pub fn extract_and_check_result(
        &self,
        request: &SecurityRequest,
        ctx: &RequestContext,
        generate_request_only: bool,
    ) -> Result<RequestOutcome> {
        let generate = generate_request_only || self.config.generate_requests_only;
        let mut result = match self.send(request, ctx, OPTS_DEFAULT, generate)? {
            RequestOutcome::Completed(result) => result,
            generated => return Ok(generated),
        };

        if let Some(kind) = self.kind {
            let segments: Vec<&str> = self.table.segment_names().collect();
            let profiles = parse_profiles(result.messages(), kind, &segments);
            debug!(entity = %self.entity, profiles = profiles.len(), "parsed extract report");
            result.entity.profiles = profiles;
        }
        if self.config.debug {
            let redactor = Redactor::new(ctx.secrets(&self.secret_traits));
            self.logger.log_dictionary(
                "Result Dictionary (Formatted Profile)",
                &redactor.redact(&to_json(&result)),
            );
        }
        Ok(RequestOutcome::Completed(result))
    }

    fn send(
        &self,
        request: &SecurityRequest,
        ctx: &RequestContext,
        opts: u32,
        generate_only: bool,
    ) -> Result<RequestOutcome> {
        let redactor = Redactor::new(ctx.secrets(&self.secret_traits));
        let xml = request.dump_request_xml();

        if self.config.debug {
            let dictionary = to_json(&ctx.preserved().redacted(&self.secret_traits));
            self.logger
                .log_dictionary("Request Dictionary", &redactor.redact(&dictionary));
            self.logger.log_xml("Request XML", &redactor.redact(&xml));
        }
        if generate_only {
            return Ok(RequestOutcome::Generated(
                redactor.redact(&xml).into_string().into_bytes(),
            ));
        }

        info!(
            entity = %self.entity,
            operation = request.operation().as_str(),
            opts,
            "sending security request"
        );
        let response = self.service.call(&codepage::encode(&xml)?, opts)?;
        if response.is_empty() {
            return Err(RacfAdminError::MalformedResult {
                message: "security service returned an empty result".to_string(),
            });
        }

        let result_xml = codepage::decode(&response);
        if self.config.debug {
            self.logger.log_xml("Result XML", &redactor.redact(&result_xml));
        }
        let mut result = SecurityResult::from_xml(&result_xml)?;
        result.redact(&redactor);
        if self.config.debug {
            self.logger
                .log_dictionary("Result Dictionary", &redactor.redact(&to_json(&result)));
        }
        result.check().map(RequestOutcome::Completed)
    }

    /// Validate `traits` and send `request` as an add.
    pub(crate) fn add(
        &self,
        mut request: SecurityRequest,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        let ctx = self.build_segment_dictionaries(traits);
        request.build_segments(&self.table, &ctx, BuildMode::Add);
        self.make_request(&request, &ctx, OPTS_DEFAULT)
    }

    /// Validate `traits` and send `request` as an alter of an existing profile.
    pub(crate) fn alter(
        &self,
        mut request: SecurityRequest,
        traits: &Traits,
    ) -> Result<RequestOutcome> {
        let ctx = self.build_segment_dictionaries(traits);
        request.build_segments(&self.table, &ctx, BuildMode::Alter);
        self.make_request(&request, &ctx, OPTS_PRECHECK)
    }

    /// Extract the profile addressed by `request` with the named segments.
    pub(crate) fn extract(
        &self,
        mut request: SecurityRequest,
        segments: &[&str],
    ) -> Result<RequestOutcome> {
        let wanted: BTreeMap<String, bool> =
            segments.iter().map(|s| (s.to_string(), true)).collect();
        let ctx = self.build_bool_segment_dictionaries(&wanted);
        request.build_segments(&self.table, &ctx, BuildMode::Extract);
        self.extract_and_check_result(&request, &ctx, false)
    }

    /// Send a request that carries no traits.
    pub(crate) fn delete(&self, request: SecurityRequest) -> Result<RequestOutcome> {
        self.make_request(&request, &RequestContext::empty(), OPTS_DEFAULT)
    }
}

/// Read one field from an optional profile.
pub(crate) fn profile_field(
    profile: Option<Profile>,
    segment: &str,
    field: &str,
) -> Option<FieldValue> {
    profile.and_then(|p| p.get(segment, field).cloned())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestOperation;
    use crate::segment::traits;
    use std::sync::{Arc, Mutex};

    /// Answers every call with one fixed document and remembers the requests.
    #[derive(Clone, Default)]
    struct Canned {
        response: String,
        calls: Arc<Mutex<Vec<(String, u32)>>>,
    }

    impl SecurityService for Canned {
        fn call(&self, request: &[u8], opts: u32) -> Result<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push((codepage::decode(request), opts));
            codepage::encode(&self.response)
        }
    }

    fn canned(response: &str) -> Canned {
        Canned {
            response: response.to_string(),
            ..Canned::default()
        }
    }

    const OK: &str = "<securityresult><group name=\"TESTGRP0\" operation=\"set\" \
requestid=\"GroupRequest\"><command><safreturncode>0</safreturncode>\
<returncode>0</returncode><reasoncode>0</reasoncode>\
<image>ADDGROUP TESTGRP0</image></command></group>\
<returncode>0</returncode><reasoncode>0</reasoncode></securityresult>";

    #[test]
    fn test_add_sends_default_opts() {
        let service = canned(OK);
        let admin = SecurityAdmin::new(EntityKind::Group, AdminConfig::default())
            .unwrap()
            .with_service(service.clone());
        let request = SecurityRequest::new(EntityKind::Group, "TESTGRP0", RequestOperation::Set);
        let outcome = admin
            .add(request, &traits([("omvs:gid", 1234i64)]))
            .unwrap();

        assert!(outcome.result().unwrap().is_success());
        let calls = service.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, OPTS_DEFAULT);
        assert!(calls[0].0.contains("<gid operation=\"set\">1234</gid>"));
    }

    #[test]
    fn test_alter_uses_precheck() {
        let service = canned(OK);
        let admin = SecurityAdmin::new(EntityKind::Group, AdminConfig::default())
            .unwrap()
            .with_service(service.clone());
        let request = SecurityRequest::new(EntityKind::Group, "TESTGRP0", RequestOperation::Set);
        admin.alter(request, &traits([("base:owner", "")])).unwrap();

        let calls = service.calls.lock().unwrap();
        assert_eq!(calls[0].1, OPTS_PRECHECK);
        assert!(calls[0].0.contains("<racf:owner operation=\"del\" />"));
    }

    #[test]
    fn test_generate_only_never_calls_service() {
        let service = canned(OK);
        let config = AdminConfig {
            generate_requests_only: true,
            ..AdminConfig::default()
        };
        let admin = SecurityAdmin::new(EntityKind::Group, config)
            .unwrap()
            .with_service(service.clone());
        let request = SecurityRequest::new(EntityKind::Group, "TESTGRP0", RequestOperation::Del);
        let outcome = admin.delete(request).unwrap();

        let bytes = outcome.request_bytes().unwrap();
        assert!(std::str::from_utf8(bytes).unwrap().starts_with("<securityrequest"));
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_response_is_malformed() {
        let admin = SecurityAdmin::new(EntityKind::Group, AdminConfig::default())
            .unwrap()
            .with_service(canned(""));
        let request = SecurityRequest::new(EntityKind::Group, "TESTGRP0", RequestOperation::Del);
        let err = admin.delete(request).unwrap_err();
        assert!(matches!(err, RacfAdminError::MalformedResult { .. }));
    }

    #[test]
    fn test_unknown_override_segment() {
        let mut config = AdminConfig::default();
        config
            .update_existing_segment_traits
            .insert("cics".into(), BTreeMap::new());
        let err = SecurityAdmin::new(EntityKind::Group, config).unwrap_err();
        assert!(matches!(err, RacfAdminError::UnknownSegment { ref segment } if segment == "cics"));
    }

    #[test]
    fn test_override_and_secret_traits() {
        let mut config = AdminConfig::default();
        config.update_existing_segment_traits.insert(
            "base".into(),
            BTreeMap::from([("secret".to_string(), "racf:secret".to_string())]),
        );
        config.additional_secret_traits = vec!["base:secret".into()];
        let admin = SecurityAdmin::new(EntityKind::Group, config).unwrap();
        assert_eq!(admin.table().lookup("base", "secret"), Some("racf:secret"));

        let config = AdminConfig {
            additional_secret_traits: vec!["base:nosuchtrait".into()],
            ..AdminConfig::default()
        };
        let err = SecurityAdmin::new(EntityKind::Group, config).unwrap_err();
        assert!(matches!(
            err,
            RacfAdminError::SecretTraitNotInTable { ref name } if name == "base:nosuchtrait"
        ));
        assert_eq!(
            err.to_string(),
            "secret trait 'base:nosuchtrait' is not a trait of this profile type"
        );

        let config = AdminConfig {
            additional_secret_traits: vec!["nosuchtrait".into()],
            ..AdminConfig::default()
        };
        assert!(matches!(
            SecurityAdmin::new(EntityKind::Group, config),
            Err(RacfAdminError::UnknownSecretTrait { .. })
        ));
    }

    #[test]
    fn test_profile_field() {
        let mut profile = Profile::new();
        profile.start_segment("omvs");
        profile
            .segment_mut("omvs")
            .insert("gid".into(), FieldValue::Int(7));
        assert_eq!(profile_field(Some(profile), "omvs", "gid"), Some(FieldValue::Int(7)));
        assert_eq!(profile_field(None, "omvs", "gid"), None);
    }
}
