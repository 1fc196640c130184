//! Result envelopes returned by IRRSMO00 and the success/failure classifier.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RacfAdminError;
use crate::logger::Redactor;
use crate::parser::Profile;
use crate::types::EntityKind;
use crate::xml::XmlElement;

/// One command IRRSMO00 ran on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// SAF return code.
    pub safreturncode: i64,
    /// RACF return code.
    pub returncode: i64,
    /// RACF reason code.
    pub reasoncode: i64,
    /// The command image, as RACF echoed it.
    pub image: String,
    /// Report lines in order.
    pub messages: Vec<String>,
}

/// Request-level error marker (the request was rejected before any command ran).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Failing function code.
    pub errorfunction: i64,
    /// Error code.
    pub errorcode: i64,
    /// Error reason.
    pub errorreason: i64,
    /// Human-readable message.
    pub errormessage: String,
    /// Offset of the offending text in the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erroroffset: Option<i64>,
    /// The offending request text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textinerror: Option<String>,
}

/// The entity node of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    /// Which entity element the result was for.
    pub kind: EntityKind,
    /// Profile name, if the request had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Echoed entity operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Echoed request id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requestid: Option<String>,
    /// Commands run, in order.
    #[serde(default)]
    pub commands: Vec<CommandResult>,
    /// Request-level error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    /// Profiles parsed from the report text of a successful extract.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

/// A decoded `<securityresult>` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityResult {
    /// Top-level return code.
    pub returncode: i64,
    /// Top-level reason code.
    pub reasoncode: i64,
    /// The entity node.
    pub entity: EntityResult,
}

impl SecurityResult {
    /// Decode a result document.
    pub fn from_xml(xml: &str) -> Result<Self, RacfAdminError> {
        let root = XmlElement::parse(xml)?;
        if root.local_name() != "securityresult" {
            return Err(malformed(format!(
                "expected <securityresult>, found <{}>",
                root.name
            )));
        }

        let (kind, node) = root
            .children
            .iter()
            .find_map(|child| EntityKind::from_element_name(child.local_name()).map(|k| (k, child)))
            .ok_or_else(|| malformed("no entity element in result".to_string()))?;

        let entity = EntityResult {
            kind,
            name: node.attribute("name").map(str::to_string),
            operation: node.attribute("operation").map(str::to_string),
            requestid: node.attribute("requestid").map(str::to_string),
            commands: node
                .children_named("command")
                .map(parse_command)
                .collect::<Result<_, _>>()?,
            error: node.child("error").map(parse_error).transpose()?,
            profiles: Vec::new(),
        };

        Ok(Self {
            returncode: code(&root, "returncode")?,
            reasoncode: code(&root, "reasoncode")?,
            entity,
        })
    }

    /// Whether the request succeeded: codes `(0, 0)` and no error marker.
    pub fn is_success(&self) -> bool {
        self.entity.error.is_none() && self.returncode == 0 && self.reasoncode == 0
    }

    /// Classify the result, turning any failure into [`RacfAdminError::SecurityRequest`].
    pub fn check(self) -> Result<Self, RacfAdminError> {
        if self.is_success() {
            return Ok(self);
        }
        debug!(
            returncode = self.returncode,
            reasoncode = self.reasoncode,
            error_marker = self.entity.error.is_some(),
            "security request failed"
        );
        Err(RacfAdminError::SecurityRequest {
            returncode: self.returncode,
            reasoncode: self.reasoncode,
            result: Box::new(self),
        })
    }

    /// Report lines of the first command.
    pub fn messages(&self) -> &[String] {
        self.entity
            .commands
            .first()
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Scrub secrets from every free-text field.
    pub fn redact(&mut self, redactor: &Redactor) {
        for command in &mut self.entity.commands {
            redactor.redact_in_place(&mut command.image);
            for message in &mut command.messages {
                redactor.redact_in_place(message);
            }
        }
        if let Some(error) = &mut self.entity.error {
            redactor.redact_in_place(&mut error.errormessage);
            if let Some(text) = &mut error.textinerror {
                redactor.redact_in_place(text);
            }
        }
    }
}

fn malformed(message: String) -> RacfAdminError {
    RacfAdminError::MalformedResult { message }
}

fn code(element: &XmlElement, name: &str) -> Result<i64, RacfAdminError> {
    let text = element
        .child_text(name)
        .ok_or_else(|| malformed(format!("<{}> is missing <{}>", element.local_name(), name)))?;
    text.trim()
        .parse()
        .map_err(|_| malformed(format!("<{}> is not a number: {:?}", name, text)))
}

fn parse_command(node: &XmlElement) -> Result<CommandResult, RacfAdminError> {
    Ok(CommandResult {
        safreturncode: code(node, "safreturncode")?,
        returncode: code(node, "returncode")?,
        reasoncode: code(node, "reasoncode")?,
        image: node.child_text("image").unwrap_or_default().to_string(),
        messages: node
            .children_named("message")
            .map(|m| m.text.clone())
            .collect(),
    })
}

fn parse_error(node: &XmlElement) -> Result<ErrorDetail, RacfAdminError> {
    Ok(ErrorDetail {
        errorfunction: code(node, "errorfunction")?,
        errorcode: code(node, "errorcode")?,
        errorreason: code(node, "errorreason")?,
        errormessage: node.child_text("errormessage").unwrap_or_default().to_string(),
        erroroffset: node.child("erroroffset").map(|_| code(node, "erroroffset")).transpose()?,
        textinerror: node.child_text("textinerror").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    const ROOT: &str = concat!(
        r#"<?xml version="1.0" encoding="IBM-1047"?>"#,
        r#"<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">"#,
    );

    fn envelope(rc: i64, rsn: i64, body: &str) -> String {
        format!(
            "{ROOT}<group name=\"TESTGRP0\" operation=\"set\" requestid=\"GroupRequest\">\
             {body}</group><returncode>{rc}</returncode><reasoncode>{rsn}</reasoncode>\
             </securityresult>"
        )
    }

    const COMMAND: &str = "\
        <command><safreturncode>0</safreturncode><returncode>0</returncode>\
        <reasoncode>0</reasoncode><image>ADDGROUP TESTGRP0 </image>\
        <message>ICH00001I GROUP ADDED</message></command>";

    #[test]
    fn test_decode_success() {
        let result = SecurityResult::from_xml(&envelope(0, 0, COMMAND)).unwrap();
        assert_eq!(result.entity.kind, EntityKind::Group);
        assert_eq!(result.entity.name.as_deref(), Some("TESTGRP0"));
        assert_eq!(result.entity.commands[0].image, "ADDGROUP TESTGRP0 ");
        assert_eq!(result.messages(), ["ICH00001I GROUP ADDED"]);
        assert!(result.check().is_ok());
    }

    #[test]
    fn test_nonzero_codes_fail() {
        for (rc, rsn) in [(0, 8), (4, 0), (8, 16)] {
            let result = SecurityResult::from_xml(&envelope(rc, rsn, COMMAND)).unwrap();
            match result.check() {
                Err(RacfAdminError::SecurityRequest {
                    returncode,
                    reasoncode,
                    result,
                }) => {
                    assert_eq!((returncode, reasoncode), (rc, rsn));
                    assert_eq!(result.entity.commands.len(), 1);
                }
                other => panic!("expected failure for ({rc}, {rsn}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_marker_fails_even_with_zero_codes() {
        let body = "\
            <error><errorfunction>10</errorfunction><errorcode>2000</errorcode>\
            <errorreason>68</errorreason>\
            <errormessage>Invalid attribute value specified.</errormessage>\
            <erroroffset>149</erroroffset><textinerror>gid</textinerror></error>";
        let result = SecurityResult::from_xml(&envelope(0, 0, body)).unwrap();
        let error = result.entity.error.clone().unwrap();
        assert_eq!(error.errorcode, 2000);
        assert_eq!(error.erroroffset, Some(149));
        assert_eq!(error.textinerror.as_deref(), Some("gid"));
        let err = result.check().unwrap_err();
        assert!(err.result().is_some());
    }

    #[test]
    fn test_missing_entity_is_malformed() {
        let xml =
            "<securityresult><returncode>0</returncode><reasoncode>0</reasoncode></securityresult>";
        assert!(matches!(
            SecurityResult::from_xml(xml),
            Err(RacfAdminError::MalformedResult { .. })
        ));
        assert!(matches!(
            SecurityResult::from_xml("<other/>"),
            Err(RacfAdminError::MalformedResult { .. })
        ));
    }

    #[test]
    fn test_redact_scrubs_images_and_messages() {
        let body = "\
            <command><safreturncode>0</safreturncode><returncode>0</returncode>\
            <reasoncode>0</reasoncode><image>ALTUSER SQUIDWRD PASSWORD (GIMMICK1)</image>\
            <message>GIMMICK1 rejected</message></command>";
        let mut result = SecurityResult::from_xml(&envelope(0, 0, body)).unwrap();
        result.redact(&Redactor::new(vec![SecretString::from("GIMMICK1")]));
        assert_eq!(result.entity.commands[0].image, "ALTUSER SQUIDWRD PASSWORD (********)");
        assert_eq!(result.messages(), ["******** rejected"]);
    }

    #[test]
    fn test_serializes_without_empty_profiles() {
        let result = SecurityResult::from_xml(&envelope(0, 0, COMMAND)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["entity"]["kind"], "group");
        assert!(json["entity"].get("profiles").is_none());
        assert!(json["entity"].get("error").is_none());
    }
}
