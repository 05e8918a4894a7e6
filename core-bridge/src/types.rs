//! Request and response values exchanged over a bridge channel.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::error::{ChannelError, Result, UNIMPLEMENTED};

/// A single named call issued by the managed runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityRequest {
    method: String,
    arguments: Option<Value>,
}

impl CapabilityRequest {
    /// Create a request with no arguments.
    ///
    /// Fails with [`ChannelError::EmptyMethodName`] for an empty method.
    pub fn new(method: impl Into<String>) -> Result<Self> {
        let method = method.into();
        if method.is_empty() {
            return Err(ChannelError::EmptyMethodName);
        }
        Ok(Self {
            method,
            arguments: None,
        })
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = match arguments {
            Value::Null => None,
            other => Some(other),
        };
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> Option<&Value> {
        self.arguments.as_ref()
    }
}

/// Ordered mapping of field names to string values.
///
/// Fields keep insertion order on the wire. Setting an existing field replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityResult {
    fields: Vec<(String, String)>,
}

impl CapabilityResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for CapabilityResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CapabilityResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = CapabilityResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string fields")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut result = CapabilityResult::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    result.insert(key, value);
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// Failed outcome of a capability call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct CapabilityError {
    /// Stable machine-readable code
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Underlying host error text, if any
    pub detail: Option<String>,
}

impl CapabilityError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Error for a method with no registered handler.
    pub fn unimplemented(method: &str) -> Self {
        Self::new(UNIMPLEMENTED, format!("No handler for method '{}'", method))
    }

    pub fn is_unimplemented(&self) -> bool {
        self.code == UNIMPLEMENTED
    }
}

/// Outcome of one capability call: exactly one of result or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum CapabilityResponse {
    Success(CapabilityResult),
    Error(CapabilityError),
}

impl CapabilityResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, CapabilityResponse::Success(_))
    }

    pub fn result(&self) -> Option<&CapabilityResult> {
        match self {
            CapabilityResponse::Success(result) => Some(result),
            CapabilityResponse::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CapabilityError> {
        match self {
            CapabilityResponse::Success(_) => None,
            CapabilityResponse::Error(error) => Some(error),
        }
    }

    pub fn into_result(self) -> std::result::Result<CapabilityResult, CapabilityError> {
        self.into()
    }
}

impl From<std::result::Result<CapabilityResult, CapabilityError>> for CapabilityResponse {
    fn from(outcome: std::result::Result<CapabilityResult, CapabilityError>) -> Self {
        match outcome {
            Ok(result) => CapabilityResponse::Success(result),
            Err(error) => CapabilityResponse::Error(error),
        }
    }
}

impl From<CapabilityResponse> for std::result::Result<CapabilityResult, CapabilityError> {
    fn from(response: CapabilityResponse) -> Self {
        match response {
            CapabilityResponse::Success(result) => Ok(result),
            CapabilityResponse::Error(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_rejects_empty_method() {
        assert!(matches!(
            CapabilityRequest::new(""),
            Err(ChannelError::EmptyMethodName)
        ));
    }

    #[test]
    fn test_request_null_arguments_are_absent() {
        let request = CapabilityRequest::new("getPackageInfo")
            .unwrap()
            .with_arguments(Value::Null);
        assert_eq!(request.arguments(), None);

        let request = request.with_arguments(json!({"verbose": true}));
        assert_eq!(request.arguments(), Some(&json!({"verbose": true})));
    }

    #[test]
    fn test_result_keeps_insertion_order() {
        let result = CapabilityResult::new()
            .with_field("appName", "Finity")
            .with_field("packageName", "com.app.finity")
            .with_field("version", "1.0.1")
            .with_field("buildNumber", "1");

        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, vec!["appName", "packageName", "version", "buildNumber"]);

        let encoded = serde_json::to_string(&result).unwrap();
        assert_eq!(
            encoded,
            r#"{"appName":"Finity","packageName":"com.app.finity","version":"1.0.1","buildNumber":"1"}"#
        );
    }

    #[test]
    fn test_result_insert_replaces_in_place() {
        let mut result = CapabilityResult::new()
            .with_field("a", "1")
            .with_field("b", "2");
        result.insert("a", "3");

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("a"), Some("3"));
        assert_eq!(result.keys().next(), Some("a"));
    }

    #[test]
    fn test_result_rejects_non_string_values() {
        let decoded: std::result::Result<CapabilityResult, _> =
            serde_json::from_str(r#"{"buildNumber": 1}"#);
        assert!(decoded.is_err());
    }

    #[test]
    fn test_error_display_and_detail() {
        let error = CapabilityError::new("PACKAGE_INFO_ERROR", "Failed to get package info")
            .with_detail("Package not found: com.app.finity");

        assert_eq!(
            error.to_string(),
            "PACKAGE_INFO_ERROR: Failed to get package info"
        );
        assert_eq!(
            error.detail.as_deref(),
            Some("Package not found: com.app.finity")
        );
        assert!(!error.is_unimplemented());
        assert!(CapabilityError::unimplemented("x").is_unimplemented());
    }

    #[test]
    fn test_response_is_tagged() {
        let success = CapabilityResponse::Success(CapabilityResult::new().with_field("k", "v"));
        let failure = CapabilityResponse::Error(CapabilityError::unimplemented("unknownMethod"));

        let success_json = serde_json::to_value(&success).unwrap();
        let failure_json = serde_json::to_value(&failure).unwrap();

        assert_eq!(success_json["status"], "success");
        assert_eq!(success_json["value"]["k"], "v");
        assert_eq!(failure_json["status"], "error");
        assert_eq!(failure_json["value"]["code"], "UNIMPLEMENTED");
    }

    #[test]
    fn test_response_result_conversion() {
        let response: CapabilityResponse = Err(CapabilityError::unimplemented("m")).into();
        assert!(!response.is_success());
        assert!(response.result().is_none());
        assert!(response.into_result().is_err());
    }
}
