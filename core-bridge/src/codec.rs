//! JSON method codec.
//!
//! Wire format shared by the managed runtime and the host:
//!
//! - method call: `{"method": "<name>", "args": <value or null>}`
//! - success envelope: `[<result map>]`
//! - error envelope: `[<code>, <message>, <detail or null>]`
//!
//! Envelope arity distinguishes the two reply shapes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChannelError, Result};
use crate::types::{CapabilityError, CapabilityRequest, CapabilityResponse, CapabilityResult};

#[derive(Serialize)]
struct WireCallRef<'a> {
    method: &'a str,
    args: Option<&'a Value>,
}

#[derive(Deserialize)]
struct WireCall {
    method: String,
    #[serde(default)]
    args: Value,
}

/// Encodes calls and replies as UTF-8 JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl JsonMethodCodec {
    pub fn encode_method_call(&self, request: &CapabilityRequest) -> Result<Bytes> {
        let wire = WireCallRef {
            method: request.method(),
            args: request.arguments(),
        };
        Ok(Bytes::from(serde_json::to_vec(&wire)?))
    }

    pub fn decode_method_call(&self, payload: &[u8]) -> Result<CapabilityRequest> {
        let wire: WireCall = serde_json::from_slice(payload)?;
        Ok(CapabilityRequest::new(wire.method)?.with_arguments(wire.args))
    }

    pub fn encode_success_envelope(&self, result: &CapabilityResult) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(&[result])?))
    }

    pub fn encode_error_envelope(&self, error: &CapabilityError) -> Result<Bytes> {
        let envelope = (&error.code, &error.message, &error.detail);
        Ok(Bytes::from(serde_json::to_vec(&envelope)?))
    }

    pub fn encode_response(&self, response: &CapabilityResponse) -> Result<Bytes> {
        match response {
            CapabilityResponse::Success(result) => self.encode_success_envelope(result),
            CapabilityResponse::Error(error) => self.encode_error_envelope(error),
        }
    }

    pub fn decode_envelope(&self, payload: &[u8]) -> Result<CapabilityResponse> {
        let value: Value = serde_json::from_slice(payload)?;
        let Value::Array(mut items) = value else {
            return Err(ChannelError::Codec("Envelope must be a JSON array".to_string()));
        };

        match items.len() {
            1 => {
                let result = serde_json::from_value(items.remove(0))?;
                Ok(CapabilityResponse::Success(result))
            }
            3 => {
                let detail = items.pop().unwrap_or(Value::Null);
                let message = items.pop().unwrap_or(Value::Null);
                let code = items.pop().unwrap_or(Value::Null);

                let Value::String(code) = code else {
                    return Err(ChannelError::Codec(
                        "Error envelope code must be a string".to_string(),
                    ));
                };
                let message = match message {
                    Value::String(message) => message,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };

                let mut error = CapabilityError::new(code, message);
                match detail {
                    Value::Null => {}
                    Value::String(detail) => error = error.with_detail(detail),
                    other => error = error.with_detail(other.to_string()),
                }
                Ok(CapabilityResponse::Error(error))
            }
            n => Err(ChannelError::Codec(format!(
                "Envelope must have 1 or 3 elements, got {}",
                n
            ))),
        }
    }
}
