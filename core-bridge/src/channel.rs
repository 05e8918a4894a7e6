//! Bridge channel: named endpoint that dispatches calls to handlers.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::codec::JsonMethodCodec;
use crate::error::{ChannelError, Result, CODEC_ERROR, HANDLER_FAULT};
use crate::messenger::MessageHandler;
use crate::registry::HandlerRegistry;
use crate::types::{CapabilityError, CapabilityRequest, CapabilityResponse};

/// Validated channel identifier of the form `<app-domain>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: &str| ChannelError::InvalidChannelName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        match name.split_once('/') {
            Some((domain, endpoint)) if !domain.is_empty() && !endpoint.is_empty() => {}
            _ => return Err(invalid("expected '<app-domain>/<name>'")),
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Routes named method calls to registered handlers.
///
/// The channel holds no per-call state and can be invoked reentrantly,
/// including from inside one of its own handlers. Every call resolves to
/// exactly one [`CapabilityResponse`]; handler panics are contained and
/// reported as `HANDLER_FAULT` so the channel stays usable.
#[derive(Debug)]
pub struct BridgeChannel {
    name: ChannelName,
    registry: HandlerRegistry,
    codec: JsonMethodCodec,
}

impl BridgeChannel {
    pub fn new(name: ChannelName, registry: HandlerRegistry) -> Self {
        Self {
            name,
            registry,
            codec: JsonMethodCodec,
        }
    }

    pub fn name(&self) -> &ChannelName {
        &self.name
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Invoke `method` with no arguments.
    ///
    /// An empty method name can never have a handler and resolves to
    /// `UNIMPLEMENTED`.
    pub fn invoke(&self, method: &str) -> CapabilityResponse {
        match CapabilityRequest::new(method) {
            Ok(request) => self.invoke_request(&request),
            Err(_) => CapabilityResponse::Error(CapabilityError::unimplemented(method)),
        }
    }

    /// Invoke a fully formed request.
    pub fn invoke_request(&self, request: &CapabilityRequest) -> CapabilityResponse {
        let method = request.method();
        let Some(handler) = self.registry.get(method) else {
            debug!(channel = %self.name, method, "No handler registered");
            return CapabilityResponse::Error(CapabilityError::unimplemented(method));
        };

        debug!(channel = %self.name, method, "Dispatching capability call");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(request)));
        let response = match outcome {
            Ok(outcome) => CapabilityResponse::from(outcome),
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                error!(channel = %self.name, method, detail = %detail, "Capability handler panicked");
                CapabilityResponse::Error(
                    CapabilityError::new(HANDLER_FAULT, format!("Handler for '{}' failed", method))
                        .with_detail(detail),
                )
            }
        };

        if let CapabilityResponse::Error(err) = &response {
            warn!(channel = %self.name, method, code = %err.code, "Capability call failed");
        }

        response
    }
}

impl MessageHandler for BridgeChannel {
    fn on_message(&self, payload: &[u8]) -> Bytes {
        let response = match self.codec.decode_method_call(payload) {
            Ok(request) => self.invoke_request(&request),
            Err(ChannelError::EmptyMethodName) => {
                CapabilityResponse::Error(CapabilityError::unimplemented(""))
            }
            Err(err) => {
                warn!(channel = %self.name, error = %err, "Failed to decode method call");
                CapabilityResponse::Error(
                    CapabilityError::new(CODEC_ERROR, "Malformed method call")
                        .with_detail(err.to_string()),
                )
            }
        };

        match self.codec.encode_response(&response) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(channel = %self.name, error = %err, "Failed to encode reply");
                // Plain strings always encode.
                self.codec
                    .encode_error_envelope(&CapabilityError::new(
                        CODEC_ERROR,
                        "Failed to encode reply",
                    ))
                    .unwrap_or_default()
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNIMPLEMENTED;
    use crate::handler::HandlerOutcome;
    use crate::types::CapabilityResult;
    use serde_json::json;

    fn channel_with<F>(method: &str, handler: F) -> BridgeChannel
    where
        F: Fn(&CapabilityRequest) -> HandlerOutcome + crate::handler::CapabilityHandler + 'static,
    {
        let mut registry = HandlerRegistry::new();
        registry.register_fn(method, handler).unwrap();
        BridgeChannel::new(ChannelName::new("com.test/echo").unwrap(), registry)
    }

    #[test]
    fn test_channel_name_validation() {
        assert!(ChannelName::new("com.app.finity/package_info").is_ok());
        assert!(ChannelName::new("").is_err());
        assert!(ChannelName::new("package_info").is_err());
        assert!(ChannelName::new("/package_info").is_err());
        assert!(ChannelName::new("com.app.finity/").is_err());
        assert!(ChannelName::new("com.app finity/info").is_err());
    }

    #[test]
    fn test_unregistered_method_is_unimplemented() {
        let channel = channel_with("echo", |_| Ok(CapabilityResult::new()));

        for method in ["unknownMethod", "Echo", ""] {
            let response = channel.invoke(method);
            assert_eq!(response.error().unwrap().code, UNIMPLEMENTED);
        }
    }

    #[test]
    fn test_handler_outcome_returned_unchanged() {
        let channel = channel_with("echo", |request| {
            let value = request
                .arguments()
                .and_then(|args| args.get("value"))
                .and_then(|v| v.as_str())
                .unwrap_or("none")
                .to_string();
            Ok(CapabilityResult::new().with_field("value", value))
        });

        let request = CapabilityRequest::new("echo")
            .unwrap()
            .with_arguments(json!({"value": "hi"}));
        let response = channel.invoke_request(&request);
        assert_eq!(response.result().unwrap().get("value"), Some("hi"));

        let response = channel.invoke("echo");
        assert_eq!(response.result().unwrap().get("value"), Some("none"));
    }

    #[test]
    fn test_handler_error_returned_unchanged() {
        let expected = CapabilityError::new("CUSTOM", "nope").with_detail("why");
        let returned = expected.clone();
        let channel = channel_with("fail", move |_| Err(returned.clone()));

        assert_eq!(channel.invoke("fail"), CapabilityResponse::Error(expected));
    }

    #[test]
    fn test_panicking_handler_is_contained() {
        let channel = channel_with("boom", |_| panic!("host exploded"));

        let response = channel.invoke("boom");
        let err = response.error().unwrap();
        assert_eq!(err.code, HANDLER_FAULT);
        assert_eq!(err.detail.as_deref(), Some("host exploded"));

        // Channel remains usable.
        assert_eq!(channel.invoke("boom").error().unwrap().code, HANDLER_FAULT);
        assert!(channel.invoke("other").error().unwrap().is_unimplemented());
    }

    #[test]
    fn test_on_message_round_trip() {
        let channel = channel_with("echo", |_| {
            Ok(CapabilityResult::new().with_field("reply", "pong"))
        });

        let reply = channel.on_message(br#"{"method":"echo","args":null}"#);
        assert_eq!(&reply[..], br#"[{"reply":"pong"}]"#);
    }

    #[test]
    fn test_on_message_malformed_call() {
        let channel = channel_with("echo", |_| Ok(CapabilityResult::new()));

        let reply = channel.on_message(b"{");
        let response = JsonMethodCodec.decode_envelope(&reply).unwrap();
        assert_eq!(response.error().unwrap().code, CODEC_ERROR);
    }

    #[test]
    fn test_on_message_empty_method_is_unimplemented() {
        let channel = channel_with("echo", |_| Ok(CapabilityResult::new()));

        let reply = channel.on_message(br#"{"method":""}"#);
        let response = JsonMethodCodec.decode_envelope(&reply).unwrap();
        assert_eq!(response, channel.invoke(""));
        assert!(response.error().unwrap().is_unimplemented());
    }
}
