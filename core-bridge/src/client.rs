//! Managed-side method channel client.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::JsonMethodCodec;
use crate::error::{CODEC_ERROR, UNIMPLEMENTED};
use crate::messenger::BinaryMessenger;
use crate::types::{CapabilityError, CapabilityRequest, CapabilityResponse};

/// Issues calls from the managed runtime to the host over a messenger.
///
/// The client only knows the channel name. If no host channel is registered
/// under that exact name, calls come back as `UNIMPLEMENTED` and the caller
/// falls back to its own default path.
#[derive(Debug, Clone)]
pub struct MethodChannelClient {
    channel: String,
    messenger: Arc<BinaryMessenger>,
    codec: JsonMethodCodec,
}

impl MethodChannelClient {
    pub fn new(channel: impl Into<String>, messenger: Arc<BinaryMessenger>) -> Self {
        Self {
            channel: channel.into(),
            messenger,
            codec: JsonMethodCodec,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn invoke(&self, method: &str) -> CapabilityResponse {
        self.invoke_with_arguments(method, Value::Null)
    }

    pub fn invoke_with_arguments(&self, method: &str, arguments: Value) -> CapabilityResponse {
        let request = match CapabilityRequest::new(method) {
            Ok(request) => request.with_arguments(arguments),
            Err(_) => return CapabilityResponse::Error(CapabilityError::unimplemented(method)),
        };

        let payload = match self.codec.encode_method_call(&request) {
            Ok(payload) => payload,
            Err(err) => {
                return CapabilityResponse::Error(
                    CapabilityError::new(CODEC_ERROR, "Failed to encode method call")
                        .with_detail(err.to_string()),
                )
            }
        };

        debug!(channel = %self.channel, method, "Sending method call");

        let Some(reply) = self.messenger.send(&self.channel, &payload) else {
            warn!(channel = %self.channel, method, "No host channel answered");
            return CapabilityResponse::Error(CapabilityError::new(
                UNIMPLEMENTED,
                format!(
                    "No implementation found for method {} on channel {}",
                    method, self.channel
                ),
            ));
        };

        self.codec.decode_envelope(&reply).unwrap_or_else(|err| {
            warn!(channel = %self.channel, method, error = %err, "Undecodable reply");
            CapabilityResponse::Error(
                CapabilityError::new(CODEC_ERROR, "Failed to decode reply")
                    .with_detail(err.to_string()),
            )
        })
    }
}
