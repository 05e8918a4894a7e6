use thiserror::Error;

/// Code returned when no handler is registered for a method.
pub const UNIMPLEMENTED: &str = "UNIMPLEMENTED";

/// Code returned when the host package lookup fails.
pub const PACKAGE_INFO_ERROR: &str = "PACKAGE_INFO_ERROR";

/// Code returned when a handler panicked and the fault was contained.
pub const HANDLER_FAULT: &str = "HANDLER_FAULT";

/// Code returned to a managed caller that received an undecodable reply.
pub const CODEC_ERROR: &str = "CODEC_ERROR";

/// Infrastructure errors raised while wiring or transporting calls.
///
/// These never describe the outcome of a capability call; call outcomes are
/// [`CapabilityError`](crate::types::CapabilityError) values.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Method name must not be empty")]
    EmptyMethodName,

    #[error("Invalid channel name '{name}': {reason}")]
    InvalidChannelName { name: String, reason: String },

    #[error("Handler already registered for method: {0}")]
    DuplicateHandler(String),

    #[error("Channel already registered: {0}")]
    DuplicateChannel(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
