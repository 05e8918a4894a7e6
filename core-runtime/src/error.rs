use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Channel error: {0}")]
    Channel(#[from] core_bridge::ChannelError),
}

pub type Result<T> = std::result::Result<T, Error>;
