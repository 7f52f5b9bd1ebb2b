use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid program id {id}: {reason}")]
    InvalidProgramId { id: String, reason: String },

    #[error("Account data is not a {account} account")]
    AccountDiscriminator { account: &'static str },

    #[error("Failed to deserialize {account}: {reason}")]
    Deserialize { account: &'static str, reason: String },

    #[error("No {event} observed within {waited:?}")]
    EventTimeout { event: &'static str, waited: Duration },

    #[error("Listener for {event} closed before an event arrived")]
    ListenerClosed { event: &'static str },

    #[error("Failed to read keypair {path}: {reason}")]
    Keypair { path: String, reason: String },

    #[cfg(feature = "rpc")]
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[cfg(feature = "rpc")]
    #[error("Subscription error: {0}")]
    Pubsub(#[from] solana_client::nonblocking::pubsub_client::PubsubClientError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
