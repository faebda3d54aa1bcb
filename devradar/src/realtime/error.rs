//! Error types for realtime subscriptions.

use thiserror::Error;

use super::scope::SubscriptionId;

/// Errors that can occur when opening a realtime subscription.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubscriptionError {
    /// A subscription is already open; it must be closed first.
    #[error("Subscription {active} is still open")]
    AlreadyOpen { active: SubscriptionId },

    /// The configured realtime URL is not usable.
    #[error("Invalid realtime endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Connecting or handshaking with the realtime server failed.
    #[error("Failed to connect to realtime server: {0}")]
    ConnectFailed(String),
}
