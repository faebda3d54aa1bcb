//! Realtime channel traits.
//!
//! [`RealtimeChannel`] abstracts the transport so the subscription manager
//! can be driven by an in-memory channel in tests.

use std::future::Future;

use tokio::sync::mpsc;

use super::error::SubscriptionError;
use super::scope::{RealtimeEvent, SubscriptionId, SubscriptionScope};

/// Transport able to open scoped realtime connections.
pub trait RealtimeChannel: Send + Sync {
    /// Connection handle returned by [`connect`](Self::connect).
    type Connection: RealtimeConnection;

    /// Opens a connection scoped to `scope`.
    ///
    /// Every developer received on the connection must be forwarded to
    /// `events`, tagged with `id`, until the connection is closed.
    fn connect(
        &self,
        scope: &SubscriptionScope,
        id: SubscriptionId,
        events: mpsc::Sender<RealtimeEvent>,
    ) -> impl Future<Output = Result<Self::Connection, SubscriptionError>> + Send;
}

/// An open realtime connection.
pub trait RealtimeConnection: Send {
    /// Closes the connection. No event is forwarded after this returns.
    fn close(self) -> impl Future<Output = ()> + Send;
}
