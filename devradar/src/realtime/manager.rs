//! Owner of the single live realtime subscription.
//!
//! [`SubscriptionManager`] is the only place a connection is opened or
//! closed. It refuses a second `open` while a connection is live, so the
//! at-most-one-open invariant holds by construction rather than by calling
//! convention.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::channel::{RealtimeChannel, RealtimeConnection};
use super::error::SubscriptionError;
use super::scope::{RealtimeEvent, SubscriptionId, SubscriptionScope};

/// The currently open subscription.
struct ActiveSubscription<T> {
    id: SubscriptionId,
    scope: SubscriptionScope,
    connection: T,
}

/// Manages at most one open realtime connection.
pub struct SubscriptionManager<C: RealtimeChannel> {
    /// Transport used to open connections.
    channel: C,

    /// Sender cloned into every connection.
    events_tx: mpsc::Sender<RealtimeEvent>,

    /// The open subscription, if any.
    active: Option<ActiveSubscription<C::Connection>>,

    /// Next id to hand out.
    next_id: u64,

    /// Number of successful opens.
    opens: u64,

    /// Number of teardown requests, including those with nothing open.
    teardowns: u64,
}

impl<C: RealtimeChannel> SubscriptionManager<C> {
    /// Creates a manager forwarding events of every connection to `events_tx`.
    pub fn new(channel: C, events_tx: mpsc::Sender<RealtimeEvent>) -> Self {
        Self {
            channel,
            events_tx,
            active: None,
            next_id: 1,
            opens: 0,
            teardowns: 0,
        }
    }

    /// Opens a subscription for `scope`.
    ///
    /// Fails with [`SubscriptionError::AlreadyOpen`] while another
    /// subscription is live; call [`close`](Self::close) first.
    pub async fn open(
        &mut self,
        scope: SubscriptionScope,
    ) -> Result<SubscriptionId, SubscriptionError> {
        if let Some(active) = &self.active {
            return Err(SubscriptionError::AlreadyOpen { active: active.id });
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let connection = self
            .channel
            .connect(&scope, id, self.events_tx.clone())
            .await?;

        info!(subscription = %id, scope = %scope, "Realtime subscription opened");
        self.opens += 1;
        self.active = Some(ActiveSubscription {
            id,
            scope,
            connection,
        });
        Ok(id)
    }

    /// Closes the open subscription, if any.
    ///
    /// Idempotent: closing with nothing open is a no-op. Returns true if a
    /// connection was actually closed.
    pub async fn close(&mut self) -> bool {
        self.teardowns += 1;
        match self.active.take() {
            Some(active) => {
                active.connection.close().await;
                info!(subscription = %active.id, "Realtime subscription closed");
                true
            }
            None => {
                debug!("No realtime subscription to close");
                false
            }
        }
    }

    /// Id and scope of the open subscription.
    pub fn active(&self) -> Option<(SubscriptionId, &SubscriptionScope)> {
        self.active.as_ref().map(|a| (a.id, &a.scope))
    }

    /// Id of the open subscription.
    pub fn active_id(&self) -> Option<SubscriptionId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Number of subscriptions successfully opened so far.
    pub fn opens(&self) -> u64 {
        self.opens
    }

    /// Number of [`close`](Self::close) calls so far.
    pub fn teardowns(&self) -> u64 {
        self.teardowns
    }
}
