//! Realtime subscription to newly registered developers.
//!
//! A subscription is scoped to a (latitude, longitude, techs) triple. The
//! backend pushes every new developer matching that scope to the open
//! connection.
//!
//! # Architecture
//!
//! ```text
//! SubscriptionManager (at most one open connection)
//!     │
//!     ├── RealtimeChannel trait → WebSocketChannel (tokio-tungstenite)
//!     │       │
//!     │       └── reader task: {"event":"new-dev","data":{...}} frames
//!     │
//!     └── mpsc::Sender<RealtimeEvent>  (shared by every connection)
//!             │
//!             └── MapSearchView::handle_realtime()
//! ```
//!
//! Every event carries the [`SubscriptionId`] it was received under, so a
//! consumer can tell a push from the current subscription apart from one
//! that was already queued when the previous subscription closed.

mod channel;
mod error;
mod manager;
mod scope;
mod websocket;

pub use channel::{RealtimeChannel, RealtimeConnection};
pub use error::SubscriptionError;
pub use manager::SubscriptionManager;
pub use scope::{RealtimeEvent, SubscriptionId, SubscriptionScope};
pub use websocket::{WebSocketChannel, WebSocketConnection, NEW_DEV_EVENT};
