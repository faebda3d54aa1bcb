//! The map search screen.
//!
//! [`MapSearchView`] ties the location bootstrap, the visible region, the
//! developer registry, the HTTP search and the realtime subscription
//! together. A front-end drives it with user events and draws whatever
//! [`MapSearchView::render`] returns.
//!
//! # Flow
//!
//! ```text
//! mount() ──► LocationProvider ──► RegionState (seeded once)
//!
//! search() ──► SearchApi ──► DevRegistry::replace_all
//!                  └──► SubscriptionManager: close() then open(scope)
//!
//! next_realtime() / drain_realtime() ──► handle_realtime() ──► DevRegistry::append
//! ```
//!
//! Every suspended operation races the view's [`CancellationToken`], so
//! [`unmount`](MapSearchView::unmount) (or cancelling a cloned token from
//! another task) abandons in-flight work instead of applying it late.

mod error;
mod options;
mod scene;

pub use error::ViewError;
pub use options::{ScopePolicy, ViewOptions, DEFAULT_EVENT_BUFFER};
pub use scene::{Callout, MapScene, Marker, Navigation};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::location::{Geolocation, LocationProvider};
use crate::realtime::{RealtimeChannel, RealtimeEvent, SubscriptionManager, SubscriptionScope};
use crate::region::{Region, RegionState};
use crate::registry::DevRegistry;
use crate::search::{SearchApi, SearchQuery};

/// State and orchestration of the map search screen.
pub struct MapSearchView<G, S, C: RealtimeChannel> {
    location: LocationProvider<G>,
    search_api: S,
    subscriptions: SubscriptionManager<C>,
    events_rx: mpsc::Receiver<RealtimeEvent>,
    region: RegionState,
    registry: DevRegistry,
    query: String,
    scope_policy: ScopePolicy,
    lifetime: CancellationToken,
    last_error: Option<ViewError>,
}

impl<G, S, C> MapSearchView<G, S, C>
where
    G: Geolocation,
    S: SearchApi,
    C: RealtimeChannel,
{
    pub fn new(
        location: LocationProvider<G>,
        search_api: S,
        channel: C,
        options: ViewOptions,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(options.event_buffer.max(1));
        Self {
            location,
            search_api,
            subscriptions: SubscriptionManager::new(channel, events_tx),
            events_rx,
            region: RegionState::new(),
            registry: DevRegistry::with_policy(options.append_policy),
            query: String::new(),
            scope_policy: options.scope_policy,
            lifetime: CancellationToken::new(),
            last_error: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Runs the one-shot location bootstrap.
    ///
    /// Returns true if the region was seeded. Any failure leaves the view
    /// blank and is only logged.
    pub async fn mount(&mut self) -> bool {
        if self.lifetime.is_cancelled() {
            return false;
        }

        let acquired = tokio::select! {
            biased;

            _ = self.lifetime.cancelled() => {
                debug!("View unmounted during location fetch");
                return false;
            }

            result = self.location.acquire() => result,
        };

        match acquired {
            Ok(region) => match self.region.seed(region) {
                Ok(seeded) => seeded,
                Err(e) => {
                    debug!(error = %e, "Ignoring invalid initial region");
                    false
                }
            },
            Err(e) => {
                debug!(error = %e, "No initial location, view stays blank");
                false
            }
        }
    }

    /// Cancels in-flight work and closes the realtime subscription.
    pub async fn unmount(&mut self) {
        self.lifetime.cancel();
        self.subscriptions.close().await;
        info!("Map view unmounted");
    }

    pub fn is_unmounted(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Token tied to the view's lifetime. Cancelling it has the same effect
    /// on in-flight work as [`unmount`](Self::unmount), but leaves closing
    /// the subscription to a later `unmount` call.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // User input
    // ─────────────────────────────────────────────────────────────────────

    /// Records a completed pan or zoom. The region is replaced wholesale.
    pub fn on_region_changed(&mut self, region: Region) -> Result<(), ViewError> {
        self.region.on_region_changed(region)?;
        Ok(())
    }

    /// Replaces the technology filter. Read only when searching.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the search control is enabled.
    pub fn can_search(&self) -> bool {
        self.region.is_present() && !self.is_unmounted()
    }

    /// Searches at the current region and rebinds the realtime subscription.
    ///
    /// On success the registry holds exactly the returned developers and a
    /// new subscription is open for `(region.latitude, region.longitude,
    /// query)`. Returns the number of developers found.
    ///
    /// A failed request leaves the registry and the subscription untouched.
    pub async fn search(&mut self) -> Result<usize, ViewError> {
        if self.is_unmounted() {
            return Err(ViewError::Unmounted);
        }
        let region = self.region.current().ok_or(ViewError::RegionUnavailable)?;

        let query = SearchQuery::from_region(&region, &self.query);
        info!(region = %region, techs = %self.query, "Searching developers");

        let result = tokio::select! {
            biased;

            _ = self.lifetime.cancelled() => {
                debug!("View unmounted during search");
                return Err(ViewError::Unmounted);
            }

            result = self.search_api.search(&query) => result,
        };

        let devs = match result {
            Ok(devs) => devs,
            Err(e) => {
                warn!(error = %e, "Search failed, keeping current markers");
                return Err(self.record(ViewError::Search(e)));
            }
        };

        let found = devs.len();
        self.registry.replace_all(devs);

        self.subscriptions.close().await;
        let scope = SubscriptionScope::new(&region, &self.query);
        let opened = tokio::select! {
            biased;

            _ = self.lifetime.cancelled() => {
                debug!("View unmounted while opening realtime subscription");
                return Err(ViewError::Unmounted);
            }

            opened = self.subscriptions.open(scope) => opened,
        };
        if let Err(e) = opened {
            warn!(error = %e, "Realtime subscription failed");
            return Err(self.record(ViewError::Subscription(e)));
        }

        info!(found, "Search complete");
        self.last_error = None;
        Ok(found)
    }

    /// Opens the profile of the developer behind marker `key`.
    pub fn press_callout(&self, key: usize) -> Option<Navigation> {
        self.registry.get(key).map(Navigation::profile)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Realtime
    // ─────────────────────────────────────────────────────────────────────

    /// Applies one pushed developer. Returns whether the registry changed.
    pub fn handle_realtime(&mut self, event: RealtimeEvent) -> bool {
        if self.is_unmounted() {
            return false;
        }

        if self.scope_policy == ScopePolicy::ActiveOnly
            && self.subscriptions.active_id() != Some(event.subscription)
        {
            debug!(
                subscription = %event.subscription,
                github_username = %event.developer.github_username,
                "Dropping push from a closed subscription"
            );
            return false;
        }

        self.registry.append(event.developer)
    }

    /// Waits for the next pushed developer.
    ///
    /// Returns `None` once the view is unmounted. The event is not applied;
    /// pass it to [`handle_realtime`](Self::handle_realtime).
    pub async fn next_realtime(&mut self) -> Option<RealtimeEvent> {
        tokio::select! {
            biased;

            _ = self.lifetime.cancelled() => None,
            event = self.events_rx.recv() => event,
        }
    }

    /// Applies every push already queued. Returns how many changed the registry.
    pub fn drain_realtime(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_realtime(event) {
                applied += 1;
            }
        }
        applied
    }

    // ─────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────

    /// What the map draws. `None` while no region is known.
    pub fn render(&self) -> Option<MapScene> {
        let region = self.region.current()?;
        let markers = self
            .registry
            .iter()
            .enumerate()
            .map(|(key, dev)| Marker::for_developer(key, dev, &region))
            .collect();

        Some(MapScene {
            region,
            markers,
            revision: self.registry.revision(),
        })
    }

    pub fn region(&self) -> Option<Region> {
        self.region.current()
    }

    pub fn registry(&self) -> &DevRegistry {
        &self.registry
    }

    pub fn subscriptions(&self) -> &SubscriptionManager<C> {
        &self.subscriptions
    }

    /// Most recent surfaced failure, cleared by the next successful search.
    pub fn last_error(&self) -> Option<&ViewError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<ViewError> {
        self.last_error.take()
    }

    fn record(&mut self, error: ViewError) -> ViewError {
        self.last_error = Some(error.clone());
        error
    }
}
