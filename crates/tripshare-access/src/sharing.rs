//! Public read-only share links.
//!
//! A trip has at most one token. Disabling sharing keeps it, so turning sharing back on
//! revives the same link; only rotation mints a replacement.

use tracing::{info, instrument, warn};
use tripshare_storage::{Store, StoreError, TravelItem, Trip, TripId, UserId};

use crate::{tokens, AccessError, AccessService, Requirement};

/// Sharing settings of a trip as seen by its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareState {
    pub trip_id: TripId,
    pub enabled: bool,
    /// Present only while sharing is enabled.
    pub url: Option<String>,
}

/// What an anonymous visitor of a share link gets to see.
#[derive(Clone, Debug)]
pub struct PublicTrip {
    pub trip: Trip,
    pub items: Vec<TravelItem>,
}

impl<S: Store> AccessService<S> {
    fn share_state(&self, trip: &Trip) -> ShareState {
        let url = match (&trip.share_token, trip.is_publicly_shared) {
            (Some(token), true) => Some(self.links.share_url(token)),
            _ => None,
        };
        ShareState {
            trip_id: trip.id.clone(),
            enabled: trip.is_publicly_shared,
            url,
        }
    }

    pub async fn sharing_status(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<ShareState, AccessError> {
        let trip = self.authorize(trip_id, caller, Requirement::Owner).await?;
        Ok(self.share_state(&trip))
    }

    /// Turn the public link on, minting a token only if the trip never had one. Owner only.
    #[instrument(skip(self))]
    pub async fn enable_sharing(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<ShareState, AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;

        // The store keeps an existing token, so a candidate only matters on first enable.
        let trip = self
            .with_fresh_token(trip_id, |token| async move {
                self.store.enable_sharing(trip_id, &token).await
            })
            .await?;
        info!(trip_id = %trip_id, "public sharing enabled");
        Ok(self.share_state(&trip))
    }

    /// Turn the public link off. The token is kept. Owner only.
    #[instrument(skip(self))]
    pub async fn disable_sharing(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<ShareState, AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;

        let trip = self.store.disable_sharing(trip_id).await?;
        info!(trip_id = %trip_id, "public sharing disabled");
        Ok(self.share_state(&trip))
    }

    /// Replace the token so previously handed-out links stop working. The sharing flag is
    /// left as it was. Owner only.
    #[instrument(skip(self))]
    pub async fn rotate_share_token(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<ShareState, AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;

        let trip = self
            .with_fresh_token(trip_id, |token| async move {
                self.store.replace_share_token(trip_id, &token).await
            })
            .await?;
        info!(trip_id = %trip_id, "share token rotated");
        Ok(self.share_state(&trip))
    }

    /// Resolve an anonymous share link. A disabled link looks exactly like an unknown one.
    pub async fn resolve_public_trip(&self, token: &str) -> Result<PublicTrip, AccessError> {
        if token.is_empty() {
            return Err(AccessError::NotFound);
        }
        let trip = self.store.get_shared_trip(token).await?;
        let items = self.store.list_travel_items(&trip.id).await?;
        Ok(PublicTrip { trip, items })
    }

    /// Run `write` with freshly generated tokens until the store accepts one, up to the
    /// configured number of attempts.
    async fn with_fresh_token<F, Fut>(
        &self,
        trip_id: &TripId,
        write: F,
    ) -> Result<Trip, AccessError>
    where
        F: Fn(String) -> Fut,
        Fut: std::future::Future<Output = Result<Trip, StoreError>>,
    {
        let attempts = self.config.share_token_attempts.max(1);
        for attempt in 1..=attempts {
            let token = tokens::share_token();
            match write(token).await {
                Ok(trip) => return Ok(trip),
                Err(StoreError::AlreadyExists) => {
                    warn!(trip_id = %trip_id, attempt, "share token collision");
                }
                Err(e) => return Err(e.into()),
            }
        }
        warn!(trip_id = %trip_id, attempts, "gave up generating a unique share token");
        Err(AccessError::Conflict)
    }
}
