//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the access-control core depends on.
///
/// Backends must enforce uniqueness of `Invitation.code` and `Trip.share_token` and report a
/// violation as [`StoreError::AlreadyExists`]. Nothing here may assume a single writer.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Create a new user. Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError>;

    /// Get user by ID.
    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email (case-insensitive).
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    // ───────────────────────────────────── Trips ──────────────────────────────────────────

    /// Create a trip owned by `params.owner_id`.
    async fn create_trip(&self, params: &CreateTripParams) -> Result<Trip, StoreError>;

    /// Get trip by ID.
    async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, StoreError>;

    /// List trips the user owns or holds a membership on.
    async fn list_trips_for_user(&self, user_id: &UserId) -> Result<Vec<Trip>, StoreError>;

    /// Delete a trip together with its memberships, invitations, items and documents.
    async fn delete_trip(&self, trip_id: &TripId) -> Result<(), StoreError>;

    // ───────────────────────────────────── Sharing ────────────────────────────────────────

    /// Turn public sharing on. `candidate_token` is only stored when the trip has no token
    /// yet; an existing token is kept. Returns the updated trip.
    async fn enable_sharing(
        &self,
        trip_id: &TripId,
        candidate_token: &str,
    ) -> Result<Trip, StoreError>;

    /// Turn public sharing off, keeping the token.
    async fn disable_sharing(&self, trip_id: &TripId) -> Result<Trip, StoreError>;

    /// Replace the share token unconditionally (sharing flag untouched).
    async fn replace_share_token(&self, trip_id: &TripId, token: &str)
        -> Result<Trip, StoreError>;

    /// Get the trip whose token matches **and** whose sharing flag is on.
    async fn get_shared_trip(&self, token: &str) -> Result<Trip, StoreError>;

    // ───────────────────────────────────── Memberships ────────────────────────────────────

    /// Get a single membership row.
    async fn get_membership(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError>;

    /// Insert a membership, or overwrite `role` and `invited_by` on an existing one
    /// (`joined_at` is preserved). Fails with `Conflict` if the user owns the trip.
    async fn upsert_membership(
        &self,
        params: &UpsertMembershipParams,
    ) -> Result<Membership, StoreError>;

    /// Delete a membership. Returns whether a row was removed.
    async fn delete_membership(&self, trip_id: &TripId, user_id: &UserId)
        -> Result<bool, StoreError>;

    /// List memberships of a trip ordered by `joined_at` ascending.
    async fn list_memberships(&self, trip_id: &TripId) -> Result<Vec<Membership>, StoreError>;

    // ───────────────────────────────────── Invitations ────────────────────────────────────

    /// Create an invitation. Fails with `AlreadyExists` when the code collides.
    async fn create_invitation(
        &self,
        params: &CreateInvitationParams,
    ) -> Result<Invitation, StoreError>;

    /// Get invitation by ID.
    async fn get_invitation(&self, invitation_id: &InvitationId)
        -> Result<Invitation, StoreError>;

    /// Get invitation by its redeemable code.
    async fn get_invitation_by_code(&self, code: &str) -> Result<Invitation, StoreError>;

    /// List all invitations of a trip, newest first.
    async fn list_invitations(&self, trip_id: &TripId) -> Result<Vec<Invitation>, StoreError>;

    /// Delete (revoke) an invitation.
    async fn delete_invitation(&self, invitation_id: &InvitationId) -> Result<(), StoreError>;

    /// Atomically claim one use of an invitation and upsert the redeemer's membership.
    ///
    /// The claim is a conditional increment that only matches while the invitation is
    /// unexpired at `params.now` and below `max_uses`; when it matches nothing the call fails
    /// with `Conflict` and no membership is written.
    async fn redeem_invitation(
        &self,
        params: &RedeemInvitationParams,
    ) -> Result<Membership, StoreError>;

    // ───────────────────────────────────── Travel items ───────────────────────────────────

    /// Create a travel item within a trip.
    async fn create_travel_item(
        &self,
        params: &CreateTravelItemParams,
    ) -> Result<TravelItem, StoreError>;

    /// Get a travel item by ID.
    async fn get_travel_item(&self, item_id: &TravelItemId) -> Result<TravelItem, StoreError>;

    /// List travel items of a trip ordered by start time (undated last).
    async fn list_travel_items(&self, trip_id: &TripId) -> Result<Vec<TravelItem>, StoreError>;

    /// Delete a travel item.
    async fn delete_travel_item(&self, item_id: &TravelItemId) -> Result<(), StoreError>;

    // ───────────────────────────────────── Documents ──────────────────────────────────────

    /// Create document metadata within a trip.
    async fn create_document(&self, params: &CreateDocumentParams)
        -> Result<Document, StoreError>;

    /// Get a document by ID.
    async fn get_document(&self, document_id: &DocumentId) -> Result<Document, StoreError>;

    /// List documents of a trip.
    async fn list_documents(&self, trip_id: &TripId) -> Result<Vec<Document>, StoreError>;

    /// Delete a document.
    async fn delete_document(&self, document_id: &DocumentId) -> Result<(), StoreError>;
}
