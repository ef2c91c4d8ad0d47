//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use std::fmt;

use uuid::Uuid;

/// User identifier, issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

/// Trip identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TripId(pub Uuid);

/// Invitation identifier (not the redeemable code).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvitationId(pub Uuid);

/// Travel item identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TravelItemId(pub Uuid);

/// Document identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(pub Uuid);

macro_rules! impl_display {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        )*
    };
}

impl_display!(UserId, TripId, InvitationId, TravelItemId, DocumentId);
