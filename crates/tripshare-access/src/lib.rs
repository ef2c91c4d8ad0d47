//! Access control and collaboration for tripshare trips.
//!
//! Every decision goes through [`AccessService`]: the role resolver computes a caller's
//! [`EffectiveRole`] on a trip, the policy guards turn that into allow/deny, and the
//! membership, invitation and sharing operations grant access on top of it. Identity is
//! always an explicit [`UserId`] argument supplied by the caller's authenticator.

use std::sync::Arc;
use std::time::Duration;

use tripshare_storage::Store;

mod error;
mod invitations;
mod links;
mod membership;
mod notify;
mod policy;
mod resolver;
mod sharing;
pub mod tokens;
mod trips;

pub use error::AccessError;
pub use invitations::{EmailInviteOutcome, InvitationView, IssuedInvitation, NewInvitation};
pub use links::{BaseUrlLinks, LinkBuilder, LinkError};
pub use membership::Member;
pub use notify::{DisabledNotifier, Notice, Notifier, NotifyError};
pub use policy::Requirement;
pub use resolver::EffectiveRole;
pub use sharing::{PublicTrip, ShareState};
pub use trips::TripSummary;

/// Tunables for [`AccessService`].
#[derive(Clone, Debug)]
pub struct AccessConfig {
    /// How many fresh share tokens to try before giving up with `Conflict`.
    pub share_token_attempts: u32,
    /// Lifetime applied to invitations created without an explicit expiry.
    pub default_invite_days: Option<u32>,
    /// Upper bound on a single notification delivery.
    pub io_timeout: Duration,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            share_token_attempts: 5,
            default_invite_days: None,
            io_timeout: Duration::from_secs(10),
        }
    }
}

pub struct AccessService<S> {
    store: Arc<S>,
    links: Arc<dyn LinkBuilder>,
    notifier: Arc<dyn Notifier>,
    config: AccessConfig,
}

impl<S> Clone for AccessService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            links: self.links.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: Store> AccessService<S> {
    pub fn new(
        store: Arc<S>,
        links: Arc<dyn LinkBuilder>,
        notifier: Arc<dyn Notifier>,
        config: AccessConfig,
    ) -> Self {
        Self {
            store,
            links,
            notifier,
            config,
        }
    }

    /// The underlying store, for callers that need raw reads (health checks, admin tools).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }
}
