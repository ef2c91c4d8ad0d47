//! Outbound notices. Delivery is best effort: a failure is reported to the caller of the
//! triggering operation but never undoes it.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tripshare_storage::MemberRole;

#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// What happened, for the notifier to render into a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A link to join a trip, sent to someone who has to redeem it.
    Invitation {
        trip_name: String,
        inviter_name: String,
        role: MemberRole,
        url: String,
        expires_at: Option<DateTime<Utc>>,
    },
    /// The recipient was granted access directly.
    AddedToTrip {
        trip_name: String,
        inviter_name: String,
        role: MemberRole,
    },
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, notice: &Notice) -> Result<(), NotifyError>;
}

/// Used when no delivery channel is configured; every send fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledNotifier;

#[async_trait::async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _to: &str, _notice: &Notice) -> Result<(), NotifyError> {
        Err(NotifyError("email delivery is not configured".to_string()))
    }
}
