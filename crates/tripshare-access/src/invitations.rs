//! Invitation lifecycle: issue, look up, redeem, revoke.
//!
//! Status (active, expired, exhausted) is evaluated against the clock on every read and
//! never stored. Revoking deletes the row.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};
use tripshare_storage::{
    CreateInvitationParams, Invitation, InvitationId, InvitationStatus, MemberRole, Membership,
    RedeemInvitationParams, Store, StoreError, TripId, UserId,
};

use crate::{tokens, AccessError, AccessService, EffectiveRole, Notice, Requirement};

/// Options for a new invitation link.
#[derive(Clone, Debug)]
pub struct NewInvitation {
    pub role: MemberRole,
    /// `None` falls back to the configured default, which may itself be "never".
    pub expires_in_days: Option<u32>,
    /// `None` means unlimited.
    pub max_uses: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct IssuedInvitation {
    pub invitation: Invitation,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct InvitationView {
    pub invitation: Invitation,
    pub status: InvitationStatus,
}

#[derive(Clone, Debug)]
pub enum EmailInviteOutcome {
    /// The address belongs to a registered user, who now has the role.
    AddedDirectly { membership: Membership, notified: bool },
    /// A single-use invitation was created and (maybe) mailed.
    Invited {
        issued: IssuedInvitation,
        email_sent: bool,
    },
}

fn record_redemption(outcome: &'static str) {
    metrics::counter!("tripshare_invitation_redemptions_total", "outcome" => outcome).increment(1);
}

fn validate_email(email: &str) -> Result<&str, AccessError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(AccessError::InvalidArgument(format!(
            "invalid email address: {}",
            email
        )))
    }
}

fn expiry_after(days: u32) -> Result<DateTime<Utc>, AccessError> {
    Duration::try_days(i64::from(days))
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| AccessError::InvalidArgument("expires_in_days out of range".to_string()))
}

impl<S: Store> AccessService<S> {
    /// Issue an invitation link. Owner only.
    #[instrument(skip(self))]
    pub async fn create_invitation(
        &self,
        trip_id: &TripId,
        created_by: &UserId,
        new: &NewInvitation,
    ) -> Result<IssuedInvitation, AccessError> {
        if new.max_uses == Some(0) {
            return Err(AccessError::InvalidArgument(
                "max_uses must be positive".to_string(),
            ));
        }
        if new.expires_in_days == Some(0) {
            return Err(AccessError::InvalidArgument(
                "expires_in_days must be positive".to_string(),
            ));
        }

        self.authorize(trip_id, created_by, Requirement::Owner).await?;

        let expires_at = match new.expires_in_days.or(self.config.default_invite_days) {
            Some(days) => Some(expiry_after(days)?),
            None => None,
        };

        let invitation = match self
            .store
            .create_invitation(&CreateInvitationParams {
                trip_id: trip_id.clone(),
                code: tokens::invitation_code(),
                created_by: created_by.clone(),
                role: new.role,
                expires_at,
                max_uses: new.max_uses,
            })
            .await
        {
            Ok(invitation) => invitation,
            Err(StoreError::AlreadyExists) => {
                warn!(trip_id = %trip_id, "invitation code collision");
                return Err(AccessError::Conflict);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            trip_id = %trip_id,
            invitation_id = %invitation.id,
            role = %invitation.role,
            max_uses = ?invitation.max_uses,
            "invitation created"
        );
        let url = self.links.invitation_url(&invitation.code);
        Ok(IssuedInvitation { invitation, url })
    }

    pub async fn lookup_invitation(&self, code: &str) -> Result<Invitation, AccessError> {
        Ok(self.store.get_invitation_by_code(code).await?)
    }

    /// Redeem a code for the caller.
    ///
    /// Checks run in order: unknown code, expiry, exhaustion, caller owns the trip. The use
    /// counter and membership are then written together by one conditional store call; if
    /// another redeemer took the last use in between this returns `Exhausted` (or `Expired`
    /// when the deadline passed meanwhile).
    #[instrument(skip(self, code))]
    pub async fn redeem_invitation(
        &self,
        code: &str,
        user_id: &UserId,
    ) -> Result<Membership, AccessError> {
        let invitation = match self.store.get_invitation_by_code(code).await {
            Ok(invitation) => invitation,
            Err(StoreError::NotFound) => {
                record_redemption("not_found");
                return Err(AccessError::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        self.precheck_redemption(&invitation, user_id).await?;

        let redeemed = self
            .store
            .redeem_invitation(&RedeemInvitationParams {
                invitation_id: invitation.id.clone(),
                user_id: user_id.clone(),
                now: Utc::now(),
            })
            .await;

        match redeemed {
            Ok(membership) => {
                record_redemption("redeemed");
                info!(
                    trip_id = %membership.trip_id,
                    user_id = %user_id,
                    invitation_id = %invitation.id,
                    role = %membership.role,
                    "invitation redeemed"
                );
                Ok(membership)
            }
            Err(StoreError::Conflict) => Err(self.lost_race(&invitation.id).await),
            Err(e) => Err(e.into()),
        }
    }

    async fn precheck_redemption(
        &self,
        invitation: &Invitation,
        user_id: &UserId,
    ) -> Result<(), AccessError> {
        match invitation.status_at(Utc::now()) {
            InvitationStatus::Expired => {
                record_redemption("expired");
                return Err(AccessError::Expired);
            }
            InvitationStatus::Exhausted => {
                record_redemption("exhausted");
                return Err(AccessError::Exhausted);
            }
            InvitationStatus::Active => {}
        }

        let trip = self.store.get_trip(&invitation.trip_id).await?;
        if trip.is_owned_by(user_id) {
            record_redemption("already_member");
            return Err(AccessError::AlreadyMember);
        }
        Ok(())
    }

    /// Explain why the conditional claim matched nothing.
    async fn lost_race(&self, invitation_id: &InvitationId) -> AccessError {
        let current = match self.store.get_invitation(invitation_id).await {
            Ok(current) => current,
            Err(e) => return e.into(),
        };
        let error = match current.status_at(Utc::now()) {
            InvitationStatus::Expired => AccessError::Expired,
            InvitationStatus::Exhausted => AccessError::Exhausted,
            InvitationStatus::Active => AccessError::Conflict,
        };
        record_redemption(match error {
            AccessError::Expired => "expired",
            AccessError::Exhausted => "exhausted",
            _ => "conflict",
        });
        info!(invitation_id = %invitation_id, error = %error, "redemption lost a race");
        error
    }

    /// Revoke an invitation. Allowed for the trip owner and the invitation's creator.
    #[instrument(skip(self))]
    pub async fn delete_invitation(
        &self,
        invitation_id: &InvitationId,
        caller: &UserId,
    ) -> Result<(), AccessError> {
        let invitation = self.store.get_invitation(invitation_id).await?;
        if invitation.created_by != *caller {
            let trip = self.store.get_trip(&invitation.trip_id).await?;
            if !trip.is_owned_by(caller) {
                return Err(AccessError::Forbidden);
            }
        }

        self.store.delete_invitation(invitation_id).await?;
        info!(trip_id = %invitation.trip_id, invitation_id = %invitation_id, "invitation revoked");
        Ok(())
    }

    /// All invitations of a trip with their evaluated status, newest first. Owner only.
    pub async fn list_invitations(
        &self,
        trip_id: &TripId,
        caller: &UserId,
    ) -> Result<Vec<InvitationView>, AccessError> {
        self.authorize(trip_id, caller, Requirement::Owner).await?;

        let now = Utc::now();
        let invitations = self.store.list_invitations(trip_id).await?;
        Ok(invitations
            .into_iter()
            .map(|invitation| InvitationView {
                status: invitation.status_at(now),
                invitation,
            })
            .collect())
    }

    /// Invite someone by email address. Owner only.
    ///
    /// A registered user with no access yet is added straight away. Anyone else gets a
    /// single-use link by email. Email failures only show up in the outcome.
    #[instrument(skip(self, email))]
    pub async fn invite_by_email(
        &self,
        trip_id: &TripId,
        caller: &UserId,
        email: &str,
        role: MemberRole,
        expires_in_days: Option<u32>,
    ) -> Result<EmailInviteOutcome, AccessError> {
        let email = validate_email(email)?;
        let trip = self.authorize(trip_id, caller, Requirement::Owner).await?;
        let inviter_name = self.display_name(caller).await?;

        let existing = match self.store.get_user_by_email(email).await {
            Ok(user) => Some(user),
            Err(StoreError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        if let Some(user) = existing {
            if self.role_in(&trip, &user.id).await? == EffectiveRole::None {
                let membership = self
                    .add_or_update_member(trip_id, &user.id, role, caller)
                    .await?;
                let notified = self
                    .deliver(
                        email,
                        Notice::AddedToTrip {
                            trip_name: trip.name.clone(),
                            inviter_name,
                            role,
                        },
                    )
                    .await;
                return Ok(EmailInviteOutcome::AddedDirectly {
                    membership,
                    notified,
                });
            }
        }

        let issued = self
            .create_invitation(
                trip_id,
                caller,
                &NewInvitation {
                    role,
                    expires_in_days,
                    max_uses: Some(1),
                },
            )
            .await?;
        let email_sent = self
            .deliver(
                email,
                Notice::Invitation {
                    trip_name: trip.name.clone(),
                    inviter_name,
                    role,
                    url: issued.url.clone(),
                    expires_at: issued.invitation.expires_at,
                },
            )
            .await;
        Ok(EmailInviteOutcome::Invited { issued, email_sent })
    }

    async fn display_name(&self, user_id: &UserId) -> Result<String, AccessError> {
        match self.store.get_user_by_id(user_id).await {
            Ok(user) => Ok(user.display_name()),
            Err(StoreError::NotFound) => Ok("A tripshare user".to_string()),
            Err(e) => Err(e.into()),
        }
    }

    /// Send a notice within the configured timeout. Returns whether it went out.
    async fn deliver(&self, to: &str, notice: Notice) -> bool {
        match tokio::time::timeout(self.config.io_timeout, self.notifier.send(to, &notice)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "notification delivery failed");
                false
            }
            Err(_) => {
                warn!(timeout = ?self.config.io_timeout, "notification delivery timed out");
                false
            }
        }
    }
}
