//! Invite, then poll the inviter's notification feed until the platform
//! reports the new game.
//!
//! The platform gives no correlation id for an invitation. A confirmation is
//! recognised as the first `new_game` notification naming the invitee, in feed
//! order. Waiting uses `tokio::time::sleep`, so a long poll only parks its own
//! request task.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    constants::NOTIFICATION_NEW_GAME,
    error::Result,
    integrations::{BoardType, Notification, RuleSet},
};

use super::identity_registry::IdentityRegistry;

#[derive(Debug, Clone, Copy)]
pub struct InvitePolicy {
    pub ruleset: RuleSet,
    pub board_type: BoardType,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl InvitePolicy {
    /// Upper bound on how long a caller is kept waiting.
    pub fn budget(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationOutcome {
    Confirmed { game_id: i64 },
    TimedOut { attempts: u32 },
}

pub struct InvitationCoordinator {
    registry: Arc<IdentityRegistry>,
    policy: InvitePolicy,
}

impl InvitationCoordinator {
    pub fn new(registry: Arc<IdentityRegistry>, policy: InvitePolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> &InvitePolicy {
        &self.policy
    }

    pub async fn send_and_await_confirmation(
        &self,
        inviter: &str,
        invitee: &str,
    ) -> Result<InvitationOutcome> {
        let client = self.registry.resolve(inviter).await;
        client.ensure_authenticated().await?;

        let invitation = client
            .invite(invitee, self.policy.ruleset, self.policy.board_type)
            .await?;
        tracing::info!(
            "{} invited {} (invitation {:?}), waiting for new game",
            inviter,
            invitation.invitee,
            invitation.id
        );

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.poll_interval).await;
            tracing::debug!(
                "Polling notifications for {} ({}/{})",
                inviter,
                attempt,
                self.policy.max_attempts
            );

            let notifications = client.fetch_notifications().await?;
            if let Some(game_id) = find_new_game(&notifications, invitee) {
                tracing::info!("Found new game {} between {} and {}", game_id, inviter, invitee);
                return Ok(InvitationOutcome::Confirmed { game_id });
            }
        }

        tracing::warn!(
            "No new game notification for {} -> {} after {} polls",
            inviter,
            invitee,
            self.policy.max_attempts
        );
        Ok(InvitationOutcome::TimedOut {
            attempts: self.policy.max_attempts,
        })
    }
}

/// First `new_game` notification for `invitee`, in feed order.
fn find_new_game(notifications: &[Notification], invitee: &str) -> Option<i64> {
    notifications
        .iter()
        .filter(|n| n.kind == NOTIFICATION_NEW_GAME && n.counterpart_username == invitee)
        .find_map(|n| n.game_id)
}
