use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    models::{InvitationRequest, InvitationResponse},
    services::InvitationOutcome,
};

use super::{require_identity, AppState};

/// POST /invite
///
/// Holds the request open until the platform confirms the game or the poll
/// budget runs out. The wait runs on its own task and keeps going if the
/// caller disconnects.
pub async fn invite(
    State(state): State<AppState>,
    Json(req): Json<InvitationRequest>,
) -> Result<Json<InvitationResponse>> {
    let inviter = require_identity("inviter", &req.inviter)?.to_string();
    let invitee = require_identity("invitee", &req.invitee)?.to_string();

    let coordinator = state.invitations.clone();
    let task_invitee = invitee.clone();
    let outcome = tokio::spawn(async move {
        coordinator
            .send_and_await_confirmation(&inviter, &task_invitee)
            .await
    })
    .await
    .map_err(|e| AppError::Internal(format!("Invitation task failed: {}", e)))??;

    match outcome {
        InvitationOutcome::Confirmed { game_id } => Ok(Json(InvitationResponse { game_id })),
        InvitationOutcome::TimedOut { attempts } => {
            tracing::debug!("Invitation for {} gave up after {} polls", invitee, attempts);
            Err(AppError::InvitationTimeout {
                invitee,
                waited_secs: state.invitations.policy().budget().as_secs(),
            })
        }
    }
}
