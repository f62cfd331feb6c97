//! Session-aware wrapper around one identity's platform session.
//!
//! Every remote call goes through [`SessionClient::call`]: a `LoginRequired`
//! answer triggers exactly one forced re-login and one retry. A second
//! `LoginRequired` is surfaced as [`AppError::SessionExpired`]. Other failures
//! are never retried.
//!
//! The session handle sits behind one async mutex, so all calls for an
//! identity are serialized and a re-login can never interleave with another
//! request's call on the same handle.

use futures_util::future::BoxFuture;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, Result},
    integrations::{
        BoardType, Invitation, Notification, PlatformError, PlatformResult, PlatformSession,
        RemoteGame, RemoteUser, RuleSet,
    },
};

type SessionHandle = Box<dyn PlatformSession>;

struct SessionState {
    handle: SessionHandle,
    user: Option<RemoteUser>,
}

pub struct SessionClient {
    identity: String,
    state: Mutex<SessionState>,
}

impl SessionClient {
    pub fn new(identity: impl Into<String>, handle: SessionHandle) -> Self {
        Self {
            identity: identity.into(),
            state: Mutex::new(SessionState { handle, user: None }),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Logs in unless the session already is.
    pub async fn ensure_authenticated(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.user.is_some() {
            return Ok(());
        }
        self.reauthenticate_locked(&mut state).await
    }

    pub async fn invite(
        &self,
        counterpart: &str,
        ruleset: RuleSet,
        board_type: BoardType,
    ) -> Result<Invitation> {
        let counterpart = counterpart.to_string();
        self.call("invite", move |handle| {
            let counterpart = counterpart.clone();
            Box::pin(async move { handle.invite(&counterpart, ruleset, board_type).await })
        })
        .await
    }

    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.call("notifications", |handle| {
            Box::pin(async move { handle.notifications().await })
        })
        .await
    }

    pub async fn fetch_game(&self, game_id: i64) -> Result<RemoteGame> {
        self.call("game", move |handle| {
            Box::pin(async move { handle.game(game_id).await })
        })
        .await
    }

    async fn call<T, F>(&self, operation: &'static str, remote_call: F) -> Result<T>
    where
        F: for<'s> Fn(&'s mut SessionHandle) -> BoxFuture<'s, PlatformResult<T>>,
    {
        let mut state = self.state.lock().await;

        match remote_call(&mut state.handle).await {
            Ok(value) => return Ok(value),
            Err(PlatformError::LoginRequired) => {
                tracing::warn!(
                    "Wordfeud {} for {} needs login, re-authenticating",
                    operation,
                    self.identity
                );
            }
            Err(e) => return Err(e.into()),
        }

        self.reauthenticate_locked(&mut state).await?;

        match remote_call(&mut state.handle).await {
            Ok(value) => Ok(value),
            Err(PlatformError::LoginRequired) => {
                tracing::error!(
                    "Wordfeud {} for {} still needs login after re-authentication",
                    operation,
                    self.identity
                );
                state.user = None;
                Err(AppError::SessionExpired(self.identity.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Forced login on an already locked session, used for both the first
    /// login and the re-login inside the retry branch.
    async fn reauthenticate_locked(&self, state: &mut SessionState) -> Result<()> {
        state.user = None;
        // Bot accounts use the username as password.
        let user = state
            .handle
            .login(&self.identity, &self.identity)
            .await
            .map_err(|e| AppError::AuthenticationFailed {
                identity: self.identity.clone(),
                reason: e.to_string(),
            })?;
        tracing::info!("Logged in to Wordfeud as {} (user id {})", user.username, user.id);
        state.user = Some(user);
        Ok(())
    }
}

#[cfg(test)]
impl SessionClient {
    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.user.is_some()
    }

    /// Logs in again even if the session believes it is authenticated.
    pub async fn reauthenticate(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.reauthenticate_locked(&mut state).await
    }
}
