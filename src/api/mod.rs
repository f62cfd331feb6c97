// src/api/mod.rs

pub mod game;
pub mod health;
pub mod invite;

use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::integrations::PlatformConnector;
use crate::services::{IdentityRegistry, InvitationCoordinator};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<IdentityRegistry>,
    pub invitations: Arc<InvitationCoordinator>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, connector: Arc<dyn PlatformConnector>) -> anyhow::Result<Self> {
        let registry = Arc::new(IdentityRegistry::new(connector));
        let invitations = Arc::new(InvitationCoordinator::new(
            registry.clone(),
            config.invite_policy()?,
        ));
        Ok(Self {
            registry,
            invitations,
            config,
        })
    }
}

/// Identities double as login names, so blank ones are rejected up front.
pub fn require_identity<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed)
}
