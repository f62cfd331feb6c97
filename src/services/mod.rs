// All service modules
pub mod board;
pub mod game_snapshot;
pub mod identity_registry;
pub mod invitation;
pub mod session_client;

// Re-export for convenience
pub use identity_registry::IdentityRegistry;
pub use invitation::{InvitationCoordinator, InvitationOutcome, InvitePolicy};
