// src/models/mod.rs
pub mod game;

pub use game::{
    Coordinate, GameRequest, GameSnapshot, InvitationRequest, InvitationResponse, LastMove,
};
