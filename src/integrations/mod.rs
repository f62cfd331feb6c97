//! Boundary to the remote game platform.
//!
//! A [`PlatformConnector`] hands out one [`PlatformSession`] per identity. The
//! session owns whatever the platform needs to stay logged in (a cookie for
//! Wordfeud) and is only ever driven by the `SessionClient` that owns it.

pub mod wordfeud;

pub use wordfeud::WordfeudConnector;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform no longer recognises the session.
    #[error("login required")]
    LoginRequired,

    #[error("platform rejected request ({kind}): {message}")]
    Rejected { kind: String, message: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Ruleset (dictionary and tile distribution) of a Wordfeud game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    American,
    Norwegian,
    Dutch,
    Danish,
    Swedish,
    English,
    Spanish,
    French,
}

impl RuleSet {
    /// Numeric id the platform uses on the wire.
    pub fn wire_id(self) -> u8 {
        match self {
            RuleSet::American => 0,
            RuleSet::Norwegian => 1,
            RuleSet::Dutch => 2,
            RuleSet::Danish => 3,
            RuleSet::Swedish => 4,
            RuleSet::English => 5,
            RuleSet::Spanish => 6,
            RuleSet::French => 7,
        }
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "american" => Ok(RuleSet::American),
            "norwegian" => Ok(RuleSet::Norwegian),
            "dutch" => Ok(RuleSet::Dutch),
            "danish" => Ok(RuleSet::Danish),
            "swedish" => Ok(RuleSet::Swedish),
            "english" => Ok(RuleSet::English),
            "spanish" => Ok(RuleSet::Spanish),
            "french" => Ok(RuleSet::French),
            other => Err(format!("unknown ruleset '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardType {
    Normal,
    Random,
}

impl BoardType {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardType::Normal => "normal",
            BoardType::Random => "random",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(BoardType::Normal),
            "random" => Ok(BoardType::Random),
            other => Err(format!("unknown board type '{}'", other)),
        }
    }
}

/// Account the session is logged in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    pub id: i64,
    pub username: String,
}

/// Handle of a freshly created invitation. Not the game id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Option<i64>,
    pub invitee: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: String,
    pub counterpart_username: String,
    pub game_id: Option<i64>,
}

/// One letter placed on the board. Coordinates are kept signed so malformed
/// remote data can be reported instead of wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub x: i64,
    pub y: i64,
    pub character: char,
    pub is_wildcard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlayer {
    pub id: i64,
    pub username: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLastMove {
    pub move_type: String,
    pub user_id: i64,
    pub main_word: Option<String>,
    pub points: i32,
    pub placements: Vec<TilePlacement>,
}

/// Game as reported by the platform, already split into "me" and "opponent"
/// from the point of view of the session that fetched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteGame {
    pub id: i64,
    pub me: RemotePlayer,
    pub opponent: RemotePlayer,
    pub is_running: bool,
    pub tiles: Vec<TilePlacement>,
    pub last_move: Option<RemoteLastMove>,
}

/// One logged-in (or not yet logged-in) connection to the platform.
#[async_trait]
pub trait PlatformSession: Send + Sync {
    async fn login(&mut self, username: &str, password: &str) -> PlatformResult<RemoteUser>;

    async fn invite(
        &mut self,
        counterpart: &str,
        ruleset: RuleSet,
        board_type: BoardType,
    ) -> PlatformResult<Invitation>;

    async fn notifications(&mut self) -> PlatformResult<Vec<Notification>>;

    async fn game(&mut self, game_id: i64) -> PlatformResult<RemoteGame>;
}

pub trait PlatformConnector: Send + Sync {
    fn open_session(&self) -> Box<dyn PlatformSession>;
}
