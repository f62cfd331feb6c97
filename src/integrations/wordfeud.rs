use async_trait::async_trait;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use sha1::{Digest, Sha1};
use std::time::Duration;
use url::Url;

use super::{
    BoardType, Invitation, Notification, PlatformConnector, PlatformError, PlatformResult,
    PlatformSession, RemoteGame, RemoteLastMove, RemotePlayer, RemoteUser, RuleSet,
    TilePlacement,
};
use crate::constants::{
    WORDFEUD_LOGIN_REQUIRED, WORDFEUD_PASSWORD_SALT, WORDFEUD_SESSION_COOKIE, WORDFEUD_USER_AGENT,
};

/// Opens Wordfeud sessions that share one HTTP connection pool.
#[derive(Clone, Debug)]
pub struct WordfeudConnector {
    base_url: Url,
    client: Client,
}

impl WordfeudConnector {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'.
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalized)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()?;
        Ok(Self { base_url, client })
    }
}

impl PlatformConnector for WordfeudConnector {
    fn open_session(&self) -> Box<dyn PlatformSession> {
        Box::new(WordfeudSession {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            session_id: None,
            user: None,
        })
    }
}

/// One Wordfeud login, identified by its `sessionid` cookie.
pub struct WordfeudSession {
    base_url: Url,
    client: Client,
    session_id: Option<String>,
    user: Option<RemoteUser>,
}

impl WordfeudSession {
    async fn call(&mut self, path: &str, body: Value) -> PlatformResult<Value> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PlatformError::Transport(format!("Invalid Wordfeud URL: {}", e)))?;

        let mut request = self
            .client
            .post(url)
            .header(USER_AGENT, WORDFEUD_USER_AGENT)
            .json(&body);
        if let Some(session_id) = &self.session_id {
            request = request.header(COOKIE, format!("{}={}", WORDFEUD_SESSION_COOKIE, session_id));
        }

        let response = request.send().await.map_err(|e| {
            PlatformError::Transport(format!("Wordfeud {} request failed: {}", path, e))
        })?;

        if let Some(session_id) = session_cookie(response.headers()) {
            self.session_id = Some(session_id);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Transport(format!(
                "Wordfeud {} returned HTTP {}",
                path, status
            )));
        }

        let envelope: Envelope = response.json().await.map_err(|e| {
            PlatformError::Transport(format!("Wordfeud {} parse failed: {}", path, e))
        })?;
        envelope.into_content()
    }
}

#[async_trait]
impl PlatformSession for WordfeudSession {
    async fn login(&mut self, username: &str, password: &str) -> PlatformResult<RemoteUser> {
        self.session_id = None;
        self.user = None;

        let content = self
            .call(
                "user/login/",
                json!({
                    "username": username,
                    "password": password_hash(password),
                }),
            )
            .await?;
        let user: UserDto = decode(content, "login")?;

        if self.session_id.is_none() {
            return Err(PlatformError::Transport(
                "Wordfeud login succeeded without a session cookie".to_string(),
            ));
        }

        let user = RemoteUser {
            id: user.id,
            username: user.username,
        };
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn invite(
        &mut self,
        counterpart: &str,
        ruleset: RuleSet,
        board_type: BoardType,
    ) -> PlatformResult<Invitation> {
        let content = self
            .call(
                "invite/new/",
                json!({
                    "invitee": counterpart,
                    "ruleset": ruleset.wire_id(),
                    "board_type": board_type.as_str(),
                }),
            )
            .await?;

        let id = content
            .get("id")
            .or_else(|| content.pointer("/invitation/id"))
            .and_then(Value::as_i64);
        Ok(Invitation {
            id,
            invitee: counterpart.to_string(),
        })
    }

    async fn notifications(&mut self) -> PlatformResult<Vec<Notification>> {
        let content = self.call("user/notifications/", json!({})).await?;
        let feed: NotificationsDto = decode(content, "notifications")?;
        Ok(feed
            .entries
            .into_iter()
            .map(|entry| Notification {
                kind: entry.kind,
                counterpart_username: entry.username,
                game_id: entry.game_id,
            })
            .collect())
    }

    async fn game(&mut self, game_id: i64) -> PlatformResult<RemoteGame> {
        let content = self
            .call(&format!("game/{}/", game_id), json!({}))
            .await?;
        let envelope: GameEnvelopeDto = decode(content, "game")?;
        into_remote_game(envelope.game, self.user.as_ref())
    }
}

/// Wordfeud expects the hex SHA-1 of the password with a fixed salt appended.
fn password_hash(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hasher.update(WORDFEUD_PASSWORD_SALT.as_bytes());
    hex::encode(hasher.finalize())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", WORDFEUD_SESSION_COOKIE);
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find_map(|pair| pair.trim().strip_prefix(prefix.as_str()))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn decode<T: for<'de> Deserialize<'de>>(content: Value, what: &str) -> PlatformResult<T> {
    serde_json::from_value(content)
        .map_err(|e| PlatformError::Transport(format!("Malformed Wordfeud {}: {}", what, e)))
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    content: Value,
}

impl Envelope {
    fn into_content(self) -> PlatformResult<Value> {
        if self.status == "success" {
            return Ok(self.content);
        }

        let kind = self
            .content
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        if kind == WORDFEUD_LOGIN_REQUIRED {
            return Err(PlatformError::LoginRequired);
        }
        let message = self
            .content
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Err(PlatformError::Rejected { kind, message })
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: i64,
    username: String,
}

#[derive(Debug, Deserialize)]
struct NotificationsDto {
    #[serde(default)]
    entries: Vec<NotificationEntryDto>,
}

#[derive(Debug, Deserialize)]
struct NotificationEntryDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    game_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GameEnvelopeDto {
    game: GameDto,
}

#[derive(Debug, Deserialize)]
struct GameDto {
    id: i64,
    #[serde(default)]
    is_running: bool,
    players: Vec<PlayerDto>,
    #[serde(default)]
    tiles: Option<Vec<TileDto>>,
    #[serde(default)]
    last_move: Option<LastMoveDto>,
}

#[derive(Debug, Deserialize)]
struct PlayerDto {
    id: i64,
    username: String,
    #[serde(default)]
    score: i32,
}

/// `[x, y, letter, is_wildcard]`
#[derive(Debug, Deserialize)]
struct TileDto(i64, i64, String, bool);

#[derive(Debug, Deserialize)]
struct LastMoveDto {
    move_type: String,
    user_id: i64,
    // Array of tiles for placed words, a plain count for swaps, absent for passes.
    #[serde(default, rename = "move")]
    placements: Value,
    #[serde(default)]
    main_word: Option<String>,
    #[serde(default)]
    points: i32,
}

impl TryFrom<TileDto> for TilePlacement {
    type Error = PlatformError;

    fn try_from(TileDto(x, y, letter, is_wildcard): TileDto) -> PlatformResult<Self> {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(character), None) => Ok(TilePlacement {
                x,
                y,
                character,
                is_wildcard,
            }),
            _ => Err(PlatformError::Transport(format!(
                "Malformed tile letter '{}' at ({}, {})",
                letter, x, y
            ))),
        }
    }
}

fn convert_tiles(tiles: Vec<TileDto>) -> PlatformResult<Vec<TilePlacement>> {
    tiles.into_iter().map(TilePlacement::try_from).collect()
}

fn into_remote_game(game: GameDto, user: Option<&RemoteUser>) -> PlatformResult<RemoteGame> {
    let GameDto {
        id,
        is_running,
        mut players,
        tiles,
        last_move,
    } = game;

    if players.len() != 2 {
        return Err(PlatformError::Transport(format!(
            "Game {} has {} players, expected 2",
            id,
            players.len()
        )));
    }

    let me_index = user
        .and_then(|user| {
            players
                .iter()
                .position(|p| p.id == user.id)
                .or_else(|| {
                    players
                        .iter()
                        .position(|p| p.username.eq_ignore_ascii_case(&user.username))
                })
        })
        .ok_or_else(|| {
            PlatformError::Transport(format!(
                "Game {} does not include the logged-in player",
                id
            ))
        })?;

    let me = players.swap_remove(me_index);
    let opponent = players.remove(0);

    let last_move = match last_move {
        Some(mv) => {
            let placements = if mv.placements.is_array() {
                convert_tiles(decode(mv.placements, "last move")?)?
            } else {
                Vec::new()
            };
            Some(RemoteLastMove {
                move_type: mv.move_type,
                user_id: mv.user_id,
                main_word: mv.main_word,
                points: mv.points,
                placements,
            })
        }
        None => None,
    };

    Ok(RemoteGame {
        id,
        me: into_player(me),
        opponent: into_player(opponent),
        is_running,
        tiles: convert_tiles(tiles.unwrap_or_default())?,
        last_move,
    })
}

fn into_player(player: PlayerDto) -> RemotePlayer {
    RemotePlayer {
        id: player.id,
        username: player.username,
        score: player.score,
    }
}
