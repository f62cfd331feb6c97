//! In-memory platform used by unit and HTTP tests.
//!
//! Sessions opened from one [`ScriptedPlatform`] share its script and
//! counters. A session answers `LoginRequired` until it has logged in, and
//! additionally for as many calls as [`ScriptedPlatform::expire_session_for`]
//! asks.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::integrations::{
    BoardType, Invitation, Notification, PlatformConnector, PlatformError, PlatformResult,
    PlatformSession, RemoteGame, RemoteLastMove, RemotePlayer, RemoteUser, RuleSet,
    TilePlacement,
};

#[derive(Default)]
struct Script {
    logins: usize,
    last_login: Option<(String, String)>,
    calls: usize,
    sessions_opened: usize,
    expired_calls: usize,
    reject_logins: bool,
    transport_failure: bool,
    feeds: VecDeque<Vec<Notification>>,
    notification_polls: usize,
    invites: Vec<String>,
    game: Option<RemoteGame>,
}

#[derive(Clone, Default)]
pub struct ScriptedPlatform {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().expect("script lock poisoned")
    }

    pub fn reject_logins(self) -> Self {
        self.script().reject_logins = true;
        self
    }

    pub fn fail_calls_with_transport(self) -> Self {
        self.script().transport_failure = true;
        self
    }

    /// Each poll pops the next feed; an exhausted script yields empty feeds.
    pub fn with_feeds(self, feeds: Vec<Vec<Notification>>) -> Self {
        self.script().feeds = feeds.into();
        self
    }

    pub fn with_game(self, game: RemoteGame) -> Self {
        self.script().game = Some(game);
        self
    }

    /// The next `calls` remote calls answer `LoginRequired`.
    pub fn expire_session_for(&self, calls: usize) {
        self.script().expired_calls = calls;
    }

    pub fn session(&self) -> Box<dyn PlatformSession> {
        self.open_session()
    }

    pub fn logins(&self) -> usize {
        self.script().logins
    }

    pub fn last_login(&self) -> Option<(String, String)> {
        self.script().last_login.clone()
    }

    pub fn calls(&self) -> usize {
        self.script().calls
    }

    pub fn sessions_opened(&self) -> usize {
        self.script().sessions_opened
    }

    pub fn notification_polls(&self) -> usize {
        self.script().notification_polls
    }

    pub fn invites(&self) -> Vec<String> {
        self.script().invites.clone()
    }
}

impl PlatformConnector for ScriptedPlatform {
    fn open_session(&self) -> Box<dyn PlatformSession> {
        self.script().sessions_opened += 1;
        Box::new(ScriptedSession {
            script: self.script.clone(),
            logged_in: false,
        })
    }
}

struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    logged_in: bool,
}

impl ScriptedSession {
    fn begin_call(&self) -> PlatformResult<MutexGuard<'_, Script>> {
        let mut script = self.script.lock().expect("script lock poisoned");
        script.calls += 1;
        if script.transport_failure {
            return Err(PlatformError::Transport("connection refused".to_string()));
        }
        if script.expired_calls > 0 {
            script.expired_calls -= 1;
            return Err(PlatformError::LoginRequired);
        }
        if !self.logged_in {
            return Err(PlatformError::LoginRequired);
        }
        Ok(script)
    }
}

#[async_trait]
impl PlatformSession for ScriptedSession {
    async fn login(&mut self, username: &str, password: &str) -> PlatformResult<RemoteUser> {
        let mut script = self.script.lock().expect("script lock poisoned");
        script.logins += 1;
        script.last_login = Some((username.to_string(), password.to_string()));
        if script.reject_logins {
            self.logged_in = false;
            return Err(PlatformError::Rejected {
                kind: "wrong_password".to_string(),
                message: "Wrong password".to_string(),
            });
        }
        self.logged_in = true;
        Ok(RemoteUser {
            id: 1,
            username: username.to_string(),
        })
    }

    async fn invite(
        &mut self,
        counterpart: &str,
        _ruleset: RuleSet,
        _board_type: BoardType,
    ) -> PlatformResult<Invitation> {
        let mut script = self.begin_call()?;
        script.invites.push(counterpart.to_string());
        Ok(Invitation {
            id: Some(script.invites.len() as i64),
            invitee: counterpart.to_string(),
        })
    }

    async fn notifications(&mut self) -> PlatformResult<Vec<Notification>> {
        let mut script = self.begin_call()?;
        script.notification_polls += 1;
        Ok(script.feeds.pop_front().unwrap_or_default())
    }

    async fn game(&mut self, game_id: i64) -> PlatformResult<RemoteGame> {
        let script = self.begin_call()?;
        Ok(script.game.clone().unwrap_or_else(|| sample_game(game_id)))
    }
}

pub fn notification(kind: &str, username: &str, game_id: i64) -> Notification {
    Notification {
        kind: kind.to_string(),
        counterpart_username: username.to_string(),
        game_id: Some(game_id),
    }
}

pub fn tile(x: i64, y: i64, character: char, is_wildcard: bool) -> TilePlacement {
    TilePlacement {
        x,
        y,
        character,
        is_wildcard,
    }
}

/// `bot1` (id 1) against `alice` (id 2); `alice` played "HEi" across row 7.
pub fn sample_game(game_id: i64) -> RemoteGame {
    let word = vec![tile(7, 7, 'H', false), tile(8, 7, 'E', false), tile(9, 7, 'I', true)];
    RemoteGame {
        id: game_id,
        me: RemotePlayer {
            id: 1,
            username: "bot1".to_string(),
            score: 0,
        },
        opponent: RemotePlayer {
            id: 2,
            username: "alice".to_string(),
            score: 12,
        },
        is_running: true,
        tiles: word.clone(),
        last_move: Some(RemoteLastMove {
            move_type: "move".to_string(),
            user_id: 2,
            main_word: Some("HEI".to_string()),
            points: 12,
            placements: word,
        }),
    }
}
