use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameState;
use crate::grid::{Direction, GameMode, Position};

/// Bundled fixture the mock backend boots from.
const SEED_JSON: &str = include_str!("../data/seed_data.json");

const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Errors surfaced by the mock backend.
///
/// Callers on the game path treat every variant as non-fatal: a failed
/// submission or session call never touches game state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("all fields are required")]
    MissingFields,
    #[error("a user with this email already exists")]
    EmailTaken,
    #[error("a user with this username already exists")]
    UsernameTaken,
    #[error("not signed in")]
    NotSignedIn,
    #[error("session not found")]
    SessionNotFound,
    #[error("session belongs to another player")]
    NotSessionOwner,
    #[error("corrupt seed data: {0}")]
    Seed(#[from] serde_json::Error),
}

/// Signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One ranked score on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Leaderboard slice plus the total count behind the filter.
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub total: usize,
}

/// Wire form of a game state carried on live sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub game_over: bool,
}

impl From<&GameState> for StateSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            snake: state.snake.segments().copied().collect(),
            food: state.food,
            direction: state.direction,
            game_over: state.game_over,
        }
    }
}

/// A game another player is running right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub id: String,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub is_active: bool,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: Option<StateSnapshot>,
}

impl LiveSession {
    /// Most recent activity timestamp, falling back to the start time.
    #[must_use]
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_updated_at.unwrap_or(self.started_at)
    }
}

#[derive(Debug, Deserialize)]
struct SeedData {
    leaderboard: Vec<LeaderboardEntry>,
    sessions: Vec<LiveSession>,
}

/// In-process stand-in for the arcade backend.
///
/// Holds the whole mock world: the signed-in user, registered accounts,
/// the ranked leaderboard and the live session registry. The driver owns
/// one instance and passes it wherever backend calls are made; nothing
/// here is global.
#[derive(Debug)]
pub struct Api {
    rng: StdRng,
    current_user: Option<User>,
    registered: Vec<User>,
    leaderboard: Vec<LeaderboardEntry>,
    sessions: Vec<LiveSession>,
}

impl Api {
    /// Boots the mock backend from the bundled fixture.
    pub fn new() -> Result<Self, ApiError> {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Result<Self, ApiError> {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Result<Self, ApiError> {
        let seed: SeedData = serde_json::from_str(SEED_JSON)?;

        let mut api = Self {
            rng,
            current_user: None,
            registered: Vec::new(),
            leaderboard: seed.leaderboard,
            sessions: seed.sessions,
        };
        api.rerank();
        Ok(api)
    }

    /// Signs in with any non-empty credentials.
    ///
    /// Unknown emails get an account on the fly with the username taken
    /// from the local part of the address.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }

        let user = match self.registered.iter().find(|user| user.email == email) {
            Some(existing) => existing.clone(),
            None => {
                let username = match email.split_once('@') {
                    Some((local, _)) => local,
                    None => email,
                };
                let user = User {
                    id: self.next_id(),
                    username: username.to_owned(),
                    email: email.to_owned(),
                    created_at: Utc::now(),
                };
                self.registered.push(user.clone());
                user
            }
        };

        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Registers a new account and signs it in.
    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<User, ApiError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::MissingFields);
        }
        if self.registered.iter().any(|user| user.email == email) {
            return Err(ApiError::EmailTaken);
        }
        if self.registered.iter().any(|user| user.username == username) {
            return Err(ApiError::UsernameTaken);
        }

        let user = User {
            id: self.next_id(),
            username: username.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };
        self.registered.push(user.clone());
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Signs the current user out. Signing out while signed out is a no-op.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Returns a page of the leaderboard, highest score first.
    ///
    /// Ranks are assigned across the whole board before `mode` filtering,
    /// so a filtered page keeps each entry's overall rank.
    #[must_use]
    pub fn leaderboard(
        &self,
        mode: Option<GameMode>,
        limit: usize,
        offset: usize,
    ) -> LeaderboardPage {
        let filtered: Vec<&LeaderboardEntry> = self
            .leaderboard
            .iter()
            .filter(|entry| mode.is_none_or(|wanted| entry.mode == wanted))
            .collect();

        let total = filtered.len();
        let entries = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        LeaderboardPage { entries, total }
    }

    /// Records a finished game for the signed-in user and returns the
    /// stored entry with its rank.
    pub fn submit_score(&mut self, score: u32, mode: GameMode) -> Result<LeaderboardEntry, ApiError> {
        let user = self.current_user.clone().ok_or(ApiError::NotSignedIn)?;

        let entry = LeaderboardEntry {
            id: self.next_id(),
            username: user.username,
            score,
            mode,
            timestamp: Utc::now(),
            rank: None,
        };
        let id = entry.id.clone();
        self.leaderboard.push(entry);
        self.rerank();

        let stored = self
            .leaderboard
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .expect("entry was just inserted");
        Ok(stored)
    }

    /// Returns up to `limit` active sessions, most recently seen first.
    #[must_use]
    pub fn active_sessions(&self, limit: usize) -> Vec<LiveSession> {
        let mut active: Vec<LiveSession> = self
            .sessions
            .iter()
            .filter(|session| session.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|session| std::cmp::Reverse(session.last_seen()));
        active.truncate(limit);
        active
    }

    /// Looks up one session by id, active or not.
    pub fn session(&self, id: &str) -> Result<LiveSession, ApiError> {
        self.sessions
            .iter()
            .find(|session| session.id == id)
            .cloned()
            .ok_or(ApiError::SessionNotFound)
    }

    /// Opens a live session for the signed-in user.
    pub fn start_session(&mut self, mode: GameMode) -> Result<LiveSession, ApiError> {
        let user = self.current_user.clone().ok_or(ApiError::NotSignedIn)?;

        let session = LiveSession {
            id: self.next_id(),
            username: user.username,
            score: 0,
            mode,
            is_active: true,
            started_at: Utc::now(),
            last_updated_at: None,
            state: None,
        };
        self.sessions.push(session.clone());
        Ok(session)
    }

    /// Publishes the current score and board state onto a live session.
    pub fn update_session(
        &mut self,
        id: &str,
        score: u32,
        state: StateSnapshot,
    ) -> Result<(), ApiError> {
        let username = self.require_user()?.username.clone();
        let session = self.session_mut(id)?;
        if session.username != username {
            return Err(ApiError::NotSessionOwner);
        }

        session.score = score;
        session.state = Some(state);
        session.last_updated_at = Some(Utc::now());
        Ok(())
    }

    /// Closes a live session with its final score.
    pub fn end_session(&mut self, id: &str, final_score: u32) -> Result<(), ApiError> {
        let username = self.require_user()?.username.clone();
        let session = self.session_mut(id)?;
        if session.username != username {
            return Err(ApiError::NotSessionOwner);
        }

        session.is_active = false;
        session.score = final_score;
        session.last_updated_at = Some(Utc::now());
        Ok(())
    }

    fn require_user(&self) -> Result<&User, ApiError> {
        self.current_user.as_ref().ok_or(ApiError::NotSignedIn)
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut LiveSession, ApiError> {
        self.sessions
            .iter_mut()
            .find(|session| session.id == id)
            .ok_or(ApiError::SessionNotFound)
    }

    fn rerank(&mut self) {
        self.leaderboard
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
        for (index, entry) in self.leaderboard.iter_mut().enumerate() {
            entry.rank = Some(index as u32 + 1);
        }
    }

    fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_CHARSET[self.rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect()
    }
}
