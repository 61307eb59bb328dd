use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai;
use crate::api::{Api, LeaderboardPage, LiveSession, StateSnapshot};
use crate::config::{SESSION_REFRESH_SECS, THEMES, Theme, WATCH_TICK_INTERVAL_MS};
use crate::game::{GameState, tick_interval_for_score};
use crate::grid::{Direction, GameMode};
use crate::input::GameInput;

/// Entries fetched per leaderboard view.
const LEADERBOARD_LIMIT: usize = 10;
/// Live sessions shown on the watch screen.
const SESSION_LIST_LIMIT: usize = 10;

/// Top-level screens, one visible at a time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Game,
    Watch,
    Leaderboard,
}

/// Whether the player's game timer is advancing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunPhase {
    /// No game in progress; the start menu shows over the opening board.
    Idle,
    Running,
    /// Timer suspended; the board keeps rendering.
    Paused,
}

/// The human player's game and its live-session bookkeeping.
#[derive(Debug)]
pub struct PlaySession {
    pub state: GameState,
    pub phase: RunPhase,
    /// Latest direction intent. Persists across ticks; the state machine
    /// drops it when it would reverse the current heading.
    pending: Direction,
    rng: StdRng,
    next_tick: Instant,
    live_session: Option<String>,
    published_score: u32,
}

impl PlaySession {
    fn new(mode: GameMode, mut rng: StdRng) -> Self {
        let state = GameState::new(mode, &mut rng);
        Self {
            state,
            phase: RunPhase::Idle,
            pending: Direction::Right,
            rng,
            next_tick: Instant::now(),
            live_session: None,
            published_score: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running && !self.state.game_over
    }

    /// True when a fresh game may be configured or started.
    #[must_use]
    fn between_games(&self) -> bool {
        self.phase == RunPhase::Idle || self.state.game_over
    }

    /// Starts a new game in the current mode, replacing the state wholesale.
    fn start(&mut self, now: Instant, api: &mut Api) {
        self.state = GameState::new(self.state.mode, &mut self.rng);
        self.pending = Direction::Right;
        self.phase = RunPhase::Running;
        self.next_tick = now + tick_interval_for_score(0);
        self.published_score = 0;
        self.live_session = api.start_session(self.state.mode).ok().map(|session| session.id);
    }

    fn set_direction(&mut self, direction: Direction) {
        if self.is_running() {
            self.pending = direction;
        }
    }

    fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            RunPhase::Running if !self.state.game_over => self.phase = RunPhase::Paused,
            RunPhase::Paused => {
                self.phase = RunPhase::Running;
                // Paused time never counts against the tick deadline.
                self.next_tick = now + tick_interval_for_score(self.state.score);
            }
            _ => {}
        }
    }

    /// Switches wall behavior between games; resets to a fresh idle board.
    fn toggle_mode(&mut self, api: &mut Api) {
        if !self.between_games() {
            return;
        }
        self.close_live_session(api);
        let mode = match self.state.mode {
            GameMode::Walls => GameMode::Passthrough,
            GameMode::Passthrough => GameMode::Walls,
        };
        self.state = GameState::new(mode, &mut self.rng);
        self.phase = RunPhase::Idle;
    }

    /// Advances the game by at most one tick when its deadline has passed.
    /// Returns a HUD notice when the game just ended.
    fn tick(&mut self, now: Instant, api: &mut Api) -> Option<String> {
        if !self.is_running() || now < self.next_tick {
            return None;
        }

        let next = self.state.step(Some(self.pending), &mut self.rng);
        let scored = next.score != self.state.score;
        let finished = next.game_over;
        self.state = next;
        self.next_tick = now + tick_interval_for_score(self.state.score);

        if finished {
            return self.settle(api);
        }
        if scored {
            self.publish(api);
        }
        None
    }

    /// Reports the finished game: closes the live session and submits the
    /// score. Failures only ever surface as HUD text.
    fn settle(&mut self, api: &mut Api) -> Option<String> {
        let score = self.state.score;
        self.close_live_session(api);

        if score == 0 {
            return None;
        }
        if api.current_user().is_none() {
            return Some("sign in with --user to post scores".to_owned());
        }

        match api.submit_score(score, self.state.mode) {
            Ok(entry) => {
                let rank = entry.rank.unwrap_or(0);
                Some(format!("score {score} posted at rank {rank}"))
            }
            Err(error) => Some(format!("score submission failed: {error}")),
        }
    }

    /// Pushes the current score and board onto the live session.
    fn publish(&mut self, api: &mut Api) {
        let Some(id) = self.live_session.clone() else {
            return;
        };
        if self.state.score == self.published_score {
            return;
        }
        let snapshot = StateSnapshot::from(&self.state);
        if api.update_session(&id, self.state.score, snapshot).is_ok() {
            self.published_score = self.state.score;
        }
    }

    fn close_live_session(&mut self, api: &mut Api) {
        if let Some(id) = self.live_session.take() {
            // Best effort; the mock only fails when the session is foreign.
            let _ = api.end_session(&id, self.state.score);
        }
    }
}

/// Spectator state: the live session list and a locally simulated AI game.
#[derive(Debug)]
pub struct WatchSession {
    pub sessions: Vec<LiveSession>,
    pub selected: usize,
    pub game: GameState,
    rng: StdRng,
    next_tick: Instant,
    next_refresh: Instant,
}

impl WatchSession {
    fn new(mut rng: StdRng) -> Self {
        let game = GameState::new(GameMode::Walls, &mut rng);
        Self {
            sessions: Vec::new(),
            selected: 0,
            game,
            rng,
            next_tick: Instant::now(),
            next_refresh: Instant::now(),
        }
    }

    /// Returns the session the board is currently simulating.
    #[must_use]
    pub fn selected_session(&self) -> Option<&LiveSession> {
        self.sessions.get(self.selected)
    }

    fn enter(&mut self, now: Instant, api: &Api) {
        self.refresh(now, api);
        self.restart_game(now);
    }

    fn refresh(&mut self, now: Instant, api: &Api) {
        self.sessions = api.active_sessions(SESSION_LIST_LIMIT);
        if self.selected >= self.sessions.len() {
            self.selected = 0;
        }
        self.next_refresh = now + Duration::from_secs(SESSION_REFRESH_SECS);
    }

    fn restart_game(&mut self, now: Instant) {
        let mode = self
            .selected_session()
            .map_or(GameMode::Walls, |session| session.mode);
        self.game = GameState::new(mode, &mut self.rng);
        self.next_tick = now + Duration::from_millis(WATCH_TICK_INTERVAL_MS);
    }

    fn select_next(&mut self, now: Instant) {
        if self.sessions.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.sessions.len();
        self.restart_game(now);
    }

    fn select_previous(&mut self, now: Instant) {
        if self.sessions.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.sessions.len() - 1
        } else {
            self.selected - 1
        };
        self.restart_game(now);
    }

    /// Refreshes the session list on schedule and advances the AI game at
    /// its fixed cadence, restarting it when it ends.
    fn tick(&mut self, now: Instant, api: &Api) {
        if now >= self.next_refresh {
            self.refresh(now, api);
        }
        if self.sessions.is_empty() || now < self.next_tick {
            return;
        }

        if self.game.game_over {
            self.restart_game(now);
            return;
        }

        let direction = ai::select_move(&self.game);
        self.game = self.game.step(Some(direction), &mut self.rng);
        self.next_tick = now + Duration::from_millis(WATCH_TICK_INTERVAL_MS);
    }
}

/// Cached leaderboard page plus the active mode filter.
#[derive(Debug)]
pub struct LeaderboardView {
    pub filter: Option<GameMode>,
    pub page: LeaderboardPage,
}

impl LeaderboardView {
    fn new() -> Self {
        Self {
            filter: None,
            page: LeaderboardPage {
                entries: Vec::new(),
                total: 0,
            },
        }
    }

    fn refresh(&mut self, api: &Api) {
        self.page = api.leaderboard(self.filter, LEADERBOARD_LIMIT, 0);
    }

    fn cycle_filter(&mut self, api: &Api) {
        self.filter = match self.filter {
            None => Some(GameMode::Walls),
            Some(GameMode::Walls) => Some(GameMode::Passthrough),
            Some(GameMode::Passthrough) => None,
        };
        self.refresh(api);
    }
}

/// Everything the frame loop owns: screens, the mock backend, and the
/// current theme. Input routing and tick dispatch both live here.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub play: PlaySession,
    pub watch: WatchSession,
    pub leaderboard: LeaderboardView,
    pub api: Api,
    pub status: Option<String>,
    theme_index: usize,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(mode: GameMode, start_on_watch: bool, seed: Option<u64>, api: Api) -> Self {
        let play_rng = rng_from(seed);
        let watch_rng = rng_from(seed.map(|s| s.wrapping_add(1)));

        let mut app = Self {
            screen: Screen::Game,
            play: PlaySession::new(mode, play_rng),
            watch: WatchSession::new(watch_rng),
            leaderboard: LeaderboardView::new(),
            api,
            status: None,
            theme_index: 0,
            should_quit: false,
        };
        if start_on_watch {
            app.open_watch(Instant::now());
        }
        app
    }

    #[must_use]
    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index]
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Routes one input event to the active screen.
    pub fn handle_input(&mut self, input: GameInput) {
        let now = Instant::now();
        if input == GameInput::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Game => self.handle_game_input(input, now),
            Screen::Watch => self.handle_watch_input(input, now),
            Screen::Leaderboard => self.handle_leaderboard_input(input, now),
        }
    }

    /// Advances whichever screen owns the clock right now.
    pub fn on_tick(&mut self, now: Instant) {
        match self.screen {
            Screen::Game => {
                if let Some(notice) = self.play.tick(now, &mut self.api) {
                    self.status = Some(notice);
                }
            }
            Screen::Watch => self.watch.tick(now, &self.api),
            Screen::Leaderboard => {}
        }
    }

    /// Closes any live session before the terminal session is torn down.
    pub fn shutdown(&mut self) {
        self.play.close_live_session(&mut self.api);
    }

    fn handle_game_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(direction) => self.play.set_direction(direction),
            GameInput::Pause => self.play.toggle_pause(now),
            GameInput::Confirm => {
                if self.play.between_games() {
                    self.status = None;
                    self.play.start(now, &mut self.api);
                }
            }
            GameInput::ToggleMode => self.play.toggle_mode(&mut self.api),
            GameInput::CycleTheme => {
                if !self.play.is_running() {
                    self.cycle_theme();
                }
            }
            GameInput::OpenLeaderboard => {
                self.pause_if_running(now);
                self.leaderboard.refresh(&self.api);
                self.screen = Screen::Leaderboard;
            }
            GameInput::OpenWatch => self.open_watch(now),
            GameInput::Back => self.should_quit = true,
            GameInput::Quit => {}
        }
    }

    fn handle_watch_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(Direction::Up) => self.watch.select_previous(now),
            GameInput::Direction(Direction::Down) => self.watch.select_next(now),
            GameInput::OpenLeaderboard => {
                self.leaderboard.refresh(&self.api);
                self.screen = Screen::Leaderboard;
            }
            GameInput::CycleTheme => self.cycle_theme(),
            GameInput::Back => self.screen = Screen::Game,
            _ => {}
        }
    }

    fn handle_leaderboard_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::ToggleMode => self.leaderboard.cycle_filter(&self.api),
            GameInput::OpenWatch => self.open_watch(now),
            GameInput::CycleTheme => self.cycle_theme(),
            GameInput::Back => self.screen = Screen::Game,
            _ => {}
        }
    }

    fn open_watch(&mut self, now: Instant) {
        self.pause_if_running(now);
        self.watch.enter(now, &self.api);
        self.screen = Screen::Watch;
    }

    fn pause_if_running(&mut self, now: Instant) {
        if self.play.is_running() {
            self.play.toggle_pause(now);
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEMES.len();
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
