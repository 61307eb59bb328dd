use ratatui::Frame;

use crate::app::{App, RunPhase, Screen};
use crate::ui::board::render_board;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::leaderboard::render_leaderboard;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};
use crate::ui::watch::render_watch;

/// Renders the full frame for whichever screen is active.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let theme = app.theme();

    match app.screen {
        Screen::Game => render_game_screen(frame, app),
        Screen::Watch => render_watch(frame, area, &app.watch, theme),
        Screen::Leaderboard => render_leaderboard(frame, area, &app.leaderboard, theme),
    }
}

fn render_game_screen(frame: &mut Frame<'_>, app: &App) {
    let theme = app.theme();
    let state = &app.play.state;
    let info = HudInfo {
        phase: app.play.phase,
        player: app.api.current_user().map(|user| user.username.as_str()),
        status: app.status.as_deref(),
        theme,
    };

    let play_area = render_hud(frame, frame.area(), state, &info);
    let board = render_board(frame, play_area, state, theme);

    // Menus stack over the board so the final position stays visible
    // behind the popup borders.
    if state.game_over {
        render_game_over_menu(frame, board, state.score, state.outcome, theme);
        return;
    }
    match app.play.phase {
        RunPhase::Idle => render_start_menu(frame, board, state.mode, theme),
        RunPhase::Paused => render_pause_menu(frame, board, theme),
        RunPhase::Running => {}
    }
}
