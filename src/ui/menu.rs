use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::GameOutcome;
use crate::grid::GameMode;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, mode: GameMode, theme: &Theme) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("NEON SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("Mode: {}", mode.label())),
        Line::from(""),
        Line::from("[Enter] Start"),
        Line::from("[M] Switch Mode"),
        Line::from("[L] Leaderboard   [V] Watch"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text))
            .block(popup_block(" start ", theme)),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Use arrows or WASD to steer"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_muted)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[L] Leaderboard   [V] Watch"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text))
            .block(popup_block(" pause ", theme)),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    outcome: Option<GameOutcome>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let (headline, cause) = match outcome {
        Some(GameOutcome::WallCollision) => ("GAME OVER", "Cause: hit the wall"),
        Some(GameOutcome::SelfCollision) => ("GAME OVER", "Cause: ran into yourself"),
        Some(GameOutcome::BoardFull) => ("BOARD CLEARED", "The snake filled every cell"),
        None => ("GAME OVER", ""),
    };

    let lines = vec![
        Line::styled(
            headline,
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(cause),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[M] Switch Mode   [L] Leaderboard"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text))
            .block(popup_block(" game over ", theme)),
        popup,
    );
}

fn popup_block(title: &'static str, theme: &Theme) -> Block<'static> {
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.border_fg))
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
