use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::RunPhase;
use crate::config::Theme;
use crate::game::{GameState, tick_interval_for_score};

const HUD_INNER_MARGIN_X: u16 = 1;
const TABLE_SEPARATOR: &str = " │ ";

/// Values the HUD shows that the game state alone cannot supply.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub phase: RunPhase,
    /// Signed-in username, if any.
    pub player: Option<&'a str>,
    /// One-line notice shown bottom-left, e.g. the score-submission result.
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let score_area = inset_horizontal(score_area, HUD_INNER_MARGIN_X);
    let status_area = inset_horizontal(status_area, HUD_INNER_MARGIN_X);

    // Top line: Score | Speed | Mode | Player
    frame.render_widget(
        Paragraph::new(top_info_line(state, info))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.ui_muted)),
        score_area,
    );

    // Bottom line: notice on the left, key hints for the current phase on
    // the right.
    let hints = key_hints(info.phase, state.game_over);
    let hints_width = u16::try_from(hints.chars().count()).unwrap_or(u16::MAX);
    let [notice_area, hints_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)])
            .areas(status_area);

    if let Some(status) = info.status {
        frame.render_widget(
            Paragraph::new(Line::from(status))
                .alignment(Alignment::Left)
                .style(Style::default().fg(info.theme.ui_accent)),
            notice_area,
        );
    }
    frame.render_widget(
        Paragraph::new(Line::from(hints))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.ui_muted)),
        hints_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn top_info_line(state: &GameState, info: &HudInfo<'_>) -> Line<'static> {
    let theme = info.theme;
    let value_style = Style::default().fg(theme.ui_text);
    let score_style = Style::default()
        .fg(theme.ui_accent)
        .add_modifier(Modifier::BOLD);
    let speed_ms = tick_interval_for_score(state.score).as_millis();

    let mut spans = vec![
        Span::raw("Score: "),
        Span::styled(state.score.to_string(), score_style),
        Span::raw(TABLE_SEPARATOR),
        Span::raw("Speed: "),
        Span::styled(format!("{speed_ms}ms"), value_style),
        Span::raw(TABLE_SEPARATOR),
        Span::raw("Mode: "),
        Span::styled(state.mode.label(), value_style),
    ];

    if let Some(player) = info.player {
        spans.push(Span::raw(TABLE_SEPARATOR));
        spans.push(Span::raw("Player: "));
        spans.push(Span::styled(player.to_owned(), value_style));
    }

    Line::from(spans)
}

fn key_hints(phase: RunPhase, game_over: bool) -> &'static str {
    if game_over {
        return "[Enter] Again │ [L] Scores │ [Q] Quit";
    }
    match phase {
        RunPhase::Idle => "[Enter] Start │ [M] Mode │ [T] Theme",
        RunPhase::Running => "[Space] Pause │ [L] Scores │ [V] Watch",
        RunPhase::Paused => "[Space] Resume │ [L] Scores │ [V] Watch",
    }
}

#[cfg(test)]
mod tests {
    use super::key_hints;
    use crate::app::RunPhase;

    #[test]
    fn hints_follow_the_phase() {
        assert!(key_hints(RunPhase::Idle, false).contains("[Enter] Start"));
        assert!(key_hints(RunPhase::Running, false).contains("[Space] Pause"));
        assert!(key_hints(RunPhase::Paused, false).contains("[Space] Resume"));
        assert!(key_hints(RunPhase::Running, true).contains("[Enter] Again"));
    }
}
