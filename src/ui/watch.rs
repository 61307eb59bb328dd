use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::api::LiveSession;
use crate::app::WatchSession;
use crate::config::Theme;
use crate::ui::board;

const SESSION_PANEL_WIDTH: u16 = 34;
const SESSION_NAME_WIDTH: usize = 16;

/// Draws the spectator screen: a simulated board for the selected session
/// on the left, the live session list on the right.
pub fn render_watch(frame: &mut Frame<'_>, area: Rect, watch: &WatchSession, theme: &Theme) {
    let [title_row, content_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "WATCH LIVE",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        title_row,
    );

    let [stage_area, list_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SESSION_PANEL_WIDTH),
    ])
    .areas(content_row);

    match watch.selected_session() {
        Some(session) => render_stage(frame, stage_area, watch, session, theme),
        None => frame.render_widget(
            Paragraph::new(Line::from("No active games right now"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.ui_muted)),
            stage_area,
        ),
    }

    render_session_list(frame, list_area, watch, theme);

    frame.render_widget(
        Paragraph::new(Line::from("[↑↓] Select │ [L] Scores │ [T] Theme │ [Esc] Back"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_muted)),
        footer_row,
    );
}

fn render_stage(
    frame: &mut Frame<'_>,
    area: Rect,
    watch: &WatchSession,
    session: &LiveSession,
    theme: &Theme,
) {
    let [header_row, board_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);

    let header = vec![
        Line::from(vec![
            Span::styled("Watching ", Style::default().fg(theme.ui_text)),
            Span::styled(
                session.username.clone(),
                Style::default()
                    .fg(theme.ui_accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            format!(
                "Score: {} │ Mode: {}",
                watch.game.score,
                watch.game.mode.label()
            ),
            Style::default().fg(theme.ui_muted),
        ),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), header_row);

    let _ = board::render_board(frame, board_area, &watch.game, theme);
}

fn render_session_list(frame: &mut Frame<'_>, area: Rect, watch: &WatchSession, theme: &Theme) {
    let block = Block::bordered()
        .title(" live games ")
        .border_style(Style::default().fg(theme.border_fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if watch.sessions.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from("– none –"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.ui_muted)),
            inner,
        );
        return;
    }

    let mut lines = Vec::with_capacity(watch.sessions.len() * 3);
    for (index, session) in watch.sessions.iter().enumerate() {
        let selected = index == watch.selected;
        lines.push(session_title_line(session, selected, theme));
        lines.push(session_detail_line(session, theme));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn session_title_line(session: &LiveSession, selected: bool, theme: &Theme) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(theme.ui_accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.ui_text)
    };

    let mut name: String = session.username.chars().take(SESSION_NAME_WIDTH).collect();
    while name.chars().count() < SESSION_NAME_WIDTH {
        name.push(' ');
    }

    Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.ui_accent)),
        Span::styled(name, name_style),
        Span::styled(
            format!("{:>6}", session.score),
            Style::default().fg(theme.ui_accent),
        ),
    ])
}

fn session_detail_line(session: &LiveSession, theme: &Theme) -> Line<'static> {
    Line::styled(
        format!(
            "  {} · {}",
            session.mode.label(),
            session.last_seen().format("%H:%M")
        ),
        Style::default().fg(theme.ui_muted),
    )
}
