use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::api::LeaderboardEntry;
use crate::app::LeaderboardView;
use crate::config::Theme;
use crate::grid::GameMode;

const RANK_WIDTH: usize = 3;
const NAME_WIDTH: usize = 16;
const SCORE_WIDTH: usize = 6;
const MODE_WIDTH: usize = 12;
const WHEN_WIDTH: usize = 12;
const COLUMN_GAP: &str = "  ";
/// Five columns and four gaps.
const TABLE_WIDTH: u16 =
    (RANK_WIDTH + NAME_WIDTH + SCORE_WIDTH + MODE_WIDTH + WHEN_WIDTH + 4 * 2) as u16;

/// Draws the leaderboard screen: title, mode filter tabs, score table.
pub fn render_leaderboard(frame: &mut Frame<'_>, area: Rect, view: &LeaderboardView, theme: &Theme) {
    let [title_row, tabs_row, table_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(
                "LEADERBOARD",
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!("{} scores recorded", view.page.total),
                Style::default().fg(theme.ui_muted),
            ),
        ])
        .alignment(Alignment::Center),
        title_row,
    );

    frame.render_widget(
        Paragraph::new(filter_tabs(view.filter, theme)).alignment(Alignment::Center),
        tabs_row,
    );

    let table_area = centered_column(table_row, TABLE_WIDTH);
    let mut lines = Vec::with_capacity(view.page.entries.len() + 1);
    if view.page.entries.is_empty() {
        lines.push(Line::styled(
            "No scores yet",
            Style::default().fg(theme.ui_muted),
        ));
    } else {
        lines.push(header_line(theme));
        for entry in &view.page.entries {
            lines.push(entry_line(entry, theme));
        }
    }
    frame.render_widget(Paragraph::new(lines), table_area);

    frame.render_widget(
        Paragraph::new(Line::from("[M] Filter │ [V] Watch │ [T] Theme │ [Esc] Back"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_muted)),
        footer_row,
    );
}

fn filter_tabs(filter: Option<GameMode>, theme: &Theme) -> Line<'static> {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(theme.ui_accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(theme.ui_muted))
        }
    };

    Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(theme.ui_text)),
        tab("All", filter.is_none()),
        Span::raw("   "),
        tab("Walls", filter == Some(GameMode::Walls)),
        Span::raw("   "),
        tab("Pass-through", filter == Some(GameMode::Passthrough)),
    ])
}

fn header_line(theme: &Theme) -> Line<'static> {
    Line::styled(
        format!(
            "{:>RANK_WIDTH$}{gap}{:<NAME_WIDTH$}{gap}{:>SCORE_WIDTH$}{gap}{:<MODE_WIDTH$}{gap}{:<WHEN_WIDTH$}",
            "#",
            "Player",
            "Score",
            "Mode",
            "When",
            gap = COLUMN_GAP,
        ),
        Style::default().fg(theme.ui_muted),
    )
}

fn entry_line(entry: &LeaderboardEntry, theme: &Theme) -> Line<'static> {
    let rank = entry.rank.unwrap_or(0);
    let rank_style = if (1..=3).contains(&rank) {
        Style::default()
            .fg(theme.ui_accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.ui_muted)
    };

    Line::from(vec![
        Span::styled(format!("{rank:>RANK_WIDTH$}"), rank_style),
        Span::raw(COLUMN_GAP),
        Span::styled(
            fit_display(&entry.username, NAME_WIDTH),
            Style::default().fg(theme.ui_text),
        ),
        Span::raw(COLUMN_GAP),
        Span::styled(
            format!("{:>SCORE_WIDTH$}", entry.score),
            Style::default().fg(theme.ui_accent),
        ),
        Span::raw(COLUMN_GAP),
        Span::styled(
            format!("{:<MODE_WIDTH$}", entry.mode.label()),
            Style::default().fg(theme.ui_text),
        ),
        Span::raw(COLUMN_GAP),
        Span::styled(
            entry.timestamp.format("%b %e %H:%M").to_string(),
            Style::default().fg(theme.ui_muted),
        ),
    ])
}

fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Truncates or pads `text` to exactly `width` terminal columns. Usernames
/// are user input and may contain wide characters.
fn fit_display(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    for _ in used..width {
        out.push(' ');
    }
    out
}
