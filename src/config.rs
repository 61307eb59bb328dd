use ratatui::style::Color;

/// Logical play-field dimension. The board is a `GRID_SIZE` × `GRID_SIZE`
/// square; every position the engine commits stays in `[0, GRID_SIZE)` on
/// both axes (pass-through mode wraps, walls mode ends the game first).
pub const GRID_SIZE: i32 = 20;

/// Points granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Base tick interval in milliseconds at score 0.
pub const BASE_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds; the speed curve clamps here.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Score step between speed-ups.
pub const SPEEDUP_POINTS: u32 = 50;

/// Interval reduction in milliseconds per speed-up.
pub const SPEEDUP_MS: u64 = 10;

/// Fixed tick interval for spectated AI games, in milliseconds.
pub const WATCH_TICK_INTERVAL_MS: u64 = 150;

/// How often the watch screen re-fetches the live session list, in seconds.
pub const SESSION_REFRESH_SECS: u64 = 5;

/// Terminal columns per logical cell. Cells are two characters wide so the
/// square grid renders square.
pub const CELL_WIDTH: u16 = 2;

/// Snake head glyphs by heading, one cell wide.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲ ";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼ ";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀ ";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = " ▶";

/// Body and tail glyphs.
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▒▒";

/// Food glyph.
pub const GLYPH_FOOD: &str = "● ";

/// A color theme applied to all visual elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    /// Color for the snake head glyph.
    pub snake_head: Color,
    /// Color for body segments.
    pub snake_body: Color,
    /// Color for the tail segment.
    pub snake_tail: Color,
    /// Color for food.
    pub food: Color,
    /// Background for empty play-area cells.
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub ui_text: Color,
    pub ui_accent: Color,
    pub ui_muted: Color,
    pub menu_title: Color,
}

/// Neon magenta/cyan theme, the house style.
pub const THEME_NEON: Theme = Theme {
    name: "Neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    food: Color::Cyan,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    border_bg: Color::Black,
    ui_text: Color::White,
    ui_accent: Color::Magenta,
    ui_muted: Color::DarkGray,
    menu_title: Color::Cyan,
};

/// Classic green-on-dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    ui_text: Color::White,
    ui_accent: Color::Green,
    ui_muted: Color::DarkGray,
    menu_title: Color::Green,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "Ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    border_bg: Color::DarkGray,
    ui_text: Color::White,
    ui_accent: Color::Cyan,
    ui_muted: Color::DarkGray,
    menu_title: Color::Cyan,
};

/// All available themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_NEON, THEME_CLASSIC, THEME_OCEAN];
