use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use neon_snake::api::Api;
use neon_snake::app::App;
use neon_snake::grid::GameMode;
use neon_snake::input::InputHandler;
use neon_snake::terminal_runtime::{self, TerminalSession};

/// Cadence of the outer draw/poll loop. Game ticks run on their own
/// deadlines, so a frame usually advances nothing.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(
    name = "neon-snake",
    about = "Terminal snake with a leaderboard and live spectating"
)]
struct Cli {
    /// Wall behavior for the first game.
    #[arg(long, value_enum, default_value_t = ModeArg::Walls)]
    mode: ModeArg,

    /// Open the spectator screen instead of the game.
    #[arg(long)]
    watch: bool,

    /// Seed for reproducible food placement and session ids.
    #[arg(long)]
    seed: Option<u64>,

    /// Sign in with this email so finished games post to the leaderboard.
    #[arg(long, value_name = "EMAIL")]
    user: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Walls,
    Passthrough,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Walls => GameMode::Walls,
            ModeArg::Passthrough => GameMode::Passthrough,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let api = match build_api(cli.seed) {
        Ok(api) => api,
        Err(error) => {
            eprintln!("failed to load seed data: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(cli.mode.into(), cli.watch, cli.seed, api);
    if let Some(email) = cli.user.as_deref() {
        // The mock backend accepts any non-empty password.
        match app.api.login(email, email) {
            Ok(user) => app.set_status(format!("signed in as {}", user.username)),
            Err(error) => {
                eprintln!("sign-in failed: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    terminal_runtime::install_panic_hook();

    if let Err(error) = run(&mut app) {
        eprintln!("terminal error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn build_api(seed: Option<u64>) -> Result<Api, neon_snake::api::ApiError> {
    match seed {
        Some(seed) => Api::with_seed(seed),
        None => Api::new(),
    }
}

fn run(app: &mut App) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();

    while !app.should_quit() {
        session.draw(app)?;

        if let Some(game_input) = input.poll_input()? {
            app.handle_input(game_input);
        }

        app.on_tick(Instant::now());
        thread::sleep(FRAME_INTERVAL);
    }

    app.shutdown();
    Ok(())
}
