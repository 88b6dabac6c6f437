use std::path::PathBuf;

use neuroblox_assistant::BoardReport;
use neuroblox_engine::{Board, PieceSeed, SessionState};
use rand::Rng as _;
use serde::Serialize;

use crate::{command::session::SimulatedSession, util};

const DEFAULT_MAX_TURNS: usize = 500;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Piece sequence seed (32 hex characters); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces have been locked
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,
    /// Assistant configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for AutoPlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            config: None,
            output: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct AutoPlaySummary {
    seed: PieceSeed,
    turns: usize,
    score: usize,
    lines: usize,
    level: usize,
    line_cleared_counter: [usize; 5],
    session_state: SessionState,
    simulated_time_ms: u128,
    board_report: BoardReport,
    board: Board,
    messages: Vec<String>,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        seed,
        max_turns,
        config,
        output,
    } = arg;

    let config = util::read_assistant_config(config.as_ref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, max_turns, "starting autoplay");

    let mut session = SimulatedSession::new(seed, config);
    session.auto_play(*max_turns);

    let game = &session.game;
    let summary = AutoPlaySummary {
        seed,
        turns: game.stats().completed_pieces(),
        score: game.score(),
        lines: game.lines(),
        level: game.level(),
        line_cleared_counter: *game.stats().line_cleared_counter(),
        session_state: game.session_state(),
        simulated_time_ms: session.elapsed.as_millis(),
        board_report: BoardReport::from_board(game.board()),
        board: game.board().clone(),
        messages: session.messages.clone(),
    };
    util::Output::save_json(&summary, output.clone())?;
    Ok(())
}
