use std::path::PathBuf;

use neuroblox_assistant::AssistantMode;
use neuroblox_engine::PieceSeed;
use rand::Rng as _;

use crate::{command::session::SimulatedSession, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AskArg {
    /// Question or command for the assistant, e.g. "how am I doing?"
    text: String,
    /// Piece sequence seed (32 hex characters); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Pieces the assistant plays before answering
    #[arg(long, default_value_t = 0)]
    warmup_turns: usize,
    /// Assistant mode while answering (hint, auto or predict)
    #[arg(long, default_value_t = AssistantMode::Hint)]
    mode: AssistantMode,
    /// Assistant configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &AskArg) -> anyhow::Result<()> {
    let AskArg {
        text,
        seed,
        warmup_turns,
        mode,
        config,
    } = arg;

    let config = util::read_assistant_config(config.as_ref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, warmup_turns, "starting session");

    let mut session = SimulatedSession::new(seed, config);
    if *warmup_turns > 0 {
        session.auto_play(*warmup_turns);
    }
    session.set_mode(*mode);
    for line in &session.messages {
        tracing::info!("{line}");
    }

    let answer = session.assistant.process_command(text, &session.game);
    util::Output::stdout().write_lines(&answer)?;
    Ok(())
}
