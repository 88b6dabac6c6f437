use std::time::Duration;

use neuroblox_assistant::{Assistant, AssistantConfig, AssistantMode};
use neuroblox_engine::{GameState, PieceSeed};

/// A game and its assistant driven on a simulated clock.
///
/// Scheduled ticks are run back to back; their delays only advance `elapsed`.
#[derive(Debug)]
pub(crate) struct SimulatedSession {
    pub(crate) game: GameState,
    pub(crate) assistant: Assistant<'static>,
    pub(crate) elapsed: Duration,
    pub(crate) messages: Vec<String>,
}

impl SimulatedSession {
    pub(crate) fn new(seed: PieceSeed, config: AssistantConfig) -> Self {
        let mut assistant = Assistant::with_config(config);
        let messages = assistant.activate();
        Self {
            game: GameState::with_seed(seed),
            assistant,
            elapsed: Duration::ZERO,
            messages,
        }
    }

    pub(crate) fn set_mode(&mut self, mode: AssistantMode) {
        let lines = self.assistant.set_mode(mode, &self.game);
        self.messages.extend(lines);
    }

    /// Runs autoplay ticks until `max_turns` pieces are locked or the game ends.
    pub(crate) fn auto_play(&mut self, max_turns: usize) {
        self.set_mode(AssistantMode::AutoPlay);
        while self.game.session_state().is_playing()
            && self.game.stats().completed_pieces() < max_turns
        {
            let Some(tick) = self.assistant.schedule() else {
                break;
            };
            self.elapsed += tick.delay();
            let lines = self.assistant.run_scheduled(tick.token(), &mut self.game);
            self.messages.extend(lines);
            let events = self.game.take_events();
            let lines = self.assistant.observe(&self.game, &events);
            self.messages.extend(lines);
        }
        tracing::info!(
            turns = self.game.stats().completed_pieces(),
            score = self.game.score(),
            elapsed_ms = self.elapsed.as_millis(),
            "autoplay stopped"
        );
    }
}
