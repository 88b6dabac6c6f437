use std::{fmt, str::FromStr, time::Duration};

use neuroblox_engine::{GameEvent, GameState};
use neuroblox_evaluator::move_search::{Move, MoveSearch};
use serde::Serialize;

use crate::{
    AssistantConfig, BoardReport, CommandIntent, GameOverReport, ParseAssistantModeError,
    PerformanceReport, Prediction, Predictor, ScheduleToken, ScheduledTick, TickKind,
    command::{HELP_LINES, UNKNOWN_COMMAND},
    report::to_lines,
    schedule::Scheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum AssistantMode {
    #[default]
    Hint,
    AutoPlay,
    Predict,
}

impl AssistantMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssistantMode::Hint => "hint",
            AssistantMode::AutoPlay => "auto",
            AssistantMode::Predict => "predict",
        }
    }

    fn description(self) -> &'static str {
        match self {
            AssistantMode::Hint => "Hint Mode: I will suggest optimal moves",
            AssistantMode::AutoPlay => "Auto Mode: Taking control of the game",
            AssistantMode::Predict => "Predict Mode: Analyzing future possibilities",
        }
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantMode {
    type Err = ParseAssistantModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hint" => Ok(AssistantMode::Hint),
            "auto" | "autoplay" | "auto-play" => Ok(AssistantMode::AutoPlay),
            "predict" => Ok(AssistantMode::Predict),
            _ => Err(ParseAssistantModeError(s.to_owned())),
        }
    }
}

/// Display form of a suggested move.
///
/// `column` is 1-based. `confidence` is `min(95, 70 + score / 10)` percent and goes
/// negative for poor placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::Display)]
#[display("Rotate {rotation}x, Col {column}")]
pub struct HintPayload {
    pub rotation: u8,
    pub column: i32,
    pub confidence: f64,
}

impl HintPayload {
    const MAX_CONFIDENCE: f64 = 95.0;
    const BASE_CONFIDENCE: f64 = 70.0;

    #[must_use]
    pub fn from_move(best: &Move) -> Self {
        let confidence =
            (Self::BASE_CONFIDENCE + f64::from(best.score()) / 10.0).min(Self::MAX_CONFIDENCE);
        Self {
            rotation: best.rotation(),
            column: best.x() + 1,
            confidence,
        }
    }

    fn message(&self) -> String {
        format!(
            "HINT: Best move: Rotate {} times, Move to column {}",
            self.rotation, self.column
        )
    }
}

/// Heuristic helper that suggests, predicts or plays moves.
///
/// The assistant holds no reference to the game; every operation that needs it takes
/// the [`GameState`] as an argument. Messages meant for the player are returned as
/// lines of text.
#[derive(Debug)]
pub struct Assistant<'a> {
    config: AssistantConfig,
    search: MoveSearch<'a>,
    predictor: Predictor,
    active: bool,
    mode: AssistantMode,
    scheduler: Scheduler,
    run_immediately: bool,
    halted: bool,
    last_hint: Option<HintPayload>,
    predictions: Vec<Prediction>,
    predicted_serial: Option<u64>,
    command_history: Vec<String>,
}

impl Default for Assistant<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Assistant<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AssistantConfig::default())
    }

    #[must_use]
    pub fn with_config(config: AssistantConfig) -> Self {
        Self::with_parts(config, MoveSearch::default(), Predictor::new())
    }

    /// Creates an assistant from explicit collaborators, e.g. a seeded predictor.
    #[must_use]
    pub fn with_parts(
        config: AssistantConfig,
        search: MoveSearch<'a>,
        predictor: Predictor,
    ) -> Self {
        Self {
            config,
            search,
            predictor,
            active: false,
            mode: AssistantMode::default(),
            scheduler: Scheduler::default(),
            run_immediately: false,
            halted: false,
            last_hint: None,
            predictions: vec![],
            predicted_serial: None,
            command_history: vec![],
        }
    }

    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn mode(&self) -> AssistantMode {
        self.mode
    }

    /// The most recent hint produced by a hint tick or command.
    #[must_use]
    pub fn last_hint(&self) -> Option<&HintPayload> {
        self.last_hint.as_ref()
    }

    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    #[must_use]
    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub fn activate(&mut self) -> Vec<String> {
        self.active = true;
        self.restart_schedule();
        tracing::info!(mode = %self.mode, "assistant activated");
        vec![
            "AI Assistant Activated".to_owned(),
            "Modes: Hint - Suggests moves | Auto - Plays automatically | Predict - Shows future moves"
                .to_owned(),
        ]
    }

    pub fn deactivate(&mut self) -> Vec<String> {
        self.active = false;
        self.scheduler.cancel();
        tracing::info!("assistant deactivated");
        vec!["AI Assistant Deactivated".to_owned()]
    }

    /// Switches mode, cancelling anything scheduled for the previous one.
    ///
    /// The first tick of the new mode is due immediately. Predictive mode computes
    /// its predictions for the falling piece right away.
    pub fn set_mode(&mut self, mode: AssistantMode, game: &GameState) -> Vec<String> {
        self.mode = mode;
        self.predicted_serial = None;
        self.restart_schedule();
        if mode.is_predict() {
            self.refresh_predictions(game);
        }
        tracing::info!(%mode, "assistant mode set");
        vec![
            format!("Mode set to: {}", mode.as_str().to_uppercase()),
            mode.description().to_owned(),
        ]
    }

    fn restart_schedule(&mut self) {
        self.scheduler.cancel();
        self.run_immediately = true;
        self.halted = false;
    }

    fn halt(&mut self) {
        self.scheduler.cancel();
        self.run_immediately = false;
        self.halted = true;
    }

    /// Best move for the falling piece. Does not touch the game.
    #[must_use]
    pub fn hint(&self, game: &GameState) -> Move {
        self.search
            .select_best_move(game.board(), game.falling_piece())
    }

    #[must_use]
    pub fn hint_payload(&self, game: &GameState) -> HintPayload {
        HintPayload::from_move(&self.hint(game))
    }

    /// Returns the next run the host should perform, or `None` if nothing is due.
    ///
    /// Auto and hint modes run periodically while active; predictive mode is driven
    /// by [`Self::observe`] instead. Once a run sees the game over, nothing is
    /// scheduled until the next [`Self::activate`] or [`Self::set_mode`].
    #[must_use]
    pub fn schedule(&self) -> Option<ScheduledTick> {
        if !self.active || self.halted {
            return None;
        }
        let (kind, period) = match self.mode {
            AssistantMode::AutoPlay => (TickKind::AutoPlay, self.config.autoplay_delay),
            AssistantMode::Hint => (TickKind::Hint, self.config.hint_interval),
            AssistantMode::Predict => return None,
        };
        let delay = if self.run_immediately {
            Duration::ZERO
        } else {
            period
        };
        Some(self.scheduler.tick(kind, delay))
    }

    /// Runs a tick previously returned by [`Self::schedule`].
    ///
    /// Stale tokens (issued before a mode change, a deactivation or another run) are
    /// ignored. In auto mode the best move is played: the piece is rotated, shifted
    /// one column at a time towards the target and hard dropped. Nothing is played
    /// while the game is paused or over.
    pub fn run_scheduled(&mut self, token: ScheduleToken, game: &mut GameState) -> Vec<String> {
        if !self.active || !self.scheduler.consume(token) {
            tracing::trace!(?token, "ignoring stale tick");
            return vec![];
        }
        self.run_immediately = false;

        let lines = match self.mode {
            AssistantMode::AutoPlay => {
                if game.session_state().is_playing() {
                    self.play_best_move(game);
                }
                vec![]
            }
            AssistantMode::Hint => vec![self.refresh_hint(game).message()],
            AssistantMode::Predict => vec![],
        };
        if game.session_state().is_game_over() {
            tracing::debug!(mode = %self.mode, "game over, stopping scheduled runs");
            self.halt();
        }
        lines
    }

    fn play_best_move(&self, game: &mut GameState) {
        let best = self.hint(game);
        for _ in 0..best.rotation() {
            game.rotate();
        }
        let dx = best.x() - game.falling_piece().position().x();
        for _ in 0..dx.unsigned_abs() {
            game.move_piece(dx.signum(), 0);
        }
        game.hard_drop();
        tracing::info!(
            rotation = best.rotation(),
            x = best.x(),
            score = best.score(),
            "autoplay move"
        );
    }

    fn refresh_hint(&mut self, game: &GameState) -> HintPayload {
        let payload = self.hint_payload(game);
        self.last_hint = Some(payload);
        payload
    }

    fn refresh_predictions(&mut self, game: &GameState) {
        let current = game.falling_piece().kind();
        self.predictions = self
            .predictor
            .predict(current, self.config.prediction_count);
        self.predicted_serial = Some(game.piece_serial());
    }

    /// Reacts to events drained from the game.
    ///
    /// While active, a game over produces the game-over report, and predictive mode
    /// recomputes its predictions whenever a new piece is falling.
    pub fn observe(&mut self, game: &GameState, events: &[GameEvent]) -> Vec<String> {
        if !self.active {
            return vec![];
        }
        let mut lines = vec![];
        if events.iter().any(GameEvent::is_game_over) {
            self.halt();
            lines.extend(to_lines(&GameOverReport::from_game(game)));
        }
        if self.mode.is_predict() && self.predicted_serial != Some(game.piece_serial()) {
            self.refresh_predictions(game);
        }
        lines
    }

    /// Answers a free-text command with lines of text.
    ///
    /// Only reads the game; hint and predict commands work in every mode.
    pub fn process_command(&mut self, text: &str, game: &GameState) -> Vec<String> {
        self.command_history.push(text.to_owned());
        let intent = CommandIntent::from_text(text);
        tracing::debug!(?intent, text, "processing command");

        match intent {
            CommandIntent::Help => HELP_LINES.iter().map(|s| (*s).to_owned()).collect(),
            CommandIntent::Performance => to_lines(&PerformanceReport::from_game(game)),
            CommandIntent::Hint => vec![self.refresh_hint(game).message()],
            CommandIntent::Predict => {
                self.refresh_predictions(game);
                let mut lines = vec!["=== PREDICTIONS ===".to_owned()];
                lines.extend(self.predictions.iter().map(ToString::to_string));
                lines.push("=== END PREDICTIONS ===".to_owned());
                lines
            }
            CommandIntent::BoardAnalysis => to_lines(&BoardReport::from_board(game.board())),
            CommandIntent::Unknown => vec![UNKNOWN_COMMAND.to_owned()],
        }
    }
}
