//! The playmat session: owns the state and commits transitions atomically
//!
//! [`Playmat::apply`] runs each intent against a copy of the state, the RNG
//! and the id generator. Only a successful intent is swapped in, journaled
//! and logged as a transition; a failed one is logged as rejected and leaves
//! the session exactly as it was.

use crate::config::PlaymatConfig;
use crate::core::{InstanceId, InstanceIdGenerator};
use crate::game::actions::{ActionOutcome, ApplyContext, GameAction};
use crate::game::logger::{category, GameLogger, VerbosityLevel};
use crate::game::snapshot::{HandView, RenderSnapshot};
use crate::game::GameState;
use crate::loader::{DeckDefinition, GameInitializer};
use crate::undo::ActionHistory;
use crate::zones::Zone;
use crate::{PlaymatError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashSet;

#[derive(Debug)]
pub struct Playmat {
    deck: DeckDefinition,
    config: PlaymatConfig,
    state: GameState,
    rng: ChaCha12Rng,
    ids: InstanceIdGenerator,
    history: ActionHistory,
    logger: GameLogger,

    /// Ids created by the latest setup or restart, sorted
    session_ids: Vec<InstanceId>,
}

impl Playmat {
    /// Start a session with an entropy-seeded shuffle
    pub fn new(deck: DeckDefinition, config: PlaymatConfig) -> Self {
        Self::with_rng(deck, config, ChaCha12Rng::from_entropy(), GameLogger::new())
    }

    /// Start a reproducible session
    pub fn with_seed(deck: DeckDefinition, config: PlaymatConfig, seed: u64) -> Self {
        Self::with_rng(deck, config, ChaCha12Rng::seed_from_u64(seed), GameLogger::new())
    }

    pub fn with_rng(
        deck: DeckDefinition,
        config: PlaymatConfig,
        mut rng: ChaCha12Rng,
        logger: GameLogger,
    ) -> Self {
        let mut ids = InstanceIdGenerator::new();
        let state = GameInitializer::new(&deck, &config).init_game(&mut ids, &mut rng);
        let session_ids = state.sorted_ids();
        let history = ActionHistory::new(config.history_limit);

        let playmat = Playmat {
            deck,
            config,
            state,
            rng,
            ids,
            history,
            logger,
            session_ids,
        };
        playmat.log_setup();
        playmat
    }

    /// Apply one intent; on error nothing changes
    pub fn apply(&mut self, action: GameAction) -> Result<ActionOutcome> {
        let mut rng = self.rng.clone();
        let mut ids = self.ids.clone();
        let mut ctx = ApplyContext {
            rng: &mut rng,
            ids: &mut ids,
            config: &self.config,
            deck: &self.deck,
        };

        let (next, outcome) = match action.reduce(&self.state, &mut ctx) {
            Ok(result) => result,
            Err(err) => {
                self.log_rejected(&action, &err);
                return Err(err);
            }
        };

        let before = std::mem::replace(&mut self.state, next);
        self.rng = rng;
        self.ids = ids;
        if matches!(outcome, ActionOutcome::Restarted { .. }) {
            self.session_ids = self.state.sorted_ids();
        }
        debug_assert!(
            self.check_conservation().is_ok(),
            "card conservation broken by {action}"
        );

        self.log_committed(&action, &outcome);
        // No-op intents are not journaled
        if self.state != before {
            self.history.record(action, before);
        }
        Ok(outcome)
    }

    /// Revert the most recent committed transition
    ///
    /// Returns the undone action, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<GameAction> {
        let entry = self.history.pop()?;
        self.state = entry.before;
        if matches!(entry.action, GameAction::Restart) {
            self.session_ids = self.state.sorted_ids();
        }
        self.logger.log(
            VerbosityLevel::Normal,
            Some(category::TRANSITION),
            &format!("undo: {}", entry.action),
        );
        Some(entry.action)
    }

    /// Verify every session card is present exactly once
    pub fn check_conservation(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for id in self.state.zones.instance_ids() {
            if !seen.insert(id) {
                return Err(PlaymatError::invariant(format!("card {id} appears twice")));
            }
        }
        if let Some(missing) = self.session_ids.iter().find(|id| !seen.contains(id)) {
            return Err(PlaymatError::invariant(format!("card {missing} went missing")));
        }
        if seen.len() != self.session_ids.len() {
            return Err(PlaymatError::invariant(format!(
                "{} cards in play but the session created {}",
                seen.len(),
                self.session_ids.len()
            )));
        }
        Ok(())
    }

    pub fn snapshot(&self, view: &HandView) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, &self.config.hand_layout, view)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn deck(&self) -> &DeckDefinition {
        &self.deck
    }

    pub fn config(&self) -> &PlaymatConfig {
        &self.config
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn session_ids(&self) -> &[InstanceId] {
        &self.session_ids
    }

    pub fn turn(&self) -> u32 {
        self.state.turn()
    }

    pub fn life(&self) -> i32 {
        self.state.life()
    }

    /// Name of the card with `id`, wherever it is
    pub fn card_name(&self, id: InstanceId) -> Option<&str> {
        let zones = &self.state.zones;
        match zones.locate(id)?.zone {
            Zone::Battlefield => zones.battlefield().card(id).map(|c| c.name()),
            zone => zones.get_zone(zone)?.get(id).map(|c| c.name()),
        }
    }

    fn describe(&self, id: InstanceId) -> String {
        match self.card_name(id) {
            Some(name) => format!("{id} ({name})"),
            None => id.to_string(),
        }
    }

    fn log_setup(&self) {
        let sizes = self
            .state
            .zone_sizes()
            .iter()
            .map(|(zone, n)| format!("{zone:?} {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.logger.log(
            VerbosityLevel::Verbose,
            Some(category::SETUP),
            &format!(
                "setup: deck '{}' with {} cards ({sizes})",
                self.deck.name,
                self.session_ids.len()
            ),
        );
    }

    fn log_committed(&self, action: &GameAction, outcome: &ActionOutcome) {
        let message = match *outcome {
            ActionOutcome::Drew(id) => format!("draw: {}", self.describe(id)),
            ActionOutcome::Unstacked(None) => format!("{action}: stack already empty"),
            ActionOutcome::Unstacked(Some(id)) => {
                format!("{action}: promoted {}", self.describe(id))
            }
            ActionOutcome::Counters(n) => format!("{action}: now {n}"),
            ActionOutcome::TurnAdvanced { turn, drew } => {
                match drew {
                    Some(id) => format!("turn {turn}: untapped all, drew {}", self.describe(id)),
                    None => {
                        self.logger.log(
                            VerbosityLevel::Minimal,
                            Some(category::EMPTY_LIBRARY),
                            &format!("turn {turn}: library is empty, no card drawn"),
                        );
                        format!("turn {turn}: untapped all")
                    }
                }
            }
            ActionOutcome::Restarted { cards } => {
                self.logger.log(
                    VerbosityLevel::Verbose,
                    Some(category::SETUP),
                    &format!("restart: rebuilt {cards} cards with a fresh shuffle"),
                );
                format!("{action}: {cards} cards")
            }
            _ if matches!(action, GameAction::Shuffle) => {
                self.logger.log(
                    VerbosityLevel::Verbose,
                    Some(category::SHUFFLE),
                    &format!(
                        "shuffle: reordered {} library cards",
                        self.state.zones.library().len()
                    ),
                );
                action.to_string()
            }
            _ => action.to_string(),
        };
        self.logger
            .log(VerbosityLevel::Normal, Some(category::TRANSITION), &message);
    }

    fn log_rejected(&self, action: &GameAction, err: &PlaymatError) {
        if err.is_empty_library() {
            self.logger.log(
                VerbosityLevel::Minimal,
                Some(category::EMPTY_LIBRARY),
                &format!("{action}: {err}"),
            );
            return;
        }
        self.logger.log(
            VerbosityLevel::Normal,
            Some(category::REJECTED),
            &format!("{action} rejected: {err}"),
        );
    }
}
