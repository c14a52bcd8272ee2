use std::cmp::Ordering;

use chrono::{SecondsFormat, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::betting::{BettingRound, RoundEnd, RoundPhase, Stacks};
use crate::cards::Card;
use crate::deck::Deck;
use crate::difficulty::Difficulty;
use crate::errors::GameError;
use crate::events::{GameEvent, HandOutcome, MatchView};
use crate::game::MatchState;
use crate::hand::{evaluate_best, EvaluatedHand};
use crate::items::Item;
use crate::logger::{ActionRecord, HandLogger, HandRecord, ShowdownInfo, Street};
use crate::opponent::{AbilityEffect, Opponent};
use crate::persistence::SaveData;
use crate::player::{PlayerAction, PlayerProgress, Seat};
use crate::policy::{Decision, DecisionContext, OpponentPolicy};
use crate::rules::ante_for_level;
use crate::strength::hand_strength;

/// Chance a luck boost turns a tied or lost showdown into a win.
pub const LUCKY_ESCAPE_CHANCE: f64 = 0.3;
/// Chance of an item after a won showdown.
pub const ITEM_DROP_CHANCE: f64 = 0.3;
/// Beating the enemy at this level wins the run.
pub const FINAL_LEVEL: u32 = 10;
pub const RECOVERY_THRESHOLD: u32 = 50;
pub const RECOVERY_CHIPS: u32 = 30;
pub const PERFECT_GAME_BONUS: u32 = 25;

/// How a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunEnd {
    GameOver,
    Victory,
}

/// Source of player actions for [`Engine::drive_hand`].
pub trait PlayerInput {
    /// Next action for the given table, or `None` to abort the session.
    fn choose(&mut self, view: &MatchView) -> Option<PlayerAction>;

    /// Events produced by the last accepted action.
    fn observe(&mut self, _events: &[GameEvent]) {}

    /// The last action was rejected; the same table will be offered again.
    fn rejected(&mut self, _error: &GameError) {}
}

/// Runs a roguelike session: encounters against a ladder of opponents, each
/// fought over heads-up hands until one side is out of chips.
///
/// # Examples
///
/// ```
/// use roguepoker_engine::difficulty::Difficulty;
/// use roguepoker_engine::engine::Engine;
/// use roguepoker_engine::player::PlayerAction;
/// use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};
///
/// struct Caller;
/// impl OpponentPolicy for Caller {
///     fn decide(&mut self, _: &DecisionContext) -> Decision { Decision::Call }
///     fn name(&self) -> &str { "caller" }
/// }
///
/// let mut engine = Engine::new(7, Difficulty::Normal, Box::new(Caller));
/// engine.start_encounter().unwrap();
/// engine.start_hand().unwrap();
/// while engine.hand_in_progress() {
///     engine.apply_player_action(PlayerAction::Check).unwrap();
/// }
/// assert_eq!(engine.state().community.len(), 5);
/// ```
pub struct Engine {
    seed: u64,
    difficulty: Difficulty,
    deck: Deck,
    /// Drives luck rolls and item drops, separate from the deck
    rng: ChaCha20Rng,
    policy: Box<dyn OpponentPolicy>,
    progress: PlayerProgress,
    opponent: Option<Opponent>,
    state: MatchState,
    round: BettingRound,
    hand_active: bool,
    hand_number: u32,
    hands_lost_in_encounter: u32,
    actions: Vec<ActionRecord>,
    logger: Option<HandLogger>,
    finished: Option<RunEnd>,
}

impl Engine {
    pub fn new(seed: u64, difficulty: Difficulty, policy: Box<dyn OpponentPolicy>) -> Self {
        Self {
            seed,
            difficulty,
            deck: Deck::new_with_seed(seed),
            rng: ChaCha20Rng::seed_from_u64(seed.rotate_left(32) ^ 0x5EED),
            policy,
            progress: PlayerProgress::new(difficulty.profile().starting_chips),
            opponent: None,
            state: MatchState::new(),
            round: BettingRound::new(),
            hand_active: false,
            hand_number: 0,
            hands_lost_in_encounter: 0,
            actions: Vec::new(),
            logger: None,
            finished: None,
        }
    }

    /// Appends a record of every finished hand to `logger`.
    pub fn set_logger(&mut self, logger: HandLogger) {
        self.logger = Some(logger);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }
    pub fn progress_mut(&mut self) -> &mut PlayerProgress {
        &mut self.progress
    }
    pub fn opponent(&self) -> Option<&Opponent> {
        self.opponent.as_ref()
    }
    pub fn state(&self) -> &MatchState {
        &self.state
    }
    pub fn round_phase(&self) -> RoundPhase {
        self.round.phase()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn deck_cards(&self) -> &[Card] {
        self.deck.cards()
    }
    pub fn hand_in_progress(&self) -> bool {
        self.hand_active
    }
    pub fn run_end(&self) -> Option<RunEnd> {
        self.finished
    }

    /// True once either side of the current encounter has no chips.
    pub fn encounter_decided(&self) -> bool {
        self.progress.is_busted() || self.opponent.as_ref().is_some_and(|o| o.chips == 0)
    }

    fn ensure_can_start(&self) -> Result<(), GameError> {
        if self.finished.is_some() {
            return Err(GameError::RunComplete {
                level: self.progress.level,
            });
        }
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        if self.progress.is_busted() {
            return Err(GameError::PlayerBusted);
        }
        Ok(())
    }

    /// Generates the opponent for the current level and difficulty.
    pub fn start_encounter(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_can_start()?;
        let opponent = Opponent::generate(self.progress.level, self.difficulty);
        self.start_encounter_with(opponent)
    }

    /// Installs a prepared opponent, replacing any current one.
    pub fn start_encounter_with(&mut self, opponent: Opponent) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_can_start()?;
        info!(
            level = self.progress.level,
            opponent = %opponent.name,
            chips = opponent.chips,
            ability = ?opponent.special_ability,
            "encounter started"
        );
        self.hands_lost_in_encounter = 0;
        self.opponent = Some(opponent.clone());
        Ok(vec![GameEvent::EncounterStarted { opponent }])
    }

    /// Rebuilds the deck, posts antes and deals hole cards.
    ///
    /// When the ante leaves the player with nothing behind, the board is run
    /// out at once and the returned events include the hand's end.
    pub fn start_hand(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_can_start()?;
        let opponent = self.opponent.as_mut().ok_or(GameError::NoEncounter)?;
        if opponent.chips == 0 {
            return Err(GameError::EncounterDecided);
        }

        self.deck.reset();
        self.state.reset();
        self.round = BettingRound::new();
        self.actions.clear();

        // antes are matched: the shorter stack sets the amount for both
        let ante = ante_for_level(self.progress.level)
            .min(self.progress.chips)
            .min(opponent.chips);
        self.progress.chips -= ante;
        opponent.chips -= ante;
        self.state.post_ante(ante);

        self.state.player_hole = Some(deal_hole(&mut self.deck)?);
        self.state.opponent_hole = Some(deal_hole(&mut self.deck)?);
        self.state.begin_street(Street::Preflop);
        self.hand_active = true;
        self.hand_number += 1;
        debug!(hand = self.hand_number, ante, pot = self.state.pot, "hand started");

        let mut events = vec![GameEvent::HandStarted {
            hand_number: self.hand_number,
            ante,
        }];
        if self.progress.is_busted() {
            self.run_out(&mut events)?;
        }
        Ok(events)
    }

    /// Applies one player action and everything it sets off: the opponent's
    /// answer, new streets, and the showdown.
    ///
    /// A rejected action leaves the engine exactly as it was.
    pub fn apply_player_action(&mut self, action: PlayerAction) -> Result<Vec<GameEvent>, GameError> {
        if !self.hand_active {
            return Err(GameError::NoHandInProgress);
        }
        let mut events = Vec::new();

        if let PlayerAction::UseItem(index) = action {
            let name = self
                .progress
                .usable_items()
                .find(|(i, _)| *i == index)
                .map(|(_, item)| item.name.clone())
                .ok_or(GameError::ItemUnavailable { index })?;
            let effect = self
                .progress
                .use_item(index)
                .ok_or(GameError::ItemUnavailable { index })?;
            self.record(Seat::Player, action, &mut events);
            info!(item = %name, ?effect, "item used");
            events.push(GameEvent::ItemUsed { index, name, effect });
            return Ok(events);
        }

        let opponent = self.opponent.as_mut().ok_or(GameError::NoEncounter)?;
        let stacks = Stacks {
            player: &mut self.progress.chips,
            opponent: &mut opponent.chips,
        };
        let validated = self.round.player_action(&mut self.state, stacks, action)?;
        self.record(Seat::Player, PlayerAction::from(&validated), &mut events);

        if self.round.phase() == RoundPhase::AwaitingOpponentResponse {
            self.opponent_turn(&mut events)?;
        }
        if let Some(end) = self.round.outcome() {
            self.close_round(end, &mut events)?;
        }
        Ok(events)
    }

    fn record(&mut self, seat: Seat, action: PlayerAction, events: &mut Vec<GameEvent>) {
        let street = self.state.phase;
        debug!(?seat, ?street, ?action, pot = self.state.pot, "action");
        self.actions.push(ActionRecord {
            seat,
            street,
            action: action.clone(),
        });
        events.push(GameEvent::Acted {
            seat,
            street,
            action,
        });
    }

    fn opponent_turn(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let opponent = self.opponent.as_mut().ok_or(GameError::NoEncounter)?;
        let hole = self.state.opponent_hole.ok_or(GameError::NoHandInProgress)?;
        let mut ctx = DecisionContext {
            hand_strength: hand_strength(hole, &self.state.community, false)?,
            pot: self.state.pot,
            to_call: self.state.to_call(Seat::Opponent),
            chips: opponent.chips,
            level: opponent.level,
            aggression: opponent.aggression,
            bluff_rate: opponent.bluff_rate,
        };

        let mut forced = None;
        let mut shove = false;
        if let Some(ability) = opponent.consume_ability() {
            info!(ability = ability.name(), "opponent ability used");
            events.push(GameEvent::AbilityUsed { ability });
            match ability.effect() {
                AbilityEffect::StrengthBoost(x) => {
                    ctx.hand_strength = (ctx.hand_strength + x).min(1.0)
                }
                AbilityEffect::BluffMultiplier(m) => ctx.bluff_rate = (ctx.bluff_rate * m).min(1.0),
                AbilityEffect::AggressionBoost(x) => ctx.aggression = (ctx.aggression + x).min(1.0),
                AbilityEffect::ForceRaise => forced = Some(Decision::Raise),
                AbilityEffect::PassiveCall => forced = Some(Decision::Call),
                AbilityEffect::ForceAllIn => shove = true,
            }
        }

        let stacks = Stacks {
            player: &mut self.progress.chips,
            opponent: &mut opponent.chips,
        };
        let action = if shove {
            self.round.opponent_shove(&mut self.state, stacks)?
        } else {
            let decision = match forced {
                Some(d) => d,
                None => self.policy.decide(&ctx),
            };
            self.round.opponent_response(&mut self.state, stacks, decision)?
        };
        self.record(Seat::Opponent, action, events);
        Ok(())
    }

    fn close_round(&mut self, end: RoundEnd, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let pot = self.state.pot;
        match end {
            RoundEnd::PlayerFolded => self.end_hand(HandOutcome::PlayerFolded { pot }, events),
            RoundEnd::OpponentFolded => self.end_hand(HandOutcome::OpponentFolded { pot }, events),
            RoundEnd::AllIn => self.run_out(events)?,
            RoundEnd::Settled => {
                if self.state.phase == Street::River {
                    self.showdown(events)?;
                } else {
                    self.deal_street(events)?;
                    self.round = BettingRound::new();
                }
            }
        }
        Ok(())
    }

    fn deal_street(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let street = self.state.phase.next();
        let burned = self.deck.burn_card().ok_or(GameError::DeckExhausted {
            needed: 1,
            remaining: 0,
        })?;
        self.state.burned.push(burned);
        let needed = street.cards_to_deal();
        let cards = self.deck.draw(needed);
        if cards.len() < needed {
            return Err(GameError::DeckExhausted {
                needed,
                remaining: cards.len(),
            });
        }
        self.state.add_community(&cards)?;
        self.state.begin_street(street);
        debug!(street = street.as_str(), ?cards, "street dealt");
        events.push(GameEvent::StreetDealt { street, cards });
        Ok(())
    }

    /// Deals the remaining streets without betting, then shows down.
    fn run_out(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        while self.state.phase != Street::River {
            self.deal_street(events)?;
        }
        self.showdown(events)
    }

    fn showdown(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.state.begin_street(Street::Showdown);
        let player_hand = evaluate_best(&self.state.cards_for(Seat::Player))?;
        let opponent_hand = evaluate_best(&self.state.cards_for(Seat::Opponent))?;
        let pot = self.state.pot;

        let lucky_escape = player_hand <= opponent_hand
            && self.progress.luck_boost
            && self.rng.random_bool(LUCKY_ESCAPE_CHANCE);
        if lucky_escape {
            self.progress.stats.lucky_escapes += 1;
        }
        let (winner, player_share, opponent_share) =
            settle_showdown(&player_hand, &opponent_hand, pot, lucky_escape);
        self.progress.stats.record_best_hand(player_hand.category);

        self.end_hand(
            HandOutcome::Showdown {
                winner,
                player_hand,
                opponent_hand,
                player_share,
                opponent_share,
                lucky_escape,
            },
            events,
        );

        if winner == Some(Seat::Player) && self.rng.random_bool(ITEM_DROP_CHANCE) {
            let item = Item::random(&mut self.rng);
            info!(item = %item.name, "item found");
            self.progress.inventory.push(item.clone());
            events.push(GameEvent::ItemFound { item });
        }
        Ok(())
    }

    fn end_hand(&mut self, outcome: HandOutcome, events: &mut Vec<GameEvent>) {
        let pot = self.state.pot;
        let player_share = outcome.player_share();
        self.progress.chips += player_share;
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.chips += pot - player_share;
        }
        self.state.pot = 0;

        let stats = &mut self.progress.stats;
        stats.hands_played += 1;
        match outcome.winner() {
            Some(Seat::Player) => {
                stats.hands_won += 1;
                stats.total_chips_won += u64::from(player_share);
            }
            Some(Seat::Opponent) => self.hands_lost_in_encounter += 1,
            None => {}
        }
        self.progress.luck_boost = false;
        self.hand_active = false;

        info!(
            hand = self.hand_number,
            pot,
            result = %outcome.summary(),
            player_chips = self.progress.chips,
            "hand finished"
        );
        self.write_record(&outcome, pot);
        events.push(GameEvent::HandEnded(outcome));
    }

    fn write_record(&mut self, outcome: &HandOutcome, pot: u32) {
        let Some(logger) = self.logger.as_mut() else {
            return;
        };
        let showdown = match outcome {
            HandOutcome::Showdown {
                winner,
                player_hand,
                opponent_hand,
                lucky_escape,
                ..
            } => Some(ShowdownInfo {
                winner: *winner,
                player_hand: player_hand.category,
                opponent_hand: opponent_hand.category,
                notes: lucky_escape.then(|| "lucky escape".to_string()),
            }),
            _ => None,
        };
        let record = HandRecord {
            hand_id: logger.next_id(),
            seed: Some(self.seed),
            level: self.progress.level,
            opponent: self
                .opponent
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_default(),
            actions: self.actions.clone(),
            board: self.state.community.clone(),
            player_hole: self.state.player_hole.map(Vec::from).unwrap_or_default(),
            opponent_hole: self.state.opponent_hole.map(Vec::from).unwrap_or_default(),
            pot,
            result: Some(outcome.summary()),
            ts: None,
            showdown,
        };
        if let Err(e) = logger.write(&record) {
            warn!(error = %e, "failed to write hand history");
        }
    }

    /// Resolves a decided encounter: a level up (possibly winning the run)
    /// when the opponent is out, game over when the player is.
    pub fn finish_encounter(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        let opponent = self.opponent.as_ref().ok_or(GameError::NoEncounter)?;
        let level = self.progress.level;

        if self.progress.is_busted() {
            info!(level, opponent = %opponent.name, "game over");
            self.opponent = None;
            self.finished = Some(RunEnd::GameOver);
            return Ok(vec![GameEvent::GameOver { level }]);
        }
        if opponent.chips > 0 {
            return Err(GameError::EncounterUndecided);
        }
        info!(level, opponent = %opponent.name, "opponent defeated");
        self.opponent = None;
        Ok(self.level_up())
    }

    fn level_up(&mut self) -> Vec<GameEvent> {
        let profile = self.difficulty.profile();
        let p = &mut self.progress;
        p.level += 1;
        p.victories += 1;
        p.stats.enemies_defeated += 1;
        p.stats.highest_level = p.stats.highest_level.max(p.level);

        let bonus = ((50 + 10 * p.level) as f32 * profile.reward_multiplier).round() as u32;
        p.chips += bonus;
        let recovery = if p.chips < RECOVERY_THRESHOLD {
            RECOVERY_CHIPS
        } else {
            0
        };
        p.chips += recovery;
        let perfect_bonus = if self.hands_lost_in_encounter == 0 {
            p.stats.perfect_games += 1;
            PERFECT_GAME_BONUS
        } else {
            0
        };
        p.chips += perfect_bonus;
        info!(level = p.level, bonus, recovery, perfect_bonus, chips = p.chips, "level up");

        let mut events = vec![GameEvent::LevelUp {
            level: p.level,
            bonus,
            recovery,
            perfect_bonus,
        }];
        if p.level > FINAL_LEVEL {
            p.chips += profile.victory_bonus;
            self.finished = Some(RunEnd::Victory);
            info!(bonus = profile.victory_bonus, "run won");
            events.push(GameEvent::Victory {
                bonus: profile.victory_bonus,
            });
        }
        events
    }

    /// Folds this run into the record. Returns `true` on a new high score.
    ///
    /// Chips the player has in an unfinished hand are counted back into the
    /// stack, since that hand is never played out.
    pub fn checkpoint(&self, save: &mut SaveData) -> bool {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        if self.hand_active {
            let mut progress = self.progress.clone();
            progress.chips += self.state.player_committed;
            return save.record_run(&progress, now);
        }
        save.record_run(&self.progress, now)
    }

    pub fn view(&self) -> MatchView {
        let hand_strength = self.state.player_hole.and_then(|hole| {
            hand_strength(hole, &self.state.community, self.progress.luck_boost).ok()
        });
        MatchView {
            level: self.progress.level,
            street: self.state.phase,
            pot: self.state.pot,
            to_call: self.state.to_call(Seat::Player),
            player_chips: self.progress.chips,
            player_hole: self.state.player_hole,
            community: self.state.community.clone(),
            opponent_name: self
                .opponent
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_default(),
            opponent_chips: self.opponent.as_ref().map_or(0, |o| o.chips),
            hand_strength,
            luck_boost: self.progress.luck_boost,
            items: self
                .progress
                .usable_items()
                .map(|(i, item)| (i, item.name.clone()))
                .collect(),
        }
    }

    /// Plays one hand to the end against `input`, starting it if needed.
    ///
    /// Rejected actions are reported to `input` and asked for again.
    /// Returns `Ok(None)` when `input` aborts; the unfinished hand is left as
    /// is and nothing about it is recorded.
    pub fn drive_hand(
        &mut self,
        input: &mut dyn PlayerInput,
    ) -> Result<Option<HandOutcome>, GameError> {
        if !self.hand_active {
            let events = self.start_hand()?;
            input.observe(&events);
            if let Some(outcome) = hand_outcome(&events) {
                return Ok(Some(outcome));
            }
        }
        loop {
            let view = self.view();
            let Some(action) = input.choose(&view) else {
                debug!(hand = self.hand_number, "hand aborted by input");
                return Ok(None);
            };
            match self.apply_player_action(action) {
                Ok(events) => {
                    input.observe(&events);
                    if let Some(outcome) = hand_outcome(&events) {
                        return Ok(Some(outcome));
                    }
                }
                Err(e) if e.is_rejection() => input.rejected(&e),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Splits a showdown pot as `(winner, player_share, opponent_share)`.
///
/// A lucky escape gives a tied or beaten player the whole pot. Otherwise the
/// better hand takes it, and an exact tie splits it with the odd chip going
/// to the player.
pub fn settle_showdown(
    player: &EvaluatedHand,
    opponent: &EvaluatedHand,
    pot: u32,
    lucky_escape: bool,
) -> (Option<Seat>, u32, u32) {
    match player.cmp(opponent) {
        Ordering::Greater => (Some(Seat::Player), pot, 0),
        _ if lucky_escape => (Some(Seat::Player), pot, 0),
        Ordering::Less => (Some(Seat::Opponent), 0, pot),
        Ordering::Equal => (None, pot - pot / 2, pot / 2),
    }
}

fn deal_hole(deck: &mut Deck) -> Result<[Card; 2], GameError> {
    let cards = deck.draw(2);
    match cards.as_slice() {
        [a, b] => Ok([*a, *b]),
        short => Err(GameError::DeckExhausted {
            needed: 2,
            remaining: short.len(),
        }),
    }
}

fn hand_outcome(events: &[GameEvent]) -> Option<HandOutcome> {
    events.iter().find_map(|e| match e {
        GameEvent::HandEnded(outcome) => Some(outcome.clone()),
        _ => None,
    })
}
