//! Match state machine and authoritative tick loop

use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::input::{ControlScheme, InputState, KeyboardState};
use crate::util::time::{tick_delta_ms, TICK_DURATION_MICROS};

use super::ai::AiState;
use super::combat::{CombatSystem, Strike};
use super::fighter::{Fighter, FighterSlot, FighterState};
use super::physics::PhysicsSystem;
use super::snapshot::MatchSnapshot;
use super::{GameMode, MatchIntent};

/// Default round length in seconds
pub const ROUND_TIME_SECS: f32 = 99.0;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Title screen
    Menu,
    /// Picking single or two player
    ModeSelect,
    /// Fight in progress
    Playing,
    /// Fight frozen mid-round
    Paused,
    /// A winner (or draw) has been declared
    GameOver,
}

/// Match state (owned by the controller)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub player_one: Fighter,
    pub player_two: Fighter,
    pub status: MatchStatus,
    pub mode: Option<GameMode>,
    /// Winning fighter's name, or "Draw". Some iff status is GameOver.
    pub winner: Option<String>,
    pub round: u32,
    /// Seconds remaining; decreases only while Playing
    pub time_left: f32,
}

impl MatchState {
    pub fn new(round_time_secs: f32) -> Self {
        Self {
            player_one: Fighter::new(FighterSlot::PlayerOne, "Player", false),
            player_two: Fighter::new(FighterSlot::PlayerTwo, "Computer", true),
            status: MatchStatus::Menu,
            mode: None,
            winner: None,
            round: 1,
            time_left: round_time_secs,
        }
    }

    pub fn fighter(&self, slot: FighterSlot) -> &Fighter {
        match slot {
            FighterSlot::PlayerOne => &self.player_one,
            FighterSlot::PlayerTwo => &self.player_two,
        }
    }

    pub fn fighter_mut(&mut self, slot: FighterSlot) -> &mut Fighter {
        match slot {
            FighterSlot::PlayerOne => &mut self.player_one,
            FighterSlot::PlayerTwo => &mut self.player_two,
        }
    }
}

/// The simulation context: status machine, per-tick fighter updates,
/// win-condition checks. Synchronous and clock-agnostic - the async loop
/// (or a test) drives it through [`MatchController::advance`].
pub struct MatchController {
    match_id: Uuid,
    state: MatchState,
    ai: AiState,
    rng: ChaCha8Rng,
    round_time_secs: f32,
    /// Simulation clock in ms, accumulated from tick deltas
    clock_ms: f32,
    tick: u64,
}

impl MatchController {
    pub fn new(seed: u64, round_time_secs: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ai = AiState::new(&mut rng);
        Self {
            match_id: Uuid::new_v4(),
            state: MatchState::new(round_time_secs),
            ai,
            rng,
            round_time_secs,
            clock_ms: 0.0,
            tick: 0,
        }
    }

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self.match_id, self.tick, &self.state)
    }

    /// Apply a user intent from the menu/UI collaborator. Intents that are
    /// invalid for the current status are ignored.
    pub fn apply_intent(&mut self, intent: MatchIntent) {
        use MatchStatus::*;

        match (self.state.status, intent) {
            (Menu, MatchIntent::StartMatch) => {
                self.state.status = ModeSelect;
            }
            (ModeSelect, MatchIntent::SelectMode(mode)) => {
                self.begin_fight(mode);
            }
            (GameOver, MatchIntent::Restart) => {
                if let Some(mode) = self.state.mode {
                    self.begin_fight(mode);
                }
            }
            (ModeSelect | GameOver, MatchIntent::ResetToMenu) => {
                self.state.status = Menu;
                self.state.mode = None;
                self.state.winner = None;
            }
            (Playing, MatchIntent::Pause) => {
                self.state.status = Paused;
            }
            (Paused, MatchIntent::Resume) => {
                self.state.status = Playing;
            }
            (status, intent) => {
                debug!(?status, ?intent, "intent ignored for current status");
            }
        }
    }

    /// Re-initialize both fighters, the AI and the timer, then start playing.
    fn begin_fight(&mut self, mode: GameMode) {
        let (two_name, two_is_ai) = match mode {
            GameMode::SinglePlayer => ("Computer", true),
            GameMode::TwoPlayer => ("Player 2", false),
        };

        self.state.player_one = Fighter::new(FighterSlot::PlayerOne, "Player 1", false);
        self.state.player_two = Fighter::new(FighterSlot::PlayerTwo, two_name, two_is_ai);
        self.state.mode = Some(mode);
        self.state.winner = None;
        self.state.time_left = self.round_time_secs;
        self.state.status = MatchStatus::Playing;
        self.ai = AiState::new(&mut self.rng);

        info!(match_id = %self.match_id, ?mode, "Fight started");
    }

    /// Advance the simulation by one tick. `held_keys` is the single
    /// held-key snapshot taken at tick start; both fighters' inputs derive
    /// from it (or from the AI). No-op unless Playing.
    pub fn advance(&mut self, dt_ms: f32, held_keys: &HashSet<String>) {
        if self.state.status != MatchStatus::Playing {
            return;
        }

        self.clock_ms += dt_ms;
        self.tick += 1;
        let now_ms = self.clock_ms;

        // Each fighter resolves against the opponent's state as it was at
        // tick start, so update order cannot change hit outcomes.
        let one_before = self.state.player_one.clone();
        let two_before = self.state.player_two.clone();

        let input_one = self.gather_input(&one_before, &two_before, held_keys, now_ms);
        let input_two = self.gather_input(&two_before, &one_before, held_keys, now_ms);

        let mut strikes: Vec<Strike> = Vec::with_capacity(2);
        if let Some(strike) = Self::update_fighter(
            &mut self.state.player_one,
            &two_before,
            &input_one,
            dt_ms,
            now_ms,
        ) {
            strikes.push(strike);
        }
        if let Some(strike) = Self::update_fighter(
            &mut self.state.player_two,
            &one_before,
            &input_two,
            dt_ms,
            now_ms,
        ) {
            strikes.push(strike);
        }

        // Batch-and-commit: damage lands only after both fighters have
        // resolved their inputs, so a simultaneous mutual KO is well-defined.
        for strike in &strikes {
            CombatSystem::apply_strike(self.state.fighter_mut(strike.target), strike);
        }

        self.state.player_one.debug_validate();
        self.state.player_two.debug_validate();

        self.check_win_conditions(dt_ms);
    }

    /// Resolve one fighter's input for this tick: live keys through the
    /// fighter's control scheme, or an AI-synthesized key set consumed the
    /// same way.
    fn gather_input(
        &mut self,
        me: &Fighter,
        opponent: &Fighter,
        held_keys: &HashSet<String>,
        now_ms: f32,
    ) -> InputState {
        let scheme = ControlScheme::for_slot(me.slot);
        if me.is_ai && self.state.mode == Some(GameMode::SinglePlayer) {
            let virtual_keys = self.ai.think(me, opponent, now_ms, &mut self.rng);
            scheme.capture(&virtual_keys)
        } else {
            scheme.capture(held_keys)
        }
    }

    /// Per-fighter tick: resolver order matches the per-frame algorithm
    /// (timers, movement, jump, block, attack, special, integration, energy,
    /// terminal transitions). A dead fighter never changes again.
    fn update_fighter(
        fighter: &mut Fighter,
        opponent: &Fighter,
        input: &InputState,
        dt_ms: f32,
        now_ms: f32,
    ) -> Option<Strike> {
        if fighter.state == FighterState::Dead {
            return None;
        }

        PhysicsSystem::decay_timers(fighter, dt_ms, now_ms);
        PhysicsSystem::apply_movement(fighter, input);
        PhysicsSystem::apply_jump(fighter, input);
        CombatSystem::resolve_block(fighter, input);

        // An attack this tick sets the cooldown, which gates the special;
        // at most one strike per fighter per tick.
        let attack = CombatSystem::resolve_attack(fighter, opponent, input, now_ms);
        let special = CombatSystem::resolve_special(fighter, opponent, input);

        PhysicsSystem::integrate(fighter);
        PhysicsSystem::regen_energy(fighter);
        PhysicsSystem::settle_state(fighter);

        attack.or(special)
    }

    /// Win conditions, in priority order: KO (simultaneous KO is a draw),
    /// then timer expiry with a health comparison.
    fn check_win_conditions(&mut self, dt_ms: f32) {
        let one_down = !self.state.player_one.alive();
        let two_down = !self.state.player_two.alive();

        if one_down || two_down {
            let winner = if one_down && two_down {
                "Draw".to_string()
            } else if one_down {
                self.state.player_two.name.clone()
            } else {
                self.state.player_one.name.clone()
            };
            self.finish(winner);
            return;
        }

        self.state.time_left = (self.state.time_left - dt_ms / 1000.0).max(0.0);
        if self.state.time_left <= 0.0 {
            let one = &self.state.player_one;
            let two = &self.state.player_two;
            let winner = if one.health > two.health {
                one.name.clone()
            } else if two.health > one.health {
                two.name.clone()
            } else {
                "Draw".to_string()
            };
            self.finish(winner);
        }
    }

    fn finish(&mut self, winner: String) {
        info!(match_id = %self.match_id, winner = %winner, "Fight over");
        self.state.winner = Some(winner);
        self.state.status = MatchStatus::GameOver;
    }
}

/// Handle to a running match loop, shared with the input-capture, rendering
/// and menu/UI collaborators.
#[derive(Clone)]
pub struct MatchHandle {
    pub id: Uuid,
    pub intent_tx: mpsc::Sender<MatchIntent>,
    pub snapshot_tx: broadcast::Sender<MatchSnapshot>,
    pub keyboard: KeyboardState,
}

impl MatchHandle {
    /// Subscribe to per-frame match snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn start_match(&self) {
        self.send(MatchIntent::StartMatch).await;
    }

    pub async fn select_mode(&self, mode: GameMode) {
        self.send(MatchIntent::SelectMode(mode)).await;
    }

    pub async fn reset_to_menu(&self) {
        self.send(MatchIntent::ResetToMenu).await;
    }

    pub async fn restart(&self) {
        self.send(MatchIntent::Restart).await;
    }

    pub async fn pause(&self) {
        self.send(MatchIntent::Pause).await;
    }

    pub async fn resume(&self) {
        self.send(MatchIntent::Resume).await;
    }

    async fn send(&self, intent: MatchIntent) {
        let _ = self.intent_tx.send(intent).await;
    }
}

/// The match loop: owns the controller and drives it once per frame,
/// draining intents at tick start and broadcasting a snapshot after.
pub struct GameMatch {
    controller: MatchController,
    keyboard: KeyboardState,
    intent_rx: mpsc::Receiver<MatchIntent>,
    snapshot_tx: broadcast::Sender<MatchSnapshot>,
}

impl GameMatch {
    pub fn new(seed: u64, round_time_secs: f32) -> (Self, MatchHandle) {
        let (intent_tx, intent_rx) = mpsc::channel(64);
        let (snapshot_tx, _) = broadcast::channel(64);
        let keyboard = KeyboardState::new();
        let controller = MatchController::new(seed, round_time_secs);

        let handle = MatchHandle {
            id: controller.match_id(),
            intent_tx,
            snapshot_tx: snapshot_tx.clone(),
            keyboard: keyboard.clone(),
        };

        let game = Self {
            controller,
            keyboard,
            intent_rx,
            snapshot_tx,
        };

        (game, handle)
    }

    /// Run the frame loop until every handle is dropped. One tick per
    /// frame; missed frames are skipped, not replayed.
    pub async fn run(mut self) {
        info!(match_id = %self.controller.match_id(), "Match loop started");

        let mut tick_interval = interval(Duration::from_micros(TICK_DURATION_MICROS));
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            // Drain pending intents
            loop {
                match self.intent_rx.try_recv() {
                    Ok(intent) => self.controller.apply_intent(intent),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        info!(match_id = %self.controller.match_id(), "All handles dropped, stopping match loop");
                        return;
                    }
                }
            }

            // One held-key snapshot per tick; advance is a no-op unless
            // the match is playing.
            let held_keys = self.keyboard.snapshot();
            self.controller.advance(tick_delta_ms(), &held_keys);

            let _ = self.snapshot_tx.send(self.controller.snapshot());
        }
    }
}
