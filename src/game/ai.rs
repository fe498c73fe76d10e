//! Opponent AI - a jittered decision cadence over a probabilistic action table
//!
//! The AI is a plain input producer: each tick it synthesizes a virtual
//! held-key set for its own control scheme, which the resolvers consume
//! exactly like live keyboard input. It sees nothing a human player cannot
//! see (both fighters' health/energy/position/state, its own cooldown).

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::game::combat::SPECIAL_COST;
use crate::game::fighter::{Fighter, FighterState};
use crate::input::ControlScheme;

/// Decision thresholds (horizontal distance in arena units)
const FAR_DISTANCE: f32 = 100.0;
const DANGER_DISTANCE: f32 = 40.0;
const STRIKE_DISTANCE: f32 = 70.0;
const MIDRANGE_DISTANCE: f32 = 120.0;

/// Action chosen by a decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Idle,
    Approach,
    Retreat,
    Attack,
    Special,
    Block,
    Jump,
}

/// Decision state for one AI-controlled fighter, independent of the
/// fighter itself. Reinitialized whenever a fight (re)starts.
#[derive(Debug, Clone)]
pub struct AiState {
    pub last_decision_time: f32, // simulation clock ms
    pub action: AiAction,
    pub action_duration: f32, // ms
    pub reaction_time: f32,   // ms until the next decision
    pub aggressiveness: f32,  // 0..=1
}

impl AiState {
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        Self {
            last_decision_time: 0.0,
            action: AiAction::Idle,
            action_duration: 0.0,
            reaction_time: rng.gen_range(300.0..500.0),
            aggressiveness: 0.6,
        }
    }

    /// Run one AI tick: re-decide if the reaction window has lapsed, then
    /// synthesize the virtual key set for the current action.
    pub fn think(
        &mut self,
        me: &Fighter,
        opponent: &Fighter,
        now_ms: f32,
        rng: &mut ChaCha8Rng,
    ) -> HashSet<String> {
        if now_ms - self.last_decision_time > self.reaction_time {
            self.decide(me, opponent, rng);
            self.last_decision_time = now_ms;
            self.reaction_time = rng.gen_range(200.0..500.0);
        }

        self.synthesize(me, opponent, now_ms)
    }

    /// Pick the next action. Rules are evaluated in order; first match wins.
    fn decide(&mut self, me: &Fighter, opponent: &Fighter, rng: &mut ChaCha8Rng) {
        let distance = (me.x - opponent.x).abs();

        // Wounded-and-winning AI becomes more aggressive
        self.aggressiveness = 0.4
            + (1.0 - me.health_ratio()) * 0.4
            + (1.0 - opponent.health_ratio()) * 0.2;

        if distance > FAR_DISTANCE {
            self.action = AiAction::Approach;
            self.action_duration = rng.gen_range(500.0..1000.0);
        } else if distance < DANGER_DISTANCE && opponent.state == FighterState::Attacking {
            self.action = if rng.gen_bool(0.7) {
                AiAction::Block
            } else {
                AiAction::Retreat
            };
            self.action_duration = rng.gen_range(300.0..500.0);
        } else if distance < STRIKE_DISTANCE && me.attack_cooldown == 0.0 {
            if rng.gen_bool(self.aggressiveness.clamp(0.0, 1.0) as f64) {
                self.action = if me.energy >= SPECIAL_COST && rng.gen_bool(0.3) {
                    AiAction::Special
                } else {
                    AiAction::Attack
                };
                self.action_duration = 200.0;
            } else {
                self.action = AiAction::Block;
                self.action_duration = 400.0;
            }
        } else if distance > STRIKE_DISTANCE && distance < MIDRANGE_DISTANCE {
            if rng.gen_bool(0.3) && me.grounded {
                self.action = AiAction::Jump;
                self.action_duration = 300.0;
            } else {
                self.action = AiAction::Approach;
                self.action_duration = 400.0;
            }
        } else {
            self.action = AiAction::Approach;
            self.action_duration = 300.0;
        }
    }

    /// Emit the virtual key set for the current action while its duration
    /// window is open.
    fn synthesize(&self, me: &Fighter, opponent: &Fighter, now_ms: f32) -> HashSet<String> {
        let mut keys = HashSet::new();
        if now_ms - self.last_decision_time >= self.action_duration {
            return keys;
        }

        let scheme = ControlScheme::for_slot(me.slot);
        let toward = if me.x < opponent.x {
            scheme.right
        } else {
            scheme.left
        };
        let away = if me.x < opponent.x {
            scheme.left
        } else {
            scheme.right
        };

        match self.action {
            AiAction::Idle => {}
            AiAction::Approach => {
                keys.insert(toward.to_string());
            }
            AiAction::Retreat => {
                keys.insert(away.to_string());
            }
            AiAction::Attack => {
                keys.insert(scheme.attack.to_string());
            }
            AiAction::Special => {
                keys.insert(scheme.special.to_string());
            }
            AiAction::Block => {
                keys.insert(scheme.block.to_string());
            }
            AiAction::Jump => {
                keys.insert(scheme.up.to_string());
                keys.insert(toward.to_string());
            }
        }

        keys
    }
}
