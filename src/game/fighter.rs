//! Fighter entity model - pure data, no behavior

use serde::{Deserialize, Serialize};

use super::physics::GROUND_Y;

pub const MAX_HEALTH: f32 = 100.0;
pub const MAX_ENERGY: f32 = 100.0;

/// Statically-typed fighter addressing: every match has exactly these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterSlot {
    PlayerOne,
    PlayerTwo,
}

impl FighterSlot {
    pub fn opponent(self) -> FighterSlot {
        match self {
            FighterSlot::PlayerOne => FighterSlot::PlayerTwo,
            FighterSlot::PlayerTwo => FighterSlot::PlayerOne,
        }
    }

    /// Fixed spawn column per slot.
    pub fn spawn_x(self) -> f32 {
        match self {
            FighterSlot::PlayerOne => 150.0,
            FighterSlot::PlayerTwo => 650.0,
        }
    }

    /// Fighters start facing each other.
    pub fn spawn_facing(self) -> Facing {
        match self {
            FighterSlot::PlayerOne => Facing::Right,
            FighterSlot::PlayerTwo => Facing::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

/// Behavioral state - exactly one active per fighter per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterState {
    Idle,
    Walking,
    Jumping,
    Attacking,
    Blocking,
    Hurt,
    Dead,
}

/// One combatant (authoritative)
#[derive(Debug, Clone)]
pub struct Fighter {
    pub slot: FighterSlot,
    pub name: String,
    pub is_ai: bool,

    // Position and movement
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub facing: Facing,
    pub grounded: bool,

    // Vitals (clamped to [0, max])
    pub health: f32,
    pub energy: f32,

    // Combat bookkeeping
    pub attack_cooldown: f32, // ms remaining
    pub block_cooldown: f32,  // ms remaining
    pub combo: u32,           // 0..=10
    pub last_attack_time: f32, // simulation clock ms

    pub state: FighterState,
}

impl Fighter {
    /// Create a fighter at its slot's spawn position with canonical defaults.
    pub fn new(slot: FighterSlot, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            slot,
            name: name.into(),
            is_ai,
            x: slot.spawn_x(),
            y: GROUND_Y,
            vel_x: 0.0,
            vel_y: 0.0,
            facing: slot.spawn_facing(),
            grounded: true,
            health: MAX_HEALTH,
            energy: MAX_ENERGY,
            attack_cooldown: 0.0,
            block_cooldown: 0.0,
            combo: 0,
            last_attack_time: 0.0,
            state: FighterState::Idle,
        }
    }

    pub fn health_ratio(&self) -> f32 {
        self.health / MAX_HEALTH
    }

    pub fn alive(&self) -> bool {
        self.health > 0.0
    }

    /// Internal invariants - violations are programming errors, not
    /// user-facing failures.
    pub fn debug_validate(&self) {
        debug_assert!(
            (0.0..=MAX_HEALTH).contains(&self.health),
            "health out of bounds: {}",
            self.health
        );
        debug_assert!(
            (0.0..=MAX_ENERGY).contains(&self.energy),
            "energy out of bounds: {}",
            self.energy
        );
        debug_assert!(self.attack_cooldown >= 0.0);
        debug_assert!(self.block_cooldown >= 0.0);
        debug_assert!(self.combo <= 10);
        debug_assert!(
            (self.state == FighterState::Dead) == (self.health <= 0.0),
            "state {:?} inconsistent with health {}",
            self.state,
            self.health
        );
    }
}
