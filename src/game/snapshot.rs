//! Read-only match snapshots published to rendering and UI collaborators

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fighter::{Facing, Fighter, FighterSlot, FighterState};
use super::r#match::{MatchState, MatchStatus};
use super::GameMode;

/// Fighter state as seen by the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub slot: FighterSlot,
    pub name: String,
    pub is_ai: bool,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub facing: Facing,
    pub grounded: bool,
    pub health: f32,
    pub energy: f32,
    /// Attack cooldown remaining in ms (0 = can attack)
    pub attack_cooldown: f32,
    pub combo: u32,
    pub state: FighterState,
}

impl FighterSnapshot {
    fn of(fighter: &Fighter) -> Self {
        Self {
            slot: fighter.slot,
            name: fighter.name.clone(),
            is_ai: fighter.is_ai,
            x: fighter.x,
            y: fighter.y,
            vel_x: fighter.vel_x,
            vel_y: fighter.vel_y,
            facing: fighter.facing,
            grounded: fighter.grounded,
            health: fighter.health,
            energy: fighter.energy,
            attack_cooldown: fighter.attack_cooldown,
            combo: fighter.combo,
            state: fighter.state,
        }
    }
}

/// Full match snapshot, published once per frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: Uuid,
    /// Simulation tick number (advances only while playing)
    pub tick: u64,
    pub status: MatchStatus,
    pub mode: Option<GameMode>,
    pub winner: Option<String>,
    pub round: u32,
    pub time_left: f32,
    pub player_one: FighterSnapshot,
    pub player_two: FighterSnapshot,
}

impl MatchSnapshot {
    pub fn capture(match_id: Uuid, tick: u64, state: &MatchState) -> Self {
        Self {
            match_id,
            tick,
            status: state.status,
            mode: state.mode,
            winner: state.winner.clone(),
            round: state.round,
            time_left: state.time_left,
            player_one: FighterSnapshot::of(&state.player_one),
            player_two: FighterSnapshot::of(&state.player_two),
        }
    }
}
