//! Fighter physics and movement constraints

use crate::game::combat::COMBO_WINDOW_MS;
use crate::game::fighter::{Facing, Fighter, FighterState, MAX_ENERGY};
use crate::input::InputState;

/// Arena bounds (canvas pixel space)
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_MARGIN: f32 = 50.0;
pub const GROUND_Y: f32 = 320.0;

/// Movement constants, applied per tick (not dt-scaled)
pub const GRAVITY: f32 = 0.8;
pub const JUMP_FORCE: f32 = -15.0;
pub const MOVE_SPEED: f32 = 5.0;
pub const ENERGY_REGEN: f32 = 0.5;

/// Recovery thresholds: a state reverts to idle once the attack cooldown
/// has decayed below these (ms remaining).
pub const ATTACK_RECOVER_MS: f32 = 300.0;
pub const HURT_RECOVER_MS: f32 = 200.0;

/// Physics system for per-tick fighter movement and state settling
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Decay cooldowns by elapsed time (floored at 0) and reset the combo
    /// once the combo window has lapsed since the last attack.
    pub fn decay_timers(fighter: &mut Fighter, dt_ms: f32, now_ms: f32) {
        fighter.attack_cooldown = (fighter.attack_cooldown - dt_ms).max(0.0);
        fighter.block_cooldown = (fighter.block_cooldown - dt_ms).max(0.0);

        if now_ms - fighter.last_attack_time > COMBO_WINDOW_MS {
            fighter.combo = 0;
        }
    }

    /// Horizontal movement from held directional keys. Attacking and hurt
    /// fighters cannot steer; releasing both keys while walking stops.
    pub fn apply_movement(fighter: &mut Fighter, input: &InputState) {
        let can_steer =
            fighter.state != FighterState::Attacking && fighter.state != FighterState::Hurt;

        if input.left && can_steer {
            fighter.vel_x = -MOVE_SPEED;
            fighter.facing = Facing::Left;
            if fighter.grounded {
                fighter.state = FighterState::Walking;
            }
        } else if input.right && can_steer {
            fighter.vel_x = MOVE_SPEED;
            fighter.facing = Facing::Right;
            if fighter.grounded {
                fighter.state = FighterState::Walking;
            }
        } else if fighter.state == FighterState::Walking {
            fighter.vel_x = 0.0;
            fighter.state = FighterState::Idle;
        }
    }

    /// Jump from the ground. Not available mid-attack.
    pub fn apply_jump(fighter: &mut Fighter, input: &InputState) {
        if input.up && fighter.grounded && fighter.state != FighterState::Attacking {
            fighter.vel_y = JUMP_FORCE;
            fighter.grounded = false;
            fighter.state = FighterState::Jumping;
        }
    }

    /// Gravity integration, arena clamping and ground collision.
    pub fn integrate(fighter: &mut Fighter) {
        fighter.vel_y += GRAVITY;
        fighter.x += fighter.vel_x;
        fighter.y += fighter.vel_y;

        // Horizontal clamp to arena bounds
        fighter.x = fighter.x.clamp(ARENA_MARGIN, ARENA_WIDTH - ARENA_MARGIN);

        // Ground collision
        if fighter.y >= GROUND_Y {
            fighter.y = GROUND_Y;
            fighter.vel_y = 0.0;
            fighter.grounded = true;
            if fighter.state == FighterState::Jumping {
                fighter.state = FighterState::Idle;
            }
        }
    }

    /// Energy regeneration up to max.
    pub fn regen_energy(fighter: &mut Fighter) {
        if fighter.energy < MAX_ENERGY {
            fighter.energy = (fighter.energy + ENERGY_REGEN).min(MAX_ENERGY);
        }
    }

    /// Terminal state transitions. Death overrides everything else.
    pub fn settle_state(fighter: &mut Fighter) {
        if fighter.state == FighterState::Attacking
            && fighter.attack_cooldown < ATTACK_RECOVER_MS
        {
            fighter.state = FighterState::Idle;
        }

        if fighter.state == FighterState::Hurt && fighter.attack_cooldown < HURT_RECOVER_MS {
            fighter.state = FighterState::Idle;
        }

        if fighter.health <= 0.0 {
            fighter.state = FighterState::Dead;
        }
    }
}
