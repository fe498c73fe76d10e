//! Combat resolution - blocking, attacks, specials, combo-scaled damage

use crate::game::fighter::{Fighter, FighterSlot, FighterState};
use crate::input::InputState;

/// Hit detection
pub const ATTACK_RANGE: f32 = 60.0;
pub const VERTICAL_TOLERANCE: f32 = 50.0;

/// Damage and recovery
pub const ATTACK_DAMAGE: f32 = 15.0;
pub const SPECIAL_DAMAGE: f32 = 25.0;
pub const ATTACK_COOLDOWN_MS: f32 = 500.0;
pub const SPECIAL_COOLDOWN_MS: f32 = 1000.0;

/// Energy and combo bookkeeping
pub const SPECIAL_COST: f32 = 50.0;
pub const COMBO_WINDOW_MS: f32 = 2000.0;
pub const COMBO_MAX: u32 = 10;

/// A landed hit, recorded during a fighter's update and committed by the
/// match controller only after both fighters have resolved their inputs.
/// This keeps simultaneous mutual hits order-independent.
#[derive(Debug, Clone, Copy)]
pub struct Strike {
    pub target: FighterSlot,
    pub damage: f32,
}

/// Combat system for block/attack/special resolution
pub struct CombatSystem;

impl CombatSystem {
    /// Spatial predicate for whether an attack connects.
    pub fn in_range(attacker: &Fighter, target: &Fighter) -> bool {
        (attacker.x - target.x).abs() < ATTACK_RANGE
            && (attacker.y - target.y).abs() < VERTICAL_TOLERANCE
    }

    /// Enter or leave the blocking state from held input.
    pub fn resolve_block(fighter: &mut Fighter, input: &InputState) {
        if input.block
            && fighter.block_cooldown == 0.0
            && fighter.state != FighterState::Attacking
        {
            fighter.state = FighterState::Blocking;
        } else if fighter.state == FighterState::Blocking && !input.block {
            fighter.state = FighterState::Idle;
        }
    }

    /// Resolve a normal attack. The opponent is the pre-tick snapshot; a
    /// blocking opponent takes no damage. Returns the strike to commit, if
    /// one landed.
    pub fn resolve_attack(
        attacker: &mut Fighter,
        opponent: &Fighter,
        input: &InputState,
        now_ms: f32,
    ) -> Option<Strike> {
        if !input.attack || attacker.attack_cooldown > 0.0 || attacker.state == FighterState::Hurt
        {
            return None;
        }

        attacker.state = FighterState::Attacking;
        attacker.attack_cooldown = ATTACK_COOLDOWN_MS;
        attacker.last_attack_time = now_ms;

        if Self::in_range(attacker, opponent) && opponent.state != FighterState::Blocking {
            // Combo scales damage before it increments
            let damage = ATTACK_DAMAGE + (attacker.combo as f32) * 2.0;
            attacker.combo = (attacker.combo + 1).min(COMBO_MAX);
            return Some(Strike {
                target: opponent.slot,
                damage,
            });
        }

        None
    }

    /// Resolve a special attack. Costs energy, has a longer recovery window
    /// and hits through block.
    pub fn resolve_special(
        attacker: &mut Fighter,
        opponent: &Fighter,
        input: &InputState,
    ) -> Option<Strike> {
        if !input.special || attacker.energy < SPECIAL_COST || attacker.attack_cooldown > 0.0 {
            return None;
        }

        attacker.state = FighterState::Attacking;
        attacker.attack_cooldown = SPECIAL_COOLDOWN_MS;
        attacker.energy = (attacker.energy - SPECIAL_COST).max(0.0);

        if Self::in_range(attacker, opponent) {
            let damage = SPECIAL_DAMAGE + (attacker.combo as f32) * 3.0;
            attacker.combo = (attacker.combo + 2).min(COMBO_MAX);
            return Some(Strike {
                target: opponent.slot,
                damage,
            });
        }

        None
    }

    /// Apply a committed strike to its target. Health floors at 0; the
    /// target is forced into hurt (or dead at zero health).
    pub fn apply_strike(target: &mut Fighter, strike: &Strike) {
        target.health = (target.health - strike.damage).max(0.0);
        target.state = if target.health <= 0.0 {
            FighterState::Dead
        } else {
            FighterState::Hurt
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Fighter, Fighter) {
        let mut one = Fighter::new(FighterSlot::PlayerOne, "Player 1", false);
        let mut two = Fighter::new(FighterSlot::PlayerTwo, "Player 2", false);
        // Within attack range
        one.x = 300.0;
        two.x = 340.0;
        (one, two)
    }

    fn attack_input() -> InputState {
        InputState {
            attack: true,
            ..Default::default()
        }
    }

    fn special_input() -> InputState {
        InputState {
            special: true,
            ..Default::default()
        }
    }

    #[test]
    fn in_range_thresholds() {
        let (one, mut two) = pair();
        assert!(CombatSystem::in_range(&one, &two));

        two.x = one.x + ATTACK_RANGE;
        assert!(!CombatSystem::in_range(&one, &two), "horizontal separation");

        two.x = one.x + 10.0;
        two.y = one.y - VERTICAL_TOLERANCE;
        assert!(!CombatSystem::in_range(&one, &two), "vertical separation");
    }

    #[test]
    fn attack_lands_and_increments_combo() {
        let (mut one, two) = pair();
        let strike = CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 100.0)
            .expect("attack should land");
        assert_eq!(strike.target, FighterSlot::PlayerTwo);
        assert_eq!(strike.damage, ATTACK_DAMAGE);
        assert_eq!(one.combo, 1);
        assert_eq!(one.state, FighterState::Attacking);
        assert_eq!(one.attack_cooldown, ATTACK_COOLDOWN_MS);
        assert_eq!(one.last_attack_time, 100.0);
    }

    #[test]
    fn attack_respects_cooldown_and_hurt() {
        let (mut one, two) = pair();
        one.attack_cooldown = 400.0;
        assert!(CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 0.0).is_none());

        one.attack_cooldown = 0.0;
        one.state = FighterState::Hurt;
        assert!(CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 0.0).is_none());
    }

    #[test]
    fn whiffed_attack_still_enters_recovery() {
        let (mut one, mut two) = pair();
        two.x = 700.0; // out of range
        let strike = CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 50.0);
        assert!(strike.is_none());
        assert_eq!(one.state, FighterState::Attacking);
        assert_eq!(one.attack_cooldown, ATTACK_COOLDOWN_MS);
        assert_eq!(one.combo, 0, "whiff does not build combo");
    }

    #[test]
    fn blocking_negates_normal_attack() {
        let (mut one, mut two) = pair();
        two.state = FighterState::Blocking;
        let strike = CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 0.0);
        assert!(strike.is_none());
        assert_eq!(one.combo, 0);
    }

    #[test]
    fn special_hits_through_block() {
        let (mut one, mut two) = pair();
        two.state = FighterState::Blocking;
        let strike = CombatSystem::resolve_special(&mut one, &two, &special_input())
            .expect("special should land through block");
        assert_eq!(strike.damage, SPECIAL_DAMAGE);
        assert_eq!(one.energy, 50.0);
        assert_eq!(one.attack_cooldown, SPECIAL_COOLDOWN_MS);
        assert_eq!(one.combo, 2);
    }

    #[test]
    fn special_requires_energy() {
        let (mut one, two) = pair();
        one.energy = SPECIAL_COST - 1.0;
        assert!(CombatSystem::resolve_special(&mut one, &two, &special_input()).is_none());
        assert_eq!(one.state, FighterState::Idle);
    }

    #[test]
    fn combo_scaling_strictly_increases_damage() {
        let (mut one, mut two) = pair();
        let mut last_damage = 0.0;
        for hit in 0..5 {
            one.attack_cooldown = 0.0;
            one.state = FighterState::Idle;
            let strike =
                CombatSystem::resolve_attack(&mut one, &two, &attack_input(), hit as f32 * 100.0)
                    .expect("hit should land");
            assert!(
                strike.damage > last_damage,
                "hit {} damage {} not greater than {}",
                hit,
                strike.damage,
                last_damage
            );
            assert_eq!(strike.damage, ATTACK_DAMAGE + (hit as f32) * 2.0);
            last_damage = strike.damage;
            CombatSystem::apply_strike(&mut two, &strike);
            two.state = FighterState::Idle; // shake off the hurt stun
        }
        assert_eq!(one.combo, 5);
    }

    #[test]
    fn combo_caps_at_ten() {
        let (mut one, two) = pair();
        one.combo = COMBO_MAX;
        let strike =
            CombatSystem::resolve_attack(&mut one, &two, &attack_input(), 0.0).expect("hit");
        assert_eq!(strike.damage, ATTACK_DAMAGE + (COMBO_MAX as f32) * 2.0);
        assert_eq!(one.combo, COMBO_MAX);
    }

    #[test]
    fn strike_floors_health_and_forces_hurt_or_dead() {
        let (_, mut two) = pair();
        let strike = Strike {
            target: FighterSlot::PlayerTwo,
            damage: 30.0,
        };
        CombatSystem::apply_strike(&mut two, &strike);
        assert_eq!(two.health, 70.0);
        assert_eq!(two.state, FighterState::Hurt);

        two.health = 20.0;
        CombatSystem::apply_strike(&mut two, &strike);
        assert_eq!(two.health, 0.0);
        assert_eq!(two.state, FighterState::Dead);
    }
}
