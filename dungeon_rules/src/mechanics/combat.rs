//! Turn-based combat between the player and a single monster.
//!
//! A fight runs in rounds. Each round draws a 4-bit attack pattern and reads it
//! from the highest bit down: a set bit is a player strike, a clear bit a
//! monster strike. The fight ends the moment either side drops to zero hit
//! points, even halfway through a pattern.

use serde::{Deserialize, Serialize};

use super::SpecialAction;
use crate::dice::Dice;
use crate::entities::{Monster, Player};

/// Number of strikes encoded in one attack pattern.
pub const STRIKES_PER_ROUND: u32 = 4;

/// Toggles for optional combat behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatRules {
    /// Give monsters a 25% chance of their kind's special action before the
    /// first round.
    pub special_actions: bool,
}

/// Who lands a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Monster,
}

/// Terminal result of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    PlayerWon,
    PlayerLost,
}

/// The strike order for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPattern(pub u8);

impl AttackPattern {
    /// Strikes in evaluation order, bit 3 first.
    pub fn strikes(self) -> impl Iterator<Item = Combatant> {
        (0..STRIKES_PER_ROUND).rev().map(move |bit| {
            if (self.0 >> bit) & 1 == 1 {
                Combatant::Player
            } else {
                Combatant::Monster
            }
        })
    }
}

impl std::fmt::Display for AttackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04b}", self.0 & 0b1111)
    }
}

/// Something that happened during a fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// The monster used its special action before the first round.
    Special(SpecialAction),
    /// A new round started with this pattern.
    Pattern(AttackPattern),
    /// A strike landed. `remaining_hp` is the target's hit points afterwards.
    Strike {
        attacker: Combatant,
        damage: i32,
        remaining_hp: i32,
    },
}

/// Receives combat progress. The UI implements this to narrate the fight and
/// to pause between rounds.
pub trait CombatObserver {
    /// Called for every event as it happens.
    fn on_event(&mut self, _event: &CombatEvent) {}

    /// Called after a round in which both sides survived, before the next one.
    fn between_rounds(&mut self, _player: &Player, _monster: &Monster) {}
}

impl CombatObserver for () {}

impl CombatObserver for Vec<CombatEvent> {
    fn on_event(&mut self, event: &CombatEvent) {
        self.push(event.clone());
    }
}

/// Fight until one side is down.
///
/// Hit points of both combatants are mutated in place. The caller is
/// responsible for marking the room cleared on a win.
pub fn resolve(
    player: &mut Player,
    monster: &mut Monster,
    rules: &CombatRules,
    dice: &mut impl Dice,
    observer: &mut impl CombatObserver,
) -> CombatOutcome {
    if let Some(outcome) = decided(player, monster) {
        return outcome;
    }

    if rules.special_actions {
        if let Some(action) = monster.kind.special() {
            if dice.roll(0, 3) == 0 {
                apply_special(action, player, monster);
                observer.on_event(&CombatEvent::Special(action));
                if let Some(outcome) = decided(player, monster) {
                    return outcome;
                }
            }
        }
    }

    loop {
        let pattern = AttackPattern(dice.roll(0, 15) as u8);
        observer.on_event(&CombatEvent::Pattern(pattern));

        for attacker in pattern.strikes() {
            let event = match attacker {
                Combatant::Player => {
                    monster.hp = monster.hp.saturating_sub(player.damage);
                    CombatEvent::Strike {
                        attacker,
                        damage: player.damage,
                        remaining_hp: monster.hp,
                    }
                }
                Combatant::Monster => {
                    player.take_damage(monster.damage);
                    CombatEvent::Strike {
                        attacker,
                        damage: monster.damage,
                        remaining_hp: player.hp,
                    }
                }
            };
            observer.on_event(&event);

            if let Some(outcome) = decided(player, monster) {
                return outcome;
            }
        }

        observer.between_rounds(player, monster);
    }
}

fn decided(player: &Player, monster: &Monster) -> Option<CombatOutcome> {
    if !monster.is_alive() {
        Some(CombatOutcome::PlayerWon)
    } else if !player.is_alive() {
        Some(CombatOutcome::PlayerLost)
    } else {
        None
    }
}

fn apply_special(action: SpecialAction, player: &mut Player, monster: &mut Monster) {
    match action {
        SpecialAction::ExtraHit(amount) => player.take_damage(amount),
        SpecialAction::Heal(amount) => monster.hp = monster.hp.saturating_add(amount),
    }
}
