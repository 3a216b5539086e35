//! Monsters lurking in rooms.

use crate::dice::Dice;
use crate::mechanics::MonsterKind;

/// A monster instance. Everything except hit points and damage is derived
/// from its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub hp: i32,
    pub damage: i32,
}

impl Monster {
    /// Create a monster with explicit stats.
    pub fn new(kind: MonsterKind, hp: i32, damage: i32) -> Self {
        Self { kind, hp, damage }
    }

    /// Spawn a monster of the given kind, rolling hit points then damage.
    pub fn spawn(kind: MonsterKind, dice: &mut impl Dice) -> Self {
        let profile = kind.profile();
        let hp = dice.roll(*profile.hp.start(), *profile.hp.end());
        let damage = dice.roll(*profile.damage.start(), *profile.damage.end());
        Self { kind, hp, damage }
    }

    /// Spawn a monster of a uniformly chosen kind.
    pub fn random(dice: &mut impl Dice) -> Self {
        let kind = MonsterKind::ALL[dice.roll(0, MonsterKind::ALL.len() as i32 - 1) as usize];
        Self::spawn(kind, dice)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check if the monster is still standing.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{GameRng, ScriptedDice};

    #[test]
    fn test_spawn_within_profile() {
        let mut dice = GameRng::seeded(3);
        for _ in 0..200 {
            let monster = Monster::random(&mut dice);
            let profile = monster.kind.profile();
            assert!(profile.hp.contains(&monster.hp));
            assert!(profile.damage.contains(&monster.damage));
        }
    }

    #[test]
    fn test_spawn_roll_order() {
        let mut dice = ScriptedDice::new(vec![1, 25, 9]);
        let monster = Monster::random(&mut dice);
        assert_eq!(monster, Monster::new(MonsterKind::Skeleton, 25, 9));
        assert_eq!(monster.name(), "Skeleton");
    }
}
