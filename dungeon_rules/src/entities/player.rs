//! The adventurer.

use super::{Item, RoomId};
use crate::mechanics::ItemEffect;

/// Hit points every new adventurer starts with.
pub const STARTING_HP: i32 = 100;

/// The player character and its progress through the dungeon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub current_room: RoomId,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub has_treasure: bool,
}

impl Player {
    /// Create a fresh player at the entrance with the given attack damage.
    pub fn new(damage: i32) -> Self {
        Self {
            current_room: RoomId::ENTRANCE,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            damage,
            has_treasure: false,
        }
    }

    /// Check if the player is still standing.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Take a hit. Hit points may drop to zero or below.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restore hit points, never above the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount).clamp(0, self.max_hp);
    }

    /// Apply the effect of a consumed item.
    pub fn apply_item(&mut self, item: &Item) {
        match item.kind.effect() {
            ItemEffect::Heal => self.heal(item.value),
            ItemEffect::BoostDamage => self.damage = self.damage.saturating_add(item.value),
            ItemEffect::BoostMaxHp => {
                self.max_hp = self.max_hp.saturating_add(item.value);
                self.heal(item.value);
            }
        }
    }
}
