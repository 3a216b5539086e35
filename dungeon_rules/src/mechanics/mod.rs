//! Game mechanics: kind tables for monsters and items, and combat.
//!
//! Names, stat ranges and special actions are pure functions of a kind tag.
//! They are never stored on an instance, so a freshly spawned monster and a
//! loaded one always agree.

mod combat;

pub use combat::*;

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Monster kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Skeleton,
}

/// Stat ranges and behavior shared by every monster of a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterProfile {
    pub name: &'static str,
    pub hp: RangeInclusive<i32>,
    pub damage: RangeInclusive<i32>,
    pub special: Option<SpecialAction>,
}

/// A once-per-encounter trick a monster may pull before the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAction {
    /// A flat hit on the player.
    ExtraHit(i32),
    /// The monster restores hit points.
    Heal(i32),
}

impl MonsterKind {
    /// Every kind, in tag order.
    pub const ALL: [MonsterKind; 2] = [MonsterKind::Goblin, MonsterKind::Skeleton];

    /// The kind's stat table.
    pub fn profile(self) -> MonsterProfile {
        match self {
            MonsterKind::Goblin => MonsterProfile {
                name: "Goblin",
                hp: 30..=49,
                damage: 5..=9,
                special: Some(SpecialAction::ExtraHit(5)),
            },
            MonsterKind::Skeleton => MonsterProfile {
                name: "Skeleton",
                hp: 20..=34,
                damage: 8..=14,
                special: Some(SpecialAction::Heal(10)),
            },
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.profile().name
    }

    /// Special action, if the kind has one.
    pub fn special(self) -> Option<SpecialAction> {
        self.profile().special
    }

    /// Stable numeric tag.
    pub fn tag(self) -> i32 {
        match self {
            MonsterKind::Goblin => 0,
            MonsterKind::Skeleton => 1,
        }
    }

    /// Look a kind up by its numeric tag.
    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(MonsterKind::Goblin),
            1 => Some(MonsterKind::Skeleton),
            _ => None,
        }
    }
}

/// Item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    SmallPotion,
    MediumPotion,
    LargePotion,
    PowerGlove,
    MagicAmulet,
}

/// What consuming an item does to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restore hit points up to the maximum.
    Heal,
    /// Raise attack damage.
    BoostDamage,
    /// Raise maximum hit points, and current hit points by the same amount.
    BoostMaxHp,
}

impl ItemKind {
    /// Every kind, in tag order.
    pub const ALL: [ItemKind; 5] = [
        ItemKind::SmallPotion,
        ItemKind::MediumPotion,
        ItemKind::LargePotion,
        ItemKind::PowerGlove,
        ItemKind::MagicAmulet,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::SmallPotion => "Small Health Potion",
            ItemKind::MediumPotion => "Medium Health Potion",
            ItemKind::LargePotion => "Large Health Potion",
            ItemKind::PowerGlove => "Power Glove",
            ItemKind::MagicAmulet => "Magic Amulet",
        }
    }

    /// Range the magnitude is rolled from.
    pub fn magnitude(self) -> RangeInclusive<i32> {
        match self {
            ItemKind::SmallPotion => 5..=10,
            ItemKind::MediumPotion => 10..=20,
            ItemKind::LargePotion => 20..=35,
            ItemKind::PowerGlove => 3..=6,
            ItemKind::MagicAmulet => 1..=10,
        }
    }

    /// Effect on the player.
    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::SmallPotion | ItemKind::MediumPotion | ItemKind::LargePotion => {
                ItemEffect::Heal
            }
            ItemKind::PowerGlove => ItemEffect::BoostDamage,
            ItemKind::MagicAmulet => ItemEffect::BoostMaxHp,
        }
    }

    /// Stable numeric tag.
    pub fn tag(self) -> i32 {
        match self {
            ItemKind::SmallPotion => 0,
            ItemKind::MediumPotion => 1,
            ItemKind::LargePotion => 2,
            ItemKind::PowerGlove => 3,
            ItemKind::MagicAmulet => 4,
        }
    }

    /// Look a kind up by its numeric tag.
    pub fn from_tag(tag: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}
