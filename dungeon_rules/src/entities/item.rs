//! Items lying on the floor.

use crate::dice::Dice;
use crate::mechanics::ItemKind;

/// An item instance with its rolled magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    /// Healing amount or stat bonus, depending on the kind.
    pub value: i32,
}

impl Item {
    /// Create an item with an explicit magnitude.
    pub fn new(kind: ItemKind, value: i32) -> Self {
        Self { kind, value }
    }

    /// Roll an item of the given kind.
    pub fn spawn(kind: ItemKind, dice: &mut impl Dice) -> Self {
        let range = kind.magnitude();
        Self {
            kind,
            value: dice.roll(*range.start(), *range.end()),
        }
    }

    /// Roll a uniformly chosen kind, then its magnitude.
    pub fn random(dice: &mut impl Dice) -> Self {
        let kind = ItemKind::ALL[dice.roll(0, ItemKind::ALL.len() as i32 - 1) as usize];
        Self::spawn(kind, dice)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
