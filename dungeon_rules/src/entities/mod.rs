//! Entity definitions for the dungeon.

mod item;
mod monster;
mod player;

pub use item::*;
pub use monster::*;
pub use player::*;

use serde::{Deserialize, Serialize};

/// Identifier of a room. Room ids are dense, starting at the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl RoomId {
    /// The entrance room every dungeon starts from.
    pub const ENTRANCE: RoomId = RoomId(0);

    /// Create a room id from an arena index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this room in the world's room arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the entrance room.
    pub fn is_entrance(self) -> bool {
        self == Self::ENTRANCE
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_index_roundtrip() {
        let id = RoomId::from_index(7);
        assert_eq!(id, RoomId(7));
        assert_eq!(id.index(), 7);
        assert!(!id.is_entrance());
        assert!(RoomId::ENTRANCE.is_entrance());
        assert_eq!(id.to_string(), "7");
    }
}
