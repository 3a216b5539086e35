//! Errors raised when a world would break its structural invariants.

use crate::entities::RoomId;

/// A violation of the dungeon graph's invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A world needs at least an entrance.
    #[error("a world needs at least one room")]
    NoRooms,

    /// Room ids must match their position in the arena.
    #[error("room at position {position} has id {found}")]
    MisplacedRoom { position: usize, found: RoomId },

    /// A door refers to a room that does not exist.
    #[error("room {room} has a door to unknown room {neighbor}")]
    UnknownNeighbor { room: RoomId, neighbor: RoomId },

    /// A room has a door to itself.
    #[error("room {0} has a door to itself")]
    SelfLoop(RoomId),

    /// The same pair of rooms is connected twice.
    #[error("room {room} lists room {neighbor} more than once")]
    DuplicateDoor { room: RoomId, neighbor: RoomId },

    /// An edge is only recorded on one of its endpoints.
    #[error("room {from} has a door to room {to} but not the other way round")]
    AsymmetricDoor { from: RoomId, to: RoomId },

    /// A room has more doors than its capacity allows.
    #[error("room {room} has {doors} doors but room for only {capacity}")]
    OverCapacity {
        room: RoomId,
        doors: usize,
        capacity: u32,
    },

    /// The entrance must stay empty.
    #[error("the entrance holds an occupant")]
    OccupiedEntrance,

    /// The player stands in a room that does not exist.
    #[error("player is in unknown room {0}")]
    PlayerOutOfBounds(RoomId),
}
