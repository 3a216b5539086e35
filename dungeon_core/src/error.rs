//! Error types for the `dungeon_core` crate.

use dungeon_rules::{RoomId, WorldError};

/// Everything that can go wrong outside of normal play.
#[derive(Debug, thiserror::Error)]
pub enum DungeonError {
    /// Room count outside the supported range.
    #[error("room count must be between {min} and {max}, got {requested}")]
    InvalidRoomCount { requested: i64, min: u32, max: u32 },

    /// Too few rooms to hold an entrance, a treasure and a monster.
    #[error("a dungeon needs at least {min} rooms, got {requested}")]
    TooFewRooms { requested: u32, min: u32 },

    /// The save file could not be opened, read or written.
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The save file describes a world that cannot exist.
    #[error("corrupt save: {0}")]
    CorruptSave(#[from] CorruptSave),

    /// Population only runs on a freshly generated graph.
    #[error("the dungeon has already been populated")]
    AlreadyPopulated,

    /// A world failed its structural checks.
    #[error("invalid world: {0}")]
    World(#[from] WorldError),

    /// The configuration file is not valid TOML for this game.
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but makes no sense.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Reasons a save stream is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorruptSave {
    /// The stream ended before the layout was complete.
    #[error("unexpected end of data")]
    Truncated,

    /// The room count is zero or negative.
    #[error("invalid room count {0}")]
    RoomCount(i32),

    /// A boolean byte other than 0 or 1.
    #[error("invalid boolean byte {0:#04x}")]
    Bool(u8),

    /// A negative value in a field that counts or identifies something.
    #[error("field `{field}` is negative ({value})")]
    Negative { field: &'static str, value: i32 },

    /// A stat that must be positive for a fight to end is zero or negative.
    #[error("stat `{field}` must be positive ({value})")]
    Stat { field: &'static str, value: i32 },

    /// Unknown room content tag.
    #[error("unknown content tag {0}")]
    ContentTag(i32),

    /// Unknown monster kind tag.
    #[error("unknown monster kind {0}")]
    MonsterKind(i32),

    /// Unknown item kind tag.
    #[error("unknown item kind {0}")]
    ItemKind(i32),

    /// A door leads outside the room range.
    #[error("room {room} has a door to room {neighbor}, outside the dungeon")]
    NeighborOutOfRange { room: RoomId, neighbor: i32 },

    /// The decoded rooms break a graph invariant.
    #[error(transparent)]
    Integrity(#[from] WorldError),
}

/// A player action that cannot be carried out. The world is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionRejected {
    /// There is no door between the two rooms.
    #[error("there is no door from room {from} to room {to}")]
    NoDoor { from: RoomId, to: RoomId },

    /// Nothing in the room needs clearing.
    #[error("nothing to clear in room {0}")]
    NothingToClear(RoomId),

    /// The treasure is not in this room.
    #[error("no treasure in room {0}")]
    NoTreasure(RoomId),

    /// The player stands in a room that does not exist.
    #[error("the player is not in a known room ({0})")]
    Stranded(RoomId),

    /// The game has already been won or lost.
    #[error("the game is over")]
    GameOver,
}
