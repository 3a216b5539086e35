//! Save/Load of a whole world in a fixed binary layout.
//!
//! ```text
//! i32 room_count
//! i32 current_room_id, i32 hp, i32 max_hp, i32 damage, bool has_treasure
//! room_count x (ascending id):
//!     i32 id, i32 num_doors, i32 max_doors, bool visited, bool cleared, i32 content_tag
//!     Monster: i32 kind, i32 hp, i32 damage
//!     Item:    i32 kind, i32 value
//! room_count x (same order):
//!     num_doors x i32 neighbor_id, in door creation order
//! ```
//!
//! Names and special actions are not stored; they follow from the kind tags.
//! Loading takes two passes because a door may point at a room that has not
//! been read yet: first every room and occupant, then the door section.

mod codec;

pub use codec::*;

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use dungeon_rules::{
    Item, ItemKind, Monster, MonsterKind, Occupant, Player, Room, RoomId, World, MAX_DOORS,
};

use crate::error::{CorruptSave, DungeonError};

/// Content tag of an empty room.
pub const CONTENT_EMPTY: i32 = 0;
/// Content tag of a room with a monster.
pub const CONTENT_MONSTER: i32 = 1;
/// Content tag of a room with an item.
pub const CONTENT_ITEM: i32 = 2;
/// Content tag of the treasure room.
pub const CONTENT_TREASURE: i32 = 3;

/// Rooms allocated up front while loading, whatever the header claims.
const PREALLOCATED_ROOMS: usize = 64;

/// Write a world to a byte sink.
pub fn save(world: &World, sink: &mut impl Write) -> Result<(), DungeonError> {
    let mut out = SaveWriter::new(sink);

    out.write_count(world.room_count())?;
    write_player(&mut out, &world.player)?;

    for room in world.rooms() {
        out.write_count(room.id.index())?;
        out.write_count(room.door_count())?;
        out.write_count(room.capacity() as usize)?;
        out.write_bool(room.visited)?;
        out.write_bool(room.is_cleared())?;
        write_occupant(&mut out, &room.occupant)?;
    }

    for room in world.rooms() {
        for neighbor in room.doors() {
            out.write_count(neighbor.index())?;
        }
    }

    out.finish()?;
    Ok(())
}

/// Read a world from a byte source.
pub fn load(source: &mut impl Read) -> Result<World, DungeonError> {
    let mut input = SaveReader::new(source);

    let room_count = input.read_i32()?;
    if room_count <= 0 {
        return Err(CorruptSave::RoomCount(room_count).into());
    }
    let player = read_player(&mut input)?;

    // Pass 1: rooms and occupants. Doors are only counted here.
    let mut headers = Vec::with_capacity((room_count as usize).min(PREALLOCATED_ROOMS));
    for _ in 0..room_count {
        headers.push(RoomHeader::read(&mut input)?);
    }

    // Pass 2: resolve every door against the now complete room set.
    let mut rooms = Vec::with_capacity(headers.len());
    for header in headers {
        let mut doors = Vec::with_capacity(header.doors.min(MAX_DOORS) as usize);
        for _ in 0..header.doors {
            let neighbor = input.read_i32()?;
            if !(0..room_count).contains(&neighbor) {
                return Err(CorruptSave::NeighborOutOfRange {
                    room: header.id,
                    neighbor,
                }
                .into());
            }
            doors.push(RoomId(neighbor as u32));
        }
        rooms.push(Room::restore(
            header.id,
            header.capacity,
            doors,
            header.occupant,
            header.visited,
            header.cleared,
        ));
    }

    let world = World::new(rooms, player).map_err(CorruptSave::Integrity)?;
    Ok(world)
}

/// Encode a world into a fresh buffer.
pub fn encode(world: &World) -> Result<Vec<u8>, DungeonError> {
    let mut bytes = Vec::new();
    save(world, &mut bytes)?;
    Ok(bytes)
}

/// Decode a world from a byte slice. Trailing bytes are ignored.
pub fn decode(mut bytes: &[u8]) -> Result<World, DungeonError> {
    load(&mut bytes)
}

/// Save a world to a file, replacing it only once the new data is on disk.
pub fn save_to_path(world: &World, path: impl AsRef<Path>) -> Result<(), DungeonError> {
    let path = path.as_ref();
    let bytes = encode(world)?;
    let staging = staging_path(path);

    fs::write(&staging, &bytes)?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }

    info!(path = %path.display(), bytes = bytes.len(), "game saved");
    Ok(())
}

/// Load a world from a file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<World, DungeonError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    match load(&mut BufReader::new(file)) {
        Ok(world) => {
            info!(path = %path.display(), rooms = world.room_count(), "game loaded");
            Ok(world)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "rejected save file");
            Err(err)
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_player<W: Write>(out: &mut SaveWriter<W>, player: &Player) -> Result<(), DungeonError> {
    out.write_count(player.current_room.index())?;
    out.write_i32(player.hp)?;
    out.write_i32(player.max_hp)?;
    out.write_i32(player.damage)?;
    out.write_bool(player.has_treasure)?;
    Ok(())
}

fn read_player<R: Read>(input: &mut SaveReader<R>) -> Result<Player, DungeonError> {
    Ok(Player {
        current_room: RoomId(input.read_count("current_room_id")?),
        hp: input.read_i32()?,
        max_hp: input.read_positive("max_hp")?,
        damage: input.read_positive("damage")?,
        has_treasure: input.read_bool()?,
    })
}

fn write_occupant<W: Write>(out: &mut SaveWriter<W>, occupant: &Occupant) -> Result<(), DungeonError> {
    match occupant {
        Occupant::Empty => out.write_i32(CONTENT_EMPTY)?,
        Occupant::Monster(monster) => {
            out.write_i32(CONTENT_MONSTER)?;
            out.write_i32(monster.kind.tag())?;
            out.write_i32(monster.hp)?;
            out.write_i32(monster.damage)?;
        }
        Occupant::Item(item) => {
            out.write_i32(CONTENT_ITEM)?;
            out.write_i32(item.kind.tag())?;
            out.write_i32(item.value)?;
        }
        Occupant::Treasure => out.write_i32(CONTENT_TREASURE)?,
    }
    Ok(())
}

/// A monster still waiting in an uncleared room must be alive; a defeated
/// one stays behind as a corpse with whatever hit points it ended on.
fn read_occupant<R: Read>(input: &mut SaveReader<R>, cleared: bool) -> Result<Occupant, DungeonError> {
    let occupant = match input.read_i32()? {
        CONTENT_EMPTY => Occupant::Empty,
        CONTENT_MONSTER => {
            let tag = input.read_i32()?;
            let kind = MonsterKind::from_tag(tag).ok_or(CorruptSave::MonsterKind(tag))?;
            let hp = if cleared {
                input.read_i32()?
            } else {
                input.read_positive("monster_hp")?
            };
            let damage = input.read_positive("monster_damage")?;
            Occupant::Monster(Monster::new(kind, hp, damage))
        }
        CONTENT_ITEM => {
            let tag = input.read_i32()?;
            let kind = ItemKind::from_tag(tag).ok_or(CorruptSave::ItemKind(tag))?;
            Occupant::Item(Item::new(kind, input.read_i32()?))
        }
        CONTENT_TREASURE => Occupant::Treasure,
        other => return Err(CorruptSave::ContentTag(other).into()),
    };
    Ok(occupant)
}

/// Everything about a room except where its doors lead.
struct RoomHeader {
    id: RoomId,
    doors: u32,
    capacity: u32,
    visited: bool,
    cleared: bool,
    occupant: Occupant,
}

impl RoomHeader {
    fn read<R: Read>(input: &mut SaveReader<R>) -> Result<Self, DungeonError> {
        let id = RoomId(input.read_count("id")?);
        let doors = input.read_count("num_doors")?;
        let capacity = input.read_count("max_doors")?;
        let visited = input.read_bool()?;
        let cleared = input.read_bool()?;
        Ok(Self {
            id,
            doors,
            capacity,
            visited,
            cleared,
            occupant: read_occupant(input, cleared)?,
        })
    }
}
