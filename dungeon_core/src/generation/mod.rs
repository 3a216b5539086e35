//! Dungeon generation - the room graph and its contents.
//!
//! Generation runs in three steps:
//! 1. **Rooms**: every room rolls a door capacity between 1 and 4
//! 2. **Backbone**: rooms are linked into a spanning structure
//! 3. **Augmentation**: rooms with spare capacity get extra random doors
//!
//! Capacity is a hard limit. A door that would overflow either endpoint is
//! simply not built, so a room can end up with fewer doors than its capacity.

mod populate;

pub use populate::*;

use serde::Deserialize;
use tracing::{debug, info};

use dungeon_rules::{Dice, Player, Room, RoomId, World, MAX_DOORS};

use crate::error::DungeonError;

/// Smallest dungeon that can hold an entrance, a treasure and a monster.
pub const MIN_ROOMS: u32 = 3;

/// Target draws per spare door slot before augmentation gives up on it.
pub const AUGMENT_ATTEMPTS: u32 = 100;

/// How the backbone links rooms together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Capacities are widened just enough for a spanning tree and every room
    /// is attached to the tree. Every room is reachable from the entrance.
    #[default]
    Guaranteed,
    /// Each room links to a random earlier room. The link is dropped when
    /// that room is full, which can strand part of the dungeon.
    Legacy,
}

/// Build a new dungeon graph with an entrance, a fresh player and no occupants.
pub fn generate(
    room_count: u32,
    connectivity: Connectivity,
    dice: &mut impl Dice,
) -> Result<World, DungeonError> {
    if room_count < MIN_ROOMS {
        return Err(DungeonError::TooFewRooms {
            requested: room_count,
            min: MIN_ROOMS,
        });
    }

    let mut capacities: Vec<u32> = (0..room_count)
        .map(|_| dice.roll(1, MAX_DOORS as i32) as u32)
        .collect();
    let player = Player::new(dice.roll(10, 19));

    if connectivity == Connectivity::Guaranteed {
        widen_for_spanning_tree(&mut capacities, dice);
    }

    let rooms = capacities
        .iter()
        .enumerate()
        .map(|(index, &capacity)| Room::new(RoomId::from_index(index), capacity))
        .collect();
    let mut world = World::new(rooms, player)?;

    match connectivity {
        Connectivity::Guaranteed => attach_spanning_tree(&mut world, dice),
        Connectivity::Legacy => link_to_earlier_rooms(&mut world, dice),
    }
    augment(&mut world, dice);

    if let Some(entrance) = world.room_mut(RoomId::ENTRANCE) {
        entrance.visited = true;
    }

    let doors: usize = world.rooms().iter().map(Room::door_count).sum();
    info!(
        rooms = room_count,
        doors = doors / 2,
        connected = world.is_fully_connected(),
        ?connectivity,
        "dungeon graph generated"
    );
    Ok(world)
}

/// Raise capacities of random rooms until a spanning tree fits.
///
/// A tree over `n` rooms needs `2(n-1)` door slots in total. Since every room
/// may hold up to four doors there is always a room left to widen.
fn widen_for_spanning_tree(capacities: &mut [u32], dice: &mut impl Dice) {
    let needed = 2 * (capacities.len() as u32).saturating_sub(1);
    while capacities.iter().sum::<u32>() < needed {
        let narrow: Vec<usize> = capacities
            .iter()
            .enumerate()
            .filter(|(_, &capacity)| capacity < MAX_DOORS)
            .map(|(index, _)| index)
            .collect();
        let Some(&index) = narrow.get(dice.roll(0, narrow.len() as i32 - 1) as usize) else {
            break;
        };
        capacities[index] += 1;
        debug!(room = index, capacity = capacities[index], "widened room to fit the backbone");
    }
}

/// Attach every room to the growing tree through a room with a free door.
///
/// Rooms that can pass the tree on (capacity two or more) go first, dead ends
/// last, so the tree never runs out of free doors.
fn attach_spanning_tree(world: &mut World, dice: &mut impl Dice) {
    let mut pending: Vec<RoomId> = world.rooms().iter().skip(1).map(|room| room.id).collect();
    pending.sort_by_key(|&id| world.room(id).map_or(true, |room| room.capacity() < 2));

    let mut attached = vec![RoomId::ENTRANCE];
    for id in pending {
        let open: Vec<RoomId> = attached
            .iter()
            .copied()
            .filter(|&candidate| world.room(candidate).is_some_and(Room::has_spare_capacity))
            .collect();
        let Some(&parent) = open.get(dice.roll(0, open.len() as i32 - 1) as usize) else {
            debug!(room = %id, "no attached room has a free door");
            continue;
        };
        world.connect(parent, id);
        attached.push(id);
    }
}

/// Link each room to a uniformly chosen earlier room, dropping the link when
/// either side is full.
fn link_to_earlier_rooms(world: &mut World, dice: &mut impl Dice) {
    for index in 1..world.room_count() {
        let id = RoomId::from_index(index);
        let earlier = RoomId::from_index(dice.roll(0, index as i32 - 1) as usize);
        if !world.connect(earlier, id) {
            debug!(room = %id, target = %earlier, "backbone door dropped, room at capacity");
        }
    }
}

/// Fill spare door slots with random extra doors.
fn augment(world: &mut World, dice: &mut impl Dice) {
    let last = world.room_count() as i32 - 1;
    for index in 0..world.room_count() {
        let id = RoomId::from_index(index);
        let spare = world
            .room(id)
            .map_or(0, |room| (room.capacity() as usize).saturating_sub(room.door_count()));

        for _ in 0..spare {
            let target = (0..AUGMENT_ATTEMPTS)
                .map(|_| RoomId(dice.roll(0, last) as u32))
                .find(|&candidate| candidate != id && !world.are_connected(id, candidate));

            match target {
                Some(target) => {
                    if !world.connect(id, target) {
                        debug!(room = %id, %target, "extra door refused, target at capacity");
                    }
                }
                None => debug!(room = %id, "gave up on a spare door slot"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_rules::{GameRng, ScriptedDice};
    use std::collections::HashSet;

    fn assert_graph_invariants(world: &World, room_count: u32) {
        assert_eq!(world.room_count(), room_count as usize);
        for (index, room) in world.rooms().iter().enumerate() {
            assert_eq!(room.id.index(), index);
            assert!((1..=MAX_DOORS).contains(&room.capacity()));
            assert!(room.door_count() <= room.capacity() as usize);

            let unique: HashSet<_> = room.doors().iter().collect();
            assert_eq!(unique.len(), room.door_count(), "duplicate door in room {}", room.id);
            for &neighbor in room.doors() {
                assert_ne!(neighbor, room.id);
                let back = world.room(neighbor).unwrap();
                assert_eq!(back.doors().iter().filter(|&&d| d == room.id).count(), 1);
            }
            assert!(room.occupant.is_empty());
        }
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_dungeons() {
        let mut dice = GameRng::seeded(1);
        assert!(matches!(
            generate(2, Connectivity::Guaranteed, &mut dice),
            Err(DungeonError::TooFewRooms { requested: 2, min: 3 })
        ));
        let err = generate(1, Connectivity::Guaranteed, &mut dice).unwrap_err();
        assert_eq!(err.to_string(), "a dungeon needs at least 3 rooms, got 1");
        assert!(generate(0, Connectivity::Legacy, &mut dice).is_err());
    }

    #[test]
    fn test_graph_invariants_for_all_sizes() {
        for connectivity in [Connectivity::Guaranteed, Connectivity::Legacy] {
            for seed in 0..20 {
                let mut dice = GameRng::seeded(seed);
                for room_count in 3..=20 {
                    let world = generate(room_count, connectivity, &mut dice).unwrap();
                    assert_graph_invariants(&world, room_count);
                }
            }
        }
    }

    #[test]
    fn test_guaranteed_graph_is_connected() {
        for seed in 0..50 {
            let mut dice = GameRng::seeded(seed);
            for room_count in 3..=20 {
                let world = generate(room_count, Connectivity::Guaranteed, &mut dice).unwrap();
                assert!(world.is_fully_connected(), "seed {seed}, {room_count} rooms");
            }
        }
    }

    #[test]
    fn test_fresh_player_and_entrance() {
        let mut dice = GameRng::seeded(5);
        let world = generate(8, Connectivity::Guaranteed, &mut dice).unwrap();

        assert_eq!(world.entrance(), RoomId::ENTRANCE);
        assert_eq!(world.player.current_room, RoomId::ENTRANCE);
        assert_eq!(world.player.hp, 100);
        assert_eq!(world.player.max_hp, 100);
        assert!((10..=19).contains(&world.player.damage));
        assert!(!world.player.has_treasure);
        assert!(world.room(RoomId::ENTRANCE).unwrap().visited);
        assert!(world.rooms().iter().skip(1).all(|room| !room.visited));
    }

    #[test]
    fn test_legacy_can_strand_rooms() {
        // Capacities 1/1/1, damage 10, backbone picks room 0 twice, then the
        // only spare slot (room 2) targets the full room 0.
        let mut dice = ScriptedDice::new(vec![1, 1, 1, 10, 0, 0, 0]);
        let world = generate(3, Connectivity::Legacy, &mut dice).unwrap();

        assert_eq!(world.room(RoomId(0)).unwrap().doors(), &[RoomId(1)]);
        assert_eq!(world.room(RoomId(2)).unwrap().door_count(), 0);
        assert!(!world.is_fully_connected());
        assert_eq!(dice.drawn(), 7);
    }

    #[test]
    fn test_augmentation_gives_up_on_saturated_graph() {
        // Capacities 4/1/1, damage 10, backbone links both rooms to room 0.
        // Every later draw (the script cycles, clamped to 0..=2) lands on room
        // 0 itself or a neighbor it already has.
        let mut dice = ScriptedDice::new(vec![4, 1, 1, 10, 0, 0]);
        let world = generate(3, Connectivity::Legacy, &mut dice).unwrap();

        let entrance = world.room(RoomId::ENTRANCE).unwrap();
        assert_eq!(entrance.doors(), &[RoomId(1), RoomId(2)]);
        assert_eq!(entrance.capacity(), 4);
        assert!(entrance.has_spare_capacity());
        assert_eq!(dice.drawn(), 6 + 2 * AUGMENT_ATTEMPTS as usize);
        assert!(world.validate().is_ok());
        assert!(world.is_fully_connected());
    }

    #[test]
    fn test_guaranteed_widens_narrow_rooms() {
        // Same capacities; the widening roll picks room 1.
        let mut dice = ScriptedDice::new(vec![1, 1, 1, 10]);
        let world = generate(3, Connectivity::Guaranteed, &mut dice).unwrap();

        assert_eq!(world.room(RoomId(1)).unwrap().capacity(), 2);
        assert_eq!(world.room(RoomId(0)).unwrap().doors(), &[RoomId(1)]);
        assert_eq!(world.room(RoomId(1)).unwrap().doors(), &[RoomId(0), RoomId(2)]);
        assert!(world.is_fully_connected());
    }

    #[test]
    fn test_augmentation_uses_spare_capacity() {
        // Every room may hold four doors; with three rooms the graph saturates
        // into a triangle.
        let mut dice = GameRng::seeded(9);
        let mut capacities = ScriptedDice::new(vec![4, 4, 4]);
        let mut world = World::new(
            (0..3)
                .map(|i| Room::new(RoomId::from_index(i), capacities.roll(1, 4) as u32))
                .collect(),
            Player::new(10),
        )
        .unwrap();

        link_to_earlier_rooms(&mut world, &mut dice);
        augment(&mut world, &mut dice);

        for room in world.rooms() {
            assert_eq!(room.door_count(), 2);
        }
    }
}
