//! World state - the room arena, its doors and the player.
//!
//! Rooms live in a single `Vec` indexed by their dense id. Doors are stored as
//! neighbor ids on both endpoints, so the graph can be cyclic without any room
//! owning another.

use std::collections::{HashSet, VecDeque};

use crate::entities::{Item, Monster, Player, RoomId};
use crate::error::WorldError;

/// Upper bound on doors per room.
pub const MAX_DOORS: u32 = 4;

/// What a room contains.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Monster(Monster),
    Item(Item),
    Treasure,
}

impl Occupant {
    /// Check if the room holds nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }
}

/// A node of the dungeon graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    capacity: u32,
    doors: Vec<RoomId>,
    pub occupant: Occupant,
    /// The player has entered this room at least once.
    pub visited: bool,
    cleared: bool,
}

impl Room {
    /// Create an empty, unconnected room.
    pub fn new(id: RoomId, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            doors: Vec::new(),
            occupant: Occupant::Empty,
            visited: false,
            cleared: false,
        }
    }

    /// Rebuild a room from previously recorded state. The result is only
    /// checked once it becomes part of a [`World`].
    pub fn restore(
        id: RoomId,
        capacity: u32,
        doors: Vec<RoomId>,
        occupant: Occupant,
        visited: bool,
        cleared: bool,
    ) -> Self {
        Self {
            id,
            capacity,
            doors,
            occupant,
            visited,
            cleared,
        }
    }

    /// Maximum number of doors.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Neighbor ids in the order the doors were created.
    pub fn doors(&self) -> &[RoomId] {
        &self.doors
    }

    /// Current number of doors.
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Check if another door can still be added.
    pub fn has_spare_capacity(&self) -> bool {
        self.doors.len() < self.capacity as usize
    }

    /// Check if a door leads to the given room.
    pub fn has_door_to(&self, other: RoomId) -> bool {
        self.doors.contains(&other)
    }

    /// Check if the occupant has been resolved.
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Record that the occupant has been resolved. There is no way back.
    pub fn mark_cleared(&mut self) {
        self.cleared = true;
    }

    /// The occupant, if it still wants attention.
    pub fn pending_occupant(&self) -> Option<&Occupant> {
        if self.cleared || self.occupant.is_empty() {
            None
        } else {
            Some(&self.occupant)
        }
    }

    /// One-line description of what the player sees on entering.
    pub fn describe(&self) -> String {
        match (&self.occupant, self.cleared) {
            (Occupant::Monster(monster), false) => {
                format!("There is a {} in the room.", monster.name())
            }
            (Occupant::Monster(monster), true) => {
                format!("The corpse of a {} lies on the floor.", monster.name())
            }
            (Occupant::Item(item), false) => format!("A {} lies on the floor.", item.name()),
            (Occupant::Treasure, false) => "The treasure is here!".to_string(),
            (Occupant::Treasure, true) => "The empty treasure chest stands here.".to_string(),
            (Occupant::Item(_), true) | (Occupant::Empty, _) => "The room is empty.".to_string(),
        }
    }
}

/// The complete dungeon: every room plus the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    rooms: Vec<Room>,
    pub player: Player,
}

impl World {
    /// Assemble a world, checking every structural invariant.
    pub fn new(rooms: Vec<Room>, player: Player) -> Result<Self, WorldError> {
        let world = Self { rooms, player };
        world.validate()?;
        Ok(world)
    }

    /// Check the graph and player invariants.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.rooms.is_empty() {
            return Err(WorldError::NoRooms);
        }

        for (position, room) in self.rooms.iter().enumerate() {
            if room.id.index() != position {
                return Err(WorldError::MisplacedRoom {
                    position,
                    found: room.id,
                });
            }
            if room.doors.len() > room.capacity as usize {
                return Err(WorldError::OverCapacity {
                    room: room.id,
                    doors: room.doors.len(),
                    capacity: room.capacity,
                });
            }

            let mut seen = HashSet::new();
            for &neighbor in &room.doors {
                if neighbor == room.id {
                    return Err(WorldError::SelfLoop(room.id));
                }
                let Some(other) = self.room(neighbor) else {
                    return Err(WorldError::UnknownNeighbor {
                        room: room.id,
                        neighbor,
                    });
                };
                if !seen.insert(neighbor) {
                    return Err(WorldError::DuplicateDoor {
                        room: room.id,
                        neighbor,
                    });
                }
                if !other.has_door_to(room.id) {
                    return Err(WorldError::AsymmetricDoor {
                        from: room.id,
                        to: neighbor,
                    });
                }
            }
        }

        if !self.rooms[0].occupant.is_empty() {
            return Err(WorldError::OccupiedEntrance);
        }
        if self.room(self.player.current_room).is_none() {
            return Err(WorldError::PlayerOutOfBounds(self.player.current_room));
        }
        Ok(())
    }

    /// The entrance room id.
    pub fn entrance(&self) -> RoomId {
        RoomId::ENTRANCE
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Get a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Get a mutable room by id.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// All rooms in ascending id order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Mutable access to every room. Doors stay read-only.
    pub fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.iter_mut()
    }

    /// The room the player stands in.
    pub fn current_room(&self) -> Option<&Room> {
        self.room(self.player.current_room)
    }

    /// Borrow the player and a room at the same time.
    pub fn player_and_room_mut(&mut self, id: RoomId) -> Option<(&mut Player, &mut Room)> {
        let room = self.rooms.get_mut(id.index())?;
        Some((&mut self.player, room))
    }

    /// Check if two rooms share a door.
    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.room(a).is_some_and(|room| room.has_door_to(b))
    }

    /// Add a door between two rooms.
    ///
    /// Returns `false` without changing anything if the rooms are the same,
    /// already connected, unknown, or either one is out of capacity.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || self.are_connected(a, b) {
            return false;
        }
        let open = |room: Option<&Room>| room.is_some_and(Room::has_spare_capacity);
        if !open(self.room(a)) || !open(self.room(b)) {
            return false;
        }
        self.rooms[a.index()].doors.push(b);
        self.rooms[b.index()].doors.push(a);
        true
    }

    /// Every room reachable from `start` through doors.
    pub fn reachable_from(&self, start: RoomId) -> HashSet<RoomId> {
        let mut seen = HashSet::new();
        if self.room(start).is_none() {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(id) = queue.pop_front() {
            for &next in self.rooms[id.index()].doors() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Check if every room can be reached from the entrance.
    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from(self.entrance()).len() == self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::{ItemKind, MonsterKind};

    fn rooms(capacities: &[u32]) -> Vec<Room> {
        capacities
            .iter()
            .enumerate()
            .map(|(i, &cap)| Room::new(RoomId::from_index(i), cap))
            .collect()
    }

    fn world(capacities: &[u32]) -> World {
        World::new(rooms(capacities), Player::new(10)).unwrap()
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut world = world(&[2, 2, 2]);

        assert!(world.connect(RoomId(0), RoomId(2)));
        assert!(world.connect(RoomId(1), RoomId(2)));

        assert_eq!(world.room(RoomId(2)).unwrap().doors(), &[RoomId(0), RoomId(1)]);
        assert_eq!(world.room(RoomId(0)).unwrap().doors(), &[RoomId(2)]);
        assert!(world.are_connected(RoomId(1), RoomId(2)));
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_connect_refusals() {
        let mut world = world(&[1, 2, 1]);

        assert!(!world.connect(RoomId(1), RoomId(1)));
        assert!(world.connect(RoomId(0), RoomId(1)));
        assert!(!world.connect(RoomId(1), RoomId(0)));
        // Room 0 is full.
        assert!(!world.connect(RoomId(0), RoomId(2)));
        assert!(!world.connect(RoomId(1), RoomId(9)));

        assert_eq!(world.room(RoomId(0)).unwrap().door_count(), 1);
        assert_eq!(world.room(RoomId(2)).unwrap().door_count(), 0);
    }

    #[test]
    fn test_reachability() {
        let mut world = world(&[1, 2, 1, 1]);
        world.connect(RoomId(0), RoomId(1));
        world.connect(RoomId(1), RoomId(2));

        let reached = world.reachable_from(RoomId::ENTRANCE);
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&RoomId(3)));
        assert!(!world.is_fully_connected());
    }

    #[test]
    fn test_validate_rejects_asymmetric_door() {
        let mut rooms = rooms(&[1, 1]);
        rooms[0] = Room::restore(RoomId(0), 1, vec![RoomId(1)], Occupant::Empty, true, false);

        let err = World::new(rooms, Player::new(10)).unwrap_err();
        assert_eq!(
            err,
            WorldError::AsymmetricDoor {
                from: RoomId(0),
                to: RoomId(1)
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        assert_eq!(World::new(Vec::new(), Player::new(10)).unwrap_err(), WorldError::NoRooms);

        let mut swapped = rooms(&[1, 1]);
        swapped.swap(0, 1);
        assert!(matches!(
            World::new(swapped, Player::new(10)),
            Err(WorldError::MisplacedRoom { position: 0, .. })
        ));

        let mut looped = rooms(&[1]);
        looped[0] = Room::restore(RoomId(0), 1, vec![RoomId(0)], Occupant::Empty, false, false);
        assert_eq!(World::new(looped, Player::new(10)).unwrap_err(), WorldError::SelfLoop(RoomId(0)));

        let mut crowded = rooms(&[1, 1, 2]);
        crowded[0] = Room::restore(RoomId(0), 1, vec![RoomId(1), RoomId(2)], Occupant::Empty, false, false);
        assert!(matches!(
            World::new(crowded, Player::new(10)),
            Err(WorldError::OverCapacity { doors: 2, capacity: 1, .. })
        ));

        let mut occupied = rooms(&[1]);
        occupied[0].occupant = Occupant::Treasure;
        assert_eq!(World::new(occupied, Player::new(10)).unwrap_err(), WorldError::OccupiedEntrance);

        let mut lost = Player::new(10);
        lost.current_room = RoomId(5);
        assert_eq!(
            World::new(rooms(&[1, 1]), lost).unwrap_err(),
            WorldError::PlayerOutOfBounds(RoomId(5))
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_door() {
        let mut rooms = rooms(&[2, 2]);
        rooms[0] = Room::restore(RoomId(0), 2, vec![RoomId(1), RoomId(1)], Occupant::Empty, false, false);
        rooms[1] = Room::restore(RoomId(1), 2, vec![RoomId(0), RoomId(0)], Occupant::Empty, false, false);

        assert!(matches!(
            World::new(rooms, Player::new(10)),
            Err(WorldError::DuplicateDoor { .. })
        ));
    }

    #[test]
    fn test_cleared_is_sticky() {
        let mut room = Room::new(RoomId(1), 2);
        room.occupant = Occupant::Monster(Monster::new(MonsterKind::Goblin, 30, 5));
        assert!(room.pending_occupant().is_some());
        assert_eq!(room.describe(), "There is a Goblin in the room.");

        room.mark_cleared();
        assert!(room.is_cleared());
        assert!(room.pending_occupant().is_none());
        assert_eq!(room.describe(), "The corpse of a Goblin lies on the floor.");
    }

    #[test]
    fn test_describe_items_and_treasure() {
        let mut room = Room::new(RoomId(2), 1);
        assert_eq!(room.describe(), "The room is empty.");

        room.occupant = Occupant::Item(Item::new(ItemKind::PowerGlove, 4));
        assert_eq!(room.describe(), "A Power Glove lies on the floor.");

        room.occupant = Occupant::Treasure;
        assert_eq!(room.describe(), "The treasure is here!");
        room.mark_cleared();
        assert_eq!(room.describe(), "The empty treasure chest stands here.");
    }

    #[test]
    fn test_player_and_room_borrow() {
        let mut world = world(&[1, 1]);
        let (player, room) = world.player_and_room_mut(RoomId(1)).unwrap();
        player.hp -= 10;
        room.visited = true;

        assert_eq!(world.player.hp, 90);
        assert!(world.room(RoomId(1)).unwrap().visited);
        assert!(world.player_and_room_mut(RoomId(4)).is_none());
    }
}
