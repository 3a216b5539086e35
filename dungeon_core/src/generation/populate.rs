//! Content placement - treasure, a guaranteed monster and random fill.

use tracing::info;

use dungeon_rules::{Dice, Item, Monster, Occupant, RoomId, World};

use super::MIN_ROOMS;
use crate::error::DungeonError;

/// Percentage below which a room gets a monster.
pub const MONSTER_CHANCE: i32 = 40;

/// Percentage below which a room without a monster gets an item.
pub const ITEM_CHANCE: i32 = 75;

/// Place occupants in every room except the entrance.
///
/// Exactly one room receives the treasure and a different one is guaranteed a
/// monster. Every other room rolls for a monster, an item or nothing.
pub fn populate(world: &mut World, dice: &mut impl Dice) -> Result<(), DungeonError> {
    let room_count = world.room_count();
    if room_count < MIN_ROOMS as usize {
        return Err(DungeonError::TooFewRooms {
            requested: room_count as u32,
            min: MIN_ROOMS,
        });
    }
    if world
        .rooms()
        .iter()
        .any(|room| !room.occupant.is_empty() || room.is_cleared())
    {
        return Err(DungeonError::AlreadyPopulated);
    }

    let last = room_count as i32 - 1;
    let treasure = RoomId(dice.roll(1, last) as u32);
    // Uniform over the remaining non-entrance rooms, skipping the treasure.
    let mut guard = dice.roll(1, last - 1) as u32;
    if guard >= treasure.0 {
        guard += 1;
    }
    let guard = RoomId(guard);

    let mut monsters = 1;
    let mut items = 0;
    for room in world.rooms_mut() {
        room.occupant = if room.id == treasure {
            Occupant::Treasure
        } else if room.id == guard {
            Occupant::Monster(Monster::random(dice))
        } else if room.id.is_entrance() {
            Occupant::Empty
        } else {
            match dice.roll(0, 99) {
                roll if roll < MONSTER_CHANCE => {
                    monsters += 1;
                    Occupant::Monster(Monster::random(dice))
                }
                roll if roll < ITEM_CHANCE => {
                    items += 1;
                    Occupant::Item(Item::random(dice))
                }
                _ => Occupant::Empty,
            }
        };
    }

    info!(%treasure, monsters, items, "dungeon populated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{generate, Connectivity};
    use dungeon_rules::{GameRng, ItemKind, MonsterKind, ScriptedDice};

    fn count(world: &World, predicate: impl Fn(&Occupant) -> bool) -> usize {
        world.rooms().iter().filter(|room| predicate(&room.occupant)).count()
    }

    #[test]
    fn test_population_invariants() {
        for seed in 0..30 {
            let mut dice = GameRng::seeded(seed);
            for room_count in 3..=20 {
                let mut world = generate(room_count, Connectivity::Guaranteed, &mut dice).unwrap();
                populate(&mut world, &mut dice).unwrap();

                assert_eq!(count(&world, |o| matches!(o, Occupant::Treasure)), 1);
                assert!(count(&world, |o| matches!(o, Occupant::Monster(_))) >= 1);
                assert!(world.room(RoomId::ENTRANCE).unwrap().occupant.is_empty());

                for room in world.rooms() {
                    match &room.occupant {
                        Occupant::Monster(monster) => {
                            let profile = monster.kind.profile();
                            assert!(profile.hp.contains(&monster.hp));
                            assert!(profile.damage.contains(&monster.damage));
                        }
                        Occupant::Item(item) => assert!(item.kind.magnitude().contains(&item.value)),
                        Occupant::Treasure | Occupant::Empty => {}
                    }
                }
                assert!(world.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_three_rooms_split_treasure_and_monster() {
        for seed in 0..100 {
            let mut dice = GameRng::seeded(seed);
            let mut world = generate(3, Connectivity::Legacy, &mut dice).unwrap();
            populate(&mut world, &mut dice).unwrap();

            let occupants: Vec<_> = world.rooms().iter().map(|r| r.occupant.clone()).collect();
            assert!(occupants[0].is_empty());
            let treasure = occupants.iter().filter(|o| matches!(o, Occupant::Treasure)).count();
            let monster = occupants.iter().filter(|o| matches!(o, Occupant::Monster(_))).count();
            assert_eq!((treasure, monster), (1, 1));
        }
    }

    #[test]
    fn test_guard_skips_treasure_room() {
        let mut dice = GameRng::seeded(2);
        let mut world = generate(4, Connectivity::Guaranteed, &mut dice).unwrap();

        // Treasure in room 2, guard roll 2 lands on room 3. Room 1 rolls 50
        // for a power glove of 5, then room 3 spawns a 40/6 goblin.
        let mut script = ScriptedDice::new(vec![2, 2, 50, 3, 5, 0, 40, 6]);
        populate(&mut world, &mut script).unwrap();

        assert_eq!(world.room(RoomId(2)).unwrap().occupant, Occupant::Treasure);
        assert_eq!(
            world.room(RoomId(3)).unwrap().occupant,
            Occupant::Monster(Monster::new(MonsterKind::Goblin, 40, 6))
        );
        assert_eq!(
            world.room(RoomId(1)).unwrap().occupant,
            Occupant::Item(Item::new(ItemKind::PowerGlove, 5))
        );
    }

    #[test]
    fn test_populate_rejects_tiny_world() {
        let rooms = (0..2).map(|i| dungeon_rules::Room::new(RoomId::from_index(i), 1)).collect();
        let mut world = World::new(rooms, dungeon_rules::Player::new(10)).unwrap();

        assert!(matches!(
            populate(&mut world, &mut GameRng::seeded(1)),
            Err(DungeonError::TooFewRooms { requested: 2, min: 3 })
        ));
    }

    #[test]
    fn test_populate_runs_once() {
        let mut dice = GameRng::seeded(4);
        let mut world = generate(6, Connectivity::Guaranteed, &mut dice).unwrap();
        populate(&mut world, &mut dice).unwrap();

        assert!(matches!(
            populate(&mut world, &mut dice),
            Err(DungeonError::AlreadyPopulated)
        ));
    }
}
