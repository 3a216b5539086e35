//! A running game: one world, one dice handle and the combat rules.
//!
//! Every action either succeeds and reports what happened, or is rejected
//! with an [`ActionRejected`] and leaves the world exactly as it was.

use std::path::Path;

use tracing::{debug, info};

use dungeon_rules::{
    resolve, CombatObserver, CombatOutcome, CombatRules, Dice, Item, Occupant, Player, Room,
    RoomId, World,
};

use crate::config::GameConfig;
use crate::error::{ActionRejected, DungeonError};
use crate::generation::{generate, populate};
use crate::persistence::{load_from_path, save_to_path};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    /// The player holds the treasure.
    Won,
    /// The player ran out of hit points.
    Lost,
}

/// What a successful action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The player walked into `to`, fighting whatever waited there.
    Moved {
        to: RoomId,
        combat: Option<CombatOutcome>,
    },
    /// The player attacked the monster in the current room.
    Fought(CombatOutcome),
    /// The player used the item in the current room.
    UsedItem(Item),
    /// The player picked up the treasure and won.
    TookTreasure,
}

/// A game in progress.
pub struct GameSession<D> {
    world: World,
    dice: D,
    rules: CombatRules,
}

impl<D: Dice> GameSession<D> {
    /// Generate and populate a fresh dungeon.
    pub fn new_game(room_count: i64, config: &GameConfig, mut dice: D) -> Result<Self, DungeonError> {
        let rooms = config.check_room_count(room_count)?;
        let mut world = generate(rooms, config.connectivity, &mut dice)?;
        populate(&mut world, &mut dice)?;
        info!(rooms, "new game started");
        Ok(Self::resume(world, config, dice))
    }

    /// Continue playing an existing world.
    pub fn resume(world: World, config: &GameConfig, dice: D) -> Self {
        Self {
            world,
            dice,
            rules: config.combat,
        }
    }

    /// Resume from a save file.
    pub fn load(path: impl AsRef<Path>, config: &GameConfig, dice: D) -> Result<Self, DungeonError> {
        let world = load_from_path(path)?;
        Ok(Self::resume(world, config, dice))
    }

    /// Write the world to a save file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DungeonError> {
        save_to_path(&self.world, path)
    }

    /// Get the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Give up the session and keep the world.
    pub fn into_world(self) -> World {
        self.world
    }

    /// Get the game state.
    pub fn state(&self) -> GameState {
        let player = &self.world.player;
        if player.has_treasure {
            GameState::Won
        } else if !player.is_alive() {
            GameState::Lost
        } else {
            GameState::InProgress
        }
    }

    /// Get the room the player stands in.
    pub fn current_room(&self) -> Result<&Room, ActionRejected> {
        let id = self.world.player.current_room;
        self.world.room(id).ok_or(ActionRejected::Stranded(id))
    }

    /// Walk through a door of the current room.
    ///
    /// A living monster in the target room attacks at once. Winning the fight
    /// clears the room.
    pub fn move_to(
        &mut self,
        target: RoomId,
        observer: &mut impl CombatObserver,
    ) -> Result<ActionOutcome, ActionRejected> {
        self.ensure_in_progress()?;
        let from = self.world.player.current_room;
        let no_door = ActionRejected::NoDoor { from, to: target };
        if !self.current_room()?.has_door_to(target) {
            return Err(no_door);
        }

        let Self { world, dice, rules } = self;
        let (player, room) = world.player_and_room_mut(target).ok_or(no_door)?;
        player.current_room = target;
        room.visited = true;
        debug!(%from, to = %target, "player moved");

        let combat = fight(player, room, rules, dice, observer);
        Ok(ActionOutcome::Moved { to: target, combat })
    }

    /// Deal with the occupant of the current room: fight a monster or use an
    /// item.
    pub fn clear_room(
        &mut self,
        observer: &mut impl CombatObserver,
    ) -> Result<ActionOutcome, ActionRejected> {
        self.ensure_in_progress()?;
        let id = self.world.player.current_room;
        let Self { world, dice, rules } = self;
        let (player, room) = world
            .player_and_room_mut(id)
            .ok_or(ActionRejected::Stranded(id))?;
        if room.is_cleared() {
            return Err(ActionRejected::NothingToClear(id));
        }

        match &room.occupant {
            Occupant::Monster(_) => fight(player, room, rules, dice, observer)
                .map(ActionOutcome::Fought)
                .ok_or(ActionRejected::NothingToClear(id)),
            Occupant::Item(item) => {
                let item = *item;
                player.apply_item(&item);
                room.occupant = Occupant::Empty;
                room.mark_cleared();
                debug!(room = %id, item = item.name(), value = item.value, "item used");
                Ok(ActionOutcome::UsedItem(item))
            }
            Occupant::Treasure | Occupant::Empty => Err(ActionRejected::NothingToClear(id)),
        }
    }

    /// Pick up the treasure in the current room, winning the game.
    pub fn take_treasure(&mut self) -> Result<ActionOutcome, ActionRejected> {
        self.ensure_in_progress()?;
        let id = self.world.player.current_room;
        let (player, room) = self
            .world
            .player_and_room_mut(id)
            .ok_or(ActionRejected::Stranded(id))?;
        if room.is_cleared() || room.occupant != Occupant::Treasure {
            return Err(ActionRejected::NoTreasure(id));
        }

        player.has_treasure = true;
        room.mark_cleared();
        info!(room = %id, "treasure taken");
        Ok(ActionOutcome::TookTreasure)
    }

    fn ensure_in_progress(&self) -> Result<(), ActionRejected> {
        match self.state() {
            GameState::InProgress => Ok(()),
            GameState::Won | GameState::Lost => Err(ActionRejected::GameOver),
        }
    }
}

/// Fight the room's monster if it is still waiting. Returns `None` when there
/// is nothing to fight.
fn fight(
    player: &mut Player,
    room: &mut Room,
    rules: &CombatRules,
    dice: &mut impl Dice,
    observer: &mut impl CombatObserver,
) -> Option<CombatOutcome> {
    if room.is_cleared() {
        return None;
    }
    let Occupant::Monster(monster) = &mut room.occupant else {
        return None;
    };

    let outcome = resolve(player, monster, rules, dice, observer);
    match outcome {
        CombatOutcome::PlayerWon => {
            info!(room = %room.id, hp = player.hp, "monster defeated");
            room.mark_cleared();
        }
        CombatOutcome::PlayerLost => info!(room = %room.id, "player defeated"),
    }
    Some(outcome)
}
