//! Terminal front end: menus, prompts and fight narration.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use anyhow::Result;

use dungeon_core::{load_from_path, ActionOutcome, GameConfig, GameSession, GameState};
use dungeon_rules::{
    CombatEvent, CombatObserver, CombatOutcome, Combatant, Dice, Monster, Occupant, Player, Room,
    RoomId, SpecialAction,
};

/// Line based input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until the answer is a number inside `range`.
    pub fn ask_number(&mut self, prompt: &str, range: RangeInclusive<i64>) -> io::Result<i64> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let line = self.read_line()?;
            match line.trim().parse::<i64>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                Ok(_) => writeln!(
                    self.output,
                    "Invalid choice. Pick between {} and {}.",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(
                    self.output,
                    "Enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )?,
            }
        }
    }

    /// Block until the player presses Enter.
    pub fn wait_for_enter(&mut self) -> io::Result<()> {
        write!(self.output, "Press Enter to continue...")?;
        self.output.flush()?;
        self.read_line().map(drop)
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line)
    }
}

/// Prints a fight as it happens and pauses between rounds.
///
/// The observer hooks cannot fail, so the first write error is kept and
/// reported by [`FightNarrator::finish`] once the fight is over.
struct FightNarrator<'a, R, W> {
    console: &'a mut Console<R, W>,
    failed: Option<io::Error>,
}

impl<'a, R: BufRead, W: Write> FightNarrator<'a, R, W> {
    fn new(console: &'a mut Console<R, W>) -> Self {
        Self { console, failed: None }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.failed.get_or_insert(err);
        }
    }

    fn finish(self) -> io::Result<()> {
        self.failed.map_or(Ok(()), Err)
    }
}

impl<R: BufRead, W: Write> CombatObserver for FightNarrator<'_, R, W> {
    fn on_event(&mut self, event: &CombatEvent) {
        let out = self.console.output();
        let result = match event {
            CombatEvent::Special(SpecialAction::ExtraHit(damage)) => {
                writeln!(out, "The monster hurls a rock at you! ({damage} extra damage)")
            }
            CombatEvent::Special(SpecialAction::Heal(amount)) => {
                writeln!(out, "The monster rises again with {amount} extra HP!")
            }
            CombatEvent::Pattern(pattern) => writeln!(
                out,
                "Attack order: {pattern} (0 = monster attacks, 1 = you attack)"
            ),
            CombatEvent::Strike {
                attacker: Combatant::Player,
                damage,
                remaining_hp,
            } => writeln!(out, "You hit for {damage} damage, monster HP {remaining_hp}"),
            CombatEvent::Strike {
                attacker: Combatant::Monster,
                damage,
                remaining_hp,
            } => writeln!(out, "You are hit for {damage} damage, HP {remaining_hp}"),
        };
        self.record(result);
    }

    fn between_rounds(&mut self, player: &Player, monster: &Monster) {
        let result = writeln!(
            self.console.output(),
            "\n=== Status after round ===\nHP: {}/{}\n{} HP: {}\n",
            player.hp,
            player.max_hp,
            monster.name(),
            monster.hp
        );
        self.record(result);
        // A closed stdin must not stall the fight.
        let _ = self.console.wait_for_enter();
    }
}

/// Interactive start screen: a new game, or the default save with a new game
/// as fallback.
pub fn start_menu<R: BufRead, W: Write, D: Dice>(
    console: &mut Console<R, W>,
    config: &GameConfig,
    dice: D,
) -> Result<GameSession<D>> {
    writeln!(console.output(), "=== Dungeon Adventure ===\n1. New game\n2. Load game")?;
    if console.ask_number("Choice: ", 1..=2)? == 2 {
        match load_from_path(&config.save_path) {
            Ok(world) => {
                writeln!(
                    console.output(),
                    "\nGame loaded, starting in room {}",
                    world.player.current_room
                )?;
                return Ok(GameSession::resume(world, config, dice));
            }
            Err(err) => writeln!(
                console.output(),
                "Could not load {}: {err}\nStarting a new game...",
                config.save_path.display()
            )?,
        }
    }

    let prompt = format!("Number of rooms ({}-{}): ", config.min_rooms, config.max_rooms);
    let rooms = console.ask_number(&prompt, i64::from(config.min_rooms)..=i64::from(config.max_rooms))?;
    let game = GameSession::new_game(rooms, config, dice)?;
    writeln!(console.output(), "\nStarting in room {}", RoomId::ENTRANCE)?;
    Ok(game)
}

/// Run the game menu until the game ends or the player quits.
pub fn play<R: BufRead, W: Write, D: Dice>(
    game: &mut GameSession<D>,
    console: &mut Console<R, W>,
    config: &GameConfig,
) -> Result<()> {
    let room = game.current_room()?;
    show_room(console.output(), room)?;

    while game.state() == GameState::InProgress {
        writeln!(
            console.output(),
            "\n1. Move\n2. Clear room\n3. Status\n4. Take treasure\n5. Save\n6. Quit"
        )?;
        match console.ask_number("Choice: ", 1..=6)? {
            1 => move_player(game, console)?,
            2 => clear_room(game, console)?,
            3 => show_status(game, console.output())?,
            4 => match game.take_treasure() {
                Ok(_) => writeln!(console.output(), "You take the treasure!")?,
                Err(rejected) => writeln!(console.output(), "{rejected}")?,
            },
            5 => match game.save(&config.save_path) {
                Ok(()) => writeln!(console.output(), "Saved to {}", config.save_path.display())?,
                Err(err) => writeln!(console.output(), "Saving failed: {err}")?,
            },
            _ => return Ok(()),
        }
    }

    match game.state() {
        GameState::Won => writeln!(console.output(), "\n*** You win! ***")?,
        GameState::Lost => writeln!(console.output(), "\n*** Game Over ***")?,
        GameState::InProgress => {}
    }
    Ok(())
}

fn move_player<R: BufRead, W: Write, D: Dice>(
    game: &mut GameSession<D>,
    console: &mut Console<R, W>,
) -> Result<()> {
    show_doors(console.output(), game.current_room()?)?;
    let last = game.world().room_count() as i64 - 1;
    let target = RoomId(console.ask_number("Choose a door: ", 0..=last)? as u32);

    if game.current_room()?.has_door_to(target) {
        if let Some(room) = game.world().room(target) {
            writeln!(console.output(), "Moving to room {target}")?;
            writeln!(console.output(), "{}", room.describe())?;
            if let Some(Occupant::Monster(monster)) = room.pending_occupant() {
                announce_fight(console.output(), &game.world().player, monster)?;
            }
        }
    }

    let mut narrator = FightNarrator::new(console);
    let outcome = game.move_to(target, &mut narrator);
    narrator.finish()?;
    match outcome {
        Ok(ActionOutcome::Moved { combat, .. }) => {
            report_fight(console.output(), combat)?;
            if game.state() == GameState::InProgress {
                show_doors(console.output(), game.current_room()?)?;
            }
        }
        Ok(_) => {}
        Err(rejected) => writeln!(console.output(), "{rejected}")?,
    }
    Ok(())
}

fn clear_room<R: BufRead, W: Write, D: Dice>(
    game: &mut GameSession<D>,
    console: &mut Console<R, W>,
) -> Result<()> {
    if let Some(Occupant::Monster(monster)) = game.current_room()?.pending_occupant() {
        announce_fight(console.output(), &game.world().player, monster)?;
    }

    let mut narrator = FightNarrator::new(console);
    let outcome = game.clear_room(&mut narrator);
    narrator.finish()?;
    match outcome {
        Ok(ActionOutcome::Fought(outcome)) => report_fight(console.output(), Some(outcome))?,
        Ok(ActionOutcome::UsedItem(item)) => writeln!(console.output(), "You use the {}", item.name())?,
        Ok(_) => {}
        Err(_) => writeln!(console.output(), "Nothing to clear here")?,
    }
    Ok(())
}

fn show_room(out: &mut impl Write, room: &Room) -> io::Result<()> {
    writeln!(out, "{}", room.describe())?;
    show_doors(out, room)
}

fn show_doors(out: &mut impl Write, room: &Room) -> io::Result<()> {
    let doors: Vec<String> = room.doors().iter().map(ToString::to_string).collect();
    if doors.is_empty() {
        writeln!(out, "The room has no doors.")
    } else {
        writeln!(out, "The room has doors to: {}", doors.join(", "))
    }
}

fn show_status<D: Dice>(game: &GameSession<D>, out: &mut impl Write) -> io::Result<()> {
    let player = &game.world().player;
    writeln!(
        out,
        "\n=== Status ===\nHP: {}/{}\nDamage: {}\nRoom: {}",
        player.hp, player.max_hp, player.damage, player.current_room
    )?;
    if player.has_treasure {
        writeln!(out, "Carrying the treasure")?;
    }
    Ok(())
}

fn announce_fight(out: &mut impl Write, player: &Player, monster: &Monster) -> io::Result<()> {
    writeln!(
        out,
        "\n=== Fight with {} ===\nHP: {}/{}, Damage: {}\n{} HP: {}, Damage: {}\n",
        monster.name(),
        player.hp,
        player.max_hp,
        player.damage,
        monster.name(),
        monster.hp,
        monster.damage
    )
}

fn report_fight(out: &mut impl Write, combat: Option<CombatOutcome>) -> io::Result<()> {
    match combat {
        Some(CombatOutcome::PlayerWon) => writeln!(out, "The monster is defeated!"),
        Some(CombatOutcome::PlayerLost) => writeln!(out, "You have been slain."),
        None => Ok(()),
    }
}
