//! # Dungeon Core
//!
//! The engine that turns the rules from `dungeon_rules` into a playable game.
//!
//! ## Core Components
//!
//! - **generation**: builds the room graph and places monsters, items and treasure
//! - **persistence**: the fixed binary save format with its two-pass loader
//! - **session**: movement, looting and fights against a single owned world
//! - **config**: TOML game settings
//!
//! ## Design Philosophy
//!
//! - **Explicit randomness**: every random decision goes through a `Dice` handle
//! - **Arena graph**: rooms are addressed by dense ids, doors are id lists
//! - **Rejections are not faults**: an illegal action leaves the world untouched

pub mod config;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod session;

pub use config::*;
pub use error::*;
pub use generation::*;
pub use persistence::*;
pub use session::*;
