//! # Dungeon Rules
//!
//! The rules crate - rooms, occupants, creatures, items and the combat resolver.
//! This crate is the single source of truth for what a dungeon *is* and how a
//! fight plays out. Building, populating and persisting dungeons lives in
//! `dungeon_core`.

pub mod dice;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use dice::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;
