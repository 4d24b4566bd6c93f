//! Bouncing person icons in a rectangular arena.
//!
//! [`core::Arena`](crate::core::Arena) owns the bodies and steps them one fixed tick at a time:
//! pairwise collision resolution first, then integration with wall
//! reflection and gradual speed retargeting. [`clock::SimulationClock`]
//! drives an arena shared behind a mutex at 60 Hz, and the terminal host in
//! [`ui`] reads snapshots of it.

pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod types;
pub mod ui;

pub use clock::SimulationClock;
pub use config::SimConfig;
pub use crate::core::{Arena, DeleteGesture, SharedArena};
pub use error::{ArenaError, ArenaResult};
pub use types::{ArenaSize, Body, BodyId, BodySnapshot, Vec2};
