//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed-size step per tick
//! - Seeded RNG only (world generation)
//! - Stable iteration order (catalog order)
//! - No threading, rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{detect_celestial_contacts, resolve_craft_collisions};
pub use layout::{is_stacked, place_celestials, scatter_stars};
pub use state::{Celestial, Craft, Star, World, WorldEvent};
pub use tick::{TickInput, tick};
