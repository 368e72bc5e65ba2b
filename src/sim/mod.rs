//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - One seeded gameplay stream, drawn in a fixed order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod effect;
pub mod generator;
pub mod item;
pub mod line;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use camera::Camera;
pub use effect::{Effect, EffectKind, EffectManager};
pub use generator::{GeneratorFactory, GeneratorKind, LevelGenerator, SpawnContext};
pub use item::{Item, ItemKind};
pub use line::{Line, LineEvent};
pub use player::Player;
pub use rng::XorShift32;
pub use state::{Game, GameEvent, GamePhase, Snapshot};
pub use tick::{TickInput, tick};
