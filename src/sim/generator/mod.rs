//! Procedural level generation
//!
//! A generator owns a world-X cursor. Whenever the cursor falls inside the
//! look-ahead window in front of the camera, the game asks it for one
//! generation step, which places items and moves the cursor forward.
//!
//! All randomness comes from the `XorShift32` passed in through
//! `SpawnContext`. The order of draws inside a step is fixed so that a seed
//! reproduces the same level.

pub mod path;
pub mod pattern;
pub mod rule;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use path::{ChunkParams, PathGenerator};
pub use pattern::PatternGenerator;
pub use rule::RuleGenerator;

use super::item::{Item, ItemKind};
use super::line::Line;
use super::rng::XorShift32;
use crate::consts::LINE_COUNT;

/// What a generation step may touch
pub struct SpawnContext<'a> {
    pub level: u32,
    pub lines: &'a mut [Line; LINE_COUNT],
    pub rng: &'a mut XorShift32,
}

impl SpawnContext<'_> {
    /// Place an item on a line's lane at world X
    pub fn spawn(&mut self, kind: ItemKind, line: usize, x: f32, lane: usize) {
        if let Some(target) = self.lines.get_mut(line) {
            target.add_item(Item::new(kind, line, x, lane));
        }
    }
}

/// Strategy that decides what appears ahead of the camera
pub trait LevelGenerator: fmt::Debug {
    fn name(&self) -> &'static str;

    /// World X where the next step will place items
    fn next_spawn_x(&self) -> f32;

    /// True when the cursor has entered the look-ahead window
    fn should_spawn(&self, camera_x: f32) -> bool;

    /// Run exactly one generation step
    fn spawn_item(&mut self, ctx: &mut SpawnContext<'_>);

    /// Shift every stored world X by `-offset`
    fn on_coordinate_reset(&mut self, offset: f32);
}

/// Builds the generator for a new run
pub type GeneratorFactory = Box<dyn Fn() -> Box<dyn LevelGenerator>>;

/// One placement in a hand-authored or rule-built cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnDef {
    pub kind: ItemKind,
    pub line: usize,
    pub lane: usize,
    /// Offset from the cluster's start X
    pub offset_x: f32,
}

impl SpawnDef {
    pub const fn new(kind: ItemKind, line: usize, lane: usize, offset_x: f32) -> Self {
        Self {
            kind,
            line,
            lane,
            offset_x,
        }
    }
}

/// Minimum distance between solitary food drops; grows with level
pub fn food_interval(level: u32) -> f32 {
    125.0 + level.saturating_sub(1) as f32 * 25.0
}

/// Built-in generator strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// Grid-stepped safe path with chunked difficulty
    Path,
    /// Hand-authored item clusters
    Pattern,
    /// Procedural rules (zipper, tunnel, random field)
    #[default]
    Rule,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 3] = [
        GeneratorKind::Path,
        GeneratorKind::Pattern,
        GeneratorKind::Rule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Path => "path",
            GeneratorKind::Pattern => "pattern",
            GeneratorKind::Rule => "rule",
        }
    }

    pub fn create(self) -> Box<dyn LevelGenerator> {
        match self {
            GeneratorKind::Path => Box::new(PathGenerator::new()),
            GeneratorKind::Pattern => Box::new(PatternGenerator::new()),
            GeneratorKind::Rule => Box::new(RuleGenerator::new()),
        }
    }

    pub fn factory(self) -> GeneratorFactory {
        Box::new(move || self.create())
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" => Ok(GeneratorKind::Path),
            "pattern" => Ok(GeneratorKind::Pattern),
            "rule" | "rules" => Ok(GeneratorKind::Rule),
            other => Err(format!(
                "unknown generator `{other}` (expected path, pattern or rule)"
            )),
        }
    }
}
