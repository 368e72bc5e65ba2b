//! Pattern generator
//!
//! Picks hand-authored clusters from a fixed library, mirrors them at random,
//! and drops solitary food whenever the gap since the last food grows too
//! long.

use serde::{Deserialize, Serialize};

use super::{LevelGenerator, SpawnContext, SpawnDef, food_interval};
use crate::sim::item::ItemKind;

const LOOKAHEAD: f32 = 300.0;
const START_X: f32 = 300.0;
/// Random gap added after each pattern, exclusive upper bound (px)
const EXTRA_GAP: u32 = 50;
const FOOD_WIDTH: f32 = 60.0;

/// A cluster of placements and the distance it occupies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub items: Vec<SpawnDef>,
    pub width: f32,
}

impl Pattern {
    fn new(items: &[SpawnDef], width: f32) -> Self {
        Self {
            items: items.to_vec(),
            width,
        }
    }

    /// A rush pattern is all gold, each piece placed at random
    pub fn is_rush(&self) -> bool {
        self.items
            .first()
            .is_some_and(|item| item.kind == ItemKind::GoldRock)
    }
}

/// The built-in cluster library
pub fn default_patterns() -> Vec<Pattern> {
    use ItemKind::{GoldRock, Rock};
    let def = SpawnDef::new;

    vec![
        // Single rocks
        Pattern::new(&[def(Rock, 0, 0, 0.0)], 40.0),
        Pattern::new(&[def(Rock, 1, 1, 0.0)], 40.0),
        // Both lines at once
        Pattern::new(&[def(Rock, 0, 0, 0.0), def(Rock, 1, 0, 0.0)], 60.0),
        // Zig-zag
        Pattern::new(
            &[
                def(Rock, 0, 1, 0.0),
                def(Rock, 1, 0, 25.0),
                def(Rock, 0, 1, 50.0),
            ],
            80.0,
        ),
        // Two-lane wall
        Pattern::new(&[def(Rock, 0, 0, 0.0), def(Rock, 0, 1, 0.0)], 60.0),
        // Gold tucked right behind a rock
        Pattern::new(&[def(Rock, 0, 0, 0.0), def(GoldRock, 0, 0, 18.0)], 50.0),
        // Rock run
        Pattern::new(
            &[
                def(Rock, 1, 0, 0.0),
                def(Rock, 1, 0, 20.0),
                def(Rock, 1, 0, 40.0),
            ],
            70.0,
        ),
        // Gold rush
        Pattern::new(
            &[
                def(GoldRock, 0, 0, 0.0),
                def(GoldRock, 1, 1, 20.0),
                def(GoldRock, 0, 0, 40.0),
            ],
            80.0,
        ),
        // Hard wall
        Pattern::new(
            &[
                def(Rock, 0, 0, 0.0),
                def(Rock, 0, 1, 0.0),
                def(Rock, 1, 1, 20.0),
            ],
            70.0,
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternGenerator {
    patterns: Vec<Pattern>,
    next_spawn_x: f32,
    last_food_x: f32,
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGenerator {
    pub fn new() -> Self {
        Self::with_patterns(default_patterns())
    }

    /// Generator over a custom library. An empty library only drops food.
    pub fn with_patterns(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            next_spawn_x: START_X,
            last_food_x: 0.0,
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn last_food_x(&self) -> f32 {
        self.last_food_x
    }

    fn choose(&self, ctx: &mut SpawnContext<'_>) -> Pattern {
        let food_due = self.next_spawn_x - self.last_food_x > food_interval(ctx.level);
        if food_due || self.patterns.is_empty() {
            let line = ctx.rng.index(2);
            let lane = ctx.rng.index(2);
            return Pattern::new(&[SpawnDef::new(ItemKind::Food, line, lane, 0.0)], FOOD_WIDTH);
        }
        let idx = ctx.rng.index(self.patterns.len());
        self.patterns[idx].clone()
    }
}

impl LevelGenerator for PatternGenerator {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn next_spawn_x(&self) -> f32 {
        self.next_spawn_x
    }

    fn should_spawn(&self, camera_x: f32) -> bool {
        self.next_spawn_x < camera_x + LOOKAHEAD
    }

    fn spawn_item(&mut self, ctx: &mut SpawnContext<'_>) {
        let pattern = self.choose(ctx);

        let rush = pattern.is_rush();
        let flip_lane = !rush && ctx.rng.coin();
        let flip_line = !rush && ctx.rng.coin();

        for def in &pattern.items {
            let x = self.next_spawn_x + def.offset_x;

            let mut line = if flip_line { 1 - def.line } else { def.line };
            let mut lane = if flip_lane { 1 - def.lane } else { def.lane };
            if rush && def.kind == ItemKind::GoldRock {
                line = ctx.rng.index(2);
                lane = ctx.rng.index(2);
            }

            let kind = match def.kind {
                ItemKind::Rock if ctx.rng.below(10) == 0 => ItemKind::GoldRock,
                kind => kind,
            };

            if kind == ItemKind::Food && x > self.last_food_x {
                self.last_food_x = x;
            }
            ctx.spawn(kind, line, x, lane);
        }

        self.next_spawn_x += pattern.width + ctx.rng.below(EXTRA_GAP) as f32;
    }

    fn on_coordinate_reset(&mut self, offset: f32) {
        self.next_spawn_x -= offset;
        self.last_food_x -= offset;
    }
}
