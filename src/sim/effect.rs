//! Visual effects
//!
//! Effects don't affect gameplay, but they hold world coordinates and must
//! follow coordinate resets like everything else.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Palette indices used by effects
pub mod colors {
    pub const RED: u8 = 6;
    pub const GREEN: u8 = 11;
    pub const LIGHT_BLUE: u8 = 12;
    pub const GRAY: u8 = 13;
    pub const YELLOW: u8 = 14;
    pub const BLACK: u8 = 0;
}

const TEXT_RISE_SPEED: f32 = 20.0;
const PARTICLE_GRAVITY: f32 = 200.0;
const PARTICLE_SPREAD: f32 = 60.0;
const PARTICLE_LIFT: f32 = 30.0;
const HOLE_RADIUS: f32 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Text that drifts upward (score/energy deltas)
    FloatingText { text: String, color: u8 },
    /// Text that pops in place (level-up banner)
    PoppingText { text: String, color: u8 },
    /// Debris pixel under gravity
    Particle { vel: Vec2, color: u8 },
    /// Pickaxe hand-off streak from `pos` to `end`, scrolling with the players
    Transfer { end: Vec2, speed: f32 },
    /// Dug tunnel behind a player
    Hole { radius: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub pos: Vec2,
    /// Time alive (s)
    pub life: f32,
    pub max_life: f32,
}

impl Effect {
    fn new(kind: EffectKind, pos: Vec2, max_life: f32) -> Self {
        Self {
            kind,
            pos,
            life: 0.0,
            max_life,
        }
    }

    pub fn floating_text(text: impl Into<String>, pos: Vec2, color: u8) -> Self {
        let text = text.into();
        Self::new(EffectKind::FloatingText { text, color }, pos, 1.5)
    }

    pub fn popping_text(text: impl Into<String>, pos: Vec2, color: u8) -> Self {
        let text = text.into();
        Self::new(EffectKind::PoppingText { text, color }, pos, 2.0)
    }

    /// Particle with a random upward-biased velocity
    pub fn particle<R: Rng>(pos: Vec2, color: u8, rng: &mut R) -> Self {
        let vx = (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
        let vy = (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD - PARTICLE_LIFT;
        let vel = Vec2::new(vx, vy);
        Self::new(EffectKind::Particle { vel, color }, pos, 0.8)
    }

    pub fn transfer(start: Vec2, end: Vec2, speed: f32) -> Self {
        Self::new(EffectKind::Transfer { end, speed }, start, 0.2)
    }

    pub fn hole(pos: Vec2) -> Self {
        Self::new(
            EffectKind::Hole {
                radius: HOLE_RADIUS,
            },
            pos,
            5.0,
        )
    }

    /// Life elapsed as a fraction of max life
    pub fn progress(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Advance the effect. Returns false once it has finished.
    pub fn update(&mut self, dt: f32) -> bool {
        self.life += dt;
        match &mut self.kind {
            EffectKind::FloatingText { .. } => {
                self.pos.y -= TEXT_RISE_SPEED * dt;
            }
            EffectKind::Particle { vel, .. } => {
                vel.y += PARTICLE_GRAVITY * dt;
                self.pos += *vel * dt;
            }
            EffectKind::Transfer { end, speed } => {
                let step = *speed * dt;
                self.pos.x += step;
                end.x += step;
            }
            EffectKind::PoppingText { .. } | EffectKind::Hole { .. } => {}
        }
        self.life < self.max_life
    }

    pub fn on_coordinate_reset(&mut self, offset: f32) {
        self.pos.x -= offset;
        if let EffectKind::Transfer { end, .. } = &mut self.kind {
            end.x -= offset;
        }
    }
}

/// A collection of live effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectManager {
    effects: Vec<Effect>,
}

impl EffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn update(&mut self, dt: f32) {
        self.effects.retain_mut(|e| e.update(dt));
    }

    pub fn on_coordinate_reset(&mut self, offset: f32) {
        for effect in &mut self.effects {
            effect.on_coordinate_reset(offset);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
