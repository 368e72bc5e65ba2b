//! Game state and the events it reports
//!
//! `Game` owns everything a run needs: both lines, the active generator, the
//! single gameplay RNG stream, resources and effects. `tick` mutates it; the
//! presentation layer reads it through accessors and `drain_events`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::effect::EffectManager;
use super::generator::LevelGenerator;
use super::item::ItemKind;
use super::line::Line;
use super::rng::{DEFAULT_SEED, XorShift32};
use super::tick::{TickInput, tick};
use crate::consts::LINE_COUNT;
use crate::renderer::{self, Renderer};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Lines are digging
    Playing,
    /// Energy ran out; waiting for the return-to-title gate
    GameOver,
}

/// Things that happened during a tick, for audio and the scene layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelUp { level: u32 },
    ItemDestroyed { kind: ItemKind, line: usize },
    DamageTaken { kind: ItemKind, line: usize },
    FoodEaten { line: usize },
    PickaxeSwapped { owner: usize },
    LaneToggled { line: usize },
    /// Emitted exactly once per run
    GameOver { score: f32, level: u32 },
    ReturnToTitle,
}

/// Serializable summary of a run, used by the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generator: String,
    pub seed: u32,
    pub phase: GamePhase,
    pub score: f32,
    pub level: u32,
    pub energy: f32,
    pub distance: f32,
    pub speed: f32,
    pub camera_x: f32,
    pub pickaxe_owner: usize,
    pub items: usize,
}

/// Complete state of one run
#[derive(Debug)]
pub struct Game {
    pub(crate) tuning: Tuning,
    pub(crate) seed: u32,
    pub(crate) phase: GamePhase,
    pub(crate) score: f32,
    pub(crate) energy: f32,
    pub(crate) level: u32,
    pub(crate) speed: f32,
    /// Distance into the current level
    pub(crate) total_distance: f32,
    pub(crate) goal_distance: f32,
    pub(crate) camera: Camera,
    pub(crate) lines: [Line; LINE_COUNT],
    pub(crate) pickaxe_owner: usize,
    pub(crate) generator: Box<dyn LevelGenerator>,
    /// Gameplay stream, shared by every generator call
    pub(crate) rng: XorShift32,
    /// Cosmetic stream for particle scatter
    pub(crate) fx_rng: Pcg32,
    /// Text, particles and transfers, drawn above the lines
    pub(crate) effects: EffectManager,
    /// Dig holes, drawn under the lines
    pub(crate) bg_effects: EffectManager,
    pub(crate) game_over_timer: f32,
    pub(crate) can_return_to_title: bool,
    pub(crate) return_requested: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// Start a run. The seed drives level layout only.
    pub fn new(tuning: Tuning, generator: Box<dyn LevelGenerator>, seed: u32) -> Self {
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        let rng = XorShift32::new(seed);
        let start_x = tuning.player_start_x;

        log::info!("New run: generator {}, seed {seed}", generator.name());

        Self {
            seed,
            phase: GamePhase::Playing,
            score: 0.0,
            energy: tuning.initial_energy,
            level: 1,
            speed: tuning.speed_for_level(1),
            total_distance: 0.0,
            goal_distance: tuning.goal_distance,
            // Follows the front player from the end of the first frame
            camera: Camera::default(),
            lines: [Line::new(0, start_x), Line::new(1, start_x)],
            pickaxe_owner: 0,
            generator,
            rng,
            fx_rng: Pcg32::seed_from_u64(u64::from(seed)),
            effects: EffectManager::new(),
            bg_effects: EffectManager::new(),
            game_over_timer: 0.0,
            can_return_to_title: false,
            return_requested: false,
            events: Vec::new(),
            tuning,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer::draw_game(self, renderer);
    }

    // === Resources ===

    /// Change energy by `amount`, clamped to `[0, energy_cap]`.
    ///
    /// Reaching zero while playing ends the run. Ignored once the run is over.
    pub fn add_energy(&mut self, amount: f32) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.energy = (self.energy + amount).clamp(0.0, self.tuning.energy_cap);
        if self.energy <= 0.0 {
            self.enter_game_over();
        }
    }

    pub(crate) fn enter_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.energy = 0.0;
        self.game_over_timer = 0.0;
        self.can_return_to_title = false;
        log::info!(
            "Game over: score {}, level {}",
            crate::round(self.score),
            self.level
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }

    /// Shift every stored world X by `-offset`
    pub fn shift_world(&mut self, offset: f32) {
        self.camera.position.x -= offset;
        for line in &mut self.lines {
            line.on_coordinate_reset(offset);
        }
        self.generator.on_coordinate_reset(offset);
        self.effects.on_coordinate_reset(offset);
        self.bg_effects.on_coordinate_reset(offset);
    }

    // === Accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn distance(&self) -> f32 {
        self.total_distance
    }

    pub fn goal_distance(&self) -> f32 {
        self.goal_distance
    }

    /// Fraction of the current level covered, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.goal_distance <= 0.0 {
            return 0.0;
        }
        (self.total_distance / self.goal_distance).clamp(0.0, 1.0)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_x(&self) -> f32 {
        self.camera.position.x
    }

    pub fn lines(&self) -> &[Line; LINE_COUNT] {
        &self.lines
    }

    pub fn pickaxe_owner(&self) -> usize {
        self.pickaxe_owner
    }

    pub fn has_pickaxe(&self, line: usize) -> bool {
        self.pickaxe_owner == line
    }

    pub fn generator(&self) -> &dyn LevelGenerator {
        self.generator.as_ref()
    }

    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    pub fn bg_effects(&self) -> &EffectManager {
        &self.bg_effects
    }

    pub fn game_over_timer(&self) -> f32 {
        self.game_over_timer
    }

    pub fn can_return_to_title(&self) -> bool {
        self.can_return_to_title
    }

    /// The player asked to leave the game-over screen
    pub fn return_requested(&self) -> bool {
        self.return_requested
    }

    /// Position of a line's player, offset to where effects anchor
    pub(crate) fn player_anchor(&self, line: usize, offset: Vec2) -> Vec2 {
        self.lines[line].player.pos + offset
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event collected since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generator: self.generator.name().to_string(),
            seed: self.seed,
            phase: self.phase,
            score: self.score,
            level: self.level,
            energy: self.energy,
            distance: self.total_distance,
            speed: self.speed,
            camera_x: self.camera.position.x,
            pickaxe_owner: self.pickaxe_owner,
            items: self.lines.iter().map(|l| l.items.len()).sum(),
        }
    }
}
