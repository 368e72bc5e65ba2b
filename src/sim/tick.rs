//! Per-frame simulation step
//!
//! Advances a `Game` by one frame in a fixed order: progression, resources,
//! input, generation, lines, effects, camera and finally the coordinate
//! reset. Given the same seed and inputs the result is bit-for-bit repeatable.

use glam::Vec2;

use super::effect::{Effect, colors};
use super::generator::SpawnContext;
use super::item::ItemKind;
use super::line::{LineEvent, LineFrame};
use super::state::{Game, GameEvent, GamePhase};
use crate::consts::LINE_COUNT;

/// Particles per destroyed obstacle
const DEBRIS_COUNT: usize = 10;
/// Pickaxe streak anchor relative to the player
const TRANSFER_OFFSET: Vec2 = Vec2::new(20.0, 8.0);
const DEBRIS_OFFSET: Vec2 = Vec2::new(8.0, 8.0);
/// Floating text sits just above the player
const TEXT_OFFSET: Vec2 = Vec2::new(0.0, -10.0);
/// Level banner height (screen Y)
const BANNER_Y: f32 = 60.0;

/// Debounced button presses for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Toggle the upper line's lane
    pub toggle_upper: bool,
    /// Toggle the lower line's lane
    pub toggle_lower: bool,
    /// Hand the pickaxe to the other line
    pub swap_pickaxe: bool,
}

impl TickInput {
    pub fn any_lane(&self) -> bool {
        self.toggle_upper || self.toggle_lower
    }
}

/// Advance the game by one frame
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    if game.phase == GamePhase::GameOver {
        tick_game_over(game, input, dt);
        return;
    }

    advance_progress(game, dt);

    // Passive score and drain
    game.score += game.tuning.score_rate * dt;
    game.add_energy(-game.tuning.energy_drain * dt);
    if game.is_game_over() {
        return;
    }

    apply_input(game, input);

    if game.generator.should_spawn(game.camera.position.x) {
        let mut ctx = SpawnContext {
            level: game.level,
            lines: &mut game.lines,
            rng: &mut game.rng,
        };
        game.generator.spawn_item(&mut ctx);
    }

    update_lines(game, dt);
    if game.is_game_over() {
        return;
    }

    game.bg_effects.update(dt);
    game.effects.update(dt);

    let front = game
        .lines
        .iter()
        .map(|l| l.player.pos.x)
        .fold(f32::MIN, f32::max);
    game.camera.position.x = front + game.tuning.camera_lead;

    if game.camera.position.x > game.tuning.reset_threshold {
        let offset = game.camera.position.x - game.tuning.reset_target;
        log::debug!("Coordinate reset by {offset:.1}");
        game.shift_world(offset);
    }
}

fn tick_game_over(game: &mut Game, input: &TickInput, dt: f32) {
    game.game_over_timer += dt;
    if game.game_over_timer >= game.tuning.return_delay {
        game.can_return_to_title = true;
    }
    if game.can_return_to_title && input.any_lane() && !game.return_requested {
        game.return_requested = true;
        game.events.push(GameEvent::ReturnToTitle);
    }
}

fn advance_progress(game: &mut Game, dt: f32) {
    game.total_distance += game.speed * dt;
    if game.total_distance < game.goal_distance {
        return;
    }

    game.total_distance -= game.goal_distance;
    game.level += 1;
    game.speed = game.tuning.speed_for_level(game.level);
    game.score += game.tuning.level_bonus;

    let banner = Vec2::new(game.camera.position.x, BANNER_Y);
    game.effects.add(Effect::popping_text(
        format!("LEVEL {}", game.level),
        banner,
        colors::LIGHT_BLUE,
    ));
    game.events.push(GameEvent::LevelUp { level: game.level });
    log::info!("Level {} (speed {})", game.level, game.speed);
}

fn apply_input(game: &mut Game, input: &TickInput) {
    for (line, pressed) in [input.toggle_upper, input.toggle_lower].into_iter().enumerate() {
        if pressed {
            game.lines[line].toggle_lane();
            game.events.push(GameEvent::LaneToggled { line });
        }
    }

    if input.swap_pickaxe {
        let from = game.pickaxe_owner;
        let to = 1 - from;
        game.pickaxe_owner = to;

        let start = game.player_anchor(from, TRANSFER_OFFSET);
        let end = game.player_anchor(to, TRANSFER_OFFSET);
        game.effects.add(Effect::transfer(start, end, game.speed));
        game.events.push(GameEvent::PickaxeSwapped { owner: to });
    }
}

fn update_lines(game: &mut Game, dt: f32) {
    let mut outcomes = Vec::new();
    for line in 0..LINE_COUNT {
        let frame = LineFrame {
            speed: game.speed,
            has_pickaxe: game.pickaxe_owner == line,
            camera_x: game.camera.position.x,
            expiry_margin: game.tuning.expiry_margin,
            lane_step: game.tuning.lane_step,
            hurt_duration: game.tuning.hurt_duration,
        };
        game.lines[line].update(dt, &frame, &mut outcomes);

        for outcome in outcomes.drain(..) {
            resolve(game, line, outcome);
            if game.is_game_over() {
                return;
            }
        }
    }
}

/// Apply one line outcome to resources, effects and events
fn resolve(game: &mut Game, line: usize, outcome: LineEvent) {
    match outcome {
        LineEvent::Destroyed { kind, at } => {
            let color = if kind == ItemKind::GoldRock {
                game.score += game.tuning.gold_bonus;
                let text = format!("+{}", crate::round(game.tuning.gold_bonus));
                let label = Effect::floating_text(text, at + TEXT_OFFSET, colors::LIGHT_BLUE);
                game.effects.add(label);
                colors::YELLOW
            } else {
                colors::GRAY
            };
            for _ in 0..DEBRIS_COUNT {
                let particle = Effect::particle(at + DEBRIS_OFFSET, color, &mut game.fx_rng);
                game.effects.add(particle);
            }
            game.events.push(GameEvent::ItemDestroyed { kind, line });
        }
        LineEvent::Damaged { kind, at } => {
            let text = format!("-{}", crate::round(game.tuning.damage));
            game.effects.add(Effect::floating_text(text, at + TEXT_OFFSET, colors::RED));
            game.events.push(GameEvent::DamageTaken { kind, line });
            game.add_energy(-game.tuning.damage);
        }
        LineEvent::Ate { at } => {
            let text = format!("+{}", crate::round(game.tuning.food_energy));
            game.effects.add(Effect::floating_text(text, at + TEXT_OFFSET, colors::GREEN));
            game.events.push(GameEvent::FoodEaten { line });
            game.add_energy(game.tuning.food_energy);
        }
        LineEvent::Dug { at } => {
            game.bg_effects.add(Effect::hole(at));
        }
    }
}
