//! Draw-command contract
//!
//! The game never talks to a graphics API. It emits screen-space `DrawCmd`s
//! in painter's order into a `Renderer`; a TIC-80 style backend can forward
//! them one-to-one, and `RecordingRenderer` keeps them for tests and
//! headless runs.

mod hud;
mod title;

use glam::Vec2;

pub use hud::draw_hud;
pub use title::draw_title;

use crate::consts::{MAP_HEIGHT_TILES, MAP_WIDTH_TILES, SCREEN_WIDTH, TILE_SIZE};
use crate::ease_half_linear;
use crate::round;
use crate::sim::effect::{Effect, EffectKind};
use crate::sim::{Camera, Game, Item, ItemKind, Line, Player};

/// Background clear color inside a run
const CLEAR_COLOR: u8 = 13;
/// Tiles across the screen plus one for the partial column
const TILES_ON_SCREEN: i32 = 31;
/// Approximate glyph advance of the built-in font
pub const GLYPH_WIDTH: i32 = 6;
const TRANSFER_GRADIENT: [u8; 7] = [12, 8, 3, 4, 5, 6, 10];

/// Sprite sheet entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player { line: usize, frame: usize },
    PlayerHurt { line: usize },
    Pickaxe { frame: usize },
    Rock,
    GoldRock,
    HardRock,
    Food,
}

impl Sprite {
    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Rock => Sprite::Rock,
            ItemKind::GoldRock => Sprite::GoldRock,
            ItemKind::HardRock => Sprite::HardRock,
            ItemKind::Food => Sprite::Food,
        }
    }

    /// Sprite sheet index (16x16 sprites take a 2x2 block)
    pub fn id(self) -> u16 {
        match self {
            Sprite::Player { line: 0, frame } => 256 + 2 * frame as u16,
            Sprite::Player { frame, .. } => 288 + 2 * frame as u16,
            Sprite::PlayerHurt { line: 0 } => 260,
            Sprite::PlayerHurt { .. } => 292,
            Sprite::Pickaxe { frame } => 268 + frame as u16,
            Sprite::Food => 384,
            Sprite::Rock => 386,
            Sprite::GoldRock => 388,
            Sprite::HardRock => 390,
        }
    }
}

/// One screen-space drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: u8,
    },
    /// Copy a block of background tiles to the screen
    MapStrip {
        tile_x: i32,
        tile_y: i32,
        width: i32,
        height: i32,
        x: i32,
        y: i32,
    },
    Sprite {
        sprite: Sprite,
        x: i32,
        y: i32,
        flip: bool,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: u8,
    },
    Pixel {
        x: i32,
        y: i32,
        color: u8,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        color: u8,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: u8,
        /// False draws only the border
        filled: bool,
    },
}

/// Receives draw commands in painter's order
pub trait Renderer {
    fn draw(&mut self, cmd: DrawCmd);
}

/// Keeps every command it receives
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCmd>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

/// Text with a one-pixel outline on four sides
pub fn outlined_text(r: &mut dyn Renderer, text: &str, x: i32, y: i32, color: u8, outline: u8) {
    for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        r.draw(DrawCmd::Text {
            text: text.to_string(),
            x: x + dx,
            y: y + dy,
            color: outline,
        });
    }
    r.draw(DrawCmd::Text {
        text: text.to_string(),
        x,
        y,
        color,
    });
}

/// Text whose glyphs hop once in sequence, left to right
pub fn popping_text(
    r: &mut dyn Renderer,
    text: &str,
    x: i32,
    y: i32,
    color: u8,
    outline: u8,
    time: f32,
) {
    use std::f32::consts::PI;
    for (i, ch) in text.chars().enumerate() {
        let t = (time * 2.0 * PI - i as f32 * 0.2).clamp(0.0, PI);
        let dy = -(t.sin() * 10.0);
        let glyph = ch.to_string();
        outlined_text(r, &glyph, x + i as i32 * GLYPH_WIDTH, y + dy as i32, color, outline);
    }
}

/// Background strips for a camera whose left screen edge is at `left_x`.
///
/// The map is 240 tiles wide and wraps, so the visible window may need a
/// second strip starting again from tile 0.
pub fn map_strips(left_x: f32) -> Vec<DrawCmd> {
    let start = round(left_x);
    let tile_x = start.div_euclid(TILE_SIZE);
    let offset = start.rem_euclid(TILE_SIZE);
    let map_x = tile_x.rem_euclid(MAP_WIDTH_TILES);

    let strip = |tile_x: i32, width: i32, x: i32| DrawCmd::MapStrip {
        tile_x,
        tile_y: 0,
        width,
        height: MAP_HEIGHT_TILES,
        x,
        y: 0,
    };

    if map_x + TILES_ON_SCREEN <= MAP_WIDTH_TILES {
        return vec![strip(map_x, TILES_ON_SCREEN, -offset)];
    }
    let first = MAP_WIDTH_TILES - map_x;
    vec![
        strip(map_x, first, -offset),
        strip(0, TILES_ON_SCREEN - first, -offset + first * TILE_SIZE),
    ]
}

/// Draw a whole frame of a run
pub fn draw_game(game: &Game, r: &mut dyn Renderer) {
    let camera = game.camera();
    r.draw(DrawCmd::Clear { color: CLEAR_COLOR });
    for strip in map_strips(camera.position.x - SCREEN_WIDTH / 2.0) {
        r.draw(strip);
    }

    for effect in game.bg_effects().iter() {
        draw_effect(effect, camera, r);
    }
    for line in game.lines() {
        draw_line(line, game.has_pickaxe(line.index), camera, r);
    }
    for effect in game.effects().iter() {
        draw_effect(effect, camera, r);
    }

    draw_hud(game, r);
}

fn draw_line(line: &Line, has_pickaxe: bool, camera: &Camera, r: &mut dyn Renderer) {
    for item in &line.items {
        draw_item(item, camera, r);
    }
    draw_player(&line.player, line.index, has_pickaxe, camera, r);
}

fn draw_item(item: &Item, camera: &Camera, r: &mut dyn Renderer) {
    let screen = camera.world_to_screen(item.pos);
    r.draw(DrawCmd::Sprite {
        sprite: Sprite::for_item(item.kind),
        x: round(screen.x),
        y: round(screen.y),
        flip: false,
    });
}

/// Shake offset while hurt, shrinking with the timer
fn hurt_wiggle(player: &Player) -> Vec2 {
    if !player.is_hurt() {
        return Vec2::ZERO;
    }
    let magnitude = player.hurt_timer * 8.0;
    let phase = player.hurt_timer * 97.0;
    Vec2::new(phase.sin(), (phase * 1.7).cos()) * 0.5 * magnitude
}

fn draw_player(
    player: &Player,
    line: usize,
    has_pickaxe: bool,
    camera: &Camera,
    r: &mut dyn Renderer,
) {
    let screen = camera.world_to_screen(player.pos + hurt_wiggle(player));
    let (x, y) = (round(screen.x), round(screen.y));

    let sprite = if player.is_hurt() {
        Sprite::PlayerHurt { line }
    } else {
        Sprite::Player {
            line,
            frame: player.anim_frame(),
        }
    };
    r.draw(DrawCmd::Sprite {
        sprite,
        x,
        y,
        flip: false,
    });

    if has_pickaxe {
        r.draw(DrawCmd::Sprite {
            sprite: Sprite::Pickaxe {
                frame: player.anim_frame(),
            },
            x: x + 16,
            y,
            flip: false,
        });
    }
}

fn draw_effect(effect: &Effect, camera: &Camera, r: &mut dyn Renderer) {
    let screen = camera.world_to_screen(effect.pos);
    let (x, y) = (round(screen.x), round(screen.y));

    match &effect.kind {
        EffectKind::FloatingText { text, color } => {
            // Blink out over the last fifth of the lifetime
            let fading = effect.life > effect.max_life * 0.8;
            if fading && (effect.life * 20.0) as i32 % 2 == 0 {
                return;
            }
            wavy_text(r, text, x, y, *color, effect.life);
        }
        EffectKind::PoppingText { text, color } => {
            popping_text(r, text, x, y, *color, 0, effect.life);
        }
        EffectKind::Particle { color, .. } => {
            r.draw(DrawCmd::Pixel { x, y, color: *color });
        }
        EffectKind::Transfer { end, .. } => {
            draw_transfer(effect.progress(), screen, camera.world_to_screen(*end), r);
        }
        EffectKind::Hole { radius } => {
            if !(-20.0..=260.0).contains(&screen.x) {
                return;
            }
            let radius = hole_radius(*radius, effect.life, effect.max_life);
            r.draw(DrawCmd::Circle {
                x,
                y,
                radius: radius as i32,
                color: crate::sim::effect::colors::BLACK,
            });
        }
    }
}

fn wavy_text(r: &mut dyn Renderer, text: &str, x: i32, y: i32, color: u8, time: f32) {
    for (i, ch) in text.chars().enumerate() {
        let dy = ((time * 8.0 + i as f32 * 0.5).sin() * 1.5) as i32;
        outlined_text(r, &ch.to_string(), x + i as i32 * GLYPH_WIDTH, y + dy, color, 0);
    }
}

/// Grow in over 0.1 s, shrink away over the last 1.5 s
fn hole_radius(radius: f32, life: f32, max_life: f32) -> f32 {
    const FADE_IN: f32 = 0.1;
    const FADE_OUT: f32 = 1.5;
    let scale = if life < FADE_IN {
        life / FADE_IN
    } else if life > max_life - FADE_OUT {
        (max_life - life) / FADE_OUT
    } else {
        1.0
    };
    (radius * scale).max(0.0)
}

/// Seven colored bars chase each other from start to end
fn draw_transfer(t: f32, start: Vec2, end: Vec2, r: &mut dyn Renderer) {
    const BAR_WIDTH: i32 = 8;
    let delta = end - start;
    let count = TRANSFER_GRADIENT.len();

    for (i, &color) in TRANSFER_GRADIENT.iter().enumerate() {
        let lag = (count - i) as f32 / count as f32;
        let x = start.x + delta.x * i as f32;
        let y1 = start.y + delta.y * ease_half_linear(t, lag * 0.5 + 0.5);
        let y2 = start.y + delta.y * ease_half_linear(t, lag * 0.5);
        let (top, bottom) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
        r.draw(DrawCmd::Rect {
            x: round(x) - BAR_WIDTH / 2,
            y: round(top),
            w: BAR_WIDTH,
            h: round(bottom - top),
            color,
            filled: true,
        });
    }

    let center = Vec2::new((start.x + end.x) / 2.0, start.y + delta.y * (0.25 + t * 0.1));
    let color = TRANSFER_GRADIENT[(t * (count - 1) as f32) as usize];
    outlined_text(r, "<-", round(center.x) - 4, round(center.y) - 3, color, 0);
}
