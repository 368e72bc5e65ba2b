//! Status bar between the two lines, and the game-over overlay

use super::{DrawCmd, GLYPH_WIDTH, Renderer, outlined_text};
use crate::consts::SCREEN_WIDTH;
use crate::sim::Game;
use crate::{ease_in_out_cubic, lerp};

const BASE_Y: i32 = 65;
const BAR_WIDTH: i32 = 70;
const BAR_HEIGHT: i32 = 6;
const PROGRESS_X: i32 = 85;
const ENERGY_X: i32 = 165;
/// Energy shown per full bar
const ENERGY_TIER: f32 = 100.0;

const SCORE_COLOR: u8 = 4;
const SCORE_OUTLINE: u8 = 14;
const FRAME_COLOR: u8 = 12;

pub fn draw_hud(game: &Game, r: &mut dyn Renderer) {
    let score = format!("SC:{}", game.score() as i32);
    let timer = game.game_over_timer();

    // The score slides to the center once the game-over animation starts
    if !(game.is_game_over() && timer > 1.0) {
        outlined_text(r, &score, 2, BASE_Y, SCORE_COLOR, SCORE_OUTLINE);
    }

    draw_bar_frame(r, PROGRESS_X);
    let fill = (BAR_WIDTH as f32 * game.progress()) as i32;
    fill_bar(r, PROGRESS_X, fill, 11);
    r.draw(DrawCmd::Text {
        text: "G".to_string(),
        x: PROGRESS_X + BAR_WIDTH + 2,
        y: BASE_Y,
        color: FRAME_COLOR,
    });

    draw_bar_frame(r, ENERGY_X);
    let (under, over, color) = energy_tiers(game.energy());
    if let Some(under) = under {
        fill_bar(r, ENERGY_X, BAR_WIDTH, under);
    }
    fill_bar(r, ENERGY_X, over, color);
    r.draw(DrawCmd::Text {
        text: (game.energy() as i32).to_string(),
        x: ENERGY_X + 2,
        y: BASE_Y + 1,
        color: 0,
    });

    if game.is_game_over() {
        draw_game_over(r, &score, timer, game.can_return_to_title());
    }
}

/// Full bar color underneath (if any), fill width and fill color
fn energy_tiers(energy: f32) -> (Option<u8>, i32, u8) {
    const GREEN: u8 = 5;
    const YELLOW: u8 = 4;
    const ORANGE: u8 = 3;
    let width = |e: f32| (BAR_WIDTH as f32 * (e / ENERGY_TIER)) as i32;

    if energy <= ENERGY_TIER {
        (None, width(energy), GREEN)
    } else if energy <= ENERGY_TIER * 2.0 {
        (Some(GREEN), width(energy - ENERGY_TIER), YELLOW)
    } else {
        (Some(YELLOW), width(energy - ENERGY_TIER * 2.0), ORANGE)
    }
}

fn draw_bar_frame(r: &mut dyn Renderer, x: i32) {
    fill_bar(r, x, BAR_WIDTH, 0);
    r.draw(DrawCmd::Rect {
        x: x - 1,
        y: BASE_Y - 1,
        w: BAR_WIDTH + 2,
        h: BAR_HEIGHT + 2,
        color: FRAME_COLOR,
        filled: false,
    });
}

fn fill_bar(r: &mut dyn Renderer, x: i32, w: i32, color: u8) {
    r.draw(DrawCmd::Rect {
        x,
        y: BASE_Y,
        w,
        h: BAR_HEIGHT,
        color,
        filled: true,
    });
}

fn draw_game_over(r: &mut dyn Renderer, score: &str, timer: f32, can_return: bool) {
    if timer > 0.3 {
        outlined_text(r, "GAME OVER", 96, 50, 6, 12);
    }
    if timer <= 1.0 {
        return;
    }

    let t = ease_in_out_cubic(((timer - 1.0) / 0.5).clamp(0.0, 1.0));
    let x = lerp(2.0, SCREEN_WIDTH / 2.0 - 20.0, t);
    let y = lerp(BASE_Y as f32, 66.0, t);
    outlined_text(r, score, x as i32, y as i32, SCORE_COLOR, SCORE_OUTLINE);

    if can_return {
        let color = if (timer * 2.0) as i32 % 2 == 0 { 0 } else { 12 };
        let prompt = "PRESS BUTTON";
        let width = prompt.len() as i32 * GLYPH_WIDTH;
        r.draw(DrawCmd::Text {
            text: prompt.to_string(),
            x: (SCREEN_WIDTH as i32 - width) / 2,
            y: 80,
            color,
        });
    }
}
