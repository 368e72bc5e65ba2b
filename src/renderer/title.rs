//! Title screen

use super::{DrawCmd, Renderer, Sprite, outlined_text};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::scene::TitleScene;

const GOPHER_Y: i32 = 80;
const JUMP_HEIGHT: f32 = 20.0;
/// Frames per blink phase of the start prompt
const BLINK_FRAMES: u32 = 30;

pub fn draw_title(title: &TitleScene, r: &mut dyn Renderer) {
    r.draw(DrawCmd::Clear { color: 0 });
    r.draw(DrawCmd::MapStrip {
        tile_x: 0,
        tile_y: 17,
        width: 31,
        height: 12,
        x: 0,
        y: 0,
    });

    // Both gophers hop and dive once the run is starting
    let (frame, hop) = match title.transition() {
        Some(t) => (1, gopher_hop(t)),
        None => (0, 0.0),
    };
    let y = GOPHER_Y - hop as i32;
    r.draw(DrawCmd::Sprite {
        sprite: Sprite::Player { line: 0, frame },
        x: 28,
        y,
        flip: false,
    });
    r.draw(DrawCmd::Sprite {
        sprite: Sprite::Player { line: 1, frame },
        x: 196,
        y,
        flip: true,
    });

    r.draw(DrawCmd::MapStrip {
        tile_x: 0,
        tile_y: 29,
        width: 31,
        height: 5,
        x: 0,
        y: 96,
    });

    outlined_text(r, "Gopher the Channel Miner", 56, 30, 3, 15);
    if (title.frames() / BLINK_FRAMES) % 2 == 0 {
        outlined_text(r, "PRESS A TO START", 80, 40, 12, 15);
    }

    for (text, y, color) in [
        ("A: MOVE UPPER PLAYER", 65, 11),
        ("B: MOVE LOWER PLAYER", 75, 9),
        ("X: SWAP PICKAXE", 85, 4),
    ] {
        r.draw(DrawCmd::Text {
            text: text.to_string(),
            x: 68,
            y,
            color,
        });
    }
    r.draw(DrawCmd::Text {
        text: "The Go gopher was designed".to_string(),
        x: 48,
        y: 110,
        color: 13,
    });
    r.draw(DrawCmd::Text {
        text: "by Renee French".to_string(),
        x: 84,
        y: 120,
        color: 13,
    });

    if let Some(t) = title.transition() {
        dither_black(r, t);
    }
}

/// Rise then sink below the start line over the first half second
fn gopher_hop(t: f32) -> f32 {
    let t = (t * 2.0).min(1.0);
    4.0 * t * (1.0 - t) * JUMP_HEIGHT - t * 16.0
}

/// Cover the screen with black scanlines, denser as `alpha` goes to 1
fn dither_black(r: &mut dyn Renderer, alpha: f32) {
    let density = (alpha.clamp(0.0, 1.0) * 4.0) as i32;
    if density == 0 {
        return;
    }
    for y in (0..SCREEN_HEIGHT as i32).filter(|y| y % 4 < density) {
        r.draw(DrawCmd::Rect {
            x: 0,
            y,
            w: SCREEN_WIDTH as i32,
            h: 1,
            color: 0,
            filled: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_ends_below_start() {
        assert_eq!(gopher_hop(0.0), 0.0);
        assert!(gopher_hop(0.15) > 0.0);
        assert_eq!(gopher_hop(0.5), -16.0);
        assert_eq!(gopher_hop(0.9), -16.0);
    }

    #[test]
    fn test_dither_density() {
        let mut r = crate::renderer::RecordingRenderer::new();
        dither_black(&mut r, 0.1);
        assert!(r.commands.is_empty());
        dither_black(&mut r, 0.5);
        assert_eq!(r.commands.len(), 68);
        r.clear();
        dither_black(&mut r, 1.0);
        assert_eq!(r.commands.len(), 136);
    }
}
