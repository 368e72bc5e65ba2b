//! Simple AI player for demo and headless runs
//!
//! Looks a short distance ahead of each player. Hard rocks and rocks on a
//! line without the pickaxe are dodged by switching lanes; when dodging is
//! impossible the pickaxe moves to the line that needs it. Food pulls a
//! player onto its lane when the way there is clear.

use super::item::{Item, ItemKind};
use super::line::Line;
use super::state::Game;
use super::tick::TickInput;
use crate::consts::{LANE_COUNT, LINE_COUNT, PLAYER_SIZE};

/// How far ahead of the player's front edge to look (px)
const LOOKAHEAD: f32 = 56.0;
/// Frames to wait after a lane change before reconsidering it
const LANE_COOLDOWN: u32 = 12;
const SWAP_COOLDOWN: u32 = 20;

/// What a lane holds just ahead of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threat {
    Clear,
    Food,
    /// Rock the pickaxe can dig through
    Diggable,
    /// Hard rock
    Wall,
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    lane_cooldown: [u32; LINE_COUNT],
    swap_cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose this frame's button presses
    pub fn next_input(&mut self, game: &Game) -> TickInput {
        let mut input = TickInput::default();
        if game.is_game_over() {
            // Leave the game-over screen as soon as it allows
            input.toggle_upper = game.can_return_to_title();
            return input;
        }

        for cooldown in self.lane_cooldown.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }
        self.swap_cooldown = self.swap_cooldown.saturating_sub(1);

        let mut needs_pickaxe = [false; LINE_COUNT];
        for (index, line) in game.lines().iter().enumerate() {
            let has_pickaxe = game.has_pickaxe(index);
            let here = lane_threat(line, line.current_lane);
            let other = lane_threat(line, 1 - line.current_lane);

            let blocked = match here {
                Threat::Wall => true,
                Threat::Diggable => !has_pickaxe,
                Threat::Clear | Threat::Food => false,
            };
            let other_ok = match other {
                Threat::Clear | Threat::Food => true,
                Threat::Diggable => has_pickaxe,
                Threat::Wall => false,
            };

            let change = (blocked && other_ok) || (here == Threat::Clear && other == Threat::Food);
            if change && self.lane_cooldown[index] == 0 {
                self.lane_cooldown[index] = LANE_COOLDOWN;
                match index {
                    0 => input.toggle_upper = true,
                    _ => input.toggle_lower = true,
                }
            } else if blocked && here == Threat::Diggable {
                needs_pickaxe[index] = true;
            }
        }

        let owner = game.pickaxe_owner();
        let other = 1 - owner;
        if needs_pickaxe[other] && !needs_pickaxe[owner] && self.swap_cooldown == 0 {
            self.swap_cooldown = SWAP_COOLDOWN;
            input.swap_pickaxe = true;
        }

        input
    }
}

fn lane_threat(line: &Line, lane: usize) -> Threat {
    debug_assert!(lane < LANE_COUNT);
    let front = line.player.pos.x;
    let ahead = |item: &&Item| {
        item.lane == lane
            && item.pos.x + PLAYER_SIZE > front
            && item.pos.x < front + PLAYER_SIZE + LOOKAHEAD
    };

    line.items
        .iter()
        .filter(ahead)
        .map(|item| match item.kind {
            ItemKind::HardRock => Threat::Wall,
            ItemKind::Rock | ItemKind::GoldRock => Threat::Diggable,
            ItemKind::Food => Threat::Food,
        })
        .max_by_key(|threat| *threat as u8)
        .unwrap_or(Threat::Clear)
}
