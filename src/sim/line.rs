//! A line: one player, its two lanes, and the items in its path
//!
//! Collision happens here. The line reports what happened through
//! `LineEvent`s; applying score and energy is left to the game so that
//! every resource mutation goes through one clamped path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemKind, lane_y};
use super::player::Player;

/// Frame-constant inputs a line needs from the game
#[derive(Debug, Clone, Copy)]
pub struct LineFrame {
    pub speed: f32,
    /// This line's player holds the pickaxe
    pub has_pickaxe: bool,
    pub camera_x: f32,
    pub expiry_margin: f32,
    pub lane_step: f32,
    pub hurt_duration: f32,
}

/// Outcome of a line update, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEvent {
    /// Obstacle dug through with the pickaxe
    Destroyed { kind: ItemKind, at: Vec2 },
    /// Obstacle hit without the pickaxe, or a hard rock
    Damaged { kind: ItemKind, at: Vec2 },
    /// Food picked up
    Ate { at: Vec2 },
    /// Player moved far enough to leave a hole
    Dug { at: Vec2 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub index: usize,
    pub player: Player,
    /// Live items in spawn order
    pub items: Vec<Item>,
    /// Lane the player is heading for (0 or 1)
    pub current_lane: usize,
}

impl Line {
    pub fn new(index: usize, player_x: f32) -> Self {
        let current_lane = 0;
        Self {
            index,
            player: Player::new(Vec2::new(player_x, lane_y(index, current_lane))),
            items: Vec::new(),
            current_lane,
        }
    }

    pub fn lane_y(&self, lane: usize) -> f32 {
        lane_y(self.index, lane)
    }

    /// Y the player is easing toward
    pub fn target_y(&self) -> f32 {
        self.lane_y(self.current_lane)
    }

    pub fn toggle_lane(&mut self) {
        self.current_lane = 1 - self.current_lane;
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Advance the player, then collide it against every item in order
    pub fn update(&mut self, dt: f32, frame: &LineFrame, events: &mut Vec<LineEvent>) {
        let target_y = self.target_y();
        if let Some(at) = self.player.update(dt, frame.speed, target_y, frame.lane_step) {
            events.push(LineEvent::Dug { at });
        }

        let (player_pos, player_size) = self.player.bounds();
        let mut hurt = false;

        self.items.retain_mut(|item| {
            item.update(dt);

            let touching = item.collides_with(player_pos, player_size);
            let first_contact = touching && !item.in_contact;
            item.in_contact = touching;

            if touching {
                let kind = item.kind;
                if !kind.is_obstacle() {
                    log::debug!("P{}: {:?} GET", self.index + 1, kind);
                    events.push(LineEvent::Ate { at: player_pos });
                    return false;
                }
                if frame.has_pickaxe && kind.is_destructible() {
                    log::debug!("P{}: {:?} destroyed", self.index + 1, kind);
                    events.push(LineEvent::Destroyed {
                        kind,
                        at: player_pos,
                    });
                    return false;
                }
                // Obstacle stays; the hit counts once per contact
                if first_contact {
                    log::debug!("P{}: {:?} hit (damage)", self.index + 1, kind);
                    events.push(LineEvent::Damaged {
                        kind,
                        at: player_pos,
                    });
                    hurt = true;
                }
            }

            !item.is_expired(frame.camera_x, frame.expiry_margin)
        });

        if hurt {
            self.player.hurt(frame.hurt_duration);
        }
    }

    pub fn on_coordinate_reset(&mut self, offset: f32) {
        self.player.on_coordinate_reset(offset);
        for item in &mut self.items {
            item.pos.x -= offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn frame(has_pickaxe: bool) -> LineFrame {
        LineFrame {
            speed: 0.0,
            has_pickaxe,
            camera_x: 180.0,
            expiry_margin: 140.0,
            lane_step: 4.0,
            hurt_duration: 0.5,
        }
    }

    fn line_with(kind: ItemKind) -> Line {
        let mut line = Line::new(0, 120.0);
        line.add_item(Item::new(kind, 0, 126.0, 0));
        line
    }

    #[test]
    fn test_pickaxe_destroys_rock() {
        let mut line = line_with(ItemKind::Rock);
        let mut events = Vec::new();
        line.update(DT, &frame(true), &mut events);
        assert!(line.items.is_empty());
        assert!(matches!(
            events.as_slice(),
            [LineEvent::Destroyed {
                kind: ItemKind::Rock,
                ..
            }]
        ));
        assert!(!line.player.is_hurt());
    }

    #[test]
    fn test_rock_without_pickaxe_damages_and_stays() {
        let mut line = line_with(ItemKind::Rock);
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert_eq!(line.items.len(), 1);
        assert!(matches!(events.as_slice(), [LineEvent::Damaged { .. }]));
        assert!(line.player.is_hurt());
    }

    #[test]
    fn test_hard_rock_survives_pickaxe() {
        let mut line = line_with(ItemKind::HardRock);
        let mut events = Vec::new();
        line.update(DT, &frame(true), &mut events);
        assert_eq!(line.items.len(), 1);
        assert!(matches!(
            events.as_slice(),
            [LineEvent::Damaged {
                kind: ItemKind::HardRock,
                ..
            }]
        ));
    }

    #[test]
    fn test_continued_contact_damages_once() {
        let mut line = line_with(ItemKind::HardRock);
        let mut events = Vec::new();
        for _ in 0..5 {
            line.update(DT, &frame(false), &mut events);
        }
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_new_contact_after_separating_damages_again() {
        let mut line = line_with(ItemKind::HardRock);
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert!(line.items[0].in_contact);

        line.player.pos.x -= 100.0;
        line.update(DT, &frame(false), &mut events);
        assert!(!line.items[0].in_contact);

        line.player.pos.x += 100.0;
        line.update(DT, &frame(false), &mut events);
        let hits = events
            .iter()
            .filter(|e| matches!(e, LineEvent::Damaged { .. }))
            .count();
        assert_eq!(hits, 2);
        assert_eq!(line.items.len(), 1);
    }

    #[test]
    fn test_pickaxe_arriving_mid_contact_still_digs() {
        let mut line = line_with(ItemKind::Rock);
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        line.update(DT, &frame(true), &mut events);
        assert!(line.items.is_empty());
        assert!(matches!(events[1], LineEvent::Destroyed { .. }));
    }

    #[test]
    fn test_food_is_eaten() {
        let mut line = line_with(ItemKind::Food);
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert!(line.items.is_empty());
        assert!(matches!(events.as_slice(), [LineEvent::Ate { .. }]));
    }

    #[test]
    fn test_other_lane_is_not_touched() {
        let mut line = Line::new(0, 120.0);
        line.add_item(Item::new(ItemKind::Rock, 0, 126.0, 1));
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert!(events.is_empty());
        assert_eq!(line.items.len(), 1);
    }

    #[test]
    fn test_items_behind_camera_expire() {
        let mut line = Line::new(0, 120.0);
        line.add_item(Item::new(ItemKind::Rock, 0, 30.0, 1));
        line.add_item(Item::new(ItemKind::Rock, 0, 50.0, 1));
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert_eq!(line.items.len(), 1);
        assert_eq!(line.items[0].pos.x, 50.0);
    }

    #[test]
    fn test_toggle_lane_moves_target_not_player() {
        let mut line = Line::new(1, 120.0);
        assert_eq!(line.player.pos.y, 80.0);
        line.toggle_lane();
        assert_eq!(line.target_y(), 96.0);
        assert_eq!(line.player.pos.y, 80.0);
        let mut events = Vec::new();
        line.update(DT, &frame(false), &mut events);
        assert_eq!(line.player.pos.y, 84.0);
        line.toggle_lane();
        assert_eq!(line.current_lane, 0);
    }
}
