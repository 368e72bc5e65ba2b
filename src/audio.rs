//! Sound cues for simulation events
//!
//! The simulation never plays sound itself. Each `GameEvent` maps to a
//! TIC-80 style `(sfx id, note)` cue which an `AudioSink` turns into noise.

use crate::sim::{GameEvent, ItemKind};

/// One sound effect trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCue {
    /// Sound effect slot
    pub sfx: u8,
    /// Note index the effect is played at
    pub note: u8,
}

impl SoundCue {
    pub const FOOD: SoundCue = SoundCue::new(8, 64);
    pub const DAMAGE: SoundCue = SoundCue::new(10, 40);
    pub const GOLD: SoundCue = SoundCue::new(11, 64);
    pub const ROCK: SoundCue = SoundCue::new(12, 64);
    pub const LANE: SoundCue = SoundCue::new(13, 33);
    pub const TRANSFER: SoundCue = SoundCue::new(14, 57);
    pub const LEVEL_UP: SoundCue = SoundCue::new(24, 52);
    /// Title screen start press
    pub const START: SoundCue = SoundCue::new(8, 64);

    pub const fn new(sfx: u8, note: u8) -> Self {
        Self { sfx, note }
    }

    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::LevelUp { .. } => Some(Self::LEVEL_UP),
            GameEvent::ItemDestroyed {
                kind: ItemKind::GoldRock,
                ..
            } => Some(Self::GOLD),
            GameEvent::ItemDestroyed { .. } => Some(Self::ROCK),
            GameEvent::DamageTaken { .. } => Some(Self::DAMAGE),
            GameEvent::FoodEaten { .. } => Some(Self::FOOD),
            GameEvent::PickaxeSwapped { .. } => Some(Self::TRANSFER),
            GameEvent::LaneToggled { .. } => Some(Self::LANE),
            GameEvent::GameOver { .. } | GameEvent::ReturnToTitle => None,
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Title,
    Game,
    Stop,
}

impl Music {
    /// Track index; -1 stops playback
    pub fn track(self) -> i32 {
        match self {
            Music::Title => 0,
            Music::Game => 1,
            Music::Stop => -1,
        }
    }
}

/// Something that can play cues and music
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn music(&mut self, music: Music);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    pub cues_played: usize,
    pub current_track: Option<Music>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues_played += 1;
        log::trace!("sfx {} note {}", cue.sfx, cue.note);
    }

    fn music(&mut self, music: Music) {
        if self.current_track != Some(music) {
            log::debug!("Music track {}", music.track());
            self.current_track = Some(music);
        }
    }
}
