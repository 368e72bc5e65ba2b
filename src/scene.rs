//! Title and game scenes
//!
//! The manager owns whichever scene is active and the factory that builds
//! each run's generator. Title starts a run on the A button; a finished run
//! hands back to the title once the player asks for it.

use crate::audio::{AudioSink, Music, SoundCue};
use crate::renderer::{self, Renderer};
use crate::sim::generator::GeneratorFactory;
use crate::sim::tick::TickInput;
use crate::sim::{Game, GameEvent};
use crate::tuning::Tuning;

/// Length of the fade from title into a run (s)
pub const TITLE_TRANSITION: f32 = 1.0;

#[derive(Debug, Default)]
pub struct TitleScene {
    frames: u32,
    /// Time since the start press, while transitioning
    transition: Option<f32>,
}

impl TitleScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn transition(&self) -> Option<f32> {
        self.transition
    }

    /// Returns true once the transition has finished and the run should begin
    fn update(&mut self, input: &TickInput, dt: f32, audio: &mut dyn AudioSink) -> bool {
        self.frames = self.frames.wrapping_add(1);

        if let Some(t) = &mut self.transition {
            *t += dt;
            return *t > TITLE_TRANSITION;
        }

        if input.toggle_upper {
            self.transition = Some(0.0);
            audio.music(Music::Stop);
            audio.play(SoundCue::START);
        }
        false
    }
}

#[derive(Debug)]
pub enum Scene {
    Title(TitleScene),
    Game(Box<Game>),
}

pub struct SceneManager {
    scene: Scene,
    factory: GeneratorFactory,
    tuning: Tuning,
    seed: u32,
    runs: u32,
    /// The new scene has not had its enter hook yet
    entered: bool,
}

impl SceneManager {
    pub fn new(tuning: Tuning, factory: GeneratorFactory, seed: u32) -> Self {
        Self {
            scene: Scene::Title(TitleScene::new()),
            factory,
            tuning,
            seed,
            runs: 0,
            entered: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.scene {
            Scene::Game(game) => Some(game.as_ref()),
            Scene::Title(_) => None,
        }
    }

    /// Runs started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn update(&mut self, input: &TickInput, dt: f32, audio: &mut dyn AudioSink) {
        if std::mem::take(&mut self.entered) {
            audio.music(match self.scene {
                Scene::Title(_) => Music::Title,
                Scene::Game(_) => Music::Game,
            });
        }

        let mut start = false;
        let mut leave = false;
        match &mut self.scene {
            Scene::Title(title) => start = title.update(input, dt, audio),
            Scene::Game(game) => {
                game.update(input, dt);
                for event in game.drain_events() {
                    if let Some(cue) = SoundCue::for_event(&event) {
                        audio.play(cue);
                    }
                    match event {
                        GameEvent::GameOver { .. } => audio.music(Music::Stop),
                        GameEvent::ReturnToTitle => leave = true,
                        _ => {}
                    }
                }
            }
        }

        if start {
            self.scene = self.start_run();
            self.entered = true;
        } else if leave {
            log::info!("Returning to title");
            self.scene = Scene::Title(TitleScene::new());
            self.entered = true;
        }
    }

    fn start_run(&mut self) -> Scene {
        // Each run gets its own layout, reproducible from the base seed
        let seed = self.seed.wrapping_add(self.runs);
        self.runs += 1;
        log::info!("Starting run {}", self.runs);
        let game = Game::new(self.tuning.clone(), (self.factory)(), seed);
        Scene::Game(Box::new(game))
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        match &self.scene {
            Scene::Title(title) => renderer::draw_title(title, r),
            Scene::Game(game) => game.draw(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogAudio;
    use crate::consts::SIM_DT;
    use crate::renderer::RecordingRenderer;
    use crate::sim::generator::GeneratorKind;

    fn press_a() -> TickInput {
        TickInput {
            toggle_upper: true,
            ..Default::default()
        }
    }

    fn manager() -> SceneManager {
        SceneManager::new(Tuning::default(), GeneratorKind::Path.factory(), 9)
    }

    #[test]
    fn test_title_waits_for_transition() {
        let mut scenes = manager();
        let mut audio = LogAudio::default();

        scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(audio.current_track, Some(Music::Title));
        assert!(scenes.game().is_none());

        scenes.update(&press_a(), SIM_DT, &mut audio);
        assert_eq!(audio.current_track, Some(Music::Stop));
        assert_eq!(audio.cues_played, 1);

        // Just under a second of transition: still on the title
        for _ in 0..59 {
            scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert!(scenes.game().is_none());

        for _ in 0..2 {
            scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert!(scenes.game().is_some());
        assert_eq!(scenes.runs(), 1);

        scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(audio.current_track, Some(Music::Game));
    }

    #[test]
    fn test_lower_button_does_not_start() {
        let mut scenes = manager();
        let mut audio = LogAudio::default();
        let press_b = TickInput {
            toggle_lower: true,
            ..Default::default()
        };
        for _ in 0..120 {
            scenes.update(&press_b, SIM_DT, &mut audio);
        }
        assert!(matches!(scenes.scene(), Scene::Title(t) if t.transition().is_none()));
    }

    #[test]
    fn test_finished_run_returns_to_title() {
        let mut scenes = manager();
        let mut audio = LogAudio::default();
        scenes.update(&press_a(), SIM_DT, &mut audio);
        while scenes.game().is_none() {
            scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        }

        let Scene::Game(game) = &mut scenes.scene else {
            panic!("expected game scene");
        };
        game.add_energy(-1000.0);

        // Past the return delay, any lane button leaves
        for _ in 0..100 {
            scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert_eq!(audio.current_track, Some(Music::Stop));
        scenes.update(&press_a(), SIM_DT, &mut audio);
        assert!(matches!(scenes.scene(), Scene::Title(_)));

        // Second run uses the next seed
        scenes.update(&press_a(), SIM_DT, &mut audio);
        while scenes.game().is_none() {
            scenes.update(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert_eq!(scenes.game().map(Game::seed), Some(10));
    }

    #[test]
    fn test_draw_follows_scene() {
        let scenes = manager();
        let mut r = RecordingRenderer::new();
        scenes.draw(&mut r);
        assert!(r.texts().contains(&"Gopher the Channel Miner"));
    }
}
