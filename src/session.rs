use std::path::Path;

use crate::camera::Observer;
use crate::collision::{slide, step};
use crate::config::EngineConfig;
use crate::error::SceneResult;
use crate::frame::Frame;
use crate::renderer::render_frame;
use crate::scene::Scene;
use crate::texture::{TextureLoader, WallTextures};

/// Engine-level input, already decoupled from any key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What the host loop calls into. The host owns the loop and never runs these concurrently.
pub trait FrameHooks {
    /// Render one frame into `frame`.
    fn on_frame(&mut self, frame: &mut Frame);
    /// Apply one input event.
    fn on_key(&mut self, action: Action) -> Flow;
}

/// A loaded scene plus the observer walking through it.
pub struct Session {
    // drop order: textures, then the scene
    textures: WallTextures,
    scene: Scene,
    observer: Observer,
    move_speed: f64,
    rot_speed: f64,
}

impl Session {
    pub fn new(scene: Scene, textures: WallTextures, config: &EngineConfig) -> Self {
        let observer = Observer::spawn(scene.start);
        Self {
            textures,
            scene,
            observer,
            move_speed: config.move_speed,
            rot_speed: config.rot_speed,
        }
    }

    /// Parses, validates and loads textures for the scene file at `path`.
    pub fn load(
        path: impl AsRef<Path>,
        loader: &impl TextureLoader,
        config: &EngineConfig,
    ) -> SceneResult<Self> {
        let path = path.as_ref();
        let scene = crate::load_scene(path)?;
        log::info!(
            "loaded {} ({}x{} map)",
            path.display(),
            scene.grid.width(),
            scene.grid.height()
        );
        let textures = WallTextures::load(loader, &scene.textures)?;
        Ok(Self::new(scene, textures, config))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn walk(&mut self, axis: [f64; 2], sign: f64) {
        let delta = step(axis, self.move_speed, sign);
        self.observer.pos = slide(&self.scene.grid, self.observer.pos, delta);
    }
}

impl FrameHooks for Session {
    fn on_frame(&mut self, frame: &mut Frame) {
        render_frame(frame, &self.scene, &self.observer, &self.textures);
    }

    fn on_key(&mut self, action: Action) -> Flow {
        match action {
            Action::Forward => self.walk(self.observer.dir, 1.0),
            Action::Backward => self.walk(self.observer.dir, -1.0),
            Action::StrafeLeft => self.walk(self.observer.plane, -1.0),
            Action::StrafeRight => self.walk(self.observer.plane, 1.0),
            Action::TurnLeft => self.observer.rotate(-self.rot_speed),
            Action::TurnRight => self.observer.rotate(self.rot_speed),
            Action::Exit => {
                log::info!("exit requested");
                return Flow::Exit;
            }
        }
        Flow::Continue
    }
}
