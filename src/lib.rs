//! Grid-world raycaster: loads a `.cub` scene, validates it and renders a
//! first-person view one screen column at a time.
//!
//! The library never opens a window or owns an event loop. A host drives a
//! [`Session`] through [`FrameHooks`]: `on_frame` once per tick with a
//! [`Frame`] to draw into, `on_key` once per input event.

pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod frame;
pub mod parser;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod session;
pub mod texture;
pub mod validate;
pub mod world;

use std::path::Path;

pub use camera::Observer;
pub use config::EngineConfig;
pub use error::{SceneError, SceneResult};
pub use frame::Frame;
pub use scene::{Rgb, Scene, SceneDraft, Start};
pub use session::{Action, Flow, FrameHooks, Session};
pub use texture::{ImageLoader, Texture, TextureLoader, WallTextures};
pub use world::{Cell, Facing, Grid};

/// Parses and validates the scene file at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<Scene> {
    validate::validate(parser::parse_file(path)?)
}
