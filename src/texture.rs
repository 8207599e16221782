use std::path::Path;

use crate::error::{SceneError, SceneResult};
use crate::frame::pack_rgb;
use crate::scene::TexturePaths;
use crate::world::Facing;

/// Decoded wall texture, row-major 0x00RRGGBB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    /// `None` unless both sides are non-zero and `pixels` holds exactly `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Option<Self> {
        (width > 0 && height > 0 && pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u32) -> Option<Self> {
        let pixels = (0..width * height).map(|i| f(i % width, i / width)).collect();
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x` (clamped) and row `y` taken modulo the height, so any height works.
    #[inline]
    pub fn sample(&self, x: usize, y: i64) -> u32 {
        let x = x.min(self.width - 1);
        let y = y.rem_euclid(self.height as i64) as usize;
        self.pixels[y * self.width + x]
    }
}

/// One texture per wall face.
pub struct WallTextures {
    pub north: Texture,
    pub south: Texture,
    pub east: Texture,
    pub west: Texture,
}

impl WallTextures {
    #[inline]
    pub fn get(&self, face: Facing) -> &Texture {
        match face {
            Facing::North => &self.north,
            Facing::South => &self.south,
            Facing::East => &self.east,
            Facing::West => &self.west,
        }
    }

    /// Loads all four textures; the first failure aborts and drops whatever was already loaded.
    pub fn load(loader: &impl TextureLoader, paths: &TexturePaths) -> SceneResult<Self> {
        let textures = Self {
            north: loader.load(&paths.north)?,
            south: loader.load(&paths.south)?,
            east: loader.load(&paths.east)?,
            west: loader.load(&paths.west)?,
        };
        log::info!("loaded wall textures");
        Ok(textures)
    }
}

/// Turns an image file into a `Texture`.
pub trait TextureLoader {
    fn load(&self, path: &Path) -> SceneResult<Texture>;
}

/// Decodes PNG, JPEG and BMP files through the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageLoader;

impl TextureLoader for ImageLoader {
    fn load(&self, path: &Path) -> SceneResult<Texture> {
        let fail = |reason: String| SceneError::Texture {
            path: path.to_path_buf(),
            reason,
        };

        let rgba = image::open(path).map_err(|e| fail(e.to_string()))?.to_rgba8();
        let (w, h) = (rgba.width() as usize, rgba.height() as usize);
        let pixels = rgba
            .pixels()
            .map(|p| pack_rgb(p[0], p[1], p[2]))
            .collect();

        let texture = Texture::new(w, h, pixels).ok_or_else(|| fail("image is empty".into()))?;
        if !h.is_power_of_two() {
            log::debug!("{}: height {h} is not a power of two", path.display());
        }
        log::debug!("decoded {} ({w}x{h})", path.display());
        Ok(texture)
    }
}
