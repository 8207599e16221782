use std::path::PathBuf;

use crate::frame::pack_rgb;
use crate::world::{Facing, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_pixel(self) -> u32 {
        pack_rgb(self.r, self.g, self.b)
    }
}

/// The six header elements that must precede the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Header {
    North,
    South,
    West,
    East,
    Floor,
    Ceiling,
}

impl Header {
    pub const ALL: [Header; 6] = [
        Header::North,
        Header::South,
        Header::West,
        Header::East,
        Header::Floor,
        Header::Ceiling,
    ];

    /// Identifier as written in the scene file.
    pub fn id(self) -> &'static str {
        match self {
            Header::North => "NO",
            Header::South => "SO",
            Header::West => "WE",
            Header::East => "EA",
            Header::Floor => "F",
            Header::Ceiling => "C",
        }
    }

    /// Matches a trimmed header line; returns the element and the remainder after the prefix.
    pub fn split_line(line: &str) -> Option<(Header, &str)> {
        Header::ALL.into_iter().find_map(|h| {
            let rest = line.strip_prefix(h.id())?;
            // `NOX` is not `NO`
            (rest.is_empty() || rest.starts_with([' ', '\t'])).then_some((h, rest))
        })
    }
}

/// One texture path per wall face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TexturePaths {
    pub north: PathBuf,
    pub south: PathBuf,
    pub east: PathBuf,
    pub west: PathBuf,
}

/// Fully parsed scene whose grid has not been validated yet.
#[derive(Clone, Debug)]
pub struct SceneDraft {
    pub textures: TexturePaths,
    pub floor: Rgb,
    pub ceiling: Rgb,
    pub grid: Grid,
}

/// Where the observer starts: marker cell and its facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Start {
    pub col: usize,
    pub row: usize,
    pub facing: Facing,
}

/// A validated scene. Only `validate::validate` constructs one.
#[derive(Clone, Debug)]
pub struct Scene {
    pub textures: TexturePaths,
    pub floor: Rgb,
    pub ceiling: Rgb,
    pub grid: Grid,
    pub start: Start,
}
