use std::path::PathBuf;

use crate::world::Facing;

/// Everything that can go wrong while turning a `.cub` file into a playable scene.
///
/// All variants are fatal to loading; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Scene file could not be opened or read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: not valid UTF-8 text")]
    InvalidEncoding { line: usize },

    #[error("line {line}: unknown identifier in `{text}`")]
    UnknownIdentifier { line: usize, text: String },

    #[error("line {line}: duplicate identifier `{id}`")]
    DuplicateIdentifier { line: usize, id: &'static str },

    #[error("line {line}: missing value after `{id}`")]
    MissingValue { line: usize, id: &'static str },

    #[error("line {line}: malformed color for `{id}`, expected R,G,B")]
    MalformedColor { line: usize, id: &'static str },

    #[error("line {line}: color value {value} for `{id}` is out of range [0-255]")]
    ColorOutOfRange {
        line: usize,
        id: &'static str,
        value: String,
    },

    #[error("line {line}: map data encountered before all header elements were defined")]
    GridBeforeHeader { line: usize },

    #[error("missing header element `{id}`")]
    MissingHeader { id: &'static str },

    #[error("map is empty or missing")]
    EmptyGrid,

    #[error("line {line}, column {column}: invalid map character {ch:?}")]
    InvalidGridChar {
        line: usize,
        column: usize,
        ch: char,
    },

    #[error("no start position found")]
    NoStart,

    #[error("multiple start positions found: {first:?} and {second:?}")]
    MultipleStarts {
        first: (usize, usize),
        second: (usize, usize),
    },

    #[error("map not closed: floor cell at row {row}, column {col} is open to the {towards}")]
    NotEnclosed {
        row: usize,
        col: usize,
        towards: Facing,
    },

    /// Texture failed to load or decode
    #[error("failed to load texture {path}: {reason}")]
    Texture { path: PathBuf, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;
