//! `.cub` scene file parsing.
//!
//! The header (four texture paths, floor and ceiling colors) must come first,
//! in any order, each element exactly once. Indentation is ignored when
//! classifying a line: the first one whose text starts with `1` or `0` begins
//! the map, and from then on every line is a map row, blank ones included.
//! Map rows keep their leading spaces so columns stay aligned.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{SceneError, SceneResult};
use crate::scene::{Header, Rgb, SceneDraft, TexturePaths};
use crate::world::{Cell, Grid};

/// Line source that owns its pending-data buffer.
pub struct LineReader<R> {
    source: R,
    buf: String,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: String::new(),
            line_no: 0,
        }
    }

    /// Next line with its terminator removed, paired with its 1-based number.
    pub fn next_line(&mut self) -> io::Result<Option<(usize, &str)>> {
        self.buf.clear();
        if self.source.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let line = self.buf.trim_end_matches(['\n', '\r']);
        Ok(Some((self.line_no, line)))
    }

    /// Number of lines returned so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[derive(Default)]
struct HeaderSlots {
    north: Option<PathBuf>,
    south: Option<PathBuf>,
    west: Option<PathBuf>,
    east: Option<PathBuf>,
    floor: Option<Rgb>,
    ceiling: Option<Rgb>,
}

impl HeaderSlots {
    fn is_set(&self, header: Header) -> bool {
        match header {
            Header::North => self.north.is_some(),
            Header::South => self.south.is_some(),
            Header::West => self.west.is_some(),
            Header::East => self.east.is_some(),
            Header::Floor => self.floor.is_some(),
            Header::Ceiling => self.ceiling.is_some(),
        }
    }

    fn first_missing(&self) -> Option<Header> {
        Header::ALL.into_iter().find(|&h| !self.is_set(h))
    }

    fn texture_slot(&mut self, header: Header) -> Option<&mut Option<PathBuf>> {
        match header {
            Header::North => Some(&mut self.north),
            Header::South => Some(&mut self.south),
            Header::West => Some(&mut self.west),
            Header::East => Some(&mut self.east),
            Header::Floor | Header::Ceiling => None,
        }
    }

    fn color_slot(&mut self, header: Header) -> Option<&mut Option<Rgb>> {
        match header {
            Header::Floor => Some(&mut self.floor),
            Header::Ceiling => Some(&mut self.ceiling),
            _ => None,
        }
    }
}

/// Incremental parser: feed it lines in order, then `finish`.
#[derive(Default)]
pub struct SceneParser {
    headers: HeaderSlots,
    rows: Vec<Vec<Cell>>,
    in_grid: bool,
}

impl SceneParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line_no: usize, line: &str) -> SceneResult<()> {
        let line = line.trim_end();

        if !self.in_grid {
            let text = line.trim_start();
            if text.is_empty() {
                return Ok(());
            }
            if !text.starts_with(['1', '0']) {
                return self.header_line(line_no, text);
            }
            if let Some(missing) = self.headers.first_missing() {
                log::debug!("map starts on line {line_no} but `{}` is unset", missing.id());
                return Err(SceneError::GridBeforeHeader { line: line_no });
            }
            self.in_grid = true;
        }

        self.grid_line(line_no, line)
    }

    fn header_line(&mut self, line_no: usize, line: &str) -> SceneResult<()> {
        let Some((header, rest)) = Header::split_line(line) else {
            return Err(SceneError::UnknownIdentifier {
                line: line_no,
                text: line.to_string(),
            });
        };
        if self.headers.is_set(header) {
            return Err(SceneError::DuplicateIdentifier {
                line: line_no,
                id: header.id(),
            });
        }
        let value = rest.trim();
        if value.is_empty() {
            return Err(SceneError::MissingValue {
                line: line_no,
                id: header.id(),
            });
        }

        if let Some(slot) = self.headers.texture_slot(header) {
            *slot = Some(PathBuf::from(value));
        } else if let Some(slot) = self.headers.color_slot(header) {
            *slot = Some(parse_color(line_no, header, value)?);
        }
        Ok(())
    }

    /// Leading spaces become `Void` cells; other leading whitespace (tabs) is dropped.
    fn grid_line(&mut self, line_no: usize, line: &str) -> SceneResult<()> {
        let body = line.trim_start();
        let indent = &line[..line.len() - body.len()];
        let skipped = indent.chars().count();

        let mut row: Vec<Cell> = indent
            .chars()
            .filter(|&c| c == ' ')
            .map(|_| Cell::Void)
            .collect();
        for (i, ch) in body.chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or(SceneError::InvalidGridChar {
                line: line_no,
                column: skipped + i + 1,
                ch,
            })?;
            row.push(cell);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn finish(self) -> SceneResult<SceneDraft> {
        let missing = |h: Header| SceneError::MissingHeader { id: h.id() };
        let HeaderSlots {
            north,
            south,
            west,
            east,
            floor,
            ceiling,
        } = self.headers;
        let textures = TexturePaths {
            north: north.ok_or_else(|| missing(Header::North))?,
            south: south.ok_or_else(|| missing(Header::South))?,
            west: west.ok_or_else(|| missing(Header::West))?,
            east: east.ok_or_else(|| missing(Header::East))?,
        };
        let floor = floor.ok_or_else(|| missing(Header::Floor))?;
        let ceiling = ceiling.ok_or_else(|| missing(Header::Ceiling))?;

        if self.rows.is_empty() {
            return Err(SceneError::EmptyGrid);
        }
        let grid = Grid::from_rows(self.rows);
        log::debug!("parsed {}x{} map", grid.width(), grid.height());

        Ok(SceneDraft {
            textures,
            floor,
            ceiling,
            grid,
        })
    }
}

/// `R,G,B`: exactly three tokens of digits with an optional leading `+`, each in 0..=255.
fn parse_color(line_no: usize, header: Header, value: &str) -> SceneResult<Rgb> {
    let malformed = || SceneError::MalformedColor {
        line: line_no,
        id: header.id(),
    };

    let tokens: Vec<&str> = value.split(',').collect();
    if tokens.len() != 3 {
        return Err(malformed());
    }

    let mut channels = [0u8; 3];
    for (channel, token) in channels.iter_mut().zip(tokens) {
        let digits = token.strip_prefix('+').unwrap_or(token);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        // a digit string too long for u32 is out of range as well
        *channel = digits
            .parse::<u32>()
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| SceneError::ColorOutOfRange {
                line: line_no,
                id: header.id(),
                value: token.to_string(),
            })?;
    }

    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

/// Parses scene text from any buffered reader. `origin` names the source in I/O errors.
pub fn parse_reader<R: BufRead>(source: R, origin: &Path) -> SceneResult<SceneDraft> {
    let mut reader = LineReader::new(source);
    let mut parser = SceneParser::new();
    loop {
        let pending = reader.line_no() + 1;
        let next = reader.next_line().map_err(|source| {
            if source.kind() == io::ErrorKind::InvalidData {
                SceneError::InvalidEncoding { line: pending }
            } else {
                SceneError::Io {
                    path: origin.to_path_buf(),
                    source,
                }
            }
        })?;
        let Some((line_no, line)) = next else {
            break;
        };
        parser.feed(line_no, line)?;
    }
    parser.finish()
}

pub fn parse_file(path: impl AsRef<Path>) -> SceneResult<SceneDraft> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file), path)
}

pub fn parse_str(text: &str) -> SceneResult<SceneDraft> {
    parse_reader(text.as_bytes(), Path::new("<memory>"))
}
