use std::fmt::{self, Write};

/// Cardinal direction, used both for start markers and wall faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::East, Facing::West];

    /// Grid offset (dx, dy) one cell towards this direction. North is -y.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::South => (0, 1),
            Facing::East => (1, 0),
            Facing::West => (-1, 0),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East => "east",
            Facing::West => "west",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor,
    /// Space in the source: outside the playable area
    Void,
    /// Start marker; only exists before validation
    Start(Facing),
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '1' => Some(Cell::Wall),
            '0' => Some(Cell::Floor),
            ' ' => Some(Cell::Void),
            'N' => Some(Cell::Start(Facing::North)),
            'S' => Some(Cell::Start(Facing::South)),
            'E' => Some(Cell::Start(Facing::East)),
            'W' => Some(Cell::Start(Facing::West)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => '1',
            Cell::Floor => '0',
            Cell::Void => ' ',
            Cell::Start(Facing::North) => 'N',
            Cell::Start(Facing::South) => 'S',
            Cell::Start(Facing::East) => 'E',
            Cell::Start(Facing::West) => 'W',
        }
    }
}

/// Rectangular cell grid, row-major. 1 world unit = 1 cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Builds a rectangular grid; short rows are right-padded with `Void`.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Cell::Void);
            cells.extend(row);
        }
        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }

    /// True when the point lies in a wall cell or outside the grid.
    #[inline]
    pub fn blocks(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = (x.floor(), y.floor());
        if cx < 0.0 || cy < 0.0 {
            return true;
        }
        !matches!(self.get(cx as i32, cy as i32), Some(cell) if cell != Cell::Wall)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks panics on 0; an empty grid has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Iterates (x, y, cell) in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }
}

/// One line per row, in scene-file characters.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for &cell in row {
                f.write_char(cell.to_char())?;
            }
        }
        Ok(())
    }
}
