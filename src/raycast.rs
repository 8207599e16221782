//! Per-column ray casting over the cell grid (DDA).

use crate::camera::Observer;
use crate::world::{Cell, Facing, Grid};

/// Perpendicular distances are clamped to at least this, so a wall right in
/// front of the observer still yields a finite stripe.
pub const MIN_PERP_DIST: f64 = 0.01;

// Stand-in for "never crosses a grid line on this axis"
const NO_CROSSING: f64 = 1e30;

/// Which kind of grid line the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Vertical grid line (x = const): an east or west face
    X,
    /// Horizontal grid line (y = const): a north or south face
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayResult {
    pub dir: [f64; 2],
    /// Last cell visited: the wall cell on a hit, the first cell off the grid on a miss
    pub cell: [i32; 2],
    pub side: Side,
    /// Fisheye-corrected distance; infinite on a miss
    pub perp_dist: f64,
    /// DDA iterations taken
    pub steps: usize,
    pub hit: bool,
}

impl RayResult {
    /// Texture used for the struck face.
    ///
    /// A ray travelling +x strikes the west side of a wall block and shows the
    /// west texture; likewise -x shows east, +y north and -y south.
    pub fn face(&self) -> Facing {
        match self.side {
            Side::X if self.dir[0] > 0.0 => Facing::West,
            Side::X => Facing::East,
            Side::Y if self.dir[1] > 0.0 => Facing::North,
            Side::Y => Facing::South,
        }
    }

    /// Fractional position of the hit along the wall face, in [0, 1].
    pub fn wall_x(&self, pos: [f64; 2]) -> f64 {
        let along = match self.side {
            Side::X => pos[1] + self.perp_dist * self.dir[1],
            Side::Y => pos[0] + self.perp_dist * self.dir[0],
        };
        along - along.floor()
    }

    /// Texture column for a texture `tex_width` pixels wide, always in `0..tex_width`.
    pub fn tex_x(&self, pos: [f64; 2], tex_width: usize) -> usize {
        debug_assert!(tex_width > 0);
        let max = tex_width.saturating_sub(1);
        let tx = ((self.wall_x(pos) * tex_width as f64) as usize).min(max);
        match self.face() {
            Facing::West | Facing::South => max - tx,
            Facing::East | Facing::North => tx,
        }
    }
}

/// Casts the ray for screen `column` of a `screen_width` wide view.
pub fn cast_column(grid: &Grid, obs: &Observer, column: usize, screen_width: usize) -> RayResult {
    // camera_x goes from -1 (left) to 1 (right)
    let camera_x = 2.0 * column as f64 / screen_width as f64 - 1.0;
    cast(grid, obs.pos, obs.ray_dir(camera_x))
}

/// Walks the grid from `pos` along `dir` until a wall is struck or the ray leaves the grid.
pub fn cast(grid: &Grid, pos: [f64; 2], dir: [f64; 2]) -> RayResult {
    let mut map_x = pos[0].floor() as i32;
    let mut map_y = pos[1].floor() as i32;

    // Length of ray from one x or y-side to next x or y-side
    let delta_x = if dir[0] == 0.0 {
        NO_CROSSING
    } else {
        (1.0 / dir[0]).abs()
    };
    let delta_y = if dir[1] == 0.0 {
        NO_CROSSING
    } else {
        (1.0 / dir[1]).abs()
    };

    let (step_x, mut side_dist_x) = if dir[0] < 0.0 {
        (-1, (pos[0] - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - pos[0]) * delta_x)
    };
    let (step_y, mut side_dist_y) = if dir[1] < 0.0 {
        (-1, (pos[1] - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - pos[1]) * delta_y)
    };

    let mut side;
    let mut steps = 0;
    // each pass moves one cell, so the ray leaves the grid within width + height passes
    loop {
        if side_dist_x < side_dist_y {
            side_dist_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_dist_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        steps += 1;

        match grid.get(map_x, map_y) {
            Some(Cell::Wall) => break,
            Some(_) => {}
            None => {
                return RayResult {
                    dir,
                    cell: [map_x, map_y],
                    side,
                    perp_dist: f64::INFINITY,
                    steps,
                    hit: false,
                };
            }
        }
    }

    // side_dist overshoots by one delta on the axis just crossed
    let perp_dist = match side {
        Side::X => side_dist_x - delta_x,
        Side::Y => side_dist_y - delta_y,
    };

    RayResult {
        dir,
        cell: [map_x, map_y],
        side,
        perp_dist: perp_dist.max(MIN_PERP_DIST),
        steps,
        hit: true,
    }
}
