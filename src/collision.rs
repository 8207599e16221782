use crate::world::Grid;

/// Moves `pos` by `delta`, one axis at a time.
///
/// X is tried first with the old Y, then Y with the (possibly updated) X.
/// Each component is dropped if it would end inside a wall or off the grid,
/// so a diagonal push into a wall slides along it.
pub fn slide(grid: &Grid, pos: [f64; 2], delta: [f64; 2]) -> [f64; 2] {
    let mut out = pos;

    let nx = pos[0] + delta[0];
    if !grid.blocks(nx, out[1]) {
        out[0] = nx;
    }

    let ny = pos[1] + delta[1];
    if !grid.blocks(out[0], ny) {
        out[1] = ny;
    }

    out
}

/// Displacement for walking along `axis` (direction or camera plane) at `speed`; `sign` is ±1.
#[inline]
pub fn step(axis: [f64; 2], speed: f64, sign: f64) -> [f64; 2] {
    [axis[0] * speed * sign, axis[1] * speed * sign]
}
