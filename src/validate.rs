use crate::error::{SceneError, SceneResult};
use crate::scene::{Scene, SceneDraft, Start};
use crate::world::{Cell, Facing, Grid};

/// Turns a parsed draft into a playable scene.
///
/// Exactly one start marker must exist; it becomes floor. Then every floor
/// cell must have a wall or floor on all four sides. This is a local
/// neighbor test, not a flood fill: a walled-off floor pocket elsewhere in
/// the map passes as long as it is itself closed.
pub fn validate(draft: SceneDraft) -> SceneResult<Scene> {
    let SceneDraft {
        textures,
        floor,
        ceiling,
        mut grid,
    } = draft;

    let start = find_start(&grid)?;
    grid.set(start.col, start.row, Cell::Floor);
    check_enclosed(&grid)?;
    log::trace!("validated map:\n{grid}");

    log::debug!(
        "start at column {}, row {} facing {}",
        start.col,
        start.row,
        start.facing
    );
    Ok(Scene {
        textures,
        floor,
        ceiling,
        grid,
        start,
    })
}

/// Locates the single start marker. Positions in errors are (column, row).
pub fn find_start(grid: &Grid) -> SceneResult<Start> {
    let mut found: Option<Start> = None;
    for (col, row, cell) in grid.iter() {
        let Cell::Start(facing) = cell else {
            continue;
        };
        if let Some(first) = found {
            return Err(SceneError::MultipleStarts {
                first: (first.col, first.row),
                second: (col, row),
            });
        }
        found = Some(Start { col, row, facing });
    }
    found.ok_or(SceneError::NoStart)
}

pub fn check_enclosed(grid: &Grid) -> SceneResult<()> {
    for (col, row, cell) in grid.iter() {
        if cell != Cell::Floor {
            continue;
        }
        for towards in Facing::ALL {
            let (dx, dy) = towards.offset();
            let neighbor = grid.get(col as i32 + dx, row as i32 + dy);
            if matches!(neighbor, None | Some(Cell::Void)) {
                return Err(SceneError::NotEnclosed { row, col, towards });
            }
        }
    }
    Ok(())
}
