//! Per-tick movement and collision.
//!
//! Entities are advanced one at a time in roster order and the grid is
//! mutated as each one moves, so an entity processed earlier in the tick
//! claims cells before the ones after it. Two cycles meeting head-on resolve
//! in favour of whichever comes first in the roster.
//!
//! A cell holding another cycle is fatal to enter when that cycle is dead,
//! stationary, or has already moved this tick. A cycle still waiting to move
//! can be run into; it then dies in place when its own turn comes.

use serde::{Deserialize, Serialize};

use lightgrid_core::game_trait::PlayerId;

use crate::entity::{Entity, Position};
use crate::grid::{Cell, Grid};

/// What an entity ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// The next cell lies outside the board.
    Wall,
    /// The next cell is part of a trail laid this round.
    Trail,
    /// Another cycle holds the cell.
    Cycle,
}

/// A death produced by one movement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crash {
    pub entity_id: PlayerId,
    pub cause: CrashCause,
    /// The cell the entity tried to enter, as signed `(row, col)`.
    pub target: (i64, i64),
}

/// Map a position onto the grid, if it lies on it.
pub fn grid_cell(grid: &Grid, position: Position, cell_size: i32) -> Option<Cell> {
    let (row, col) = position.cell(cell_size);
    grid.contains(row, col).then_some((row as usize, col as usize))
}

/// Whether any entity other than `skip` sits on `cell` and matches `pred`.
fn occupied_by(
    entities: &[Entity],
    skip: usize,
    cell: (i64, i64),
    cell_size: i32,
    pred: impl Fn(usize, &Entity) -> bool,
) -> bool {
    entities
        .iter()
        .enumerate()
        .any(|(j, other)| {
            j != skip && other.position.cell(cell_size) == cell && pred(j, other)
        })
}

fn crash(crashes: &mut Vec<Crash>, entity: &mut Entity, cause: CrashCause, target: (i64, i64)) {
    entity.kill();
    tracing::debug!(
        entity_id = entity.id,
        ?cause,
        row = target.0,
        col = target.1,
        "Cycle crashed"
    );
    crashes.push(Crash {
        entity_id: entity.id,
        cause,
        target,
    });
}

/// Advance every living entity by one cell along its heading.
///
/// Dead entities and entities without a heading are skipped. A blocked,
/// occupied or off-board target kills the entity in place; otherwise the cell
/// it leaves becomes trail and it moves.
pub fn process(entities: &mut [Entity], grid: &mut Grid, cell_size: i32) -> Vec<Crash> {
    let mut crashes = Vec::new();
    let mut moved = vec![false; entities.len()];

    for i in 0..entities.len() {
        let entity = &entities[i];
        if !entity.alive {
            continue;
        }
        let Some(heading) = entity.heading else {
            continue;
        };
        let position = entity.position;

        let Some((old_row, old_col)) = grid_cell(grid, position, cell_size) else {
            // Committed positions are always on the board
            tracing::warn!(
                entity_id = entity.id,
                x = position.x,
                y = position.y,
                "Entity found off the board, marking dead"
            );
            let cell = position.cell(cell_size);
            crash(&mut crashes, &mut entities[i], CrashCause::Wall, cell);
            continue;
        };

        let candidate = position.step(heading, cell_size);
        let target = candidate.cell(cell_size);

        let cause = match grid_cell(grid, candidate, cell_size) {
            None => Some(CrashCause::Wall),
            Some((row, col)) if grid.is_blocked(row, col) => Some(CrashCause::Trail),
            Some(_)
                if occupied_by(entities, i, target, cell_size, |j, other| {
                    !other.alive || other.heading.is_none() || j < i
                }) =>
            {
                Some(CrashCause::Cycle)
            },
            // An earlier cycle moved onto this one
            Some(_)
                if occupied_by(entities, i, position.cell(cell_size), cell_size, |j, _| {
                    moved[j]
                }) =>
            {
                Some(CrashCause::Cycle)
            },
            Some(_) => None,
        };

        if let Some(cause) = cause {
            crash(&mut crashes, &mut entities[i], cause, target);
            continue;
        }

        // Trail goes behind the cycle, never under it
        grid.block(old_row, old_col);
        entities[i].position = candidate;
        moved[i] = true;
    }

    crashes
}
