use serde::{Deserialize, Serialize};

use lightgrid_core::game_trait::PlayerId;
use lightgrid_core::player::PlayerColor;

use crate::grid::Cell;

/// What a renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: PlayerId,
    pub alive: bool,
    pub x: i32,
    pub y: i32,
    pub color: PlayerColor,
}

/// Drawable snapshot of the board. Trail cells are `(row, col)`;
/// multiply by `cell_size` for board units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub round: u32,
    pub tick: u64,
    pub cell_size: i32,
    pub entities: Vec<EntityView>,
    pub trail: Vec<Cell>,
}
