use std::collections::HashSet;

use lightgrid_core::error::GameError;
use lightgrid_core::player::PlayerColor;

use crate::config::CyclesConfig;
use crate::entity::Position;
use crate::heading::Heading;

/// A start position with starting heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPoint {
    pub position: Position,
    pub heading: Option<Heading>,
    pub color: Option<PlayerColor>,
}

/// Generate start positions for N players evenly distributed on a circle
/// inside the board, each facing inward.
pub fn create_spawns(config: &CyclesConfig, player_count: usize) -> Vec<SpawnPoint> {
    let mut spawn_points = Vec::with_capacity(player_count);
    let cols = config.columns as f32;
    let rows = config.rows as f32;
    let margin = (config.rows.min(config.columns) / 8).max(1) as f32;
    let cx = (cols - 1.0) / 2.0;
    let cy = (rows - 1.0) / 2.0;
    let radius = (cx.min(cy) - margin).max(0.0);
    let cell = config.cell_step();

    for i in 0..player_count {
        let angle = std::f32::consts::TAU * (i as f32) / (player_count.max(1) as f32);

        let col = (cx + radius * angle.cos()).round().clamp(0.0, cols - 1.0);
        let row = (cy + radius * angle.sin()).round().clamp(0.0, rows - 1.0);

        // Face inward along the dominant axis
        let dx = cx - col;
        let dy = cy - row;
        let heading = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Heading::Right
            } else {
                Heading::Left
            }
        } else if dy > 0.0 {
            Heading::Down
        } else {
            Heading::Up
        };

        spawn_points.push(SpawnPoint {
            position: Position::new(col as i32 * cell, row as i32 * cell),
            heading: Some(heading),
            color: None,
        });
    }

    spawn_points
}

/// Pick the spawn for each of `player_count` players: the configured spawns
/// in order, or a generated layout when none are configured. Every spawn must
/// be grid-aligned, on the board, and on a distinct cell.
pub fn resolve_spawns(
    config: &CyclesConfig,
    player_count: usize,
) -> Result<Vec<SpawnPoint>, GameError> {
    config.validate()?;
    if player_count == 0 {
        return Err(GameError::InvalidConfig(
            "at least one player is required".to_string(),
        ));
    }

    let spawns = if config.spawns.is_empty() {
        create_spawns(config, player_count)
    } else {
        if config.spawns.len() < player_count {
            return Err(GameError::InvalidConfig(format!(
                "{player_count} players but only {} spawns configured",
                config.spawns.len()
            )));
        }
        config
            .spawns
            .iter()
            .take(player_count)
            .map(|s| SpawnPoint {
                position: Position::new(s.x, s.y),
                heading: s.heading,
                color: s.color,
            })
            .collect()
    };

    let cell = config.cell_step();
    let mut seen = HashSet::with_capacity(spawns.len());
    for (i, spawn) in spawns.iter().enumerate() {
        let Position { x, y } = spawn.position;
        if x % cell != 0 || y % cell != 0 {
            return Err(GameError::InvalidConfig(format!(
                "spawn {i} at ({x}, {y}) is not aligned to cell size {cell}"
            )));
        }
        if x < 0
            || y < 0
            || i64::from(x) >= config.board_width()
            || i64::from(y) >= config.board_height()
        {
            return Err(GameError::InvalidConfig(format!(
                "spawn {i} at ({x}, {y}) is outside the board"
            )));
        }
        if !seen.insert(spawn.position) {
            return Err(GameError::InvalidConfig(format!(
                "spawn {i} at ({x}, {y}) shares a cell with another spawn"
            )));
        }
    }

    Ok(spawns)
}
