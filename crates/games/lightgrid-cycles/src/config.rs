use std::time::Duration;

use serde::{Deserialize, Serialize};

use lightgrid_core::error::GameError;
use lightgrid_core::player::PlayerColor;

use crate::heading::Heading;
use crate::input::ControlScheme;

/// Largest board the grid will allocate.
pub const MAX_CELLS: usize = 1 << 24;

/// Data-driven board configuration. Immutable once a game is initialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclesConfig {
    /// Number of cell rows.
    pub rows: usize,
    /// Number of cell columns.
    pub columns: usize,
    /// Edge length of one cell in board units (pixels for a renderer).
    pub cell_size: u32,
    /// Delay between ticks (milliseconds).
    pub tick_delay_ms: u64,
    /// Whether players turn relative to their heading or pick it directly.
    pub controls: ControlScheme,
    /// Explicit start positions, in roster order. Empty = generated layout.
    pub spawns: Vec<SpawnConfig>,
}

/// One explicit start position, in board units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub x: i32,
    pub y: i32,
    /// Omitted = stationary until the first command.
    #[serde(default)]
    pub heading: Option<Heading>,
    /// Omitted = the player's own color.
    #[serde(default)]
    pub color: Option<PlayerColor>,
}

impl Default for CyclesConfig {
    fn default() -> Self {
        Self {
            rows: 120,
            columns: 40,
            cell_size: 5,
            tick_delay_ms: 10,
            controls: ControlScheme::Absolute,
            spawns: Vec::new(),
        }
    }
}

impl CyclesConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("LIGHTGRID_CYCLES_CONFIG")
            && let Some(config) = Self::read(&path)
        {
            return config;
        }
        Self::read("config/cycles.toml").unwrap_or_default()
    }

    fn read(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<Self>(&contents) {
            Ok(config) => {
                tracing::info!(path, "Loaded board configuration");
                Some(config)
            },
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to parse board configuration");
                None
            },
        }
    }

    /// Reject boards that cannot be played on.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows == 0 {
            return Err(GameError::InvalidConfig("rows must be > 0".to_string()));
        }
        if self.columns == 0 {
            return Err(GameError::InvalidConfig("columns must be > 0".to_string()));
        }
        if self.cell_size == 0 {
            return Err(GameError::InvalidConfig("cell_size must be > 0".to_string()));
        }
        if self.tick_delay_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_delay_ms must be > 0".to_string(),
            ));
        }
        match self.rows.checked_mul(self.columns) {
            Some(cells) if cells <= MAX_CELLS => {},
            _ => {
                return Err(GameError::InvalidConfig(format!(
                    "board of {}x{} cells exceeds the {MAX_CELLS} cell limit",
                    self.columns, self.rows
                )));
            },
        }
        // Positions are i32 board units; the far edge must still fit
        let limit = i64::from(i32::MAX);
        if self.board_width() > limit || self.board_height() > limit {
            return Err(GameError::InvalidConfig(format!(
                "board of {}x{} cells of size {} exceeds the coordinate range",
                self.columns, self.rows, self.cell_size
            )));
        }
        Ok(())
    }

    /// Board width in board units.
    pub fn board_width(&self) -> i64 {
        self.columns as i64 * i64::from(self.cell_size)
    }

    /// Board height in board units.
    pub fn board_height(&self) -> i64 {
        self.rows as i64 * i64::from(self.cell_size)
    }

    /// Cell size as a signed step. Valid after `validate()`.
    pub fn cell_step(&self) -> i32 {
        i32::try_from(self.cell_size).unwrap_or(i32::MAX)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }
}
