pub mod arena;
pub mod config;
pub mod entity;
pub mod frame;
pub mod grid;
pub mod heading;
pub mod input;
pub mod movement;
pub mod rounds;

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lightgrid_core::error::GameError;
use lightgrid_core::game_trait::{
    GameEvent, GameMetadata, PlayerId, PlayerScore, TickGame,
};
use lightgrid_core::player::Player;

use config::CyclesConfig;
use entity::Entity;
use frame::{EntityView, Frame};
use grid::Grid;
use input::{Command, CycleInput, InputQueue};

pub use heading::Heading;

/// Serializable game state for the render collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclesState {
    /// Roster order is the movement order.
    pub entities: Vec<Entity>,
    pub grid: Grid,
    pub cell_size: i32,
    /// Current round, starting at 1.
    pub round: u32,
    /// Ticks played in the current round.
    pub tick: u64,
    /// Rounds won per player.
    pub wins: BTreeMap<PlayerId, u32>,
}

impl CyclesState {
    fn new(grid: Grid, cell_size: i32) -> Self {
        Self {
            entities: Vec::new(),
            grid,
            cell_size,
            round: 1,
            tick: 0,
            wins: BTreeMap::new(),
        }
    }

    pub fn entity(&self, id: PlayerId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn alive_count(&self) -> usize {
        self.entities.iter().filter(|e| e.alive).count()
    }

    /// Drawable snapshot of this state.
    pub fn frame(&self) -> Frame {
        Frame {
            round: self.round,
            tick: self.tick,
            cell_size: self.cell_size,
            entities: self
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    alive: e.alive,
                    x: e.position.x,
                    y: e.position.y,
                    color: e.color,
                })
                .collect(),
            trail: self.grid.blocked_cells(),
        }
    }
}

/// The grid light-cycle game.
pub struct LightCycles {
    state: CyclesState,
    inputs: InputQueue,
    game_config: CyclesConfig,
}

impl LightCycles {
    pub fn new() -> Self {
        Self::with_config(CyclesConfig::load())
    }

    pub fn with_config(config: CyclesConfig) -> Self {
        Self {
            // The board is only allocated by `init`, once the config is validated
            state: CyclesState::new(Grid::new(0, 0), config.cell_step()),
            inputs: InputQueue::new(config.controls),
            game_config: config,
        }
    }

    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    pub fn config(&self) -> &CyclesConfig {
        &self.game_config
    }

    pub fn frame(&self) -> Frame {
        self.state.frame()
    }

    /// Queue a command for the next tick. Returns false if it was dropped.
    pub fn queue_command(&mut self, player_id: PlayerId, command: Command) -> bool {
        if self.state.entity(player_id).is_none() {
            tracing::debug!(player_id, ?command, "Dropped command for unknown player");
            return false;
        }
        self.inputs.push(player_id, command)
    }
}

impl Default for LightCycles {
    fn default() -> Self {
        Self::with_config(CyclesConfig::default())
    }
}

impl TickGame for LightCycles {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Light Cycles".to_string(),
            description: "Steer your cycle, leave a wall behind you, outlast everyone else."
                .to_string(),
            min_players: 1,
            max_players: 8,
        }
    }

    fn init(&mut self, players: &[Player]) -> Result<(), GameError> {
        let spawns = arena::resolve_spawns(&self.game_config, players.len())?;

        let mut ids = HashSet::with_capacity(players.len());
        if let Some(dup) = players.iter().find(|p| !ids.insert(p.id)) {
            return Err(GameError::InvalidConfig(format!(
                "player id {} appears twice in the roster",
                dup.id
            )));
        }

        let mut state = CyclesState::new(
            Grid::new(self.game_config.rows, self.game_config.columns),
            self.game_config.cell_step(),
        );
        for (player, spawn) in players.iter().zip(spawns) {
            state.entities.push(Entity::new(
                player.id,
                spawn.color.unwrap_or(player.color),
                spawn.position,
                spawn.heading,
            ));
            state.wins.insert(player.id, 0);
        }

        tracing::info!(
            players = players.len(),
            rows = self.game_config.rows,
            columns = self.game_config.columns,
            cell_size = self.game_config.cell_size,
            controls = ?self.game_config.controls,
            "Light cycles initialised"
        );

        self.state = state;
        self.inputs = InputQueue::new(self.game_config.controls);
        Ok(())
    }

    fn update(&mut self) -> Vec<GameEvent> {
        if self.state.entities.is_empty() {
            return Vec::new();
        }

        let state = &mut self.state;
        self.inputs.drain_into(&mut state.entities);

        let crashes = movement::process(&mut state.entities, &mut state.grid, state.cell_size);
        state.tick += 1;

        let mut events: Vec<GameEvent> = crashes
            .iter()
            .map(|c| GameEvent::PlayerEliminated {
                player_id: c.entity_id,
            })
            .collect();

        if let Some(outcome) = rounds::process(&mut state.entities, &mut state.grid) {
            if let Some(winner) = outcome.winner {
                *state.wins.entry(winner).or_insert(0) += 1;
            }
            tracing::info!(
                round = state.round,
                ticks = state.tick,
                winner = ?outcome.winner,
                "Round complete"
            );
            events.push(GameEvent::RoundComplete {
                round: state.round,
                winner: outcome.winner,
            });
            state.round += 1;
            state.tick = 0;
        }

        events
    }

    fn serialize_state(&self) -> Result<Vec<u8>, GameError> {
        rmp_serde::to_vec(&self.state).map_err(|e| GameError::Encode(e.to_string()))
    }

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) {
        match rmp_serde::from_slice::<CycleInput>(input) {
            Err(e) => {
                tracing::debug!(player_id, error = %e, "Dropped malformed cycle input");
            },
            Ok(ci) => {
                self.queue_command(player_id, ci.command);
            },
        }
    }

    fn tick_interval(&self) -> Duration {
        self.game_config.tick_interval()
    }

    fn round_number(&self) -> u32 {
        self.state.round
    }

    fn round_results(&self) -> Vec<PlayerScore> {
        self.state
            .entities
            .iter()
            .map(|e| PlayerScore {
                player_id: e.id,
                score: self.state.wins.get(&e.id).copied().unwrap_or(0) as i32,
            })
            .collect()
    }
}
