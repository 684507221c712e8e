use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::player::Player;

/// Unique identifier for a player (and the entity it controls).
pub type PlayerId = u64;

/// Core trait that every Lightgrid game implements.
///
/// The host owns the tick source and the input channel;
/// the game only advances its own state one tick at a time.
pub trait TickGame: Send {
    /// Game metadata for logs and the host banner.
    fn metadata(&self) -> GameMetadata;

    /// Called once before the first tick. Fails on malformed configuration.
    fn init(&mut self, players: &[Player]) -> Result<(), GameError>;

    /// Advance the simulation by exactly one tick. Returns the events it produced.
    fn update(&mut self) -> Vec<GameEvent>;

    /// Serialize the authoritative game state for the render collaborator.
    fn serialize_state(&self) -> Result<Vec<u8>, GameError>;

    /// Queue a player's encoded input for the next tick.
    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]);

    /// Delay between two ticks of the fixed-interval driver.
    fn tick_interval(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Current round number, starting at 1.
    fn round_number(&self) -> u32;

    /// Scores accumulated so far, one entry per player.
    fn round_results(&self) -> Vec<PlayerScore>;
}

/// Game metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerEliminated {
        player_id: PlayerId,
    },
    /// The round was decided and the roster has already been reset.
    RoundComplete {
        round: u32,
        winner: Option<PlayerId>,
    },
}

/// Score entry for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub score: i32,
}
