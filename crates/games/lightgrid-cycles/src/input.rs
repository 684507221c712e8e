use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lightgrid_core::game_trait::PlayerId;

use crate::entity::Entity;
use crate::heading::Heading;

/// How players steer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    /// Arrow keys pick the heading directly.
    #[default]
    Absolute,
    /// Two keys rotate the current heading 90 degrees.
    Turning,
}

/// A resolved steering command for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    TurnLeft,
    TurnRight,
    SetHeading(Heading),
}

impl Command {
    /// The control scheme this command belongs to.
    pub fn scheme(self) -> ControlScheme {
        match self {
            Command::TurnLeft | Command::TurnRight => ControlScheme::Turning,
            Command::SetHeading(_) => ControlScheme::Absolute,
        }
    }

    /// New heading after applying the command. Turning without a heading is a no-op.
    pub fn apply(self, heading: Option<Heading>) -> Option<Heading> {
        match self {
            Command::TurnLeft => heading.map(Heading::turn_left),
            Command::TurnRight => heading.map(Heading::turn_right),
            Command::SetHeading(h) => Some(h),
        }
    }
}

/// Input from a cycle player, as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInput {
    pub command: Command,
}

/// Commands waiting for the next tick. Only the latest per entity survives.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    scheme: ControlScheme,
    pending: HashMap<PlayerId, Command>,
}

impl InputQueue {
    pub fn new(scheme: ControlScheme) -> Self {
        Self {
            scheme,
            pending: HashMap::new(),
        }
    }

    /// Queue a command, replacing any earlier one for the same entity this tick.
    /// Returns false if the command does not fit the control scheme.
    pub fn push(&mut self, entity_id: PlayerId, command: Command) -> bool {
        if command.scheme() != self.scheme {
            tracing::debug!(
                entity_id,
                ?command,
                scheme = ?self.scheme,
                "Dropped command for the wrong control scheme"
            );
            return false;
        }
        self.pending.insert(entity_id, command);
        true
    }

    /// Apply queued commands to living entities and empty the queue.
    pub fn drain_into(&mut self, entities: &mut [Entity]) {
        for entity in entities.iter_mut() {
            let Some(command) = self.pending.remove(&entity.id) else {
                continue;
            };
            if entity.alive {
                entity.heading = command.apply(entity.heading);
            }
        }
        self.pending.clear();
    }
}
