use serde::{Deserialize, Serialize};

use lightgrid_core::game_trait::PlayerId;
use lightgrid_core::player::PlayerColor;

use crate::heading::Heading;

/// Board-unit position. Always a multiple of the cell size once committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed `(row, col)` of the cell containing this position.
    pub fn cell(self, cell_size: i32) -> (i64, i64) {
        (
            i64::from(self.y.div_euclid(cell_size)),
            i64::from(self.x.div_euclid(cell_size)),
        )
    }

    /// The position one cell further along `heading`.
    pub fn step(self, heading: Heading, cell_size: i32) -> Self {
        let (dx, dy) = heading.offset();
        Self {
            x: self.x.saturating_add(dx * cell_size),
            y: self.y.saturating_add(dy * cell_size),
        }
    }
}

/// Where an entity starts every round. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetTemplate {
    pub position: Position,
    pub heading: Option<Heading>,
}

/// One player's cycle.
///
/// `position`, `heading` and `alive` change every tick; the reset template is
/// private and only read back by [`Entity::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: PlayerId,
    pub color: PlayerColor,
    pub position: Position,
    /// `None` until the first heading is chosen; a headless entity stays put.
    pub heading: Option<Heading>,
    pub alive: bool,
    template: ResetTemplate,
}

impl Entity {
    pub fn new(
        id: PlayerId,
        color: PlayerColor,
        position: Position,
        heading: Option<Heading>,
    ) -> Self {
        Self {
            id,
            color,
            position,
            heading,
            alive: true,
            template: ResetTemplate { position, heading },
        }
    }

    pub fn template(&self) -> &ResetTemplate {
        &self.template
    }

    /// Mark the entity dead. Returns false if it already was.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Restore position, heading and life from the template.
    pub fn reset(&mut self) {
        self.position = self.template.position;
        self.heading = self.template.heading;
        self.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        Entity::new(
            1,
            PlayerColor::default(),
            Position::new(10, 20),
            Some(Heading::Right),
        )
    }

    #[test]
    fn cell_uses_integer_division() {
        assert_eq!(Position::new(12, 7).cell(5), (1, 2));
        assert_eq!(Position::new(0, 0).cell(5), (0, 0));
    }

    #[test]
    fn cell_of_negative_position_is_negative() {
        assert_eq!(Position::new(-5, 0).cell(5), (0, -1));
        assert_eq!(Position::new(0, -1).cell(1), (-1, 0));
    }

    #[test]
    fn step_moves_one_cell_size() {
        let p = Position::new(10, 10);
        assert_eq!(p.step(Heading::Up, 5), Position::new(10, 5));
        assert_eq!(p.step(Heading::Down, 5), Position::new(10, 15));
        assert_eq!(p.step(Heading::Left, 5), Position::new(5, 10));
        assert_eq!(p.step(Heading::Right, 5), Position::new(15, 10));
    }

    #[test]
    fn kill_reports_transition_once() {
        let mut e = entity();
        assert!(e.kill());
        assert!(!e.kill());
        assert!(!e.alive);
    }

    #[test]
    fn reset_restores_template() {
        let mut e = entity();
        e.position = Position::new(90, 90);
        e.heading = Some(Heading::Up);
        e.kill();

        e.reset();
        assert_eq!(e.position, Position::new(10, 20));
        assert_eq!(e.heading, Some(Heading::Right));
        assert!(e.alive);
        assert_eq!(e.template().position, Position::new(10, 20));
    }
}
