use serde::{Deserialize, Serialize};

use lightgrid_core::game_trait::PlayerId;

use crate::entity::Entity;
use crate::grid::Grid;

/// Result of a decided round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Sole survivor, or `None` when the last cycles died together.
    pub winner: Option<PlayerId>,
}

/// Whether the round is over given the current roster.
///
/// With two or more entities the round is decided once at most one is alive.
/// A solo roster keeps playing until its only entity dies.
pub fn is_decided(entities: &[Entity]) -> bool {
    let alive = entities.iter().filter(|e| e.alive).count();
    if entities.len() >= 2 {
        alive <= 1
    } else {
        alive == 0
    }
}

/// Run after movement each tick. When the round is decided, every entity
/// (survivor included) returns to its template and the grid is cleared.
pub fn process(entities: &mut [Entity], grid: &mut Grid) -> Option<RoundOutcome> {
    if !is_decided(entities) {
        return None;
    }

    let winner = entities.iter().find(|e| e.alive).map(|e| e.id);

    for entity in entities.iter_mut() {
        entity.reset();
    }
    grid.clear();

    Some(RoundOutcome { winner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Position;
    use crate::heading::Heading;
    use lightgrid_core::player::PlayerColor;

    fn roster() -> Vec<Entity> {
        vec![
            Entity::new(1, PlayerColor::default(), Position::new(1, 5), Some(Heading::Right)),
            Entity::new(2, PlayerColor::default(), Position::new(8, 5), Some(Heading::Left)),
        ]
    }

    #[test]
    fn live_round_is_untouched() {
        let mut entities = roster();
        entities[0].position = Position::new(3, 5);
        let mut grid = Grid::new(10, 10);
        grid.block(5, 1);

        assert_eq!(process(&mut entities, &mut grid), None);
        assert_eq!(entities[0].position, Position::new(3, 5));
        assert!(grid.is_blocked(5, 1));
    }

    #[test]
    fn last_survivor_wins_and_everyone_resets() {
        let mut entities = roster();
        entities[0].position = Position::new(4, 5);
        entities[0].heading = Some(Heading::Up);
        entities[1].position = Position::new(6, 5);
        entities[1].kill();
        let mut grid = Grid::new(10, 10);
        grid.block(5, 1);
        grid.block(5, 7);

        let outcome = process(&mut entities, &mut grid);

        assert_eq!(outcome, Some(RoundOutcome { winner: Some(1) }));
        for e in &entities {
            assert!(e.alive);
            assert_eq!(e.position, e.template().position);
            assert_eq!(e.heading, e.template().heading);
        }
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn mutual_crash_has_no_winner() {
        let mut entities = roster();
        entities[0].kill();
        entities[1].kill();
        let mut grid = Grid::new(10, 10);

        let outcome = process(&mut entities, &mut grid);

        assert_eq!(outcome, Some(RoundOutcome { winner: None }));
        assert!(entities.iter().all(|e| e.alive));
    }

    #[test]
    fn solo_roster_plays_until_death() {
        let mut entities = vec![Entity::new(
            1,
            PlayerColor::default(),
            Position::new(0, 0),
            None,
        )];
        let mut grid = Grid::new(5, 5);

        assert!(process(&mut entities, &mut grid).is_none());

        entities[0].kill();
        assert_eq!(
            process(&mut entities, &mut grid),
            Some(RoundOutcome { winner: None })
        );
        assert!(entities[0].alive);
    }
}
