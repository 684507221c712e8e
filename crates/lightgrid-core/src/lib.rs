pub mod error;
pub mod game_trait;
pub mod player;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, PlayerId, PlayerScore, TickGame};
    use crate::player::{Player, PlayerColor};

    /// Create `n` test players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                id: i as PlayerId + 1,
                display_name: format!("Player{}", i + 1),
                color: PlayerColor::for_index(i),
            })
            .collect()
    }

    /// Run N game ticks, returning all accumulated events.
    pub fn run_game_ticks(game: &mut dyn TickGame, n: usize) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update());
        }
        all_events
    }

    fn state_bytes(game: &dyn TickGame) -> Vec<u8> {
        game.serialize_state()
            .expect("serialize_state() must succeed in tests")
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Generic checks every TickGame implementation must pass. Game crates
    // call them from their own #[cfg(test)] modules.

    /// After init() with N players, serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_player_state(game: &mut dyn TickGame, player_count: usize) {
        let players = make_players(player_count);
        game.init(&players).expect("init must accept a valid roster");
        let state = state_bytes(game);
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
        assert_eq!(game.round_number(), 1, "init must start at round 1");
    }

    /// apply_input() with valid data followed by update() must change state.
    pub fn contract_apply_input_changes_state(
        game: &mut dyn TickGame,
        valid_input: &[u8],
        player_id: PlayerId,
    ) {
        let before = state_bytes(game);
        game.apply_input(player_id, valid_input);
        game.update();
        let after = state_bytes(game);
        assert_ne!(
            before, after,
            "State must change after apply_input + update"
        );
    }

    /// update() must advance game state.
    pub fn contract_update_advances_state(game: &mut dyn TickGame) {
        let before = state_bytes(game);
        game.update();
        let after = state_bytes(game);
        assert_ne!(before, after, "update() must advance game state (tick)");
    }

    /// Running update() enough times must eventually decide a round and
    /// move on to the next one.
    pub fn contract_round_eventually_completes(game: &mut dyn TickGame, max_ticks: usize) {
        let start_round = game.round_number();
        for _ in 0..max_ticks {
            let events = game.update();
            if let Some(GameEvent::RoundComplete { round, .. }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::RoundComplete { .. }))
            {
                assert_eq!(*round, start_round, "completed round must be the current one");
                assert_eq!(
                    game.round_number(),
                    start_round + 1,
                    "round number must advance after completion"
                );
                return;
            }
        }
        panic!("Game must complete a round within {max_ticks} ticks");
    }

    /// round_results() must return an entry for each player.
    pub fn contract_round_results_complete(
        game: &dyn TickGame,
        expected_players: usize,
    ) -> Vec<PlayerScore> {
        let results = game.round_results();
        assert_eq!(
            results.len(),
            expected_players,
            "round_results must have one entry per player"
        );
        results
    }
}
