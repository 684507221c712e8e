use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use lightgrid_core::game_trait::{GameEvent, PlayerId, PlayerScore, TickGame};

/// Commands sent from the input reader to the game tick loop.
#[derive(Debug)]
pub enum GameCommand {
    PlayerInput {
        player_id: PlayerId,
        input_data: Vec<u8>,
    },
    Stop,
}

/// Broadcasts sent from the game tick loop to the output side.
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    /// Encoded game state, taken before the tick that follows it.
    State { round: u32, data: Bytes },
    /// A round was decided; the board has already been reset.
    RoundEnd {
        round: u32,
        winner: Option<PlayerId>,
        scores: Vec<PlayerScore>,
    },
    /// Signal that the game has ended and the loop has exited.
    GameEnded,
}

/// Spawn the tick loop for an initialised game as a tokio task.
/// `max_rounds == 0` runs until `Stop` or the command channel closes.
pub fn spawn_game_session(
    mut game: Box<dyn TickGame>,
    max_rounds: u32,
) -> (
    mpsc::UnboundedSender<GameCommand>,
    mpsc::UnboundedReceiver<GameBroadcast>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        run_game_tick_loop(&mut *game, max_rounds, cmd_rx, broadcast_tx).await;
    });

    (cmd_tx, broadcast_rx, handle)
}

async fn run_game_tick_loop(
    game: &mut dyn TickGame,
    max_rounds: u32,
    mut cmd_rx: mpsc::UnboundedReceiver<GameCommand>,
    broadcast_tx: mpsc::UnboundedSender<GameBroadcast>,
) {
    let mut interval = tokio::time::interval(game.tick_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // State goes out before the tick runs, so every frame is one tick behind
                match game.serialize_state() {
                    Ok(data) => {
                        let _ = broadcast_tx.send(GameBroadcast::State {
                            round: game.round_number(),
                            data: Bytes::from(data),
                        });
                    },
                    Err(e) => tracing::error!(error = %e, "Failed to encode game state"),
                }

                let mut finished = false;
                for event in game.update() {
                    match event {
                        GameEvent::PlayerEliminated { player_id } => {
                            tracing::debug!(player_id, "Player eliminated");
                        },
                        GameEvent::RoundComplete { round, winner } => {
                            let scores = game.round_results();
                            tracing::info!(round, ?winner, "Round over");
                            let _ = broadcast_tx.send(GameBroadcast::RoundEnd {
                                round,
                                winner,
                                scores,
                            });
                            finished = max_rounds > 0 && round >= max_rounds;
                        },
                    }
                }

                if finished {
                    tracing::info!(rounds = max_rounds, "Round limit reached");
                    break;
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(GameCommand::PlayerInput { player_id, input_data }) => {
                        game.apply_input(player_id, &input_data);
                    },
                    Some(GameCommand::Stop) | None => {
                        break;
                    },
                }
            }
        }
    }

    let _ = broadcast_tx.send(GameBroadcast::GameEnded);
}
