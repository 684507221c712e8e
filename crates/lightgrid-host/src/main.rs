use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use lightgrid_core::game_trait::TickGame;
use lightgrid_host::config::{HostConfig, OutputMode};
use lightgrid_host::game_loop::{GameBroadcast, spawn_game_session};
use lightgrid_host::input::forward_commands;
use lightgrid_host::output::frame_line;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start tokio runtime");
            return ExitCode::FAILURE;
        },
    };
    let code = runtime.block_on(run());
    // A pending stdin read cannot be cancelled; don't wait for it
    runtime.shutdown_background();
    code
}

async fn run() -> ExitCode {
    let config = HostConfig::load();
    let game = match config.build_game() {
        Ok(game) => game,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            return ExitCode::FAILURE;
        },
    };

    let meta = game.metadata();
    tracing::info!(
        game = %meta.name,
        players = config.players.len(),
        tick_ms = config.board.tick_delay_ms,
        max_rounds = config.max_rounds,
        "Lightgrid host starting"
    );

    let (cmd_tx, mut broadcast_rx, handle) =
        spawn_game_session(Box::new(game), config.max_rounds);

    tokio::spawn(forward_commands(
        tokio::io::BufReader::new(tokio::io::stdin()),
        cmd_tx,
    ));

    let mut stdout = std::io::stdout().lock();
    while let Some(msg) = broadcast_rx.recv().await {
        match msg {
            GameBroadcast::State { data, .. } => {
                if config.output != OutputMode::Json {
                    continue;
                }
                match frame_line(&data) {
                    Ok(line) => {
                        if writeln!(stdout, "{line}").is_err() {
                            tracing::info!("stdout closed, stopping");
                            break;
                        }
                    },
                    Err(e) => tracing::error!(error = %e, "Failed to render frame"),
                }
            },
            GameBroadcast::RoundEnd { scores, .. } => {
                for s in scores {
                    tracing::debug!(player_id = s.player_id, wins = s.score, "Standing");
                }
            },
            GameBroadcast::GameEnded => break,
        }
    }

    handle.abort();
    tracing::info!("Lightgrid host stopped");
    ExitCode::SUCCESS
}
