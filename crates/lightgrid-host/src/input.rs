//! stdin line protocol: `<player_id> <command>` per line, or `quit`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use lightgrid_core::game_trait::PlayerId;
use lightgrid_cycles::Heading;
use lightgrid_cycles::input::{Command, CycleInput};

use crate::error::HostError;
use crate::game_loop::GameCommand;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLine {
    Steer {
        player_id: PlayerId,
        command: Command,
    },
    Quit,
}

/// Parse a line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HostLine>, HostError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };
    if first.eq_ignore_ascii_case("quit") {
        return Ok(Some(HostLine::Quit));
    }

    let player_id = first
        .parse::<PlayerId>()
        .map_err(|_| HostError::InvalidCommand(format!("bad player id '{first}'")))?;
    let Some(word) = words.next() else {
        return Err(HostError::InvalidCommand(format!(
            "missing command for player {player_id}"
        )));
    };
    if let Some(extra) = words.next() {
        return Err(HostError::InvalidCommand(format!("unexpected '{extra}'")));
    }

    Ok(Some(HostLine::Steer {
        player_id,
        command: parse_command(word)?,
    }))
}

fn parse_command(word: &str) -> Result<Command, HostError> {
    let command = match word.to_ascii_lowercase().as_str() {
        "up" => Command::SetHeading(Heading::Up),
        "down" => Command::SetHeading(Heading::Down),
        "left" => Command::SetHeading(Heading::Left),
        "right" => Command::SetHeading(Heading::Right),
        "turn-left" => Command::TurnLeft,
        "turn-right" => Command::TurnRight,
        _ => {
            return Err(HostError::InvalidCommand(format!(
                "unknown command '{word}'"
            )));
        },
    };
    Ok(command)
}

/// Encode a command as game input bytes.
pub fn encode_command(command: Command) -> Result<Vec<u8>, HostError> {
    rmp_serde::to_vec(&CycleInput { command }).map_err(|e| HostError::Encode(e.to_string()))
}

/// Read command lines until `quit` or EOF and forward them to the tick loop.
/// Sends `Stop` on the way out.
pub async fn forward_commands<R>(reader: R, cmd_tx: mpsc::UnboundedSender<GameCommand>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                break;
            },
        };

        match parse_line(&line) {
            Ok(None) => {},
            Ok(Some(HostLine::Quit)) => break,
            Ok(Some(HostLine::Steer { player_id, command })) => {
                match encode_command(command) {
                    Ok(input_data) => {
                        let cmd = GameCommand::PlayerInput {
                            player_id,
                            input_data,
                        };
                        if cmd_tx.send(cmd).is_err() {
                            return;
                        }
                    },
                    Err(e) => tracing::error!(error = %e, "Failed to encode input"),
                }
            },
            Err(e) => tracing::warn!(line = %line, error = %e, "Ignoring input line"),
        }
    }

    let _ = cmd_tx.send(GameCommand::Stop);
}
