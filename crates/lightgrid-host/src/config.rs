use serde::Deserialize;

use lightgrid_core::error::GameError;
use lightgrid_core::game_trait::{PlayerId, TickGame};
use lightgrid_core::player::{Player, PlayerColor};
use lightgrid_cycles::LightCycles;
use lightgrid_cycles::config::CyclesConfig;

use crate::error::HostError;

/// Most players a single board seats.
pub const MAX_PLAYERS: usize = 8;

/// Top-level host configuration, loaded from `lightgrid.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub board: CyclesConfig,
    /// Display names in roster order. Player ids are assigned from 1.
    pub players: Vec<String>,
    pub output: OutputMode,
    /// Stop after this many rounds. 0 = run until `quit` or EOF.
    pub max_rounds: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    None,
    /// One JSON frame per line on stdout.
    #[default]
    Json,
}

impl OutputMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            board: CyclesConfig::default(),
            players: vec!["Player1".to_string(), "Player2".to_string()],
            output: OutputMode::Json,
            max_rounds: 0,
        }
    }
}

impl HostConfig {
    /// Load config from `lightgrid.toml` (or `LIGHTGRID_CONFIG`), then apply env var overrides.
    pub fn load() -> Self {
        let path = std::env::var("LIGHTGRID_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "lightgrid.toml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<HostConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path,
                        error = %e,
                        "Failed to parse configuration, using defaults"
                    );
                    HostConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path, "No configuration file found, using defaults");
                HostConfig::default()
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Layer environment overrides on top of the file values.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(names) = var("LIGHTGRID_PLAYERS")
            && !names.trim().is_empty()
        {
            self.players = names
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(val) = var("LIGHTGRID_OUTPUT") {
            match OutputMode::parse(&val) {
                Some(mode) => self.output = mode,
                None => tracing::warn!(value = %val, "Ignoring unknown LIGHTGRID_OUTPUT"),
            }
        }
        if let Some(val) = var("LIGHTGRID_MAX_ROUNDS")
            && let Ok(n) = val.trim().parse::<u32>()
        {
            self.max_rounds = n;
        }
        if let Some(val) = var("LIGHTGRID_TICK_DELAY_MS")
            && let Ok(n) = val.trim().parse::<u64>()
        {
            self.board.tick_delay_ms = n;
        }
    }

    /// Reject configurations that cannot start a game.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::InvalidConfig(
                "at least one player is required".to_string(),
            ));
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "{} players configured, at most {MAX_PLAYERS} supported",
                self.players.len()
            )));
        }
        self.board.validate()
    }

    /// Build the roster from the configured names.
    pub fn roster(&self) -> Vec<Player> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, name)| Player {
                id: i as PlayerId + 1,
                display_name: name.clone(),
                color: PlayerColor::for_index(i),
            })
            .collect()
    }

    /// Validate, then build and initialise the game for this roster.
    pub fn build_game(&self) -> Result<LightCycles, HostError> {
        self.validate()?;
        let mut game = LightCycles::with_config(self.board.clone());
        game.init(&self.roster())?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_values() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.players.len(), 2);
        assert_eq!(cfg.output, OutputMode::Json);
        assert_eq!(cfg.max_rounds, 0);
        assert_eq!(cfg.board, CyclesConfig::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
players = ["Ann", "Bo", "Cy"]
output = "none"
max_rounds = 3

[board]
rows = 30
columns = 30
cell_size = 10
controls = "turning"
"#;
        let cfg: HostConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.players, vec!["Ann", "Bo", "Cy"]);
        assert_eq!(cfg.output, OutputMode::None);
        assert_eq!(cfg.max_rounds, 3);
        assert_eq!(cfg.board.rows, 30);
        assert_eq!(cfg.board.cell_size, 10);
        assert_eq!(cfg.board.tick_delay_ms, 10, "missing keys use defaults");
    }

    #[test]
    fn missing_board_uses_defaults() {
        let cfg: HostConfig = toml::from_str("max_rounds = 1\n").unwrap();
        assert_eq!(cfg.board, CyclesConfig::default());
        assert_eq!(cfg.players.len(), 2);
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = HostConfig::default();
        cfg.apply_overrides(env(&[
            ("LIGHTGRID_PLAYERS", "Ann, Bo,,Cy "),
            ("LIGHTGRID_OUTPUT", "NONE"),
            ("LIGHTGRID_MAX_ROUNDS", "5"),
            ("LIGHTGRID_TICK_DELAY_MS", "50"),
        ]));
        assert_eq!(cfg.players, vec!["Ann", "Bo", "Cy"]);
        assert_eq!(cfg.output, OutputMode::None);
        assert_eq!(cfg.max_rounds, 5);
        assert_eq!(cfg.board.tick_delay_ms, 50);
    }

    #[test]
    fn unparsable_overrides_ignored() {
        let mut cfg = HostConfig::default();
        cfg.apply_overrides(env(&[
            ("LIGHTGRID_PLAYERS", "  "),
            ("LIGHTGRID_OUTPUT", "xml"),
            ("LIGHTGRID_MAX_ROUNDS", "many"),
        ]));
        assert_eq!(cfg.players.len(), 2);
        assert_eq!(cfg.output, OutputMode::Json);
        assert_eq!(cfg.max_rounds, 0);
    }

    #[test]
    fn validate_rejects_bad_rosters() {
        let empty = HostConfig {
            players: Vec::new(),
            ..HostConfig::default()
        };
        assert!(empty.validate().is_err());

        let crowded = HostConfig {
            players: (0..9).map(|i| format!("P{i}")).collect(),
            ..HostConfig::default()
        };
        assert!(crowded.validate().is_err());
    }

    #[test]
    fn validate_checks_board() {
        let mut cfg = HostConfig::default();
        cfg.board.tick_delay_ms = 0;
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn roster_assigns_sequential_ids() {
        let cfg = HostConfig {
            players: vec!["Ann".to_string(), "Bo".to_string()],
            ..HostConfig::default()
        };
        let roster = cfg.roster();
        assert_eq!(roster[0].id, 1);
        assert_eq!(roster[1].id, 2);
        assert_eq!(roster[1].display_name, "Bo");
        assert_eq!(roster[1].color, PlayerColor::for_index(1));
    }

    #[test]
    fn build_game_initialises_roster() {
        let game = HostConfig::default().build_game().unwrap();
        assert_eq!(game.state().entities.len(), 2);
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn build_game_wraps_game_errors() {
        let mut cfg = HostConfig::default();
        cfg.board.cell_size = 0;
        let err = cfg.build_game().err().expect("zero cell size must fail");
        assert!(matches!(err, HostError::Game(GameError::InvalidConfig(_))));
        assert!(std::error::Error::source(&err).is_some());
    }
}
