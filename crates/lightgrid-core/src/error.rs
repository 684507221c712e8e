#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The board or roster configuration cannot produce a playable game.
    InvalidConfig(String),
    /// Game state could not be encoded for broadcast.
    Encode(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(m) => write!(f, "invalid configuration: {m}"),
            Self::Encode(m) => write!(f, "encode error: {m}"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = GameError::InvalidConfig("rows must be > 0".to_string());
        assert_eq!(err.to_string(), "invalid configuration: rows must be > 0");
    }
}
