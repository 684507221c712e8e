use lightgrid_core::error::GameError;

#[derive(Debug)]
pub enum HostError {
    /// A stdin line that is not a valid command.
    InvalidCommand(String),
    /// State bytes from the game could not be decoded.
    Decode(String),
    /// A frame or input could not be encoded.
    Encode(String),
    Game(GameError),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommand(m) => write!(f, "invalid command: {m}"),
            Self::Decode(m) => write!(f, "decode error: {m}"),
            Self::Encode(m) => write!(f, "encode error: {m}"),
            Self::Game(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Game(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GameError> for HostError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}
