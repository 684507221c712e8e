use lightgrid_cycles::CyclesState;

use crate::error::HostError;

/// Decode broadcast state bytes into one JSON frame line.
pub fn frame_line(data: &[u8]) -> Result<String, HostError> {
    let state: CyclesState =
        rmp_serde::from_slice(data).map_err(|e| HostError::Decode(e.to_string()))?;
    serde_json::to_string(&state.frame()).map_err(|e| HostError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightgrid_core::game_trait::TickGame;
    use lightgrid_core::test_helpers::make_players;
    use lightgrid_cycles::LightCycles;

    #[test]
    fn frame_line_is_json() {
        let mut game = LightCycles::default();
        game.init(&make_players(2)).unwrap();
        game.update();

        let line = frame_line(&game.serialize_state().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["round"], 1);
        assert_eq!(value["tick"], 1);
        assert_eq!(value["entities"].as_array().unwrap().len(), 2);
        assert_eq!(value["trail"].as_array().unwrap().len(), 2);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            frame_line(&[0xC1, 0x00]),
            Err(HostError::Decode(_))
        ));
    }
}
