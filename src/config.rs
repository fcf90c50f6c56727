use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::PlayerMode;

/// Strongest accepted difficulty ("brutal").
pub const MAX_STRENGTH: u8 = 3;
/// Empty-square count at or below which the search runs to this depth instead.
pub const ENDGAME_DEPTH: u8 = 7;
/// Deepest accepted endgame threshold. Deeper solves take too long to run interactively.
pub const MAX_ENDGAME_DEPTH: u8 = 10;

/// Tuning for the computer's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Alpha-beta pruning. Never changes the chosen score, only the work done.
    pub alpha_beta: bool,
    /// Endgame threshold, also used as the search depth once reached.
    pub endgame_depth: u8,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            endgame_depth: ENDGAME_DEPTH,
        }
    }
}

/// Settings for a new [`GameSession`](crate::game::GameSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub player_mode: PlayerMode,
    /// 0=easy, 1=normal, 2=hard, 3=brutal.
    pub strength: u8,
    pub search: SearchOptions,
    /// Seed for tie-breaking. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_mode: PlayerMode::OnePlayer,
            strength: 1,
            search: SearchOptions::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(player_mode: PlayerMode, strength: u8) -> Self {
        Self {
            player_mode,
            strength,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.strength > MAX_STRENGTH {
            return Err(GameError::InvalidConfig(format!(
                "strength must be 0..={MAX_STRENGTH}, got {}",
                self.strength
            )));
        }
        if self.search.endgame_depth > MAX_ENDGAME_DEPTH {
            return Err(GameError::InvalidConfig(format!(
                "endgame_depth must be 0..={MAX_ENDGAME_DEPTH}, got {}",
                self.search.endgame_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();

        assert_eq!(config, SessionConfig::default());
        assert!(config.search.alpha_beta);
        assert_eq!(config.search.endgame_depth, 7);
    }

    #[test]
    fn json_overrides_fields() {
        let config = SessionConfig::from_json(
            r#"{"player_mode":"ai_vs_ai","strength":3,"search":{"alpha_beta":false},"seed":42}"#,
        )
        .unwrap();

        assert_eq!(config.player_mode, PlayerMode::AiVsAi);
        assert_eq!(config.strength, 3);
        assert!(!config.search.alpha_beta);
        assert_eq!(config.search.endgame_depth, ENDGAME_DEPTH);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_out_of_range_strength_and_bad_json() {
        assert!(matches!(
            SessionConfig::from_json(r#"{"strength":4}"#),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{"search":{"endgame_depth":64}}"#),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{"search":{"endgame_depth":11}}"#),
            Err(GameError::InvalidConfig(_))
        ));
        assert_eq!(
            SessionConfig::from_json(r#"{"search":{"endgame_depth":10}}"#)
                .unwrap()
                .search
                .endgame_depth,
            MAX_ENDGAME_DEPTH
        );
        assert!(matches!(
            SessionConfig::from_json(r#"{"player_mode":"three_players"}"#),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
