use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::error::GameError;
use crate::game::{GameSession, SessionSnapshot};
use crate::types::PlayerMode;

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS handle to a [`GameSession`].
///
/// Computer moves can take a while at the top strength, so hosts should
/// drive `ai_move` from a web worker.
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
    config: SessionConfig,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(player_mode: u8, strength: u8) -> Result<WasmGame, JsValue> {
        let player_mode = PlayerMode::from_u8(player_mode).map_err(to_js_error)?;
        let config = SessionConfig::new(player_mode, strength);
        Self::build(config)
    }

    /// Builds a game from a plain object shaped like [`SessionConfig`].
    pub fn from_config(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)?;
        Self::build(config)
    }

    /// Rebuilds a game from an object returned by [`WasmGame::snapshot`].
    pub fn restore(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: SessionSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
        self.session = GameSession::restore(&snapshot, &self.config).map_err(to_js_error)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    pub fn place(&mut self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        self.session.place(x, y).map_err(to_js_error)?;
        self.state()
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.session.ai_move().map_err(to_js_error)?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.session.pass().map_err(to_js_error)?;
        self.state()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.session.is_ai_turn()
    }

    pub fn set_strength(&mut self, strength: u8) -> Result<(), JsValue> {
        self.session.set_strength(strength).map_err(to_js_error)?;
        self.config.strength = strength;
        Ok(())
    }

    /// 0=AI vs AI, 1=one player, 2=two players.
    pub fn player_mode(&self) -> u8 {
        self.session.player_mode().to_u8()
    }

    pub fn set_player_mode(&mut self, player_mode: u8) -> Result<(), JsValue> {
        let player_mode = PlayerMode::from_u8(player_mode).map_err(to_js_error)?;
        self.session.set_player_mode(player_mode);
        self.config.player_mode = player_mode;
        Ok(())
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.legal_moves())?)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.state())?)
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.result())?)
    }
}

impl WasmGame {
    fn build(config: SessionConfig) -> Result<WasmGame, JsValue> {
        let session = GameSession::new(&config).map_err(to_js_error)?;
        Ok(Self { session, config })
    }
}
