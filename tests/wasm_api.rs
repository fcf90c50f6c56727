#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use reversi_engine::wasm::WasmGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(reversi_engine::wasm_ready());
}

#[wasm_bindgen_test]
fn human_move_and_computer_reply_round_trip_through_js() {
    let mut game = WasmGame::new(1, 0).unwrap();

    let state = game.place(3, 2).unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert!(game.is_ai_turn());

    let state = game.ai_move().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn illegal_move_surfaces_as_js_error() {
    let mut game = WasmGame::new(2, 1).unwrap();

    let err = game.place(0, 0).unwrap_err();

    assert!(err.as_string().unwrap().contains("illegal move"));
}

#[wasm_bindgen_test]
fn snapshot_restores_into_a_fresh_game() {
    let mut game = WasmGame::new(2, 1).unwrap();
    game.place(2, 3).unwrap();
    let snapshot = game.snapshot().unwrap();

    let mut fresh = WasmGame::new(2, 1).unwrap();
    fresh.restore(snapshot).unwrap();

    let state = fresh.state().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(field(&state, "black_count").as_f64(), Some(4.0));
}

#[wasm_bindgen_test]
fn switching_player_mode_hands_the_turn_to_the_computer() {
    let mut game = WasmGame::new(2, 0).unwrap();
    assert_eq!(game.player_mode(), 2);
    assert!(!game.is_ai_turn());

    game.set_player_mode(0).unwrap();

    assert_eq!(game.player_mode(), 0);
    assert!(game.is_ai_turn());
    assert!(game.set_player_mode(3).is_err());
}
