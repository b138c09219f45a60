//! rdev key ↔ native key code table.

use globhook_core::KeyCode;
use rdev::Key;

const KEY_TABLE: &[(Key, KeyCode)] = &[
    (Key::Escape, KeyCode::ESCAPE),
    (Key::F1, KeyCode::F1),
    (Key::F2, KeyCode::F2),
    (Key::F3, KeyCode::F3),
    (Key::F4, KeyCode::F4),
    (Key::F5, KeyCode::F5),
    (Key::F6, KeyCode::F6),
    (Key::F7, KeyCode::F7),
    (Key::F8, KeyCode::F8),
    (Key::F9, KeyCode::F9),
    (Key::F10, KeyCode::F10),
    (Key::F11, KeyCode::F11),
    (Key::F12, KeyCode::F12),
    (Key::BackQuote, KeyCode::BACKQUOTE),
    (Key::Num1, KeyCode::DIGIT_1),
    (Key::Num2, KeyCode::DIGIT_2),
    (Key::Num3, KeyCode::DIGIT_3),
    (Key::Num4, KeyCode::DIGIT_4),
    (Key::Num5, KeyCode::DIGIT_5),
    (Key::Num6, KeyCode::DIGIT_6),
    (Key::Num7, KeyCode::DIGIT_7),
    (Key::Num8, KeyCode::DIGIT_8),
    (Key::Num9, KeyCode::DIGIT_9),
    (Key::Num0, KeyCode::DIGIT_0),
    (Key::Minus, KeyCode::MINUS),
    (Key::Equal, KeyCode::EQUALS),
    (Key::Backspace, KeyCode::BACKSPACE),
    (Key::Tab, KeyCode::TAB),
    (Key::CapsLock, KeyCode::CAPS_LOCK),
    (Key::KeyA, KeyCode::A),
    (Key::KeyB, KeyCode::B),
    (Key::KeyC, KeyCode::C),
    (Key::KeyD, KeyCode::D),
    (Key::KeyE, KeyCode::E),
    (Key::KeyF, KeyCode::F),
    (Key::KeyG, KeyCode::G),
    (Key::KeyH, KeyCode::H),
    (Key::KeyI, KeyCode::I),
    (Key::KeyJ, KeyCode::J),
    (Key::KeyK, KeyCode::K),
    (Key::KeyL, KeyCode::L),
    (Key::KeyM, KeyCode::M),
    (Key::KeyN, KeyCode::N),
    (Key::KeyO, KeyCode::O),
    (Key::KeyP, KeyCode::P),
    (Key::KeyQ, KeyCode::Q),
    (Key::KeyR, KeyCode::R),
    (Key::KeyS, KeyCode::S),
    (Key::KeyT, KeyCode::T),
    (Key::KeyU, KeyCode::U),
    (Key::KeyV, KeyCode::V),
    (Key::KeyW, KeyCode::W),
    (Key::KeyX, KeyCode::X),
    (Key::KeyY, KeyCode::Y),
    (Key::KeyZ, KeyCode::Z),
    (Key::LeftBracket, KeyCode::OPEN_BRACKET),
    (Key::RightBracket, KeyCode::CLOSE_BRACKET),
    (Key::BackSlash, KeyCode::BACK_SLASH),
    (Key::IntlBackslash, KeyCode::LESSER_GREATER),
    (Key::SemiColon, KeyCode::SEMICOLON),
    (Key::Quote, KeyCode::QUOTE),
    (Key::Return, KeyCode::ENTER),
    (Key::Comma, KeyCode::COMMA),
    (Key::Dot, KeyCode::PERIOD),
    (Key::Slash, KeyCode::SLASH),
    (Key::Space, KeyCode::SPACE),
    (Key::PrintScreen, KeyCode::PRINTSCREEN),
    (Key::ScrollLock, KeyCode::SCROLL_LOCK),
    (Key::Pause, KeyCode::PAUSE),
    (Key::Insert, KeyCode::INSERT),
    (Key::Delete, KeyCode::DELETE),
    (Key::Home, KeyCode::HOME),
    (Key::End, KeyCode::END),
    (Key::PageUp, KeyCode::PAGE_UP),
    (Key::PageDown, KeyCode::PAGE_DOWN),
    (Key::UpArrow, KeyCode::UP),
    (Key::LeftArrow, KeyCode::LEFT),
    (Key::RightArrow, KeyCode::RIGHT),
    (Key::DownArrow, KeyCode::DOWN),
    (Key::NumLock, KeyCode::NUM_LOCK),
    (Key::KpDivide, KeyCode::NUMPAD_DIVIDE),
    (Key::KpMultiply, KeyCode::NUMPAD_MULTIPLY),
    (Key::KpMinus, KeyCode::NUMPAD_SUBTRACT),
    (Key::KpPlus, KeyCode::NUMPAD_ADD),
    (Key::KpReturn, KeyCode::NUMPAD_ENTER),
    (Key::KpDelete, KeyCode::NUMPAD_DELETE),
    (Key::Kp1, KeyCode::NUMPAD_1),
    (Key::Kp2, KeyCode::NUMPAD_2),
    (Key::Kp3, KeyCode::NUMPAD_3),
    (Key::Kp4, KeyCode::NUMPAD_4),
    (Key::Kp5, KeyCode::NUMPAD_5),
    (Key::Kp6, KeyCode::NUMPAD_6),
    (Key::Kp7, KeyCode::NUMPAD_7),
    (Key::Kp8, KeyCode::NUMPAD_8),
    (Key::Kp9, KeyCode::NUMPAD_9),
    (Key::Kp0, KeyCode::NUMPAD_0),
    (Key::ShiftLeft, KeyCode::LEFT_SHIFT),
    (Key::ShiftRight, KeyCode::RIGHT_SHIFT),
    (Key::ControlLeft, KeyCode::LEFT_CONTROL),
    (Key::ControlRight, KeyCode::RIGHT_CONTROL),
    (Key::Alt, KeyCode::LEFT_ALT),
    (Key::AltGr, KeyCode::RIGHT_ALT),
    (Key::MetaLeft, KeyCode::LEFT_META),
    (Key::MetaRight, KeyCode::RIGHT_META),
];

/// Native key code for an rdev key. Keys without a counterpart (including
/// `Function` and `Unknown`) map to `KeyCode::UNDEFINED`.
pub fn key_code(key: Key) -> KeyCode {
    KEY_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, code)| *code)
        .unwrap_or(KeyCode::UNDEFINED)
}

/// rdev key for a native key code, if rdev can express it.
pub fn rdev_key(code: KeyCode) -> Option<Key> {
    KEY_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(key, _)| *key)
}

/// Platform scan code carried by an rdev key, when rdev exposes one.
pub fn raw_code(key: Key) -> u16 {
    match key {
        Key::Unknown(code) => u16::try_from(code).unwrap_or(u16::MAX),
        _ => 0,
    }
}
