//! Virtual key codes reported by the native engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of `KeyboardData::key_char` when no character is associated.
pub const CHAR_UNDEFINED: u16 = 0xFFFF;

/// A virtual key code.
///
/// Codes the table below does not name are preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(0x0001);
    pub const F1: KeyCode = KeyCode(0x003B);
    pub const F2: KeyCode = KeyCode(0x003C);
    pub const F3: KeyCode = KeyCode(0x003D);
    pub const F4: KeyCode = KeyCode(0x003E);
    pub const F5: KeyCode = KeyCode(0x003F);
    pub const F6: KeyCode = KeyCode(0x0040);
    pub const F7: KeyCode = KeyCode(0x0041);
    pub const F8: KeyCode = KeyCode(0x0042);
    pub const F9: KeyCode = KeyCode(0x0043);
    pub const F10: KeyCode = KeyCode(0x0044);
    pub const F11: KeyCode = KeyCode(0x0057);
    pub const F12: KeyCode = KeyCode(0x0058);
    pub const F13: KeyCode = KeyCode(0x005B);
    pub const F14: KeyCode = KeyCode(0x005C);
    pub const F15: KeyCode = KeyCode(0x005D);
    pub const F16: KeyCode = KeyCode(0x0063);
    pub const F17: KeyCode = KeyCode(0x0064);
    pub const F18: KeyCode = KeyCode(0x0065);
    pub const F19: KeyCode = KeyCode(0x0066);
    pub const F20: KeyCode = KeyCode(0x0067);
    pub const F21: KeyCode = KeyCode(0x0068);
    pub const F22: KeyCode = KeyCode(0x0069);
    pub const F23: KeyCode = KeyCode(0x006A);
    pub const F24: KeyCode = KeyCode(0x006B);
    pub const BACKQUOTE: KeyCode = KeyCode(0x0029);
    pub const DIGIT_1: KeyCode = KeyCode(0x0002);
    pub const DIGIT_2: KeyCode = KeyCode(0x0003);
    pub const DIGIT_3: KeyCode = KeyCode(0x0004);
    pub const DIGIT_4: KeyCode = KeyCode(0x0005);
    pub const DIGIT_5: KeyCode = KeyCode(0x0006);
    pub const DIGIT_6: KeyCode = KeyCode(0x0007);
    pub const DIGIT_7: KeyCode = KeyCode(0x0008);
    pub const DIGIT_8: KeyCode = KeyCode(0x0009);
    pub const DIGIT_9: KeyCode = KeyCode(0x000A);
    pub const DIGIT_0: KeyCode = KeyCode(0x000B);
    pub const MINUS: KeyCode = KeyCode(0x000C);
    pub const EQUALS: KeyCode = KeyCode(0x000D);
    pub const BACKSPACE: KeyCode = KeyCode(0x000E);
    pub const TAB: KeyCode = KeyCode(0x000F);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x003A);
    pub const A: KeyCode = KeyCode(0x001E);
    pub const B: KeyCode = KeyCode(0x0030);
    pub const C: KeyCode = KeyCode(0x002E);
    pub const D: KeyCode = KeyCode(0x0020);
    pub const E: KeyCode = KeyCode(0x0012);
    pub const F: KeyCode = KeyCode(0x0021);
    pub const G: KeyCode = KeyCode(0x0022);
    pub const H: KeyCode = KeyCode(0x0023);
    pub const I: KeyCode = KeyCode(0x0017);
    pub const J: KeyCode = KeyCode(0x0024);
    pub const K: KeyCode = KeyCode(0x0025);
    pub const L: KeyCode = KeyCode(0x0026);
    pub const M: KeyCode = KeyCode(0x0032);
    pub const N: KeyCode = KeyCode(0x0031);
    pub const O: KeyCode = KeyCode(0x0018);
    pub const P: KeyCode = KeyCode(0x0019);
    pub const Q: KeyCode = KeyCode(0x0010);
    pub const R: KeyCode = KeyCode(0x0013);
    pub const S: KeyCode = KeyCode(0x001F);
    pub const T: KeyCode = KeyCode(0x0014);
    pub const U: KeyCode = KeyCode(0x0016);
    pub const V: KeyCode = KeyCode(0x002F);
    pub const W: KeyCode = KeyCode(0x0011);
    pub const X: KeyCode = KeyCode(0x002D);
    pub const Y: KeyCode = KeyCode(0x0015);
    pub const Z: KeyCode = KeyCode(0x002C);
    pub const OPEN_BRACKET: KeyCode = KeyCode(0x001A);
    pub const CLOSE_BRACKET: KeyCode = KeyCode(0x001B);
    pub const BACK_SLASH: KeyCode = KeyCode(0x002B);
    pub const SEMICOLON: KeyCode = KeyCode(0x0027);
    pub const QUOTE: KeyCode = KeyCode(0x0028);
    pub const ENTER: KeyCode = KeyCode(0x001C);
    pub const COMMA: KeyCode = KeyCode(0x0033);
    pub const PERIOD: KeyCode = KeyCode(0x0034);
    pub const SLASH: KeyCode = KeyCode(0x0035);
    pub const SPACE: KeyCode = KeyCode(0x0039);
    pub const PRINTSCREEN: KeyCode = KeyCode(0x0E37);
    pub const SCROLL_LOCK: KeyCode = KeyCode(0x0046);
    pub const PAUSE: KeyCode = KeyCode(0x0E45);
    pub const LESSER_GREATER: KeyCode = KeyCode(0x0E46);
    pub const INSERT: KeyCode = KeyCode(0x0E52);
    pub const DELETE: KeyCode = KeyCode(0x0E53);
    pub const HOME: KeyCode = KeyCode(0x0E47);
    pub const END: KeyCode = KeyCode(0x0E4F);
    pub const PAGE_UP: KeyCode = KeyCode(0x0E49);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x0E51);
    pub const UP: KeyCode = KeyCode(0xE048);
    pub const LEFT: KeyCode = KeyCode(0xE04B);
    pub const CLEAR: KeyCode = KeyCode(0xE04C);
    pub const RIGHT: KeyCode = KeyCode(0xE04D);
    pub const DOWN: KeyCode = KeyCode(0xE050);
    pub const NUM_LOCK: KeyCode = KeyCode(0x0045);
    pub const NUMPAD_DIVIDE: KeyCode = KeyCode(0x0E35);
    pub const NUMPAD_MULTIPLY: KeyCode = KeyCode(0x0037);
    pub const NUMPAD_SUBTRACT: KeyCode = KeyCode(0x004A);
    pub const NUMPAD_EQUALS: KeyCode = KeyCode(0x0E0D);
    pub const NUMPAD_ADD: KeyCode = KeyCode(0x004E);
    pub const NUMPAD_ENTER: KeyCode = KeyCode(0x0E1C);
    pub const NUMPAD_SEPARATOR: KeyCode = KeyCode(0x0053);
    pub const NUMPAD_1: KeyCode = KeyCode(0x004F);
    pub const NUMPAD_2: KeyCode = KeyCode(0x0050);
    pub const NUMPAD_3: KeyCode = KeyCode(0x0051);
    pub const NUMPAD_4: KeyCode = KeyCode(0x004B);
    pub const NUMPAD_5: KeyCode = KeyCode(0x004C);
    pub const NUMPAD_6: KeyCode = KeyCode(0x004D);
    pub const NUMPAD_7: KeyCode = KeyCode(0x0047);
    pub const NUMPAD_8: KeyCode = KeyCode(0x0048);
    pub const NUMPAD_9: KeyCode = KeyCode(0x0049);
    pub const NUMPAD_0: KeyCode = KeyCode(0x0052);
    pub const NUMPAD_END: KeyCode = KeyCode(0xEE4F);
    pub const NUMPAD_DOWN: KeyCode = KeyCode(0xEE50);
    pub const NUMPAD_PAGE_DOWN: KeyCode = KeyCode(0xEE51);
    pub const NUMPAD_LEFT: KeyCode = KeyCode(0xEE4B);
    pub const NUMPAD_CLEAR: KeyCode = KeyCode(0xEE4C);
    pub const NUMPAD_RIGHT: KeyCode = KeyCode(0xEE4D);
    pub const NUMPAD_HOME: KeyCode = KeyCode(0xEE47);
    pub const NUMPAD_UP: KeyCode = KeyCode(0xEE48);
    pub const NUMPAD_PAGE_UP: KeyCode = KeyCode(0xEE49);
    pub const NUMPAD_INSERT: KeyCode = KeyCode(0xEE52);
    pub const NUMPAD_DELETE: KeyCode = KeyCode(0xEE53);
    pub const LEFT_SHIFT: KeyCode = KeyCode(0x002A);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(0x0036);
    pub const LEFT_CONTROL: KeyCode = KeyCode(0x001D);
    pub const RIGHT_CONTROL: KeyCode = KeyCode(0x0E1D);
    pub const LEFT_ALT: KeyCode = KeyCode(0x0038);
    pub const RIGHT_ALT: KeyCode = KeyCode(0x0E38);
    pub const LEFT_META: KeyCode = KeyCode(0x0E5B);
    pub const RIGHT_META: KeyCode = KeyCode(0x0E5C);
    pub const CONTEXT_MENU: KeyCode = KeyCode(0x0E5D);
    pub const POWER: KeyCode = KeyCode(0xE05E);
    pub const SLEEP: KeyCode = KeyCode(0xE05F);
    pub const WAKE: KeyCode = KeyCode(0xE063);
    pub const MEDIA_PLAY: KeyCode = KeyCode(0xE022);
    pub const MEDIA_STOP: KeyCode = KeyCode(0xE024);
    pub const MEDIA_PREVIOUS: KeyCode = KeyCode(0xE010);
    pub const MEDIA_NEXT: KeyCode = KeyCode(0xE019);
    pub const MEDIA_SELECT: KeyCode = KeyCode(0xE06D);
    pub const MEDIA_EJECT: KeyCode = KeyCode(0xE02C);
    pub const VOLUME_MUTE: KeyCode = KeyCode(0xE020);
    pub const VOLUME_UP: KeyCode = KeyCode(0xE030);
    pub const VOLUME_DOWN: KeyCode = KeyCode(0xE02E);
    pub const APP_MAIL: KeyCode = KeyCode(0xE06C);
    pub const APP_CALCULATOR: KeyCode = KeyCode(0xE021);
    pub const APP_MUSIC: KeyCode = KeyCode(0xE03C);
    pub const APP_PICTURES: KeyCode = KeyCode(0xE064);
    pub const BROWSER_SEARCH: KeyCode = KeyCode(0xE065);
    pub const BROWSER_HOME: KeyCode = KeyCode(0xE032);
    pub const BROWSER_BACK: KeyCode = KeyCode(0xE06A);
    pub const BROWSER_FORWARD: KeyCode = KeyCode(0xE069);
    pub const BROWSER_STOP: KeyCode = KeyCode(0xE068);
    pub const BROWSER_REFRESH: KeyCode = KeyCode(0xE067);
    pub const BROWSER_FAVORITES: KeyCode = KeyCode(0xE066);
    pub const KATAKANA: KeyCode = KeyCode(0x0070);
    pub const UNDERSCORE: KeyCode = KeyCode(0x0073);
    pub const FURIGANA: KeyCode = KeyCode(0x0077);
    pub const KANJI: KeyCode = KeyCode(0x0079);
    pub const HIRAGANA: KeyCode = KeyCode(0x007B);
    pub const YEN: KeyCode = KeyCode(0x007D);
    pub const NUMPAD_COMMA: KeyCode = KeyCode(0x007E);
    pub const SUN_HELP: KeyCode = KeyCode(0xFF75);
    pub const SUN_STOP: KeyCode = KeyCode(0xFF78);
    pub const SUN_PROPS: KeyCode = KeyCode(0xFF76);
    pub const SUN_FRONT: KeyCode = KeyCode(0xFF77);
    pub const SUN_OPEN: KeyCode = KeyCode(0xFF74);
    pub const SUN_FIND: KeyCode = KeyCode(0xFF7E);
    pub const SUN_AGAIN: KeyCode = KeyCode(0xFF79);
    pub const SUN_UNDO: KeyCode = KeyCode(0xFF7A);
    pub const SUN_COPY: KeyCode = KeyCode(0xFF7C);
    pub const SUN_INSERT: KeyCode = KeyCode(0xFF7D);
    pub const SUN_CUT: KeyCode = KeyCode(0xFF7B);
    pub const UNDEFINED: KeyCode = KeyCode(0x0000);

    /// The symbolic name of this code, if it has one.
    pub fn name(self) -> Option<&'static str> {
        match self {
            KeyCode::ESCAPE => Some("Escape"),
            KeyCode::F1 => Some("F1"),
            KeyCode::F2 => Some("F2"),
            KeyCode::F3 => Some("F3"),
            KeyCode::F4 => Some("F4"),
            KeyCode::F5 => Some("F5"),
            KeyCode::F6 => Some("F6"),
            KeyCode::F7 => Some("F7"),
            KeyCode::F8 => Some("F8"),
            KeyCode::F9 => Some("F9"),
            KeyCode::F10 => Some("F10"),
            KeyCode::F11 => Some("F11"),
            KeyCode::F12 => Some("F12"),
            KeyCode::F13 => Some("F13"),
            KeyCode::F14 => Some("F14"),
            KeyCode::F15 => Some("F15"),
            KeyCode::F16 => Some("F16"),
            KeyCode::F17 => Some("F17"),
            KeyCode::F18 => Some("F18"),
            KeyCode::F19 => Some("F19"),
            KeyCode::F20 => Some("F20"),
            KeyCode::F21 => Some("F21"),
            KeyCode::F22 => Some("F22"),
            KeyCode::F23 => Some("F23"),
            KeyCode::F24 => Some("F24"),
            KeyCode::BACKQUOTE => Some("Backquote"),
            KeyCode::DIGIT_1 => Some("1"),
            KeyCode::DIGIT_2 => Some("2"),
            KeyCode::DIGIT_3 => Some("3"),
            KeyCode::DIGIT_4 => Some("4"),
            KeyCode::DIGIT_5 => Some("5"),
            KeyCode::DIGIT_6 => Some("6"),
            KeyCode::DIGIT_7 => Some("7"),
            KeyCode::DIGIT_8 => Some("8"),
            KeyCode::DIGIT_9 => Some("9"),
            KeyCode::DIGIT_0 => Some("0"),
            KeyCode::MINUS => Some("Minus"),
            KeyCode::EQUALS => Some("Equals"),
            KeyCode::BACKSPACE => Some("Backspace"),
            KeyCode::TAB => Some("Tab"),
            KeyCode::CAPS_LOCK => Some("CapsLock"),
            KeyCode::A => Some("A"),
            KeyCode::B => Some("B"),
            KeyCode::C => Some("C"),
            KeyCode::D => Some("D"),
            KeyCode::E => Some("E"),
            KeyCode::F => Some("F"),
            KeyCode::G => Some("G"),
            KeyCode::H => Some("H"),
            KeyCode::I => Some("I"),
            KeyCode::J => Some("J"),
            KeyCode::K => Some("K"),
            KeyCode::L => Some("L"),
            KeyCode::M => Some("M"),
            KeyCode::N => Some("N"),
            KeyCode::O => Some("O"),
            KeyCode::P => Some("P"),
            KeyCode::Q => Some("Q"),
            KeyCode::R => Some("R"),
            KeyCode::S => Some("S"),
            KeyCode::T => Some("T"),
            KeyCode::U => Some("U"),
            KeyCode::V => Some("V"),
            KeyCode::W => Some("W"),
            KeyCode::X => Some("X"),
            KeyCode::Y => Some("Y"),
            KeyCode::Z => Some("Z"),
            KeyCode::OPEN_BRACKET => Some("OpenBracket"),
            KeyCode::CLOSE_BRACKET => Some("CloseBracket"),
            KeyCode::BACK_SLASH => Some("BackSlash"),
            KeyCode::SEMICOLON => Some("Semicolon"),
            KeyCode::QUOTE => Some("Quote"),
            KeyCode::ENTER => Some("Enter"),
            KeyCode::COMMA => Some("Comma"),
            KeyCode::PERIOD => Some("Period"),
            KeyCode::SLASH => Some("Slash"),
            KeyCode::SPACE => Some("Space"),
            KeyCode::PRINTSCREEN => Some("Printscreen"),
            KeyCode::SCROLL_LOCK => Some("ScrollLock"),
            KeyCode::PAUSE => Some("Pause"),
            KeyCode::LESSER_GREATER => Some("LesserGreater"),
            KeyCode::INSERT => Some("Insert"),
            KeyCode::DELETE => Some("Delete"),
            KeyCode::HOME => Some("Home"),
            KeyCode::END => Some("End"),
            KeyCode::PAGE_UP => Some("PageUp"),
            KeyCode::PAGE_DOWN => Some("PageDown"),
            KeyCode::UP => Some("Up"),
            KeyCode::LEFT => Some("Left"),
            KeyCode::CLEAR => Some("Clear"),
            KeyCode::RIGHT => Some("Right"),
            KeyCode::DOWN => Some("Down"),
            KeyCode::NUM_LOCK => Some("NumLock"),
            KeyCode::NUMPAD_DIVIDE => Some("NumPadDivide"),
            KeyCode::NUMPAD_MULTIPLY => Some("NumPadMultiply"),
            KeyCode::NUMPAD_SUBTRACT => Some("NumPadSubtract"),
            KeyCode::NUMPAD_EQUALS => Some("NumPadEquals"),
            KeyCode::NUMPAD_ADD => Some("NumPadAdd"),
            KeyCode::NUMPAD_ENTER => Some("NumPadEnter"),
            KeyCode::NUMPAD_SEPARATOR => Some("NumPadSeparator"),
            KeyCode::NUMPAD_1 => Some("NumPad1"),
            KeyCode::NUMPAD_2 => Some("NumPad2"),
            KeyCode::NUMPAD_3 => Some("NumPad3"),
            KeyCode::NUMPAD_4 => Some("NumPad4"),
            KeyCode::NUMPAD_5 => Some("NumPad5"),
            KeyCode::NUMPAD_6 => Some("NumPad6"),
            KeyCode::NUMPAD_7 => Some("NumPad7"),
            KeyCode::NUMPAD_8 => Some("NumPad8"),
            KeyCode::NUMPAD_9 => Some("NumPad9"),
            KeyCode::NUMPAD_0 => Some("NumPad0"),
            KeyCode::NUMPAD_END => Some("NumPadEnd"),
            KeyCode::NUMPAD_DOWN => Some("NumPadDown"),
            KeyCode::NUMPAD_PAGE_DOWN => Some("NumPadPageDown"),
            KeyCode::NUMPAD_LEFT => Some("NumPadLeft"),
            KeyCode::NUMPAD_CLEAR => Some("NumPadClear"),
            KeyCode::NUMPAD_RIGHT => Some("NumPadRight"),
            KeyCode::NUMPAD_HOME => Some("NumPadHome"),
            KeyCode::NUMPAD_UP => Some("NumPadUp"),
            KeyCode::NUMPAD_PAGE_UP => Some("NumPadPageUp"),
            KeyCode::NUMPAD_INSERT => Some("NumPadInsert"),
            KeyCode::NUMPAD_DELETE => Some("NumPadDelete"),
            KeyCode::LEFT_SHIFT => Some("LeftShift"),
            KeyCode::RIGHT_SHIFT => Some("RightShift"),
            KeyCode::LEFT_CONTROL => Some("LeftControl"),
            KeyCode::RIGHT_CONTROL => Some("RightControl"),
            KeyCode::LEFT_ALT => Some("LeftAlt"),
            KeyCode::RIGHT_ALT => Some("RightAlt"),
            KeyCode::LEFT_META => Some("LeftMeta"),
            KeyCode::RIGHT_META => Some("RightMeta"),
            KeyCode::CONTEXT_MENU => Some("ContextMenu"),
            KeyCode::POWER => Some("Power"),
            KeyCode::SLEEP => Some("Sleep"),
            KeyCode::WAKE => Some("Wake"),
            KeyCode::MEDIA_PLAY => Some("MediaPlay"),
            KeyCode::MEDIA_STOP => Some("MediaStop"),
            KeyCode::MEDIA_PREVIOUS => Some("MediaPrevious"),
            KeyCode::MEDIA_NEXT => Some("MediaNext"),
            KeyCode::MEDIA_SELECT => Some("MediaSelect"),
            KeyCode::MEDIA_EJECT => Some("MediaEject"),
            KeyCode::VOLUME_MUTE => Some("VolumeMute"),
            KeyCode::VOLUME_UP => Some("VolumeUp"),
            KeyCode::VOLUME_DOWN => Some("VolumeDown"),
            KeyCode::APP_MAIL => Some("AppMail"),
            KeyCode::APP_CALCULATOR => Some("AppCalculator"),
            KeyCode::APP_MUSIC => Some("AppMusic"),
            KeyCode::APP_PICTURES => Some("AppPictures"),
            KeyCode::BROWSER_SEARCH => Some("BrowserSearch"),
            KeyCode::BROWSER_HOME => Some("BrowserHome"),
            KeyCode::BROWSER_BACK => Some("BrowserBack"),
            KeyCode::BROWSER_FORWARD => Some("BrowserForward"),
            KeyCode::BROWSER_STOP => Some("BrowserStop"),
            KeyCode::BROWSER_REFRESH => Some("BrowserRefresh"),
            KeyCode::BROWSER_FAVORITES => Some("BrowserFavorites"),
            KeyCode::KATAKANA => Some("Katakana"),
            KeyCode::UNDERSCORE => Some("Underscore"),
            KeyCode::FURIGANA => Some("Furigana"),
            KeyCode::KANJI => Some("Kanji"),
            KeyCode::HIRAGANA => Some("Hiragana"),
            KeyCode::YEN => Some("Yen"),
            KeyCode::NUMPAD_COMMA => Some("NumPadComma"),
            KeyCode::SUN_HELP => Some("SunHelp"),
            KeyCode::SUN_STOP => Some("SunStop"),
            KeyCode::SUN_PROPS => Some("SunProps"),
            KeyCode::SUN_FRONT => Some("SunFront"),
            KeyCode::SUN_OPEN => Some("SunOpen"),
            KeyCode::SUN_FIND => Some("SunFind"),
            KeyCode::SUN_AGAIN => Some("SunAgain"),
            KeyCode::SUN_UNDO => Some("SunUndo"),
            KeyCode::SUN_COPY => Some("SunCopy"),
            KeyCode::SUN_INSERT => Some("SunInsert"),
            KeyCode::SUN_CUT => Some("SunCut"),
            KeyCode::UNDEFINED => Some("Undefined"),
            _ => None,
        }
    }
}

impl From<u16> for KeyCode {
    fn from(raw: u16) -> Self {
        KeyCode(raw)
    }
}

impl From<KeyCode> for u16 {
    fn from(code: KeyCode) -> Self {
        code.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}
