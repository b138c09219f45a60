//! Typed events handed to subscribers.
//!
//! Each typed event is an owned copy of the fields relevant to its category.
//! Nothing aliases the native record, so subscribers may keep them.

use crate::keycode::{KeyCode, CHAR_UNDEFINED};
use crate::native::{
    EventType, KeyboardData, ModifierMask, MouseButton, MouseData, MouseWheelData,
    MouseWheelDirection, MouseWheelScrollType,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription category. Every known raw discriminant maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    HookEnabled,
    HookDisabled,
    KeyTyped,
    KeyPressed,
    KeyReleased,
    MouseClicked,
    MousePressed,
    MouseReleased,
    MouseMoved,
    MouseDragged,
    MouseWheel,
}

impl EventCategory {
    pub const ALL: [EventCategory; 11] = [
        EventCategory::HookEnabled,
        EventCategory::HookDisabled,
        EventCategory::KeyTyped,
        EventCategory::KeyPressed,
        EventCategory::KeyReleased,
        EventCategory::MouseClicked,
        EventCategory::MousePressed,
        EventCategory::MouseReleased,
        EventCategory::MouseMoved,
        EventCategory::MouseDragged,
        EventCategory::MouseWheel,
    ];

    /// Category for a raw discriminant; `None` for unknown discriminants.
    pub fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::HookEnabled => Some(EventCategory::HookEnabled),
            EventType::HookDisabled => Some(EventCategory::HookDisabled),
            EventType::KeyTyped => Some(EventCategory::KeyTyped),
            EventType::KeyPressed => Some(EventCategory::KeyPressed),
            EventType::KeyReleased => Some(EventCategory::KeyReleased),
            EventType::MouseClicked => Some(EventCategory::MouseClicked),
            EventType::MousePressed => Some(EventCategory::MousePressed),
            EventType::MouseReleased => Some(EventCategory::MouseReleased),
            EventType::MouseMoved => Some(EventCategory::MouseMoved),
            EventType::MouseDragged => Some(EventCategory::MouseDragged),
            EventType::MouseWheel => Some(EventCategory::MouseWheel),
            EventType::Unknown(_) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::HookEnabled => "hook_enabled",
            EventCategory::HookDisabled => "hook_disabled",
            EventCategory::KeyTyped => "key_typed",
            EventCategory::KeyPressed => "key_pressed",
            EventCategory::KeyReleased => "key_released",
            EventCategory::MouseClicked => "mouse_clicked",
            EventCategory::MousePressed => "mouse_pressed",
            EventCategory::MouseReleased => "mouse_released",
            EventCategory::MouseMoved => "mouse_moved",
            EventCategory::MouseDragged => "mouse_dragged",
            EventCategory::MouseWheel => "mouse_wheel",
        }
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown event category: {s}"))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook enabled/disabled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEvent {
    pub time: u64,
    pub mask: ModifierMask,
}

/// Key typed/pressed/released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardHookEvent {
    pub time: u64,
    pub mask: ModifierMask,
    pub key_code: KeyCode,
    pub raw_code: u16,
    pub key_char: u16,
}

impl KeyboardHookEvent {
    pub(crate) fn from_raw(time: u64, mask: ModifierMask, data: &KeyboardData) -> Self {
        Self {
            time,
            mask,
            key_code: data.key_code,
            raw_code: data.raw_code,
            key_char: data.key_char,
        }
    }

    /// The typed character, for events that carry one.
    pub fn char(&self) -> Option<char> {
        if self.key_char == CHAR_UNDEFINED {
            return None;
        }
        char::decode_utf16([self.key_char]).next()?.ok()
    }
}

/// Mouse clicked/pressed/released/moved/dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseHookEvent {
    pub time: u64,
    pub mask: ModifierMask,
    pub button: MouseButton,
    pub clicks: u16,
    pub x: i16,
    pub y: i16,
}

impl MouseHookEvent {
    pub(crate) fn from_raw(time: u64, mask: ModifierMask, data: &MouseData) -> Self {
        Self {
            time,
            mask,
            button: data.button,
            clicks: data.clicks,
            x: data.x,
            y: data.y,
        }
    }
}

/// Mouse wheel turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseWheelHookEvent {
    pub time: u64,
    pub mask: ModifierMask,
    pub clicks: u16,
    pub x: i16,
    pub y: i16,
    pub scroll_type: MouseWheelScrollType,
    pub amount: u16,
    pub rotation: i16,
    pub direction: MouseWheelDirection,
}

impl MouseWheelHookEvent {
    pub(crate) fn from_raw(time: u64, mask: ModifierMask, data: &MouseWheelData) -> Self {
        Self {
            time,
            mask,
            clicks: data.clicks,
            x: data.x,
            y: data.y,
            scroll_type: data.scroll_type,
            amount: data.amount,
            rotation: data.rotation,
            direction: data.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_type_has_a_category() {
        for raw in 1..=11 {
            let category = EventCategory::from_event_type(EventType::from_raw(raw));
            assert!(category.is_some(), "raw type {raw} has no category");
        }
        assert_eq!(EventCategory::from_event_type(EventType::Unknown(12)), None);
    }

    #[test]
    fn test_typed_and_pressed_are_distinct() {
        assert_ne!(
            EventCategory::from_event_type(EventType::KeyTyped),
            EventCategory::from_event_type(EventType::KeyPressed)
        );
        assert_ne!(
            EventCategory::from_event_type(EventType::MouseClicked),
            EventCategory::from_event_type(EventType::MouseReleased)
        );
    }

    #[test]
    fn test_keyboard_char() {
        let data = KeyboardData {
            key_code: KeyCode::A,
            raw_code: 0x41,
            key_char: 'a' as u16,
        };
        let event = KeyboardHookEvent::from_raw(1, ModifierMask::empty(), &data);
        assert_eq!(event.char(), Some('a'));

        let data = KeyboardData {
            key_char: CHAR_UNDEFINED,
            ..data
        };
        let event = KeyboardHookEvent::from_raw(1, ModifierMask::empty(), &data);
        assert_eq!(event.char(), None);
    }

    #[test]
    fn test_category_parses_its_own_name() {
        for category in EventCategory::ALL {
            assert_eq!(category.as_str().parse::<EventCategory>(), Ok(category));
        }
        assert!("key_smashed".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&EventCategory::MouseWheel).unwrap();
        assert_eq!(json, "\"mouse_wheel\"");
    }
}
