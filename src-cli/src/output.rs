//! Event printing for `listen`.

use crate::config::OutputFormat;
use globhook_core::{
    EventCategory, HookEvent, KeyboardHookEvent, ModifierMask, MouseHookEvent,
    MouseWheelHookEvent,
};
use serde::Serialize;
use std::io::{self, Write};
use tracing::warn;

/// Human-readable one-line rendering of a typed event.
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for HookEvent {
    fn describe(&self) -> String {
        format!("t={} mask={}", self.time, mask_text(self.mask))
    }
}

impl Describe for KeyboardHookEvent {
    fn describe(&self) -> String {
        let mut line = format!(
            "t={} key={} raw=0x{:04X} mask={}",
            self.time,
            self.key_code,
            self.raw_code,
            mask_text(self.mask)
        );
        if let Some(c) = self.char() {
            line.push_str(&format!(" char={c:?}"));
        }
        line
    }
}

impl Describe for MouseHookEvent {
    fn describe(&self) -> String {
        format!(
            "t={} button={:?} clicks={} x={} y={} mask={}",
            self.time,
            self.button,
            self.clicks,
            self.x,
            self.y,
            mask_text(self.mask)
        )
    }
}

impl Describe for MouseWheelHookEvent {
    fn describe(&self) -> String {
        format!(
            "t={} rotation={} amount={} {:?}/{:?} x={} y={} mask={}",
            self.time,
            self.rotation,
            self.amount,
            self.direction,
            self.scroll_type,
            self.x,
            self.y,
            mask_text(self.mask)
        )
    }
}

fn mask_text(mask: ModifierMask) -> String {
    if mask.is_empty() {
        return "-".into();
    }
    mask.names().collect::<Vec<_>>().join("|")
}

#[derive(Serialize)]
struct JsonLine<'a, T> {
    category: EventCategory,
    #[serde(flatten)]
    event: &'a T,
}

/// Render one event in the requested format.
pub fn render<T>(format: OutputFormat, category: EventCategory, event: &T) -> String
where
    T: Describe + Serialize,
{
    match format {
        OutputFormat::Text => format!("{:<14} {}", category.as_str(), event.describe()),
        OutputFormat::Json => serde_json::to_string(&JsonLine { category, event })
            .unwrap_or_else(|e| format!(r#"{{"category":"{category}","error":"{e}"}}"#)),
    }
}

/// Print one event to stdout.
pub fn print_event<T>(format: OutputFormat, category: EventCategory, event: &T)
where
    T: Describe + Serialize,
{
    let line = render(format, category, event);
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}") {
        warn!(error = %e, "Failed to write event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globhook_core::{KeyCode, MouseButton};

    fn key(mask: ModifierMask) -> KeyboardHookEvent {
        KeyboardHookEvent {
            time: 99,
            mask,
            key_code: KeyCode::A,
            raw_code: 0x41,
            key_char: 'a' as u16,
        }
    }

    #[test]
    fn test_text_line() {
        let line = render(
            OutputFormat::Text,
            EventCategory::KeyTyped,
            &key(ModifierMask::LEFT_SHIFT | ModifierMask::CAPS_LOCK),
        );
        assert!(line.starts_with("key_typed"));
        assert!(line.contains("key=A"));
        assert!(line.contains("mask=LEFT_SHIFT|CAPS_LOCK"));
        assert!(line.ends_with("char='a'"));
    }

    #[test]
    fn test_json_line_is_flat() {
        let line = render(OutputFormat::Json, EventCategory::KeyPressed, &key(ModifierMask::empty()));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["category"], "key_pressed");
        assert_eq!(value["time"], 99);
        assert_eq!(value["key_code"], 0x001E);
    }

    #[test]
    fn test_mouse_text() {
        let event = MouseHookEvent {
            time: 1,
            mask: ModifierMask::empty(),
            button: MouseButton::Button1,
            clicks: 2,
            x: -3,
            y: 4,
        };
        let line = render(OutputFormat::Text, EventCategory::MouseClicked, &event);
        assert!(line.contains("button=Button1 clicks=2 x=-3 y=4 mask=-"));
    }
}
