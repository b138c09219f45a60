//! Synthetic input through the engine's post call.

use crate::error::{HookAction, HookError, HookResult};
use crate::keycode::{KeyCode, CHAR_UNDEFINED};
use crate::native::{
    EventType, KeyboardData, MouseButton, MouseData, MouseWheelData, MouseWheelDirection,
    MouseWheelScrollType, NativeEngine, RawEvent,
};
use tracing::trace;

/// Posts synthetic keyboard and mouse events.
///
/// Event times are left at zero; the platform stamps posted events itself.
pub struct EventSimulator<E> {
    engine: E,
}

impl<E: NativeEngine> EventSimulator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Post a raw event. Hook lifecycle events cannot be posted; an engine
    /// failure is returned as [`HookError::Failed`].
    pub fn post(&self, event: &RawEvent) -> HookResult<()> {
        match event.event_type {
            EventType::HookEnabled | EventType::HookDisabled | EventType::Unknown(_) => {
                Err(HookError::NotPostable(event.event_type.to_string()))
            }
            event_type => {
                trace!(%event_type, "Posting synthetic event");
                let code = self.engine.post_event(event);
                if code.is_success() {
                    Ok(())
                } else {
                    Err(HookError::failed(HookAction::Posting, code))
                }
            }
        }
    }

    pub fn key_press(&self, key_code: KeyCode) -> HookResult<()> {
        self.post(&key_event(EventType::KeyPressed, key_code))
    }

    pub fn key_release(&self, key_code: KeyCode) -> HookResult<()> {
        self.post(&key_event(EventType::KeyReleased, key_code))
    }

    /// Press then release.
    pub fn key_tap(&self, key_code: KeyCode) -> HookResult<()> {
        self.key_press(key_code)?;
        self.key_release(key_code)
    }

    pub fn mouse_press(&self, button: MouseButton) -> HookResult<()> {
        self.post(&button_event(EventType::MousePressed, button))
    }

    pub fn mouse_release(&self, button: MouseButton) -> HookResult<()> {
        self.post(&button_event(EventType::MouseReleased, button))
    }

    /// Move the pointer to absolute coordinates.
    pub fn mouse_move(&self, x: i16, y: i16) -> HookResult<()> {
        self.post(&RawEvent::mouse(
            EventType::MouseMoved,
            0,
            MouseData {
                button: MouseButton::NoButton,
                clicks: 0,
                x,
                y,
            },
        ))
    }

    /// Scroll by `rotation` notches; positive values scroll down or right.
    pub fn mouse_wheel(
        &self,
        rotation: i16,
        direction: MouseWheelDirection,
        scroll_type: MouseWheelScrollType,
    ) -> HookResult<()> {
        self.post(&RawEvent::wheel(
            0,
            MouseWheelData {
                clicks: 0,
                x: 0,
                y: 0,
                scroll_type,
                amount: 0,
                rotation,
                direction,
            },
        ))
    }
}

fn key_event(event_type: EventType, key_code: KeyCode) -> RawEvent {
    RawEvent::keyboard(
        event_type,
        0,
        KeyboardData {
            key_code,
            raw_code: 0,
            key_char: CHAR_UNDEFINED,
        },
    )
}

fn button_event(event_type: EventType, button: MouseButton) -> RawEvent {
    RawEvent::mouse(
        event_type,
        0,
        MouseData {
            button,
            clicks: 0,
            x: 0,
            y: 0,
        },
    )
}
