//! Raw event → typed event fan-out.

use crate::event::{
    EventCategory, HookEvent, KeyboardHookEvent, MouseHookEvent, MouseWheelHookEvent,
};
use crate::native::{RawEvent, RawEventData};
use crate::registry::{SubscriberRegistry, Subscribers};
use std::sync::Arc;
use tracing::trace;

/// Routes raw events from the native engine to subscribers.
///
/// Runs on the hook thread. Subscriber panics are not caught here: they
/// unwind through the engine's callback, and what happens then depends on the
/// engine (a Rust engine unwinds into the hook thread, an `extern "C"`
/// trampoline aborts the process).
pub struct EventDispatcher {
    registry: Arc<SubscriberRegistry>,
}

impl EventDispatcher {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one raw event. Returns `true` if at least one subscriber was
    /// invoked.
    pub fn handle_raw_event(&self, event: &RawEvent) -> bool {
        let Some(category) = EventCategory::from_event_type(event.event_type) else {
            trace!(event_type = %event.event_type, "Ignoring unknown event type");
            return false;
        };

        let registry = &self.registry;
        let (time, mask) = (event.time, event.mask);

        match category {
            EventCategory::HookEnabled => {
                dispatch(&registry.hook_enabled, || Some(HookEvent { time, mask }))
            }
            EventCategory::HookDisabled => {
                dispatch(&registry.hook_disabled, || Some(HookEvent { time, mask }))
            }
            EventCategory::KeyTyped => dispatch(&registry.key_typed, || keyboard(event)),
            EventCategory::KeyPressed => dispatch(&registry.key_pressed, || keyboard(event)),
            EventCategory::KeyReleased => dispatch(&registry.key_released, || keyboard(event)),
            EventCategory::MouseClicked => dispatch(&registry.mouse_clicked, || mouse(event)),
            EventCategory::MousePressed => dispatch(&registry.mouse_pressed, || mouse(event)),
            EventCategory::MouseReleased => dispatch(&registry.mouse_released, || mouse(event)),
            EventCategory::MouseMoved => dispatch(&registry.mouse_moved, || mouse(event)),
            EventCategory::MouseDragged => dispatch(&registry.mouse_dragged, || mouse(event)),
            EventCategory::MouseWheel => dispatch(&registry.mouse_wheel, || wheel(event)),
        }
    }
}

/// Snapshot the list, translate only if someone is listening, then invoke.
fn dispatch<T>(subscribers: &Subscribers<T>, translate: impl FnOnce() -> Option<T>) -> bool {
    let callbacks = subscribers.snapshot();
    if callbacks.is_empty() {
        return false;
    }

    let Some(typed) = translate() else {
        return false;
    };

    for callback in &callbacks {
        callback(&typed);
    }
    true
}

fn keyboard(event: &RawEvent) -> Option<KeyboardHookEvent> {
    match &event.data {
        RawEventData::Keyboard(data) => {
            Some(KeyboardHookEvent::from_raw(event.time, event.mask, data))
        }
        other => payload_mismatch(event, other),
    }
}

fn mouse(event: &RawEvent) -> Option<MouseHookEvent> {
    match &event.data {
        RawEventData::Mouse(data) => Some(MouseHookEvent::from_raw(event.time, event.mask, data)),
        other => payload_mismatch(event, other),
    }
}

fn wheel(event: &RawEvent) -> Option<MouseWheelHookEvent> {
    match &event.data {
        RawEventData::Wheel(data) => {
            Some(MouseWheelHookEvent::from_raw(event.time, event.mask, data))
        }
        other => payload_mismatch(event, other),
    }
}

fn payload_mismatch<T>(event: &RawEvent, data: &RawEventData) -> Option<T> {
    trace!(event_type = %event.event_type, ?data, "Payload does not match event type");
    None
}
