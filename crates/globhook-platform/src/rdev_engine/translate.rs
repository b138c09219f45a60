//! rdev events ↔ native raw events.
//!
//! rdev only reports presses, releases, moves and wheel deltas. The
//! translator keeps the modifier and button state needed to fill the mask
//! and to synthesize typed, clicked and dragged events.

use super::config::RdevEngineConfig;
use super::keymap;
use crate::error::{PlatformError, PlatformResult};
use globhook_core::{
    EventType, KeyCode, KeyboardData, ModifierMask, MouseButton, MouseData, MouseWheelData,
    MouseWheelDirection, MouseWheelScrollType, RawEvent, RawEventData, CHAR_UNDEFINED,
};
use rdev::{Button, Event, Key};
use std::time::{SystemTime, UNIX_EPOCH};

const BUTTONS: ModifierMask = ModifierMask::BUTTON1
    .union(ModifierMask::BUTTON2)
    .union(ModifierMask::BUTTON3)
    .union(ModifierMask::BUTTON4)
    .union(ModifierMask::BUTTON5);

/// Stateful rdev → raw event translator. One per run.
pub struct EventTranslator {
    synthesize_typed: bool,
    synthesize_clicks: bool,
    synthesize_drags: bool,
    multi_click_ms: u64,
    wheel_amount: u16,
    mask: ModifierMask,
    position: (i16, i16),
    last_press: Option<(MouseButton, u64)>,
    click_count: u16,
    dragged: bool,
}

impl EventTranslator {
    pub fn new(config: &RdevEngineConfig) -> Self {
        Self {
            synthesize_typed: config.synthesize_typed,
            synthesize_clicks: config.synthesize_clicks,
            synthesize_drags: config.synthesize_drags,
            multi_click_ms: config.multi_click_ms,
            wheel_amount: config.wheel_amount,
            mask: ModifierMask::empty(),
            position: (0, 0),
            last_press: None,
            click_count: 0,
            dragged: false,
        }
    }

    pub fn mask(&self) -> ModifierMask {
        self.mask
    }

    pub fn translate(&mut self, event: &Event) -> Vec<RawEvent> {
        let time = millis(event.time);
        match event.event_type {
            rdev::EventType::KeyPress(key) => self.key_press(key, event.name.as_deref(), time),
            rdev::EventType::KeyRelease(key) => self.key_release(key, time),
            rdev::EventType::ButtonPress(button) => self.button_press(button, time),
            rdev::EventType::ButtonRelease(button) => self.button_release(button, time),
            rdev::EventType::MouseMove { x, y } => self.mouse_move(x, y, time),
            rdev::EventType::Wheel { delta_x, delta_y } => self.wheel(delta_x, delta_y, time),
        }
    }

    fn key_press(&mut self, key: Key, name: Option<&str>, time: u64) -> Vec<RawEvent> {
        match key {
            Key::CapsLock => self.mask.toggle(ModifierMask::CAPS_LOCK),
            Key::NumLock => self.mask.toggle(ModifierMask::NUM_LOCK),
            Key::ScrollLock => self.mask.toggle(ModifierMask::SCROLL_LOCK),
            other => self.mask.insert(modifier(other)),
        }

        let raw_code = keymap::raw_code(key);
        let mut events = vec![self.keyboard(
            EventType::KeyPressed,
            time,
            keymap::key_code(key),
            raw_code,
            CHAR_UNDEFINED,
        )];

        if self.synthesize_typed {
            let typed = name
                .into_iter()
                .flat_map(str::chars)
                .filter(|c| !c.is_control())
                .flat_map(|c| {
                    let mut units = [0u16; 2];
                    c.encode_utf16(&mut units).to_vec()
                });
            for unit in typed {
                events.push(self.keyboard(
                    EventType::KeyTyped,
                    time,
                    KeyCode::UNDEFINED,
                    raw_code,
                    unit,
                ));
            }
        }
        events
    }

    fn key_release(&mut self, key: Key, time: u64) -> Vec<RawEvent> {
        self.mask.remove(modifier(key));
        vec![self.keyboard(
            EventType::KeyReleased,
            time,
            keymap::key_code(key),
            keymap::raw_code(key),
            CHAR_UNDEFINED,
        )]
    }

    fn button_press(&mut self, button: Button, time: u64) -> Vec<RawEvent> {
        let button = mouse_button(button);
        self.mask.insert(button.mask());
        self.dragged = false;

        self.click_count = match self.last_press {
            Some((last, at))
                if last == button && time.saturating_sub(at) <= self.multi_click_ms =>
            {
                self.click_count.saturating_add(1)
            }
            _ => 1,
        };
        self.last_press = Some((button, time));

        vec![self.mouse(EventType::MousePressed, time, button, self.click_count)]
    }

    fn button_release(&mut self, button: Button, time: u64) -> Vec<RawEvent> {
        let button = mouse_button(button);
        self.mask.remove(button.mask());

        let mut events = vec![self.mouse(EventType::MouseReleased, time, button, self.click_count)];
        if self.synthesize_clicks && !self.dragged {
            events.push(self.mouse(EventType::MouseClicked, time, button, self.click_count));
        }
        events
    }

    fn mouse_move(&mut self, x: f64, y: f64, time: u64) -> Vec<RawEvent> {
        self.position = (clamp_coord(x), clamp_coord(y));
        // Any movement ends a multi-click sequence.
        self.last_press = None;

        let event_type = if self.synthesize_drags && self.mask.intersects(BUTTONS) {
            self.dragged = true;
            EventType::MouseDragged
        } else {
            EventType::MouseMoved
        };
        vec![self.mouse(event_type, time, MouseButton::NoButton, 0)]
    }

    fn wheel(&mut self, delta_x: i64, delta_y: i64, time: u64) -> Vec<RawEvent> {
        let mut events = Vec::new();
        // rdev reports positive vertical deltas for scrolling up.
        if delta_y != 0 {
            let rotation = clamp_delta(delta_y.saturating_neg());
            events.push(self.wheel_event(time, rotation, MouseWheelDirection::Vertical));
        }
        if delta_x != 0 {
            let rotation = clamp_delta(delta_x);
            events.push(self.wheel_event(time, rotation, MouseWheelDirection::Horizontal));
        }
        events
    }

    fn keyboard(
        &self,
        event_type: EventType,
        time: u64,
        key_code: KeyCode,
        raw_code: u16,
        key_char: u16,
    ) -> RawEvent {
        RawEvent::keyboard(
            event_type,
            time,
            KeyboardData {
                key_code,
                raw_code,
                key_char,
            },
        )
        .with_mask(self.mask)
    }

    fn mouse(&self, event_type: EventType, time: u64, button: MouseButton, clicks: u16) -> RawEvent {
        let (x, y) = self.position;
        RawEvent::mouse(
            event_type,
            time,
            MouseData {
                button,
                clicks,
                x,
                y,
            },
        )
        .with_mask(self.mask)
    }

    fn wheel_event(&self, time: u64, rotation: i16, direction: MouseWheelDirection) -> RawEvent {
        let (x, y) = self.position;
        RawEvent::wheel(
            time,
            MouseWheelData {
                clicks: 1,
                x,
                y,
                scroll_type: MouseWheelScrollType::Unit,
                amount: self.wheel_amount,
                rotation,
                direction,
            },
        )
        .with_mask(self.mask)
    }
}

/// rdev events that reproduce a raw event when simulated.
pub fn to_rdev_events(event: &RawEvent) -> PlatformResult<Vec<rdev::EventType>> {
    let unsupported = || PlatformError::UnsupportedEvent(event.event_type.to_string());

    match (event.event_type, event.data) {
        (EventType::KeyPressed, RawEventData::Keyboard(data)) => {
            Ok(vec![rdev::EventType::KeyPress(rdev_key(data.key_code)?)])
        }
        (EventType::KeyReleased, RawEventData::Keyboard(data)) => {
            Ok(vec![rdev::EventType::KeyRelease(rdev_key(data.key_code)?)])
        }
        (EventType::MousePressed, RawEventData::Mouse(data)) => {
            Ok(vec![rdev::EventType::ButtonPress(rdev_button(data.button))])
        }
        (EventType::MouseReleased, RawEventData::Mouse(data)) => {
            Ok(vec![rdev::EventType::ButtonRelease(rdev_button(data.button))])
        }
        (EventType::MouseClicked, RawEventData::Mouse(data)) => {
            let button = rdev_button(data.button);
            Ok(vec![
                rdev::EventType::ButtonPress(button),
                rdev::EventType::ButtonRelease(button),
            ])
        }
        (EventType::MouseMoved | EventType::MouseDragged, RawEventData::Mouse(data)) => {
            Ok(vec![rdev::EventType::MouseMove {
                x: f64::from(data.x),
                y: f64::from(data.y),
            }])
        }
        (EventType::MouseWheel, RawEventData::Wheel(data)) => {
            let rotation = i64::from(data.rotation);
            let (delta_x, delta_y) = match data.direction {
                MouseWheelDirection::Vertical => (0, -rotation),
                MouseWheelDirection::Horizontal => (rotation, 0),
            };
            Ok(vec![rdev::EventType::Wheel { delta_x, delta_y }])
        }
        _ => Err(unsupported()),
    }
}

fn rdev_key(code: KeyCode) -> PlatformResult<Key> {
    keymap::rdev_key(code).ok_or(PlatformError::UnmappedKey(code))
}

fn rdev_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Button1 => Button::Left,
        MouseButton::Button2 => Button::Right,
        MouseButton::Button3 => Button::Middle,
        other => Button::Unknown(u8::try_from(other.to_raw()).unwrap_or(u8::MAX)),
    }
}

fn mouse_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Button1,
        Button::Right => MouseButton::Button2,
        Button::Middle => MouseButton::Button3,
        // Side buttons: X11 numbers them 8/9, Windows reports XBUTTON1/2.
        Button::Unknown(1 | 8) => MouseButton::Button4,
        Button::Unknown(2 | 9) => MouseButton::Button5,
        Button::Unknown(other) => MouseButton::Other(u16::from(other)),
    }
}

fn modifier(key: Key) -> ModifierMask {
    match key {
        Key::ShiftLeft => ModifierMask::LEFT_SHIFT,
        Key::ShiftRight => ModifierMask::RIGHT_SHIFT,
        Key::ControlLeft => ModifierMask::LEFT_CTRL,
        Key::ControlRight => ModifierMask::RIGHT_CTRL,
        Key::Alt => ModifierMask::LEFT_ALT,
        Key::AltGr => ModifierMask::RIGHT_ALT,
        Key::MetaLeft => ModifierMask::LEFT_META,
        Key::MetaRight => ModifierMask::RIGHT_META,
        _ => ModifierMask::empty(),
    }
}

fn millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn clamp_coord(value: f64) -> i16 {
    value.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn clamp_delta(value: i64) -> i16 {
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(ms: u64, event_type: rdev::EventType) -> Event {
        Event {
            time: UNIX_EPOCH + Duration::from_millis(ms),
            name: None,
            event_type,
        }
    }

    fn translator() -> EventTranslator {
        EventTranslator::new(&RdevEngineConfig::default())
    }

    fn types(events: &[RawEvent]) -> Vec<EventType> {
        events.iter().map(|e| e.event_type).collect()
    }

    fn mouse_data(event: &RawEvent) -> MouseData {
        match event.data {
            RawEventData::Mouse(data) => data,
            other => panic!("expected mouse payload, got {other:?}"),
        }
    }

    #[test]
    fn test_key_press_with_text_emits_typed() {
        let mut t = translator();
        let event = Event {
            name: Some("a".into()),
            ..at(100, rdev::EventType::KeyPress(Key::KeyA))
        };

        let events = t.translate(&event);
        assert_eq!(types(&events), vec![EventType::KeyPressed, EventType::KeyTyped]);
        assert_eq!(events[0].time, 100);
        match (events[0].data, events[1].data) {
            (RawEventData::Keyboard(pressed), RawEventData::Keyboard(typed)) => {
                assert_eq!(pressed.key_code, KeyCode::A);
                assert_eq!(pressed.key_char, CHAR_UNDEFINED);
                assert_eq!(typed.key_code, KeyCode::UNDEFINED);
                assert_eq!(typed.key_char, 'a' as u16);
            }
            other => panic!("unexpected payloads: {other:?}"),
        }
    }

    #[test]
    fn test_control_text_is_not_typed() {
        let mut t = translator();
        let event = Event {
            name: Some("\u{1b}".into()),
            ..at(0, rdev::EventType::KeyPress(Key::Escape))
        };
        assert_eq!(types(&t.translate(&event)), vec![EventType::KeyPressed]);
    }

    #[test]
    fn test_modifiers_tracked_in_mask() {
        let mut t = translator();
        t.translate(&at(0, rdev::EventType::KeyPress(Key::ShiftLeft)));
        let events = t.translate(&at(1, rdev::EventType::KeyPress(Key::KeyB)));
        assert_eq!(events[0].mask, ModifierMask::LEFT_SHIFT);

        t.translate(&at(2, rdev::EventType::KeyRelease(Key::ShiftLeft)));
        assert!(t.mask().is_empty());

        t.translate(&at(3, rdev::EventType::KeyPress(Key::CapsLock)));
        t.translate(&at(4, rdev::EventType::KeyRelease(Key::CapsLock)));
        assert_eq!(t.mask(), ModifierMask::CAPS_LOCK);
    }

    #[test]
    fn test_click_and_double_click() {
        let mut t = translator();
        t.translate(&at(0, rdev::EventType::MouseMove { x: 10.0, y: 20.0 }));

        let press = t.translate(&at(10, rdev::EventType::ButtonPress(Button::Left)));
        assert_eq!(press[0].mask, ModifierMask::BUTTON1);
        let release = t.translate(&at(20, rdev::EventType::ButtonRelease(Button::Left)));
        assert_eq!(types(&release), vec![EventType::MouseReleased, EventType::MouseClicked]);
        assert_eq!(mouse_data(&release[1]).clicks, 1);
        assert_eq!((mouse_data(&release[1]).x, mouse_data(&release[1]).y), (10, 20));

        t.translate(&at(100, rdev::EventType::ButtonPress(Button::Left)));
        let release = t.translate(&at(110, rdev::EventType::ButtonRelease(Button::Left)));
        assert_eq!(mouse_data(&release[1]).clicks, 2);

        t.translate(&at(2000, rdev::EventType::ButtonPress(Button::Left)));
        let release = t.translate(&at(2010, rdev::EventType::ButtonRelease(Button::Left)));
        assert_eq!(mouse_data(&release[1]).clicks, 1);
    }

    #[test]
    fn test_drag_suppresses_click() {
        let mut t = translator();
        t.translate(&at(0, rdev::EventType::ButtonPress(Button::Right)));
        let moved = t.translate(&at(5, rdev::EventType::MouseMove { x: 50.0, y: 60.0 }));
        assert_eq!(types(&moved), vec![EventType::MouseDragged]);

        let release = t.translate(&at(10, rdev::EventType::ButtonRelease(Button::Right)));
        assert_eq!(types(&release), vec![EventType::MouseReleased]);
        assert_eq!(mouse_data(&release[0]).button, MouseButton::Button2);

        let moved = t.translate(&at(15, rdev::EventType::MouseMove { x: 51.0, y: 60.0 }));
        assert_eq!(types(&moved), vec![EventType::MouseMoved]);
    }

    #[test]
    fn test_synthesis_can_be_disabled() {
        let config = RdevEngineConfig {
            synthesize_typed: false,
            synthesize_clicks: false,
            synthesize_drags: false,
            ..Default::default()
        };
        let mut t = EventTranslator::new(&config);
        let event = Event {
            name: Some("x".into()),
            ..at(0, rdev::EventType::KeyPress(Key::KeyX))
        };
        assert_eq!(types(&t.translate(&event)), vec![EventType::KeyPressed]);

        t.translate(&at(1, rdev::EventType::ButtonPress(Button::Left)));
        let moved = t.translate(&at(2, rdev::EventType::MouseMove { x: 1.0, y: 1.0 }));
        assert_eq!(types(&moved), vec![EventType::MouseMoved]);
        let release = t.translate(&at(3, rdev::EventType::ButtonRelease(Button::Left)));
        assert_eq!(types(&release), vec![EventType::MouseReleased]);
    }

    #[test]
    fn test_wheel_directions() {
        let mut t = translator();
        let events = t.translate(&at(0, rdev::EventType::Wheel { delta_x: 2, delta_y: 1 }));
        assert_eq!(events.len(), 2);
        match (events[0].data, events[1].data) {
            (RawEventData::Wheel(vertical), RawEventData::Wheel(horizontal)) => {
                assert_eq!(vertical.direction, MouseWheelDirection::Vertical);
                assert_eq!(vertical.rotation, -1);
                assert_eq!(vertical.amount, 3);
                assert_eq!(horizontal.direction, MouseWheelDirection::Horizontal);
                assert_eq!(horizontal.rotation, 2);
            }
            other => panic!("unexpected payloads: {other:?}"),
        }
    }

    #[test]
    fn test_coordinates_are_clamped() {
        let mut t = translator();
        let events = t.translate(&at(0, rdev::EventType::MouseMove { x: 1e9, y: -1e9 }));
        let data = mouse_data(&events[0]);
        assert_eq!((data.x, data.y), (i16::MAX, i16::MIN));
    }

    #[test]
    fn test_simulation_events() {
        let press = RawEvent::keyboard(
            EventType::KeyPressed,
            0,
            KeyboardData {
                key_code: KeyCode::ENTER,
                raw_code: 0,
                key_char: CHAR_UNDEFINED,
            },
        );
        assert!(matches!(
            to_rdev_events(&press).unwrap().as_slice(),
            [rdev::EventType::KeyPress(Key::Return)]
        ));

        let click = RawEvent::mouse(
            EventType::MouseClicked,
            0,
            MouseData {
                button: MouseButton::Button1,
                ..Default::default()
            },
        );
        assert_eq!(to_rdev_events(&click).unwrap().len(), 2);

        let wheel = RawEvent::wheel(
            0,
            MouseWheelData {
                rotation: 3,
                direction: MouseWheelDirection::Vertical,
                ..Default::default()
            },
        );
        assert!(matches!(
            to_rdev_events(&wheel).unwrap().as_slice(),
            [rdev::EventType::Wheel { delta_x: 0, delta_y: -3 }]
        ));
    }

    #[test]
    fn test_unsupported_simulation() {
        let typed = RawEvent::keyboard(EventType::KeyTyped, 0, KeyboardData::default());
        assert!(matches!(
            to_rdev_events(&typed),
            Err(PlatformError::UnsupportedEvent(_))
        ));

        let unmapped = RawEvent::keyboard(
            EventType::KeyPressed,
            0,
            KeyboardData {
                key_code: KeyCode::SUN_HELP,
                ..Default::default()
            },
        );
        assert!(matches!(
            to_rdev_events(&unmapped),
            Err(PlatformError::UnmappedKey(KeyCode::SUN_HELP))
        ));
    }
}
