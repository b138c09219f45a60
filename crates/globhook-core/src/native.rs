//! Native engine boundary: raw event records and the engine trait.
//!
//! The native engine owns OS-level interception. It calls one process-wide
//! dispatch procedure synchronously, once per raw event, on the thread that
//! is blocked inside [`NativeEngine::run`].

use crate::keycode::KeyCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Discriminant of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
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
    /// A discriminant this crate does not know about.
    Unknown(u32),
}

impl EventType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => EventType::HookEnabled,
            2 => EventType::HookDisabled,
            3 => EventType::KeyTyped,
            4 => EventType::KeyPressed,
            5 => EventType::KeyReleased,
            6 => EventType::MouseClicked,
            7 => EventType::MousePressed,
            8 => EventType::MouseReleased,
            9 => EventType::MouseMoved,
            10 => EventType::MouseDragged,
            11 => EventType::MouseWheel,
            other => EventType::Unknown(other),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            EventType::HookEnabled => 1,
            EventType::HookDisabled => 2,
            EventType::KeyTyped => 3,
            EventType::KeyPressed => 4,
            EventType::KeyReleased => 5,
            EventType::MouseClicked => 6,
            EventType::MousePressed => 7,
            EventType::MouseReleased => 8,
            EventType::MouseMoved => 9,
            EventType::MouseDragged => 10,
            EventType::MouseWheel => 11,
            EventType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Unknown(raw) => write!(f, "Unknown({raw})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Modifier keys and mouse buttons held while an event occurred.
///
/// A `u16` newtype with the native bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(u16);

impl ModifierMask {
    pub const LEFT_SHIFT: Self = Self(1 << 0);
    pub const LEFT_CTRL: Self = Self(1 << 1);
    pub const LEFT_META: Self = Self(1 << 2);
    pub const LEFT_ALT: Self = Self(1 << 3);
    pub const RIGHT_SHIFT: Self = Self(1 << 4);
    pub const RIGHT_CTRL: Self = Self(1 << 5);
    pub const RIGHT_META: Self = Self(1 << 6);
    pub const RIGHT_ALT: Self = Self(1 << 7);
    pub const BUTTON1: Self = Self(1 << 8);
    pub const BUTTON2: Self = Self(1 << 9);
    pub const BUTTON3: Self = Self(1 << 10);
    pub const BUTTON4: Self = Self(1 << 11);
    pub const BUTTON5: Self = Self(1 << 12);
    pub const NUM_LOCK: Self = Self(1 << 13);
    pub const CAPS_LOCK: Self = Self(1 << 14);
    pub const SCROLL_LOCK: Self = Self(1 << 15);

    pub const SHIFT: Self = Self::LEFT_SHIFT.union(Self::RIGHT_SHIFT);
    pub const CTRL: Self = Self::LEFT_CTRL.union(Self::RIGHT_CTRL);
    pub const META: Self = Self::LEFT_META.union(Self::RIGHT_META);
    pub const ALT: Self = Self::LEFT_ALT.union(Self::RIGHT_ALT);

    /// Single-bit flags in bit order.
    const NAMED: [(&'static str, Self); 16] = [
        ("LEFT_SHIFT", Self::LEFT_SHIFT),
        ("LEFT_CTRL", Self::LEFT_CTRL),
        ("LEFT_META", Self::LEFT_META),
        ("LEFT_ALT", Self::LEFT_ALT),
        ("RIGHT_SHIFT", Self::RIGHT_SHIFT),
        ("RIGHT_CTRL", Self::RIGHT_CTRL),
        ("RIGHT_META", Self::RIGHT_META),
        ("RIGHT_ALT", Self::RIGHT_ALT),
        ("BUTTON1", Self::BUTTON1),
        ("BUTTON2", Self::BUTTON2),
        ("BUTTON3", Self::BUTTON3),
        ("BUTTON4", Self::BUTTON4),
        ("BUTTON5", Self::BUTTON5),
        ("NUM_LOCK", Self::NUM_LOCK),
        ("CAPS_LOCK", Self::CAPS_LOCK),
        ("SCROLL_LOCK", Self::SCROLL_LOCK),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every 16-bit pattern is meaningful, so no bits are dropped.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether any bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn toggle(&mut self, other: Self) {
        self.0 ^= other.0;
    }

    /// Names of the single-bit flags that are set, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(_, flag)| self.contains(*flag))
            .map(|(name, _)| name)
    }
}

impl std::ops::BitOr for ModifierMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ModifierMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for ModifierMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Mouse button as reported by the native engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    NoButton,
    /// Usually the left button.
    Button1,
    /// Usually the right button.
    Button2,
    /// Usually the middle button.
    Button3,
    Button4,
    Button5,
    Other(u16),
}

impl MouseButton {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0 => MouseButton::NoButton,
            1 => MouseButton::Button1,
            2 => MouseButton::Button2,
            3 => MouseButton::Button3,
            4 => MouseButton::Button4,
            5 => MouseButton::Button5,
            other => MouseButton::Other(other),
        }
    }

    pub fn to_raw(self) -> u16 {
        match self {
            MouseButton::NoButton => 0,
            MouseButton::Button1 => 1,
            MouseButton::Button2 => 2,
            MouseButton::Button3 => 3,
            MouseButton::Button4 => 4,
            MouseButton::Button5 => 5,
            MouseButton::Other(raw) => raw,
        }
    }

    /// The modifier mask bit set while this button is held.
    pub fn mask(self) -> ModifierMask {
        match self {
            MouseButton::Button1 => ModifierMask::BUTTON1,
            MouseButton::Button2 => ModifierMask::BUTTON2,
            MouseButton::Button3 => ModifierMask::BUTTON3,
            MouseButton::Button4 => ModifierMask::BUTTON4,
            MouseButton::Button5 => ModifierMask::BUTTON5,
            _ => ModifierMask::empty(),
        }
    }
}

/// Wheel scroll granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseWheelScrollType {
    #[default]
    Unit,
    Block,
}

impl MouseWheelScrollType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            2 => MouseWheelScrollType::Block,
            _ => MouseWheelScrollType::Unit,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            MouseWheelScrollType::Unit => 1,
            MouseWheelScrollType::Block => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseWheelDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl MouseWheelDirection {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            4 => MouseWheelDirection::Horizontal,
            _ => MouseWheelDirection::Vertical,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            MouseWheelDirection::Vertical => 3,
            MouseWheelDirection::Horizontal => 4,
        }
    }
}

/// Keyboard payload of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardData {
    pub key_code: KeyCode,
    pub raw_code: u16,
    /// UTF-16 code unit, `CHAR_UNDEFINED` when there is none.
    pub key_char: u16,
}

/// Mouse payload of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseData {
    pub button: MouseButton,
    pub clicks: u16,
    pub x: i16,
    pub y: i16,
}

/// Mouse wheel payload of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseWheelData {
    pub clicks: u16,
    pub x: i16,
    pub y: i16,
    pub scroll_type: MouseWheelScrollType,
    pub amount: u16,
    pub rotation: i16,
    pub direction: MouseWheelDirection,
}

/// The active payload of a raw event, selected by its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawEventData {
    #[default]
    None,
    Keyboard(KeyboardData),
    Mouse(MouseData),
    Wheel(MouseWheelData),
}

/// One input occurrence as delivered by the native engine.
///
/// Engines hand raw events to the dispatch procedure by reference; the
/// record is only valid for the duration of that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawEvent {
    pub event_type: EventType,
    /// Milliseconds, as reported by the engine.
    pub time: u64,
    pub mask: ModifierMask,
    pub data: RawEventData,
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Unknown(0)
    }
}

impl RawEvent {
    pub fn new(event_type: EventType, time: u64) -> Self {
        Self {
            event_type,
            time,
            mask: ModifierMask::empty(),
            data: RawEventData::None,
        }
    }

    pub fn keyboard(event_type: EventType, time: u64, data: KeyboardData) -> Self {
        Self {
            data: RawEventData::Keyboard(data),
            ..Self::new(event_type, time)
        }
    }

    pub fn mouse(event_type: EventType, time: u64, data: MouseData) -> Self {
        Self {
            data: RawEventData::Mouse(data),
            ..Self::new(event_type, time)
        }
    }

    pub fn wheel(time: u64, data: MouseWheelData) -> Self {
        Self {
            data: RawEventData::Wheel(data),
            ..Self::new(EventType::MouseWheel, time)
        }
    }

    pub fn with_mask(mut self, mask: ModifierMask) -> Self {
        self.mask = mask;
        self
    }
}

/// Result code returned by the native run and stop calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UioHookResult {
    Success,
    Failure,
    ErrorOutOfMemory,
    ErrorXOpenDisplay,
    ErrorXRecordNotFound,
    ErrorXRecordAllocRange,
    ErrorXRecordCreateContext,
    ErrorXRecordEnableContext,
    ErrorXRecordGetContext,
    ErrorSetWindowsHookEx,
    ErrorGetModuleHandle,
    ErrorAxApiDisabled,
    ErrorCreateEventPort,
    ErrorCreateRunLoopSource,
    ErrorGetRunLoop,
    ErrorCreateObserver,
    Unknown(u32),
}

impl UioHookResult {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x00 => UioHookResult::Success,
            0x01 => UioHookResult::Failure,
            0x02 => UioHookResult::ErrorOutOfMemory,
            0x20 => UioHookResult::ErrorXOpenDisplay,
            0x21 => UioHookResult::ErrorXRecordNotFound,
            0x22 => UioHookResult::ErrorXRecordAllocRange,
            0x23 => UioHookResult::ErrorXRecordCreateContext,
            0x24 => UioHookResult::ErrorXRecordEnableContext,
            0x25 => UioHookResult::ErrorXRecordGetContext,
            0x30 => UioHookResult::ErrorSetWindowsHookEx,
            0x31 => UioHookResult::ErrorGetModuleHandle,
            0x40 => UioHookResult::ErrorAxApiDisabled,
            0x41 => UioHookResult::ErrorCreateEventPort,
            0x42 => UioHookResult::ErrorCreateRunLoopSource,
            0x43 => UioHookResult::ErrorGetRunLoop,
            0x44 => UioHookResult::ErrorCreateObserver,
            other => UioHookResult::Unknown(other),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            UioHookResult::Success => 0x00,
            UioHookResult::Failure => 0x01,
            UioHookResult::ErrorOutOfMemory => 0x02,
            UioHookResult::ErrorXOpenDisplay => 0x20,
            UioHookResult::ErrorXRecordNotFound => 0x21,
            UioHookResult::ErrorXRecordAllocRange => 0x22,
            UioHookResult::ErrorXRecordCreateContext => 0x23,
            UioHookResult::ErrorXRecordEnableContext => 0x24,
            UioHookResult::ErrorXRecordGetContext => 0x25,
            UioHookResult::ErrorSetWindowsHookEx => 0x30,
            UioHookResult::ErrorGetModuleHandle => 0x31,
            UioHookResult::ErrorAxApiDisabled => 0x40,
            UioHookResult::ErrorCreateEventPort => 0x41,
            UioHookResult::ErrorCreateRunLoopSource => 0x42,
            UioHookResult::ErrorGetRunLoop => 0x43,
            UioHookResult::ErrorCreateObserver => 0x44,
            UioHookResult::Unknown(raw) => raw,
        }
    }

    pub fn is_success(self) -> bool {
        self == UioHookResult::Success
    }
}

impl fmt::Display for UioHookResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UioHookResult::Unknown(raw) => write!(f, "Unknown({raw})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Geometry of one attached screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenData {
    pub number: u8,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

/// The single process-wide raw event callback.
pub type DispatchProc = Arc<dyn Fn(&RawEvent) + Send + Sync>;

/// The native hook engine.
///
/// Implementations are expected to be process-wide: the dispatch procedure
/// set last wins, and only one `run` may usefully be in progress at a time.
pub trait NativeEngine: Send + Sync + 'static {
    /// Replace the dispatch procedure; `None` unsets it.
    fn set_dispatch_proc(&self, proc: Option<DispatchProc>);

    /// Run the hook, blocking the calling thread until [`stop`](Self::stop)
    /// is called or the engine fails.
    fn run(&self) -> UioHookResult;

    /// Request the running hook to terminate. Must be callable from any
    /// thread, including from inside the dispatch procedure.
    fn stop(&self) -> UioHookResult;

    /// Inject a synthetic input event.
    fn post_event(&self, event: &RawEvent) -> UioHookResult;

    fn screen_info(&self) -> Vec<ScreenData>;

    fn auto_repeat_rate(&self) -> Option<i64>;
    fn auto_repeat_delay(&self) -> Option<i64>;
    fn pointer_acceleration_multiplier(&self) -> Option<i64>;
    fn pointer_acceleration_threshold(&self) -> Option<i64>;
    fn pointer_sensitivity(&self) -> Option<i64>;
    fn multi_click_time(&self) -> Option<i64>;
}

impl<E: NativeEngine> NativeEngine for Arc<E> {
    fn set_dispatch_proc(&self, proc: Option<DispatchProc>) {
        (**self).set_dispatch_proc(proc)
    }

    fn run(&self) -> UioHookResult {
        (**self).run()
    }

    fn stop(&self) -> UioHookResult {
        (**self).stop()
    }

    fn post_event(&self, event: &RawEvent) -> UioHookResult {
        (**self).post_event(event)
    }

    fn screen_info(&self) -> Vec<ScreenData> {
        (**self).screen_info()
    }

    fn auto_repeat_rate(&self) -> Option<i64> {
        (**self).auto_repeat_rate()
    }

    fn auto_repeat_delay(&self) -> Option<i64> {
        (**self).auto_repeat_delay()
    }

    fn pointer_acceleration_multiplier(&self) -> Option<i64> {
        (**self).pointer_acceleration_multiplier()
    }

    fn pointer_acceleration_threshold(&self) -> Option<i64> {
        (**self).pointer_acceleration_threshold()
    }

    fn pointer_sensitivity(&self) -> Option<i64> {
        (**self).pointer_sensitivity()
    }

    fn multi_click_time(&self) -> Option<i64> {
        (**self).multi_click_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_raw_values() {
        assert_eq!(EventType::from_raw(4), EventType::KeyPressed);
        assert_eq!(EventType::from_raw(11), EventType::MouseWheel);
        assert_eq!(EventType::from_raw(42), EventType::Unknown(42));
        assert_eq!(EventType::MouseDragged.to_raw(), 10);
    }

    #[test]
    fn test_result_code_raw_values() {
        assert!(UioHookResult::from_raw(0).is_success());
        assert_eq!(UioHookResult::from_raw(0x30), UioHookResult::ErrorSetWindowsHookEx);
        assert_eq!(UioHookResult::from_raw(0x99), UioHookResult::Unknown(0x99));
        assert_eq!(UioHookResult::Unknown(0x99).to_raw(), 0x99);
        assert_eq!(UioHookResult::ErrorAxApiDisabled.to_string(), "ErrorAxApiDisabled");
    }

    #[test]
    fn test_modifier_mask_groups() {
        let mask = ModifierMask::RIGHT_CTRL | ModifierMask::BUTTON1;
        assert!(mask.intersects(ModifierMask::CTRL));
        assert!(!mask.intersects(ModifierMask::SHIFT));
        assert_eq!(MouseButton::Button1.mask(), ModifierMask::BUTTON1);
        assert_eq!(
            ModifierMask::from_bits(0x0101),
            ModifierMask::LEFT_SHIFT | ModifierMask::BUTTON1
        );

        let mut mask = ModifierMask::SHIFT;
        mask.remove(ModifierMask::LEFT_SHIFT);
        mask.toggle(ModifierMask::CAPS_LOCK);
        assert_eq!(
            mask.names().collect::<Vec<_>>(),
            vec!["RIGHT_SHIFT", "CAPS_LOCK"]
        );
    }
}
