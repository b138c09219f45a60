//! libuiohook binding.
//!
//! Only built with the `libuiohook` feature; links against the system
//! `uiohook` library (1.2 API). The library has one process-wide dispatch
//! target, so the most recently installed procedure receives every event.
//!
//! A panic unwinding out of a subscriber reaches the `extern "C"`
//! trampoline and aborts the process.

use globhook_core::{
    DispatchProc, EventType, KeyCode, KeyboardData, ModifierMask, MouseButton, MouseData,
    MouseWheelData, MouseWheelDirection, MouseWheelScrollType, NativeEngine, RawEvent,
    RawEventData, ScreenData, UioHookResult,
};
use std::ffi::{c_int, c_long, c_void};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

mod ffi {
    use std::ffi::{c_int, c_long, c_uchar, c_void};

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    pub struct KeyboardEventData {
        pub keycode: u16,
        pub rawcode: u16,
        pub keychar: u16,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    pub struct MouseEventData {
        pub button: u16,
        pub clicks: u16,
        pub x: i16,
        pub y: i16,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Default)]
    pub struct MouseWheelEventData {
        pub clicks: u16,
        pub x: i16,
        pub y: i16,
        pub type_: u8,
        pub amount: u16,
        pub rotation: i16,
        pub direction: u8,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub union EventData {
        pub keyboard: KeyboardEventData,
        pub mouse: MouseEventData,
        pub wheel: MouseWheelEventData,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct UioHookEvent {
        pub type_: u32,
        pub time: u64,
        pub mask: u16,
        pub reserved: u16,
        pub data: EventData,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct ScreenData {
        pub number: u8,
        pub x: i16,
        pub y: i16,
        pub width: u16,
        pub height: u16,
    }

    pub type Dispatcher = extern "C" fn(event: *mut UioHookEvent);

    #[link(name = "uiohook")]
    extern "C" {
        pub fn hook_set_dispatch_proc(dispatch_proc: Option<Dispatcher>);
        pub fn hook_run() -> c_int;
        pub fn hook_stop() -> c_int;
        pub fn hook_post_event(event: *mut UioHookEvent);
        pub fn hook_create_screen_info(count: *mut c_uchar) -> *mut ScreenData;
        pub fn hook_get_auto_repeat_rate() -> c_long;
        pub fn hook_get_auto_repeat_delay() -> c_long;
        pub fn hook_get_pointer_acceleration_multiplier() -> c_long;
        pub fn hook_get_pointer_acceleration_threshold() -> c_long;
        pub fn hook_get_pointer_sensitivity() -> c_long;
        pub fn hook_get_multi_click_time() -> c_long;
    }

    extern "C" {
        pub fn free(ptr: *mut c_void);
    }
}

/// The library's single dispatch target.
static DISPATCH_PROC: Mutex<Option<DispatchProc>> = Mutex::new(None);

fn dispatch_slot() -> MutexGuard<'static, Option<DispatchProc>> {
    DISPATCH_PROC.lock().unwrap_or_else(PoisonError::into_inner)
}

extern "C" fn dispatch_trampoline(event: *mut ffi::UioHookEvent) {
    if event.is_null() {
        return;
    }
    // SAFETY: libuiohook passes a valid event for the duration of the call.
    let raw = from_native(unsafe { &*event });
    let proc = dispatch_slot().clone();
    if let Some(proc) = proc {
        proc(&raw);
    }
}

fn from_native(event: &ffi::UioHookEvent) -> RawEvent {
    let event_type = EventType::from_raw(event.type_);
    // SAFETY: the discriminant selects the active union member.
    let data = unsafe {
        match event_type {
            EventType::KeyTyped | EventType::KeyPressed | EventType::KeyReleased => {
                let k = event.data.keyboard;
                RawEventData::Keyboard(KeyboardData {
                    key_code: KeyCode(k.keycode),
                    raw_code: k.rawcode,
                    key_char: k.keychar,
                })
            }
            EventType::MouseClicked
            | EventType::MousePressed
            | EventType::MouseReleased
            | EventType::MouseMoved
            | EventType::MouseDragged => {
                let m = event.data.mouse;
                RawEventData::Mouse(MouseData {
                    button: MouseButton::from_raw(m.button),
                    clicks: m.clicks,
                    x: m.x,
                    y: m.y,
                })
            }
            EventType::MouseWheel => {
                let w = event.data.wheel;
                RawEventData::Wheel(MouseWheelData {
                    clicks: w.clicks,
                    x: w.x,
                    y: w.y,
                    scroll_type: MouseWheelScrollType::from_raw(w.type_),
                    amount: w.amount,
                    rotation: w.rotation,
                    direction: MouseWheelDirection::from_raw(w.direction),
                })
            }
            EventType::HookEnabled | EventType::HookDisabled | EventType::Unknown(_) => {
                RawEventData::None
            }
        }
    };

    RawEvent {
        event_type,
        time: event.time,
        mask: ModifierMask::from_bits(event.mask),
        data,
    }
}

fn to_native(event: &RawEvent) -> ffi::UioHookEvent {
    let data = match event.data {
        RawEventData::Keyboard(k) => ffi::EventData {
            keyboard: ffi::KeyboardEventData {
                keycode: k.key_code.0,
                rawcode: k.raw_code,
                keychar: k.key_char,
            },
        },
        RawEventData::Mouse(m) => ffi::EventData {
            mouse: ffi::MouseEventData {
                button: m.button.to_raw(),
                clicks: m.clicks,
                x: m.x,
                y: m.y,
            },
        },
        RawEventData::Wheel(w) => ffi::EventData {
            wheel: ffi::MouseWheelEventData {
                clicks: w.clicks,
                x: w.x,
                y: w.y,
                type_: w.scroll_type.to_raw(),
                amount: w.amount,
                rotation: w.rotation,
                direction: w.direction.to_raw(),
            },
        },
        RawEventData::None => ffi::EventData {
            wheel: ffi::MouseWheelEventData::default(),
        },
    };

    ffi::UioHookEvent {
        type_: event.event_type.to_raw(),
        time: event.time,
        mask: event.mask.bits(),
        reserved: 0,
        data,
    }
}

fn result_code(raw: c_int) -> UioHookResult {
    UioHookResult::from_raw(u32::try_from(raw).unwrap_or(u32::MAX))
}

fn setting(value: c_long) -> Option<i64> {
    (value >= 0).then(|| i64::from(value))
}

/// `NativeEngine` backed by the native libuiohook library.
#[derive(Debug, Default)]
pub struct UioHookEngine {
    _private: (),
}

impl UioHookEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NativeEngine for UioHookEngine {
    fn set_dispatch_proc(&self, proc: Option<DispatchProc>) {
        let installed = proc.is_some();
        *dispatch_slot() = proc;
        // SAFETY: the trampoline is a plain `extern "C"` function with the
        // signature libuiohook expects.
        unsafe {
            ffi::hook_set_dispatch_proc(installed.then_some(dispatch_trampoline as ffi::Dispatcher));
        }
        debug!(installed, "libuiohook dispatch procedure set");
    }

    fn run(&self) -> UioHookResult {
        // SAFETY: blocks until hook_stop; no pointers are exchanged.
        result_code(unsafe { ffi::hook_run() })
    }

    fn stop(&self) -> UioHookResult {
        // SAFETY: callable from any thread.
        result_code(unsafe { ffi::hook_stop() })
    }

    /// The 1.2 API reports nothing back, so a post always succeeds.
    fn post_event(&self, event: &RawEvent) -> UioHookResult {
        let mut native = to_native(event);
        // SAFETY: `native` outlives the call and is not retained.
        unsafe { ffi::hook_post_event(&mut native) };
        UioHookResult::Success
    }

    fn screen_info(&self) -> Vec<ScreenData> {
        let mut count: u8 = 0;
        // SAFETY: the library allocates `count` entries, released with free.
        unsafe {
            let screens = ffi::hook_create_screen_info(&mut count);
            if screens.is_null() {
                warn!("libuiohook returned no screen info");
                return Vec::new();
            }
            let result = std::slice::from_raw_parts(screens, usize::from(count))
                .iter()
                .map(|s| ScreenData {
                    number: s.number,
                    x: s.x,
                    y: s.y,
                    width: s.width,
                    height: s.height,
                })
                .collect();
            ffi::free(screens.cast::<c_void>());
            result
        }
    }

    fn auto_repeat_rate(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_auto_repeat_rate() })
    }

    fn auto_repeat_delay(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_auto_repeat_delay() })
    }

    fn pointer_acceleration_multiplier(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_pointer_acceleration_multiplier() })
    }

    fn pointer_acceleration_threshold(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_pointer_acceleration_threshold() })
    }

    fn pointer_sensitivity(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_pointer_sensitivity() })
    }

    fn multi_click_time(&self) -> Option<i64> {
        setting(unsafe { ffi::hook_get_multi_click_time() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_round_trip_keeps_payload() {
        let event = RawEvent::wheel(
            42,
            MouseWheelData {
                clicks: 1,
                x: -5,
                y: 9,
                scroll_type: MouseWheelScrollType::Block,
                amount: 3,
                rotation: -1,
                direction: MouseWheelDirection::Horizontal,
            },
        )
        .with_mask(ModifierMask::LEFT_ALT);

        assert_eq!(from_native(&to_native(&event)), event);
    }

    #[test]
    fn test_result_and_setting_mapping() {
        assert_eq!(result_code(0x20), UioHookResult::ErrorXOpenDisplay);
        assert_eq!(result_code(-1), UioHookResult::Unknown(u32::MAX));
        assert_eq!(setting(-1), None);
        assert_eq!(setting(500), Some(500));
    }
}
