//! globhook-core: global keyboard/mouse hook lifecycle and event dispatch.
//!
//! Design goal: keep this crate platform-agnostic. The OS-level hook lives
//! behind the [`NativeEngine`] trait; concrete engines are in
//! `globhook-platform`.
//!
//! ## Module Structure
//!
//! - `native` - raw event record, result codes and the engine trait
//! - `keycode` - virtual key code table
//! - `event` - typed events and subscription categories
//! - `registry` - per-category subscriber lists
//! - `dispatcher` - raw event → typed event fan-out
//! - `hook` - `GlobalHook` lifecycle
//! - `task` - completion handle of a running hook
//! - `simulator` - synthetic input posting
//! - `environment` - screens and input settings
//! - `testing` - scripted engine for tests

mod dispatcher;
mod environment;
mod error;
mod event;
mod hook;
mod keycode;
mod native;
mod registry;
mod simulator;
mod task;

pub mod testing;

pub use dispatcher::EventDispatcher;
pub use environment::{InputEnvironment, InputSettings};
pub use error::{HookAction, HookError, HookResult};
pub use event::{EventCategory, HookEvent, KeyboardHookEvent, MouseHookEvent, MouseWheelHookEvent};
pub use hook::{GlobalHook, HookHandle, HookOptions, HookState};
pub use keycode::{KeyCode, CHAR_UNDEFINED};
pub use native::{
    DispatchProc, EventType, KeyboardData, ModifierMask, MouseButton, MouseData, MouseWheelData,
    MouseWheelDirection, MouseWheelScrollType, NativeEngine, RawEvent, RawEventData, ScreenData,
    UioHookResult,
};
pub use registry::{Callback, SubscriberRegistry, Subscription};
pub use simulator::EventSimulator;
pub use task::HookTask;
