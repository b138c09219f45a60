//! globhook-platform: OS-facing engines for globhook.
//!
//! This crate provides:
//! - `RdevEngine`, a `NativeEngine` on top of a process-wide `rdev` listener
//! - `UioHookEngine`, a binding to the native libuiohook library
//!   (`libuiohook` feature)
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `listener` - Singleton rdev listener with subscriber fan-out
//! - `rdev_engine` - rdev engine, event translation and key map
//! - `uiohook` - libuiohook FFI engine

mod error;
mod listener;
mod rdev_engine;

#[cfg(feature = "libuiohook")]
mod uiohook;

pub use error::{PlatformError, PlatformResult};

pub use rdev_engine::{key_code, rdev_key, to_rdev_events, EventTranslator, RdevEngine, RdevEngineConfig};

#[cfg(feature = "libuiohook")]
pub use uiohook::UioHookEngine;
