//! `NativeEngine` on top of rdev.
//!
//! `run` subscribes to the process-wide rdev listener and translates its
//! events on the calling thread until `stop` is requested. Lifecycle events
//! are emitted around the loop so subscribers see the same enabled/disabled
//! sequence a native hook produces.
//!
//! rdev gives no signal once its hook is installed. `HookEnabled` is sent
//! after the first listener poll that did not report a failure, so a listener
//! that cannot start at all (no display, no permissions) fails the run
//! without any lifecycle event. A failure reported later still produces
//! `HookEnabled` followed by `HookDisabled`.

mod config;
mod keymap;
mod translate;

pub use config::RdevEngineConfig;
pub use keymap::{key_code, rdev_key};
pub use translate::{to_rdev_events, EventTranslator};

use crate::error::{PlatformError, PlatformResult};
use crate::listener::{self, RecvError};
use crossbeam_channel::{bounded, Receiver, Sender};
use globhook_core::{DispatchProc, EventType, NativeEngine, RawEvent, ScreenData, UioHookResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub struct RdevEngine {
    config: RdevEngineConfig,
    proc: Mutex<Option<DispatchProc>>,
    /// Stop requests are accepted only while set.
    armed: Mutex<bool>,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
}

impl RdevEngine {
    pub fn new() -> Self {
        let (stop_tx, stop_rx) = bounded(1);
        Self {
            config: RdevEngineConfig::default(),
            proc: Mutex::new(None),
            armed: Mutex::new(false),
            stop_tx,
            stop_rx,
        }
    }

    pub fn with_config(config: RdevEngineConfig) -> PlatformResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &RdevEngineConfig {
        &self.config
    }

    /// Post a raw event through `rdev::simulate`.
    pub fn simulate(&self, event: &RawEvent) -> PlatformResult<()> {
        for event_type in to_rdev_events(event)? {
            rdev::simulate(&event_type)
                .map_err(|e| PlatformError::SimulateFailed(format!("{event_type:?}: {e:?}")))?;
        }
        Ok(())
    }

    /// Size of the primary display in pixels.
    pub fn display_size(&self) -> PlatformResult<(u64, u64)> {
        rdev::display_size().map_err(|e| PlatformError::Display(format!("{e:?}")))
    }

    fn proc(&self) -> MutexGuard<'_, Option<DispatchProc>> {
        self.proc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn armed(&self) -> MutexGuard<'_, bool> {
        self.armed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accept stop requests, optionally dropping any left from earlier.
    fn arm(&self, clear_pending: bool) {
        let mut armed = self.armed();
        if clear_pending {
            while self.stop_rx.try_recv().is_ok() {}
        }
        *armed = true;
    }

    /// Refuse stop requests and drop the pending one.
    fn disarm(&self) {
        let mut armed = self.armed();
        *armed = false;
        while self.stop_rx.try_recv().is_ok() {}
    }

    fn dispatch(&self, event: &RawEvent) {
        let proc = self.proc().clone();
        if let Some(proc) = proc {
            proc(event);
        }
    }

    fn emit(&self, event_type: EventType) {
        self.dispatch(&RawEvent::new(event_type, now_millis()));
    }
}

impl Default for RdevEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine for RdevEngine {
    fn set_dispatch_proc(&self, proc: Option<DispatchProc>) {
        let installed = proc.is_some();
        *self.proc() = proc;
        if installed {
            self.arm(true);
        } else {
            self.disarm();
        }
    }

    fn run(&self) -> UioHookResult {
        info!("rdev engine run starting");
        let subscription = listener::subscribe(self.config.channel_capacity);
        let mut translator = EventTranslator::new(&self.config);
        let poll = self.config.poll_interval();
        self.arm(false);

        let mut enabled = false;
        let code = loop {
            if self.stop_rx.try_recv().is_ok() {
                debug!("rdev engine received stop signal");
                break UioHookResult::Success;
            }

            let received = subscription.recv_timeout(poll);
            if let Err(RecvError::Failed(code)) = received {
                warn!(%code, "rdev listener is gone");
                break code;
            }
            if !enabled {
                enabled = true;
                self.emit(EventType::HookEnabled);
            }
            if let Ok(event) = received {
                for raw in translator.translate(&event) {
                    self.dispatch(&raw);
                }
            }
        };
        self.disarm();
        if enabled {
            self.emit(EventType::HookDisabled);
        }

        info!(%code, "rdev engine run exiting");
        code
    }

    /// Signals the run loop. Only a run that is armed (dispatch procedure
    /// installed, `run` not yet returned) is stopped; otherwise the request
    /// is dropped and the call still succeeds.
    fn stop(&self) -> UioHookResult {
        let armed = self.armed();
        if *armed {
            let _ = self.stop_tx.try_send(());
        } else {
            debug!("rdev engine not armed, stop ignored");
        }
        UioHookResult::Success
    }

    fn post_event(&self, event: &RawEvent) -> UioHookResult {
        match self.simulate(event) {
            Ok(()) => UioHookResult::Success,
            Err(e) => {
                warn!(error = %e, "Failed to post event");
                UioHookResult::Failure
            }
        }
    }

    fn screen_info(&self) -> Vec<ScreenData> {
        match self.display_size() {
            Ok((width, height)) => vec![ScreenData {
                number: 1,
                x: 0,
                y: 0,
                width: u16::try_from(width).unwrap_or(u16::MAX),
                height: u16::try_from(height).unwrap_or(u16::MAX),
            }],
            Err(e) => {
                warn!(error = %e, "Failed to query display size");
                Vec::new()
            }
        }
    }

    fn auto_repeat_rate(&self) -> Option<i64> {
        None
    }

    fn auto_repeat_delay(&self) -> Option<i64> {
        None
    }

    fn pointer_acceleration_multiplier(&self) -> Option<i64> {
        None
    }

    fn pointer_acceleration_threshold(&self) -> Option<i64> {
        None
    }

    fn pointer_sensitivity(&self) -> Option<i64> {
        None
    }

    /// The configured multi-click window, which is what click counting uses.
    fn multi_click_time(&self) -> Option<i64> {
        i64::try_from(self.config.multi_click_ms).ok()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
