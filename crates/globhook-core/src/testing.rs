//! Deterministic in-memory engine for tests.
//!
//! `ScriptedEngine` behaves like a native hook without touching the OS: `run`
//! blocks on a command channel until `stop`, injected events are dispatched
//! on the run thread in injection order, and result codes are scripted.
//!
//! Like a native hook, a stop only counts while a run is armed: from the
//! moment a dispatch procedure is installed until `run` returns. A stop
//! requested outside that window is counted but does not end a later run.

use crate::environment::InputSettings;
use crate::native::{DispatchProc, EventType, NativeEngine, RawEvent, ScreenData, UioHookResult};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

enum Command {
    Event(RawEvent),
    /// Wake-up token; the run loop ends only if a stop is still requested.
    Stop,
}

#[derive(Default)]
struct StopState {
    armed: bool,
    requested: bool,
}

/// A scripted [`NativeEngine`].
pub struct ScriptedEngine {
    proc: Mutex<Option<DispatchProc>>,
    command_tx: Sender<Command>,
    command_rx: Receiver<Command>,
    running: Mutex<bool>,
    running_changed: Condvar,
    stop_state: Mutex<StopState>,
    run_result: Mutex<UioHookResult>,
    stop_result: Mutex<UioHookResult>,
    post_result: Mutex<UioHookResult>,
    lifecycle_events: AtomicBool,
    clock: AtomicU64,
    run_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    posted: Mutex<Vec<RawEvent>>,
    screens: Mutex<Vec<ScreenData>>,
    settings: Mutex<InputSettings>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded();
        Self {
            proc: Mutex::new(None),
            command_tx,
            command_rx,
            running: Mutex::new(false),
            running_changed: Condvar::new(),
            stop_state: Mutex::new(StopState::default()),
            run_result: Mutex::new(UioHookResult::Success),
            stop_result: Mutex::new(UioHookResult::Success),
            post_result: Mutex::new(UioHookResult::Success),
            lifecycle_events: AtomicBool::new(true),
            clock: AtomicU64::new(0),
            run_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            posted: Mutex::new(Vec::new()),
            screens: Mutex::new(Vec::new()),
            settings: Mutex::new(InputSettings::default()),
        }
    }

    /// `run` emits `HookEnabled` and then returns `code` right away when it
    /// is not success.
    pub fn with_run_result(self, code: UioHookResult) -> Self {
        *lock(&self.run_result) = code;
        self
    }

    pub fn with_stop_result(self, code: UioHookResult) -> Self {
        self.set_stop_result(code);
        self
    }

    /// `post_event` returns `code`; failed posts are not recorded.
    pub fn with_post_result(self, code: UioHookResult) -> Self {
        *lock(&self.post_result) = code;
        self
    }

    /// Do not emit `HookEnabled`/`HookDisabled` around `run`.
    pub fn without_lifecycle_events(self) -> Self {
        self.lifecycle_events.store(false, Ordering::Relaxed);
        self
    }

    pub fn with_screens(self, screens: Vec<ScreenData>) -> Self {
        *lock(&self.screens) = screens;
        self
    }

    pub fn with_settings(self, settings: InputSettings) -> Self {
        *lock(&self.settings) = settings;
        self
    }

    /// A failing stop does not release `run`.
    pub fn set_stop_result(&self, code: UioHookResult) {
        *lock(&self.stop_result) = code;
    }

    /// Queue an event for dispatch on the run thread.
    pub fn inject(&self, event: RawEvent) {
        let _ = self.command_tx.send(Command::Event(event));
    }

    /// Call the installed dispatch procedure on the current thread, bypassing
    /// the run loop.
    pub fn dispatch_directly(&self, event: &RawEvent) {
        self.dispatch(event);
    }

    /// Block until `run` has entered its loop, or `timeout` elapses.
    pub fn wait_until_running(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut running = lock(&self.running);
        while !*running {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            running = self
                .running_changed
                .wait_timeout(running, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        *lock(&self.running)
    }

    pub fn run_calls(&self) -> usize {
        self.run_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Events passed to `post_event`, in order.
    pub fn posted(&self) -> Vec<RawEvent> {
        lock(&self.posted).clone()
    }

    fn dispatch(&self, event: &RawEvent) {
        let proc = lock(&self.proc).clone();
        if let Some(proc) = proc {
            proc(event);
        }
    }

    fn emit_lifecycle(&self, event_type: EventType) {
        if self.lifecycle_events.load(Ordering::Relaxed) {
            let time = self.clock.fetch_add(1, Ordering::Relaxed);
            self.dispatch(&RawEvent::new(event_type, time));
        }
    }

    fn arm(&self, clear_pending: bool) {
        let mut state = lock(&self.stop_state);
        state.armed = true;
        if clear_pending {
            state.requested = false;
        }
    }

    fn disarm(&self) {
        *lock(&self.stop_state) = StopState::default();
    }

    /// Consume a pending stop request.
    fn take_stop(&self) -> bool {
        std::mem::take(&mut lock(&self.stop_state).requested)
    }

    fn set_running(&self, value: bool) {
        *lock(&self.running) = value;
        self.running_changed.notify_all();
    }
}

impl NativeEngine for ScriptedEngine {
    fn set_dispatch_proc(&self, proc: Option<DispatchProc>) {
        let installed = proc.is_some();
        *lock(&self.proc) = proc;
        if installed {
            self.arm(true);
        } else {
            self.disarm();
        }
    }

    fn run(&self) -> UioHookResult {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        self.arm(false);

        let code = *lock(&self.run_result);
        self.emit_lifecycle(EventType::HookEnabled);
        if !code.is_success() {
            self.disarm();
            return code;
        }

        self.set_running(true);
        while let Ok(command) = self.command_rx.recv() {
            match command {
                Command::Event(event) => self.dispatch(&event),
                Command::Stop if self.take_stop() => break,
                Command::Stop => {}
            }
        }
        self.disarm();
        self.set_running(false);

        self.emit_lifecycle(EventType::HookDisabled);
        UioHookResult::Success
    }

    fn stop(&self) -> UioHookResult {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        let code = *lock(&self.stop_result);
        if code.is_success() {
            let mut state = lock(&self.stop_state);
            if state.armed {
                state.requested = true;
                let _ = self.command_tx.send(Command::Stop);
            }
        }
        code
    }

    fn post_event(&self, event: &RawEvent) -> UioHookResult {
        let code = *lock(&self.post_result);
        if code.is_success() {
            lock(&self.posted).push(*event);
        }
        code
    }

    fn screen_info(&self) -> Vec<ScreenData> {
        lock(&self.screens).clone()
    }

    fn auto_repeat_rate(&self) -> Option<i64> {
        lock(&self.settings).auto_repeat_rate
    }

    fn auto_repeat_delay(&self) -> Option<i64> {
        lock(&self.settings).auto_repeat_delay
    }

    fn pointer_acceleration_multiplier(&self) -> Option<i64> {
        lock(&self.settings).pointer_acceleration_multiplier
    }

    fn pointer_acceleration_threshold(&self) -> Option<i64> {
        lock(&self.settings).pointer_acceleration_threshold
    }

    fn pointer_sensitivity(&self) -> Option<i64> {
        lock(&self.settings).pointer_sensitivity
    }

    fn multi_click_time(&self) -> Option<i64> {
        lock(&self.settings).multi_click_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_run_dispatches_injected_events_until_stop() {
        let engine = Arc::new(ScriptedEngine::new().without_lifecycle_events());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let slot = seen.clone();
        engine.set_dispatch_proc(Some(Arc::new(move |e: &RawEvent| {
            slot.lock().unwrap().push(e.time)
        })));

        let runner = engine.clone();
        let handle = thread::spawn(move || runner.run());
        assert!(engine.wait_until_running(Duration::from_secs(5)));
        engine.inject(RawEvent::new(EventType::MouseMoved, 7));
        engine.inject(RawEvent::new(EventType::MouseMoved, 8));
        assert!(engine.stop().is_success());

        assert_eq!(handle.join().unwrap(), UioHookResult::Success);
        assert_eq!(*seen.lock().unwrap(), vec![7, 8]);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_failing_run_returns_code() {
        let engine = ScriptedEngine::new()
            .without_lifecycle_events()
            .with_run_result(UioHookResult::ErrorAxApiDisabled);
        assert_eq!(engine.run(), UioHookResult::ErrorAxApiDisabled);
        assert_eq!(engine.run_calls(), 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_stop_outside_a_run_does_not_end_the_next_one() {
        let engine = Arc::new(ScriptedEngine::new().without_lifecycle_events());
        assert!(engine.stop().is_success());
        assert!(engine.stop().is_success());

        let runner = engine.clone();
        let handle = thread::spawn(move || runner.run());
        assert!(engine.wait_until_running(Duration::from_secs(5)));
        thread::sleep(Duration::from_millis(50));
        assert!(engine.is_running());

        engine.stop();
        assert_eq!(handle.join().unwrap(), UioHookResult::Success);
        assert_eq!(engine.stop_calls(), 3);
    }

    #[test]
    fn test_stop_between_install_and_run_is_kept() {
        let engine = Arc::new(ScriptedEngine::new().without_lifecycle_events());
        engine.set_dispatch_proc(Some(Arc::new(|_: &RawEvent| {})));
        engine.stop();
        assert_eq!(engine.run(), UioHookResult::Success);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_scripted_post_failure_is_not_recorded() {
        let engine = ScriptedEngine::new().with_post_result(UioHookResult::Failure);
        let event = RawEvent::new(EventType::KeyPressed, 1);
        assert_eq!(engine.post_event(&event), UioHookResult::Failure);
        assert!(engine.posted().is_empty());
    }

    #[test]
    fn test_failing_stop_is_counted() {
        let engine = ScriptedEngine::new().with_stop_result(UioHookResult::Failure);
        assert_eq!(engine.stop(), UioHookResult::Failure);
        assert_eq!(engine.stop(), UioHookResult::Failure);
        assert_eq!(engine.stop_calls(), 2);
    }
}
