//! Hook lifecycle: start on a dedicated thread, dispose, drop safety net.
//!
//! A `GlobalHook` moves through three states: `NotStarted` → `Running` →
//! `Disposed`. `start` is valid only from `NotStarted`; `dispose` is valid from
//! any state and may be repeated. The raw-event dispatch procedure is
//! installed on the hook thread right before the blocking run call.

use crate::dispatcher::EventDispatcher;
use crate::error::{HookAction, HookError, HookResult};
use crate::event::{
    EventCategory, HookEvent, KeyboardHookEvent, MouseHookEvent, MouseWheelHookEvent,
};
use crate::native::{DispatchProc, NativeEngine, RawEvent, UioHookResult};
use crate::registry::{SubscriberRegistry, Subscription};
use crate::task::{HookTask, TaskCompleter};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use tracing::{debug, info, warn};

/// Lifecycle state of a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookState {
    NotStarted,
    Running,
    Disposed,
}

impl HookState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => HookState::NotStarted,
            1 => HookState::Running,
            _ => HookState::Disposed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            HookState::NotStarted => 0,
            HookState::Running => 1,
            HookState::Disposed => 2,
        }
    }
}

/// Hook thread settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookOptions {
    /// Name given to the dedicated hook thread.
    pub thread_name: String,
    /// Stack size of the hook thread; `None` uses the platform default.
    pub stack_size: Option<usize>,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            thread_name: "globhook".into(),
            stack_size: None,
        }
    }
}

struct HookShared<E> {
    engine: E,
    state: AtomicU8,
    registry: Arc<SubscriberRegistry>,
}

impl<E: NativeEngine> HookShared<E> {
    fn state(&self) -> HookState {
        HookState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn ensure_not_disposed(&self, method: &'static str) -> HookResult<()> {
        if self.state() == HookState::Disposed {
            return Err(HookError::Disposed { method });
        }
        Ok(())
    }

    fn dispose(&self) -> HookResult<()> {
        let previous = HookState::from_u8(
            self.state
                .swap(HookState::Disposed.as_u8(), Ordering::AcqRel),
        );
        debug!(?previous, "Disposing global hook");

        let code = self.engine.stop();
        if code.is_success() {
            Ok(())
        } else {
            Err(HookError::failed(HookAction::Stopping, code))
        }
    }
}

/// A global keyboard and mouse hook.
///
/// Subscribe with the `on_*` methods, then call [`start`](Self::start). The
/// hook runs on its own thread until [`dispose`](Self::dispose) is called or
/// the value is dropped.
pub struct GlobalHook<E: NativeEngine> {
    shared: Arc<HookShared<E>>,
    options: HookOptions,
}

impl<E: NativeEngine> GlobalHook<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, HookOptions::default())
    }

    pub fn with_options(engine: E, options: HookOptions) -> Self {
        Self {
            shared: Arc::new(HookShared {
                engine,
                state: AtomicU8::new(HookState::NotStarted.as_u8()),
                registry: Arc::new(SubscriberRegistry::new()),
            }),
            options,
        }
    }

    // Accessors below read state only and stay usable after dispose.

    pub fn state(&self) -> HookState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == HookState::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.state() == HookState::Disposed
    }

    pub fn engine(&self) -> &E {
        &self.shared.engine
    }

    /// A weak handle that can dispose this hook from any thread, including
    /// from inside a subscriber. Disposing through it repeats like
    /// [`dispose`](Self::dispose), so it is available in every state.
    pub fn handle(&self) -> HookHandle {
        let shared: Arc<dyn Disposable> = self.shared.clone();
        HookHandle {
            inner: Arc::downgrade(&shared),
        }
    }

    /// Start the hook on a dedicated thread.
    ///
    /// Returns immediately. The returned task resolves when the native run
    /// call returns: `Ok(())` on success, otherwise the start failure.
    pub fn start(&self) -> HookResult<HookTask> {
        let transition = self.shared.state.compare_exchange(
            HookState::NotStarted.as_u8(),
            HookState::Running.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if let Err(current) = transition {
            return Err(match HookState::from_u8(current) {
                HookState::Disposed => HookError::Disposed { method: "start" },
                _ => HookError::AlreadyRunning,
            });
        }
        debug!(thread = %self.options.thread_name, "Starting global hook");

        let (task, completer) = HookTask::new();
        let shared = self.shared.clone();
        let thread_completer = completer.clone();

        let mut builder = thread::Builder::new().name(self.options.thread_name.clone());
        if let Some(stack_size) = self.options.stack_size {
            builder = builder.stack_size(stack_size);
        }

        if let Err(e) = builder.spawn(move || run_hook_thread(shared, thread_completer)) {
            warn!(error = %e, "Failed to spawn hook thread");
            completer.complete(Err(HookError::ThreadSpawn(e)));
        }

        Ok(task)
    }

    /// Stop the hook and mark it disposed.
    ///
    /// Always calls native stop, even when repeated or when the hook was
    /// never started. Never joins the hook thread.
    pub fn dispose(&self) -> HookResult<()> {
        self.shared.dispose()
    }

    pub fn on_hook_enabled<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&HookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_hook_enabled")?;
        Ok(self.shared.registry.on_hook_enabled(callback))
    }

    pub fn on_hook_disabled<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&HookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_hook_disabled")?;
        Ok(self.shared.registry.on_hook_disabled(callback))
    }

    pub fn on_key_typed<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_key_typed")?;
        Ok(self.shared.registry.on_key_typed(callback))
    }

    pub fn on_key_pressed<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_key_pressed")?;
        Ok(self.shared.registry.on_key_pressed(callback))
    }

    pub fn on_key_released<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_key_released")?;
        Ok(self.shared.registry.on_key_released(callback))
    }

    pub fn on_mouse_clicked<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_clicked")?;
        Ok(self.shared.registry.on_mouse_clicked(callback))
    }

    pub fn on_mouse_pressed<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_pressed")?;
        Ok(self.shared.registry.on_mouse_pressed(callback))
    }

    pub fn on_mouse_released<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_released")?;
        Ok(self.shared.registry.on_mouse_released(callback))
    }

    pub fn on_mouse_moved<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_moved")?;
        Ok(self.shared.registry.on_mouse_moved(callback))
    }

    pub fn on_mouse_dragged<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_dragged")?;
        Ok(self.shared.registry.on_mouse_dragged(callback))
    }

    pub fn on_mouse_wheel<F>(&self, callback: F) -> HookResult<Subscription>
    where
        F: Fn(&MouseWheelHookEvent) + Send + Sync + 'static,
    {
        self.shared.ensure_not_disposed("on_mouse_wheel")?;
        Ok(self.shared.registry.on_mouse_wheel(callback))
    }

    /// Remove a subscriber. Returns `Ok(false)` if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> HookResult<bool> {
        self.shared.ensure_not_disposed("unsubscribe")?;
        Ok(self.shared.registry.unsubscribe(subscription))
    }

    /// Read-only; reports the registrations kept after dispose.
    pub fn subscriber_count(&self, category: EventCategory) -> usize {
        self.shared.registry.subscriber_count(category)
    }
}

impl<E: NativeEngine> Drop for GlobalHook<E> {
    fn drop(&mut self) {
        if self.shared.state() == HookState::Disposed {
            return;
        }
        if let Err(e) = self.shared.dispose() {
            warn!(error = %e, "Global hook dropped without dispose; stop failed");
        }
    }
}

fn run_hook_thread<E: NativeEngine>(shared: Arc<HookShared<E>>, completer: TaskCompleter) {
    info!("Global hook thread started");

    // Cleared once run returns so a misbehaving engine cannot dispatch late.
    let live = Arc::new(AtomicBool::new(true));
    let dispatcher = EventDispatcher::new(shared.registry.clone());
    let proc_live = live.clone();
    let proc: DispatchProc = Arc::new(move |event: &RawEvent| {
        if proc_live.load(Ordering::Acquire) {
            dispatcher.handle_raw_event(event);
        }
    });

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        shared.engine.set_dispatch_proc(Some(proc));
        // A dispose that landed before the install had nothing to stop.
        if shared.state() == HookState::Disposed {
            debug!("Global hook disposed before run, skipping");
            shared.engine.set_dispatch_proc(None);
            return UioHookResult::Success;
        }
        shared.engine.run()
    }));
    live.store(false, Ordering::Release);

    let result = match outcome {
        Ok(code) if code.is_success() => Ok(()),
        Ok(code) => {
            warn!(%code, "Global hook run failed");
            Err(HookError::failed(HookAction::Starting, code))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "Global hook thread panicked");
            Err(HookError::Panicked(message))
        }
    };

    info!(ok = result.is_ok(), "Global hook thread exiting");
    completer.complete(result);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

trait Disposable: Send + Sync {
    fn dispose(&self) -> HookResult<()>;
}

impl<E: NativeEngine> Disposable for HookShared<E> {
    fn dispose(&self) -> HookResult<()> {
        HookShared::dispose(self)
    }
}

/// Weak, clonable handle used to dispose a hook without owning it.
#[derive(Clone)]
pub struct HookHandle {
    inner: Weak<dyn Disposable>,
}

impl HookHandle {
    /// Dispose the hook. A no-op once the hook itself is gone.
    pub fn dispose(&self) -> HookResult<()> {
        match self.inner.upgrade() {
            Some(hook) => hook.dispose(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::{KeyCode, CHAR_UNDEFINED};
    use crate::native::{EventType, KeyboardData, MouseData, ScreenData};
    use crate::testing::ScriptedEngine;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn key_pressed(code: KeyCode, time: u64) -> RawEvent {
        RawEvent::keyboard(
            EventType::KeyPressed,
            time,
            KeyboardData {
                key_code: code,
                raw_code: 0,
                key_char: CHAR_UNDEFINED,
            },
        )
    }

    fn scripted_hook() -> (Arc<ScriptedEngine>, GlobalHook<Arc<ScriptedEngine>>) {
        let engine = Arc::new(ScriptedEngine::new());
        (engine.clone(), GlobalHook::new(engine))
    }

    fn finish(task: HookTask) -> HookResult<()> {
        task.wait_timeout(WAIT).expect("hook task did not finish")
    }

    #[test]
    fn test_start_after_dispose_fails_without_thread() {
        let (engine, hook) = scripted_hook();
        hook.dispose().unwrap();

        let err = hook.start().unwrap_err();
        assert!(matches!(err, HookError::Disposed { method: "start" }));
        assert_eq!(engine.run_calls(), 0);
    }

    #[test]
    fn test_dispose_before_start_calls_stop_once() {
        let (engine, hook) = scripted_hook();
        assert!(hook.dispose().is_ok());
        assert_eq!(engine.stop_calls(), 1);
        assert_eq!(hook.state(), HookState::Disposed);

        drop(hook);
        assert_eq!(engine.stop_calls(), 1);
    }

    #[test]
    fn test_entry_points_after_dispose_name_the_method() {
        let (_engine, hook) = scripted_hook();
        let sub = hook.on_mouse_moved(|_: &MouseHookEvent| {}).unwrap();
        hook.dispose().unwrap();

        let err = hook.on_key_pressed(|_: &KeyboardHookEvent| {}).unwrap_err();
        assert!(matches!(err, HookError::Disposed { method: "on_key_pressed" }));
        let err = hook.unsubscribe(sub).unwrap_err();
        assert!(matches!(err, HookError::Disposed { method: "unsubscribe" }));
    }

    #[test]
    fn test_key_pressed_scenario() {
        let (engine, hook) = scripted_hook();
        let received = Arc::new(Mutex::new(Vec::new()));
        let slot = received.clone();
        hook.on_key_pressed(move |e: &KeyboardHookEvent| slot.lock().unwrap().push(*e))
            .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        engine.inject(key_pressed(KeyCode(0x001E), 1000));
        hook.dispose().unwrap();

        assert!(finish(task).is_ok());
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].key_code, KeyCode(0x001E));
        assert_eq!(received[0].time, 1000);
    }

    #[test]
    fn test_double_dispose_with_failing_stop() {
        let (engine, hook) = scripted_hook();
        engine.set_stop_result(UioHookResult::Failure);

        let first = hook.dispose().unwrap_err();
        let second = hook.dispose().unwrap_err();
        assert_eq!(first.code(), Some(UioHookResult::Failure));
        assert_eq!(second.code(), Some(UioHookResult::Failure));
        assert_eq!(
            first.to_string(),
            "Failed stopping the global hook: Failure (1)"
        );
        assert_eq!(engine.stop_calls(), 2);
    }

    #[test]
    fn test_start_failure_reaches_the_task() {
        let engine = Arc::new(ScriptedEngine::new().with_run_result(UioHookResult::ErrorXOpenDisplay));
        let hook = GlobalHook::new(engine.clone());

        let err = finish(hook.start().unwrap()).unwrap_err();
        assert_eq!(err.code(), Some(UioHookResult::ErrorXOpenDisplay));
        assert!(err.to_string().starts_with("Failed starting the global hook"));
        assert_eq!(engine.run_calls(), 1);
    }

    #[test]
    fn test_nothing_dispatched_after_task_resolves() {
        let (engine, hook) = scripted_hook();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        hook.on_key_pressed(move |_: &KeyboardHookEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        engine.inject(key_pressed(KeyCode::A, 1));
        hook.dispose().unwrap();
        assert!(finish(task).is_ok());

        engine.dispatch_directly(&key_pressed(KeyCode::A, 2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lifecycle_events_reach_subscribers() {
        let (engine, hook) = scripted_hook();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (on, off) = (seen.clone(), seen.clone());
        hook.on_hook_enabled(move |_: &HookEvent| on.lock().unwrap().push("enabled"))
            .unwrap();
        hook.on_hook_disabled(move |_: &HookEvent| off.lock().unwrap().push("disabled"))
            .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        hook.dispose().unwrap();
        assert!(finish(task).is_ok());
        assert_eq!(*seen.lock().unwrap(), vec!["enabled", "disabled"]);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let (engine, hook) = scripted_hook();
        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));

        assert!(matches!(hook.start(), Err(HookError::AlreadyRunning)));
        hook.dispose().unwrap();
        assert!(finish(task).is_ok());
        assert_eq!(engine.run_calls(), 1);
    }

    #[test]
    fn test_subscriber_panic_surfaces_through_task() {
        let (engine, hook) = scripted_hook();
        hook.on_mouse_pressed(|_: &MouseHookEvent| panic!("subscriber blew up"))
            .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        engine.inject(RawEvent::mouse(EventType::MousePressed, 5, MouseData::default()));

        match finish(task) {
            Err(HookError::Panicked(message)) => assert_eq!(message, "subscriber blew up"),
            other => panic!("unexpected task result: {other:?}"),
        }
    }

    #[test]
    fn test_subscriber_can_dispose_through_handle() {
        let (engine, hook) = scripted_hook();
        let handle = hook.handle();
        hook.on_key_pressed(move |e: &KeyboardHookEvent| {
            if e.key_code == KeyCode::ESCAPE {
                handle.dispose().unwrap();
            }
        })
        .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        engine.inject(key_pressed(KeyCode::ESCAPE, 1));

        assert!(finish(task).is_ok());
        assert!(hook.is_disposed());
    }

    #[test]
    fn test_drop_swallows_stop_failure() {
        let (engine, hook) = scripted_hook();
        engine.set_stop_result(UioHookResult::ErrorOutOfMemory);
        drop(hook);
        assert_eq!(engine.stop_calls(), 1);
    }

    #[test]
    fn test_handle_outliving_hook_is_noop() {
        let (engine, hook) = scripted_hook();
        let handle = hook.handle();
        drop(hook);
        assert!(handle.dispose().is_ok());
        assert_eq!(engine.stop_calls(), 1);
    }

    #[test]
    fn test_accessors_stay_usable_after_dispose() {
        let (engine, hook) = scripted_hook();
        hook.on_key_typed(|_: &KeyboardHookEvent| {}).unwrap();
        hook.dispose().unwrap();

        assert_eq!(hook.subscriber_count(EventCategory::KeyTyped), 1);
        assert_eq!(hook.state(), HookState::Disposed);
        assert!(hook.handle().dispose().is_ok());
        assert_eq!(engine.stop_calls(), 2);
    }

    #[test]
    fn test_repeated_dispose_does_not_stop_next_hook() {
        let (engine, first) = scripted_hook();
        let task = first.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        first.dispose().unwrap();
        first.dispose().unwrap();
        assert!(finish(task).is_ok());
        first.dispose().unwrap();

        let second = GlobalHook::new(engine.clone());
        let task = second.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        let task = task
            .wait_timeout(Duration::from_millis(100))
            .expect_err("second hook stopped without dispose");
        assert!(engine.is_running());

        second.dispose().unwrap();
        assert!(finish(task).is_ok());
        assert_eq!(engine.run_calls(), 2);
    }

    /// Disposes its hook from inside `set_dispatch_proc`, before `run`.
    struct DisposeOnInstall {
        inner: ScriptedEngine,
        handle: Mutex<Option<HookHandle>>,
    }

    impl NativeEngine for DisposeOnInstall {
        fn set_dispatch_proc(&self, proc: Option<DispatchProc>) {
            let installed = proc.is_some();
            self.inner.set_dispatch_proc(proc);
            let handle = self.handle.lock().unwrap().take();
            if let (true, Some(handle)) = (installed, handle) {
                handle.dispose().unwrap();
            }
        }
        fn run(&self) -> UioHookResult {
            self.inner.run()
        }
        fn stop(&self) -> UioHookResult {
            self.inner.stop()
        }
        fn post_event(&self, event: &RawEvent) -> UioHookResult {
            self.inner.post_event(event)
        }
        fn screen_info(&self) -> Vec<ScreenData> {
            self.inner.screen_info()
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
        fn multi_click_time(&self) -> Option<i64> {
            None
        }
    }

    #[test]
    fn test_dispose_before_run_skips_run() {
        let engine = Arc::new(DisposeOnInstall {
            inner: ScriptedEngine::new(),
            handle: Mutex::new(None),
        });
        let hook = GlobalHook::new(engine.clone());
        *engine.handle.lock().unwrap() = Some(hook.handle());

        assert!(finish(hook.start().unwrap()).is_ok());
        assert!(hook.is_disposed());
        assert_eq!(engine.inner.run_calls(), 0);
        assert_eq!(engine.inner.stop_calls(), 1);
    }

    #[test]
    fn test_subscribe_and_unsubscribe_while_dispatching() {
        const EVENTS: usize = 200;
        let (engine, hook) = scripted_hook();

        let kept = Arc::new(AtomicUsize::new(0));
        let counter = kept.clone();
        hook.on_key_pressed(move |_: &KeyboardHookEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let removed = Arc::new(AtomicUsize::new(0));
        let counter = removed.clone();
        let sub = hook
            .on_key_pressed(move |_: &KeyboardHookEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert!(hook.unsubscribe(sub).unwrap());

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));

        let churned = AtomicUsize::new(0);
        thread::scope(|scope| {
            scope.spawn(|| {
                // Ends once the hook is disposed.
                while let Ok(sub) = hook.on_key_pressed(|_: &KeyboardHookEvent| {}) {
                    let _ = hook.unsubscribe(sub);
                    churned.fetch_add(1, Ordering::Relaxed);
                }
            });
            while churned.load(Ordering::Relaxed) == 0 {
                thread::yield_now();
            }

            for time in 0..EVENTS {
                engine.inject(key_pressed(KeyCode::A, time as u64));
            }

            let late = Arc::new(AtomicUsize::new(0));
            let counter = late.clone();
            hook.on_key_pressed(move |_: &KeyboardHookEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
            engine.inject(key_pressed(KeyCode::A, EVENTS as u64));

            // Stop is queued behind every injected event.
            hook.dispose().unwrap();
            assert!(finish(task).is_ok());
            assert!(late.load(Ordering::SeqCst) >= 1);
        });

        assert_eq!(kept.load(Ordering::SeqCst), EVENTS + 1);
        assert_eq!(removed.load(Ordering::SeqCst), 0);
        assert!(churned.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_thread_uses_configured_name() {
        let engine = Arc::new(ScriptedEngine::new());
        let hook = GlobalHook::with_options(
            engine.clone(),
            HookOptions {
                thread_name: "hook-under-test".into(),
                stack_size: Some(256 * 1024),
            },
        );
        let name = Arc::new(Mutex::new(None));
        let slot = name.clone();
        hook.on_hook_enabled(move |_: &HookEvent| {
            *slot.lock().unwrap() = thread::current().name().map(str::to_owned);
        })
        .unwrap();

        let task = hook.start().unwrap();
        assert!(engine.wait_until_running(WAIT));
        hook.dispose().unwrap();
        assert!(finish(task).is_ok());
        assert_eq!(name.lock().unwrap().as_deref(), Some("hook-under-test"));
    }
}
