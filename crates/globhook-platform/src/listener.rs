//! Process-wide rdev listener.
//!
//! `rdev::listen` blocks its thread forever and cannot be cancelled, so this
//! module uses a SINGLETON pattern: one listener thread is started on first
//! use and fans every event out to the currently registered subscribers.
//! Engines subscribe for the duration of a run and unsubscribe on drop.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use globhook_core::UioHookResult;
use rdev::{Event, ListenError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, trace};

static GLOBAL_LISTENER: OnceLock<Arc<GlobalListener>> = OnceLock::new();

/// Thread-safe list of event subscribers plus the listener outcome.
struct GlobalListener {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Sender<Event>)>>,
    /// Set once if `rdev::listen` returned an error.
    failure: Mutex<Option<UioHookResult>>,
}

impl GlobalListener {
    fn new() -> Arc<Self> {
        let listener = Arc::new(Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        });

        let broadcast = listener.clone();
        let spawned = thread::Builder::new()
            .name("globhook-rdev-listener".into())
            .spawn(move || {
                info!("Global rdev listener thread starting");
                let fan_out = broadcast.clone();
                if let Err(e) = rdev::listen(move |event| fan_out.broadcast(event)) {
                    error!(error = ?e, "rdev listener failed");
                    broadcast.fail(listen_error_code(&e));
                }
                info!("Global rdev listener thread exiting");
            });

        if let Err(e) = spawned {
            error!(error = %e, "Failed to spawn rdev listener thread");
            listener.fail(UioHookResult::Failure);
        }
        listener
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Sender<Event>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, event: Event) {
        let mut subs = self.subscribers();
        subs.retain(|(id, tx)| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!(id, "Subscriber channel full, dropping event");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Record the failure and disconnect every subscriber.
    fn fail(&self, code: UioHookResult) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(code);
        self.subscribers().clear();
    }

    fn failure(&self) -> Option<UioHookResult> {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribe(&self, capacity: usize) -> (u64, Receiver<Event>) {
        let (tx, rx) = bounded(capacity);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // Registered under the same lock `fail` clears, so a subscriber can
        // never be added after the failure was recorded without seeing it.
        let mut subs = self.subscribers();
        if self.failure().is_none() {
            subs.push((id, tx));
        }
        debug!(id, "rdev listener subscriber added");
        (id, rx)
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers().retain(|(sub_id, _)| *sub_id != id);
        debug!(id, "rdev listener subscriber removed");
    }
}

/// Get or create the global listener.
fn global_listener() -> Arc<GlobalListener> {
    GLOBAL_LISTENER.get_or_init(GlobalListener::new).clone()
}

/// Why a subscription stopped yielding events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    Timeout,
    /// The listener failed; carries the mapped result code.
    Failed(UioHookResult),
}

/// A subscription to the global listener. Unsubscribes on drop.
pub struct ListenerSubscription {
    id: u64,
    receiver: Receiver<Event>,
    listener: Arc<GlobalListener>,
}

impl ListenerSubscription {
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => Err(RecvError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(RecvError::Failed(
                self.listener.failure().unwrap_or(UioHookResult::Failure),
            )),
        }
    }
}

impl Drop for ListenerSubscription {
    fn drop(&mut self) {
        self.listener.unsubscribe(self.id);
    }
}

/// Subscribe to global rdev events, starting the listener on first use.
pub fn subscribe(capacity: usize) -> ListenerSubscription {
    let listener = global_listener();
    let (id, receiver) = listener.subscribe(capacity);
    ListenerSubscription {
        id,
        receiver,
        listener,
    }
}

/// Map an rdev listen failure onto the closest native result code.
fn listen_error_code(error: &ListenError) -> UioHookResult {
    #[allow(unreachable_patterns)]
    match error {
        ListenError::MissingDisplayError => UioHookResult::ErrorXOpenDisplay,
        ListenError::XRecordExtensionError => UioHookResult::ErrorXRecordNotFound,
        ListenError::RecordContextError => UioHookResult::ErrorXRecordCreateContext,
        ListenError::RecordContextEnablingError => UioHookResult::ErrorXRecordEnableContext,
        ListenError::EventTapError => UioHookResult::ErrorCreateEventPort,
        ListenError::LoopSourceError => UioHookResult::ErrorCreateRunLoopSource,
        ListenError::KeyHookError(_) | ListenError::MouseHookError(_) => {
            UioHookResult::ErrorSetWindowsHookEx
        }
        _ => UioHookResult::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdev::EventType;
    use std::time::SystemTime;

    // Exercise the fan-out without starting the real listener thread.
    fn detached() -> Arc<GlobalListener> {
        Arc::new(GlobalListener {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        })
    }

    fn event() -> Event {
        Event {
            time: SystemTime::now(),
            name: None,
            event_type: EventType::MouseMove { x: 1.0, y: 2.0 },
        }
    }

    #[test]
    fn test_broadcast_reaches_every_subscriber() {
        let listener = detached();
        let (_, a) = listener.subscribe(4);
        let (_, b) = listener.subscribe(4);

        listener.broadcast(event());
        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_ok());
    }

    #[test]
    fn test_full_subscriber_is_kept_and_dropped_receiver_removed() {
        let listener = detached();
        let (_, full) = listener.subscribe(1);
        let (_, gone) = listener.subscribe(1);
        drop(gone);

        listener.broadcast(event());
        listener.broadcast(event());
        assert_eq!(listener.subscribers().len(), 1);
        assert_eq!(full.len(), 1);
    }

    #[test]
    fn test_failure_disconnects_with_code() {
        let listener = detached();
        let (id, receiver) = listener.subscribe(4);
        let subscription = ListenerSubscription {
            id,
            receiver,
            listener: listener.clone(),
        };

        listener.fail(UioHookResult::ErrorXOpenDisplay);
        assert_eq!(
            subscription.recv_timeout(Duration::from_millis(10)).unwrap_err(),
            RecvError::Failed(UioHookResult::ErrorXOpenDisplay)
        );

        let (_, late) = listener.subscribe(4);
        assert!(late.try_recv().is_err());
        assert!(listener.subscribers().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listener = detached();
        let (id, receiver) = listener.subscribe(4);
        let subscription = ListenerSubscription {
            id,
            receiver,
            listener: listener.clone(),
        };
        assert_eq!(listener.subscribers().len(), 1);
        drop(subscription);
        assert!(listener.subscribers().is_empty());
    }
}
