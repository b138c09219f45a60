//! Completion handle for a running hook.
//!
//! Bridges the blocking native run call back to the caller of `start`
//! without tying it to an async runtime: `HookTask` can be waited on from a
//! plain thread or awaited as a `Future`.

use crate::error::HookResult;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

#[derive(Default)]
struct TaskState {
    finished: bool,
    result: Option<HookResult<()>>,
    waker: Option<Waker>,
}

#[derive(Default)]
struct TaskShared {
    state: Mutex<TaskState>,
    done: Condvar,
}

impl TaskShared {
    fn lock(&self) -> MutexGuard<'_, TaskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves when the hook's run loop returns.
///
/// Resolves to `Ok(())` when the native run call returned success, or to the
/// error that ended the hook thread. Like other futures, polling it again
/// after it returned `Ready` panics.
#[must_use = "the task reports whether the hook ran successfully"]
pub struct HookTask {
    shared: Arc<TaskShared>,
}

/// Producer side of a [`HookTask`]. Only the first completion counts.
#[derive(Clone)]
pub(crate) struct TaskCompleter {
    shared: Arc<TaskShared>,
}

impl HookTask {
    pub(crate) fn new() -> (Self, TaskCompleter) {
        let shared = Arc::new(TaskShared::default());
        (
            HookTask {
                shared: shared.clone(),
            },
            TaskCompleter { shared },
        )
    }

    /// Whether the run loop has returned.
    pub fn is_finished(&self) -> bool {
        self.shared.lock().finished
    }

    /// Block the calling thread until the hook stops.
    pub fn wait(self) -> HookResult<()> {
        let mut state = self.shared.lock();
        while !state.finished {
            state = self
                .shared
                .done
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        take_result(&mut state)
    }

    /// Block for at most `timeout`. Gives the task back if it is still
    /// running.
    pub fn wait_timeout(self, timeout: Duration) -> Result<HookResult<()>, HookTask> {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.lock();
        while !state.finished {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                drop(state);
                return Err(self);
            }
            state = self
                .shared
                .done
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        Ok(take_result(&mut state))
    }
}

impl fmt::Debug for HookTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookTask")
            .field("finished", &self.is_finished())
            .finish()
    }
}

fn take_result(state: &mut TaskState) -> HookResult<()> {
    match state.result.take() {
        Some(result) => result,
        None => panic!("`HookTask` polled after completion"),
    }
}

impl Future for HookTask {
    type Output = HookResult<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.shared.lock();
        if state.finished {
            return Poll::Ready(take_result(&mut state));
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl TaskCompleter {
    pub(crate) fn complete(&self, result: HookResult<()>) {
        let waker = {
            let mut state = self.shared.lock();
            if state.finished {
                return;
            }
            state.finished = true;
            state.result = Some(result);
            state.waker.take()
        };
        self.shared.done.notify_all();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}
