//! Algorithm lifecycle and cancellation.
//!
//! Every algorithm owns an [`AlgorithmLifecycle`] and brackets its work with
//! [`begin`](AlgorithmLifecycle::begin) and [`end`](AlgorithmLifecycle::end):
//!
//! ```text
//! NotRunning -> Running -> Finished
//!                  |
//!                  +-> PendingAbortion -> Aborted
//! ```
//!
//! `begin` resets the cancellation token and raises `Started` then
//! `StateChanged`. [`abort`](AlgorithmLifecycle::abort) only has an effect
//! while `Running`: it flags the token and moves to `PendingAbortion`. `end`
//! always resets the token and raises the terminal event then
//! `StateChanged`.
//!
//! Events are delivered synchronously on the thread causing the transition.
//! An [`AbortHandle`] can be moved to another thread or captured by an
//! observer to stop a running computation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use graphwalk_common::{CancellationToken, Error, Result};
use parking_lot::Mutex;
use serde::Serialize;

/// Where a computation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComputeState {
    /// Not started, or ready to start again.
    NotRunning,
    /// Inside `compute`.
    Running,
    /// Abort requested; the algorithm has not noticed yet.
    PendingAbortion,
    /// Completed normally.
    Finished,
    /// Stopped early by cancellation. Results are partial.
    Aborted,
}

impl ComputeState {
    fn to_u8(self) -> u8 {
        match self {
            ComputeState::NotRunning => 0,
            ComputeState::Running => 1,
            ComputeState::PendingAbortion => 2,
            ComputeState::Finished => 3,
            ComputeState::Aborted => 4,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ComputeState::Running,
            2 => ComputeState::PendingAbortion,
            3 => ComputeState::Finished,
            4 => ComputeState::Aborted,
            _ => ComputeState::NotRunning,
        }
    }

    /// Returns true for `Finished` and `Aborted`.
    pub fn is_terminal(self) -> bool {
        matches!(self, ComputeState::Finished | ComputeState::Aborted)
    }
}

/// A lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The computation entered `Running`.
    Started,
    /// The computation ended in `Finished`.
    Finished,
    /// The computation ended in `Aborted`.
    Aborted,
    /// The state changed; carries the new state.
    StateChanged(ComputeState),
}

/// Handle for removing a lifecycle listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LifecycleListenerId(u64);

type LifecycleListener = Arc<dyn Fn(&LifecycleEvent) + Send + Sync>;

struct Shared {
    name: &'static str,
    state: AtomicU8,
    cancel: CancellationToken,
    next_listener: AtomicU64,
    listeners: Mutex<Vec<(LifecycleListenerId, LifecycleListener)>>,
}

impl Shared {
    fn state(&self) -> ComputeState {
        ComputeState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ComputeState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    fn raise(&self, event: LifecycleEvent) {
        // Snapshot so a listener may call abort() or subscribe without deadlock.
        let listeners: Vec<LifecycleListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    fn transition(&self, from: ComputeState, to: ComputeState) -> bool {
        self.state
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn abort(&self) {
        if self.transition(ComputeState::Running, ComputeState::PendingAbortion) {
            self.cancel.cancel();
            tracing::debug!(algorithm = self.name, "abort requested");
            self.raise(LifecycleEvent::StateChanged(ComputeState::PendingAbortion));
        }
    }
}

/// Lifecycle state machine owned by one algorithm instance.
pub struct AlgorithmLifecycle {
    shared: Arc<Shared>,
}

impl AlgorithmLifecycle {
    /// Creates a lifecycle in `NotRunning` with a fresh cancellation token.
    pub fn new(name: &'static str) -> Self {
        Self::with_cancellation(name, CancellationToken::new())
    }

    /// Creates a lifecycle that polls the given token.
    pub fn with_cancellation(name: &'static str, cancel: CancellationToken) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                state: AtomicU8::new(ComputeState::NotRunning.to_u8()),
                cancel,
                next_listener: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Name used in log output.
    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// Current state.
    pub fn state(&self) -> ComputeState {
        self.shared.state()
    }

    /// The token algorithms poll.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.shared.cancel
    }

    /// Requests cancellation if running. Idempotent.
    pub fn abort(&self) {
        self.shared.abort();
    }

    /// A cloneable, thread-safe handle that can abort this computation.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Registers a listener for lifecycle events.
    pub fn subscribe(
        &self,
        listener: impl Fn(&LifecycleEvent) + Send + Sync + 'static,
    ) -> LifecycleListenerId {
        let id = LifecycleListenerId(self.shared.next_listener.fetch_add(1, Ordering::Relaxed));
        self.shared.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: LifecycleListenerId) -> bool {
        let mut listeners = self.shared.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(entry, _)| *entry != id);
        listeners.len() != before
    }

    /// Enters `Running` and returns the token to poll.
    ///
    /// A finished or aborted instance first returns to `NotRunning`.
    /// Calling this while running fails with [`Error::InvalidOperation`].
    pub fn begin(&self) -> Result<CancellationToken> {
        let shared = &self.shared;
        let current = shared.state();
        if current.is_terminal() {
            shared.set_state(ComputeState::NotRunning);
        } else if current != ComputeState::NotRunning {
            return Err(Error::invalid_operation(format!(
                "{} cannot compute while {:?}",
                shared.name, current
            )));
        }

        shared.cancel.reset();
        shared.set_state(ComputeState::Running);
        tracing::debug!(algorithm = shared.name, "computation started");
        shared.raise(LifecycleEvent::Started);
        shared.raise(LifecycleEvent::StateChanged(ComputeState::Running));
        Ok(shared.cancel.clone())
    }

    /// Leaves `Running` or `PendingAbortion` and returns the terminal state.
    ///
    /// A token flagged directly (without going through `abort`) also ends
    /// the computation as `Aborted`.
    pub fn end(&self) -> ComputeState {
        let shared = &self.shared;
        // Decide and store the terminal state in one step, so an abort
        // racing with completion either lands before it or not at all.
        let state = loop {
            let current = shared.state();
            let target = match current {
                ComputeState::Running if !shared.cancel.is_cancelling() => ComputeState::Finished,
                ComputeState::Running | ComputeState::PendingAbortion => ComputeState::Aborted,
                other => return other,
            };
            if shared.transition(current, target) {
                break target;
            }
        };
        shared.cancel.reset();

        let event = if state == ComputeState::Aborted {
            LifecycleEvent::Aborted
        } else {
            LifecycleEvent::Finished
        };
        tracing::debug!(algorithm = shared.name, ?state, "computation ended");
        shared.raise(event);
        shared.raise(LifecycleEvent::StateChanged(state));
        state
    }

    /// Runs `body` between [`begin`](Self::begin) and [`end`](Self::end).
    ///
    /// `end` runs even when `body` fails; the error is returned afterwards.
    pub fn run<T>(&self, body: impl FnOnce(&CancellationToken) -> Result<T>) -> Result<T> {
        let cancel = self.begin()?;
        let outcome = body(&cancel);
        self.end();
        outcome
    }
}

impl std::fmt::Debug for AlgorithmLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmLifecycle")
            .field("name", &self.shared.name)
            .field("state", &self.state())
            .finish()
    }
}

/// Thread-safe handle for aborting a computation.
#[derive(Clone)]
pub struct AbortHandle {
    shared: Arc<Shared>,
}

impl AbortHandle {
    /// Requests cancellation if the computation is running.
    pub fn abort(&self) {
        self.shared.abort();
    }

    /// Current state of the computation this handle belongs to.
    pub fn state(&self) -> ComputeState {
        self.shared.state()
    }
}

impl std::fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortHandle")
            .field("algorithm", &self.shared.name)
            .finish()
    }
}
