use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenceError {
    /// The backend could not drive the GPU to the requested value.
    #[error("wait for fence {value} failed (completed {completed}): {reason}")]
    WaitFailed {
        value: u64,
        completed: u64,
        reason: String,
    },
}

/// CPU view of a GPU completion counter.
///
/// Values only move forward. `0` means "never signaled".
pub trait GpuFence: Send + Sync {
    /// Asks the GPU to set the counter to `value` once all work submitted so
    /// far has finished.
    fn signal(&self, value: u64);

    /// Highest value the GPU has reached.
    fn completed_value(&self) -> u64;

    /// Blocks the calling thread until `completed_value() >= value`.
    ///
    /// Returns only once the value is reached, or with an error if the
    /// backend can no longer make progress.
    fn wait_for(&self, value: u64) -> Result<(), FenceError>;
}

#[derive(Debug, Default)]
struct ManualState {
    completed: u64,
    pending: VecDeque<u64>,
}

#[derive(Debug, Default)]
struct ManualInner {
    state: Mutex<ManualState>,
    cond: Condvar,
}

/// Fence whose completion is driven by hand.
///
/// Signals queue up in order; `complete_next` plays the role of the GPU
/// finishing the oldest outstanding submission. Cloning shares the counter, so
/// another thread can inject completions while the frame loop is blocked in
/// [`GpuFence::wait_for`].
#[derive(Debug, Clone, Default)]
pub struct ManualFence {
    inner: Arc<ManualInner>,
}

impl ManualFence {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Completes the oldest outstanding signal. Returns the new completed
    /// value, or `None` if nothing was pending.
    pub fn complete_next(&self) -> Option<u64> {
        let mut state = self.lock();
        let value = state.pending.pop_front()?;
        state.completed = state.completed.max(value);
        let completed = state.completed;
        drop(state);
        self.inner.cond.notify_all();
        Some(completed)
    }

    /// Completes every outstanding signal up to and including `value`.
    pub fn complete_up_to(&self, value: u64) {
        let mut state = self.lock();
        while state.pending.front().is_some_and(|&v| v <= value) {
            state.pending.pop_front();
        }
        state.completed = state.completed.max(value);
        drop(state);
        self.inner.cond.notify_all();
    }

    /// Completes everything signaled so far.
    pub fn complete_all(&self) {
        let mut state = self.lock();
        if let Some(last) = state.pending.drain(..).max() {
            state.completed = state.completed.max(last);
        }
        drop(state);
        self.inner.cond.notify_all();
    }

    /// Number of signals not yet completed.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }
}

impl GpuFence for ManualFence {
    fn signal(&self, value: u64) {
        self.lock().pending.push_back(value);
    }

    fn completed_value(&self) -> u64 {
        self.lock().completed
    }

    fn wait_for(&self, value: u64) -> Result<(), FenceError> {
        let mut state = self.lock();
        while state.completed < value {
            state = self
                .inner
                .cond
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn completes_in_signal_order() {
        let fence = ManualFence::new();
        fence.signal(1);
        fence.signal(2);
        assert_eq!(fence.completed_value(), 0);
        assert_eq!(fence.complete_next(), Some(1));
        assert_eq!(fence.complete_next(), Some(2));
        assert_eq!(fence.complete_next(), None);
    }

    #[test]
    fn complete_up_to_drops_older_signals() {
        let fence = ManualFence::new();
        for v in 1..=4 {
            fence.signal(v);
        }
        fence.complete_up_to(3);
        assert_eq!(fence.completed_value(), 3);
        assert_eq!(fence.pending(), 1);
    }

    #[test]
    fn wait_returns_immediately_when_reached() {
        let fence = ManualFence::new();
        fence.signal(5);
        fence.complete_all();
        assert_eq!(fence.wait_for(5), Ok(()));
        assert_eq!(fence.wait_for(0), Ok(()));
    }

    #[test]
    fn wait_unblocks_on_completion_from_other_thread() {
        let fence = ManualFence::new();
        fence.signal(1);

        let (tx, rx) = mpsc::channel();
        let waiter = fence.clone();
        let handle = thread::spawn(move || {
            let result = waiter.wait_for(1);
            tx.send(result).ok();
        });

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        fence.complete_next();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(Ok(())));
        handle.join().ok();
    }
}
