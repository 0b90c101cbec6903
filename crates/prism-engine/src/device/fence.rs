use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::gpu::{FenceError, GpuFence};

/// Fence backed by `Queue::on_submitted_work_done`.
///
/// `signal(v)` registers a callback that raises the completed counter to `v`
/// once everything submitted before the call has finished. Waiting blocks in
/// `Device::poll` until the queue drains, which also runs the callbacks.
#[derive(Clone)]
pub struct WgpuFence {
    device: wgpu::Device,
    queue: wgpu::Queue,
    completed: Arc<AtomicU64>,
}

impl WgpuFence {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            completed: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl GpuFence for WgpuFence {
    fn signal(&self, value: u64) {
        let completed = Arc::clone(&self.completed);
        self.queue.on_submitted_work_done(move || {
            completed.fetch_max(value, Ordering::AcqRel);
        });
    }

    fn completed_value(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    fn wait_for(&self, value: u64) -> Result<(), FenceError> {
        while self.completed.load(Ordering::Acquire) < value {
            let status = self
                .device
                .poll(wgpu::PollType::wait_indefinitely())
                .map_err(|e| FenceError::WaitFailed {
                    value,
                    completed: self.completed.load(Ordering::Acquire),
                    reason: e.to_string(),
                })?;
            // An empty queue with the counter still behind means the signal
            // for `value` was never submitted.
            if status.is_queue_empty() && self.completed.load(Ordering::Acquire) < value {
                return Err(FenceError::WaitFailed {
                    value,
                    completed: self.completed.load(Ordering::Acquire),
                    reason: "queue idle before fence was reached".to_string(),
                });
            }
        }
        Ok(())
    }
}
