use crate::gpu::{FenceError, GpuFence};

use super::resource::{FrameResource, FrameState};
use super::sizing::RingConfig;

/// Rotating set of frame resources guarded by a GPU fence.
///
/// Frame loop contract:
/// 1. [`advance`](Self::advance) to the next slot (may block)
/// 2. rewrite every buffer of [`current_mut`](Self::current_mut)
/// 3. record and submit GPU work that reads those buffers
/// 4. [`submit`](Self::submit) to stamp the slot with a new fence value
pub struct FrameRing<F: GpuFence> {
    frames: Vec<FrameResource>,
    current: usize,
    fence: F,
    last_signaled: u64,
    stalls: u64,
}

impl<F: GpuFence> FrameRing<F> {
    pub fn new(config: RingConfig, fence: F) -> Self {
        let count = config.frame_count.max(1);
        if count != config.frame_count {
            log::warn!("frame ring: frame_count {} raised to 1", config.frame_count);
        }

        let frames = (0..count)
            .map(|_| FrameResource::new(&config.sizing))
            .collect();

        log::debug!("frame ring: {} frame resources allocated", count);

        Self {
            frames,
            current: 0,
            fence,
            last_signaled: 0,
            stalls: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &FrameResource {
        &self.frames[self.current]
    }

    pub fn current_mut(&mut self) -> &mut FrameResource {
        &mut self.frames[self.current]
    }

    pub fn frame(&self, index: usize) -> Option<&FrameResource> {
        self.frames.get(index)
    }

    pub fn fence(&self) -> &F {
        &self.fence
    }

    /// Last fence value handed to the GPU; `0` before the first submission.
    pub fn last_signaled(&self) -> u64 {
        self.last_signaled
    }

    /// How many times `advance` had to wait for the GPU.
    pub fn stall_count(&self) -> u64 {
        self.stalls
    }

    pub fn state_of(&self, index: usize) -> Option<FrameState> {
        let completed = self.fence.completed_value();
        self.frames.get(index).map(|f| f.state(completed))
    }

    /// Moves to the next slot and blocks until the GPU is done with it.
    ///
    /// Returns the new slot index. On `Ok` the slot is `Idle`; an error means
    /// the slot may still be read by the GPU and must not be written.
    pub fn advance(&mut self) -> Result<usize, FenceError> {
        self.current = (self.current + 1) % self.frames.len();

        let pending = self.frames[self.current].fence_value();
        if pending != 0 && self.fence.completed_value() < pending {
            self.stalls += 1;
            log::trace!(
                "frame ring: slot {} waiting for fence {} (completed {})",
                self.current,
                pending,
                self.fence.completed_value()
            );
            self.fence.wait_for(pending)?;
        }

        Ok(self.current)
    }

    /// Stamps the current slot with the next fence value and signals it.
    ///
    /// Call right after the GPU work for this slot has been submitted.
    pub fn submit(&mut self) -> u64 {
        self.last_signaled += 1;
        let value = self.last_signaled;
        self.frames[self.current].set_fence_value(value);
        self.fence.signal(value);
        value
    }

    /// Blocks until every submission so far has completed.
    pub fn wait_idle(&self) -> Result<(), FenceError> {
        if self.last_signaled != 0 {
            self.fence.wait_for(self.last_signaled)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameResourceSizing;
    use crate::gpu::ManualFence;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn small_config(frame_count: usize) -> RingConfig {
        RingConfig {
            frame_count,
            sizing: FrameResourceSizing {
                pass_count: 1,
                max_instance_count: 1,
                material_count: 1,
                render_item_count: 1,
                gui_slot_count: 1,
                gui_vertex_capacity: 4,
                text_vertex_capacity: 4,
            },
        }
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn advance_wraps_around() {
        let mut ring = FrameRing::new(small_config(3), ManualFence::new());
        assert_eq!(ring.current_index(), 0);
        assert_eq!(ring.advance(), Ok(1));
        assert_eq!(ring.advance(), Ok(2));
        assert_eq!(ring.advance(), Ok(0));
        assert_eq!(ring.stall_count(), 0);
    }

    #[test]
    fn zero_frame_count_is_raised_to_one() {
        let mut ring = FrameRing::new(small_config(0), ManualFence::new());
        assert_eq!(ring.frame_count(), 1);
        assert_eq!(ring.advance(), Ok(0));
    }

    // ── fencing ───────────────────────────────────────────────────────────

    #[test]
    fn submit_stamps_increasing_fence_values() {
        let fence = ManualFence::new();
        let mut ring = FrameRing::new(small_config(3), fence.clone());
        assert_eq!(ring.submit(), 1);
        ring.advance().unwrap();
        assert_eq!(ring.submit(), 2);
        assert_eq!(ring.frame(0).map(|f| f.fence_value()), Some(1));
        assert_eq!(ring.frame(1).map(|f| f.fence_value()), Some(2));
        assert_eq!(fence.pending(), 2);
    }

    #[test]
    fn submitted_slot_is_in_flight_until_completed() {
        let fence = ManualFence::new();
        let mut ring = FrameRing::new(small_config(2), fence.clone());
        ring.submit();
        assert_eq!(ring.state_of(0), Some(FrameState::InFlight));
        assert_eq!(ring.state_of(1), Some(FrameState::Idle));
        fence.complete_next();
        assert_eq!(ring.state_of(0), Some(FrameState::Idle));
    }

    #[test]
    fn advance_does_not_wait_on_completed_slot() {
        let fence = ManualFence::new();
        let mut ring = FrameRing::new(small_config(2), fence.clone());
        ring.submit();
        ring.advance().unwrap();
        ring.submit();
        fence.complete_all();
        assert_eq!(ring.advance(), Ok(0));
        assert_eq!(ring.stall_count(), 0);
    }

    #[test]
    fn nth_advance_blocks_until_completion_is_injected() {
        const N: usize = 3;
        let fence = ManualFence::new();
        let mut ring = FrameRing::new(small_config(N), fence.clone());

        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            ring.submit();
            for i in 1..=N {
                let slot = ring.advance().unwrap();
                tx.send((i, slot)).ok();
                ring.submit();
            }
            ring
        });

        // The first N-1 advances land on never-submitted slots.
        for i in 1..N {
            let got = rx.recv_timeout(Duration::from_secs(5));
            assert_eq!(got, Ok((i, i)));
        }

        // The Nth advance returns to slot 0, still owned by the GPU.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        fence.complete_next();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok((N, 0)));

        let ring = handle.join().ok();
        assert_eq!(ring.map(|r| r.stall_count()), Some(1));
    }

    #[test]
    fn wait_idle_returns_after_all_completed() {
        let fence = ManualFence::new();
        let mut ring = FrameRing::new(small_config(3), fence.clone());
        ring.submit();
        ring.advance().unwrap();
        ring.submit();
        fence.complete_all();
        assert_eq!(ring.wait_idle(), Ok(()));
        assert_eq!(fence.completed_value(), 2);
    }

    /// Never completes; every wait fails.
    struct LostFence;

    impl GpuFence for LostFence {
        fn signal(&self, _value: u64) {}

        fn completed_value(&self) -> u64 {
            0
        }

        fn wait_for(&self, value: u64) -> Result<(), FenceError> {
            Err(FenceError::WaitFailed {
                value,
                completed: 0,
                reason: "device lost".to_string(),
            })
        }
    }

    #[test]
    fn failed_wait_is_reported_instead_of_handing_out_busy_slot() {
        let mut ring = FrameRing::new(small_config(1), LostFence);
        ring.submit();
        let err = ring.advance().unwrap_err();
        assert!(matches!(err, FenceError::WaitFailed { value: 1, .. }));
        assert_eq!(ring.stall_count(), 1);
        assert!(ring.wait_idle().is_err());
    }
}
