use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Single-permit slot recording whether a run is active.
///
/// Owned by the caller; there is no process-wide state. The guard releases the
/// slot on drop, including when the worker unwinds.
#[derive(Default)]
pub struct RunSlot {
    state: Arc<SlotState>,
}

#[derive(Default)]
struct SlotState {
    active: Mutex<bool>,
    condition: Condvar,
}

pub struct RunGuard {
    state: Arc<SlotState>,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot, or returns `None` when a run is already active.
    pub fn try_acquire(&self) -> Option<RunGuard> {
        let mut active = self.state.active.lock();
        if *active {
            return None;
        }
        *active = true;
        Some(RunGuard {
            state: Arc::clone(&self.state),
        })
    }

    pub fn is_active(&self) -> bool {
        *self.state.active.lock()
    }

    /// Blocks until no run holds the slot.
    pub fn wait_idle(&self) {
        let mut active = self.state.active.lock();
        self.state.condition.wait_while(&mut active, |active| *active);
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut active = self.state.active.lock();
        *active = false;
        self.state.condition.notify_all();
    }
}
