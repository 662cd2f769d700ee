use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide mutual exclusion between crawl runs.
///
/// The scheduler and the manual trigger both go through `try_start`; whichever
/// one wins holds the [`RunPermit`] for the duration of the run. The flag is
/// released when the permit drops, so a failed run never leaves the guard
/// stuck in the running state.
pub struct RunGuard {
    running: AtomicBool,
}

impl RunGuard {
    pub const fn new() -> Self {
        RunGuard {
            running: AtomicBool::new(false),
        }
    }

    /// Attempt the `Idle -> Running` transition. Returns `None` if a run is
    /// already in flight; the rejected caller must not wait or retry.
    pub fn try_start(&self) -> Option<RunPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunPermit { guard: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for RunGuard {
    fn default() -> Self {
        RunGuard::new()
    }
}

pub struct RunPermit<'a> {
    guard: &'a RunGuard,
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}
