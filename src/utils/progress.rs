//! Progress reporting of [BatchDispatcher](crate::dispatch::BatchDispatcher).
//!
//! Progress is advisory only. Observers are called from the dispatching task between batches, never concurrently.

use log::info;

/// How many prompts of a dispatch have been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub dispatched: usize,
    pub total: usize,
}

impl Progress {
    #[inline]
    pub fn is_done(&self) -> bool {
        self.dispatched == self.total
    }
}

/// Trait for observing the progress of a dispatch.
pub trait ObserveProgress {
    fn on_progress(&self, progress: Progress);
}

/// Blanket impl of ObserveProgress for Fn(Progress).
impl<F> ObserveProgress for F where F: Fn(Progress) {
    fn on_progress(&self, progress: Progress) {
        self(progress)
    }
}

/// Forwards progress to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ObserveProgress for LogProgress {
    fn on_progress(&self, progress: Progress) {
        info!("dispatched {}/{} prompts", progress.dispatched, progress.total);
    }
}

#[cfg(test)]
mod test_progress {
    use std::sync::Mutex;
    use super::{ObserveProgress, Progress};

    #[test]
    fn test_closure_impl() {
        let seen = Mutex::new(Vec::new());
        let observer = |p: Progress| seen.lock().unwrap().push(p);
        observer.on_progress(Progress { dispatched: 0, total: 2 });
        observer.on_progress(Progress { dispatched: 2, total: 2 });
        let seen = seen.into_inner().unwrap();
        assert!(!seen[0].is_done());
        assert!(seen[1].is_done());
    }
}
