use std::time::Duration;

use crate::scheduler::{Scheduler, TaskId};

pub const SLIDESHOW_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowState {
    Idle,
    Running(TaskId),
}

/// Hover/focus slideshow over one card's media list.
///
/// Exactly one timer is live while running. Deactivating always returns to
/// the first media item; reactivating starts over from there.
#[derive(Debug)]
pub struct Slideshow {
    len: usize,
    index: usize,
    state: SlideshowState,
    interval: Duration,
}

impl Slideshow {
    /// Only lists with more than one item get a slideshow.
    pub fn new(len: usize) -> Option<Self> {
        Self::with_interval(len, SLIDESHOW_INTERVAL)
    }

    pub fn with_interval(len: usize, interval: Duration) -> Option<Self> {
        if len < 2 {
            return None;
        }
        Some(Slideshow {
            len,
            index: 0,
            state: SlideshowState::Idle,
            interval,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SlideshowState::Running(_))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Pointer enter or focus in. Returns `false` if already running.
    pub fn activate(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.is_running() {
            return false;
        }
        let task = scheduler.every(self.interval);
        self.state = SlideshowState::Running(task);
        true
    }

    /// Pointer leave or focus out. Returns `false` if it was idle.
    pub fn deactivate(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        let SlideshowState::Running(task) = self.state else {
            return false;
        };
        scheduler.cancel(task);
        self.state = SlideshowState::Idle;
        self.index = 0;
        true
    }

    /// Advance on our own timer. Returns the new index, or `None` for a
    /// foreign or stale task.
    pub fn on_timer(&mut self, task: TaskId) -> Option<usize> {
        match self.state {
            SlideshowState::Running(own) if own == task => {
                self.index = (self.index + 1) % self.len;
                Some(self.index)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    #[test]
    fn test_single_item_has_no_slideshow() {
        assert!(Slideshow::new(0).is_none());
        assert!(Slideshow::new(1).is_none());
        assert!(Slideshow::new(2).is_some());
    }

    #[test]
    fn test_cycles_and_wraps() {
        let mut sched = ManualScheduler::new();
        let mut show = Slideshow::new(3).unwrap();
        assert!(show.activate(&mut sched));

        let mut seen = vec![show.index()];
        for task in sched.advance(SLIDESHOW_INTERVAL * 3) {
            seen.push(show.on_timer(task).unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_activation_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let mut show = Slideshow::new(3).unwrap();
        assert!(show.activate(&mut sched));
        assert!(!show.activate(&mut sched));
        assert_eq!(sched.live_count(), 1);

        assert!(show.deactivate(&mut sched));
        assert!(!show.deactivate(&mut sched));
        assert_eq!(sched.live_count(), 0);
    }

    #[test]
    fn test_deactivate_resets_and_stops() {
        let mut sched = ManualScheduler::new();
        let mut show = Slideshow::new(4).unwrap();
        show.activate(&mut sched);
        let fired = sched.advance(SLIDESHOW_INTERVAL * 2);
        for t in &fired {
            show.on_timer(*t);
        }
        assert_eq!(show.index(), 2);

        show.deactivate(&mut sched);
        assert_eq!(show.index(), 0);
        assert_eq!(show.state(), SlideshowState::Idle);
        assert!(sched.advance(SLIDESHOW_INTERVAL * 5).is_empty());
        // a stale id from the old run is ignored
        assert_eq!(show.on_timer(fired[0]), None);
    }

    #[test]
    fn test_reactivation_restarts_from_first() {
        let mut sched = ManualScheduler::new();
        let mut show = Slideshow::new(3).unwrap();
        show.activate(&mut sched);
        for t in sched.advance(SLIDESHOW_INTERVAL) {
            show.on_timer(t);
        }
        show.deactivate(&mut sched);
        show.activate(&mut sched);
        assert_eq!(show.index(), 0);
        let next: Vec<usize> = sched
            .advance(SLIDESHOW_INTERVAL)
            .into_iter()
            .filter_map(|t| show.on_timer(t))
            .collect();
        assert_eq!(next, vec![1]);
    }
}
