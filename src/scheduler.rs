//! Timer abstraction for the slideshow and rotator state machines.
//!
//! Components ask a [`Scheduler`] for repeating or one-shot tasks and get a
//! [`TaskId`] back. Whoever drives the scheduler hands fired ids to the
//! components' `on_timer` methods. [`ManualScheduler`] is a virtual clock.

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

pub trait Scheduler {
    /// Start a task that fires every `period`, first after one period.
    fn every(&mut self, period: Duration) -> TaskId;
    /// Start a task that fires once after `delay`.
    fn once(&mut self, delay: Duration) -> TaskId;
    /// Cancel a task. Unknown or finished tasks are ignored.
    fn cancel(&mut self, task: TaskId);
    fn is_live(&self, task: TaskId) -> bool;
}

#[derive(Debug)]
struct Task {
    due: Duration,
    period: Option<Duration>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskId, Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.insert(
            id,
            Task {
                due: self.now + delay,
                period,
            },
        );
        id
    }

    /// Move the clock forward and return every firing in time order.
    /// A repeating task appears once per elapsed period.
    pub fn advance(&mut self, by: Duration) -> Vec<TaskId> {
        let target = self.now + by;
        let mut fired = Vec::new();

        loop {
            let next = self
                .tasks
                .iter()
                .filter(|(_, t)| t.due <= target)
                .min_by_key(|(id, t)| (t.due, **id))
                .map(|(id, t)| (*id, t.due, t.period));

            let Some((id, due, period)) = next else { break };
            self.now = due;
            fired.push(id);
            match period {
                Some(p) if !p.is_zero() => {
                    if let Some(task) = self.tasks.get_mut(&id) {
                        task.due = due + p;
                    }
                }
                _ => {
                    self.tasks.remove(&id);
                }
            }
        }

        self.now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration) -> TaskId {
        self.insert(period, Some(period))
    }

    fn once(&mut self, delay: Duration) -> TaskId {
        self.insert(delay, None)
    }

    fn cancel(&mut self, task: TaskId) {
        self.tasks.remove(&task);
    }

    fn is_live(&self, task: TaskId) -> bool {
        self.tasks.contains_key(&task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_repeating_task_fires_per_period() {
        let mut s = ManualScheduler::new();
        let t = s.every(ms(100));
        assert!(s.advance(ms(99)).is_empty());
        assert_eq!(s.advance(ms(1)), vec![t]);
        assert_eq!(s.advance(ms(250)), vec![t, t]);
        assert!(s.is_live(t));
    }

    #[test]
    fn test_once_task_fires_and_expires() {
        let mut s = ManualScheduler::new();
        let t = s.once(ms(50));
        assert_eq!(s.advance(ms(500)), vec![t]);
        assert!(!s.is_live(t));
        assert_eq!(s.live_count(), 0);
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut s = ManualScheduler::new();
        let t = s.every(ms(10));
        s.cancel(t);
        assert!(s.advance(ms(100)).is_empty());
        s.cancel(t);
    }

    #[test]
    fn test_firings_interleave_in_time_order() {
        let mut s = ManualScheduler::new();
        let slow = s.every(ms(30));
        let fast = s.once(ms(20));
        assert_eq!(s.advance(ms(60)), vec![fast, slow, slow]);
        assert_eq!(s.now(), ms(60));
    }
}
