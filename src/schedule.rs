//! Periodic schedules for the quiz timer.
//!
//! A [`Scheduler`] hands out a [`ScheduleHandle`] for every repeating schedule
//! it starts. The widget keeps at most one handle and cancels it before
//! starting another, so a well-behaved widget never has two schedules alive.
//!
//! Two implementations ship with the crate:
//!
//! - [`TagScheduler`] drives the bubbletea runtime. It does not own any thread;
//!   it only tracks which tag is current so that tick messages from a cancelled
//!   schedule can be rejected, the same way the spinner and timer components
//!   reject stale ticks.
//! - [`ManualScheduler`] records every start and cancel for assertions in tests.

use std::collections::BTreeSet;
use std::time::Duration;

/// Identifies one repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    /// Wraps a raw handle value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Starts and cancels repeating schedules.
pub trait Scheduler {
    /// Begins a schedule that fires every `interval`.
    fn start(&mut self, interval: Duration) -> ScheduleHandle;

    /// Stops the schedule identified by `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: ScheduleHandle);
}

/// Tag-based schedule bookkeeping for message-driven runtimes.
#[derive(Debug, Clone, Default)]
pub struct TagScheduler {
    next_tag: u64,
    active: Option<ScheduleHandle>,
    interval: Duration,
}

impl TagScheduler {
    /// Creates a scheduler with no active schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `handle` is the schedule currently running.
    pub fn is_active(&self, handle: ScheduleHandle) -> bool {
        self.active == Some(handle)
    }

    /// The schedule currently running, if any.
    pub fn active(&self) -> Option<ScheduleHandle> {
        self.active
    }

    /// Interval of the most recently started schedule.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Scheduler for TagScheduler {
    fn start(&mut self, interval: Duration) -> ScheduleHandle {
        // Tags start at 1 so that 0 can never match a live schedule.
        self.next_tag += 1;
        let handle = ScheduleHandle(self.next_tag);
        self.active = Some(handle);
        self.interval = interval;
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if self.active == Some(handle) {
            self.active = None;
        }
    }
}

/// A scheduler that only records what was asked of it.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: u64,
    active: BTreeSet<ScheduleHandle>,
    starts: Vec<(ScheduleHandle, Duration)>,
    cancels: Vec<ScheduleHandle>,
    max_active: usize,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles started and not yet cancelled.
    pub fn active(&self) -> Vec<ScheduleHandle> {
        self.active.iter().copied().collect()
    }

    /// Returns true if `handle` has been started and not cancelled.
    pub fn is_active(&self, handle: ScheduleHandle) -> bool {
        self.active.contains(&handle)
    }

    /// Every schedule started so far, with its interval.
    pub fn starts(&self) -> &[(ScheduleHandle, Duration)] {
        &self.starts
    }

    /// Every cancellation so far, in order.
    pub fn cancels(&self) -> &[ScheduleHandle] {
        &self.cancels
    }

    /// The largest number of schedules that were ever active at once.
    pub fn max_active(&self) -> usize {
        self.max_active
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) -> ScheduleHandle {
        self.next += 1;
        let handle = ScheduleHandle(self.next);
        self.active.insert(handle);
        self.starts.push((handle, interval));
        self.max_active = self.max_active.max(self.active.len());
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if self.active.remove(&handle) {
            self.cancels.push(handle);
        }
    }
}
