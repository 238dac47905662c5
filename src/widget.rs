//! The quiz timer core.
//!
//! [`QuizTimer`] counts up from the moment it starts, mirrors the elapsed
//! seconds into the quiz form and stands between the user and an accidental
//! submission. It owns its clock, scheduler and page elements, so it has no
//! global state and every collaborator can be swapped in tests.
//!
//! # Lifecycle
//!
//! ```text
//!            begin_submit               resolve_submit(true)
//!  Running ───────────────> Confirming ─────────────────────> Stopped
//!     ^                         │
//!     └─────────────────────────┘
//!         resolve_submit(false)
//! ```
//!
//! # Example
//!
//! ```rust
//! use quiztimer_widgets::clock::ManualClock;
//! use quiztimer_widgets::config::TimerConfig;
//! use quiztimer_widgets::elements::{Badge, PageElements};
//! use quiztimer_widgets::schedule::ManualScheduler;
//! use quiztimer_widgets::widget::{QuizTimer, SubmitOutcome};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut timer = QuizTimer::start(
//!     TimerConfig::default(),
//!     clock.clone(),
//!     ManualScheduler::new(),
//!     PageElements::default(),
//! )
//! .unwrap();
//!
//! clock.advance(Duration::from_secs(65));
//! let outcome = timer.submit(&mut |_: &str| true).unwrap();
//!
//! assert_eq!(outcome, SubmitOutcome::Proceed { elapsed_seconds: 65 });
//! assert_eq!(timer.elements().counter_text(), "01:05");
//! assert_eq!(timer.elements().badge(), Badge::Warning);
//! ```

use crate::clock::Clock;
use crate::config::TimerConfig;
use crate::elements::{Badge, ElementBindings};
use crate::error::{Error, Result};
use crate::format::format_elapsed;
use crate::schedule::{ScheduleHandle, Scheduler};
use std::fmt;
use std::time::Instant;

/// Where the timer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Counting, with a schedule active.
    Running,
    /// A submission is waiting on the user's answer; no schedule is active.
    Confirming,
    /// The quiz was submitted; counting has ended for good.
    Stopped,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Running => "running",
            State::Confirming => "confirming",
            State::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// What became of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user confirmed; the form goes out carrying `elapsed_seconds`.
    Proceed {
        /// Elapsed seconds written to the form at confirmation.
        elapsed_seconds: u64,
    },
    /// The user declined; the form stays and counting resumed.
    Cancelled,
}

/// A yes/no question put to the user.
///
/// Closures taking the message and returning the answer implement this trait.
pub trait Confirm {
    /// Shows `message` and returns true if the user agreed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Elapsed-time counter with guarded submission.
#[derive(Debug)]
pub struct QuizTimer<C, S, E> {
    config: TimerConfig,
    clock: C,
    scheduler: S,
    elements: E,
    started_at: Instant,
    schedule: Option<ScheduleHandle>,
    state: State,
    last_reading: u64,
    ready_label: String,
    unload_guard: bool,
}

impl<C, S, E> QuizTimer<C, S, E>
where
    C: Clock,
    S: Scheduler,
    E: ElementBindings,
{
    /// Validates `config`, records the start instant, paints the first
    /// reading and starts the repeating schedule.
    pub fn start(config: TimerConfig, clock: C, scheduler: S, elements: E) -> Result<Self> {
        config.validate()?;
        Ok(Self::launch(config, clock, scheduler, elements))
    }

    /// Starts a timer with the stock configuration, which is always valid.
    pub fn start_default(clock: C, scheduler: S, elements: E) -> Self {
        Self::launch(TimerConfig::default(), clock, scheduler, elements)
    }

    fn launch(config: TimerConfig, clock: C, scheduler: S, elements: E) -> Self {
        let started_at = clock.now();
        // The control keeps whatever label the page gave it; a declined
        // submission puts that label back.
        let ready_label = elements.submit_label().to_string();
        let mut timer = Self {
            config,
            clock,
            scheduler,
            elements,
            started_at,
            schedule: None,
            state: State::Running,
            last_reading: 0,
            ready_label,
            unload_guard: true,
        };
        timer.tick();
        timer.resume_schedule();
        log::debug!(
            "quiz timer started, ticking every {:?}",
            timer.config.interval()
        );
        timer
    }

    /// Whole seconds since the timer started.
    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed_since(self.started_at).as_secs()
    }

    /// Recomputes elapsed time and repaints the counter, badge and form field.
    pub fn tick(&mut self) {
        let elapsed = self.elapsed_seconds();
        let label = format_elapsed(elapsed);
        log::trace!("tick: {elapsed}s ({label})");

        self.elements.set_counter_text(&label);
        self.elements.set_elapsed_field(elapsed);
        self.elements
            .set_badge(Badge::for_elapsed(elapsed, self.config.warning_after_secs));
        self.last_reading = elapsed;
    }

    /// Handles a firing of the schedule identified by `handle`.
    ///
    /// Returns false, without ticking, if `handle` is not the active schedule.
    pub fn on_schedule(&mut self, handle: ScheduleHandle) -> bool {
        if self.schedule != Some(handle) {
            log::trace!("ignoring tick from stale schedule {}", handle.raw());
            return false;
        }
        self.tick();
        true
    }

    /// First half of a submission: takes a final reading, stops the schedule
    /// and locks the submit control. Returns the question to put to the user.
    pub fn begin_submit(&mut self) -> Result<&str> {
        if self.state != State::Running {
            return Err(Error::SubmitUnavailable(self.state));
        }

        self.tick();
        self.stop_schedule();
        self.elements.set_submit_enabled(false);
        self.elements.set_submit_label(&self.config.submitting_label);
        self.state = State::Confirming;

        log::debug!(
            "submission requested at {}s, awaiting confirmation",
            self.last_reading
        );
        Ok(self.config.submit_confirmation.as_str())
    }

    /// Second half of a submission: applies the user's answer.
    pub fn resolve_submit(&mut self, confirmed: bool) -> Result<SubmitOutcome> {
        if self.state != State::Confirming {
            return Err(Error::NoPendingSubmission(self.state));
        }

        if confirmed {
            self.state = State::Stopped;
            self.unload_guard = false;
            // The form carries the final reading taken by begin_submit.
            let elapsed_seconds = self.last_reading;
            log::debug!("submission confirmed with {elapsed_seconds}s elapsed");
            return Ok(SubmitOutcome::Proceed { elapsed_seconds });
        }

        self.elements.set_submit_enabled(true);
        self.elements.set_submit_label(&self.ready_label);
        self.state = State::Running;
        self.resume_schedule();
        log::debug!("submission declined, counting resumed");
        Ok(SubmitOutcome::Cancelled)
    }

    /// Runs a whole submission, asking `prompt` between the two halves.
    pub fn submit(&mut self, prompt: &mut impl Confirm) -> Result<SubmitOutcome> {
        let confirmed = {
            let message = self.begin_submit()?;
            prompt.confirm(message)
        };
        self.resolve_submit(confirmed)
    }

    /// The warning to show when the user tries to leave the page, if any.
    ///
    /// Hosts may ignore the warning; nothing here waits for the user.
    pub fn before_unload(&self) -> Option<&str> {
        self.unload_guard
            .then_some(self.config.leave_warning.as_str())
    }

    /// Elapsed seconds written by the most recent tick.
    pub fn last_reading(&self) -> u64 {
        self.last_reading
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The active schedule, if counting.
    pub fn schedule(&self) -> Option<ScheduleHandle> {
        self.schedule
    }

    /// When the timer started.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// The configuration in use.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// The page elements.
    pub fn elements(&self) -> &E {
        &self.elements
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replaces the active schedule with a fresh one and returns its handle.
    ///
    /// Firings of the replaced schedule are rejected afterwards. Does nothing
    /// unless the timer is running.
    pub fn restart_schedule(&mut self) -> Option<ScheduleHandle> {
        if self.state != State::Running {
            return None;
        }
        self.resume_schedule();
        self.schedule
    }

    fn stop_schedule(&mut self) {
        if let Some(handle) = self.schedule.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn resume_schedule(&mut self) {
        self.stop_schedule();
        let handle = self.scheduler.start(self.config.interval());
        self.schedule = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::elements::PageElements;
    use crate::schedule::ManualScheduler;
    use std::time::Duration;

    type TestTimer = QuizTimer<ManualClock, ManualScheduler, PageElements>;

    fn start_timer() -> (TestTimer, ManualClock) {
        let clock = ManualClock::new();
        let timer = QuizTimer::start(
            TimerConfig::default(),
            clock.clone(),
            ManualScheduler::new(),
            PageElements::default(),
        )
        .unwrap();
        (timer, clock)
    }

    /// Answers prompts from a fixed script and remembers what it was asked.
    struct ScriptedConfirm {
        answers: Vec<bool>,
        asked: Vec<String>,
    }

    impl ScriptedConfirm {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().rev().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, message: &str) -> bool {
            self.asked.push(message.to_string());
            self.answers.pop().unwrap_or(false)
        }
    }

    #[test]
    fn test_start_paints_immediately() {
        let (timer, _clock) = start_timer();

        assert_eq!(timer.state(), State::Running);
        assert_eq!(timer.elements().counter_text(), "00:00");
        assert_eq!(timer.elements().time_taken(), "0");
        assert_eq!(timer.elements().badge(), Badge::Info);
        assert_eq!(timer.scheduler().starts().len(), 1);
        assert_eq!(timer.scheduler().starts()[0].1, Duration::from_secs(1));
        assert_eq!(timer.schedule(), Some(timer.scheduler().starts()[0].0));
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let config = TimerConfig {
            interval_ms: 0,
            ..TimerConfig::default()
        };
        let result = QuizTimer::start(
            config,
            ManualClock::new(),
            ManualScheduler::new(),
            PageElements::default(),
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_start_default_uses_stock_config() {
        let timer = QuizTimer::start_default(
            ManualClock::new(),
            ManualScheduler::new(),
            PageElements::default(),
        );
        assert_eq!(timer.config(), &TimerConfig::default());
        assert_eq!(timer.state(), State::Running);
    }

    #[test]
    fn test_tick_recomputes_from_clock() {
        let (mut timer, clock) = start_timer();

        clock.advance(Duration::from_millis(65_900));
        timer.tick();

        assert_eq!(timer.elements().counter_text(), "01:05");
        assert_eq!(timer.elements().time_taken(), "65");
        assert_eq!(timer.last_reading(), 65);
    }

    #[test]
    fn test_badge_switches_at_threshold() {
        let (mut timer, clock) = start_timer();

        clock.set(Duration::from_secs(59));
        timer.tick();
        assert_eq!(timer.elements().badge(), Badge::Info);

        clock.set(Duration::from_secs(60));
        timer.tick();
        assert_eq!(timer.elements().badge(), Badge::Warning);
    }

    #[test]
    fn test_ticks_do_not_accumulate_drift() {
        let (mut timer, clock) = start_timer();

        // Late and bunched ticks still report wall-clock elapsed time.
        clock.advance(Duration::from_millis(2_700));
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);
        assert_eq!(timer.elements().time_taken(), "2");
    }

    #[test]
    fn test_on_schedule_rejects_stale_handle() {
        let (mut timer, clock) = start_timer();
        let handle = timer.schedule().unwrap();

        clock.advance(Duration::from_secs(3));
        assert!(!timer.on_schedule(ScheduleHandle::new(handle.raw() + 100)));
        assert_eq!(timer.elements().counter_text(), "00:00");

        assert!(timer.on_schedule(handle));
        assert_eq!(timer.elements().counter_text(), "00:03");
    }

    #[test]
    fn test_begin_submit_takes_final_reading_and_locks() {
        let (mut timer, clock) = start_timer();
        let handle = timer.schedule().unwrap();

        clock.advance(Duration::from_secs(12));
        let message = timer.begin_submit().unwrap().to_string();

        assert_eq!(message, TimerConfig::default().submit_confirmation);
        assert_eq!(timer.state(), State::Confirming);
        assert_eq!(timer.elements().time_taken(), "12");
        assert!(!timer.elements().submit_enabled());
        assert_eq!(timer.elements().submit_label(), "Submitting...");
        assert_eq!(timer.schedule(), None);
        assert_eq!(timer.scheduler().cancels(), &[handle]);
        assert!(!timer.on_schedule(handle));
    }

    #[test]
    fn test_confirm_stops_for_good() {
        let (mut timer, clock) = start_timer();

        clock.advance(Duration::from_secs(65));
        let outcome = timer.submit(&mut |_: &str| true).unwrap();

        assert_eq!(outcome, SubmitOutcome::Proceed { elapsed_seconds: 65 });
        assert_eq!(timer.state(), State::Stopped);
        assert_eq!(timer.elements().time_taken(), "65");
        assert_eq!(timer.elements().counter_text(), "01:05");
        assert_eq!(timer.elements().badge(), Badge::Warning);
        assert!(!timer.elements().submit_enabled());
        assert_eq!(timer.elements().submit_label(), "Submitting...");
        assert!(timer.scheduler().active().is_empty());
        assert_eq!(timer.schedule(), None);
    }

    #[test]
    fn test_decline_resumes_without_reset() {
        let (mut timer, clock) = start_timer();
        let first = timer.schedule().unwrap();

        clock.advance(Duration::from_secs(10));
        let outcome = timer.submit(&mut |_: &str| false).unwrap();

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(timer.state(), State::Running);
        assert_eq!(timer.elements().time_taken(), "10");
        assert_eq!(timer.elements().counter_text(), "00:10");
        assert!(timer.elements().submit_enabled());
        assert_eq!(timer.elements().submit_label(), "Submit Quiz");

        let resumed = timer.schedule().unwrap();
        assert_ne!(resumed, first);
        assert_eq!(timer.scheduler().active(), vec![resumed]);
        assert_eq!(timer.scheduler().max_active(), 1);

        clock.advance(Duration::from_secs(5));
        assert!(timer.on_schedule(resumed));
        assert_eq!(timer.elements().counter_text(), "00:15");
    }

    #[test]
    fn test_submit_asks_the_configured_question() {
        let (mut timer, _clock) = start_timer();
        let mut prompt = ScriptedConfirm::new(&[false, true]);

        assert_eq!(timer.submit(&mut prompt).unwrap(), SubmitOutcome::Cancelled);
        assert!(matches!(
            timer.submit(&mut prompt).unwrap(),
            SubmitOutcome::Proceed { .. }
        ));
        assert_eq!(prompt.asked.len(), 2);
        assert!(prompt.asked[0].contains("cannot change your answers"));
    }

    #[test]
    fn test_submit_after_stop_is_rejected() {
        let (mut timer, _clock) = start_timer();
        timer.submit(&mut |_: &str| true).unwrap();

        let mut asked = false;
        let err = timer
            .submit(&mut |_: &str| {
                asked = true;
                true
            })
            .unwrap_err();

        assert!(matches!(err, Error::SubmitUnavailable(State::Stopped)));
        assert!(!asked);
    }

    #[test]
    fn test_begin_submit_twice_is_rejected() {
        let (mut timer, _clock) = start_timer();
        timer.begin_submit().unwrap();
        let err = timer.begin_submit().unwrap_err();
        assert!(matches!(err, Error::SubmitUnavailable(State::Confirming)));
    }

    #[test]
    fn test_resolve_without_pending_submission() {
        let (mut timer, _clock) = start_timer();
        let err = timer.resolve_submit(true).unwrap_err();
        assert!(matches!(err, Error::NoPendingSubmission(State::Running)));
        assert_eq!(timer.state(), State::Running);
    }

    #[test]
    fn test_unload_guard_until_confirmed() {
        let (mut timer, _clock) = start_timer();
        let warning = TimerConfig::default().leave_warning;

        assert_eq!(timer.before_unload(), Some(warning.as_str()));

        timer.submit(&mut |_: &str| false).unwrap();
        assert_eq!(timer.before_unload(), Some(warning.as_str()));

        timer.submit(&mut |_: &str| true).unwrap();
        assert_eq!(timer.before_unload(), None);
    }

    #[test]
    fn test_repeated_declines_keep_one_schedule() {
        let (mut timer, clock) = start_timer();

        for _ in 0..5 {
            clock.advance(Duration::from_secs(1));
            timer.submit(&mut |_: &str| false).unwrap();
        }

        assert_eq!(timer.scheduler().max_active(), 1);
        assert_eq!(timer.scheduler().starts().len(), 6);
        assert_eq!(timer.scheduler().cancels().len(), 5);
        assert_eq!(timer.elements().counter_text(), "00:05");
    }

    #[test]
    fn test_decline_restores_label_the_page_started_with() {
        let clock = ManualClock::new();
        let mut timer = QuizTimer::start(
            TimerConfig::default(),
            clock,
            ManualScheduler::new(),
            PageElements::new(Default::default(), "Hand in"),
        )
        .unwrap();
        assert_eq!(timer.elements().submit_label(), "Hand in");

        timer.submit(&mut |_: &str| false).unwrap();

        assert_eq!(timer.elements().submit_label(), "Hand in");
        assert!(timer.elements().submit_enabled());
    }

    #[test]
    fn test_restart_schedule_replaces_handle() {
        let (mut timer, clock) = start_timer();
        let old = timer.schedule().unwrap();

        let fresh = timer.restart_schedule().unwrap();

        assert_ne!(fresh, old);
        assert_eq!(timer.scheduler().active(), vec![fresh]);
        assert_eq!(timer.scheduler().max_active(), 1);
        clock.advance(Duration::from_secs(2));
        assert!(!timer.on_schedule(old));
        assert!(timer.on_schedule(fresh));
    }

    #[test]
    fn test_restart_schedule_ignored_unless_running() {
        let (mut timer, _clock) = start_timer();
        timer.begin_submit().unwrap();
        assert_eq!(timer.restart_schedule(), None);
        assert!(timer.scheduler().active().is_empty());

        timer.resolve_submit(true).unwrap();
        assert_eq!(timer.restart_schedule(), None);
        assert!(timer.scheduler().active().is_empty());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::Running.to_string(), "running");
        assert_eq!(State::Confirming.to_string(), "confirming");
        assert_eq!(State::Stopped.to_string(), "stopped");
    }
}
