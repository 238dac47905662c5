#![warn(missing_docs)]

//! # quiztimer-widgets
//!
//! An elapsed-time quiz timer with guarded submission, built as a component
//! for [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! ## Overview
//!
//! While a quiz is open the timer counts up once per second, shows the
//! elapsed time as `MM:SS` and keeps the elapsed seconds in the quiz form's
//! `time_taken` field. Past one minute the counter badge switches from its
//! neutral colour to a warning colour. Submitting asks for confirmation first;
//! declining puts the form back the way it was and keeps counting from where
//! it left off. Leaving mid-quiz warns that progress will be lost.
//!
//! ## Layers
//!
//! - [`widget::QuizTimer`]: the timing and submission logic, independent of
//!   any runtime. It reads time from a [`clock::Clock`], ticks on a
//!   [`schedule::Scheduler`] and writes to [`elements::ElementBindings`].
//! - [`timer::Model`]: the bubbletea component wrapping the widget, with key
//!   bindings and `lipgloss` styling.
//!
//! ## Driving the widget directly
//!
//! ```rust
//! use quiztimer_widgets::prelude::*;
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
//! clock.advance(Duration::from_secs(10));
//! assert_eq!(timer.submit(&mut |_: &str| false).unwrap(), SubmitOutcome::Cancelled);
//! assert_eq!(timer.elements().counter_text(), "00:10");
//! assert!(timer.elements().submit_enabled());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use quiztimer_widgets::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//!
//! struct App {
//!     timer: QuizTimerModel,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = timer_new();
//!         let cmd = timer.init();
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Quiz\n\n{}", self.timer.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger itself.

pub mod clock;
pub mod config;
pub mod elements;
pub mod error;
pub mod format;
pub mod key;
pub mod schedule;
pub mod timer;
pub mod widget;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TimerConfig;
pub use elements::{Badge, ElementBindings, ElementIds, PageElements};
pub use error::{Error, Result};
pub use format::format_elapsed;
pub use key::{Binding, KeyPress, QuizKeyMap};
pub use schedule::{ManualScheduler, ScheduleHandle, Scheduler, TagScheduler};
pub use timer::{
    new as timer_new, with_config as timer_with_config, Model as QuizTimerModel, Prompt,
    Styles as QuizTimerStyles, SubmittedMsg, TickMsg as QuizTimerTickMsg,
};
pub use widget::{Confirm, QuizTimer, State, SubmitOutcome};

/// Prelude module for convenient imports.
///
/// ```rust
/// use quiztimer_widgets::prelude::*;
///
/// let model = timer_new();
/// assert!(model.running());
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::TimerConfig;
    pub use crate::elements::{Badge, ElementBindings, ElementIds, PageElements};
    pub use crate::error::Error;
    pub use crate::format::format_elapsed;
    pub use crate::key::{Binding, KeyPress, QuizKeyMap};
    pub use crate::schedule::{ManualScheduler, ScheduleHandle, Scheduler, TagScheduler};
    pub use crate::timer::{
        new as timer_new, with_config as timer_with_config, Model as QuizTimerModel, Prompt,
        Styles as QuizTimerStyles, SubmittedMsg, TickMsg as QuizTimerTickMsg,
    };
    pub use crate::widget::{Confirm, QuizTimer, State, SubmitOutcome};
}
