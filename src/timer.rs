//! Quiz timer component for Bubble Tea applications.
//!
//! The component shows how long the quiz has been running, keeps the elapsed
//! seconds ready for the quiz form, and asks before submitting or leaving.
//! All timing decisions are made by [`QuizTimer`]; this module turns runtime
//! messages into widget events and draws the result.
//!
//! # Basic Usage
//!
//! ```rust
//! use quiztimer_widgets::timer::new;
//!
//! let mut timer = new();
//! let first_tick = timer.init();
//! assert!(first_tick.is_some());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use quiztimer_widgets::timer::{new, Model, SubmittedMsg};
//!
//! struct QuizPage {
//!     timer: Model,
//! }
//!
//! impl BubbleTeaModel for QuizPage {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = new();
//!         let cmd = timer.init();
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(submitted) = msg.downcast_ref::<SubmittedMsg>() {
//!             if submitted.id == self.timer.id() {
//!                 // Send submitted.fields to the quiz server.
//!             }
//!         }
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```
//!
//! # Keys
//!
//! - `enter` / `ctrl+s`: submit the quiz (asks first)
//! - `y` / `n` / `esc`: answer the open question
//! - `q` / `ctrl+c`: leave (asks first while the quiz is unsubmitted)

use crate::clock::{Clock, SystemClock};
use crate::config::TimerConfig;
use crate::elements::{Badge, PageElements};
use crate::error::Result;
use crate::key::QuizKeyMap;
use crate::schedule::{ScheduleHandle, TagScheduler};
use crate::widget::{QuizTimer, State, SubmitOutcome};
use bubbletea_rs::{quit, tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for timer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Scheduled tick for one timer's current schedule.
///
/// The tag names the schedule that produced the tick. Ticks from a schedule
/// that was stopped for a submission are dropped, so a declined submission
/// never leaves two tick loops running.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the timer this tick targets.
    pub id: i64,
    tag: u64,
}

/// Sent once the user confirms the submission.
#[derive(Debug, Clone)]
pub struct SubmittedMsg {
    /// The unique identifier of the timer that was submitted.
    pub id: i64,
    /// Elapsed seconds at confirmation.
    pub elapsed_seconds: u64,
    /// Form name/value pairs to send.
    pub fields: Vec<(String, String)>,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Asking whether to submit.
    Submit(String),
    /// Warning that leaving loses progress.
    Leave(String),
}

impl Prompt {
    fn message(&self) -> &str {
        match self {
            Prompt::Submit(message) | Prompt::Leave(message) => message,
        }
    }
}

/// Visual styles for the quiz timer.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Counter badge before the warning threshold.
    pub info: Style,
    /// Counter badge at or after the warning threshold.
    pub warning: Style,
    /// Submit control while it accepts input.
    pub submit: Style,
    /// Submit control while a submission is in flight.
    pub submit_disabled: Style,
    /// Open questions.
    pub prompt: Style,
    /// Help line.
    pub help: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            info: Style::new()
                .background(Color::from("#0DCAF0"))
                .foreground(Color::from("#000000"))
                .padding(0, 1, 0, 1),
            warning: Style::new()
                .background(Color::from("#FFC107"))
                .foreground(Color::from("#000000"))
                .padding(0, 1, 0, 1),
            submit: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .bold(true)
                .padding(0, 1, 0, 1),
            submit_disabled: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#9B9B9B",
                    Dark: "#5C5C5C",
                })
                .padding(0, 1, 0, 1),
            prompt: Style::new().foreground(AdaptiveColor {
                Light: "#D9480F",
                Dark: "#FF6B6B",
            }),
            help: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// Terminal quiz timer.
#[derive(Debug)]
pub struct Model<C = SystemClock> {
    /// Key bindings.
    pub keys: QuizKeyMap,
    /// Rendering styles.
    pub styles: Styles,
    id: i64,
    timer: QuizTimer<C, TagScheduler, PageElements>,
    prompt: Option<Prompt>,
}

/// Creates a quiz timer with the stock configuration, already counting.
pub fn new() -> Model {
    Model::from_timer(QuizTimer::start_default(
        SystemClock,
        TagScheduler::new(),
        PageElements::default(),
    ))
}

/// Creates a quiz timer from `config`, already counting.
pub fn with_config(config: TimerConfig) -> Result<Model> {
    Model::with_clock(config, SystemClock)
}

impl<C: Clock> Model<C> {
    /// Creates a quiz timer reading time from `clock`.
    pub fn with_clock(config: TimerConfig, clock: C) -> Result<Self> {
        let elements = PageElements::new(config.ids.clone(), config.submit_label.clone());
        let timer = QuizTimer::start(config, clock, TagScheduler::new(), elements)?;
        Ok(Self::from_timer(timer))
    }

    fn from_timer(timer: QuizTimer<C, TagScheduler, PageElements>) -> Self {
        Self {
            keys: QuizKeyMap::default(),
            styles: Styles::default(),
            id: next_id(),
            timer,
            prompt: None,
        }
    }

    /// Sets the rendering styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// This timer's unique identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The underlying widget.
    pub fn timer(&self) -> &QuizTimer<C, TagScheduler, PageElements> {
        &self.timer
    }

    /// The question on screen, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Whether the timer is still counting.
    pub fn running(&self) -> bool {
        self.timer.state() == State::Running
    }

    /// A tick message for the current schedule, for driving the model by hand.
    pub fn tick_msg(&self) -> Option<TickMsg> {
        self.timer.schedule().map(|handle| TickMsg {
            id: self.id,
            tag: handle.raw(),
        })
    }

    fn tick(&self) -> Option<Cmd> {
        let msg = self.tick_msg()?;
        let interval = self.timer.config().interval();

        Some(bubbletea_tick(interval, move |_| Box::new(msg.clone()) as Msg))
    }

    fn submitted(&self, elapsed_seconds: u64) -> Cmd {
        let msg = SubmittedMsg {
            id: self.id,
            elapsed_seconds,
            fields: self.timer.elements().form_fields(),
        };
        bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
    }

    /// Starts the tick loop.
    ///
    /// Each call starts a fresh schedule, so ticks still in flight from an
    /// earlier loop are dropped and only one loop keeps running.
    pub fn init(&mut self) -> Option<Cmd> {
        self.timer.restart_schedule()?;
        self.tick()
    }

    /// Handles ticks and key presses.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }
            // Ticks from a schedule cancelled by a submission are dropped
            // here, which is what ends the old tick loop.
            if !self.timer.on_schedule(ScheduleHandle::new(tick_msg.tag)) {
                return None;
            }
            return self.tick();
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        match self.prompt.take() {
            Some(Prompt::Submit(message)) => {
                if self.keys.confirm.matches(key_msg) {
                    self.answer_submit(true)
                } else if self.keys.decline.matches(key_msg) {
                    self.answer_submit(false)
                } else {
                    self.prompt = Some(Prompt::Submit(message));
                    None
                }
            }
            Some(Prompt::Leave(message)) => {
                if self.keys.confirm.matches(key_msg) {
                    log::debug!("leaving quiz at {}s", self.timer.last_reading());
                    Some(quit())
                } else if self.keys.decline.matches(key_msg) {
                    None
                } else {
                    self.prompt = Some(Prompt::Leave(message));
                    None
                }
            }
            None => {
                if self.keys.submit.matches(key_msg) {
                    self.ask_submit()
                } else if self.keys.leave.matches(key_msg) {
                    match self.timer.before_unload() {
                        Some(warning) => {
                            self.prompt = Some(Prompt::Leave(warning.to_string()));
                            None
                        }
                        None => Some(quit()),
                    }
                } else {
                    None
                }
            }
        }
    }

    fn ask_submit(&mut self) -> Option<Cmd> {
        match self.timer.begin_submit() {
            Ok(message) => {
                self.prompt = Some(Prompt::Submit(message.to_string()));
            }
            Err(err) => log::debug!("submit key ignored: {err}"),
        }
        None
    }

    fn answer_submit(&mut self, confirmed: bool) -> Option<Cmd> {
        match self.timer.resolve_submit(confirmed) {
            Ok(SubmitOutcome::Proceed { elapsed_seconds }) => Some(self.submitted(elapsed_seconds)),
            Ok(SubmitOutcome::Cancelled) => self.tick(),
            Err(err) => {
                log::warn!("submission answer dropped: {err}");
                None
            }
        }
    }

    /// Renders the counter badge, submit control, any open question and help.
    pub fn view(&self) -> String {
        let page = self.timer.elements();

        let badge = match page.badge() {
            Badge::Info => &self.styles.info,
            Badge::Warning => &self.styles.warning,
        };
        let submit = if page.submit_enabled() {
            &self.styles.submit
        } else {
            &self.styles.submit_disabled
        };

        let mut lines = vec![
            badge.render(&format!("⏱ {}", page.counter_text())),
            submit.render(page.submit_label()),
        ];

        if let Some(prompt) = &self.prompt {
            lines.push(
                self.styles
                    .prompt
                    .render(&format!("{} (y/n)", prompt.message())),
            );
        } else if self.running() {
            let help = self
                .keys
                .short_help()
                .iter()
                .map(|b| format!("{} {}", b.help, b.description))
                .collect::<Vec<_>>()
                .join(" • ");
            lines.push(self.styles.help.render(&help));
        }

        lines.join("\n")
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let mut model = new();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}
