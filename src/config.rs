//! Quiz timer configuration.
//!
//! Every field has a default matching the stock quiz page, so an empty TOML
//! document is a valid configuration:
//!
//! ```rust
//! use quiztimer_widgets::config::TimerConfig;
//! use std::time::Duration;
//!
//! let config = TimerConfig::from_toml_str("warning_after_secs = 90").unwrap();
//! assert_eq!(config.warning_after_secs, 90);
//! assert_eq!(config.interval(), Duration::from_secs(1));
//! ```

use crate::elements::ElementIds;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Labels, prompts and timings for one quiz timer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Milliseconds between scheduled ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Elapsed seconds at which the badge switches to the warning state.
    #[serde(default = "default_warning_after_secs")]
    pub warning_after_secs: u64,
    /// Submit control label while the quiz can be submitted.
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    /// Submit control label while a submission is in flight.
    #[serde(default = "default_submitting_label")]
    pub submitting_label: String,
    /// Question asked before a submission goes through.
    #[serde(default = "default_submit_confirmation")]
    pub submit_confirmation: String,
    /// Warning shown when the user tries to leave mid-quiz.
    #[serde(default = "default_leave_warning")]
    pub leave_warning: String,
    /// Element ids of the page template.
    #[serde(default)]
    pub ids: ElementIds,
}

fn default_interval_ms() -> u64 {
    1000
}
fn default_warning_after_secs() -> u64 {
    60
}
fn default_submit_label() -> String {
    "Submit Quiz".into()
}
fn default_submitting_label() -> String {
    "Submitting...".into()
}
fn default_submit_confirmation() -> String {
    "Are you sure you want to submit your quiz? You cannot change your answers after submission."
        .into()
}
fn default_leave_warning() -> String {
    "Are you sure you want to leave? Your progress will be lost.".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            warning_after_secs: default_warning_after_secs(),
            submit_label: default_submit_label(),
            submitting_label: default_submitting_label(),
            submit_confirmation: default_submit_confirmation(),
            leave_warning: default_leave_warning(),
            ids: ElementIds::default(),
        }
    }
}

impl TimerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded timer configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that the configuration can drive a timer.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("submit_label", &self.submit_label),
            ("submitting_label", &self.submitting_label),
            ("submit_confirmation", &self.submit_confirmation),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Time between scheduled ticks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Sets the tick interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the warning threshold in seconds.
    pub fn with_warning_after(mut self, seconds: u64) -> Self {
        self.warning_after_secs = seconds;
        self
    }

    /// Sets the ready and in-flight submit labels.
    pub fn with_submit_labels(
        mut self,
        ready: impl Into<String>,
        submitting: impl Into<String>,
    ) -> Self {
        self.submit_label = ready.into();
        self.submitting_label = submitting.into();
        self
    }

    /// Sets the submission confirmation question.
    pub fn with_submit_confirmation(mut self, message: impl Into<String>) -> Self {
        self.submit_confirmation = message.into();
        self
    }

    /// Sets the leave warning.
    pub fn with_leave_warning(mut self, message: impl Into<String>) -> Self {
        self.leave_warning = message.into();
        self
    }

    /// Sets the element ids.
    pub fn with_ids(mut self, ids: ElementIds) -> Self {
        self.ids = ids;
        self
    }
}
