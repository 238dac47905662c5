//! Page elements the quiz timer writes to.
//!
//! The widget talks to its page through [`ElementBindings`]: a counter with a
//! badge around it, a hidden field carrying elapsed seconds, and the submit
//! control of the quiz form. [`PageElements`] is the in-memory page used by the
//! terminal component and by tests.
//!
//! # Binding by id
//!
//! Page templates identify the elements by id. [`PageElements::bind`] checks
//! that a template offers every id in [`ElementIds`] before the widget starts:
//!
//! ```rust
//! use quiztimer_widgets::elements::{ElementIds, PageElements};
//!
//! let ids = ElementIds::default();
//! let page = PageElements::bind(&ids, &["timer", "time_taken", "submit-btn", "quiz-form"], "Submit Quiz");
//! assert!(page.is_ok());
//!
//! let missing = PageElements::bind(&ids, &["timer", "quiz-form"], "Submit Quiz");
//! assert!(missing.is_err());
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;

/// Presentation state of the badge around the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    /// Neutral presentation, before the warning threshold.
    #[default]
    Info,
    /// Warning presentation, at or after the warning threshold.
    Warning,
}

impl Badge {
    /// The class list a page template expects on the badge element.
    pub fn class_name(self) -> &'static str {
        match self {
            Badge::Info => "badge bg-info fs-6",
            Badge::Warning => "badge bg-warning fs-6",
        }
    }
}

/// Element ids used by the quiz page template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Element whose text shows the counter.
    pub timer: String,
    /// Hidden input carrying elapsed seconds.
    pub time_taken: String,
    /// The submit control.
    pub submit_button: String,
    /// The quiz form.
    pub form: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            timer: "timer".to_string(),
            time_taken: "time_taken".to_string(),
            submit_button: "submit-btn".to_string(),
            form: "quiz-form".to_string(),
        }
    }
}

impl ElementIds {
    fn all(&self) -> [&str; 4] {
        [&self.timer, &self.time_taken, &self.submit_button, &self.form]
    }
}

/// Access to the elements the widget drives.
pub trait ElementBindings {
    /// Replaces the counter text.
    fn set_counter_text(&mut self, text: &str);

    /// Switches the badge around the counter.
    fn set_badge(&mut self, badge: Badge);

    /// Stores elapsed seconds in the hidden form field.
    fn set_elapsed_field(&mut self, seconds: u64);

    /// Enables or disables the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Replaces the submit control label.
    fn set_submit_label(&mut self, label: &str);

    /// The label the submit control currently shows.
    fn submit_label(&self) -> &str;
}

/// An in-memory quiz page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElements {
    ids: ElementIds,
    counter_text: String,
    badge: Badge,
    time_taken: String,
    submit_enabled: bool,
    submit_label: String,
}

impl PageElements {
    /// Creates a page as the template renders it before the widget starts.
    pub fn new(ids: ElementIds, submit_label: impl Into<String>) -> Self {
        Self {
            ids,
            counter_text: "00:00".to_string(),
            badge: Badge::Info,
            time_taken: "0".to_string(),
            submit_enabled: true,
            submit_label: submit_label.into(),
        }
    }

    /// Creates a page after checking that `available` holds every required id.
    pub fn bind(ids: &ElementIds, available: &[&str], submit_label: &str) -> Result<Self> {
        if let Some(missing) = ids.all().into_iter().find(|id| !available.contains(id)) {
            return Err(Error::MissingElement(missing.to_string()));
        }
        Ok(Self::new(ids.clone(), submit_label))
    }

    /// The ids this page was bound with.
    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Current counter text.
    pub fn counter_text(&self) -> &str {
        &self.counter_text
    }

    /// Current badge state.
    pub fn badge(&self) -> Badge {
        self.badge
    }

    /// Raw value of the hidden elapsed-seconds field.
    pub fn time_taken(&self) -> &str {
        &self.time_taken
    }

    /// Whether the submit control accepts clicks.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Current submit control label.
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Name/value pairs the form would send on submission.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![(self.ids.time_taken.clone(), self.time_taken.clone())]
    }
}

impl Default for PageElements {
    fn default() -> Self {
        Self::new(ElementIds::default(), "Submit Quiz")
    }
}

impl ElementBindings for PageElements {
    fn set_counter_text(&mut self, text: &str) {
        text.clone_into(&mut self.counter_text);
    }

    fn set_badge(&mut self, badge: Badge) {
        self.badge = badge;
    }

    fn set_elapsed_field(&mut self, seconds: u64) {
        self.time_taken = seconds.to_string();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_submit_label(&mut self, label: &str) {
        label.clone_into(&mut self.submit_label);
    }

    fn submit_label(&self) -> &str {
        &self.submit_label
    }
}
