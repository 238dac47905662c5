//! Key bindings for the terminal quiz timer.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A key code together with the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held; empty means none beyond shift.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        // Plain bindings ignore shift so that upper-case letters still match.
        if self.modifiers.is_empty() {
            return !msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        }
        msg.modifiers.contains(self.modifiers)
    }
}

/// One action and the keys that trigger it.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the action.
    pub keys: Vec<KeyPress>,
    /// Short key legend, e.g. `n/esc`.
    pub help: String,
    /// What the action does.
    pub description: String,
}

impl Binding {
    /// Creates a binding without help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: String::new(),
            description: String::new(),
        }
    }

    /// Attaches help text.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Returns true if `msg` is one of this binding's keys.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.keys.iter().any(|key| key.matches(msg))
    }
}

/// Keys understood by the quiz timer component.
#[derive(Debug, Clone)]
pub struct QuizKeyMap {
    /// Starts a submission.
    pub submit: Binding,
    /// Answers yes to a prompt.
    pub confirm: Binding,
    /// Answers no to a prompt.
    pub decline: Binding,
    /// Tries to leave the quiz.
    pub leave: Binding,
}

impl Default for QuizKeyMap {
    fn default() -> Self {
        Self {
            submit: Binding::new(vec![
                KeyPress::from(KeyCode::Enter),
                KeyPress::from((KeyCode::Char('s'), KeyModifiers::CONTROL)),
            ])
            .with_help("enter/ctrl+s", "submit quiz"),
            confirm: Binding::new(vec![KeyCode::Char('y'), KeyCode::Char('Y')])
                .with_help("y", "yes"),
            decline: Binding::new(vec![KeyCode::Char('n'), KeyCode::Char('N'), KeyCode::Esc])
                .with_help("n/esc", "no"),
            leave: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q/ctrl+c", "leave"),
        }
    }
}

impl QuizKeyMap {
    /// Bindings shown in the help line while the quiz is running.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![&self.submit, &self.leave]
    }
}
