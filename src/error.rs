//! Error type shared by the quiz timer components.

use crate::widget::State;

/// Errors produced while configuring or driving a quiz timer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range or empty.
    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed.
    #[error("failed to parse timer configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("failed to read timer configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The page template does not provide an element the widget binds to.
    #[error("page has no element with id `{0}`")]
    MissingElement(String),

    /// A submission was requested while the timer was not running.
    #[error("cannot submit while the timer is {0}")]
    SubmitUnavailable(State),

    /// A submission was resolved without one being pending.
    #[error("no submission is awaiting confirmation (timer is {0})")]
    NoPendingSubmission(State),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_state() {
        let err = Error::SubmitUnavailable(State::Stopped);
        assert_eq!(err.to_string(), "cannot submit while the timer is stopped");

        let err = Error::NoPendingSubmission(State::Running);
        assert!(err.to_string().contains("running"));
    }

    #[test]
    fn test_missing_element_message() {
        let err = Error::MissingElement("time_taken".to_string());
        assert_eq!(err.to_string(), "page has no element with id `time_taken`");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("interval_ms = ");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
