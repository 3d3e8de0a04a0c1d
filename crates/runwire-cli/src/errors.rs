//! CLI-specific error formatting for user-facing messages.

use runwire::error::{RecoverySuggestion, RunwireError};

/// Map a [`RunwireError`] to a user-facing help string with actionable guidance.
pub fn format_error_help(err: &RunwireError) -> String {
    match err.recovery_suggestion() {
        RecoverySuggestion::Reconnect => {
            format!("{err}. Is the server running? Start one with: runwire serve")
        }
        RecoverySuggestion::CheckConfiguration => {
            format!("{err}. Check your runwire.toml or RUNWIRE_* environment variables")
        }
        RecoverySuggestion::IncreaseTimeout => {
            format!("{err}. Consider raising the timeout in runwire.toml")
        }
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_point_at_serve() {
        let help = format_error_help(&RunwireError::Connection("refused".into()));
        assert!(help.contains("runwire serve"));
    }

    #[test]
    fn configuration_errors_point_at_settings() {
        let help = format_error_help(&RunwireError::Configuration("bad url".into()));
        assert!(help.contains("RUNWIRE_"));
    }

    #[test]
    fn other_errors_fall_through_to_display() {
        let help = format_error_help(&RunwireError::Graph("boom".into()));
        assert_eq!(help, "Agent graph error: boom");
    }
}
