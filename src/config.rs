//! Countdown widget configuration.

use lipgloss_extras::prelude::*;
use std::time::Duration;

/// Default redraw interval while counting down.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Longest allowed redraw interval; longer ones could skip a second.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Text shown once the countdown has finished.
pub const DEFAULT_DONE_TEXT: &str = "Time's up!";

/// Lip Gloss styles used by the widget's view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The `HH:MM:SS` digits, both while editing and counting down.
    pub digits: Style,
    /// The slot under the edit cursor.
    pub cursor: Style,
    /// The finished text.
    pub done: Style,
    /// The help line under the display.
    pub help: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            digits: Style::new().foreground(Color::from("#aaaaaa")).bold(true),
            cursor: Style::new().reverse(true),
            done: Style::new().foreground(Color::from("#aaaaaa")).bold(true),
            help: Style::new().faint(true),
        }
    }
}

/// Behaviour and appearance settings for a countdown widget.
///
/// ```rust
/// use bubbletea_countdown::config::Config;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_tick_interval(Duration::from_millis(250))
///     .with_allow_cancel(true);
/// assert!(config.validate().is_ok());
///
/// let broken = Config::default().with_done_text("");
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// How often the display is refreshed while counting down.
    pub tick_interval: Duration,
    /// Text shown after completion until the user acknowledges it.
    pub done_text: String,
    /// Whether the cancel key stops a running countdown.
    pub allow_cancel: bool,
    /// Whether the host should ring the terminal bell on completion.
    pub bell: bool,
    /// Styles for the view.
    pub styles: Styles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            done_text: DEFAULT_DONE_TEXT.to_string(),
            allow_cancel: false,
            bell: true,
            styles: Styles::default(),
        }
    }
}

impl Config {
    /// Sets the redraw interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the text shown after completion.
    pub fn with_done_text(mut self, text: impl Into<String>) -> Self {
        self.done_text = text.into();
        self
    }

    /// Enables or disables cancelling a running countdown.
    pub fn with_allow_cancel(mut self, allow: bool) -> Self {
        self.allow_cancel = allow;
        self
    }

    /// Enables or disables the completion bell.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    /// Replaces the view styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Checks that the settings can drive a countdown.
    ///
    /// The tick interval must be non-zero and at most one second, otherwise
    /// the seconds field could visibly skip values.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval.is_zero() {
            return Err("tick interval must be greater than zero".to_string());
        }
        if self.tick_interval > MAX_TICK_INTERVAL {
            return Err(format!(
                "tick interval {:?} is longer than one second",
                self.tick_interval
            ));
        }
        if self.done_text.trim().is_empty() {
            return Err("done text must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(config.done_text, "Time's up!");
        assert!(!config.allow_cancel);
        assert!(config.bell);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_tick_interval(Duration::from_millis(20))
            .with_done_text("Done")
            .with_allow_cancel(true)
            .with_bell(false);
        assert_eq!(config.tick_interval, Duration::from_millis(20));
        assert_eq!(config.done_text, "Done");
        assert!(config.allow_cancel);
        assert!(!config.bell);
    }

    #[test]
    fn test_validate_interval_bounds() {
        assert!(Config::default()
            .with_tick_interval(Duration::ZERO)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_tick_interval(Duration::from_secs(2))
            .validate()
            .is_err());
        assert!(Config::default()
            .with_tick_interval(Duration::from_secs(1))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_done_text() {
        let err = Config::default().with_done_text("   ").validate();
        assert_eq!(err, Err("done text must not be empty".to_string()));
    }
}
