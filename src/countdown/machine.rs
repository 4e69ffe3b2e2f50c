//! The countdown state machine.
//!
//! [`Countdown`] is independent of any runtime: time comes in as plain
//! microsecond readings and key presses as [`Key`] values, so every transition
//! can be driven directly from tests.

use crate::config::Config;
use crate::duration;
use crate::entry::{self, Entry};
use tracing::{debug, trace};

/// Which phase the countdown is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The user is typing a duration.
    Input,
    /// The countdown is running.
    Timing,
    /// The countdown finished and waits for acknowledgment.
    Done,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            State::Input => "input",
            State::Timing => "timing",
            State::Done => "done",
        })
    }
}

/// Key presses the state machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A decimal digit, `'0'..='9'`.
    Digit(char),
    /// Erase the previous digit.
    Backspace,
    /// Start the countdown, or acknowledge completion.
    Confirm,
    /// Abandon a running countdown (only when enabled).
    Cancel,
}

/// What to show at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The display string.
    pub text: String,
    /// Set on the single query that observed the countdown reaching zero.
    pub completed: bool,
}

impl Frame {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Input -> Timing -> Done -> Input controller for one countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    entry: Entry,
    state: State,
    target: u64,
    started_at: u64,
    done_text: String,
    allow_cancel: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Countdown {
    /// Creates a countdown in the input state with an empty entry.
    pub fn new(config: &Config) -> Self {
        Self {
            entry: Entry::new(),
            state: State::Input,
            target: 0,
            started_at: 0,
            done_text: config.done_text.clone(),
            allow_cancel: config.allow_cancel,
        }
    }

    /// Replaces the entry. Only has an effect in the input state.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        if self.state == State::Input {
            self.entry = entry;
        }
        self
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The digit entry.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Duration of the current (or last) countdown in microseconds.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Clock reading at which the current (or last) countdown started.
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Remaining microseconds at `now`, or `None` outside the timing state.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        (self.state == State::Timing)
            .then(|| self.target.saturating_sub(now.saturating_sub(self.started_at)))
    }

    /// Applies a key press at `now`.
    ///
    /// Digits and backspace edit the entry and confirm starts the countdown
    /// while in [`State::Input`]. Only confirm acts in [`State::Done`]. While
    /// timing every key is ignored, except cancel when it is enabled.
    ///
    /// # Returns
    ///
    /// `true` if the key changed the entry or the state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{Countdown, Key, State};
    ///
    /// let mut countdown = Countdown::default();
    /// assert!(countdown.handle_key(Key::Digit('1'), 0));
    /// assert!(!countdown.handle_key(Key::Digit('x'), 0));
    ///
    /// assert!(countdown.handle_key(Key::Confirm, 0));
    /// assert_eq!(countdown.state(), State::Timing);
    /// assert!(!countdown.handle_key(Key::Backspace, 1));
    /// ```
    pub fn handle_key(&mut self, key: Key, now: u64) -> bool {
        match (self.state, key) {
            (State::Input, Key::Digit(d)) => self.entry.push_digit(d),
            (State::Input, Key::Backspace) => self.entry.backspace(),
            (State::Input, Key::Confirm) => {
                self.start(now);
                true
            }
            (State::Timing, Key::Cancel) if self.allow_cancel => {
                self.cancel(now);
                true
            }
            (State::Done, Key::Confirm) => {
                self.acknowledge();
                true
            }
            (state, key) => {
                trace!(%state, ?key, "key ignored");
                false
            }
        }
    }

    /// The display at `now`.
    ///
    /// While timing this is where completion is detected: the first query at
    /// or past the target moves to [`State::Done`] and returns a frame with
    /// `completed` set and the empty entry text. Later queries are pure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{Countdown, Key};
    ///
    /// let mut countdown = Countdown::default();
    /// for c in "000002".chars() {
    ///     countdown.handle_key(Key::Digit(c), 0);
    /// }
    /// countdown.handle_key(Key::Confirm, 0);
    /// assert_eq!(countdown.display(500_000).text, "00:00:01");
    ///
    /// let frame = countdown.display(2_000_000);
    /// assert!(frame.completed);
    /// assert_eq!(frame.text, "__:__:__");
    ///
    /// let frame = countdown.display(3_000_000);
    /// assert!(!frame.completed);
    /// assert_eq!(frame.text, "Time's up!");
    /// ```
    pub fn display(&mut self, now: u64) -> Frame {
        match self.state {
            State::Input => Frame::text(self.entry.to_string()),
            State::Done => Frame::text(self.done_text.as_str()),
            State::Timing => {
                let elapsed = now.saturating_sub(self.started_at);
                if elapsed < self.target {
                    return Frame::text(duration::format(self.target - elapsed));
                }
                debug!(
                    target_micros = self.target,
                    started_at = self.started_at,
                    now,
                    "countdown finished"
                );
                self.state = State::Done;
                Frame {
                    text: entry::EMPTY.to_string(),
                    completed: true,
                }
            }
        }
    }

    fn start(&mut self, now: u64) {
        self.target = self.entry.micros();
        self.started_at = now;
        self.state = State::Timing;
        debug!(
            entry = %self.entry,
            target_micros = self.target,
            started_at = now,
            "countdown started"
        );
    }

    fn cancel(&mut self, now: u64) {
        debug!(
            remaining_micros = self.remaining(now).unwrap_or(0),
            "countdown cancelled"
        );
        self.state = State::Input;
    }

    fn acknowledge(&mut self) {
        self.entry.reset();
        self.state = State::Input;
        debug!("completion acknowledged");
    }
}
