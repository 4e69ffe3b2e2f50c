//! The countdown widget model.

use super::keymap::{default_key_map, KeyMap};
use super::machine::{Countdown, Key, State};
use super::types::{CompletionMsg, TickMsg};
use crate::clock::{Clock, MonotonicClock};
use crate::config::{Config, Styles, DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL};
use crate::duration::MICROS_PER_SECOND;
use crate::entry::Entry;
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::KeyCode;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

// Ids let several widgets share one program without reacting to each
// other's ticks.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A countdown widget: digit entry, live countdown, and completion notice.
///
/// Key presses are only handled while the widget is focused; new widgets
/// start focused.
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, State};
/// use bubbletea_rs::KeyMsg;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let mut countdown = new();
/// for c in "000130".chars() {
///     countdown.update(Box::new(KeyMsg {
///         key: KeyCode::Char(c),
///         modifiers: KeyModifiers::NONE,
///     }));
/// }
/// assert_eq!(countdown.frame_text(), "00:01:30");
///
/// let tick = countdown.update(Box::new(KeyMsg {
///     key: KeyCode::Enter,
///     modifiers: KeyModifiers::NONE,
/// }));
/// assert!(tick.is_some());
/// assert_eq!(countdown.state(), State::Timing);
/// ```
pub struct Model {
    /// Key bindings.
    pub key_map: KeyMap,
    /// View styles.
    pub styles: Styles,

    pub(super) countdown: Countdown,
    pub(super) frame: String,
    pub(super) focus: bool,
    pub(super) width: u16,
    pub(super) height: u16,

    config: Config,
    clock: Arc<dyn Clock>,
    id: i64,
    pub(super) tag: i64,
}

/// Creates a focused widget with the default configuration and a real clock.
pub fn new() -> Model {
    Model::with_config(Config::default())
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Creates a focused widget using `config` and a real clock.
    pub fn with_config(config: Config) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Creates a focused widget reading time from `clock`.
    ///
    /// A tick interval of zero or over one second is replaced by
    /// [`DEFAULT_TICK_INTERVAL`].
    pub fn with_clock(mut config: Config, clock: Arc<dyn Clock>) -> Self {
        if config.tick_interval.is_zero() || config.tick_interval > MAX_TICK_INTERVAL {
            warn!(
                interval = ?config.tick_interval,
                fallback = ?DEFAULT_TICK_INTERVAL,
                "tick interval out of range"
            );
            config.tick_interval = DEFAULT_TICK_INTERVAL;
        }
        let countdown = Countdown::new(&config);
        let mut key_map = default_key_map();
        key_map.cancel.set_enabled(config.allow_cancel);
        let mut model = Self {
            key_map,
            styles: config.styles.clone(),
            frame: String::new(),
            countdown,
            focus: true,
            width: 0,
            height: 0,
            config,
            clock,
            id: next_id(),
            tag: 0,
        };
        model.refresh_frame();
        model
    }

    /// Prefills the digit entry. Ignored once a countdown has started.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        if self.state() != State::Input {
            return self;
        }
        self.countdown = self.countdown.with_entry(entry);
        self.refresh_frame();
        self
    }

    /// Unique id of this widget, carried by its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The settings this widget was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current state of the countdown.
    pub fn state(&self) -> State {
        self.countdown.state()
    }

    /// The digit entry.
    pub fn entry(&self) -> &Entry {
        self.countdown.entry()
    }

    /// Unstyled text of the most recent frame.
    pub fn frame_text(&self) -> &str {
        &self.frame
    }

    /// Time left on the running countdown, `None` when not timing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::prelude::*;
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new(0);
    /// let mut countdown = Countdown::with_clock(Config::default(), Arc::new(clock.clone()))
    ///     .with_entry(Entry::parse("00:01:00").unwrap());
    /// assert_eq!(countdown.remaining(), None);
    ///
    /// assert!(countdown.start().is_some());
    /// clock.advance(Duration::from_secs(15));
    /// assert_eq!(countdown.remaining(), Some(Duration::from_secs(45)));
    /// ```
    pub fn remaining(&self) -> Option<Duration> {
        self.countdown
            .remaining(self.clock.now_micros())
            .map(Duration::from_micros)
    }

    /// Starts the countdown from the current entry, as if confirm was pressed.
    ///
    /// # Returns
    ///
    /// The command that drives the display, or `None` when not in the input
    /// state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::prelude::*;
    ///
    /// let mut countdown = countdown_new().with_entry(Entry::parse("00:00:30").unwrap());
    /// assert!(countdown.start().is_some());
    /// assert_eq!(countdown.state(), State::Timing);
    ///
    /// // Already running.
    /// assert!(countdown.start().is_none());
    /// ```
    pub fn start(&mut self) -> Option<Cmd> {
        if self.state() != State::Input {
            return None;
        }
        self.apply(Key::Confirm)
    }

    /// Handles key, tick, completion and window-size messages.
    ///
    /// Key messages are ignored while blurred. Ticks and completion messages
    /// are only accepted when they carry this widget's id, and ticks must
    /// also belong to the countdown currently running.
    ///
    /// # Returns
    ///
    /// The next tick while counting down, the one-shot completion command on
    /// the update that sees the countdown reach zero, otherwise `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::prelude::*;
    /// use bubbletea_rs::{KeyMsg, WindowSizeMsg};
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let mut countdown = countdown_new();
    /// countdown.update(Box::new(KeyMsg {
    ///     key: KeyCode::Char('4'),
    ///     modifiers: KeyModifiers::NONE,
    /// }));
    /// assert_eq!(countdown.frame_text(), "4_:__:__");
    ///
    /// // Window sizes only affect placement.
    /// let cmd = countdown.update(Box::new(WindowSizeMsg { width: 80, height: 24 }));
    /// assert!(cmd.is_none());
    ///
    /// let cmd = countdown.update(Box::new(KeyMsg {
    ///     key: KeyCode::Enter,
    ///     modifiers: KeyModifiers::NONE,
    /// }));
    /// assert!(cmd.is_some());
    /// assert_eq!(countdown.state(), State::Timing);
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width;
            self.height = size.height;
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.id || tick.tag != self.tag || self.state() != State::Timing {
                trace!(id = tick.id, tag = tick.tag, current = self.tag, "stale tick dropped");
                return None;
            }
            return self.refresh();
        }

        if let Some(done) = msg.downcast_ref::<CompletionMsg>() {
            if done.id == self.id && self.state() == State::Done {
                self.refresh_frame();
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focus {
                return None;
            }
            let key = self.translate(key_msg)?;
            return self.apply(key);
        }

        None
    }

    fn translate(&self, msg: &KeyMsg) -> Option<Key> {
        if self.key_map.confirm.matches(msg) {
            Some(Key::Confirm)
        } else if self.key_map.delete.matches(msg) {
            Some(Key::Backspace)
        } else if self.key_map.cancel.matches(msg) {
            Some(Key::Cancel)
        } else if self.key_map.digit.matches(msg) {
            match msg.key {
                KeyCode::Char(c) => Some(Key::Digit(c)),
                _ => None,
            }
        } else {
            None
        }
    }

    fn apply(&mut self, key: Key) -> Option<Cmd> {
        let before = self.state();
        if !self.countdown.handle_key(key, self.clock.now_micros()) {
            return None;
        }
        if before != State::Timing && self.state() == State::Timing {
            // Orphan any ticks still in flight from an earlier countdown.
            self.tag += 1;
        }
        self.refresh()
    }

    /// Recomputes the frame and returns the follow-up command, if any.
    fn refresh(&mut self) -> Option<Cmd> {
        let frame = self.countdown.display(self.clock.now_micros());
        self.frame = frame.text;
        self.key_map.sync(self.state());
        if frame.completed {
            return Some(self.completion());
        }
        (self.state() == State::Timing).then(|| self.tick())
    }

    /// Recomputes the frame outside the timing state. Timing frames only
    /// change through `refresh`, which owns completion detection.
    fn refresh_frame(&mut self) {
        if self.state() == State::Timing {
            return;
        }
        self.frame = self.countdown.display(self.clock.now_micros()).text;
        self.key_map.sync(self.state());
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.next_interval(), move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn completion(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompletionMsg { id }) as Msg
        })
    }

    /// Tick interval, shortened to land on the next whole-second boundary
    /// when that comes sooner.
    pub(super) fn next_interval(&self) -> Duration {
        let interval = self.config.tick_interval;
        match self.countdown.remaining(self.clock.now_micros()) {
            Some(remaining) => {
                let to_boundary = match remaining % MICROS_PER_SECOND {
                    0 => MICROS_PER_SECOND,
                    r => r,
                };
                interval.min(Duration::from_micros(to_boundary))
            }
            None => interval,
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
