#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A keyboard-driven countdown timer widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, plus a small `countdown` binary that runs it full screen.
//!
//! ## Overview
//!
//! The user types a duration as `HH:MM:SS`, presses enter, and the widget
//! counts down in real time. At zero it emits a completion message once,
//! shows a finished notice, and waits for enter before clearing the entry.
//!
//! The crate is layered so the logic can be used without a terminal:
//!
//! - [`duration`]: total conversions between `HH:MM:SS` strings and microseconds
//! - [`entry`]: the six-slot digit buffer and its edit cursor
//! - [`countdown::Countdown`]: the Input → Timing → Done state machine
//! - [`clock`]: monotonic time sources, including a manual clock for tests
//! - [`countdown::Model`]: the bubbletea-rs component built on the above
//!
//! ## Using the state machine directly
//!
//! ```rust
//! use bubbletea_countdown::countdown::{Countdown, Key, State};
//!
//! let mut countdown = Countdown::default();
//! for c in "000005".chars() {
//!     countdown.handle_key(Key::Digit(c), 0);
//! }
//! countdown.handle_key(Key::Confirm, 1_000_000);
//! assert_eq!(countdown.display(4_000_000).text, "00:00:02");
//!
//! let frame = countdown.display(7_000_000);
//! assert!(frame.completed);
//! assert_eq!(countdown.state(), State::Done);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { countdown: countdown_new() }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if msg.downcast_ref::<CompletionMsg>().is_some() {
//!             // ring a bell, send a notification, ...
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod clock;
pub mod config;
pub mod countdown;
pub mod duration;
pub mod entry;
pub mod key;

use bubbletea_rs::Cmd;

/// Focus management for components that take keyboard input.
///
/// A focused component reacts to key messages; a blurred one ignores them
/// but keeps processing its own timing messages, so a running countdown keeps
/// counting while another widget has the keyboard.
///
/// ## Focus States
///
/// - **Focused**: key messages are routed to the component and the edit
///   cursor is highlighted
/// - **Blurred**: key messages are ignored and the entry renders without a
///   cursor
///
/// ## Implementation Guidelines
///
/// - `focus()` sets the focused state and may return a command to run when
///   focus is gained
/// - `blur()` clears the focused state
/// - `focused()` reports the current state
///
/// ## Examples
///
/// ### Basic Usage
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let mut countdown = countdown_new();
/// assert!(countdown.focused());
///
/// countdown.blur();
/// assert!(!countdown.focused());
///
/// let _cmd = countdown.focus();
/// assert!(countdown.focused());
/// ```
///
/// ### Switching Between Two Countdowns
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
/// use bubbletea_rs::Cmd;
///
/// struct App {
///     tea: Countdown,
///     eggs: Countdown,
///     active: usize,
/// }
///
/// impl App {
///     fn focus_next(&mut self) -> Option<Cmd> {
///         match self.active {
///             0 => self.tea.blur(),
///             _ => self.eggs.blur(),
///         }
///         self.active = (self.active + 1) % 2;
///         match self.active {
///             0 => self.tea.focus(),
///             _ => self.eggs.focus(),
///         }
///     }
/// }
///
/// let mut app = App { tea: countdown_new(), eggs: countdown_new(), active: 0 };
/// app.eggs.blur();
/// app.focus_next();
/// assert!(!app.tea.focused());
/// assert!(app.eggs.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command to run when focus is gained.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{Config, Styles};
pub use countdown::{
    new as countdown_new, CompletionMsg, Countdown as CountdownMachine, Frame, Key,
    KeyMap as CountdownKeyMap, Model as Countdown, State, TickMsg as CountdownTickMsg,
};
pub use entry::Entry;
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let config = Config::default().with_allow_cancel(true);
/// let countdown = Countdown::with_config(config);
/// assert_eq!(countdown.state(), State::Input);
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, MonotonicClock};
    pub use crate::config::{Config, Styles};
    pub use crate::countdown::{
        new as countdown_new, CompletionMsg, Countdown as CountdownMachine, Frame, Key,
        KeyMap as CountdownKeyMap, Model as Countdown, State, TickMsg as CountdownTickMsg,
    };
    pub use crate::entry::Entry;
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
    pub use crate::Component;
}
