//! Countdown widget for Bubble Tea applications.
//!
//! The user types a duration as `HH:MM:SS`, presses enter, and the widget
//! counts down to zero. When it gets there the widget sends a
//! [`CompletionMsg`] once, shows the finished text, and waits for another
//! enter before clearing the entry for the next countdown.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, Model};
//! use bubbletea_countdown::config::Config;
//! use bubbletea_countdown::entry::Entry;
//!
//! // Empty entry, default settings.
//! let countdown = new();
//! assert_eq!(countdown.frame_text(), "__:__:__");
//!
//! // Prefilled five minutes, cancellable with esc.
//! let countdown = Model::with_config(Config::default().with_allow_cancel(true))
//!     .with_entry(Entry::parse("00:05:00").unwrap());
//! assert_eq!(countdown.frame_text(), "00:05:00");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_countdown::countdown::{self, CompletionMsg};
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     countdown: countdown::Model,
//!     finished: u32,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { countdown: countdown::new(), finished: 0 }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<CompletionMsg>() {
//!             if done.id == self.countdown.id() {
//!                 self.finished += 1;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```
//!
//! # Time
//!
//! The widget reads time through a [`Clock`](crate::clock::Clock). Pass a
//! [`ManualClock`](crate::clock::ManualClock) to
//! [`Model::with_clock`] to drive it deterministically.

pub mod keymap;
pub mod machine;
pub mod model;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use keymap::{default_key_map, KeyMap};
pub use machine::{Countdown, Frame, Key, State};
pub use model::{new, Model};
pub use types::{CompletionMsg, TickMsg};
