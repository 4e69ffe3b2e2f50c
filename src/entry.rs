//! The editable `HH:MM:SS` digit buffer.
//!
//! The buffer is a fixed record of six digit slots. Separators are not stored;
//! they only exist in the rendered form, which is always eight characters wide.
//! The cursor indexes logical slots, so moving across a field boundary never
//! needs to step over a colon.

use crate::duration;

/// Number of editable digit slots (two each for hours, minutes, seconds).
pub const SLOTS: usize = 6;

/// Character shown for a slot that has not been typed yet.
pub const PLACEHOLDER: char = '_';

/// Rendered form of an empty entry.
pub const EMPTY: &str = "__:__:__";

/// Width of the rendered entry, separators included.
pub const WIDTH: usize = 8;

/// A partially typed `HH:MM:SS` duration and its edit cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    slots: [Option<u8>; SLOTS],
    cursor: usize,
}

impl Entry {
    /// Creates an empty entry with the cursor on the first hour digit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an entry from an `HH:MM:SS` string of digits and `_`.
    ///
    /// The cursor is placed after the last typed slot so that typing resumes
    /// where the prefill stops.
    ///
    /// ```rust
    /// use bubbletea_countdown::entry::Entry;
    ///
    /// let entry = Entry::parse("00:05:__").unwrap();
    /// assert_eq!(entry.position(), 4);
    /// assert_eq!(entry.to_string(), "00:05:__");
    ///
    /// assert!(Entry::parse("5m").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != WIDTH || chars[2] != ':' || chars[5] != ':' {
            return Err(format!("expected HH:MM:SS, got {:?}", s));
        }

        let mut entry = Self::new();
        let digits = chars.iter().enumerate().filter(|(i, _)| *i != 2 && *i != 5);
        for (slot, (_, &c)) in digits.enumerate() {
            entry.slots[slot] = match c {
                '0'..='9' => Some(c as u8 - b'0'),
                PLACEHOLDER => None,
                other => return Err(format!("unexpected {:?} in {:?}", other, s)),
            };
        }
        entry.cursor = entry
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        Ok(entry)
    }

    /// Writes `digit` at the cursor and advances it.
    ///
    /// Returns `false` (leaving the entry untouched) when the buffer is full
    /// or `digit` is not a decimal digit.
    pub fn push_digit(&mut self, digit: char) -> bool {
        let Some(value) = digit.to_digit(10) else {
            return false;
        };
        if self.cursor >= SLOTS {
            return false;
        }
        self.slots[self.cursor] = Some(value as u8);
        self.cursor += 1;
        true
    }

    /// Steps the cursor back one slot and clears it.
    ///
    /// Returns `false` when the cursor is already at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.slots[self.cursor] = None;
        true
    }

    /// Clears every slot and moves the cursor to the start.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Logical cursor position in `[0, SLOTS]`.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Cursor position as a column of the rendered string.
    ///
    /// The column skips the separators: slot 2 renders at column 3 and
    /// slot 4 at column 6. A full entry reports [`WIDTH`].
    pub fn column(&self) -> usize {
        if self.cursor >= SLOTS {
            WIDTH
        } else {
            self.cursor + self.cursor / 2
        }
    }

    /// Whether all six slots hold a digit.
    pub fn is_full(&self) -> bool {
        self.cursor >= SLOTS
    }

    /// Whether nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Digit in `slot`, or `None` for a placeholder or an out-of-range slot.
    pub fn slot(&self, slot: usize) -> Option<u8> {
        self.slots.get(slot).copied().flatten()
    }

    /// The entry as a duration in microseconds (placeholders read as zero).
    pub fn micros(&self) -> u64 {
        let field = |tens: usize| {
            u64::from(self.slots[tens].unwrap_or(0)) * 10
                + u64::from(self.slots[tens + 1].unwrap_or(0))
        };
        duration::from_fields(field(0), field(2), field(4))
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i == 2 || i == 4 {
                f.write_str(":")?;
            }
            match slot {
                Some(d) => write!(f, "{}", d)?,
                None => write!(f, "{}", PLACEHOLDER)?,
            }
        }
        Ok(())
    }
}
