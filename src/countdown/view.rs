//! Rendering for the countdown widget.

use super::machine::State;
use super::model::Model;
use crate::key::KeyMap as _;
use lipgloss_extras::lipgloss;

const HELP_SEPARATOR: &str = " • ";

impl Model {
    /// Renders the display line and the help line.
    ///
    /// Once a window size has been received the block is centered in it,
    /// slightly below the vertical middle.
    pub fn view(&self) -> String {
        let mut lines = vec![self.display_view()];
        let help = self.help_view();
        if !help.is_empty() {
            lines.push(String::new());
            lines.push(help);
        }
        self.place(lines)
    }

    /// The styled `HH:MM:SS` (or finished text) on its own.
    pub fn display_view(&self) -> String {
        match self.countdown.state() {
            State::Input if self.focus => self.entry_view(),
            State::Done => self.styles.done.clone().inline(true).render(&self.frame),
            State::Input | State::Timing => {
                self.styles.digits.clone().inline(true).render(&self.frame)
            }
        }
    }

    /// Bindings available in the current state, e.g. `enter start`.
    pub fn help_view(&self) -> String {
        let parts: Vec<String> = self
            .key_map
            .short_help()
            .into_iter()
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        self.styles
            .help
            .clone()
            .inline(true)
            .render(&parts.join(HELP_SEPARATOR))
    }

    fn entry_view(&self) -> String {
        let column = self.countdown.entry().column();
        let chars: Vec<char> = self.frame.chars().collect();
        let digits = self.styles.digits.clone().inline(true);
        if column >= chars.len() {
            return digits.render(&self.frame);
        }

        let before: String = chars[..column].iter().collect();
        let under = chars[column].to_string();
        let after: String = chars[column + 1..].iter().collect();

        let mut out = String::new();
        if !before.is_empty() {
            out.push_str(&digits.render(&before));
        }
        out.push_str(&self.styles.cursor.clone().inline(true).render(&under));
        if !after.is_empty() {
            out.push_str(&digits.render(&after));
        }
        out
    }

    fn place(&self, lines: Vec<String>) -> String {
        let width = usize::from(self.width);
        let height = usize::from(self.height);
        if width == 0 || height == 0 {
            return lines.join("\n");
        }

        let top = (height * 55 / 100).saturating_sub(1).min(height.saturating_sub(lines.len()));
        let mut out = vec![String::new(); top];
        for line in lines {
            if line.is_empty() {
                out.push(line);
                continue;
            }
            let pad = width.saturating_sub(lipgloss::width_visible(&line)) / 2;
            out.push(format!("{}{}", " ".repeat(pad), line));
        }
        out.join("\n")
    }
}
