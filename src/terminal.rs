//! Terminal frame — the fake shell window command blocks are shown in.

use serde::Serialize;

use crate::services::activity::ActivityOption;

/// Window-control dots, left to right.
pub const TERMINAL_DOTS: [&str; 3] = ["#FF5A54", "#E5BF2F", "#51C22D"];
pub const TERMINAL_PROMPT: &str = ">";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalFrame {
    pub dots: [&'static str; 3],
    pub prompt: &'static str,
    pub lines: Vec<String>,
}

impl TerminalFrame {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { dots: TERMINAL_DOTS, prompt: TERMINAL_PROMPT, lines }
    }

    /// One line per option, showing the command name.
    #[must_use]
    pub fn from_options(options: &[ActivityOption]) -> Self {
        Self::new(options.iter().map(|o| o.name.clone()).collect())
    }

    /// One line per non-blank line of `text`, right-trimmed.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim_end)
                .filter(|l| !l.trim().is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Plain-text rendition: a title bar of dots, then the prompt beside
    /// the first line and the rest indented under it.
    #[must_use]
    pub fn render_text(&self) -> String {
        let indent = " ".repeat(self.prompt.chars().count() + 1);
        let mut out = String::from("● ● ●\n");
        if self.lines.is_empty() {
            out.push_str(self.prompt);
            out.push('\n');
            return out;
        }
        for (i, line) in self.lines.iter().enumerate() {
            if i == 0 {
                out.push_str(self.prompt);
                out.push(' ');
            } else {
                out.push_str(&indent);
            }
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
