//! Theory pages — markdown lessons turned into renderable blocks.
//!
//! DESIGN
//! ======
//! Lessons are authored in markdown. Clients do not parse it; they receive
//! a flat list of blocks with styling already decided. Fenced blocks get
//! custom treatment:
//!
//! - a fence of exactly `~~~` is shell output and becomes a [`TerminalFrame`];
//! - any other fence (backticks, `~~~~`) is highlighted as JavaScript with
//!   the dracula theme;
//! - indented code is left unhighlighted.
//!
//! Raw HTML is dropped. Nested lists are flattened into their parent list.
//! A block inside a list item splits the list around it so the page keeps
//! source order.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::terminal::TerminalFrame;

pub const CODE_LANGUAGE: &str = "javascript";
pub const CODE_THEME: &str = "dracula";
pub const FINISH_LABEL: &str = "FINALIZAR";
const TERMINAL_FENCE: &str = "~~~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub font_size: u32,
    pub line_height: Option<u32>,
    pub margin_top: u32,
}

pub const BODY_STYLE: TextStyle = TextStyle { font_size: 16, line_height: Some(20), margin_top: 0 };

/// Style for a heading level. Levels past 3 share the h3 style.
#[must_use]
pub fn heading_style(level: u8) -> TextStyle {
    match level {
        1 => TextStyle { font_size: 32, line_height: None, margin_top: 0 },
        2 => TextStyle { font_size: 24, line_height: Some(40), margin_top: 16 },
        _ => TextStyle { font_size: 24, line_height: Some(28), margin_top: 16 },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TheoryBlock {
    Heading { level: u8, text: String, style: TextStyle },
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
    Rule,
    Code { language: &'static str, theme: &'static str, code: String },
    /// Indented code, shown monospaced without highlighting.
    Preformatted { code: String },
    Terminal { frame: TerminalFrame },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TheoryDocument {
    pub title: String,
    pub blocks: Vec<TheoryBlock>,
    pub body_style: TextStyle,
    pub finish_label: &'static str,
}

/// Parse a lesson's markdown into a [`TheoryDocument`].
#[must_use]
pub fn render_theory(title: &str, markdown_text: &str) -> TheoryDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = BlockBuilder::default();
    for (event, range) in Parser::new_ext(markdown_text, options).into_offset_iter() {
        builder.push(event, range, markdown_text);
    }

    TheoryDocument {
        title: title.to_owned(),
        blocks: builder.blocks,
        body_style: BODY_STYLE,
        finish_label: FINISH_LABEL,
    }
}

impl TheoryDocument {
    /// Plain-text preview of the page, used by the `theory` command.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n\n", self.title);
        for block in &self.blocks {
            match block {
                TheoryBlock::Heading { level, text, .. } => {
                    out.push_str(&"#".repeat(usize::from(*level)));
                    out.push(' ');
                    out.push_str(text);
                    out.push('\n');
                }
                TheoryBlock::Paragraph { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                TheoryBlock::List { ordered, items } => {
                    for (i, item) in items.iter().enumerate() {
                        if *ordered {
                            out.push_str(&format!("{}. {item}\n", i + 1));
                        } else {
                            out.push_str(&format!("- {item}\n"));
                        }
                    }
                }
                TheoryBlock::Rule => out.push_str("----\n"),
                TheoryBlock::Code { code, .. } | TheoryBlock::Preformatted { code } => {
                    for line in code.lines() {
                        out.push_str("    ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                TheoryBlock::Terminal { frame } => out.push_str(&frame.render_text()),
            }
            out.push('\n');
        }
        out.push_str(&format!("[{}]\n", self.finish_label));
        out
    }
}

#[derive(Clone, Copy)]
enum CodeKind {
    Terminal,
    Highlighted,
    Plain,
}

struct CodeBuffer {
    kind: CodeKind,
    content: String,
}

struct ListBuffer {
    ordered: bool,
    items: Vec<String>,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<TheoryBlock>,
    text: String,
    heading: Option<u8>,
    code: Option<CodeBuffer>,
    lists: Vec<ListBuffer>,
}

impl BlockBuilder {
    fn push(&mut self, event: Event<'_>, range: Range<usize>, source: &str) {
        match event {
            Event::Start(tag) => self.start(tag, range, source),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match &mut self.code {
                Some(code) => code.content.push_str(&text),
                None => self.text.push_str(&text),
            },
            Event::Code(text) => self.text.push_str(&text),
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            Event::Rule => self.push_block(TheoryBlock::Rule),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>, source: &str) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_item();
                self.heading = Some(heading_level(level));
            }
            Tag::Paragraph if self.lists.is_empty() => self.text.clear(),
            Tag::List(start) => {
                // Text of the enclosing item precedes the nested items.
                self.flush_item();
                self.lists.push(ListBuffer { ordered: start.is_some(), items: Vec::new() });
            }
            Tag::Item => self.text.clear(),
            Tag::CodeBlock(kind) => {
                let raw = source.get(range);
                let kind = match kind {
                    CodeBlockKind::Indented => CodeKind::Plain,
                    CodeBlockKind::Fenced(_) if raw.is_some_and(is_terminal_fence) => CodeKind::Terminal,
                    CodeBlockKind::Fenced(_) => CodeKind::Highlighted,
                };
                self.code = Some(CodeBuffer { kind, content: String::new() });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text = self.take_text();
                self.push_block(TheoryBlock::Heading { level, text, style: heading_style(level) });
            }
            TagEnd::Paragraph if self.lists.is_empty() => {
                let text = self.take_text();
                if !text.is_empty() {
                    self.blocks.push(TheoryBlock::Paragraph { text });
                }
            }
            TagEnd::Paragraph => self.text.push(' '),
            TagEnd::Item => self.flush_item(),
            TagEnd::List(_) => {
                let Some(list) = self.lists.pop() else { return };
                match self.lists.last_mut() {
                    Some(parent) => parent.items.extend(list.items),
                    None if list.items.is_empty() => {}
                    None => self.blocks.push(TheoryBlock::List { ordered: list.ordered, items: list.items }),
                }
            }
            TagEnd::CodeBlock => {
                let Some(code) = self.code.take() else { return };
                let block = match code.kind {
                    CodeKind::Terminal => TheoryBlock::Terminal { frame: TerminalFrame::from_text(&code.content) },
                    CodeKind::Highlighted => {
                        TheoryBlock::Code { language: CODE_LANGUAGE, theme: CODE_THEME, code: code.content }
                    }
                    CodeKind::Plain => TheoryBlock::Preformatted { code: code.content },
                };
                self.push_block(block);
            }
            _ => {}
        }
    }

    /// Emit a standalone block. Inside a list, the items seen so far are
    /// emitted first and the rest of the list starts a new block.
    fn push_block(&mut self, block: TheoryBlock) {
        if !self.lists.is_empty() {
            self.flush_item();
            self.close_pending_list();
        }
        self.blocks.push(block);
    }

    fn close_pending_list(&mut self) {
        let Some(ordered) = self.lists.first().map(|list| list.ordered) else { return };
        let items: Vec<String> = self.lists.iter_mut().flat_map(|list| list.items.drain(..)).collect();
        if !items.is_empty() {
            self.blocks.push(TheoryBlock::List { ordered, items });
        }
    }

    fn flush_item(&mut self) {
        let text = self.take_text();
        if text.is_empty() {
            return;
        }
        if let Some(list) = self.lists.last_mut() {
            list.items.push(text);
        }
    }

    fn take_text(&mut self) -> String {
        let text = self.text.trim().to_owned();
        self.text.clear();
        text
    }
}

/// Only a fence of exactly three tildes is a terminal. The info string is
/// not part of the fence.
fn is_terminal_fence(raw: &str) -> bool {
    raw.trim_start().chars().take_while(|&c| c == '~').count() == TERMINAL_FENCE.len()
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
#[path = "theory_test.rs"]
mod tests;
