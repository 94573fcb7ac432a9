use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use super::{Block, ListKind};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").expect("heading pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("ordered item pattern is valid"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*-]\s+(.*)$").expect("unordered item pattern is valid"));

static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s+(.*)$").expect("quote pattern is valid"));

/// A classified source line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading(u8, &'a str),
    Item(ListKind, &'a str),
    Quote(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(caps) = HEADING.captures(line) {
            let level = caps.get(1).map_or(1, |m| m.len()) as u8;
            return Line::Heading(level, capture(&caps, 2));
        }
        if let Some(caps) = ORDERED_ITEM.captures(line) {
            return Line::Item(ListKind::Ordered, capture(&caps, 1));
        }
        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            return Line::Item(ListKind::Unordered, capture(&caps, 1));
        }
        if let Some(caps) = QUOTE.captures(line) {
            return Line::Quote(capture(&caps, 1));
        }
        Line::Text(line)
    }
}

fn capture<'a>(caps: &regex::Captures<'a>, group: usize) -> &'a str {
    caps.get(group).map_or("", |m| m.as_str().trim())
}

/// What the parser is in the middle of.
#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Paragraph(Vec<String>),
    /// An open list. Blank lines keep it open so runs of the same kind merge.
    List { kind: ListKind, items: Vec<String> },
}

struct Parser {
    state: State,
    blocks: Vec<Block>,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::Idle,
            blocks: Vec::new(),
        }
    }

    fn flush(&mut self) {
        match mem::take(&mut self.state) {
            State::Idle => {}
            State::Paragraph(lines) => self.blocks.push(Block::Paragraph(lines)),
            State::List { kind, items } => self.blocks.push(Block::List { kind, items }),
        }
    }

    fn feed(&mut self, line: Line<'_>) {
        match line {
            Line::Blank => {
                if matches!(self.state, State::Paragraph(_)) {
                    self.flush();
                }
            }
            Line::Heading(level, text) => {
                self.flush();
                self.blocks.push(Block::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            Line::Quote(text) => {
                self.flush();
                self.blocks.push(Block::Blockquote(text.to_string()));
            }
            Line::Item(kind, text) => match &mut self.state {
                State::List { kind: open, items } if *open == kind => {
                    items.push(text.to_string());
                }
                _ => {
                    self.flush();
                    self.state = State::List {
                        kind,
                        items: vec![text.to_string()],
                    };
                }
            },
            Line::Text(text) => match &mut self.state {
                State::Paragraph(lines) => lines.push(text.to_string()),
                _ => {
                    self.flush();
                    self.state = State::Paragraph(vec![text.to_string()]);
                }
            },
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Split `text` into blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut parser = Parser::new();
    for raw in text.lines() {
        parser.feed(Line::classify(raw));
    }
    parser.finish()
}
