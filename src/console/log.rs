//! Scrolling message log
//!
//! Word-wrapped lines with a bounded history. Rendering goes through the
//! compositor's ghosted text; scroll hints use the small UI text.

use std::collections::VecDeque;

use crate::crt::Compositor;
use crate::rasterizer::{Color, ColorToken};

/// Player input lines are drawn slightly indented
const INPUT_INDENT: i32 = 10;
const SCROLLBAR_WIDTH: i32 = 5;
const SCROLLBAR_HEIGHT: i32 = 100;
const SCROLLBAR_TRACK: Color = Color::new(50, 50, 50);
const SCROLLBAR_THUMB: Color = Color::new(100, 100, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Game,
    Input,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub text: String,
    pub color: ColorToken,
    pub kind: LogKind,
}

/// Screen placement for the log
#[derive(Debug, Clone, Copy)]
pub struct LogLayout {
    pub x: i32,
    pub y: i32,
    pub line_height: i32,
    /// Right edge of the text panel (scrollbar sits just inside it)
    pub panel_right: i32,
}

pub struct TextLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
    visible: usize,
    columns: usize,
    /// Index of the first visible line
    scroll: usize,
}

impl TextLog {
    pub fn new(columns: usize, visible: usize, capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            visible: visible.max(1),
            columns: columns.max(1),
            scroll: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn push_game(&mut self, text: &str, color: ColorToken) {
        self.push(text, color, LogKind::Game);
    }

    pub fn push_input(&mut self, text: &str, color: ColorToken) {
        self.push(&format!("> {}", text), color, LogKind::Input);
    }

    pub fn push_system(&mut self, text: &str) {
        self.push(text, ColorToken::Gray, LogKind::System);
    }

    /// Wrap and append a message, then follow the newest line
    pub fn push(&mut self, text: &str, color: ColorToken, kind: LogKind) {
        for line in wrap(text, self.columns) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(LogLine { text: line, color, kind });
        }
        self.scroll_to_bottom();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.visible)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = (self.scroll + amount).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn visible_lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter().skip(self.scroll).take(self.visible)
    }

    pub fn latest(&self) -> Option<&LogLine> {
        self.lines.back()
    }

    pub fn render(&self, comp: &mut Compositor, layout: LogLayout) {
        for (row, line) in self.visible_lines().enumerate() {
            let indent = if line.kind == LogKind::Input { INPUT_INDENT } else { 0 };
            let y = layout.y + row as i32 * layout.line_height;
            comp.draw_text(&line.text, (layout.x + indent, y), line.color);
        }
        self.render_scroll_hints(comp, layout);
    }

    fn render_scroll_hints(&self, comp: &mut Compositor, layout: LogLayout) {
        let total = self.lines.len();
        if total <= self.visible {
            return;
        }

        let bar_x = layout.panel_right - 10;
        let thumb_h = ((self.visible as f32 / total as f32) * SCROLLBAR_HEIGHT as f32).max(20.0) as i32;
        let thumb_y = layout.y + ((self.scroll as f32 / total as f32) * SCROLLBAR_HEIGHT as f32) as i32;
        let canvas = comp.canvas_mut();
        canvas.fill_rect(bar_x, layout.y, SCROLLBAR_WIDTH, SCROLLBAR_HEIGHT, SCROLLBAR_TRACK);
        canvas.fill_rect(bar_x, thumb_y, SCROLLBAR_WIDTH, thumb_h, SCROLLBAR_THUMB);

        if self.scroll > 0 {
            comp.draw_ui_text("↑ MORE", (layout.x, layout.y - 12), ColorToken::Gray);
        }
        if self.scroll < self.max_scroll() {
            let bottom = layout.y + self.visible as i32 * layout.line_height;
            comp.draw_ui_text("↓ MORE", (layout.x, bottom), ColorToken::Gray);
        }
    }
}

/// Greedy word wrap by column count; words longer than a line are split
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let word_len = word.chars().count();
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

        if needed <= columns {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(columns).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                lines.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
                current_len = chunk.len();
            }
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
