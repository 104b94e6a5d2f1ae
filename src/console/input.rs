//! Command input line
//!
//! Single-line editor with history recall and a cycling text color.

use std::collections::VecDeque;

use crate::crt::Compositor;
use crate::rasterizer::{self, ColorToken};

pub const MAX_INPUT_LEN: usize = 50;
pub const HISTORY_LEN: usize = 20;
/// Frames between cursor blink toggles
pub const CURSOR_BLINK: u32 = 30;

const PROMPT: &str = "> ";
const CURSOR: &str = "_";

/// Colors the F1 key steps through
pub const COLOR_CYCLE: [ColorToken; 6] = [
    ColorToken::Green,
    ColorToken::Red,
    ColorToken::Blue,
    ColorToken::Yellow,
    ColorToken::Purple,
    ColorToken::White,
];

const HELP_LINES: [&str; 2] = [
    "ENTER: SUBMIT  UP/DOWN: HISTORY  F1: COLOR",
    "PGUP/PGDN: SCROLL  ESC: CLEAR  F12: SCREENSHOT",
];

pub struct InputLine {
    text: String,
    history: VecDeque<String>,
    /// Position while browsing history; None when editing fresh text
    history_cursor: Option<usize>,
    color_index: usize,
    cursor_visible: bool,
    blink_timer: u32,
}

impl InputLine {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            history: VecDeque::with_capacity(HISTORY_LEN),
            history_cursor: None,
            color_index: 0,
            cursor_visible: true,
            blink_timer: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> ColorToken {
        COLOR_CYCLE[self.color_index]
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Type a character. A space on an empty line flips between green and red.
    pub fn insert_char(&mut self, c: char) {
        if c == ' ' && self.text.is_empty() {
            self.color_index = if self.color() == ColorToken::Red { 0 } else { 1 };
            return;
        }
        if c.is_control() || self.text.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        self.text.push(c);
        self.history_cursor = None;
    }

    pub fn backspace(&mut self) {
        self.text.pop();
        self.history_cursor = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.history_cursor = None;
    }

    pub fn cycle_color(&mut self) {
        self.color_index = (self.color_index + 1) % COLOR_CYCLE.len();
    }

    /// Take the trimmed line; blank lines are swallowed
    pub fn submit(&mut self) -> Option<String> {
        let line = self.text.trim().to_string();
        self.clear();
        if line.is_empty() {
            return None;
        }
        self.remember(&line);
        Some(line)
    }

    fn remember(&mut self, line: &str) {
        if let Some(pos) = self.history.iter().position(|h| h == line) {
            self.history.remove(pos);
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
    }

    /// Step back to an older entry
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_cursor {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.recall(index);
    }

    /// Step forward; past the newest entry the line empties
    pub fn history_down(&mut self) {
        let Some(i) = self.history_cursor else {
            return;
        };
        if i + 1 < self.history.len() {
            self.recall(i + 1);
        } else {
            self.clear();
        }
    }

    fn recall(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.text = entry.clone();
            self.history_cursor = Some(index);
        }
    }

    pub fn update(&mut self) {
        self.blink_timer += 1;
        if self.blink_timer >= CURSOR_BLINK {
            self.blink_timer = 0;
            self.cursor_visible = !self.cursor_visible;
        }
    }

    /// Draw the prompt line at `pos` with help text underneath
    pub fn render(&self, comp: &mut Compositor, pos: (i32, i32)) {
        let mut line = format!("{}{}", PROMPT, self.text);
        if self.cursor_visible {
            line.push_str(CURSOR);
        }
        comp.draw_text(&line, pos, self.color());

        let below = pos.1 + rasterizer::glyph_height(comp.config().text_scale) + 8;
        let ui_pitch = rasterizer::glyph_height(comp.config().ui_text_scale) + 4;
        for (i, help) in HELP_LINES.iter().enumerate() {
            comp.draw_ui_text(help, (pos.0, below + i as i32 * ui_pitch), ColorToken::Gray);
        }
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputLine {
        let mut input = InputLine::new();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("look");
        assert_eq!(input.text(), "look");
        input.backspace();
        assert_eq!(input.text(), "loo");
        input.insert_char('\n');
        assert_eq!(input.text(), "loo");
    }

    #[test]
    fn test_length_limit() {
        let input = typed(&"x".repeat(80));
        assert_eq!(input.text().len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_leading_space_toggles_red() {
        let mut input = InputLine::new();
        input.insert_char(' ');
        assert_eq!(input.color(), ColorToken::Red);
        assert_eq!(input.text(), "");
        input.insert_char(' ');
        assert_eq!(input.color(), ColorToken::Green);

        let mut input = typed("go");
        input.insert_char(' ');
        assert_eq!(input.text(), "go ");
        assert_eq!(input.color(), ColorToken::Green);
    }

    #[test]
    fn test_color_cycle_wraps() {
        let mut input = InputLine::new();
        for _ in 0..COLOR_CYCLE.len() {
            input.cycle_color();
        }
        assert_eq!(input.color(), ColorToken::Green);
        input.cycle_color();
        assert_eq!(input.color(), ColorToken::Red);
    }

    #[test]
    fn test_submit_trims_and_ignores_blank() {
        let mut input = typed("open door  ");
        assert_eq!(input.submit().as_deref(), Some("open door"));
        assert_eq!(input.text(), "");
        assert!(input.submit().is_none());
        assert_eq!(input.history().count(), 1);
    }

    #[test]
    fn test_history_recall() {
        let mut input = InputLine::new();
        for cmd in ["north", "look", "north"] {
            for c in cmd.chars() {
                input.insert_char(c);
            }
            input.submit();
        }
        assert_eq!(input.history().collect::<Vec<_>>(), vec!["look", "north"]);

        input.history_up();
        assert_eq!(input.text(), "north");
        input.history_up();
        assert_eq!(input.text(), "look");
        input.history_up();
        assert_eq!(input.text(), "look");
        input.history_down();
        assert_eq!(input.text(), "north");
        input.history_down();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_history_capacity() {
        let mut input = InputLine::new();
        for i in 0..HISTORY_LEN + 5 {
            for c in format!("cmd{}", i).chars() {
                input.insert_char(c);
            }
            input.submit();
        }
        assert_eq!(input.history().count(), HISTORY_LEN);
        assert_eq!(input.history().next(), Some("cmd5"));
    }

    #[test]
    fn test_cursor_blinks() {
        let mut input = InputLine::new();
        assert!(input.cursor_visible());
        for _ in 0..CURSOR_BLINK {
            input.update();
        }
        assert!(!input.cursor_visible());
        for _ in 0..CURSOR_BLINK {
            input.update();
        }
        assert!(input.cursor_visible());
    }
}
