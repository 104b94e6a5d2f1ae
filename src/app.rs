//! Application state and frame composition
//!
//! Owns every drawable piece and composes one canvas per tick. The window
//! loop in main.rs only translates keys into `InputEvent`s and presents the
//! finished canvas.

use std::path::Path;

use crate::console::{InputLine, LogLayout, TextLog};
use crate::crt::{Compositor, CrtConfig, Region};
use crate::rasterizer::{self, CanvasError, Color, ColorToken};
use crate::sprites::{SpriteAnimator, SpriteCatalog, DEFAULT_FRAME_SPEED};
use crate::wireframe::Projector;

const MARGIN: i32 = 20;
const LINE_GAP: i32 = 6;
/// Space kept below the log for the input line and help text
const INPUT_AREA: i32 = 120;
const LOG_CAPACITY: usize = 200;
const SPRITE_TOP: i32 = 80;
/// Skull center, measured back from the bottom-right corner
const SKULL_INSET: (i32, i32) = (150, 120);
const TITLE_SPRITE: &str = "monitor";
const CONSOLE_SPRITE: &str = "player_walk";

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Console,
}

/// Key input, already decoded from the window backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Submit,
    HistoryUp,
    HistoryDown,
    Clear,
    CycleColor,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
}

pub struct AppState {
    pub screen: Screen,
    pub compositor: Compositor,
    pub projector: Projector,
    pub sprites: SpriteCatalog,
    pub log: TextLog,
    pub input: InputLine,
    sprite_key: &'static str,
    animator: SpriteAnimator,
    frame: u64,
}

impl AppState {
    pub fn new(config: CrtConfig) -> Self {
        let text_scale = config.text_scale;
        let width = config.width as i32;
        let height = config.height as i32;
        let line_height = rasterizer::glyph_height(text_scale) + LINE_GAP;
        let columns = ((width / 2 - 2 * MARGIN) / rasterizer::advance(text_scale)).max(1) as usize;
        let visible = ((height - INPUT_AREA - MARGIN) / line_height).max(1) as usize;

        let sprites = SpriteCatalog::builtin();
        let animator = SpriteAnimator::new(sprites.frame_count(TITLE_SPRITE), DEFAULT_FRAME_SPEED);

        let mut app = Self {
            screen: Screen::Title,
            compositor: Compositor::new(config),
            projector: Projector::skull(),
            sprites,
            log: TextLog::new(columns, visible, LOG_CAPACITY.max(visible)),
            input: InputLine::new(),
            sprite_key: TITLE_SPRITE,
            animator,
            frame: 0,
        };
        app.welcome();
        app
    }

    fn welcome(&mut self) {
        self.log.push_game("RETR0 TERMINAL", ColorToken::Yellow);
        self.log.push_game("*****************", ColorToken::Yellow);
        self.log.push_game("Type a line and press ENTER to begin.", ColorToken::Green);
        self.log.push_game("SPACE on an empty line toggles red text.", ColorToken::Blue);
        self.log.push_game("F1 cycles the text color.", ColorToken::Purple);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sprite_key(&self) -> &'static str {
        self.sprite_key
    }

    pub fn canvas(&self) -> &rasterizer::Canvas {
        self.compositor.canvas()
    }

    fn log_layout(&self) -> LogLayout {
        let text_scale = self.compositor.config().text_scale;
        LogLayout {
            x: MARGIN,
            y: MARGIN,
            line_height: rasterizer::glyph_height(text_scale) + LINE_GAP,
            panel_right: self.compositor.width() / 2,
        }
    }

    fn set_sprite(&mut self, key: &'static str) {
        if self.sprite_key != key {
            self.sprite_key = key;
            self.animator.reset(self.sprites.frame_count(key));
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        tracing::info!(from = ?self.screen, to = ?screen, "screen change");
        self.screen = screen;
        self.set_sprite(match screen {
            Screen::Title => TITLE_SPRITE,
            Screen::Console => CONSOLE_SPRITE,
        });
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(c) => self.input.insert_char(c),
            InputEvent::Backspace => self.input.backspace(),
            InputEvent::Submit => {
                if let Some(line) = self.input.submit() {
                    self.submit_line(&line);
                }
            }
            InputEvent::HistoryUp => self.input.history_up(),
            InputEvent::HistoryDown => self.input.history_down(),
            InputEvent::Clear => self.input.clear(),
            InputEvent::CycleColor => self.input.cycle_color(),
            InputEvent::ScrollUp => self.log.scroll_up(1),
            InputEvent::ScrollDown => self.log.scroll_down(1),
            InputEvent::ScrollTop => self.log.scroll_to_top(),
            InputEvent::ScrollBottom => self.log.scroll_to_bottom(),
        }
    }

    fn submit_line(&mut self, line: &str) {
        if self.screen == Screen::Title {
            self.log.clear();
            self.log.push_system("CONNECTION ESTABLISHED");
            self.set_screen(Screen::Console);
        }
        tracing::debug!(line, "submitted");
        self.log.push_input(line, self.input.color());
    }

    /// Build the next frame into the compositor's canvas
    pub fn compose_frame(&mut self) {
        self.frame += 1;
        self.compositor.canvas_mut().clear(Color::BLACK);
        self.compositor.begin_frame();

        self.projector.tick();
        self.animator.update();
        self.input.update();

        let layout = self.log_layout();
        self.log.render(&mut self.compositor, layout);

        let width = self.compositor.width();
        let height = self.compositor.height();
        let lines = self.sprites.frame(self.sprite_key, self.animator.frame_index());
        let region = Region::new(width / 2, SPRITE_TOP, width / 2);
        self.compositor.draw_sprite(lines, region, self.input.color());

        if self.screen == Screen::Title {
            self.projector.render(
                self.compositor.canvas_mut(),
                width - SKULL_INSET.0,
                height - SKULL_INSET.1,
            );
        }

        self.input.render(&mut self.compositor, (MARGIN, height - INPUT_AREA + MARGIN));

        if self.screen == Screen::Console {
            self.draw_status();
        }

        self.compositor.end_frame();
    }

    fn draw_status(&mut self) {
        let ui_scale = self.compositor.config().ui_text_scale;
        let x = self.compositor.width() - 15 * rasterizer::advance(ui_scale);
        let pitch = rasterizer::glyph_height(ui_scale) + 5;
        let frame = format!("FRAME {}", self.frame);
        let lines = format!("LINES {}", self.log.len());
        self.compositor.draw_ui_text(&frame, (x, MARGIN / 2), ColorToken::Green);
        self.compositor.draw_ui_text(&lines, (x, MARGIN / 2 + pitch), ColorToken::Blue);
    }

    pub fn save_screenshot<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.compositor.canvas().save_png(path)
    }
}
