//! RETR0 Terminal: CRT-styled text adventure display
//!
//! Everything is drawn into a software canvas:
//! - Ghosted, color-bled text with horizontal jitter
//! - Scanlines, a rolling sweep band, flicker and static noise
//! - ASCII sprites and a spinning wireframe skull
//!
//! The window only presents the finished canvas.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod console;
mod crt;
mod rasterizer;
mod sprites;
mod wireframe;

use app::{AppState, InputEvent};
use crt::{load_config, CrtConfig};
use macroquad::prelude::*;
use rasterizer::{HEIGHT, WIDTH};
use std::path::Path;

const CONFIG_PATH: &str = "assets/crt.ron";
/// Canvas composition rate, independent of the display refresh
const TICK_RATE: f32 = 30.0;
/// Longest stall we try to catch up on
const MAX_CATCH_UP: f32 = 0.25;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RETR0 Terminal v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_or_default() -> CrtConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        tracing::info!("no {} found, using default display settings", CONFIG_PATH);
        return CrtConfig::default();
    }
    match load_config(path) {
        Ok(config) => {
            tracing::info!("loaded display settings from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            tracing::warn!("failed to load {}: {}, using defaults", CONFIG_PATH, e);
            CrtConfig::default()
        }
    }
}

/// Translate this frame's key presses
fn poll_input() -> Vec<InputEvent> {
    let mut events = Vec::new();
    while let Some(c) = get_char_pressed() {
        events.push(InputEvent::Char(c));
    }

    for (key, event) in [
        (KeyCode::Enter, InputEvent::Submit),
        (KeyCode::KpEnter, InputEvent::Submit),
        (KeyCode::Backspace, InputEvent::Backspace),
        (KeyCode::Up, InputEvent::HistoryUp),
        (KeyCode::Down, InputEvent::HistoryDown),
        (KeyCode::Escape, InputEvent::Clear),
        (KeyCode::F1, InputEvent::CycleColor),
        (KeyCode::PageUp, InputEvent::ScrollUp),
        (KeyCode::PageDown, InputEvent::ScrollDown),
        (KeyCode::Home, InputEvent::ScrollTop),
        (KeyCode::End, InputEvent::ScrollBottom),
    ] {
        if is_key_pressed(key) {
            events.push(event);
        }
    }
    events
}

fn take_screenshot(app: &AppState) {
    let path = format!("screenshot_{:06}.png", app.frame());
    match app.save_screenshot(&path) {
        Ok(()) => tracing::info!("saved screenshot {}", path),
        Err(e) => tracing::error!("screenshot failed: {}", e),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("=== RETR0 Terminal v{} ===", VERSION);

    let config = load_or_default();
    let mut app = AppState::new(config);

    let (canvas_w, canvas_h) = (app.canvas().width(), app.canvas().height());
    let (Ok(tex_w), Ok(tex_h)) = (u16::try_from(canvas_w), u16::try_from(canvas_h)) else {
        tracing::error!("canvas {}x{} is too large for a texture", canvas_w, canvas_h);
        return;
    };
    let texture = Texture2D::from_rgba8(tex_w, tex_h, app.canvas().pixels());
    texture.set_filter(FilterMode::Nearest);

    let step = 1.0 / TICK_RATE;
    let mut accumulator = 0.0f32;

    loop {
        for event in poll_input() {
            app.handle(event);
        }

        accumulator = (accumulator + get_frame_time()).min(MAX_CATCH_UP);
        let mut composed = false;
        while accumulator >= step {
            app.compose_frame();
            accumulator -= step;
            composed = true;
        }
        if composed {
            texture.update_from_bytes(canvas_w as u32, canvas_h as u32, app.canvas().pixels());
        }

        if is_key_pressed(KeyCode::F12) {
            take_screenshot(&app);
        }

        // Letterbox the canvas into the window at its native aspect
        clear_background(BLACK);
        let scale = (screen_width() / canvas_w as f32).min(screen_height() / canvas_h as f32);
        let (draw_w, draw_h) = (canvas_w as f32 * scale, canvas_h as f32 * scale);
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) / 2.0,
            (screen_height() - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
