//! Terminal maze walker (default binary).
//!
//! Renders a first-person view of a tile map with a minimap overlay.
//! W/S walk, A/D turn, Q or Esc quits.
//!
//! Set `GLYPHCAST_LOG_PATH` to write logs to a file; `GLYPHCAST_LOG` takes
//! an `EnvFilter` directive (default: `info`).

use std::fs::File;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use glyphcast::core::{Rgb, Sprite};
use glyphcast::input::{should_quit, InputState};
use glyphcast::term::{
    Camera, Canvas, ConsoleCanvas, FirstPersonView, RenderConfig, TerminalSink,
};
use glyphcast::types::{Alignment, Rect, WALL_GLYPH};

const MAZE: &str = "\
################
#      #       #
#  ##  #  ###  #
#  #      #    #
#  #  #####  ###
#     #        #
####  #  ####  #
#        #     #
#  ####  #  #  #
#     #     #  #
################";

/// Map cells per second.
const WALK_SPEED: f32 = 3.0;
/// Radians per second.
const TURN_SPEED: f32 = 2.0;

const PLAYER_GLYPH: char = '@';

fn main() -> Result<()> {
    let config = RenderConfig::from_env();
    init_logging(&config)?;

    let (w, h) = TerminalSink::size().unwrap_or((80, 24));
    let mut sink = TerminalSink::new();
    sink.enter()?;

    let mut canvas = ConsoleCanvas::new(w, h, sink, config.color_mode);
    let result = run(&mut canvas, &config);

    // Always try to restore terminal state.
    let _ = canvas.sink_mut().exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}

fn init_logging(config: &RenderConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
    let filter = EnvFilter::try_from_env("GLYPHCAST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(canvas: &mut ConsoleCanvas<TerminalSink>, config: &RenderConfig) -> Result<()> {
    let map = Sprite::from_text(MAZE, Rgb::new(120, 120, 140), Rgb::BLACK)?;
    let view = FirstPersonView::default();
    let mut camera = Camera::new(Vec2::new(1.5, 1.5), 0.0);
    let mut input = InputState::new();

    let frame = config.frame_duration();
    let mut last_frame = Instant::now();
    let mut fps = config.target_fps as f32;

    tracing::info!(
        width = canvas.width(),
        height = canvas.height(),
        mode = ?config.color_mode,
        target_fps = config.target_fps,
        "starting"
    );

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;
        input.begin_frame(dt.as_millis() as u32);

        let secs = dt.as_secs_f32();
        if secs > 0.0 {
            fps = fps * 0.9 + (1.0 / secs) * 0.1;
        }

        if input.is_held(KeyCode::Char('a')) || input.is_held(KeyCode::Left) {
            camera.turn(-TURN_SPEED * secs);
        }
        if input.is_held(KeyCode::Char('d')) || input.is_held(KeyCode::Right) {
            camera.turn(TURN_SPEED * secs);
        }
        if input.is_held(KeyCode::Char('w')) || input.is_held(KeyCode::Up) {
            camera.walk(&map, WALK_SPEED * secs, WALL_GLYPH);
        }
        if input.is_held(KeyCode::Char('s')) || input.is_held(KeyCode::Down) {
            camera.walk(&map, -WALK_SPEED * secs, WALL_GLYPH);
        }

        draw_frame(canvas, &view, &map, &camera, fps)?;
        canvas.render()?;

        // Input with timeout until next frame.
        let deadline = now + frame;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            let ev = event::read()?;
            match &ev {
                Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(*key) => {
                    tracing::info!("quit requested");
                    return Ok(());
                }
                Event::Resize(w, h) => {
                    tracing::debug!(w, h, "terminal resized; canvas size is fixed");
                    canvas.invalidate();
                }
                _ => {}
            }
            input.handle_event(&ev);
        }
    }
}

fn draw_frame(
    canvas: &mut ConsoleCanvas<TerminalSink>,
    view: &FirstPersonView,
    map: &Sprite,
    camera: &Camera,
    fps: f32,
) -> Result<()> {
    let w = canvas.width();
    let h = canvas.height();
    let status_row = h - 1;

    view.render(canvas, map, camera, Rect::new(0, 0, w, status_row))?;

    // Minimap in the top-left corner, inside a border.
    let mut minimap = map.clone();
    let player = camera.position.floor().as_ivec2();
    minimap.set_glyph_at_point(player, PLAYER_GLYPH);
    minimap.set_foreground_at_point(player, Rgb::new(255, 210, 60));
    let area = Rect::new(1, 1, minimap.width(), minimap.height());
    canvas.fill(area, ' ', Rgb::WHITE, Rgb::BLACK);
    canvas.draw_sprite(&minimap, area.position());
    canvas.draw_border(area, Rgb::new(160, 160, 160), Rgb::BLACK);

    let status = format!(
        "{:5.1} fps  x {:5.2}  y {:5.2}  heading {:4.0}°",
        fps,
        camera.position.x,
        camera.position.y,
        camera.heading.to_degrees()
    );
    canvas.fill(Rect::new(0, status_row, w, 1), ' ', Rgb::WHITE, Rgb::BLACK);
    canvas.draw_string(0, status_row, &status, Rgb::WHITE, Rgb::BLACK, Alignment::Left);
    canvas.draw_string(
        w,
        status_row,
        "WASD move  Q quit",
        Rgb::new(140, 140, 140),
        Rgb::BLACK,
        Alignment::Right,
    );
    Ok(())
}
