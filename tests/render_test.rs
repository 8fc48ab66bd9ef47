use glyphcast::core::Rgb;
use glyphcast::term::{Canvas, ColorMode, ConsoleCanvas, FrameEncoder, RenderConfig};
use glyphcast::types::{Alignment, Point, Rect};

fn frame_text(canvas: ConsoleCanvas<Vec<u8>>) -> String {
    String::from_utf8(canvas.into_sink()).unwrap()
}

#[test]
fn wire_format_is_home_then_coalesced_rows_then_reset() {
    let mut canvas = ConsoleCanvas::new(2, 2, Vec::new(), ColorMode::TrueColor);
    canvas.draw(0, 0, 'a', Rgb::new(255, 0, 0), Rgb::BLACK);
    canvas.render().unwrap();

    assert_eq!(
        frame_text(canvas),
        "\x1b[1;1H\
         \x1b[38;2;255;0;0m\x1b[48;2;0;0;0ma\
         \x1b[38;2;220;220;220m \r\n  \
         \x1b[0m"
    );
}

#[test]
fn one_write_per_dirty_frame() {
    let mut canvas = ConsoleCanvas::new(8, 3, Vec::new(), ColorMode::TrueColor);
    canvas.render().unwrap();
    let after_first = canvas.sink().len();

    // Nothing drawn: no bytes.
    canvas.render().unwrap();
    assert_eq!(canvas.sink().len(), after_first);

    canvas.clear(Rgb::WHITE, Rgb::BLACK);
    canvas.draw_border(Rect::new(1, 1, 6, 1), Rgb::WHITE, Rgb::BLACK);
    canvas.draw_string(4, 1, "ok", Rgb::WHITE, Rgb::BLACK, Alignment::Centered);
    canvas.render().unwrap();

    let text = frame_text(canvas);
    assert_eq!(text.matches("\x1b[1;1H").count(), 2);
    assert!(text.ends_with("\x1b[0m"));
    assert!(text.contains("┌──────┐"));
    assert!(text.contains("│  ok  │"));
}

#[test]
fn out_of_bounds_drawing_is_ignored() {
    let mut canvas = ConsoleCanvas::new(3, 3, Vec::new(), ColorMode::TrueColor);
    canvas.render().unwrap();
    canvas.draw_line(Point::new(-5, -5), Point::new(-1, -1), '*', Rgb::WHITE, Rgb::BLACK);
    canvas.fill(Rect::new(10, 10, 4, 4), '*', Rgb::WHITE, Rgb::BLACK);
    assert!(!canvas.is_dirty());
}

#[test]
fn reduced_palettes_never_emit_truecolor() {
    for mode in [ColorMode::Ansi256, ColorMode::Ansi16] {
        let mut canvas = ConsoleCanvas::new(4, 1, Vec::new(), mode);
        canvas.draw(0, 0, 'x', Rgb::new(12, 200, 99), Rgb::new(90, 10, 10));
        canvas.render().unwrap();
        let text = frame_text(canvas);
        assert!(!text.contains(";2;"), "{mode:?}: {text:?}");
        assert!(text.contains("38;5;"));
    }
}

#[test]
fn encoder_default_matches_default_config() {
    assert_eq!(
        FrameEncoder::default().mode(),
        RenderConfig::default().color_mode
    );
}
