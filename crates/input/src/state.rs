//! Per-frame key and mouse snapshot.
//!
//! Feed every terminal event through [`InputState::handle_event`] and call
//! [`InputState::begin_frame`] once at the top of each frame. Between those
//! calls each key reports whether it went down this frame, is being held, or
//! came up this frame.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a held key with no press or repeat for longer than the timeout is released.

use arrayvec::ArrayVec;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use crate::map::normalize;
use crate::origin::{to_canvas, WindowOrigin};
use crate::types::Point;

/// Upper bound on simultaneously tracked keys; extra presses are ignored.
pub const MAX_TRACKED_KEYS: usize = 32;

// Key repeat on most terminals starts after ~250ms and then fires every ~30ms,
// so anything shorter would drop held keys between the first press and the
// first repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Went down this frame.
    pub pressed: bool,
    /// Currently down.
    pub held: bool,
    /// Came up this frame.
    pub released: bool,
}

impl KeyState {
    fn press(&mut self) {
        if !self.held {
            self.pressed = true;
            self.held = true;
        }
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            self.released = true;
        }
    }

    fn is_idle(&self) -> bool {
        !self.pressed && !self.held && !self.released
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedKey {
    code: KeyCode,
    state: KeyState,
    idle_ms: u32,
}

#[derive(Debug, Clone)]
pub struct InputState {
    keys: ArrayVec<TrackedKey, MAX_TRACKED_KEYS>,
    mouse: [KeyState; 3],
    cursor: Point,
    key_release_timeout_ms: u32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: ArrayVec::new(),
            mouse: [KeyState::default(); 3],
            cursor: Point::ZERO,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// A timeout of 0 disables synthesized releases (for terminals that
    /// report key release events).
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Start a new frame: clear last frame's edges and age held keys.
    pub fn begin_frame(&mut self, elapsed_ms: u32) {
        let timeout = self.key_release_timeout_ms;
        for key in self.keys.iter_mut() {
            key.state.pressed = false;
            key.state.released = false;
            if key.state.held && timeout > 0 {
                key.idle_ms = key.idle_ms.saturating_add(elapsed_ms);
                if key.idle_ms >= timeout {
                    key.state.release();
                }
            }
        }
        self.keys.retain(|k| !k.state.is_idle());

        for button in self.mouse.iter_mut() {
            button.pressed = false;
            button.released = false;
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => {
                let code = normalize(key.code);
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => self.press(code),
                    KeyEventKind::Release => self.release(code),
                }
            }
            Event::Mouse(mouse) => {
                self.cursor = Point::new(mouse.column as i32, mouse.row as i32);
                match mouse.kind {
                    MouseEventKind::Down(button) => self.mouse[button_index(button)].press(),
                    MouseEventKind::Up(button) => self.mouse[button_index(button)].release(),
                    _ => {}
                }
            }
            Event::FocusLost => self.release_all(),
            _ => {}
        }
    }

    /// Record a cursor position reported in screen coordinates.
    pub fn set_cursor_absolute(
        &mut self,
        absolute: Point,
        origin: &impl WindowOrigin,
        cell_size: Point,
    ) {
        self.cursor = to_canvas(absolute, origin, cell_size);
    }

    pub fn key(&self, code: KeyCode) -> KeyState {
        let code = normalize(code);
        self.keys
            .iter()
            .find(|k| k.code == code)
            .map(|k| k.state)
            .unwrap_or_default()
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.key(code).held
    }

    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.key(code).pressed
    }

    pub fn was_released(&self, code: KeyCode) -> bool {
        self.key(code).released
    }

    pub fn mouse(&self, button: MouseButton) -> KeyState {
        self.mouse[button_index(button)]
    }

    /// Cursor position in canvas cells.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    fn press(&mut self, code: KeyCode) {
        if let Some(key) = self.keys.iter_mut().find(|k| k.code == code) {
            key.state.press();
            key.idle_ms = 0;
            return;
        }
        let mut state = KeyState::default();
        state.press();
        // Full table: drop the press rather than evict a held key.
        let _ = self.keys.try_push(TrackedKey {
            code,
            state,
            idle_ms: 0,
        });
    }

    fn release(&mut self, code: KeyCode) {
        if let Some(key) = self.keys.iter_mut().find(|k| k.code == code) {
            key.state.release();
        }
    }

    fn release_all(&mut self) {
        for key in self.keys.iter_mut() {
            key.state.release();
        }
        for button in self.mouse.iter_mut() {
            button.release();
        }
    }
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::FixedOrigin;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press))
    }

    fn repeat(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn press_is_an_edge_then_held() {
        let mut input = InputState::new();
        input.begin_frame(16);
        input.handle_event(&press(KeyCode::Char('w')));
        assert_eq!(
            input.key(KeyCode::Char('w')),
            KeyState {
                pressed: true,
                held: true,
                released: false
            }
        );

        input.begin_frame(16);
        assert!(!input.was_pressed(KeyCode::Char('w')));
        assert!(input.is_held(KeyCode::Char('w')));
    }

    #[test]
    fn repeat_does_not_retrigger_press() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::Left));
        input.begin_frame(16);
        input.handle_event(&repeat(KeyCode::Left));
        assert!(!input.was_pressed(KeyCode::Left));
        assert!(input.is_held(KeyCode::Left));
    }

    #[test]
    fn release_event_is_an_edge() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::Char('a')));
        input.begin_frame(16);
        input.handle_event(&release(KeyCode::Char('a')));
        assert!(input.was_released(KeyCode::Char('a')));
        assert!(!input.is_held(KeyCode::Char('a')));

        input.begin_frame(16);
        assert_eq!(input.key(KeyCode::Char('a')), KeyState::default());
    }

    #[test]
    fn letter_case_is_folded() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::Char('D')));
        assert!(input.is_held(KeyCode::Char('d')));
        assert!(input.is_held(KeyCode::Char('D')));
    }

    #[test]
    fn timeout_synthesizes_release() {
        let mut input = InputState::new().with_key_release_timeout_ms(100);
        input.handle_event(&press(KeyCode::Up));
        input.begin_frame(60);
        assert!(input.is_held(KeyCode::Up));
        input.begin_frame(60);
        assert!(input.was_released(KeyCode::Up));
        assert!(!input.is_held(KeyCode::Up));
    }

    #[test]
    fn repeat_resets_the_release_timer() {
        let mut input = InputState::new().with_key_release_timeout_ms(100);
        input.handle_event(&press(KeyCode::Up));
        input.begin_frame(80);
        input.handle_event(&repeat(KeyCode::Up));
        input.begin_frame(80);
        assert!(input.is_held(KeyCode::Up));
    }

    #[test]
    fn zero_timeout_never_releases() {
        let mut input = InputState::new().with_key_release_timeout_ms(0);
        input.handle_event(&press(KeyCode::Up));
        for _ in 0..100 {
            input.begin_frame(1000);
        }
        assert!(input.is_held(KeyCode::Up));
    }

    #[test]
    fn key_table_is_bounded() {
        let mut input = InputState::new().with_key_release_timeout_ms(0);
        for n in 0..(MAX_TRACKED_KEYS as u8 + 8) {
            input.handle_event(&press(KeyCode::F(n)));
        }
        assert!(input.is_held(KeyCode::F(0)));
        assert!(!input.is_held(KeyCode::F(MAX_TRACKED_KEYS as u8 + 1)));
    }

    #[test]
    fn mouse_tracks_cursor_and_buttons() {
        let mut input = InputState::new();
        input.handle_event(&mouse(MouseEventKind::Moved, 4, 9));
        assert_eq!(input.cursor(), Point::new(4, 9));

        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 9));
        assert!(input.mouse(MouseButton::Left).pressed);
        assert!(!input.mouse(MouseButton::Right).held);

        input.begin_frame(16);
        assert!(input.mouse(MouseButton::Left).held);
        assert!(!input.mouse(MouseButton::Left).pressed);

        input.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 9));
        assert!(input.mouse(MouseButton::Left).released);
        assert_eq!(input.cursor(), Point::new(5, 9));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::new().with_key_release_timeout_ms(0);
        input.handle_event(&press(KeyCode::Char('w')));
        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        input.handle_event(&Event::FocusLost);
        assert!(input.was_released(KeyCode::Char('w')));
        assert!(input.mouse(MouseButton::Right).released);
    }

    #[test]
    fn absolute_cursor_goes_through_origin() {
        let mut input = InputState::new();
        input.set_cursor_absolute(
            Point::new(120, 80),
            &FixedOrigin(Point::new(100, 40)),
            Point::new(10, 20),
        );
        assert_eq!(input.cursor(), Point::new(2, 2));
    }
}
