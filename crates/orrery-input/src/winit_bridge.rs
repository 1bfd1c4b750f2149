//! Translates winit window events into [`InputEvent`]s.
//!
//! winit reports button presses without a position and scrolls as fractional
//! deltas, so the bridge tracks the last cursor position and accumulates
//! wheel movement into whole notches.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::event::{InputEvent, InputQueue, PointerButton};

/// Pixels of touchpad scroll equivalent to one wheel notch.
pub const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct WinitBridge {
    cursor: Vec2,
    scroll_accum: f32,
}

impl WinitBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the input events `event` produces, if any.
    pub fn push_window_event(&mut self, event: &WindowEvent, queue: &mut InputQueue) {
        match event {
            WindowEvent::CloseRequested => queue.push(InputEvent::Quit),
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position.x, position.y, queue);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_button(*button, *state, queue);
            }
            WindowEvent::MouseWheel { delta, .. } => self.on_scroll(*delta, queue),
            WindowEvent::KeyboardInput { event, .. } => {
                self.on_key(event.physical_key, event.state, event.repeat, queue);
            }
            _ => {}
        }
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64, queue: &mut InputQueue) {
        self.cursor = Vec2::new(x as f32, y as f32);
        queue.push(InputEvent::PointerMove { pos: self.cursor });
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState, queue: &mut InputQueue) {
        let button = PointerButton::from(button);
        queue.push(match state {
            ElementState::Pressed => InputEvent::PointerDown {
                button,
                pos: self.cursor,
            },
            ElementState::Released => InputEvent::PointerUp { button },
        });
    }

    /// Emits one `ScrollUp`/`ScrollDown` per accumulated notch.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta, queue: &mut InputQueue) {
        self.scroll_accum += match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        while self.scroll_accum >= 1.0 {
            self.scroll_accum -= 1.0;
            queue.push(InputEvent::ScrollUp);
        }
        while self.scroll_accum <= -1.0 {
            self.scroll_accum += 1.0;
            queue.push(InputEvent::ScrollDown);
        }
    }

    /// Key presses only; releases and auto-repeat are dropped.
    pub fn on_key(
        &mut self,
        key: PhysicalKey,
        state: ElementState,
        repeat: bool,
        queue: &mut InputQueue,
    ) {
        if repeat || state != ElementState::Pressed {
            return;
        }
        if let PhysicalKey::Code(code) = key {
            queue.push(InputEvent::KeyPress(code));
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::KeyCode;

    fn drain(q: &mut InputQueue) -> Vec<InputEvent> {
        q.drain().collect()
    }

    #[test]
    fn test_press_uses_last_cursor_position() {
        let mut bridge = WinitBridge::new();
        let mut q = InputQueue::new();
        bridge.on_cursor_moved(12.0, 34.0, &mut q);
        bridge.on_button(MouseButton::Left, ElementState::Pressed, &mut q);
        bridge.on_button(MouseButton::Left, ElementState::Released, &mut q);
        assert_eq!(
            drain(&mut q),
            [
                InputEvent::PointerMove {
                    pos: Vec2::new(12.0, 34.0)
                },
                InputEvent::PointerDown {
                    button: PointerButton::Primary,
                    pos: Vec2::new(12.0, 34.0)
                },
                InputEvent::PointerUp {
                    button: PointerButton::Primary
                },
            ]
        );
    }

    #[test]
    fn test_line_scroll_emits_notches() {
        let mut bridge = WinitBridge::new();
        let mut q = InputQueue::new();
        bridge.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0), &mut q);
        bridge.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0), &mut q);
        assert_eq!(
            drain(&mut q),
            [
                InputEvent::ScrollUp,
                InputEvent::ScrollUp,
                InputEvent::ScrollDown
            ]
        );
    }

    #[test]
    fn test_pixel_scroll_accumulates() {
        let mut bridge = WinitBridge::new();
        let mut q = InputQueue::new();
        bridge.on_scroll(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 25.0)),
            &mut q,
        );
        assert!(q.is_empty());
        bridge.on_scroll(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 25.0)),
            &mut q,
        );
        assert_eq!(drain(&mut q), [InputEvent::ScrollUp]);
    }

    #[test]
    fn test_key_repeat_and_release_dropped() {
        let mut bridge = WinitBridge::new();
        let mut q = InputQueue::new();
        let t = PhysicalKey::Code(KeyCode::KeyT);
        bridge.on_key(t, ElementState::Pressed, false, &mut q);
        bridge.on_key(t, ElementState::Pressed, true, &mut q);
        bridge.on_key(t, ElementState::Released, false, &mut q);
        assert_eq!(drain(&mut q), [InputEvent::KeyPress(KeyCode::KeyT)]);
    }
}
