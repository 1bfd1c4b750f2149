//! Platform-independent input events and the per-frame queue that holds them.

use std::collections::VecDeque;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Pointer buttons the viewer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton;
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
            MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => Self::Other,
        }
    }
}

/// A discrete user action, in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerUp { button: PointerButton },
    ScrollUp,
    ScrollDown,
    KeyPress(KeyCode),
}

/// FIFO of events collected between frames.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Remove and yield all queued events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
