//! Input handling.
//!
//! The animation reacts to a single signal: quit. It is raised by closing
//! the window or pressing Escape, and stays raised once set.

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key that requests shutdown.
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Latched input state for the frame loop.
#[derive(Debug, Default, Clone)]
pub struct Input {
    quit: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.quit = true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => self.handle_key(*physical_key, *state),
            _ => {}
        }
    }

    /// Feed a physical key transition.
    pub fn handle_key(&mut self, key: PhysicalKey, state: ElementState) {
        if state == ElementState::Pressed && key == PhysicalKey::Code(QUIT_KEY) {
            self.quit = true;
        }
    }

    /// Whether the loop should stop after the current frame.
    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
