//! Maps window input to engine commands.
//!
//! | Input | Command |
//! |-------|---------|
//! | Left click anywhere | [`Command::NextShape`] |
//! | Space / Enter | [`Command::NextShape`] |
//! | 1-4 | [`Command::SetPalette`] (fire, neon, nature, rainbow) |
//! | Window resize | [`Command::Resize`] |
//!
//! Held keys fire once; auto-repeat is swallowed.

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::input::{KeyCode, MouseButton};
use crate::palette::Palette;
use crate::shapes::Bounds;

/// An engine command produced from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Morph to the next shape in the cycle.
    NextShape,
    /// Make this palette the active one.
    SetPalette(Palette),
    /// The surface changed size.
    Resize(Bounds),
}

/// Translates input events into [`Command`]s.
#[derive(Debug, Default)]
pub struct Controller {
    keys_held: HashSet<KeyCode>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a winit window event.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Command> {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => self.click(MouseButton::from(*button)),

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = KeyCode::from(code);
                match event.state {
                    ElementState::Pressed => self.key_down(key),
                    ElementState::Released => {
                        self.key_up(key);
                        None
                    }
                }
            }

            WindowEvent::Resized(size) => self.resize(size.width, size.height),

            _ => None,
        }
    }

    /// A mouse button went down.
    pub fn click(&mut self, button: MouseButton) -> Option<Command> {
        match button {
            MouseButton::Left => Some(Command::NextShape),
            _ => None,
        }
    }

    /// A key went down. Repeats while held produce nothing.
    pub fn key_down(&mut self, key: KeyCode) -> Option<Command> {
        if !self.keys_held.insert(key) {
            return None;
        }
        match key {
            KeyCode::Space | KeyCode::Enter => Some(Command::NextShape),
            KeyCode::Key1 => Some(Command::SetPalette(Palette::Fire)),
            KeyCode::Key2 => Some(Command::SetPalette(Palette::Neon)),
            KeyCode::Key3 => Some(Command::SetPalette(Palette::Nature)),
            KeyCode::Key4 => Some(Command::SetPalette(Palette::Rainbow)),
            _ => None,
        }
    }

    /// A key was released.
    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// The surface now measures `width` x `height` pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<Command> {
        Some(Command::Resize(Bounds::from((width, height))))
    }
}
