//! Directional button input
//!
//! Platform key events are translated into four named buttons. The adapter
//! is shared between the event source (which writes) and the game (which reads
//! once per tick). Events are ignored unless the adapter is subscribed.

use std::cell::Cell;
use std::rc::Rc;

/// A named directional button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Legacy DOM key codes (arrow keys)
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Button::Left),
            38 => Some(Button::Up),
            39 => Some(Button::Right),
            40 => Some(Button::Down),
            _ => None,
        }
    }

    /// `KeyboardEvent.key` names
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Button::Left),
            "ArrowUp" | "Up" => Some(Button::Up),
            "ArrowRight" | "Right" => Some(Button::Right),
            "ArrowDown" | "Down" => Some(Button::Down),
            _ => None,
        }
    }
}

/// Currently held buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Buttons {
    pub fn set(&mut self, button: Button, held: bool) {
        match button {
            Button::Up => self.up = held,
            Button::Down => self.down = held,
            Button::Left => self.left = held,
            Button::Right => self.right = held,
        }
    }

    pub fn is_held(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }
}

/// Shared handle to the held-button state
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    buttons: Rc<Cell<Buttons>>,
    subscribed: Rc<Cell<bool>>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting key events
    pub fn subscribe(&self) {
        self.subscribed.set(true);
    }

    /// Stop accepting key events and release every button
    pub fn unsubscribe(&self) {
        self.subscribed.set(false);
        self.buttons.set(Buttons::default());
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }

    /// Returns true if the button was consumed (caller should suppress the default action)
    pub fn press(&self, button: Button) -> bool {
        self.update(button, true)
    }

    pub fn release(&self, button: Button) -> bool {
        self.update(button, false)
    }

    pub fn key_down(&self, key: &str) -> bool {
        Button::from_key(key).is_some_and(|b| self.press(b))
    }

    pub fn key_up(&self, key: &str) -> bool {
        Button::from_key(key).is_some_and(|b| self.release(b))
    }

    fn update(&self, button: Button, held: bool) -> bool {
        if !self.is_subscribed() {
            return false;
        }
        let mut buttons = self.buttons.get();
        buttons.set(button, held);
        self.buttons.set(buttons);
        true
    }

    /// Snapshot read once per tick
    pub fn buttons(&self) -> Buttons {
        self.buttons.get()
    }
}
