//! Abstract input consumed by the simulation
//!
//! The simulation only ever asks "is this key held right now?". Device polling
//! and key bindings belong to the front end.

use serde::{Deserialize, Serialize};

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Fire,
    Pause,
    Continue,
    Restart,
    /// Leaves the title screen
    Start,
}

/// Boolean key-state query
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Held keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
    pub resume: bool,
    pub restart: bool,
    pub start: bool,
}

impl InputSource for TickInput {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
            Key::Pause => self.pause,
            Key::Continue => self.resume,
            Key::Restart => self.restart,
            Key::Start => self.start,
        }
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_key_down(&self, key: Key) -> bool {
        (**self).is_key_down(key)
    }
}
