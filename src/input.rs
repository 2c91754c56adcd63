//! Keyboard state handed to the simulation each frame
//!
//! The window layer calls [`InputState::press`] / [`InputState::release`];
//! the simulation reads held keys and consumes press edges. An edge is raised
//! once per physical press, so holding a key never re-triggers a one-shot
//! action.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Paddle left
    A,
    /// Paddle right
    D,
    /// Next level (menu)
    W,
    /// Previous level (menu)
    S,
    /// Release the ball
    Space,
    /// Confirm
    Enter,
    Escape,
}

impl KeyCode {
    pub const COUNT: usize = 7;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Key {
    pressed: bool,
    /// Press not yet handled by the game
    edge: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: [Key; KeyCode::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat while already held raises no new edge.
    pub fn press(&mut self, key: KeyCode) {
        let state = &mut self.keys[key as usize];
        if !state.pressed {
            state.edge = true;
        }
        state.pressed = true;
    }

    /// Key went up; any unhandled edge is kept until consumed
    pub fn release(&mut self, key: KeyCode) {
        self.keys[key as usize].pressed = false;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys[key as usize].pressed
    }

    /// A press is waiting to be handled
    pub fn is_key_edge(&self, key: KeyCode) -> bool {
        self.keys[key as usize].edge
    }

    /// Mark the press handled
    pub fn consume_key_edge(&mut self, key: KeyCode) {
        self.keys[key as usize].edge = false;
    }

    /// Check-and-consume in one step
    pub fn take_key_edge(&mut self, key: KeyCode) -> bool {
        let edge = self.is_key_edge(key);
        self.consume_key_edge(key);
        edge
    }

    /// Drop every pending edge (e.g. on focus loss)
    pub fn clear_edges(&mut self) {
        for key in &mut self.keys {
            key.edge = false;
        }
    }
}
