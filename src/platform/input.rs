//! Raw input events to per-tick intent
//!
//! Event handlers feed key names and positions in as they arrive; the frame
//! loop takes a `TickInput` snapshot once per frame.

use glam::Vec2;

use crate::sim::TickInput;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key.to_lowercase().as_str() {
        "w" | "arrowup" => Some(Action::Up),
        "s" | "arrowdown" => Some(Action::Down),
        "a" | "arrowleft" => Some(Action::Left),
        "d" | "arrowright" => Some(Action::Right),
        " " | "spacebar" => Some(Action::Fire),
        "escape" | "p" => Some(Action::Pause),
        _ => None,
    }
}

/// Convert a client (viewport) position to arena coordinates
pub fn to_arena(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire_key: bool,
    /// On-screen shoot button held
    fire_button: bool,
    /// Click since the last frame
    clicked: bool,
    /// Pause pressed since the last frame
    pause: bool,
    pointer: Option<Vec2>,
    touch: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        match action_for_key(key) {
            Some(Action::Pause) => self.pause = true,
            Some(action) => self.set_held(action, true),
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = action_for_key(key) {
            self.set_held(action, false);
        }
    }

    fn set_held(&mut self, action: Action, held: bool) {
        match action {
            Action::Up => self.up = held,
            Action::Down => self.down = held,
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Fire => self.fire_key = held,
            Action::Pause => {}
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// A click fires once (still subject to the cooldown)
    pub fn clicked(&mut self) {
        self.clicked = true;
    }

    pub fn touch_started(&mut self, pos: Vec2) {
        self.touch = Some(pos);
    }

    pub fn touch_moved(&mut self, pos: Vec2) {
        if self.touch.is_some() {
            self.touch = Some(pos);
        }
    }

    /// Finger lifted; the last touch stays as the aim point
    pub fn touch_ended(&mut self) {
        if let Some(pos) = self.touch.take() {
            self.pointer = Some(pos);
        }
    }

    pub fn shoot_button(&mut self, pressed: bool) {
        self.fire_button = pressed;
    }

    /// Intent for the coming tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            fire: self.fire_key || self.fire_button || self.clicked,
            pointer: self.pointer,
            touch: self.touch,
            pause: self.pause,
        }
    }

    /// Clear one-shot inputs after a tick consumed them
    pub fn end_frame(&mut self) {
        self.clicked = false;
        self.pause = false;
    }

    /// Drop everything held (window lost focus)
    pub fn release_all(&mut self) {
        let pointer = self.pointer;
        *self = Self::default();
        self.pointer = pointer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key("W"), Some(Action::Up));
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(action_for_key(" "), Some(Action::Fire));
        assert_eq!(action_for_key("Escape"), Some(Action::Pause));
        assert_eq!(action_for_key("q"), None);
    }

    #[test]
    fn test_held_keys() {
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("d");
        input.key_down(" ");
        let tick = input.snapshot();
        assert!(tick.up && tick.right && tick.fire);
        assert!(!tick.down && !tick.left);

        input.key_up("w");
        input.key_up(" ");
        input.end_frame();
        let tick = input.snapshot();
        assert!(!tick.up && tick.right && !tick.fire);
    }

    #[test]
    fn test_one_shots_clear_after_frame() {
        let mut input = InputState::new();
        input.clicked();
        input.key_down("Escape");
        let tick = input.snapshot();
        assert!(tick.fire && tick.pause);

        input.end_frame();
        let tick = input.snapshot();
        assert!(!tick.fire && !tick.pause);
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut input = InputState::new();
        // Moves without a touch in progress are ignored
        input.touch_moved(Vec2::new(5.0, 5.0));
        assert_eq!(input.snapshot().touch, None);

        input.touch_started(Vec2::new(10.0, 20.0));
        input.touch_moved(Vec2::new(30.0, 40.0));
        assert_eq!(input.snapshot().touch, Some(Vec2::new(30.0, 40.0)));

        input.touch_ended();
        let tick = input.snapshot();
        assert_eq!(tick.touch, None);
        assert_eq!(tick.pointer, Some(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_shoot_button() {
        let mut input = InputState::new();
        input.shoot_button(true);
        input.end_frame();
        assert!(input.snapshot().fire);
        input.shoot_button(false);
        assert!(!input.snapshot().fire);
    }

    #[test]
    fn test_release_all_keeps_aim() {
        let mut input = InputState::new();
        input.key_down("a");
        input.pointer_moved(Vec2::new(1.0, 2.0));
        input.release_all();
        let tick = input.snapshot();
        assert!(!tick.left);
        assert_eq!(tick.pointer, Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_to_arena() {
        let p = to_arena(Vec2::new(120.0, 80.0), Vec2::new(20.0, 30.0));
        assert_eq!(p, Vec2::new(100.0, 50.0));
    }
}
