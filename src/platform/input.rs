//! Input adapter
//!
//! Turns button, joystick and keyboard events into the polled `TickInput`
//! the simulation reads once per tick. Last write wins.

use glam::Vec2;

use crate::sim::TickInput;

/// Default joystick travel that maps to full steering (pixels)
pub const DEFAULT_JOYSTICK_RADIUS: f32 = 50.0;

/// Normalize a horizontal drag (pixels from pad centre) to a steer axis
pub fn normalize_steer(drag_x: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (drag_x / radius).clamp(-1.0, 1.0)
}

/// Live input from all adapters
#[derive(Debug, Clone)]
pub struct InputState {
    input: TickInput,
    joystick_radius: f32,
    joystick_active: bool,
    /// Clamped stick displacement in pixels (for the on-screen indicator)
    stick: Vec2,
    left_key: bool,
    right_key: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_JOYSTICK_RADIUS)
    }
}

impl InputState {
    pub fn new(joystick_radius: f32) -> Self {
        Self {
            input: TickInput::default(),
            joystick_radius,
            joystick_active: false,
            stick: Vec2::ZERO,
            left_key: false,
            right_key: false,
        }
    }

    /// Mutable access for the fixed-step driver (clears one-shots)
    pub fn tick_input_mut(&mut self) -> &mut TickInput {
        &mut self.input
    }

    pub fn set_gas(&mut self, held: bool) {
        self.input.accelerating = held;
    }

    pub fn set_brake(&mut self, held: bool) {
        self.input.braking = held;
    }

    pub fn request_order(&mut self) {
        self.input.accept_order = true;
    }

    pub fn request_delivery(&mut self) {
        self.input.deliver_order = true;
    }

    pub fn joystick_start(&mut self) {
        self.joystick_active = true;
    }

    /// Drag relative to the pad centre. Vertical travel only moves the
    /// indicator; it does not feed the simulation.
    pub fn joystick_move(&mut self, drag: Vec2) {
        if !self.joystick_active {
            return;
        }
        self.stick = drag.clamp_length_max(self.joystick_radius);
        self.input.steer_axis = normalize_steer(drag.x, self.joystick_radius);
    }

    pub fn joystick_end(&mut self) {
        self.joystick_active = false;
        self.stick = Vec2::ZERO;
        self.input.steer_axis = 0.0;
    }

    /// Stick indicator displacement in pixels
    pub fn stick_offset(&self) -> Vec2 {
        self.stick
    }

    /// Apply a keyboard event by `KeyboardEvent.key`. Returns true if handled.
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => self.set_gas(pressed),
            "ArrowDown" | "s" | "S" => self.set_brake(pressed),
            "ArrowLeft" | "a" | "A" => {
                self.left_key = pressed;
                self.update_key_steer();
            }
            "ArrowRight" | "d" | "D" => {
                self.right_key = pressed;
                self.update_key_steer();
            }
            " " | "Enter" => {
                if pressed {
                    self.request_order();
                }
            }
            "e" | "E" => {
                if pressed {
                    self.request_delivery();
                }
            }
            _ => return false,
        }
        true
    }

    fn update_key_steer(&mut self) {
        if self.joystick_active {
            return;
        }
        let axis = (self.right_key as i8 - self.left_key as i8) as f32;
        self.input.steer_axis = axis;
    }

    /// Release everything (focus lost, round reset)
    pub fn clear(&mut self) {
        let radius = self.joystick_radius;
        *self = Self::new(radius);
    }
}
