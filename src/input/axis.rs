//! Smoothed virtual axes

use winit::keyboard::KeyCode;

use super::Input;

/// A virtual axis driven by a positive and a negative key.
///
/// The axis value eases toward the held direction and decays back toward
/// zero when neither key is held. `weight` controls how fast the value
/// chases input and `gravity` how fast it returns to rest; both are rates
/// per frame at a 60 Hz reference and scale with the actual delta time.
#[derive(Debug, Clone)]
pub struct Axis {
    /// Key driving the axis toward +1
    pub positive: KeyCode,
    /// Key driving the axis toward -1
    pub negative: KeyCode,
    /// Rate at which the value returns to zero without input
    pub gravity: f32,
    /// Rate at which the value chases held input
    pub weight: f32,
    value: f32,
}

impl Axis {
    /// Create an axis with snappy default response
    #[must_use]
    pub fn new(positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            positive,
            negative,
            gravity: 0.3,
            weight: 0.3,
            value: 0.0,
        }
    }

    /// Override the response rates
    #[must_use]
    pub fn with_response(mut self, weight: f32, gravity: f32) -> Self {
        self.weight = weight;
        self.gravity = gravity;
        self
    }

    /// Current axis value in `[-1, 1]`
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Snap the value back to rest
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Advance the axis by one frame.
    ///
    /// Opposite keys held together cancel out and the axis decays as if
    /// unpressed.
    pub fn update(&mut self, input: &Input, dt: f32) {
        let mut direction = 0.0;
        if input.is_key_held(self.positive) {
            direction += 1.0;
        }
        if input.is_key_held(self.negative) {
            direction -= 1.0;
        }

        if direction == 0.0 {
            let decay = (self.gravity * dt * 60.0).min(1.0);
            self.value *= 1.0 - decay;
        } else {
            let chase = (self.weight * dt * 60.0).min(1.0);
            self.value = self.value * (1.0 - chase) + direction * chase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_axis_chases_held_key() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyD);

        let mut axis = Axis::new(KeyCode::KeyD, KeyCode::KeyA);
        axis.update(&input, DT);
        let first = axis.value();
        assert!(first > 0.0 && first < 1.0);

        for _ in 0..60 {
            axis.update(&input, DT);
        }
        assert!(axis.value() > 0.99, "axis saturates toward 1");
    }

    #[test]
    fn test_axis_decays_without_input() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyD);

        let mut axis = Axis::new(KeyCode::KeyD, KeyCode::KeyA);
        for _ in 0..60 {
            axis.update(&input, DT);
        }

        input.release_key(KeyCode::KeyD);
        let before = axis.value();
        axis.update(&input, DT);
        assert!(axis.value() < before);

        for _ in 0..120 {
            axis.update(&input, DT);
        }
        assert!(axis.value().abs() < 1e-2, "axis decays toward rest");
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyD);
        input.press_key(KeyCode::KeyA);

        let mut axis = Axis::new(KeyCode::KeyD, KeyCode::KeyA);
        axis.update(&input, DT);
        assert!(axis.value().abs() < 1e-6);
    }

    #[test]
    fn test_large_dt_clamps_to_full_step() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyD);

        let mut axis = Axis::new(KeyCode::KeyD, KeyCode::KeyA);
        axis.update(&input, 1.0);
        assert!((axis.value() - 1.0).abs() < 1e-6, "one huge step saturates");
    }
}
