use super::spin::SpinSource;
use super::{FULL_TURN, POINTER_ANGLE, WheelLayout};
use crate::config::{DEFAULT_NUM_COLORS, GestureConfig, PhysicsConfig};
use wheelfeed::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchState {
    #[default]
    Released,
    Pinched,
}

impl PinchState {
    /// Two thresholds so a distance hovering near one of them cannot flicker.
    pub fn update(self, normalized_distance: f64, gesture: &GestureConfig) -> Self {
        match self {
            Self::Pinched if normalized_distance > gesture.pinch_release => Self::Released,
            Self::Released if normalized_distance < gesture.pinch_start => Self::Pinched,
            unchanged => unchanged,
        }
    }

    pub fn is_pinched(self) -> bool {
        self == Self::Pinched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub hovered: bool,
    pub pressed: bool,
}

/// Everything the wheel carries from one frame to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    pub num_colors: usize,
    /// Degrees, never clamped. Only wrapped by the physics tick and when reading
    /// the selected segment.
    pub rotation_angle: f64,
    pub spin: SpinPhase,
    /// Degrees per frame.
    pub spin_velocity: f64,
    pub wheel_center: Point,
    pub wheel_radius: f64,
    pub button_rect: Rect,
    pub hand_near_wheel: bool,
    /// Fingertip angle from the last frame the wheel was grabbed, `None` otherwise.
    pub prev_hand_angle: Option<f64>,
    pub button: ButtonState,
    pub pinch: PinchState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_COLORS)
    }
}

impl InteractionState {
    pub fn new(num_colors: usize) -> Self {
        Self {
            num_colors: num_colors.max(1),
            rotation_angle: 0.0,
            spin: SpinPhase::Idle,
            spin_velocity: 0.0,
            wheel_center: Point::default(),
            wheel_radius: 0.0,
            button_rect: Rect::default(),
            hand_near_wheel: false,
            prev_hand_angle: None,
            button: ButtonState::default(),
            pinch: PinchState::Released,
        }
    }

    pub fn set_num_colors(&mut self, num_colors: usize) {
        self.num_colors = num_colors.max(1);
    }

    pub fn is_spinning(&self) -> bool {
        self.spin == SpinPhase::Spinning
    }

    pub fn color_palette(&self) -> Vec<u32> {
        color_palette(self.num_colors)
    }

    pub fn place(&mut self, layout: &WheelLayout) {
        self.wheel_center = layout.center;
        self.wheel_radius = layout.radius;
        self.button_rect = layout.button;
    }

    /// One frame of momentum. Does nothing unless spinning.
    pub fn advance_physics(&mut self, physics: &PhysicsConfig) {
        if !self.is_spinning() {
            return;
        }

        self.rotation_angle = (self.rotation_angle + self.spin_velocity) % FULL_TURN;
        self.spin_velocity *= physics.friction;

        if self.spin_velocity.abs() < physics.min_stop_speed {
            self.spin = SpinPhase::Idle;
            self.spin_velocity = 0.0;
            self.button.pressed = false;
            log::debug!("Spin settled at {:.1} degrees", self.rotation_angle);
        }
    }

    /// Launches a spin with a random speed and direction. Returns false when a
    /// spin is already running.
    pub fn trigger_spin(&mut self, source: &mut impl SpinSource, physics: &PhysicsConfig) -> bool {
        if self.is_spinning() {
            return false;
        }

        let speed = source.uniform(physics.spin_speed_min..physics.spin_speed_max);
        self.spin_velocity = if source.uniform(0.0..1.0) < 0.5 {
            -speed
        } else {
            speed
        };
        self.spin = SpinPhase::Spinning;
        log::info!("Spin started at {:.2} degrees/frame", self.spin_velocity);
        true
    }

    /// Segment currently under the pointer.
    pub fn selected_index(&self) -> usize {
        let n = self.num_colors.max(1);
        let rotation = self.rotation_angle.rem_euclid(FULL_TURN);
        let effective = (POINTER_ANGLE - rotation + FULL_TURN) % FULL_TURN;
        let per_segment = FULL_TURN / n as f64;

        if !effective.is_finite() {
            return 0;
        }
        (effective / per_segment).floor() as usize % n
    }

    /// Clears what only makes sense while a hand is tracked.
    pub fn release_hand(&mut self) {
        self.prev_hand_angle = None;
        self.hand_near_wheel = false;
        self.button.hovered = false;
        if !self.is_spinning() {
            self.button.pressed = false;
        }
    }

    /// Drops every gesture latch. Rotation and any running spin are kept.
    pub fn reset_gestures(&mut self) {
        self.release_hand();
        self.pinch = PinchState::Released;
    }
}

/// Evenly spaced hues, `floor(360 * i / n)` for each segment.
pub fn color_palette(num_colors: usize) -> Vec<u32> {
    let n = num_colors.max(1);
    (0..n).map(|i| (360 * i / n) as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::spin::SequenceSource;

    #[test]
    fn test_palette_is_increasing_and_starts_at_zero() {
        for n in 1..=360 {
            let hues = color_palette(n);
            assert_eq!(hues.len(), n);
            assert_eq!(hues[0], 0);
            assert!(hues.windows(2).all(|w| w[0] < w[1]), "n = {}", n);
            assert!(hues.iter().all(|&h| h < 360));
        }
        assert_eq!(color_palette(8), vec![0, 45, 90, 135, 180, 225, 270, 315]);
        assert_eq!(color_palette(3), vec![0, 120, 240]);
    }

    #[test]
    fn test_palette_is_restartable() {
        let state = InteractionState::new(6);
        assert_eq!(state.color_palette(), state.color_palette());
    }

    #[test]
    fn test_zero_colors_clamps_to_one() {
        let state = InteractionState::new(0);
        assert_eq!(state.num_colors, 1);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_physics_is_noop_when_idle() {
        let mut state = InteractionState::new(8);
        state.rotation_angle = 123.0;
        state.spin_velocity = 4.0;
        state.button.pressed = true;
        let before = state.clone();

        state.advance_physics(&PhysicsConfig::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_spin_decays_and_stops() {
        let physics = PhysicsConfig::default();
        let mut state = InteractionState::new(8);
        state.spin = SpinPhase::Spinning;
        state.spin_velocity = 30.0;
        state.button.pressed = true;

        let mut ticks = 0;
        while state.is_spinning() {
            state.advance_physics(&physics);
            ticks += 1;
            if state.is_spinning() {
                let expected = 30.0 * physics.friction.powi(ticks);
                assert!((state.spin_velocity - expected).abs() < 1e-9);
            }
            assert!(ticks < 1000, "spin never settled");
        }

        // ln(0.05 / 30) / ln(0.985) = 423.3
        assert_eq!(ticks, 424);
        assert_eq!(state.spin_velocity, 0.0);
        assert!(!state.button.pressed);
        assert!(state.rotation_angle.abs() < FULL_TURN);
    }

    #[test]
    fn test_negative_spin_stops_too() {
        let mut state = InteractionState::new(8);
        state.spin = SpinPhase::Spinning;
        state.spin_velocity = -0.0505;
        state.advance_physics(&PhysicsConfig::default());
        assert_eq!(state.spin, SpinPhase::Idle);
        assert_eq!(state.spin_velocity, 0.0);
    }

    #[test]
    fn test_trigger_spin_samples_range_and_sign() {
        let physics = PhysicsConfig::default();

        let mut forward = InteractionState::new(8);
        assert!(forward.trigger_spin(&mut SequenceSource::new(&[0.0, 0.9]), &physics));
        assert_eq!(forward.spin, SpinPhase::Spinning);
        assert_eq!(forward.spin_velocity, 20.0);

        let mut backward = InteractionState::new(8);
        backward.trigger_spin(&mut SequenceSource::new(&[0.5, 0.2]), &physics);
        assert_eq!(backward.spin_velocity, -27.5);
    }

    #[test]
    fn test_trigger_spin_ignored_while_spinning() {
        let physics = PhysicsConfig::default();
        let mut source = SequenceSource::new(&[0.1, 0.9]);
        let mut state = InteractionState::new(8);

        assert!(state.trigger_spin(&mut source, &physics));
        let velocity = state.spin_velocity;
        assert!(!state.trigger_spin(&mut source, &physics));
        assert_eq!(state.spin_velocity, velocity);
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn test_selected_index_under_pointer() {
        let mut state = InteractionState::new(4);
        assert_eq!(state.selected_index(), 3);

        // rotating the wheel clockwise brings earlier segments under the pointer
        state.rotation_angle = 90.0;
        assert_eq!(state.selected_index(), 2);

        state.rotation_angle = -90.0;
        assert_eq!(state.selected_index(), 0);

        state.rotation_angle = 720.0 + 90.0;
        assert_eq!(state.selected_index(), 2);
    }

    #[test]
    fn test_selected_index_default_wheel() {
        let state = InteractionState::new(8);
        // 270 / 45 = 6
        assert_eq!(state.selected_index(), 6);
    }

    #[test]
    fn test_pinch_hysteresis() {
        let gesture = GestureConfig::default();
        let mut pinch = PinchState::Released;
        let observed: Vec<PinchState> = [0.1, 0.04, 0.06, 0.09, 0.06]
            .into_iter()
            .map(|d| {
                pinch = pinch.update(d, &gesture);
                pinch
            })
            .collect();

        use PinchState::*;
        assert_eq!(observed, vec![Released, Pinched, Pinched, Released, Released]);
    }

    #[test]
    fn test_pinch_thresholds_are_strict() {
        let gesture = GestureConfig::default();
        assert_eq!(
            PinchState::Released.update(gesture.pinch_start, &gesture),
            PinchState::Released
        );
        assert_eq!(
            PinchState::Pinched.update(gesture.pinch_release, &gesture),
            PinchState::Pinched
        );
    }

    #[test]
    fn test_release_hand_keeps_press_while_spinning() {
        let mut state = InteractionState::new(8);
        state.spin = SpinPhase::Spinning;
        state.button = ButtonState {
            hovered: true,
            pressed: true,
        };
        state.prev_hand_angle = Some(10.0);
        state.hand_near_wheel = true;

        state.release_hand();
        assert!(state.button.pressed);
        assert!(!state.button.hovered);
        assert_eq!(state.prev_hand_angle, None);
        assert!(!state.hand_near_wheel);
    }

    #[test]
    fn test_reset_gestures_keeps_rotation() {
        let mut state = InteractionState::new(8);
        state.rotation_angle = 42.0;
        state.pinch = PinchState::Pinched;
        state.button.pressed = true;

        state.reset_gestures();
        assert_eq!(state.rotation_angle, 42.0);
        assert_eq!(state.pinch, PinchState::Released);
        assert!(!state.button.pressed);
    }
}
