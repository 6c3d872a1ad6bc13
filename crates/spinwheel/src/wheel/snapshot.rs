use super::processor::HandPose;
use super::state::InteractionState;
use strum::Display as StrumDisplay;
use wheelfeed::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum ButtonVisual {
    #[strum(serialize = "SPINNING...")]
    Spinning,
    #[strum(serialize = "SPINNING!")]
    Pressed,
    #[strum(serialize = "PINCH NOW!")]
    Hovered,
    #[strum(serialize = "PINCH TO SPIN")]
    Idle,
}

impl ButtonVisual {
    /// Priority: Spinning, Pressed, Hovered, Idle.
    pub fn resolve(state: &InteractionState) -> Self {
        if state.is_spinning() {
            Self::Spinning
        } else if state.button.pressed {
            Self::Pressed
        } else if state.button.hovered {
            Self::Hovered
        } else {
            Self::Idle
        }
    }
}

/// Read-only view of one processed frame, all the presentation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub viewport: Size,
    pub rotation_angle: f64,
    pub palette: Vec<u32>,
    pub selected_index: usize,
    pub wheel_center: Point,
    pub wheel_radius: f64,
    pub button_rect: Rect,
    pub button_visual: ButtonVisual,
    pub hand_near_wheel: bool,
    pub pinching: bool,
    /// The fingertip turned the wheel this frame.
    pub engaged: bool,
    pub hand: Option<HandPose>,
}

impl Snapshot {
    pub fn capture(state: &InteractionState, viewport: Size, hand: Option<HandPose>) -> Self {
        Self {
            viewport,
            rotation_angle: state.rotation_angle,
            palette: state.color_palette(),
            selected_index: state.selected_index(),
            wheel_center: state.wheel_center,
            wheel_radius: state.wheel_radius,
            button_rect: state.button_rect,
            button_visual: ButtonVisual::resolve(state),
            hand_near_wheel: state.hand_near_wheel,
            pinching: state.pinch.is_pinched(),
            engaged: state.prev_hand_angle.is_some(),
            hand,
        }
    }

    pub fn selected_hue(&self) -> u32 {
        self.palette.get(self.selected_index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::state::SpinPhase;

    #[test]
    fn test_button_visual_priority() {
        let mut state = InteractionState::new(8);
        assert_eq!(ButtonVisual::resolve(&state), ButtonVisual::Idle);

        state.button.hovered = true;
        assert_eq!(ButtonVisual::resolve(&state), ButtonVisual::Hovered);

        state.button.pressed = true;
        assert_eq!(ButtonVisual::resolve(&state), ButtonVisual::Pressed);

        state.spin = SpinPhase::Spinning;
        assert_eq!(ButtonVisual::resolve(&state), ButtonVisual::Spinning);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(ButtonVisual::Idle.to_string(), "PINCH TO SPIN");
        assert_eq!(ButtonVisual::Hovered.to_string(), "PINCH NOW!");
        assert_eq!(ButtonVisual::Pressed.to_string(), "SPINNING!");
        assert_eq!(ButtonVisual::Spinning.to_string(), "SPINNING...");
    }

    #[test]
    fn test_selected_hue_follows_index() {
        let mut state = InteractionState::new(4);
        state.rotation_angle = 90.0;
        let snapshot = Snapshot::capture(&state, Size::new(100.0, 100.0), None);
        assert_eq!(snapshot.selected_index, 2);
        assert_eq!(snapshot.selected_hue(), 180);
    }
}
