use super::layout::WheelLayout;
use super::snapshot::Snapshot;
use super::spin::SpinSource;
use super::state::InteractionState;
use crate::config::{Config, GestureConfig, PhysicsConfig};
use wheelfeed::feed::DetectorFrame;
use wheelfeed::geometry::{self, Point, Size};
use wheelfeed::landmarks::HandLandmarks;
use wheelfeed::mapping::{VideoFit, VideoTransform};

/// Everything one pass needs besides the carried state.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub viewport: Size,
    /// Falls back to the viewport size.
    pub video: Option<Size>,
    pub hand: Option<&'a HandLandmarks>,
}

impl<'a> FrameInput<'a> {
    pub fn from_frame(frame: &'a DetectorFrame, viewport: Size) -> Self {
        Self {
            viewport,
            video: frame.video,
            hand: frame.primary_hand(),
        }
    }

    pub fn without_hand(viewport: Size) -> Self {
        Self {
            viewport,
            video: None,
            hand: None,
        }
    }
}

/// A tracked hand projected into viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub index_tip: Point,
    pub thumb_tip: Point,
    /// Width of the video as drawn, the yardstick for pinch distance.
    pub video_width: f64,
    pub skeleton: Vec<Point>,
}

impl HandPose {
    /// `None` for a partial landmark set or when the frame geometry cannot be
    /// mapped.
    pub fn locate(
        hand: &HandLandmarks,
        viewport: Size,
        video: Option<Size>,
        fit: VideoFit,
    ) -> Option<Self> {
        if !hand.is_complete() {
            return None;
        }
        let transform = VideoTransform::new(fit, video.unwrap_or(viewport), viewport)?;
        let index_tip = transform.to_pixels(hand.index_tip()?);
        let thumb_tip = transform.to_pixels(hand.thumb_tip()?);

        Some(Self {
            index_tip,
            thumb_tip,
            video_width: transform.drawn_size().width,
            skeleton: hand.iter().map(|&l| transform.to_pixels(l)).collect(),
        })
    }

    /// Thumb to index distance over the drawn video width.
    pub fn pinch_distance(&self) -> Option<f64> {
        let d = geometry::distance(self.index_tip, self.thumb_tip) / self.video_width;
        d.is_finite().then_some(d)
    }
}

/// Runs one detector frame through the wheel: momentum, layout, pinch, button,
/// then hand rotation. The returned snapshot reflects the final state.
pub fn process_frame(
    state: &mut InteractionState,
    input: &FrameInput<'_>,
    config: &Config,
    source: &mut impl SpinSource,
) -> Snapshot {
    state.advance_physics(&config.physics);
    state.place(&WheelLayout::compute(input.viewport, &config.layout));

    let pose = input.hand.and_then(|hand| {
        let pose = HandPose::locate(hand, input.viewport, input.video, config.layout.video_fit);
        if pose.is_none() {
            log::debug!(
                "Ignoring hand with {} landmarks on a {:?} viewport",
                hand.len(),
                input.viewport
            );
        }
        pose
    });

    match &pose {
        Some(pose) => {
            update_pinch(state, pose, &config.gesture);
            update_button(state, pose.index_tip, &config.gesture, &config.physics, source);
            update_rotation(state, pose.index_tip, &config.gesture);
        }
        None => state.release_hand(),
    }

    Snapshot::capture(state, input.viewport, pose)
}

/// Places the wheel for a new viewport without consuming a frame: no physics
/// tick and no gesture pass. The hand is dropped from the snapshot since its
/// pixel mapping no longer holds.
pub fn relayout(state: &mut InteractionState, viewport: Size, config: &Config) -> Snapshot {
    state.place(&WheelLayout::compute(viewport, &config.layout));
    Snapshot::capture(state, viewport, None)
}

fn update_pinch(state: &mut InteractionState, pose: &HandPose, gesture: &GestureConfig) {
    let Some(distance) = pose.pinch_distance() else {
        return;
    };

    let next = state.pinch.update(distance, gesture);
    if next != state.pinch {
        log::debug!("Pinch {:?} -> {:?} at {:.3}", state.pinch, next, distance);
        state.pinch = next;
    }
}

fn update_button(
    state: &mut InteractionState,
    tip: Point,
    gesture: &GestureConfig,
    physics: &PhysicsConfig,
    source: &mut impl SpinSource,
) {
    let hit = state.button_rect.expand(gesture.button_margin).contains(tip);
    let pinched = state.pinch.is_pinched();
    state.button.hovered = hit;

    // edge triggered: holding the pinch on the button does not relaunch
    if hit && pinched && !state.is_spinning() && !state.button.pressed {
        state.button.pressed = true;
        state.trigger_spin(source, physics);
    }
    if (!hit || !pinched) && !state.is_spinning() {
        state.button.pressed = false;
    }
}

fn update_rotation(state: &mut InteractionState, tip: Point, gesture: &GestureConfig) {
    let near = state.wheel_radius > 0.0
        && geometry::distance(tip, state.wheel_center)
            < state.wheel_radius * gesture.near_wheel_ratio;
    state.hand_near_wheel = near;

    if !near || state.button.hovered || state.is_spinning() {
        state.prev_hand_angle = None;
        return;
    }

    let angle = geometry::angle_from_center(state.wheel_center, tip);
    if let Some(prev) = state.prev_hand_angle {
        state.rotation_angle += geometry::normalize_delta(angle - prev);
    }
    state.prev_hand_angle = Some(angle);
}
