use crate::config::LayoutConfig;
use wheelfeed::geometry::{Point, Rect, Size};

/// Where the wheel and its button sit for a given viewport. Computed before any
/// gesture is interpreted so hit tests run against this frame's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub center: Point,
    pub radius: f64,
    pub button: Rect,
}

impl WheelLayout {
    pub fn compute(viewport: Size, layout: &LayoutConfig) -> Self {
        let center = Point::new(viewport.width * layout.center_x_ratio, viewport.height / 2.0);
        let radius = if layout.radius_divisor > 0.0 {
            layout
                .max_radius
                .min(viewport.height / layout.radius_divisor)
                .max(0.0)
        } else {
            0.0
        };

        let button = Rect::new(
            center.x - layout.button_width / 2.0,
            center.y + radius + layout.button_offset,
            layout.button_width,
            layout.button_height,
        );

        Self {
            center,
            radius,
            button,
        }
    }
}
