use super::theme::ThemeColors;
use super::{
    BUTTON_CORNER_RADIUS, CURSOR_RADIUS, HUB_RADIUS_FACTOR, POINTER_GAP, SKELETON_JOINT_RADIUS,
    SWATCH_HEIGHT, SWATCH_TOP, SWATCH_WIDTH,
};
use crate::wheel::Snapshot;
use cairo::{Context, LinearGradient, RadialGradient};
use palette::{Hsl, IntoColor, Srgb, Srgba};
use std::f64::consts::PI;
use wheelfeed::geometry::{Point, Rect};
use wheelfeed::landmarks::HAND_CONNECTIONS;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn hue_rgb(hue: u32, lightness: f32) -> (f64, f64, f64) {
    let hsl: Hsl = Hsl::new(hue as f32, 1.0, lightness);
    let rgb: Srgb = hsl.into_color();
    let (r, g, b) = rgb.into_components();
    (r as f64, g as f64, b as f64)
}

fn centered_text(cr: &Context, text: &str, at: Point, size: f64) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

struct WheelRenderer<'a> {
    snapshot: &'a Snapshot,
    colors: &'a ThemeColors,
}

impl<'a> WheelRenderer<'a> {
    fn new(snapshot: &'a Snapshot, colors: &'a ThemeColors) -> Self {
        Self { snapshot, colors }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        if self.snapshot.wheel_radius <= 0.0 {
            return Ok(());
        }
        self.draw_segments(cr)?;
        self.draw_hub(cr)?;
        self.draw_pointer(cr)?;
        self.draw_swatch(cr)?;
        self.draw_button(cr)
    }

    fn draw_segments(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (c, radius) = (self.snapshot.wheel_center, self.snapshot.wheel_radius);
        let step = 2.0 * PI / self.snapshot.palette.len().max(1) as f64;

        cr.save()?;
        cr.translate(c.x, c.y);
        cr.rotate(self.snapshot.rotation_angle.to_radians());

        for (i, &hue) in self.snapshot.palette.iter().enumerate() {
            let gradient = RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, radius);
            for (offset, lightness) in [(0.0, 0.4), (0.8, 0.6), (1.0, 0.3)] {
                let (r, g, b) = hue_rgb(hue, lightness);
                gradient.add_color_stop_rgb(offset, r, g, b);
            }

            cr.move_to(0.0, 0.0);
            cr.arc(0.0, 0.0, radius, i as f64 * step, (i + 1) as f64 * step);
            cr.close_path();
            cr.set_source(&gradient)?;
            cr.fill_preserve()?;
            cr.set_source_rgba(0.0, 0.0, 0.0, 0.2);
            cr.set_line_width(2.0);
            cr.stroke()?;
        }
        cr.restore()
    }

    fn draw_hub(&self, cr: &Context) -> Result<(), cairo::Error> {
        let c = self.snapshot.wheel_center;
        let hub_radius = self.snapshot.wheel_radius * HUB_RADIUS_FACTOR;
        let (inner, outer) = if self.snapshot.hand_near_wheel {
            self.colors.hub_near
        } else {
            self.colors.hub
        };

        let gradient = RadialGradient::new(c.x, c.y, 5.0_f64.min(hub_radius), c.x, c.y, hub_radius);
        let (r, g, b, a) = inner.into_components();
        gradient.add_color_stop_rgba(0.0, r, g, b, a);
        let (r, g, b, a) = outer.into_components();
        gradient.add_color_stop_rgba(1.0, r, g, b, a);

        cr.arc(c.x, c.y, hub_radius, 0.0, 2.0 * PI);
        cr.set_source(&gradient)?;
        cr.fill_preserve()?;
        set_color(cr, self.colors.outline);
        cr.set_line_width(4.0);
        cr.stroke()?;

        cr.set_source_rgba(0.0, 0.0, 0.0, 0.8);
        centered_text(cr, "GRAB", c, 18.0)
    }

    fn draw_pointer(&self, cr: &Context) -> Result<(), cairo::Error> {
        let c = self.snapshot.wheel_center;
        let tip_y = c.y - self.snapshot.wheel_radius - POINTER_GAP;

        cr.move_to(c.x - 15.0, tip_y - 20.0);
        cr.line_to(c.x + 15.0, tip_y - 20.0);
        cr.line_to(c.x, tip_y + 10.0);
        cr.close_path();
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.fill_preserve()?;
        set_color(cr, self.colors.outline);
        cr.set_line_width(2.0);
        cr.stroke()
    }

    fn draw_swatch(&self, cr: &Context) -> Result<(), cairo::Error> {
        let c = self.snapshot.wheel_center;
        let rect = Rect::new(c.x - SWATCH_WIDTH / 2.0, SWATCH_TOP, SWATCH_WIDTH, SWATCH_HEIGHT);
        let (r, g, b) = hue_rgb(self.snapshot.selected_hue(), 0.5);

        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        cr.set_source_rgb(r, g, b);
        cr.fill_preserve()?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.set_line_width(3.0);
        cr.stroke()?;

        centered_text(cr, "SELECTED", rect.center(), 20.0)
    }

    fn draw_button(&self, cr: &Context) -> Result<(), cairo::Error> {
        let rect = self.snapshot.button_rect;
        let visual = self.snapshot.button_visual;
        let (top, bottom) = self.colors.button(visual);

        let gradient = LinearGradient::new(rect.x, rect.y, rect.x, rect.y + rect.height);
        let (r, g, b, a) = top.into_components();
        gradient.add_color_stop_rgba(0.0, r, g, b, a);
        let (r, g, b, a) = bottom.into_components();
        gradient.add_color_stop_rgba(1.0, r, g, b, a);

        rounded_rect(cr, &rect, BUTTON_CORNER_RADIUS);
        cr.set_source(&gradient)?;
        cr.fill_preserve()?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.set_line_width(3.0);
        cr.stroke()?;

        centered_text(cr, &visual.to_string(), rect.center(), 22.0)
    }
}

fn draw_hand(cr: &Context, snapshot: &Snapshot, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(hand) = &snapshot.hand else {
        return Ok(());
    };

    // skeleton first so the interaction marks stay on top
    set_color(cr, colors.skeleton);
    cr.set_line_width(2.0);
    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(pa), Some(pb)) = (hand.skeleton.get(a), hand.skeleton.get(b)) {
            cr.move_to(pa.x, pa.y);
            cr.line_to(pb.x, pb.y);
        }
    }
    cr.stroke()?;
    for p in &hand.skeleton {
        cr.new_sub_path();
        cr.arc(p.x, p.y, SKELETON_JOINT_RADIUS, 0.0, 2.0 * PI);
    }
    cr.fill()?;

    let pinch_color = if snapshot.pinching {
        colors.cursor_pinched
    } else {
        Srgba::new(1.0, 1.0, 1.0, 0.3)
    };
    cr.move_to(hand.index_tip.x, hand.index_tip.y);
    cr.line_to(hand.thumb_tip.x, hand.thumb_tip.y);
    set_color(cr, pinch_color);
    cr.set_line_width(4.0);
    cr.stroke()?;

    if snapshot.engaged {
        cr.move_to(hand.index_tip.x, hand.index_tip.y);
        cr.line_to(snapshot.wheel_center.x, snapshot.wheel_center.y);
        set_color(cr, colors.accent);
        cr.set_line_width(2.0);
        cr.set_dash(&[5.0, 5.0], 0.0);
        cr.stroke()?;
        cr.set_dash(&[], 0.0);
    }

    cr.arc(hand.index_tip.x, hand.index_tip.y, CURSOR_RADIUS, 0.0, 2.0 * PI);
    set_color(
        cr,
        if snapshot.pinching {
            colors.cursor_pinched
        } else {
            colors.cursor
        },
    );
    cr.fill_preserve()?;
    set_color(cr, colors.foreground);
    cr.set_line_width(3.0);
    cr.stroke()
}

pub fn draw(cr: &Context, snapshot: &Snapshot, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    WheelRenderer::new(snapshot, colors).draw(cr)?;
    draw_hand(cr, snapshot, colors)
}
