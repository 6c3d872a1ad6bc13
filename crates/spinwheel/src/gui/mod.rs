pub mod app;
pub mod theme;
pub mod view;

pub use view::draw;

pub const HUB_RADIUS_FACTOR: f64 = 0.3;
pub const POINTER_GAP: f64 = 15.0;
pub const SWATCH_WIDTH: f64 = 180.0;
pub const SWATCH_HEIGHT: f64 = 60.0;
pub const SWATCH_TOP: f64 = 30.0;
pub const BUTTON_CORNER_RADIUS: f64 = 15.0;
pub const CURSOR_RADIUS: f64 = 15.0;
pub const SKELETON_JOINT_RADIUS: f64 = 3.0;
