pub mod layout;
pub mod processor;
pub mod snapshot;
pub mod spin;
pub mod state;

pub use layout::WheelLayout;
pub use processor::{FrameInput, HandPose, process_frame, relayout};
pub use snapshot::{ButtonVisual, Snapshot};
pub use spin::{RandSource, SpinSource};
pub use state::{ButtonState, InteractionState, PinchState, SpinPhase, color_palette};

/// Direction of the fixed pointer in wheel-local degrees (straight up on screen).
pub const POINTER_ANGLE: f64 = 270.0;
pub const FULL_TURN: f64 = 360.0;
