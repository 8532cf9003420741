//! Centralized constants used across the application.
//!
//! Magic numbers and default values that are used in more than one place.

/// Default window width in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Heading shown in the prompt dialog while drawing
pub const DEFAULT_MESSAGE_HEADER: &str = "Draw on Map";

/// Heading of the measuring tool's prompt dialog
pub const MEASURE_MESSAGE_HEADER: &str = "Measuring Tool";

/// Pick radius in screen pixels; scaled by camera zoom before hit testing
pub const DEFAULT_PICK_RADIUS: f32 = 10.0;

/// Spacing of the reference grid in world units
pub const GRID_SIZE: f32 = 100.0;

/// Radius of a drawn point marker in screen pixels
pub const POINT_MARKER_RADIUS: f32 = 6.0;

/// Width of the glow drawn under the connecting line
pub const LINE_GLOW_WIDTH: f32 = 10.0;
