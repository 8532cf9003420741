//! Centralized color theme for the application.
//!
//! All colors used for map rendering and the egui overlays live here.

use bevy::prelude::Color;

// ============================================================================
// Grid Colors
// ============================================================================

/// Semi-transparent grey grid lines
pub const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

// ============================================================================
// Drawing Colors
// ============================================================================

/// Fill of a drawn point
pub const POINT_FILL: Color = Color::WHITE;

/// Ring around a drawn point
pub const POINT_OUTLINE: Color = Color::srgb(0.0, 170.0 / 255.0, 215.0 / 255.0);

/// Wide translucent glow under the connecting line
pub const LINE_GLOW: Color = Color::srgba(0.0, 0.0, 0.0, 0.4);

/// Core of the connecting line
pub const LINE_CORE: Color = Color::srgb(0.0, 170.0 / 255.0, 215.0 / 255.0);

/// Polygon tint
pub const POLYGON_FILL: Color = Color::srgba(0.0, 0.666, 0.843, 0.25);

/// Polygon outline
pub const POLYGON_OUTLINE: Color = Color::WHITE;

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Highlight for the active tool
    pub const ACTIVE_TOOL: egui::Color32 = egui::Color32::from_rgb(0, 170, 215);
}
