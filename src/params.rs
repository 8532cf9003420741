//! Map input helpers: where the cursor is on the map, and whether egui owns
//! the pointer or the keyboard this frame.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MapCamera;

/// Primary window plus the map camera
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera:
        Query<'w, 's, (&'static Camera, &'static GlobalTransform, &'static Projection), With<MapCamera>>,
}

impl CameraParams<'_, '_> {
    /// Map position under the cursor. None while the cursor is outside the window.
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor).ok()
    }

    /// World units per screen pixel
    pub fn zoom_scale(&self) -> f32 {
        match self.camera.single() {
            Ok((_, _, Projection::Orthographic(ortho))) => ortho.scale,
            _ => 1.0,
        }
    }
}

/// Clicks over an egui panel are not map picks
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// A focused text field takes key presses
pub fn is_typing_in_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
