//! Gizmo group for the wide glow under drawn lines.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::constants::LINE_GLOW_WIDTH;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct DrawingGlowGizmoGroup;

pub fn configure_drawing_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DrawingGlowGizmoGroup>();
    config.line.width = LINE_GLOW_WIDTH;
}
