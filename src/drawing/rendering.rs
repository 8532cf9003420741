//! Gizmo rendering for active drawings. Geometry is recomputed every frame.

use bevy::prelude::*;

use crate::constants::POINT_MARKER_RADIUS;
use crate::params::CameraParams;
use crate::theme;

use super::gizmo::DrawingGlowGizmoGroup;
use super::session::UserDrawing;

pub fn render_drawings(
    mut gizmos: Gizmos,
    mut glow: Gizmos<DrawingGlowGizmoGroup>,
    drawings: Query<&UserDrawing>,
    camera: CameraParams,
) {
    let marker_radius = POINT_MARKER_RADIUS * camera.zoom_scale();

    for drawing in drawings.iter() {
        let Some(points) = drawing.points() else {
            continue;
        };

        let line: Vec<Vec2> = drawing
            .polyline_positions()
            .iter()
            .map(|p| p.truncate())
            .collect();

        // Gizmos only stroke, so the polygon tint is a wide band along its ring
        if drawing.polygon().is_some() {
            glow.linestrip_2d(line.iter().copied(), theme::POLYGON_FILL);
            gizmos.linestrip_2d(line.iter().copied(), theme::POLYGON_OUTLINE);
        } else if line.len() >= 2 {
            glow.linestrip_2d(line.iter().copied(), theme::LINE_GLOW);
            gizmos.linestrip_2d(line.iter().copied(), theme::LINE_CORE);
        }

        for point in points.iter() {
            let center = point.position.truncate();
            gizmos.circle_2d(center, marker_radius, theme::POINT_OUTLINE);
            gizmos.circle_2d(center, marker_radius * 0.5, theme::POINT_FILL);
        }
    }
}
