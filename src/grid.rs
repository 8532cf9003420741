use bevy::prelude::*;

use crate::camera::{CameraZoom, MapCamera};
use crate::config::AppConfig;
use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, GRID_SIZE};
use crate::theme;

/// Indices of the first and last grid line covering `[center - extent/2, center + extent/2]`
pub fn grid_line_range(center: f32, extent: f32, grid_size: f32) -> (i32, i32) {
    let start = ((center - extent / 2.0) / grid_size).floor() as i32;
    let end = ((center + extent / 2.0) / grid_size).ceil() as i32;
    (start, end)
}

pub fn draw_grid(
    mut gizmos: Gizmos,
    config: Res<AppConfig>,
    camera_query: Query<(&Transform, &CameraZoom), With<MapCamera>>,
) {
    if !config.data.grid_visible {
        return;
    }

    let Ok((camera_transform, zoom)) = camera_query.single() else {
        return;
    };

    let view_width = DEFAULT_WINDOW_WIDTH * zoom.scale;
    let view_height = DEFAULT_WINDOW_HEIGHT * zoom.scale;
    let camera_pos = camera_transform.translation.truncate();

    let (start_x, end_x) = grid_line_range(camera_pos.x, view_width, GRID_SIZE);
    let (start_y, end_y) = grid_line_range(camera_pos.y, view_height, GRID_SIZE);

    for x in start_x..=end_x {
        let x_pos = x as f32 * GRID_SIZE;
        gizmos.line_2d(
            Vec2::new(x_pos, start_y as f32 * GRID_SIZE),
            Vec2::new(x_pos, end_y as f32 * GRID_SIZE),
            theme::GRID_COLOR,
        );
    }

    for y in start_y..=end_y {
        let y_pos = y as f32 * GRID_SIZE;
        gizmos.line_2d(
            Vec2::new(start_x as f32 * GRID_SIZE, y_pos),
            Vec2::new(end_x as f32 * GRID_SIZE, y_pos),
            theme::GRID_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_centered_at_origin() {
        assert_eq!(grid_line_range(0.0, 400.0, 100.0), (-2, 2));
    }

    #[test]
    fn test_range_rounds_outward() {
        assert_eq!(grid_line_range(50.0, 300.0, 100.0), (-1, 2));
    }

    #[test]
    fn test_range_negative_center() {
        assert_eq!(grid_line_range(-250.0, 100.0, 100.0), (-3, -2));
    }
}
