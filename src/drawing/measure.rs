//! Measuring tool: reports the drawn length (and area, once closed) in the prompt.

use bevy::prelude::*;

use super::observer::DrawingObserver;
use super::points::PointSet;
use super::shape::ShapeState;

/// Total length of a polyline
pub fn path_length(positions: &[Vec3]) -> f32 {
    positions.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Shoelace area of a ring on the XY plane
pub fn ring_area(positions: &[Vec3]) -> f32 {
    if positions.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..positions.len() {
        let a = positions[i];
        let b = positions[(i + 1) % positions.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    (twice_area / 2.0).abs()
}

pub fn format_distance(meters: f32) -> String {
    if meters < 1000.0 {
        format!("{:.2} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

pub fn format_area(square_meters: f32) -> String {
    if square_meters < 1_000_000.0 {
        format!("{:.2} m²", square_meters)
    } else {
        format!("{:.2} km²", square_meters / 1_000_000.0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DistanceMeasurer;

impl DrawingObserver for DistanceMeasurer {
    fn dialog_message(&self, points: &PointSet, shape: &ShapeState) -> String {
        if points.len() < 2 {
            return String::new();
        }

        let line = shape.polyline_positions(points);
        let mut message = format_distance(path_length(&line));
        if let Some(polygon) = shape.polygon(points)
            && polygon.positions.len() >= 3
        {
            message.push_str(&format!(
                "  Area: {}",
                format_area(ring_area(&polygon.positions))
            ));
        }
        message
    }
}
