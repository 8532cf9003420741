//! Open polyline vs. closed polygon, derived from a [`PointSet`].
//!
//! Geometry is never stored. The render sink calls [`ShapeState::polyline_positions`]
//! and [`ShapeState::polygon`] every frame.

use bevy::prelude::*;

use super::points::PointSet;

/// Outer ring of the closed shape, without the repeated first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonHierarchy {
    pub positions: Vec<Vec3>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeState {
    close_loop: bool,
}

impl ShapeState {
    pub fn is_closed(&self) -> bool {
        self.close_loop
    }

    /// Close the loop. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        let changed = !self.close_loop;
        self.close_loop = true;
        changed
    }

    /// Call after a point was removed. Reverts to an open line when fewer than
    /// two points remain; returns true if that happened.
    pub fn after_removal(&mut self, remaining: usize) -> bool {
        if self.close_loop && remaining < 2 {
            self.close_loop = false;
            return true;
        }
        false
    }

    /// PointSet positions, with the first repeated at the end while closed
    pub fn polyline_positions(&self, points: &PointSet) -> Vec<Vec3> {
        let mut positions = points.positions();
        if self.close_loop
            && let Some(first) = positions.first().copied()
        {
            positions.push(first);
        }
        positions
    }

    /// The polygon exists exactly while the loop is closed
    pub fn polygon(&self, points: &PointSet) -> Option<PolygonHierarchy> {
        self.close_loop.then(|| PolygonHierarchy {
            positions: points.positions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> PointSet {
        let mut set = PointSet::default();
        set.push(Vec3::new(0.0, 0.0, 0.0));
        set.push(Vec3::new(10.0, 0.0, 0.0));
        set.push(Vec3::new(10.0, 10.0, 0.0));
        set
    }

    #[test]
    fn test_open_polyline_matches_points() {
        let set = three_points();
        let shape = ShapeState::default();
        assert_eq!(shape.polyline_positions(&set), set.positions());
        assert!(shape.polygon(&set).is_none());
    }

    #[test]
    fn test_closed_polyline_repeats_first() {
        let set = three_points();
        let mut shape = ShapeState::default();
        assert!(shape.close());

        let line = shape.polyline_positions(&set);
        assert_eq!(line.len(), set.len() + 1);
        assert_eq!(line.first(), line.last());

        let polygon = shape.polygon(&set).unwrap();
        assert_eq!(polygon.positions, set.positions());
    }

    #[test]
    fn test_close_twice_reports_no_change() {
        let mut shape = ShapeState::default();
        assert!(shape.close());
        assert!(!shape.close());
        assert!(shape.is_closed());
    }

    #[test]
    fn test_closed_empty_set_has_empty_polyline() {
        let mut shape = ShapeState::default();
        shape.close();
        assert!(shape.polyline_positions(&PointSet::default()).is_empty());
    }

    #[test]
    fn test_after_removal_reverts_below_two() {
        let mut shape = ShapeState::default();
        shape.close();
        assert!(!shape.after_removal(2));
        assert!(shape.is_closed());
        assert!(shape.after_removal(1));
        assert!(!shape.is_closed());
        // Already open: nothing to revert
        assert!(!shape.after_removal(0));
    }
}
